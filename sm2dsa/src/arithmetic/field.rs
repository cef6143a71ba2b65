//! Arithmetic modulo a prime.
//!
//! The same routines serve the base field (modulo `p`) and the scalar field
//! (modulo the group order `n`). Inputs to [`PrimeModulus::add`],
//! [`PrimeModulus::sub`] and [`PrimeModulus::neg`] must already be reduced;
//! every output is in `[0, m)`.

use crate::{Error, Result};
use core::mem;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Odd prime modulus together with the operations over its residues.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrimeModulus {
    modulus: BigUint,
}

impl PrimeModulus {
    /// Caller guarantees `modulus` is an odd prime.
    pub(crate) fn new(modulus: BigUint) -> Self {
        Self { modulus }
    }

    /// The modulus `m` itself.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Number of bytes in a big-endian encoding of a residue.
    pub fn byte_len(&self) -> usize {
        // `bits()` of a 256-bit modulus is 256, which always fits in `usize`.
        ((self.modulus.bits() + 7) / 8) as usize
    }

    /// Reduce an arbitrary integer into `[0, m)`.
    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.modulus
    }

    /// Is `a` already a canonical residue?
    pub fn contains(&self, a: &BigUint) -> bool {
        a < &self.modulus
    }

    /// Returns `a + b mod m`.
    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        debug_assert!(self.contains(a) && self.contains(b));
        let sum = a + b;
        if sum >= self.modulus {
            sum - &self.modulus
        } else {
            sum
        }
    }

    /// Returns `a - b mod m`.
    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        debug_assert!(self.contains(a) && self.contains(b));
        if a >= b {
            a - b
        } else {
            &self.modulus - (b - a)
        }
    }

    /// Returns `-a mod m`.
    pub fn neg(&self, a: &BigUint) -> BigUint {
        debug_assert!(self.contains(a));
        if a.is_zero() {
            BigUint::zero()
        } else {
            &self.modulus - a
        }
    }

    /// Returns `a * b mod m`.
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Returns `a² mod m`.
    pub fn square(&self, a: &BigUint) -> BigUint {
        self.mul(a, a)
    }

    /// Multiply a residue by a small constant.
    pub(crate) fn mul_small(&self, a: &BigUint, k: u32) -> BigUint {
        (a * k) % &self.modulus
    }

    /// Compute `a⁻¹ mod m` with the extended Euclidean algorithm.
    ///
    /// The Bézout coefficient of `a` is tracked modulo `m`, so no signed
    /// intermediates are needed. Returns [`Error::Arithmetic`] when
    /// `gcd(a, m) ≠ 1`, which for a prime modulus means `a ≡ 0`.
    pub fn invert(&self, a: &BigUint) -> Result<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return Err(Error::Arithmetic);
        }

        let (mut old_r, mut r) = (a, self.modulus.clone());
        let (mut old_s, mut s) = (BigUint::one(), BigUint::zero());

        while !r.is_zero() {
            let quotient = &old_r / &r;

            let next_r = &old_r % &r;
            old_r = mem::replace(&mut r, next_r);

            let next_s = self.sub(&old_s, &self.mul(&quotient, &s));
            old_s = mem::replace(&mut s, next_s);
        }

        if !old_r.is_one() {
            return Err(Error::Arithmetic);
        }

        Ok(old_s)
    }
}
