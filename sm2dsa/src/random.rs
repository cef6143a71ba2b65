//! Scalar sampling from a cryptographically secure random source.

use crate::{Error, Misuse, Result};
use alloc::vec;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;

/// A source that keeps producing out-of-range candidates is treated as
/// broken after this many draws.
const MAX_SAMPLING_ATTEMPTS: usize = 256;

/// Draw an integer uniformly from `[0, bound)`.
///
/// Candidates are read as big-endian integers of `⌈bits(bound) / 8⌉` bytes
/// with the excess high bits cleared, and rejected until one is below
/// `bound`; each draw succeeds with probability above one half.
pub(crate) fn random_below(rng: &mut impl CryptoRngCore, bound: &BigUint) -> Result<BigUint> {
    if bound.is_zero() {
        return Err(Misuse::InvalidCurve.into());
    }

    let bits = bound.bits();
    let len = (bits + 7) / 8;
    let excess = len * 8 - bits;
    let mut bytes = vec![0u8; len as usize];

    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        rng.try_fill_bytes(&mut bytes).map_err(|_| Error::RandomSource)?;
        bytes[0] &= 0xffu8 >> excess;

        let candidate = BigUint::from_bytes_be(&bytes);
        if &candidate < bound {
            return Ok(candidate);
        }
    }

    Err(Error::RandomSource)
}

/// Draw an integer uniformly from `[1, n-1]`.
pub(crate) fn random_nonzero(rng: &mut impl CryptoRngCore, n: &BigUint) -> Result<BigUint> {
    if n <= &BigUint::one() {
        return Err(Misuse::InvalidCurve.into());
    }

    Ok(random_below(rng, &(n - 1u32))? + 1u32)
}
