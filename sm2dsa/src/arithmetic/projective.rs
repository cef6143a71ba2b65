//! Jacobian curve points.
//!
//! `(X, Y, Z)` represents the affine point `(X/Z², Y/Z³)` when `Z ≠ 0` and
//! the point at infinity when `Z = 0`. Scalar multiplication stays in these
//! coordinates and pays for a single inversion in [`ProjectivePoint::to_affine`].

use crate::{AffinePoint, CurveParams, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Point on a short Weierstrass curve in Jacobian coordinates.
///
/// Many triples represent the same point, so there is no
/// `PartialEq` impl: compare with [`ProjectivePoint::same_point`] or after
/// converting to affine.
#[derive(Clone, Debug)]
pub struct ProjectivePoint {
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

impl ProjectivePoint {
    /// Additive identity of the group a.k.a. the point at infinity.
    pub fn identity() -> Self {
        Self {
            x: BigUint::one(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    /// Lift an affine point with `Z = 1`.
    pub fn from_affine(point: &AffinePoint) -> Self {
        match point {
            AffinePoint::Identity => Self::identity(),
            AffinePoint::Coordinates { x, y } => Self {
                x: x.clone(),
                y: y.clone(),
                z: BigUint::one(),
            },
        }
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Returns the affine representation of this point.
    pub fn to_affine(&self, curve: &CurveParams) -> Result<AffinePoint> {
        if self.is_identity() {
            return Ok(AffinePoint::Identity);
        }

        let p = curve.field();
        let z_inv = p.invert(&self.z)?;
        let z_inv2 = p.square(&z_inv);
        let z_inv3 = p.mul(&z_inv2, &z_inv);

        Ok(AffinePoint::from_coordinates(
            p.mul(&self.x, &z_inv2),
            p.mul(&self.y, &z_inv3),
        ))
    }

    /// Do `self` and `other` represent the same affine point?
    ///
    /// Compares `X₁Z₂² = X₂Z₁²` and `Y₁Z₂³ = Y₂Z₁³` without inverting.
    pub fn same_point(&self, other: &Self, curve: &CurveParams) -> bool {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => true,
            (false, false) => {
                let (u1, u2, s1, s2) = self.cross_terms(other, curve);
                u1 == u2 && s1 == s2
            }
            _ => false,
        }
    }

    /// Returns `self + self`.
    pub fn double(&self, curve: &CurveParams) -> Self {
        if self.is_identity() || self.y.is_zero() {
            return Self::identity();
        }

        let p = curve.field();
        let y2 = p.square(&self.y);
        let z2 = p.square(&self.z);

        // S = 4XY²
        let s = p.mul_small(&p.mul(&self.x, &y2), 4);

        // M = 3X² + aZ⁴
        let m = p.add(
            &p.mul_small(&p.square(&self.x), 3),
            &p.mul(curve.a(), &p.square(&z2)),
        );

        // X₃ = M² - 2S
        let x3 = p.sub(&p.square(&m), &p.mul_small(&s, 2));

        // Y₃ = M(S - X₃) - 8Y⁴
        let y3 = p.sub(
            &p.mul(&m, &p.sub(&s, &x3)),
            &p.mul_small(&p.square(&y2), 8),
        );

        // Z₃ = 2YZ
        let z3 = p.mul_small(&p.mul(&self.y, &self.z), 2);

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `self + other`.
    pub fn add(&self, other: &Self, curve: &CurveParams) -> Self {
        if self.is_identity() {
            return other.clone();
        }

        if other.is_identity() {
            return self.clone();
        }

        let p = curve.field();
        let (u1, u2, s1, s2) = self.cross_terms(other, curve);

        if u1 == u2 {
            // Same affine x: either P + (-P) or P + P, whose slope the
            // addition formula cannot express.
            return if s1 == s2 {
                self.double(curve)
            } else {
                Self::identity()
            };
        }

        // H = U₂ - U₁, R = S₂ - S₁
        let h = p.sub(&u2, &u1);
        let r = p.sub(&s2, &s1);
        let h2 = p.square(&h);
        let h3 = p.mul(&h, &h2);
        let u1h2 = p.mul(&u1, &h2);

        // X₃ = R² - H³ - 2U₁H²
        let x3 = p.sub(&p.sub(&p.square(&r), &h3), &p.mul_small(&u1h2, 2));

        // Y₃ = R(U₁H² - X₃) - S₁H³
        let y3 = p.sub(&p.mul(&r, &p.sub(&u1h2, &x3)), &p.mul(&s1, &h3));

        // Z₃ = HZ₁Z₂
        let z3 = p.mul(&h, &p.mul(&self.z, &other.z));

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `[k] self`.
    ///
    /// Double-and-add over the bits of `k`, least significant first, without
    /// leaving Jacobian coordinates.
    pub fn mul(&self, k: &BigUint, curve: &CurveParams) -> Self {
        let mut result = Self::identity();
        let mut addend = self.clone();

        for i in 0..k.bits() {
            if k.bit(i) {
                result = result.add(&addend, curve);
            }

            if i + 1 < k.bits() {
                addend = addend.double(curve);
            }
        }

        result
    }

    /// `(U₁, U₂, S₁, S₂) = (X₁Z₂², X₂Z₁², Y₁Z₂³, Y₂Z₁³)`
    fn cross_terms(
        &self,
        other: &Self,
        curve: &CurveParams,
    ) -> (BigUint, BigUint, BigUint, BigUint) {
        let p = curve.field();
        let z1z1 = p.square(&self.z);
        let z2z2 = p.square(&other.z);

        let u1 = p.mul(&self.x, &z2z2);
        let u2 = p.mul(&other.x, &z1z1);
        let s1 = p.mul(&self.y, &p.mul(&other.z, &z2z2));
        let s2 = p.mul(&other.y, &p.mul(&self.z, &z1z1));

        (u1, u2, s1, s2)
    }
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(point: &AffinePoint) -> Self {
        Self::from_affine(point)
    }
}
