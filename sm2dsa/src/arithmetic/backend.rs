//! Scalar multiplication strategies.
//!
//! Both strategies compute the same `[k] P`; they differ in how many field
//! inversions they spend on it.

use crate::{AffinePoint, CurveParams, ProjectivePoint, Result};
use num_bigint::BigUint;

mod sealed {
    pub trait Sealed {}
}

/// Capability to multiply a curve point by a scalar.
///
/// Implemented by [`Affine`] and [`Jacobian`]. Signing and verification are
/// generic over this trait and behave identically with either strategy.
pub trait ScalarMultiplication: sealed::Sealed {
    /// Returns `[k] point`.
    fn mul(curve: &CurveParams, k: &BigUint, point: &AffinePoint) -> Result<AffinePoint>;

    /// Returns `[k] G`.
    fn mul_generator(curve: &CurveParams, k: &BigUint) -> Result<AffinePoint> {
        Self::mul(curve, k, &curve.generator())
    }
}

/// Double-and-add in affine coordinates: one inversion per group operation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Affine;

impl sealed::Sealed for Affine {}

impl ScalarMultiplication for Affine {
    fn mul(curve: &CurveParams, k: &BigUint, point: &AffinePoint) -> Result<AffinePoint> {
        point.mul(k, curve)
    }
}

/// Double-and-add in Jacobian coordinates: one inversion in total.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Jacobian;

impl sealed::Sealed for Jacobian {}

impl ScalarMultiplication for Jacobian {
    fn mul(curve: &CurveParams, k: &BigUint, point: &AffinePoint) -> Result<AffinePoint> {
        ProjectivePoint::from_affine(point)
            .mul(k, curve)
            .to_affine(curve)
    }
}
