//! Affine curve points.
//!
//! Every non-trivial addition or doubling performs one field inversion, so
//! [`AffinePoint::mul`] costs `O(log k)` inversions. It is the reference
//! implementation that the Jacobian backend is checked against.

use crate::{CurveParams, Misuse, Result};
use num_bigint::BigUint;
use num_traits::Zero;

/// Point on a short Weierstrass curve in affine coordinates.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum AffinePoint {
    /// Additive identity of the group a.k.a. the point at infinity.
    #[default]
    Identity,

    /// Finite point `(x, y)` with both coordinates in `[0, p)`.
    Coordinates {
        /// x-coordinate
        x: BigUint,
        /// y-coordinate
        y: BigUint,
    },
}

impl AffinePoint {
    /// Create a point from coordinates, checking that it lies on `curve`.
    pub fn new(curve: &CurveParams, x: BigUint, y: BigUint) -> Result<Self> {
        let point = Self::from_coordinates(x, y);
        if point.is_on_curve(curve) {
            Ok(point)
        } else {
            Err(Misuse::InvalidPublicKey.into())
        }
    }

    pub(crate) fn from_coordinates(x: BigUint, y: BigUint) -> Self {
        Self::Coordinates { x, y }
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// x-coordinate, or `None` for the point at infinity.
    pub fn x(&self) -> Option<&BigUint> {
        match self {
            Self::Identity => None,
            Self::Coordinates { x, .. } => Some(x),
        }
    }

    /// y-coordinate, or `None` for the point at infinity.
    pub fn y(&self) -> Option<&BigUint> {
        match self {
            Self::Identity => None,
            Self::Coordinates { y, .. } => Some(y),
        }
    }

    /// Does this point satisfy `y² = x³ + ax + b`?
    ///
    /// The point at infinity is always on the curve; coordinates outside of
    /// `[0, p)` never are.
    pub fn is_on_curve(&self, curve: &CurveParams) -> bool {
        let (x, y) = match self {
            Self::Identity => return true,
            Self::Coordinates { x, y } => (x, y),
        };

        let p = curve.field();
        if !p.contains(x) || !p.contains(y) {
            return false;
        }

        let rhs = p.add(
            &p.add(&p.mul(&p.square(x), x), &p.mul(curve.a(), x)),
            curve.b(),
        );
        p.square(y) == rhs
    }

    /// Returns `-self`.
    pub fn neg(&self, curve: &CurveParams) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Coordinates { x, y } => Self::Coordinates {
                x: x.clone(),
                y: curve.field().neg(y),
            },
        }
    }

    /// Returns `self + other`.
    pub fn add(&self, other: &Self, curve: &CurveParams) -> Result<Self> {
        let ((x1, y1), (x2, y2)) = match (self, other) {
            (Self::Identity, _) => return Ok(other.clone()),
            (_, Self::Identity) => return Ok(self.clone()),
            (Self::Coordinates { x: x1, y: y1 }, Self::Coordinates { x: x2, y: y2 }) => {
                ((x1, y1), (x2, y2))
            }
        };

        let p = curve.field();

        if x1 == x2 {
            // P + (-P), which includes doubling a point of order two
            if *y2 == p.neg(y1) {
                return Ok(Self::Identity);
            }

            if y1 == y2 {
                return self.double(curve);
            }
        }

        // λ = (y₂ - y₁) / (x₂ - x₁)
        let lambda = p.mul(&p.sub(y2, y1), &p.invert(&p.sub(x2, x1))?);
        Ok(Self::chord(curve, &lambda, x1, y1, x2))
    }

    /// Returns `self + self`.
    pub fn double(&self, curve: &CurveParams) -> Result<Self> {
        let (x, y) = match self {
            Self::Identity => return Ok(Self::Identity),
            Self::Coordinates { x, y } => (x, y),
        };

        if y.is_zero() {
            return Ok(Self::Identity);
        }

        let p = curve.field();

        // λ = (3x² + a) / 2y
        let numerator = p.add(&p.mul_small(&p.square(x), 3), curve.a());
        let lambda = p.mul(&numerator, &p.invert(&p.mul_small(y, 2))?);
        Ok(Self::chord(curve, &lambda, x, y, x))
    }

    /// Returns `[k] self`.
    ///
    /// Double-and-add over the bits of `k`, least significant first.
    pub fn mul(&self, k: &BigUint, curve: &CurveParams) -> Result<Self> {
        let mut result = Self::Identity;
        let mut addend = self.clone();

        for i in 0..k.bits() {
            if k.bit(i) {
                result = result.add(&addend, curve)?;
            }

            if i + 1 < k.bits() {
                addend = addend.double(curve)?;
            }
        }

        Ok(result)
    }

    /// Third intersection of the line with slope `λ` through `(x₁, y₁)`,
    /// reflected over the x-axis.
    fn chord(
        curve: &CurveParams,
        lambda: &BigUint,
        x1: &BigUint,
        y1: &BigUint,
        x2: &BigUint,
    ) -> Self {
        let p = curve.field();
        let x3 = p.sub(&p.sub(&p.square(lambda), x1), x2);
        let y3 = p.sub(&p.mul(lambda, &p.sub(x1, &x3)), y1);
        Self::Coordinates { x: x3, y: y3 }
    }
}
