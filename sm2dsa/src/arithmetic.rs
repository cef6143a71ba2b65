//! Pure Rust implementation of group operations on short Weierstrass curves
//! over prime fields.
//!
//! Two point representations are provided:
//!
//! - [`AffinePoint`]: `(x, y)` pairs, one modular inversion per group operation
//! - [`ProjectivePoint`]: Jacobian `(X, Y, Z)` triples, inversion deferred to
//!   the final conversion back to affine
//!
//! [`ScalarMultiplication`] abstracts over the two so that signing and
//! verification can be instantiated with either.

pub(crate) mod affine;
pub(crate) mod backend;
pub(crate) mod field;
pub(crate) mod projective;

#[cfg(doc)]
use crate::{AffinePoint, ProjectivePoint, ScalarMultiplication};
