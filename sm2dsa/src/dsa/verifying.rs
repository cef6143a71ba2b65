//! Support for verifying SM2DSA signatures.

use super::{Signature, SignatureEngine};
use crate::{AffinePoint, CurveParams, Jacobian, Misuse, Result, ScalarMultiplication};
use core::fmt::{self, Debug};
use digest::Digest;
use num_bigint::BigUint;
use signature::Verifier;
use sm3::Sm3;

/// SM2DSA public key used for verifying signatures are valid for a given
/// message.
///
/// ## Usage
///
/// The [`signature`] crate defines the following trait which is the
/// primary API for verifying:
///
/// - [`Verifier`]: verify a message against a provided key and signature
pub struct VerifyingKey<B = Jacobian, D = Sm3> {
    /// Engine for the curve this key lives on.
    engine: SignatureEngine<B, D>,

    /// Signer's public point.
    public_key: AffinePoint,
}

impl<B, D> VerifyingKey<B, D>
where
    B: ScalarMultiplication,
    D: Digest,
{
    /// Initialize [`VerifyingKey`] from an engine and a public point.
    ///
    /// Returns [`Misuse::InvalidPublicKey`] if the point is the additive
    /// identity (a.k.a. point at infinity) or does not lie on the engine's
    /// curve.
    pub fn new(engine: SignatureEngine<B, D>, public_key: AffinePoint) -> Result<Self> {
        if public_key.is_identity() || !public_key.is_on_curve(engine.curve()) {
            return Err(Misuse::InvalidPublicKey.into());
        }

        Ok(Self { engine, public_key })
    }

    /// Initialize [`VerifyingKey`] from affine coordinates.
    pub fn from_coordinates(engine: SignatureEngine<B, D>, x: BigUint, y: BigUint) -> Result<Self> {
        let public_key = AffinePoint::new(engine.curve(), x, y)?;
        Self::new(engine, public_key)
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.public_key
    }

    /// Borrow the engine this key verifies with.
    pub fn engine(&self) -> &SignatureEngine<B, D> {
        &self.engine
    }

    /// Borrow the curve parameters.
    pub fn curve(&self) -> &CurveParams {
        self.engine.curve()
    }
}

//
// `*Verifier` trait impls
//

impl<B, D> Verifier<Signature> for VerifyingKey<B, D>
where
    B: ScalarMultiplication,
    D: Digest,
{
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        if self.engine.verify(&self.public_key, msg, signature) {
            Ok(())
        } else {
            Err(signature::Error::new())
        }
    }
}

//
// Other trait impls
//

impl<B, D> AsRef<AffinePoint> for VerifyingKey<B, D> {
    fn as_ref(&self) -> &AffinePoint {
        &self.public_key
    }
}

impl<B, D> From<VerifyingKey<B, D>> for AffinePoint {
    fn from(verifying_key: VerifyingKey<B, D>) -> AffinePoint {
        verifying_key.public_key
    }
}

impl<B, D> Clone for VerifyingKey<B, D> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            public_key: self.public_key.clone(),
        }
    }
}

impl<B, D> Debug for VerifyingKey<B, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyingKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

impl<B, D> Eq for VerifyingKey<B, D> {}
impl<B, D> PartialEq for VerifyingKey<B, D> {
    fn eq(&self, other: &Self) -> bool {
        self.engine == other.engine && self.public_key == other.public_key
    }
}
