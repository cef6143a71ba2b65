//! Support for SM2DSA signing.

use super::{Signature, SignatureEngine, VerifyingKey};
use crate::{Jacobian, KeyPair, Misuse, Result, ScalarMultiplication};
use core::fmt::{self, Debug};
use digest::Digest;
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use signature::{KeypairRef, RandomizedSigner};
use sm3::Sm3;

/// SM2DSA secret key used for signing messages and producing signatures.
///
/// ## Usage
///
/// The [`signature`] crate defines the following trait which is the
/// primary API for signing:
///
/// - [`RandomizedSigner`]: sign a message using this key and a fresh nonce
///   from the given random source
pub struct SigningKey<B = Jacobian, D = Sm3> {
    /// Secret scalar and its public point.
    key_pair: KeyPair,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey<B, D>,
}

impl<B, D> SigningKey<B, D>
where
    B: ScalarMultiplication,
    D: Digest,
{
    /// Create signing key from an engine and a key pair on its curve.
    pub fn new(engine: SignatureEngine<B, D>, key_pair: KeyPair) -> Result<Self> {
        if !engine.curve().is_nonzero_scalar(key_pair.private_key()) {
            return Err(Misuse::InvalidPrivateKey.into());
        }

        let verifying_key = VerifyingKey::new(engine, key_pair.public_key().clone())?;

        Ok(Self {
            key_pair,
            verifying_key,
        })
    }

    /// Create a signing key from a private scalar in `[1, n-1]`.
    pub fn from_private_key(engine: SignatureEngine<B, D>, private_key: BigUint) -> Result<Self> {
        let key_pair = KeyPair::from_private_key::<B>(engine.curve(), private_key)?;
        Self::new(engine, key_pair)
    }

    /// Generate a random [`SigningKey`].
    pub fn random(engine: SignatureEngine<B, D>, rng: &mut impl CryptoRngCore) -> Result<Self> {
        let key_pair = engine.generate_key_pair(rng)?;
        Self::new(engine, key_pair)
    }

    /// Borrow the underlying [`KeyPair`].
    ///
    /// # ⚠️ Warning
    ///
    /// This value contains key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey<B, D> {
        &self.verifying_key
    }

    /// Sign `msg` with a fresh nonce drawn from `rng`.
    pub fn sign(&self, msg: &[u8], rng: &mut impl CryptoRngCore) -> Result<Signature> {
        self.verifying_key
            .engine()
            .sign(&self.key_pair, msg, rng)
    }
}

//
// `*Signer` trait impls
//

impl<B, D> RandomizedSigner<Signature> for SigningKey<B, D>
where
    B: ScalarMultiplication,
    D: Digest,
{
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> signature::Result<Signature> {
        Ok(self.sign(msg, rng)?)
    }
}

//
// Other trait impls
//

impl<B, D> AsRef<VerifyingKey<B, D>> for SigningKey<B, D> {
    fn as_ref(&self) -> &VerifyingKey<B, D> {
        &self.verifying_key
    }
}

impl<B, D> Clone for SigningKey<B, D> {
    fn clone(&self) -> Self {
        Self {
            key_pair: self.key_pair.clone(),
            verifying_key: self.verifying_key.clone(),
        }
    }
}

impl<B, D> Debug for SigningKey<B, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl<B, D> Eq for SigningKey<B, D> {}
impl<B, D> PartialEq for SigningKey<B, D> {
    fn eq(&self, other: &Self) -> bool {
        self.key_pair == other.key_pair && self.verifying_key == other.verifying_key
    }
}

impl<B, D> KeypairRef for SigningKey<B, D> {
    type VerifyingKey = VerifyingKey<B, D>;
}
