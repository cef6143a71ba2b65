//! Signer/verifier with replaceable key slots.

use super::{Signature, SignatureEngine};
use crate::{AffinePoint, Jacobian, KeyPair, Misuse, Result, ScalarMultiplication};
use core::fmt::{self, Debug};
use digest::Digest;
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use sm3::Sm3;

/// [`SignatureEngine`] paired with an optional private key and an optional
/// public key.
///
/// Signing needs the private slot, verification the public one. Setting a
/// private key fills both; setting a public key only replaces the public
/// slot, so a context can verify for one party while signing as another.
pub struct Context<B = Jacobian, D = Sm3> {
    engine: SignatureEngine<B, D>,
    key_pair: Option<KeyPair>,
    public_key: Option<AffinePoint>,
}

impl Context {
    /// Empty context on the SM2 recommended curve.
    pub fn sm2() -> Self {
        Self::new(SignatureEngine::sm2())
    }
}

impl<B, D> Context<B, D>
where
    B: ScalarMultiplication,
    D: Digest,
{
    /// Create a context with both key slots empty.
    pub fn new(engine: SignatureEngine<B, D>) -> Self {
        Self {
            engine,
            key_pair: None,
            public_key: None,
        }
    }

    /// Borrow the engine.
    pub fn engine(&self) -> &SignatureEngine<B, D> {
        &self.engine
    }

    /// Generate a fresh key pair, store both halves and return `(d, Q)`.
    pub fn generate_key_pair(
        &mut self,
        rng: &mut impl CryptoRngCore,
    ) -> Result<(BigUint, AffinePoint)> {
        let key_pair = self.engine.generate_key_pair(rng)?;
        let parts = key_pair.clone().into_parts();
        self.store(key_pair);
        Ok(parts)
    }

    /// Store `private_key` and its derived public key.
    pub fn set_private_key(&mut self, private_key: BigUint) -> Result<()> {
        let key_pair = KeyPair::from_private_key::<B>(self.engine.curve(), private_key)?;
        self.store(key_pair);
        Ok(())
    }

    /// Store a public key for verification.
    ///
    /// Returns [`Misuse::InvalidPublicKey`] for the point at infinity or a
    /// point off the curve; the previous key is kept in that case.
    pub fn set_public_key(&mut self, public_key: AffinePoint) -> Result<()> {
        if public_key.is_identity() || !public_key.is_on_curve(self.engine.curve()) {
            return Err(Misuse::InvalidPublicKey.into());
        }

        self.public_key = Some(public_key);
        Ok(())
    }

    /// Borrow the private key, if set.
    pub fn private_key(&self) -> Option<&BigUint> {
        self.key_pair.as_ref().map(KeyPair::private_key)
    }

    /// Borrow the public key, if set.
    pub fn public_key(&self) -> Option<&AffinePoint> {
        self.public_key.as_ref()
    }

    /// Sign `msg` with the stored private key.
    pub fn sign(&self, msg: &[u8], rng: &mut impl CryptoRngCore) -> Result<Signature> {
        let key_pair = self.key_pair.as_ref().ok_or(Misuse::MissingPrivateKey)?;
        self.engine.sign(key_pair, msg, rng)
    }

    /// Verify `signature` over `msg` against the stored public key.
    pub fn verify(&self, msg: &[u8], signature: &Signature) -> Result<bool> {
        let public_key = self.public_key.as_ref().ok_or(Misuse::MissingPublicKey)?;
        Ok(self.engine.verify(public_key, msg, signature))
    }

    fn store(&mut self, key_pair: KeyPair) {
        self.public_key = Some(key_pair.public_key().clone());
        self.key_pair = Some(key_pair);
    }
}

impl<B, D> Clone for Context<B, D> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            key_pair: self.key_pair.clone(),
            public_key: self.public_key.clone(),
        }
    }
}

impl<B, D> Debug for Context<B, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("engine", &self.engine)
            .field("has_private_key", &self.key_pair.is_some())
            .field("public_key", &self.public_key)
            .finish()
    }
}
