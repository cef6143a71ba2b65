//! SM2DSA signing and verification.
//!
//! ## Signing
//!
//! ```text
//! A2: calculate e=Hv(M)
//! A3: pick a random number k in [1, n-1] via a random number generator
//! A4: calculate the elliptic curve point (x1, y1)=[k]G
//! A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
//! A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
//! A7: the digital signature of M is (r, s)
//! ```
//!
//! ## Verification
//!
//! ```text
//! B1: verify whether r' in [1,n-1], verification failed if not
//! B2: verify whether s' in [1,n-1], verification failed if not
//! B4: calculate e'=Hv(M')
//! B5: calculate t = (r' + s') modn, verification failed if t=0
//! B6: calculate the point (x1', y1')=[s']G + [t]PA
//! B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
//! ```
//!
//! `Hv` is the injected digest reduced modulo `n`, with a zero result
//! replaced by one.

use super::Signature;
use crate::{
    random::random_nonzero, AffinePoint, CurveParams, Error, Jacobian, KeyPair, Misuse, Result,
    ScalarMultiplication,
};
use core::{
    fmt::{self, Debug},
    marker::PhantomData,
};
use digest::Digest;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use sm3::Sm3;

/// Number of nonces the signing loop draws before giving up.
///
/// Each draw is rejected with probability `O(1/n)`, so reaching this bound
/// means the random source is broken.
pub const MAX_SIGN_ATTEMPTS: usize = 1000;

/// SM2DSA over a fixed set of curve parameters.
///
/// `B` selects the scalar multiplication strategy and `D` the message digest.
/// The engine holds no key material and no mutable state.
pub struct SignatureEngine<B = Jacobian, D = Sm3> {
    curve: CurveParams,
    strategy: PhantomData<fn() -> (B, D)>,
}

impl SignatureEngine {
    /// SM2 recommended curve, Jacobian arithmetic and SM3.
    pub fn sm2() -> Self {
        Self::new(CurveParams::sm2())
    }
}

impl<B, D> SignatureEngine<B, D>
where
    B: ScalarMultiplication,
    D: Digest,
{
    /// Create an engine for the given curve.
    pub fn new(curve: CurveParams) -> Self {
        Self {
            curve,
            strategy: PhantomData,
        }
    }

    /// Borrow the curve parameters.
    pub fn curve(&self) -> &CurveParams {
        &self.curve
    }

    /// Generate a key pair suitable for signing.
    ///
    /// The private scalar is drawn from `[1, n-2]`: `d = n-1` would make
    /// `1 + d` non-invertible.
    pub fn generate_key_pair(&self, rng: &mut impl CryptoRngCore) -> Result<KeyPair> {
        KeyPair::generate::<B>(&self.curve, rng)
    }

    /// Map a message to a non-zero scalar: `D(msg) mod n`, or `1` if that
    /// is zero.
    pub fn hash_to_scalar(&self, msg: &[u8]) -> BigUint {
        let digest = D::digest(msg);
        let e = self.curve.order().reduce(&BigUint::from_bytes_be(&digest));

        if e.is_zero() {
            BigUint::one()
        } else {
            e
        }
    }

    /// Sign `msg` with a fresh random nonce.
    ///
    /// Returns [`Misuse::InvalidPublicKey`] if `key_pair` does not belong to
    /// this engine's curve.
    pub fn sign(
        &self,
        key_pair: &KeyPair,
        msg: &[u8],
        rng: &mut impl CryptoRngCore,
    ) -> Result<Signature> {
        let public_key = key_pair.public_key();
        if public_key.is_identity() || !public_key.is_on_curve(&self.curve) {
            return Err(Misuse::InvalidPublicKey.into());
        }

        // A2: calculate e=Hv(M)
        let e = self.hash_to_scalar(msg);

        // A3: pick a random number k in [1, n-1] via a random number generator
        let n = self.curve.order().modulus();
        self.sign_with_nonces(key_pair.private_key(), &e, || random_nonzero(rng, n))
    }

    /// Signing loop with the nonce source factored out.
    ///
    /// `next_nonce` is called once per attempt and must return a value in
    /// `[1, n-1]`.
    pub(crate) fn sign_with_nonces(
        &self,
        private_key: &BigUint,
        e: &BigUint,
        mut next_nonce: impl FnMut() -> Result<BigUint>,
    ) -> Result<Signature> {
        if !self.curve.is_nonzero_scalar(private_key) {
            return Err(Misuse::InvalidPrivateKey.into());
        }

        let n = self.curve.order();
        let d_plus_1_inv = n.invert(&n.add(private_key, &BigUint::one()))?;

        for _ in 0..MAX_SIGN_ATTEMPTS {
            let k = next_nonce()?;
            debug_assert!(self.curve.is_nonzero_scalar(&k));

            // A4: calculate the elliptic curve point (x1, y1)=[k]G
            let x1 = match B::mul_generator(&self.curve, &k)? {
                AffinePoint::Coordinates { x, .. } => x,
                AffinePoint::Identity => continue,
            };

            // A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
            let r = n.add(e, &n.reduce(&x1));
            if r.is_zero() || n.add(&r, &k).is_zero() {
                continue;
            }

            // A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
            let s = n.mul(&d_plus_1_inv, &n.sub(&k, &n.mul(&r, private_key)));
            if s.is_zero() {
                continue;
            }

            // A7: the digital signature of M is (r, s)
            return Signature::from_scalars(r, s);
        }

        Err(Error::RetriesExhausted)
    }

    /// Verify `signature` over `msg` against `public_key`.
    ///
    /// Returns `false` for a signature that does not verify, for `r` or `s`
    /// outside of `[1, n-1]`, and for a public key which is the point at
    /// infinity or not on the curve.
    pub fn verify(&self, public_key: &AffinePoint, msg: &[u8], signature: &Signature) -> bool {
        let (r, s) = signature.split_scalars();

        // B1: verify whether r' in [1,n-1], verification failed if not
        // B2: verify whether s' in [1,n-1], verification failed if not
        if !self.curve.is_nonzero_scalar(r) || !self.curve.is_nonzero_scalar(s) {
            return false;
        }

        if public_key.is_identity() || !public_key.is_on_curve(&self.curve) {
            return false;
        }

        // B4: calculate e'=Hv(M')
        let e = self.hash_to_scalar(msg);

        accept(self.verify_prehash(public_key, &e, r, s))
    }

    fn verify_prehash(
        &self,
        public_key: &AffinePoint,
        e: &BigUint,
        r: &BigUint,
        s: &BigUint,
    ) -> Result<bool> {
        let n = self.curve.order();

        // B5: calculate t = (r' + s') modn, verification failed if t=0
        let t = n.add(r, s);
        if t.is_zero() {
            return Ok(false);
        }

        // B6: calculate the point (x1', y1')=[s']G + [t]PA
        let sg = B::mul_generator(&self.curve, s)?;
        let tp = B::mul(&self.curve, &t, public_key)?;
        let x1 = match sg.add(&tp, &self.curve)? {
            AffinePoint::Coordinates { x, .. } => x,
            AffinePoint::Identity => return Ok(false),
        };

        // B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
        Ok(n.add(e, &n.reduce(&x1)) == *r)
    }
}

/// Collapse the outcome of verification arithmetic into a verdict.
///
/// Arithmetic on validated points cannot hit a non-invertible element, so an
/// error here is a bug in the curve arithmetic.
fn accept(result: Result<bool>) -> bool {
    debug_assert!(result.is_ok(), "verification arithmetic failed: {result:?}");
    result.unwrap_or(false)
}

impl<B, D> Clone for SignatureEngine<B, D> {
    fn clone(&self) -> Self {
        Self {
            curve: self.curve.clone(),
            strategy: PhantomData,
        }
    }
}

impl<B, D> Debug for SignatureEngine<B, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureEngine")
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

impl<B, D> PartialEq for SignatureEngine<B, D> {
    fn eq(&self, other: &Self) -> bool {
        self.curve == other.curve
    }
}

impl<B, D> Eq for SignatureEngine<B, D> {}

#[cfg(test)]
mod tests {
    use super::{accept, SignatureEngine, MAX_SIGN_ATTEMPTS};
    use crate::{
        dsa::Signature,
        params::tests::toy_curve,
        random::tests::{ConstantRng, FailingRng},
        Affine, AffinePoint, CurveParams, Error, Jacobian, KeyPair, Misuse, ScalarMultiplication,
    };
    use digest::{consts::U32, FixedOutput, HashMarker, Output, OutputSizeUser, Update};
    use hex_literal::hex;
    use num_bigint::BigUint;
    use num_traits::{One, Zero};
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    use sha2::Sha256;

    const PRIVATE_KEY: [u8; 32] =
        hex!("3945208F7B2144B13F36E38AC6D39F95889393692860B51A42FB81EF4DF7C5B8");
    const NONCE: [u8; 32] =
        hex!("59276E27D506861A16680F3AD9C02DCCEF3CC1FA3CDBE4CE6D54B80DEAC1BC21");
    const MSG: &[u8] = b"message digest";

    /// SM3(MSG) mod n
    const HASH: [u8; 32] =
        hex!("c522a942e89bd80d97dd666e7a5531b36188c9817149e9b258dfe51ece98ed77");
    const SIG: [u8; 64] = hex!(
        "ca0ea5b47728efa5f9e1989508cd3069a2e6f85f7f5125c1a843f3ebfcad87ea"
        "9f63abe109485c501c147632bc3d53d297d860a8df2ed3619fd75a776c93ff8c"
    );

    /// SHA-256(MSG) mod n
    const SHA256_HASH: [u8; 32] =
        hex!("f7846f55cf23e14eebeab5b4e1550cad5b509e3348fbc4efa3a1413d393cb650");
    const SHA256_SIG: [u8; 64] = hex!(
        "fc706bc75db0f8e74deee7db6fcd0b639caecd11570300fef305500a675150c3"
        "219663dbfe73afd237fa51a9da72556f76eab137f363486277e736e3b95d3706"
    );

    const ORDER: [u8; 32] =
        hex!("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123");

    /// Digest whose output is always the SM2 group order.
    #[derive(Clone, Default)]
    struct OrderDigest;

    impl HashMarker for OrderDigest {}

    impl Update for OrderDigest {
        fn update(&mut self, _data: &[u8]) {}
    }

    impl OutputSizeUser for OrderDigest {
        type OutputSize = U32;
    }

    impl FixedOutput for OrderDigest {
        fn finalize_into(self, out: &mut Output<Self>) {
            out.copy_from_slice(&ORDER);
        }
    }

    /// Digest whose output is always zero.
    #[derive(Clone, Default)]
    struct ZeroDigest;

    impl HashMarker for ZeroDigest {}

    impl Update for ZeroDigest {
        fn update(&mut self, _data: &[u8]) {}
    }

    impl OutputSizeUser for ZeroDigest {
        type OutputSize = U32;
    }

    impl FixedOutput for ZeroDigest {
        fn finalize_into(self, out: &mut Output<Self>) {
            out.fill(0);
        }
    }

    fn key_pair() -> KeyPair {
        let d = BigUint::from_bytes_be(&PRIVATE_KEY);
        KeyPair::from_private_key::<Jacobian>(&CurveParams::sm2(), d).unwrap()
    }

    #[test]
    fn hash_to_scalar_reduces_digest() {
        let engine = SignatureEngine::sm2();
        assert_eq!(engine.hash_to_scalar(MSG), BigUint::from_bytes_be(&HASH));

        // SM3("abc") is already below n
        assert_eq!(
            engine.hash_to_scalar(b"abc"),
            BigUint::from_bytes_be(&hex!(
                "66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0"
            ))
        );

        let sha256 = SignatureEngine::<Jacobian, Sha256>::new(CurveParams::sm2());
        assert_eq!(sha256.hash_to_scalar(MSG), BigUint::from_bytes_be(&SHA256_HASH));
    }

    #[test]
    fn hash_to_scalar_remaps_order_to_one() {
        let engine = SignatureEngine::<Jacobian, OrderDigest>::new(CurveParams::sm2());
        assert_eq!(engine.hash_to_scalar(b"anything"), BigUint::one());
    }

    #[test]
    fn hash_to_scalar_remaps_zero_to_one() {
        let engine = SignatureEngine::<Jacobian, ZeroDigest>::new(CurveParams::sm2());
        assert_eq!(engine.hash_to_scalar(b""), BigUint::one());
    }

    #[test]
    fn fixed_nonce_known_answer() {
        let key_pair = key_pair();
        let k = BigUint::from_bytes_be(&NONCE);
        let expected = Signature::from_bytes(&SIG);

        let affine = SignatureEngine::<Affine>::new(CurveParams::sm2());
        let jacobian = SignatureEngine::sm2();
        let e = jacobian.hash_to_scalar(MSG);
        assert_eq!(e, BigUint::from_bytes_be(&HASH));

        let sig = affine
            .sign_with_nonces(key_pair.private_key(), &e, || Ok(k.clone()))
            .unwrap();
        assert_eq!(sig, expected);

        let sig = jacobian
            .sign_with_nonces(key_pair.private_key(), &e, || Ok(k.clone()))
            .unwrap();
        assert_eq!(sig, expected);

        assert!(affine.verify(key_pair.public_key(), MSG, &sig));
        assert!(jacobian.verify(key_pair.public_key(), MSG, &sig));
    }

    #[test]
    fn fixed_nonce_known_answer_sha256() {
        let key_pair = key_pair();
        let k = BigUint::from_bytes_be(&NONCE);
        let engine = SignatureEngine::<Jacobian, Sha256>::new(CurveParams::sm2());
        let e = engine.hash_to_scalar(MSG);

        let sig = engine
            .sign_with_nonces(key_pair.private_key(), &e, || Ok(k.clone()))
            .unwrap();
        assert_eq!(sig, Signature::from_bytes(&SHA256_SIG));
        assert!(engine.verify(key_pair.public_key(), MSG, &sig));

        // Same key and nonce, different digest
        assert!(!SignatureEngine::sm2().verify(key_pair.public_key(), MSG, &sig));
    }

    #[test]
    fn nonce_reuse_reveals_private_key() {
        let engine = SignatureEngine::sm2();
        let key_pair = key_pair();
        let k = BigUint::from_bytes_be(&NONCE);
        let n = engine.curve().order();

        let e1 = engine.hash_to_scalar(b"first message");
        let e2 = engine.hash_to_scalar(b"second message");
        let sig1 = engine
            .sign_with_nonces(key_pair.private_key(), &e1, || Ok(k.clone()))
            .unwrap();
        let sig2 = engine
            .sign_with_nonces(key_pair.private_key(), &e2, || Ok(k.clone()))
            .unwrap();

        // s·(1 + d) = k - r·d  ⇒  d = (s₂ - s₁) / (s₁ + r₁ - s₂ - r₂)
        let (r1, s1) = sig1.split_scalars();
        let (r2, s2) = sig2.split_scalars();
        let numerator = n.sub(s2, s1);
        let denominator = n.sub(&n.add(s1, r1), &n.add(s2, r2));
        let recovered = n.mul(&numerator, &n.invert(&denominator).unwrap());

        assert_eq!(&recovered, key_pair.private_key());
    }

    #[test]
    fn each_attempt_draws_a_fresh_nonce() {
        let engine = SignatureEngine::sm2();
        let curve = engine.curve().clone();
        let n = curve.order();
        let key_pair = key_pair();

        // Choose e so that the first nonce gives r + k = n.
        let rejected = BigUint::from(12345u32);
        let x1 = Jacobian::mul_generator(&curve, &rejected).unwrap().x().unwrap().clone();
        let e = n.sub(&n.neg(&rejected), &n.reduce(&x1));

        let accepted = BigUint::from(54321u32);
        let mut nonces = [rejected, accepted.clone()].into_iter();
        let mut calls = 0;

        let sig = engine
            .sign_with_nonces(key_pair.private_key(), &e, || {
                calls += 1;
                Ok(nonces.next().unwrap())
            })
            .unwrap();
        assert_eq!(calls, 2);

        // k = s·(1 + d) + r·d
        let d = key_pair.private_key();
        let (r, s) = sig.split_scalars();
        let k = n.add(&n.mul(s, &n.add(d, &BigUint::one())), &n.mul(r, d));
        assert_eq!(k, accepted);
    }

    #[test]
    fn retries_are_bounded() {
        let engine = SignatureEngine::sm2();
        let curve = engine.curve().clone();
        let n = curve.order();
        let key_pair = key_pair();

        let k = BigUint::from(12345u32);
        let x1 = Jacobian::mul_generator(&curve, &k).unwrap().x().unwrap().clone();
        let e = n.sub(&n.neg(&k), &n.reduce(&x1));
        let mut calls = 0;

        let result = engine.sign_with_nonces(key_pair.private_key(), &e, || {
            calls += 1;
            Ok(k.clone())
        });
        assert_eq!(result, Err(Error::RetriesExhausted));
        assert_eq!(calls, MAX_SIGN_ATTEMPTS);
    }

    #[test]
    fn sign_and_verify() {
        let engine = SignatureEngine::sm2();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let key_pair = engine.generate_key_pair(&mut rng).unwrap();

        let sig = engine.sign(&key_pair, MSG, &mut rng).unwrap();
        assert!(engine.verify(key_pair.public_key(), MSG, &sig));
        assert!(!engine.verify(key_pair.public_key(), b"message digesT", &sig));
    }

    #[test]
    fn sign_on_toy_curve() {
        let engine = SignatureEngine::<Affine>::new(toy_curve());
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for _ in 0..32 {
            let key_pair = engine.generate_key_pair(&mut rng).unwrap();
            let sig = engine.sign(&key_pair, MSG, &mut rng).unwrap();
            assert!(engine.verify(key_pair.public_key(), MSG, &sig));
        }
    }

    #[test]
    fn all_zero_random_source_signs_with_nonce_one() {
        let engine = SignatureEngine::sm2();
        let key_pair = key_pair();
        let sig = engine.sign(&key_pair, MSG, &mut ConstantRng(0)).unwrap();

        let expected = engine
            .sign_with_nonces(key_pair.private_key(), &engine.hash_to_scalar(MSG), || {
                Ok(BigUint::one())
            })
            .unwrap();
        assert_eq!(sig, expected);
    }

    #[test]
    fn random_source_failure_propagates() {
        let engine = SignatureEngine::sm2();
        assert_eq!(
            engine.sign(&key_pair(), MSG, &mut FailingRng),
            Err(Error::RandomSource)
        );
        assert_eq!(
            engine.generate_key_pair(&mut FailingRng),
            Err(Error::RandomSource)
        );
    }

    #[test]
    fn reject_key_pair_from_another_curve() {
        let engine = SignatureEngine::sm2();
        let key_pair =
            KeyPair::from_private_key::<Affine>(&toy_curve(), BigUint::from(5u8)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert_eq!(
            engine.sign(&key_pair, MSG, &mut rng),
            Err(Error::Misuse(Misuse::InvalidPublicKey))
        );
    }

    #[test]
    fn private_key_n_minus_one_is_not_invertible() {
        let engine = SignatureEngine::sm2();
        let d = crate::params::order_minus_one(engine.curve());
        let key_pair = KeyPair::from_private_key::<Jacobian>(engine.curve(), d).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(engine.sign(&key_pair, MSG, &mut rng), Err(Error::Arithmetic));
    }

    #[test]
    fn reject_out_of_range_signature_scalars() {
        let engine = SignatureEngine::sm2();
        let key_pair = key_pair();
        let n = engine.curve().order().modulus().clone();
        let valid = Signature::from_bytes(&SIG);
        assert!(engine.verify(key_pair.public_key(), MSG, &valid));

        let (r, s) = (valid.r().clone(), valid.s().clone());
        for (r, s) in [
            (BigUint::zero(), s.clone()),
            (r.clone(), BigUint::zero()),
            (n.clone(), s.clone()),
            (r.clone(), n.clone()),
            (&n + &r, s.clone()),
        ] {
            let sig = match Signature::from_scalars(r, s) {
                Ok(sig) => sig,
                Err(err) => {
                    assert_eq!(err, Error::Misuse(Misuse::MalformedSignature));
                    continue;
                }
            };
            assert!(!engine.verify(key_pair.public_key(), MSG, &sig));
        }
    }

    #[test]
    fn reject_invalid_public_key() {
        let engine = SignatureEngine::sm2();
        let key_pair = key_pair();
        let sig = Signature::from_bytes(&SIG);

        let public = key_pair.public_key();
        let off_curve = AffinePoint::Coordinates {
            x: public.x().unwrap().clone(),
            y: public.y().unwrap() + 1u32,
        };

        assert!(!engine.verify(&AffinePoint::Identity, MSG, &sig));
        assert!(!engine.verify(&off_curve, MSG, &sig));
    }

    #[test]
    fn accept_passes_verdicts_through() {
        assert!(accept(Ok(true)));
        assert!(!accept(Ok(false)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "verification arithmetic failed")]
    fn accept_flags_arithmetic_errors() {
        accept(Err(Error::Arithmetic));
    }
}
