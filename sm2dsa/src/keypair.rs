//! Key pairs.

use crate::{
    params::order_minus_one, random::random_nonzero, AffinePoint, CurveParams, Misuse, Result,
    ScalarMultiplication,
};
use core::fmt::{self, Debug};
use num_bigint::BigUint;
use rand_core::CryptoRngCore;

/// Private scalar `d ∈ [1, n-1]` together with its public point `Q = [d] G`.
#[derive(Clone, Eq, PartialEq)]
pub struct KeyPair {
    private_key: BigUint,
    public_key: AffinePoint,
}

impl KeyPair {
    /// Generate a key pair with a private scalar drawn uniformly from
    /// `[1, n-2]`.
    ///
    /// `d = n-1` is a valid key but `1 + d` has no inverse, so it could never
    /// sign. Fails only if the random source does.
    pub fn generate<B: ScalarMultiplication>(
        curve: &CurveParams,
        rng: &mut impl CryptoRngCore,
    ) -> Result<Self> {
        let private_key = random_nonzero(rng, &order_minus_one(curve))?;
        Self::from_private_key::<B>(curve, private_key)
    }

    /// Derive the key pair for an existing private scalar.
    ///
    /// Returns [`Misuse::InvalidPrivateKey`] unless `private_key ∈ [1, n-1]`.
    pub fn from_private_key<B: ScalarMultiplication>(
        curve: &CurveParams,
        private_key: BigUint,
    ) -> Result<Self> {
        if !curve.is_nonzero_scalar(&private_key) {
            return Err(Misuse::InvalidPrivateKey.into());
        }

        let public_key = B::mul_generator(curve, &private_key)?;

        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Borrow the private scalar `d`.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn private_key(&self) -> &BigUint {
        &self.private_key
    }

    /// Borrow the public point `Q`.
    pub fn public_key(&self) -> &AffinePoint {
        &self.public_key
    }

    /// Split into `(d, Q)`.
    pub fn into_parts(self) -> (BigUint, AffinePoint) {
        (self.private_key, self.public_key)
    }
}

impl Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::KeyPair;
    use crate::{
        random::tests::FailingRng, Affine, CurveParams, Error, Jacobian, Misuse,
    };
    use alloc::format;
    use hex_literal::hex;
    use num_bigint::BigUint;
    use num_traits::Zero;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    const PRIVATE_KEY: [u8; 32] =
        hex!("3945208F7B2144B13F36E38AC6D39F95889393692860B51A42FB81EF4DF7C5B8");
    const PUBLIC_KEY: ([u8; 32], [u8; 32]) = (
        hex!("09f9df311e5421a150dd7d161e4bc5c672179fad1833fc076bb08ff356f35020"),
        hex!("ccea490ce26775a52dc6ea718cc1aa600aed05fbf35e084a6632f6072da9ad13"),
    );

    #[test]
    fn derive_known_public_key() {
        let curve = CurveParams::sm2();
        let d = BigUint::from_bytes_be(&PRIVATE_KEY);
        let expected = crate::AffinePoint::new(
            &curve,
            BigUint::from_bytes_be(&PUBLIC_KEY.0),
            BigUint::from_bytes_be(&PUBLIC_KEY.1),
        )
        .unwrap();

        let affine = KeyPair::from_private_key::<Affine>(&curve, d.clone()).unwrap();
        let jacobian = KeyPair::from_private_key::<Jacobian>(&curve, d).unwrap();
        assert_eq!(affine.public_key(), &expected);
        assert_eq!(affine, jacobian);
    }

    #[test]
    fn generated_key_is_valid() {
        let curve = CurveParams::sm2();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let key_pair = KeyPair::generate::<Jacobian>(&curve, &mut rng).unwrap();

        assert!(curve.is_nonzero_scalar(key_pair.private_key()));
        assert!(key_pair.public_key().is_on_curve(&curve));
        assert!(!key_pair.public_key().is_identity());
    }

    #[test]
    fn reject_out_of_range_private_key() {
        let curve = CurveParams::sm2();
        let invalid = Err(Error::Misuse(Misuse::InvalidPrivateKey));

        assert_eq!(KeyPair::from_private_key::<Jacobian>(&curve, BigUint::zero()), invalid);
        assert_eq!(
            KeyPair::from_private_key::<Jacobian>(&curve, curve.order().modulus().clone()),
            invalid
        );
    }

    #[test]
    fn random_source_failure_propagates() {
        let curve = CurveParams::sm2();
        assert_eq!(
            KeyPair::generate::<Jacobian>(&curve, &mut FailingRng),
            Err(Error::RandomSource)
        );
    }

    #[test]
    fn debug_hides_private_key() {
        let curve = CurveParams::sm2();
        let d = BigUint::from_bytes_be(&PRIVATE_KEY);
        let key_pair = KeyPair::from_private_key::<Jacobian>(&curve, d.clone()).unwrap();
        let debug = format!("{key_pair:?}");
        assert!(!debug.contains(&format!("{d}")));
        assert!(!debug.contains("private"));
    }
}
