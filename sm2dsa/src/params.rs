//! Curve parameters.
//!
//! SM2 recommended parameters can be found in [draft-shen-sm2-ecdsa Appendix D].
//!
//! [draft-shen-sm2-ecdsa Appendix D]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#appendix-D

use crate::{AffinePoint, Jacobian, Misuse, PrimeModulus, Result, ScalarMultiplication};
use hex_literal::hex;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// p = 0xFFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF 00000000 FFFFFFFF FFFFFFFF
const MODULUS: [u8; 32] =
    hex!("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFF");

/// a = -3 (0xFFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF 00000000 FFFFFFFF FFFFFFFC)
const EQUATION_A: [u8; 32] =
    hex!("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000FFFFFFFFFFFFFFFC");

/// b = 0x28E9FA9E 9D9F5E34 4D5A9E4B CF6509A7 F39789F5 15AB8F92 DDBCBD41 4D940E93
const EQUATION_B: [u8; 32] =
    hex!("28E9FA9E9D9F5E344D5A9E4BCF6509A7F39789F515AB8F92DDBCBD414D940E93");

/// n = 0xFFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF 7203DF6B 21C6052B 53BBF409 39D54123
const ORDER: [u8; 32] = hex!("FFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFF7203DF6B21C6052B53BBF40939D54123");

/// Base point of SM2.
///
/// ```text
/// Gₓ = 0x32C4AE2C 1F198119 5F990446 6A39C994 8FE30BBF F2660BE1 715A4589 334C74C7
/// Gᵧ = 0xBC3736A2 F4F6779C 59BDCEE3 6B692153 D0A9877C C62A4740 02DF32E5 2139F0A0
/// ```
const GENERATOR: ([u8; 32], [u8; 32]) = (
    hex!("32C4AE2C1F1981195F9904466A39C9948FE30BBFF2660BE1715A4589334C74C7"),
    hex!("BC3736A2F4F6779C59BDCEE36B692153D0A9877CC62A474002DF32E52139F0A0"),
);

/// Largest supported modulus, in bits. Scalars must fit the 32-byte halves of
/// an encoded signature.
const MAX_MODULUS_BITS: u64 = 256;

/// Parameters of a short Weierstrass curve `y² = x³ + ax + b` over a prime
/// field, together with a base point of prime order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurveParams {
    field: PrimeModulus,
    order: PrimeModulus,
    a: BigUint,
    b: BigUint,
    generator: (BigUint, BigUint),
}

impl CurveParams {
    /// SM2 recommended curve parameters.
    pub fn sm2() -> Self {
        Self {
            field: PrimeModulus::new(BigUint::from_bytes_be(&MODULUS)),
            order: PrimeModulus::new(BigUint::from_bytes_be(&ORDER)),
            a: BigUint::from_bytes_be(&EQUATION_A),
            b: BigUint::from_bytes_be(&EQUATION_B),
            generator: (
                BigUint::from_bytes_be(&GENERATOR.0),
                BigUint::from_bytes_be(&GENERATOR.1),
            ),
        }
    }

    /// Build and validate a custom parameter set.
    ///
    /// `p` and `n` must be odd primes of at most 256 bits. Primality is the
    /// caller's responsibility; everything else is checked: the curve is
    /// non-singular, `G` lies on it and `n·G` is the point at infinity.
    pub fn new(
        p: BigUint,
        a: BigUint,
        b: BigUint,
        n: BigUint,
        generator: (BigUint, BigUint),
    ) -> Result<Self> {
        for modulus in [&p, &n] {
            if modulus.bits() > MAX_MODULUS_BITS
                || modulus <= &BigUint::from(3u8)
                || !modulus.bit(0)
            {
                return Err(Misuse::InvalidCurve.into());
            }
        }

        if [&a, &b, &generator.0, &generator.1]
            .iter()
            .any(|value| *value >= &p)
        {
            return Err(Misuse::InvalidCurve.into());
        }

        let params = Self {
            field: PrimeModulus::new(p),
            order: PrimeModulus::new(n),
            a,
            b,
            generator,
        };

        if params.discriminant().is_zero() || !params.generator().is_on_curve(&params) {
            return Err(Misuse::InvalidCurve.into());
        }

        if !Jacobian::mul(&params, params.order.modulus(), &params.generator())?.is_identity() {
            return Err(Misuse::InvalidCurve.into());
        }

        Ok(params)
    }

    /// Base field modulus `p`.
    pub fn field(&self) -> &PrimeModulus {
        &self.field
    }

    /// Group order `n`.
    pub fn order(&self) -> &PrimeModulus {
        &self.order
    }

    /// Curve coefficient `a`.
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Curve coefficient `b`.
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Base point `G`.
    pub fn generator(&self) -> AffinePoint {
        AffinePoint::from_coordinates(self.generator.0.clone(), self.generator.1.clone())
    }

    /// Is `k` a valid non-zero scalar, i.e. in `[1, n-1]`?
    pub fn is_nonzero_scalar(&self, k: &BigUint) -> bool {
        !k.is_zero() && self.order.contains(k)
    }

    /// `4a³ + 27b² mod p`
    fn discriminant(&self) -> BigUint {
        let p = &self.field;
        let a3 = p.mul(&p.square(&self.a), &self.a);
        let b2 = p.square(&self.b);
        p.add(&p.mul_small(&a3, 4), &p.mul_small(&b2, 27))
    }
}

impl Default for CurveParams {
    fn default() -> Self {
        Self::sm2()
    }
}

/// `n - 1`, the largest non-zero scalar.
pub(crate) fn order_minus_one(curve: &CurveParams) -> BigUint {
    curve.order().modulus() - BigUint::one()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::CurveParams;
    use crate::{Error, Misuse};
    use num_bigint::BigUint;
    use num_traits::Zero;

    /// `y² = x³ + 2x + 5` over F₉₈₃ has 929 points, a prime, generated by `(1, 83)`.
    pub(crate) fn toy_curve() -> CurveParams {
        CurveParams::new(
            BigUint::from(983u32),
            BigUint::from(2u32),
            BigUint::from(5u32),
            BigUint::from(929u32),
            (BigUint::from(1u32), BigUint::from(83u32)),
        )
        .unwrap()
    }

    #[test]
    fn sm2_parameters_are_consistent() {
        let curve = CurveParams::sm2();
        assert!(!curve.discriminant().is_zero());
        assert!(curve.generator().is_on_curve(&curve));

        let validated = CurveParams::new(
            curve.field().modulus().clone(),
            curve.a().clone(),
            curve.b().clone(),
            curve.order().modulus().clone(),
            (
                curve.generator().x().unwrap().clone(),
                curve.generator().y().unwrap().clone(),
            ),
        )
        .unwrap();
        assert_eq!(validated, curve);
    }

    #[test]
    fn toy_curve_is_valid() {
        let curve = toy_curve();
        assert_eq!(curve.order().modulus(), &BigUint::from(929u32));
    }

    #[test]
    fn reject_generator_off_curve() {
        let err = CurveParams::new(
            BigUint::from(983u32),
            BigUint::from(2u32),
            BigUint::from(5u32),
            BigUint::from(929u32),
            (BigUint::from(1u32), BigUint::from(84u32)),
        );
        assert_eq!(err, Err(Error::Misuse(Misuse::InvalidCurve)));
    }

    #[test]
    fn reject_wrong_order() {
        let err = CurveParams::new(
            BigUint::from(983u32),
            BigUint::from(2u32),
            BigUint::from(5u32),
            BigUint::from(937u32),
            (BigUint::from(1u32), BigUint::from(83u32)),
        );
        assert_eq!(err, Err(Error::Misuse(Misuse::InvalidCurve)));
    }

    #[test]
    fn reject_singular_curve() {
        // 4·0³ + 27·0² = 0
        let err = CurveParams::new(
            BigUint::from(983u32),
            BigUint::zero(),
            BigUint::zero(),
            BigUint::from(929u32),
            (BigUint::zero(), BigUint::zero()),
        );
        assert_eq!(err, Err(Error::Misuse(Misuse::InvalidCurve)));
    }

    #[test]
    fn reject_even_modulus() {
        let err = CurveParams::new(
            BigUint::from(982u32),
            BigUint::from(2u32),
            BigUint::from(5u32),
            BigUint::from(929u32),
            (BigUint::from(1u32), BigUint::from(83u32)),
        );
        assert_eq!(err, Err(Error::Misuse(Misuse::InvalidCurve)));
    }

    #[test]
    fn scalar_range() {
        let curve = CurveParams::sm2();
        assert!(!curve.is_nonzero_scalar(&BigUint::zero()));
        assert!(curve.is_nonzero_scalar(&super::order_minus_one(&curve)));
        assert!(!curve.is_nonzero_scalar(curve.order().modulus()));
    }
}
