//! SM2 Digital Signature Algorithm (SM2DSA) as defined in [draft-shen-sm2-ecdsa § 5].
//!
//! ## Usage
//!
//! NOTE: requires the `getrandom` crate feature for [`rand_core::OsRng`].
//!
#![cfg_attr(feature = "getrandom", doc = "```")]
#![cfg_attr(not(feature = "getrandom"), doc = "```ignore")]
//! # fn example() -> Result<(), sm2dsa::Error> {
//! use rand_core::OsRng;
//! use sm2dsa::dsa::SignatureEngine;
//!
//! let engine = SignatureEngine::sm2();
//! let key_pair = engine.generate_key_pair(&mut OsRng)?;
//!
//! let message = b"test message";
//! let signature = engine.sign(&key_pair, message, &mut OsRng)?;
//!
//! assert!(engine.verify(key_pair.public_key(), message, &signature));
//! # Ok(())
//! # }
//! ```
//!
//! [draft-shen-sm2-ecdsa § 5]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5

mod context;
mod engine;
mod signing;
mod verifying;

pub use signature;

pub use self::{
    context::Context,
    engine::{SignatureEngine, MAX_SIGN_ATTEMPTS},
    signing::SigningKey,
    verifying::VerifyingKey,
};

use crate::{Error, Misuse, Result};
use core::fmt::{self, Debug};
use num_bigint::BigUint;
use signature::SignatureEncoding;

/// SM2DSA signature serialized as bytes.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// Size of each of the `r` and `s` halves of an encoded signature.
const SCALAR_SIZE: usize = Signature::BYTE_SIZE / 2;

/// SM2DSA signature.
///
/// Holds any pair of 256-bit integers: whether `r` and `s` lie in `[1, n-1]`
/// is decided by verification, which rejects them when they don't.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Size of an encoded SM2DSA signature in bytes.
    pub const BYTE_SIZE: usize = 64;

    /// Parse an SM2DSA signature from a byte array.
    pub fn from_bytes(bytes: &SignatureBytes) -> Self {
        let (r_bytes, s_bytes) = bytes.split_at(SCALAR_SIZE);
        Self {
            r: BigUint::from_bytes_be(r_bytes),
            s: BigUint::from_bytes_be(s_bytes),
        }
    }

    /// Parse an SM2DSA signature from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        SignatureBytes::try_from(bytes)
            .map(|bytes| Self::from_bytes(&bytes))
            .map_err(|_| Misuse::MalformedSignature.into())
    }

    /// Create a [`Signature`] from the `r` and `s` scalar values which
    /// comprise the signature.
    pub fn from_scalars(r: BigUint, s: BigUint) -> Result<Self> {
        let max_bits = (SCALAR_SIZE * 8) as u64;
        if r.bits() > max_bits || s.bits() > max_bits {
            return Err(Misuse::MalformedSignature.into());
        }

        Ok(Self { r, s })
    }

    /// Serialize this signature as bytes: `r ‖ s`, each big endian.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut ret = [0; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = ret.split_at_mut(SCALAR_SIZE);
        write_be(&self.r, r_bytes);
        write_be(&self.s, s_bytes);
        ret
    }

    /// Get the `r` component of this signature.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// Get the `s` component of this signature.
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Split the signature into its `r` and `s` scalars.
    pub fn split_scalars(&self) -> (&BigUint, &BigUint) {
        (&self.r, &self.s)
    }
}

/// Left-pad the big-endian encoding of `value` into `out`.
fn write_be(value: &BigUint, out: &mut [u8]) {
    let bytes = value.to_bytes_be();
    let offset = out.len() - bytes.len();
    out[offset..].copy_from_slice(&bytes);
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sm2dsa::Signature(")?;

        for byte in self.to_bytes() {
            write!(f, "{:02X}", byte)?;
        }

        write!(f, ")")
    }
}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<&Signature> for SignatureBytes {
    fn from(signature: &Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<SignatureBytes> for Signature {
    fn from(signature: SignatureBytes) -> Signature {
        Signature::from_bytes(&signature)
    }
}

impl From<&SignatureBytes> for Signature {
    fn from(signature: &SignatureBytes) -> Signature {
        Signature::from_bytes(signature)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Signature> {
        Signature::from_slice(bytes)
    }
}

impl SignatureEncoding for Signature {
    type Repr = SignatureBytes;

    fn to_bytes(&self) -> Self::Repr {
        self.into()
    }

    fn encoded_len(&self) -> usize {
        Self::BYTE_SIZE
    }
}
