//! Error types.

use core::fmt;

/// Ways an API can be called incorrectly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Misuse {
    /// Signing was requested before a private key was set.
    MissingPrivateKey,

    /// Verification was requested before a public key was set.
    MissingPublicKey,

    /// Signature bytes or scalars do not have the `(r, s)` shape.
    MalformedSignature,

    /// Private scalar outside of `[1, n-1]`.
    InvalidPrivateKey,

    /// Public key is the point at infinity or does not lie on the curve.
    InvalidPublicKey,

    /// Curve parameters are inconsistent.
    InvalidCurve,
}

impl fmt::Display for Misuse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Misuse::MissingPrivateKey => "private key not set",
            Misuse::MissingPublicKey => "public key not set",
            Misuse::MalformedSignature => "malformed signature",
            Misuse::InvalidPrivateKey => "private key out of range",
            Misuse::InvalidPublicKey => "public key not on curve",
            Misuse::InvalidCurve => "invalid curve parameters",
        })
    }
}

/// Error type.
///
/// A signature which fails to verify is not an error: verification reports
/// it as `false`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The caller violated an API precondition.
    Misuse(Misuse),

    /// Attempted to invert a non-invertible element.
    Arithmetic,

    /// The random source failed to produce entropy.
    RandomSource,

    /// The signing loop rejected every nonce it drew.
    RetriesExhausted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Misuse(misuse) => write!(f, "misuse: {misuse}"),
            Error::Arithmetic => write!(f, "element is not invertible"),
            Error::RandomSource => write!(f, "random source failure"),
            Error::RetriesExhausted => write!(f, "signing retries exhausted"),
        }
    }
}

impl From<Misuse> for Error {
    fn from(misuse: Misuse) -> Self {
        Error::Misuse(misuse)
    }
}

impl From<Error> for signature::Error {
    fn from(_: Error) -> Self {
        signature::Error::new()
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Misuse {}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
