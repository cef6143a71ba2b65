#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! ## Backends
//!
//! Every signing and verification entry point is generic over a
//! [`ScalarMultiplication`] strategy: [`Affine`] or [`Jacobian`] (the
//! default). Both produce identical signatures for identical nonces.
//!
//! ## Digests
//!
//! Messages are hashed with any [`digest::Digest`] whose output is reduced
//! modulo the group order. [`sm3::Sm3`] is the default; other digests
//! such as `sha2::Sha256` plug in the same way.
//!
//! ## ⚠️ Security Warning
//!
//! Arithmetic is built on arbitrary-precision integers and is not constant
//! time. Secret scalars can leak through timing side channels.
//!
//! USE AT YOUR OWN RISK!

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod dsa;

mod arithmetic;
mod error;
mod keypair;
mod params;
mod random;

pub use crate::{
    arithmetic::{
        affine::AffinePoint,
        backend::{Affine, Jacobian, ScalarMultiplication},
        field::PrimeModulus,
        projective::ProjectivePoint,
    },
    error::{Error, Misuse, Result},
    keypair::KeyPair,
    params::CurveParams,
};
pub use digest;
pub use num_bigint::{self, BigUint};
pub use rand_core;
pub use sm3;
