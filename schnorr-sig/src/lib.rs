#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! The BIP-Schnorr signing and verification engine.
//!
//! This crate ties together `schnorr-core`'s traits, `schnorr-curve`'s
//! secp256k1 arithmetic, `schnorr-encoding`'s byte conventions, and
//! `schnorr-rng`'s nonce derivation into the five operations the workspace
//! exposes: single-signer signing, single-signature verification, batch
//! verification, and the two key-aggregation schemes.

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod aggregate;
pub mod sign;
pub mod signature;
pub mod verify;

pub use aggregate::{musig_non_interactive, naive_key_aggregation};
pub use sign::sign;
pub use signature::Signature;
pub use verify::{batch_verify, verify};
