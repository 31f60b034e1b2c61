#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! secp256k1 field, scalar, and point arithmetic.
//!
//! This crate provides the constant-time field and scalar arithmetic, point
//! representations, and scalar multiplication that the signing and
//! verification engine in `schnorr-sig` builds on.

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
#[allow(unused_extern_crates)]
extern crate alloc;

pub mod secp256k1;

// Re-export the curve type for convenience
pub use secp256k1::Secp256k1;
