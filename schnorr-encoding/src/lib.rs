#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! Fixed-width byte encodings for the `bip-schnorr` signature workspace.
//!
//! This crate implements C1 of the design: converting between the
//! fixed-width octet strings that cross the public API boundary (private
//! scalars, public-key points, messages, signatures) and the field
//! elements, scalars, and curve points the rest of the workspace operates
//! on. It deliberately does not implement DER, PEM, Base58, or any other
//! serialisation format — those are out of scope for this signature core.

#[cfg(feature = "std")]
extern crate std;

pub mod challenge;
pub mod point;

pub use challenge::hash_challenge;
pub use point::{bytes_to_point, int_to_bytes32, point_to_bytes};
