#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! Randomness for the `bip-schnorr` workspace: OS entropy for batch-verification
//! coefficients, and the deterministic nonce construction used by the signer
//! and the two key-aggregation schemes.
//!
//! The nonce in this scheme is not RFC 6979 — it is the simpler
//! `SHA-256(d || m)` construction the historical `bip-schnorr` source uses
//! (see [`nonce`]). Reusing an RFC 6979 HMAC-DRBG here would produce a
//! different, incompatible bit pattern.

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod nonce;
pub mod os_rng;

// Re-export RNG types for convenience
pub use os_rng::OsRng;
