#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! SHA-256, wrapped for the rest of the `bip-schnorr` workspace.
//!
//! Every hash this signature scheme needs — the challenge hash in
//! `schnorr-encoding`, the deterministic nonce in `schnorr-rng`, and the
//! MuSig key-aggregation coefficients in `schnorr-sig` — is plain SHA-256
//! over a concatenation of byte strings. There is no domain-separated
//! "tagged hash" construction here (see the workspace root docs for why
//! this pre-BIP-340 scheme does not use one); this crate exists so the
//! rest of the workspace depends on one hashing entry point instead of
//! importing `sha2` directly everywhere.

#[cfg(feature = "std")]
extern crate std;

pub mod sha2;

pub use self::sha2::Sha256;
