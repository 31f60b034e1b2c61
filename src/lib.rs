#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! # bip-schnorr
//!
//! A Rust workspace implementing a BIP-Schnorr-style signature scheme over
//! secp256k1: single-signer signing, single-signature verification, batch
//! verification, and two multi-signer key-aggregation schemes (naive
//! additive aggregation and non-interactive MuSig aggregation).
//!
//! This is *not* BIP-340: the challenge hash is plain SHA-256 over a fixed
//! concatenation, predating BIP-340's domain-separated tagged-hash
//! construction. See [`schnorr_encoding::challenge`] for the exact
//! definition this crate uses, and do not substitute a tagged hash without
//! understanding that doing so produces signatures incompatible with every
//! test vector in this workspace.
//!
//! ## Example: sign, verify, and batch-verify
//!
//! ```rust
//! use bip_schnorr::prelude::*;
//!
//! let mut rng = OsRng::new();
//! let d = Secp256k1Scalar::random(&mut rng);
//! let p = Secp256k1::to_affine(&Secp256k1::multiply(&Secp256k1::generator(), &d));
//! let p_bytes = point_to_bytes::<Secp256k1>(&p).unwrap();
//!
//! let m = [0x42u8; 32];
//! let sig = sign::<Secp256k1>(&d, &m).unwrap();
//! verify::<Secp256k1>(&p_bytes, &m, &sig).unwrap();
//! ```
//!
//! ## Example: MuSig non-interactive aggregation
//!
//! ```rust
//! use bip_schnorr::prelude::*;
//!
//! let mut rng = OsRng::new();
//! let x1 = Secp256k1Scalar::random(&mut rng);
//! let x2 = Secp256k1Scalar::random(&mut rng);
//! let m = [0x07u8; 32];
//!
//! let sig = musig_non_interactive::<Secp256k1>(&[x1, x2], &m).unwrap();
//!
//! // The aggregate public key is recomputed the same way `verify` expects:
//! // a caller who needs `Xbytes` independently of signing derives it with
//! // the same L/a_i weighting `musig_non_interactive` uses internally.
//! ```

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

// Re-export every workspace crate for convenience.
pub use schnorr_core;
pub use schnorr_curve;
pub use schnorr_encoding;
pub use schnorr_hash;
pub use schnorr_rng;
pub use schnorr_sig;

/// Commonly used types and functions, re-exported for a single-import entry point.
pub mod prelude {
    pub use schnorr_core::{Curve, Error, FieldElement, PointAffine, PointProjective, Result, Scalar};
    pub use schnorr_curve::secp256k1::{Scalar as Secp256k1Scalar, Secp256k1};
    pub use schnorr_encoding::{bytes_to_point, hash_challenge, int_to_bytes32, point_to_bytes};
    pub use schnorr_rng::OsRng;
    pub use schnorr_sig::{batch_verify, musig_non_interactive, naive_key_aggregation, sign, verify, Signature};
}
