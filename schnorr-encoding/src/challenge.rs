//! Challenge hashing (C1: `hash_challenge`).
//!
//! `hash_challenge(Rx, Pbytes, m) = SHA-256(Rx || Pbytes || m)`, interpreted
//! as a big-endian integer reduced mod the scalar field order. This is
//! plain SHA-256 over a fixed concatenation, not a BIP-340 tagged hash — see
//! the workspace root documentation for why that distinction matters here.

use digest::Digest;
use schnorr_core::Scalar;
use schnorr_hash::Sha256;

/// Computes the Schnorr challenge scalar `e` from the nonce-point
/// x-coordinate, the signer's (or aggregate) public-key bytes, and the
/// message.
pub fn hash_challenge<S: Scalar>(rx: &[u8; 32], p_bytes: &[u8; 33], m: &[u8; 32]) -> S {
    let mut hasher = Sha256::new();
    hasher.update(rx);
    hasher.update(p_bytes);
    hasher.update(m);
    let digest = hasher.finalize();
    S::from_bytes_reduced(&digest)
}
