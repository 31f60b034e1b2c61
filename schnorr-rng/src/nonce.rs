//! Deterministic nonce derivation for the signer and the two key-aggregation
//! schemes (naive-sum and MuSig non-interactive).
//!
//! Given a secret scalar `d` and a 32-byte message `m`, the nonce is
//!
//! ```text
//! k' = bytes_to_int(SHA-256(int_to_bytes32(d) || m)) mod n
//! ```
//!
//! `k'` is a pure function of `(d, m)`: signing the same message twice with
//! the same key produces bitwise identical nonces, and hence bitwise
//! identical signatures. There is no random-number source involved, and no
//! HMAC — this deliberately is not RFC 6979.

use digest::Digest;
use schnorr_core::{Error, FieldElement, Result, Scalar};
use schnorr_hash::Sha256;
use zeroize::Zeroize;

/// Derives the deterministic nonce `k'` for a signing operation over `(d, m)`.
///
/// Returns [`Error::ZeroScalar`] in the astronomically unlikely case that the
/// hash reduces to zero mod the curve order.
pub fn derive<S: Scalar>(d: &S, m: &[u8; 32]) -> Result<S> {
    let mut d_bytes = d.to_bytes();

    let mut hasher = Sha256::new();
    hasher.update(d_bytes);
    hasher.update(m);
    let digest = hasher.finalize();

    d_bytes.zeroize();

    let k = S::from_bytes_reduced(&digest);
    if bool::from(k.is_zero()) {
        return Err(Error::ZeroScalar);
    }
    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schnorr_curve::secp256k1::{Scalar as Secp256k1Scalar, Secp256k1};
    use schnorr_core::Curve;

    #[test]
    fn nonce_is_deterministic() {
        let d = Secp256k1Scalar::from(7u64);
        let m = [0x11u8; 32];

        let k1 = derive(&d, &m).unwrap();
        let k2 = derive(&d, &m).unwrap();
        assert_eq!(k1.to_bytes(), k2.to_bytes());
    }

    #[test]
    fn nonce_differs_across_messages() {
        let d = Secp256k1Scalar::from(7u64);
        let m1 = [0x11u8; 32];
        let m2 = [0x22u8; 32];

        let k1 = derive(&d, &m1).unwrap();
        let k2 = derive(&d, &m2).unwrap();
        assert_ne!(k1.to_bytes(), k2.to_bytes());
    }

    #[test]
    fn nonce_is_in_range_and_nonzero() {
        let d = Secp256k1Scalar::from(42u64);
        let m = [0x33u8; 32];

        let k = derive(&d, &m).unwrap();
        assert!(bool::from(schnorr_core::Scalar::ct_lt(&k, &Secp256k1::order())));
        assert!(!bool::from(schnorr_core::FieldElement::is_zero(&k)));
    }
}
