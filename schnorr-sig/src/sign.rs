//! Single-signer signing (C4).

use schnorr_core::{Curve, Error, FieldElement, PointAffine, Result, Scalar};
use schnorr_encoding::{hash_challenge, point_to_bytes};
use zeroize::Zeroize;

use crate::signature::Signature;

/// Produces a 64-byte BIP-Schnorr signature over `m` under the private
/// scalar `d`.
///
/// # Errors
/// Returns [`Error::ZeroScalar`] if `d` is zero, or if the nonce derived
/// from `(d, m)` reduces to zero mod the curve order. Both are catastrophic
/// preconditions rather than ordinary rejections — with a well-formed
/// scalar the latter occurs with probability roughly `2^-256`.
pub fn sign<C: Curve>(d: &C::Scalar, m: &[u8; 32]) -> Result<Signature> {
    if bool::from(d.is_zero()) {
        return Err(Error::ZeroScalar);
    }

    let p = C::to_affine(&C::multiply(&C::generator(), d));
    let p_bytes = point_to_bytes::<C>(&p)?;

    let mut k_prime = schnorr_rng::nonce::derive(d, m)?;
    let r = C::to_affine(&C::multiply(&C::generator(), &k_prime));

    // Jacobi-positive normalisation: if R.y is not a quadratic residue,
    // sign with (n - k') instead so the verifier can recover R from Rx
    // alone, taking the Jacobi-positive root.
    let jacobi_positive = r.y().jacobi() == 1;
    let r = if jacobi_positive { r } else { r.negate() };
    let mut k = if jacobi_positive { k_prime } else { C::order() - k_prime };
    k_prime.zeroize();

    let rx_bytes = r.x().to_bytes();
    let e: C::Scalar = hash_challenge(&rx_bytes, &p_bytes, m);

    let s = k + e * d;
    k.zeroize();

    Ok(Signature { rx: rx_bytes, s: s.to_bytes() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use schnorr_curve::secp256k1::{Scalar as Secp256k1Scalar, Secp256k1};

    #[test]
    fn sign_is_deterministic() {
        let d = Secp256k1Scalar::from(12345u64);
        let m = [0x42u8; 32];

        let sig1 = sign::<Secp256k1>(&d, &m).unwrap();
        let sig2 = sign::<Secp256k1>(&d, &m).unwrap();
        assert_eq!(sig1.to_bytes(), sig2.to_bytes());
    }

    #[test]
    fn sign_rejects_zero_scalar() {
        let d = Secp256k1Scalar::from(0u64);
        let m = [0u8; 32];
        assert_eq!(sign::<Secp256k1>(&d, &m), Err(Error::ZeroScalar));
    }

    #[test]
    fn different_messages_yield_different_signatures() {
        let d = Secp256k1Scalar::from(99u64);
        let m1 = [0x01u8; 32];
        let m2 = [0x02u8; 32];

        let sig1 = sign::<Secp256k1>(&d, &m1).unwrap();
        let sig2 = sign::<Secp256k1>(&d, &m2).unwrap();
        assert_ne!(sig1.to_bytes(), sig2.to_bytes());
    }

}
