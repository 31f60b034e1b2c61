//! Single-signature verification (C5) and batch verification (C6).

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use schnorr_core::{Curve, Error, FieldElement, PointAffine, Result, Scalar};
use schnorr_encoding::{bytes_to_point, hash_challenge, point_to_bytes};
use schnorr_rng::OsRng;
use subtle::ConstantTimeEq;

use crate::signature::Signature;

/// Verifies a single BIP-Schnorr signature.
///
/// Returns `Ok(())` iff `sig` is a valid signature over `m` under the
/// public key encoded by `p_bytes`. Every rejection reason surfaces its own
/// canonical [`Error`] variant (see the workspace root documentation for the
/// exact strings), so callers — and tests — can distinguish a malformed
/// public key from an out-of-range `s` from a failed equation.
pub fn verify<C: Curve>(p_bytes: &[u8; 33], m: &[u8; 32], sig: &Signature) -> Result<()> {
    let p = bytes_to_point::<C>(p_bytes)?;

    let r = C::Field::from_bytes(&sig.rx)
        .into_option()
        .ok_or(Error::RLargerThanFieldSize)?;
    let s = C::Scalar::from_bytes(&sig.s)
        .into_option()
        .ok_or(Error::SLargerThanCurveOrder)?;

    let e: C::Scalar = hash_challenge(&sig.rx, p_bytes, m);

    let s_g = C::multiply(&C::generator(), &s);
    let e_p = C::multiply(&C::from_affine(&p), &e);
    let r_point = C::to_affine(&(s_g - e_p));

    if bool::from(r_point.is_identity()) {
        return Err(Error::PointAtInfinity);
    }
    if r_point.y().jacobi() != 1 {
        return Err(Error::YNotQuadraticResidue);
    }
    if !bool::from(r_point.x().ct_eq(&r)) {
        return Err(Error::VerificationFailed);
    }

    Ok(())
}

/// Recovers the nonce point `R` from its claimed x-coordinate `r`, choosing
/// the Jacobi-positive y-root (step 1 of batch verification, §4.5).
fn recover_r<C: Curve>(r: &C::Field) -> Result<C::PointAffine> {
    let seven = C::Field::one() + C::Field::one() + C::Field::one() + C::Field::one() + C::Field::one() + C::Field::one() + C::Field::one();
    let y_squared = r.square() * *r + seven;
    let y = y_squared.sqrt().into_option().ok_or(Error::RNotOnCurve)?;
    let y = if y.jacobi() == 1 { y } else { -y };
    C::PointAffine::new(*r, y).into_option().ok_or(Error::RNotOnCurve)
}

/// Verifies `u` signatures via a single multi-scalar check (§4.5).
///
/// Returns `Ok(())` iff every `(Pᵢ, mᵢ, σᵢ)` triple would individually
/// verify. A malformed input at a specific index (wrong-length buffer,
/// non-curve public key, out-of-range `r`/`s`, an `r` with no curve point)
/// surfaces its own specific [`Error`] variant, since that failure is
/// detected in the per-item setup pass before the combined equation is
/// even formed. Once every item parses, a failure of the combined
/// equation collapses to a single [`Error::VerificationFailed`] — the
/// batch does not identify which signature was invalid.
pub fn batch_verify<C: Curve>(
    p_bytes: &[[u8; 33]],
    messages: &[[u8; 32]],
    sigs: &[Signature],
) -> Result<()> {
    let n = p_bytes.len();
    if n == 0 || n != messages.len() || n != sigs.len() {
        return Err(Error::VerificationFailed);
    }

    let mut points = Vec::with_capacity(n);
    let mut r_points = Vec::with_capacity(n);
    let mut s_values = Vec::with_capacity(n);
    let mut e_values = Vec::with_capacity(n);

    for i in 0..n {
        let p = bytes_to_point::<C>(&p_bytes[i])?;
        let r = C::Field::from_bytes(&sigs[i].rx)
            .into_option()
            .ok_or(Error::RLargerThanFieldSize)?;
        let s = C::Scalar::from_bytes(&sigs[i].s)
            .into_option()
            .ok_or(Error::SLargerThanCurveOrder)?;
        let r_point = recover_r::<C>(&r)?;
        let e: C::Scalar = hash_challenge(&sigs[i].rx, &p_bytes[i], &messages[i]);

        points.push(p);
        r_points.push(r_point);
        s_values.push(s);
        e_values.push(e);
    }

    let mut rng = OsRng::new();
    let mut coefficients = Vec::with_capacity(n);
    coefficients.push(C::Scalar::one());
    for _ in 1..n {
        coefficients.push(C::Scalar::random(&mut rng));
    }

    let mut scalar_sum = C::Scalar::zero();
    let mut rhs = C::identity();
    for i in 0..n {
        scalar_sum += coefficients[i] * s_values[i];

        let r_i = C::from_affine(&r_points[i]);
        let e_p_i = C::multiply(&C::from_affine(&points[i]), &e_values[i]);
        rhs += C::multiply(&(r_i + e_p_i), &coefficients[i]);
    }

    let lhs = C::multiply(&C::generator(), &scalar_sum);

    if bool::from(C::to_affine(&lhs).ct_eq(&C::to_affine(&rhs))) {
        Ok(())
    } else {
        Err(Error::VerificationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sign::sign;
    use schnorr_curve::secp256k1::{Scalar as Secp256k1Scalar, Secp256k1};

    fn keypair(d_val: u64) -> (Secp256k1Scalar, [u8; 33]) {
        let d = Secp256k1Scalar::from(d_val);
        let p = Secp256k1::to_affine(&Secp256k1::multiply(&Secp256k1::generator(), &d));
        (d, point_to_bytes::<Secp256k1>(&p).unwrap())
    }

    #[test]
    fn round_trip_verifies() {
        let (d, p_bytes) = keypair(777);
        let m = [0x10u8; 32];
        let sig = sign::<Secp256k1>(&d, &m).unwrap();
        assert!(verify::<Secp256k1>(&p_bytes, &m, &sig).is_ok());
    }

    #[test]
    fn wrong_message_fails_verification() {
        let (d, p_bytes) = keypair(777);
        let m = [0x10u8; 32];
        let other_m = [0x11u8; 32];
        let sig = sign::<Secp256k1>(&d, &m).unwrap();
        assert_eq!(verify::<Secp256k1>(&p_bytes, &other_m, &sig), Err(Error::VerificationFailed));
    }

    #[test]
    fn s_equal_to_curve_order_is_rejected() {
        let (d, p_bytes) = keypair(1);
        let m = [0x01u8; 32];
        let mut sig = sign::<Secp256k1>(&d, &m).unwrap();
        sig.s = Secp256k1Scalar::from(0u64); // placeholder, overwritten below
        // n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
        sig.s = [
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C,
            0xD0, 0x36, 0x41, 0x41,
        ];
        assert_eq!(verify::<Secp256k1>(&p_bytes, &m, &sig), Err(Error::SLargerThanCurveOrder));
    }

    #[test]
    fn s_equal_to_n_minus_one_is_accepted_as_a_well_formed_scalar() {
        // n - 1, which must parse (the boundary itself is exercised by the
        // s == n case above); whether the equation holds is a separate question
        // this decode-only check doesn't depend on.
        let n_minus_one: [u8; 32] = [
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C,
            0xD0, 0x36, 0x41, 0x40,
        ];
        assert!(bool::from(Secp256k1Scalar::from_bytes(&n_minus_one).is_some()));
    }

    #[test]
    fn r_equal_to_field_modulus_is_rejected() {
        let (d, p_bytes) = keypair(2);
        let m = [0x02u8; 32];
        let mut sig = sign::<Secp256k1>(&d, &m).unwrap();
        // p = 2^256 - 2^32 - 977
        sig.rx = [
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, 0xFF,
            0xFF, 0xFC, 0x2F, 0x00,
        ];
        // The byte string above is 1 short of p; nudge it to exactly p.
        sig.rx[31] = 0x2F;
        sig.rx[30] = 0xFC;
        sig.rx[29] = 0xFF;
        sig.rx[28] = 0xFF;
        sig.rx[27] = 0xFE;
        assert_eq!(verify::<Secp256k1>(&p_bytes, &m, &sig), Err(Error::RLargerThanFieldSize));
    }

    #[test]
    fn bad_public_key_prefix_is_rejected() {
        let (d, _) = keypair(3);
        let m = [0x03u8; 32];
        let sig = sign::<Secp256k1>(&d, &m).unwrap();

        for prefix in [0x00u8, 0x01, 0x04, 0x05] {
            let mut bad_p_bytes = [0u8; 33];
            bad_p_bytes[0] = prefix;
            assert_eq!(
                verify::<Secp256k1>(&bad_p_bytes, &m, &sig),
                Err(Error::PublicKeyNotOnCurve)
            );
        }
    }

    #[test]
    fn batch_of_valid_signatures_verifies() {
        let m = [0x20u8; 32];
        let mut p_bytes_list = Vec::new();
        let mut messages = Vec::new();
        let mut sigs = Vec::new();

        for i in 1..=5u64 {
            let (d, p_bytes) = keypair(i);
            let sig = sign::<Secp256k1>(&d, &m).unwrap();
            p_bytes_list.push(p_bytes);
            messages.push(m);
            sigs.push(sig);
        }

        assert!(batch_verify::<Secp256k1>(&p_bytes_list, &messages, &sigs).is_ok());
    }

    #[test]
    fn batch_with_one_bad_signature_fails() {
        let m = [0x21u8; 32];
        let mut p_bytes_list = Vec::new();
        let mut messages = Vec::new();
        let mut sigs = Vec::new();

        for i in 1..=5u64 {
            let (d, p_bytes) = keypair(i);
            let sig = sign::<Secp256k1>(&d, &m).unwrap();
            p_bytes_list.push(p_bytes);
            messages.push(m);
            sigs.push(sig);
        }

        // Corrupt the last signature's s value.
        sigs[4].s[31] ^= 0x01;

        assert_eq!(
            batch_verify::<Secp256k1>(&p_bytes_list, &messages, &sigs),
            Err(Error::VerificationFailed)
        );
    }

    #[test]
    fn batch_rejects_mismatched_lengths() {
        let m = [0x22u8; 32];
        let (d, p_bytes) = keypair(9);
        let sig = sign::<Secp256k1>(&d, &m).unwrap();

        let p_bytes_list = [p_bytes, p_bytes];
        let messages = [m];
        let sigs = [sig];

        assert_eq!(
            batch_verify::<Secp256k1>(&p_bytes_list, &messages, &sigs),
            Err(Error::VerificationFailed)
        );
    }
}
