//! Multi-signer key aggregation: naive additive aggregation (C7) and
//! non-interactive MuSig aggregation (C8).
//!
//! Both schemes virtualise a group of signers into a single party holding an
//! aggregated private scalar, then delegate to the ordinary single-signer
//! [`crate::sign::sign`] (C7) or inline the same nonce/challenge/response
//! steps against an aggregated point (C8). Verification in both cases is the
//! ordinary [`crate::verify::verify`] invoked against the aggregated public
//! key — the signature itself never reveals the individual components.

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use digest::Digest;
use schnorr_core::{Curve, Error, FieldElement, PointAffine, Result, Scalar};
use schnorr_encoding::{hash_challenge, point_to_bytes};
use schnorr_hash::Sha256;
use zeroize::Zeroize;

use crate::sign::sign;
use crate::signature::Signature;

/// Naive additive key aggregation (C7): signs `m` under `d_sum = (Σ dᵢ) mod n`.
///
/// The result is an ordinary signature, verifiable against `(Σ dᵢ)·G` with
/// [`crate::verify::verify`]. Insecure against rogue-key attacks in a setting
/// where participants choose their own keys adversarially — see
/// [`musig_non_interactive`] for the recommended alternative.
///
/// # Errors
/// Returns [`Error::ZeroScalar`] if the summed scalar (or the nonce derived
/// from it) reduces to zero mod the curve order.
pub fn naive_key_aggregation<C: Curve>(ds: &[C::Scalar], m: &[u8; 32]) -> Result<Signature> {
    let mut d_sum = C::Scalar::zero();
    for d in ds {
        d_sum += *d;
    }

    let result = sign::<C>(&d_sum, m);
    d_sum.zeroize();
    result
}

/// Non-interactive MuSig key aggregation (C8): signs `m` under the
/// MuSig-weighted sum `X = Σ aᵢ·Xᵢ` of the participants' public points,
/// where `aᵢ = H(L ∥ Pᵢbytes) mod n` and `L = H(P₁bytes ∥ … ∥ P_ubytes)`.
///
/// Unlike [`naive_key_aggregation`], this weighting defeats rogue-key
/// attacks: an adversary who picks their own public key as a function of the
/// honest participants' keys cannot force the aggregate to a value they
/// control, because their own coefficient is equally a function of the full
/// key set.
///
/// Participant order matters: permuting `xs` changes `L`, every `aᵢ`, and
/// hence `X` itself. Callers that need a canonical aggregate for a given set
/// of signers must agree on an ordering out of band.
///
/// # Errors
/// Returns [`Error::ZeroScalar`] if the aggregated private scalar or the
/// nonce derived from it reduces to zero mod the curve order. Returns
/// [`Error::PointAtInfinity`] if any participant's public point is the
/// identity (impossible for a nonzero private scalar, but checked
/// defensively since `point_to_bytes` enforces it anyway).
pub fn musig_non_interactive<C: Curve>(xs: &[C::Scalar], m: &[u8; 32]) -> Result<Signature> {
    let mut points = Vec::with_capacity(xs.len());
    let mut p_bytes = Vec::with_capacity(xs.len());
    for x in xs {
        let p = C::to_affine(&C::multiply(&C::generator(), x));
        p_bytes.push(point_to_bytes::<C>(&p)?);
        points.push(p);
    }

    let mut l_hasher = Sha256::new();
    for pb in &p_bytes {
        l_hasher.update(pb);
    }
    let l = l_hasher.finalize();

    let mut coefficients = Vec::with_capacity(xs.len());
    for pb in &p_bytes {
        let mut hasher = Sha256::new();
        hasher.update(&l);
        hasher.update(pb);
        let digest = hasher.finalize();
        coefficients.push(C::Scalar::from_bytes_reduced(&digest));
    }

    let mut x_sum = C::Scalar::zero();
    for (a, x) in coefficients.iter().zip(xs) {
        x_sum += *a * x;
    }

    let mut aggregate_point = C::identity();
    for (a, p) in coefficients.iter().zip(&points) {
        aggregate_point += C::multiply(&C::from_affine(p), a);
    }
    let x_affine = C::to_affine(&aggregate_point);
    let x_bytes = point_to_bytes::<C>(&x_affine)?;

    if bool::from(x_sum.is_zero()) {
        return Err(Error::ZeroScalar);
    }

    let mut k_prime = schnorr_rng::nonce::derive(&x_sum, m)?;
    let r = C::to_affine(&C::multiply(&C::generator(), &k_prime));

    let jacobi_positive = r.y().jacobi() == 1;
    let r = if jacobi_positive { r } else { r.negate() };
    let mut k = if jacobi_positive { k_prime } else { C::order() - k_prime };
    k_prime.zeroize();

    let rx_bytes = r.x().to_bytes();
    let e: C::Scalar = hash_challenge(&rx_bytes, &x_bytes, m);

    let s = k + e * x_sum;
    k.zeroize();
    x_sum.zeroize();

    Ok(Signature { rx: rx_bytes, s: s.to_bytes() })
}
