#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

//! Core traits and error types shared across the signing, verification, and
//! key-aggregation crates.
//!
//! This crate defines the abstract interface a curve implementation must
//! provide (field arithmetic, scalar arithmetic, point representation, and
//! scalar multiplication) so higher layers can be written once against a
//! trait object rather than against a concrete curve. The one curve
//! implementation in this workspace, `schnorr-curve`, is the reference
//! instantiation of these traits.

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use subtle::{Choice, ConstantTimeEq, CtOption};
use zeroize::Zeroize;

/// A trait for field elements that can be used in elliptic curve arithmetic.
pub trait FieldElement:
    Sized
    + Copy
    + Clone
    + Debug
    + Default
    + ConstantTimeEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + Zeroize
{
    /// Returns the additive identity (zero) of the field.
    fn zero() -> Self;

    /// Returns the multiplicative identity (one) of the field.
    fn one() -> Self;

    /// Returns true if this element is zero.
    fn is_zero(&self) -> Choice;

    /// Computes the multiplicative inverse of this field element.
    fn invert(&self) -> CtOption<Self>;

    /// Squares this field element.
    fn square(&self) -> Self;

    /// Raises this element to the power of the given exponent (big-endian limbs, most
    /// significant limb first).
    fn pow(&self, exp: &[u64]) -> Self;

    /// Converts this field element to a byte array.
    fn to_bytes(&self) -> [u8; 32];

    /// Creates a field element from a byte array.
    fn from_bytes(bytes: &[u8]) -> CtOption<Self>;

    /// Generates a uniformly random field element using the provided RNG.
    fn random(rng: impl rand_core::RngCore) -> Self;

    /// Computes a square root of this field element, if one exists.
    fn sqrt(&self) -> CtOption<Self>;

    /// Computes the Jacobi symbol of this element with respect to the field's modulus,
    /// as `-1`, `0`, or `1`.
    ///
    /// This is the primitive the Jacobi-positive nonce-point normalisation (used by the
    /// signer and verifier in `schnorr-sig`) is built on: it is evaluated only on public
    /// coordinates (never on secret scalars), so it need not run in constant time.
    fn jacobi(&self) -> i8;
}

/// A trait for scalar values used in elliptic curve arithmetic.
pub trait Scalar: FieldElement + From<u64> + for<'a> Mul<&'a Self, Output = Self> {
    /// The size of the scalar field in bits.
    const BITS: usize;

    /// Converts bytes to a scalar, reducing modulo the scalar field order if the raw
    /// value does not already fit.
    fn from_bytes_reduced(bytes: &[u8]) -> Self;

    /// Returns a `Choice` that is true iff `self < other`.
    fn ct_lt(&self, other: &Self) -> Choice;
}

/// A trait for affine points on an elliptic curve.
pub trait PointAffine: Sized + Copy + Clone + Debug + Default + ConstantTimeEq + Zeroize {
    /// The field element type for coordinates.
    type Field: FieldElement;

    /// Returns the x-coordinate.
    fn x(&self) -> Self::Field;

    /// Returns the y-coordinate.
    fn y(&self) -> Self::Field;

    /// Creates a new point from x and y coordinates, failing if the pair does not lie
    /// on the curve.
    fn new(x: Self::Field, y: Self::Field) -> CtOption<Self>;

    /// Returns true if this is the point at infinity.
    fn is_identity(&self) -> Choice;

    /// Returns true if this point satisfies the curve equation (or is the identity).
    fn is_on_curve(&self) -> Choice;

    /// Negates this point (reflects across the x-axis).
    fn negate(&self) -> Self;

    /// Converts this point to a 33-byte compressed encoding. The identity point encodes
    /// to a leading `0x00` byte followed by 32 zero bytes.
    fn to_bytes(&self) -> [u8; 33];

    /// Parses a 33-byte compressed encoding, recovering the y-coordinate from its
    /// square root and selecting the root matching the prefix byte's parity.
    fn from_bytes(bytes: &[u8; 33]) -> CtOption<Self>;
}

/// A trait for projective (Jacobian) points on an elliptic curve.
pub trait PointProjective:
    Sized
    + Copy
    + Clone
    + Debug
    + Default
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Zeroize
{
    /// The field element type for coordinates.
    type Field: FieldElement;

    /// The affine point type this corresponds to.
    type Affine: PointAffine<Field = Self::Field>;

    /// Returns the point at infinity.
    fn identity() -> Self;

    /// Returns true if this is the point at infinity.
    fn is_identity(&self) -> Choice;

    /// Doubles this point.
    fn double(&self) -> Self;

    /// Negates this point.
    fn negate(&self) -> Self;

    /// Returns true if this point satisfies the curve equation.
    fn is_on_curve(&self) -> Choice;

    /// Converts this projective point to affine coordinates.
    fn to_affine(&self) -> Self::Affine;

    /// Creates a projective point from an affine point.
    fn from_affine(p: &Self::Affine) -> Self;

    /// Constant-time conditional selection between `a` and `b`.
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self;
}

/// A trait for elliptic curves.
pub trait Curve: Sized + Copy + Clone + Debug {
    /// The scalar field element type.
    type Scalar: Scalar;

    /// The base field element type.
    type Field: FieldElement;

    /// The affine point type.
    type PointAffine: PointAffine<Field = Self::Field>;

    /// The projective point type.
    type PointProjective: PointProjective<Field = Self::Field, Affine = Self::PointAffine>;

    /// Returns the identity point (point at infinity).
    fn identity() -> Self::PointProjective;

    /// Returns the generator point of the curve.
    fn generator() -> Self::PointProjective;

    /// Returns the order of the curve (the size of the scalar field).
    fn order() -> Self::Scalar;

    /// Converts a projective point to affine coordinates.
    fn to_affine(p: &Self::PointProjective) -> Self::PointAffine;

    /// Converts an affine point to projective coordinates.
    fn from_affine(p: &Self::PointAffine) -> Self::PointProjective;

    /// Multiplies a point by a scalar using a constant-time Montgomery ladder.
    fn multiply(point: &Self::PointProjective, scalar: &Self::Scalar) -> Self::PointProjective;
}

/// Error type for cryptographic operations in the signature stack.
///
/// The `Display` strings for the verification-failure variants are relied on by callers
/// and test vectors; their wording is part of the crate's contract and should not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The supplied public key bytes do not decode to a point on the curve.
    PublicKeyNotOnCurve,
    /// The signature's `r` component is not a valid field element (`r >= p`).
    RLargerThanFieldSize,
    /// The signature's `s` component is not a valid scalar (`s >= n`).
    SLargerThanCurveOrder,
    /// The recomputed point `R` is the point at infinity.
    PointAtInfinity,
    /// The recomputed point `R` has a y-coordinate that is not a quadratic residue.
    YNotQuadraticResidue,
    /// The signature equation does not hold.
    VerificationFailed,
    /// A batch-verification `r` value has no corresponding point on the curve.
    RNotOnCurve,
    /// An input buffer had the wrong length for the operation.
    InvalidLength {
        /// The length the operation expected.
        expected: usize,
        /// The length that was actually supplied.
        actual: usize,
    },
    /// An integer did not fit in the target fixed-width encoding.
    IntegerTooLarge,
    /// A secret scalar (private key, nonce, or aggregate) reduced to zero.
    ZeroScalar,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::PublicKeyNotOnCurve => write!(f, "public key not on curve"),
            Error::RLargerThanFieldSize => write!(f, "r is larger than field size"),
            Error::SLargerThanCurveOrder => write!(f, "s is larger than curve order"),
            Error::PointAtInfinity => write!(f, "point at infinity"),
            Error::YNotQuadraticResidue => write!(f, "y is not a quadratic residue"),
            Error::VerificationFailed => write!(f, "signature verification failed"),
            Error::RNotOnCurve => write!(f, "r is not on the curve"),
            Error::InvalidLength { expected, actual } => {
                write!(f, "invalid buffer length: expected {expected}, got {actual}")
            }
            Error::IntegerTooLarge => write!(f, "integer too large for fixed-width encoding"),
            Error::ZeroScalar => write!(f, "scalar reduced to zero"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// The result type returned by every fallible operation in this workspace.
pub type Result<T> = core::result::Result<T, Error>;
