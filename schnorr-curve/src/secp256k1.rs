//! Implementation of the secp256k1 elliptic curve.
//!
//! secp256k1 is the curve used in Bitcoin and many other cryptocurrencies.
//! It is a Koblitz curve with parameters:
//! y² = x³ + 7
//! defined over the prime field F_p where
//! p = 2^256 - 2^32 - 2^9 - 2^8 - 2^7 - 2^6 - 2^4 - 1

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use schnorr_core::{Curve, FieldElement as CoreFieldElement, PointAffine, PointProjective};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroize;

/// The secp256k1 base field modulus, little-endian limbs (limb 0 holds the least
/// significant 64 bits).
/// p = 2^256 - 2^32 - 2^9 - 2^8 - 2^7 - 2^6 - 2^4 - 1
const P: [u64; 4] = [
    0xFFFF_FFFE_FFFF_FC2F,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// `p - 2`, the exponent used for field inversion via Fermat's little theorem.
const P_MINUS_2: [u64; 4] = [
    0xFFFF_FFFE_FFFF_FC2D,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// `(p + 1) / 4`, the exponent used to extract square roots since `p ≡ 3 (mod 4)`.
const P_PLUS_1_OVER_4: [u64; 4] = [
    0xFFFF_FFFF_BFFF_FF0C,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0x3FFF_FFFF_FFFF_FFFF,
];

/// `(p - 1) / 2`, the exponent used to evaluate the Legendre/Jacobi symbol.
const P_MINUS_1_OVER_2: [u64; 4] = [
    0xFFFF_FFFF_7FFF_FE17,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0x7FFF_FFFF_FFFF_FFFF,
];

/// The secp256k1 scalar field modulus (curve order), little-endian limbs.
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const N: [u64; 4] = [
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// `n - 2`, the exponent used for scalar inversion via Fermat's little theorem.
const N_MINUS_2: [u64; 4] = [
    0xBFD2_5E8C_D036_413F,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// `(n - 1) / 2`, the exponent used to evaluate the scalar field's Jacobi symbol.
const N_MINUS_1_OVER_2: [u64; 4] = [
    0xDFE9_2F46_681B_20A0,
    0x5D57_6E73_57A4_501D,
    0xFFFF_FFFF_FFFF_FFFF,
    0x7FFF_FFFF_FFFF_FFFF,
];

/// The secp256k1 generator point's x-coordinate, little-endian limbs.
const GX: [u64; 4] = [
    0x59F2_815B_16F8_1798,
    0x029B_FCDB_2DCE_28D9,
    0x55A0_6295_CE87_0B07,
    0x79BE_667E_F9DC_BBAC,
];

/// The secp256k1 generator point's y-coordinate, little-endian limbs.
const GY: [u64; 4] = [
    0x9C47_D08F_FB10_D4B8,
    0xFD17_B448_A685_5419,
    0x5DA4_FBFC_0E11_08A8,
    0x483A_DA77_26A3_C465,
];

/// Returns true (as a `Choice`) iff the 4-limb value `a` is greater than or equal to `b`.
///
/// Both operands are compared purely through bitwise `Choice` combinators, so the
/// running time does not depend on where the limbs first differ.
fn limbs_geq(a: &[u64; 4], b: &[u64; 4]) -> Choice {
    let mut greater = Choice::from(0u8);
    let mut equal_so_far = Choice::from(1u8);
    for i in (0..4).rev() {
        let a_gt = Choice::from((a[i] > b[i]) as u8);
        let a_eq = Choice::from((a[i] == b[i]) as u8);
        greater = greater | (equal_so_far & a_gt);
        equal_so_far = equal_so_far & a_eq;
    }
    greater | equal_so_far
}

/// Conditionally subtracts `modulus` from `limbs` if `limbs >= modulus`, in constant time.
fn conditional_sub_modulus(limbs: &[u64; 4], modulus: &[u64; 4]) -> [u64; 4] {
    let mut diff = [0u64; 4];
    let mut borrow = 0u64;
    for i in 0..4 {
        let (d1, b1) = limbs[i].overflowing_sub(modulus[i]);
        let (d2, b2) = d1.overflowing_sub(borrow);
        diff[i] = d2;
        borrow = (b1 || b2) as u64;
    }
    let should_sub = limbs_geq(limbs, modulus);
    let mut out = [0u64; 4];
    for i in 0..4 {
        out[i] = u64::conditional_select(&limbs[i], &diff[i], should_sub);
    }
    out
}

/// Reduces a 512-bit value (little-endian limbs) modulo `modulus`, producing a value in
/// `[0, modulus)`.
///
/// This is a bit-serial long division: the running remainder is shifted left one bit at a
/// time (most significant bit of `wide` first) with the next input bit folded in, and
/// `modulus` is conditionally subtracted whenever the remainder has grown to meet or
/// exceed it. The remainder needs one bit more than `modulus` can hold immediately after
/// each shift, so it is carried as four 64-bit limbs plus a single extra overflow bit
/// (always 0 or 1 by the loop invariant) rather than the usual four.
fn reduce_wide(wide: &[u64; 8], modulus: &[u64; 4]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    let mut overflow: u64 = 0;
    let modulus5 = [modulus[0], modulus[1], modulus[2], modulus[3], 0u64];

    for bit_pos in (0..512).rev() {
        let incoming = (wide[bit_pos / 64] >> (bit_pos % 64)) & 1;

        let mut carry = incoming;
        for limb in limbs.iter_mut() {
            let new_carry = *limb >> 63;
            *limb = (*limb << 1) | carry;
            carry = new_carry;
        }
        overflow = (overflow << 1) | carry;

        let remainder5 = [limbs[0], limbs[1], limbs[2], limbs[3], overflow];

        let mut diff = [0u64; 5];
        let mut borrow = 0u64;
        for i in 0..5 {
            let (d1, b1) = remainder5[i].overflowing_sub(modulus5[i]);
            let (d2, b2) = d1.overflowing_sub(borrow);
            diff[i] = d2;
            borrow = (b1 || b2) as u64;
        }
        let no_borrow = Choice::from((1 - borrow) as u8);

        for i in 0..4 {
            limbs[i] = u64::conditional_select(&limbs[i], &diff[i], no_borrow);
        }
        overflow = u64::conditional_select(&overflow, &diff[4], no_borrow);
    }

    limbs
}

/// Computes the full 512-bit schoolbook product of two 4-limb values.
fn limbs_mul_wide(a: &[u64; 4], b: &[u64; 4]) -> [u64; 8] {
    let mut t = [0u64; 8];
    for i in 0..4 {
        let mut carry = 0u64;
        for j in 0..4 {
            let product = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + (carry as u128);
            t[i + j] = product as u64;
            carry = (product >> 64) as u64;
        }
        t[i + 4] = carry;
    }
    t
}

/// A field element in the secp256k1 base field, stored as four little-endian 64-bit limbs
/// in canonical (non-Montgomery) form, always reduced modulo `p`.
#[derive(Clone, Debug, Default, Copy, zeroize::Zeroize)]
pub struct FieldElement([u64; 4]);

impl FieldElement {
    /// Creates a new field element from raw limbs. The caller must ensure `raw < p`;
    /// values are not reduced here.
    pub const fn from_raw(raw: [u64; 4]) -> Self {
        Self(raw)
    }

    /// Returns the raw limbs of this field element.
    pub const fn to_raw(&self) -> [u64; 4] {
        self.0
    }

    /// Doubles this field element.
    pub fn double(&self) -> Self {
        let s = *self;
        s + s
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut result = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let (sum1, c1) = self.0[i].overflowing_add(rhs.0[i]);
            let (sum2, c2) = sum1.overflowing_add(carry);
            result[i] = sum2;
            carry = (c1 || c2) as u64;
        }

        let reduced = conditional_sub_modulus(&result, &P);
        // The unreduced sum may have overflowed past 2^256, in which case it is always
        // >= p and the reduced form must be used regardless of what `limbs_geq` alone says.
        let should_reduce = Choice::from(carry as u8) | limbs_geq(&result, &P);
        Self::conditional_select(&Self(result), &Self(reduced), should_reduce)
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut result = [0u64; 4];
        let mut borrow = 0u64;
        for i in 0..4 {
            let (diff1, b1) = self.0[i].overflowing_sub(rhs.0[i]);
            let (diff2, b2) = diff1.overflowing_sub(borrow);
            result[i] = diff2;
            borrow = (b1 || b2) as u64;
        }

        let mut with_p_added = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let (sum1, c1) = result[i].overflowing_add(P[i]);
            let (sum2, c2) = sum1.overflowing_add(carry);
            with_p_added[i] = sum2;
            carry = (c1 || c2) as u64;
        }

        let should_add_p = Choice::from(borrow as u8);
        Self::conditional_select(&Self(result), &Self(with_p_added), should_add_p)
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let wide = limbs_mul_wide(&self.0, &rhs.0);
        Self(reduce_wide(&wide, &P))
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        let mut result = [0u64; 4];
        let mut borrow = 0u64;
        for i in 0..4 {
            let (diff1, b1) = P[i].overflowing_sub(self.0[i]);
            let (diff2, b2) = diff1.overflowing_sub(borrow);
            result[i] = diff2;
            borrow = (b1 || b2) as u64;
        }

        Self::conditional_select(&Self(result), &self, self.is_zero())
    }
}

impl AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for FieldElement {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl schnorr_core::FieldElement for FieldElement {
    fn zero() -> Self {
        Self([0, 0, 0, 0])
    }

    fn one() -> Self {
        Self([1, 0, 0, 0])
    }

    fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::zero())
    }

    fn invert(&self) -> CtOption<Self> {
        CtOption::new(self.pow(&P_MINUS_2), !self.is_zero())
    }

    fn square(&self) -> Self {
        *self * *self
    }

    fn pow(&self, exp: &[u64]) -> Self {
        if exp.is_empty() {
            return Self::one();
        }

        let mut result = Self::one();
        let mut base = *self;

        for &limb in exp.iter() {
            for j in 0..64 {
                if ((limb >> j) & 1) == 1 {
                    result = result * base;
                }
                base = base.square();
            }
        }

        result
    }

    fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for i in 0..4 {
            let limb = self.0[3 - i];
            for j in 0..8 {
                bytes[i * 8 + j] = (limb >> (56 - j * 8)) as u8;
            }
        }
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> CtOption<Self> {
        if bytes.len() != 32 {
            return CtOption::new(Self::zero(), Choice::from(0));
        }

        let mut limbs = [0u64; 4];
        for i in 0..4 {
            for j in 0..8 {
                limbs[3 - i] |= (bytes[i * 8 + j] as u64) << (56 - j * 8);
            }
        }

        let is_valid = !limbs_geq(&limbs, &P);
        let result = Self::conditional_select(&Self::zero(), &Self(limbs), is_valid);
        CtOption::new(result, is_valid)
    }

    fn random(mut rng: impl rand_core::RngCore) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);

        let mut limbs = [0u64; 4];
        for i in 0..4 {
            for j in 0..8 {
                limbs[3 - i] |= (bytes[i * 8 + j] as u64) << (56 - j * 8);
            }
        }

        Self(conditional_sub_modulus(&limbs, &P))
    }

    fn sqrt(&self) -> CtOption<Self> {
        // p ≡ 3 (mod 4), so sqrt(a) = a^((p+1)/4) whenever a is a quadratic residue.
        let candidate = self.pow(&P_PLUS_1_OVER_4);
        let is_correct_root = candidate.square().ct_eq(self);
        CtOption::new(candidate, is_correct_root)
    }

    fn jacobi(&self) -> i8 {
        // For prime p, Jacobi(a) = a^((p-1)/2) mod p, which evaluates to 1, -1 (i.e. p-1),
        // or 0. Evaluated only on public coordinates, so it need not run in constant time.
        if bool::from(self.is_zero()) {
            return 0;
        }

        let legendre = self.pow(&P_MINUS_1_OVER_2);
        if bool::from(legendre.ct_eq(&Self::one())) {
            1
        } else {
            -1
        }
    }
}

/// A point in affine coordinates on the secp256k1 curve.
#[derive(Clone, Debug, Copy)]
pub struct AffinePoint {
    x: FieldElement,
    y: FieldElement,
    infinity: Choice,
}

impl Zeroize for AffinePoint {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self {
            x: FieldElement::default(),
            y: FieldElement::default(),
            infinity: Choice::from(0),
        }
    }
}

impl PointAffine for AffinePoint {
    type Field = FieldElement;

    fn x(&self) -> Self::Field {
        self.x
    }

    fn y(&self) -> Self::Field {
        self.y
    }

    fn new(x: Self::Field, y: Self::Field) -> CtOption<Self> {
        let x3 = x.square() * x;
        let seven = FieldElement::from_raw([7, 0, 0, 0]);
        let rhs = x3 + seven;
        let y2 = y.square();
        let is_on_curve = y2.ct_eq(&rhs);

        CtOption::new(
            Self {
                x,
                y,
                infinity: Choice::from(0),
            },
            is_on_curve,
        )
    }

    fn is_identity(&self) -> Choice {
        self.infinity
    }

    fn to_bytes(&self) -> [u8; 33] {
        let mut bytes = [0u8; 33];

        if bool::from(self.infinity) {
            bytes[0] = 0x00;
        } else {
            let y_bytes = self.y.to_bytes();
            let y_is_odd = (y_bytes[31] & 1) == 1;
            bytes[0] = if y_is_odd { 0x03 } else { 0x02 };

            let x_bytes = self.x.to_bytes();
            bytes[1..33].copy_from_slice(&x_bytes);
        }

        bytes
    }

    fn from_bytes(bytes: &[u8; 33]) -> CtOption<Self> {
        // Only 0x02 (even y) and 0x03 (odd y) are accepted prefixes; the point at
        // infinity has no compressed encoding and is never produced here.
        let is_even_y = Choice::from((bytes[0] == 0x02) as u8);
        let is_odd_y = Choice::from((bytes[0] == 0x03) as u8);
        let is_valid_prefix = is_even_y | is_odd_y;

        if !bool::from(is_valid_prefix) {
            return CtOption::new(Self::default(), Choice::from(0));
        }

        let mut x_bytes = [0u8; 32];
        x_bytes.copy_from_slice(&bytes[1..33]);

        let x_opt = FieldElement::from_bytes(&x_bytes);
        if !bool::from(x_opt.is_some()) {
            return CtOption::new(Self::default(), Choice::from(0));
        }
        let x = x_opt.unwrap();

        let x_squared = x.square();
        let x_cubed = x_squared * x;
        let seven = FieldElement::from_raw([7, 0, 0, 0]);
        let y_squared = x_cubed + seven;

        let y_opt = y_squared.sqrt();
        if !bool::from(y_opt.is_some()) {
            return CtOption::new(Self::default(), Choice::from(0));
        }
        let y_candidate = y_opt.unwrap();

        let y_negated = -y_candidate;
        let candidate_bytes = y_candidate.to_bytes();
        let candidate_is_odd = Choice::from((candidate_bytes[31] & 1 == 1) as u8);

        // If the prefix calls for odd y but our candidate root is even (or vice versa),
        // use the other root instead.
        let y = FieldElement::conditional_select(
            &y_candidate,
            &y_negated,
            is_odd_y ^ candidate_is_odd,
        );

        let point = Self {
            x,
            y,
            infinity: Choice::from(0),
        };

        let on_curve = point.is_on_curve();
        CtOption::new(point, on_curve)
    }

    fn is_on_curve(&self) -> Choice {
        if bool::from(self.infinity) {
            return Choice::from(1u8);
        }

        let x_squared = self.x.square();
        let x_cubed = x_squared * self.x;
        let seven = FieldElement::from_raw([7, 0, 0, 0]);
        let right = x_cubed + seven;
        let y_squared = self.y.square();

        y_squared.ct_eq(&right)
    }

    fn negate(&self) -> Self {
        if bool::from(self.infinity) {
            return *self;
        }

        Self {
            x: self.x,
            y: -self.y,
            infinity: self.infinity,
        }
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)) | (self.infinity & other.infinity)
    }
}

/// A point in Jacobian projective coordinates on the secp256k1 curve, where the affine
/// coordinates are `(X/Z^2, Y/Z^3)`.
#[derive(Clone, Debug, Copy, zeroize::Zeroize)]
pub struct ProjectivePoint {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl Default for ProjectivePoint {
    fn default() -> Self {
        Self::identity()
    }
}

impl PointProjective for ProjectivePoint {
    type Field = FieldElement;
    type Affine = AffinePoint;

    fn identity() -> Self {
        Self {
            x: FieldElement::zero(),
            y: FieldElement::one(),
            z: FieldElement::zero(),
        }
    }

    fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    fn to_affine(&self) -> Self::Affine {
        let is_identity = self.is_identity();

        // Invert unconditionally (even for the identity, where z is zero and the
        // inversion below yields zero) to avoid branching on a value derived from self.
        let z_inv = self.z.invert().unwrap_or_else(FieldElement::zero);
        let z_inv_squared = z_inv.square();
        let z_inv_cubed = z_inv_squared * z_inv;

        let x_affine = self.x * z_inv_squared;
        let y_affine = self.y * z_inv_cubed;

        AffinePoint {
            x: FieldElement::conditional_select(&x_affine, &FieldElement::zero(), is_identity),
            y: FieldElement::conditional_select(&y_affine, &FieldElement::zero(), is_identity),
            infinity: is_identity,
        }
    }

    fn from_affine(p: &Self::Affine) -> Self {
        let from_point = Self {
            x: p.x,
            y: p.y,
            z: FieldElement::one(),
        };
        Self::conditional_select(&from_point, &Self::identity(), p.is_identity())
    }

    fn double(&self) -> Self {
        // dbl-2009-l (EFD), specialised to a=0 curves.
        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let xy2 = (self.x + yy).square();
        let s = (xy2 - xx - yyyy).double();
        let m = FieldElement::from_raw([3, 0, 0, 0]) * xx;
        let t = m.square() - s.double();
        let eight = FieldElement::from_raw([8, 0, 0, 0]);
        let y3 = m * (s - t) - eight * yyyy;
        let z3 = (self.y * self.z).double();

        let doubled = Self { x: t, y: y3, z: z3 };
        Self::conditional_select(&doubled, &Self::identity(), self.is_identity())
    }

    fn negate(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    fn is_on_curve(&self) -> Choice {
        self.is_identity() | self.to_affine().is_on_curve()
    }

    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl Add for ProjectivePoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        // add-2007-bl (EFD), general Jacobian addition.
        let z1z1 = self.z.square();
        let z2z2 = rhs.z.square();
        let u1 = self.x * z2z2;
        let u2 = rhs.x * z1z1;
        let z1cubed = z1z1 * self.z;
        let z2cubed = z2z2 * rhs.z;
        let s1 = self.y * z2cubed;
        let s2 = rhs.y * z1cubed;

        let h = u2 - u1;
        let r = s2 - s1;
        let hh = h.square();
        let hhh = hh * h;
        let u1hh = u1 * hh;
        let x3 = r.square() - hhh - u1hh.double();
        let y3 = r * (u1hh - x3) - s1 * hhh;
        let z3 = h * self.z * rhs.z;
        let generic_sum = Self { x: x3, y: y3, z: z3 };

        let same_x = u1.ct_eq(&u2);
        let same_y = s1.ct_eq(&s2);
        let doubled = self.double();

        // Pick the right case in constant time: equal x and y doubles, equal x and
        // opposite y cancel to infinity, otherwise the generic addition formula applies.
        let result = Self::conditional_select(&generic_sum, &doubled, same_x & same_y);
        let result = Self::conditional_select(&result, &Self::identity(), same_x & !same_y);
        let result = Self::conditional_select(&result, &rhs, self.is_identity());
        Self::conditional_select(&result, &self, rhs.is_identity())
    }
}

impl AddAssign for ProjectivePoint {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for ProjectivePoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + rhs.negate()
    }
}

impl SubAssign for ProjectivePoint {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        <Self as PointProjective>::conditional_select(a, b, choice)
    }
}

/// A scalar value in the secp256k1 scalar field (integers modulo the curve order `n`),
/// stored as four little-endian 64-bit limbs, always reduced modulo `n`.
#[derive(Clone, Debug, Default, Copy, zeroize::Zeroize)]
pub struct Scalar([u64; 4]);

impl Scalar {
    /// Creates a new scalar from raw limbs. The caller must ensure `raw < n`; values are
    /// not reduced here.
    pub const fn from_raw(raw: [u64; 4]) -> Self {
        Self(raw)
    }

    /// Returns the raw limbs of this scalar.
    pub const fn to_raw(&self) -> [u64; 4] {
        self.0
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl Eq for Scalar {}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self([value, 0, 0, 0])
    }
}

impl Add for Scalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut result = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let (sum1, c1) = self.0[i].overflowing_add(rhs.0[i]);
            let (sum2, c2) = sum1.overflowing_add(carry);
            result[i] = sum2;
            carry = (c1 || c2) as u64;
        }

        let reduced = conditional_sub_modulus(&result, &N);
        let should_reduce = Choice::from(carry as u8) | limbs_geq(&result, &N);
        Self::conditional_select(&Self(result), &Self(reduced), should_reduce)
    }
}

impl Sub for Scalar {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut result = [0u64; 4];
        let mut borrow = 0u64;
        for i in 0..4 {
            let (diff1, b1) = self.0[i].overflowing_sub(rhs.0[i]);
            let (diff2, b2) = diff1.overflowing_sub(borrow);
            result[i] = diff2;
            borrow = (b1 || b2) as u64;
        }

        let mut with_n_added = [0u64; 4];
        let mut carry = 0u64;
        for i in 0..4 {
            let (sum1, c1) = result[i].overflowing_add(N[i]);
            let (sum2, c2) = sum1.overflowing_add(carry);
            with_n_added[i] = sum2;
            carry = (c1 || c2) as u64;
        }

        let should_add_n = Choice::from(borrow as u8);
        Self::conditional_select(&Self(result), &Self(with_n_added), should_add_n)
    }
}

impl Mul for Scalar {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let wide = limbs_mul_wide(&self.0, &rhs.0);
        Self(reduce_wide(&wide, &N))
    }
}

impl<'a> Mul<&'a Scalar> for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: &'a Scalar) -> Scalar {
        self * *rhs
    }
}

impl Neg for Scalar {
    type Output = Self;

    fn neg(self) -> Self {
        let mut result = [0u64; 4];
        let mut borrow = 0u64;
        for i in 0..4 {
            let (diff1, b1) = N[i].overflowing_sub(self.0[i]);
            let (diff2, b2) = diff1.overflowing_sub(borrow);
            result[i] = diff2;
            borrow = (b1 || b2) as u64;
        }

        Self::conditional_select(&Self(result), &self, self.is_zero())
    }
}

impl AddAssign for Scalar {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Scalar {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Scalar {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl schnorr_core::FieldElement for Scalar {
    fn zero() -> Self {
        Self([0, 0, 0, 0])
    }

    fn one() -> Self {
        Self([1, 0, 0, 0])
    }

    fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::zero())
    }

    fn invert(&self) -> CtOption<Self> {
        CtOption::new(self.pow(&N_MINUS_2), !self.is_zero())
    }

    fn square(&self) -> Self {
        *self * *self
    }

    fn pow(&self, exp: &[u64]) -> Self {
        if exp.is_empty() {
            return Self::one();
        }

        let mut result = Self::one();
        let mut base = *self;

        for &limb in exp.iter() {
            for j in 0..64 {
                if ((limb >> j) & 1) == 1 {
                    result = result * base;
                }
                base = base.square();
            }
        }

        result
    }

    fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for i in 0..4 {
            let limb = self.0[3 - i];
            for j in 0..8 {
                bytes[i * 8 + j] = (limb >> (56 - j * 8)) as u8;
            }
        }
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> CtOption<Self> {
        if bytes.len() != 32 {
            return CtOption::new(Self::zero(), Choice::from(0));
        }

        let mut limbs = [0u64; 4];
        for i in 0..4 {
            for j in 0..8 {
                limbs[3 - i] |= (bytes[i * 8 + j] as u64) << (56 - j * 8);
            }
        }

        let is_valid = !limbs_geq(&limbs, &N);
        let result = Self::conditional_select(&Self::zero(), &Self(limbs), is_valid);
        CtOption::new(result, is_valid)
    }

    fn random(mut rng: impl rand_core::RngCore) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);

        let mut wide = [0u64; 8];
        for i in 0..4 {
            for j in 0..8 {
                wide[3 - i] |= (bytes[i * 8 + j] as u64) << (56 - j * 8);
            }
        }

        Self(reduce_wide(&wide, &N))
    }

    fn sqrt(&self) -> CtOption<Self> {
        // Square roots in the scalar field are not needed anywhere in this signature
        // scheme (the Jacobi-positive nonce check only ever runs on base-field
        // y-coordinates), so this is intentionally left unimplemented.
        CtOption::new(Self::zero(), Choice::from(0))
    }

    fn jacobi(&self) -> i8 {
        // Unused by the Jacobi-positive nonce-point normalisation (that check is always
        // performed on a base-field y-coordinate), but the trait requires an
        // implementation. n is prime, so the same a^((n-1)/2) definition applies.
        if bool::from(self.is_zero()) {
            return 0;
        }

        let legendre = self.pow(&N_MINUS_1_OVER_2);
        if bool::from(legendre.ct_eq(&Self::one())) {
            1
        } else {
            -1
        }
    }
}

impl schnorr_core::Scalar for Scalar {
    const BITS: usize = 256;

    fn from_bytes_reduced(bytes: &[u8]) -> Self {
        let mut wide = [0u64; 8];
        let len = core::cmp::min(bytes.len(), 64);

        // Treat `bytes` as a big-endian integer of up to 512 bits, right-aligned (i.e. the
        // last byte is the least significant), matching `from_bytes`'s convention.
        for (i, &b) in bytes[..len].iter().rev().enumerate() {
            wide[i / 8] |= (b as u64) << ((i % 8) * 8);
        }

        Self(reduce_wide(&wide, &N))
    }

    fn ct_lt(&self, other: &Self) -> Choice {
        !limbs_geq(&self.0, &other.0)
    }
}

/// The secp256k1 elliptic curve.
#[derive(Copy, Clone, Debug)]
pub struct Secp256k1;

impl Secp256k1 {
    /// Returns the cofactor of the curve.
    pub fn cofactor() -> u64 {
        1
    }

    /// Returns the `a` parameter of the short Weierstrass curve equation `y^2 = x^3 + ax + b`.
    pub fn a() -> FieldElement {
        FieldElement::zero()
    }

    /// Returns the `b` parameter of the short Weierstrass curve equation `y^2 = x^3 + ax + b`.
    pub fn b() -> FieldElement {
        FieldElement::from_raw([7, 0, 0, 0])
    }
}

impl Curve for Secp256k1 {
    type Field = FieldElement;
    type Scalar = Scalar;
    type PointAffine = AffinePoint;
    type PointProjective = ProjectivePoint;

    fn identity() -> Self::PointProjective {
        ProjectivePoint::identity()
    }

    fn generator() -> Self::PointProjective {
        ProjectivePoint {
            x: FieldElement::from_raw(GX),
            y: FieldElement::from_raw(GY),
            z: FieldElement::one(),
        }
    }

    fn to_affine(p: &Self::PointProjective) -> Self::PointAffine {
        p.to_affine()
    }

    fn from_affine(p: &Self::PointAffine) -> Self::PointProjective {
        ProjectivePoint::from_affine(p)
    }

    fn multiply(point: &Self::PointProjective, scalar: &Self::Scalar) -> Self::PointProjective {
        // Constant-time Montgomery ladder: process every bit of the scalar, most
        // significant first, regardless of the point or scalar's value.
        let mut scalar_bytes = scalar.to_bytes();

        let mut r0 = Self::identity();
        let mut r1 = *point;

        for i in 0..256 {
            let byte_idx = i / 8;
            let bit_idx = 7 - (i % 8);
            let bit = Choice::from(((scalar_bytes[byte_idx] >> bit_idx) & 1) as u8);

            let r0_plus_r1 = r0 + r1;
            let r0_doubled = r0.double();
            let r1_doubled = r1.double();

            r0 = ProjectivePoint::conditional_select(&r0_doubled, &r0_plus_r1, bit);
            r1 = ProjectivePoint::conditional_select(&r0_plus_r1, &r1_doubled, bit);
        }

        scalar_bytes.zeroize();
        r0
    }

    fn order() -> Self::Scalar {
        Scalar(N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_add_sub_roundtrip() {
        let a = FieldElement::from_raw([1, 0, 0, 0]);
        let b = FieldElement::from_raw([2, 0, 0, 0]);
        let c = a + b;
        assert_eq!(c.to_raw()[0], 3);

        let d = c - a;
        assert_eq!(d.to_raw(), b.to_raw());

        let e = a * b;
        assert_eq!(e.to_raw()[0], 2);

        let f = -a;
        let g = a + f;
        assert!(bool::from(g.is_zero()));

        let h = b.square();
        assert_eq!(h.to_raw()[0], 4);
    }

    #[test]
    fn field_add_wraps_past_modulus() {
        let almost_p = FieldElement::from_raw(conditional_sub_modulus(&P, &[1, 0, 0, 0]));
        let one = FieldElement::from_raw([1, 0, 0, 0]);
        let sum = almost_p + one;
        assert!(bool::from(sum.is_zero()));
    }

    #[test]
    fn field_mul_matches_repeated_addition() {
        let a = FieldElement::from_raw([7, 0, 0, 0]);
        let mut expected = FieldElement::zero();
        for _ in 0..11 {
            expected = expected + a;
        }
        let b = FieldElement::from_raw([11, 0, 0, 0]);
        assert_eq!((a * b).to_raw(), expected.to_raw());
    }

    #[test]
    fn field_invert_roundtrip() {
        let a = FieldElement::from_raw([123456789, 0, 0, 0]);
        let inv = schnorr_core::FieldElement::invert(&a).unwrap();
        assert!(bool::from((a * inv).ct_eq(&FieldElement::one())));
    }

    #[test]
    fn field_sqrt_roundtrip() {
        let a = FieldElement::from_raw([1234567, 0, 0, 0]);
        let a_squared = a.square();
        let root = schnorr_core::FieldElement::sqrt(&a_squared).unwrap();
        assert!(bool::from(root.square().ct_eq(&a_squared)));
    }

    #[test]
    fn field_bytes_roundtrip() {
        let a = FieldElement::from_raw([0x1122_3344_5566_7788, 0xAABB_CCDD_EEFF_0011, 2, 0]);
        let bytes = schnorr_core::FieldElement::to_bytes(&a);
        let back = <FieldElement as schnorr_core::FieldElement>::from_bytes(&bytes).unwrap();
        assert_eq!(a.to_raw(), back.to_raw());
    }

    #[test]
    fn generator_is_on_curve() {
        let g = Secp256k1::generator();
        assert!(bool::from(g.is_on_curve()));
    }

    #[test]
    fn generator_matches_published_coordinates() {
        use hex_literal::hex;

        let gx = hex!("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");
        let gy = hex!("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8");
        let g = Secp256k1::to_affine(&Secp256k1::generator());
        assert_eq!(schnorr_core::FieldElement::to_bytes(&g.x), gx);
        assert_eq!(schnorr_core::FieldElement::to_bytes(&g.y), gy);
    }

    #[test]
    fn point_doubling_matches_addition() {
        let g = Secp256k1::generator();
        let g2 = g + g;
        let g2_double = g.double();

        assert_eq!(g2.to_affine().x().to_raw(), g2_double.to_affine().x().to_raw());
        assert_eq!(g2.to_affine().y().to_raw(), g2_double.to_affine().y().to_raw());

        let g_again = g2 - g;
        assert_eq!(g_again.to_affine().x().to_raw(), g.to_affine().x().to_raw());
        assert_eq!(g_again.to_affine().y().to_raw(), g.to_affine().y().to_raw());

        let inf = g - g;
        assert!(bool::from(inf.is_identity()));
    }

    #[test]
    fn scalar_multiply_matches_repeated_addition() {
        let g = Secp256k1::generator();

        let two = Scalar::from(2u64);
        let g2 = Secp256k1::multiply(&g, &two);
        let g_plus_g = g + g;
        assert_eq!(g2.to_affine().x().to_raw(), g_plus_g.to_affine().x().to_raw());
        assert_eq!(g2.to_affine().y().to_raw(), g_plus_g.to_affine().y().to_raw());

        let three = Scalar::from(3u64);
        let g3 = Secp256k1::multiply(&g, &three);
        let g_plus_g_plus_g = g + g + g;
        assert_eq!(g3.to_affine().x().to_raw(), g_plus_g_plus_g.to_affine().x().to_raw());
        assert_eq!(g3.to_affine().y().to_raw(), g_plus_g_plus_g.to_affine().y().to_raw());
    }

    #[test]
    fn scalar_add_sub_mul() {
        let a = Scalar::from(10u64);
        let b = Scalar::from(20u64);
        let c = a + b;
        assert_eq!(c.to_raw()[0], 30);

        let d = c - a;
        assert_eq!(d.to_raw(), b.to_raw());

        let e = a * b;
        assert_eq!(e.to_raw()[0], 200);

        let f = -a;
        let g = a + f;
        assert!(bool::from(schnorr_core::FieldElement::is_zero(&g)));
    }

    #[test]
    fn scalar_invert_roundtrip() {
        let a = Scalar::from(123456789u64);
        let inv = schnorr_core::FieldElement::invert(&a).unwrap();
        assert!(bool::from((a * inv).ct_eq(&Scalar::one())));
    }

    #[test]
    fn scalar_ct_lt() {
        let a = Scalar::from(10u64);
        let b = Scalar::from(20u64);
        assert!(bool::from(<Scalar as schnorr_core::Scalar>::ct_lt(&a, &b)));
        assert!(!bool::from(<Scalar as schnorr_core::Scalar>::ct_lt(&b, &a)));
    }

    #[test]
    fn scalar_bytes_roundtrip() {
        let a = Scalar::from(0x0123_4567_89ab_cdefu64);
        let bytes = schnorr_core::FieldElement::to_bytes(&a);
        let back = <Scalar as schnorr_core::FieldElement>::from_bytes(&bytes).unwrap();
        assert_eq!(a.to_raw(), back.to_raw());
    }

    #[test]
    fn scalar_from_bytes_reduced_wraps() {
        // n as big-endian bytes reduces to zero.
        let mut n_bytes = [0u8; 32];
        for i in 0..4 {
            let limb = N[3 - i];
            for j in 0..8 {
                n_bytes[i * 8 + j] = (limb >> (56 - j * 8)) as u8;
            }
        }
        let reduced = <Scalar as schnorr_core::Scalar>::from_bytes_reduced(&n_bytes);
        assert!(bool::from(schnorr_core::FieldElement::is_zero(&reduced)));
    }

    #[test]
    fn point_affine_compressed_roundtrip() {
        let g = Secp256k1::generator();
        let g_affine = Secp256k1::to_affine(&g);

        let encoded = g_affine.to_bytes();
        let decoded = AffinePoint::from_bytes(&encoded).unwrap();
        assert_eq!(decoded.x().to_raw(), g_affine.x().to_raw());
        assert_eq!(decoded.y().to_raw(), g_affine.y().to_raw());
    }

    #[test]
    fn zeroize_clears_scalars_and_points() {
        let mut s = Scalar::from(0x1234_5678_90ab_cdefu64);
        s.zeroize();
        assert_eq!(s.to_raw(), [0, 0, 0, 0]);

        let g = Secp256k1::generator();
        let mut p = Secp256k1::to_affine(&g);
        p.zeroize();
        assert!(bool::from(p.x().is_zero()));
        assert!(bool::from(p.y().is_zero()));
    }
}
