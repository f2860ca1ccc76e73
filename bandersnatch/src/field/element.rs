use core::fmt::{self, Debug, Display, Formatter, LowerHex, UpperHex};
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::limbs::{self, Limbs};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Element of the Bandersnatch base field, i.e. an integer modulo
/// `p = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001`.
///
/// The value is kept in Montgomery form in a relaxed range, so the same field
/// element can have two different limb encodings. Equality and every
/// observable output (bytes, [`sign`](Self::sign), formatting) only depend on
/// the field element, never on the encoding.
#[derive(Clone, Copy)]
pub struct FieldElement(pub(crate) Limbs);

impl Display for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:x}")
    }
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({self:x})")
    }
}

impl LowerHex for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let c = self.to_canonical_limbs();
        write!(f, "{:016x}{:016x}{:016x}{:016x}", c[3], c[2], c[1], c[0])
    }
}

impl UpperHex for FieldElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let c = self.to_canonical_limbs();
        write!(f, "{:016X}{:016X}{:016X}{:016X}", c[3], c[2], c[1], c[0])
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        let a = limbs::normalize(&self.0);
        let b = limbs::normalize(&other.0);
        a[..].ct_eq(&b[..])
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

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for FieldElement {}

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<u64> for FieldElement {
    fn from(n: u64) -> Self {
        Self::from_u64(n)
    }
}

impl FieldElement {
    /// Additive identity.
    pub const ZERO: Self = Self([0; 4]);
    /// Multiplicative identity.
    pub const ONE: Self = Self(limbs::R);
    /// `-1`.
    pub const MINUS_ONE: Self = Self::ONE.negate();
    /// `2`.
    pub const TWO: Self = Self::ONE.double();

    /// Second encoding of zero, the limbs of `p` itself.
    ///
    /// Negation subtracts from this encoding, which makes the borrow branch of
    /// subtraction rare. Nothing may normalize it in place.
    pub(crate) const ALTERNATIVE_ZERO: Self = Self(limbs::MODULUS);

    /// `(p - 1) / 2`.
    const HALF_MODULUS: Limbs = [
        0x7fffffff80000000,
        0xa9ded2017fff2dff,
        0x199cec0404d0ec02,
        0x39f6d3a994cebea4,
    ];

    /// `p - 2`.
    const MODULUS_MINUS_TWO: Limbs = [
        0xfffffffeffffffff,
        0x53bda402fffe5bfe,
        0x3339d80809a1d805,
        0x73eda753299d7d48,
    ];

    /// Two-adicity of `p - 1`.
    const S: u32 = 32;

    /// Odd part `t` of `p - 1 = 2^S * t`.
    const T: Limbs = [
        0xfffe5bfeffffffff,
        0x09a1d80553bda402,
        0x299d7d483339d808,
        0x0000000073eda753,
    ];

    /// `(t - 1) / 2`.
    const T_MINUS_ONE_OVER_TWO: Limbs = [
        0x7fff2dff7fffffff,
        0x04d0ec02a9ded201,
        0x94cebea4199cec04,
        0x0000000039f6d3a9,
    ];

    /// Quadratic non-residue used to derive the `2^S`-th root of unity.
    const MULTIPLICATIVE_GENERATOR: Self = Self::from_u64(7);

    /// Primitive `2^S`-th root of unity.
    const ROOT_OF_UNITY: Self = Self::MULTIPLICATIVE_GENERATOR.pow_vartime(&Self::T);

    /// Converts a small integer into a field element.
    pub const fn from_u64(n: u64) -> Self {
        Self(limbs::to_montgomery(&[n, 0, 0, 0]))
    }

    /// Converts a signed small integer into a field element.
    pub const fn from_i64(n: i64) -> Self {
        let abs = Self::from_u64(n.unsigned_abs());
        if n < 0 { abs.negate() } else { abs }
    }

    /// Parses a big-endian hex string of exactly 64 digits.
    ///
    /// Meant for constants; usable in `const` context.
    ///
    /// # Panics
    /// - if the string has the wrong length or contains a non-hex digit;
    /// - if the value is not below the modulus.
    pub const fn from_be_hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        assert!(bytes.len() == 64, "expected 64 hex digits");

        let mut words = [0u64; 4];
        let mut i = 0;
        while i < 64 {
            let c = bytes[i];
            let nibble = match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => panic!("invalid hex digit"),
            };
            let limb = 3 - i / 16;
            words[limb] = (words[limb] << 4) | nibble as u64;
            i += 1;
        }

        assert!(limbs::lt(&words, &limbs::MODULUS), "value exceeds modulus");
        Self(limbs::to_montgomery(&words))
    }

    /// Builds a field element from the little-endian limbs of an integer.
    ///
    /// Returns none if the integer is not below the modulus.
    pub fn from_canonical_limbs(words: [u64; 4]) -> CtOption<Self> {
        let is_canonical = limbs::lt(&words, &limbs::MODULUS);
        CtOption::new(Self(limbs::to_montgomery(&words)), Choice::from(is_canonical as u8))
    }

    /// Returns the little-endian limbs of the integer in `[0, p)` this element
    /// represents.
    pub const fn to_canonical_limbs(&self) -> [u64; 4] {
        limbs::from_montgomery(&self.0)
    }

    /// Decodes the little-endian bytes of an integer below the modulus.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        let mut words = [0u64; 4];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_le_bytes(buf);
        }
        Self::from_canonical_limbs(words)
    }

    /// Little-endian bytes of the canonical integer.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(self.to_canonical_limbs()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// Samples a uniformly random field element.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        loop {
            let mut words = [0u64; 4];
            for word in words.iter_mut() {
                *word = rng.next_u64();
            }
            // p has 255 bits, so rejection succeeds with probability above 0.9.
            words[3] &= u64::MAX >> 1;
            if limbs::lt(&words, &limbs::MODULUS) {
                return Self(limbs::to_montgomery(&words));
            }
        }
    }

    /// Returns the canonical encoding of this element.
    pub const fn normalize(&self) -> Self {
        Self(limbs::normalize(&self.0))
    }

    /// Determine if this `FieldElement` is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Determine if this `FieldElement` is one.
    pub fn is_one(&self) -> Choice {
        self.ct_eq(&Self::ONE)
    }

    /// Returns `self + rhs`.
    pub const fn add(&self, rhs: &Self) -> Self {
        Self(limbs::add(&self.0, &rhs.0))
    }

    /// Returns `self - rhs`.
    pub const fn sub(&self, rhs: &Self) -> Self {
        Self(limbs::sub(&self.0, &rhs.0))
    }

    /// Returns `self * rhs`.
    pub const fn multiply(&self, rhs: &Self) -> Self {
        Self(limbs::mul(&self.0, &rhs.0))
    }

    /// Returns `-self`.
    pub const fn negate(&self) -> Self {
        Self::sub(&Self::ALTERNATIVE_ZERO, self)
    }

    /// Returns `self^2`.
    pub const fn square(&self) -> Self {
        self.multiply(self)
    }

    /// Returns `self^(2^n)`.
    pub const fn square_n(&self, n: u32) -> Self {
        let mut x = *self;
        let mut i = 0;
        while i < n {
            x = x.square();
            i += 1;
        }
        x
    }

    /// Returns `2 * self`.
    pub const fn double(&self) -> Self {
        Self::add(self, self)
    }

    /// Returns `5 * self`, without a general multiplication.
    pub const fn multiply_by_five(&self) -> Self {
        Self(limbs::mul_by_five(&self.0))
    }

    /// Multiplies by the curve constant `a = -5`.
    pub const fn mul_by_a(&self) -> Self {
        self.multiply_by_five().negate()
    }

    /// Returns `self^exp`, where `exp` is a little-endian integer.
    ///
    /// **This operation is variable time with respect to the exponent.**
    /// If the exponent is fixed, this operation is effectively constant time.
    pub const fn pow_vartime(&self, exp: &[u64]) -> Self {
        let mut res = Self::ONE;
        let mut i = exp.len();

        while i > 0 {
            i -= 1;
            let mut j = 64;

            while j > 0 {
                j -= 1;
                res = res.square();

                if ((exp[i] >> j) & 1) == 1 {
                    res = res.multiply(self);
                }
            }
        }

        res
    }

    /// Returns the multiplicative inverse of `self`.
    ///
    /// # Panics
    /// If `self` is zero.
    pub fn invert(&self) -> Self {
        assert!(!bool::from(self.is_zero()), "inversion of zero");
        self.pow_vartime(&Self::MODULUS_MINUS_TWO)
    }

    /// Returns the multiplicative inverse of `self`, or none if `self` is zero.
    pub fn invert_checked(&self) -> CtOption<Self> {
        CtOption::new(self.pow_vartime(&Self::MODULUS_MINUS_TWO), !self.is_zero())
    }

    /// Returns `self / rhs`.
    ///
    /// # Panics
    /// If `rhs` is zero.
    pub fn divide(&self, rhs: &Self) -> Self {
        self.multiply(&rhs.invert())
    }

    /// Returns the Legendre symbol of `self`: `1` for a nonzero square, `-1`
    /// for a non-square and `0` for zero.
    ///
    /// As `p` is prime this coincides with the Jacobi symbol.
    pub fn jacobi(&self) -> i8 {
        let euler = self.pow_vartime(&Self::HALF_MODULUS);
        if bool::from(euler.is_one()) {
            1
        } else if bool::from(euler.is_zero()) {
            0
        } else {
            -1
        }
    }

    /// Returns a square root of `self`, or none if `self` is not a square.
    ///
    /// Which of the two roots is returned is unspecified.
    ///
    /// Tonelli-Shanks, from <https://eprint.iacr.org/2012/685.pdf> (page 12, algorithm 5).
    pub fn sqrt(&self) -> CtOption<Self> {
        let w = self.pow_vartime(&Self::T_MINUS_ONE_OVER_TWO);

        let mut v = Self::S;
        let mut x = *self * w;
        let mut b = x * w;
        let mut z = Self::ROOT_OF_UNITY;

        for max_v in (1..=Self::S).rev() {
            let mut k = 1;
            let mut tmp = b.square();
            let mut j_less_than_v = Choice::from(1);

            for j in 2..max_v {
                let tmp_is_one = tmp.ct_eq(&Self::ONE);
                let squared = Self::conditional_select(&tmp, &z, tmp_is_one).square();
                tmp = Self::conditional_select(&squared, &tmp, tmp_is_one);
                let new_z = Self::conditional_select(&z, &squared, tmp_is_one);
                j_less_than_v &= !j.ct_eq(&v);
                k = u32::conditional_select(&j, &k, tmp_is_one);
                z = Self::conditional_select(&z, &new_z, j_less_than_v);
            }

            let result = x * z;
            x = Self::conditional_select(&result, &x, b.ct_eq(&Self::ONE));
            z = z.square();
            b *= z;
            v = k;
        }

        CtOption::new(x, x.square().ct_eq(self))
    }

    /// Sign of the representative of `self` in `(-p/2, p/2)`: `1`, `-1`, or `0`
    /// for zero.
    ///
    /// This is taken on the canonical integer, not on the Montgomery form.
    pub fn sign(&self) -> i8 {
        let c = self.to_canonical_limbs();
        if c == [0; 4] {
            0
        } else if limbs::lt(&Self::HALF_MODULUS, &c) {
            -1
        } else {
            1
        }
    }

    /// Returns `true` if [`sign`](Self::sign) is `-1`.
    pub fn is_negative(&self) -> bool {
        self.sign() < 0
    }

    /// Returns `-self` if `self` is negative, `self` otherwise.
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.negate()
        } else {
            *self
        }
    }

    /// Compares `self` and `other` up to sign.
    ///
    /// Returns `(abs_equal, exactly_equal)`: whether `self == ±other`, and
    /// whether `self == other`.
    pub fn cmp_abs(&self, other: &Self) -> (bool, bool) {
        if self == other {
            return (true, true);
        }
        (*self == other.negate(), false)
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, other: &FieldElement) -> FieldElement {
        FieldElement::add(self, other)
    }
}

define_add_variants!(
    LHS = FieldElement,
    RHS = FieldElement,
    Output = FieldElement
);

impl AddAssign<&FieldElement> for FieldElement {
    fn add_assign(&mut self, other: &FieldElement) {
        *self = FieldElement::add(self, other);
    }
}

define_add_assign_variants!(LHS = FieldElement, RHS = FieldElement);

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn sub(self, other: &FieldElement) -> FieldElement {
        FieldElement::sub(self, other)
    }
}

define_sub_variants!(
    LHS = FieldElement,
    RHS = FieldElement,
    Output = FieldElement
);

impl SubAssign<&FieldElement> for FieldElement {
    fn sub_assign(&mut self, other: &FieldElement) {
        *self = FieldElement::sub(self, other);
    }
}

define_sub_assign_variants!(LHS = FieldElement, RHS = FieldElement);

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, other: &FieldElement) -> FieldElement {
        self.multiply(other)
    }
}

define_mul_variants!(
    LHS = FieldElement,
    RHS = FieldElement,
    Output = FieldElement
);

impl MulAssign<&FieldElement> for FieldElement {
    fn mul_assign(&mut self, other: &FieldElement) {
        *self = self.multiply(other);
    }
}

define_mul_assign_variants!(LHS = FieldElement, RHS = FieldElement);

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        self.negate()
    }
}

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        self.negate()
    }
}

impl Sum for FieldElement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Product for FieldElement {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}
