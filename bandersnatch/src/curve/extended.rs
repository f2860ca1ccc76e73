#![allow(non_snake_case)]

use core::borrow::Borrow;
use core::fmt::{self, Debug, Formatter};
use core::iter::Sum;
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::constants::{EDWARDS_A, EDWARDS_D, GENERATOR_X, GENERATOR_Y, SQRT_D_OVER_A};
use super::{
    AffinePoint, CurvePoint, EfghPoint, FullCurve, Subgroup, Variant, formulas, recover_y,
    subgroup_error,
};
use crate::field::FieldElement;
use crate::{Error, Result};
use rand_core::RngCore;

/// A point in extended twisted Edwards coordinates `(X : Y : T : Z)`, with
/// affine `x = X/Z`, `y = Y/Z` and `X·Y = T·Z`.
///
/// Full curve points include the two points at infinity, where `Z = 0`.
#[derive(Copy, Clone)]
pub struct ExtendedPoint<V: Variant> {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) T: FieldElement,
    pub(crate) Z: FieldElement,
    variant: PhantomData<V>,
}

impl<V: Variant> Debug for ExtendedPoint<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Extended{}Point {{ X: {}, Y: {}, T: {}, Z: {} }}",
            V::NAME,
            self.X,
            self.Y,
            self.T,
            self.Z
        )
    }
}

impl<V: Variant> Default for ExtendedPoint<V> {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl<V: Variant> PartialEq for ExtendedPoint<V> {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl<V: Variant> CurvePoint for ExtendedPoint<V> {
    type Variant = V;

    const NEUTRAL: Self = Self::NEUTRAL;
    const GENERATOR: Self = Self::GENERATOR;
    const NAP: Self = Self::NAP;

    fn to_extended(&self) -> ExtendedPoint<V> {
        *self
    }

    fn from_extended(point: &ExtendedPoint<V>) -> Self {
        *point
    }

    fn mul_vartime(&self, scalar: &[u64]) -> Self {
        ExtendedPoint::mul_vartime(self, scalar)
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        ExtendedPoint::random(rng)
    }
}

impl<V: Variant> ExtendedPoint<V> {
    /// The neutral element `N = (0, 1)`.
    pub const NEUTRAL: Self = Self::from_raw(
        FieldElement::ZERO,
        FieldElement::ONE,
        FieldElement::ZERO,
        FieldElement::ONE,
    );

    /// The standard generator of the prime order subgroup.
    pub const GENERATOR: Self = Self::from_raw(
        GENERATOR_X,
        GENERATOR_Y,
        GENERATOR_X.multiply(&GENERATOR_Y),
        FieldElement::ONE,
    );

    /// A NaP; also what an all-zero point is.
    pub const NAP: Self = Self::from_raw(
        FieldElement::ZERO,
        FieldElement::ZERO,
        FieldElement::ZERO,
        FieldElement::ZERO,
    );

    pub(crate) const fn from_raw(
        X: FieldElement,
        Y: FieldElement,
        T: FieldElement,
        Z: FieldElement,
    ) -> Self {
        Self {
            X,
            Y,
            T,
            Z,
            variant: PhantomData,
        }
    }

    /// Reinterprets the coordinates as another variant.
    pub(crate) const fn cast<W: Variant>(&self) -> ExtendedPoint<W> {
        ExtendedPoint::from_raw(self.X, self.Y, self.T, self.Z)
    }

    // ------------------------------------------------------------------------
    // Group law
    // ------------------------------------------------------------------------

    /// Returns `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        formulas::add(self, other).to_extended()
    }

    /// Returns `self + other` for an affine `other`, saving a multiplication.
    pub fn add_affine(&self, other: &AffinePoint<V>) -> Self {
        formulas::add_mixed(self, other).to_extended()
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        Self::add(self, &Self::neg(other))
    }

    /// Returns `self - other` for an affine `other`.
    pub fn sub_affine(&self, other: &AffinePoint<V>) -> Self {
        Self::add_affine(self, &AffinePoint::neg(other))
    }

    /// Returns `2 * self`.
    pub fn double(&self) -> Self {
        formulas::double(self).to_extended()
    }

    /// Returns `-self`.
    pub const fn neg(&self) -> Self {
        Self::from_raw(self.X.negate(), self.Y, self.T.negate(), self.Z)
    }

    /// Applies the degree 2 endomorphism, which acts as multiplication by
    /// [`ENDO_EIGENVALUE`](crate::ENDO_EIGENVALUE) on the prime order
    /// subgroup.
    ///
    /// `N` and `A` map to `N`. On the full curve, the points at infinity are
    /// exceptional and map to a NaP; see
    /// [`endo_full_curve`](ExtendedPoint::endo_full_curve).
    pub fn endo(&self) -> Self {
        formulas::endo(self).to_extended()
    }

    /// Replaces `self` by `2 * self`.
    pub fn double_in_place(&mut self) {
        *self = Self::double(self);
    }

    /// Replaces `self` by `-self`.
    pub fn neg_in_place(&mut self) {
        *self = Self::neg(self);
    }

    /// Replaces `self` by its image under the endomorphism.
    pub fn endo_in_place(&mut self) {
        *self = Self::endo(self);
    }

    /// Multiplies by the little-endian integer `scalar`, in variable time.
    ///
    /// A NaP stays a NaP, even for a zero scalar.
    pub fn mul_vartime(&self, scalar: &[u64]) -> Self {
        if self.nap_pattern() {
            return Self::NAP;
        }
        let mut acc = Self::NEUTRAL;
        for limb in scalar.iter().rev() {
            for i in (0..64).rev() {
                acc = acc.double();
                if (limb >> i) & 1 == 1 {
                    acc = Self::add(&acc, self);
                }
            }
        }
        acc
    }

    /// Samples a random point; see [`CurvePoint::random`].
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        loop {
            let x = FieldElement::random(rng);
            let Some(y) = recover_y(x) else {
                continue;
            };
            let y = if rng.next_u32() & 1 == 1 { -y } else { y };
            let point = Self::from_raw(x, y, x * y, FieldElement::ONE);
            return if V::FULL_CURVE { point } else { point.double() };
        }
    }

    // ------------------------------------------------------------------------
    // Conversions
    // ------------------------------------------------------------------------

    /// Converts to affine coordinates; a point at infinity becomes a NaP.
    pub fn to_affine(&self) -> AffinePoint<V> {
        AffinePoint::from_extended(self)
    }

    /// Converts to efgh coordinates.
    pub fn to_efgh(&self) -> EfghPoint<V> {
        EfghPoint::from_extended(self)
    }

    // ------------------------------------------------------------------------
    // Raw checks, without NaP handling
    // ------------------------------------------------------------------------

    pub(crate) fn nap_pattern(&self) -> bool {
        bool::from(self.X.is_zero() & self.Y.is_zero())
    }

    pub(crate) fn infinite(&self) -> bool {
        !self.nap_pattern() && bool::from(self.Z.is_zero())
    }

    pub(crate) fn neutral(&self) -> bool {
        bool::from(self.X.is_zero()) && (!V::FULL_CURVE || self.Y == self.Z)
    }

    /// `a·X² + Y² = Z² + d·T²` and `X·Y = T·Z`.
    pub(crate) fn on_curve(&self) -> bool {
        let XX = self.X.square();
        let YY = self.Y.square();
        let ZZ = self.Z.square();
        let TT = self.T.square();
        EDWARDS_A * XX + YY == ZZ + EDWARDS_D * TT && self.X * self.Y == self.T * self.Z
    }

    pub(crate) fn eq_exact(&self, other: &Self) -> bool {
        self.X * other.Z == other.X * self.Z
            && self.Y * other.Z == other.Y * self.Z
            && self.X * other.T == other.X * self.T
    }

    pub(crate) fn eq_mod_a(&self, other: &Self) -> bool {
        self.X * other.Y == other.X * self.Y
    }

    /// Whether the point lies in the prime order subgroup or its coset by `A`:
    /// `Z² - a·X²` is a nonzero square.
    pub(crate) fn in_good_subgroup(&self) -> bool {
        (self.Z.square() - self.X.square().mul_by_a()).jacobi() == 1
    }

    /// Exact membership of the stored coordinates in the prime order
    /// subgroup: good subgroup, and either neutral or
    /// `(Z - Y)·(Z - √(d/a)·Y)` is a non-square.
    pub(crate) fn in_prime_subgroup(&self) -> bool {
        self.in_good_subgroup() && self.in_prime_coset()
    }

    /// For a point of the good subgroup, whether it is the element of the
    /// prime order subgroup rather than its shift by `A`.
    fn in_prime_coset(&self) -> bool {
        self.Y == self.Z || ((self.Z - self.Y) * (self.Z - SQRT_D_OVER_A * self.Y)).jacobi() == -1
    }

    /// Adds `A` if needed so the coordinates are those of the prime order
    /// subgroup element, whatever the variant. Expects the good subgroup.
    pub(crate) fn prime_representative(&self) -> Self {
        if self.nap_pattern() || self.in_prime_coset() {
            *self
        } else {
            Self::from_raw(self.X.negate(), self.Y.negate(), self.T, self.Z)
        }
    }

    /// The coordinates the point reports: itself for the full curve, the
    /// prime order subgroup element for subgroup types.
    pub(crate) fn representative(&self) -> Self {
        if V::FULL_CURVE {
            *self
        } else {
            self.prime_representative()
        }
    }
}

impl ExtendedPoint<FullCurve> {
    /// The affine two-torsion point `A = (0, -1)`.
    pub const A: Self = Self::from_raw(
        FieldElement::ZERO,
        FieldElement::MINUS_ONE,
        FieldElement::ZERO,
        FieldElement::ONE,
    );

    /// The point at infinity `E1 = (√(d/a) : 0 : 1 : 0)`.
    pub const E1: Self = Self::from_raw(
        SQRT_D_OVER_A,
        FieldElement::ZERO,
        FieldElement::ONE,
        FieldElement::ZERO,
    );

    /// The point at infinity `E2 = (-√(d/a) : 0 : 1 : 0)`.
    pub const E2: Self = Self::from_raw(
        SQRT_D_OVER_A.negate(),
        FieldElement::ZERO,
        FieldElement::ONE,
        FieldElement::ZERO,
    );

    /// As [`endo`](ExtendedPoint::endo), but maps the points at infinity to
    /// `A`.
    pub fn endo_full_curve(&self) -> Self {
        formulas::endo_full_curve(self).to_extended()
    }

    /// Converts to the subgroup type, failing with [`Error::NotInSubgroup`]
    /// unless the point is in the prime order subgroup.
    pub fn try_into_subgroup(&self) -> Result<ExtendedPoint<Subgroup>> {
        if !self.nap_pattern() && self.in_prime_subgroup() {
            Ok(self.cast())
        } else {
            Err(subgroup_error(self))
        }
    }

    /// Maps the point into the prime order subgroup by doubling it.
    pub fn clear_cofactor(&self) -> ExtendedPoint<Subgroup> {
        self.double().cast()
    }
}

impl ExtendedPoint<Subgroup> {
    /// Converts to the full curve type, picking the element of the prime
    /// order subgroup.
    pub fn to_full_curve(&self) -> ExtendedPoint<FullCurve> {
        self.prime_representative().cast()
    }
}

impl From<ExtendedPoint<Subgroup>> for ExtendedPoint<FullCurve> {
    fn from(point: ExtendedPoint<Subgroup>) -> Self {
        point.to_full_curve()
    }
}

impl TryFrom<ExtendedPoint<FullCurve>> for ExtendedPoint<Subgroup> {
    type Error = Error;

    fn try_from(point: ExtendedPoint<FullCurve>) -> Result<Self> {
        point.try_into_subgroup()
    }
}

// ------------------------------------------------------------------------
// Addition and Subtraction
// ------------------------------------------------------------------------

impl<V: Variant> Add<&ExtendedPoint<V>> for &ExtendedPoint<V> {
    type Output = ExtendedPoint<V>;

    fn add(self, other: &ExtendedPoint<V>) -> ExtendedPoint<V> {
        ExtendedPoint::add(self, other)
    }
}

define_add_variants!(
    <V>,
    LHS = ExtendedPoint<V>,
    RHS = ExtendedPoint<V>,
    Output = ExtendedPoint<V>
);

impl<V: Variant> Add<&AffinePoint<V>> for &ExtendedPoint<V> {
    type Output = ExtendedPoint<V>;

    fn add(self, other: &AffinePoint<V>) -> ExtendedPoint<V> {
        self.add_affine(other)
    }
}

define_add_variants!(
    <V>,
    LHS = ExtendedPoint<V>,
    RHS = AffinePoint<V>,
    Output = ExtendedPoint<V>
);

impl<V: Variant> Add<&ExtendedPoint<V>> for &AffinePoint<V> {
    type Output = ExtendedPoint<V>;

    fn add(self, other: &ExtendedPoint<V>) -> ExtendedPoint<V> {
        other.add_affine(self)
    }
}

define_add_variants!(
    <V>,
    LHS = AffinePoint<V>,
    RHS = ExtendedPoint<V>,
    Output = ExtendedPoint<V>
);

impl<V: Variant> AddAssign<&ExtendedPoint<V>> for ExtendedPoint<V> {
    fn add_assign(&mut self, rhs: &ExtendedPoint<V>) {
        *self = ExtendedPoint::add(self, rhs);
    }
}

define_add_assign_variants!(<V>, LHS = ExtendedPoint<V>, RHS = ExtendedPoint<V>);

impl<V: Variant> AddAssign<&AffinePoint<V>> for ExtendedPoint<V> {
    fn add_assign(&mut self, rhs: &AffinePoint<V>) {
        *self = self.add_affine(rhs);
    }
}

define_add_assign_variants!(<V>, LHS = ExtendedPoint<V>, RHS = AffinePoint<V>);

impl<V: Variant> Sub<&ExtendedPoint<V>> for &ExtendedPoint<V> {
    type Output = ExtendedPoint<V>;

    fn sub(self, other: &ExtendedPoint<V>) -> ExtendedPoint<V> {
        ExtendedPoint::sub(self, other)
    }
}

define_sub_variants!(
    <V>,
    LHS = ExtendedPoint<V>,
    RHS = ExtendedPoint<V>,
    Output = ExtendedPoint<V>
);

impl<V: Variant> Sub<&AffinePoint<V>> for &ExtendedPoint<V> {
    type Output = ExtendedPoint<V>;

    fn sub(self, other: &AffinePoint<V>) -> ExtendedPoint<V> {
        self.sub_affine(other)
    }
}

define_sub_variants!(
    <V>,
    LHS = ExtendedPoint<V>,
    RHS = AffinePoint<V>,
    Output = ExtendedPoint<V>
);

impl<V: Variant> Sub<&ExtendedPoint<V>> for &AffinePoint<V> {
    type Output = ExtendedPoint<V>;

    fn sub(self, other: &ExtendedPoint<V>) -> ExtendedPoint<V> {
        ExtendedPoint::neg(other).add_affine(self)
    }
}

define_sub_variants!(
    <V>,
    LHS = AffinePoint<V>,
    RHS = ExtendedPoint<V>,
    Output = ExtendedPoint<V>
);

impl<V: Variant> SubAssign<&ExtendedPoint<V>> for ExtendedPoint<V> {
    fn sub_assign(&mut self, rhs: &ExtendedPoint<V>) {
        *self = ExtendedPoint::sub(self, rhs);
    }
}

define_sub_assign_variants!(<V>, LHS = ExtendedPoint<V>, RHS = ExtendedPoint<V>);

impl<V: Variant> SubAssign<&AffinePoint<V>> for ExtendedPoint<V> {
    fn sub_assign(&mut self, rhs: &AffinePoint<V>) {
        *self = self.sub_affine(rhs);
    }
}

define_sub_assign_variants!(<V>, LHS = ExtendedPoint<V>, RHS = AffinePoint<V>);

impl<V, T> Sum<T> for ExtendedPoint<V>
where
    V: Variant,
    T: Borrow<ExtendedPoint<V>>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::NEUTRAL, |acc, item| ExtendedPoint::add(&acc, item.borrow()))
    }
}

// ------------------------------------------------------------------------
// Negation
// ------------------------------------------------------------------------

impl<V: Variant> Neg for &ExtendedPoint<V> {
    type Output = ExtendedPoint<V>;

    fn neg(self) -> ExtendedPoint<V> {
        ExtendedPoint::neg(self)
    }
}

define_neg_variants!(<V>, Type = ExtendedPoint<V>);
