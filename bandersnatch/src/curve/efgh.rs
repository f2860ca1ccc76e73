use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::constants::{GENERATOR_X, GENERATOR_Y, SQRT_D_OVER_A};
use super::{AffinePoint, CurvePoint, ExtendedPoint, FullCurve, Subgroup, Variant, formulas};
use crate::field::FieldElement;
use crate::{Error, Result};

/// A point as the quadruple `(e, f, g, h)` standing for the extended point
/// `(e·f : g·h : e·h : f·g)`.
///
/// This is the shape the group law formulas produce, so chains of additions
/// that end in a normalization are cheapest in this representation.
#[derive(Copy, Clone)]
pub struct EfghPoint<V: Variant> {
    pub(crate) e: FieldElement,
    pub(crate) f: FieldElement,
    pub(crate) g: FieldElement,
    pub(crate) h: FieldElement,
    variant: PhantomData<V>,
}

impl<V: Variant> Debug for EfghPoint<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Efgh{}Point {{ e: {}, f: {}, g: {}, h: {} }}",
            V::NAME,
            self.e,
            self.f,
            self.g,
            self.h
        )
    }
}

impl<V: Variant> Default for EfghPoint<V> {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl<V: Variant> PartialEq for EfghPoint<V> {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl<V: Variant> CurvePoint for EfghPoint<V> {
    type Variant = V;

    const NEUTRAL: Self = Self::NEUTRAL;
    const GENERATOR: Self = Self::GENERATOR;
    const NAP: Self = Self::NAP;

    fn to_extended(&self) -> ExtendedPoint<V> {
        EfghPoint::to_extended(self)
    }

    fn from_extended(point: &ExtendedPoint<V>) -> Self {
        EfghPoint::from_extended(point)
    }
}

impl<V: Variant> EfghPoint<V> {
    /// The neutral element `N = (0, 1)`.
    pub const NEUTRAL: Self = Self::from_raw(
        FieldElement::ZERO,
        FieldElement::ONE,
        FieldElement::ONE,
        FieldElement::ONE,
    );

    /// The standard generator of the prime order subgroup.
    pub const GENERATOR: Self = Self::from_raw(
        GENERATOR_X,
        FieldElement::ONE,
        FieldElement::ONE,
        GENERATOR_Y,
    );

    /// A NaP.
    pub const NAP: Self = Self::from_raw(
        FieldElement::ZERO,
        FieldElement::ZERO,
        FieldElement::ZERO,
        FieldElement::ZERO,
    );

    pub(crate) const fn from_raw(
        e: FieldElement,
        f: FieldElement,
        g: FieldElement,
        h: FieldElement,
    ) -> Self {
        Self {
            e,
            f,
            g,
            h,
            variant: PhantomData,
        }
    }

    /// `e·f = 0` and `g·h = 0`, i.e. `X = Y = 0`.
    pub(crate) fn nap_pattern(&self) -> bool {
        bool::from((self.e.is_zero() | self.f.is_zero()) & (self.g.is_zero() | self.h.is_zero()))
    }

    /// Converts to extended coordinates, at the cost of four multiplications.
    pub fn to_extended(&self) -> ExtendedPoint<V> {
        ExtendedPoint::from_raw(
            self.e * self.f,
            self.g * self.h,
            self.e * self.h,
            self.f * self.g,
        )
    }

    /// Converts to affine coordinates; a point at infinity becomes a NaP.
    pub fn to_affine(&self) -> AffinePoint<V> {
        AffinePoint::from_extended(&self.to_extended())
    }

    /// Splits extended coordinates: `(X, Z, Z, Y)` for finite points and
    /// `(X, X, Z, T)` at infinity.
    pub fn from_extended(point: &ExtendedPoint<V>) -> Self {
        if bool::from(point.Z.is_zero()) {
            Self::from_raw(point.X, point.X, point.Z, point.T)
        } else {
            Self::from_raw(point.X, point.Z, point.Z, point.Y)
        }
    }

    // ------------------------------------------------------------------------
    // Group law
    // ------------------------------------------------------------------------

    /// Returns `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        formulas::add(&self.to_extended(), &other.to_extended())
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        Self::add(self, &Self::neg(other))
    }

    /// Returns `2 * self`.
    pub fn double(&self) -> Self {
        formulas::double(&self.to_extended())
    }

    /// Returns `-self`.
    pub const fn neg(&self) -> Self {
        Self::from_raw(self.e.negate(), self.f, self.g, self.h)
    }

    /// Applies the endomorphism; see [`ExtendedPoint::endo`].
    pub fn endo(&self) -> Self {
        formulas::endo(&self.to_extended())
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
}

impl EfghPoint<FullCurve> {
    /// The affine two-torsion point `A = (0, -1)`.
    pub const A: Self = Self::from_raw(
        FieldElement::ZERO,
        FieldElement::ONE,
        FieldElement::ONE,
        FieldElement::MINUS_ONE,
    );

    /// The point at infinity `E1`.
    pub const E1: Self = Self::from_raw(
        SQRT_D_OVER_A,
        SQRT_D_OVER_A,
        FieldElement::ZERO,
        FieldElement::ONE,
    );

    /// The point at infinity `E2`.
    pub const E2: Self = Self::from_raw(
        SQRT_D_OVER_A.negate(),
        SQRT_D_OVER_A.negate(),
        FieldElement::ZERO,
        FieldElement::ONE,
    );

    /// As [`endo`](EfghPoint::endo), but maps the points at infinity to `A`.
    pub fn endo_full_curve(&self) -> Self {
        formulas::endo_full_curve(&self.to_extended())
    }

    /// Converts to the subgroup type, failing with [`Error::NotInSubgroup`]
    /// unless the point is in the prime order subgroup.
    pub fn try_into_subgroup(&self) -> Result<EfghPoint<Subgroup>> {
        let point = self.to_extended().try_into_subgroup()?;
        Ok(EfghPoint::from_extended(&point))
    }

    /// Maps the point into the prime order subgroup by doubling it.
    pub fn clear_cofactor(&self) -> EfghPoint<Subgroup> {
        let EfghPoint { e, f, g, h, .. } = formulas::double(&self.to_extended());
        EfghPoint::from_raw(e, f, g, h)
    }
}

impl EfghPoint<Subgroup> {
    /// Converts to the full curve type, picking the element of the prime
    /// order subgroup.
    pub fn to_full_curve(&self) -> EfghPoint<FullCurve> {
        EfghPoint::from_extended(&self.to_extended().to_full_curve())
    }
}

impl From<EfghPoint<Subgroup>> for EfghPoint<FullCurve> {
    fn from(point: EfghPoint<Subgroup>) -> Self {
        point.to_full_curve()
    }
}

impl TryFrom<EfghPoint<FullCurve>> for EfghPoint<Subgroup> {
    type Error = Error;

    fn try_from(point: EfghPoint<FullCurve>) -> Result<Self> {
        point.try_into_subgroup()
    }
}

impl<V: Variant> From<EfghPoint<V>> for ExtendedPoint<V> {
    fn from(point: EfghPoint<V>) -> Self {
        point.to_extended()
    }
}

impl<V: Variant> From<ExtendedPoint<V>> for EfghPoint<V> {
    fn from(point: ExtendedPoint<V>) -> Self {
        EfghPoint::from_extended(&point)
    }
}

impl<V: Variant> From<EfghPoint<V>> for AffinePoint<V> {
    fn from(point: EfghPoint<V>) -> Self {
        point.to_affine()
    }
}

impl<V: Variant> From<AffinePoint<V>> for EfghPoint<V> {
    fn from(point: AffinePoint<V>) -> Self {
        point.to_efgh()
    }
}

// ------------------------------------------------------------------------
// Addition and Subtraction
// ------------------------------------------------------------------------

impl<V: Variant> Add<&EfghPoint<V>> for &EfghPoint<V> {
    type Output = EfghPoint<V>;

    fn add(self, other: &EfghPoint<V>) -> EfghPoint<V> {
        EfghPoint::add(self, other)
    }
}

define_add_variants!(
    <V>,
    LHS = EfghPoint<V>,
    RHS = EfghPoint<V>,
    Output = EfghPoint<V>
);

impl<V: Variant> AddAssign<&EfghPoint<V>> for EfghPoint<V> {
    fn add_assign(&mut self, rhs: &EfghPoint<V>) {
        *self = EfghPoint::add(self, rhs);
    }
}

define_add_assign_variants!(<V>, LHS = EfghPoint<V>, RHS = EfghPoint<V>);

impl<V: Variant> Sub<&EfghPoint<V>> for &EfghPoint<V> {
    type Output = EfghPoint<V>;

    fn sub(self, other: &EfghPoint<V>) -> EfghPoint<V> {
        EfghPoint::sub(self, other)
    }
}

define_sub_variants!(
    <V>,
    LHS = EfghPoint<V>,
    RHS = EfghPoint<V>,
    Output = EfghPoint<V>
);

impl<V: Variant> SubAssign<&EfghPoint<V>> for EfghPoint<V> {
    fn sub_assign(&mut self, rhs: &EfghPoint<V>) {
        *self = EfghPoint::sub(self, rhs);
    }
}

define_sub_assign_variants!(<V>, LHS = EfghPoint<V>, RHS = EfghPoint<V>);

impl<V: Variant> Neg for &EfghPoint<V> {
    type Output = EfghPoint<V>;

    fn neg(self) -> EfghPoint<V> {
        EfghPoint::neg(self)
    }
}

define_neg_variants!(<V>, Type = EfghPoint<V>);
