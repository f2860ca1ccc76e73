use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::constants::{GENERATOR_X, GENERATOR_Y};
use super::{CurvePoint, EfghPoint, ExtendedPoint, FullCurve, Subgroup, Variant, formulas};
use crate::field::FieldElement;
use crate::{Error, Result};

/// A point in affine extended twisted Edwards coordinates `(x, y, t = x·y)`.
///
/// Cannot hold a point at infinity; operations whose result is at infinity
/// produce a NaP.
#[derive(Copy, Clone)]
pub struct AffinePoint<V: Variant> {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) t: FieldElement,
    variant: PhantomData<V>,
}

impl<V: Variant> Debug for AffinePoint<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Affine{}Point {{ x: {}, y: {}, t: {} }}",
            V::NAME,
            self.x,
            self.y,
            self.t
        )
    }
}

impl<V: Variant> Default for AffinePoint<V> {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl<V: Variant> PartialEq for AffinePoint<V> {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl<V: Variant> CurvePoint for AffinePoint<V> {
    type Variant = V;

    const NEUTRAL: Self = Self::NEUTRAL;
    const GENERATOR: Self = Self::GENERATOR;
    const NAP: Self = Self::NAP;

    fn to_extended(&self) -> ExtendedPoint<V> {
        AffinePoint::to_extended(self)
    }

    fn from_extended(point: &ExtendedPoint<V>) -> Self {
        AffinePoint::from_extended(point)
    }

    fn affine_coordinates(&self) -> (FieldElement, FieldElement) {
        if V::FULL_CURVE && !self.nap_pattern() {
            (self.x, self.y)
        } else {
            self.to_extended().affine_coordinates()
        }
    }
}

impl<V: Variant> AffinePoint<V> {
    /// The neutral element `N = (0, 1)`.
    pub const NEUTRAL: Self = Self::from_raw(FieldElement::ZERO, FieldElement::ONE);

    /// The standard generator of the prime order subgroup.
    pub const GENERATOR: Self = Self::from_raw(GENERATOR_X, GENERATOR_Y);

    /// A NaP.
    pub const NAP: Self = Self::from_raw(FieldElement::ZERO, FieldElement::ZERO);

    pub(crate) const fn from_raw(x: FieldElement, y: FieldElement) -> Self {
        Self {
            x,
            y,
            t: x.multiply(&y),
            variant: PhantomData,
        }
    }

    pub(crate) fn nap_pattern(&self) -> bool {
        bool::from(self.x.is_zero() & self.y.is_zero())
    }

    /// Converts to extended coordinates with `Z = 1`.
    pub const fn to_extended(&self) -> ExtendedPoint<V> {
        ExtendedPoint::from_raw(self.x, self.y, self.t, FieldElement::ONE)
    }

    /// Converts to efgh coordinates.
    pub fn to_efgh(&self) -> EfghPoint<V> {
        EfghPoint::from_extended(&self.to_extended())
    }

    /// Normalizes extended coordinates. A point at infinity becomes a NaP.
    pub fn from_extended(point: &ExtendedPoint<V>) -> Self {
        if point.nap_pattern() || bool::from(point.Z.is_zero()) {
            return Self::NAP;
        }
        if bool::from(point.Z.is_one()) {
            return Self {
                x: point.X,
                y: point.Y,
                t: point.T,
                variant: PhantomData,
            };
        }
        let z_inv = point.Z.invert();
        Self::from_raw(point.X * z_inv, point.Y * z_inv)
    }

    // ------------------------------------------------------------------------
    // Group law
    // ------------------------------------------------------------------------

    /// Returns `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        Self::from_efgh(&formulas::add_mixed(&self.to_extended(), other))
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        Self::add(self, &Self::neg(other))
    }

    /// Returns `2 * self`.
    pub fn double(&self) -> Self {
        Self::from_efgh(&formulas::double(&self.to_extended()))
    }

    /// Returns `-self`.
    pub const fn neg(&self) -> Self {
        Self {
            x: self.x.negate(),
            y: self.y,
            t: self.t.negate(),
            variant: PhantomData,
        }
    }

    /// Applies the endomorphism; see [`ExtendedPoint::endo`].
    pub fn endo(&self) -> Self {
        Self::from_efgh(&formulas::endo(&self.to_extended()))
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

    fn from_efgh(point: &EfghPoint<V>) -> Self {
        Self::from_extended(&point.to_extended())
    }
}

impl AffinePoint<FullCurve> {
    /// The affine two-torsion point `A = (0, -1)`.
    pub const A: Self = Self::from_raw(FieldElement::ZERO, FieldElement::MINUS_ONE);

    /// Converts to the subgroup type, failing with [`Error::NotInSubgroup`]
    /// unless the point is in the prime order subgroup.
    pub fn try_into_subgroup(&self) -> Result<AffinePoint<Subgroup>> {
        let point = self.to_extended().try_into_subgroup()?;
        Ok(AffinePoint::from_extended(&point))
    }

    /// Maps the point into the prime order subgroup by doubling it.
    pub fn clear_cofactor(&self) -> AffinePoint<Subgroup> {
        AffinePoint::from_extended(&self.to_extended().clear_cofactor())
    }
}

impl AffinePoint<Subgroup> {
    /// Converts to the full curve type, picking the element of the prime
    /// order subgroup.
    pub fn to_full_curve(&self) -> AffinePoint<FullCurve> {
        AffinePoint::from_extended(&self.to_extended().to_full_curve())
    }
}

impl From<AffinePoint<Subgroup>> for AffinePoint<FullCurve> {
    fn from(point: AffinePoint<Subgroup>) -> Self {
        point.to_full_curve()
    }
}

impl TryFrom<AffinePoint<FullCurve>> for AffinePoint<Subgroup> {
    type Error = Error;

    fn try_from(point: AffinePoint<FullCurve>) -> Result<Self> {
        point.try_into_subgroup()
    }
}

impl<V: Variant> From<AffinePoint<V>> for ExtendedPoint<V> {
    fn from(point: AffinePoint<V>) -> Self {
        point.to_extended()
    }
}

impl<V: Variant> From<&AffinePoint<V>> for ExtendedPoint<V> {
    fn from(point: &AffinePoint<V>) -> Self {
        point.to_extended()
    }
}

impl<V: Variant> From<ExtendedPoint<V>> for AffinePoint<V> {
    fn from(point: ExtendedPoint<V>) -> Self {
        AffinePoint::from_extended(&point)
    }
}

impl<V: Variant> From<&ExtendedPoint<V>> for AffinePoint<V> {
    fn from(point: &ExtendedPoint<V>) -> Self {
        AffinePoint::from_extended(point)
    }
}

// ------------------------------------------------------------------------
// Addition and Subtraction
// ------------------------------------------------------------------------

impl<V: Variant> Add<&AffinePoint<V>> for &AffinePoint<V> {
    type Output = AffinePoint<V>;

    fn add(self, other: &AffinePoint<V>) -> AffinePoint<V> {
        AffinePoint::add(self, other)
    }
}

define_add_variants!(
    <V>,
    LHS = AffinePoint<V>,
    RHS = AffinePoint<V>,
    Output = AffinePoint<V>
);

impl<V: Variant> AddAssign<&AffinePoint<V>> for AffinePoint<V> {
    fn add_assign(&mut self, rhs: &AffinePoint<V>) {
        *self = AffinePoint::add(self, rhs);
    }
}

define_add_assign_variants!(<V>, LHS = AffinePoint<V>, RHS = AffinePoint<V>);

impl<V: Variant> Sub<&AffinePoint<V>> for &AffinePoint<V> {
    type Output = AffinePoint<V>;

    fn sub(self, other: &AffinePoint<V>) -> AffinePoint<V> {
        AffinePoint::sub(self, other)
    }
}

define_sub_variants!(
    <V>,
    LHS = AffinePoint<V>,
    RHS = AffinePoint<V>,
    Output = AffinePoint<V>
);

impl<V: Variant> SubAssign<&AffinePoint<V>> for AffinePoint<V> {
    fn sub_assign(&mut self, rhs: &AffinePoint<V>) {
        *self = AffinePoint::sub(self, rhs);
    }
}

define_sub_assign_variants!(<V>, LHS = AffinePoint<V>, RHS = AffinePoint<V>);

impl<V: Variant> Neg for &AffinePoint<V> {
    type Output = AffinePoint<V>;

    fn neg(self) -> AffinePoint<V> {
        AffinePoint::neg(self)
    }
}

define_neg_variants!(<V>, Type = AffinePoint<V>);
