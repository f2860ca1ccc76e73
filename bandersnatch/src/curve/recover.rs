//! Building points from coordinates, with validation.

use super::constants::{EDWARDS_A, EDWARDS_D};
use super::{AffinePoint, Variant, subgroup_error};
use crate::field::FieldElement;
use crate::{Error, Result};

/// How much checking to do on coordinates that come from outside.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum TrustLevel {
    /// The input is known to describe a valid point; subgroup membership is
    /// not checked. The curve equation still is.
    Trusted,

    /// The input may be adversarial and is fully validated.
    #[default]
    Untrusted,
}

/// Returns the non-negative `y` with `(x, y)` on the curve, if any:
/// `y² = (1 - a·x²) / (1 - d·x²)`.
pub fn recover_y(x: FieldElement) -> Option<FieldElement> {
    let xx = x.square();
    let denominator: Option<FieldElement> =
        (FieldElement::ONE - EDWARDS_D * xx).invert_checked().into();
    let yy = (FieldElement::ONE - EDWARDS_A * xx) * denominator?;
    Option::<FieldElement>::from(yy.sqrt()).map(|y| y.abs())
}

/// Returns the non-negative `x` with `(x, y)` on the curve, if any:
/// `x² = (1 - y²) / (a - d·y²)`.
pub fn recover_x(y: FieldElement) -> Option<FieldElement> {
    let yy = y.square();
    let denominator: Option<FieldElement> =
        (EDWARDS_A - EDWARDS_D * yy).invert_checked().into();
    let xx = (FieldElement::ONE - yy) * denominator?;
    Option::<FieldElement>::from(xx.sqrt()).map(|x| x.abs())
}

impl<V: Variant> AffinePoint<V> {
    /// Builds a point from affine coordinates.
    ///
    /// The curve equation is always checked. With [`TrustLevel::Untrusted`],
    /// subgroup types also require the coordinates to be those of an element
    /// of the prime order subgroup, so the point reports back exactly what it
    /// was built from.
    pub fn from_affine(x: FieldElement, y: FieldElement, trust: TrustLevel) -> Result<Self> {
        let point = Self::from_raw(x, y);
        if !point.to_extended().on_curve() {
            return Err(Error::NotOnCurve);
        }
        point.check_subgroup(trust)?;
        Ok(point)
    }

    /// Builds a point from affine coordinates without any check.
    pub const fn from_affine_unchecked(x: FieldElement, y: FieldElement) -> Self {
        Self::from_raw(x, y)
    }

    /// Recovers a point from `x` and the sign of `y`.
    ///
    /// # Errors
    /// - [`Error::NotOnCurve`] if no point has this `x`;
    /// - [`Error::UnexpectedNegativeZero`] if `y = 0` was requested negative,
    ///   which cannot happen on this curve but is rejected for symmetry;
    /// - [`Error::NotInSubgroup`] for untrusted input to a subgroup type
    ///   outside the prime order subgroup.
    pub fn from_x_and_sign_y(x: FieldElement, y_negative: bool, trust: TrustLevel) -> Result<Self> {
        let y = recover_y(x).ok_or(Error::NotOnCurve)?;
        if y_negative && bool::from(y.is_zero()) {
            return Err(Error::UnexpectedNegativeZero);
        }
        let point = Self::from_raw(x, if y_negative { -y } else { y });
        point.check_subgroup(trust)?;
        Ok(point)
    }

    /// Recovers a point from `y` and the sign of `x`.
    ///
    /// # Errors
    /// - [`Error::NotOnCurve`] if no point has this `y`;
    /// - [`Error::UnexpectedNegativeZero`] if `x = 0` was requested negative;
    /// - [`Error::NotInSubgroup`] for untrusted input to a subgroup type
    ///   outside the prime order subgroup.
    pub fn from_y_and_sign_x(y: FieldElement, x_negative: bool, trust: TrustLevel) -> Result<Self> {
        let x = recover_x(y).ok_or(Error::NotOnCurve)?;
        if x_negative && bool::from(x.is_zero()) {
            return Err(Error::UnexpectedNegativeZero);
        }
        let point = Self::from_raw(if x_negative { -x } else { x }, y);
        point.check_subgroup(trust)?;
        Ok(point)
    }

    /// Recovers the prime order subgroup element with `x·sign(y)` equal to
    /// `x_times_sign_y`.
    ///
    /// Both `(x, |y|)` and `(-x, -|y|)` have this value and differ by `A`;
    /// the one in the prime order subgroup is returned, also for full curve
    /// types.
    ///
    /// # Errors
    /// - [`Error::NotOnCurve`] if no point has this `x`;
    /// - [`Error::NotInSubgroup`] for untrusted input outside the good
    ///   subgroup.
    pub fn from_decaf_x(x_times_sign_y: FieldElement, trust: TrustLevel) -> Result<Self> {
        let y = recover_y(x_times_sign_y).ok_or(Error::NotOnCurve)?;
        Self::from_raw(x_times_sign_y, y).into_prime_subgroup(trust)
    }

    /// Recovers the prime order subgroup element from `x·sign(y)` and
    /// `y·sign(y)`.
    ///
    /// # Errors
    /// - [`Error::WrongSignY`] if `y_times_sign_y` is negative;
    /// - [`Error::NotOnCurve`] if the pair is not on the curve;
    /// - [`Error::NotInSubgroup`] for untrusted input outside the good
    ///   subgroup.
    pub fn from_decaf_xy(
        x_times_sign_y: FieldElement,
        y_times_sign_y: FieldElement,
        trust: TrustLevel,
    ) -> Result<Self> {
        if y_times_sign_y.is_negative() {
            return Err(Error::WrongSignY);
        }
        let point = Self::from_raw(x_times_sign_y, y_times_sign_y);
        if !point.to_extended().on_curve() {
            return Err(Error::NotOnCurve);
        }
        point.into_prime_subgroup(trust)
    }

    fn check_subgroup(&self, trust: TrustLevel) -> Result<()> {
        if V::FULL_CURVE || trust == TrustLevel::Trusted {
            return Ok(());
        }
        // Only the decaf constructors pick a representative modulo A.
        let point = self.to_extended();
        if point.in_prime_subgroup() {
            Ok(())
        } else {
            Err(subgroup_error(&point))
        }
    }

    fn into_prime_subgroup(self, trust: TrustLevel) -> Result<Self> {
        let point = self.to_extended();
        if trust == TrustLevel::Untrusted && !point.in_good_subgroup() {
            return Err(subgroup_error(&point));
        }
        Ok(Self::from_extended(&point.prime_representative()))
    }
}
