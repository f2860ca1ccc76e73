//! Points of the Bandersnatch curve `-5·x² + y² = 1 + d·x²·y²`.
//!
//! Three representations are available, each for the full curve and for the
//! prime order subgroup:
//!
//! - [`ExtendedPoint`]: projective `(X : Y : T : Z)` with `X·Y = T·Z`;
//! - [`AffinePoint`]: `(x, y, t = x·y)`;
//! - [`EfghPoint`]: `(e, f, g, h)` with `X = e·f`, `Y = g·h`, `T = e·h`,
//!   `Z = f·g`, which is what the addition formulas naturally produce.
//!
//! Besides the prime order subgroup, the curve has the two-torsion points
//! `N = (0, 1)` (the neutral element) and `A = (0, -1)`, and two points at
//! infinity `E1`, `E2` that only the projective full curve types can hold.
//!
//! An invalid coordinate pattern (`X = Y = 0`) is a NaP, "not a point". NaPs
//! are closed under every operation and are reported to the
//! [NaP handler](crate::set_nap_handler) when they reach a comparison.

pub(crate) mod affine;
mod batch;
pub(crate) mod constants;
pub(crate) mod efgh;
pub(crate) mod extended;
pub(crate) mod formulas;
pub(crate) mod recover;
pub(crate) mod variant;

pub use affine::AffinePoint;
#[cfg(feature = "alloc")]
pub use batch::batch_to_affine;
pub use constants::{EDWARDS_A, EDWARDS_D, ENDO_EIGENVALUE, ORDER, SQRT_D_OVER_A};
pub use efgh::EfghPoint;
pub use extended::ExtendedPoint;
pub use recover::{TrustLevel, recover_x, recover_y};
pub use variant::{FullCurve, Subgroup, Variant};

use crate::field::FieldElement;
use crate::nap::nap_encountered;
use crate::{Error, Result};
use core::fmt::Debug;
use rand_core::RngCore;

/// Extended point on the full curve.
pub type ExtendedFullPoint = ExtendedPoint<FullCurve>;
/// Extended point of the prime order subgroup.
pub type ExtendedSubgroupPoint = ExtendedPoint<Subgroup>;
/// Affine point on the full curve.
pub type AffineFullPoint = AffinePoint<FullCurve>;
/// Affine point of the prime order subgroup.
pub type AffineSubgroupPoint = AffinePoint<Subgroup>;
/// Efgh point on the full curve.
pub type EfghFullPoint = EfghPoint<FullCurve>;
/// Efgh point of the prime order subgroup.
pub type EfghSubgroupPoint = EfghPoint<Subgroup>;

mod sealed {
    pub trait Sealed {}
}

impl<V: Variant> sealed::Sealed for ExtendedPoint<V> {}
impl<V: Variant> sealed::Sealed for AffinePoint<V> {}
impl<V: Variant> sealed::Sealed for EfghPoint<V> {}

/// Queries and constructors shared by every point representation.
///
/// Implemented by [`ExtendedPoint`], [`AffinePoint`] and [`EfghPoint`] only.
/// Everything is answered through the extended form of the point, so
/// representations can be compared with each other.
pub trait CurvePoint: sealed::Sealed + Copy + Debug + Default + PartialEq + Send + Sync {
    /// Which points this type may hold.
    type Variant: Variant;

    /// The neutral element `N = (0, 1)`.
    const NEUTRAL: Self;

    /// The standard generator of the prime order subgroup.
    const GENERATOR: Self;

    /// A NaP.
    const NAP: Self;

    /// Converts to extended coordinates.
    fn to_extended(&self) -> ExtendedPoint<Self::Variant>;

    /// Converts from extended coordinates.
    ///
    /// Representations that cannot hold a point at infinity turn it into a
    /// NaP.
    fn from_extended(point: &ExtendedPoint<Self::Variant>) -> Self;

    // ------------------------------------------------------------------------
    // Checks
    // ------------------------------------------------------------------------

    /// Whether this is a NaP.
    fn is_nap(&self) -> bool {
        self.to_extended().nap_pattern()
    }

    /// Whether this is the neutral element.
    ///
    /// On the prime order subgroup, `A` is also neutral, as the subgroup is
    /// represented modulo `A`. NaPs are reported to the NaP handler, which
    /// decides the result.
    fn is_neutral(&self) -> bool {
        let point = self.to_extended();
        if point.nap_pattern() {
            return nap_encountered("is_neutral called on a NaP", true, &[self]);
        }
        point.neutral()
    }

    /// Whether this is one of the two points at infinity.
    ///
    /// NaPs are reported to the NaP handler, which decides the result.
    fn is_at_infinity(&self) -> bool {
        let point = self.to_extended();
        if point.nap_pattern() {
            return nap_encountered("is_at_infinity called on a NaP", true, &[self]);
        }
        point.infinite()
    }

    /// Whether the coordinates satisfy the curve equations. False for NaPs.
    fn is_on_curve(&self) -> bool {
        let point = self.to_extended();
        !point.nap_pattern() && point.on_curve()
    }

    /// Whether the point lies in the prime order subgroup or in its coset
    /// shifted by `A`. False for NaPs.
    fn is_in_good_subgroup(&self) -> bool {
        let point = self.to_extended();
        !point.nap_pattern() && point.in_good_subgroup()
    }

    /// Whether the point is an element of the prime order subgroup.
    ///
    /// For subgroup types, which are taken modulo `A`, this is the same as
    /// [`is_in_good_subgroup`](Self::is_in_good_subgroup).
    fn is_in_subgroup(&self) -> bool {
        let point = self.to_extended();
        if point.nap_pattern() {
            return false;
        }
        if <Self::Variant as Variant>::FULL_CURVE {
            point.in_prime_subgroup()
        } else {
            point.in_good_subgroup()
        }
    }

    /// Whether this is a point the type is allowed to hold: not a NaP, on the
    /// curve, and for subgroup types in the good subgroup.
    fn is_valid(&self) -> bool {
        let point = self.to_extended();
        if point.nap_pattern() || !point.on_curve() {
            return false;
        }
        <Self::Variant as Variant>::FULL_CURVE || point.in_good_subgroup()
    }

    /// Equality of the represented group elements.
    ///
    /// Exact for full curve types and modulo `A` for subgroup types. If either
    /// side is a NaP, the NaP handler decides the result.
    fn is_equal<P: CurvePoint<Variant = Self::Variant>>(&self, other: &P) -> bool {
        let (p, q) = (self.to_extended(), other.to_extended());
        if p.nap_pattern() || q.nap_pattern() {
            return nap_encountered("comparison involving a NaP", true, &[self, other]);
        }
        if <Self::Variant as Variant>::FULL_CURVE {
            p.eq_exact(&q)
        } else {
            p.eq_mod_a(&q)
        }
    }

    /// Equality modulo `A`, i.e. whether `self - other` is `N` or `A`.
    ///
    /// If either side is a NaP, the NaP handler decides the result.
    fn is_equal_mod_a<P: CurvePoint>(&self, other: &P) -> bool {
        let (p, q) = (self.to_extended(), other.to_extended());
        if p.nap_pattern() || q.nap_pattern() {
            return nap_encountered("comparison involving a NaP", true, &[self, other]);
        }
        p.eq_mod_a(&q.cast())
    }

    // ------------------------------------------------------------------------
    // Coordinates
    // ------------------------------------------------------------------------

    /// Affine `(x, y)`.
    ///
    /// Subgroup types report the coordinates of the subgroup element. A NaP
    /// is reported to the NaP handler and yields `(0, 0)`.
    ///
    /// # Panics
    /// If the point is at infinity.
    fn affine_coordinates(&self) -> (FieldElement, FieldElement) {
        let point = self.to_extended();
        if point.nap_pattern() {
            nap_encountered("affine coordinates of a NaP", false, &[self]);
            return (FieldElement::ZERO, FieldElement::ZERO);
        }
        assert!(
            !bool::from(point.Z.is_zero()),
            "affine coordinates of a point at infinity"
        );
        let point = point.representative();
        let z_inv = point.Z.invert();
        (point.X * z_inv, point.Y * z_inv)
    }

    /// Affine `x`. See [`affine_coordinates`](Self::affine_coordinates).
    fn x_affine(&self) -> FieldElement {
        self.affine_coordinates().0
    }

    /// Affine `y`. See [`affine_coordinates`](Self::affine_coordinates).
    fn y_affine(&self) -> FieldElement {
        self.affine_coordinates().1
    }

    /// Affine `t = x·y`. See [`affine_coordinates`](Self::affine_coordinates).
    fn t_affine(&self) -> FieldElement {
        let (x, y) = self.affine_coordinates();
        x * y
    }

    /// Projective `X` of the extended form.
    ///
    /// Subgroup types report the coordinates of the subgroup element.
    fn x_projective(&self) -> FieldElement {
        self.to_extended().representative().X
    }

    /// Projective `Y` of the extended form.
    fn y_projective(&self) -> FieldElement {
        self.to_extended().representative().Y
    }

    /// Projective `T` of the extended form.
    fn t_projective(&self) -> FieldElement {
        self.to_extended().representative().T
    }

    /// Projective `Z` of the extended form.
    fn z_projective(&self) -> FieldElement {
        self.to_extended().representative().Z
    }

    /// `(x·sign(y), y·sign(y))`, which is the same for a point and the point
    /// shifted by `A`.
    ///
    /// A NaP is reported to the NaP handler and yields `(0, 0)`.
    ///
    /// # Panics
    /// If the point is at infinity.
    fn decaf_affine_coordinates(&self) -> (FieldElement, FieldElement) {
        let (x, y) = self.affine_coordinates();
        if y.is_negative() { (-x, -y) } else { (x, y) }
    }

    /// Affine `x·sign(y)`.
    fn x_decaf_affine(&self) -> FieldElement {
        self.decaf_affine_coordinates().0
    }

    /// Affine `y·sign(y)`.
    fn y_decaf_affine(&self) -> FieldElement {
        self.decaf_affine_coordinates().1
    }

    /// Projective `(X·s, Y·s, Z)` with `s` the sign of the affine `y`.
    ///
    /// A NaP is reported to the NaP handler and yields zeros.
    ///
    /// # Panics
    /// If the point is at infinity.
    fn decaf_projective_coordinates(&self) -> (FieldElement, FieldElement, FieldElement) {
        let point = self.to_extended();
        if point.nap_pattern() {
            nap_encountered("decaf coordinates of a NaP", false, &[self]);
            return (FieldElement::ZERO, FieldElement::ZERO, FieldElement::ZERO);
        }
        let (_, y) = self.affine_coordinates();
        if y.is_negative() {
            (-point.X, -point.Y, point.Z)
        } else {
            (point.X, point.Y, point.Z)
        }
    }

    /// Projective `X·sign(y)`.
    fn x_decaf_projective(&self) -> FieldElement {
        self.decaf_projective_coordinates().0
    }

    /// Projective `Y·sign(y)`.
    fn y_decaf_projective(&self) -> FieldElement {
        self.decaf_projective_coordinates().1
    }

    /// Projective `Z` matching [`x_decaf_projective`](Self::x_decaf_projective)
    /// and [`y_decaf_projective`](Self::y_decaf_projective).
    fn z_decaf_projective(&self) -> FieldElement {
        self.decaf_projective_coordinates().2
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    /// Builds a point from affine coordinates, see [`AffinePoint::from_affine`].
    fn from_affine(x: FieldElement, y: FieldElement, trust: TrustLevel) -> Result<Self> {
        AffinePoint::<Self::Variant>::from_affine(x, y, trust)
            .map(|p| Self::from_extended(&p.to_extended()))
    }

    /// Builds a point from affine coordinates without any check.
    ///
    /// Meant for tests and for coordinates known to be valid; an invalid input
    /// breaks the invariants of the type.
    fn from_affine_unchecked(x: FieldElement, y: FieldElement) -> Self {
        let point = AffinePoint::<Self::Variant>::from_affine_unchecked(x, y);
        Self::from_extended(&point.to_extended())
    }

    /// Recovers a point from `x` and the sign of `y`, see
    /// [`AffinePoint::from_x_and_sign_y`].
    fn from_x_and_sign_y(x: FieldElement, y_negative: bool, trust: TrustLevel) -> Result<Self> {
        AffinePoint::<Self::Variant>::from_x_and_sign_y(x, y_negative, trust)
            .map(|p| Self::from_extended(&p.to_extended()))
    }

    /// Recovers a point from `y` and the sign of `x`, see
    /// [`AffinePoint::from_y_and_sign_x`].
    fn from_y_and_sign_x(y: FieldElement, x_negative: bool, trust: TrustLevel) -> Result<Self> {
        AffinePoint::<Self::Variant>::from_y_and_sign_x(y, x_negative, trust)
            .map(|p| Self::from_extended(&p.to_extended()))
    }

    /// Recovers a subgroup element from `x·sign(y)`, see
    /// [`AffinePoint::from_decaf_x`].
    fn from_decaf_x(x_times_sign_y: FieldElement, trust: TrustLevel) -> Result<Self> {
        AffinePoint::<Self::Variant>::from_decaf_x(x_times_sign_y, trust)
            .map(|p| Self::from_extended(&p.to_extended()))
    }

    /// Recovers a subgroup element from `x·sign(y)` and `y·sign(y)`, see
    /// [`AffinePoint::from_decaf_xy`].
    fn from_decaf_xy(
        x_times_sign_y: FieldElement,
        y_times_sign_y: FieldElement,
        trust: TrustLevel,
    ) -> Result<Self> {
        AffinePoint::<Self::Variant>::from_decaf_xy(x_times_sign_y, y_times_sign_y, trust)
            .map(|p| Self::from_extended(&p.to_extended()))
    }

    /// Samples a random point.
    ///
    /// Full curve types get a uniformly random finite point, subgroup types a
    /// uniformly random subgroup element. Not meant for secret values.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::from_extended(&ExtendedPoint::<Self::Variant>::random(rng))
    }

    /// Multiplies by the little-endian integer `scalar`, in variable time.
    fn mul_vartime(&self, scalar: &[u64]) -> Self {
        Self::from_extended(&self.to_extended().mul_vartime(scalar))
    }
}

/// The error for a point that failed a subgroup membership check.
pub(crate) fn subgroup_error<V: Variant>(point: &ExtendedPoint<V>) -> Error {
    if point.nap_pattern() {
        Error::NaP
    } else if point.infinite() {
        Error::AtInfinity
    } else {
        Error::NotInSubgroup
    }
}
