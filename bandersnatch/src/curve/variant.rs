//! Markers selecting which points a point type may hold.

use core::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// Which set of curve points a point type represents.
///
/// Implemented by [`FullCurve`] and [`Subgroup`] only.
pub trait Variant:
    sealed::Sealed + Copy + Clone + Debug + Default + Eq + Send + Sync + 'static
{
    /// Whether every rational point of the curve, including the two points at
    /// infinity, can be held.
    const FULL_CURVE: bool;

    /// Short name used in `Debug` output.
    const NAME: &'static str;
}

/// Points of the whole curve group `Z/2 × Z/2 × Z/r`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct FullCurve;

/// Points of the prime order subgroup, stored modulo the affine two-torsion
/// point `A = (0, -1)`.
///
/// A value may internally hold either `P` or `P + A`; everything observable
/// about it is that of `P`, the representative in the subgroup.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Subgroup;

impl sealed::Sealed for FullCurve {}
impl sealed::Sealed for Subgroup {}

impl Variant for FullCurve {
    const FULL_CURVE: bool = true;
    const NAME: &'static str = "Full";
}

impl Variant for Subgroup {
    const FULL_CURVE: bool = false;
    const NAME: &'static str = "Subgroup";
}
