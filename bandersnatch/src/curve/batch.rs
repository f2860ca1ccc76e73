//! Normalizing many points with a single field inversion.

use super::{AffinePoint, ExtendedPoint, Variant};
use crate::field::FieldElement;

#[cfg(feature = "alloc")]
use {super::CurvePoint, alloc::vec::Vec};

impl<V: Variant> ExtendedPoint<V> {
    /// Converts a batch of points to affine coordinates with one shared
    /// inversion.
    ///
    /// Points with `Z = 0` (points at infinity and NaPs with zero `Z`) come
    /// out as affine NaPs, as does every other NaP.
    pub fn batch_normalize<const N: usize>(points: &[Self; N]) -> [AffinePoint<V>; N] {
        let mut zs = [FieldElement::ONE; N];
        for (z, point) in zs.iter_mut().zip(points) {
            *z = nonzero_z(point);
        }
        let mut z_inverses = [FieldElement::ZERO; N];
        FieldElement::batch_invert(&zs, &mut z_inverses);

        let mut out = [AffinePoint::NAP; N];
        for ((out, point), z_inv) in out.iter_mut().zip(points).zip(&z_inverses) {
            *out = normalize(point, z_inv);
        }
        out
    }
}

/// Converts `points` to affine coordinates in `out` with one shared
/// inversion; see [`ExtendedPoint::batch_normalize`].
///
/// # Panics
/// If the slices differ in length.
#[cfg(feature = "alloc")]
pub fn batch_to_affine<P: CurvePoint>(points: &[P], out: &mut [AffinePoint<P::Variant>]) {
    assert_eq!(points.len(), out.len(), "length mismatch");

    let extended: Vec<ExtendedPoint<P::Variant>> = points.iter().map(P::to_extended).collect();
    let zs: Vec<FieldElement> = extended.iter().map(nonzero_z).collect();
    let mut z_inverses = Vec::with_capacity(zs.len());
    z_inverses.resize(zs.len(), FieldElement::ZERO);
    FieldElement::batch_invert(&zs, &mut z_inverses);

    for ((out, point), z_inv) in out.iter_mut().zip(&extended).zip(&z_inverses) {
        *out = normalize(point, z_inv);
    }
}

/// `Z`, or one in its place where it vanishes so the batch stays invertible.
fn nonzero_z<V: Variant>(point: &ExtendedPoint<V>) -> FieldElement {
    if bool::from(point.Z.is_zero()) {
        FieldElement::ONE
    } else {
        point.Z
    }
}

fn normalize<V: Variant>(point: &ExtendedPoint<V>, z_inv: &FieldElement) -> AffinePoint<V> {
    if point.nap_pattern() || bool::from(point.Z.is_zero()) {
        AffinePoint::NAP
    } else {
        AffinePoint::from_raw(point.X * z_inv, point.Y * z_inv)
    }
}
