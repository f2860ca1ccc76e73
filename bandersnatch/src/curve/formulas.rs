//! Group law formulas.
//!
//! Every formula reads extended coordinates `(X : Y : T : Z)` and returns an
//! efgh quadruple with `X = e·f`, `Y = g·h`, `T = e·h`, `Z = f·g`, so
//! extended output costs four more multiplications and efgh output none.

#![allow(non_snake_case)]

use super::constants::{EDWARDS_D, ENDO_B, ENDO_C};
use super::{AffinePoint, EfghPoint, ExtendedPoint, FullCurve, Variant};

/// `add-2008-hwcd` for `a = -5`.
///
/// Exceptional exactly when `p - q` is a point at infinity; the result then
/// has the NaP pattern.
pub(crate) fn add_hwcd<V: Variant>(p: &ExtendedPoint<V>, q: &ExtendedPoint<V>) -> EfghPoint<V> {
    let A = p.X * q.X;
    let B = p.Y * q.Y;
    let C = EDWARDS_D * p.T * q.T;
    let D = p.Z * q.Z;
    let E = (p.X + p.Y) * (q.X + q.Y) - A - B;
    let F = D - C;
    let G = D + C;
    let H = B + A.multiply_by_five();
    EfghPoint::from_raw(E, F, G, H)
}

/// `add-2008-hwcd` with an affine second operand, saving `Z1·Z2`.
pub(crate) fn add_mixed_hwcd<V: Variant>(p: &ExtendedPoint<V>, q: &AffinePoint<V>) -> EfghPoint<V> {
    let A = p.X * q.x;
    let B = p.Y * q.y;
    let C = EDWARDS_D * p.T * q.t;
    let D = p.Z;
    let E = (p.X + p.Y) * (q.x + q.y) - A - B;
    let F = D - C;
    let G = D + C;
    let H = B + A.multiply_by_five();
    EfghPoint::from_raw(E, F, G, H)
}

/// The dual addition law.
///
/// Exceptional exactly when `p - q` is `N` or `A`, which never overlaps with
/// the exceptional set of [`add_hwcd`] for two valid points.
pub(crate) fn add_dual<V: Variant>(p: &ExtendedPoint<V>, q: &ExtendedPoint<V>) -> EfghPoint<V> {
    let E = p.X * q.Y - p.Y * q.X;
    let F = p.Y * q.Y - (p.X * q.X).multiply_by_five();
    let TZ = p.T * q.Z;
    let ZT = p.Z * q.T;
    let G = TZ - ZT;
    let H = TZ + ZT;
    EfghPoint::from_raw(H, E, F, G)
}

/// Complete addition: [`add_hwcd`], falling back to [`add_dual`] for the
/// full curve when the first law hits an exceptional pair of valid points.
///
/// On the prime subgroup (modulo `A`) the difference of two points is never
/// at infinity, so no fallback is needed there.
pub(crate) fn add<V: Variant>(p: &ExtendedPoint<V>, q: &ExtendedPoint<V>) -> EfghPoint<V> {
    let sum = add_hwcd(p, q);
    if V::FULL_CURVE && sum.nap_pattern() && !p.nap_pattern() && !q.nap_pattern() {
        return add_dual(p, q);
    }
    sum
}

/// Complete mixed addition, see [`add`].
pub(crate) fn add_mixed<V: Variant>(p: &ExtendedPoint<V>, q: &AffinePoint<V>) -> EfghPoint<V> {
    let sum = add_mixed_hwcd(p, q);
    if V::FULL_CURVE && sum.nap_pattern() && !p.nap_pattern() && !q.nap_pattern() {
        return add_dual(p, &q.to_extended());
    }
    sum
}

/// `dbl-2008-hwcd` for `a = -5`. Never exceptional.
pub(crate) fn double<V: Variant>(p: &ExtendedPoint<V>) -> EfghPoint<V> {
    let A = p.X.square();
    let B = p.Y.square();
    let C = p.Z.square().double();
    let D = A.mul_by_a();
    let E = (p.X + p.Y).square() - A - B;
    let G = D + B;
    let F = G - C;
    let H = D - B;
    EfghPoint::from_raw(E, F, G, H)
}

/// The degree 2 endomorphism, with exceptional inputs handled: NaP stays NaP,
/// `N` and `A` map to `N`. Points at infinity give the NaP pattern.
pub(crate) fn endo<V: Variant>(p: &ExtendedPoint<V>) -> EfghPoint<V> {
    if p.nap_pattern() {
        return EfghPoint::NAP;
    }
    if bool::from(p.X.is_zero()) {
        return EfghPoint::NEUTRAL;
    }
    endo_unchecked(p)
}

/// As [`endo`], but points at infinity map to `A`.
pub(crate) fn endo_full_curve(p: &ExtendedPoint<FullCurve>) -> EfghPoint<FullCurve> {
    if !p.nap_pattern() && bool::from(p.Z.is_zero()) {
        return EfghPoint::A;
    }
    endo(p)
}

fn endo_unchecked<V: Variant>(p: &ExtendedPoint<V>) -> EfghPoint<V> {
    let YY = p.Y.square();
    let ZZ = p.Z.square();
    let bZZ = ENDO_B * ZZ;
    let F = ENDO_C * (ZZ - YY);
    let G = ENDO_B * (YY + bZZ);
    let H = YY - bZZ;
    let XY = p.X * p.Y;
    EfghPoint::from_raw(F, H, XY, G)
}
