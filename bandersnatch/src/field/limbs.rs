//! Arithmetic on four 64-bit limbs modulo `p`.
//!
//! Every value handled here is a Montgomery residue in the relaxed range
//! `[0, 2^256 - p)`. Since `2^256 / 3 < p < 2^256 / 2`, a residue class has one
//! or two encodings in that range, and the functions below keep their outputs
//! inside it without reducing below `p`. The bound is what lets [`add`] fold a
//! carry with a single subtraction of `2p` and keeps the [`mul`] accumulator
//! inside four limbs between rounds.

/// Little-endian 64-bit limbs.
pub(crate) type Limbs = [u64; 4];

/// The field modulus `p`.
pub(crate) const MODULUS: Limbs = [
    0xffffffff00000001,
    0x53bda402fffe5bfe,
    0x3339d80809a1d805,
    0x73eda753299d7d48,
];

/// `2p`, which still fits in four limbs.
const MODULUS_X2: Limbs = [
    0xfffffffe00000002,
    0xa77b4805fffcb7fd,
    0x6673b0101343b00a,
    0xe7db4ea6533afa90,
];

/// `2^256 - p`, the exclusive upper bound of the internal representation.
const BOUND: Limbs = [
    0x00000000ffffffff,
    0xac425bfd0001a401,
    0xccc627f7f65e27fa,
    0x8c1258acd66282b7,
];

/// `2^256 mod p = 2^256 - 2p`, which is also the Montgomery form of one.
pub(crate) const R: Limbs = [
    0x00000001fffffffe,
    0x5884b7fa00034802,
    0x998c4fefecbc4ff5,
    0x1824b159acc5056f,
];

/// `2^512 mod p`.
pub(crate) const R2: Limbs = [
    0xc999e990f3f29c6d,
    0x2b6cedcb87925c23,
    0x05d314967254398f,
    0x0748d9d99f59ff11,
];

/// `-p^-1 mod 2^64`.
const INV: u64 = 0xfffffffeffffffff;

/// After a borrow in [`sub`], a wrapped top limb at or above this value is
/// corrected by adding `p`, anything below by adding `2p`.
///
/// This is the top limb of `2^256 - p` plus one. Adding `2p` keeps the result
/// below `2^256 - p` for every wrapped value below `2^257 - 3p`, whose top limb
/// is far above the threshold, so both corrections are safe around it.
const SUB_THRESHOLD: u64 = 0x8c1258acd66282b8;

/// Computes `a + b + carry`, returning the result along with the new carry.
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Computes `a - (b + borrow)`, returning the result along with the new borrow.
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Computes `a + (b * c) + carry`, returning the result along with the new carry.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Plain 256-bit addition, returning the carry out of the top limb.
#[inline]
const fn add_inner(a: &Limbs, b: &Limbs) -> (Limbs, u64) {
    let (w0, carry) = adc(a[0], b[0], 0);
    let (w1, carry) = adc(a[1], b[1], carry);
    let (w2, carry) = adc(a[2], b[2], carry);
    let (w3, carry) = adc(a[3], b[3], carry);
    ([w0, w1, w2, w3], carry)
}

/// Plain 256-bit subtraction, returning the borrow (`0` or `u64::MAX`).
#[inline]
const fn sub_inner(a: &Limbs, b: &Limbs) -> (Limbs, u64) {
    let (w0, borrow) = sbb(a[0], b[0], 0);
    let (w1, borrow) = sbb(a[1], b[1], borrow);
    let (w2, borrow) = sbb(a[2], b[2], borrow);
    let (w3, borrow) = sbb(a[3], b[3], borrow);
    ([w0, w1, w2, w3], borrow)
}

/// Returns `a < b` as integers.
#[inline]
pub(crate) const fn lt(a: &Limbs, b: &Limbs) -> bool {
    sub_inner(a, b).1 != 0
}

/// Subtracts `p` once if `a >= 2^256 - p`.
///
/// Accepts any 256-bit value and returns one in the relaxed range.
#[inline]
pub(crate) const fn reduce_once(a: &Limbs) -> Limbs {
    if a[3] < BOUND[3] {
        return *a;
    }
    if a[3] == BOUND[3] && lt(a, &BOUND) {
        return *a;
    }
    sub_inner(a, &MODULUS).0
}

/// Maps a value in the relaxed range to its unique encoding in `[0, p)`.
#[inline]
pub(crate) const fn normalize(a: &Limbs) -> Limbs {
    let (reduced, borrow) = sub_inner(a, &MODULUS);
    if borrow == 0 { reduced } else { *a }
}

/// Modular addition.
pub(crate) const fn add(a: &Limbs, b: &Limbs) -> Limbs {
    let (sum, carry) = add_inner(a, b);

    // The true sum is below 2 * (2^256 - p), so after dropping the carry,
    // subtracting 2p (and dropping the matching borrow) leaves a 256-bit value.
    let sum = if carry != 0 {
        sub_inner(&sum, &MODULUS_X2).0
    } else {
        sum
    };
    reduce_once(&sum)
}

/// Modular subtraction.
pub(crate) const fn sub(a: &Limbs, b: &Limbs) -> Limbs {
    let (diff, borrow) = sub_inner(a, b);
    if borrow == 0 {
        return diff;
    }

    let correction = if diff[3] >= SUB_THRESHOLD {
        &MODULUS
    } else {
        &MODULUS_X2
    };
    add_inner(&diff, correction).0
}

/// Montgomery multiplication: returns `a * b / 2^256 mod p`.
///
/// Operand scanning with one reduction step per limb of `b`. With both inputs
/// below `B + 1 = 2^256 - p`, the accumulator satisfies
/// `t <= (t + B * (2^64 - 1) + p * (2^64 - 1)) / 2^64 <= B + p = 2^256 - 1`
/// after every round, so it never needs a fifth limb between rounds.
pub(crate) const fn mul(a: &Limbs, b: &Limbs) -> Limbs {
    let mut t = [0u64; 4];
    let mut i = 0;

    while i < 4 {
        let (t0, carry) = mac(t[0], a[0], b[i], 0);
        let (t1, carry) = mac(t[1], a[1], b[i], carry);
        let (t2, carry) = mac(t[2], a[2], b[i], carry);
        let (t3, t4) = mac(t[3], a[3], b[i], carry);

        // q is chosen so that t + q * p is divisible by 2^64.
        let q = t0.wrapping_mul(INV);
        let (_, carry) = mac(t0, q, MODULUS[0], 0);
        let (r0, carry) = mac(t1, q, MODULUS[1], carry);
        let (r1, carry) = mac(t2, q, MODULUS[2], carry);
        let (r2, carry) = mac(t3, q, MODULUS[3], carry);
        let (r3, _) = adc(t4, 0, carry);

        t = [r0, r1, r2, r3];
        i += 1;
    }

    reduce_once(&t)
}

/// Multiplication by the small constant 5, without a Montgomery reduction.
///
/// The overflow limb `k` of `5a` is folded back as `k * (2^256 mod p)`; this
/// can carry out at most once more, which is folded the same way.
pub(crate) const fn mul_by_five(a: &Limbs) -> Limbs {
    let (w0, carry) = mac(0, a[0], 5, 0);
    let (w1, carry) = mac(0, a[1], 5, carry);
    let (w2, carry) = mac(0, a[2], 5, carry);
    let (w3, overflow) = mac(0, a[3], 5, carry);

    let (w0, carry) = mac(w0, R[0], overflow, 0);
    let (w1, carry) = mac(w1, R[1], overflow, carry);
    let (w2, carry) = mac(w2, R[2], overflow, carry);
    let (w3, carry) = mac(w3, R[3], overflow, carry);

    let w = [w0, w1, w2, w3];
    let w = if carry != 0 { add_inner(&w, &R).0 } else { w };
    reduce_once(&w)
}

/// Converts a canonical integer below `p` into Montgomery form.
#[inline]
pub(crate) const fn to_montgomery(a: &Limbs) -> Limbs {
    mul(a, &R2)
}

/// Converts a Montgomery residue into the canonical integer in `[0, p)`.
#[inline]
pub(crate) const fn from_montgomery(a: &Limbs) -> Limbs {
    normalize(&mul(a, &[1, 0, 0, 0]))
}

/// Reduces an arbitrary 256-bit integer modulo `p`.
///
/// Returns the reduced value and whether it was already below `p`. As
/// `2^256 < 3p`, at most two subtractions are needed.
pub(crate) const fn reduce_integer(a: &Limbs) -> (Limbs, bool) {
    if lt(a, &MODULUS) {
        return (*a, true);
    }
    let once = sub_inner(a, &MODULUS).0;
    if lt(&once, &MODULUS) {
        (once, false)
    } else {
        (sub_inner(&once, &MODULUS).0, false)
    }
}
