//! Curve constants.

use crate::field::FieldElement;

/// Coefficient `a = -5` of the curve equation `a·x² + y² = 1 + d·x²·y²`.
pub const EDWARDS_A: FieldElement = FieldElement::from_i64(-5);

/// Coefficient `d` of the curve equation,
/// `138827208126141220649022263972958607803 / 171449701953573178309673572579671231137`.
pub const EDWARDS_D: FieldElement =
    FieldElement::from_be_hex("6389c12633c267cbc66e3bf86be3b6d8cb66677177e54f92b369f2f5188d58e7");

/// The fixed square root of `d / a` giving the points at infinity
/// `E1 = (√(d/a) : 0 : 1 : 0)` and `E2 = (-√(d/a) : 0 : 1 : 0)`.
pub const SQRT_D_OVER_A: FieldElement =
    FieldElement::from_be_hex("52c9f28b828426a561f00d3a63511a882ea712770d9af4d6ee0f014d172510b6");

/// Order `r` of the prime subgroup, as little-endian limbs.
pub const ORDER: [u64; 4] = [
    0x74fd06b52876e7e1,
    0xff8f870074190471,
    0x0cce760202687600,
    0x1cfb69d4ca675f52,
];

/// The endomorphism acts on the prime subgroup as multiplication by this
/// `λ`, a square root of `-2` modulo [`ORDER`]; little-endian limbs.
pub const ENDO_EIGENVALUE: [u64; 4] = [
    0xd13d21408783df05,
    0xcfc49db970a5056e,
    0xedf849562b38c72b,
    0x13b4f3dc4a39a493,
];

/// `b = √(d/a) - 2`, which is also `1 / √(d/a)`.
pub(crate) const ENDO_B: FieldElement =
    FieldElement::from_be_hex("52c9f28b828426a561f00d3a63511a882ea712770d9af4d6ee0f014d172510b4");

pub(crate) const ENDO_C: FieldElement =
    FieldElement::from_be_hex("6cc624cf865457c3a97c6efd6c17d1078456abcfff36f4e9515c806cdf650b3d");

pub(crate) const GENERATOR_X: FieldElement =
    FieldElement::from_be_hex("29c132cc2c0b34c5743711777bbe42f32b79c022ad998465e1e71866a252ae18");

pub(crate) const GENERATOR_Y: FieldElement =
    FieldElement::from_be_hex("2a6c669eda123e0f157d8b50badcd586358cad81eee464605e3167b6cc974166");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_d_over_a() {
        assert_eq!(SQRT_D_OVER_A.square() * EDWARDS_A, EDWARDS_D);
        assert_eq!(ENDO_B, SQRT_D_OVER_A - FieldElement::TWO);
        assert_eq!(ENDO_B * SQRT_D_OVER_A, FieldElement::ONE);
    }

    #[test]
    fn a_and_d_are_non_squares() {
        assert_eq!(EDWARDS_A.jacobi(), -1);
        assert_eq!(EDWARDS_D.jacobi(), -1);
    }

    #[test]
    fn generator_is_on_curve() {
        let xx = GENERATOR_X.square();
        let yy = GENERATOR_Y.square();
        assert_eq!(
            EDWARDS_A * xx + yy,
            FieldElement::ONE + EDWARDS_D * xx * yy
        );
        assert_eq!(GENERATOR_X.sign(), 1);
        assert_eq!(GENERATOR_Y.sign(), 1);
    }
}
