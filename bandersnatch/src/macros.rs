// -*- mode: rust; -*-
//
// This file is part of curve25519-dalek.
// Copyright (c) 2016-2021 isis agora lovecruft
// Copyright (c) 2016-2019 Henry de Valence
// See LICENSE for licensing information.
//
// Authors:
// - isis agora lovecruft <isis@patternsinthevoid.net>
// - Henry de Valence <hdevalence@hdevalence.ca>

//! Internal macros.
//!
//! The point types are generic over their [`Variant`](crate::Variant), so every
//! macro takes an optional `<V>` argument naming the variant parameter.

/// Define borrow and non-borrow variants of `Add`.
macro_rules! define_add_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        define_add_variants!(<>, LHS = $lhs, RHS = $rhs, Output = $out);
    };
    (<$($v:ident)?>, LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        impl<'b, $($v: $crate::Variant)?> Add<&'b $rhs> for $lhs {
            type Output = $out;

            fn add(self, rhs: &'b $rhs) -> $out {
                &self + rhs
            }
        }

        impl<'a, $($v: $crate::Variant)?> Add<$rhs> for &'a $lhs {
            type Output = $out;

            fn add(self, rhs: $rhs) -> $out {
                self + &rhs
            }
        }

        impl<$($v: $crate::Variant)?> Add<$rhs> for $lhs {
            type Output = $out;

            fn add(self, rhs: $rhs) -> $out {
                &self + &rhs
            }
        }
    };
}

/// Define non-borrow variants of `AddAssign`.
macro_rules! define_add_assign_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty) => {
        define_add_assign_variants!(<>, LHS = $lhs, RHS = $rhs);
    };
    (<$($v:ident)?>, LHS = $lhs:ty, RHS = $rhs:ty) => {
        impl<$($v: $crate::Variant)?> AddAssign<$rhs> for $lhs {
            fn add_assign(&mut self, rhs: $rhs) {
                *self += &rhs;
            }
        }
    };
}

/// Define borrow and non-borrow variants of `Sub`.
macro_rules! define_sub_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        define_sub_variants!(<>, LHS = $lhs, RHS = $rhs, Output = $out);
    };
    (<$($v:ident)?>, LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        impl<'b, $($v: $crate::Variant)?> Sub<&'b $rhs> for $lhs {
            type Output = $out;

            fn sub(self, rhs: &'b $rhs) -> $out {
                &self - rhs
            }
        }

        impl<'a, $($v: $crate::Variant)?> Sub<$rhs> for &'a $lhs {
            type Output = $out;

            fn sub(self, rhs: $rhs) -> $out {
                self - &rhs
            }
        }

        impl<$($v: $crate::Variant)?> Sub<$rhs> for $lhs {
            type Output = $out;

            fn sub(self, rhs: $rhs) -> $out {
                &self - &rhs
            }
        }
    };
}

/// Define non-borrow variants of `SubAssign`.
macro_rules! define_sub_assign_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty) => {
        define_sub_assign_variants!(<>, LHS = $lhs, RHS = $rhs);
    };
    (<$($v:ident)?>, LHS = $lhs:ty, RHS = $rhs:ty) => {
        impl<$($v: $crate::Variant)?> SubAssign<$rhs> for $lhs {
            fn sub_assign(&mut self, rhs: $rhs) {
                *self -= &rhs;
            }
        }
    };
}

/// Define borrow and non-borrow variants of `Mul`.
macro_rules! define_mul_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty, Output = $out:ty) => {
        impl<'b> Mul<&'b $rhs> for $lhs {
            type Output = $out;

            fn mul(self, rhs: &'b $rhs) -> $out {
                &self * rhs
            }
        }

        impl<'a> Mul<$rhs> for &'a $lhs {
            type Output = $out;

            fn mul(self, rhs: $rhs) -> $out {
                self * &rhs
            }
        }

        impl Mul<$rhs> for $lhs {
            type Output = $out;

            fn mul(self, rhs: $rhs) -> $out {
                &self * &rhs
            }
        }
    };
}

/// Define non-borrow variants of `MulAssign`.
macro_rules! define_mul_assign_variants {
    (LHS = $lhs:ty, RHS = $rhs:ty) => {
        impl MulAssign<$rhs> for $lhs {
            fn mul_assign(&mut self, rhs: $rhs) {
                *self *= &rhs;
            }
        }
    };
}

/// Define `Neg` for a value and a reference, given the by-reference impl.
macro_rules! define_neg_variants {
    (<$($v:ident)?>, Type = $ty:ty) => {
        impl<$($v: $crate::Variant)?> Neg for $ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                -&self
            }
        }
    };
}
