//! Simultaneous inversion of many field elements with Montgomery's trick.

use super::FieldElement;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

impl FieldElement {
    /// Writes the inverses of `inputs` into `outputs` using a single field
    /// inversion.
    ///
    /// `outputs` doubles as the storage for the prefix products, so no
    /// allocation takes place. An empty batch is a no-op.
    ///
    /// # Panics
    /// - if the slices differ in length;
    /// - if any input is zero. `inputs` is never modified; `outputs` holds
    ///   unspecified values in that case.
    pub fn batch_invert(inputs: &[Self], outputs: &mut [Self]) {
        assert_eq!(inputs.len(), outputs.len(), "length mismatch");

        let mut acc = Self::ONE;
        for (input, prefix) in inputs.iter().zip(outputs.iter_mut()) {
            *prefix = acc;
            acc *= input;
        }

        if inputs.is_empty() {
            return;
        }
        assert!(!bool::from(acc.is_zero()), "batch inversion of zero");

        let mut inv = acc.invert();
        for (input, out) in inputs.iter().zip(outputs.iter_mut()).rev() {
            *out *= inv;
            inv *= input;
        }
    }

    /// Replaces every element of `values` by its inverse using a single field
    /// inversion.
    ///
    /// An empty batch is a no-op.
    ///
    /// # Panics
    /// If any element is zero. The check happens before anything is written,
    /// so `values` is left untouched.
    #[cfg(feature = "alloc")]
    pub fn batch_invert_in_place(values: &mut [Self]) {
        match values.len() {
            0 => {}
            1 => values[0] = values[0].invert(),
            _ => {
                let mut inverses = Vec::with_capacity(values.len());
                inverses.resize(values.len(), Self::ZERO);
                Self::batch_invert(values, &mut inverses);
                values.copy_from_slice(&inverses);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;
    use std::{panic, vec};

    fn random_batch(n: usize) -> Vec<FieldElement> {
        let mut rng = ChaCha8Rng::seed_from_u64(n as u64);
        (0..n).map(|_| FieldElement::random(&mut rng)).collect()
    }

    #[test]
    fn matches_individual_inversion() {
        for n in [1, 2, 3, 10] {
            let inputs = random_batch(n);
            let mut outputs = vec![FieldElement::ZERO; n];
            FieldElement::batch_invert(&inputs, &mut outputs);
            for (x, inv) in inputs.iter().zip(&outputs) {
                assert_eq!(*inv, x.invert());
            }

            let mut values = inputs.clone();
            FieldElement::batch_invert_in_place(&mut values);
            assert_eq!(values, outputs);
        }
    }

    #[test]
    fn empty_batch() {
        FieldElement::batch_invert(&[], &mut []);
        FieldElement::batch_invert_in_place(&mut []);
    }

    #[test]
    fn zero_leaves_inputs_untouched() {
        for n in [1, 2, 5] {
            let mut values = random_batch(n);
            values[n / 2] = FieldElement::ALTERNATIVE_ZERO;
            let before: Vec<[u64; 4]> = values.iter().map(|v| v.0).collect();

            let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
                FieldElement::batch_invert_in_place(&mut values)
            }));
            assert!(result.is_err());

            let after: Vec<[u64; 4]> = values.iter().map(|v| v.0).collect();
            assert_eq!(before, after);
        }
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn length_mismatch() {
        FieldElement::batch_invert(&[FieldElement::ONE], &mut []);
    }
}
