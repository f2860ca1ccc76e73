//! Field arithmetic modulo
//! p = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001,
//! the scalar field of BLS12-381 and the base field of Bandersnatch.

#![allow(clippy::op_ref)]

mod batch;
mod element;
pub(crate) mod encoding;
pub(crate) mod limbs;

pub use element::FieldElement;
pub use encoding::{BitHeader, ByteOrder};
