#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::unwrap_used,
    clippy::mod_module_files,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused,
    unused_attributes,
    unused_imports,
    unused_mut,
    unused_must_use
)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

pub use rand_core;
pub use subtle;

mod curve;
mod error;
mod field;
mod nap;
#[cfg(feature = "std")]
pub mod serialize;

#[cfg(feature = "alloc")]
pub use curve::batch_to_affine;
pub use curve::{
    AffineFullPoint, AffinePoint, AffineSubgroupPoint, CurvePoint, EDWARDS_A, EDWARDS_D,
    ENDO_EIGENVALUE, EfghFullPoint, EfghPoint, EfghSubgroupPoint, ExtendedFullPoint,
    ExtendedPoint, ExtendedSubgroupPoint, FullCurve, ORDER, SQRT_D_OVER_A, Subgroup, TrustLevel,
    Variant, recover_x, recover_y,
};
#[cfg(feature = "std")]
pub use error::StreamError;
pub use error::{Error, Result};
pub use field::{BitHeader, ByteOrder, FieldElement};
#[cfg(feature = "std")]
pub use nap::set_nap_handler;
pub use nap::{NapHandler, get_nap_handler, ignore_nap, panic_on_nap};
#[cfg(feature = "std")]
pub use serialize::{
    PointSerializer, XAndSignYSerializer, XTimesSignYSerializer, XYSerializer,
    XYTimesSignYSerializer, YAndSignXSerializer,
};
