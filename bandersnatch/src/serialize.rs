//! Fixed-length byte formats for curve points.
//!
//! Each format is its own [`PointSerializer`] type, configured through
//! builder methods:
//!
//! | serializer | bytes | encodes |
//! |------------|-------|---------|
//! | [`XYSerializer`] | 64 | `x`, `y` |
//! | [`XAndSignYSerializer`] | 32 | `x` and the sign of `y` |
//! | [`YAndSignXSerializer`] | 32 | `y` and the sign of `x` |
//! | [`XTimesSignYSerializer`] | 32 | `x·sign(y)` |
//! | [`XYTimesSignYSerializer`] | 64 | `x·sign(y)`, `y·sign(y)` |
//!
//! The last two are "decaf" formats: they identify a point with its shift by
//! `A`, and only accept elements of the prime order subgroup.
//!
//! ```
//! use bandersnatch::{ExtendedSubgroupPoint, PointSerializer, TrustLevel, XAndSignYSerializer};
//!
//! let serializer = XAndSignYSerializer::new();
//! let point = ExtendedSubgroupPoint::GENERATOR.double();
//!
//! let mut bytes = Vec::new();
//! assert_eq!(serializer.serialize_point(&mut bytes, &point), Ok(32));
//!
//! let mut decoded = ExtendedSubgroupPoint::NEUTRAL;
//! serializer.deserialize_point(&mut bytes.as_slice(), TrustLevel::Untrusted, &mut decoded)?;
//! assert_eq!(decoded, point);
//! # Ok::<(), bandersnatch::StreamError>(())
//! ```

mod decaf;
mod sign;
mod xy;

pub use decaf::{XTimesSignYSerializer, XYTimesSignYSerializer};
pub use sign::{XAndSignYSerializer, YAndSignXSerializer};
pub use xy::XYSerializer;

use crate::field::encoding::{ENCODED_LEN, read_unit, write_unit};
use crate::nap::nap_encountered;
use crate::{
    AffinePoint, BitHeader, ByteOrder, CurvePoint, Error, FieldElement, Result, StreamError,
    TrustLevel, Variant,
};
use core::fmt::Debug;
use std::io::{Read, Write};

/// Longest output of any serializer.
const MAX_OUTPUT_LEN: usize = 2 * ENCODED_LEN;

pub(crate) mod sealed {
    use super::*;

    pub trait Sealed {
        /// Encodes the affine coordinates of a point that passed the checks of
        /// [`PointSerializer::serialize_point`]. `out` has exactly
        /// [`PointSerializer::output_length`] bytes.
        fn encode(&self, x: FieldElement, y: FieldElement, out: &mut [u8]) -> Result<()>;

        /// Decodes and validates one unit.
        fn decode<V: Variant>(&self, bytes: &[u8], trust: TrustLevel) -> Result<AffinePoint<V>>;
    }
}

/// A fixed-length point format.
///
/// Implemented by the serializer types of this module only.
pub trait PointSerializer: sealed::Sealed + Copy + Debug + Default + Eq {
    /// Number of bytes of every encoded point.
    fn output_length(&self) -> usize;

    /// Byte order of the encoded coordinates.
    fn byte_order(&self) -> ByteOrder;

    /// Whether only elements of the prime order subgroup are accepted, on
    /// both serialization and deserialization.
    fn is_subgroup_only(&self) -> bool;

    /// Writes `point` and returns the number of bytes written.
    ///
    /// Subgroup types write the coordinates of the element of the prime order
    /// subgroup they stand for.
    ///
    /// # Errors
    /// Nothing is written when:
    /// - the point is a NaP ([`Error::NaP`]), which is also reported to the
    ///   [NaP handler](crate::set_nap_handler);
    /// - the point is at infinity ([`Error::AtInfinity`]);
    /// - the serializer is subgroup-only and the point is outside the prime
    ///   order subgroup ([`Error::NotInSubgroup`]);
    /// - a bit header does not fit next to a coordinate
    ///   ([`Error::PrefixDoesNotFit`]).
    ///
    /// I/O errors report how many bytes made it out.
    fn serialize_point<W: Write + ?Sized, P: CurvePoint>(
        &self,
        writer: &mut W,
        point: &P,
    ) -> core::result::Result<usize, StreamError> {
        let (x, y) = writable_coordinates(point, self.is_subgroup_only())
            .map_err(StreamError::untouched)?;
        let mut buf = [0u8; MAX_OUTPUT_LEN];
        let buf = &mut buf[..self.output_length()];
        self.encode(x, y, buf).map_err(StreamError::untouched)?;
        write_unit(writer, buf)
    }

    /// Reads one encoded point into `point` and returns the number of bytes
    /// read.
    ///
    /// With [`TrustLevel::Untrusted`] the input is fully validated. With
    /// [`TrustLevel::Trusted`] the curve equation is still checked but
    /// subgroup membership is not. `point` is only written on success.
    ///
    /// # Errors
    /// - [`Error::Eof`] if the input is empty, [`Error::UnexpectedEof`] if it
    ///   ends within the unit;
    /// - [`Error::PrefixMismatch`] if a bit header differs;
    /// - [`Error::NonNormalized`] if a coordinate is not below the modulus;
    /// - [`Error::NotOnCurve`], [`Error::NotInSubgroup`],
    ///   [`Error::UnexpectedNegativeZero`], [`Error::WrongSignY`] for
    ///   coordinates that do not describe an acceptable point.
    fn deserialize_point<R: Read + ?Sized, P: CurvePoint>(
        &self,
        reader: &mut R,
        trust: TrustLevel,
        point: &mut P,
    ) -> core::result::Result<usize, StreamError> {
        let len = self.output_length();
        let mut buf = [0u8; MAX_OUTPUT_LEN];
        let buf = &mut buf[..len];
        let read = read_unit(reader, buf)?;

        let decoded = self
            .decode::<P::Variant>(buf, trust)
            .and_then(|decoded| {
                let exact_check = self.is_subgroup_only() && trust == TrustLevel::Untrusted;
                if exact_check && !decoded.to_extended().in_prime_subgroup() {
                    return Err(Error::NotInSubgroup);
                }
                Ok(decoded)
            })
            .map_err(|error| StreamError::new(error, read, len))?;
        *point = P::from_extended(&decoded.to_extended());
        Ok(read)
    }
}

/// The affine coordinates to encode, after the checks every format shares.
fn writable_coordinates<P: CurvePoint>(
    point: &P,
    subgroup_only: bool,
) -> Result<(FieldElement, FieldElement)> {
    let extended = point.to_extended();
    if extended.nap_pattern() {
        nap_encountered("serialization of a NaP", false, &[point]);
        return Err(Error::NaP);
    }
    if extended.infinite() {
        return Err(Error::AtInfinity);
    }
    if subgroup_only && !point.is_in_subgroup() {
        return Err(Error::NotInSubgroup);
    }
    Ok(point.affine_coordinates())
}

/// Encodes one coordinate into 32 bytes of `out`.
fn encode_coordinate(
    value: FieldElement,
    header: BitHeader,
    order: ByteOrder,
    out: &mut [u8],
) -> Result<()> {
    out.copy_from_slice(&value.to_bytes_with_prefix(header, order)?);
    Ok(())
}

/// Decodes one coordinate from 32 bytes. Returns it with the prefix of
/// `prefix_len` bits found in front of it and whether it was canonical.
fn decode_coordinate(
    bytes: &[u8],
    prefix_len: u8,
    order: ByteOrder,
) -> Result<(FieldElement, u8, bool)> {
    let mut unit = [0u8; ENCODED_LEN];
    unit.copy_from_slice(bytes);
    FieldElement::from_bytes_with_prefix(&unit, prefix_len, order)
}

/// Decodes one coordinate preceded by `header`.
fn decode_with_header(bytes: &[u8], header: BitHeader, order: ByteOrder) -> Result<FieldElement> {
    let (value, prefix, canonical) = decode_coordinate(bytes, header.bit_len(), order)?;
    if prefix != header.prefix() {
        return Err(Error::PrefixMismatch);
    }
    if !canonical {
        return Err(Error::NonNormalized);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AffineFullPoint, ExtendedFullPoint, ExtendedSubgroupPoint};
    use std::vec::Vec;

    #[test]
    fn nap_and_infinity_write_nothing() {
        let serializer = XYSerializer::new();
        let mut out = Vec::new();
        assert_eq!(
            serializer.serialize_point(&mut out, &ExtendedFullPoint::NAP),
            Err(StreamError::untouched(Error::NaP))
        );
        assert_eq!(
            serializer.serialize_point(&mut out, &ExtendedFullPoint::E1),
            Err(StreamError::untouched(Error::AtInfinity))
        );
        assert_eq!(
            serializer.serialize_point(&mut out, &AffineFullPoint::NAP),
            Err(StreamError::untouched(Error::NaP))
        );
        assert!(out.is_empty());
    }

    #[test]
    fn subgroup_only_rejects_outside_points() {
        let serializer = XYSerializer::new().with_subgroup_only(true);
        let mut out = Vec::new();
        let shifted = ExtendedFullPoint::GENERATOR + ExtendedFullPoint::A;
        assert_eq!(
            serializer.serialize_point(&mut out, &shifted),
            Err(StreamError::untouched(Error::NotInSubgroup))
        );
        assert!(out.is_empty());

        // The same coordinates are fine for a full curve serializer, but not
        // for untrusted subgroup-only reads.
        XYSerializer::new().serialize_point(&mut out, &shifted).unwrap();
        let mut point = ExtendedFullPoint::NEUTRAL;
        let err = serializer
            .deserialize_point(&mut out.as_slice(), TrustLevel::Untrusted, &mut point)
            .unwrap_err();
        assert_eq!(err, StreamError::new(Error::NotInSubgroup, 64, 64));
        assert!(point.is_neutral());
        serializer
            .deserialize_point(&mut out.as_slice(), TrustLevel::Trusted, &mut point)
            .unwrap();
        assert_eq!(point, shifted);
    }

    #[test]
    fn subgroup_type_writes_representative() {
        let shifted =
            (ExtendedFullPoint::GENERATOR + ExtendedFullPoint::A).cast::<crate::Subgroup>();
        let mut a = Vec::new();
        let mut b = Vec::new();
        XYSerializer::new().serialize_point(&mut a, &shifted).unwrap();
        XYSerializer::new()
            .serialize_point(&mut b, &ExtendedSubgroupPoint::GENERATOR)
            .unwrap();
        assert_eq!(a, b);
    }
}
