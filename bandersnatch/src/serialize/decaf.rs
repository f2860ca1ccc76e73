use super::{PointSerializer, decode_with_header, encode_coordinate, sealed};
use crate::field::encoding::ENCODED_LEN;
use crate::{AffinePoint, BitHeader, ByteOrder, FieldElement, Result, TrustLevel, Variant};

/// Decaf coordinates of the point with affine `(x, y)`.
fn decaf(x: FieldElement, y: FieldElement) -> (FieldElement, FieldElement) {
    if y.is_negative() { (-x, -y) } else { (x, y) }
}

fn require_subgroup_only(subgroup_only: bool) {
    assert!(subgroup_only, "decaf serializers only support the prime order subgroup");
}

/// `x·sign(y)`, 32 bytes.
///
/// A point and its shift by `A` share the encoding; reading always yields the
/// element of the prime order subgroup. Always subgroup-only.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct XTimesSignYSerializer {
    byte_order: ByteOrder,
    header: BitHeader,
}

impl Default for XTimesSignYSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl XTimesSignYSerializer {
    /// Little-endian, no header.
    pub const fn new() -> Self {
        Self {
            byte_order: ByteOrder::LittleEndian,
            header: BitHeader::NONE,
        }
    }

    /// Sets the byte order.
    pub const fn with_endianness(self, byte_order: ByteOrder) -> Self {
        Self { byte_order, ..self }
    }

    /// Accepts only `true`, for symmetry with the other serializers.
    ///
    /// # Panics
    /// If `subgroup_only` is `false`.
    pub fn with_subgroup_only(self, subgroup_only: bool) -> Self {
        require_subgroup_only(subgroup_only);
        self
    }

    /// Sets the header in front of the coordinate.
    pub const fn with_bit_header(self, header: BitHeader) -> Self {
        Self { header, ..self }
    }

    /// The header in front of the coordinate.
    pub const fn bit_header(&self) -> BitHeader {
        self.header
    }
}

impl sealed::Sealed for XTimesSignYSerializer {
    fn encode(&self, x: FieldElement, y: FieldElement, out: &mut [u8]) -> Result<()> {
        let (x, _) = decaf(x, y);
        encode_coordinate(x, self.header, self.byte_order, out)
    }

    fn decode<V: Variant>(&self, bytes: &[u8], trust: TrustLevel) -> Result<AffinePoint<V>> {
        let x = decode_with_header(bytes, self.header, self.byte_order)?;
        AffinePoint::from_decaf_x(x, trust)
    }
}

impl PointSerializer for XTimesSignYSerializer {
    fn output_length(&self) -> usize {
        ENCODED_LEN
    }

    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    fn is_subgroup_only(&self) -> bool {
        true
    }
}

/// `x·sign(y)` followed by `y·sign(y)`, 64 bytes.
///
/// A point and its shift by `A` share the encoding; reading always yields the
/// element of the prime order subgroup. Always subgroup-only.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct XYTimesSignYSerializer {
    byte_order: ByteOrder,
    header_x: BitHeader,
    header_y: BitHeader,
}

impl Default for XYTimesSignYSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl XYTimesSignYSerializer {
    /// Little-endian, no headers.
    pub const fn new() -> Self {
        Self {
            byte_order: ByteOrder::LittleEndian,
            header_x: BitHeader::NONE,
            header_y: BitHeader::NONE,
        }
    }

    /// Sets the byte order of both coordinates.
    pub const fn with_endianness(self, byte_order: ByteOrder) -> Self {
        Self { byte_order, ..self }
    }

    /// Accepts only `true`, for symmetry with the other serializers.
    ///
    /// # Panics
    /// If `subgroup_only` is `false`.
    pub fn with_subgroup_only(self, subgroup_only: bool) -> Self {
        require_subgroup_only(subgroup_only);
        self
    }

    /// Sets the headers in front of `x·sign(y)` and `y·sign(y)`.
    pub const fn with_bit_headers(self, header_x: BitHeader, header_y: BitHeader) -> Self {
        Self {
            header_x,
            header_y,
            ..self
        }
    }

    /// The headers in front of `x·sign(y)` and `y·sign(y)`.
    pub const fn bit_headers(&self) -> (BitHeader, BitHeader) {
        (self.header_x, self.header_y)
    }
}

impl sealed::Sealed for XYTimesSignYSerializer {
    fn encode(&self, x: FieldElement, y: FieldElement, out: &mut [u8]) -> Result<()> {
        let (x, y) = decaf(x, y);
        let (out_x, out_y) = out.split_at_mut(ENCODED_LEN);
        encode_coordinate(x, self.header_x, self.byte_order, out_x)?;
        encode_coordinate(y, self.header_y, self.byte_order, out_y)
    }

    fn decode<V: Variant>(&self, bytes: &[u8], trust: TrustLevel) -> Result<AffinePoint<V>> {
        let (bytes_x, bytes_y) = bytes.split_at(ENCODED_LEN);
        let x = decode_with_header(bytes_x, self.header_x, self.byte_order)?;
        let y = decode_with_header(bytes_y, self.header_y, self.byte_order)?;
        AffinePoint::from_decaf_xy(x, y, trust)
    }
}

impl PointSerializer for XYTimesSignYSerializer {
    fn output_length(&self) -> usize {
        2 * ENCODED_LEN
    }

    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    fn is_subgroup_only(&self) -> bool {
        true
    }
}
