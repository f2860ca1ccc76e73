use super::{PointSerializer, decode_with_header, encode_coordinate, sealed};
use crate::field::encoding::ENCODED_LEN;
use crate::{AffinePoint, BitHeader, ByteOrder, FieldElement, Result, TrustLevel, Variant};

/// Affine `x` followed by affine `y`, 64 bytes.
///
/// Each coordinate may carry its own [`BitHeader`]. Round trips are exact.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct XYSerializer {
    byte_order: ByteOrder,
    subgroup_only: bool,
    header_x: BitHeader,
    header_y: BitHeader,
}

impl XYSerializer {
    /// Little-endian, full curve, no headers.
    pub const fn new() -> Self {
        Self {
            byte_order: ByteOrder::LittleEndian,
            subgroup_only: false,
            header_x: BitHeader::NONE,
            header_y: BitHeader::NONE,
        }
    }

    /// Sets the byte order of both coordinates.
    pub const fn with_endianness(self, byte_order: ByteOrder) -> Self {
        Self { byte_order, ..self }
    }

    /// Restricts reading and writing to the prime order subgroup.
    pub const fn with_subgroup_only(self, subgroup_only: bool) -> Self {
        Self {
            subgroup_only,
            ..self
        }
    }

    /// Sets the headers in front of `x` and `y`.
    pub const fn with_bit_headers(self, header_x: BitHeader, header_y: BitHeader) -> Self {
        Self {
            header_x,
            header_y,
            ..self
        }
    }

    /// The headers in front of `x` and `y`.
    pub const fn bit_headers(&self) -> (BitHeader, BitHeader) {
        (self.header_x, self.header_y)
    }
}

impl sealed::Sealed for XYSerializer {
    fn encode(&self, x: FieldElement, y: FieldElement, out: &mut [u8]) -> Result<()> {
        let (out_x, out_y) = out.split_at_mut(ENCODED_LEN);
        encode_coordinate(x, self.header_x, self.byte_order, out_x)?;
        encode_coordinate(y, self.header_y, self.byte_order, out_y)
    }

    fn decode<V: Variant>(&self, bytes: &[u8], trust: TrustLevel) -> Result<AffinePoint<V>> {
        let (bytes_x, bytes_y) = bytes.split_at(ENCODED_LEN);
        let x = decode_with_header(bytes_x, self.header_x, self.byte_order)?;
        let y = decode_with_header(bytes_y, self.header_y, self.byte_order)?;
        AffinePoint::from_affine(x, y, trust)
    }
}

impl PointSerializer for XYSerializer {
    fn output_length(&self) -> usize {
        2 * ENCODED_LEN
    }

    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    fn is_subgroup_only(&self) -> bool {
        self.subgroup_only
    }
}
