use super::{PointSerializer, decode_coordinate, encode_coordinate, sealed};
use crate::field::encoding::ENCODED_LEN;
use crate::{AffinePoint, BitHeader, ByteOrder, Error, FieldElement, Result, TrustLevel, Variant};

/// Packs `header` and a sign bit into one prefix, the sign bit last.
fn prefix_with_sign(header: BitHeader, negative: bool) -> Result<BitHeader> {
    BitHeader::new(
        (header.prefix() << 1) | u8::from(negative),
        header.bit_len() + 1,
    )
}

/// Reads a coordinate preceded by `header` and a sign bit.
fn decode_with_sign(
    bytes: &[u8],
    header: BitHeader,
    order: ByteOrder,
) -> Result<(FieldElement, bool)> {
    let (value, prefix, canonical) = decode_coordinate(bytes, header.bit_len() + 1, order)?;
    if prefix >> 1 != header.prefix() {
        return Err(Error::PrefixMismatch);
    }
    if !canonical {
        return Err(Error::NonNormalized);
    }
    Ok((value, prefix & 1 == 1))
}

fn check_header_len(header: BitHeader) -> BitHeader {
    assert!(
        header.bit_len() <= 7,
        "bit header leaves no room for the sign bit"
    );
    header
}

macro_rules! impl_sign_serializer {
    ($name:ident) => {
        impl $name {
            /// Little-endian, full curve, no header.
            pub const fn new() -> Self {
                Self {
                    byte_order: ByteOrder::LittleEndian,
                    subgroup_only: false,
                    header: BitHeader::NONE,
                }
            }

            /// Sets the byte order.
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

            /// Sets the header written in front of the sign bit.
            ///
            /// # Panics
            /// If the header is 8 bits long, leaving no room for the sign.
            pub fn with_bit_header(self, header: BitHeader) -> Self {
                Self {
                    header: check_header_len(header),
                    ..self
                }
            }

            /// The header written in front of the sign bit.
            pub const fn bit_header(&self) -> BitHeader {
                self.header
            }
        }

        impl PointSerializer for $name {
            fn output_length(&self) -> usize {
                ENCODED_LEN
            }

            fn byte_order(&self) -> ByteOrder {
                self.byte_order
            }

            fn is_subgroup_only(&self) -> bool {
                self.subgroup_only
            }
        }
    };
}

/// Affine `x` with the sign of `y` in the top bit, 32 bytes.
///
/// With a [`BitHeader`], the sign bit follows the header bits. Round trips
/// are exact.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct XAndSignYSerializer {
    byte_order: ByteOrder,
    subgroup_only: bool,
    header: BitHeader,
}

impl_sign_serializer!(XAndSignYSerializer);

impl sealed::Sealed for XAndSignYSerializer {
    fn encode(&self, x: FieldElement, y: FieldElement, out: &mut [u8]) -> Result<()> {
        let header = prefix_with_sign(self.header, y.is_negative())?;
        encode_coordinate(x, header, self.byte_order, out)
    }

    fn decode<V: Variant>(&self, bytes: &[u8], trust: TrustLevel) -> Result<AffinePoint<V>> {
        let (x, y_negative) = decode_with_sign(bytes, self.header, self.byte_order)?;
        AffinePoint::from_x_and_sign_y(x, y_negative, trust)
    }
}

/// Affine `y` with the sign of `x` in the top bit, 32 bytes.
///
/// The sign bit of `x = 0` is never set. With a [`BitHeader`], the sign bit
/// follows the header bits. Round trips are exact.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct YAndSignXSerializer {
    byte_order: ByteOrder,
    subgroup_only: bool,
    header: BitHeader,
}

impl_sign_serializer!(YAndSignXSerializer);

impl sealed::Sealed for YAndSignXSerializer {
    fn encode(&self, x: FieldElement, y: FieldElement, out: &mut [u8]) -> Result<()> {
        let header = prefix_with_sign(self.header, x.is_negative())?;
        encode_coordinate(y, header, self.byte_order, out)
    }

    fn decode<V: Variant>(&self, bytes: &[u8], trust: TrustLevel) -> Result<AffinePoint<V>> {
        let (y, x_negative) = decode_with_sign(bytes, self.header, self.byte_order)?;
        AffinePoint::from_y_and_sign_x(y, x_negative, trust)
    }
}
