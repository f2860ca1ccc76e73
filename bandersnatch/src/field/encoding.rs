//! Byte encodings of field elements, with optional bit prefixes packed into
//! the unused top bits of the most significant byte.

use super::{FieldElement, limbs};
use crate::{Error, Result};

#[cfg(feature = "std")]
use crate::StreamError;
#[cfg(feature = "std")]
use std::io::{self, Read, Write};

/// Length in bytes of an encoded field element.
pub(crate) const ENCODED_LEN: usize = 32;

/// Byte order of an encoded field element.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ByteOrder {
    /// Most significant byte first.
    BigEndian,
    /// Least significant byte first.
    #[default]
    LittleEndian,
}

impl ByteOrder {
    /// Index of the most significant byte in a 32-byte encoding.
    const fn msb_index(self) -> usize {
        match self {
            ByteOrder::BigEndian => 0,
            ByteOrder::LittleEndian => ENCODED_LEN - 1,
        }
    }
}

/// Up to 8 bits stored in the top bits of the most significant byte of an
/// encoded field element.
///
/// The modulus has 255 bits, so one prefix bit always fits. Longer prefixes
/// only fit next to values that leave enough top bits clear.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct BitHeader {
    prefix: u8,
    bit_len: u8,
}

impl BitHeader {
    /// The empty header.
    pub const NONE: Self = Self {
        prefix: 0,
        bit_len: 0,
    };

    /// Creates a header of `bit_len` bits holding `prefix`.
    ///
    /// Fails with [`Error::PrefixDoesNotFit`] unless `bit_len <= 8` and
    /// `prefix < 2^bit_len`.
    pub const fn new(prefix: u8, bit_len: u8) -> Result<Self> {
        if bit_len > 8 || (bit_len < 8 && prefix >> bit_len != 0) {
            return Err(Error::PrefixDoesNotFit);
        }
        Ok(Self { prefix, bit_len })
    }

    /// The prefix bits, right-aligned.
    pub const fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Number of prefix bits.
    pub const fn bit_len(&self) -> u8 {
        self.bit_len
    }

    /// Mask selecting the header bits within the most significant byte.
    const fn mask(bit_len: u8) -> u8 {
        match bit_len {
            0 => 0,
            8.. => u8::MAX,
            n => !(u8::MAX >> n),
        }
    }
}

impl FieldElement {
    /// Encodes the canonical integer in the given byte order.
    pub fn to_bytes_ordered(&self, order: ByteOrder) -> [u8; 32] {
        let mut bytes = self.to_bytes();
        if order == ByteOrder::BigEndian {
            bytes.reverse();
        }
        bytes
    }

    /// Encodes the canonical integer with `header` packed into its top bits.
    ///
    /// Fails with [`Error::PrefixDoesNotFit`] if the value itself uses any of
    /// the bits the header needs.
    pub fn to_bytes_with_prefix(&self, header: BitHeader, order: ByteOrder) -> Result<[u8; 32]> {
        let mut bytes = self.to_bytes_ordered(order);
        if header.bit_len == 0 {
            return Ok(bytes);
        }

        let msb = &mut bytes[order.msb_index()];
        if *msb & BitHeader::mask(header.bit_len) != 0 {
            return Err(Error::PrefixDoesNotFit);
        }
        // A shift by 8 would overflow; an 8-bit prefix is the whole byte.
        *msb |= match header.bit_len {
            8 => header.prefix,
            n => header.prefix << (8 - n),
        };
        Ok(bytes)
    }

    /// Decodes 32 bytes whose top `prefix_len` bits hold a prefix.
    ///
    /// Returns the field element, the prefix, and whether the remaining
    /// integer was already below the modulus. Non-canonical integers are
    /// reduced rather than rejected.
    pub fn from_bytes_with_prefix(
        bytes: &[u8; 32],
        prefix_len: u8,
        order: ByteOrder,
    ) -> Result<(Self, u8, bool)> {
        if prefix_len > 8 {
            return Err(Error::PrefixDoesNotFit);
        }

        let mut bytes = *bytes;
        let msb = &mut bytes[order.msb_index()];
        let prefix = match prefix_len {
            0 => 0,
            n => *msb >> (8 - n),
        };
        *msb &= !BitHeader::mask(prefix_len);

        if order == ByteOrder::BigEndian {
            bytes.reverse();
        }
        let mut words = [0u64; 4];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *word = u64::from_le_bytes(buf);
        }

        let (reduced, canonical) = limbs::reduce_integer(&words);
        Ok((Self(limbs::to_montgomery(&reduced)), prefix, canonical))
    }
}

// ------------------------------------------------------------------------
// Streams
// ------------------------------------------------------------------------

/// Reads exactly `buf.len()` bytes as one unit.
///
/// Running out of input before the first byte is [`Error::Eof`], anywhere
/// after it [`Error::UnexpectedEof`].
#[cfg(feature = "std")]
pub(crate) fn read_unit<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
) -> core::result::Result<usize, StreamError> {
    let mut read = 0;
    while read < buf.len() {
        match reader.read(&mut buf[read..]) {
            Ok(0) => {
                let error = if read == 0 {
                    Error::Eof
                } else {
                    Error::UnexpectedEof
                };
                return Err(StreamError::new(error, read, buf.len()));
            }
            Ok(n) => read += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(StreamError::new(err.into(), read, buf.len())),
        }
    }
    Ok(read)
}

/// Writes all of `buf`, reporting how much made it out on failure.
#[cfg(feature = "std")]
pub(crate) fn write_unit<W: Write + ?Sized>(
    writer: &mut W,
    buf: &[u8],
) -> core::result::Result<usize, StreamError> {
    let mut written = 0;
    while written < buf.len() {
        match writer.write(&buf[written..]) {
            Ok(0) => {
                let error = Error::Io(io::ErrorKind::WriteZero);
                return Err(StreamError::new(error, written, buf.len()));
            }
            Ok(n) => written += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(StreamError::new(err.into(), written, buf.len())),
        }
    }
    Ok(written)
}

#[cfg(feature = "std")]
impl FieldElement {
    /// Writes the 32-byte encoding of `self`.
    pub fn serialize<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        order: ByteOrder,
    ) -> core::result::Result<usize, StreamError> {
        write_unit(writer, &self.to_bytes_ordered(order))
    }

    /// Writes the 32-byte encoding of `self` with `header` in its top bits.
    ///
    /// Nothing is written if the header does not fit.
    pub fn serialize_with_prefix<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        header: BitHeader,
        order: ByteOrder,
    ) -> core::result::Result<usize, StreamError> {
        let bytes = self
            .to_bytes_with_prefix(header, order)
            .map_err(StreamError::untouched)?;
        write_unit(writer, &bytes)
    }

    /// Reads a 32-byte encoding into `self`.
    ///
    /// A non-canonical input is reduced and stored before
    /// [`Error::NonNormalized`] is reported.
    pub fn deserialize<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        order: ByteOrder,
    ) -> core::result::Result<usize, StreamError> {
        self.deserialize_with_prefix(reader, BitHeader::NONE, order)
    }

    /// Reads a 32-byte encoding into `self`, expecting `header` in its top
    /// bits.
    ///
    /// The value is stored even if the prefix differs, in which case
    /// [`Error::PrefixMismatch`] is reported. A mismatch takes precedence over
    /// [`Error::NonNormalized`].
    pub fn deserialize_with_prefix<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        header: BitHeader,
        order: ByteOrder,
    ) -> core::result::Result<usize, StreamError> {
        let (read, prefix, canonical) = self.read_with_prefix(reader, header.bit_len, order)?;
        if prefix != header.prefix {
            return Err(StreamError::new(Error::PrefixMismatch, read, ENCODED_LEN));
        }
        if !canonical {
            return Err(StreamError::new(Error::NonNormalized, read, ENCODED_LEN));
        }
        Ok(read)
    }

    /// Reads a 32-byte encoding into `self` and returns the `prefix_len`-bit
    /// prefix found in its top bits along with the number of bytes read.
    ///
    /// A non-canonical input is stored and reported as
    /// [`Error::NonNormalized`]; use [`from_bytes_with_prefix`] on the raw
    /// bytes when the prefix of such an input is still needed.
    ///
    /// [`from_bytes_with_prefix`]: Self::from_bytes_with_prefix
    pub fn deserialize_and_get_prefix<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        prefix_len: u8,
        order: ByteOrder,
    ) -> core::result::Result<(usize, u8), StreamError> {
        let (read, prefix, canonical) = self.read_with_prefix(reader, prefix_len, order)?;
        if !canonical {
            return Err(StreamError::new(Error::NonNormalized, read, ENCODED_LEN));
        }
        Ok((read, prefix))
    }

    fn read_with_prefix<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        prefix_len: u8,
        order: ByteOrder,
    ) -> core::result::Result<(usize, u8, bool), StreamError> {
        if prefix_len > 8 {
            return Err(StreamError::untouched(Error::PrefixDoesNotFit));
        }
        let mut bytes = [0u8; ENCODED_LEN];
        let read = read_unit(reader, &mut bytes)?;
        let (value, prefix, canonical) = Self::from_bytes_with_prefix(&bytes, prefix_len, order)
            .map_err(|error| StreamError::new(error, read, ENCODED_LEN))?;
        *self = value;
        Ok((read, prefix, canonical))
    }
}
