//! Error types.

use core::fmt::{self, Display};

/// Errors raised while decoding field elements or curve points, or while
/// moving them through a byte stream.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A field element was read whose integer value is not below the modulus.
    ///
    /// This is advisory: the reduced value has been stored regardless.
    NonNormalized,

    /// A bit prefix does not fit next to the encoded value, or a prefix
    /// length above 8 bits was requested.
    PrefixDoesNotFit,

    /// The bit prefix read from the input differs from the expected one.
    PrefixMismatch,

    /// The coordinates do not describe a point on the curve.
    NotOnCurve,

    /// The point is on the curve but outside the required subgroup.
    NotInSubgroup,

    /// The point is a NaP ("not a point").
    NaP,

    /// The point is at infinity, which the target cannot represent.
    AtInfinity,

    /// A sign bit was set on a coordinate whose only valid sign is positive.
    UnexpectedNegativeZero,

    /// A decaf-style `y·sign(y)` coordinate was negative.
    WrongSignY,

    /// The input ended cleanly before the first byte of a unit.
    Eof,

    /// The input ended in the middle of a unit.
    UnexpectedEof,

    /// Any other I/O failure reported by the underlying stream.
    #[cfg(feature = "std")]
    Io(std::io::ErrorKind),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NonNormalized => f.write_str("field element was not fully reduced"),
            Error::PrefixDoesNotFit => f.write_str("bit prefix does not fit"),
            Error::PrefixMismatch => f.write_str("unexpected bit prefix"),
            Error::NotOnCurve => f.write_str("point is not on the curve"),
            Error::NotInSubgroup => f.write_str("point is not in the prime order subgroup"),
            Error::NaP => f.write_str("not a point"),
            Error::AtInfinity => f.write_str("point is at infinity"),
            Error::UnexpectedNegativeZero => f.write_str("sign bit set on a zero coordinate"),
            Error::WrongSignY => f.write_str("y coordinate of decaf encoding is negative"),
            Error::Eof => f.write_str("end of input"),
            Error::UnexpectedEof => f.write_str("unexpected end of input"),
            #[cfg(feature = "std")]
            Error::Io(kind) => write!(f, "i/o error: {kind}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
            kind => Error::Io(kind),
        }
    }
}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error returned by stream (de)serialization, carrying how far the
/// operation got before it failed.
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StreamError {
    /// What went wrong.
    pub error: Error,

    /// Number of bytes read or written before the error.
    pub bytes: usize,

    /// Whether a unit was only partially read or written.
    pub partial: bool,
}

#[cfg(feature = "std")]
impl StreamError {
    /// Error raised after `bytes` of a unit of `len` bytes were processed.
    pub fn new(error: Error, bytes: usize, len: usize) -> Self {
        Self {
            error,
            bytes,
            partial: bytes != 0 && bytes != len,
        }
    }

    /// Error that did not touch the stream at all.
    pub fn untouched(error: Error) -> Self {
        Self {
            error,
            bytes: 0,
            partial: false,
        }
    }
}

#[cfg(feature = "std")]
impl Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} after {} bytes", self.error, self.bytes)?;
        if self.partial {
            f.write_str(" (partial)")?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(feature = "std")]
impl From<StreamError> for Error {
    fn from(err: StreamError) -> Self {
        err.error
    }
}
