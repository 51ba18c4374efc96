//! # Error Types
//!
//! This module defines the error types used throughout the NMEA stream parser.
//!
//! Errors fall into two groups:
//! - Framing errors ([`Error::ChecksumMismatch`], the buffer overflows, ...) are recovered
//!   inside the framer and only reported through the parser's error hook.
//! - Decode errors ([`Error::TooManySatellites`], [`Error::Fail`]) are returned from
//!   [`NmeaParser::process_buffer`](crate::NmeaParser::process_buffer).

/// Represents all possible errors that can occur while framing or decoding NMEA sentences.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The sentence could not be decoded.
    ///
    /// Used for structurally impossible content, such as a GSV sentence numbered `0`.
    #[error("sentence could not be decoded")]
    Fail,

    /// A GSV sentence addresses satellite slots beyond the per-constellation capacity.
    ///
    /// Contains the first global satellite slot that did not fit.
    #[error("too many satellites to store, slot {index} is out of range")]
    TooManySatellites {
        /// The global satellite slot that was rejected
        index: usize,
    },

    /// The checksum of the sentence was corrupt or incorrect.
    ///
    /// Contains both the expected checksum (calculated from the message content)
    /// and the actual checksum found in the message.
    #[error("checksum mismatch, calculated {expected:02X} but received {found:02X}")]
    ChecksumMismatch {
        /// The checksum calculated from the message content
        expected: u8,
        /// The checksum found in the message
        found: u8,
    },

    /// The sentence ended without a `*HH` checksum while one is required.
    #[error("sentence has no checksum")]
    ChecksumMissing,

    /// A checksum character was not a hexadecimal digit.
    #[error("invalid checksum digit {0:#04x}")]
    InvalidChecksumDigit(u8),

    /// The sentence payload did not fit into the receive buffer.
    #[error("receive buffer overflow")]
    ReceiveBufferOverflow,

    /// The sentence tag (talker and sentence ID) did not fit into the command buffer.
    #[error("command buffer overflow")]
    CommandBufferOverflow,

    /// The sentence contains non-ASCII bytes.
    ///
    /// NMEA messages must be ASCII-only for proper parsing and checksum calculation.
    #[error("sentence contains non-ASCII bytes")]
    NonAscii,
}

/// The coarse error taxonomy the parser reports, one value per error family.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Generic failure
    Fail,
    /// Too many satellites for the constellation database
    TooManySatellites,
    /// Checksum missing, malformed or mismatched
    Checksum,
    /// Payload overflow
    ReceiveBufferOverflow,
    /// Tag overflow
    CommandBufferOverflow,
}

impl Error {
    /// Returns the taxonomy bucket of this error.
    ///
    /// ```rust
    /// use nmea0183_stream::{Error, ErrorKind};
    ///
    /// let error = Error::ChecksumMismatch { expected: 0x5B, found: 0x5C };
    /// assert_eq!(error.kind(), ErrorKind::Checksum);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Fail | Error::NonAscii => ErrorKind::Fail,
            Error::TooManySatellites { .. } => ErrorKind::TooManySatellites,
            Error::ChecksumMismatch { .. }
            | Error::ChecksumMissing
            | Error::InvalidChecksumDigit(_) => ErrorKind::Checksum,
            Error::ReceiveBufferOverflow => ErrorKind::ReceiveBufferOverflow,
            Error::CommandBufferOverflow => ErrorKind::CommandBufferOverflow,
        }
    }

    /// Returns `true` for errors the framer recovers from on its own.
    ///
    /// Framing errors never surface from
    /// [`NmeaParser::process_buffer`](crate::NmeaParser::process_buffer); they are only
    /// passed to the error hook.
    pub fn is_framing(&self) -> bool {
        !matches!(self, Error::Fail | Error::TooManySatellites { .. })
    }
}
