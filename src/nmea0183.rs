//! # NMEA 0183 Sentence Framer
//!
//! This module turns a raw byte stream into complete NMEA 0183 sentences of the form
//! `$HHH,D1,D2,...,Dn*CC\r\n` (or the same without `*CC`, terminated by `\r`).
//!
//! The framer is a five state machine fed one byte at a time:
//!
//! ```text
//!  SeekStart --'$'--> ReadTag --','--> ReadPayload --'*'--> ReadChecksumHi
//!      ^                  |                 |                  ^   |
//!      |                  +------'*'--------|------------------+   |
//!      |                                  '\r'             ReadChecksumLo
//!      |                                    |                      |
//!      +------------- dispatch / error -----+----------------------+
//! ```
//!
//! Both tag delimiters count towards the checksum. A tag ended by `*` has an empty payload.
//!
//! Because all state lives in [`PacketFramer`], input can be split at arbitrary
//! positions across calls. Bytes outside of a sentence are skipped.

use heapless::Vec;

use crate::Error;

/// Maximum number of bytes in a sentence tag (talker ID and sentence ID).
///
/// A tag reaching this length is reported as [`Error::CommandBufferOverflow`].
pub const MAX_TAG_LEN: usize = 32;

/// Maximum number of bytes in a sentence payload.
///
/// A payload reaching this length is reported as [`Error::ReceiveBufferOverflow`].
pub const MAX_PAYLOAD_LEN: usize = 256;

/// Defines how the framer should handle NMEA message checksums.
///
/// NMEA 0183 messages can include an optional checksum in the format `*CC` where
/// CC is a two-digit hexadecimal value representing the XOR of all bytes in the
/// message content (excluding the '$' prefix and '*' delimiter).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumMode {
    /// Checksum is required and must be present.
    ///
    /// A sentence terminated by `\r` without a `*CC` checksum is dropped and
    /// reported as [`Error::ChecksumMissing`].
    Required,

    /// Checksum is optional but will be validated if present.
    ///
    /// The framer will accept messages both with and without checksums:
    /// - If no checksum is present (`*CC` missing), the sentence ends at `\r`
    /// - If a checksum is present, it must be valid or the sentence is dropped
    #[default]
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Search for start of message '$'
    SeekStart,
    ReadTag,
    ReadPayload,
    ReadChecksumHi,
    ReadChecksumLo,
}

/// A complete sentence, borrowed from the framer's buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSentence<'a> {
    /// Talker and sentence ID, e.g. `GPGGA`
    pub tag: &'a str,
    /// Comma separated fields following the tag, without the checksum
    pub payload: &'a str,
    /// The received checksum, [`None`] if the sentence had none
    pub checksum: Option<u8>,
}

/// Something the framer noticed while consuming a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramerEvent<'a> {
    /// A `$` was seen and a new sentence begins.
    StartOfSentence,
    /// A sentence was completed and passed validation.
    Sentence(RawSentence<'a>),
    /// A sentence was dropped. `tag` holds whatever part of the tag was received.
    Error {
        /// What went wrong
        error: Error,
        /// The (possibly incomplete or empty) tag of the dropped sentence
        tag: &'a str,
    },
}

/// Byte-stream state machine extracting `(tag, payload)` pairs.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::{ChecksumMode, FramerEvent, PacketFramer};
///
/// let mut framer = PacketFramer::new(ChecksumMode::Optional);
/// let mut tags = Vec::new();
///
/// for &byte in b"noise$GPGSA,A,3,06,25,12,19,05,24,02,29,,,,,1.79,0.94,1.52*06\r\n" {
///     if let Some(FramerEvent::Sentence(sentence)) = framer.push(byte) {
///         tags.push(sentence.tag.to_string());
///     }
/// }
///
/// assert_eq!(tags, ["GPGSA"]);
/// ```
#[derive(Debug, Clone)]
pub struct PacketFramer {
    mode: ChecksumMode,
    state: State,
    checksum: u8,
    received_checksum: u8,
    tag: Vec<u8, MAX_TAG_LEN>,
    payload: Vec<u8, MAX_PAYLOAD_LEN>,
}

impl Default for PacketFramer {
    fn default() -> Self {
        Self::new(ChecksumMode::default())
    }
}

impl PacketFramer {
    pub fn new(mode: ChecksumMode) -> Self {
        Self {
            mode,
            state: State::SeekStart,
            checksum: 0,
            received_checksum: 0,
            tag: Vec::new(),
            payload: Vec::new(),
        }
    }

    pub fn checksum_mode(&self) -> ChecksumMode {
        self.mode
    }

    /// Returns `true` while the framer is between sentences.
    pub fn is_idle(&self) -> bool {
        self.state == State::SeekStart
    }

    /// Drops any partially received sentence and starts looking for `$` again.
    pub fn reset(&mut self) {
        self.state = State::SeekStart;
        self.checksum = 0;
        self.received_checksum = 0;
        self.tag.clear();
        self.payload.clear();
    }

    /// Consumes one byte of input.
    pub fn push(&mut self, byte: u8) -> Option<FramerEvent<'_>> {
        match self.state {
            State::SeekStart => {
                if byte != b'$' {
                    return None;
                }

                self.checksum = 0;
                self.received_checksum = 0;
                self.tag.clear();
                self.payload.clear();
                self.state = State::ReadTag;
                Some(FramerEvent::StartOfSentence)
            }
            State::ReadTag => {
                self.checksum ^= byte;

                match byte {
                    b',' => {
                        self.state = State::ReadPayload;
                        return None;
                    }
                    // No payload, the checksum follows right away
                    b'*' => {
                        self.state = State::ReadChecksumHi;
                        return None;
                    }
                    _ => {}
                }

                if self.tag.push(byte).is_err() || self.tag.is_full() {
                    return Some(self.fail(Error::CommandBufferOverflow));
                }
                None
            }
            State::ReadPayload => match byte {
                b'*' => {
                    self.state = State::ReadChecksumHi;
                    None
                }
                b'\r' => match self.mode {
                    ChecksumMode::Optional => Some(self.complete(None)),
                    ChecksumMode::Required => Some(self.fail(Error::ChecksumMissing)),
                },
                _ => {
                    self.checksum ^= byte;
                    if self.payload.push(byte).is_err() || self.payload.is_full() {
                        return Some(self.fail(Error::ReceiveBufferOverflow));
                    }
                    None
                }
            },
            State::ReadChecksumHi => match hex_nibble(byte) {
                Some(nibble) => {
                    self.received_checksum = nibble << 4;
                    self.state = State::ReadChecksumLo;
                    None
                }
                None => Some(self.fail(Error::InvalidChecksumDigit(byte))),
            },
            State::ReadChecksumLo => match hex_nibble(byte) {
                Some(nibble) => {
                    self.received_checksum |= nibble;

                    if self.received_checksum == self.checksum {
                        Some(self.complete(Some(self.received_checksum)))
                    } else {
                        let error = Error::ChecksumMismatch {
                            expected: self.checksum,
                            found: self.received_checksum,
                        };
                        Some(self.fail(error))
                    }
                }
                None => Some(self.fail(Error::InvalidChecksumDigit(byte))),
            },
        }
    }

    fn complete(&mut self, checksum: Option<u8>) -> FramerEvent<'_> {
        self.state = State::SeekStart;

        match (str_of(&self.tag), str_of(&self.payload)) {
            (Some(tag), Some(payload)) => FramerEvent::Sentence(RawSentence {
                tag,
                payload,
                checksum,
            }),
            (tag, _) => FramerEvent::Error {
                error: Error::NonAscii,
                tag: tag.unwrap_or_default(),
            },
        }
    }

    fn fail(&mut self, error: Error) -> FramerEvent<'_> {
        self.state = State::SeekStart;

        FramerEvent::Error {
            error,
            tag: str_of(&self.tag).unwrap_or_default(),
        }
    }
}

fn str_of(bytes: &[u8]) -> Option<&str> {
    if bytes.is_ascii() {
        core::str::from_utf8(bytes).ok()
    } else {
        None
    }
}

fn hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

/// Calculates the NMEA 0183 checksum for the given message content.
///
/// The NMEA 0183 checksum is calculated by performing an XOR (exclusive OR) operation
/// on all bytes in the message content. This includes everything between the '$' prefix
/// and the '*' checksum delimiter, but excludes both the '$' and '*' characters themselves.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::checksum;
///
/// assert_eq!(checksum("GPGGA,123456,data"), 0x41);
/// ```
pub fn checksum<I>(input: I) -> u8
where
    I: AsRef<[u8]>,
{
    input
        .as_ref()
        .iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}

/// Formats a checksum value as a two-digit uppercase hexadecimal string.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::format_checksum;
///
/// assert_eq!(format_checksum(0x41), "41");
/// assert_eq!(format_checksum(0x0A), "0A");
/// ```
pub fn format_checksum(checksum: u8) -> String {
    format!("{checksum:02X}")
}
