//! # NMEA 0183 Content
//!
//! Typed decoding of the sentence payloads handed over by the framer.
//!
//! Each supported sentence kind has a decoder implementing [`SentenceDecoder`]. A decoder
//! owns exactly one record, overwrites it on every successful decode and hands out
//! references to it. Decoders are independent of each other; the only cross-sentence
//! coupling (GGA resetting the GSA accumulation) is driven from the outside, see
//! [`GsaDecoder::notify_companion_gga`].

pub mod parse;
mod sentences;

pub use sentences::*;

use nom::Parser;

use crate::{Error, FieldValue, IResult};

/// Maximum number of satellites stored per constellation.
///
/// This is a storage limit, not the real size of any constellation.
pub const MAX_CONSTELLATION: usize = 64;

/// Maximum number of satellite PRNs carried by a single GSA sentence.
pub const MAX_GSA_SATS: usize = 12;

/// PRN used for empty or absent satellite slots.
pub const INVALID_PRN: u16 = 0;

/// Common interface of the per-sentence decoders.
pub trait SentenceDecoder {
    /// The record this decoder maintains.
    type Record: Clone + Default;

    /// Decodes `payload` (the fields following the tag) into the record.
    ///
    /// On error the record keeps its previous contents.
    fn decode(&mut self, payload: &str) -> Result<(), Error>;

    /// Clears the record and all cross-sentence state back to defaults.
    fn reset(&mut self);

    /// The current record.
    fn record(&self) -> &Self::Record;

    /// Number of sentences decoded successfully since construction or the last reset.
    fn rx_count(&self) -> u32;
}

/// Talker identifier, the first two characters of a sentence tag.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Talker {
    /// GP - GPS
    Gps,
    /// GL - GLONASS
    Glonass,
    /// GA - Galileo
    Galileo,
    /// BD or GB - BeiDou
    Beidou,
    /// QZ - QZSS
    Qzss,
    /// GN - mixed GNSS solution
    Gnss,
}

impl Talker {
    /// Looks up a talker by its two character identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "GP" => Some(Talker::Gps),
            "GL" => Some(Talker::Glonass),
            "GA" => Some(Talker::Galileo),
            "BD" | "GB" => Some(Talker::Beidou),
            "QZ" => Some(Talker::Qzss),
            "GN" => Some(Talker::Gnss),
            _ => None,
        }
    }

    /// The canonical identifier of this talker.
    pub fn id(&self) -> &'static str {
        match self {
            Talker::Gps => "GP",
            Talker::Glonass => "GL",
            Talker::Galileo => "GA",
            Talker::Beidou => "BD",
            Talker::Qzss => "QZ",
            Talker::Gnss => "GN",
        }
    }
}

/// The sentence formatter, the part of the tag after the talker.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceKind {
    /// GGA - Global Positioning System Fix Data
    Gga,
    /// RMC - Recommended Minimum Navigation Information
    Rmc,
    /// GSA - GNSS DOP and Active Satellites
    Gsa,
    /// GSV - Satellites in View
    Gsv,
}

impl SentenceKind {
    /// Looks up a sentence kind by its three character formatter.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "GGA" => Some(SentenceKind::Gga),
            "RMC" => Some(SentenceKind::Rmc),
            "GSA" => Some(SentenceKind::Gsa),
            "GSV" => Some(SentenceKind::Gsv),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            SentenceKind::Gga => "GGA",
            SentenceKind::Rmc => "RMC",
            SentenceKind::Gsa => "GSA",
            SentenceKind::Gsv => "GSV",
        }
    }
}

/// A parsed sentence tag such as `GPGGA`.
///
/// ```rust
/// use nmea0183_stream::nmea_content::{SentenceKind, SentenceTag, Talker};
///
/// let tag = SentenceTag::parse("GBGSV").unwrap();
/// assert_eq!(tag.talker, Talker::Beidou);
/// assert_eq!(tag.kind, SentenceKind::Gsv);
/// assert_eq!(tag.to_string(), "BDGSV");
///
/// assert_eq!(SentenceTag::parse("GPZDA"), None);
/// assert_eq!(SentenceTag::parse("GPGGAX"), None);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SentenceTag {
    pub talker: Talker,
    pub kind: SentenceKind,
}

impl SentenceTag {
    pub fn new(talker: Talker, kind: SentenceKind) -> Self {
        Self { talker, kind }
    }

    /// Splits a tag into talker and sentence kind, [`None`] if either is unknown.
    pub fn parse(tag: &str) -> Option<Self> {
        let (talker, kind) = tag.split_at_checked(2)?;

        Some(Self {
            talker: Talker::from_id(talker)?,
            kind: SentenceKind::from_id(kind)?,
        })
    }
}

impl core::fmt::Display for SentenceTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.talker.id(), self.kind.id())
    }
}

macro_rules! parsable_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// The single character code of this value.
            pub fn code(&self) -> char {
                match self {
                    $(Self::$variant => $char,)*
                }
            }
        }

        impl FieldValue for $name {
            fn parse_field(i: &str) -> IResult<'_, Self> {
                nom::branch::alt(($(
                    nom::character::complete::char($char).map(|_| Self::$variant),
                )*)).parse(i)
            }
        }
    };
}

parsable_enum! {
    /// Quality of the position fix, as reported by GGA
    ///
    /// Unknown codes decode as [`FixQuality::FixNotAvailable`].
    pub enum FixQuality {
        /// 0 - Fix not available
        #[default]
        '0' => FixNotAvailable,
        /// 1 - GPS SPS fix
        '1' => GpsSps,
        /// 2 - Differential GPS SPS fix
        '2' => DifferentialGpsSps,
        /// 3 - GPS PPS fix
        '3' => GpsPps,
        /// 4 - Real Time Kinematic
        '4' => RealTimeKinematic,
        /// 5 - Float RTK
        '5' => FloatRtk,
        /// 6 - Estimated (dead reckoning)
        '6' => EstimatedDeadReckoning,
        /// 7 - Manual input mode
        '7' => ManualInput,
        /// 8 - Simulation mode
        '8' => Simulator,
    }
}

parsable_enum! {
    /// Selection Mode, as reported by GSA
    pub enum SelectionMode {
        /// A - Automatic, 2D/3D
        'A' => Auto,
        /// M - Manual, forced to operate in 2D or 3D
        #[default]
        'M' => Manual,
    }
}

parsable_enum! {
    /// Fix Mode, as reported by GSA
    pub enum FixMode {
        /// 1 - Fix not available
        #[default]
        '1' => NotAvailable,
        /// 2 - 2D Fix
        '2' => Fix2D,
        /// 3 - 3D Fix
        '3' => Fix3D,
    }
}

parsable_enum! {
    /// Status, as reported by RMC
    pub enum Status {
        /// A - Active, data valid
        'A' => Active,
        /// V - Void, navigation receiver warning
        #[default]
        'V' => Void,
    }
}
