//! # NMEA 0183 Stream Parser
//!
//! This library turns the raw output of a GPS/GNSS receiver into typed records. Input is
//! a byte stream of sentences with the format:
//! `$HHHHH,D1,D2,...,Dn*CC\r\n` (the `*CC` checksum is optional)
//!
//! The stream may be fed in fragments of any size; a sentence split across two reads is
//! reassembled by the [`PacketFramer`]. Complete sentences are routed by tag to one of the
//! [sentence decoders](nmea_content), which keep the latest record per talker:
//!
//! | Sentence | Record                                                  |
//! |----------|---------------------------------------------------------|
//! | GGA      | [`PositionFix`](nmea_content::PositionFix)              |
//! | RMC      | [`RouteRecommendation`](nmea_content::RouteRecommendation) |
//! | GSA      | [`DopAndActiveSatellites`](nmea_content::DopAndActiveSatellites) |
//! | GSV      | [`SatelliteVisibility`](nmea_content::SatelliteVisibility) |
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_stream::{NmeaParser, nmea_content::Talker};
//!
//! let parser = NmeaParser::new();
//! parser.on_error(|error, tag| eprintln!("dropped {tag}: {error}"));
//!
//! // A sentence split over two reads
//! parser.process_buffer(b"$GPGSA,A,3,06,25,12,19,05,24,").unwrap();
//! parser.process_buffer(b"02,29,,,,,1.79,0.94,1.52*06\r\n").unwrap();
//!
//! let gsa = parser.gsa(Talker::Gps).unwrap();
//! assert_eq!(gsa.active_prns().count(), 8);
//! assert_eq!(gsa.hdop, 0.94);
//! ```
//!
//! ## Feature flags
//!
//! - `time` (default): conversions of record timestamps into `time` crate types
//! - `serde`: `Serialize`/`Deserialize` for records, errors and configuration

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
mod nmea0183;
pub mod nmea_content;
mod nmea_parser;
mod parse;
pub mod parsing;
pub mod registry;

pub use error::{Error, ErrorKind};
pub use nmea_parser::{NmeaParser, ParserConfig};
pub use nmea0183::*;
pub use parse::{FieldValue, IResult, with_take};
pub use registry::{Dispatch, SentenceRegistry};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
