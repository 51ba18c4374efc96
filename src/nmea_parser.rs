//! # NMEA Parser
//!
//! The thread-safe entry point tying the framer and the sentence registry together.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, warn};

use crate::{
    ChecksumMode, Error, FramerEvent, PacketFramer,
    nmea_content::{
        DopAndActiveSatellites, PositionFix, RouteRecommendation, SatelliteVisibility,
        SentenceKind, Talker,
    },
    registry::{Dispatch, SentenceRegistry},
};

type ErrorHook = Box<dyn FnMut(&Error, &str) + Send>;
type TimeTagHook = Box<dyn FnMut() + Send>;
type SentenceHook = Box<dyn FnMut(&str, &str) + Send>;

/// Parser configuration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// How sentences without `*HH` are treated
    pub checksum: ChecksumMode,
}

#[derive(Default)]
struct Hooks {
    error: Option<ErrorHook>,
    time_tag: Option<TimeTagHook>,
    sentence: Option<SentenceHook>,
}

struct Stream {
    framer: PacketFramer,
    hooks: Hooks,
}

/// Streaming NMEA 0183 parser.
///
/// Feed it arbitrary fragments of a receiver's output with
/// [`process_buffer`](NmeaParser::process_buffer) and read back the latest decoded record
/// per sentence with the typed getters. Fragments may split sentences anywhere.
///
/// The parser is `Send + Sync`. Framing state and hooks sit behind one lock, the decoded
/// records behind another, so getters never observe a partially decoded record and can
/// be called from other threads while a buffer is processed. Calls to `process_buffer`
/// on one parser are serialized.
///
/// Hooks run while the framing lock is held: they may call the getters, but must not
/// call `process_buffer`, `reset` or register hooks on the same parser.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::{NmeaParser, nmea_content::Talker};
///
/// let parser = NmeaParser::new();
/// parser
///     .process_buffer(b"$GPGGA,145416.00,3350.10959,N,11751.22870,W,1,09,0.85,70.3,M,-32.7,M,,*5B\r\n")
///     .unwrap();
///
/// let fix = parser.gga(Talker::Gps).unwrap();
/// assert_eq!(fix.satellites_in_use, 9);
/// assert_eq!((fix.hour, fix.minute, fix.second), (14, 54, 16));
/// ```
pub struct NmeaParser {
    stream: Mutex<Stream>,
    registry: Mutex<SentenceRegistry>,
}

impl Default for NmeaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for NmeaParser {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NmeaParser").finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl NmeaParser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            stream: Mutex::new(Stream {
                framer: PacketFramer::new(config.checksum),
                hooks: Hooks::default(),
            }),
            registry: Mutex::new(SentenceRegistry::new()),
        }
    }

    /// Processes a fragment of the input stream.
    ///
    /// Framing errors (checksum, overflow, non-ASCII) drop the affected sentence, are
    /// reported to the [error hook](NmeaParser::on_error) and never stop processing.
    /// Decode errors such as [`Error::TooManySatellites`] do not stop processing either;
    /// the first one is returned once the whole buffer has been consumed. Records
    /// updated by earlier sentences stay updated.
    pub fn process_buffer(&self, bytes: &[u8]) -> Result<(), Error> {
        let mut stream = lock(&self.stream);
        let Stream { framer, hooks } = &mut *stream;
        let mut first_error = None;

        for &byte in bytes {
            match framer.push(byte) {
                None => {}
                Some(FramerEvent::StartOfSentence) => {
                    if let Some(hook) = hooks.time_tag.as_mut() {
                        hook();
                    }
                }
                Some(FramerEvent::Error { error, tag }) => {
                    warn!("dropped sentence {tag:?}: {error}");
                    if let Some(hook) = hooks.error.as_mut() {
                        hook(&error, tag);
                    }
                }
                Some(FramerEvent::Sentence(sentence)) => {
                    let dispatched = lock(&self.registry).dispatch(sentence.tag, sentence.payload);

                    match dispatched {
                        Ok(Dispatch::Decoded(_)) => {
                            if let Some(hook) = hooks.sentence.as_mut() {
                                hook(sentence.tag, sentence.payload);
                            }
                        }
                        Ok(Dispatch::Unsupported) => {}
                        Err(error) => {
                            warn!("failed to decode {}: {error}", sentence.tag);
                            first_error.get_or_insert(error);
                        }
                    }
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Clears every record and any partially received sentence. Hooks are kept.
    pub fn reset(&self) {
        let mut stream = lock(&self.stream);
        stream.framer.reset();
        lock(&self.registry).reset();
        debug!("parser reset");
    }

    /// Registers a hook called with every framing error and the (partial) tag it hit.
    pub fn on_error<F>(&self, hook: F)
    where
        F: FnMut(&Error, &str) + Send + 'static,
    {
        lock(&self.stream).hooks.error = Some(Box::new(hook));
    }

    /// Registers a hook called whenever a `$` starts a new sentence.
    ///
    /// This is the earliest point a receiver's output can be time-tagged.
    pub fn on_time_tag<F>(&self, hook: F)
    where
        F: FnMut() + Send + 'static,
    {
        lock(&self.stream).hooks.time_tag = Some(Box::new(hook));
    }

    /// Registers a hook called with tag and payload of every decoded sentence.
    pub fn on_sentence<F>(&self, hook: F)
    where
        F: FnMut(&str, &str) + Send + 'static,
    {
        lock(&self.stream).hooks.sentence = Some(Box::new(hook));
    }

    pub fn checksum_mode(&self) -> ChecksumMode {
        lock(&self.stream).framer.checksum_mode()
    }

    /// Latest GGA record of `talker`, [`None`] if the talker sends no GGA.
    pub fn gga(&self, talker: Talker) -> Option<PositionFix> {
        lock(&self.registry).gga(talker)
    }

    /// Latest RMC record of `talker`, [`None`] if the talker sends no RMC.
    pub fn rmc(&self, talker: Talker) -> Option<RouteRecommendation> {
        lock(&self.registry).rmc(talker)
    }

    /// Latest GSA record of `talker`, [`None`] if the talker sends no GSA.
    pub fn gsa(&self, talker: Talker) -> Option<DopAndActiveSatellites> {
        lock(&self.registry).gsa(talker)
    }

    /// Latest GSV record of `talker`, [`None`] if the talker sends no GSV.
    pub fn gsv(&self, talker: Talker) -> Option<SatelliteVisibility> {
        lock(&self.registry).gsv(talker)
    }

    /// Number of sentences decoded for `talker` and `kind` since the last reset.
    ///
    /// Distinguishes a record that was never received from one received with default
    /// values. [`None`] for unsupported combinations.
    pub fn rx_count(&self, talker: Talker, kind: SentenceKind) -> Option<u32> {
        lock(&self.registry).rx_count(talker, kind)
    }
}
