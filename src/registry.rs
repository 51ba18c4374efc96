//! # Sentence Registry
//!
//! Routes framed sentences to their decoder. One decoder instance exists per supported
//! `(talker, sentence kind)` combination, see [`SUPPORTED_SENTENCES`].

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    Error,
    nmea_content::{
        DopAndActiveSatellites, GgaDecoder, GsaDecoder, GsvDecoder, PositionFix, RmcDecoder,
        RouteRecommendation, SatelliteVisibility, SentenceDecoder, SentenceKind, SentenceTag,
        Talker,
    },
};

/// Every `(talker, sentence kind)` combination the registry decodes.
pub const SUPPORTED_SENTENCES: [(Talker, SentenceKind); 17] = [
    (Talker::Gps, SentenceKind::Gga),
    (Talker::Gps, SentenceKind::Rmc),
    (Talker::Gps, SentenceKind::Gsa),
    (Talker::Gps, SentenceKind::Gsv),
    (Talker::Galileo, SentenceKind::Gga),
    (Talker::Galileo, SentenceKind::Rmc),
    (Talker::Galileo, SentenceKind::Gsa),
    (Talker::Galileo, SentenceKind::Gsv),
    (Talker::Gnss, SentenceKind::Gga),
    (Talker::Gnss, SentenceKind::Rmc),
    (Talker::Gnss, SentenceKind::Gsa),
    (Talker::Glonass, SentenceKind::Gsa),
    (Talker::Glonass, SentenceKind::Gsv),
    (Talker::Beidou, SentenceKind::Gsa),
    (Talker::Beidou, SentenceKind::Gsv),
    (Talker::Qzss, SentenceKind::Gsa),
    (Talker::Qzss, SentenceKind::Gsv),
];

#[derive(Debug, Clone)]
enum Decoder {
    Gga(GgaDecoder),
    Rmc(RmcDecoder),
    Gsa(GsaDecoder),
    Gsv(GsvDecoder),
}

impl Decoder {
    fn new(kind: SentenceKind) -> Self {
        match kind {
            SentenceKind::Gga => Decoder::Gga(GgaDecoder::new()),
            SentenceKind::Rmc => Decoder::Rmc(RmcDecoder::new()),
            SentenceKind::Gsa => Decoder::Gsa(GsaDecoder::new()),
            SentenceKind::Gsv => Decoder::Gsv(GsvDecoder::new()),
        }
    }

    fn decode(&mut self, payload: &str) -> Result<(), Error> {
        match self {
            Decoder::Gga(decoder) => decoder.decode(payload),
            Decoder::Rmc(decoder) => decoder.decode(payload),
            Decoder::Gsa(decoder) => decoder.decode(payload),
            Decoder::Gsv(decoder) => decoder.decode(payload),
        }
    }

    fn reset(&mut self) {
        match self {
            Decoder::Gga(decoder) => decoder.reset(),
            Decoder::Rmc(decoder) => decoder.reset(),
            Decoder::Gsa(decoder) => decoder.reset(),
            Decoder::Gsv(decoder) => decoder.reset(),
        }
    }

    fn rx_count(&self) -> u32 {
        match self {
            Decoder::Gga(decoder) => decoder.rx_count(),
            Decoder::Rmc(decoder) => decoder.rx_count(),
            Decoder::Gsa(decoder) => decoder.rx_count(),
            Decoder::Gsv(decoder) => decoder.rx_count(),
        }
    }
}

/// What happened to a sentence handed to [`SentenceRegistry::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The sentence was decoded by the decoder of this tag.
    Decoded(SentenceTag),
    /// No decoder is registered for the tag; the sentence was ignored.
    Unsupported,
}

/// Owns one decoder per supported sentence and routes payloads to them.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::{
///     SentenceRegistry,
///     nmea_content::{FixQuality, Talker},
/// };
///
/// let mut registry = SentenceRegistry::new();
/// registry
///     .dispatch("GPGGA", "145416.00,3350.10959,N,11751.22870,W,1,09,0.85,70.3,M,-32.7,M,,")
///     .unwrap();
///
/// let fix = registry.gga(Talker::Gps).unwrap();
/// assert_eq!(fix.fix_quality, FixQuality::GpsSps);
/// assert!(registry.gga(Talker::Glonass).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SentenceRegistry {
    decoders: HashMap<SentenceTag, Decoder>,
}

impl Default for SentenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceRegistry {
    pub fn new() -> Self {
        let decoders = SUPPORTED_SENTENCES
            .iter()
            .map(|&(talker, kind)| (SentenceTag::new(talker, kind), Decoder::new(kind)))
            .collect();

        Self { decoders }
    }

    /// Returns `true` if sentences with this tag are decoded.
    pub fn supports(&self, tag: SentenceTag) -> bool {
        self.decoders.contains_key(&tag)
    }

    /// Decodes `payload` with the decoder registered for `tag`.
    ///
    /// Unknown tags are not an error. A decoded GGA additionally restarts the satellite
    /// accumulation of the GSA decoder sharing its talker.
    pub fn dispatch(&mut self, tag: &str, payload: &str) -> Result<Dispatch, Error> {
        let Some(parsed) = SentenceTag::parse(tag).filter(|parsed| self.supports(*parsed)) else {
            debug!("ignoring unsupported sentence {tag}");
            return Ok(Dispatch::Unsupported);
        };

        trace!("routing {tag} to {parsed}");
        if let Some(decoder) = self.decoders.get_mut(&parsed) {
            decoder.decode(payload)?;
        }

        if parsed.kind == SentenceKind::Gga {
            self.notify_companion_gsa(parsed.talker);
        }

        Ok(Dispatch::Decoded(parsed))
    }

    fn notify_companion_gsa(&mut self, talker: Talker) {
        let companion = SentenceTag::new(talker, SentenceKind::Gsa);

        if let Some(Decoder::Gsa(gsa)) = self.decoders.get_mut(&companion) {
            trace!("{talker:?} GGA received, restarting {companion} accumulation");
            gsa.notify_companion_gga();
        }
    }

    /// Resets every decoder to its initial state.
    pub fn reset(&mut self) {
        debug!("resetting {} sentence decoders", self.decoders.len());
        self.decoders.values_mut().for_each(Decoder::reset);
    }

    /// Number of sentences decoded for `talker` and `kind`, [`None`] if unsupported.
    pub fn rx_count(&self, talker: Talker, kind: SentenceKind) -> Option<u32> {
        self.decoders
            .get(&SentenceTag::new(talker, kind))
            .map(Decoder::rx_count)
    }

    fn decoder(&self, talker: Talker, kind: SentenceKind) -> Option<&Decoder> {
        self.decoders.get(&SentenceTag::new(talker, kind))
    }

    /// Copy of the latest GGA record of `talker`.
    pub fn gga(&self, talker: Talker) -> Option<PositionFix> {
        match self.decoder(talker, SentenceKind::Gga)? {
            Decoder::Gga(decoder) => Some(decoder.record().clone()),
            _ => None,
        }
    }

    /// Copy of the latest RMC record of `talker`.
    pub fn rmc(&self, talker: Talker) -> Option<RouteRecommendation> {
        match self.decoder(talker, SentenceKind::Rmc)? {
            Decoder::Rmc(decoder) => Some(decoder.record().clone()),
            _ => None,
        }
    }

    /// Copy of the latest GSA record of `talker`.
    pub fn gsa(&self, talker: Talker) -> Option<DopAndActiveSatellites> {
        match self.decoder(talker, SentenceKind::Gsa)? {
            Decoder::Gsa(decoder) => Some(decoder.record().clone()),
            _ => None,
        }
    }

    /// Copy of the latest GSV record of `talker`.
    pub fn gsv(&self, talker: Talker) -> Option<SatelliteVisibility> {
        match self.decoder(talker, SentenceKind::Gsv)? {
            Decoder::Gsv(decoder) => Some(decoder.record().clone()),
            _ => None,
        }
    }
}
