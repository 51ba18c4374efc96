#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{INVALID_PRN, MAX_CONSTELLATION, SentenceDecoder, parse::Fields},
};

/// Satellites described by one GSV sentence.
const SATS_PER_SENTENCE: usize = 4;

/// One satellite slot of a GSV report.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Satellite {
    /// Satellite PRN, [`INVALID_PRN`] for an empty slot
    pub prn: u16,
    /// Elevation in degrees
    pub elevation: f64,
    /// Azimuth in degrees true
    pub azimuth: f64,
    /// Signal to noise ratio in dB-Hz
    pub snr: u8,
}

impl Satellite {
    pub fn is_valid(&self) -> bool {
        self.prn != INVALID_PRN
    }
}

/// GSV - Satellites in View
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///         1 2 3 4 5 6 7     n
///         | | | | | | |     |
///  $--GSV,x,x,x,x,x,x,x,...*hh<CR><LF>
/// ```
///
/// A group of GSV sentences describes one constellation, four satellites per sentence.
/// Sentence `k` of a group fills slots `(k - 1) * 4 .. k * 4` of
/// [`SatelliteVisibility::satellites`]; the last sentence of a group clears every slot
/// past the group.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteVisibility {
    /// Number of sentences in the group
    pub total_sentences: u8,
    /// 1-based index of the last decoded sentence
    pub sentence_number: u8,
    /// Total number of satellites in view
    pub satellites_in_view: u8,
    /// Always [`MAX_CONSTELLATION`] slots
    pub satellites: heapless::Vec<Satellite, MAX_CONSTELLATION>,
}

impl Default for SatelliteVisibility {
    fn default() -> Self {
        Self {
            total_sentences: 0,
            sentence_number: 0,
            satellites_in_view: 0,
            satellites: core::iter::repeat_n(Satellite::default(), MAX_CONSTELLATION).collect(),
        }
    }
}

impl SatelliteVisibility {
    /// Occupied satellite slots.
    pub fn visible(&self) -> impl Iterator<Item = &Satellite> {
        self.satellites.iter().filter(|satellite| satellite.is_valid())
    }
}

/// Decoder for `--GSV` sentences.
#[derive(Debug, Clone, Default)]
pub struct GsvDecoder {
    record: SatelliteVisibility,
    rx_count: u32,
}

impl GsvDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SentenceDecoder for GsvDecoder {
    type Record = SatelliteVisibility;

    /// Decodes one sentence of a GSV group.
    ///
    /// A sentence number of zero fails with [`Error::Fail`]. A sentence addressing slots
    /// too close to [`MAX_CONSTELLATION`] fails with [`Error::TooManySatellites`]. In both
    /// cases the record is left untouched.
    fn decode(&mut self, payload: &str) -> Result<(), Error> {
        let fields = Fields::new(payload);
        let total_sentences: u8 = fields.value(0).unwrap_or_default();
        let sentence_number: u8 = fields.value(1).unwrap_or_default();

        if sentence_number == 0 {
            return Err(Error::Fail);
        }

        let first = usize::from(sentence_number - 1) * SATS_PER_SENTENCE;
        // Slots within one sentence of the end are never written
        if first + SATS_PER_SENTENCE >= MAX_CONSTELLATION {
            return Err(Error::TooManySatellites { index: first });
        }

        let record = &mut self.record;
        record.total_sentences = total_sentences;
        record.sentence_number = sentence_number;
        record.satellites_in_view = fields.value(2).unwrap_or_default();

        for (local, slot) in record.satellites[first..first + SATS_PER_SENTENCE]
            .iter_mut()
            .enumerate()
        {
            let base = 3 + local * 4;
            *slot = Satellite {
                prn: fields.value(base).unwrap_or(INVALID_PRN),
                elevation: fields.value(base + 1).unwrap_or_default(),
                azimuth: fields.value(base + 2).unwrap_or_default(),
                snr: fields.value(base + 3).unwrap_or_default(),
            };
        }

        if sentence_number == total_sentences {
            let end = (usize::from(total_sentences) * SATS_PER_SENTENCE).min(MAX_CONSTELLATION);
            record.satellites[end..].fill(Satellite::default());
        }

        self.rx_count = self.rx_count.wrapping_add(1);
        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn record(&self) -> &SatelliteVisibility {
        &self.record
    }

    fn rx_count(&self) -> u32 {
        self.rx_count
    }
}
