#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{
        FixMode, INVALID_PRN, MAX_CONSTELLATION, MAX_GSA_SATS, SelectionMode, SentenceDecoder,
        parse::Fields,
    },
};

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         1 2 3                        14 15  16  17
///         | | |                        |  |   |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x*hh<CR><LF>
/// ```
///
/// Receivers tracking more than [`MAX_GSA_SATS`] satellites split the list over several
/// sentences. Consecutive GSA sentences of one talker therefore extend
/// [`DopAndActiveSatellites::satellites`] until the talker's GGA arrives.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DopAndActiveSatellites {
    /// Selection mode, [`SelectionMode::Manual`] when absent
    pub selection_mode: SelectionMode,
    /// Fix mode, [`FixMode::NotAvailable`] when absent
    pub fix_mode: FixMode,
    /// PRN slots of the satellites used in the fix, [`INVALID_PRN`] for empty slots
    pub satellites: heapless::Vec<u16, MAX_CONSTELLATION>,
    /// Position Dilution of Precision
    pub pdop: f64,
    /// Horizontal Dilution of Precision
    pub hdop: f64,
    /// Vertical Dilution of Precision
    pub vdop: f64,
}

impl DopAndActiveSatellites {
    /// PRNs of the occupied satellite slots.
    pub fn active_prns(&self) -> impl Iterator<Item = u16> + '_ {
        self.satellites
            .iter()
            .copied()
            .filter(|&prn| prn != INVALID_PRN)
    }
}

/// Decoder for `--GSA` sentences.
#[derive(Debug, Clone, Default)]
pub struct GsaDecoder {
    record: DopAndActiveSatellites,
    /// Slot the next sentence starts writing at
    accumulated: usize,
    rx_count: u32,
}

impl GsaDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals that the GGA of the same talker was decoded.
    ///
    /// The next GSA sentence starts a new satellite list at slot 0.
    pub fn notify_companion_gga(&mut self) {
        self.accumulated = 0;
    }
}

impl SentenceDecoder for GsaDecoder {
    type Record = DopAndActiveSatellites;

    fn decode(&mut self, payload: &str) -> Result<(), Error> {
        let fields = Fields::new(payload);

        let mut satellites = self.record.satellites.clone();
        satellites.truncate(self.accumulated);

        let mut read = 0;
        for slot in 0..MAX_GSA_SATS {
            let prn = fields.value(2 + slot);
            if prn.is_some() {
                read += 1;
            }

            // The baseline is at most one sentence, never more than 24 slots are in use
            satellites
                .push(prn.unwrap_or(INVALID_PRN))
                .map_err(|_| Error::TooManySatellites {
                    index: self.accumulated + slot,
                })?;
        }

        self.record = DopAndActiveSatellites {
            selection_mode: fields.value(0).unwrap_or_default(),
            fix_mode: fields.value(1).unwrap_or_default(),
            satellites,
            pdop: fields.value(14).unwrap_or_default(),
            hdop: fields.value(15).unwrap_or_default(),
            vdop: fields.value(16).unwrap_or_default(),
        };
        self.accumulated = read;
        self.rx_count = self.rx_count.wrapping_add(1);
        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn record(&self) -> &DopAndActiveSatellites {
        &self.record
    }

    fn rx_count(&self) -> u32 {
        self.rx_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gsa_decoding() {
        let mut decoder = GsaDecoder::new();
        decoder
            .decode("A,3,06,25,12,19,05,24,02,29,,,,,1.79,0.94,1.52")
            .unwrap();

        let gsa = decoder.record();
        assert_eq!(gsa.selection_mode, SelectionMode::Auto);
        assert_eq!(gsa.fix_mode, FixMode::Fix3D);
        assert_eq!(
            gsa.satellites.as_slice(),
            &[6u16, 25, 12, 19, 5, 24, 2, 29, 0, 0, 0, 0]
        );
        assert_eq!(gsa.active_prns().count(), 8);
        assert_eq!(gsa.pdop, 1.79);
        assert_eq!(gsa.hdop, 0.94);
        assert_eq!(gsa.vdop, 1.52);
    }

    #[test]
    fn test_gsa_absent_fields() {
        let mut decoder = GsaDecoder::new();
        decoder.decode(",,,,,,,,,,,,,,,,").unwrap();

        let gsa = decoder.record();
        assert_eq!(gsa.selection_mode, SelectionMode::Manual);
        assert_eq!(gsa.fix_mode, FixMode::NotAvailable);
        assert_eq!(gsa.active_prns().count(), 0);
        assert_eq!(gsa.satellites.len(), MAX_GSA_SATS);
        assert_eq!(gsa.pdop, 0.0);
    }

    #[test]
    fn test_gsa_accumulates_until_gga() {
        let mut decoder = GsaDecoder::new();
        decoder
            .decode("A,3,01,02,03,04,05,06,07,08,09,10,11,12,1.0,0.6,0.8")
            .unwrap();
        decoder
            .decode("A,3,65,66,67,,,,,,,,,,1.0,0.6,0.8")
            .unwrap();

        let prns: Vec<u16> = decoder.record().active_prns().collect();
        assert_eq!(prns, [1u16, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 65, 66, 67]);
        assert_eq!(decoder.record().satellites.len(), 24);

        decoder.notify_companion_gga();
        decoder
            .decode("A,3,70,71,,,,,,,,,,,1.0,0.6,0.8")
            .unwrap();

        let prns: Vec<u16> = decoder.record().active_prns().collect();
        assert_eq!(prns, [70u16, 71]);
        assert_eq!(decoder.rx_count(), 3);
    }

    #[test]
    fn test_gsa_baseline_is_previous_sentence_count() {
        let mut decoder = GsaDecoder::new();
        for _ in 0..10 {
            decoder
                .decode("A,3,01,02,03,04,05,06,07,08,09,10,11,12,1.0,0.6,0.8")
                .unwrap();
        }

        // Each sentence appends after the slots read by the one before it, so the list
        // never grows past two sentences
        assert_eq!(decoder.record().satellites.len(), 2 * MAX_GSA_SATS);
        assert_eq!(decoder.record().active_prns().count(), 24);
    }

    #[test]
    fn test_gsa_reset() {
        let mut decoder = GsaDecoder::new();
        decoder
            .decode("A,3,01,02,03,04,05,06,07,08,09,10,11,12,1.0,0.6,0.8")
            .unwrap();
        decoder.reset();
        decoder.decode("A,2,33,,,,,,,,,,,,2.0,1.0,1.7").unwrap();

        assert_eq!(decoder.record().satellites[0], 33);
        assert_eq!(decoder.record().fix_mode, FixMode::Fix2D);
    }
}
