#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error, FieldValue,
    nmea_content::{
        FixQuality, SentenceDecoder,
        parse::{Fields, coordinate, signed, triplet},
    },
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
///
/// Absent fields decode as zero, except [`PositionFix::vertical_speed`] which is derived
/// across sentences.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PositionFix {
    /// Hour of the fix, UTC
    pub hour: u8,
    /// Minute of the fix, UTC
    pub minute: u8,
    /// Whole second of the fix, UTC
    pub second: u8,
    /// Latitude in decimal degrees, south is negative
    pub latitude: f64,
    /// Longitude in decimal degrees, west is negative
    pub longitude: f64,
    /// GPS Quality Indicator
    pub fix_quality: FixQuality,
    /// Number of satellites in use
    pub satellites_in_use: u8,
    /// Horizontal Dilution of Precision
    pub hdop: f64,
    /// Altitude above mean sea level (geoid) in meters
    pub altitude_msl: f64,
    /// Geoidal separation in meters, negative when the geoid is below the WGS-84 ellipsoid
    pub geoidal_separation: f64,
    /// Age of differential GPS data in seconds
    pub differential_age: f64,
    /// Differential reference station ID
    pub differential_station_id: u16,
    /// Vertical speed in meters per minute, derived from consecutive altitude samples
    pub vertical_speed: f64,
}

#[cfg(feature = "time")]
impl PositionFix {
    /// The fix time as a [`time::Time`], [`None`] if a component is out of range.
    pub fn utc_time(&self) -> Option<time::Time> {
        time::Time::from_hms(self.hour, self.minute, self.second).ok()
    }
}

/// Decoder for `--GGA` sentences.
#[derive(Debug, Clone, Default)]
pub struct GgaDecoder {
    record: PositionFix,
    /// Second of the hour of the previous sample
    previous_seconds: u32,
    previous_altitude: f64,
    rx_count: u32,
}

impl GgaDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the vertical speed from the new altitude sample.
    ///
    /// Only a strictly later second of the hour produces a new value. Minute and hour
    /// rollovers keep the previous value until the second of the hour grows again.
    fn update_vertical_speed(&mut self, record: &mut PositionFix) {
        let seconds = u32::from(record.minute) * 60 + u32::from(record.second);

        if seconds > self.previous_seconds {
            let elapsed_minutes = (f64::from(self.previous_seconds) - f64::from(seconds)) / 60.0;
            record.vertical_speed = (self.previous_altitude - record.altitude_msl) / elapsed_minutes;
        }

        self.previous_seconds = seconds;
        self.previous_altitude = record.altitude_msl;
    }
}

impl SentenceDecoder for GgaDecoder {
    type Record = PositionFix;

    fn decode(&mut self, payload: &str) -> Result<(), Error> {
        let fields = Fields::new(payload);
        let (hour, minute, second) = fields.get(0).map(triplet).unwrap_or_default();

        let latitude = fields.get(1).map(|f| coordinate(f, 2)).unwrap_or_default();
        let longitude = fields.get(3).map(|f| coordinate(f, 3)).unwrap_or_default();

        let mut record = PositionFix {
            hour,
            minute,
            second,
            latitude: signed(latitude, fields.get(2), 'S'),
            longitude: signed(longitude, fields.get(4), 'W'),
            fix_quality: fields.value(5).unwrap_or_default(),
            satellites_in_use: fields
                .get_truncated(6, 2)
                .map(u8::lenient)
                .unwrap_or_default(),
            hdop: fields.value(7).unwrap_or_default(),
            altitude_msl: fields.value(8).unwrap_or_default(),
            geoidal_separation: fields.value(10).unwrap_or_default(),
            differential_age: fields.value(12).unwrap_or_default(),
            differential_station_id: fields.value(13).unwrap_or_default(),
            vertical_speed: self.record.vertical_speed,
        };

        self.update_vertical_speed(&mut record);
        self.record = record;
        self.rx_count = self.rx_count.wrapping_add(1);
        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn record(&self) -> &PositionFix {
        &self.record
    }

    fn rx_count(&self) -> u32 {
        self.rx_count
    }
}
