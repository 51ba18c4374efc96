#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    nmea_content::{
        SentenceDecoder, Status,
        parse::{Fields, coordinate, signed, triplet},
    },
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///                                                            11
///         1         2 3       4 5        6  7   8   9    10  |
///         |         | |       | |        |  |   |   |    |   |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a*hh<CR><LF>
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteRecommendation {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Receiver status, [`Status::Void`] when absent
    pub status: Status,
    /// Latitude in decimal degrees, south is negative
    pub latitude: f64,
    /// Longitude in decimal degrees, west is negative
    pub longitude: f64,
    /// Speed over ground in knots
    pub speed_knots: f64,
    /// Track made good in degrees true
    pub track_angle: f64,
    pub day: u8,
    pub month: u8,
    /// Four digit year, `2000 + yy`
    pub year: u16,
    /// Magnetic variation in degrees, west is negative
    pub magnetic_variation: f64,
}

#[cfg(feature = "time")]
impl RouteRecommendation {
    /// The fix date, [`None`] if absent or invalid.
    pub fn utc_date(&self) -> Option<time::Date> {
        let month = time::Month::try_from(self.month).ok()?;
        time::Date::from_calendar_date(i32::from(self.year), month, self.day).ok()
    }

    /// The fix date and time, [`None`] if either is invalid.
    pub fn utc_datetime(&self) -> Option<time::PrimitiveDateTime> {
        let time = time::Time::from_hms(self.hour, self.minute, self.second).ok()?;
        Some(time::PrimitiveDateTime::new(self.utc_date()?, time))
    }
}

/// Decoder for `--RMC` sentences.
#[derive(Debug, Clone, Default)]
pub struct RmcDecoder {
    record: RouteRecommendation,
    rx_count: u32,
}

impl RmcDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SentenceDecoder for RmcDecoder {
    type Record = RouteRecommendation;

    fn decode(&mut self, payload: &str) -> Result<(), Error> {
        let fields = Fields::new(payload);
        let (hour, minute, second) = fields.get(0).map(triplet).unwrap_or_default();
        let (day, month, year) = match fields.get(8).map(triplet) {
            Some((day, month, year)) => (day, month, 2000 + u16::from(year)),
            None => (0, 0, 0),
        };

        let latitude = fields.get(2).map(|f| coordinate(f, 2)).unwrap_or_default();
        let longitude = fields.get(4).map(|f| coordinate(f, 3)).unwrap_or_default();

        // Without a variation the direction field is meaningless
        let magnetic_variation = match fields.value(9) {
            Some(variation) => signed(variation, fields.get(10), 'W'),
            None => 0.0,
        };

        self.record = RouteRecommendation {
            hour,
            minute,
            second,
            status: fields.value(1).unwrap_or_default(),
            latitude: signed(latitude, fields.get(3), 'S'),
            longitude: signed(longitude, fields.get(5), 'W'),
            speed_knots: fields.value(6).unwrap_or_default(),
            track_angle: fields.value(7).unwrap_or_default(),
            day,
            month,
            year,
            magnetic_variation,
        };
        self.rx_count = self.rx_count.wrapping_add(1);
        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn record(&self) -> &RouteRecommendation {
        &self.record
    }

    fn rx_count(&self) -> u32 {
        self.rx_count
    }
}
