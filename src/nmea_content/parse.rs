//! Field-level helpers shared by the sentence decoders.

use nom::Parser;

use crate::{
    FieldValue, IResult,
    parsing::{MAX_FIELD_LEN, field},
    with_take,
};

/// Indexed view over the comma separated fields of a payload.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    payload: &'a str,
}

impl<'a> Fields<'a> {
    pub fn new(payload: &'a str) -> Self {
        Self { payload }
    }

    /// The raw text of field `index`, [`None`] if the field is absent or empty.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        field(self.payload, index, MAX_FIELD_LEN)
    }

    /// Like [`Fields::get`], but keeps at most `width` characters of the field.
    pub fn get_truncated(&self, index: usize, width: usize) -> Option<&'a str> {
        field(self.payload, index, width + 1)
    }

    /// Reads field `index` leniently.
    ///
    /// Returns [`None`] only when the field is absent, a present but unparsable field
    /// yields `T::default()`.
    pub fn value<T: FieldValue>(&self, index: usize) -> Option<T> {
        self.get(index).map(T::lenient)
    }
}

/// Converts an NMEA `ddmm.mmmm` (or `dddmm.mmmm`) coordinate into decimal degrees.
///
/// `degree_digits` is 2 for latitudes and 3 for longitudes.
///
/// ```rust
/// use nmea0183_stream::nmea_content::parse::coordinate;
///
/// assert!((coordinate("3350.10959", 2) - 33.835159833).abs() < 1e-9);
/// assert!((coordinate("11751.22870", 3) - 117.853811667).abs() < 1e-9);
/// ```
pub fn coordinate(field: &str, degree_digits: usize) -> f64 {
    let result: IResult<'_, f64> = with_take(degree_digits).parse(field);

    match result {
        Ok((minutes, degrees)) => degrees + f64::lenient(minutes) / 60.0,
        Err(_) => f64::lenient(field),
    }
}

/// Applies a hemisphere indicator to an unsigned value.
///
/// The value is negated when `hemisphere` starts with `negative`, e.g. `'S'` or `'W'`.
/// A missing indicator leaves the value positive.
pub fn signed(value: f64, hemisphere: Option<&str>, negative: char) -> f64 {
    match hemisphere.map(char::lenient) {
        Some(c) if c == negative => -value,
        _ => value,
    }
}

/// Splits a fixed-width `aabbcc` field (`hhmmss`, `ddmmyy`) into its three components.
///
/// Anything after the sixth character, such as decimal seconds, is ignored. A field that
/// does not start with six digits yields all zeros.
///
/// ```rust
/// use nmea0183_stream::nmea_content::parse::triplet;
///
/// assert_eq!(triplet("145416.00"), (14, 54, 16));
/// assert_eq!(triplet("230394"), (23, 3, 94));
/// assert_eq!(triplet("14:54"), (0, 0, 0));
/// ```
pub fn triplet(field: &str) -> (u8, u8, u8) {
    let result: IResult<'_, (u8, u8, u8)> =
        (with_take(2), with_take(2), with_take(2)).parse(field);

    result.map(|(_, value)| value).unwrap_or_default()
}
