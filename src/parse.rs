use nom::{
    Parser,
    bytes::complete::take,
    character::complete::{anychar, space0},
    sequence::preceded,
};

/// The nom result type used by field parsers.
pub type IResult<'a, O> = nom::IResult<&'a str, O>;

/// Trait for reading typed values out of a single NMEA 0183 field.
///
/// `parse_field` is a regular nom parser: it consumes the longest valid prefix of the
/// field and leaves the rest. [`FieldValue::lenient`] builds on it the way receivers
/// expect numeric fields to be read, i.e. any trailing garbage is ignored and a field
/// that does not start with a valid value yields [`Default::default`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::{FieldValue, IResult};
///
/// let result: IResult<'_, u8> = u8::parse_field("09");
/// assert_eq!(result, Ok(("", 9)));
///
/// assert_eq!(f64::lenient("0.85"), 0.85);
/// assert_eq!(f64::lenient("70.3M"), 70.3);
/// assert_eq!(u16::lenient("x12"), 0);
/// ```
///
/// # Implementing for Custom Types
///
/// ```rust
/// use nmea0183_stream::{FieldValue, IResult};
/// use nom::{Parser, character::complete::char};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Unit(bool);
///
/// impl FieldValue for Unit {
///     fn parse_field(i: &str) -> IResult<'_, Self> {
///         char('M').map(|_| Unit(true)).parse(i)
///     }
/// }
///
/// assert_eq!(Unit::lenient("M"), Unit(true));
/// assert_eq!(Unit::lenient("F"), Unit(false));
/// ```
pub trait FieldValue: Sized + Default {
    /// Parses a value from the start of `i`.
    fn parse_field(i: &str) -> IResult<'_, Self>;

    /// Parses a value from the start of `field`, falling back to the default.
    fn lenient(field: &str) -> Self {
        Self::parse_field(field)
            .map(|(_, value)| value)
            .unwrap_or_default()
    }
}

macro_rules! impl_int_type {
    ($($t:tt),*) => ($(
        impl FieldValue for $t {
            fn parse_field(i: &str) -> IResult<'_, Self> {
                preceded(space0, nom::character::complete::$t).parse(i)
            }
        }
    )*)
}

impl_int_type!(u8, u16, u32, i32);

macro_rules! impl_float_type {
    ($($t:ty, $p:ident),*) => ($(
        impl FieldValue for $t {
            fn parse_field(i: &str) -> IResult<'_, Self> {
                preceded(space0, nom::number::complete::$p).parse(i)
            }
        }
    )*)
}

impl_float_type!(f32, float, f64, double);

impl FieldValue for char {
    fn parse_field(i: &str) -> IResult<'_, Self> {
        anychar.parse(i)
    }
}

/// Returns a parser that takes exactly `count` characters and reads a `T` from them.
///
/// Used for fixed-width sub-fields such as the `hh`, `mm` and `ss` of a time stamp.
///
/// ```rust
/// use nmea0183_stream::{IResult, with_take};
/// use nom::Parser;
///
/// let result: IResult<'_, (u8, u8)> = (with_take(2), with_take(2)).parse("1454.5");
/// assert_eq!(result, Ok((".5", (14, 54))));
/// ```
pub fn with_take<'a, T>(
    count: usize,
) -> impl Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>
where
    T: FieldValue,
{
    take(count).and_then(T::parse_field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ints() {
        assert_eq!(u8::parse_field("12,3"), Ok((",3", 12)));
        assert_eq!(u16::parse_field("1023"), Ok(("", 1023)));
        assert_eq!(i32::parse_field("-17"), Ok(("", -17)));
        assert!(u8::parse_field("300").is_err());
        assert!(u32::parse_field("").is_err());
    }

    #[test]
    fn test_lenient_defaults() {
        assert_eq!(u8::lenient("1.79"), 1);
        assert_eq!(u8::lenient(" 7"), 7);
        assert_eq!(u8::lenient("-1"), 0);
        assert_eq!(i32::lenient("abc"), 0);
        assert_eq!(f64::lenient("-32.7"), -32.7);
        assert_eq!(f32::lenient("1.52"), 1.52);
        assert_eq!(f64::lenient(""), 0.0);
        assert_eq!(char::lenient("A"), 'A');
        assert_eq!(char::lenient(""), '\0');
    }

    #[test]
    fn test_with_take() {
        let result: IResult<'_, (u8, u8, u8)> =
            (with_take(2), with_take(2), with_take(2)).parse("145416.00");
        assert_eq!(result, Ok((".00", (14, 54, 16))));

        let result: IResult<'_, f64> = with_take(3).parse("11751.22870");
        assert_eq!(result, Ok(("51.22870", 117.0)));

        let result: IResult<'_, u8> = with_take(2).parse("1");
        assert!(result.is_err());
    }
}
