//! # Parsing Utilities
//!
//! This module provides the field extractor every sentence decoder is built on.
//! Fields are addressed by their zero-based position in the payload, i.e. the data
//! following the sentence tag.

/// Maximum field length handed to decoders, including room for a terminator.
pub const MAX_FIELD_LEN: usize = 256;

/// Extracts the `index`-th comma delimited field of `payload`.
///
/// Returns [`None`] when the payload ends before the field is reached, or when the
/// field is syntactically present but empty (`,,`). Callers therefore apply their own
/// default for missing fields.
///
/// At most `max_len - 1` bytes are returned, longer fields are truncated silently.
/// A `max_len` of zero yields [`None`].
///
/// A `*` ends a field as well as a `,`, so a payload still carrying its checksum
/// suffix can be passed directly.
///
/// # Examples
///
/// ```rust
/// use nmea0183_stream::parsing::field;
///
/// let payload = "145416.00,3350.10959,N,,W";
///
/// assert_eq!(field(payload, 0, 256), Some("145416.00"));
/// assert_eq!(field(payload, 2, 256), Some("N"));
/// assert_eq!(field(payload, 3, 256), None); // empty
/// assert_eq!(field(payload, 5, 256), None); // past the end
/// assert_eq!(field(payload, 1, 5), Some("3350"));
/// ```
pub fn field(payload: &str, index: usize, max_len: usize) -> Option<&str> {
    if max_len == 0 {
        return None;
    }

    let start = if index == 0 {
        0
    } else {
        payload
            .bytes()
            .enumerate()
            .filter(|&(_, byte)| byte == b',')
            .nth(index - 1)
            .map(|(position, _)| position + 1)?
    };

    let rest = &payload[start..];
    let end = rest.find([',', '*']).unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let mut len = end.min(max_len - 1);
    while !rest.is_char_boundary(len) {
        len -= 1;
    }

    Some(&rest[..len]).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_positions() {
        let payload = "A,3,06,25,,,1.79,0.94,1.52";
        let expected = [
            Some("A"),
            Some("3"),
            Some("06"),
            Some("25"),
            None,
            None,
            Some("1.79"),
            Some("0.94"),
            Some("1.52"),
            None,
        ];

        for (index, expected) in expected.into_iter().enumerate() {
            assert_eq!(field(payload, index, MAX_FIELD_LEN), expected, "field {index}");
        }
    }

    #[test]
    fn test_field_edges() {
        assert_eq!(field("", 0, MAX_FIELD_LEN), None);
        assert_eq!(field(",", 0, MAX_FIELD_LEN), None);
        assert_eq!(field(",", 1, MAX_FIELD_LEN), None);
        assert_eq!(field("1,2", 1, MAX_FIELD_LEN), Some("2"));
        assert_eq!(field("1,2,", 2, MAX_FIELD_LEN), None);
        assert_eq!(field("1,2*5B", 1, MAX_FIELD_LEN), Some("2"));
        assert_eq!(field("1,*5B", 1, MAX_FIELD_LEN), None);
        assert_eq!(field("1,2", 7, MAX_FIELD_LEN), None);
    }

    #[test]
    fn test_field_truncation() {
        assert_eq!(field("123456,7", 0, 4), Some("123"));
        assert_eq!(field("123456,7", 1, 4), Some("7"));
        assert_eq!(field("123456", 0, 1), None);
        assert_eq!(field("123456", 0, 0), None);
    }
}
