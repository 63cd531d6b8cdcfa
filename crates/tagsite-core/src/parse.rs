//! Form-field integer parsing
//!
//! Numeric form fields are parsed leniently: leading whitespace and a sign are
//! accepted, then the longest run of ASCII digits. Anything after the digits
//! is ignored. Input without any leading digits does not parse.

/// Parse the leading integer of `input`, or `None` when there is none.
///
/// Values that overflow `i64` saturate rather than fail.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}

/// Parse an integer field, falling back to `default` when nothing parses
pub fn parse_int_or(input: &str, default: i64) -> i64 {
    parse_int_prefix(input).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_int_prefix("10"), Some(10));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("+7"), Some(7));
    }

    #[test]
    fn test_leading_whitespace_and_trailing_garbage() {
        assert_eq!(parse_int_prefix("  42"), Some(42));
        assert_eq!(parse_int_prefix("12abc"), Some(12));
        assert_eq!(parse_int_prefix("3.9"), Some(3));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix(" x1"), None);
    }

    #[test]
    fn test_default_fallback() {
        assert_eq!(parse_int_or("", 0), 0);
        assert_eq!(parse_int_or("1500円", 0), 1500);
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(parse_int_prefix("99999999999999999999999"), Some(i64::MAX));
    }
}
