use thiserror::Error;

/// Errors from parsing a hex color string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected 6 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

/// Parse a `#rrggbb` string (leading `#` optional, case-insensitive) into
/// [0,1] RGB channels.
pub fn parse_hex(s: &str) -> Result<[f32; 3], ColorParseError> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() != 6 {
        return Err(ColorParseError::BadLength(digits.len()));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::BadDigit(digits.to_string()));
    }
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
    Ok([
        byte(0) as f32 / 255.0,
        byte(2) as f32 / 255.0,
        byte(4) as f32 / 255.0,
    ])
}

/// Format [0,1] RGB channels as `#rrggbb` for display in the panel.
pub fn to_hex(rgb: [f32; 3]) -> String {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", byte(rgb[0]), byte(rgb[1]), byte(rgb[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_white_and_black() {
        assert_eq!(parse_hex("#ffffff").unwrap(), [1.0, 1.0, 1.0]);
        assert_eq!(parse_hex("000000").unwrap(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn parses_mixed_case() {
        let c = parse_hex("#FF8000").unwrap();
        assert_eq!(c[0], 1.0);
        assert!((c[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 0.0);
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(parse_hex("#fff"), Err(ColorParseError::BadLength(3)));
        assert_eq!(parse_hex(""), Err(ColorParseError::BadLength(0)));
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert!(matches!(
            parse_hex("#zzzzzz"),
            Err(ColorParseError::BadDigit(_))
        ));
    }

    #[test]
    fn round_trips_through_hex() {
        for s in ["#ffffff", "#404040", "#1a2b3c"] {
            assert_eq!(to_hex(parse_hex(s).unwrap()), s);
        }
    }
}
