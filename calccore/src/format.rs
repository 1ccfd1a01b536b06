//! Display text: rendering results and reading operands back
//!
//! The display never holds more than [`MAX_DISPLAY_LEN`] characters. Results
//! that do not fit in plain decimal form switch to exponential notation, and
//! anything that still does not fit (or is not a finite number) becomes the
//! error marker.

/// The literal shown when a computation fails.
pub const ERROR_MARKER: &str = "Error";

/// Longest text the display will hold, typed or computed.
pub const MAX_DISPLAY_LEN: usize = 15;

const MAX_FRACTION_DIGITS: usize = 8;
const MAX_MANTISSA_DIGITS: usize = 7;

/// Render a computed value for the display.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return ERROR_MARKER.to_string();
    }

    let plain = trim_fraction(&format!("{:.*}", MAX_FRACTION_DIGITS, n));
    // -0.0 and tiny negatives round to "-0"
    let plain = if plain == "-0" { "0".to_string() } else { plain };
    if plain.len() <= MAX_DISPLAY_LEN {
        return plain;
    }

    let exp = format_exponential(n);
    if exp.len() <= MAX_DISPLAY_LEN {
        exp
    } else {
        ERROR_MARKER.to_string()
    }
}

/// `1.2345678E20` style: up to seven mantissa fraction digits, no padding on
/// the exponent.
fn format_exponential(n: f64) -> String {
    let raw = format!("{:.*e}", MAX_MANTISSA_DIGITS, n);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => format!("{}E{}", trim_fraction(mantissa), exponent),
        None => raw,
    }
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

/// Read the display as an operand. Only finite numbers count; the error
/// marker and anything else unparsable give `None`.
pub fn parse_display(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// True when `text` is something the display may legitimately show.
pub fn is_valid_display(text: &str) -> bool {
    text == ERROR_MARKER
        || (!text.is_empty() && text.len() <= MAX_DISPLAY_LEN && parse_display(text).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-42.0), "-42");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(100.0), "100");
    }

    #[test]
    fn test_fractions_trimmed() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(1.0 / 3.0), "0.33333333");
        assert_eq!(format_number(2.0 / 3.0), "0.66666667");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-1e-12), "0");
        assert_eq!(format_number(1e-12), "0");
    }

    #[test]
    fn test_non_finite_is_error() {
        assert_eq!(format_number(f64::NAN), ERROR_MARKER);
        assert_eq!(format_number(f64::INFINITY), ERROR_MARKER);
        assert_eq!(format_number(f64::NEG_INFINITY), ERROR_MARKER);
    }

    #[test]
    fn test_fifteen_chars_stay_plain() {
        assert_eq!(format_number(123456789012345.0), "123456789012345");
        assert_eq!(format_number(-12345678901234.0), "-12345678901234");
    }

    #[test]
    fn test_long_results_go_exponential() {
        assert_eq!(format_number(1e20), "1E20");
        assert_eq!(format_number(-1e20), "-1E20");
        assert_eq!(format_number(1234567890123456.0), "1.2345679E15");
        assert_eq!(format_number(123456789012345.6), "1.2345679E14");
        assert_eq!(format_number(f64::MAX), "1.7976931E308");
    }

    #[test]
    fn test_exponential_fits_display() {
        for n in [f64::MAX, -f64::MAX, 9.87654321e300, -1.1111111e-300] {
            let s = format_number(n);
            assert!(s.len() <= MAX_DISPLAY_LEN, "{} too long", s);
        }
    }

    #[test]
    fn test_parse_display() {
        assert_eq!(parse_display("12"), Some(12.0));
        assert_eq!(parse_display("0."), Some(0.0));
        assert_eq!(parse_display("-3.5"), Some(-3.5));
        assert_eq!(parse_display("1.5E20"), Some(1.5e20));
        assert_eq!(parse_display(ERROR_MARKER), None);
        assert_eq!(parse_display("NaN"), None);
        assert_eq!(parse_display("inf"), None);
        assert_eq!(parse_display(""), None);
    }

    #[test]
    fn test_valid_display() {
        assert!(is_valid_display("0"));
        assert!(is_valid_display("12."));
        assert!(is_valid_display(ERROR_MARKER));
        assert!(!is_valid_display(""));
        assert!(!is_valid_display("abc"));
        assert!(!is_valid_display("1234567890123456"));
    }

    #[test]
    fn test_formatted_values_parse_back() {
        for n in [5.0, -2.5, 1e20, 0.33333333, 1234567890123456.0] {
            let s = format_number(n);
            assert!(is_valid_display(&s), "{} not a valid display", s);
        }
    }
}
