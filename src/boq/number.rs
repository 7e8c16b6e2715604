//! Locale-formatted number parsing.

/// Currency markers accepted in front of a number.
const CURRENCY_PREFIXES: [&str; 4] = ["₹", "Rs.", "Rs", "INR"];

/// Parse a numeric token such as `"1,50,000.00"` or `"₹ 500"`.
///
/// Thousands separators and a leading currency marker are stripped. Only ASCII
/// digits are understood. Returns
/// `None` when the token is empty, unparseable or not finite.
pub fn parse_number(token: &str) -> Option<f64> {
    let mut s = token.trim();
    for prefix in CURRENCY_PREFIXES {
        if let Some(rest) = s.strip_prefix(prefix) {
            s = rest.trim_start();
            break;
        }
    }

    let cleaned: String = s.chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an optional token; an absent token is missing.
#[inline]
pub fn parse_optional(token: Option<&str>) -> Option<f64> {
    token.and_then(parse_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_number("200"), Some(200.0));
        assert_eq!(parse_number("150.00"), Some(150.0));
        assert_eq!(parse_number(" 42.5 "), Some(42.5));
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(parse_number("30,000"), Some(30000.0));
        assert_eq!(parse_number("1,50,000.50"), Some(150000.5));
    }

    #[test]
    fn test_currency_prefix() {
        assert_eq!(parse_number("₹500000"), Some(500000.0));
        assert_eq!(parse_number("Rs. 1,200"), Some(1200.0));
        assert_eq!(parse_number("INR 75"), Some(75.0));
    }

    #[test]
    fn test_invalid_tokens_are_missing() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number(","), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_optional(None), None);
        assert_eq!(parse_optional(Some("7")), Some(7.0));
    }
}
