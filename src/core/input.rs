use serde::Deserialize;
use serde::de::IgnoredAny;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
    // booleans, objects and arrays
    Other(IgnoredAny),
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

/// Text loses `,` and the full-width `，` before parsing, so "1，234" reads
/// as 1234 rather than stopping at the comma.
pub fn parse_number_input(raw: &NumericInput) -> f64 {
    match raw {
        NumericInput::Number(value) => *value,
        NumericInput::Text(text) => parse_text(text),
        NumericInput::Other(_) => 0.0,
    }
}

fn parse_text(text: &str) -> f64 {
    let normalized: String = text
        .chars()
        .filter(|c| !matches!(c, ',' | '\u{FF0C}'))
        .map(|c| match c {
            '\u{FF10}'..='\u{FF19}' => {
                char::from(b'0' + (c as u32 - '\u{FF10}' as u32) as u8)
            }
            other => other,
        })
        .collect();

    let trimmed = normalized.trim_start();
    let literal = &trimmed[..leading_literal_len(trimmed)];
    literal.parse::<f64>().unwrap_or(0.0)
}

// `[+-]digits[.digits][e[+-]digits]` or a leading `Infinity`
fn leading_literal_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return end + "Infinity".len();
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    end
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> f64 {
        parse_number_input(&NumericInput::from(text))
    }

    #[test]
    fn strips_thousands_separators() {
        assert_eq!(parse("5,000,000"), 5_000_000.0);
        assert_eq!(parse("1，234"), 1_234.0);
    }

    #[test]
    fn normalizes_full_width_digits() {
        assert_eq!(parse("１２３"), 123.0);
        assert_eq!(parse("１０，０００，０００"), 10_000_000.0);
    }

    #[test]
    fn empty_or_garbage_text_is_zero() {
        assert_eq!(parse(""), 0.0);
        assert_eq!(parse("   "), 0.0);
        assert_eq!(parse("abc"), 0.0);
        assert_eq!(parse("-"), 0.0);
        assert_eq!(parse("."), 0.0);
    }

    #[test]
    fn numbers_pass_through_unchanged() {
        assert_eq!(parse_number_input(&NumericInput::from(42.0)), 42.0);
        assert_eq!(parse_number_input(&NumericInput::from(-3.5)), -3.5);
    }

    #[test]
    fn parses_leading_literal_and_ignores_trailing_text() {
        assert_eq!(parse("  1200万"), 1_200.0);
        assert_eq!(parse("12.5yen"), 12.5);
        assert_eq!(parse(".5"), 0.5);
        assert_eq!(parse("-7"), -7.0);
        assert_eq!(parse("3e6"), 3_000_000.0);
        assert_eq!(parse("3e"), 3.0);
        assert_eq!(parse("1.2.3"), 1.2);
        assert_eq!(parse("Infinity"), f64::INFINITY);
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let values: Vec<NumericInput> =
            serde_json::from_str(r#"[5000000, "10,000,000"]"#).expect("valid json");
        assert_eq!(values[0], NumericInput::Number(5_000_000.0));
        assert_eq!(values[1], NumericInput::Text("10,000,000".to_string()));
    }

    #[test]
    fn non_numeric_json_values_parse_as_zero() {
        let values: Vec<NumericInput> =
            serde_json::from_str(r#"[true, false, {}, {"amount": 5}, [1, 2]]"#)
                .expect("valid json");
        for value in &values {
            assert_eq!(*value, NumericInput::Other(IgnoredAny));
            assert_eq!(parse_number_input(value), 0.0);
        }
    }
}
