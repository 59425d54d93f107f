use derive_more::Display;
use serde::Serialize;
use serde_json::Value;

use crate::domain::errors::ValidationError;

/// Text shown in place of any absent metric.
pub const PLACEHOLDER: &str = "N/A";

/// Value Object - normalised ticker symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize)]
pub struct Ticker(String);

impl Ticker {
    /// Trim and upper-case user input. Whitespace-only input is rejected.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }
        Ok(Self(normalized))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Sign of a daily price change, mapped onto Bootstrap text colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTrend {
    Positive,
    Neutral,
    Negative,
}

impl PriceTrend {
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            PriceTrend::Positive
        } else if change < 0.0 {
            PriceTrend::Negative
        } else {
            PriceTrend::Neutral
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            PriceTrend::Positive => "text-success",
            PriceTrend::Neutral => "text-muted",
            PriceTrend::Negative => "text-danger",
        }
    }
}

/// Format a number the way a browser's `String(n)` would: plain digits in
/// `[1e-6, 1e21)`, exponent form (`1e+21`, `1.5e-7`) outside it.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || (magnitude != 0.0 && magnitude < 1e-6) {
        let shortest = format!("{:e}", value);
        return match shortest.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
            _ => shortest,
        };
    }
    if value.fract() == 0.0 && magnitude < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Display text for a metric, or `None` when the value counts as absent
/// (`null`, `false`, `0`, `""`).
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => {
            let as_float = n.as_f64()?;
            if as_float == 0.0 {
                None
            } else if let Some(int) = n.as_i64() {
                Some(int.to_string())
            } else {
                Some(format_number(as_float))
            }
        }
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(|item| display_value(item).unwrap_or_default()).collect();
            Some(parts.join(","))
        }
        Value::Object(_) => Some("[object Object]".to_string()),
    }
}

/// Leading numeric prefix of a string, like `parseFloat`.
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '+' | '-' if idx == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = idx + ch.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    trimmed[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ticker_is_trimmed_and_uppercased() {
        assert_eq!(Ticker::parse("  aapl \n").unwrap().value(), "AAPL");
    }

    #[test]
    fn blank_ticker_is_rejected() {
        assert_eq!(Ticker::parse(" \t ").unwrap_err(), ValidationError::EmptyTicker);
    }

    #[test]
    fn falsy_values_have_no_display() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert_eq!(display_value(&value), None, "{value}");
        }
    }

    #[test]
    fn numbers_print_like_a_browser() {
        assert_eq!(display_value(&json!(100)).as_deref(), Some("100"));
        assert_eq!(display_value(&json!(100.0)).as_deref(), Some("100"));
        assert_eq!(display_value(&json!(2.5)).as_deref(), Some("2.5"));
        assert_eq!(display_value(&json!("$2.5B")).as_deref(), Some("$2.5B"));
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn leading_float_ignores_suffix() {
        assert_eq!(parse_leading_float("+2.50"), Some(2.5));
        assert_eq!(parse_leading_float("-1.2%"), Some(-1.2));
        assert_eq!(parse_leading_float("N/A"), None);
    }
}
