use serde_json::{Map, Value};

use super::value_objects::{PriceTrend, display_value, format_number, parse_leading_float};
use crate::domain::errors::ValidationError;

/// Entity - flat company metrics as delivered by the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyData {
    fields: Map<String, Value>,
}

impl CompanyData {
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(fields) => Ok(Self { fields: fields.clone() }),
            other => Err(ValidationError::CompanyDataNotObject(json_kind(other).to_string())),
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Display text for `key`, `None` when missing or falsy.
    pub fn display(&self, key: &str) -> Option<String> {
        self.field(key).and_then(display_value)
    }

    pub fn has_name(&self) -> bool {
        self.display("name").is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The daily change indicator, if both the change and its percentage are present.
    pub fn price_change(&self) -> Option<PriceChange> {
        let change = self.field("daily_change").filter(|v| is_present(v))?;
        let percent = self.field("daily_change_pct").filter(|v| is_present(v))?;
        let change = match change {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => parse_leading_float(s)?,
            _ => return None,
        };
        let percent = match percent {
            Value::String(s) => s.clone(),
            other => display_value(other).unwrap_or_else(|| "0".to_string()),
        };
        Some(PriceChange::new(change, percent))
    }
}

/// Entity - derived daily change shown next to the current price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChange {
    pub change: f64,
    pub percent: String,
    pub trend: PriceTrend,
}

impl PriceChange {
    pub fn new(change: f64, percent: String) -> Self {
        Self { change, percent, trend: PriceTrend::from_change(change) }
    }

    /// `+2.5 (1.3%)` for gains, `-1.2 (-0.8%)` for losses, `0 (0.00%)` when flat.
    pub fn label(&self) -> String {
        let sign = if self.trend == PriceTrend::Positive { "+" } else { "" };
        format!("{}{} ({})", sign, format_number(self.change), self.percent)
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
