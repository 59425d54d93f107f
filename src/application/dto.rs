use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::market_data::{Ticker, value_objects::display_value};

/// Form submitted to the analyze endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub ticker: Ticker,
    pub disable_charts: bool,
}

impl AnalysisRequest {
    pub fn new(ticker: Ticker, disable_charts: bool) -> Self {
        Self { ticker, disable_charts }
    }

    /// Multipart form fields in submission order. Mock data is never requested.
    pub fn form_fields(&self) -> [(&'static str, String); 3] {
        [
            ("ticker", self.ticker.value().to_string()),
            ("use_mock", "false".to_string()),
            ("disable_charts", self.disable_charts.to_string()),
        ]
    }
}

/// JSON body returned by the analyze endpoint. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub company_data: Option<Value>,
    #[serde(default)]
    pub charts: Option<Value>,
}

impl AnalysisResponse {
    /// Server-reported error; empty strings and `null` count as none.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().and_then(display_value)
    }

    pub fn charts(&self) -> Option<&Map<String, Value>> {
        self.charts.as_ref().and_then(Value::as_object)
    }
}
