use serde::{Deserialize, Serialize};

use crate::domain::errors::ConfigurationError;
use crate::domain::logging::LogLevel;

/// Id of the optional `<script type="application/json">` block holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

/// Runtime settings for the dashboard. Every field has a default, so the
/// page may override any subset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analyze_endpoint: String,
    pub alert_auto_hide_ms: u32,
    pub tab_resize_delay_ms: u32,
    pub fullscreen_resize_delay_ms: u32,
    pub log_level: LogLevel,
    pub plot: PlotConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analyze_endpoint: "/analyze".to_string(),
            alert_auto_hide_ms: 5_000,
            tab_resize_delay_ms: 10,
            fullscreen_resize_delay_ms: 100,
            log_level: LogLevel::Debug,
            plot: PlotConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigurationError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| ConfigurationError::MalformedConfig(e.to_string()))
    }
}

/// Options passed to the plotting library with every new plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub responsive: bool,
    #[serde(rename = "displayModeBar")]
    pub display_mode_bar: bool,
    #[serde(rename = "modeBarButtonsToAdd")]
    pub mode_bar_buttons_to_add: Vec<String>,
    #[serde(rename = "scrollZoom")]
    pub scroll_zoom: bool,
    pub displaylogo: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            responsive: true,
            display_mode_bar: true,
            mode_bar_buttons_to_add: vec!["toImage".to_string(), "resetScale2d".to_string()],
            scroll_zoom: true,
            displaylogo: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "alert_auto_hide_ms": 1000, "plot": { "scrollZoom": false } }"#).unwrap();
        assert_eq!(config.alert_auto_hide_ms, 1000);
        assert_eq!(config.analyze_endpoint, "/analyze");
        assert!(!config.plot.scroll_zoom);
        assert!(config.plot.responsive);
    }

    #[test]
    fn blank_config_is_default() {
        assert_eq!(AppConfig::from_json("  ").unwrap(), AppConfig::default());
    }

    #[test]
    fn malformed_config_is_reported() {
        assert!(matches!(
            AppConfig::from_json("{ nope"),
            Err(ConfigurationError::MalformedConfig(_))
        ));
    }
}
