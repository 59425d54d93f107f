use wasm_bindgen::prelude::*;

use crate::config::{AppConfig, CONFIG_ELEMENT_ID};
use crate::domain::errors::ConfigurationError;
use crate::domain::logging::{LogComponent, get_logger};

pub mod application;
pub mod config;
pub mod domain;
pub mod event_utils;
pub mod infrastructure;
pub mod presentation;

/// Entry point: installs logging, reads page config and wires the dashboard.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new(config.log_level));
    domain::logging::init_logger(console_logger);
    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    if let Some(e) = config_error {
        get_logger().warn(
            LogComponent::Startup,
            &format!("⚠️ {}; using defaults", e),
        );
    }

    match presentation::mount(config) {
        Ok(_) => get_logger().info(
            LogComponent::Startup,
            "🚀 Stock dashboard initialized",
        ),
        Err(e) => get_logger().error(
            LogComponent::Startup,
            &format!("❌ Dashboard could not start: {}", e),
        ),
    }
}

/// Reads the optional JSON config block; an absent block means defaults.
fn load_config() -> Result<AppConfig, ConfigurationError> {
    let raw = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content())
        .unwrap_or_default();
    AppConfig::from_json(&raw)
}
