//! Capabilities the controller needs from the outside world. The browser
//! implementations live in `infrastructure`; tests supply in-memory ones.

use futures::future::LocalBoxFuture;
use serde_json::Value;

use crate::application::dto::{AnalysisRequest, AnalysisResponse};
use crate::config::PlotConfig;
use crate::domain::{
    alerts::Alert,
    chart::{AxisRange, ChartCategory, ChartPlaceholder},
    errors::{NetworkResult, RenderingResult},
    market_data::{PriceChange, Ticker},
};

/// Result panels toggled as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    CompanyData,
    AdvancedMetrics,
    OwnershipAssets,
    AnalysisResults,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::CompanyData,
        Section::AdvancedMetrics,
        Section::OwnershipAssets,
        Section::AnalysisResults,
    ];

    pub fn element_id(&self) -> &'static str {
        match self {
            Section::CompanyData => "companyData",
            Section::AdvancedMetrics => "advancedMetrics",
            Section::OwnershipAssets => "ownershipAssetsSection",
            Section::AnalysisResults => "analysisResults",
        }
    }

    /// CSS `display` value used when the section is shown.
    pub fn display(&self) -> &'static str {
        match self {
            Section::CompanyData | Section::AdvancedMetrics => "flex",
            Section::OwnershipAssets | Section::AnalysisResults => "block",
        }
    }
}

/// Everything the controller writes to the page.
pub trait DashboardView {
    fn show_loading(&self, ticker: &Ticker);
    fn hide_loading(&self);
    fn set_section_visible(&self, section: Section, visible: bool);

    fn show_alert(&self, alert: &Alert);
    fn clear_alert(&self);

    fn set_metric(&self, slot_id: &str, text: &str);
    fn set_price_change(&self, change: &PriceChange);

    fn has_chart_container(&self, category: ChartCategory) -> bool;
    fn is_chart_visible(&self, category: ChartCategory) -> bool;
    fn clear_chart(&self, category: ChartCategory);
    fn show_chart_placeholder(&self, category: ChartCategory, placeholder: ChartPlaceholder);
    /// Inline error with a retry button labelled `retry_label`.
    fn show_chart_error(&self, category: ChartCategory, message: &str, retry_label: &str);
    /// Drop any inline alert left in the container, keeping the plot.
    fn clear_chart_message(&self, category: ChartCategory);
}

/// Plotting library seam.
pub trait ChartRenderer {
    fn render(&self, container_id: &str, data: &[Value], layout: &Value, config: &PlotConfig) -> RenderingResult<()>;
    fn relayout(&self, container_id: &str, update: &Value) -> RenderingResult<()>;
    /// Current (x, y) ranges of the plot's primary axes.
    fn axis_ranges(&self, container_id: &str) -> RenderingResult<(AxisRange, AxisRange)>;
}

/// Network seam for the analyze endpoint.
pub trait AnalysisTransport {
    fn analyze<'a>(&'a self, request: &'a AnalysisRequest) -> LocalBoxFuture<'a, NetworkResult<AnalysisResponse>>;
}
