use std::cell::RefCell;

use crate::application::{
    chart_service::{ChartService, ChartSummary, RetryOutcome},
    dto::{AnalysisRequest, AnalysisResponse},
    ports::{AnalysisTransport, ChartRenderer, DashboardView, Section},
};
use crate::config::AppConfig;
use crate::domain::{
    alerts::{Alert, AlertLevel},
    chart::{ChartCache, ChartCategory, ChartPlaceholder},
    errors::RenderingResult,
    logging::{LogComponent, get_logger},
    market_data::{CompanyData, Ticker, project_company_data, services::DAILY_CHANGE_SLOT},
    state::SessionState,
};

/// How one submission ended. Exactly one per call to `submit`.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Empty ticker; nothing was sent.
    Rejected,
    ChartsRendered(ChartSummary),
    ChartsSkipped(ChartPlaceholder),
    /// The server reported an error alongside (possibly) some data.
    Partial { error: String },
    /// Transport/parse failure, or no company data in the response.
    Failed { message: String },
}

impl AnalysisOutcome {
    pub fn rendered_charts(&self) -> bool {
        matches!(self, AnalysisOutcome::ChartsRendered(summary) if summary.rendered > 0)
    }
}

/// View-sync controller: owns the session and drives view, renderer and
/// transport through their ports.
pub struct DashboardController<V, R, T> {
    view: V,
    renderer: R,
    transport: T,
    config: AppConfig,
    session: RefCell<SessionState>,
}

impl<V, R, T> DashboardController<V, R, T>
where
    V: DashboardView,
    R: ChartRenderer,
    T: AnalysisTransport,
{
    pub fn new(view: V, renderer: R, transport: T, config: AppConfig) -> Self {
        get_logger().info(
            LogComponent::Controller,
            "Creating dashboard controller",
        );
        Self { view, renderer, transport, config, session: RefCell::new(SessionState::default()) }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn active_ticker(&self) -> Option<Ticker> {
        self.session.borrow().active_ticker.clone()
    }

    pub fn cached_categories(&self) -> Vec<ChartCategory> {
        self.session.borrow().chart_cache.categories().collect()
    }

    pub fn charts(&self) -> ChartService<'_, V, R> {
        ChartService::new(&self.view, &self.renderer, &self.config.plot, &self.session)
    }

    /// Validate the ticker, fetch its analysis and sync the page with it.
    pub async fn submit(&self, raw_ticker: &str, disable_charts: bool) -> AnalysisOutcome {
        let ticker = match Ticker::parse(raw_ticker) {
            Ok(ticker) => ticker,
            Err(e) => {
                get_logger().warn(LogComponent::Controller, &format!("Rejected ticker: {}", e));
                self.view.show_alert(&Alert::new(AlertLevel::Warning, "Please enter a ticker symbol"));
                return AnalysisOutcome::Rejected;
            }
        };

        self.begin_loading(&ticker);

        get_logger().info(
            LogComponent::Controller,
            &format!("📡 Fetching data for {}", ticker),
        );
        let request = AnalysisRequest::new(ticker.clone(), disable_charts);
        let result = self.transport.analyze(&request).await;

        self.view.hide_loading();

        match result {
            Ok(response) => self.apply_response(&ticker, response, disable_charts),
            Err(e) => {
                get_logger().error(
                    LogComponent::Controller,
                    &format!("❌ Error in fetch operation: {}", e),
                );
                let message = format!("Failed to retrieve data: {}", e);
                self.view.show_alert(&Alert::new(AlertLevel::Danger, message.clone()));
                AnalysisOutcome::Failed { message }
            }
        }
    }

    /// Write company data into the metric slots and reveal the result panels.
    /// Returns whether projection succeeded; failures become a warning alert.
    pub fn display_company_data(&self, company_data: &serde_json::Value) -> bool {
        let data = match CompanyData::from_value(company_data) {
            Ok(data) => data,
            Err(e) => {
                get_logger().error(
                    LogComponent::Controller,
                    &format!("Error displaying company data: {}", e),
                );
                self.view.show_alert(&Alert::new(
                    AlertLevel::Warning,
                    format!("Error displaying company data: {}", e),
                ));
                return false;
            }
        };

        let ticker = self.active_ticker();
        let projection = project_company_data(&data, ticker.as_ref());
        for (slot_id, text) in &projection.metrics {
            self.view.set_metric(slot_id, text);
        }
        match &projection.price_change {
            Some(change) => self.view.set_price_change(change),
            None => {
                crate::log_debug!(
                    LogComponent::Controller,
                    "No daily change for #{}",
                    DAILY_CHANGE_SLOT
                );
            }
        }

        for section in Section::ALL {
            self.view.set_section_visible(section, true);
        }

        crate::log_debug!(
            LogComponent::Controller,
            "Projected {} fields, {} slots show placeholders",
            data.len(),
            projection.missing().count()
        );
        true
    }

    /// Redraw one chart from the cache; bound to the inline retry buttons.
    pub fn retry_chart(&self, category: ChartCategory) -> RetryOutcome {
        self.charts().retry(category)
    }

    pub fn resize_visible_charts(&self) -> usize {
        self.charts().resize_visible()
    }

    pub fn resize_chart(&self, category: ChartCategory) -> bool {
        self.charts().resize(category)
    }

    pub fn zoom_chart(&self, category: ChartCategory, factor: f64) -> RenderingResult<()> {
        self.charts().zoom(category, factor)
    }

    fn begin_loading(&self, ticker: &Ticker) {
        self.session.borrow_mut().begin(ticker.clone());
        self.view.show_loading(ticker);
        self.view.set_section_visible(Section::CompanyData, false);
        self.view.set_section_visible(Section::AdvancedMetrics, false);
        self.view.set_section_visible(Section::AnalysisResults, false);
        self.view.clear_alert();
    }

    fn apply_response(&self, ticker: &Ticker, response: AnalysisResponse, disable_charts: bool) -> AnalysisOutcome {
        if let Some(error) = response.error_message() {
            get_logger().warn(
                LogComponent::Controller,
                &format!("Server reported an error for {}: {}", ticker, error),
            );
            self.view.show_alert(&Alert::new(AlertLevel::Danger, format!("Error: {}", error)));
            if let Some(company_data) = &response.company_data {
                let has_name = CompanyData::from_value(company_data)
                    .map(|data| data.has_name())
                    .unwrap_or(false);
                if has_name {
                    self.display_company_data(company_data);
                }
            }
            return AnalysisOutcome::Partial { error };
        }

        let Some(company_data) = response.company_data.as_ref().filter(|data| !data.is_null()) else {
            let message = "No company data received".to_string();
            self.view.show_alert(&Alert::new(AlertLevel::Danger, message.clone()));
            return AnalysisOutcome::Failed { message };
        };

        let charts = response.charts();
        match charts {
            Some(charts) => {
                let cache = ChartCache::from_response(charts);
                crate::log_debug!(
                    LogComponent::Controller,
                    "Charts received: {:?}",
                    cache.categories().collect::<Vec<_>>()
                );
                self.session.borrow_mut().replace_cache(cache);
            }
            None => {
                get_logger().info(
                    LogComponent::Controller,
                    "No charts data available",
                );
            }
        }

        self.display_company_data(company_data);

        if disable_charts || charts.is_none() {
            let placeholder = if disable_charts {
                ChartPlaceholder::Disabled
            } else {
                ChartPlaceholder::Unavailable
            };
            self.charts().show_placeholders(placeholder);
            self.view.show_alert(&Alert::auto_hiding(
                AlertLevel::Success,
                format!("Basic data loaded for {}", ticker),
            ));
            return AnalysisOutcome::ChartsSkipped(placeholder);
        }

        let cache = self.session.borrow().chart_cache.clone();
        let summary = self.charts().render_all(&cache);
        if summary.all_failed() {
            self.view.show_alert(&Alert::new(
                AlertLevel::Warning,
                format!("Data loaded, but charts could not be rendered for {}", ticker),
            ));
        } else {
            self.view.show_alert(&Alert::auto_hiding(
                AlertLevel::Success,
                format!("Data loaded successfully for {}", ticker),
            ));
        }
        AnalysisOutcome::ChartsRendered(summary)
    }
}
