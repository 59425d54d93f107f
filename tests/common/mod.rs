#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, HashSet};

use futures::future::{FutureExt, LocalBoxFuture};
use serde_json::{Value, json};
use stock_view_wasm::application::{
    AnalysisRequest, AnalysisResponse, AnalysisTransport, ChartRenderer, DashboardController, DashboardView, Section,
};
use stock_view_wasm::config::{AppConfig, PlotConfig};
use stock_view_wasm::domain::{
    alerts::{Alert, AlertLevel},
    chart::{AxisRange, ChartCategory, ChartPlaceholder},
    errors::{NetworkResult, RenderingError, RenderingResult},
    market_data::{PriceChange, PriceTrend, Ticker},
};
use strum::IntoEnumIterator;

/// Everything the controller did to the page, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    LoadingShown(String),
    LoadingHidden,
    Section(Section, bool),
    Alert(AlertLevel, String, bool),
    AlertCleared,
    Metric(String, String),
    PriceChange(String, PriceTrend),
    ChartCleared(ChartCategory),
    Placeholder(ChartCategory, ChartPlaceholder),
    ChartError(ChartCategory, String, String),
    ChartMessageCleared(ChartCategory),
}

pub struct MockView {
    pub events: RefCell<Vec<ViewEvent>>,
    pub containers: RefCell<BTreeSet<ChartCategory>>,
    pub hidden: RefCell<BTreeSet<ChartCategory>>,
}

impl Default for MockView {
    fn default() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            containers: RefCell::new(ChartCategory::iter().collect()),
            hidden: RefCell::new(BTreeSet::new()),
        }
    }
}

impl MockView {
    fn record(&self, event: ViewEvent) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<(AlertLevel, String, bool)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Alert(level, message, auto_hide) => Some((level, message, auto_hide)),
                _ => None,
            })
            .collect()
    }

    pub fn metric(&self, slot_id: &str) -> Option<String> {
        self.events().into_iter().rev().find_map(|event| match event {
            ViewEvent::Metric(id, text) if id == slot_id => Some(text),
            _ => None,
        })
    }

    pub fn placeholders(&self) -> Vec<(ChartCategory, ChartPlaceholder)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Placeholder(category, placeholder) => Some((category, placeholder)),
                _ => None,
            })
            .collect()
    }

    pub fn position(&self, wanted: &ViewEvent) -> Option<usize> {
        self.events().iter().position(|event| event == wanted)
    }

    pub fn count(&self, wanted: impl Fn(&ViewEvent) -> bool) -> usize {
        self.events().iter().filter(|event| wanted(event)).count()
    }
}

impl DashboardView for MockView {
    fn show_loading(&self, ticker: &Ticker) {
        self.record(ViewEvent::LoadingShown(ticker.value().to_string()));
    }

    fn hide_loading(&self) {
        self.record(ViewEvent::LoadingHidden);
    }

    fn set_section_visible(&self, section: Section, visible: bool) {
        self.record(ViewEvent::Section(section, visible));
    }

    fn show_alert(&self, alert: &Alert) {
        self.record(ViewEvent::Alert(alert.level, alert.message.clone(), alert.auto_hide));
    }

    fn clear_alert(&self) {
        self.record(ViewEvent::AlertCleared);
    }

    fn set_metric(&self, slot_id: &str, text: &str) {
        self.record(ViewEvent::Metric(slot_id.to_string(), text.to_string()));
    }

    fn set_price_change(&self, change: &PriceChange) {
        self.record(ViewEvent::PriceChange(change.label(), change.trend));
    }

    fn has_chart_container(&self, category: ChartCategory) -> bool {
        self.containers.borrow().contains(&category)
    }

    fn is_chart_visible(&self, category: ChartCategory) -> bool {
        self.has_chart_container(category) && !self.hidden.borrow().contains(&category)
    }

    fn clear_chart(&self, category: ChartCategory) {
        self.record(ViewEvent::ChartCleared(category));
    }

    fn show_chart_placeholder(&self, category: ChartCategory, placeholder: ChartPlaceholder) {
        self.record(ViewEvent::Placeholder(category, placeholder));
    }

    fn show_chart_error(&self, category: ChartCategory, message: &str, retry_label: &str) {
        self.record(ViewEvent::ChartError(category, message.to_string(), retry_label.to_string()));
    }

    fn clear_chart_message(&self, category: ChartCategory) {
        self.record(ViewEvent::ChartMessageCleared(category));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderCall {
    pub container_id: String,
    pub traces: usize,
    pub layout: Value,
}

#[derive(Default)]
pub struct MockRenderer {
    pub renders: RefCell<Vec<RenderCall>>,
    pub relayouts: RefCell<Vec<(String, Value)>>,
    pub failing: RefCell<HashSet<String>>,
    pub ranges: RefCell<HashMap<String, (AxisRange, AxisRange)>>,
}

impl MockRenderer {
    pub fn fail_on(&self, category: ChartCategory) {
        self.failing.borrow_mut().insert(category.container_id().to_string());
    }

    pub fn recover(&self, category: ChartCategory) {
        self.failing.borrow_mut().remove(category.container_id());
    }

    pub fn rendered_ids(&self) -> Vec<String> {
        self.renders.borrow().iter().map(|call| call.container_id.clone()).collect()
    }
}

impl ChartRenderer for MockRenderer {
    fn render(&self, container_id: &str, data: &[Value], layout: &Value, _config: &PlotConfig) -> RenderingResult<()> {
        if self.failing.borrow().contains(container_id) {
            return Err(RenderingError::PlotFailed("plot exploded".to_string()));
        }
        self.renders.borrow_mut().push(RenderCall {
            container_id: container_id.to_string(),
            traces: data.len(),
            layout: layout.clone(),
        });
        Ok(())
    }

    fn relayout(&self, container_id: &str, update: &Value) -> RenderingResult<()> {
        self.relayouts.borrow_mut().push((container_id.to_string(), update.clone()));
        Ok(())
    }

    fn axis_ranges(&self, container_id: &str) -> RenderingResult<(AxisRange, AxisRange)> {
        self.ranges
            .borrow()
            .get(container_id)
            .copied()
            .ok_or_else(|| RenderingError::AxisUnavailable(format!("{} has no range", container_id)))
    }
}

pub struct MockTransport {
    pub response: RefCell<NetworkResult<AnalysisResponse>>,
    pub calls: Cell<usize>,
    pub last_request: RefCell<Option<AnalysisRequest>>,
}

impl MockTransport {
    pub fn returning(response: NetworkResult<AnalysisResponse>) -> Self {
        Self { response: RefCell::new(response), calls: Cell::new(0), last_request: RefCell::new(None) }
    }
}

impl AnalysisTransport for MockTransport {
    fn analyze<'a>(&'a self, request: &'a AnalysisRequest) -> LocalBoxFuture<'a, NetworkResult<AnalysisResponse>> {
        self.calls.set(self.calls.get() + 1);
        *self.last_request.borrow_mut() = Some(request.clone());
        let response = self.response.borrow().clone();
        async move { response }.boxed_local()
    }
}

pub type TestController = DashboardController<MockView, MockRenderer, MockTransport>;

pub fn controller(response: NetworkResult<AnalysisResponse>) -> TestController {
    DashboardController::new(
        MockView::default(),
        MockRenderer::default(),
        MockTransport::returning(response),
        AppConfig::default(),
    )
}

pub fn chart_payload() -> Value {
    json!({
        "data": [{ "type": "scatter", "x": [1, 2, 3], "y": [10, 12, 11] }],
        "layout": { "title": { "text": "AAPL" } }
    })
}

pub fn company_data() -> Value {
    json!({
        "name": "Apple Inc.",
        "sector": "Technology",
        "current_price": 189.5,
        "daily_change": 2.5,
        "daily_change_pct": "1.34%"
    })
}

pub fn all_charts() -> Value {
    let charts: serde_json::Map<String, Value> =
        ChartCategory::iter().map(|category| (category.as_ref().to_string(), chart_payload())).collect();
    Value::Object(charts)
}

pub fn full_response() -> AnalysisResponse {
    AnalysisResponse { error: None, company_data: Some(company_data()), charts: Some(all_charts()) }
}
