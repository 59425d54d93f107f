use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use js_sys::{Function, Reflect};
use strum::IntoEnumIterator;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use crate::application::ports::{DashboardView, Section};
use crate::domain::{
    alerts::{Alert, AlertLevel},
    chart::{ChartCategory, ChartPlaceholder},
    errors::UiError,
    logging::{LogComponent, get_logger},
    market_data::{
        METRIC_SLOTS, PriceChange, Ticker,
        services::{DAILY_CHANGE_SLOT, SYMBOL_SLOT},
    },
};

pub const FORM_ID: &str = "analysisForm";
pub const TICKER_INPUT_ID: &str = "ticker";
pub const DISABLE_CHARTS_ID: &str = "disableCharts";
pub const LOADING_SPINNER_ID: &str = "loadingSpinner";
pub const LOADING_TICKER_ID: &str = "loadingTicker";
pub const ALERT_ID: &str = "alertMessage";

/// Attribute carried by inline retry buttons; value is the chart container id.
pub const RETRY_ATTRIBUTE: &str = "data-retry-chart";

/// Typed lookup table of every element the dashboard touches, resolved once.
/// Absent elements are logged here and skipped on every later write.
pub struct ViewBindings {
    pub document: Document,
    pub form: Option<HtmlElement>,
    pub ticker_input: Option<HtmlInputElement>,
    pub disable_charts: Option<HtmlInputElement>,
    pub loading_spinner: Option<HtmlElement>,
    pub loading_ticker: Option<HtmlElement>,
    pub alert: Option<HtmlElement>,
    pub sections: HashMap<Section, HtmlElement>,
    pub charts: BTreeMap<ChartCategory, HtmlElement>,
    pub metrics: HashMap<&'static str, HtmlElement>,
}

impl ViewBindings {
    pub fn from_window() -> Result<Self, UiError> {
        let window = web_sys::window().ok_or(UiError::WindowUnavailable)?;
        let document = window.document().ok_or(UiError::DocumentUnavailable)?;
        Ok(Self::bind(document))
    }

    pub fn bind(document: Document) -> Self {
        let sections = Section::ALL
            .into_iter()
            .filter_map(|section| lookup::<HtmlElement>(&document, section.element_id(), true).map(|el| (section, el)))
            .collect();

        let charts = ChartCategory::iter()
            .filter_map(|category| {
                lookup::<HtmlElement>(&document, category.container_id(), true).map(|el| (category, el))
            })
            .collect();

        let metrics: HashMap<&'static str, HtmlElement> = METRIC_SLOTS
            .iter()
            .map(|slot| slot.slot_id)
            .chain([SYMBOL_SLOT, DAILY_CHANGE_SLOT])
            .filter_map(|id| lookup::<HtmlElement>(&document, id, false).map(|el| (id, el)))
            .collect();

        let bindings = Self {
            form: lookup(&document, FORM_ID, true),
            ticker_input: lookup(&document, TICKER_INPUT_ID, true),
            disable_charts: lookup(&document, DISABLE_CHARTS_ID, false),
            loading_spinner: lookup(&document, LOADING_SPINNER_ID, true),
            loading_ticker: lookup(&document, LOADING_TICKER_ID, false),
            alert: lookup(&document, ALERT_ID, true),
            sections,
            charts,
            metrics,
            document,
        };

        get_logger().info(
            LogComponent::Dom,
            &format!(
                "Bound {} metric slots, {} chart containers",
                bindings.metrics.len(),
                bindings.charts.len()
            ),
        );
        bindings
    }
}

fn lookup<T: JsCast>(document: &Document, id: &str, required: bool) -> Option<T> {
    let found = document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok());
    if found.is_none() {
        if required {
            get_logger().warn(
                LogComponent::Dom,
                &format!("Element with ID '{}' not found in the DOM", id),
            );
        } else {
            crate::log_debug!(
                LogComponent::Dom,
                "Element with ID '{}' not found in the DOM",
                id
            );
        }
    }
    found
}

/// Result of a fullscreen toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenChange {
    Entered,
    Exited,
}

/// `DashboardView` over the real page.
pub struct DomView {
    bindings: ViewBindings,
    alert_auto_hide_ms: u32,
    /// Bumped on every banner change so stale auto-hide timers do nothing.
    alert_generation: Rc<Cell<u64>>,
}

impl DomView {
    pub fn new(bindings: ViewBindings, alert_auto_hide_ms: u32) -> Self {
        Self { bindings, alert_auto_hide_ms, alert_generation: Rc::new(Cell::new(0)) }
    }

    pub fn bindings(&self) -> &ViewBindings {
        &self.bindings
    }

    pub fn document(&self) -> &Document {
        &self.bindings.document
    }

    pub fn ticker_value(&self) -> String {
        self.bindings
            .ticker_input
            .as_ref()
            .map(|input| input.value())
            .unwrap_or_default()
    }

    /// Charts stay off when the checkbox is missing from the page.
    pub fn charts_disabled(&self) -> bool {
        self.bindings
            .disable_charts
            .as_ref()
            .map(|checkbox| checkbox.checked())
            .unwrap_or(true)
    }

    /// Activate the pane a nav link points at. Returns the chart category
    /// shown in that pane, if any.
    pub fn activate_tab(&self, link: &Element) -> Option<ChartCategory> {
        let href = link.get_attribute("href")?;
        let document = self.document();

        for pane in query_all(document, ".tab-pane") {
            let _ = pane.class_list().remove_2("show", "active");
        }
        for other in query_all(document, ".nav-tabs .nav-link") {
            let _ = other.class_list().remove_1("active");
        }
        let _ = link.class_list().add_1("active");

        match document.query_selector(&href) {
            Ok(Some(pane)) => {
                let _ = pane.class_list().add_2("show", "active");
            }
            _ => {
                get_logger().warn(
                    LogComponent::Dom,
                    &format!("Tab pane '{}' not found", href),
                );
                return None;
            }
        }
        ChartCategory::from_tab_target(&href)
    }

    /// Put the chart container into fullscreen, or leave fullscreen if
    /// anything is already presented that way.
    pub fn toggle_fullscreen(&self, category: ChartCategory) -> Result<FullscreenChange, UiError> {
        let container = self
            .bindings
            .charts
            .get(&category)
            .ok_or_else(|| UiError::ElementNotFound(category.container_id().to_string()))?;
        let document = self.document();

        if document.fullscreen_element().is_some() {
            document.exit_fullscreen();
            return Ok(FullscreenChange::Exited);
        }

        if container.request_fullscreen().is_ok() {
            return Ok(FullscreenChange::Entered);
        }
        call_prefixed(container, "webkitRequestFullscreen")?;
        Ok(FullscreenChange::Entered)
    }

    fn set_display(&self, element: &HtmlElement, display: &str) {
        if let Err(e) = element.style().set_property("display", display) {
            get_logger().error(
                LogComponent::Dom,
                &format!("Failed to set display on #{}: {:?}", element.id(), e),
            );
        }
    }

    fn chart_container(&self, category: ChartCategory) -> Option<&HtmlElement> {
        self.bindings.charts.get(&category)
    }

    fn alert_block(&self, level: AlertLevel, message: &str) -> Option<Element> {
        let block = self.document().create_element("div").ok()?;
        block.set_class_name(&level.css_class());
        block.set_text_content(Some(message));
        Some(block)
    }

    fn append(&self, parent: &HtmlElement, child: &Element) {
        if let Err(e) = parent.append_child(child) {
            get_logger().error(
                LogComponent::Dom,
                &format!("Failed to append to #{}: {:?}", parent.id(), e),
            );
        }
    }
}

impl DashboardView for DomView {
    fn show_loading(&self, ticker: &Ticker) {
        if let Some(spinner) = &self.bindings.loading_spinner {
            self.set_display(spinner, "flex");
        }
        if let Some(label) = &self.bindings.loading_ticker {
            label.set_text_content(Some(ticker.value()));
        }
    }

    fn hide_loading(&self) {
        if let Some(spinner) = &self.bindings.loading_spinner {
            self.set_display(spinner, "none");
        }
    }

    fn set_section_visible(&self, section: Section, visible: bool) {
        if let Some(element) = self.bindings.sections.get(&section) {
            self.set_display(element, if visible { section.display() } else { "none" });
        }
    }

    fn show_alert(&self, alert: &Alert) {
        let Some(banner) = self.bindings.alert.clone() else {
            get_logger().warn(LogComponent::Dom, "Alert element not found in DOM");
            return;
        };
        banner.set_class_name(&alert.banner_class());
        banner.set_text_content(Some(&alert.message));
        self.set_display(&banner, "block");

        let generation = self.alert_generation.get() + 1;
        self.alert_generation.set(generation);

        if alert.auto_hide {
            let current = Rc::clone(&self.alert_generation);
            Timeout::new(self.alert_auto_hide_ms, move || {
                if current.get() == generation {
                    let _ = banner.style().set_property("display", "none");
                }
            })
            .forget();
        }
    }

    fn clear_alert(&self) {
        self.alert_generation.set(self.alert_generation.get() + 1);
        if let Some(banner) = &self.bindings.alert {
            self.set_display(banner, "none");
            banner.set_text_content(Some(""));
        }
    }

    fn set_metric(&self, slot_id: &str, text: &str) {
        match self.bindings.metrics.get(slot_id) {
            Some(element) => element.set_text_content(Some(text)),
            None => {
                crate::log_trace!(LogComponent::Dom, "Skipping absent slot '{}'", slot_id);
            }
        }
    }

    fn set_price_change(&self, change: &PriceChange) {
        let Some(element) = self.bindings.metrics.get(DAILY_CHANGE_SLOT) else {
            return;
        };
        element.set_inner_html("");
        if let Ok(span) = self.document().create_element("span") {
            span.set_class_name(change.trend.css_class());
            span.set_text_content(Some(&change.label()));
            self.append(element, &span);
        }
    }

    fn has_chart_container(&self, category: ChartCategory) -> bool {
        self.bindings.charts.contains_key(&category)
    }

    fn is_chart_visible(&self, category: ChartCategory) -> bool {
        self.chart_container(category)
            .map(|container| container.client_width() > 0 || container.client_height() > 0)
            .unwrap_or(false)
    }

    fn clear_chart(&self, category: ChartCategory) {
        if let Some(container) = self.chart_container(category) {
            container.set_inner_html("");
        }
    }

    fn show_chart_placeholder(&self, category: ChartCategory, placeholder: ChartPlaceholder) {
        let Some(container) = self.chart_container(category) else {
            return;
        };
        if let Some(block) = self.alert_block(placeholder.level(), placeholder.message()) {
            self.append(container, &block);
        }
    }

    fn show_chart_error(&self, category: ChartCategory, message: &str, retry_label: &str) {
        let Some(container) = self.chart_container(category) else {
            return;
        };
        container.set_inner_html("");
        let Some(block) = self.alert_block(AlertLevel::Danger, message) else {
            return;
        };
        if let Ok(button) = self.document().create_element("button") {
            button.set_class_name("btn btn-sm btn-outline-primary mt-2");
            let _ = button.set_attribute("type", "button");
            let _ = button.set_attribute(RETRY_ATTRIBUTE, category.container_id());
            button.set_text_content(Some(retry_label));
            let _ = block.append_child(&button);
        }
        self.append(container, &block);
    }

    fn clear_chart_message(&self, category: ChartCategory) {
        if let Some(container) = self.chart_container(category) {
            if let Ok(Some(alert)) = container.query_selector(".alert") {
                alert.remove();
            }
        }
    }
}

/// Every element matching `selector`, skipping non-element nodes.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|idx| nodes.get(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn call_prefixed(target: &HtmlElement, method: &str) -> Result<(), UiError> {
    let function = Reflect::get(target, &JsValue::from_str(method))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or_else(|| UiError::BrowserApi(format!("{} is not supported", method)))?;
    function
        .call0(target)
        .map(|_| ())
        .map_err(|e| UiError::BrowserApi(format!("{} failed: {:?}", method, e)))
}
