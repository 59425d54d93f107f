#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use leptos::ev;
use stock_view_wasm::application::{DashboardView, Section};
use stock_view_wasm::domain::{
    alerts::{Alert, AlertLevel},
    chart::{ChartCategory, ChartPlaceholder},
    market_data::{PriceChange, Ticker},
};
use stock_view_wasm::event_utils::{
    EventListenerHandle, EventOptions, replace_listener, window_event_listener_with_options,
};
use stock_view_wasm::infrastructure::{DomView, ViewBindings, dom::RETRY_ATTRIBUTE};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const PAGE: &str = r##"
<form id="analysisForm">
  <input id="ticker" value=" tsla ">
  <input id="disableCharts" type="checkbox">
</form>
<div id="loadingSpinner" style="display:none"><span id="loadingTicker"></span></div>
<div id="alertMessage" style="display:none"></div>
<div id="companyData" style="display:none"><span id="companyName"></span><span id="dailyChange"></span></div>
<div id="analysisResults" style="display:none">
  <ul class="nav-tabs"><a class="nav-link active" href="#summary">S</a><a class="nav-link" href="#price">P</a></ul>
  <div id="summary" class="tab-pane show active"><div id="summaryChart"></div></div>
  <div id="price" class="tab-pane"><div id="priceChart"></div></div>
</div>
"##;

fn mount() -> DomView {
    let document = web_sys::window().unwrap().document().unwrap();
    document.body().unwrap().set_inner_html(PAGE);
    DomView::new(ViewBindings::bind(document), 5_000)
}

fn element(view: &DomView, id: &str) -> web_sys::HtmlElement {
    view.document().get_element_by_id(id).unwrap().dyn_into().unwrap()
}

#[wasm_bindgen_test]
fn binds_only_present_elements() {
    let view = mount();

    assert!(view.has_chart_container(ChartCategory::Summary));
    assert!(!view.has_chart_container(ChartCategory::Volume));
    assert_eq!(view.ticker_value(), " tsla ");
    assert!(!view.charts_disabled());
}

#[wasm_bindgen_test]
fn loading_and_sections_toggle_display() {
    let view = mount();
    let ticker = Ticker::parse("tsla").unwrap();

    view.show_loading(&ticker);
    assert_eq!(element(&view, "loadingTicker").text_content().unwrap(), "TSLA");
    assert_eq!(element(&view, "loadingSpinner").style().get_property_value("display").unwrap(), "flex");

    view.hide_loading();
    view.set_section_visible(Section::CompanyData, true);
    assert_eq!(element(&view, "loadingSpinner").style().get_property_value("display").unwrap(), "none");
    assert_eq!(element(&view, "companyData").style().get_property_value("display").unwrap(), "flex");
}

#[wasm_bindgen_test]
fn alert_banner_uses_level_class() {
    let view = mount();

    view.show_alert(&Alert::new(AlertLevel::Warning, "Please enter a ticker symbol"));

    let banner = element(&view, "alertMessage");
    assert_eq!(banner.class_name(), "alert alert-warning mt-3");
    assert_eq!(banner.text_content().unwrap(), "Please enter a ticker symbol");

    view.clear_alert();
    assert_eq!(banner.style().get_property_value("display").unwrap(), "none");
}

#[wasm_bindgen_test]
fn price_change_is_coloured() {
    let view = mount();

    view.set_metric("companyName", "Tesla");
    view.set_price_change(&PriceChange::new(-1.2, "-0.8%".to_string()));

    assert_eq!(element(&view, "companyName").text_content().unwrap(), "Tesla");
    assert_eq!(
        element(&view, "dailyChange").inner_html(),
        r#"<span class="text-danger">-1.2 (-0.8%)</span>"#
    );
}

#[wasm_bindgen_test]
fn chart_error_carries_retry_button() {
    let view = mount();

    view.show_chart_placeholder(ChartCategory::Price, ChartPlaceholder::Unavailable);
    view.show_chart_error(ChartCategory::Price, "Error rendering chart: boom", "Retry");

    let container = element(&view, "priceChart");
    let selector = format!("[{}]", RETRY_ATTRIBUTE);
    let button = container.query_selector(&selector).unwrap().unwrap();
    assert_eq!(button.get_attribute(RETRY_ATTRIBUTE).unwrap(), "priceChart");
    assert_eq!(button.text_content().unwrap(), "Retry");
    assert_eq!(container.query_selector_all(".alert").unwrap().length(), 1);

    view.clear_chart_message(ChartCategory::Price);
    assert!(container.query_selector(".alert").unwrap().is_none());
}

#[wasm_bindgen_test]
fn activating_a_tab_returns_its_chart() {
    let view = mount();
    let link = view.document().query_selector("a[href='#price']").unwrap().unwrap();

    assert_eq!(view.activate_tab(&link), Some(ChartCategory::Price));
    assert!(element(&view, "price").class_list().contains("active"));
    assert!(!element(&view, "summary").class_list().contains("show"));
}

fn counting_resize_listener(counter: &Rc<Cell<u32>>) -> Option<EventListenerHandle> {
    let counter = Rc::clone(counter);
    window_event_listener_with_options(ev::resize, &EventOptions::default(), move |_| {
        counter.set(counter.get() + 1);
    })
}

#[wasm_bindgen_test]
fn replaced_resize_listener_does_not_stack() {
    let window = web_sys::window().unwrap();
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));

    let mut subscription = counting_resize_listener(&first);
    assert_eq!(subscription.as_ref().map(EventListenerHandle::event_name), Some("resize"));
    replace_listener(&mut subscription, counting_resize_listener(&second));

    window.dispatch_event(&web_sys::Event::new("resize").unwrap()).unwrap();

    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
    subscription.unwrap().remove();
}
