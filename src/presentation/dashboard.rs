use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use leptos::ev;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::application::coordinator::DashboardController;
use crate::config::AppConfig;
use crate::domain::{
    chart::{ChartCategory, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR},
    errors::{AppError, UiError},
    logging::{LogComponent, get_logger},
};
use crate::event_utils::{
    EventListenerHandle, EventOptions, event_listener_with_options, replace_listener,
    window_event_listener_with_options,
};
use crate::infrastructure::{
    DomView, HttpTransport, PlotlyRenderer, ViewBindings,
    dom::{RETRY_ATTRIBUTE, query_all},
};

pub type BrowserController = DashboardController<DomView, PlotlyRenderer, HttpTransport>;

/// Browser wiring around the controller: owns every event listener.
/// Listener closures hold strong references, so the dashboard lives as
/// long as the page.
pub struct Dashboard {
    controller: BrowserController,
    listeners: RefCell<Vec<EventListenerHandle>>,
    resize_listener: RefCell<Option<EventListenerHandle>>,
}

/// Bind the page and register all handlers.
pub fn mount(config: AppConfig) -> Result<Rc<Dashboard>, AppError> {
    let bindings = ViewBindings::from_window()?;
    if bindings.form.is_none() {
        return Err(UiError::ElementNotFound(crate::infrastructure::dom::FORM_ID.to_string()).into());
    }
    if !PlotlyRenderer::is_available() {
        get_logger().warn(
            LogComponent::Events,
            "⚠️ Plotly is not loaded; charts will show render errors",
        );
    }

    let view = DomView::new(bindings, config.alert_auto_hide_ms);
    let transport = HttpTransport::new(config.analyze_endpoint.clone());
    let controller = DashboardController::new(view, PlotlyRenderer::new(), transport, config);

    let dashboard = Rc::new(Dashboard {
        controller,
        listeners: RefCell::new(Vec::new()),
        resize_listener: RefCell::new(None),
    });
    dashboard.install();
    Ok(dashboard)
}

impl Dashboard {
    pub fn controller(&self) -> &BrowserController {
        &self.controller
    }

    fn view(&self) -> &DomView {
        self.controller.view()
    }

    fn install(self: &Rc<Self>) {
        self.install_form();
        self.install_tabs();
        self.install_chart_controls();
        self.install_retry_buttons();

        get_logger().info(
            LogComponent::Events,
            &format!("🚀 Dashboard ready, {} listeners installed", self.listeners.borrow().len()),
        );
    }

    fn install_form(self: &Rc<Self>) {
        let Some(form) = self.view().bindings().form.clone() else {
            return;
        };
        let this = Rc::clone(self);
        let handle = event_listener_with_options(form.as_ref(), ev::submit, &EventOptions::active(), move |event| {
            event.prevent_default();
            this.submit();
        });
        self.listeners.borrow_mut().push(handle);
    }

    fn install_tabs(self: &Rc<Self>) {
        let links = query_all(self.view().document(), ".nav-tabs .nav-link");
        for link in links {
            let this = Rc::clone(self);
            let target = link.clone();
            let handle = event_listener_with_options(link.as_ref(), ev::click, &EventOptions::active(), move |event| {
                event.prevent_default();
                if let Some(category) = this.view().activate_tab(&target) {
                    this.resize_later(category, this.controller.config().tab_resize_delay_ms);
                }
            });
            self.listeners.borrow_mut().push(handle);
        }
    }

    fn install_chart_controls(self: &Rc<Self>) {
        let document = self.view().document().clone();

        for (selector, factor) in [(".zoom-in-btn", ZOOM_IN_FACTOR), (".zoom-out-btn", ZOOM_OUT_FACTOR)] {
            for button in query_all(&document, selector) {
                let this = Rc::clone(self);
                let source = button.clone();
                let handle = event_listener_with_options(button.as_ref(), ev::click, &EventOptions::default(), move |_| {
                    if let Some(category) = chart_of(&source) {
                        let _ = this.controller.zoom_chart(category, factor);
                    }
                });
                self.listeners.borrow_mut().push(handle);
            }
        }

        for button in query_all(&document, ".fullscreen-btn") {
            let this = Rc::clone(self);
            let source = button.clone();
            let handle = event_listener_with_options(button.as_ref(), ev::click, &EventOptions::default(), move |_| {
                let Some(category) = chart_of(&source) else {
                    return;
                };
                match this.view().toggle_fullscreen(category) {
                    Ok(change) => {
                        crate::log_debug!(LogComponent::Events, "{} fullscreen {:?}", category, change);
                        this.resize_later(category, this.controller.config().fullscreen_resize_delay_ms);
                    }
                    Err(e) => get_logger().error(
                        LogComponent::Events,
                        &format!("Error toggling fullscreen for chart {}: {}", category.container_id(), e),
                    ),
                }
            });
            self.listeners.borrow_mut().push(handle);
        }
    }

    /// Retry buttons are created per render, so one delegated listener serves them all.
    fn install_retry_buttons(self: &Rc<Self>) {
        let this = Rc::clone(self);
        let document = self.view().document().clone();
        let handle = event_listener_with_options(document.as_ref(), ev::click, &EventOptions::default(), move |event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Ok(Some(button)) = target.closest(&format!("[{}]", RETRY_ATTRIBUTE)) else {
                return;
            };
            let Some(category) = button
                .get_attribute(RETRY_ATTRIBUTE)
                .and_then(|id| ChartCategory::from_container_id(&id))
            else {
                return;
            };
            let outcome = this.controller.retry_chart(category);
            get_logger().info(
                LogComponent::Events,
                &format!("Retry of {} finished: {:?}", category.container_id(), outcome),
            );
        });
        self.listeners.borrow_mut().push(handle);
    }

    fn submit(self: &Rc<Self>) {
        let raw_ticker = self.view().ticker_value();
        let disable_charts = self.view().charts_disabled();
        let this = Rc::clone(self);
        spawn_local(async move {
            let outcome = this.controller.submit(&raw_ticker, disable_charts).await;
            if outcome.rendered_charts() {
                this.refresh_resize_subscription();
            }
            crate::log_debug!(LogComponent::Events, "Submission finished: {:?}", outcome);
        });
    }

    /// Swap the window resize handler for a fresh one so repeated analyses
    /// never stack handlers.
    pub fn refresh_resize_subscription(self: &Rc<Self>) {
        let this = Rc::clone(self);
        let handle = window_event_listener_with_options(ev::resize, &EventOptions::default(), move |_| {
            this.controller.resize_visible_charts();
        });
        replace_listener(&mut self.resize_listener.borrow_mut(), handle);
    }

    fn resize_later(self: &Rc<Self>, category: ChartCategory, delay_ms: u32) {
        let this = Rc::clone(self);
        Timeout::new(delay_ms, move || {
            this.controller.resize_chart(category);
        })
        .forget();
    }
}

fn chart_of(button: &Element) -> Option<ChartCategory> {
    let chart_id = button.get_attribute("data-chart-id")?;
    let category = ChartCategory::from_container_id(&chart_id);
    if category.is_none() {
        get_logger().warn(
            LogComponent::Events,
            &format!("Unknown chart id '{}' on control button", chart_id),
        );
    }
    category
}
