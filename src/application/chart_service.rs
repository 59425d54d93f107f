use std::cell::RefCell;

use serde_json::Value;
use strum::IntoEnumIterator;

use crate::application::ports::{ChartRenderer, DashboardView};
use crate::config::PlotConfig;
use crate::domain::{
    chart::{
        ChartCache, ChartCategory, ChartPayload, ChartPlaceholder, autosize_update, range_update,
        responsive_layout,
    },
    errors::{RenderingError, RenderingResult},
    logging::{LogComponent, get_logger},
    state::SessionState,
};

/// Label of the retry button after a first failure.
pub const RETRY_LABEL: &str = "Retry";
/// Label of the retry button after a retry failed too.
pub const RETRY_AGAIN_LABEL: &str = "Retry Again";

/// Per-category tally of one `render_all` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartSummary {
    pub rendered: usize,
    pub failed: usize,
    pub missing: usize,
}

impl ChartSummary {
    /// Some chart was delivered, and none of them could be drawn.
    pub fn all_failed(&self) -> bool {
        self.rendered == 0 && self.failed > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Rendered,
    MissingContainer,
    Invalid,
    Failed(RenderingError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RetryOutcome {
    Rendered,
    NotCached,
    MissingContainer,
    Invalid,
    Failed(RenderingError),
}

/// Chart drawing on top of the renderer port. Borrowed from the controller
/// for the duration of one operation.
pub struct ChartService<'a, V, R> {
    view: &'a V,
    renderer: &'a R,
    plot_config: &'a PlotConfig,
    session: &'a RefCell<SessionState>,
}

impl<'a, V: DashboardView, R: ChartRenderer> ChartService<'a, V, R> {
    pub fn new(view: &'a V, renderer: &'a R, plot_config: &'a PlotConfig, session: &'a RefCell<SessionState>) -> Self {
        Self { view, renderer, plot_config, session }
    }

    /// Clear every container, then draw each category independently.
    pub fn render_all(&self, charts: &ChartCache) -> ChartSummary {
        let mut summary = ChartSummary::default();
        self.reset_containers();

        for category in ChartCategory::iter() {
            let Some(payload) = charts.get(category) else {
                self.view.show_chart_placeholder(category, ChartPlaceholder::Unavailable);
                summary.missing += 1;
                continue;
            };
            match self.render_one(category, payload, RETRY_LABEL) {
                RenderOutcome::Rendered => summary.rendered += 1,
                _ => summary.failed += 1,
            }
        }

        get_logger().info(
            LogComponent::Charts,
            &format!(
                "📊 Charts rendered: {} ok, {} failed, {} missing",
                summary.rendered, summary.failed, summary.missing
            ),
        );
        summary
    }

    /// Fill every container with the same placeholder.
    pub fn show_placeholders(&self, placeholder: ChartPlaceholder) {
        self.reset_containers();
        for category in ChartCategory::iter() {
            self.view.show_chart_placeholder(category, placeholder);
        }
    }

    /// Draw one payload. Failures stay inside the category's container.
    pub fn render_one(&self, category: ChartCategory, payload: &Value, retry_label: &str) -> RenderOutcome {
        let container_id = category.container_id();
        if !self.view.has_chart_container(category) {
            get_logger().warn(
                LogComponent::Charts,
                &format!("Chart container #{} not found in DOM", container_id),
            );
            return RenderOutcome::MissingContainer;
        }

        let Some(chart) = ChartPayload::from_value(payload) else {
            self.view.show_chart_placeholder(category, ChartPlaceholder::Invalid);
            return RenderOutcome::Invalid;
        };

        let layout = responsive_layout(category, &chart.layout);
        match self.renderer.render(container_id, &chart.data, &layout, self.plot_config) {
            Ok(()) => {
                self.session.borrow_mut().mark_rendered(category, true);
                crate::log_debug!(
                    LogComponent::Charts,
                    "✅ {} chart drawn with {} traces",
                    category,
                    chart.trace_count()
                );
                RenderOutcome::Rendered
            }
            Err(e) => {
                get_logger().error(
                    LogComponent::Charts,
                    &format!("❌ Error rendering {}: {}", container_id, e),
                );
                self.session.borrow_mut().mark_rendered(category, false);
                self.view
                    .show_chart_error(category, &format!("Error rendering chart: {}", e), retry_label);
                RenderOutcome::Failed(e)
            }
        }
    }

    /// Redraw a single category from the cached payload.
    pub fn retry(&self, category: ChartCategory) -> RetryOutcome {
        if !self.view.has_chart_container(category) {
            get_logger().error(
                LogComponent::Charts,
                &format!("Chart container #{} not found for retry", category.container_id()),
            );
            return RetryOutcome::MissingContainer;
        }

        let cached = self.session.borrow().chart_cache.get(category).cloned();
        let Some(payload) = cached else {
            get_logger().error(
                LogComponent::Charts,
                &format!("No chart data available for {}", category.container_id()),
            );
            self.view.clear_chart(category);
            self.view.show_chart_placeholder(category, ChartPlaceholder::Unavailable);
            return RetryOutcome::NotCached;
        };

        get_logger().info(
            LogComponent::Charts,
            &format!("🔄 Retrying {} chart", category),
        );
        self.view.clear_chart(category);
        match self.render_one(category, &payload, RETRY_AGAIN_LABEL) {
            RenderOutcome::Rendered => {
                self.view.clear_chart_message(category);
                RetryOutcome::Rendered
            }
            RenderOutcome::MissingContainer => RetryOutcome::MissingContainer,
            RenderOutcome::Invalid => RetryOutcome::Invalid,
            RenderOutcome::Failed(e) => RetryOutcome::Failed(e),
        }
    }

    /// Let every drawn, visible chart fit its container again.
    pub fn resize_visible(&self) -> usize {
        let rendered: Vec<ChartCategory> = self.session.borrow().rendered.iter().copied().collect();
        rendered
            .into_iter()
            .filter(|category| self.view.is_chart_visible(*category))
            .filter(|category| self.resize(*category))
            .count()
    }

    /// Relayout one chart if it holds a plot. Returns whether a relayout ran.
    pub fn resize(&self, category: ChartCategory) -> bool {
        if !self.session.borrow().is_rendered(category) {
            return false;
        }
        match self.renderer.relayout(category.container_id(), &autosize_update()) {
            Ok(()) => true,
            Err(e) => {
                get_logger().warn(
                    LogComponent::Charts,
                    &format!("Could not resize chart {}: {}", category.container_id(), e),
                );
                false
            }
        }
    }

    /// Scale both axes around their midpoints.
    pub fn zoom(&self, category: ChartCategory, factor: f64) -> RenderingResult<()> {
        let container_id = category.container_id();
        let result = self
            .renderer
            .axis_ranges(container_id)
            .and_then(|(x, y)| self.renderer.relayout(container_id, &range_update(&x.scaled(factor), &y.scaled(factor))));

        if let Err(e) = &result {
            get_logger().error(
                LogComponent::Charts,
                &format!("Error zooming chart {}: {}", container_id, e),
            );
        }
        result
    }

    fn reset_containers(&self) {
        self.session.borrow_mut().rendered.clear();
        for category in ChartCategory::iter() {
            self.view.clear_chart(category);
        }
    }
}
