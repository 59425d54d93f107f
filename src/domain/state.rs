use std::collections::BTreeSet;

use crate::domain::chart::{ChartCache, ChartCategory};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::Ticker;

/// Per-page session: what was asked for last and what came back.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub active_ticker: Option<Ticker>,
    pub chart_cache: ChartCache,
    /// Categories currently holding a live plot.
    pub rendered: BTreeSet<ChartCategory>,
}

impl SessionState {
    /// Start a new analysis: the previous cache is dropped, never merged.
    pub fn begin(&mut self, ticker: Ticker) {
        crate::log_debug!(
            LogComponent::Session,
            "Session for {} replaces {:?} ({} cached charts)",
            ticker,
            self.active_ticker,
            self.chart_cache.len()
        );
        self.active_ticker = Some(ticker);
        self.chart_cache = ChartCache::default();
    }

    pub fn replace_cache(&mut self, cache: ChartCache) {
        self.chart_cache = cache;
    }

    pub fn mark_rendered(&mut self, category: ChartCategory, rendered: bool) {
        if rendered {
            self.rendered.insert(category);
        } else {
            self.rendered.remove(&category);
        }
    }

    pub fn is_rendered(&self, category: ChartCategory) -> bool {
        self.rendered.contains(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn begin_drops_previous_cache() {
        let charts = json!({ "price": { "data": [{}], "layout": {} } });
        let mut state = SessionState::default();
        state.replace_cache(ChartCache::from_response(charts.as_object().unwrap()));
        state.mark_rendered(ChartCategory::Price, true);
        assert!(state.chart_cache.contains(ChartCategory::Price));

        state.begin(Ticker::parse("msft").unwrap());

        assert!(state.chart_cache.is_empty());
        assert_eq!(state.active_ticker.as_ref().map(Ticker::value), Some("MSFT"));
    }
}
