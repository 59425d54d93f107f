use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

use crate::domain::alerts::AlertLevel;
use crate::domain::errors::ValidationError;

/// Value Object - chart category delivered by the server
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ChartCategory {
    #[display(fmt = "Summary")]
    #[strum(serialize = "summary")]
    Summary,
    #[display(fmt = "Price")]
    #[strum(serialize = "price")]
    Price,
    #[display(fmt = "Technical")]
    #[strum(serialize = "technical")]
    Technical,
    #[display(fmt = "Volume")]
    #[strum(serialize = "volume")]
    Volume,
    #[display(fmt = "Financial")]
    #[strum(serialize = "financial")]
    Financial,
}

impl ChartCategory {
    /// Id of the element the chart is drawn into.
    pub fn container_id(&self) -> &'static str {
        match self {
            ChartCategory::Summary => "summaryChart",
            ChartCategory::Price => "priceChart",
            ChartCategory::Technical => "techChart",
            ChartCategory::Volume => "volumeChart",
            ChartCategory::Financial => "financialChart",
        }
    }

    pub fn from_container_id(container_id: &str) -> Option<Self> {
        Self::iter().find(|category| category.container_id() == container_id)
    }

    /// Tabs are named after their chart container minus the `Chart` suffix
    /// (`#price` → `priceChart`, `#tech` → `techChart`).
    pub fn from_tab_target(href: &str) -> Option<Self> {
        let tab = href.trim_start_matches('#');
        if tab.is_empty() {
            return None;
        }
        Self::from_container_id(&format!("{}Chart", tab))
    }
}

/// Value Object - a numeric axis interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub start: f64,
    pub end: f64,
}

/// Zoom factor applied by the zoom-in button.
pub const ZOOM_IN_FACTOR: f64 = 0.5;
/// Zoom factor applied by the zoom-out button.
pub const ZOOM_OUT_FACTOR: f64 = 2.0;

impl AxisRange {
    pub fn new(start: f64, end: f64) -> Result<Self, ValidationError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ValidationError::InvalidAxisRange(format!("[{}, {}]", start, end)));
        }
        Ok(Self { start, end })
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Scale the range around its midpoint; `factor < 1` zooms in.
    pub fn scaled(&self, factor: f64) -> Self {
        let middle = self.midpoint();
        let half = self.span() * factor / 2.0;
        Self { start: middle - half, end: middle + half }
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.start, self.end]
    }
}

/// Epoch milliseconds for a date-axis bound as the plotting library prints
/// it (`2024-01-01`, `2024-01-01 06:00`, `2024-01-01 06:00:00.0000`). The
/// library treats those wall times as UTC and reads numeric bounds the same
/// way, so no local-time conversion may happen in between.
pub fn date_axis_millis(text: &str) -> Option<f64> {
    let text = text.trim();
    let (date, time) = match text.split_once([' ', 'T']) {
        Some((date, time)) => (date, Some(time)),
        None => (text, None),
    };

    let mut parts = date.splitn(3, '-');
    let year: i64 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next().map_or(Ok(1), str::parse).ok()?;
    let day: u32 = parts.next().map_or(Ok(1), str::parse).ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    let mut millis_of_day = 0.0;
    if let Some(time) = time {
        let mut fields = time.splitn(3, ':');
        let hours: u32 = fields.next()?.parse().ok()?;
        let minutes: u32 = fields.next().map_or(Ok(0), str::parse).ok()?;
        let seconds: f64 = fields.next().map_or(Ok(0.0), str::parse).ok()?;
        if hours > 23 || minutes > 59 || !(0.0..60.0).contains(&seconds) {
            return None;
        }
        millis_of_day = (f64::from(hours * 3_600 + minutes * 60) + seconds) * 1_000.0;
    }

    Some(days_from_civil(year, month, day) as f64 * 86_400_000.0 + millis_of_day)
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let month = i64::from(month);
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

/// Why a chart container shows a message instead of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPlaceholder {
    Disabled,
    Unavailable,
    Invalid,
}

impl ChartPlaceholder {
    pub fn message(&self) -> &'static str {
        match self {
            ChartPlaceholder::Disabled => "Charts were disabled by user",
            ChartPlaceholder::Unavailable => "Chart data not available",
            ChartPlaceholder::Invalid => "Chart data not available or invalid",
        }
    }

    pub fn level(&self) -> AlertLevel {
        match self {
            ChartPlaceholder::Disabled => AlertLevel::Info,
            ChartPlaceholder::Unavailable | ChartPlaceholder::Invalid => AlertLevel::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn keys_round_trip_through_strum() {
        for category in ChartCategory::iter() {
            assert_eq!(ChartCategory::from_str(category.as_ref()).unwrap(), category);
        }
    }

    #[test]
    fn technical_tab_maps_to_tech_container() {
        assert_eq!(ChartCategory::from_tab_target("#tech"), Some(ChartCategory::Technical));
        assert_eq!(ChartCategory::from_tab_target("#overview"), None);
        assert_eq!(ChartCategory::from_tab_target("#"), None);
    }

    #[test]
    fn non_finite_range_is_rejected() {
        assert!(AxisRange::new(f64::NAN, 1.0).is_err());
        assert!(AxisRange::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn zoom_in_halves_span() {
        let range = AxisRange::new(10.0, 30.0).unwrap().scaled(ZOOM_IN_FACTOR);
        assert_eq!(range.to_array(), [15.0, 25.0]);
    }

    #[test]
    fn date_bounds_are_read_as_utc() {
        assert_eq!(date_axis_millis("1970-01-01"), Some(0.0));
        assert_eq!(date_axis_millis("2024-01-01 06:00:00.0000"), Some(1_704_088_800_000.0));
        assert_eq!(date_axis_millis("2024-01-01 06:00"), Some(1_704_088_800_000.0));
        assert_eq!(date_axis_millis("2000-03-01"), Some(951_868_800_000.0));
        assert_eq!(date_axis_millis("2024-02-29 23:59:30.5"), Some(1_709_251_170_500.0));
    }

    #[test]
    fn garbage_date_bounds_are_rejected() {
        assert_eq!(date_axis_millis("yesterday"), None);
        assert_eq!(date_axis_millis("2024-13-01"), None);
        assert_eq!(date_axis_millis("2024-01-01 25:00"), None);
    }

    #[test]
    fn zooming_a_date_range_keeps_its_midpoint() {
        let start = date_axis_millis("2024-01-01 00:00:00").unwrap();
        let end = date_axis_millis("2024-01-03 00:00:00").unwrap();
        let zoomed = AxisRange::new(start, end).unwrap().scaled(ZOOM_IN_FACTOR);
        assert_eq!(zoomed.midpoint(), date_axis_millis("2024-01-02").unwrap());
        assert_eq!(zoomed.start, date_axis_millis("2024-01-01 12:00").unwrap());
    }

    #[test]
    fn disabled_placeholder_is_informational() {
        assert_eq!(ChartPlaceholder::Disabled.level(), AlertLevel::Info);
        assert!(ChartPlaceholder::Invalid.message().contains("not available"));
    }
}
