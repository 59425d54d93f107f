use gloo::utils::format::JsValueSerdeExt;
use js_sys::{Array, Reflect};
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::application::ports::ChartRenderer;
use crate::config::PlotConfig;
use crate::domain::{
    chart::{AxisRange, date_axis_millis},
    errors::{RenderingError, RenderingResult},
    logging::{LogComponent, get_logger},
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot, catch)]
    fn plotly_new_plot(root: &str, data: &JsValue, layout: &JsValue, config: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = Plotly, js_name = relayout, catch)]
    fn plotly_relayout(root: &str, update: &JsValue) -> Result<JsValue, JsValue>;
}

/// `ChartRenderer` backed by the page's global `Plotly` object.
#[derive(Clone, Default)]
pub struct PlotlyRenderer;

impl PlotlyRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Whether the plotting script has been loaded into the page.
    pub fn is_available() -> bool {
        Reflect::get(&js_sys::global(), &JsValue::from_str("Plotly"))
            .map(|plotly| !plotly.is_undefined())
            .unwrap_or(false)
    }

    fn to_js<T: serde::Serialize>(value: &T) -> RenderingResult<JsValue> {
        JsValue::from_serde(value).map_err(|e| RenderingError::SerializationFailed(e.to_string()))
    }

    fn plot_element(container_id: &str) -> RenderingResult<JsValue> {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(container_id))
            .map(JsValue::from)
            .ok_or_else(|| RenderingError::AxisUnavailable(format!("#{} not found", container_id)))
    }

    /// Range of `axis` (`xaxis`/`yaxis`) from the computed layout, falling back
    /// to the user layout.
    fn read_range(plot: &JsValue, axis: &str) -> RenderingResult<AxisRange> {
        for layout_key in ["_fullLayout", "layout"] {
            let range = get_path(plot, &[layout_key, axis, "range"]);
            if let Some(range) = range.filter(|r| Array::is_array(r)) {
                let range = Array::from(&range);
                if range.length() < 2 {
                    continue;
                }
                let start = axis_value(&range.get(0))?;
                let end = axis_value(&range.get(1))?;
                return AxisRange::new(start, end)
                    .map_err(|e| RenderingError::AxisUnavailable(e.to_string()));
            }
        }
        Err(RenderingError::AxisUnavailable(format!("{} has no range", axis)))
    }
}

impl ChartRenderer for PlotlyRenderer {
    fn render(&self, container_id: &str, data: &[Value], layout: &Value, config: &PlotConfig) -> RenderingResult<()> {
        if !Self::is_available() {
            return Err(RenderingError::LibraryUnavailable);
        }
        let data = Self::to_js(&data)?;
        let layout = Self::to_js(layout)?;
        let config = Self::to_js(config)?;
        plotly_new_plot(container_id, &data, &layout, &config)
            .map(|_| ())
            .map_err(|e| RenderingError::PlotFailed(js_error_message(&e)))
    }

    fn relayout(&self, container_id: &str, update: &Value) -> RenderingResult<()> {
        if !Self::is_available() {
            return Err(RenderingError::LibraryUnavailable);
        }
        let update = Self::to_js(update)?;
        plotly_relayout(container_id, &update)
            .map(|_| ())
            .map_err(|e| RenderingError::RelayoutFailed(js_error_message(&e)))
    }

    fn axis_ranges(&self, container_id: &str) -> RenderingResult<(AxisRange, AxisRange)> {
        let plot = Self::plot_element(container_id)?;
        let x = Self::read_range(&plot, "xaxis")?;
        let y = Self::read_range(&plot, "yaxis")?;
        get_logger().debug(
            LogComponent::Plotly,
            &format!("#{} ranges x={:?} y={:?}", container_id, x.to_array(), y.to_array()),
        );
        Ok((x, y))
    }
}

fn get_path(root: &JsValue, path: &[&str]) -> Option<JsValue> {
    path.iter().try_fold(root.clone(), |current, key| {
        if current.is_undefined() || current.is_null() {
            return None;
        }
        Reflect::get(&current, &JsValue::from_str(key)).ok()
    })
    .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Numeric axes report numbers; date axes report UTC date strings, sent
/// back as epoch milliseconds.
fn axis_value(value: &JsValue) -> RenderingResult<f64> {
    if let Some(number) = value.as_f64() {
        return Ok(number);
    }
    if let Some(text) = value.as_string() {
        return date_axis_millis(&text)
            .ok_or_else(|| RenderingError::AxisUnavailable(format!("unparseable range bound '{}'", text)));
    }
    Err(RenderingError::AxisUnavailable(format!("unsupported range bound {:?}", value)))
}

fn js_error_message(error: &JsValue) -> String {
    if let Some(error) = error.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    error.as_string().unwrap_or_else(|| format!("{:?}", error))
}
