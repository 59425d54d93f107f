use serde_json::{Map, Value, json};

use super::value_objects::{AxisRange, ChartCategory};

/// Margin padding added around every chart.
const MARGIN_PAD: u32 = 5;

/// Layout handed to the renderer: the server layout with sizing taken over
/// by the browser. The price chart also gets free axes and a vertical mode bar.
pub fn responsive_layout(category: ChartCategory, layout: &Map<String, Value>) -> Value {
    let mut merged = layout.clone();
    merged.insert("autosize".to_string(), Value::Bool(true));
    merged.insert("responsive".to_string(), Value::Bool(true));

    let mut margin = object_field(layout, "margin");
    margin.insert("pad".to_string(), json!(MARGIN_PAD));
    merged.insert("margin".to_string(), Value::Object(margin));

    if category == ChartCategory::Price {
        let mut xaxis = object_field(layout, "xaxis");
        xaxis.insert("autorange".to_string(), Value::Bool(true));
        xaxis.insert("rangeslider".to_string(), json!({ "visible": false }));
        merged.insert("xaxis".to_string(), Value::Object(xaxis));

        let mut yaxis = object_field(layout, "yaxis");
        yaxis.insert("autorange".to_string(), Value::Bool(true));
        yaxis.insert("fixedrange".to_string(), Value::Bool(false));
        merged.insert("yaxis".to_string(), Value::Object(yaxis));

        merged.insert("modebar".to_string(), json!({ "orientation": "v", "activecolor": "#007bff" }));
    }

    Value::Object(merged)
}

/// Relayout update that lets the library resize the plot to its container.
pub fn autosize_update() -> Value {
    json!({ "autosize": true })
}

/// Relayout update applying explicit x/y ranges.
pub fn range_update(x: &AxisRange, y: &AxisRange) -> Value {
    json!({
        "xaxis.range": x.to_array(),
        "yaxis.range": y.to_array(),
    })
}

fn object_field(layout: &Map<String, Value>, key: &str) -> Map<String, Value> {
    layout
        .get(key)
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}
