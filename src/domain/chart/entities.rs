use std::collections::BTreeMap;
use std::str::FromStr;

use serde_json::{Map, Value};

use super::value_objects::ChartCategory;

/// Entity - one server-built chart: the trace list plus its layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPayload {
    pub data: Vec<Value>,
    pub layout: Map<String, Value>,
}

impl ChartPayload {
    /// Accepts only a non-empty `data` array and an object `layout`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let data = value.get("data")?.as_array()?;
        if data.is_empty() {
            return None;
        }
        let layout = value.get("layout")?.as_object()?;
        Some(Self { data: data.clone(), layout: layout.clone() })
    }

    pub fn trace_count(&self) -> usize {
        self.data.len()
    }
}

/// Raw payloads from the last successful response, by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartCache {
    payloads: BTreeMap<ChartCategory, Value>,
}

impl ChartCache {
    /// Build from the response's `charts` object; unknown keys are ignored.
    pub fn from_response(charts: &Map<String, Value>) -> Self {
        let payloads = charts
            .iter()
            .filter(|(_, payload)| !payload.is_null())
            .filter_map(|(key, payload)| {
                ChartCategory::from_str(key).ok().map(|category| (category, payload.clone()))
            })
            .collect();
        Self { payloads }
    }

    pub fn get(&self, category: ChartCategory) -> Option<&Value> {
        self.payloads.get(&category)
    }

    pub fn contains(&self, category: ChartCategory) -> bool {
        self.payloads.contains_key(&category)
    }

    pub fn categories(&self) -> impl Iterator<Item = ChartCategory> + '_ {
        self.payloads.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}
