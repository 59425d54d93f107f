pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::{ChartCache, ChartPayload};
pub use services::{autosize_update, range_update, responsive_layout};
pub use value_objects::{AxisRange, ChartCategory, ChartPlaceholder, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR, date_axis_millis};
