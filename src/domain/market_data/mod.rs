pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::{CompanyData, PriceChange};
pub use services::{METRIC_SLOTS, MetricSlot, Projection, project_company_data};
pub use value_objects::{PLACEHOLDER, PriceTrend, Ticker};
