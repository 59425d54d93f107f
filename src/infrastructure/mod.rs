pub mod dom;
pub mod http;
pub mod rendering;
pub mod services;

pub use dom::{DomView, ViewBindings};
pub use http::HttpTransport;
pub use rendering::PlotlyRenderer;
