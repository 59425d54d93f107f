pub mod chart_service;
pub mod coordinator;
pub mod dto;
pub mod ports;

pub use chart_service::{ChartService, ChartSummary, RetryOutcome};
pub use coordinator::{AnalysisOutcome, DashboardController};
pub use dto::{AnalysisRequest, AnalysisResponse};
pub use ports::{AnalysisTransport, ChartRenderer, DashboardView, Section};
