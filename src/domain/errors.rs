use std::fmt::{Display, Formatter, Result as FmtResult};

/// Root error type for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Validation(ValidationError),
    Network(NetworkError),
    Rendering(RenderingError),
    Ui(UiError),
    Configuration(ConfigurationError),
}

/// Errors raised before anything leaves the browser
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyTicker,
    CompanyDataNotObject(String),
    InvalidAxisRange(String),
}

/// Transport and payload decoding errors
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    RequestBuildFailed(String),
    HttpRequestFailed(String),
    ResponseParseFailed(String),
}

/// Errors reported by the plotting library
#[derive(Debug, Clone, PartialEq)]
pub enum RenderingError {
    LibraryUnavailable,
    SerializationFailed(String),
    PlotFailed(String),
    RelayoutFailed(String),
    AxisUnavailable(String),
}

/// Browser/DOM errors
#[derive(Debug, Clone, PartialEq)]
pub enum UiError {
    WindowUnavailable,
    DocumentUnavailable,
    ElementNotFound(String),
    BrowserApi(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    MalformedConfig(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AppError::Validation(e) => write!(f, "Validation Error: {}", e),
            AppError::Network(e) => write!(f, "Network Error: {}", e),
            AppError::Rendering(e) => write!(f, "Rendering Error: {}", e),
            AppError::Ui(e) => write!(f, "UI Error: {}", e),
            AppError::Configuration(e) => write!(f, "Configuration Error: {}", e),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ValidationError::EmptyTicker => write!(f, "ticker symbol is empty"),
            ValidationError::CompanyDataNotObject(kind) => {
                write!(f, "company data must be an object, got {}", kind)
            }
            ValidationError::InvalidAxisRange(msg) => write!(f, "invalid axis range: {}", msg),
        }
    }
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            NetworkError::RequestBuildFailed(msg) => write!(f, "could not build request: {}", msg),
            NetworkError::HttpRequestFailed(msg) => write!(f, "{}", msg),
            NetworkError::ResponseParseFailed(msg) => write!(f, "invalid response: {}", msg),
        }
    }
}

impl Display for RenderingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RenderingError::LibraryUnavailable => write!(f, "plotting library is not loaded"),
            RenderingError::SerializationFailed(msg) => write!(f, "could not convert chart data: {}", msg),
            RenderingError::PlotFailed(msg) => write!(f, "{}", msg),
            RenderingError::RelayoutFailed(msg) => write!(f, "relayout failed: {}", msg),
            RenderingError::AxisUnavailable(msg) => write!(f, "axis range unavailable: {}", msg),
        }
    }
}

impl Display for UiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UiError::WindowUnavailable => write!(f, "window not available"),
            UiError::DocumentUnavailable => write!(f, "document not available"),
            UiError::ElementNotFound(id) => write!(f, "element '{}' not found", id),
            UiError::BrowserApi(msg) => write!(f, "browser API call failed: {}", msg),
        }
    }
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ConfigurationError::MalformedConfig(msg) => write!(f, "malformed configuration: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Validation(error)
    }
}

impl From<NetworkError> for AppError {
    fn from(error: NetworkError) -> Self {
        AppError::Network(error)
    }
}

impl From<RenderingError> for AppError {
    fn from(error: RenderingError) -> Self {
        AppError::Rendering(error)
    }
}

impl From<UiError> for AppError {
    fn from(error: UiError) -> Self {
        AppError::Ui(error)
    }
}

impl From<ConfigurationError> for AppError {
    fn from(error: ConfigurationError) -> Self {
        AppError::Configuration(error)
    }
}

pub type NetworkResult<T> = Result<T, NetworkError>;
pub type RenderingResult<T> = Result<T, RenderingError>;
