use futures::future::{FutureExt, LocalBoxFuture};
use gloo::net::http::Request;
use web_sys::FormData;

use crate::application::{
    dto::{AnalysisRequest, AnalysisResponse},
    ports::AnalysisTransport,
};
use crate::domain::{
    errors::{NetworkError, NetworkResult},
    logging::{LogComponent, LogEntry, LogLevel, get_logger},
};

/// HTTP client for the analyze endpoint, on top of gloo-net
#[derive(Clone)]
pub struct HttpTransport {
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(request: &AnalysisRequest) -> NetworkResult<FormData> {
        let form = FormData::new()
            .map_err(|e| NetworkError::RequestBuildFailed(format!("FormData unavailable: {:?}", e)))?;
        for (name, value) in request.form_fields() {
            form.append_with_str(name, &value)
                .map_err(|e| NetworkError::RequestBuildFailed(format!("Failed to append {}: {:?}", name, e)))?;
        }
        Ok(form)
    }

    async fn post_analysis(&self, request: &AnalysisRequest) -> NetworkResult<AnalysisResponse> {
        get_logger().debug(
            LogComponent::Http,
            &format!("🌐 POST {} ticker={}", self.endpoint, request.ticker),
        );

        let form = Self::build_form(request)?;
        let response = Request::post(&self.endpoint)
            .body(form)
            .map_err(|e| NetworkError::RequestBuildFailed(format!("{:?}", e)))?
            .send()
            .await
            .map_err(|e| NetworkError::HttpRequestFailed(format!("Request failed: {}", e)))?;

        // The server reports failures inside the JSON body, so keep parsing.
        get_logger().debug(
            LogComponent::Http,
            &format!("Response status: {}", response.status()),
        );
        if !response.ok() {
            get_logger().log(
                LogEntry::new(LogLevel::Warn, LogComponent::Http, format!("HTTP error: {}", response.status()))
                    .with_context(format!("status_text={} url={}", response.status_text(), response.url())),
            );
        }

        let body = response
            .json::<AnalysisResponse>()
            .await
            .map_err(|e| NetworkError::ResponseParseFailed(e.to_string()))?;

        get_logger().debug(
            LogComponent::Http,
            "✅ Analysis response parsed successfully",
        );
        Ok(body)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new("/analyze")
    }
}

impl AnalysisTransport for HttpTransport {
    fn analyze<'a>(&'a self, request: &'a AnalysisRequest) -> LocalBoxFuture<'a, NetworkResult<AnalysisResponse>> {
        self.post_analysis(request).boxed_local()
    }
}
