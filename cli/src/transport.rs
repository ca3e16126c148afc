//! Blocking ureq transport.

use std::time::Duration;

use stalker_core::{ApiError, HttpRequest, HttpResponse, Transport};

/// Executes requests with a shared ureq agent.
///
/// 4xx/5xx statuses come back as `HttpResponse` values so the core client
/// decides what they mean. Only failures to get a response become
/// `ApiError::Transport`.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let mut response = builder.call().map_err(transport_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response.body_mut().read_to_string().map_err(transport_error)?;

        Ok(HttpResponse { status, headers, body })
    }
}

fn transport_error(e: ureq::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}
