//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `GitHubClient` builds `HttpRequest`
//! values and parses `HttpResponse` values; a `Transport` implementation owned
//! by the caller performs the actual round-trip. Every request the follower
//! API needs is a `GET`, so the request carries no method or body.
//!
//! Header names are stored lower-case by the builders; lookups on responses
//! are case-insensitive because transports hand back whatever the server sent.

use crate::error::ApiError;

/// An HTTP `GET` request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL including the query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Build a `200 OK` response with the given body and no headers.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Executes an `HttpRequest` against the network.
///
/// Implementations must return non-2xx responses as data, not as `Err`;
/// status interpretation belongs to `GitHubClient`. Only failures to obtain a
/// response at all (DNS, connect, TLS, timeouts, unreadable body) map to
/// `ApiError::Transport`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let response = HttpResponse::ok("[]").with_header("Link", "<x>; rel=\"next\"");
        assert_eq!(response.header("link"), Some("<x>; rel=\"next\""));
        assert_eq!(response.header("LINK"), Some("<x>; rel=\"next\""));
        assert!(response.header("x-ratelimit-remaining").is_none());
    }

    #[test]
    fn first_matching_header_wins() {
        let response = HttpResponse::ok("")
            .with_header("x-a", "1")
            .with_header("X-A", "2");
        assert_eq!(response.header("x-a"), Some("1"));
    }
}
