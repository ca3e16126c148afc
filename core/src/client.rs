//! Stateless HTTP request builder and response parser for the follower API.
//!
//! # Design
//! `GitHubClient` holds the API base URL and credentials and carries no
//! mutable state between calls. Listing is split into `build_list`, which
//! produces an `HttpRequest`, and `parse_list`, which consumes an
//! `HttpResponse`. The round-trip in between belongs to a `Transport`, which
//! keeps this module deterministic and free of I/O.

use url::Url;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::pagination::parse_link_header;
use crate::types::{ListKind, ListOptions, Page, User};

/// Media type requested from the API.
pub const ACCEPT: &str = "application/vnd.github+json";
/// REST API version pinned on every request.
pub const API_VERSION: &str = "2022-11-28";
/// Default public API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Synchronous, stateless client for the follower endpoints.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    base_url: Url,
    token: Option<String>,
    user_agent: String,
}

impl GitHubClient {
    /// Create a client rooted at `base_url`. A trailing slash is ignored.
    ///
    /// Fails when `base_url` does not parse or cannot carry path segments
    /// (for example `mailto:` URLs).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            token: None,
            user_agent: concat!("stalker/", env!("CARGO_PKG_VERSION")).to_string(),
        })
    }

    /// Send `authorization: Bearer <token>` on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn build_list(&self, username: &str, kind: ListKind, opts: &ListOptions) -> HttpRequest {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["users", username, kind.as_str()]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("per_page", &opts.per_page.to_string())
            .append_pair("page", &opts.page.to_string());

        let mut headers = vec![
            ("accept".to_string(), ACCEPT.to_string()),
            ("user-agent".to_string(), self.user_agent.clone()),
            ("x-github-api-version".to_string(), API_VERSION.to_string()),
        ];
        if let Some(token) = &self.token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }

        HttpRequest {
            url: url.into(),
            headers,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Page, ApiError> {
        check_status(&response)?;
        let users: Vec<User> =
            serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        let links = response.header("link").map(parse_link_header).unwrap_or_default();
        Ok(Page {
            users,
            next_page: links.next,
            last_page: links.last,
        })
    }
}

/// Map non-200 status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        401 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound),
        429 => Err(rate_limited(response)),
        403 if response.header("x-ratelimit-remaining") == Some("0") => Err(rate_limited(response)),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

fn rate_limited(response: &HttpResponse) -> ApiError {
    ApiError::RateLimited {
        reset: response.header("x-ratelimit-reset").and_then(|v| v.trim().parse().ok()),
    }
}
