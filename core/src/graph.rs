//! The "list followers / list following" capability.
//!
//! `FollowGraph` is the seam between the aggregation service and the network.
//! `HttpFollowGraph` pairs a `GitHubClient` with a `Transport` and is the only
//! production implementation; tests substitute scripted graphs.

use tracing::{error, info};

use crate::client::GitHubClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::types::{ListKind, ListOptions, Page};

/// One page of either side of an account's follow graph per call.
pub trait FollowGraph {
    fn list(&self, username: &str, kind: ListKind, opts: &ListOptions) -> Result<Page, ApiError>;

    fn list_followers(&self, username: &str, opts: &ListOptions) -> Result<Page, ApiError> {
        self.list(username, ListKind::Followers, opts)
    }

    fn list_following(&self, username: &str, opts: &ListOptions) -> Result<Page, ApiError> {
        self.list(username, ListKind::Following, opts)
    }
}

impl<G: FollowGraph + ?Sized> FollowGraph for &G {
    fn list(&self, username: &str, kind: ListKind, opts: &ListOptions) -> Result<Page, ApiError> {
        (**self).list(username, kind, opts)
    }
}

/// `FollowGraph` backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpFollowGraph<T> {
    client: GitHubClient,
    transport: T,
}

impl<T: Transport> HttpFollowGraph<T> {
    pub fn new(client: GitHubClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }
}

impl<T: Transport> FollowGraph for HttpFollowGraph<T> {
    fn list(&self, username: &str, kind: ListKind, opts: &ListOptions) -> Result<Page, ApiError> {
        info!(username, %kind, page = opts.page, "listing {kind}");
        let request = self.client.build_list(username, kind, opts);
        let result = self
            .transport
            .execute(request)
            .and_then(|response| self.client.parse_list(response));
        match &result {
            Ok(page) => info!(username, %kind, page = opts.page, count = page.users.len(), "listed {kind}"),
            Err(e) => error!(username, %kind, page = opts.page, error = %e, "error listing {kind}"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::http::{HttpRequest, HttpResponse};

    /// Records requests and replays one canned response.
    struct Canned {
        seen: RefCell<Vec<HttpRequest>>,
        response: Result<HttpResponse, ApiError>,
    }

    impl Transport for Canned {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request);
            self.response.clone()
        }
    }

    fn graph(response: Result<HttpResponse, ApiError>) -> HttpFollowGraph<Canned> {
        let client = GitHubClient::new("http://localhost:3000").unwrap().with_token("t");
        HttpFollowGraph::new(
            client,
            Canned {
                seen: RefCell::new(Vec::new()),
                response,
            },
        )
    }

    #[test]
    fn list_followers_round_trips_through_transport() {
        let g = graph(Ok(HttpResponse::ok(r#"[{"login":"bob"}]"#)));
        let page = g.list_followers("octocat", &ListOptions::first(100).at_page(3)).unwrap();
        assert_eq!(page.users[0].login, "bob");

        let seen = g.transport.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "http://localhost:3000/users/octocat/followers?per_page=100&page=3");
        assert_eq!(seen[0].header("authorization"), Some("Bearer t"));
    }

    #[test]
    fn list_following_hits_following_endpoint() {
        let g = graph(Ok(HttpResponse::ok("[]")));
        g.list_following("octocat", &ListOptions::default()).unwrap();
        assert!(g.transport.seen.borrow()[0].url.contains("/users/octocat/following?"));
    }

    #[test]
    fn transport_errors_pass_through_unchanged() {
        let g = graph(Err(ApiError::Transport("connection refused".to_string())));
        let err = g.list_followers("octocat", &ListOptions::default()).unwrap_err();
        assert_eq!(err, ApiError::Transport("connection refused".to_string()));
    }

    #[test]
    fn status_errors_surface_from_parse() {
        let g = graph(Ok(HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: String::new(),
        }));
        assert_eq!(g.list_following("ghost", &ListOptions::default()).unwrap_err(), ApiError::NotFound);
    }
}
