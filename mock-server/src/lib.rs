//! In-memory stand-in for the follower endpoints of the GitHub REST API.
//!
//! Serves `GET /users/{username}/followers` and `GET /users/{username}/following`
//! from a seeded graph, paginated with `page`/`per_page` and a `Link` header
//! the same way the real API does it.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

pub const DEFAULT_PER_PAGE: u32 = 30;
pub const MAX_PER_PAGE: u32 = 100;

/// Both sides of one account's follow graph, in the order they are served.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub followers: Vec<String>,
    #[serde(default)]
    pub following: Vec<String>,
}

impl Account {
    pub fn new<S: Into<String>>(
        followers: impl IntoIterator<Item = S>,
        following: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            followers: followers.into_iter().map(Into::into).collect(),
            following: following.into_iter().map(Into::into).collect(),
        }
    }
}

/// Account record as served on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub html_url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl User {
    fn from_login(login: &str) -> Self {
        Self {
            login: login.to_string(),
            html_url: format!("https://github.com/{login}"),
            kind: "User".to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub type Graph = Arc<RwLock<HashMap<String, Account>>>;

#[derive(Clone)]
struct AppState {
    graph: Graph,
    token: Option<Arc<str>>,
}

pub fn seed(accounts: impl IntoIterator<Item = (String, Account)>) -> Graph {
    Arc::new(RwLock::new(accounts.into_iter().collect()))
}

/// Router over an empty graph with authentication disabled.
pub fn app() -> Router {
    app_with(seed(HashMap::new()), None)
}

/// Router over `graph`. When `token` is set, requests must carry
/// `authorization: Bearer <token>` or they are rejected with 401.
pub fn app_with(graph: Graph, token: Option<String>) -> Router {
    let state = AppState {
        graph,
        token: token.map(Arc::from),
    };
    Router::new()
        .route("/users/{username}/{kind}", get(list_users))
        .with_state(state)
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

async fn list_users(
    State(state): State<AppState>,
    Path((username, kind)): Path<(String, String)>,
    Query(query): Query<ListQuery>,
    headers: HeaderMap,
) -> Response {
    if let Some(expected) = &state.token {
        let presented = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        if presented != Some(expected.as_ref()) {
            return message(StatusCode::UNAUTHORIZED, "Bad credentials");
        }
    }

    let graph = state.graph.read().await;
    let Some(account) = graph.get(&username) else {
        return message(StatusCode::NOT_FOUND, "Not Found");
    };
    let logins = match kind.as_str() {
        "followers" => &account.followers,
        "following" => &account.following,
        _ => return message(StatusCode::NOT_FOUND, "Not Found"),
    };

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    let start = (page as usize - 1).saturating_mul(per_page as usize);
    let users: Vec<User> = logins
        .iter()
        .skip(start)
        .take(per_page as usize)
        .map(|l| User::from_login(l))
        .collect();

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let base = format!("http://{host}/users/{username}/{kind}");
    let last = logins.len().div_ceil(per_page as usize).max(1) as u32;

    let mut response = Json(users).into_response();
    if let Some(link) = link_header(&base, page, per_page, last) {
        if let Ok(value) = link.parse() {
            response.headers_mut().insert(header::LINK, value);
        }
    }
    response
}

/// `Link` value for `page` of `last`. `None` when there is only one page.
pub fn link_header(base: &str, page: u32, per_page: u32, last: u32) -> Option<String> {
    if last <= 1 {
        return None;
    }
    let target = |p: u32| format!("<{base}?per_page={per_page}&page={p}>");
    let mut links = Vec::new();
    if page > 1 {
        links.push(format!("{}; rel=\"prev\"", target(page - 1)));
    }
    if page < last {
        links.push(format!("{}; rel=\"next\"", target(page + 1)));
        links.push(format!("{}; rel=\"last\"", target(last)));
    }
    if page > 1 {
        links.push(format!("{}; rel=\"first\"", target(1)));
    }
    Some(links.join(", "))
}

fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}
