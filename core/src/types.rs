//! Domain DTOs for the follower API.
//!
//! # Design
//! Only `login` is required on an account record. The other fields are kept
//! so callers can print richer output later, but the pipeline ignores them
//! and serde skips anything else the API sends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Largest page size the API accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// An account record as returned by the follower/following endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl User {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            id: None,
            avatar_url: None,
            html_url: None,
            kind: None,
        }
    }
}

/// Which side of the follow graph to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Followers,
    Following,
}

impl ListKind {
    /// Path segment used by the API.
    pub fn as_str(self) -> &'static str {
        match self {
            ListKind::Followers => "followers",
            ListKind::Following => "following",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "followers" => Ok(ListKind::Followers),
            "following" => Ok(ListKind::Following),
            other => Err(format!("unknown list kind: {other}")),
        }
    }
}

/// Pagination options for a single list request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub page: u32,
    pub per_page: u32,
}

impl ListOptions {
    /// First page with `per_page` clamped to `1..=MAX_PER_PAGE`.
    pub fn first(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn at_page(self, page: u32) -> Self {
        Self { page, ..self }
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self::first(MAX_PER_PAGE)
    }
}

/// One page of account records plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub users: Vec<User>,
    /// Cursor for the next request. `None` when this is the last page.
    pub next_page: Option<u32>,
    pub last_page: Option<u32>,
}

impl Page {
    /// Build a page from logins. `next_page` of `0` is treated as absent.
    pub fn from_logins<I, S>(logins: I, next_page: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            users: logins.into_iter().map(User::new).collect(),
            next_page: (next_page != 0).then_some(next_page),
            last_page: None,
        }
    }
}
