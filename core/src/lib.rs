//! Follow-back audit core for the GitHub follower API.
//!
//! # Overview
//! Lists an account's followers and the accounts it follows, then reports the
//! ones that do not follow back. Request building and response parsing never
//! touch the network (host-does-IO pattern): a caller-supplied `Transport`
//! executes the round-trip, so everything here is deterministic and testable.
//!
//! # Design
//! - `GitHubClient` is stateless: `build_list` produces a request,
//!   `parse_list` consumes a response.
//! - `FollowGraph` is the "can list followers / following" capability;
//!   `HttpFollowGraph` implements it over any `Transport`.
//! - `FollowService` drives pagination to completion and aborts on the first
//!   error without returning partial lists.
//! - `diff` holds the linear-time set differences.

pub mod client;
pub mod diff;
pub mod error;
pub mod graph;
pub mod http;
pub mod pagination;
pub mod service;
pub mod types;

pub use client::GitHubClient;
pub use diff::{fans, mutuals, not_following_back};
pub use error::ApiError;
pub use graph::{FollowGraph, HttpFollowGraph};
pub use http::{HttpRequest, HttpResponse, Transport};
pub use service::{Audit, FollowService};
pub use types::{ListKind, ListOptions, Page, User};
