//! Pagination driver and audit pipeline.
//!
//! # Design
//! `FollowService::collect` walks one side of the follow graph page by page
//! until the API stops advertising a next page, reducing every record to its
//! login. The first error aborts the walk and the partial list is dropped.
//! There is no retry. Without `max_pages` the loop trusts the upstream to
//! terminate pagination.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::diff::not_following_back;
use crate::error::ApiError;
use crate::graph::FollowGraph;
use crate::types::{ListKind, ListOptions, MAX_PER_PAGE};

/// Both sides of an account's follow graph and the accounts that do not
/// follow back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Audit {
    pub followers: Vec<String>,
    pub following: Vec<String>,
    pub not_following_back: Vec<String>,
}

pub struct FollowService<G> {
    graph: G,
    per_page: u32,
    max_pages: Option<u32>,
    cancel: Option<Arc<AtomicBool>>,
}

impl<G: FollowGraph> FollowService<G> {
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            per_page: MAX_PER_PAGE,
            max_pages: None,
            cancel: None,
        }
    }

    /// Page size for every request, clamped to `1..=MAX_PER_PAGE`.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Fail with `PageLimitExceeded` instead of requesting more than `limit`
    /// pages for one listing.
    pub fn max_pages(mut self, limit: Option<u32>) -> Self {
        self.max_pages = limit;
        self
    }

    /// Checked before each page request. Setting the flag makes the next
    /// check fail with `Cancelled`; an in-flight request completes first.
    pub fn cancel_on(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Every login on one side of `username`'s follow graph, in API order.
    pub fn collect(&self, username: &str, kind: ListKind) -> Result<Vec<String>, ApiError> {
        info!(username, %kind, "collecting {kind}");
        let mut logins = Vec::new();
        let mut opts = ListOptions::first(self.per_page);
        let mut fetched = 0u32;
        loop {
            self.check_cancelled()?;
            if let Some(limit) = self.max_pages {
                if fetched >= limit {
                    error!(username, %kind, limit, "page limit exceeded");
                    return Err(ApiError::PageLimitExceeded { limit });
                }
            }

            let page = self.graph.list(username, kind, &opts).map_err(|e| {
                error!(username, %kind, error = %e, "error collecting {kind}");
                e
            })?;
            fetched += 1;
            logins.extend(page.users.into_iter().map(|u| u.login));

            match page.next_page {
                Some(next) => opts = opts.at_page(next),
                None => break,
            }
        }
        info!(username, %kind, count = logins.len(), pages = fetched, "collected {kind}");
        Ok(logins)
    }

    /// Fetch followers, then following, then compute who does not follow back.
    pub fn audit(&self, username: &str) -> Result<Audit, ApiError> {
        let followers = self.collect(username, ListKind::Followers)?;
        let following = self.collect(username, ListKind::Following)?;
        let not_following_back = not_following_back(&following, &followers);
        debug!(
            username,
            followers = followers.len(),
            following = following.len(),
            not_following_back = not_following_back.len(),
            "audit complete"
        );
        Ok(Audit {
            followers,
            following,
            not_following_back,
        })
    }

    fn check_cancelled(&self) -> Result<(), ApiError> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::SeqCst) => Err(ApiError::Cancelled),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::types::Page;

    /// Replays scripted pages keyed by (kind, page) and records every call.
    #[derive(Default)]
    struct Scripted {
        pages: HashMap<(ListKind, u32), Result<Page, ApiError>>,
        calls: RefCell<Vec<(ListKind, ListOptions)>>,
    }

    impl Scripted {
        fn page(mut self, kind: ListKind, page: u32, logins: &[&str], next: u32) -> Self {
            self.pages
                .insert((kind, page), Ok(Page::from_logins(logins.iter().copied(), next)));
            self
        }

        fn fail(mut self, kind: ListKind, page: u32, err: ApiError) -> Self {
            self.pages.insert((kind, page), Err(err));
            self
        }
    }

    impl FollowGraph for Scripted {
        fn list(&self, _username: &str, kind: ListKind, opts: &ListOptions) -> Result<Page, ApiError> {
            self.calls.borrow_mut().push((kind, *opts));
            self.pages
                .get(&(kind, opts.page))
                .cloned()
                .unwrap_or_else(|| Ok(Page::default()))
        }
    }

    #[test]
    fn collect_concatenates_pages_in_order() {
        let graph = Scripted::default()
            .page(ListKind::Followers, 1, &["a", "b"], 2)
            .page(ListKind::Followers, 2, &["c"], 0);
        let service = FollowService::new(&graph);
        assert_eq!(service.collect("me", ListKind::Followers).unwrap(), ["a", "b", "c"]);

        let calls = graph.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1, ListOptions { page: 1, per_page: 100 });
        assert_eq!(calls[1].1, ListOptions { page: 2, per_page: 100 });
    }

    #[test]
    fn collect_follows_the_advertised_cursor() {
        let graph = Scripted::default()
            .page(ListKind::Following, 1, &["a"], 5)
            .page(ListKind::Following, 5, &["b"], 0);
        let service = FollowService::new(&graph).per_page(10);
        assert_eq!(service.collect("me", ListKind::Following).unwrap(), ["a", "b"]);
        let pages: Vec<_> = graph.calls.borrow().iter().map(|(_, o)| (o.page, o.per_page)).collect();
        assert_eq!(pages, [(1, 10), (5, 10)]);
    }

    #[test]
    fn collect_empty_listing() {
        let graph = Scripted::default();
        let service = FollowService::new(&graph);
        assert!(service.collect("me", ListKind::Followers).unwrap().is_empty());
        assert_eq!(graph.calls.borrow().len(), 1);
    }

    #[test]
    fn failure_on_second_page_discards_partial_result() {
        let graph = Scripted::default()
            .page(ListKind::Followers, 1, &["a", "b"], 2)
            .fail(ListKind::Followers, 2, ApiError::Transport("reset by peer".to_string()));
        let service = FollowService::new(&graph);
        let err = service.collect("me", ListKind::Followers).unwrap_err();
        assert_eq!(err, ApiError::Transport("reset by peer".to_string()));
    }

    #[test]
    fn duplicate_logins_across_pages_are_kept() {
        let graph = Scripted::default()
            .page(ListKind::Followers, 1, &["a", "b"], 2)
            .page(ListKind::Followers, 2, &["b"], 0);
        let service = FollowService::new(&graph);
        assert_eq!(service.collect("me", ListKind::Followers).unwrap(), ["a", "b", "b"]);
    }

    #[test]
    fn page_cap_stops_a_runaway_upstream() {
        let graph = Scripted::default()
            .page(ListKind::Following, 1, &["a"], 2)
            .page(ListKind::Following, 2, &["b"], 3)
            .page(ListKind::Following, 3, &["c"], 4);
        let service = FollowService::new(&graph).max_pages(Some(2));
        let err = service.collect("me", ListKind::Following).unwrap_err();
        assert_eq!(err, ApiError::PageLimitExceeded { limit: 2 });
        assert_eq!(graph.calls.borrow().len(), 2);
    }

    #[test]
    fn page_cap_is_not_hit_when_pagination_ends_in_time() {
        let graph = Scripted::default()
            .page(ListKind::Following, 1, &["a"], 2)
            .page(ListKind::Following, 2, &["b"], 0);
        let service = FollowService::new(&graph).max_pages(Some(2));
        assert_eq!(service.collect("me", ListKind::Following).unwrap(), ["a", "b"]);
    }

    #[test]
    fn cancellation_is_checked_before_each_request() {
        let graph = Scripted::default().page(ListKind::Followers, 1, &["a"], 0);
        let flag = Arc::new(AtomicBool::new(true));
        let service = FollowService::new(&graph).cancel_on(flag.clone());
        assert_eq!(service.collect("me", ListKind::Followers).unwrap_err(), ApiError::Cancelled);
        assert!(graph.calls.borrow().is_empty());

        flag.store(false, Ordering::SeqCst);
        assert_eq!(service.collect("me", ListKind::Followers).unwrap(), ["a"]);
    }

    #[test]
    fn audit_fetches_followers_then_following() {
        let graph = Scripted::default()
            .page(ListKind::Followers, 1, &["bob"], 0)
            .page(ListKind::Following, 1, &["alice", "bob", "carol"], 0);
        let service = FollowService::new(&graph);
        let audit = service.audit("me").unwrap();
        assert_eq!(audit.followers, ["bob"]);
        assert_eq!(audit.following, ["alice", "bob", "carol"]);
        assert_eq!(audit.not_following_back, ["alice", "carol"]);

        let kinds: Vec<_> = graph.calls.borrow().iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, [ListKind::Followers, ListKind::Following]);
    }

    #[test]
    fn audit_stops_at_followers_failure() {
        let graph = Scripted::default()
            .fail(ListKind::Followers, 1, ApiError::Unauthorized)
            .page(ListKind::Following, 1, &["alice"], 0);
        let service = FollowService::new(&graph);
        assert_eq!(service.audit("me").unwrap_err(), ApiError::Unauthorized);
        assert!(graph.calls.borrow().iter().all(|(k, _)| *k == ListKind::Followers));
    }
}
