//! Set differences over login lists.
//!
//! Each function builds a hash set from one side and scans the other once,
//! so the cost is linear in both inputs. Output keeps the scanned side's
//! order and multiplicity: a login that appears twice and qualifies is
//! emitted twice.

use std::collections::HashSet;

/// Logins in `following` that are absent from `followers`.
pub fn not_following_back<S: AsRef<str>>(following: &[S], followers: &[S]) -> Vec<String> {
    scan(following, followers, false)
}

/// Logins in `followers` that are absent from `following`.
pub fn fans<S: AsRef<str>>(following: &[S], followers: &[S]) -> Vec<String> {
    scan(followers, following, false)
}

/// Logins in `following` that also appear in `followers`.
pub fn mutuals<S: AsRef<str>>(following: &[S], followers: &[S]) -> Vec<String> {
    scan(following, followers, true)
}

fn scan<S: AsRef<str>>(keep_from: &[S], lookup: &[S], present: bool) -> Vec<String> {
    let lookup: HashSet<&str> = lookup.iter().map(AsRef::<str>::as_ref).collect();
    keep_from
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|login| lookup.contains(login) == present)
        .map(str::to_string)
        .collect()
}
