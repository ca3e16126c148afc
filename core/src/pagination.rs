//! `Link` header parsing.
//!
//! The API advertises pagination as an RFC 8288 `Link` header:
//!
//! ```text
//! <https://api.github.com/user/1/followers?per_page=100&page=2>; rel="next",
//! <https://api.github.com/user/1/followers?per_page=100&page=7>; rel="last"
//! ```
//!
//! Only the `page` query parameter of the `next` and `last` targets matters.
//! A target whose URL does not parse, or carries no numeric `page`, is
//! ignored rather than treated as an error.

use url::Url;

/// Page numbers extracted from a `Link` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkPages {
    pub next: Option<u32>,
    pub last: Option<u32>,
}

pub fn parse_link_header(value: &str) -> LinkPages {
    let mut pages = LinkPages::default();
    for link in value.split(',') {
        let mut params = link.split(';');
        let Some(target) = params.next() else {
            continue;
        };
        let Some(page) = page_param(target) else {
            continue;
        };
        for rel in params.filter_map(rel_values).flat_map(str::split_whitespace) {
            match rel {
                "next" => pages.next = Some(page),
                "last" => pages.last = Some(page),
                _ => {}
            }
        }
    }
    // `page=0` would restart pagination; treat it as no further pages.
    pages.next = pages.next.filter(|&p| p != 0);
    pages
}

fn rel_values(param: &str) -> Option<&str> {
    let (key, value) = param.trim().split_once('=')?;
    if !key.trim().eq_ignore_ascii_case("rel") {
        return None;
    }
    Some(value.trim().trim_matches('"'))
}

fn page_param(target: &str) -> Option<u32> {
    let url = target
        .trim()
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))?;
    Url::parse(url)
        .ok()?
        .query_pairs()
        .find(|(k, _)| k == "page")
        .and_then(|(_, v)| v.parse().ok())
}
