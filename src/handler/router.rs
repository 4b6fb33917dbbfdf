//! Fixed, ordered route table.
//!
//! Matching is first-match-wins over an explicit pattern list with one
//! level of path-parameter capture, so the matching semantics stay
//! auditable without a pattern-matching library. `/files/` needs a
//! non-empty capture for POST (an empty one falls through to the POST
//! fallback), while GET accepts an empty capture.

use once_cell::sync::Lazy;

use crate::http::HttpMethod;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Root,
    Echo(String),
    UserAgent,
    FilesGet(String),
    FilesPost(String),
    NotFound,
    MethodNotAllowed,
    BadRequest,
}

enum Pattern {
    Exact(&'static str),
    Prefix(&'static str),
    /// Exact match with an optional trailing slash.
    OptionalSlash(&'static str),
}

impl Pattern {
    /// The captured remainder on a match: the stripped suffix for a prefix
    /// pattern, the empty string otherwise.
    fn capture<'a>(&self, target: &'a str) -> Option<&'a str> {
        match self {
            Pattern::Exact(p) => (target == *p).then_some(""),
            Pattern::Prefix(p) => target.strip_prefix(*p),
            Pattern::OptionalSlash(p) => {
                (target == *p || target.strip_suffix('/') == Some(*p)).then_some("")
            }
        }
    }
}

struct RoutePattern {
    method: HttpMethod,
    pattern: Pattern,
    bind: fn(&str) -> Option<RouteMatch>,
}

static ROUTES: Lazy<Vec<RoutePattern>> = Lazy::new(|| {
    vec![
        RoutePattern {
            method: HttpMethod::Get,
            pattern: Pattern::Exact("/"),
            bind: |_| Some(RouteMatch::Root),
        },
        RoutePattern {
            method: HttpMethod::Get,
            pattern: Pattern::Prefix("/echo/"),
            bind: |c| Some(RouteMatch::Echo(c.to_string())),
        },
        RoutePattern {
            method: HttpMethod::Get,
            pattern: Pattern::Prefix("/files/"),
            bind: |c| Some(RouteMatch::FilesGet(c.to_string())),
        },
        RoutePattern {
            method: HttpMethod::Get,
            pattern: Pattern::Exact("/files"),
            bind: |_| Some(RouteMatch::FilesGet(String::new())),
        },
        RoutePattern {
            method: HttpMethod::Get,
            pattern: Pattern::OptionalSlash("/user-agent"),
            bind: |_| Some(RouteMatch::UserAgent),
        },
        RoutePattern {
            method: HttpMethod::Post,
            pattern: Pattern::Prefix("/files/"),
            bind: |c| (!c.is_empty()).then(|| RouteMatch::FilesPost(c.to_string())),
        },
    ]
});

pub fn route(method: HttpMethod, target: &str) -> RouteMatch {
    for entry in ROUTES.iter() {
        if entry.method != method {
            continue;
        }
        if let Some(capture) = entry.pattern.capture(target) {
            if let Some(matched) = (entry.bind)(capture) {
                return matched;
            }
        }
    }

    match method {
        HttpMethod::Get => RouteMatch::NotFound,
        HttpMethod::Post => RouteMatch::MethodNotAllowed,
        HttpMethod::Unknown => RouteMatch::BadRequest,
    }
}
