//! # Path Parser
//!
//! Turns whatever the location bar holds into a [`Route`].
//!
//! ```text
//! "https://app/seeds/seed.example.org:8776/rad:z3g/issues/new?x=1"
//!        │
//!        ▼  resolve against a base URL, pick segments by RoutingMode
//! ["seeds", "seed.example.org:8776", "rad:z3g", "issues", "new"]  query: x=1
//!        │
//!        ▼  consume segments left to right
//! Route::Projects { view: Issues { view: New }, search: "x=1", .. }
//! ```
//!
//! `None` means "this isn't one of ours". It is not an error: the caller
//! decides what an unknown address means (usually [`Route::NotFound`]).
//! Nothing in here panics on malformed input.

use log::debug;
use regex::Regex;
use std::collections::VecDeque;
use std::sync::LazyLock;
use url::Url;

use super::route::{ListView, ProjectView, ProjectsParams, Route, RoutingMode};

/// Relative inputs are resolved against this. Only the path, query and
/// fragment of the result are ever looked at.
const PARSE_BASE: &str = "http://localhost/";

/// `#L42` at the very end of the address.
static LINE_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#L(\d+)$").expect("valid line regex"));

/// The last `#`-delimited suffix, as long as it has no `.` in it. File names
/// like `#README.md` are part of the path, not anchors.
static HASH_FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([^#.]+)$").expect("valid hash regex"));

/// An address split into the pieces routing cares about.
struct Address {
    segments: VecDeque<String>,
    query: Option<String>,
    /// Everything after the routing `#`, without it. May itself hold `#`.
    anchor: Option<String>,
}

impl Address {
    fn resolve(input: &str, mode: RoutingMode) -> Option<Address> {
        let base = Url::parse(PARSE_BASE).ok()?;
        let url = match base.join(input) {
            Ok(url) => url,
            Err(e) => {
                debug!("Could not resolve address {:?}: {}", input, e);
                return None;
            }
        };

        match mode {
            RoutingMode::Path => Some(Address {
                segments: split_segments(url.path()),
                query: url.query().map(str::to_string),
                anchor: url.fragment().map(str::to_string),
            }),
            RoutingMode::Hash => {
                let fragment = url.fragment().unwrap_or("");
                let fragment = fragment.strip_prefix('/').unwrap_or(fragment);
                let (location, anchor) = match fragment.split_once('#') {
                    Some((location, anchor)) => (location, Some(anchor.to_string())),
                    None => (fragment, None),
                };
                let (path, query) = match location.split_once('?') {
                    Some((path, query)) => (path, Some(query.to_string())),
                    None => (location, url.query().map(str::to_string)),
                };
                Some(Address {
                    segments: split_segments(&format!("/{path}")),
                    query,
                    anchor,
                })
            }
        }
    }

    /// Next segment, treating an empty one the same as a missing one.
    fn next_non_empty(&mut self) -> Option<String> {
        self.segments.pop_front().filter(|s| !s.is_empty())
    }

    /// The query string if there is a non-empty one.
    fn search(&self) -> Option<String> {
        self.query.clone().filter(|q| !q.is_empty())
    }

    fn query_param(&self, key: &str) -> Option<String> {
        let query = self.query.as_deref()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Remaining segments rejoined with `/`, or `None` if nothing is left.
    fn rest(&mut self) -> Option<String> {
        let rest = self.segments.drain(..).collect::<Vec<_>>().join("/");
        if rest.is_empty() { None } else { Some(rest) }
    }

    /// `(line, hash)` from the anchor. At most one of them is set.
    fn fragment_target(&self) -> (Option<String>, Option<String>) {
        let Some(anchor) = self.anchor.as_deref() else {
            return (None, None);
        };
        let text = format!("#{anchor}");
        if let Some(caps) = LINE_FRAGMENT.captures(&text) {
            return (Some(caps[1].to_string()), None);
        }
        let hash = HASH_FRAGMENT.captures(&text).map(|caps| caps[1].to_string());
        (None, hash)
    }
}

/// Strips the leading `/` and splits on `/`, keeping empty segments so a
/// trailing slash is still visible to the caller.
fn split_segments(path: &str) -> VecDeque<String> {
    path.strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .map(str::to_string)
        .collect()
}

/// Parses an address into a route. See the module docs for the grammar.
pub fn path_to_route(input: &str, mode: RoutingMode) -> Option<Route> {
    if input.is_empty() {
        return Some(Route::Home);
    }

    let mut address = Address::resolve(input, mode)?;
    let resource = address.segments.pop_front().unwrap_or_default();

    match resource.as_str() {
        "seeds" => resolve_seeds(&mut address),
        "session" => Some(resolve_session(&mut address)),
        "" => Some(Route::Home),
        other => {
            debug!("No route for resource {:?} in {:?}", other, input);
            None
        }
    }
}

fn resolve_seeds(address: &mut Address) -> Option<Route> {
    let hostname_port = address.next_non_empty()?;

    let Some(id) = address.next_non_empty() else {
        return Some(Route::Seeds { hostname_port });
    };

    // With or without a trailing slash after the id.
    let at_root = address.segments.is_empty()
        || (address.segments.len() == 1 && address.segments[0].is_empty());
    if at_root {
        return Some(Route::Projects(ProjectsParams::new(
            id,
            hostname_port,
            ProjectView::Tree,
        )));
    }

    resolve_project(address, hostname_port, id).map(Route::Projects)
}

fn resolve_project(
    address: &mut Address,
    hostname_port: String,
    id: String,
) -> Option<ProjectsParams> {
    let mut content = address.segments.pop_front();
    let mut peer = None;
    if content.as_deref() == Some("remotes") {
        peer = address.next_non_empty();
        content = address.segments.pop_front();
    }

    let mut params = ProjectsParams::new(id, hostname_port, ProjectView::Tree);
    params.peer = peer;

    match content.as_deref().unwrap_or("") {
        "" | "tree" => {
            let (line, hash) = address.fragment_target();
            params.line = line;
            params.hash = hash;
            params.route = address.rest();
        }
        "history" => {
            params.view = ProjectView::History;
            params.route = address.rest();
        }
        "commits" => {
            params.view = ProjectView::Commits;
            params.route = address.rest();
        }
        "issues" => match address.next_non_empty() {
            Some(action) if action == "new" => {
                params.view = ProjectView::Issues {
                    view: Some(ListView::New),
                };
                params.search = address.search();
            }
            Some(issue) => params.view = ProjectView::Issue { issue },
            None => {
                params.view = ProjectView::Issues { view: None };
                params.search = address.search();
            }
        },
        "patches" => {
            match address.next_non_empty() {
                Some(patch) => {
                    let revision = address.next_non_empty();
                    params.view = ProjectView::Patch { patch, revision };
                }
                None => params.view = ProjectView::Patches { view: None },
            }
            params.search = address.search();
        }
        other => {
            debug!("Unknown project content {:?}", other);
            return None;
        }
    }

    Some(params)
}

fn resolve_session(address: &mut Address) -> Route {
    match address.next_non_empty() {
        Some(id) => Route::Session {
            id,
            signature: address.query_param("sig").unwrap_or_default(),
            public_key: address.query_param("pk").unwrap_or_default(),
        },
        None => Route::Home,
    }
}
