//! # Route Model
//!
//! The closed set of places the app can be. Every URL the parser accepts
//! becomes one of these, and every link the app renders is built from one.
//!
//! ```text
//! Route
//! ├── Home
//! ├── Session { id, signature, public_key }
//! ├── Seeds { hostname_port }
//! ├── Projects(ProjectsParams)
//! │   └── view: ProjectView
//! │       ├── Tree | History | Commits
//! │       ├── Issue { issue } | Issues { view? }
//! │       └── Patch { patch, revision? } | Patches { view? }
//! └── NotFound { url }
//! ```
//!
//! Routes are values. Nothing mutates a route in place; navigation builds a
//! new one (see [`crate::core::project`]).
//!
//! The serde shape (`{"resource": ..., "params": ...}`) is the payload stored
//! on each browser history entry, so it has to stay stable across releases.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the app's address is laid out in the browser location bar.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoutingMode {
    /// `/seeds/host/rad:abc` in the path. Needs server-side fallback routing.
    #[serde(rename = "path")]
    #[default]
    Path,
    /// `/#/seeds/host/rad:abc` in the fragment. Works from static file hosting.
    #[serde(rename = "hash")]
    Hash,
}

impl RoutingMode {
    /// Base href for assets and relative links.
    pub fn base(self) -> &'static str {
        match self {
            RoutingMode::Path => "/",
            RoutingMode::Hash => "./",
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "resource", content = "params")]
pub enum Route {
    #[serde(rename = "home")]
    Home,
    #[serde(rename = "session", rename_all = "camelCase")]
    Session {
        id: String,
        signature: String,
        public_key: String,
    },
    #[serde(rename = "seeds", rename_all = "camelCase")]
    Seeds { hostname_port: String },
    #[serde(rename = "projects")]
    Projects(ProjectsParams),
    /// Anything the parser could not place. Kept only so the 404 page can show it.
    #[serde(rename = "404")]
    NotFound { url: String },
}

impl Route {
    /// The resource tag, as it appears in the serialized payload.
    pub fn resource(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Session { .. } => "session",
            Route::Seeds { .. } => "seeds",
            Route::Projects(_) => "projects",
            Route::NotFound { .. } => "404",
        }
    }

    pub fn as_project(&self) -> Option<&ProjectsParams> {
        match self {
            Route::Projects(params) => Some(params),
            _ => None,
        }
    }

    pub fn not_found(url: impl Into<String>) -> Route {
        Route::NotFound { url: url.into() }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::core::serializer::route_to_path(self))
    }
}

/// Everything needed to address something inside one repository.
///
/// Optional fields are `None` when the URL didn't carry them. Empty text is
/// never used as a stand-in for "unset".
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsParams {
    pub id: String,
    pub hostname_port: String,
    pub view: ProjectView,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Leftover path segments, joined with `/`, for the view to dispatch on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Raw query string, without the leading `?`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Anchor fragment, without the leading `#`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Line number from an `#L<digits>` fragment (digits only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

impl ProjectsParams {
    /// A project route with every optional field unset.
    pub fn new(
        id: impl Into<String>,
        hostname_port: impl Into<String>,
        view: ProjectView,
    ) -> Self {
        Self {
            id: id.into(),
            hostname_port: hostname_port.into(),
            view,
            peer: None,
            path: None,
            revision: None,
            route: None,
            search: None,
            hash: None,
            line: None,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "resource", content = "params")]
pub enum ProjectView {
    #[serde(rename = "tree")]
    Tree,
    #[serde(rename = "history")]
    History,
    #[serde(rename = "commits")]
    Commits,
    #[serde(rename = "issue")]
    Issue { issue: String },
    #[serde(rename = "issues")]
    Issues {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        view: Option<ListView>,
    },
    #[serde(rename = "patches")]
    Patches {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        view: Option<ListView>,
    },
    #[serde(rename = "patch")]
    Patch {
        patch: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        revision: Option<String>,
    },
}

impl ProjectView {
    /// Whether `revision`/`path` are meaningful for this view.
    pub fn is_tree_like(&self) -> bool {
        matches!(
            self,
            ProjectView::Tree | ProjectView::History | ProjectView::Commits
        )
    }
}

/// Sub-views of the issue and patch listings.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "resource")]
pub enum ListView {
    /// The "open a new one" form.
    #[serde(rename = "new")]
    New,
}
