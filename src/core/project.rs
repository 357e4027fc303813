//! # Project-scoped Navigation
//!
//! Inside a repository most links only change one or two things (the view,
//! the revision, the anchor) and keep the rest. A [`ProjectPatch`] says what
//! changes; [`create_project_route`] merges it onto the active route.

use super::error::NavError;
use super::route::{ProjectView, ProjectsParams, Route};

/// A partial update to [`ProjectsParams`].
///
/// For optional fields, `None` leaves the field alone and `Some(None)`
/// clears it. `line` and `hash` are the exception on merge: they are
/// cleared unless the patch mentions them, since an anchor rarely makes
/// sense on the next page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub id: Option<String>,
    pub hostname_port: Option<String>,
    pub view: Option<ProjectView>,
    pub peer: Option<Option<String>>,
    pub path: Option<Option<String>>,
    pub revision: Option<Option<String>>,
    pub route: Option<Option<String>>,
    pub search: Option<Option<String>>,
    pub hash: Option<Option<String>>,
    pub line: Option<Option<String>>,
}

/// Setter and clearer for each optional field.
macro_rules! patch_field {
    ( $($field:ident, $clear:ident;)+ ) => {
        $(
            pub fn $field(mut self, value: impl Into<String>) -> Self {
                self.$field = Some(Some(value.into()));
                self
            }

            pub fn $clear(mut self) -> Self {
                self.$field = Some(None);
                self
            }
        )+
    };
}

impl ProjectPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn hostname_port(mut self, hostname_port: impl Into<String>) -> Self {
        self.hostname_port = Some(hostname_port.into());
        self
    }

    pub fn view(mut self, view: ProjectView) -> Self {
        self.view = Some(view);
        self
    }

    patch_field! {
        peer, clear_peer;
        path, clear_path;
        revision, clear_revision;
        route, clear_route;
        search, clear_search;
        hash, clear_hash;
        line, clear_line;
    }

    /// Builds new params from `base` with this patch applied.
    pub fn apply(&self, base: &ProjectsParams) -> ProjectsParams {
        fn pick(patch: &Option<Option<String>>, current: &Option<String>) -> Option<String> {
            match patch {
                Some(value) => value.clone(),
                None => current.clone(),
            }
        }

        ProjectsParams {
            id: self.id.clone().unwrap_or_else(|| base.id.clone()),
            hostname_port: self
                .hostname_port
                .clone()
                .unwrap_or_else(|| base.hostname_port.clone()),
            view: self.view.clone().unwrap_or_else(|| base.view.clone()),
            peer: pick(&self.peer, &base.peer),
            path: pick(&self.path, &base.path),
            revision: pick(&self.revision, &base.revision),
            route: pick(&self.route, &base.route),
            search: pick(&self.search, &base.search),
            hash: self.hash.clone().flatten(),
            line: self.line.clone().flatten(),
        }
    }
}

/// The route `patch` leads to from `active`. Only valid on project pages.
pub fn create_project_route(active: &Route, patch: &ProjectPatch) -> Result<Route, NavError> {
    match active {
        Route::Projects(params) => Ok(Route::Projects(patch.apply(params))),
        other => Err(NavError::NotAProjectRoute {
            resource: other.resource(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> Route {
        let mut params = ProjectsParams::new("rad:abc", "seed.example.org:8776", ProjectView::Tree);
        params.peer = Some("z6Mk".to_string());
        params.revision = Some("main".to_string());
        params.line = Some("12".to_string());
        params.hash = Some("intro".to_string());
        Route::Projects(params)
    }

    fn merged(patch: ProjectPatch) -> ProjectsParams {
        match create_project_route(&active(), &patch).unwrap() {
            Route::Projects(params) => params,
            other => panic!("expected project route, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_patch_keeps_params_but_drops_anchor() {
        let params = merged(ProjectPatch::new());
        assert_eq!(params.peer.as_deref(), Some("z6Mk"));
        assert_eq!(params.revision.as_deref(), Some("main"));
        assert!(params.line.is_none());
        assert!(params.hash.is_none());
    }

    #[test]
    fn test_patch_sets_and_clears() {
        let params = merged(
            ProjectPatch::new()
                .view(ProjectView::History)
                .revision("dev")
                .clear_peer(),
        );
        assert_eq!(params.view, ProjectView::History);
        assert_eq!(params.revision.as_deref(), Some("dev"));
        assert!(params.peer.is_none());
        assert_eq!(params.id, "rad:abc");
    }

    #[test]
    fn test_patch_can_keep_line() {
        let params = merged(ProjectPatch::new().line("30"));
        assert_eq!(params.line.as_deref(), Some("30"));
        assert!(params.hash.is_none());
    }

    #[test]
    fn test_outside_project_is_usage_error() {
        let err = create_project_route(&Route::Home, &ProjectPatch::new()).unwrap_err();
        assert!(matches!(err, NavError::NotAProjectRoute { resource: "home" }));
    }
}
