//! # Path Serializer
//!
//! The inverse of the parser: a [`Route`] back to the text that goes into
//! `href`s and the browser history.
//!
//! Canonical routes round-trip (`path_to_route(route_to_path(r)) == r`).
//! Routes built by hand with fields the parser never fills in (say, a
//! `revision` on a tree view) serialize to a path that parses into the
//! equivalent `route` form instead.

use url::form_urlencoded;

use super::route::{ListView, ProjectView, ProjectsParams, Route, RoutingMode};

/// Canonical path for a route, always starting with `/` (except for
/// [`Route::NotFound`], which echoes whatever was typed).
pub fn route_to_path(route: &Route) -> String {
    match route {
        Route::Home => "/".to_string(),
        Route::Session {
            id,
            signature,
            public_key,
        } => {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("sig", signature)
                .append_pair("pk", public_key)
                .finish();
            format!("/session/{id}?{query}")
        }
        Route::Seeds { hostname_port } => format!("/seeds/{hostname_port}"),
        Route::Projects(params) => project_path(params),
        Route::NotFound { url } => url.clone(),
    }
}

/// What actually gets written to the history and into anchors: the path, or
/// `#` + the path when routing through the fragment.
///
/// [`Route::NotFound`] already holds a whole location and is never prefixed.
pub fn route_to_href(route: &Route, mode: RoutingMode) -> String {
    match (mode, route) {
        (_, Route::NotFound { url }) => url.clone(),
        (RoutingMode::Path, _) => route_to_path(route),
        (RoutingMode::Hash, _) => format!("#{}", route_to_path(route)),
    }
}

fn project_path(params: &ProjectsParams) -> String {
    let mut prefix = format!("/seeds/{}/{}", params.hostname_port, params.id);
    if let Some(peer) = non_empty(&params.peer) {
        prefix.push_str("/remotes/");
        prefix.push_str(peer);
    }

    let suffix = project_suffix(params);

    match &params.view {
        ProjectView::Tree if suffix.is_empty() => prefix,
        ProjectView::Tree => format!("{prefix}/tree{suffix}"),
        ProjectView::History => format!("{prefix}/history{suffix}"),
        ProjectView::Commits => format!("{prefix}/commits{suffix}"),
        ProjectView::Issues {
            view: Some(ListView::New),
        } => format!("{prefix}/issues/new{suffix}"),
        ProjectView::Issues { view: None } => format!("{prefix}/issues{suffix}"),
        // A single issue is addressed by its id alone.
        ProjectView::Issue { issue } => format!("{prefix}/issues/{issue}"),
        ProjectView::Patches {
            view: Some(ListView::New),
        } => format!("{prefix}/patches/new{suffix}"),
        ProjectView::Patches { view: None } => format!("{prefix}/patches{suffix}"),
        ProjectView::Patch {
            patch,
            revision: Some(revision),
        } => format!("{prefix}/patches/{patch}/{revision}{suffix}"),
        ProjectView::Patch {
            patch,
            revision: None,
        } => format!("{prefix}/patches/{patch}{suffix}"),
    }
}

/// `[/<route> | /<revision>[/<path>]][?<search>][#L<line> | #<hash>]`
fn project_suffix(params: &ProjectsParams) -> String {
    let mut suffix = String::new();

    if let Some(route) = non_empty(&params.route) {
        suffix.push('/');
        suffix.push_str(route);
    } else {
        if params.view.is_tree_like()
            && let Some(revision) = non_empty(&params.revision)
        {
            suffix.push('/');
            suffix.push_str(revision);
        }
        if let Some(path) = non_empty(&params.path)
            && path != "/"
        {
            suffix.push('/');
            suffix.push_str(path.trim_start_matches('/'));
        }
    }

    if let Some(search) = non_empty(&params.search) {
        suffix.push('?');
        suffix.push_str(search);
    }

    if let Some(line) = non_empty(&params.line) {
        suffix.push_str("#L");
        suffix.push_str(line);
    } else if let Some(hash) = non_empty(&params.hash) {
        suffix.push('#');
        suffix.push_str(hash);
    }

    suffix
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::path_to_route;

    const HOST: &str = "host.example.org:8776";

    fn params(view: ProjectView) -> ProjectsParams {
        ProjectsParams::new("rad:abc", HOST, view)
    }

    fn path(params: ProjectsParams) -> String {
        route_to_path(&Route::Projects(params))
    }

    fn round_trip(input: &str) -> String {
        let route = path_to_route(input, RoutingMode::Path).expect("parses");
        route_to_path(&route)
    }

    /// Generates one test per canonical path that must survive parse + serialize.
    macro_rules! test_round_trip {
        ( $($name:ident: $input:expr,)+ ) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(round_trip($input), $input);
                }
            )+
        };
    }

    test_round_trip! {
        test_round_trip_home: "/",
        test_round_trip_seeds: "/seeds/host.example.org:8776",
        test_round_trip_project_root: "/seeds/host.example.org:8776/rad:abc",
        test_round_trip_tree_revision_path: "/seeds/host.example.org:8776/rad:abc/tree/a1b2c3/src/main.rs",
        test_round_trip_tree_line: "/seeds/host.example.org:8776/rad:abc/tree/main/README.md#L7",
        test_round_trip_remote_history: "/seeds/host.example.org:8776/rad:abc/remotes/z6Mk/history/main",
        test_round_trip_new_issue: "/seeds/host.example.org:8776/rad:abc/issues/new?title=x",
        test_round_trip_issue: "/seeds/host.example.org:8776/rad:abc/issues/4f2a",
        test_round_trip_patch_revision: "/seeds/host.example.org:8776/rad:abc/patches/P1/R1",
        test_round_trip_session: "/session/abc123?sig=SIG&pk=PK",
    }

    #[test]
    fn test_tree_without_suffix_drops_tree_segment() {
        assert_eq!(path(params(ProjectView::Tree)), format!("/seeds/{HOST}/rad:abc"));
    }

    #[test]
    fn test_revision_and_path() {
        let mut p = params(ProjectView::Tree);
        p.revision = Some("main".to_string());
        p.path = Some("src/lib.rs".to_string());
        assert_eq!(path(p), format!("/seeds/{HOST}/rad:abc/tree/main/src/lib.rs"));
    }

    #[test]
    fn test_root_path_is_omitted() {
        let mut p = params(ProjectView::History);
        p.revision = Some("main".to_string());
        p.path = Some("/".to_string());
        assert_eq!(path(p), format!("/seeds/{HOST}/rad:abc/history/main"));
    }

    #[test]
    fn test_route_overrides_revision_and_path() {
        let mut p = params(ProjectView::Commits);
        p.revision = Some("ignored".to_string());
        p.path = Some("ignored.rs".to_string());
        p.route = Some("fcc9294".to_string());
        assert_eq!(path(p), format!("/seeds/{HOST}/rad:abc/commits/fcc9294"));
    }

    #[test]
    fn test_revision_ignored_outside_tree_like_views() {
        let mut p = params(ProjectView::Issues { view: None });
        p.revision = Some("main".to_string());
        assert_eq!(path(p), format!("/seeds/{HOST}/rad:abc/issues"));
    }

    #[test]
    fn test_line_wins_over_hash() {
        let mut p = params(ProjectView::Tree);
        p.line = Some("42".to_string());
        p.hash = Some("intro".to_string());
        assert_eq!(path(p), format!("/seeds/{HOST}/rad:abc/tree#L42"));
    }

    #[test]
    fn test_hash_alone() {
        let mut p = params(ProjectView::Tree);
        p.route = Some("main/README.md".to_string());
        p.hash = Some("intro".to_string());
        assert_eq!(
            path(p),
            format!("/seeds/{HOST}/rad:abc/tree/main/README.md#intro")
        );
    }

    #[test]
    fn test_peer_prefix() {
        let mut p = params(ProjectView::Patches { view: None });
        p.peer = Some("z6Mk".to_string());
        p.search = Some("state=open".to_string());
        assert_eq!(
            path(p),
            format!("/seeds/{HOST}/rad:abc/remotes/z6Mk/patches?state=open")
        );
    }

    #[test]
    fn test_patch_with_and_without_revision() {
        let with = path(params(ProjectView::Patch {
            patch: "P1".to_string(),
            revision: Some("R1".to_string()),
        }));
        assert!(with.ends_with("/patches/P1/R1"));

        let without = path(params(ProjectView::Patch {
            patch: "P1".to_string(),
            revision: None,
        }));
        assert!(without.ends_with("/patches/P1"));
    }

    #[test]
    fn test_new_patch_view() {
        let p = params(ProjectView::Patches {
            view: Some(ListView::New),
        });
        assert_eq!(path(p), format!("/seeds/{HOST}/rad:abc/patches/new"));
    }

    #[test]
    fn test_issue_ignores_suffix() {
        let mut p = params(ProjectView::Issue {
            issue: "4f2a".to_string(),
        });
        p.search = Some("x=1".to_string());
        assert_eq!(path(p), format!("/seeds/{HOST}/rad:abc/issues/4f2a"));
    }

    #[test]
    fn test_session_query_is_encoded() {
        let route = Route::Session {
            id: "abc".to_string(),
            signature: "a b&c".to_string(),
            public_key: String::new(),
        };
        assert_eq!(route_to_path(&route), "/session/abc?sig=a+b%26c&pk=");
        let parsed = path_to_route(&route_to_path(&route), RoutingMode::Path);
        assert_eq!(parsed, Some(route));
    }

    #[test]
    fn test_not_found_is_verbatim() {
        let route = Route::not_found("/unknown/thing?x#y");
        assert_eq!(route_to_path(&route), "/unknown/thing?x#y");
    }

    #[test]
    fn test_not_found_href_is_never_prefixed() {
        let route = Route::not_found("/#/unknown/thing");
        assert_eq!(route_to_href(&route, RoutingMode::Hash), "/#/unknown/thing");
        assert_eq!(route_to_href(&route, RoutingMode::Path), "/#/unknown/thing");
    }

    #[test]
    fn test_href_in_hash_mode() {
        let route = Route::Seeds {
            hostname_port: HOST.to_string(),
        };
        assert_eq!(route_to_href(&route, RoutingMode::Hash), format!("#/seeds/{HOST}"));
        assert_eq!(route_to_href(&route, RoutingMode::Path), format!("/seeds/{HOST}"));
    }

    #[test]
    fn test_display_matches_path() {
        assert_eq!(Route::Home.to_string(), "/");
    }
}
