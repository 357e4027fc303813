//! seed-nav library exports

pub mod browser;
pub mod core;

#[cfg(test)]
pub mod test_support;

pub use crate::browser::{BrowserHost, MemoryHost, NavigationSignal, Navigator, UpdateOptions};
pub use crate::core::link::{ClickSignal, use_default_navigation};
pub use crate::core::project::ProjectPatch;
pub use crate::core::{
    ListView, NavError, ProjectView, ProjectsParams, Route, RoutingMode, path_to_route,
    route_to_href, route_to_path,
};
