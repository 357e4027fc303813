//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::browser::{MemoryHost, Navigator};
use crate::core::route::{ProjectView, ProjectsParams, Route, RoutingMode};
use crate::core::state::NavState;

pub const HOST: &str = "host.example.org:8776";

/// A project route on `rad:abc` with only the view set.
pub fn project_route(view: ProjectView) -> Route {
    Route::Projects(ProjectsParams::new("rad:abc", HOST, view))
}

/// A path-routing navigator over a fresh in-memory tab opened at `address`.
/// Call `initialize()` to load the address into the stack.
pub fn memory_navigator(address: &str) -> Navigator<MemoryHost> {
    Navigator::with_state(MemoryHost::new(address), NavState::new(RoutingMode::Path))
}
