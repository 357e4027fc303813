//! # Navigation State
//!
//! Everything the navigation core remembers, in one place.
//!
//! ```text
//! NavState
//! ├── history: HistoryStack     // bounded routes, last = active
//! ├── mode: RoutingMode         // path or fragment addressing
//! ├── document_title: String    // title passed along with history writes
//! └── pending_backs: VecDeque   // where each unechoed pop() should land
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::VecDeque;

use super::config::ResolvedConfig;
use super::history::{DEFAULT_HISTORY_CAPACITY, HistoryStack};
use super::route::{Route, RoutingMode};

#[derive(Debug)]
pub struct NavState {
    pub history: HistoryStack,
    pub mode: RoutingMode,
    pub document_title: String,
    /// For each `pop()` whose popstate hasn't arrived yet, the route it
    /// left active. Oldest first, matching the order browsers deliver them.
    pub pending_backs: VecDeque<Route>,
}

impl NavState {
    pub fn new(mode: RoutingMode) -> Self {
        Self {
            history: HistoryStack::new(Route::Home, DEFAULT_HISTORY_CAPACITY),
            mode,
            document_title: super::config::DEFAULT_DOCUMENT_TITLE.to_string(),
            pending_backs: VecDeque::new(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            history: HistoryStack::new(Route::Home, config.history_capacity),
            mode: config.mode,
            document_title: config.document_title.clone(),
            pending_backs: VecDeque::new(),
        }
    }

    pub fn active(&self) -> &Route {
        self.history.active()
    }
}
