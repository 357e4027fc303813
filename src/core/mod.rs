//! # Core Navigation Logic
//!
//! This module contains seed-nav's routing logic.
//! It knows nothing about any specific browser or host.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Route (data)         │
//!                    │  • parse / serialize    │
//!                    │  • NavState + Action    │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No DOM. Pure.  │
//!                    └───────────┬─────────────┘
//!                                │ Effects
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │  Memory    │      │    Web     │      │    CLI     │
//!     │   Host     │      │   Host     │      │  replay    │
//!     │ (tests)    │      │  (future)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`route`]: The `Route` enum: every place the app can be
//! - [`parser`] / [`serializer`]: URL text ↔ `Route`
//! - [`history`]: The bounded `HistoryStack`
//! - [`state`]: `NavState`, all navigation state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`project`]: Merging partial updates onto project routes
//! - [`link`]: Deciding whether a click is ours to handle
//! - [`config`]: Settings and their override hierarchy

pub mod action;
pub mod config;
pub mod error;
pub mod history;
pub mod link;
pub mod parser;
pub mod project;
pub mod route;
pub mod serializer;
pub mod state;

// Re-export commonly used types for convenience
pub use error::NavError;
pub use parser::path_to_route;
pub use route::{ListView, ProjectView, ProjectsParams, Route, RoutingMode};
pub use serializer::{route_to_href, route_to_path};
