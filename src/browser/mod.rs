//! # Browser Adapter
//!
//! The host-facing layer. Applies the effects produced by
//! `core::action::update` to a browser history, and turns browser signals
//! (see [`event`]) back into actions.
//!
//! [`Navigator`] is the navigation service: one per application session,
//! handed to the view layer and to the event bridge. It is the only thing
//! allowed to touch the history stack or the host history, which is what
//! keeps the two from drifting apart.
//!
//! ```text
//! view layer ──push/pop/replace──▶ Navigator ──Effects──▶ BrowserHost
//!     ▲                               │  ▲                     │
//!     └──── watch::Receiver<Route> ───┘  └── NavigationSignal ─┘
//! ```

pub mod event;
pub mod memory;

use log::{debug, info, warn};
use tokio::sync::watch;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::error::NavError;
use crate::core::history::HistoryStack;
use crate::core::parser::path_to_route;
use crate::core::project::{ProjectPatch, create_project_route};
use crate::core::route::{Route, RoutingMode};
use crate::core::serializer::route_to_href;
use crate::core::state::NavState;

pub use event::{NavigationSignal, SignalSource, StreamSource, run_bridge, run_navigation};
pub use memory::{MemoryEntry, MemoryHost};

/// The browser primitives navigation needs. A web build implements this over
/// `window.history` and `window.location`; tests use [`MemoryHost`].
pub trait BrowserHost {
    /// Path, query and fragment of the current location.
    fn current_address(&self) -> String;

    /// Adds a history entry carrying `state`.
    fn push_state(
        &mut self,
        state: serde_json::Value,
        title: &str,
        url: &str,
    ) -> Result<(), NavError>;

    /// Overwrites the current history entry.
    fn replace_state(
        &mut self,
        state: serde_json::Value,
        title: &str,
        url: &str,
    ) -> Result<(), NavError>;

    /// Asks the browser to go one entry back. The result arrives later as a
    /// popstate signal.
    fn back(&mut self) -> Result<(), NavError>;

    /// Best effort; hosts may ignore it.
    fn set_title(&mut self, title: &str);
}

/// Options for [`Navigator::update_project_route`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Overwrite the current entry instead of adding one.
    pub replace: bool,
}

pub struct Navigator<H> {
    state: NavState,
    host: H,
}

impl<H: BrowserHost> Navigator<H> {
    pub fn new(host: H, config: &ResolvedConfig) -> Self {
        Self::with_state(host, NavState::from_config(config))
    }

    pub fn with_state(host: H, state: NavState) -> Self {
        Self { state, host }
    }

    pub fn active_route(&self) -> &Route {
        self.state.active()
    }

    /// The view layer's handle on the active route.
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.state.history.subscribe()
    }

    pub fn history(&self) -> &HistoryStack {
        &self.state.history
    }

    pub fn mode(&self) -> RoutingMode {
        self.state.mode
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn push(&mut self, route: Route) -> Result<(), NavError> {
        self.dispatch(Action::Push(route))
    }

    pub fn pop(&mut self) -> Result<(), NavError> {
        self.dispatch(Action::Pop)
    }

    pub fn replace(&mut self, route: Route) -> Result<(), NavError> {
        self.dispatch(Action::Replace(route))
    }

    /// Reads the current address and makes it the only route. Unknown
    /// addresses land on [`Route::NotFound`].
    pub fn initialize(&mut self) -> Result<(), NavError> {
        let address = self.host.current_address();
        let route = match path_to_route(&address, self.state.mode) {
            Some(route) => route,
            None => {
                info!("No route for {:?}, showing not found", address);
                Route::not_found(address)
            }
        };
        self.replace(route)
    }

    pub fn create_project_route(&self, patch: &ProjectPatch) -> Result<Route, NavError> {
        create_project_route(self.active_route(), patch)
    }

    pub fn update_project_route(
        &mut self,
        patch: &ProjectPatch,
        opts: UpdateOptions,
    ) -> Result<(), NavError> {
        let route = self.create_project_route(patch)?;
        if opts.replace {
            self.replace(route)
        } else {
            self.push(route)
        }
    }

    /// Where `patch` would lead, for use as a link target.
    pub fn project_link_href(&self, patch: &ProjectPatch) -> Result<String, NavError> {
        let route = self.create_project_route(patch)?;
        Ok(route_to_href(&route, self.state.mode))
    }

    pub fn dispatch(&mut self, action: Action) -> Result<(), NavError> {
        let pending = self.state.pending_backs.len();
        let effects = update(&mut self.state, action);
        let result = self.apply(effects);
        if result.is_err() && self.state.pending_backs.len() > pending {
            // The host never went back, so no popstate will answer it.
            self.state.pending_backs.truncate(pending);
        }
        result
    }

    fn apply(&mut self, effects: Vec<Effect>) -> Result<(), NavError> {
        for effect in effects {
            debug!("Applying effect: {:?}", effect);
            let result = match effect {
                Effect::PushState { state, url } => {
                    let payload = serde_json::to_value(&state)?;
                    self.host.push_state(payload, &self.state.document_title, &url)
                }
                Effect::ReplaceState { state, url } => {
                    let payload = serde_json::to_value(&state)?;
                    self.host
                        .replace_state(payload, &self.state.document_title, &url)
                }
                Effect::Back => self.host.back(),
                Effect::SetTitle(title) => {
                    self.host.set_title(&title);
                    Ok(())
                }
            };
            if let Err(e) = result {
                warn!("Host history out of sync with navigation state: {}", e);
                return Err(e);
            }
        }
        Ok(())
    }
}
