//! # Browser Event Bridge
//!
//! Navigation the app didn't start: the user clicked an in-page anchor
//! (hashchange) or used the back/forward buttons (popstate). Both arrive as
//! [`NavigationSignal`]s and go back through the [`Navigator`], so the
//! history stack follows the browser.
//!
//! The signal feed is abstracted as a [`SignalSource`] so tests and the CLI
//! can drive the bridge without a browser. Teardown is dropping the sender:
//! [`run_bridge`] returns once the source is exhausted.

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use log::{debug, warn};
use regex::Regex;
use std::sync::LazyLock;
use tokio::sync::mpsc;

use super::{BrowserHost, Navigator, UpdateOptions};
use crate::core::action::Action;
use crate::core::error::NavError;
use crate::core::parser::path_to_route;
use crate::core::project::ProjectPatch;
use crate::core::route::Route;

/// A whole fragment that is a line reference.
static LINE_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^L(\d+)$").expect("valid line anchor regex"));

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationSignal {
    /// The fragment changed; `new_url` is the full new location.
    HashChanged { new_url: String },
    /// Back/forward landed on an entry; `state` is what was stored on it.
    PopState { state: Option<serde_json::Value> },
}

/// Where navigation signals come from.
#[async_trait]
pub trait SignalSource: Send {
    /// The next signal, or `None` once the source is closed.
    async fn next_signal(&mut self) -> Option<NavigationSignal>;
}

#[async_trait]
impl SignalSource for mpsc::UnboundedReceiver<NavigationSignal> {
    async fn next_signal(&mut self) -> Option<NavigationSignal> {
        self.recv().await
    }
}

#[async_trait]
impl SignalSource for mpsc::Receiver<NavigationSignal> {
    async fn next_signal(&mut self) -> Option<NavigationSignal> {
        self.recv().await
    }
}

/// Adapts any stream of signals, e.g. one built from DOM event listeners.
pub struct StreamSource<S>(pub S);

#[async_trait]
impl<S> SignalSource for StreamSource<S>
where
    S: Stream<Item = NavigationSignal> + Unpin + Send,
{
    async fn next_signal(&mut self) -> Option<NavigationSignal> {
        self.0.next().await
    }
}

impl<H: BrowserHost> Navigator<H> {
    pub fn handle_signal(&mut self, signal: NavigationSignal) -> Result<(), NavError> {
        match signal {
            NavigationSignal::HashChanged { new_url } => self.handle_hash_change(&new_url),
            NavigationSignal::PopState { state: Some(state) } => {
                match serde_json::from_value::<Route>(state) {
                    Ok(route) => self.dispatch(Action::Restore(route)),
                    Err(e) => {
                        warn!("Ignoring popstate with unreadable route payload: {}", e);
                        Ok(())
                    }
                }
            }
            NavigationSignal::PopState { state: None } => {
                debug!("Ignoring popstate without a route payload");
                Ok(())
            }
        }
    }

    /// Jumps to an anchor on the current project page without adding a
    /// stack entry. Anchors anywhere else are left to the browser.
    fn handle_hash_change(&mut self, new_url: &str) -> Result<(), NavError> {
        let Some(Route::Projects(params)) = path_to_route(new_url, self.mode()) else {
            debug!("Hash change outside of a project route: {}", new_url);
            return Ok(());
        };
        if self.active_route().as_project().is_none() {
            debug!("Hash change while not on a project page, ignoring");
            return Ok(());
        }

        let anchor = match (params.line, params.hash) {
            (Some(line), _) => format!("L{line}"),
            (None, Some(hash)) => hash,
            (None, None) => return Ok(()),
        };

        let patch = match LINE_ANCHOR.captures(&anchor) {
            Some(caps) => ProjectPatch::new().line(&caps[1]),
            None => ProjectPatch::new().hash(anchor),
        };
        self.update_project_route(&patch, UpdateOptions { replace: true })
    }
}

/// Feeds every signal from `source` into `navigator` until the source
/// closes. Failures are logged and skipped. Returns how many signals were
/// handled.
///
/// The navigator stays borrowed for the whole run. When the view layer has
/// to keep navigating meanwhile, use [`run_navigation`] instead.
pub async fn run_bridge<H, S>(navigator: &mut Navigator<H>, source: &mut S) -> usize
where
    H: BrowserHost,
    S: SignalSource + ?Sized,
{
    let mut handled = 0;
    while let Some(signal) = source.next_signal().await {
        debug!("Navigation signal: {:?}", signal);
        if let Err(e) = navigator.handle_signal(signal) {
            warn!("Failed to handle navigation signal: {}", e);
        }
        handled += 1;
    }
    debug!("Signal source closed after {} signals", handled);
    handled
}

/// The navigation service loop: browser signals and the view layer's
/// actions go through `navigator` one at a time, as they arrive.
///
/// Stops when the view layer drops its action sender or the signal source
/// closes. Signals still queued at that point are left in `signals`.
/// Returns how many messages were handled.
pub async fn run_navigation<H, S>(
    navigator: &mut Navigator<H>,
    signals: &mut S,
    actions: &mut mpsc::UnboundedReceiver<Action>,
) -> usize
where
    H: BrowserHost,
    S: SignalSource + ?Sized,
{
    let mut handled = 0;
    loop {
        tokio::select! {
            signal = signals.next_signal() => {
                let Some(signal) = signal else {
                    debug!("Signal source closed");
                    break;
                };
                debug!("Navigation signal: {:?}", signal);
                if let Err(e) = navigator.handle_signal(signal) {
                    warn!("Failed to handle navigation signal: {}", e);
                }
            }
            action = actions.recv() => {
                let Some(action) = action else {
                    debug!("Action sender dropped");
                    break;
                };
                if let Err(e) = navigator.dispatch(action) {
                    warn!("Failed to apply navigation action: {}", e);
                }
            }
        }
        handled += 1;
    }
    handled
}
