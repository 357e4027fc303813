//! In-memory browser history.
//!
//! Behaves like a tab's session history: a list of entries with a cursor,
//! `push_state` dropping anything forward of the cursor, and back/forward
//! reporting where they landed through a popstate signal. Backs the tests
//! and the CLI `replay` command.

use log::{debug, warn};
use tokio::sync::mpsc;
use url::Url;

use super::BrowserHost;
use super::event::NavigationSignal;
use crate::core::config::DEFAULT_ORIGIN;
use crate::core::error::NavError;

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryEntry {
    /// Path, query and fragment, like `location.pathname + search + hash`.
    pub url: String,
    pub state: Option<serde_json::Value>,
}

#[derive(Debug)]
pub struct MemoryHost {
    origin: Url,
    entries: Vec<MemoryEntry>,
    cursor: usize,
    title: String,
    signals: Option<mpsc::UnboundedSender<NavigationSignal>>,
}

impl MemoryHost {
    /// A fresh tab that was opened at `address`.
    pub fn new(address: &str) -> Self {
        Self::with_origin(DEFAULT_ORIGIN, address)
    }

    /// Like [`MemoryHost::new`], with a specific origin. An origin that isn't
    /// a valid URL falls back to the default one.
    pub fn with_origin(origin: &str, address: &str) -> Self {
        let origin = Url::parse(origin).unwrap_or_else(|e| {
            warn!("Invalid origin {:?} ({}), using {}", origin, e, DEFAULT_ORIGIN);
            Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid URL")
        });
        let url = resolve(&origin, "/", address).unwrap_or_else(|| address.to_string());
        Self {
            origin,
            entries: vec![MemoryEntry { url, state: None }],
            cursor: 0,
            title: String::new(),
            signals: None,
        }
    }

    /// Sends popstate and hashchange signals to `sender` from now on.
    pub fn with_signals(mut self, sender: mpsc::UnboundedSender<NavigationSignal>) -> Self {
        self.signals = Some(sender);
        self
    }

    /// Stops sending signals, handing back the sender. Once every sender is
    /// gone the bridge reading the other end winds down.
    pub fn take_signals(&mut self) -> Option<mpsc::UnboundedSender<NavigationSignal>> {
        self.signals.take()
    }

    pub fn current(&self) -> &MemoryEntry {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The current location as an absolute URL.
    pub fn href(&self) -> String {
        self.origin
            .join(&self.current().url)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| self.current().url.clone())
    }

    /// The forward button. Returns false if there is nothing ahead.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        self.emit_popstate();
        true
    }

    /// What clicking `<a href="#fragment">` does: a new entry with the same
    /// path and no state, then a hashchange signal.
    pub fn follow_fragment(&mut self, fragment: &str) {
        let current = &self.current().url;
        let base = current.split('#').next().unwrap_or(current);
        let url = format!("{base}#{fragment}");
        self.entries.truncate(self.cursor + 1);
        self.entries.push(MemoryEntry { url, state: None });
        self.cursor += 1;

        let new_url = self.href();
        self.emit(NavigationSignal::HashChanged { new_url });
    }

    fn emit_popstate(&self) {
        let state = self.current().state.clone();
        self.emit(NavigationSignal::PopState { state });
    }

    fn emit(&self, signal: NavigationSignal) {
        let Some(sender) = &self.signals else {
            return;
        };
        if sender.send(signal).is_err() {
            debug!("Signal receiver dropped, not delivering");
        }
    }

    fn resolve(&self, url: &str) -> Result<String, NavError> {
        resolve(&self.origin, &self.current().url, url)
            .ok_or_else(|| NavError::Host(format!("invalid history URL {url:?}")))
    }
}

/// Resolves `url` the way the browser does for `pushState`: relative to the
/// current location, reduced to path + query + fragment.
fn resolve(origin: &Url, current: &str, url: &str) -> Option<String> {
    let current = origin.join(current).ok()?;
    let next = current.join(url).ok()?;
    let mut out = next.path().to_string();
    if let Some(query) = next.query() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = next.fragment() {
        out.push('#');
        out.push_str(fragment);
    }
    Some(out)
}

impl BrowserHost for MemoryHost {
    fn current_address(&self) -> String {
        self.current().url.clone()
    }

    fn push_state(
        &mut self,
        state: serde_json::Value,
        _title: &str,
        url: &str,
    ) -> Result<(), NavError> {
        let url = self.resolve(url)?;
        self.entries.truncate(self.cursor + 1);
        self.entries.push(MemoryEntry {
            url,
            state: Some(state),
        });
        self.cursor += 1;
        Ok(())
    }

    fn replace_state(
        &mut self,
        state: serde_json::Value,
        _title: &str,
        url: &str,
    ) -> Result<(), NavError> {
        let url = self.resolve(url)?;
        self.entries[self.cursor] = MemoryEntry {
            url,
            state: Some(state),
        };
        Ok(())
    }

    fn back(&mut self) -> Result<(), NavError> {
        if self.cursor == 0 {
            // A real tab would leave the app here.
            debug!("back() at the first history entry, ignoring");
            return Ok(());
        }
        self.cursor -= 1;
        self.emit_popstate();
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
}
