//! # History Stack
//!
//! The bounded list of routes the user has visited in this session. The last
//! entry is the active route; there is always at least one.
//!
//! Observers (the view layer) get the active route through a
//! [`tokio::sync::watch`] channel: they see the latest value, not every
//! intermediate one.

use std::collections::VecDeque;
use tokio::sync::watch;

use super::route::Route;

/// How many routes are kept unless configured otherwise. More than one
/// subsequent `pop()` is never expected, so this is plenty.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

#[derive(Debug)]
pub struct HistoryStack {
    entries: VecDeque<Route>,
    capacity: usize,
    active: watch::Sender<Route>,
}

impl HistoryStack {
    /// A stack holding only `initial`. A capacity of zero is treated as one.
    pub fn new(initial: Route, capacity: usize) -> Self {
        let (active, _) = watch::channel(initial.clone());
        Self {
            entries: VecDeque::from([initial]),
            capacity: capacity.max(1),
            active,
        }
    }

    /// Appends a route, evicting the oldest entries past capacity.
    pub fn push(&mut self, route: Route) {
        self.entries.push_back(route);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.notify();
    }

    /// Drops the active route and returns it. The last remaining entry is
    /// never removed; `None` means nothing was popped.
    pub fn pop_top(&mut self) -> Option<Route> {
        if self.entries.len() <= 1 {
            return None;
        }
        let popped = self.entries.pop_back();
        self.notify();
        popped
    }

    /// Forgets everything and starts over from `route`.
    pub fn reset(&mut self, route: Route) {
        self.entries.clear();
        self.entries.push_back(route);
        self.notify();
    }

    pub fn active(&self) -> &Route {
        // Never empty: every mutation leaves at least one entry behind.
        &self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &Route> {
        self.entries.iter()
    }

    /// A receiver that always holds the active route.
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.active.subscribe()
    }

    fn notify(&self) {
        self.active.send_replace(self.active().clone());
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(Route::Home, DEFAULT_HISTORY_CAPACITY)
    }
}
