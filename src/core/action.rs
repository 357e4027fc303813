//! # Actions
//!
//! Everything that can happen to navigation becomes an `Action`.
//! A link is followed? That's `Action::Push(route)`.
//! The browser went back? That's `Action::Restore(route)`.
//!
//! The `update()` function takes the current state and an action, changes
//! the history stack, and returns the `Effect`s the host must perform to
//! keep the browser in sync. No I/O here. The navigator applies effects.
//!
//! ```text
//! State + Action  →  update()  →  New State + Vec<Effect>
//! ```
//!
//! This makes everything testable: assert on the stack and on the effects.

use log::debug;

use super::route::Route;
use super::serializer::route_to_href;
use super::state::NavState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Navigate forward to a new route.
    Push(Route),
    /// Go one step back.
    Pop,
    /// Make this the only route, overwriting the current history entry.
    Replace(Route),
    /// The browser moved through its own history and handed back the route
    /// stored on the entry it landed on.
    Restore(Route),
}

/// Side effects for the host history, in the order they must happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PushState { state: Route, url: String },
    ReplaceState { state: Route, url: String },
    Back,
    SetTitle(String),
}

pub fn update(state: &mut NavState, action: Action) -> Vec<Effect> {
    debug!("Navigation action: {:?}", action);
    match action {
        Action::Push(route) => {
            state.history.push(route.clone());
            let url = route_to_href(&route, state.mode);
            vec![
                Effect::PushState { state: route, url },
                Effect::SetTitle(state.document_title.clone()),
            ]
        }
        Action::Pop => {
            // The last entry stays: the browser may still have somewhere to
            // go back to, and the popstate it sends will replace it.
            if state.history.pop_top().is_some() {
                // Echoes older than the whole stack can no longer be matched.
                if state.pending_backs.len() >= state.history.capacity() {
                    state.pending_backs.pop_front();
                }
                state.pending_backs.push_back(state.history.active().clone());
            }
            vec![Effect::Back]
        }
        Action::Replace(route) => replace(state, route),
        Action::Restore(route) => {
            if let Some(expected) = state.pending_backs.pop_front() {
                if expected == route {
                    debug!("Popstate echoes our own back(), stack already in sync");
                    return Vec::new();
                }
                // The browser went somewhere else; later echoes can't be trusted.
                state.pending_backs.clear();
            }
            replace(state, route)
        }
    }
}

fn replace(state: &mut NavState, route: Route) -> Vec<Effect> {
    state.history.reset(route.clone());
    let url = route_to_href(&route, state.mode);
    vec![
        Effect::ReplaceState { state: route, url },
        Effect::SetTitle(state.document_title.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::route::RoutingMode;

    fn seeds(n: usize) -> Route {
        Route::Seeds {
            hostname_port: format!("seed{n}.example.org"),
        }
    }

    fn state() -> NavState {
        NavState::new(RoutingMode::Path)
    }

    #[test]
    fn test_push_appends_and_writes_entry() {
        let mut state = state();
        let effects = update(&mut state, Action::Push(seeds(1)));
        assert_eq!(state.history.len(), 2);
        assert_eq!(
            effects,
            vec![
                Effect::PushState {
                    state: seeds(1),
                    url: "/seeds/seed1.example.org".to_string(),
                },
                Effect::SetTitle("Radicle Interface".to_string()),
            ]
        );
    }

    #[test]
    fn test_eleven_pushes_keep_ten() {
        let mut state = state();
        update(&mut state, Action::Replace(seeds(0)));
        for n in 1..=10 {
            update(&mut state, Action::Push(seeds(n)));
        }
        assert_eq!(state.history.len(), 10);
        assert!(state.history.entries().all(|r| r != &seeds(0)));
        assert_eq!(state.active(), &seeds(10));
    }

    #[test]
    fn test_push_in_hash_mode_prefixes_fragment() {
        let mut state = NavState::new(RoutingMode::Hash);
        let effects = update(&mut state, Action::Push(Route::Home));
        assert_eq!(
            effects[0],
            Effect::PushState {
                state: Route::Home,
                url: "#/".to_string(),
            }
        );
    }

    #[test]
    fn test_replace_resets_stack() {
        let mut state = state();
        update(&mut state, Action::Push(seeds(1)));
        update(&mut state, Action::Push(seeds(2)));
        let effects = update(&mut state, Action::Replace(seeds(3)));
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.active(), &seeds(3));
        assert!(matches!(effects[0], Effect::ReplaceState { .. }));
    }

    #[test]
    fn test_pop_removes_top_and_goes_back() {
        let mut state = state();
        update(&mut state, Action::Push(seeds(1)));
        let effects = update(&mut state, Action::Pop);
        assert_eq!(effects, vec![Effect::Back]);
        assert_eq!(state.active(), &Route::Home);
        assert_eq!(state.pending_backs.len(), 1);
    }

    #[test]
    fn test_pop_on_single_entry_keeps_it() {
        let mut state = state();
        let effects = update(&mut state, Action::Pop);
        assert_eq!(effects, vec![Effect::Back]);
        assert_eq!(state.history.len(), 1);
        assert!(state.pending_backs.is_empty());
    }

    #[test]
    fn test_restore_echo_of_pop_keeps_depth() {
        let mut state = state();
        update(&mut state, Action::Push(seeds(1)));
        update(&mut state, Action::Push(seeds(2)));
        update(&mut state, Action::Pop);

        let effects = update(&mut state, Action::Restore(seeds(1)));
        assert!(effects.is_empty());
        assert_eq!(state.history.len(), 2);
        assert!(state.pending_backs.is_empty());
    }

    #[test]
    fn test_queued_echoes_of_two_pops() {
        let mut state = state();
        for n in 1..=3 {
            update(&mut state, Action::Push(seeds(n)));
        }
        update(&mut state, Action::Pop);
        update(&mut state, Action::Pop);
        assert_eq!(state.active(), &seeds(1));

        assert!(update(&mut state, Action::Restore(seeds(2))).is_empty());
        assert!(update(&mut state, Action::Restore(seeds(1))).is_empty());
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.active(), &seeds(1));
    }

    #[test]
    fn test_pending_backs_capped_at_capacity() {
        let mut state = state();
        for n in 0..25 {
            update(&mut state, Action::Push(seeds(n)));
            update(&mut state, Action::Pop);
        }
        assert_eq!(state.pending_backs.len(), state.history.capacity());
    }

    #[test]
    fn test_restore_disagreeing_with_pop_wins() {
        let mut state = state();
        update(&mut state, Action::Push(seeds(1)));
        update(&mut state, Action::Pop);

        update(&mut state, Action::Restore(seeds(7)));
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.active(), &seeds(7));
    }

    #[test]
    fn test_restore_from_browser_replaces() {
        let mut state = state();
        update(&mut state, Action::Push(seeds(1)));
        update(&mut state, Action::Push(seeds(2)));

        let effects = update(&mut state, Action::Restore(seeds(1)));
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.active(), &seeds(1));
        assert!(matches!(effects[0], Effect::ReplaceState { .. }));
    }
}
