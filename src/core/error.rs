use std::fmt;

/// Errors from the navigation API.
///
/// Unknown URLs are not errors (they become `Route::NotFound`); these are
/// programmer mistakes or a host refusing a history write.
#[derive(Debug)]
pub enum NavError {
    /// A project-scoped helper was used while the active route is something else.
    NotAProjectRoute { resource: &'static str },
    /// The host rejected a history operation.
    Host(String),
    /// The route payload could not be encoded for the history entry.
    State(serde_json::Error),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::NotAProjectRoute { resource } => write!(
                f,
                "project navigation used outside of a project view (active route: {resource})"
            ),
            NavError::Host(msg) => write!(f, "history error: {msg}"),
            NavError::State(e) => write!(f, "route payload error: {e}"),
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavError::State(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for NavError {
    fn from(e: serde_json::Error) -> Self {
        NavError::State(e)
    }
}
