//! Click handling for in-app links.

/// The parts of a pointer click that decide who handles it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickSignal {
    /// `0` is the primary button.
    pub button: i16,
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub meta_key: bool,
    pub shift_key: bool,
}

impl ClickSignal {
    /// A plain primary-button click.
    pub fn primary() -> Self {
        Self::default()
    }
}

/// True when the browser should handle the click itself (new tab, new
/// window, download...), false when the app should navigate in place.
pub fn use_default_navigation(click: &ClickSignal) -> bool {
    click.button != 0 || click.alt_key || click.ctrl_key || click.meta_key || click.shift_key
}
