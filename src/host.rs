//! Browser capabilities consumed by the theme controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller never touches `web_sys` directly. Everything it needs from
//! the page (storage, the color-scheme signal, the radio inputs, the
//! presentation attribute, live-region nodes, timers) goes through this trait,
//! so the same controller runs against [`crate::web::WebHost`] in the browser
//! and against an in-memory host in unit tests.

use std::time::Duration;

use crate::error::HostError;
use crate::theme::{ResolvedTheme, ThemePreference};

/// Callback invoked when the system color-scheme signal flips.
pub type SignalCallback = Box<dyn FnMut()>;

/// Callback invoked with the raw `value` of the selected theme input.
pub type SelectionCallback = Box<dyn FnMut(String)>;

/// Deferred task run once after a delay.
pub type DeferredTask = Box<dyn FnOnce()>;

pub trait ThemeHost: 'static {
    /// Handle to an attached announcer node.
    type Announcement: 'static;

    // --- Storage ---

    /// Read the stored value for `key`. `Ok(None)` means nothing is stored.
    fn load_preference(&self, key: &str) -> Result<Option<String>, HostError>;

    fn save_preference(&self, key: &str, value: &str) -> Result<(), HostError>;

    // --- System color-scheme signal ---

    fn system_prefers_dark(&self) -> bool;

    /// Register a listener for the lifetime of the page.
    fn watch_system_signal(&self, on_change: SignalCallback) -> Result<(), HostError>;

    // --- Page ---

    fn set_theme_attribute(&self, attribute: &str, theme: ResolvedTheme) -> Result<(), HostError>;

    /// Mark the input for `preference` as checked.
    fn mark_selected(&self, preference: ThemePreference) -> Result<(), HostError>;

    /// Register a listener for user selection of a theme input.
    fn watch_selection(&self, on_select: SelectionCallback) -> Result<(), HostError>;

    // --- Live region ---

    /// Attach a visually hidden `aria-live="polite"` node holding `message`.
    fn show_announcement(&self, message: &str) -> Result<Self::Announcement, HostError>;

    /// Detach a node returned by [`ThemeHost::show_announcement`], if still attached.
    fn dismiss_announcement(&self, announcement: Self::Announcement);

    // --- Timers ---

    /// Run `task` once after `delay`. No cancellation.
    fn defer(&self, delay: Duration, task: DeferredTask);
}
