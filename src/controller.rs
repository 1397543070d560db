//! Theme preference controller.
//!
//! DESIGN
//! ======
//! One explicitly constructed controller owns the active preference, its
//! config, and the injected host. `start` registers the selection and system
//! color-scheme listeners first and only then touches the page, so a browser
//! that cannot deliver events leaves the page as it was. Listeners stay inert
//! until startup completes. They hold the controller for the rest of the
//! page's life; there is no teardown.
//!
//! ERROR HANDLING
//! ==============
//! Storage reads are explicit `Result`s with a separate default-substitution
//! step, so a broken `localStorage` yields `auto` instead of an error. Storage
//! writes and DOM updates log and carry on. Only listener registration can
//! fail `start`, and the caller treats that as missing browser support.
//! A failed `start` has not read storage, marked an input, or set the
//! presentation attribute.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::ThemeConfig;
use crate::error::HostError;
use crate::host::ThemeHost;
use crate::theme::{ResolvedTheme, ThemePreference};

/// Controller handle shared with the page's event listeners.
pub type SharedController<H> = Rc<RefCell<ThemeController<H>>>;

pub struct ThemeController<H: ThemeHost> {
    host: Rc<H>,
    config: ThemeConfig,
    active: ThemePreference,
}

impl<H: ThemeHost> ThemeController<H> {
    pub fn new(host: Rc<H>, config: ThemeConfig) -> Self {
        Self { host, config, active: ThemePreference::default() }
    }

    #[must_use]
    pub fn active_preference(&self) -> ThemePreference {
        self.active
    }

    #[must_use]
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Subscribe to selection and system signal changes, then initialize.
    pub fn start(self) -> Result<SharedController<H>, HostError> {
        let host = Rc::clone(&self.host);
        let shared = Rc::new(RefCell::new(self));
        let armed = Rc::new(Cell::new(false));

        let on_select = Rc::clone(&shared);
        let select_armed = Rc::clone(&armed);
        host.watch_selection(Box::new(move |raw: String| {
            if select_armed.get() {
                on_select.borrow_mut().select(&raw);
            }
        }))?;

        let on_signal = Rc::clone(&shared);
        let signal_armed = Rc::clone(&armed);
        host.watch_system_signal(Box::new(move || {
            if signal_armed.get() {
                on_signal.borrow_mut().on_system_signal_change();
            }
        }))?;

        shared.borrow_mut().initialize();
        armed.set(true);
        Ok(shared)
    }

    /// Load the stored preference, mark its input, and apply it.
    pub fn initialize(&mut self) -> ResolvedTheme {
        let preference = self.stored_preference();
        self.active = preference;
        if let Err(e) = self.host.mark_selected(preference) {
            log::warn!("could not mark {preference} theme input: {e}");
        }
        let resolved = self.apply_resolved_theme(preference);
        log::debug!("theme initialized: preference={preference} resolved={resolved}");
        resolved
    }

    /// Read the raw stored value. Absence is `Ok(None)`.
    pub fn load_preference(&self) -> Result<Option<String>, HostError> {
        self.host.load_preference(&self.config.storage_key)
    }

    /// Stored preference with the fail-safe default substituted.
    #[must_use]
    pub fn stored_preference(&self) -> ThemePreference {
        match self.load_preference() {
            Ok(raw) => ThemePreference::from_stored(raw.as_deref()),
            Err(e) => {
                log::info!("using auto theme - {e}");
                ThemePreference::default()
            }
        }
    }

    /// Handle a raw input value from the page. Unknown values mean `auto`.
    pub fn select(&mut self, raw: &str) {
        self.set_preference(ThemePreference::from_stored(Some(raw)));
    }

    /// Apply, persist, and announce a user selection.
    pub fn set_preference(&mut self, preference: ThemePreference) {
        self.active = preference;
        let resolved = self.apply_resolved_theme(preference);
        log::debug!("theme preference set: preference={preference} resolved={resolved}");
        if let Err(e) = self.host.save_preference(&self.config.storage_key, preference.as_str()) {
            if e.is_storage() {
                log::info!("theme preference not saved - {e}");
            } else {
                log::warn!("theme preference not saved: {e}");
            }
        }
        self.announce(preference);
    }

    /// Resolve `preference` and write it to the presentation attribute.
    pub fn apply_resolved_theme(&self, preference: ThemePreference) -> ResolvedTheme {
        let resolved = preference.resolve(self.host.system_prefers_dark());
        if let Err(e) = self.host.set_theme_attribute(&self.config.attribute, resolved) {
            log::warn!("could not apply {resolved} theme: {e}");
        }
        resolved
    }

    /// Re-resolve after a system color-scheme flip; no-op unless `auto`.
    pub fn on_system_signal_change(&mut self) -> Option<ResolvedTheme> {
        if !self.active.follows_system() {
            return None;
        }
        let resolved = self.apply_resolved_theme(self.active);
        log::debug!("system color scheme changed: resolved={resolved}");
        Some(resolved)
    }

    /// Post a transient live-region message, removed after the configured delay.
    ///
    /// Rapid selections each get their own node; overlapping nodes are kept.
    pub fn announce(&self, preference: ThemePreference) {
        let message = announcement_message(preference);
        match self.host.show_announcement(&message) {
            Ok(announcement) => {
                let host = Rc::clone(&self.host);
                self.host.defer(
                    self.config.announce_delay(),
                    Box::new(move || host.dismiss_announcement(announcement)),
                );
            }
            Err(e) => log::warn!("theme announcement skipped: {e}"),
        }
    }
}

#[must_use]
pub fn announcement_message(preference: ThemePreference) -> String {
    format!("Theme switched to {preference}")
}
