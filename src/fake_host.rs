//! In-memory [`ThemeHost`] for unit tests.
//!
//! Timers never fire on their own: tests advance them with
//! [`FakeHost::run_timers`]. Listeners are taken out of their cell while they
//! run so a callback may call back into the host.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use crate::error::HostError;
use crate::host::{DeferredTask, SelectionCallback, SignalCallback, ThemeHost};
use crate::theme::{ResolvedTheme, ThemePreference};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeAnnouncement {
    pub message: String,
    pub attached: bool,
}

#[derive(Default)]
pub struct FakeHost {
    stored: RefCell<Option<(String, String)>>,
    storage_broken: Cell<bool>,
    dark: Cell<bool>,
    attribute: RefCell<Option<(String, String)>>,
    attribute_writes: Cell<usize>,
    selected: Cell<Option<ThemePreference>>,
    selection_unsupported: Cell<bool>,
    signal_unsupported: Cell<bool>,
    signal_listeners: RefCell<Vec<SignalCallback>>,
    selection_listeners: RefCell<Vec<SelectionCallback>>,
    announcements: RefCell<Vec<FakeAnnouncement>>,
    timers: RefCell<Vec<(Duration, DeferredTask)>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_dark(self, dark: bool) -> Self {
        self.dark.set(dark);
        self
    }

    pub fn with_stored(self, key: &str, value: &str) -> Self {
        *self.stored.borrow_mut() = Some((key.to_owned(), value.to_owned()));
        self
    }

    pub fn with_broken_storage(self) -> Self {
        self.storage_broken.set(true);
        self
    }

    pub fn without_listeners(self) -> Self {
        self.selection_unsupported.set(true);
        self.signal_unsupported.set(true);
        self
    }

    /// Selection events work, but the color-scheme signal cannot be watched.
    pub fn without_signal_listener(self) -> Self {
        self.signal_unsupported.set(true);
        self
    }

    pub fn stored_value(&self) -> Option<String> {
        self.stored.borrow().as_ref().map(|(_, value)| value.clone())
    }

    pub fn theme_attribute(&self) -> Option<String> {
        self.attribute.borrow().as_ref().map(|(_, value)| value.clone())
    }

    pub fn attribute_name(&self) -> Option<String> {
        self.attribute.borrow().as_ref().map(|(name, _)| name.clone())
    }

    pub fn attribute_writes(&self) -> usize {
        self.attribute_writes.get()
    }

    pub fn selected(&self) -> Option<ThemePreference> {
        self.selected.get()
    }

    pub fn announcements(&self) -> Vec<FakeAnnouncement> {
        self.announcements.borrow().clone()
    }

    pub fn attached_announcements(&self) -> usize {
        self.announcements.borrow().iter().filter(|a| a.attached).count()
    }

    pub fn pending_timers(&self) -> Vec<Duration> {
        self.timers.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    /// Flip the system signal and notify listeners, like a `change` event.
    pub fn set_system_dark(&self, dark: bool) {
        self.dark.set(dark);
        let mut listeners = std::mem::take(&mut *self.signal_listeners.borrow_mut());
        for listener in &mut listeners {
            listener();
        }
        self.signal_listeners.borrow_mut().append(&mut listeners);
    }

    /// Check the input with `value` and notify listeners, like a `change` event.
    pub fn user_selects(&self, value: &str) {
        self.selected.set(Some(ThemePreference::from_stored(Some(value))));
        let mut listeners = std::mem::take(&mut *self.selection_listeners.borrow_mut());
        for listener in &mut listeners {
            listener(value.to_owned());
        }
        self.selection_listeners.borrow_mut().append(&mut listeners);
    }

    /// Run every pending deferred task. Returns how many ran.
    pub fn run_timers(&self) -> usize {
        let tasks = std::mem::take(&mut *self.timers.borrow_mut());
        let count = tasks.len();
        for (_, task) in tasks {
            task();
        }
        count
    }
}

impl ThemeHost for FakeHost {
    type Announcement = usize;

    fn load_preference(&self, key: &str) -> Result<Option<String>, HostError> {
        if self.storage_broken.get() {
            return Err(HostError::Storage("SecurityError".to_owned()));
        }
        Ok(self
            .stored
            .borrow()
            .as_ref()
            .filter(|(stored_key, _)| stored_key == key)
            .map(|(_, value)| value.clone()))
    }

    fn save_preference(&self, key: &str, value: &str) -> Result<(), HostError> {
        if self.storage_broken.get() {
            return Err(HostError::Storage("QuotaExceededError".to_owned()));
        }
        *self.stored.borrow_mut() = Some((key.to_owned(), value.to_owned()));
        Ok(())
    }

    fn system_prefers_dark(&self) -> bool {
        self.dark.get()
    }

    fn watch_system_signal(&self, on_change: SignalCallback) -> Result<(), HostError> {
        if self.signal_unsupported.get() {
            return Err(HostError::MissingCapability("matchMedia change events"));
        }
        self.signal_listeners.borrow_mut().push(on_change);
        Ok(())
    }

    fn set_theme_attribute(&self, attribute: &str, theme: ResolvedTheme) -> Result<(), HostError> {
        *self.attribute.borrow_mut() = Some((attribute.to_owned(), theme.as_str().to_owned()));
        self.attribute_writes.set(self.attribute_writes.get() + 1);
        Ok(())
    }

    fn mark_selected(&self, preference: ThemePreference) -> Result<(), HostError> {
        self.selected.set(Some(preference));
        Ok(())
    }

    fn watch_selection(&self, on_select: SelectionCallback) -> Result<(), HostError> {
        if self.selection_unsupported.get() {
            return Err(HostError::MissingCapability("addEventListener"));
        }
        self.selection_listeners.borrow_mut().push(on_select);
        Ok(())
    }

    fn show_announcement(&self, message: &str) -> Result<Self::Announcement, HostError> {
        let mut announcements = self.announcements.borrow_mut();
        announcements.push(FakeAnnouncement { message: message.to_owned(), attached: true });
        Ok(announcements.len() - 1)
    }

    fn dismiss_announcement(&self, announcement: Self::Announcement) {
        if let Some(entry) = self.announcements.borrow_mut().get_mut(announcement) {
            entry.attached = false;
        }
    }

    fn defer(&self, delay: Duration, task: DeferredTask) {
        self.timers.borrow_mut().push((delay, task));
    }
}
