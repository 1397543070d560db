//! Browser bindings and page bootstrap.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the only module that talks to `web_sys`. [`WebHost`] captures the
//! elements the controller needs once, at startup, and implements
//! [`ThemeHost`] on top of them. [`start`] is the WASM entry point: it installs
//! logging and the page error handler, waits for the DOM, then starts the theme
//! controller and the clock independently of each other.
//!
//! TRADE-OFFS
//! ==========
//! Listener closures are leaked with `Closure::forget`. They live exactly as
//! long as the page, and nothing ever unregisters them.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, MediaQueryList, Storage, Window};

use crate::clock::{TextTarget, WallTime, ZonedClock, render_clock};
use crate::config::{PageConfig, ThemeConfig};
use crate::consts::{CONFIG_ELEMENT_ID, VISUALLY_HIDDEN_CLASS};
use crate::controller::ThemeController;
use crate::error::HostError;
use crate::host::{DeferredTask, SelectionCallback, SignalCallback, ThemeHost};
use crate::theme::{ResolvedTheme, ThemePreference};

/// [`ThemeHost`] backed by the live document.
pub struct WebHost {
    window: Window,
    document: Document,
    body: HtmlElement,
    media: MediaQueryList,
    inputs: Vec<HtmlInputElement>,
}

impl WebHost {
    /// Check for the browser features the controller needs and capture its elements.
    pub fn detect(config: &ThemeConfig) -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::MissingCapability("window"))?;
        let document = window.document().ok_or(HostError::MissingCapability("document"))?;
        let body = document.body().ok_or_else(|| HostError::MissingElement("body".to_owned()))?;
        let media = window
            .match_media(&config.media_query)
            .map_err(|_| HostError::MissingCapability("matchMedia"))?
            .ok_or(HostError::MissingCapability("matchMedia"))?;

        let selector = format!("input[name=\"{}\"]", config.input_name);
        let nodes = document
            .query_selector_all(&selector)
            .map_err(|_| HostError::MissingCapability("querySelectorAll"))?;
        let mut inputs = Vec::new();
        for index in 0..nodes.length() {
            if let Some(node) = nodes.get(index) {
                if let Ok(input) = node.dyn_into::<HtmlInputElement>() {
                    inputs.push(input);
                }
            }
        }
        if inputs.is_empty() {
            log::debug!("no theme inputs match {selector}");
        }

        Ok(Self { window, document, body, media, inputs })
    }

    fn storage(&self) -> Result<Storage, HostError> {
        self.window
            .local_storage()
            .map_err(|e| HostError::Storage(js_message(&e)))?
            .ok_or(HostError::StorageUnavailable)
    }
}

impl ThemeHost for WebHost {
    type Announcement = Element;

    fn load_preference(&self, key: &str) -> Result<Option<String>, HostError> {
        self.storage()?.get_item(key).map_err(|e| HostError::Storage(js_message(&e)))
    }

    fn save_preference(&self, key: &str, value: &str) -> Result<(), HostError> {
        self.storage()?.set_item(key, value).map_err(|e| HostError::Storage(js_message(&e)))
    }

    fn system_prefers_dark(&self) -> bool {
        self.media.matches()
    }

    fn watch_system_signal(&self, mut on_change: SignalCallback) -> Result<(), HostError> {
        let closure = Closure::wrap(Box::new(move || on_change()) as Box<dyn FnMut()>);
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        if self.media.add_event_listener_with_callback("change", callback).is_err() {
            // Older engines only expose MediaQueryList.addListener.
            self.media
                .add_listener_with_opt_callback(Some(callback))
                .map_err(|_| HostError::MissingCapability("matchMedia change events"))?;
        }
        closure.forget();
        Ok(())
    }

    fn set_theme_attribute(&self, attribute: &str, theme: ResolvedTheme) -> Result<(), HostError> {
        self.body
            .set_attribute(attribute, theme.as_str())
            .map_err(|e| HostError::Dom(js_message(&e)))
    }

    fn mark_selected(&self, preference: ThemePreference) -> Result<(), HostError> {
        let input = self
            .inputs
            .iter()
            .find(|input| input.value() == preference.as_str())
            .ok_or_else(|| HostError::MissingElement(format!("input[value=\"{preference}\"]")))?;
        input.set_checked(true);
        Ok(())
    }

    fn watch_selection(&self, on_select: SelectionCallback) -> Result<(), HostError> {
        let on_select = Rc::new(RefCell::new(on_select));
        let mut registered: Vec<(&HtmlInputElement, Closure<dyn FnMut()>)> = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            let source = input.clone();
            let on_select = Rc::clone(&on_select);
            let closure = Closure::wrap(Box::new(move || {
                (*on_select.borrow_mut())(source.value());
            }) as Box<dyn FnMut()>);
            if input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref()).is_err() {
                // All inputs or none: unhook the ones already wired.
                for (wired, wired_closure) in &registered {
                    if let Err(e) =
                        wired.remove_event_listener_with_callback("change", wired_closure.as_ref().unchecked_ref())
                    {
                        log::debug!("theme input listener not removed: {}", js_message(&e));
                    }
                }
                return Err(HostError::MissingCapability("addEventListener"));
            }
            registered.push((input, closure));
        }
        for (_, closure) in registered {
            closure.forget();
        }
        Ok(())
    }

    fn show_announcement(&self, message: &str) -> Result<Self::Announcement, HostError> {
        let announcer = self.document.create_element("div").map_err(|e| HostError::Dom(js_message(&e)))?;
        announcer
            .set_attribute("aria-live", "polite")
            .map_err(|e| HostError::Dom(js_message(&e)))?;
        announcer.set_class_name(VISUALLY_HIDDEN_CLASS);
        announcer.set_text_content(Some(message));
        self.body.append_child(&announcer).map_err(|e| HostError::Dom(js_message(&e)))?;
        Ok(announcer)
    }

    fn dismiss_announcement(&self, announcement: Self::Announcement) {
        if let Some(parent) = announcement.parent_node() {
            if let Err(e) = parent.remove_child(&announcement) {
                log::debug!("announcer already detached: {}", js_message(&e));
            }
        }
    }

    fn defer(&self, delay: Duration, task: DeferredTask) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }
}

impl TextTarget for Document {
    fn set_text_by_id(&self, id: &str, text: &str) -> Result<(), HostError> {
        let element = self.get_element_by_id(id).ok_or_else(|| HostError::MissingElement(id.to_owned()))?;
        element.set_text_content(Some(text));
        Ok(())
    }
}

/// Current time formatted by the browser's `Intl` time zone data.
pub struct IntlClock;

impl ZonedClock for IntlClock {
    fn now_in_zone(&self, time_zone: &str) -> Result<WallTime, HostError> {
        let options = js_sys::Object::new();
        for (key, value) in [("timeZone", time_zone), ("hourCycle", "h23"), ("hour", "2-digit"), ("minute", "2-digit")] {
            js_sys::Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value))
                .map_err(|e| HostError::Dom(js_message(&e)))?;
        }
        let locales = js_sys::Array::of1(&JsValue::from_str("en-US"));
        let format = js_sys::Intl::DateTimeFormat::new(&locales, &options).format();
        let formatted = format
            .call1(&JsValue::UNDEFINED, &js_sys::Date::new_0())
            .map_err(|e| HostError::Dom(js_message(&e)))?
            .as_string()
            .unwrap_or_default();
        WallTime::parse(&formatted).ok_or(HostError::UnexpectedTime(formatted))
    }
}

fn js_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Crate version, for poking at from dev tools.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_owned()
}

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if console_log::init_with_level(level).is_err() {
        log::debug!("logger already installed");
    }

    let Some(window) = web_sys::window() else {
        log::warn!("Browser doesn't support required features: no window");
        return;
    };
    install_error_handler(&window);

    let Some(document) = window.document() else {
        log::warn!("Browser doesn't support required features: no document");
        return;
    };
    if document.ready_state() == "loading" {
        let on_ready = Closure::once(boot);
        if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref()) {
            log::warn!("Browser doesn't support required features: {}", js_message(&e));
            return;
        }
        on_ready.forget();
    } else {
        boot();
    }
}

/// Log uncaught page errors without re-throwing.
fn install_error_handler(window: &Window) {
    let closure = Closure::wrap(Box::new(move |event: web_sys::ErrorEvent| {
        let error = event.error();
        let message = match error.dyn_ref::<js_sys::Error>() {
            Some(error) => String::from(error.message()),
            None => event.message(),
        };
        log::error!("JavaScript error: {message}");
    }) as Box<dyn FnMut(web_sys::ErrorEvent)>);
    if let Err(e) = window.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref()) {
        log::warn!("page error handler not installed: {}", js_message(&e));
        return;
    }
    closure.forget();
}

fn boot() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("Browser doesn't support required features: no document");
        return;
    };
    let raw_config = document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content());
    let config = PageConfig::from_json_or_default(raw_config.as_deref());

    match start_theme(config.theme) {
        Ok(()) => log::info!("Portfolio initialized successfully"),
        Err(e) => log::warn!("Browser doesn't support required features: {e}"),
    }

    if let Err(e) = render_clock(&IntlClock, &document, &config.clock) {
        log::error!("clock display failed: {e}");
    }
}

fn start_theme(config: ThemeConfig) -> Result<(), HostError> {
    let host = Rc::new(WebHost::detect(&config)?);
    // The registered listeners keep the controller alive for the page lifetime.
    ThemeController::new(host, config).start()?;
    Ok(())
}
