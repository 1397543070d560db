//! Theme preference controller and clock fragment for the portfolio site.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It keeps the
//! page's light/dark presentation in sync with the visitor's choice (light,
//! dark, or auto) and, in auto mode, with the system color scheme. Choices are
//! persisted in `localStorage` and announced through a transient live region.
//! A separate fragment writes the current Mountain Time into the clock element.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Preference and resolved theme value types |
//! | [`controller`] | The theme controller, testable without a browser |
//! | [`host`] | [`host::ThemeHost`] trait the controller drives |
//! | [`clock`] | Mountain Time formatting and the clock fragment |
//! | [`config`] | Typed config with defaults and JSON overrides |
//! | [`error`] | Host error type |
//! | [`consts`] | Storage key, DOM names, delays |
//! | `web` | `web_sys` host and WASM entry point (`hydrate` feature) |

pub mod clock;
pub mod config;
pub mod consts;
pub mod controller;
pub mod error;
pub mod host;
pub mod theme;

#[cfg(feature = "hydrate")]
pub mod web;

#[cfg(test)]
mod fake_host;
