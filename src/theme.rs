//! Theme preference and resolved theme value types.
//!
//! A preference is what the user picked; a resolved theme is what the page
//! actually shows. `auto` never reaches the page: it is always resolved
//! against the system color-scheme signal first.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User's theme choice, persisted under the storage key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    Auto,
}

/// Light/dark mode applied to the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedTheme {
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme preference: {0:?}")]
pub struct UnknownPreference(pub String);

impl ThemePreference {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::Auto];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }

    /// Lenient parse for stored or DOM-supplied values.
    ///
    /// Missing and unrecognized values both fall back to [`ThemePreference::Auto`].
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw.map(str::parse::<Self>) {
            Some(Ok(preference)) => preference,
            _ => Self::default(),
        }
    }

    /// Resolve against the current system signal.
    #[must_use]
    pub fn resolve(self, system_prefers_dark: bool) -> ResolvedTheme {
        match self {
            Self::Light => ResolvedTheme::Light,
            Self::Dark => ResolvedTheme::Dark,
            Self::Auto => ResolvedTheme::from_system(system_prefers_dark),
        }
    }

    #[must_use]
    pub fn follows_system(self) -> bool {
        self == Self::Auto
    }
}

impl FromStr for ThemePreference {
    type Err = UnknownPreference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "auto" => Ok(Self::Auto),
            other => Err(UnknownPreference(other.to_owned())),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ResolvedTheme {
    #[must_use]
    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
