//! Typed configuration for the theme controller and clock fragment.
//!
//! Every field has a default matching the page's static markup, so an empty
//! config is valid. Pages may override fields with an inline JSON block
//! (`<script type="application/json" id="theme-config">`).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

use crate::consts::{
    ANNOUNCE_DELAY_MS, CLOCK_ELEMENT_ID, CLOCK_TIME_ZONE, DARK_SCHEME_QUERY, STORAGE_KEY, THEME_ATTRIBUTE, THEME_INPUT_NAME,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    pub storage_key: String,
    pub input_name: String,
    pub attribute: String,
    pub media_query: String,
    pub announce_delay_ms: u32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_owned(),
            input_name: THEME_INPUT_NAME.to_owned(),
            attribute: THEME_ATTRIBUTE.to_owned(),
            media_query: DARK_SCHEME_QUERY.to_owned(),
            announce_delay_ms: ANNOUNCE_DELAY_MS,
        }
    }
}

impl ThemeConfig {
    #[must_use]
    pub fn announce_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.announce_delay_ms))
    }

    #[must_use]
    pub fn with_announce_delay_ms(mut self, delay_ms: u32) -> Self {
        self.announce_delay_ms = delay_ms;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClockConfig {
    pub element_id: String,
    /// IANA zone name handed to the browser's `Intl` formatter.
    pub time_zone: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { element_id: CLOCK_ELEMENT_ID.to_owned(), time_zone: CLOCK_TIME_ZONE.to_owned() }
    }
}

/// Full page configuration, as embedded in the inline JSON block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub theme: ThemeConfig,
    pub clock: ClockConfig,
}

impl PageConfig {
    /// Parse overrides from JSON; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Like [`PageConfig::from_json`], but logs and falls back to defaults.
    #[must_use]
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|text| !text.trim().is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring invalid theme config: {e}");
                Self::default()
            }
        }
    }
}
