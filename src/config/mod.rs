//! Configuration for the theme controller and its browser backends.
//!
//! Every field has a serde default, so an empty JSON object yields the same
//! configuration as [`ThemeConfig::default`].

use serde::Deserialize;
use std::time::Duration;

use crate::error::ThemeError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemeConfig {
    /// localStorage key holding the explicit user choice
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Attribute set on the document root
    #[serde(default = "default_attribute")]
    pub attribute: String,

    #[serde(default = "default_toggle_selector")]
    pub toggle_selector: String,

    /// Looked up inside the toggle element
    #[serde(default = "default_sun_icon_selector")]
    pub sun_icon_selector: String,

    /// Looked up inside the toggle element
    #[serde(default = "default_moon_icon_selector")]
    pub moon_icon_selector: String,

    #[serde(default = "default_dark_media_query")]
    pub dark_media_query: String,

    /// How long the toggle stays pressed after activation
    #[serde(default = "default_feedback_ms")]
    pub feedback_ms: u64,
}

fn default_storage_key() -> String {
    "theme".to_string()
}

fn default_attribute() -> String {
    "data-theme".to_string()
}

fn default_toggle_selector() -> String {
    ".theme-toggle".to_string()
}

fn default_sun_icon_selector() -> String {
    ".sun-icon".to_string()
}

fn default_moon_icon_selector() -> String {
    ".moon-icon".to_string()
}

fn default_dark_media_query() -> String {
    "(prefers-color-scheme: dark)".to_string()
}

fn default_feedback_ms() -> u64 {
    150
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            attribute: default_attribute(),
            toggle_selector: default_toggle_selector(),
            sun_icon_selector: default_sun_icon_selector(),
            moon_icon_selector: default_moon_icon_selector(),
            dark_media_query: default_dark_media_query(),
            feedback_ms: default_feedback_ms(),
        }
    }
}

impl ThemeConfig {
    /// Parse a config from JSON, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        serde_json::from_str(json).map_err(|e| ThemeError::Config(e.to_string()))
    }

    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_matches_default() {
        let config = ThemeConfig::from_json("{}").expect("empty object should parse");
        assert_eq!(config, ThemeConfig::default());
    }

    #[test]
    fn test_defaults_match_site_markup() {
        let config = ThemeConfig::default();
        assert_eq!(config.storage_key, "theme");
        assert_eq!(config.attribute, "data-theme");
        assert_eq!(config.toggle_selector, ".theme-toggle");
        assert_eq!(config.sun_icon_selector, ".sun-icon");
        assert_eq!(config.moon_icon_selector, ".moon-icon");
        assert_eq!(config.feedback(), Duration::from_millis(150));
    }

    #[test]
    fn test_partial_json_overrides_only_given_fields() {
        let config =
            ThemeConfig::from_json(r#"{"storage_key": "memoir-theme", "feedback_ms": 300}"#)
                .expect("partial config should parse");

        assert_eq!(config.storage_key, "memoir-theme");
        assert_eq!(config.feedback_ms, 300);
        assert_eq!(config.attribute, "data-theme");
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = ThemeConfig::from_json(r#"{"feedback_ms": "soon"}"#).unwrap_err();
        assert!(matches!(err, ThemeError::Config(_)));
    }
}
