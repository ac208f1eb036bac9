//! Binding configuration.
//!
//! One typed struct for everything a mounted cursor binding needs:
//! - `color`: literal CSS color or a `var(--name)` reference
//! - `pressed_variants`: whether the `:active` cursor set is generated
//! - `observed_attributes`: root attributes whose mutation re-resolves the color
//! - `theme_event`: window event name that forces re-application
//!
//! Deserializes from the camelCase options object hosts pass in.

use serde::{Deserialize, Serialize};

use crate::error::AuraResult;

/// Shadow color used when none is given or a variable resolves empty.
pub const DEFAULT_COLOR: &str = "#000";

/// Broadcast event hosts dispatch on the window after switching themes.
pub const THEME_CHANGE_EVENT: &str = "themechange";

/// Root attributes a theme switch typically touches.
pub const DEFAULT_OBSERVED_ATTRIBUTES: [&str; 3] = ["class", "style", "data-theme"];

/// Configuration for a cursor binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuraConfig {
    /// Shadow color. Any CSS color, or `var(--name)` resolved against the root.
    pub color: String,

    /// Generate and apply the pressed (`:active`) cursor set.
    pub pressed_variants: bool,

    /// Root element attributes observed for theme changes.
    pub observed_attributes: Vec<String>,

    /// Window event that triggers re-application.
    pub theme_event: String,
}

impl Default for AuraConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            pressed_variants: true,
            observed_attributes: DEFAULT_OBSERVED_ATTRIBUTES
                .iter()
                .map(|attr| attr.to_string())
                .collect(),
            theme_event: THEME_CHANGE_EVENT.to_string(),
        }
    }
}

impl AuraConfig {
    /// Config with the given color and defaults elsewhere.
    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..Self::default()
        }
    }

    /// Parse a JSON options object, then normalise it.
    pub fn from_json(json: &str) -> AuraResult<Self> {
        let mut config: AuraConfig = serde_json::from_str(json)?;
        config.validate();
        Ok(config)
    }

    /// Replace blank or empty fields with their defaults.
    pub fn validate(&mut self) {
        let color = self.color.trim();
        self.color = if color.is_empty() {
            DEFAULT_COLOR.to_string()
        } else {
            color.to_string()
        };

        self.observed_attributes.retain(|attr| !attr.trim().is_empty());
        if self.observed_attributes.is_empty() {
            self.observed_attributes = Self::default().observed_attributes;
        }

        if self.theme_event.trim().is_empty() {
            self.theme_event = THEME_CHANGE_EVENT.to_string();
        }
    }

    /// Observed attribute names as string slices, for host observers.
    pub fn attribute_filter(&self) -> Vec<&str> {
        self.observed_attributes.iter().map(String::as_str).collect()
    }
}
