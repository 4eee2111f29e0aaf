use crate::{Error, ModifierKey, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    /// Load config from file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid JSON,
    /// or binds both modifier triggers to the same key.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config: Self = serde_json::from_str(&content)?;
        config.window.validate()?;
        Ok(config)
    }
}

/// Behavior of the launcher window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)] // independent user toggles
pub struct WindowConfig {
    /// Show fallback rows when a query finishes without matches
    #[serde(default = "default_true")]
    pub show_fallbacks_on_empty: bool,

    /// Restrict history navigation to entries containing the typed text
    #[serde(default = "default_true")]
    pub history_search: bool,

    /// Number of visible rows in the results list
    #[serde(default = "default_item_count")]
    pub item_count: usize,

    #[serde(default)]
    pub clear_on_hide: bool,

    #[serde(default = "default_true")]
    pub hide_on_focus_loss: bool,

    /// How long stale results stay frozen before the list hides
    #[serde(default = "default_display_delay")]
    pub display_delay_ms: u64,

    #[serde(default = "default_button_fade")]
    pub button_fade_ms: u64,

    /// Held to peek at fallbacks
    #[serde(default = "default_mod_fallback")]
    pub mod_fallback: ModifierKey,

    /// Held to show the selected row's actions
    #[serde(default = "default_mod_actions")]
    pub mod_actions: ModifierKey,
}

fn default_true() -> bool {
    true
}
fn default_item_count() -> usize {
    5
}
fn default_display_delay() -> u64 {
    100
}
fn default_button_fade() -> u64 {
    500
}
fn default_mod_fallback() -> ModifierKey {
    ModifierKey::Meta
}
fn default_mod_actions() -> ModifierKey {
    ModifierKey::Alt
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            show_fallbacks_on_empty: true,
            history_search: true,
            item_count: default_item_count(),
            clear_on_hide: false,
            hide_on_focus_loss: true,
            display_delay_ms: default_display_delay(),
            button_fade_ms: default_button_fade(),
            mod_fallback: default_mod_fallback(),
            mod_actions: default_mod_actions(),
        }
    }
}

impl WindowConfig {
    #[must_use]
    pub fn display_delay(&self) -> Duration {
        Duration::from_millis(self.display_delay_ms)
    }

    #[must_use]
    pub fn button_fade(&self) -> Duration {
        Duration::from_millis(self.button_fade_ms)
    }

    /// Check that the two modifier triggers can be told apart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if both triggers use the same modifier.
    pub fn validate(&self) -> Result<()> {
        if self.mod_fallback == self.mod_actions {
            return Err(Error::Config(format!(
                "modFallback and modActions are both {}",
                self.mod_fallback
            )));
        }
        Ok(())
    }
}

/// Web search fallback settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebConfig {
    #[serde(default = "default_engine_url")]
    pub engine_base_url: String,
}

fn default_engine_url() -> String {
    "https://duckduckgo.com/?q=".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            engine_base_url: default_engine_url(),
        }
    }
}
