// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loading user
//! preferences from a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[map]` - Tile provider, initial map view and tile cache sizing
//!
//! Map credentials are never part of the configuration: they are typed in
//! by the user for each picker session and only kept in memory.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with explicit path
//! 2. `--config-dir` CLI argument or `ICED_PARKING_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_parking::config;
//!
//! let (config, warning) = config::load();
//! if let Some(key) = warning {
//!     eprintln!("settings ignored: {key}");
//! }
//! println!("provider: {}", config.map.provider());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::geo::{GeoPoint, ZoomLevel};
use crate::error::{Error, Result};
use crate::map::ProviderKind;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Location picker settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapConfig {
    /// Tile provider backing the picker.
    #[serde(default = "default_provider", skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderKind>,

    /// Initial center latitude.
    #[serde(default = "default_latitude", skip_serializing_if = "Option::is_none")]
    pub default_latitude: Option<f64>,

    /// Initial center longitude.
    #[serde(default = "default_longitude", skip_serializing_if = "Option::is_none")]
    pub default_longitude: Option<f64>,

    /// Initial zoom level (2 to 19).
    #[serde(default = "default_zoom", skip_serializing_if = "Option::is_none")]
    pub default_zoom: Option<u8>,

    /// Decoded tiles cached per map surface.
    #[serde(
        default = "default_tile_cache_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub tile_cache_capacity: Option<usize>,

    /// URL template of the free tile server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_tile_url: Option<String>,

    /// URL template of the token-gated tile server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_tile_url: Option<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
            default_zoom: default_zoom(),
            tile_cache_capacity: default_tile_cache_capacity(),
            open_tile_url: None,
            token_tile_url: None,
        }
    }
}

impl MapConfig {
    #[must_use]
    pub fn provider(&self) -> ProviderKind {
        self.provider.unwrap_or_default()
    }

    /// Initial center. An invalid pair falls back to the default center.
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            self.default_latitude.unwrap_or(DEFAULT_MAP_LATITUDE),
            self.default_longitude.unwrap_or(DEFAULT_MAP_LONGITUDE),
        )
        .unwrap_or_default()
    }

    /// Initial zoom, clamped to the supported range.
    #[must_use]
    pub fn zoom(&self) -> ZoomLevel {
        ZoomLevel::new(self.default_zoom.unwrap_or(DEFAULT_MAP_ZOOM))
    }

    #[must_use]
    pub fn tile_cache_capacity(&self) -> usize {
        self.tile_cache_capacity
            .unwrap_or(DEFAULT_TILE_CACHE_CAPACITY)
            .clamp(MIN_TILE_CACHE_CAPACITY, MAX_TILE_CACHE_CAPACITY)
    }

    /// Free tile template, or the default when unset or missing placeholders.
    #[must_use]
    pub fn open_tile_url(&self) -> &str {
        valid_template(self.open_tile_url.as_deref(), false)
            .unwrap_or(DEFAULT_OPEN_TILE_URL_TEMPLATE)
    }

    /// Gated tile template, or the default when unset or missing placeholders.
    #[must_use]
    pub fn token_tile_url(&self) -> &str {
        valid_template(self.token_tile_url.as_deref(), true)
            .unwrap_or(DEFAULT_TOKEN_TILE_URL_TEMPLATE)
    }
}

fn valid_template(template: Option<&str>, needs_token: bool) -> Option<&str> {
    let template = template?.trim();
    let has_tile_address = ["{z}", "{x}", "{y}"].iter().all(|p| template.contains(p));
    let token_ok = !needs_token || template.contains("{token}");
    (template.starts_with("https://") && has_tile_address && token_ok).then_some(template)
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub map: MapConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_provider() -> Option<ProviderKind> {
    Some(ProviderKind::default())
}

fn default_latitude() -> Option<f64> {
    Some(DEFAULT_MAP_LATITUDE)
}

fn default_longitude() -> Option<f64> {
    Some(DEFAULT_MAP_LONGITUDE)
}

fn default_zoom() -> Option<u8> {
    Some(DEFAULT_MAP_ZOOM)
}

fn default_tile_cache_capacity() -> Option<usize> {
    Some(DEFAULT_TILE_CACHE_CAPACITY)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            return match load_from_path(&path) {
                Ok(config) => (config, None),
                Err(_) => (
                    Config::default(),
                    Some("notification-config-load-error".to_string()),
                ),
            };
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions (tests and tooling)
// =============================================================================

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
