//! Configuration file support for imlabel.
//!
//! Preferences, file locations and keybindings are stored as JSON in the
//! platform config directory and loaded at startup.

use std::path::PathBuf;

use eframe::egui::Key;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DATASET_FILE, DEFAULT_DISPLAY_SIZE, DEFAULT_GRID_COLUMNS, DEFAULT_TAXONOMY_FILE,
};
use crate::keybindings::{KeyBindings, MAX_LABEL_HOTKEYS, default_label_hotkeys};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Labelling file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Keybinding configuration
    #[serde(default)]
    pub keybindings: KeyBindingsConfig,
}

fn default_app_name() -> String {
    "imlabel".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Dark theme enabled
    #[serde(default = "default_dark_theme")]
    pub dark_theme: bool,

    /// Side length of the square the image is shown at
    #[serde(default = "default_display_size")]
    pub display_size: u32,

    /// Number of label buttons per row
    #[serde(default = "default_grid_columns")]
    pub grid_columns: usize,

    /// Ask before removing a label from the taxonomy
    #[serde(default = "default_true")]
    pub confirm_label_removal: bool,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_dark_theme() -> bool {
    false
}

fn default_display_size() -> u32 {
    DEFAULT_DISPLAY_SIZE
}

fn default_grid_columns() -> usize {
    DEFAULT_GRID_COLUMNS
}

fn default_true() -> bool {
    true
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            dark_theme: default_dark_theme(),
            display_size: default_display_size(),
            grid_columns: default_grid_columns(),
            confirm_label_removal: true,
            log_level: LogLevel::default(),
        }
    }
}

/// Locations of the two labelling files.
///
/// Relative paths resolve against the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// CSV dataset with a URL column
    #[serde(default = "default_dataset_path")]
    pub dataset: PathBuf,

    /// JSON array of label names
    #[serde(default = "default_taxonomy_path")]
    pub taxonomy: PathBuf,
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATASET_FILE)
}

fn default_taxonomy_path() -> PathBuf {
    PathBuf::from(DEFAULT_TAXONOMY_FILE)
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset_path(),
            taxonomy: default_taxonomy_path(),
        }
    }
}

/// Keybinding configuration section. Keys are stored by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindingsConfig {
    /// Hotkey for the previous image
    pub prev_image: String,
    /// Hotkey for the next image
    pub next_image: String,
    /// Hotkey for save & next
    pub save_and_next: String,

    /// Hotkeys for label selection by taxonomy position
    #[serde(default = "default_label_hotkey_names")]
    pub label_hotkeys: Vec<Option<String>>,
}

fn default_label_hotkey_names() -> Vec<Option<String>> {
    default_label_hotkeys()
        .iter()
        .map(|key| key.map(|k| k.name().to_string()))
        .collect()
}

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self::from(&KeyBindings::default())
    }
}

impl From<&KeyBindings> for KeyBindingsConfig {
    fn from(bindings: &KeyBindings) -> Self {
        Self {
            prev_image: bindings.prev_image.name().to_string(),
            next_image: bindings.next_image.name().to_string(),
            save_and_next: bindings.save_and_next.name().to_string(),
            label_hotkeys: bindings
                .label_hotkeys
                .iter()
                .map(|key| key.map(|k| k.name().to_string()))
                .collect(),
        }
    }
}

impl KeyBindingsConfig {
    /// Convert back to KeyBindings.
    ///
    /// Unknown key names fall back to the default binding for that slot;
    /// missing label slots are left unbound.
    pub fn to_keybindings(&self) -> KeyBindings {
        let defaults = KeyBindings::default();
        let mut label_hotkeys: [Option<Key>; MAX_LABEL_HOTKEYS] = [None; MAX_LABEL_HOTKEYS];

        for (i, name) in self
            .label_hotkeys
            .iter()
            .take(MAX_LABEL_HOTKEYS)
            .enumerate()
        {
            label_hotkeys[i] = name.as_deref().and_then(parse_key);
        }

        let bindings = KeyBindings {
            prev_image: parse_key(&self.prev_image).unwrap_or(defaults.prev_image),
            next_image: parse_key(&self.next_image).unwrap_or(defaults.next_image),
            save_and_next: parse_key(&self.save_and_next).unwrap_or(defaults.save_and_next),
            label_hotkeys,
        };
        for (action, other) in bindings.conflicts() {
            log::warn!(
                "Key {:?} for {} is also bound to {}",
                bindings.key_for_action(action).name(),
                action.name(),
                other
            );
        }
        bindings
    }
}

fn parse_key(name: &str) -> Option<Key> {
    let key = Key::from_name(name);
    if key.is_none() {
        log::warn!("Unknown key name {:?} in keybinding config", name);
    }
    key
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
            paths: PathsConfig::default(),
            keybindings: KeyBindingsConfig::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Level to apply with `log::set_max_level` once this config is read.
    ///
    /// `None` when `RUST_LOG` is set, since the environment filter wins.
    pub fn max_log_level(&self, rust_log_set: bool) -> Option<log::LevelFilter> {
        (!rust_log_set).then(|| self.preferences.log_level.to_level_filter())
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "imlabel-config.json"
    }

    /// Get the default config file path for auto-load/save.
    pub fn default_path() -> Option<PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("imlabel").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("imlabel")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Try to load configuration from a specific file.
    pub fn load_from(path: &std::path::Path) -> Option<Self> {
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to a specific file, creating parent directories.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.paths.dataset, PathBuf::from("image_urls.csv"));
        assert_eq!(config.paths.taxonomy, PathBuf::from("label_classes.json"));
        assert_eq!(config.preferences.display_size, 400);
        assert_eq!(config.preferences.grid_columns, 5);
        assert!(config.preferences.confirm_label_removal);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = AppConfig::new();
        config.preferences.dark_theme = true;
        config.paths.dataset = PathBuf::from("/data/batch1.csv");
        let json = config.to_json().unwrap();
        assert_eq!(AppConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_json(r#"{"version": 1}"#).unwrap();
        assert_eq!(config, AppConfig::new());
    }

    #[test]
    fn test_version_too_new() {
        let err = AppConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_keybindings_roundtrip() {
        let bindings = KeyBindingsConfig::default().to_keybindings();
        assert_eq!(bindings, KeyBindings::default());
    }

    #[test]
    fn test_unknown_key_name_falls_back() {
        let mut config = KeyBindingsConfig::default();
        config.next_image = "NotAKey".to_string();
        config.label_hotkeys = vec![Some("NotAKey".to_string()), None];

        let bindings = config.to_keybindings();
        assert_eq!(bindings.next_image, Key::ArrowRight);
        assert_eq!(bindings.label_hotkeys[0], None);
        assert_eq!(bindings.label_hotkeys[2], None);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(AppConfig::default_filename());
        let mut config = AppConfig::new();
        config.preferences.log_level = LogLevel::Debug;

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path), Some(config));
    }

    #[test]
    fn test_load_missing_or_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(AppConfig::load_from(&path), None);

        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppConfig::load_from(&path), None);
    }

    #[test]
    fn test_max_log_level() {
        let mut config = AppConfig::new();
        config.preferences.log_level = LogLevel::Debug;
        assert_eq!(config.max_log_level(false), Some(log::LevelFilter::Debug));
        assert_eq!(config.max_log_level(true), None);
    }
}
