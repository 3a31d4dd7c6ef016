//! Settings file.
//!
//! Adaptation settings live in a TOML file:
//!
//! ```toml
//! [resolution_override]
//! width = 0
//! height = 0
//!
//! [ui]
//! scale = 1.0
//! aspect_ratio = 0.0
//! ```
//!
//! The file is read once at startup. The resulting snapshot is handed to the
//! adaptation engine and never changes while it runs.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};
use ultrawide_kernel::AdaptationSettings;

/// Settings file name.
pub const SETTINGS_FILE_NAME: &str = "ultrawide.toml";

/// Settings directory name under the platform config directory.
pub const SETTINGS_DIR_NAME: &str = "ultrawide";

/// Errors that can occur during settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings file location plus the snapshot read from it.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: AdaptationSettings,
}

impl SettingsStore {
    /// Creates a store at a custom path holding default settings.
    #[must_use]
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            settings: AdaptationSettings::default(),
        }
    }

    /// Opens the store at `path`, falling back to defaults on any failure.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let mut store = Self::with_path(path);
        if let Err(e) = store.load() {
            warn!("Failed to load settings from {}: {e}", store.path.display());
            store.settings = AdaptationSettings::default();
        }
        store
    }

    /// `<config dir>/ultrawide/ultrawide.toml`, or the working directory
    /// when no config directory is known.
    #[must_use]
    pub fn default_settings_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(SETTINGS_FILE_NAME),
            |dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME),
        )
    }

    /// Settings file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current snapshot.
    #[must_use]
    pub fn settings(&self) -> AdaptationSettings {
        self.settings
    }

    /// Reads the file. A missing file yields defaults.
    pub fn load(&mut self) -> SettingsResult<()> {
        if !self.path.exists() {
            info!("Settings file not found, using defaults");
            self.settings = AdaptationSettings::default();
            return Ok(());
        }

        let contents = fs::read_to_string(&self.path)?;
        self.settings = parse_settings(&contents)?;
        info!("Settings loaded from {}", self.path.display());
        Ok(())
    }

    /// Writes `settings` to the file, creating parent directories.
    pub fn save(&mut self, settings: AdaptationSettings) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, toml::to_string_pretty(&settings)?)?;
        self.settings = settings;

        info!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

/// Parses and validates settings TOML.
pub fn parse_settings(contents: &str) -> SettingsResult<AdaptationSettings> {
    let settings: AdaptationSettings = toml::from_str(contents)?;
    Ok(settings.validated())
}
