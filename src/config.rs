use anyhow::Result;
use booklet_layout::PlacementOptions;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_SETTINGS_PATH: &str = "config/booklet_organizer.toml";

/// Version written into saved settings; older files are discarded on load.
pub const SETTINGS_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Pack each job category on its own rows.
    pub group_by_category: bool,
    /// Stack booklets in reverse layout order.
    pub front_to_back: bool,
    /// Emit per-batch debug logs.
    pub enable_logging: bool,
    /// Package version that wrote the file.
    pub version: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            group_by_category: true,
            front_to_back: false,
            enable_logging: false,
            version: Some(SETTINGS_VERSION.to_owned()),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("settings were saved by version {found}, expected {expected}")]
    VersionMismatch { found: String, expected: String },
}

impl Settings {
    /// Accept a load result or log why it failed and use defaults.
    pub fn resolve(path: &Path, loaded: Result<Self, SettingsError>) -> Self {
        match loaded {
            Ok(settings) => settings,
            Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!("Settings not found at {}. Using defaults", path.display());
                Settings::default()
            }
            Err(err) => {
                warn!("Failed to load {}: {err}. Using defaults", path.display());
                Settings::default()
            }
        }
    }

    /// Load settings, reporting why they could not be used.
    pub fn try_load_from_path(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&contents)?;
        match settings.version.as_deref() {
            Some(found) if found != SETTINGS_VERSION => Err(SettingsError::VersionMismatch {
                found: found.to_owned(),
                expected: SETTINGS_VERSION.to_owned(),
            }),
            _ => Ok(settings),
        }
    }

    /// Save settings to an explicit path, stamping the current version.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let stamped = Settings {
            version: Some(SETTINGS_VERSION.to_owned()),
            ..self.clone()
        };
        let toml = toml::to_string_pretty(&stamped)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Flags the placement engine reads.
    pub fn placement_options(&self) -> PlacementOptions {
        PlacementOptions {
            group_by_category: self.group_by_category,
            front_to_back: self.front_to_back,
        }
    }

    /// Default `tracing` filter directive for these settings.
    pub fn log_directive(&self) -> &'static str {
        if self.enable_logging {
            "warn,booklet_organizer=debug,booklet_layout=debug,booklet_station=debug"
        } else {
            "warn"
        }
    }
}
