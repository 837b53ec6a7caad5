use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::parse::ParsePolicy;

const APP_DIR: &str = "gas-meter";
const SETTINGS_FILE: &str = "settings.json";

fn default_database_path() -> PathBuf {
    PathBuf::from("gas.db")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_window_size() -> [f32; 2] {
    [800.0, 600.0]
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,  // Relative paths resolve against the working directory
    #[serde(default = "default_log_level")]
    pub log_level: String,  // e.g. "info" or "debug"
    #[serde(default)]
    pub parse_policy: ParsePolicy,
    #[serde(default = "default_window_size")]
    pub window_size: [f32; 2],
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log_level: default_log_level(),
            parse_policy: ParsePolicy::default(),
            window_size: default_window_size(),
        }
    }
}

impl AppSettings {
    /// Location of the settings file, if the platform has a config directory.
    pub fn default_location() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
    }

    /// Loads settings from the platform config directory, writing the defaults
    /// there on first run. A malformed file is left untouched and defaults are used.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_location() else {
            warn!("No config directory available, using default settings");
            return Self::default();
        };

        if !path.exists() {
            let settings = Self::default();
            if let Err(e) = settings.save(&path) {
                warn!("Could not write default settings: {:#}", e);
            }
            return settings;
        }

        Self::load(&path).unwrap_or_else(|e| {
            warn!("Ignoring settings file: {:#}", e);
            Self::default()
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
