//! Persisted user preferences (prefs.toml)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme::DarkMode;

/// File name of the preferences document inside the config directory
pub const PREFS_FILE_NAME: &str = "prefs.toml";

const DEFAULT_REPO_TEMPLATE: &str = "$full_name$ - $description$ | Stars: $stars$ | Forks: $forks$ | Issues: $open_issues$ | $language$ | Updated $updated_at$";

/// User preferences. Missing keys take their defaults, unknown keys are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Number of configured GitHub accounts
    pub accounts: u32,
    pub dark_mode: DarkMode,
    /// Whether the main window is visible at startup
    pub window_shown: bool,
    /// Display template for repository rows
    pub repo_template: String,
    /// Maximum commits to fetch, 0 = all
    pub commit_limit: u32,
    pub download_location: PathBuf,
    /// Global show/hide hotkey, empty to disable
    pub global_hotkey: String,
    /// Root directory for clones
    pub git_path: PathBuf,
    pub git_use_org_structure: bool,
    pub git_clone_recursive: bool,
    pub notify_activity: bool,
    pub notify_notifications: bool,
    pub notify_starred: bool,
    pub notify_watched: bool,
    /// Minutes between refreshes, 0 = disabled
    pub auto_refresh_interval: u32,
    pub check_for_updates: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            accounts: 1,
            dark_mode: DarkMode::Off,
            window_shown: true,
            repo_template: DEFAULT_REPO_TEMPLATE.to_string(),
            commit_limit: 0,
            download_location: home.join("Downloads"),
            global_hotkey: "control+alt+g".to_string(),
            git_path: home.join("git"),
            git_use_org_structure: false,
            git_clone_recursive: false,
            notify_activity: false,
            notify_notifications: false,
            notify_starred: false,
            notify_watched: false,
            auto_refresh_interval: 0,
            check_for_updates: true,
        }
    }
}

impl Preferences {
    /// Load preferences from `path`; a missing file yields the defaults
    pub fn load_from_path(path: &Path) -> Result<Self, PreferencesError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let prefs: Preferences = toml::from_str(&content)?;
        Ok(prefs)
    }

    /// Write preferences to `path`, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Preferences persistence error
#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
