//! Application context: configuration paths and loaded preferences
//!
//! Passed explicitly to whatever needs it instead of living in a global.

use std::path::{Path, PathBuf};

use crate::bootstrap::ApplicationState;
use crate::diagnostics::exe_dir;
use crate::error::StartupError;
use crate::preferences::{Preferences, PreferencesError, PREFS_FILE_NAME};
use crate::theme::DarkMode;
use crate::APP_NAME;

/// Directory beside the executable that switches on portable mode
pub const PORTABLE_DIR_NAME: &str = "userdata";

/// Where configuration lives
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    /// Configuration is kept beside the executable
    pub portable: bool,
}

impl AppPaths {
    /// Resolve for the running executable
    pub fn resolve() -> Self {
        Self::resolve_from(&exe_dir(), dirs::config_dir())
    }

    /// Portable mode wins when `<exe_dir>/userdata` exists, otherwise the
    /// platform config directory (or the exe dir if there is none) gets an
    /// app-specific subdirectory.
    pub fn resolve_from(exe_dir: &Path, platform_config_dir: Option<PathBuf>) -> Self {
        let portable_dir = exe_dir.join(PORTABLE_DIR_NAME);
        if portable_dir.is_dir() {
            return Self {
                config_dir: portable_dir,
                portable: true,
            };
        }

        let base = platform_config_dir.unwrap_or_else(|| exe_dir.to_path_buf());
        Self {
            config_dir: base.join(APP_NAME),
            portable: false,
        }
    }

    pub fn prefs_path(&self) -> PathBuf {
        self.config_dir.join(PREFS_FILE_NAME)
    }
}

/// Process-wide application state with an explicit load step
#[derive(Debug)]
pub struct AppContext {
    paths: AppPaths,
    prefs: Preferences,
    loaded: bool,
}

impl AppContext {
    pub fn new(paths: AppPaths) -> Self {
        Self {
            paths,
            prefs: Preferences::default(),
            loaded: false,
        }
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Persist the current preferences
    pub fn save(&self) -> Result<(), PreferencesError> {
        self.prefs.save_to_path(&self.paths.prefs_path())
    }
}

impl ApplicationState for AppContext {
    fn load(&mut self) -> Result<(), StartupError> {
        if self.loaded {
            return Ok(());
        }

        let path = self.paths.prefs_path();
        log::info!("Loading preferences from {:?}", path);
        self.prefs = Preferences::load_from_path(&path)?;
        self.loaded = true;

        log::info!(
            "Preferences loaded: accounts={}, dark_mode={:?}, window_shown={}, portable={}",
            self.prefs.accounts,
            self.prefs.dark_mode,
            self.prefs.window_shown,
            self.paths.portable
        );
        Ok(())
    }

    fn window_shown(&self) -> bool {
        self.prefs.window_shown
    }

    fn set_window_shown(&mut self, shown: bool) {
        if self.prefs.window_shown == shown {
            return;
        }
        self.prefs.window_shown = shown;
        if let Err(e) = self.save() {
            log::warn!("Failed to save preferences: {}", e);
        }
    }

    fn dark_mode(&self) -> DarkMode {
        self.prefs.dark_mode
    }

    fn global_hotkey(&self) -> &str {
        &self.prefs.global_hotkey
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portable_mode_when_userdata_exists() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(PORTABLE_DIR_NAME)).unwrap();

        let paths = AppPaths::resolve_from(dir.path(), Some(PathBuf::from("/cfg")));
        assert!(paths.portable);
        assert_eq!(paths.config_dir, dir.path().join(PORTABLE_DIR_NAME));
        assert_eq!(
            paths.prefs_path(),
            dir.path().join(PORTABLE_DIR_NAME).join(PREFS_FILE_NAME)
        );
    }

    #[test]
    fn test_platform_config_dir_gets_app_subdir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::resolve_from(dir.path(), Some(PathBuf::from("/cfg")));
        assert!(!paths.portable);
        assert_eq!(paths.config_dir, PathBuf::from("/cfg").join(APP_NAME));
    }

    #[test]
    fn test_falls_back_to_exe_dir_without_platform_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::resolve_from(dir.path(), None);
        assert_eq!(paths.config_dir, dir.path().join(APP_NAME));
    }

    fn context_in(dir: &Path) -> AppContext {
        AppContext::new(AppPaths {
            config_dir: dir.to_path_buf(),
            portable: true,
        })
    }

    #[test]
    fn test_load_reads_window_shown() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PREFS_FILE_NAME), "window_shown = false\n").unwrap();

        let mut ctx = context_in(dir.path());
        assert!(!ctx.is_loaded());
        ctx.load().unwrap();
        assert!(ctx.is_loaded());
        assert!(!ctx.window_shown());
        assert_eq!(ctx.dark_mode(), DarkMode::Off);
        assert_eq!(ctx.global_hotkey(), "control+alt+g");
    }

    #[test]
    fn test_load_runs_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context_in(dir.path());
        ctx.load().unwrap();

        std::fs::write(dir.path().join(PREFS_FILE_NAME), "window_shown = false\n").unwrap();
        ctx.load().unwrap();
        assert!(ctx.window_shown());
    }

    #[test]
    fn test_load_propagates_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PREFS_FILE_NAME), "accounts = \"two\"\n").unwrap();

        let mut ctx = context_in(dir.path());
        assert!(matches!(ctx.load(), Err(StartupError::StateLoad(_))));
        assert!(!ctx.is_loaded());
    }

    #[test]
    fn test_set_window_shown_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context_in(dir.path());
        ctx.load().unwrap();

        ctx.set_window_shown(false);

        let saved = Preferences::load_from_path(&dir.path().join(PREFS_FILE_NAME)).unwrap();
        assert!(!saved.window_shown);
    }
}
