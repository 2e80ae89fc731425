//! Startup error types
//!
//! Everything the bootstrap does not handle itself ends up here and is
//! propagated to `main` as a fatal error.

use thiserror::Error;

use crate::preferences::PreferencesError;
use crate::theme::ThemeError;

/// Fatal startup error
#[derive(Error, Debug)]
pub enum StartupError {
    /// GUI toolkit failed to initialize
    #[error("Toolkit error: {0}")]
    Toolkit(String),

    /// The single-instance token could not be created at all
    #[error("Instance token error: {0}")]
    InstanceToken(String),

    /// Application state failed to load
    #[error("State load error: {0}")]
    StateLoad(#[from] PreferencesError),

    /// Main window could not be created
    #[error("Window error: {0}")]
    Window(String),

    /// Theme could not be applied to the main window
    #[error("Theme error: {0}")]
    Theme(#[from] ThemeError),

    /// Event loop ended abnormally
    #[error("Event loop error: {0}")]
    EventLoop(String),
}
