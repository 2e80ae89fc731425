//! FastGH desktop shell
//!
//! Startup glue for the FastGH GitHub client: diagnostics, the per-user
//! single-instance guard, preferences, theming and the native main window.
//! Everything except `platform` builds and tests on any OS.

pub mod app;
pub mod bootstrap;
pub mod diagnostics;
pub mod error;
pub mod hotkey;
pub mod instance;
pub mod platform;
pub mod preferences;
pub mod shell;
pub mod theme;

/// Application name, used for the config directory and instance token
pub const APP_NAME: &str = "FastGH";

/// Crate version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub use app::{AppContext, AppPaths};
pub use bootstrap::{Bootstrap, Outcome};
pub use error::StartupError;
