//! Startup sequencer
//!
//! Runs the fixed startup order against its collaborators:
//!
//! `Start → Diagnostics → ToolkitReady → InstanceChecked → [Terminated]
//! → StateLoaded → WindowCreated → ThemeApplied → [WindowShown | WindowHidden]
//! → EventLoop`
//!
//! Each step completes before the next one begins. A duplicate instance
//! stops the sequence right after the instance check.

use std::path::PathBuf;
use std::process::ExitCode;

use crate::diagnostics;
use crate::error::StartupError;
use crate::instance::{InstanceGuard, InstanceLock};
use crate::theme::{DarkMode, Theme, Themeable};
use crate::APP_NAME;

/// Application state the bootstrap loads and reads from
pub trait ApplicationState {
    /// Initialize preferences (and whatever else the application keeps)
    fn load(&mut self) -> Result<(), StartupError>;

    /// Whether the main window should be visible
    fn window_shown(&self) -> bool;

    /// Record a visibility change made after startup
    fn set_window_shown(&mut self, shown: bool);

    fn dark_mode(&self) -> DarkMode;

    /// Show/hide hotkey, empty when disabled
    fn global_hotkey(&self) -> &str;
}

/// Main window handle
pub trait MainWindow: Themeable {
    fn show(&mut self);
}

/// GUI toolkit runtime
pub trait Toolkit {
    type Window: MainWindow;

    fn initialize(&mut self) -> Result<(), StartupError>;

    /// Show a blocking modal notice
    fn notify(&mut self, notice: &Notice);

    fn create_main_window(
        &mut self,
        state: &dyn ApplicationState,
    ) -> Result<Self::Window, StartupError>;

    /// Block in the event loop until the application quits, returning its exit code
    fn run_event_loop(
        &mut self,
        window: Self::Window,
        state: &mut dyn ApplicationState,
    ) -> Result<i32, StartupError>;
}

/// Modal warning with a single acknowledgement button
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn already_running() -> Self {
        Self {
            title: APP_NAME.to_string(),
            message: format!("Another instance of {} is already running.", APP_NAME),
        }
    }
}

/// Startup progress
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Start,
    Diagnostics,
    ToolkitReady,
    InstanceChecked,
    Terminated,
    StateLoaded,
    WindowCreated,
    ThemeApplied,
    WindowShown,
    WindowHidden,
    EventLoop,
}

/// How a completed startup ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Another instance was running; nothing was initialized
    Duplicate,
    /// The event loop finished with this code
    Exited(i32),
}

impl Outcome {
    /// Process exit status. Event loop codes outside 0..=255 (negative ones
    /// included) cannot be reported as-is and become a plain failure.
    pub fn exit_code(&self) -> ExitCode {
        match *self {
            Outcome::Duplicate => ExitCode::FAILURE,
            Outcome::Exited(code) => u8::try_from(code)
                .map(ExitCode::from)
                .unwrap_or(ExitCode::FAILURE),
        }
    }
}

/// Startup sequencer owning its collaborators
pub struct Bootstrap<T, S, G> {
    toolkit: T,
    state: S,
    guard: G,
    log_target: Option<PathBuf>,
    stages: Vec<Stage>,
}

impl<T, S, G> Bootstrap<T, S, G>
where
    T: Toolkit,
    S: ApplicationState,
    G: InstanceGuard,
{
    pub fn new(toolkit: T, state: S, guard: G) -> Self {
        Self {
            toolkit,
            state,
            guard,
            log_target: diagnostics::default_target(),
            stages: vec![Stage::Start],
        }
    }

    /// Override where diagnostics go (`None` keeps them off)
    pub fn with_log_target(mut self, target: Option<PathBuf>) -> Self {
        self.log_target = target;
        self
    }

    /// Stages reached so far, in order
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    fn enter(&mut self, stage: Stage) {
        log::debug!("Startup stage: {:?}", stage);
        self.stages.push(stage);
    }

    /// Run the whole startup sequence and the event loop
    pub fn run(&mut self) -> Result<Outcome, StartupError> {
        match diagnostics::redirect(self.log_target.as_deref()) {
            Some(path) => log::info!("=== {} started, diagnostics in {:?} ===", APP_NAME, path),
            None => log::info!("=== {} started ===", APP_NAME),
        }
        self.enter(Stage::Diagnostics);

        self.toolkit.initialize()?;
        self.enter(Stage::ToolkitReady);

        // Held until this function returns, i.e. until the event loop ends.
        let _instance = match self.guard.acquire()? {
            InstanceLock::Acquired(held) => held,
            InstanceLock::Duplicate => {
                self.enter(Stage::InstanceChecked);
                log::warn!("Another instance is already running, exiting");
                self.toolkit.notify(&Notice::already_running());
                self.enter(Stage::Terminated);
                return Ok(Outcome::Duplicate);
            }
        };
        self.enter(Stage::InstanceChecked);

        self.state.load()?;
        self.enter(Stage::StateLoaded);

        let mut window = self.toolkit.create_main_window(&self.state)?;
        self.enter(Stage::WindowCreated);

        Theme::new(self.state.dark_mode()).apply(&mut window)?;
        self.enter(Stage::ThemeApplied);

        if self.state.window_shown() {
            window.show();
            self.enter(Stage::WindowShown);
        } else {
            log::info!("Main window starts hidden");
            self.enter(Stage::WindowHidden);
        }

        self.enter(Stage::EventLoop);
        let code = self.toolkit.run_event_loop(window, &mut self.state)?;
        log::info!("Event loop exited with code {}", code);
        Ok(Outcome::Exited(code))
    }
}
