//! Win32 implementation of the bootstrap's toolkit

use windows::Win32::Foundation::HWND;

use super::dialog::show_notice;
use super::dpi::enable_dpi_awareness;
use super::event::run_message_loop;
use super::hotkey::{register_hotkey, unregister_hotkey};
use super::window::{
    create_window, is_window_visible, register_window_class, set_close_hides, show_window,
    unregister_window_class, Win32Window, WindowConfig,
};
use crate::bootstrap::{ApplicationState, Notice, Toolkit};
use crate::error::StartupError;
use crate::hotkey;
use crate::shell::reveal_on_start;

/// Native Win32 toolkit: window class, main window, hotkey and message loop
#[derive(Debug, Default)]
pub struct Win32Toolkit {
    config: WindowConfig,
    class_registered: bool,
    hotkey_window: Option<HWND>,
}

impl Win32Toolkit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: WindowConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Register the show/hide hotkey from preferences. A bad or taken
    /// hotkey is logged and leaves the window without one.
    fn register_toggle_hotkey(&mut self, hwnd: HWND, value: &str) {
        let hotkey = match hotkey::from_preference(value) {
            Ok(Some(hotkey)) => hotkey,
            Ok(None) => {
                log::info!("Global hotkey disabled");
                return;
            }
            Err(e) => {
                log::warn!("Ignoring global hotkey {:?}: {}", value, e);
                return;
            }
        };

        match register_hotkey(hwnd, &hotkey) {
            Ok(()) => {
                log::info!("Registered global hotkey {}", hotkey);
                self.hotkey_window = Some(hwnd);
                set_close_hides(true);
            }
            Err(e) => log::warn!("Failed to register hotkey {}: {}", hotkey, e),
        }
    }
}

impl Toolkit for Win32Toolkit {
    type Window = Win32Window;

    fn initialize(&mut self) -> Result<(), StartupError> {
        if let Err(e) = enable_dpi_awareness() {
            log::warn!("Failed to enable DPI awareness: {}", e);
        }
        register_window_class().map_err(|e| StartupError::Toolkit(e.to_string()))?;
        self.class_registered = true;
        Ok(())
    }

    fn notify(&mut self, notice: &Notice) {
        show_notice(notice);
    }

    fn create_main_window(
        &mut self,
        state: &dyn ApplicationState,
    ) -> Result<Win32Window, StartupError> {
        let hwnd = create_window(&self.config).map_err(|e| StartupError::Window(e.to_string()))?;
        log::info!("Main window created: {:?}", hwnd);
        self.register_toggle_hotkey(hwnd, state.global_hotkey());
        Ok(Win32Window::new(hwnd))
    }

    fn run_event_loop(
        &mut self,
        window: Win32Window,
        state: &mut dyn ApplicationState,
    ) -> Result<i32, StartupError> {
        if reveal_on_start(self.hotkey_window.is_some(), is_window_visible(window.hwnd())) {
            log::warn!("Main window is hidden and no hotkey can reveal it, showing it");
            show_window(window.hwnd());
        }

        log::info!("Entering message loop");
        run_message_loop(window.hwnd(), state)
    }
}

impl Drop for Win32Toolkit {
    fn drop(&mut self) {
        if let Some(hwnd) = self.hotkey_window.take() {
            unregister_hotkey(hwnd);
        }
        if self.class_registered {
            unregister_window_class();
        }
    }
}
