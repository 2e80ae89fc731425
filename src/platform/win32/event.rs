//! Win32 message loop

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, TranslateMessage, MSG,
};

use super::hotkey::is_toggle_hotkey;
use super::window::{toggle_window, WM_APP_VISIBILITY};
use crate::bootstrap::ApplicationState;
use crate::error::StartupError;

/// Pump messages until WM_QUIT and return its exit code.
///
/// The show/hide hotkey and the window's own hide requests are handled
/// here so visibility changes reach the application state.
pub fn run_message_loop(
    hwnd: HWND,
    state: &mut dyn ApplicationState,
) -> Result<i32, StartupError> {
    unsafe {
        let mut msg = MSG::default();
        loop {
            let ret = GetMessageW(&mut msg, None, 0, 0);
            if ret.0 == -1 {
                return Err(StartupError::EventLoop(
                    windows::core::Error::from_win32().to_string(),
                ));
            }
            if ret.0 == 0 {
                break;
            }

            if is_toggle_hotkey(msg.message, msg.wParam.0) {
                let visible = toggle_window(hwnd);
                log::debug!("Hotkey toggled main window, visible={}", visible);
                state.set_window_shown(visible);
                continue;
            }

            if msg.message == WM_APP_VISIBILITY {
                state.set_window_shown(msg.wParam.0 != 0);
                continue;
            }

            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        Ok(msg.wParam.0 as i32)
    }
}
