//! Global show/hide hotkey registration

use windows::core::Error;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT,
    MOD_SHIFT, MOD_WIN,
};
use windows::Win32::UI::WindowsAndMessaging::WM_HOTKEY;

use crate::hotkey::Hotkey;

/// Hotkey identifier for show/hide
pub const HOTKEY_ID_TOGGLE: i32 = 1;

fn modifier_flags(hotkey: &Hotkey) -> HOT_KEY_MODIFIERS {
    let mut flags = MOD_NOREPEAT.0;
    if hotkey.modifiers.ctrl {
        flags |= MOD_CONTROL.0;
    }
    if hotkey.modifiers.alt {
        flags |= MOD_ALT.0;
    }
    if hotkey.modifiers.shift {
        flags |= MOD_SHIFT.0;
    }
    if hotkey.modifiers.win {
        flags |= MOD_WIN.0;
    }
    HOT_KEY_MODIFIERS(flags)
}

/// Register `hotkey` so that `hwnd`'s thread receives WM_HOTKEY for it.
/// Fails if another application owns the combination.
pub fn register_hotkey(hwnd: HWND, hotkey: &Hotkey) -> Result<(), Error> {
    unsafe {
        RegisterHotKey(
            hwnd,
            HOTKEY_ID_TOGGLE,
            modifier_flags(hotkey),
            hotkey.key.virtual_key(),
        )
    }
}

pub fn unregister_hotkey(hwnd: HWND) {
    unsafe {
        let _ = UnregisterHotKey(hwnd, HOTKEY_ID_TOGGLE);
    }
}

/// Check if a message is our show/hide hotkey
pub fn is_toggle_hotkey(msg: u32, wparam: usize) -> bool {
    msg == WM_HOTKEY && wparam as i32 == HOTKEY_ID_TOGGLE
}
