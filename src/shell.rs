//! Main window behaviour shared by the native shells

/// Menu label for the explicit quit command
pub const EXIT_LABEL: &str = "Exit\tAlt+X";

/// Key that quits together with Alt
pub const EXIT_KEY: char = 'X';

/// What a close request does to the main window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseAction {
    /// Hide the window; the process keeps running
    Hide,
    /// Destroy the window and leave the event loop
    Quit,
}

/// Decide what closing the main window does.
///
/// `close_hides` is set while a global hotkey can bring the window back.
/// `quit_requested` covers Exit/Alt+X and Shift+close, which always quit.
pub fn close_action(close_hides: bool, quit_requested: bool) -> CloseAction {
    if close_hides && !quit_requested {
        CloseAction::Hide
    } else {
        CloseAction::Quit
    }
}

/// Whether a window that is still hidden when the event loop starts has to
/// be shown, because no hotkey is registered to reveal it later.
///
/// This only affects the screen; the `window_shown` preference is left as
/// the user saved it.
pub fn reveal_on_start(hotkey_registered: bool, visible: bool) -> bool {
    !hotkey_registered && !visible
}

/// Whether `key` (an upper-case ASCII virtual key or character) pressed with
/// Alt is the quit shortcut
pub fn is_exit_shortcut(key: u32, alt: bool) -> bool {
    alt && char::from_u32(key).is_some_and(|c| c.eq_ignore_ascii_case(&EXIT_KEY))
}
