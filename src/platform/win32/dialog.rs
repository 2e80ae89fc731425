//! Blocking message boxes

use windows::core::HSTRING;
use windows::Win32::UI::WindowsAndMessaging::{
    MessageBoxW, MB_ICONWARNING, MB_OK, MB_SETFOREGROUND,
};

use crate::bootstrap::Notice;

/// Show `notice` as a warning with an OK button; returns once the user dismisses it
pub fn show_notice(notice: &Notice) {
    let text = HSTRING::from(notice.message.as_str());
    let caption = HSTRING::from(notice.title.as_str());

    unsafe {
        let _ = MessageBoxW(None, &text, &caption, MB_OK | MB_ICONWARNING | MB_SETFOREGROUND);
    }
}
