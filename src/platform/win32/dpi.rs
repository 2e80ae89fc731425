//! DPI awareness utilities for Windows

use windows::Win32::UI::HiDpi::*;

/// Enable per-monitor DPI awareness (call before creating windows)
pub fn enable_dpi_awareness() -> Result<(), windows::core::Error> {
    unsafe {
        // Try V2 first (Windows 10 1703+)
        if SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2).is_ok() {
            return Ok(());
        }
        SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE)
    }
}

/// System DPI, used for the initial window size
pub fn system_dpi() -> u32 {
    unsafe { GetDpiForSystem() }
}

/// Scale a logical pixel value (96 DPI) to physical pixels
pub fn scale_px(px: i32, dpi: u32) -> i32 {
    ((px as f64) * (dpi as f64) / 96.0).round() as i32
}
