//! Win32 platform implementation

pub mod dialog;
pub mod dpi;
pub mod event;
pub mod hotkey;
pub mod toolkit;
pub mod window;

pub use toolkit::Win32Toolkit;
pub use window::{Win32Window, WindowConfig};
