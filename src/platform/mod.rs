//! Platform abstraction layer
//!
//! Currently only Windows (win32) has a native shell.

#[cfg(target_os = "windows")]
pub mod win32;

#[cfg(target_os = "windows")]
pub use win32::Win32Toolkit;
