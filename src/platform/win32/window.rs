//! Win32 main window creation and management

use std::cell::Cell;

use windows::core::{w, Error, HSTRING, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateSolidBrush, DeleteObject, DrawTextW, EndPaint, FillRect, GetMonitorInfoW,
    InvalidateRect, MonitorFromWindow, SetBkMode, SetTextColor, DT_CENTER, DT_SINGLELINE,
    DT_VCENTER, HBRUSH, MONITORINFO, MONITOR_DEFAULTTOPRIMARY, PAINTSTRUCT, TRANSPARENT,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{GetKeyState, VK_SHIFT};
use windows::Win32::UI::WindowsAndMessaging::*;

use super::dpi::{scale_px, system_dpi};
use crate::bootstrap::MainWindow;
use crate::shell::{close_action, is_exit_shortcut, CloseAction, EXIT_LABEL};
use crate::theme::{Color, SurfaceKind, ThemeError, Themeable};
use crate::APP_NAME;

/// Posted after the window hides itself; WPARAM is the new visibility (0/1)
pub const WM_APP_VISIBILITY: u32 = WM_APP + 1;

const WINDOW_CLASS_NAME: PCWSTR = w!("FastGHMainWindow");

/// System menu command for Exit (low four bits are reserved by the system)
const IDM_EXIT: usize = 0x0010;

thread_local! {
    /// Current background and foreground, read by WM_PAINT
    static WINDOW_COLORS: Cell<(Color, Color)> = const { Cell::new((Color::WHITE, Color::BLACK)) };

    /// When false, closing the window quits instead of hiding it
    static CLOSE_HIDES: Cell<bool> = const { Cell::new(false) };

    /// Set by Exit/Alt+X so the following WM_CLOSE quits
    static QUIT_REQUESTED: Cell<bool> = const { Cell::new(false) };
}

/// Window configuration
#[derive(Clone, Debug)]
pub struct WindowConfig {
    /// Logical width in pixels (at 96 DPI)
    pub width: i32,
    /// Logical height in pixels (at 96 DPI)
    pub height: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 640,
        }
    }
}

/// Closing hides the window (true) or quits the application (false)
pub fn set_close_hides(hides: bool) {
    CLOSE_HIDES.with(|c| c.set(hides));
}

/// Quit through the normal close path
fn request_quit(hwnd: HWND) {
    QUIT_REQUESTED.with(|c| c.set(true));
    unsafe {
        let _ = PostMessageW(hwnd, WM_CLOSE, WPARAM(0), LPARAM(0));
    }
}

fn shift_down() -> bool {
    unsafe { GetKeyState(VK_SHIFT.0 as i32) < 0 }
}

fn paint(hwnd: HWND) {
    let (background, foreground) = WINDOW_COLORS.with(|c| c.get());
    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);

        let mut rect = RECT::default();
        let _ = GetClientRect(hwnd, &mut rect);

        let brush = CreateSolidBrush(COLORREF(background.to_colorref()));
        FillRect(hdc, &rect, brush);
        let _ = DeleteObject(brush);

        SetTextColor(hdc, COLORREF(foreground.to_colorref()));
        SetBkMode(hdc, TRANSPARENT);
        let mut text: Vec<u16> = APP_NAME.encode_utf16().collect();
        DrawTextW(
            hdc,
            &mut text,
            &mut rect,
            DT_CENTER | DT_VCENTER | DT_SINGLELINE,
        );

        let _ = EndPaint(hwnd, &ps);
    }
}

unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_PAINT => {
            paint(hwnd);
            LRESULT(0)
        }
        WM_ERASEBKGND => {
            // WM_PAINT fills the whole client area
            LRESULT(1)
        }
        WM_SYSCOMMAND if wparam.0 & 0xFFF0 == IDM_EXIT => {
            request_quit(hwnd);
            LRESULT(0)
        }
        WM_SYSKEYDOWN if is_exit_shortcut(wparam.0 as u32, lparam.0 & (1 << 29) != 0) => {
            request_quit(hwnd);
            LRESULT(0)
        }
        // Swallow the menu beep for Alt+X
        WM_SYSCHAR if is_exit_shortcut(wparam.0 as u32, true) => LRESULT(0),
        WM_CLOSE => {
            let quit = QUIT_REQUESTED.with(|c| c.get()) || shift_down();
            match close_action(CLOSE_HIDES.with(|c| c.get()), quit) {
                CloseAction::Hide => {
                    log::debug!("WM_CLOSE - hiding main window");
                    let _ = ShowWindow(hwnd, SW_HIDE);
                    let _ = PostMessageW(hwnd, WM_APP_VISIBILITY, WPARAM(0), LPARAM(0));
                }
                CloseAction::Quit => {
                    log::debug!("WM_CLOSE - destroying main window");
                    let _ = DestroyWindow(hwnd);
                }
            }
            LRESULT(0)
        }
        WM_DESTROY => {
            log::debug!("WM_DESTROY - posting quit message");
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

/// Register the window class (call once at startup)
pub fn register_window_class() -> Result<(), Error> {
    unsafe {
        let hinstance = GetModuleHandleW(None)?;

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(wnd_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: hinstance.into(),
            hIcon: HICON::default(),
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH::default(),
            lpszMenuName: PCWSTR::null(),
            lpszClassName: WINDOW_CLASS_NAME,
            hIconSm: HICON::default(),
        };

        if RegisterClassExW(&wc) == 0 {
            return Err(Error::from_win32());
        }

        Ok(())
    }
}

/// Unregister the window class (call at shutdown)
pub fn unregister_window_class() {
    unsafe {
        let _ = GetModuleHandleW(None).map(|h| {
            let _ = UnregisterClassW(WINDOW_CLASS_NAME, h);
        });
    }
}

/// Centered rectangle on the primary monitor's work area
fn calculate_window_rect(config: &WindowConfig, dpi: u32) -> RECT {
    unsafe {
        let monitor = MonitorFromWindow(HWND::default(), MONITOR_DEFAULTTOPRIMARY);
        let mut monitor_info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        let _ = GetMonitorInfoW(monitor, &mut monitor_info);

        let work = monitor_info.rcWork;
        let width = scale_px(config.width, dpi).min(work.right - work.left);
        let height = scale_px(config.height, dpi).min(work.bottom - work.top);
        let x = work.left + (work.right - work.left - width) / 2;
        let y = work.top + (work.bottom - work.top - height) / 2;

        RECT {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }
}

/// Create the main window, initially hidden
pub fn create_window(config: &WindowConfig) -> Result<HWND, Error> {
    unsafe {
        let hinstance = GetModuleHandleW(None)?;
        let rect = calculate_window_rect(config, system_dpi());
        let title = HSTRING::from(APP_NAME);

        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            WINDOW_CLASS_NAME,
            &title,
            WS_OVERLAPPEDWINDOW,
            rect.left,
            rect.top,
            rect.right - rect.left,
            rect.bottom - rect.top,
            None,
            None,
            hinstance,
            None,
        )?;

        add_exit_menu_item(hwnd);
        Ok(hwnd)
    }
}

/// Append Exit to the window's system menu
fn add_exit_menu_item(hwnd: HWND) {
    unsafe {
        let menu = GetSystemMenu(hwnd, false);
        if menu.is_invalid() {
            log::warn!("No system menu for {:?}", hwnd);
            return;
        }
        let _ = AppendMenuW(menu, MF_SEPARATOR, 0, PCWSTR::null());
        if let Err(e) = AppendMenuW(menu, MF_STRING, IDM_EXIT, &HSTRING::from(EXIT_LABEL)) {
            log::warn!("Failed to add Exit to the system menu: {}", e);
        }
    }
}

pub fn is_window_visible(hwnd: HWND) -> bool {
    unsafe { IsWindowVisible(hwnd).as_bool() }
}

pub fn show_window(hwnd: HWND) {
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = SetForegroundWindow(hwnd);
    }
}

pub fn hide_window(hwnd: HWND) {
    unsafe {
        let _ = ShowWindow(hwnd, SW_HIDE);
    }
}

/// Toggle window visibility, returns true if now visible
pub fn toggle_window(hwnd: HWND) -> bool {
    if is_window_visible(hwnd) {
        hide_window(hwnd);
        false
    } else {
        show_window(hwnd);
        true
    }
}

/// Request window repaint
pub fn invalidate_window(hwnd: HWND) {
    unsafe {
        let _ = InvalidateRect(hwnd, None, true);
    }
}

/// Handle to the native main window
#[derive(Debug)]
pub struct Win32Window {
    hwnd: HWND,
}

impl Win32Window {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }
}

impl Themeable for Win32Window {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Frame
    }

    fn set_colors(&mut self, background: Color, foreground: Color) -> Result<(), ThemeError> {
        if !unsafe { IsWindow(self.hwnd) }.as_bool() {
            return Err(ThemeError::Surface(format!("{:?} is not a window", self.hwnd)));
        }
        WINDOW_COLORS.with(|c| c.set((background, foreground)));
        Ok(())
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Themeable> {
        Vec::new()
    }

    fn refresh(&mut self) {
        invalidate_window(self.hwnd);
    }
}

impl MainWindow for Win32Window {
    fn show(&mut self) {
        show_window(self.hwnd);
    }
}
