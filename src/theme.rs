//! Light/dark theming for the main window

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Surface rejected colors: {0}")]
    Surface(String),
}

/// RGB color (0-255 per channel)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert from a Win32 COLORREF (0x00BBGGRR)
    pub const fn from_colorref(value: u32) -> Self {
        Self {
            r: (value & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: ((value >> 16) & 0xFF) as u8,
        }
    }

    /// Convert to a Win32 COLORREF (0x00BBGGRR)
    pub const fn to_colorref(self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16)
    }
}

/// Dark mode preference
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    On,
    #[default]
    Off,
    /// Follow the operating system setting
    Auto,
}

/// Colors applied to a window tree
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    /// Background for text and list controls
    pub control_background: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: Color::rgb(32, 32, 32),
        foreground: Color::rgb(255, 255, 255),
        control_background: Color::rgb(45, 45, 45),
    };

    /// Light palette from the system window colors
    pub fn light(window: Color, window_text: Color) -> Self {
        Self {
            background: window,
            foreground: window_text,
            control_background: window,
        }
    }

    /// Light palette using the platform's window colors
    pub fn system_light() -> Self {
        let (window, text) = system_window_colors();
        Self::light(window, text)
    }
}

/// What kind of surface a themeable node is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Frames, panels, labels
    Frame,
    /// Text entries, lists and trees
    Control,
}

/// A node in a window tree that accepts colors
pub trait Themeable {
    fn kind(&self) -> SurfaceKind;

    fn set_colors(&mut self, background: Color, foreground: Color) -> Result<(), ThemeError>;

    fn children_mut(&mut self) -> Vec<&mut dyn Themeable>;

    /// Repaint after a color change
    fn refresh(&mut self);
}

/// Resolves the preference into a palette and paints window trees with it
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    mode: DarkMode,
}

impl Theme {
    pub fn new(mode: DarkMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DarkMode {
        self.mode
    }

    /// Whether dark colors are used, with `system_dark` consulted only for `Auto`
    pub fn use_dark<F: FnOnce() -> bool>(&self, system_dark: F) -> bool {
        match self.mode {
            DarkMode::On => true,
            DarkMode::Off => false,
            DarkMode::Auto => system_dark(),
        }
    }

    /// Palette for the current system state
    pub fn palette(&self) -> Palette {
        if self.use_dark(system_prefers_dark) {
            Palette::DARK
        } else {
            Palette::system_light()
        }
    }

    /// Apply the resolved palette to `root` and all its children.
    /// Only a failure on `root` itself is reported.
    pub fn apply(&self, root: &mut dyn Themeable) -> Result<Palette, ThemeError> {
        let palette = self.palette();
        apply_palette(root, &palette)?;
        log::info!("Applied {:?} theme", self.mode);
        Ok(palette)
    }
}

/// Paint a window tree. A child that rejects its colors is skipped
/// together with its own children.
pub fn apply_palette(surface: &mut dyn Themeable, palette: &Palette) -> Result<(), ThemeError> {
    let background = match surface.kind() {
        SurfaceKind::Frame => palette.background,
        SurfaceKind::Control => palette.control_background,
    };

    surface.set_colors(background, palette.foreground)?;

    for child in surface.children_mut() {
        if let Err(e) = apply_palette(child, palette) {
            log::debug!("Skipping surface: {}", e);
        }
    }

    surface.refresh();
    Ok(())
}

/// Detect whether the operating system is in dark mode. Any failure reads as light.
#[cfg(target_os = "windows")]
pub fn system_prefers_dark() -> bool {
    use windows::core::w;
    use windows::Win32::System::Registry::{RegGetValueW, HKEY_CURRENT_USER, RRF_RT_REG_DWORD};

    let mut value: u32 = 1;
    let mut size = std::mem::size_of::<u32>() as u32;
    let result = unsafe {
        RegGetValueW(
            HKEY_CURRENT_USER,
            w!("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize"),
            w!("AppsUseLightTheme"),
            RRF_RT_REG_DWORD,
            None,
            Some(&mut value as *mut u32 as *mut _),
            Some(&mut size),
        )
    };
    result.is_ok() && value == 0
}

/// Detect whether the operating system is in dark mode. Any failure reads as light.
#[cfg(target_os = "macos")]
pub fn system_prefers_dark() -> bool {
    std::process::Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().eq_ignore_ascii_case("dark"))
        .unwrap_or(false)
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn system_prefers_dark() -> bool {
    false
}

#[cfg(target_os = "windows")]
fn system_window_colors() -> (Color, Color) {
    use windows::Win32::Graphics::Gdi::{GetSysColor, COLOR_WINDOW, COLOR_WINDOWTEXT};

    unsafe {
        (
            Color::from_colorref(GetSysColor(COLOR_WINDOW)),
            Color::from_colorref(GetSysColor(COLOR_WINDOWTEXT)),
        )
    }
}

#[cfg(not(target_os = "windows"))]
fn system_window_colors() -> (Color, Color) {
    (Color::WHITE, Color::BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node {
        kind: SurfaceKind,
        reject: bool,
        colors: Option<(Color, Color)>,
        refreshed: u32,
        children: Vec<Node>,
    }

    impl Node {
        fn new(kind: SurfaceKind, children: Vec<Node>) -> Self {
            Self {
                kind,
                reject: false,
                colors: None,
                refreshed: 0,
                children,
            }
        }
    }

    impl Themeable for Node {
        fn kind(&self) -> SurfaceKind {
            self.kind
        }

        fn set_colors(&mut self, background: Color, foreground: Color) -> Result<(), ThemeError> {
            if self.reject {
                return Err(ThemeError::Surface("destroyed".into()));
            }
            self.colors = Some((background, foreground));
            Ok(())
        }

        fn children_mut(&mut self) -> Vec<&mut dyn Themeable> {
            self.children
                .iter_mut()
                .map(|c| c as &mut dyn Themeable)
                .collect()
        }

        fn refresh(&mut self) {
            self.refreshed += 1;
        }
    }

    #[test]
    fn test_mode_resolution() {
        assert!(Theme::new(DarkMode::On).use_dark(|| false));
        assert!(!Theme::new(DarkMode::Off).use_dark(|| true));
        assert!(Theme::new(DarkMode::Auto).use_dark(|| true));
        assert!(!Theme::new(DarkMode::Auto).use_dark(|| false));
    }

    #[test]
    fn test_explicit_modes_skip_detection() {
        let mut asked = false;
        Theme::new(DarkMode::On).use_dark(|| {
            asked = true;
            false
        });
        assert!(!asked);
    }

    #[test]
    fn test_apply_palette_recurses_and_uses_control_background() {
        let mut root = Node::new(
            SurfaceKind::Frame,
            vec![
                Node::new(SurfaceKind::Control, vec![]),
                Node::new(SurfaceKind::Frame, vec![Node::new(SurfaceKind::Control, vec![])]),
            ],
        );

        apply_palette(&mut root, &Palette::DARK).unwrap();

        let fg = Palette::DARK.foreground;
        assert_eq!(root.colors, Some((Palette::DARK.background, fg)));
        assert_eq!(root.children[0].colors, Some((Palette::DARK.control_background, fg)));
        assert_eq!(root.children[1].colors, Some((Palette::DARK.background, fg)));
        assert_eq!(
            root.children[1].children[0].colors,
            Some((Palette::DARK.control_background, fg))
        );
        assert_eq!(root.refreshed, 1);
        assert_eq!(root.children[1].children[0].refreshed, 1);
    }

    #[test]
    fn test_rejecting_surface_skips_its_subtree() {
        let mut broken = Node::new(SurfaceKind::Frame, vec![Node::new(SurfaceKind::Control, vec![])]);
        broken.reject = true;
        let mut root = Node::new(SurfaceKind::Frame, vec![broken, Node::new(SurfaceKind::Control, vec![])]);

        apply_palette(&mut root, &Palette::DARK).unwrap();

        assert!(root.children[0].colors.is_none());
        assert!(root.children[0].children[0].colors.is_none());
        assert!(root.children[1].colors.is_some());
        assert_eq!(root.refreshed, 1);
    }

    #[test]
    fn test_rejecting_root_is_an_error() {
        let mut root = Node::new(SurfaceKind::Frame, vec![Node::new(SurfaceKind::Control, vec![])]);
        root.reject = true;

        assert!(Theme::new(DarkMode::On).apply(&mut root).is_err());
        assert!(root.children[0].colors.is_none());
        assert_eq!(root.refreshed, 0);
    }

    #[test]
    fn test_theme_apply_on_uses_dark_palette() {
        let mut root = Node::new(SurfaceKind::Frame, vec![]);
        let palette = Theme::new(DarkMode::On).apply(&mut root).unwrap();
        assert_eq!(palette, Palette::DARK);
        assert_eq!(root.colors, Some((Palette::DARK.background, Palette::DARK.foreground)));
    }

    #[test]
    fn test_light_palette_uses_window_color_for_controls() {
        let p = Palette::light(Color::WHITE, Color::BLACK);
        assert_eq!(p.control_background, p.background);
        assert_eq!(p.foreground, Color::BLACK);
    }

    #[test]
    fn test_colorref_conversion() {
        let c = Color::from_colorref(0x00332211);
        assert_eq!(c, Color::rgb(0x11, 0x22, 0x33));
        assert_eq!(c.to_colorref(), 0x00332211);
    }

    #[test]
    fn test_dark_mode_serde_names() {
        #[derive(Deserialize)]
        struct Doc {
            mode: DarkMode,
        }
        let doc: Doc = toml::from_str("mode = \"auto\"").unwrap();
        assert_eq!(doc.mode, DarkMode::Auto);
    }
}
