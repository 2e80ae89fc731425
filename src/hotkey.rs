//! Global show/hide hotkey parsing
//!
//! Preferences store hotkeys as `+`-joined names such as `control+alt+g`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HotkeyError {
    #[error("Hotkey is empty")]
    Empty,
    #[error("Unknown key: {0}")]
    UnknownKey(String),
    #[error("Hotkey has no key, only modifiers: {0}")]
    MissingKey(String),
    #[error("Hotkey has more than one key: {0}")]
    MultipleKeys(String),
}

/// Keyboard modifiers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub win: bool,
}

impl Modifiers {
    pub fn is_empty(&self) -> bool {
        !self.ctrl && !self.alt && !self.shift && !self.win
    }
}

/// Non-modifier key of a hotkey
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `A`..`Z`, stored uppercase
    Letter(char),
    /// `0`..`9`
    Digit(u8),
    /// `F1`..`F12`
    Function(u8),
    Space,
    Enter,
    Tab,
    Escape,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
}

impl Key {
    fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        let mut chars = upper.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return match c {
                'A'..='Z' => Some(Key::Letter(c)),
                '0'..='9' => Some(Key::Digit(c as u8 - b'0')),
                _ => None,
            };
        }

        if let Some(n) = upper.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
            return (1..=12).contains(&n).then_some(Key::Function(n));
        }

        match upper.as_str() {
            "SPACE" => Some(Key::Space),
            "ENTER" | "RETURN" => Some(Key::Enter),
            "TAB" => Some(Key::Tab),
            "ESCAPE" | "ESC" => Some(Key::Escape),
            "HOME" => Some(Key::Home),
            "END" => Some(Key::End),
            "PAGEUP" | "PGUP" => Some(Key::PageUp),
            "PAGEDOWN" | "PGDN" => Some(Key::PageDown),
            "INSERT" | "INS" => Some(Key::Insert),
            "DELETE" | "DEL" => Some(Key::Delete),
            _ => None,
        }
    }

    /// Win32 virtual key code
    pub fn virtual_key(&self) -> u32 {
        match *self {
            Key::Letter(c) => c as u32,
            Key::Digit(d) => 0x30 + d as u32,
            Key::Function(n) => 0x70 + (n as u32 - 1),
            Key::Space => 0x20,
            Key::Enter => 0x0D,
            Key::Tab => 0x09,
            Key::Escape => 0x1B,
            Key::Home => 0x24,
            Key::End => 0x23,
            Key::PageUp => 0x21,
            Key::PageDown => 0x22,
            Key::Insert => 0x2D,
            Key::Delete => 0x2E,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Letter(c) => write!(f, "{}", c.to_ascii_lowercase()),
            Key::Digit(d) => write!(f, "{}", d),
            Key::Function(n) => write!(f, "f{}", n),
            other => write!(f, "{}", format!("{:?}", other).to_ascii_lowercase()),
        }
    }
}

/// Modifier + key combination
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub modifiers: Modifiers,
    pub key: Key,
}

impl FromStr for Hotkey {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(HotkeyError::Empty);
        }

        let mut modifiers = Modifiers::default();
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "control" | "ctrl" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "win" | "super" | "windows" => modifiers.win = true,
                _ => {
                    let parsed =
                        Key::from_name(part).ok_or_else(|| HotkeyError::UnknownKey(part.to_string()))?;
                    if key.replace(parsed).is_some() {
                        return Err(HotkeyError::MultipleKeys(s.to_string()));
                    }
                }
            }
        }

        let key = key.ok_or_else(|| HotkeyError::MissingKey(s.to_string()))?;
        Ok(Hotkey { modifiers, key })
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            write!(f, "control+")?;
        }
        if self.modifiers.alt {
            write!(f, "alt+")?;
        }
        if self.modifiers.shift {
            write!(f, "shift+")?;
        }
        if self.modifiers.win {
            write!(f, "win+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Parse the `global_hotkey` preference. An empty value disables the hotkey.
pub fn from_preference(value: &str) -> Result<Option<Hotkey>, HotkeyError> {
    match value.parse() {
        Ok(hotkey) => Ok(Some(hotkey)),
        Err(HotkeyError::Empty) => Ok(None),
        Err(e) => Err(e),
    }
}
