//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Absolute screen coordinate in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp into a `width` x `height` screen (0-indexed, inclusive of the last pixel)
    pub fn clamped(self, width: i32, height: i32) -> Self {
        Self {
            x: self.x.clamp(0, (width - 1).max(0)),
            y: self.y.clamp(0, (height - 1).max(0)),
        }
    }
}

/// Screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "up" | "north" => Some(Self::Up),
            "down" | "south" => Some(Self::Down),
            "left" | "west" => Some(Self::Left),
            "right" | "write" | "east" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Host operating system, used to map spoken modifiers to physical keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        match std::env::consts::OS {
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            _ => Self::Linux,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// Physical modifier key, after platform normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Shift,
    Control,
    Alt,
    Meta,
}

impl Modifier {
    /// Map a spoken modifier word to the key it means on `platform`.
    ///
    /// "command" is the platform's shortcut modifier: Meta on macOS and
    /// Control everywhere else, so "command s" saves on every host.
    pub fn resolve(spoken: &str, platform: Platform) -> Option<Self> {
        match spoken {
            "shift" => Some(Self::Shift),
            "control" | "ctrl" => Some(Self::Control),
            "alt" | "option" => Some(Self::Alt),
            "command" | "cmd" => Some(match platform {
                Platform::MacOs => Self::Meta,
                Platform::Linux | Platform::Windows => Self::Control,
            }),
            _ => None,
        }
    }

    /// Key name understood by the action executor
    pub fn key_name(&self) -> &'static str {
        match self {
            Self::Shift => "shift",
            Self::Control => "control",
            Self::Alt => "alt",
            Self::Meta => "cmd",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_clamped_to_screen() {
        assert_eq!(Point::new(-5, 20).clamped(100, 50), Point::new(0, 20));
        assert_eq!(Point::new(150, 80).clamped(100, 50), Point::new(99, 49));
    }

    #[test]
    fn test_command_modifier_follows_platform() {
        assert_eq!(
            Modifier::resolve("command", Platform::MacOs),
            Some(Modifier::Meta)
        );
        assert_eq!(
            Modifier::resolve("cmd", Platform::Linux),
            Some(Modifier::Control)
        );
        assert_eq!(
            Modifier::resolve("option", Platform::Windows),
            Some(Modifier::Alt)
        );
        assert_eq!(Modifier::resolve("banana", Platform::Linux), None);
    }

    #[test]
    fn test_direction_aliases() {
        assert_eq!(Direction::parse("write"), Some(Direction::Right));
        assert_eq!(Direction::parse("north"), Some(Direction::Up));
        assert_eq!(Direction::parse("sideways"), None);
    }
}
