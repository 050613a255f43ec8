//! In-memory virtual desktop
//!
//! Keeps a cursor, a clipboard and the set of held keys, and records every
//! call as an [`InputEvent`]. Backs the test suite and `--dry-run`.
//!
//! Modifiers pressed for a tap stay held until an explicit `key_up`.

use super::ActionExecutor;
use crate::core::error::{Result, SniperError};
use crate::core::types::{Modifier, MouseButton, Point, ScreenSize};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One call made against the executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum InputEvent {
    Move { to: Point },
    Tap { key: String, modifiers: Vec<Modifier> },
    KeyUp { key: String },
    Click { button: MouseButton },
    Scroll { dx: i32, dy: i32 },
    Type { text: String },
    SetClipboard { text: String },
}

#[derive(Debug)]
struct Desktop {
    cursor: Point,
    screen: ScreenSize,
    clipboard: String,
    held: Vec<String>,
    events: Vec<InputEvent>,
    pending_failure: Option<String>,
}

#[derive(Debug)]
pub struct RecordingExecutor {
    desktop: Mutex<Desktop>,
}

impl RecordingExecutor {
    /// A 1920x1080 desktop with the cursor in the middle
    pub fn new() -> Self {
        Self::with_screen(ScreenSize::new(1920, 1080), Point::new(960, 540))
    }

    pub fn with_screen(screen: ScreenSize, cursor: Point) -> Self {
        Self {
            desktop: Mutex::new(Desktop {
                cursor,
                screen,
                clipboard: String::new(),
                held: Vec::new(),
                events: Vec::new(),
                pending_failure: None,
            }),
        }
    }

    fn desktop(&self) -> MutexGuard<'_, Desktop> {
        self.desktop.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next mutating call fail with `message`
    pub fn fail_next(&self, message: impl Into<String>) {
        self.desktop().pending_failure = Some(message.into());
    }

    /// Move the cursor without recording an event, as a user grabbing the mouse would
    pub fn nudge_cursor(&self, to: Point) {
        self.desktop().cursor = to;
    }

    pub fn cursor(&self) -> Point {
        self.desktop().cursor
    }

    pub fn events(&self) -> Vec<InputEvent> {
        self.desktop().events.clone()
    }

    /// Drain recorded events
    pub fn take_events(&self) -> Vec<InputEvent> {
        std::mem::take(&mut self.desktop().events)
    }

    /// Keys currently held down
    pub fn held_keys(&self) -> Vec<String> {
        self.desktop().held.clone()
    }

    /// Text produced by taps and typed strings, in order
    ///
    /// Character taps contribute themselves; "space", "enter" and "tab" taps
    /// contribute their whitespace. Other named keys are ignored.
    pub fn typed(&self) -> String {
        let mut out = String::new();
        for event in &self.desktop().events {
            match event {
                InputEvent::Tap { key, .. } => match key.as_str() {
                    "space" => out.push(' '),
                    "enter" => out.push('\n'),
                    "tab" => out.push('\t'),
                    k if k.chars().count() == 1 => out.push_str(k),
                    _ => {}
                },
                InputEvent::Type { text } => out.push_str(text),
                _ => {}
            }
        }
        out
    }

    fn record(&self, event: InputEvent) -> Result<MutexGuard<'_, Desktop>> {
        let mut desktop = self.desktop();
        if let Some(message) = desktop.pending_failure.take() {
            return Err(SniperError::Input(message));
        }
        desktop.events.push(event);
        Ok(desktop)
    }
}

impl Default for RecordingExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionExecutor for RecordingExecutor {
    fn mouse_position(&self) -> Result<Point> {
        Ok(self.desktop().cursor)
    }

    fn screen_size(&self) -> Result<ScreenSize> {
        Ok(self.desktop().screen)
    }

    fn move_mouse(&self, to: Point) -> Result<()> {
        let mut desktop = self.record(InputEvent::Move { to })?;
        desktop.cursor = to;
        Ok(())
    }

    fn key_tap(&self, key: &str, modifiers: &[Modifier]) -> Result<()> {
        let mut desktop = self.record(InputEvent::Tap {
            key: key.to_string(),
            modifiers: modifiers.to_vec(),
        })?;
        for modifier in modifiers {
            let name = modifier.key_name();
            if !desktop.held.iter().any(|held| held == name) {
                desktop.held.push(name.to_string());
            }
        }
        Ok(())
    }

    fn key_up(&self, key: &str) -> Result<()> {
        let mut desktop = self.record(InputEvent::KeyUp {
            key: key.to_string(),
        })?;
        desktop.held.retain(|held| held != key);
        Ok(())
    }

    fn click(&self, button: MouseButton) -> Result<()> {
        self.record(InputEvent::Click { button })?;
        Ok(())
    }

    fn scroll(&self, dx: i32, dy: i32) -> Result<()> {
        self.record(InputEvent::Scroll { dx, dy })?;
        Ok(())
    }

    fn type_text(&self, text: &str) -> Result<()> {
        self.record(InputEvent::Type {
            text: text.to_string(),
        })?;
        Ok(())
    }

    fn clipboard_text(&self) -> Result<String> {
        Ok(self.desktop().clipboard.clone())
    }

    fn set_clipboard_text(&self, text: &str) -> Result<()> {
        let mut desktop = self.record(InputEvent::SetClipboard {
            text: text.to_string(),
        })?;
        desktop.clipboard = text.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_updates_cursor() {
        let exec = RecordingExecutor::new();
        exec.move_mouse(Point::new(10, 20)).unwrap();
        assert_eq!(exec.mouse_position().unwrap(), Point::new(10, 20));
        assert_eq!(exec.events(), vec![InputEvent::Move { to: Point::new(10, 20) }]);
    }

    #[test]
    fn test_fail_next_fails_once() {
        let exec = RecordingExecutor::new();
        exec.fail_next("boom");
        assert!(exec.click(MouseButton::Left).is_err());
        assert!(exec.click(MouseButton::Left).is_ok());
        assert_eq!(exec.events().len(), 1);
    }

    #[test]
    fn test_tap_modifiers_held_until_released() {
        let exec = RecordingExecutor::new();
        exec.key_tap("a", &[Modifier::Shift]).unwrap();
        exec.key_tap("b", &[Modifier::Shift]).unwrap();
        assert_eq!(exec.held_keys(), vec!["shift".to_string()]);
        exec.key_up("shift").unwrap();
        assert!(exec.held_keys().is_empty());
    }

    #[test]
    fn test_typed_collects_characters() {
        let exec = RecordingExecutor::new();
        exec.key_tap("h", &[]).unwrap();
        exec.key_tap("pageup", &[]).unwrap();
        exec.key_tap("space", &[]).unwrap();
        exec.type_text("ey").unwrap();
        assert_eq!(exec.typed(), "h ey");
    }
}
