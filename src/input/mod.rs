//! Input injection boundary
//!
//! The engine never talks to the OS directly. Everything it does lands through
//! an [`ActionExecutor`]: the in-memory [`RecordingExecutor`] for tests and dry
//! runs, or the `native` feature's executor for a real desktop.

#[cfg(feature = "native")]
pub mod native;
pub mod recording;

#[cfg(feature = "native")]
pub use native::NativeExecutor;
pub use recording::{InputEvent, RecordingExecutor};

use crate::core::error::Result;
use crate::core::types::{Modifier, MouseButton, Point, ScreenSize};

/// Low-level input capability consumed by the engine
///
/// Key names follow the conventional lowercase spelling: single characters
/// (`"a"`, `"/"`), named keys (`"enter"`, `"pageup"`, `"f5"`) and modifier
/// names as produced by [`Modifier::key_name`].
pub trait ActionExecutor: Send + Sync {
    /// Current absolute cursor position
    fn mouse_position(&self) -> Result<Point>;

    /// Size of the primary display
    fn screen_size(&self) -> Result<ScreenSize>;

    /// Move the cursor to an absolute position
    fn move_mouse(&self, to: Point) -> Result<()>;

    /// Press and release `key` while holding `modifiers`
    fn key_tap(&self, key: &str, modifiers: &[Modifier]) -> Result<()>;

    /// Release `key`; modifiers are always released explicitly after a tap
    fn key_up(&self, key: &str) -> Result<()>;

    fn click(&self, button: MouseButton) -> Result<()>;

    /// Scroll by whole wheel notches; positive `dy` scrolls down, positive `dx` right
    fn scroll(&self, dx: i32, dy: i32) -> Result<()>;

    /// Type a literal string
    fn type_text(&self, text: &str) -> Result<()>;

    fn clipboard_text(&self) -> Result<String>;

    fn set_clipboard_text(&self, text: &str) -> Result<()>;
}
