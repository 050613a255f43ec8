//! Engine configuration with documented constants
//!
//! All pacing delays live here. They are real-time pacing for the host OS,
//! not retries: the OS needs a moment to register key-ups and clicks before
//! the next synthetic event arrives.

use crate::core::error::{Result, SniperError};
use crate::core::types::Platform;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name of the spot store inside the home directory
pub const DEFAULT_SPOT_FILE: &str = ".sniper_spots.json";

/// Configuration for the command engine
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === MOUSE ===
    /// Pixels moved per directional mouse command
    ///
    /// "left five" moves 5 * jump pixels.
    pub jump: i32,

    /// Pause after every synthetic mouse move (milliseconds)
    pub move_delay_ms: u64,

    /// Pause between the clicks of a double/triple click (milliseconds)
    pub click_spacing_ms: u64,

    /// Scroll amount sent per step
    ///
    /// A request to scroll 35 is sent as 4 steps, so the target application
    /// sees smooth scrolling instead of a single jump.
    pub scroll_chunk: u32,

    /// Pause between scroll steps (milliseconds)
    pub scroll_step_delay_ms: u64,

    /// Scroll amount used when "scroll <dir>" has no amount
    pub scroll_default_amount: u32,

    // === KEYBOARD ===
    /// Pause after releasing modifiers (milliseconds)
    pub post_release_delay_ms: u64,

    /// Pause before restoring the clipboard after a paste macro (milliseconds)
    pub clipboard_restore_delay_ms: u64,

    // === EFFECTS ===
    /// Duration of wait-before / wait-after effects (milliseconds)
    pub wait_ms: u64,

    /// Settle time between a focusing click and the action (milliseconds)
    pub click_settle_ms: u64,

    // === REPETITION ===
    /// Upper bound on a spoken repetition count
    ///
    /// A misheard phone number must not replay a phrase billions of times.
    pub max_repeat: u32,

    // === HOST ===
    /// Where named spots are persisted
    pub spot_file: Option<PathBuf>,

    /// Host platform (auto-detected when absent)
    pub platform: Platform,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            jump: 100,
            move_delay_ms: 1,
            click_spacing_ms: 100,
            scroll_chunk: 10,
            scroll_step_delay_ms: 15,
            scroll_default_amount: 50,
            post_release_delay_ms: 5,
            clipboard_restore_delay_ms: 200,
            wait_ms: 250,
            click_settle_ms: 50,
            max_repeat: 500,
            spot_file: None,
            platform: Platform::current(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Same defaults with every pacing delay set to zero
    pub fn without_delays() -> Self {
        Self {
            move_delay_ms: 0,
            click_spacing_ms: 0,
            scroll_step_delay_ms: 0,
            post_release_delay_ms: 0,
            clipboard_restore_delay_ms: 0,
            wait_ms: 0,
            click_settle_ms: 0,
            ..Self::default()
        }
    }

    /// Load a config from a TOML file, falling back to defaults for missing keys
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.jump <= 0 {
            return Err(SniperError::Config(format!(
                "jump ({}) must be positive",
                self.jump
            )));
        }
        if self.scroll_chunk == 0 {
            return Err(SniperError::Config("scroll_chunk must be non-zero".into()));
        }
        if self.max_repeat == 0 {
            return Err(SniperError::Config("max_repeat must be non-zero".into()));
        }
        Ok(())
    }

    /// Resolved spot file path: configured path, else `~/.sniper_spots.json`
    pub fn spot_path(&self) -> PathBuf {
        if let Some(path) = &self.spot_file {
            return path.clone();
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_SPOT_FILE)
    }

    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }

    pub fn click_spacing(&self) -> Duration {
        Duration::from_millis(self.click_spacing_ms)
    }

    pub fn scroll_step_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_step_delay_ms)
    }

    pub fn post_release_delay(&self) -> Duration {
        Duration::from_millis(self.post_release_delay_ms)
    }

    pub fn clipboard_restore_delay(&self) -> Duration {
        Duration::from_millis(self.clipboard_restore_delay_ms)
    }

    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }

    pub fn click_settle(&self) -> Duration {
        Duration::from_millis(self.click_settle_ms)
    }
}
