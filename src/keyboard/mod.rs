//! Sticky-modifier keyboard
//!
//! Modifier commands ("shift", "command") do not press anything. They queue
//! the modifier, and the next key tap consumes the whole queue: the key is
//! tapped with the modifiers held, every modifier is then explicitly
//! released, and the queue is cleared.

use crate::core::config::EngineConfig;
use crate::core::error::{Result, SniperError};
use crate::core::types::{Modifier, Platform};
use crate::input::ActionExecutor;
use crate::text::case;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub struct StickyKeyboard {
    executor: Arc<dyn ActionExecutor>,
    /// Ordered, de-duplicated modifiers waiting for the next tap
    pending: Mutex<Vec<Modifier>>,
    platform: Platform,
    post_release_delay: Duration,
    clipboard_restore_delay: Duration,
}

/// Executor key name for a single character
fn char_key(c: char) -> String {
    match c {
        ' ' => "space".to_string(),
        '\n' => "enter".to_string(),
        '\t' => "tab".to_string(),
        other => other.to_string(),
    }
}

impl StickyKeyboard {
    pub fn new(executor: Arc<dyn ActionExecutor>, config: &EngineConfig) -> Self {
        Self {
            executor,
            pending: Mutex::new(Vec::new()),
            platform: config.platform,
            post_release_delay: config.post_release_delay(),
            clipboard_restore_delay: config.clipboard_restore_delay(),
        }
    }

    fn pending_guard(&self) -> MutexGuard<'_, Vec<Modifier>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a spoken modifier for the next key tap.
    ///
    /// Queuing the same physical modifier twice is a no-op.
    pub fn queue_modifier(&self, spoken: &str) -> Result<Modifier> {
        let modifier = Modifier::resolve(spoken, self.platform)
            .ok_or_else(|| SniperError::UnknownKey(spoken.to_string()))?;
        let mut pending = self.pending_guard();
        if !pending.contains(&modifier) {
            pending.push(modifier);
            tracing::debug!(modifier = modifier.key_name(), "modifier queued");
        }
        Ok(modifier)
    }

    /// Modifiers that the next tap will carry
    pub fn pending(&self) -> Vec<Modifier> {
        self.pending_guard().clone()
    }

    /// Tap `key` with all queued modifiers, then release and clear them
    pub fn tap(&self, key: &str) -> Result<()> {
        let mut pending = self.pending_guard();
        let modifiers = std::mem::take(&mut *pending);

        if modifiers.is_empty() {
            tracing::debug!(key, "tap");
        } else {
            tracing::debug!(key, ?modifiers, "tap with modifiers");
        }

        let tapped = self.executor.key_tap(key, &modifiers);

        // Release every modifier individually even if the tap failed, so
        // nothing is left logically held on the host.
        let mut released = Ok(());
        for modifier in &modifiers {
            if let Err(e) = self.executor.key_up(modifier.key_name()) {
                tracing::warn!(modifier = modifier.key_name(), "release failed: {}", e);
                if released.is_ok() {
                    released = Err(e);
                }
            }
        }
        drop(pending);

        if !self.post_release_delay.is_zero() {
            std::thread::sleep(self.post_release_delay);
        }
        tapped.and(released)
    }

    /// Hold `modifiers` (spoken names) and tap `key`
    pub fn chord(&self, modifiers: &[&str], key: &str) -> Result<()> {
        for modifier in modifiers {
            self.queue_modifier(modifier)?;
        }
        self.tap(key)
    }

    /// Drop the queue and force every modifier key up
    pub fn release_all(&self) -> Result<()> {
        self.pending_guard().clear();
        for modifier in [Modifier::Shift, Modifier::Control, Modifier::Alt, Modifier::Meta] {
            self.executor.key_up(modifier.key_name())?;
        }
        Ok(())
    }

    /// Type the decimal digits of `n`.
    ///
    /// Queued modifiers only reach the first digit, since the first tap
    /// consumes them.
    pub fn type_int(&self, n: i64) -> Result<()> {
        self.type_str(&n.to_string())
    }

    /// Type `text` one character at a time
    pub fn type_str(&self, text: &str) -> Result<()> {
        for c in text.chars() {
            self.tap(&char_key(c))?;
        }
        Ok(())
    }

    /// Type `text` in one executor call. Queued modifiers fall back to
    /// per-character taps so the first character still carries them.
    pub fn type_text(&self, text: &str) -> Result<()> {
        let pending = self.pending_guard();
        if !pending.is_empty() {
            drop(pending);
            return self.type_str(text);
        }
        tracing::debug!(chars = text.chars().count(), "type text");
        self.executor.type_text(text)
    }

    pub fn camel_case(&self, phrase: &str) -> Result<()> {
        self.type_str(&case::camel_case(phrase))
    }

    pub fn pascal_case(&self, phrase: &str) -> Result<()> {
        self.type_str(&case::pascal_case(phrase))
    }

    pub fn snake_case(&self, phrase: &str) -> Result<()> {
        self.type_str(&case::snake_case(phrase))
    }

    pub fn kebab_case(&self, phrase: &str) -> Result<()> {
        self.type_str(&case::kebab_case(phrase))
    }

    /// Type `phrase` as a capitalized sentence ending in `terminator`
    pub fn sentence(&self, phrase: &str, terminator: char) -> Result<()> {
        match case::sentence(phrase, terminator) {
            Some(text) => self.type_str(&text),
            None => Ok(()),
        }
    }

    /// Paste `text` through the clipboard, then restore what was there
    pub fn paste_text(&self, text: &str) -> Result<()> {
        let original = self.executor.clipboard_text()?;
        self.executor.set_clipboard_text(text)?;
        self.chord(&["command"], "v")?;
        if !self.clipboard_restore_delay.is_zero() {
            std::thread::sleep(self.clipboard_restore_delay);
        }
        self.executor.set_clipboard_text(&original)
    }
}
