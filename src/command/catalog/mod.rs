//! Built-in command set

pub mod control;
pub mod keys;
pub mod mouse;
pub mod text;

use super::CommandRegistry;

/// Register every built-in command, keyboard first
pub fn register_all(registry: &mut CommandRegistry) {
    keys::register(registry);
    mouse::register(registry);
    text::register(registry);
    control::register(registry);
}
