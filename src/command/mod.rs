//! Command registry and dispatch
//!
//! Every spoken trigger resolves to a [`Command`]:
//! trigger word -> CommandRegistry -> Arc<dyn Command> -> effect chain -> action

pub mod catalog;
pub mod effect;
pub mod registry;

pub use effect::Effect;
pub use registry::CommandRegistry;

use crate::core::error::Result;
use crate::engine::Engine;

/// A voice command: a name, the words that trigger it, the effects wrapped
/// around it, and the action itself.
pub trait Command: Send + Sync {
    /// Stable identifier, used for the trigger export
    fn name(&self) -> &str;

    /// Lowercase words that invoke this command
    fn triggers(&self) -> &[&'static str];

    /// Effects wrapped around the action, outermost first
    fn effects(&self) -> &[Effect] {
        &[]
    }

    /// Perform the command. `trailing` is the normalized text after the
    /// trigger word in the current phrase.
    fn action(&self, engine: &Engine, trailing: &str) -> Result<()>;
}

/// Run `command` with its effect chain
pub fn invoke(command: &dyn Command, engine: &Engine, trailing: &str) -> Result<()> {
    tracing::debug!(command = command.name(), trailing, "invoke");
    effect::run_chain(engine, command.effects(), &|| command.action(engine, trailing))
}
