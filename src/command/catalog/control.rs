//! Flow control: halting, phrase replay and pauses

use crate::command::{Command, CommandRegistry, Effect};
use crate::core::error::Result;
use crate::engine::Engine;
use std::sync::Arc;

/// Name of the replay command. A phrase consisting of just this command is
/// never archived as the previous phrase.
pub const REPEAT: &str = "repeat";

/// "stop": drop queued modifiers, release them on the host, end the phrase
pub struct Stop;

impl Command for Stop {
    fn name(&self) -> &str {
        "stop"
    }

    fn triggers(&self) -> &[&'static str] {
        &["stop", "halt"]
    }

    fn action(&self, engine: &Engine, _trailing: &str) -> Result<()> {
        engine.keyboard().release_all()?;
        engine.halt();
        Ok(())
    }
}

/// "again": replay the previous phrase once
pub struct Repeat;

impl Command for Repeat {
    fn name(&self) -> &str {
        REPEAT
    }

    fn triggers(&self) -> &[&'static str] {
        &["repeat", "again"]
    }

    fn action(&self, engine: &Engine, _trailing: &str) -> Result<()> {
        engine.replay_previous()
    }
}

/// "wait": pause before the rest of the phrase
pub struct Wait;

impl Command for Wait {
    fn name(&self) -> &str {
        "wait"
    }

    fn triggers(&self) -> &[&'static str] {
        &["wait", "weight"]
    }

    fn effects(&self) -> &[Effect] {
        &[Effect::WaitAfter]
    }

    fn action(&self, _engine: &Engine, _trailing: &str) -> Result<()> {
        Ok(())
    }
}

pub fn register(registry: &mut CommandRegistry) {
    registry.register(Arc::new(Stop));
    registry.register(Arc::new(Repeat));
    registry.register(Arc::new(Wait));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineConfig;
    use crate::input::{InputEvent, RecordingExecutor};

    fn engine() -> (Arc<RecordingExecutor>, Engine, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let exec = Arc::new(RecordingExecutor::new());
        let config = EngineConfig {
            spot_file: Some(dir.path().join("spots.json")),
            ..EngineConfig::without_delays()
        };
        let engine = Engine::new(exec.clone(), config).unwrap();
        (exec, engine, dir)
    }

    #[test]
    fn test_stop_ends_phrase_and_clears_modifiers() {
        let (exec, engine, _dir) = engine();
        engine.run("shift stop alpha").unwrap();
        assert!(engine.keyboard().pending().is_empty());
        assert!(!exec
            .events()
            .iter()
            .any(|e| matches!(e, InputEvent::Tap { .. })));
    }

    #[test]
    fn test_wait_continues_phrase() {
        let (exec, engine, _dir) = engine();
        engine.run("wait alpha").unwrap();
        assert_eq!(exec.typed(), "a");
    }
}
