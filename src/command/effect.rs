//! Effect middleware
//!
//! Effects `[e0, e1, .., en]` around action `A` compose as
//! `e0(next = e1(next = .. en(next = A)))`. Each effect decides whether and
//! when to call `next`.

use crate::core::error::Result;
use crate::engine::Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Pause for the configured wait before the action
    WaitBefore,
    /// Pause for the configured wait after the action succeeds
    WaitAfter,
    /// Left click (to focus whatever is under the cursor) before the action
    ClickBefore,
    /// Left click after the action succeeds
    ClickAfter,
    /// Halt the current phrase once the action succeeds
    KillAfter,
}

fn pause(duration: std::time::Duration) {
    if !duration.is_zero() {
        std::thread::sleep(duration);
    }
}

impl Effect {
    pub fn apply(&self, engine: &Engine, next: &dyn Fn() -> Result<()>) -> Result<()> {
        match self {
            Effect::WaitBefore => {
                pause(engine.config().wait());
                next()
            }
            Effect::WaitAfter => {
                next()?;
                pause(engine.config().wait());
                Ok(())
            }
            Effect::ClickBefore => {
                engine.mouse().click()?;
                pause(engine.config().click_settle());
                next()
            }
            Effect::ClickAfter => {
                next()?;
                pause(engine.config().click_settle());
                engine.mouse().click()
            }
            Effect::KillAfter => {
                next()?;
                engine.halt();
                Ok(())
            }
        }
    }
}

/// Fold `effects` right-to-left around `action` and run the result
pub fn run_chain(
    engine: &Engine,
    effects: &[Effect],
    action: &dyn Fn() -> Result<()>,
) -> Result<()> {
    if effects.is_empty() {
        return action();
    }

    let mut next: Box<dyn Fn() -> Result<()> + '_> = Box::new(action);
    for effect in effects.iter().rev() {
        let inner = next;
        next = Box::new(move || effect.apply(engine, &*inner));
    }
    next()
}
