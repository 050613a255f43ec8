//! Mouse commands: stepping, clicking, scrolling and named spots

use crate::command::{Command, CommandRegistry, Effect};
use crate::core::error::Result;
use crate::core::types::{Direction, Point};
use crate::engine::Engine;
use std::sync::Arc;

/// Move the cursor one jump
#[derive(Debug, Clone, Copy)]
pub struct MouseStep {
    name: &'static str,
    triggers: &'static [&'static str],
    direction: Direction,
}

impl Command for MouseStep {
    fn name(&self) -> &str {
        self.name
    }

    fn triggers(&self) -> &[&'static str] {
        self.triggers
    }

    fn action(&self, engine: &Engine, _trailing: &str) -> Result<()> {
        engine.mouse().step(self.direction)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
    Triple,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Click {
    name: &'static str,
    triggers: &'static [&'static str],
    kind: ClickKind,
}

impl Command for Click {
    fn name(&self) -> &str {
        self.name
    }

    fn triggers(&self) -> &[&'static str] {
        self.triggers
    }

    fn action(&self, engine: &Engine, _trailing: &str) -> Result<()> {
        let mouse = engine.mouse();
        match self.kind {
            ClickKind::Single => mouse.click(),
            ClickKind::Double => mouse.double_click(),
            ClickKind::Triple => mouse.triple_click(),
            ClickKind::Right => mouse.right_click(),
        }
    }
}

/// "scroll <direction> [amount]"
pub struct Scroll;

impl Command for Scroll {
    fn name(&self) -> &str {
        "scroll"
    }

    fn triggers(&self) -> &[&'static str] {
        &["scroll"]
    }

    fn effects(&self) -> &[Effect] {
        &[Effect::KillAfter]
    }

    fn action(&self, engine: &Engine, trailing: &str) -> Result<()> {
        let mut words = trailing.split_whitespace();
        let Some(direction) = words.next().and_then(Direction::parse) else {
            tracing::debug!(trailing, "scroll without a direction");
            return Ok(());
        };
        let amount = words
            .next()
            .and_then(|w| w.parse::<u32>().ok())
            .unwrap_or(engine.config().scroll_default_amount);
        engine.mouse().scroll(direction, amount)
    }
}

/// "jump <pixels>": change the step size
pub struct Jump;

impl Command for Jump {
    fn name(&self) -> &str {
        "jump"
    }

    fn triggers(&self) -> &[&'static str] {
        &["jump"]
    }

    fn effects(&self) -> &[Effect] {
        &[Effect::KillAfter]
    }

    fn action(&self, engine: &Engine, trailing: &str) -> Result<()> {
        match trailing.split_whitespace().next().map(str::parse::<i32>) {
            Some(Ok(pixels)) => engine.mouse().set_jump(pixels),
            _ => {
                tracing::debug!(trailing, "jump without a pixel count");
                Ok(())
            }
        }
    }
}

/// Move to a stored spot. Built on the fly when a word names a spot.
#[derive(Debug, Clone)]
pub struct GoToSpot {
    spot: String,
    point: Point,
}

impl GoToSpot {
    pub fn new(spot: impl Into<String>, point: Point) -> Self {
        Self {
            spot: spot.into(),
            point,
        }
    }
}

impl Command for GoToSpot {
    fn name(&self) -> &str {
        &self.spot
    }

    fn triggers(&self) -> &[&'static str] {
        &[]
    }

    fn action(&self, engine: &Engine, _trailing: &str) -> Result<()> {
        engine.mouse().move_to(self.point)
    }
}

/// First word of the trailing text. A spot is recalled by saying its name
/// alone, and each word is classified on its own.
fn spot_name(trailing: &str) -> Option<&str> {
    let mut words = trailing.split_whitespace();
    let name = words.next()?;
    if words.next().is_some() {
        tracing::debug!(name, trailing, "extra words after spot name ignored");
    }
    Some(name)
}

/// "remember <name>": store the live cursor position
pub struct Remember;

impl Command for Remember {
    fn name(&self) -> &str {
        "remember"
    }

    fn triggers(&self) -> &[&'static str] {
        &["remember"]
    }

    fn effects(&self) -> &[Effect] {
        &[Effect::KillAfter]
    }

    fn action(&self, engine: &Engine, trailing: &str) -> Result<()> {
        let Some(name) = spot_name(trailing) else {
            tracing::debug!("remember without a name");
            return Ok(());
        };
        if engine.registry().contains(name) {
            tracing::warn!(name, "spot name shadowed by a command; recall it with attack");
        }
        let position = engine.mouse().sync()?;
        engine.spots().set(name, position)
    }
}

/// "forget <name>" or "forget all"
pub struct Forget;

impl Command for Forget {
    fn name(&self) -> &str {
        "forget"
    }

    fn triggers(&self) -> &[&'static str] {
        &["forget"]
    }

    fn effects(&self) -> &[Effect] {
        &[Effect::KillAfter]
    }

    fn action(&self, engine: &Engine, trailing: &str) -> Result<()> {
        match spot_name(trailing) {
            None => Ok(()),
            Some("all") => engine.spots().clear(),
            Some(name) => {
                if !engine.spots().delete(name)? {
                    tracing::debug!(name, "no such spot");
                }
                Ok(())
            }
        }
    }
}

/// "attack <name>": move to a stored spot and click it
pub struct Attack;

impl Command for Attack {
    fn name(&self) -> &str {
        "attack"
    }

    fn triggers(&self) -> &[&'static str] {
        &["attack"]
    }

    fn effects(&self) -> &[Effect] {
        &[Effect::KillAfter]
    }

    fn action(&self, engine: &Engine, trailing: &str) -> Result<()> {
        let Some(point) = spot_name(trailing).and_then(|name| engine.spots().get(name)) else {
            tracing::debug!(trailing, "no such spot");
            return Ok(());
        };
        engine.mouse().move_to(point)?;
        let settle = engine.config().click_settle();
        if !settle.is_zero() {
            std::thread::sleep(settle);
        }
        engine.mouse().click()
    }
}

const STEPS: &[MouseStep] = &[
    MouseStep {
        name: "left",
        triggers: &["left"],
        direction: Direction::Left,
    },
    MouseStep {
        name: "right",
        triggers: &["right", "write"],
        direction: Direction::Right,
    },
    MouseStep {
        name: "up",
        triggers: &["up"],
        direction: Direction::Up,
    },
    MouseStep {
        name: "down",
        triggers: &["down"],
        direction: Direction::Down,
    },
];

const CLICKS: &[Click] = &[
    Click {
        name: "click",
        triggers: &["click"],
        kind: ClickKind::Single,
    },
    Click {
        name: "double-click",
        triggers: &["double", "dclick"],
        kind: ClickKind::Double,
    },
    Click {
        name: "triple-click",
        triggers: &["triple", "tclick"],
        kind: ClickKind::Triple,
    },
    Click {
        name: "right-click",
        triggers: &["clack", "rclick"],
        kind: ClickKind::Right,
    },
];

pub fn register(registry: &mut CommandRegistry) {
    for step in STEPS {
        registry.register(Arc::new(*step));
    }
    for click in CLICKS {
        registry.register(Arc::new(*click));
    }
    registry.register(Arc::new(Scroll));
    registry.register(Arc::new(Jump));
    registry.register(Arc::new(Remember));
    registry.register(Arc::new(Forget));
    registry.register(Arc::new(Attack));
}
