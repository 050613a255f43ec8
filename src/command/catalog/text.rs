//! Dictation commands. Each one consumes the rest of the phrase as its text.

use crate::command::{Command, CommandRegistry, Effect};
use crate::core::error::Result;
use crate::engine::Engine;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Camel,
    Pascal,
    Snake,
    Kebab,
    Lower,
    Upper,
    /// Typed as spoken
    Verbatim,
    /// Capitalized, closed with the terminator and a space
    Sentence(char),
}

#[derive(Debug, Clone, Copy)]
pub struct Dictate {
    name: &'static str,
    triggers: &'static [&'static str],
    style: TextStyle,
}

impl Command for Dictate {
    fn name(&self) -> &str {
        self.name
    }

    fn triggers(&self) -> &[&'static str] {
        self.triggers
    }

    fn effects(&self) -> &[Effect] {
        &[Effect::KillAfter]
    }

    fn action(&self, engine: &Engine, trailing: &str) -> Result<()> {
        let keyboard = engine.keyboard();
        match self.style {
            TextStyle::Camel => keyboard.camel_case(trailing),
            TextStyle::Pascal => keyboard.pascal_case(trailing),
            TextStyle::Snake => keyboard.snake_case(trailing),
            TextStyle::Kebab => keyboard.kebab_case(trailing),
            TextStyle::Lower => keyboard.type_str(&trailing.to_lowercase()),
            TextStyle::Upper => keyboard.type_str(&trailing.to_uppercase()),
            TextStyle::Verbatim => keyboard.type_text(trailing),
            TextStyle::Sentence(terminator) => keyboard.sentence(trailing, terminator),
        }
    }
}

/// "number <n>": type the digits of an integer
pub struct TypeNumber;

impl Command for TypeNumber {
    fn name(&self) -> &str {
        "number"
    }

    fn triggers(&self) -> &[&'static str] {
        &["number"]
    }

    fn effects(&self) -> &[Effect] {
        &[Effect::KillAfter]
    }

    fn action(&self, engine: &Engine, trailing: &str) -> Result<()> {
        match trailing.split_whitespace().next().map(str::parse::<i64>) {
            Some(Ok(n)) => engine.keyboard().type_int(n),
            _ => {
                tracing::debug!(trailing, "number without an integer");
                Ok(())
            }
        }
    }
}

/// "insert <text>": click to focus, then paste the text through the clipboard
pub struct Insert;

impl Command for Insert {
    fn name(&self) -> &str {
        "insert"
    }

    fn triggers(&self) -> &[&'static str] {
        &["insert"]
    }

    fn effects(&self) -> &[Effect] {
        &[Effect::KillAfter, Effect::ClickBefore]
    }

    fn action(&self, engine: &Engine, trailing: &str) -> Result<()> {
        if trailing.is_empty() {
            return Ok(());
        }
        engine.keyboard().paste_text(trailing)
    }
}

const STYLES: &[Dictate] = &[
    Dictate {
        name: "camel",
        triggers: &["camel"],
        style: TextStyle::Camel,
    },
    Dictate {
        name: "pascal",
        triggers: &["pascal"],
        style: TextStyle::Pascal,
    },
    Dictate {
        name: "snake",
        triggers: &["snake"],
        style: TextStyle::Snake,
    },
    Dictate {
        name: "kebab",
        triggers: &["kebab"],
        style: TextStyle::Kebab,
    },
    Dictate {
        name: "lower",
        triggers: &["lower"],
        style: TextStyle::Lower,
    },
    Dictate {
        name: "upper",
        triggers: &["upper"],
        style: TextStyle::Upper,
    },
    Dictate {
        name: "type",
        triggers: &["type"],
        style: TextStyle::Verbatim,
    },
    Dictate {
        name: "say",
        triggers: &["say"],
        style: TextStyle::Sentence('.'),
    },
    Dictate {
        name: "question",
        triggers: &["question"],
        style: TextStyle::Sentence('?'),
    },
    Dictate {
        name: "exclaim",
        triggers: &["exclaim"],
        style: TextStyle::Sentence('!'),
    },
];

pub fn register(registry: &mut CommandRegistry) {
    for style in STYLES {
        registry.register(Arc::new(*style));
    }
    registry.register(Arc::new(TypeNumber));
    registry.register(Arc::new(Insert));
}
