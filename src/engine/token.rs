//! Tokens: one classified word of a phrase

use super::state::EngineState;
use super::Engine;
use crate::command::catalog::mouse::GoToSpot;
use crate::command::{invoke, Command, CommandRegistry};
use crate::core::error::Result;
use crate::mouse::SpotStore;
use crate::text::NumberNormalizer;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Raw,
    Command,
    Number,
}

#[derive(Clone)]
pub enum Token {
    /// A word with no meaning of its own; only ever consumed as trailing text
    Raw { literal: String },
    /// A word that resolved to a command
    Command {
        literal: String,
        command: Arc<dyn Command>,
    },
    /// An integer: a repetition count
    Number { literal: String, value: i64 },
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Raw { literal } => write!(f, "Raw({:?})", literal),
            Token::Command { literal, command } => {
                write!(f, "Command({:?} -> {})", literal, command.name())
            }
            Token::Number { value, .. } => write!(f, "Number({})", value),
        }
    }
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Raw { .. } => TokenKind::Raw,
            Token::Command { .. } => TokenKind::Command,
            Token::Number { .. } => TokenKind::Number,
        }
    }

    pub fn literal(&self) -> &str {
        match self {
            Token::Raw { literal }
            | Token::Command { literal, .. }
            | Token::Number { literal, .. } => literal,
        }
    }

    pub fn command(&self) -> Option<&Arc<dyn Command>> {
        match self {
            Token::Command { command, .. } => Some(command),
            _ => None,
        }
    }

    /// Act on this token, which sits at `index` in `source`.
    ///
    /// Returns `true` when the walk over the phrase should stop.
    pub fn handle(&self, engine: &Engine, source: &EngineState, index: usize) -> Result<bool> {
        match self {
            Token::Raw { .. } => Ok(false),
            Token::Command { command, .. } => {
                let trailing = source.trailing_text(index);
                invoke(command.as_ref(), engine, &trailing)?;
                engine.note_executed(command.clone());
                Ok(!engine.is_operating())
            }
            Token::Number { value, .. } => {
                engine.repeat(*value)?;
                Ok(!engine.is_operating())
            }
        }
    }
}

/// Classify one word: command trigger, then spot name, then integer, else raw
pub fn classify(
    word: &str,
    registry: &CommandRegistry,
    spots: &SpotStore,
    normalizer: &NumberNormalizer,
) -> Token {
    let literal = normalizer.normalize(&word.to_lowercase());

    if let Some(command) = registry.get(&literal) {
        return Token::Command { literal, command };
    }
    if let Some(point) = spots.get(&literal) {
        let command: Arc<dyn Command> = Arc::new(GoToSpot::new(literal.clone(), point));
        return Token::Command { literal, command };
    }
    if let Ok(value) = literal.parse::<i64>() {
        return Token::Number { literal, value };
    }
    Token::Raw { literal }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Point;

    fn fixtures() -> (CommandRegistry, SpotStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let spots = SpotStore::open(dir.path().join("spots.json")).unwrap();
        (CommandRegistry::standard(), spots, dir)
    }

    #[test]
    fn test_classify_categories() {
        let (registry, spots, _dir) = fixtures();
        let normalizer = NumberNormalizer::new();

        let left = classify("Left", &registry, &spots, &normalizer);
        assert_eq!(left.kind(), TokenKind::Command);
        assert_eq!(left.literal(), "left");
        assert_eq!(left.command().unwrap().name(), "left");

        let five = classify("five", &registry, &spots, &normalizer);
        assert!(matches!(five, Token::Number { value: 5, .. }));

        let raw = classify("banana", &registry, &spots, &normalizer);
        assert_eq!(raw.kind(), TokenKind::Raw);
    }

    #[test]
    fn test_spot_names_become_commands() {
        let (registry, spots, _dir) = fixtures();
        spots.set("inbox", Point::new(3, 4)).unwrap();

        let token = classify("inbox", &registry, &spots, &NumberNormalizer::new());
        assert_eq!(token.kind(), TokenKind::Command);
        assert_eq!(token.command().unwrap().name(), "inbox");
    }

    #[test]
    fn test_commands_shadow_spots() {
        let (registry, spots, _dir) = fixtures();
        spots.set("left", Point::new(3, 4)).unwrap();

        let token = classify("left", &registry, &spots, &NumberNormalizer::new());
        assert_eq!(token.command().unwrap().name(), "left");
    }

    #[test]
    fn test_negative_integer_is_number() {
        let (registry, spots, _dir) = fixtures();
        let token = classify("-3", &registry, &spots, &NumberNormalizer::new());
        assert!(matches!(token, Token::Number { value: -3, .. }));
    }
}
