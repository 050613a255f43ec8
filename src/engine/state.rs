//! Per-phrase execution state

use super::token::Token;
use crate::command::Command;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Progress {
    /// Token indices already walked, in order
    handled: Vec<usize>,
    /// Token indices not yet walked
    remaining: VecDeque<usize>,
    /// Words after the token most recently walked
    remaining_text: String,
    /// Most recent command executed while this state was current
    last_command: Option<Arc<dyn Command>>,
}

/// One parsed phrase plus the progress of walking it.
///
/// The words and tokens are immutable and shared between copies; only the
/// progress is per-instance.
pub struct EngineState {
    raw_input: String,
    words: Arc<[String]>,
    tokens: Arc<[Token]>,
    progress: Mutex<Progress>,
}

impl EngineState {
    /// `words[i]` is the normalized word that produced `tokens[i]`
    pub fn new(raw_input: impl Into<String>, words: Vec<String>, tokens: Vec<Token>) -> Self {
        debug_assert_eq!(words.len(), tokens.len());
        Self::from_parts(raw_input.into(), words.into(), tokens.into())
    }

    fn from_parts(raw_input: String, words: Arc<[String]>, tokens: Arc<[Token]>) -> Self {
        let progress = Progress {
            remaining: (0..tokens.len()).collect(),
            remaining_text: words.join(" "),
            ..Progress::default()
        };
        Self {
            raw_input,
            words,
            tokens,
            progress: Mutex::new(progress),
        }
    }

    /// Same phrase, fresh progress
    pub fn replay_copy(&self) -> Self {
        Self::from_parts(
            self.raw_input.clone(),
            Arc::clone(&self.words),
            Arc::clone(&self.tokens),
        )
    }

    fn progress(&self) -> MutexGuard<'_, Progress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The phrase as received, lowercased
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Words after `index`, space-joined
    pub fn trailing_text(&self, index: usize) -> String {
        self.words.get(index + 1..).unwrap_or_default().join(" ")
    }

    /// Mark the token at `index` as walked
    pub fn advance(&self, index: usize) {
        let trailing = self.trailing_text(index);
        let mut progress = self.progress();
        progress.remaining_text = trailing;
        progress.handled.push(index);
        if progress.remaining.front() == Some(&index) {
            progress.remaining.pop_front();
        } else {
            progress.remaining.retain(|&i| i != index);
        }
    }

    pub fn handled(&self) -> Vec<Token> {
        let progress = self.progress();
        progress.handled.iter().map(|&i| self.tokens[i].clone()).collect()
    }

    pub fn remaining(&self) -> Vec<Token> {
        let progress = self.progress();
        progress.remaining.iter().map(|&i| self.tokens[i].clone()).collect()
    }

    pub fn remaining_text(&self) -> String {
        self.progress().remaining_text.clone()
    }

    pub fn last_command(&self) -> Option<Arc<dyn Command>> {
        self.progress().last_command.clone()
    }

    pub fn has_last_command(&self) -> bool {
        self.progress().last_command.is_some()
    }

    pub fn set_last_command(&self, command: Arc<dyn Command>) {
        self.progress().last_command = Some(command);
    }

    pub fn take_last_command(&self) -> Option<Arc<dyn Command>> {
        self.progress().last_command.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(words: &[&str]) -> EngineState {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let tokens = words
            .iter()
            .map(|w| Token::Raw { literal: w.clone() })
            .collect();
        EngineState::new(words.join(" "), words, tokens)
    }

    #[test]
    fn test_fresh_state_has_everything_remaining() {
        let s = state(&["type", "hello", "world"]);
        assert_eq!(s.remaining().len(), 3);
        assert!(s.handled().is_empty());
        assert_eq!(s.remaining_text(), "type hello world");
    }

    #[test]
    fn test_advance_moves_tokens() {
        let s = state(&["type", "hello", "world"]);
        s.advance(0);
        assert_eq!(s.handled().len(), 1);
        assert_eq!(s.remaining().len(), 2);
        assert_eq!(s.remaining_text(), "hello world");

        s.advance(1);
        s.advance(2);
        assert!(s.remaining().is_empty());
        assert_eq!(s.remaining_text(), "");
    }

    #[test]
    fn test_trailing_text_past_end_is_empty() {
        let s = state(&["left"]);
        assert_eq!(s.trailing_text(0), "");
        assert_eq!(s.trailing_text(5), "");
    }

    #[test]
    fn test_replay_copy_resets_progress() {
        let s = state(&["left", "five"]);
        s.advance(0);
        let copy = s.replay_copy();
        assert_eq!(copy.remaining().len(), 2);
        assert!(copy.handled().is_empty());
        assert!(Arc::ptr_eq(&s.tokens, &copy.tokens));
    }
}
