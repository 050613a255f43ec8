//! Command engine
//!
//! A phrase runs in two steps:
//! 1. `parse`: normalize numbers, split into words, classify each word into a
//!    token, archive the old phrase as "previous"
//! 2. `execute`: walk the tokens in order until one asks to stop
//!
//! Number tokens repeat work: the last command of the current phrase when
//! there is one, otherwise the whole previous phrase.

pub mod state;
pub mod token;

pub use state::EngineState;
pub use token::{classify, Token, TokenKind};

use crate::command::catalog::control::REPEAT;
use crate::command::{Command, CommandRegistry};
use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::input::ActionExecutor;
use crate::keyboard::StickyKeyboard;
use crate::mouse::{Mouse, SpotStore};
use crate::text::NumberNormalizer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct Engine {
    config: EngineConfig,
    registry: CommandRegistry,
    normalizer: NumberNormalizer,
    keyboard: StickyKeyboard,
    mouse: Mouse,
    spots: SpotStore,

    current: Mutex<Option<Arc<EngineState>>>,
    previous: Mutex<Option<Arc<EngineState>>>,
    /// Cleared by kill-after effects and "stop"; re-armed by every parse
    operating: AtomicBool,
    /// Serializes whole phrases so concurrent callers never interleave
    phrase: Mutex<()>,
    /// Set while a previous phrase is being replayed; replays never nest
    replaying: AtomicBool,
}

/// Clears the replay flag when the replay that set it ends
struct ReplayGuard<'a>(&'a AtomicBool);

impl Drop for ReplayGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Engine {
    /// Engine with the built-in command set
    pub fn new(executor: Arc<dyn ActionExecutor>, config: EngineConfig) -> Result<Self> {
        Self::with_registry(executor, config, CommandRegistry::standard())
    }

    pub fn with_registry(
        executor: Arc<dyn ActionExecutor>,
        config: EngineConfig,
        registry: CommandRegistry,
    ) -> Result<Self> {
        config.validate()?;
        let spots = SpotStore::open(config.spot_path())?;
        let mouse = Mouse::new(executor.clone(), &config)?;
        let keyboard = StickyKeyboard::new(executor, &config);

        tracing::info!(
            triggers = registry.len(),
            spots = spots.len(),
            jump = config.jump,
            platform = ?config.platform,
            "engine ready"
        );

        Ok(Self {
            config,
            registry,
            normalizer: NumberNormalizer::new(),
            keyboard,
            mouse,
            spots,
            current: Mutex::new(None),
            previous: Mutex::new(None),
            operating: AtomicBool::new(true),
            phrase: Mutex::new(()),
            replaying: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn keyboard(&self) -> &StickyKeyboard {
        &self.keyboard
    }

    pub fn mouse(&self) -> &Mouse {
        &self.mouse
    }

    pub fn spots(&self) -> &SpotStore {
        &self.spots
    }

    pub fn is_operating(&self) -> bool {
        self.operating.load(Ordering::SeqCst)
    }

    /// Stop walking the current phrase after the token being handled
    pub fn halt(&self) {
        self.operating.store(false, Ordering::SeqCst);
    }

    fn rearm(&self) {
        self.operating.store(true, Ordering::SeqCst);
    }

    pub fn is_replaying(&self) -> bool {
        self.replaying.load(Ordering::SeqCst)
    }

    /// Mark a replay as started, or `None` if one is already running
    fn begin_replay(&self) -> Option<ReplayGuard<'_>> {
        if self.replaying.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(ReplayGuard(&self.replaying))
    }

    pub fn current_state(&self) -> Option<Arc<EngineState>> {
        lock(&self.current).clone()
    }

    pub fn previous_state(&self) -> Option<Arc<EngineState>> {
        lock(&self.previous).clone()
    }

    fn swap_current(&self, state: Option<Arc<EngineState>>) -> Option<Arc<EngineState>> {
        std::mem::replace(&mut *lock(&self.current), state)
    }

    /// Parse and execute one phrase
    pub fn run(&self, input: &str) -> Result<()> {
        let _phrase = lock(&self.phrase);
        self.parse(input);
        self.execute()
    }

    /// Tokenize `input` into a new current state.
    ///
    /// The old current state becomes the previous one, unless it was a bare
    /// replay request ("again"), so repeated replays keep targeting the same
    /// phrase.
    pub fn parse(&self, input: &str) -> Arc<EngineState> {
        let normalized = self.normalizer.normalize(&input.to_lowercase());
        let words: Vec<String> = normalized.split_whitespace().map(String::from).collect();
        let tokens: Vec<Token> = words
            .iter()
            .map(|word| classify(word, &self.registry, &self.spots, &self.normalizer))
            .collect();

        tracing::debug!(input, ?tokens, "parsed");

        let state = Arc::new(EngineState::new(normalized.trim(), words, tokens));
        let old = self.swap_current(Some(state.clone()));
        if let Some(old) = old {
            if !is_replay_request(&old) {
                *lock(&self.previous) = Some(old);
            }
        }
        self.rearm();
        state
    }

    /// Walk the current phrase. A missing or empty phrase is a no-op.
    pub fn execute(&self) -> Result<()> {
        match self.current_state() {
            Some(state) => self.walk(&state),
            None => Ok(()),
        }
    }

    fn walk(&self, state: &EngineState) -> Result<()> {
        for (index, token) in state.tokens().iter().enumerate() {
            if !self.is_operating() {
                return Ok(());
            }
            state.advance(index);
            if token.handle(self, state, index)? {
                tracing::debug!(index, literal = token.literal(), "phrase halted");
                return Ok(());
            }
        }
        self.rearm();
        Ok(())
    }

    /// Record `command` as the most recent command of the current phrase
    pub(crate) fn note_executed(&self, command: Arc<dyn Command>) {
        if let Some(state) = self.current_state() {
            state.set_last_command(command);
        }
    }

    /// Handle a number token with value `count`.
    ///
    /// With a last command in the current phrase, run it `count - 1` more
    /// times (the first run already happened). Otherwise replay the previous
    /// phrase `count` times. Either way the last command is consumed.
    pub(crate) fn repeat(&self, count: i64) -> Result<()> {
        let Some(current) = self.current_state() else {
            return Ok(());
        };

        let limit = i64::from(self.config.max_repeat);
        if count > limit {
            tracing::warn!(count, limit, "repetition count capped");
        }
        let count = count.min(limit);

        if let Some(last) = current.take_last_command() {
            tracing::debug!(command = last.name(), count, "repeating last command");
            // Repeats run the bare action: effects fired with the first run
            for _ in 1..count {
                last.action(self, "")?;
            }
            return Ok(());
        }

        let Some(previous) = self.previous_state() else {
            tracing::debug!(count, "number with nothing to repeat");
            return Ok(());
        };
        let Some(_replay) = self.begin_replay() else {
            tracing::debug!(count, "number inside a replay");
            return Ok(());
        };

        tracing::debug!(phrase = previous.raw_input(), count, "replaying previous phrase");
        for _ in 0..count {
            self.replay_pass(&previous, &current)?;
            // A halting command ends its own pass, not the replay
            self.rearm();
        }
        current.take_last_command();
        Ok(())
    }

    /// One walk over `previous` on behalf of a number in `current`.
    ///
    /// Numbers inside `previous` only count when they have a command of this
    /// pass to repeat; otherwise they would replay `previous` recursively.
    fn replay_pass(&self, previous: &EngineState, current: &EngineState) -> Result<()> {
        current.take_last_command();
        for (index, token) in previous.tokens().iter().enumerate() {
            if token.kind() == TokenKind::Number && !current.has_last_command() {
                continue;
            }
            if token.handle(self, previous, index)? {
                break;
            }
        }
        Ok(())
    }

    /// Run the previous phrase again as a fresh copy, then restore the
    /// current phrase. No-op without a previous phrase, or when called from
    /// inside another replay.
    pub fn replay_previous(&self) -> Result<()> {
        let Some(previous) = self.previous_state() else {
            tracing::debug!("nothing to replay");
            return Ok(());
        };
        let Some(_replay) = self.begin_replay() else {
            tracing::debug!(phrase = previous.raw_input(), "repeat inside a replay ignored");
            return Ok(());
        };

        let replay = Arc::new(previous.replay_copy());
        let original = self.swap_current(Some(replay.clone()));
        let result = self.walk(&replay);
        self.swap_current(original);
        self.rearm();
        result
    }
}

fn is_replay_request(state: &EngineState) -> bool {
    matches!(
        state.tokens(),
        [Token::Command { command, .. }] if command.name() == REPEAT
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SniperError;
    use crate::core::types::{Point, ScreenSize};
    use crate::input::{InputEvent, RecordingExecutor};

    fn engine() -> (Arc<RecordingExecutor>, Engine, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let exec = Arc::new(RecordingExecutor::with_screen(
            ScreenSize::new(2000, 1000),
            Point::new(1000, 500),
        ));
        let config = EngineConfig {
            jump: 10,
            spot_file: Some(dir.path().join("spots.json")),
            ..EngineConfig::without_delays()
        };
        let engine = Engine::new(exec.clone(), config).unwrap();
        (exec, engine, dir)
    }

    fn moves(exec: &RecordingExecutor) -> usize {
        exec.events()
            .iter()
            .filter(|e| matches!(e, InputEvent::Move { .. }))
            .count()
    }

    #[test]
    fn test_parse_classifies_words() {
        let (_, engine, _dir) = engine();
        let state = engine.parse("Left five banana");
        let kinds: Vec<TokenKind> = state.tokens().iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Command, TokenKind::Number, TokenKind::Raw]
        );
        assert_eq!(state.raw_input(), "left 5 banana");
    }

    #[test]
    fn test_parse_joins_compound_numbers() {
        let (_, engine, _dir) = engine();
        let state = engine.parse("left twenty two");
        assert_eq!(state.words(), &["left".to_string(), "22".to_string()]);
    }

    #[test]
    fn test_parse_archives_previous() {
        let (_, engine, _dir) = engine();
        engine.parse("left");
        engine.parse("right");
        assert_eq!(engine.previous_state().unwrap().raw_input(), "left");
        assert_eq!(engine.current_state().unwrap().raw_input(), "right");
    }

    #[test]
    fn test_replay_request_is_not_archived() {
        let (_, engine, _dir) = engine();
        engine.parse("left");
        engine.parse("again");
        engine.parse("again");
        assert_eq!(engine.previous_state().unwrap().raw_input(), "left");
    }

    #[test]
    fn test_execute_without_parse_is_noop() {
        let (exec, engine, _dir) = engine();
        engine.execute().unwrap();
        assert!(exec.events().is_empty());
    }

    #[test]
    fn test_empty_phrase_is_noop() {
        let (exec, engine, _dir) = engine();
        engine.run("   ").unwrap();
        assert!(exec.events().is_empty());
        assert!(engine.current_state().unwrap().is_empty());
    }

    #[test]
    fn test_intra_phrase_repetition() {
        let (exec, engine, _dir) = engine();
        engine.run("left five").unwrap();
        assert_eq!(exec.cursor(), Point::new(950, 500));
        assert_eq!(moves(&exec), 5);
        assert!(engine.current_state().unwrap().last_command().is_none());
    }

    #[test]
    fn test_inter_phrase_replay() {
        let (exec, engine, _dir) = engine();
        engine.run("left").unwrap();
        engine.run("five").unwrap();
        assert_eq!(moves(&exec), 6);
        assert_eq!(exec.cursor(), Point::new(940, 500));
    }

    #[test]
    fn test_replayed_phrase_repeats_its_own_numbers() {
        let (exec, engine, _dir) = engine();
        engine.run("up two").unwrap();
        engine.run("three").unwrap();
        // 2 from the phrase, then 3 passes of 2
        assert_eq!(moves(&exec), 8);
    }

    #[test]
    fn test_number_without_context_is_noop() {
        let (exec, engine, _dir) = engine();
        engine.run("five").unwrap();
        assert!(exec.events().is_empty());
    }

    #[test]
    fn test_repetition_is_capped() {
        let (exec, engine, _dir) = engine();
        engine.run("left 18005550199").unwrap();
        assert_eq!(moves(&exec), engine.config().max_repeat as usize);
    }

    #[test]
    fn test_again_replays_previous() {
        let (exec, engine, _dir) = engine();
        engine.run("left up").unwrap();
        engine.run("again").unwrap();
        engine.run("again").unwrap();
        assert_eq!(moves(&exec), 6);
        assert_eq!(exec.cursor(), Point::new(970, 470));
    }

    #[test]
    fn test_again_with_nothing_before() {
        let (exec, engine, _dir) = engine();
        engine.run("again").unwrap();
        assert!(exec.events().is_empty());
    }

    #[test]
    fn test_halt_leaves_rest_of_phrase() {
        let (exec, engine, _dir) = engine();
        engine.run("type hello left").unwrap();
        assert_eq!(exec.typed(), "hello left");
        assert_eq!(moves(&exec), 0);

        let state = engine.current_state().unwrap();
        assert_eq!(state.handled().len(), 1);
        assert_eq!(state.remaining().len(), 2);
        assert_eq!(state.remaining_text(), "hello left");
    }

    #[test]
    fn test_parse_rearms_after_halt() {
        let (exec, engine, _dir) = engine();
        engine.run("type x").unwrap();
        assert!(!engine.is_operating());
        engine.run("left").unwrap();
        assert!(engine.is_operating());
        assert_eq!(moves(&exec), 1);
    }

    #[test]
    fn test_action_failure_propagates() {
        let (exec, engine, _dir) = engine();
        exec.fail_next("display gone");
        let err = engine.run("left right").unwrap_err();
        assert!(matches!(err, SniperError::Input(_)));
        // the failing token is recorded as handled, the rest is untouched
        let state = engine.current_state().unwrap();
        assert_eq!(state.handled().len(), 1);
        assert_eq!(moves(&exec), 0);
    }

    #[test]
    fn test_modifier_spans_only_next_key() {
        let (exec, engine, _dir) = engine();
        engine.run("shift alpha bravo").unwrap();
        let taps: Vec<(String, usize)> = exec
            .events()
            .into_iter()
            .filter_map(|e| match e {
                InputEvent::Tap { key, modifiers } => Some((key, modifiers.len())),
                _ => None,
            })
            .collect();
        assert_eq!(taps, vec![("a".to_string(), 1), ("b".to_string(), 0)]);
    }

    #[test]
    fn test_again_skips_nested_again() {
        let (exec, engine, _dir) = engine();
        engine.run("up").unwrap();
        engine.run("left again").unwrap();
        assert_eq!(moves(&exec), 3);
        // replays "left again"; its own "again" does not replay again
        engine.run("again").unwrap();
        assert_eq!(moves(&exec), 4);
        assert_eq!(exec.cursor(), Point::new(980, 480));
        assert!(!engine.is_replaying());
    }

    #[test]
    fn test_count_skips_nested_again() {
        let (exec, engine, _dir) = engine();
        engine.run("up").unwrap();
        engine.run("left again").unwrap();
        engine.run("three").unwrap();
        assert_eq!(moves(&exec), 6);
        assert_eq!(exec.cursor(), Point::new(960, 480));
        assert!(!engine.is_replaying());
    }

    #[test]
    fn test_replay_flag_clears_on_error() {
        let (exec, engine, _dir) = engine();
        engine.run("left").unwrap();
        exec.fail_next("display gone");
        assert!(engine.run("again").is_err());
        assert!(!engine.is_replaying());
        engine.run("again").unwrap();
        assert_eq!(moves(&exec), 2);
    }

    #[test]
    fn test_number_after_again_repeats_again() {
        let (exec, engine, _dir) = engine();
        engine.run("left").unwrap();
        engine.run("again two").unwrap();
        // "again" replays once, "two" runs "again" once more
        assert_eq!(moves(&exec), 3);
    }
}
