//! Keyboard commands: single keys, modifier queueing and shortcut chords

use crate::command::{Command, CommandRegistry};
use crate::core::error::Result;
use crate::engine::Engine;
use std::sync::Arc;

/// Tap one key (with whatever modifiers are queued)
#[derive(Debug, Clone, Copy)]
pub struct KeyTap {
    name: &'static str,
    triggers: &'static [&'static str],
    key: &'static str,
}

impl KeyTap {
    pub const fn new(
        name: &'static str,
        triggers: &'static [&'static str],
        key: &'static str,
    ) -> Self {
        Self { name, triggers, key }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }
}

impl Command for KeyTap {
    fn name(&self) -> &str {
        self.name
    }

    fn triggers(&self) -> &[&'static str] {
        self.triggers
    }

    fn action(&self, engine: &Engine, _trailing: &str) -> Result<()> {
        engine.keyboard().tap(self.key)
    }
}

/// Queue a modifier for the next key tap
#[derive(Debug, Clone, Copy)]
pub struct ModifierKey {
    name: &'static str,
    triggers: &'static [&'static str],
}

impl Command for ModifierKey {
    fn name(&self) -> &str {
        self.name
    }

    fn triggers(&self) -> &[&'static str] {
        self.triggers
    }

    fn action(&self, engine: &Engine, _trailing: &str) -> Result<()> {
        engine.keyboard().queue_modifier(self.name)?;
        Ok(())
    }
}

/// A fixed shortcut such as command+c
#[derive(Debug, Clone, Copy)]
pub struct Chord {
    name: &'static str,
    triggers: &'static [&'static str],
    modifiers: &'static [&'static str],
    key: &'static str,
}

impl Command for Chord {
    fn name(&self) -> &str {
        self.name
    }

    fn triggers(&self) -> &[&'static str] {
        self.triggers
    }

    fn action(&self, engine: &Engine, _trailing: &str) -> Result<()> {
        engine.keyboard().chord(self.modifiers, self.key)
    }
}

const EDITING: &[KeyTap] = &[
    KeyTap::new("enter", &["enter", "return"], "enter"),
    KeyTap::new("tab", &["tab"], "tab"),
    KeyTap::new("space", &["space"], "space"),
    KeyTap::new("backspace", &["back", "backspace"], "backspace"),
    KeyTap::new("delete", &["delete"], "delete"),
    KeyTap::new("escape", &["escape"], "escape"),
    KeyTap::new("home", &["home"], "home"),
    KeyTap::new("end", &["end"], "end"),
    KeyTap::new("pageup", &["pageup"], "pageup"),
    KeyTap::new("pagedown", &["pagedown"], "pagedown"),
];

/// Arrow keys use compass words so "left"/"right" stay free for the mouse
const ARROWS: &[KeyTap] = &[
    KeyTap::new("arrow-up", &["north"], "up"),
    KeyTap::new("arrow-down", &["south"], "down"),
    KeyTap::new("arrow-right", &["east"], "right"),
    KeyTap::new("arrow-left", &["west"], "left"),
];

const SYMBOLS: &[KeyTap] = &[
    KeyTap::new("period", &["period", "dot"], "."),
    KeyTap::new("comma", &["comma"], ","),
    KeyTap::new("slash", &["slash"], "/"),
    KeyTap::new("backslash", &["backslash"], "\\"),
    KeyTap::new("semicolon", &["semi", "semicolon"], ";"),
    KeyTap::new("quote", &["quote"], "'"),
    KeyTap::new("bracket", &["bracket"], "["),
    KeyTap::new("closing", &["closing"], "]"),
    KeyTap::new("dash", &["dash", "minus"], "-"),
    KeyTap::new("equals", &["equals"], "="),
    KeyTap::new("backtick", &["tick", "backtick"], "`"),
];

const LETTERS: &[KeyTap] = &[
    KeyTap::new("alpha", &["alpha", "alfa"], "a"),
    KeyTap::new("bravo", &["bravo"], "b"),
    KeyTap::new("charlie", &["charlie"], "c"),
    KeyTap::new("delta", &["delta"], "d"),
    KeyTap::new("echo", &["echo"], "e"),
    KeyTap::new("foxtrot", &["foxtrot"], "f"),
    KeyTap::new("golf", &["golf"], "g"),
    KeyTap::new("hotel", &["hotel"], "h"),
    KeyTap::new("india", &["india"], "i"),
    KeyTap::new("juliet", &["juliet", "juliett"], "j"),
    KeyTap::new("kilo", &["kilo"], "k"),
    KeyTap::new("lima", &["lima"], "l"),
    KeyTap::new("mike", &["mike"], "m"),
    KeyTap::new("november", &["november"], "n"),
    KeyTap::new("oscar", &["oscar"], "o"),
    KeyTap::new("papa", &["papa"], "p"),
    KeyTap::new("quebec", &["quebec"], "q"),
    KeyTap::new("romeo", &["romeo"], "r"),
    KeyTap::new("sierra", &["sierra"], "s"),
    KeyTap::new("tango", &["tango"], "t"),
    KeyTap::new("uniform", &["uniform"], "u"),
    KeyTap::new("victor", &["victor"], "v"),
    KeyTap::new("whiskey", &["whiskey", "whisky"], "w"),
    KeyTap::new("xray", &["xray", "x-ray"], "x"),
    KeyTap::new("yankee", &["yankee"], "y"),
    KeyTap::new("zulu", &["zulu"], "z"),
];

/// Digit keys. Plain number words are rewritten to digits before lookup and
/// become repetition counts, so the keys use radiotelephony words instead.
const DIGITS: &[KeyTap] = &[
    KeyTap::new("digit-0", &["nadazero"], "0"),
    KeyTap::new("digit-1", &["unaone", "wun"], "1"),
    KeyTap::new("digit-2", &["bissotwo"], "2"),
    KeyTap::new("digit-3", &["terrathree", "tree"], "3"),
    KeyTap::new("digit-4", &["kartefour", "fower"], "4"),
    KeyTap::new("digit-5", &["pantafive", "fife"], "5"),
    KeyTap::new("digit-6", &["soxisix"], "6"),
    KeyTap::new("digit-7", &["setteseven"], "7"),
    KeyTap::new("digit-8", &["oktoeight", "ait"], "8"),
    KeyTap::new("digit-9", &["novenine", "niner"], "9"),
];

const FUNCTION_KEYS: &[KeyTap] = &[
    KeyTap::new("f1", &["f1"], "f1"),
    KeyTap::new("f2", &["f2"], "f2"),
    KeyTap::new("f3", &["f3"], "f3"),
    KeyTap::new("f4", &["f4"], "f4"),
    KeyTap::new("f5", &["f5"], "f5"),
    KeyTap::new("f6", &["f6"], "f6"),
    KeyTap::new("f7", &["f7"], "f7"),
    KeyTap::new("f8", &["f8"], "f8"),
    KeyTap::new("f9", &["f9"], "f9"),
    KeyTap::new("f10", &["f10"], "f10"),
    KeyTap::new("f11", &["f11"], "f11"),
    KeyTap::new("f12", &["f12"], "f12"),
];

/// Modifier names double as the spoken name handed to the keyboard
const MODIFIERS: &[ModifierKey] = &[
    ModifierKey {
        name: "shift",
        triggers: &["shift"],
    },
    ModifierKey {
        name: "control",
        triggers: &["control", "ctrl"],
    },
    ModifierKey {
        name: "alt",
        triggers: &["alt", "option"],
    },
    ModifierKey {
        name: "command",
        triggers: &["command", "cmd"],
    },
];

/// "command" is cmd on macOS and control elsewhere
const CHORDS: &[Chord] = &[
    Chord {
        name: "copy",
        triggers: &["copy"],
        modifiers: &["command"],
        key: "c",
    },
    Chord {
        name: "paste",
        triggers: &["paste"],
        modifiers: &["command"],
        key: "v",
    },
    Chord {
        name: "cut",
        triggers: &["cut"],
        modifiers: &["command"],
        key: "x",
    },
    Chord {
        name: "undo",
        triggers: &["undo"],
        modifiers: &["command"],
        key: "z",
    },
    Chord {
        name: "redo",
        triggers: &["redo"],
        modifiers: &["command", "shift"],
        key: "z",
    },
    Chord {
        name: "save",
        triggers: &["save"],
        modifiers: &["command"],
        key: "s",
    },
    Chord {
        name: "find",
        triggers: &["find"],
        modifiers: &["command"],
        key: "f",
    },
    Chord {
        name: "select-all",
        triggers: &["all"],
        modifiers: &["command"],
        key: "a",
    },
];

pub fn register(registry: &mut CommandRegistry) {
    for group in [EDITING, ARROWS, SYMBOLS, LETTERS, DIGITS, FUNCTION_KEYS] {
        for key in group {
            registry.register(Arc::new(*key));
        }
    }
    for modifier in MODIFIERS {
        registry.register(Arc::new(*modifier));
    }
    for chord in CHORDS {
        registry.register(Arc::new(*chord));
    }
}
