//! Real desktop executor over `enigo` and `arboard`
//!
//! `Enigo` is not guaranteed to be `Send` on every backend, so it lives on a
//! dedicated thread and calls are shipped to it as closures.

use super::ActionExecutor;
use crate::core::error::{Result, SniperError};
use crate::core::types::{Modifier, MouseButton, Point, ScreenSize};
use arboard::Clipboard;
use enigo::{Axis, Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use std::sync::mpsc;
use std::sync::{Mutex, PoisonError};

type Job = Box<dyn FnOnce(&mut Enigo) + Send>;

pub struct NativeExecutor {
    jobs: Mutex<mpsc::Sender<Job>>,
}

impl NativeExecutor {
    pub fn new() -> Result<Self> {
        let (jobs, inbox) = mpsc::channel::<Job>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();

        std::thread::Builder::new()
            .name("sniper-input".into())
            .spawn(move || {
                let mut enigo = match Enigo::new(&Settings::default()) {
                    Ok(enigo) => {
                        let _ = ready_tx.send(Ok(()));
                        enigo
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(SniperError::Input(format!(
                            "Failed to initialize input backend: {}",
                            e
                        ))));
                        return;
                    }
                };
                for job in inbox {
                    job(&mut enigo);
                }
            })?;

        ready_rx
            .recv()
            .map_err(|_| SniperError::Input("Input thread exited during startup".into()))??;

        tracing::info!("Native input backend ready");
        Ok(Self {
            jobs: Mutex::new(jobs),
        })
    }

    /// Run `f` on the input thread and wait for its result
    fn with_enigo<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Enigo) -> Result<T> + Send + 'static,
    {
        let (reply_tx, reply_rx) = mpsc::channel();
        let job: Job = Box::new(move |enigo| {
            let _ = reply_tx.send(f(enigo));
        });
        self.jobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .send(job)
            .map_err(|_| SniperError::Input("Input thread is gone".into()))?;
        reply_rx
            .recv()
            .map_err(|_| SniperError::Input("Input thread dropped the request".into()))?
    }
}

fn input_err(e: impl std::fmt::Display) -> SniperError {
    SniperError::Input(e.to_string())
}

/// Translate a conventional key name into an enigo key
fn parse_key(name: &str) -> Result<Key> {
    let key = match name {
        "enter" | "return" => Key::Return,
        "tab" => Key::Tab,
        "space" => Key::Space,
        "backspace" => Key::Backspace,
        "delete" => Key::Delete,
        "escape" => Key::Escape,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        "up" => Key::UpArrow,
        "down" => Key::DownArrow,
        "left" => Key::LeftArrow,
        "right" => Key::RightArrow,
        "shift" => Key::Shift,
        "control" => Key::Control,
        "alt" => Key::Alt,
        "cmd" => Key::Meta,
        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Unicode(c),
                _ => return Err(SniperError::UnknownKey(other.to_string())),
            }
        }
    };
    Ok(key)
}

impl ActionExecutor for NativeExecutor {
    fn mouse_position(&self) -> Result<Point> {
        self.with_enigo(|enigo| {
            let (x, y) = enigo.location().map_err(input_err)?;
            Ok(Point::new(x, y))
        })
    }

    fn screen_size(&self) -> Result<ScreenSize> {
        self.with_enigo(|enigo| {
            let (width, height) = enigo.main_display().map_err(input_err)?;
            Ok(ScreenSize::new(width, height))
        })
    }

    fn move_mouse(&self, to: Point) -> Result<()> {
        self.with_enigo(move |enigo| {
            enigo
                .move_mouse(to.x, to.y, Coordinate::Abs)
                .map_err(input_err)
        })
    }

    fn key_tap(&self, key: &str, modifiers: &[Modifier]) -> Result<()> {
        let key = parse_key(key)?;
        let held = modifiers
            .iter()
            .map(|m| parse_key(m.key_name()))
            .collect::<Result<Vec<_>>>()?;
        self.with_enigo(move |enigo| {
            for modifier in &held {
                enigo.key(*modifier, Direction::Press).map_err(input_err)?;
            }
            let tapped = enigo.key(key, Direction::Click).map_err(input_err);
            for modifier in held.iter().rev() {
                enigo.key(*modifier, Direction::Release).map_err(input_err)?;
            }
            tapped
        })
    }

    fn key_up(&self, key: &str) -> Result<()> {
        let key = parse_key(key)?;
        self.with_enigo(move |enigo| enigo.key(key, Direction::Release).map_err(input_err))
    }

    fn click(&self, button: MouseButton) -> Result<()> {
        let button = match button {
            MouseButton::Left => Button::Left,
            MouseButton::Right => Button::Right,
            MouseButton::Middle => Button::Middle,
        };
        self.with_enigo(move |enigo| enigo.button(button, Direction::Click).map_err(input_err))
    }

    fn scroll(&self, dx: i32, dy: i32) -> Result<()> {
        self.with_enigo(move |enigo| {
            if dx != 0 {
                enigo.scroll(dx, Axis::Horizontal).map_err(input_err)?;
            }
            if dy != 0 {
                enigo.scroll(dy, Axis::Vertical).map_err(input_err)?;
            }
            Ok(())
        })
    }

    fn type_text(&self, text: &str) -> Result<()> {
        let text = text.to_string();
        self.with_enigo(move |enigo| enigo.text(&text).map_err(input_err))
    }

    fn clipboard_text(&self) -> Result<String> {
        let mut clipboard = Clipboard::new().map_err(input_err)?;
        // An empty or non-text clipboard reads as an empty string
        Ok(clipboard.get_text().unwrap_or_default())
    }

    fn set_clipboard_text(&self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().map_err(input_err)?;
        clipboard.set_text(text.to_string()).map_err(input_err)
    }
}
