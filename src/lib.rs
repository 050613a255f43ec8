//! Sniper - voice command engine
//!
//! Turns recognized speech phrases into mouse and keyboard actions.

pub mod command;
pub mod core;
pub mod engine;
pub mod input;
pub mod keyboard;
pub mod mouse;
pub mod request;
pub mod text;

pub use crate::core::config::EngineConfig;
pub use crate::core::error::{Result, SniperError};
pub use crate::engine::Engine;
