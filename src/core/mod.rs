pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::{Result, SniperError};
pub use types::{Direction, Modifier, MouseButton, Platform, Point, ScreenSize};
