use thiserror::Error;

#[derive(Error, Debug)]
pub enum SniperError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SniperError>;
