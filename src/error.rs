//! Error types for the content poster

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Weather API error: {0}")]
    Weather(String),

    #[error("Gemini API error: {0}")]
    Gemini(String),

    #[error("Telegram API error: {0}")]
    Telegram(String),

    #[error("Telegram credentials are not configured")]
    ConfigRequired,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
