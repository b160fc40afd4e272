//! Error types for configuration and preference storage.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Preference database error
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config values are inconsistent
    #[error("configuration error: {0}")]
    Config(String),

    /// Stored theme is neither `light` nor `dark`
    #[error("invalid theme value: {0}")]
    InvalidTheme(String),
}

pub type Result<T> = std::result::Result<T, Error>;
