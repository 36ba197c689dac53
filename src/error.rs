use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopLangsError {
    /// The listing endpoint answered with an error object, or the request
    /// itself failed.
    #[error("Error fetching repos: {0}")]
    Remote(String),

    #[error("Language byte counts do not fit in a 64-bit total")]
    Overflow,

    #[error("No language data found")]
    EmptyInput,

    #[error("Invalid minimum percentage {0}: must be a number >= 0")]
    InvalidThreshold(f64),

    #[error("Invalid snapshot {path}: {message}")]
    Snapshot { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl TopLangsError {
    /// Configuration problems exit with a different code than runtime failures.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::InvalidThreshold(_) | Self::TomlParse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TopLangsError>;
