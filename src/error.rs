//! Error types shared by the store, the services and the CLI.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Store unreachable or the connection URL is unusable.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Submission input rejected before anything was written.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Submission {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn validation(msg: &str) -> Self {
        Error::Validation(msg.to_string())
    }
}
