//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    /// The model's art response had no content before the separator token.
    #[error("Model response contained no ASCII art before the separator")]
    EmptyArt,

    /// Non-success response from the ascii-oracle service itself, carrying
    /// the server-provided message verbatim.
    #[error("{0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, Error>;
