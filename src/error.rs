//! Error types for bionic-reading

use thiserror::Error;

/// Result type alias for bionic-reading operations
pub type Result<T> = std::result::Result<T, BionicError>;

/// Host-side error types
///
/// The emphasis engine itself is total and never fails; these cover
/// reading documents, reading settings and driving the terminal.
#[derive(Error, Debug)]
pub enum BionicError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    Message(String),
}
