//! Error types for parsing and configuration.

use std::path::PathBuf;

use glk_protocol::ProtocolError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

/// A document that could not be decoded at all.
///
/// Once a document is decoded, parsing it cannot fail.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to decode update document: {0}")]
    Protocol(#[from] ProtocolError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid parser config: {0}")]
    Toml(#[from] toml::de::Error),
}
