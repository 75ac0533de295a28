//! Errors raised while decoding wire documents.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Structural failures that stop a document from being decoded at all.
///
/// Everything below the document level is decoded leniently, so these only
/// fire for broken JSON or a document that does not say what it is.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document has no \"type\" tag")]
    MissingKind,

    #[error("unknown document type: {kind}")]
    UnknownKind { kind: String },
}
