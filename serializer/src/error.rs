//! Error types for serializer operations

use thiserror::Error;

/// Error type for serializer operations
#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "truncated input in frame {index}{}: {field} needs {needed} bytes, {remaining} left",
        .id.as_ref().map(|id| format!(" ({id})")).unwrap_or_default()
    )]
    TruncatedInput {
        index: usize,
        // Unknown until the identifier has been read
        id: Option<String>,
        field: &'static str,
        needed: u64,
        remaining: usize,
    },
    #[error("unknown type in frame {index}: {id:?}")]
    UnknownType { index: usize, id: String },
    #[error("type mismatch in frame {index}: expected {expected}, found {found}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("failed to decode frame {index} ({id}): {source}")]
    Decode {
        index: usize,
        id: String,
        #[source]
        source: Box<Error>,
    },
    #[error("failed to serialize value {index} ({id}): {source}")]
    Serialize {
        index: usize,
        id: &'static str,
        #[source]
        source: Box<Error>,
    },
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("invalid data in {0}: {1}")]
    InvalidData(&'static str, String), // context, message
    #[error("payload of frame {index} ({id}) exceeds limit: {found} > {max}")]
    LengthExceeded {
        index: usize,
        id: String,
        found: u64,
        max: u64,
    },
}
