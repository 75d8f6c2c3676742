// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every structural or data failure the pipeline can hit.
// Core modules return `crate::error::Result<T>`; the
// application and CLI layers wrap these in anyhow with
// file and field context before aborting.
//
// A missing embedding resource is deliberately absent here:
// the attacher treats it as "no embeddings" and returns None.
//
// Why thiserror here and anyhow at the edges?
//   Callers of the core need to tell an unknown label from a
//   corrupt artifact (tests match on the variant). The CLI only
//   needs a readable chain of messages, which anyhow gives.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CorpusError>;

#[derive(Debug, Error)]
pub enum CorpusError {
    /// A raw dialogue record lacks a required field
    #[error("raw record {record} is missing required field `{field}`")]
    MissingField { record: usize, field: String },

    /// The vocabulary artifact is structurally invalid
    #[error("corrupt vocabulary artifact '{}': {reason}", .path.display())]
    CorruptArtifact { path: PathBuf, reason: String },

    /// A reserved token is not in the word vocabulary
    #[error("reserved token `{token}` not found in word vocabulary")]
    Lookup { token: String },

    /// A label seen at encode time was never seen in training
    #[error("label `{label}` is not in the training {kind} vocabulary")]
    UnknownLabel { kind: &'static str, label: String },

    /// A line of the pretrained vector file could not be used
    #[error("malformed embedding '{}' line {line}: {reason}", .path.display())]
    MalformedEmbedding {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The word tokenizer rejected its input
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
