// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between the pipeline and the outside world:
//
//   WordTokenizer  string -> ordered tokens (black box)
//   Persistable    save/restore a value to/from a path
//   CorpusSource   produce raw records for the pipeline
//
// The application layer only sees these traits, so a different
// tokenizer or storage format slots in without touching the
// normalizer, builder or encoder.
//
// This is the Dependency Inversion Principle applied with
// Rust's trait system: the pipeline depends on "something that
// tokenizes", never on the tokenizers crate itself.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use crate::data::loader::RawCorpusFile;
use crate::error::Result;

// ─── WordTokenizer ────────────────────────────────────────────────────────────
/// Splits text into an ordered sequence of word and punctuation tokens.
pub trait WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any value whose state can be written to and restored from disk.
///
/// Implementations:
///   - VocabularySet  → the six-key vocabulary artifact
///   - EmbeddingTable → the per-id vector table
pub trait Persistable: Sized {
    fn save(&self, path: &Path) -> Result<()>;

    fn load(path: &Path) -> Result<Self>;
}

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Anything that can supply the raw transcripts.
pub trait CorpusSource {
    fn load_records(&self) -> Result<RawCorpusFile>;
}
