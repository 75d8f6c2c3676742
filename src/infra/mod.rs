// ============================================================
// Layer 5 — Infrastructure Layer
// ============================================================
// File-backed concerns used by the application layer:
//
//   vocab_store.rs — The vocabulary artifact. Saves and loads
//                    the word/topic/dialog-act vocabularies so
//                    every run encodes with the same ids, with
//                    or without the raw corpus.
//
//   embedding.rs   — Aligns a pretrained word-vector text file
//                    with the word vocabulary.
//
//   artifacts.rs   — The rest of a run's output directory:
//                    config, encoded corpus, embedding table.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §12 (I/O and File Handling)

/// Vocabulary artifact persistence
pub mod vocab_store;

/// Pretrained word-vector attachment
pub mod embedding;

/// Run output directory (config, encoded corpus, embeddings)
pub mod artifacts;
