// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// From raw transcripts to integer ids:
//
//   corpus JSON
//       │
//       ▼
//   loader         → raw records, pre-partitioned or flat
//       │
//       ▼
//   splitter       → seeded train/valid/test split (flat input only)
//       │
//       ▼
//   normalizer     → tokenized turns, floors, metadata vectors
//       │              (uses the tokenizer adapter)
//       ▼
//   vocab_builder  → word/topic/dialog-act vocabularies, TRAIN only
//       │
//       ▼
//   encoder        → id-encoded dialogues for every partition
//
// Each module is responsible for exactly one step, so each step
// can be tested on its own with hand-built inputs.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Reads the raw corpus JSON
pub mod loader;

/// Seeded train/valid/test split
pub mod splitter;

/// Word/punctuation tokenizer adapter
pub mod tokenizer;

/// Raw records → turns, floors, metadata
pub mod normalizer;

/// Frequency-ranked vocabularies with truncation
pub mod vocab_builder;

/// Tokens and labels → ids
pub mod encoder;
