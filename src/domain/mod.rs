// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain data types describing what a dialogue corpus IS,
// plus the traits other layers implement.
//
// Rules for this layer:
//   - NO file I/O
//   - NO tokenizer library types
//   - Only structs, enums, traits and small invariant-keeping
//     constructors
//
// Everything downstream (normalizer, builder, encoder, store)
// speaks in these types.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// Raw records as they arrive from the corpus file
pub mod record;

/// Normalized and encoded turns, dialogues, metadata
pub mod dialogue;

/// The train/valid/test container
pub mod corpus;

/// Ordered vocabularies with their reverse mappings
pub mod vocabulary;

/// Seam traits (tokenizer, persistence, corpus source)
pub mod traits;
