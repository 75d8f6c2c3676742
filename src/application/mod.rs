// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to produce the artifacts of a
// run. No tokenizing, counting or file formats live here; this
// layer only decides what runs in which order and adds context
// to errors on the way out.
//
// Think of this layer as the "director": it tells the data and
// infra layers what to do but does none of the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Vocabulary building and full corpus preparation
pub mod corpus_use_case;
