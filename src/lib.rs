//! Dialogue corpus preparation.
//!
//! Raw annotated transcripts go in; word, topic and dialog-act
//! vocabularies and an integer-encoded train/valid/test corpus come
//! out. Vocabularies are built from the training partition only and
//! can be saved and reloaded so encoding is reproducible without the
//! raw corpus.

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;
