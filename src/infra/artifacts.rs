// ============================================================
// Layer 5 — Run Artifacts
// ============================================================
// Everything a run leaves behind in its output directory, apart
// from the vocabulary artifact (see vocab_store.rs):
//
//   output_dir/
//     corpus_config.json  ← the config the run used
//     corpus.json         ← {"train": [...], "valid": [...], "test": [...]}
//     embeddings.json     ← per-id vectors, when a resource was found
//
// Saving the config next to the outputs means a later run can
// be pointed at the same directory and reproduce the encoding.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::application::corpus_use_case::CorpusConfig;
use crate::domain::corpus::Corpus;
use crate::domain::dialogue::EncodedDialogue;
use crate::domain::traits::Persistable;
use crate::infra::embedding::{EmbeddingTable, EMBEDDING_FILE};

pub const CONFIG_FILE: &str = "corpus_config.json";
pub const CORPUS_FILE: &str = "corpus.json";

pub struct RunArtifacts {
    dir: PathBuf,
}

impl RunArtifacts {
    /// Point at `dir`, creating it (like `mkdir -p`) if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn corpus_path(&self) -> PathBuf {
        self.dir.join(CORPUS_FILE)
    }

    pub fn embedding_path(&self) -> PathBuf {
        self.dir.join(EMBEDDING_FILE)
    }

    pub fn save_config(&self, cfg: &CorpusConfig) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved corpus config to '{}'", path.display());
        Ok(())
    }

    pub fn save_corpus(&self, corpus: &Corpus<Vec<EncodedDialogue>>) -> Result<()> {
        let path = self.corpus_path();
        let file = File::create(&path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, corpus)?;
        writer.flush()?;

        tracing::info!("Encoded corpus written to '{}'", path.display());
        Ok(())
    }

    pub fn save_embeddings(&self, table: &EmbeddingTable) -> Result<()> {
        let path = self.embedding_path();
        table
            .save(&path)
            .with_context(|| format!("Cannot write embeddings to '{}'", path.display()))?;
        tracing::info!("Embedding table written to '{}'", path.display());
        Ok(())
    }
}
