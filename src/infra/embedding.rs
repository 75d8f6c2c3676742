// ============================================================
// Layer 5 — Pretrained Embedding Attacher
// ============================================================
// Lines up an external word-vector file with the word vocabulary.
//
// Resource format, one entry per line:
//
//   <word> <f1> <f2> ... <fd>
//
// For each vocabulary id in order, the word's vector is used if
// the file has one; otherwise a fresh vector of `d` draws from
// N(0, 1) scaled by 0.1 stands in. The fraction of ids that got a
// random vector is reported as the embedding OOV rate.
//
// A missing resource file is not an error: the attacher returns
// None and the corpus simply has no embedding table.
//
// Why random vectors instead of zeros for uncovered words?
//   All-zero rows are identical to each other, so the model
//   could not tell two unknown words apart until training
//   moved them. Small random rows start out distinct.
//
// Reference: rand_distr documentation (StandardNormal)

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::traits::Persistable;
use crate::domain::vocabulary::Vocabulary;
use crate::error::{CorpusError, Result};

/// Standard deviation of the stand-in vectors for uncovered words
const RANDOM_SCALE: f32 = 0.1;

pub const EMBEDDING_FILE: &str = "embeddings.json";

/// One vector per word-vocabulary id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingTable {
    pub dim:      usize,
    pub oov_rate: f64,
    pub vectors:  Vec<Vec<f32>>,
}

impl Persistable for EmbeddingTable {
    fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

pub struct EmbeddingAttacher {
    path: PathBuf,
    dim:  usize,
}

impl EmbeddingAttacher {
    pub fn new(path: impl Into<PathBuf>, dim: usize) -> Self {
        Self { path: path.into(), dim }
    }

    /// Build the table for `vocab`, or `None` if the resource is absent.
    pub fn attach<R: Rng + ?Sized>(
        &self,
        vocab: &Vocabulary,
        rng:   &mut R,
    ) -> Result<Option<EmbeddingTable>> {
        if !self.path.exists() {
            tracing::warn!(
                "Word vector file '{}' not found; skipping embeddings",
                self.path.display()
            );
            return Ok(None);
        }

        let raw = self.read_raw()?;

        let mut oov_cnt = 0usize;
        let mut vectors = Vec::with_capacity(vocab.len());
        for word in vocab.tokens() {
            let vector = match raw.get(word.as_str()) {
                Some((line, text)) => self.parse_vector(*line, text)?,
                None => {
                    oov_cnt += 1;
                    (0..self.dim)
                        .map(|_| rng.sample::<f32, _>(StandardNormal) * RANDOM_SCALE)
                        .collect()
                }
            };
            vectors.push(vector);
        }

        let oov_rate = if vocab.is_empty() {
            0.0
        } else {
            oov_cnt as f64 / vocab.len() as f64
        };
        tracing::info!("word2vec cannot cover {:.6} of vocab", oov_rate);

        Ok(Some(EmbeddingTable { dim: self.dim, oov_rate, vectors }))
    }

    /// word → (line number, unparsed vector text). Later lines win.
    /// Vectors are parsed lazily; most of a large file is never used.
    fn read_raw(&self) -> Result<HashMap<String, (usize, String)>> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut raw = HashMap::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let (word, vector) = line
                .split_once(' ')
                .ok_or_else(|| self.malformed(idx + 1, "no vector after word".into()))?;
            raw.insert(word.to_string(), (idx + 1, vector.to_string()));
        }

        tracing::debug!("Read {} word vectors from '{}'", raw.len(), self.path.display());
        Ok(raw)
    }

    fn parse_vector(&self, line: usize, text: &str) -> Result<Vec<f32>> {
        let vector = text
            .split_whitespace()
            .map(|v| v.parse::<f32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| self.malformed(line, e.to_string()))?;

        if vector.len() != self.dim {
            return Err(self.malformed(
                line,
                format!("expected {} values, found {}", self.dim, vector.len()),
            ));
        }
        Ok(vector)
    }

    fn malformed(&self, line: usize, reason: String) -> CorpusError {
        CorpusError::MalformedEmbedding { path: self.path.clone(), line, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn vocab(list: &[&str]) -> Vocabulary {
        Vocabulary::from_unique(list.iter().map(|s| s.to_string()).collect())
    }

    fn resource(lines: &[&str]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        for l in lines {
            writeln!(f, "{l}").unwrap();
        }
        f
    }

    #[test]
    fn test_partial_coverage() {
        let f = resource(&["cat 0.5 0.5 0.5", "dog 1 2 3"]);
        let mut rng = StdRng::seed_from_u64(0);

        let table = EmbeddingAttacher::new(f.path(), 3)
            .attach(&vocab(&["<pad>", "<unk>", "dog"]), &mut rng)
            .unwrap()
            .unwrap();

        assert_eq!(table.vectors.len(), 3);
        assert!(table.vectors.iter().all(|v| v.len() == 3));
        assert_eq!(table.vectors[2], vec![1.0, 2.0, 3.0]);
        assert!((table.oov_rate - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_random_vectors_are_small() {
        let f = resource(&["x 0"]);
        let mut rng = StdRng::seed_from_u64(7);

        let table = EmbeddingAttacher::new(f.path(), 64)
            .attach(&vocab(&["<pad>", "<unk>"]), &mut rng)
            .unwrap()
            .unwrap();

        assert_eq!(table.oov_rate, 1.0);
        // 0.1 * N(0,1) stays well inside ±1 for 128 draws
        assert!(table.vectors.iter().flatten().all(|v| v.abs() < 1.0));
        assert_ne!(table.vectors[0], table.vectors[1]);
    }

    #[test]
    fn test_missing_resource_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let table = EmbeddingAttacher::new(dir.path().join("absent.txt"), 8)
            .attach(&vocab(&["<pad>", "<unk>"]), &mut rng)
            .unwrap();
        assert!(table.is_none());
    }

    #[test]
    fn test_wrong_dimension_is_malformed() {
        let f = resource(&["dog 1 2"]);
        let mut rng = StdRng::seed_from_u64(0);

        let err = EmbeddingAttacher::new(f.path(), 3)
            .attach(&vocab(&["dog"]), &mut rng)
            .unwrap_err();
        assert!(matches!(err, CorpusError::MalformedEmbedding { line: 1, .. }));
    }

    #[test]
    fn test_bad_float_on_used_line_is_malformed() {
        let f = resource(&["cat 1 2", "dog 1 x"]);
        let mut rng = StdRng::seed_from_u64(0);

        let err = EmbeddingAttacher::new(f.path(), 2)
            .attach(&vocab(&["dog"]), &mut rng)
            .unwrap_err();
        assert!(matches!(err, CorpusError::MalformedEmbedding { line: 2, .. }));
    }

    #[test]
    fn test_table_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EMBEDDING_FILE);
        let table = EmbeddingTable { dim: 2, oov_rate: 0.5, vectors: vec![vec![0.25, -1.5], vec![3.0, 0.0]] };

        table.save(&path).unwrap();
        assert_eq!(EmbeddingTable::load(&path).unwrap(), table);
    }
}
