// ============================================================
// Layer 4 — Raw Corpus Loader
// ============================================================
// Reads the raw transcripts from a single JSON file. Two layouts
// are accepted:
//
//   {"train": [...], "valid": [...], "test": [...]}
//       partitions used exactly as shipped
//
//   [record, record, ...]
//       one pool, partitioned later by the splitter
//
// The layout is picked from the first non-whitespace character
// (`{` or `[`) and the file is then decoded straight into that
// shape. Trying both shapes in turn would throw away serde's
// error, and with it the line, column and field of a bad record.
//
// Missing required fields are not validated here; a record
// without `topic` or `A.age` still loads and is rejected by the
// normalizer with the field named. Wrong TYPES (a string age, a
// speaker "C") fail here, with serde's position.
//
// Reference: serde_json documentation (Error::line, Error::column)
//            Rust Book §9 (Error Handling)

use std::{fs, path::PathBuf};

use crate::data::splitter::split_partitions;
use crate::domain::corpus::Corpus;
use crate::domain::record::RawRecord;
use crate::domain::traits::CorpusSource;
use crate::error::Result;

/// The two accepted raw corpus layouts
#[derive(Debug, Clone, PartialEq)]
pub enum RawCorpusFile {
    Partitioned(Corpus<Vec<RawRecord>>),
    Flat(Vec<RawRecord>),
}

impl RawCorpusFile {
    /// Resolve into train/valid/test. Pre-partitioned files ignore
    /// the fractions; flat files are shuffled with `seed` and split.
    pub fn into_partitions(
        self,
        valid_fraction: f64,
        test_fraction:  f64,
        seed:           u64,
    ) -> Corpus<Vec<RawRecord>> {
        match self {
            RawCorpusFile::Partitioned(corpus) => corpus,
            RawCorpusFile::Flat(records) => {
                tracing::info!(
                    "Corpus file is unpartitioned; splitting {} records (seed={})",
                    records.len(),
                    seed
                );
                split_partitions(records, valid_fraction, test_fraction, seed)
            }
        }
    }
}

/// Loads raw records from a JSON file on disk.
pub struct JsonCorpusLoader {
    path: PathBuf,
}

impl JsonCorpusLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusSource for JsonCorpusLoader {
    fn load_records(&self) -> Result<RawCorpusFile> {
        // Read whole so serde's line/column refer to the file as written
        let text = fs::read_to_string(&self.path)?;

        let file = match text.trim_start().as_bytes().first() {
            Some(b'{') => RawCorpusFile::Partitioned(serde_json::from_str(&text)?),
            // `[` or anything else: let serde say what is wrong with it
            _ => RawCorpusFile::Flat(serde_json::from_str(&text)?),
        };

        match &file {
            RawCorpusFile::Partitioned(c) => tracing::debug!(
                "Loaded partitioned corpus: {} train, {} valid, {} test",
                c.train.len(),
                c.valid.len(),
                c.test.len()
            ),
            RawCorpusFile::Flat(records) => {
                tracing::debug!("Loaded flat corpus with {} records", records.len())
            }
        }
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CorpusError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const RECORD: &str = r#"{
        "utts": [["A", "hi", null]],
        "A": {"age": 40, "education": 1, "sex": "MALE"},
        "B": {"age": 20, "education": 2, "sex": "FEMALE"},
        "topic": "MUSIC"
    }"#;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{contents}").unwrap();
        f
    }

    #[test]
    fn test_loads_partitioned_layout() {
        let f = write_temp(&format!(
            r#"{{"train": [{RECORD}, {RECORD}], "valid": [{RECORD}], "test": []}}"#
        ));
        let file = JsonCorpusLoader::new(f.path()).load_records().unwrap();

        let corpus = file.into_partitions(0.5, 0.5, 7);
        assert_eq!(corpus.train.len(), 2);
        assert_eq!(corpus.valid.len(), 1);
        assert!(corpus.test.is_empty());
    }

    #[test]
    fn test_loads_flat_layout_and_splits() {
        let records = vec![RECORD; 10].join(",");
        let f = write_temp(&format!("[{records}]"));
        let file = JsonCorpusLoader::new(f.path()).load_records().unwrap();
        assert!(matches!(file, RawCorpusFile::Flat(ref r) if r.len() == 10));

        let corpus = file.into_partitions(0.2, 0.1, 7);
        assert_eq!(corpus.train.len(), 7);
        assert_eq!(corpus.valid.len(), 2);
        assert_eq!(corpus.test.len(), 1);
    }

    #[test]
    fn test_bad_speaker_error_names_value_and_position() {
        let bad = RECORD.replace(r#"["A", "hi", null]"#, r#"["C", "hi", null]"#);
        let f = write_temp(&format!(r#"{{"train": [{RECORD}, {bad}], "valid": [], "test": []}}"#));

        let err = JsonCorpusLoader::new(f.path()).load_records().unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, CorpusError::Json(_)));
        assert!(msg.contains("`C`"), "{msg}");
        assert!(msg.contains("line"), "{msg}");
    }

    #[test]
    fn test_string_age_error_is_positioned() {
        let bad = RECORD.replace(r#""age": 40"#, r#""age": "40""#);
        let f = write_temp(&format!("[{RECORD},\n{bad}]"));

        let msg = JsonCorpusLoader::new(f.path()).load_records().unwrap_err().to_string();
        assert!(msg.contains("invalid type"), "{msg}");
        assert!(msg.contains("line"), "{msg}");
    }

    #[test]
    fn test_missing_partition_key_is_named() {
        let f = write_temp(&format!(r#"{{"train": [{RECORD}], "valid": []}}"#));

        let msg = JsonCorpusLoader::new(f.path()).load_records().unwrap_err().to_string();
        assert!(msg.contains("missing field `test`"), "{msg}");
    }

    #[test]
    fn test_leading_whitespace_before_layout() {
        let f = write_temp(&format!("\n\n  [{RECORD}]"));
        let file = JsonCorpusLoader::new(f.path()).load_records().unwrap();
        assert!(matches!(file, RawCorpusFile::Flat(ref r) if r.len() == 1));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonCorpusLoader::new(dir.path().join("nope.json"))
            .load_records()
            .unwrap_err();
        assert!(matches!(err, CorpusError::Io(_)));
    }
}
