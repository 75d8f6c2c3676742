// ============================================================
// Layer 5 — Vocabulary Store
// ============================================================
// Persists a VocabularySet as one JSON artifact with six keys:
//
//   vocab, rev_vocab,
//   topic_vocab, rev_topic_vocab,
//   dialog_act_vocab, rev_dialog_act_vocab
//
// Loading restores identical vocabularies without touching the
// raw corpus. The unk id is not stored; it is re-derived from the
// loaded word reverse map, so a loaded set is indistinguishable
// from a freshly built one.
//
// Failure modes on load:
//   - a key is missing or a list/map is inconsistent → CorruptArtifact
//   - the word vocabulary has no <unk>                 → Lookup
//
// Reference: serde_json documentation (to_writer_pretty, from_reader)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    collections::{BTreeMap, HashMap},
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::data::vocab_builder::{BuildReport, VocabularyBuilder};
use crate::domain::dialogue::NormalizedPartition;
use crate::domain::traits::Persistable;
use crate::domain::vocabulary::{Vocabulary, VocabularySet};
use crate::error::{CorpusError, Result};

pub const VOCAB_FILE: &str = "vocab.json";

/// On-disk layout. Reverse maps are ordered so the file is stable
/// across runs.
#[derive(Serialize, Deserialize)]
struct VocabArtifact {
    vocab:                Vec<String>,
    rev_vocab:            BTreeMap<String, u32>,
    topic_vocab:          Vec<String>,
    rev_topic_vocab:      BTreeMap<String, u32>,
    dialog_act_vocab:     Vec<String>,
    rev_dialog_act_vocab: BTreeMap<String, u32>,
}

fn ordered(rev: &HashMap<String, u32>) -> BTreeMap<String, u32> {
    rev.iter().map(|(k, v)| (k.clone(), *v)).collect()
}

impl Persistable for VocabularySet {
    fn save(&self, path: &Path) -> Result<()> {
        let artifact = VocabArtifact {
            vocab:                self.words.tokens().to_vec(),
            rev_vocab:            ordered(self.words.rev()),
            topic_vocab:          self.topics.tokens().to_vec(),
            rev_topic_vocab:      ordered(self.topics.rev()),
            dialog_act_vocab:     self.dialog_acts.tokens().to_vec(),
            rev_dialog_act_vocab: ordered(self.dialog_acts.rev()),
        };

        // Write beside the target, then rename over it. A crash mid-write
        // leaves the previous artifact untouched instead of a truncated
        // file that the next run would reject as corrupt.
        let tmp = sibling_tmp(path);
        if let Err(e) = write_json(&tmp, &artifact) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        fs::rename(&tmp, path)?;

        tracing::debug!("Saved vocabularies to '{}'", path.display());
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let corrupt = |reason: String| CorpusError::CorruptArtifact {
            path: path.to_path_buf(),
            reason,
        };

        let value: Value = serde_json::from_reader(reader).map_err(|e| corrupt(e.to_string()))?;
        let mut fields = match value {
            Value::Object(map) => map,
            other => return Err(corrupt(format!("expected an object, found {other}"))),
        };

        let mut vocabulary = |list_key: &str, rev_key: &str| -> Result<Vocabulary> {
            let tokens: Vec<String> = take_key(&mut fields, list_key).map_err(corrupt)?;
            let rev: HashMap<String, u32> = take_key(&mut fields, rev_key).map_err(corrupt)?;
            Vocabulary::from_parts(tokens, rev).map_err(|e| corrupt(format!("{list_key}: {e}")))
        };

        let words       = vocabulary("vocab", "rev_vocab")?;
        let topics      = vocabulary("topic_vocab", "rev_topic_vocab")?;
        let dialog_acts = vocabulary("dialog_act_vocab", "rev_dialog_act_vocab")?;

        let set = VocabularySet::new(words, topics, dialog_acts)?;
        set.log_reserved();
        tracing::info!("{} topics in train data", set.topics.len());
        tracing::debug!("Dialog acts: {:?}", set.dialog_acts.tokens());
        tracing::info!("{} dialog acts in train data", set.dialog_acts.len());
        Ok(set)
    }
}

/// `dir/vocab.json` → `dir/vocab.json.tmp`
fn sibling_tmp(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_json(path: &Path, artifact: &VocabArtifact) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, artifact)?;
    writer.flush()?;
    Ok(())
}

/// Remove `key` from the artifact object and decode it.
fn take_key<T: serde::de::DeserializeOwned>(
    fields: &mut Map<String, Value>,
    key:    &str,
) -> std::result::Result<T, String> {
    let value = fields
        .remove(key)
        .ok_or_else(|| format!("missing key `{key}`"))?;
    serde_json::from_value(value).map_err(|e| format!("key `{key}`: {e}"))
}

/// Owns the location of the vocabulary artifact for a run and
/// decides between reusing it and building a new one.
pub struct VocabularyStore {
    dir: PathBuf,
}

impl VocabularyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(VOCAB_FILE)
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }

    pub fn load(&self) -> Result<VocabularySet> {
        let path = self.path();
        let set = VocabularySet::load(&path)?;
        tracing::info!("Loaded vocabularies from '{}'", path.display());
        Ok(set)
    }

    pub fn save(&self, set: &VocabularySet) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        set.save(&self.path())
    }

    /// Build from `train` and save the result.
    pub fn build_and_save(
        &self,
        train:   &NormalizedPartition,
        builder: &VocabularyBuilder,
    ) -> Result<(VocabularySet, BuildReport)> {
        let (set, report) = builder.build(train)?;
        self.save(&set)?;
        tracing::info!("Vocabularies saved to '{}'", self.path().display());
        Ok((set, report))
    }

    /// Reuse the saved artifact when present (and `rebuild` is off),
    /// otherwise build from `train` and save. The report is only
    /// available for a fresh build.
    pub fn load_or_build(
        &self,
        train:   &NormalizedPartition,
        builder: &VocabularyBuilder,
        rebuild: bool,
    ) -> Result<(VocabularySet, Option<BuildReport>)> {
        if self.exists() && !rebuild {
            tracing::info!("Loading existing vocabularies from disk");
            Ok((self.load()?, None))
        } else {
            tracing::info!("Building new vocabularies");
            let (set, report) = self.build_and_save(train, builder)?;
            Ok((set, Some(report)))
        }
    }
}
