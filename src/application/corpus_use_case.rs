// ============================================================
// Layer 2 — CorpusUseCase
// ============================================================
// Two workflows over the same raw corpus:
//
// build_vocab:
//   Step 1: Load raw records           (data::loader)
//   Step 2: Split if unpartitioned     (data::splitter)
//   Step 3: Normalize TRAIN only       (data::normalizer)
//   Step 4: Build + save vocabularies  (data::vocab_builder, infra::vocab_store)
//   Step 5: Save config                (infra::artifacts)
//
// prepare:
//   Steps 1-2 as above
//   Step 3: Normalize all partitions
//   Step 4: Load saved vocabularies, or build from train and save
//   Step 5: Encode train/valid/test    (data::encoder)
//   Step 6: Write corpus.json
//   Step 7: Attach word vectors        (infra::embedding), if configured
//   Step 8: Save config
//
// Why normalize valid/test at all before encoding?
//   The encoder works on normalized turns, and the same
//   lowercasing and <s> ... </s> wrapping must apply to every
//   partition or ids would not line up with the vocabulary.
//
// Reference: Rust Book §9 (Error Handling with anyhow)

use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::{
    encoder::CorpusEncoder,
    loader::JsonCorpusLoader,
    normalizer::DialogueNormalizer,
    tokenizer::WordPunctTokenizer,
    vocab_builder::{BuildReport, VocabularyBuilder},
};
use crate::domain::corpus::Corpus;
use crate::domain::dialogue::NormalizedPartition;
use crate::domain::record::RawRecord;
use crate::domain::traits::CorpusSource;
use crate::infra::{
    artifacts::RunArtifacts,
    embedding::EmbeddingAttacher,
    vocab_store::VocabularyStore,
};

// ─── Configuration ───────────────────────────────────────────────────────────
// Everything that determines a run's output. Serialisable so it
// can be written next to the artifacts it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    pub corpus_path:    String,
    pub output_dir:     String,
    pub max_vocab_cnt:  usize,
    pub word2vec_path:  Option<String>,
    pub word2vec_dim:   usize,
    pub valid_fraction: f64,
    pub test_fraction:  f64,
    pub seed:           u64,
    pub rebuild_vocab:  bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            corpus_path:    "data/swda.json".to_string(),
            output_dir:     "corpus_out".to_string(),
            max_vocab_cnt:  10000,
            word2vec_path:  None,
            word2vec_dim:   200,
            valid_fraction: 0.1,
            test_fraction:  0.1,
            seed:           42,
            rebuild_vocab:  false,
        }
    }
}

/// What `prepare` produced, for the CLI to print
#[derive(Debug, Clone)]
pub struct PrepareSummary {
    pub dialogues:          Corpus<usize>,
    pub vocab_size:         usize,
    pub topic_count:        usize,
    pub dialog_act_count:   usize,
    /// Present only when the vocabularies were built this run
    pub build_report:       Option<BuildReport>,
    /// Present only when a word-vector resource was found
    pub embedding_oov_rate: Option<f64>,
}

// ─── CorpusUseCase ────────────────────────────────────────────────────────────
pub struct CorpusUseCase {
    config: CorpusConfig,
}

impl CorpusUseCase {
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }

    /// Build vocabularies from the training partition and save them.
    pub fn build_vocab(&self) -> Result<BuildReport> {
        let cfg = &self.config;
        let raw = self.load_partitions()?;

        let normalizer = DialogueNormalizer::new(WordPunctTokenizer::new());
        let train = normalizer
            .normalize(&raw.train)
            .context("Cannot normalize train partition")?;

        let artifacts = RunArtifacts::create(&cfg.output_dir)?;
        let store = VocabularyStore::new(artifacts.dir());
        let (_, report) = store
            .build_and_save(&train, &VocabularyBuilder::new(cfg.max_vocab_cnt))
            .with_context(|| format!("Cannot save vocabularies to '{}'", store.path().display()))?;

        artifacts.save_config(cfg)?;
        Ok(report)
    }

    /// Run the whole pipeline: vocabularies, encoded corpus, embeddings.
    pub fn prepare(&self) -> Result<PrepareSummary> {
        let cfg = &self.config;

        // ── Steps 1-3: load, split, normalize ────────────────────────────────
        let raw = self.load_partitions()?;
        let normalizer = DialogueNormalizer::new(WordPunctTokenizer::new());
        let normalized: Corpus<NormalizedPartition> = raw.try_map(|partition, records| {
            normalizer
                .normalize(records)
                .with_context(|| format!("Cannot normalize {partition} partition"))
        })?;

        // ── Step 4: vocabularies (train only) ────────────────────────────────
        let artifacts = RunArtifacts::create(&cfg.output_dir)?;
        let store = VocabularyStore::new(artifacts.dir());
        let (vocabs, build_report) = store
            .load_or_build(
                &normalized.train,
                &VocabularyBuilder::new(cfg.max_vocab_cnt),
                cfg.rebuild_vocab,
            )
            .with_context(|| format!("Cannot obtain vocabularies at '{}'", store.path().display()))?;

        // ── Steps 5-6: encode every partition with the same vocabularies ────
        let encoded = CorpusEncoder::new(&vocabs)
            .encode_corpus(&normalized)
            .context("Cannot encode corpus")?;
        artifacts.save_corpus(&encoded)?;

        // ── Step 7: pretrained vectors ───────────────────────────────────────
        let mut embedding_oov_rate = None;
        if let Some(path) = &cfg.word2vec_path {
            let mut rng = StdRng::seed_from_u64(cfg.seed);
            let table = EmbeddingAttacher::new(path, cfg.word2vec_dim)
                .attach(&vocabs.words, &mut rng)
                .with_context(|| format!("Cannot attach word vectors from '{path}'"))?;
            if let Some(table) = table {
                artifacts.save_embeddings(&table)?;
                embedding_oov_rate = Some(table.oov_rate);
            }
        }

        // ── Step 8: config ───────────────────────────────────────────────────
        artifacts.save_config(cfg)?;

        Ok(PrepareSummary {
            dialogues: Corpus {
                train: encoded.train.len(),
                valid: encoded.valid.len(),
                test:  encoded.test.len(),
            },
            vocab_size: vocabs.words.len(),
            topic_count: vocabs.topics.len(),
            dialog_act_count: vocabs.dialog_acts.len(),
            build_report,
            embedding_oov_rate,
        })
    }

    fn load_partitions(&self) -> Result<Corpus<Vec<RawRecord>>> {
        let cfg = &self.config;
        let loader = JsonCorpusLoader::new(&cfg.corpus_path);
        let file = loader
            .load_records()
            .with_context(|| format!("Cannot load corpus from '{}'", cfg.corpus_path))?;

        let raw = file.into_partitions(cfg.valid_fraction, cfg.test_fraction, cfg.seed);
        tracing::info!(
            "Loaded corpus with train size {}, valid size {}, test size {}",
            raw.train.len(),
            raw.valid.len(),
            raw.test.len()
        );
        Ok(raw)
    }
}
