// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands:
//
//   build-vocab  normalize train, build and save vocabularies
//   prepare      vocabularies + encoded corpus + embeddings
//
// Both share the corpus/partition flags via CorpusArgs.
//
// clap's derive macros generate --help text, missing-value
// errors and the string → usize/f64 conversions for us.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::corpus_use_case::CorpusConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build word/topic/dialog-act vocabularies from the training partition
    BuildVocab(BuildVocabArgs),

    /// Encode train/valid/test with saved (or freshly built) vocabularies
    Prepare(PrepareArgs),
}

/// Flags common to every command
#[derive(Args, Debug)]
pub struct CorpusArgs {
    /// Raw corpus JSON: {"train","valid","test"} or a flat list of records
    #[arg(long, default_value = "data/swda.json")]
    pub corpus: String,

    /// Directory for vocab.json, corpus.json, embeddings.json and the run config
    #[arg(long, default_value = "corpus_out")]
    pub output_dir: String,

    /// Number of most frequent training words kept (plus <pad> and <unk>)
    #[arg(long, default_value_t = 10000)]
    pub max_vocab_cnt: usize,

    /// Share of a flat corpus used for validation
    #[arg(long, default_value_t = 0.1)]
    pub valid_fraction: f64,

    /// Share of a flat corpus used for testing
    #[arg(long, default_value_t = 0.1)]
    pub test_fraction: f64,

    /// Seed for the partition shuffle and the random stand-in vectors
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[derive(Args, Debug)]
pub struct BuildVocabArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Pretrained vectors, one `word v1 ... vd` per line. Skipped if missing.
    #[arg(long)]
    pub word2vec_path: Option<String>,

    /// Dimensionality of the pretrained vectors
    #[arg(long, default_value_t = 200)]
    pub word2vec_dim: usize,

    /// Ignore a saved vocab.json and build from the training partition
    #[arg(long)]
    pub rebuild_vocab: bool,
}

/// The application layer never sees clap types.
impl From<CorpusArgs> for CorpusConfig {
    fn from(a: CorpusArgs) -> Self {
        CorpusConfig {
            corpus_path:    a.corpus,
            output_dir:     a.output_dir,
            max_vocab_cnt:  a.max_vocab_cnt,
            valid_fraction: a.valid_fraction,
            test_fraction:  a.test_fraction,
            seed:           a.seed,
            ..CorpusConfig::default()
        }
    }
}

impl From<BuildVocabArgs> for CorpusConfig {
    fn from(a: BuildVocabArgs) -> Self {
        CorpusConfig { rebuild_vocab: true, ..CorpusConfig::from(a.corpus) }
    }
}

impl From<PrepareArgs> for CorpusConfig {
    fn from(a: PrepareArgs) -> Self {
        CorpusConfig {
            word2vec_path: a.word2vec_path,
            word2vec_dim:  a.word2vec_dim,
            rebuild_vocab: a.rebuild_vocab,
            ..CorpusConfig::from(a.corpus)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_prepare_flags_reach_config() {
        let cli = Cli::parse_from([
            "swda-corpus",
            "prepare",
            "--corpus",
            "raw.json",
            "--max-vocab-cnt",
            "50",
            "--word2vec-path",
            "glove.txt",
            "--rebuild-vocab",
        ]);
        let Commands::Prepare(args) = cli.command else {
            panic!("expected prepare");
        };

        let cfg: CorpusConfig = args.into();
        assert_eq!(cfg.corpus_path, "raw.json");
        assert_eq!(cfg.max_vocab_cnt, 50);
        assert_eq!(cfg.word2vec_path.as_deref(), Some("glove.txt"));
        assert_eq!(cfg.word2vec_dim, 200);
        assert!(cfg.rebuild_vocab);
    }

    #[test]
    fn test_build_vocab_defaults() {
        let cli = Cli::parse_from(["swda-corpus", "build-vocab"]);
        let Commands::BuildVocab(args) = cli.command else {
            panic!("expected build-vocab");
        };

        let cfg: CorpusConfig = args.into();
        assert_eq!(cfg.max_vocab_cnt, 10000);
        assert_eq!(cfg.output_dir, "corpus_out");
        assert!(cfg.word2vec_path.is_none());
    }
}
