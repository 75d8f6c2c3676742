// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to the application
// layer. Prints the human-readable summary of a run; everything
// else is reported through tracing.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{BuildVocabArgs, Commands, PrepareArgs};

use crate::application::corpus_use_case::CorpusUseCase;

#[derive(Parser, Debug)]
#[command(
    name = "swda-corpus",
    version,
    about = "Build vocabularies and an integer-encoded train/valid/test corpus from annotated dialogues."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::BuildVocab(args) => run_build_vocab(args),
            Commands::Prepare(args)    => run_prepare(args),
        }
    }
}

fn run_build_vocab(args: BuildVocabArgs) -> Result<()> {
    tracing::info!("Building vocabularies from: {}", args.corpus.corpus);

    let report = CorpusUseCase::new(args.into()).build_vocab()?;

    println!(
        "Vocabulary: {} words ({} raw, OOV rate {:.4}), {} topics, {} dialog acts",
        report.vocab_size,
        report.raw_vocab_size,
        report.oov_rate,
        report.topic_count,
        report.dialog_act_count
    );
    Ok(())
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    tracing::info!("Preparing corpus from: {}", args.corpus.corpus);

    let summary = CorpusUseCase::new(args.into()).prepare()?;

    println!(
        "Encoded {} train, {} valid, {} test dialogues",
        summary.dialogues.train, summary.dialogues.valid, summary.dialogues.test
    );
    println!(
        "Vocabulary: {} words, {} topics, {} dialog acts",
        summary.vocab_size, summary.topic_count, summary.dialog_act_count
    );
    if let Some(report) = &summary.build_report {
        println!("Word OOV rate {:.4}", report.oov_rate);
    }
    if let Some(rate) = summary.embedding_oov_rate {
        println!("Word vectors missing for {:.4} of vocabulary", rate);
    }
    Ok(())
}
