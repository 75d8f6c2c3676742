use anyhow::Result;
use clap::Parser;
use swda_corpus::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("swda_corpus=info".parse()?),
        )
        .init();

    Cli::parse().run()
}
