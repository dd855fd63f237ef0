//! Cogmark - cognitive-marker extraction and progression-risk CLI
//!
//! A local-first clinical support tool: lexical markers from
//! verbal-fluency transcripts plus a reproducible tree-ensemble
//! progression classifier.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = cogmark::cli::Cli::parse();
    cogmark::cli::run(cli)
}
