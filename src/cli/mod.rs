//! CLI command definitions and handlers

mod assess;
mod markers;
mod train;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Cogmark - cognitive markers and progression risk
#[derive(Parser, Debug)]
#[command(name = "cogmark")]
#[command(
    version,
    about = "Cognitive-marker extraction and progression-risk classification",
    long_about = "Cogmark derives lexical markers from verbal-fluency transcripts, projects \
structured clinical attributes onto a fixed feature schema, and classifies \
progression risk with a locally trained tree ensemble.\n\n\
Everything runs locally; the model artifact carries the schema it was trained \
against and refuses to run against anything else.",
    after_help = "\
Examples:
  cogmark train --dataset data/sample_patient_history.csv
  cogmark assess --age 72 --family-history Yes --mmse-score 26 \\
      --cdr-score 0.5 --education-years 12 --transcript \"the cat sat\"
  cogmark assess --age 72 --family-history Yes --mmse-score 26 \\
      --cdr-score 0.5 --education-years 12 --json
  cogmark markers --transcript-file fluency.txt --json"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the progression model from a CSV dataset and persist it
    #[command(after_help = "\
Examples:
  cogmark train                                      Use paths from cogmark.toml or defaults
  cogmark train --dataset cohort.csv                 Train from a specific dataset
  cogmark train --model out/model.json               Write the artifact somewhere else")]
    Train {
        /// Training dataset (CSV with the clinical columns and a Progression label)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Where to write the model artifact
        #[arg(long)]
        model: Option<PathBuf>,
    },

    /// Assess one patient: lexical markers, projected features, and prediction
    #[command(after_help = "\
Examples:
  cogmark assess --age 72 --family-history Yes --mmse-score 26 \\
      --cdr-score 0.5 --education-years 12 --transcript \"the cat sat\"
  cogmark assess --age 72 --family-history Yes --mmse-score 26 \\
      --cdr-score 0.5 --education-years 12 --transcript-file fluency.txt --json")]
    Assess {
        /// Patient age in years
        #[arg(long)]
        age: Option<f64>,

        /// Family history of the condition ("Yes" or "No"; only exactly "Yes" counts)
        #[arg(long)]
        family_history: Option<String>,

        /// Mini-Mental State Examination score (0-30)
        #[arg(long)]
        mmse_score: Option<f64>,

        /// Clinical Dementia Rating (0, 0.5, 1, 2, 3)
        #[arg(long)]
        cdr_score: Option<f64>,

        /// Years of education
        #[arg(long)]
        education_years: Option<f64>,

        /// Verbal-fluency transcript text
        #[arg(long, conflicts_with = "transcript_file")]
        transcript: Option<String>,

        /// Read the transcript from a file
        #[arg(long)]
        transcript_file: Option<PathBuf>,

        /// Model artifact to load (default: configured or per-user data dir)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Output the combined report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute lexical markers for a transcript (no model needed)
    Markers {
        /// Verbal-fluency transcript text
        #[arg(long, conflicts_with = "transcript_file")]
        transcript: Option<String>,

        /// Read the transcript from a file
        #[arg(long)]
        transcript_file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = crate::config::load_config(Path::new("."));

    match cli.command {
        Commands::Train { dataset, model } => train::run(&config, dataset, model),

        Commands::Assess {
            age,
            family_history,
            mmse_score,
            cdr_score,
            education_years,
            transcript,
            transcript_file,
            model,
            json,
        } => assess::run(
            &config,
            age,
            family_history,
            mmse_score,
            cdr_score,
            education_years,
            transcript,
            transcript_file,
            model,
            json,
        ),

        Commands::Markers {
            transcript,
            transcript_file,
            json,
        } => markers::run(transcript, transcript_file, json),
    }
}

/// Resolve a transcript from the flag pair; no transcript at all is an
/// empty one.
pub(crate) fn read_transcript(
    transcript: Option<String>,
    transcript_file: Option<PathBuf>,
) -> Result<String> {
    match (transcript, transcript_file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read transcript file {}", path.display())),
        (None, None) => Ok(String::new()),
    }
}
