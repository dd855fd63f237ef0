//! Train command - fit and persist the progression model

use crate::classifier::{train, TrainingDataset};
use crate::config::Config;
use crate::features::FeatureSchema;
use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;

/// Run the train command
pub fn run(config: &Config, dataset: Option<PathBuf>, model: Option<PathBuf>) -> Result<()> {
    let dataset_path = dataset.unwrap_or_else(|| config.dataset_path());
    let model_path = model.unwrap_or_else(|| config.model_path());
    let schema = FeatureSchema::clinical();

    println!("\n{} Training progression model\n", style("🧠").bold());
    println!("  Dataset: {}", style(dataset_path.display()).cyan());

    let dataset = TrainingDataset::from_csv_path(&dataset_path, &schema).with_context(|| {
        format!(
            "Failed to load training data from {}",
            dataset_path.display()
        )
    })?;

    let (trained, report) = train(&dataset).context("Training failed")?;
    trained
        .save(&model_path)
        .with_context(|| format!("Failed to save model to {}", model_path.display()))?;

    println!("\n{} Training complete!", style("✅").bold());
    println!(
        "   Rows: {} loaded, {} dropped by cleaning",
        report.rows_loaded, report.rows_dropped
    );
    println!(
        "   Split: {} train / {} holdout",
        report.train_rows, report.holdout_rows
    );
    println!(
        "   Holdout accuracy: {:.1}%",
        report.holdout_accuracy * 100.0
    );
    println!(
        "   Schema: v{} ({})",
        schema.version,
        schema.fingerprint()
    );
    println!(
        "   Model saved to: {}",
        style(model_path.display()).cyan()
    );
    println!("\nNext step:");
    println!(
        "  {} Assess a patient",
        style("cogmark assess --age 72 --family-history Yes --mmse-score 26 --cdr-score 0.5 --education-years 12").cyan()
    );

    Ok(())
}
