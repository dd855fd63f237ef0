//! Assess command - one-shot patient assessment
//!
//! The only place the two analysis branches meet: clinical attributes
//! go through projection and the model, the transcript goes through the
//! text analyzer, and the results are combined into one report here.

use crate::classifier::ProgressionModel;
use crate::config::Config;
use crate::features::{project, FeatureSchema, FeatureVector};
use crate::models::{ClinicalAttributes, LexicalMarkers, ProgressionLabel};
use crate::text::TextAnalyzer;
use anyhow::{Context, Result};
use console::style;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::path::PathBuf;

/// Combined assessment report; key names are the response contract
/// downstream consumers parse.
#[derive(Serialize)]
struct AssessmentReport<'a> {
    structured_patient_data: StructuredFeatures<'a>,
    verbal_fluency_analysis: &'a LexicalMarkers,
    progression_prediction: &'static str,
}

/// Serializes a feature vector as a field→value map in schema order.
struct StructuredFeatures<'a>(&'a FeatureVector);

impl Serialize for StructuredFeatures<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0.columns().iter().zip(self.0.values()) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn render_label(label: ProgressionLabel) -> &'static str {
    match label {
        ProgressionLabel::Likely => "Likely to progress",
        ProgressionLabel::Unlikely => "Unlikely to progress",
    }
}

/// Run the assess command
#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &Config,
    age: Option<f64>,
    family_history: Option<String>,
    mmse_score: Option<f64>,
    cdr_score: Option<f64>,
    education_years: Option<f64>,
    transcript: Option<String>,
    transcript_file: Option<PathBuf>,
    model: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let model_path = model.unwrap_or_else(|| config.model_path());
    let schema = FeatureSchema::clinical();
    let model = ProgressionModel::load(&model_path, &schema)
        .with_context(|| format!("Cannot use model at {}", model_path.display()))?;

    let attributes = ClinicalAttributes {
        age,
        family_history,
        mmse_score,
        cdr_score,
        education_years,
        ..Default::default()
    };
    let vector =
        project(&attributes, &schema).context("Clinical attributes cannot be projected")?;
    let label = model
        .predict(&vector)
        .context("Prediction failed for the supplied attributes")?;

    let transcript = super::read_transcript(transcript, transcript_file)?;
    let markers = TextAnalyzer::new().analyze(&transcript);

    let report = AssessmentReport {
        structured_patient_data: StructuredFeatures(&vector),
        verbal_fluency_analysis: &markers,
        progression_prediction: render_label(label),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n{} Cognitive assessment\n", style("🧠").bold());
    println!("  Structured features:");
    for (name, value) in vector.columns().iter().zip(vector.values()) {
        println!("    {:<16} {}", name, value);
    }
    println!("\n  Verbal fluency:");
    print_markers(&markers);
    println!(
        "\n  {} {}",
        style("Prediction:").bold(),
        style(render_label(label)).cyan()
    );

    Ok(())
}

/// Shared marker rendering for `assess` and `markers`.
pub(crate) fn print_markers(markers: &LexicalMarkers) {
    println!("    Total words:         {}", markers.total_words);
    println!("    Unique words:        {}", markers.unique_word_count);
    if markers.repeated_words.is_empty() {
        println!("    Repeated words:      none");
    } else {
        let rendered: Vec<String> = markers
            .repeated_words
            .iter()
            .map(|(word, count)| format!("{word} ({count})"))
            .collect();
        println!("    Repeated words:      {}", rendered.join(", "));
    }
    println!(
        "    Avg sentence length: {:.2}",
        markers.avg_sentence_length
    );
}
