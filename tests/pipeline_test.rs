//! End-to-end pipeline tests
//!
//! Exercises the full lifecycle against a real CSV on disk: load and
//! clean the dataset, train, persist, reload, and predict, with the
//! transcript analysis running independently alongside.

use cogmark::classifier::{train, ProgressionModel, TrainingDataset};
use cogmark::error::Error;
use cogmark::features::{project, FeatureColumn, FeatureSchema};
use cogmark::models::{ClinicalAttributes, ProgressionLabel};
use cogmark::text::TextAnalyzer;
use std::fmt::Write as _;
use std::path::Path;

/// Writes a balanced, well-separated dataset: declining patients (low
/// MMSE, CDR 1.0, family history) labeled 1, stable patients labeled 0.
fn write_dataset(path: &Path, rows_per_class: usize) {
    let mut csv = String::from(
        "PatientID,Age,FamilyHistory,MMSE_Score,CDR_Score,EducationYears,Progression\n",
    );
    for i in 0..rows_per_class {
        writeln!(csv, "{},{},Yes,{},1.0,8,1", i * 2 + 1, 70 + i % 8, 16 + i % 4)
            .expect("format row");
        writeln!(csv, "{},{},No,{},0.0,16,0", i * 2 + 2, 60 + i % 8, 27 + i % 3)
            .expect("format row");
    }
    std::fs::write(path, csv).expect("write dataset");
}

fn declining_patient() -> ClinicalAttributes {
    ClinicalAttributes {
        age: Some(74.0),
        family_history: Some("Yes".into()),
        mmse_score: Some(17.0),
        cdr_score: Some(1.0),
        education_years: Some(8.0),
        ..Default::default()
    }
}

fn stable_patient() -> ClinicalAttributes {
    ClinicalAttributes {
        age: Some(62.0),
        family_history: Some("No".into()),
        mmse_score: Some(28.0),
        cdr_score: Some(0.0),
        education_years: Some(16.0),
        ..Default::default()
    }
}

#[test]
fn test_train_persist_reload_predict() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset_path = dir.path().join("cohort.csv");
    write_dataset(&dataset_path, 15);

    let schema = FeatureSchema::clinical();
    let dataset = TrainingDataset::from_csv_path(&dataset_path, &schema).expect("load dataset");
    let (model, report) = train(&dataset).expect("train");

    // 30 rows: ceil(0.2 * 30) = 6 held out, 24 trained on.
    assert_eq!(report.rows_loaded, 30);
    assert_eq!(report.rows_dropped, 0);
    assert_eq!(report.holdout_rows, 6);
    assert_eq!(report.train_rows, 24);
    assert!((0.0..=1.0).contains(&report.holdout_accuracy));

    let artifact = dir.path().join("models").join("progression_model.json");
    model.save(&artifact).expect("save");
    let reloaded = ProgressionModel::load(&artifact, &schema).expect("load");

    let declining = project(&declining_patient(), &schema).expect("project");
    let stable = project(&stable_patient(), &schema).expect("project");

    assert_eq!(
        model.predict(&declining).expect("predict"),
        reloaded.predict(&declining).expect("predict")
    );
    assert_eq!(
        reloaded.predict(&declining).expect("predict"),
        ProgressionLabel::Likely
    );
    assert_eq!(
        reloaded.predict(&stable).expect("predict"),
        ProgressionLabel::Unlikely
    );
}

#[test]
fn test_dirty_dataset_is_cleaned_not_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset_path = dir.path().join("cohort.csv");

    let mut csv = String::from(
        "PatientID,Age,FamilyHistory,MMSE_Score,CDR_Score,EducationYears,Progression\n",
    );
    for i in 0..10 {
        writeln!(csv, "{},{},Yes,17,1.0,8,1", i * 2 + 1, 70 + i).expect("format row");
        writeln!(csv, "{},{},No,28,0.0,16,0", i * 2 + 2, 60 + i).expect("format row");
    }
    // Unmappable family history and a missing score.
    csv.push_str("90,71,Unknown,18,1.0,8,1\n");
    csv.push_str("91,66,No,,0.0,16,0\n");
    std::fs::write(&dataset_path, csv).expect("write dataset");

    let dataset = TrainingDataset::from_csv_path(&dataset_path, &FeatureSchema::clinical())
        .expect("load dataset");
    assert_eq!(dataset.rows_loaded(), 22);
    assert_eq!(dataset.rows_dropped(), 2);
    assert_eq!(dataset.len(), 20);

    let (_, report) = train(&dataset).expect("train");
    assert_eq!(report.rows_dropped, 2);
    assert_eq!(report.holdout_rows, 4);
    assert_eq!(report.train_rows, 16);
}

#[test]
fn test_artifact_refuses_foreign_schema() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dataset_path = dir.path().join("cohort.csv");
    write_dataset(&dataset_path, 10);

    let schema = FeatureSchema::clinical();
    let dataset = TrainingDataset::from_csv_path(&dataset_path, &schema).expect("load dataset");
    let (model, _) = train(&dataset).expect("train");

    let artifact = dir.path().join("model.json");
    model.save(&artifact).expect("save");

    let mut widened = FeatureSchema::clinical();
    widened.columns.push(FeatureColumn::numeric("TauLevel"));

    match ProgressionModel::load(&artifact, &widened) {
        Err(Error::SchemaMismatch { expected, actual }) => {
            assert_eq!(expected.len(), 6);
            assert_eq!(actual.len(), 5);
        }
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

#[test]
fn test_verbal_fluency_scenario() {
    let markers = TextAnalyzer::new()
        .analyze("apple banana orange apple grapes lemon banana orange apple");

    assert_eq!(markers.total_words, 9);
    assert_eq!(markers.unique_word_count, 5);
    assert_eq!(markers.repeated_words.len(), 3);
    assert_eq!(markers.repeated_words["apple"], 3);
    assert_eq!(markers.repeated_words["banana"], 2);
    assert_eq!(markers.repeated_words["orange"], 2);
    assert_eq!(markers.avg_sentence_length, 9.0);
}

#[test]
fn test_marker_counts_are_consistent() {
    let analyzer = TextAnalyzer::new();
    for transcript in [
        "the cat sat on the mat",
        "apple apple apple",
        "one two three four",
        "Repetition, repetition... and MORE repetition!",
        "",
    ] {
        let markers = analyzer.analyze(transcript);
        assert!(markers.unique_word_count <= markers.total_words);

        // Repeated occurrences plus singletons account for every token.
        let repeated_total: usize = markers.repeated_words.values().sum();
        let singletons = markers.unique_word_count - markers.repeated_words.len();
        assert_eq!(repeated_total + singletons, markers.total_words, "{transcript:?}");
        assert!(markers.repeated_words.values().all(|&count| count > 1));
    }
}
