//! Progression-model training
//!
//! Reproducible end to end: the train/holdout split shuffles with a
//! fixed-seed ChaCha8 stream, and the GBDT fit is deterministic for a
//! given row order, so the same dataset always yields the same model.
//! The holdout partition exists only to report accuracy; the persisted
//! model is fit on the training partition alone.

use super::dataset::{LabeledRow, TrainingDataset};
use super::model::ProgressionModel;
use super::{HOLDOUT_FRACTION, MAX_TREE_DEPTH, SHRINKAGE, TRAIN_SPLIT_SEED, TREE_COUNT};
use crate::error::{Error, Result};
use crate::models::ProgressionLabel;
use gbdt::config::Config;
use gbdt::decision_tree::Data;
use gbdt::gradient_boost::GBDT;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Diagnostics from one training run.
///
/// Never persisted with the model and never consulted by prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub rows_loaded: usize,
    pub rows_dropped: usize,
    pub train_rows: usize,
    pub holdout_rows: usize,
    /// Fraction of the holdout partition classified correctly.
    pub holdout_accuracy: f64,
}

/// Trains a progression model on a cleaned dataset.
///
/// Fails with [`Error::InsufficientData`] when no rows survived
/// cleaning or only one label class is present. Otherwise splits off
/// ceil(20%) of the rows as a holdout set (seeded shuffle, so the split
/// is identical across runs), fits the ensemble on the remainder, and
/// reports holdout accuracy.
pub fn train(dataset: &TrainingDataset) -> Result<(ProgressionModel, TrainingReport)> {
    let rows = dataset.rows();
    if rows.is_empty() {
        return Err(Error::InsufficientData {
            reason: "no usable rows after cleaning".into(),
        });
    }
    let likely = rows
        .iter()
        .filter(|row| row.label == ProgressionLabel::Likely)
        .count();
    if likely == 0 || likely == rows.len() {
        return Err(Error::InsufficientData {
            reason: "training data contains only one label class".into(),
        });
    }

    let mut shuffled: Vec<&LabeledRow> = rows.iter().collect();
    let mut rng = ChaCha8Rng::seed_from_u64(TRAIN_SPLIT_SEED);
    shuffled.shuffle(&mut rng);

    // 2+ rows here, so both partitions are non-empty.
    let holdout_size = (rows.len() as f64 * HOLDOUT_FRACTION).ceil() as usize;
    let (holdout, training) = shuffled.split_at(holdout_size);

    info!(
        "training on {} rows, holding out {} ({} trees, depth {})",
        training.len(),
        holdout.len(),
        TREE_COUNT,
        MAX_TREE_DEPTH
    );

    let mut cfg = Config::new();
    cfg.set_feature_size(dataset.schema().len());
    cfg.set_max_depth(MAX_TREE_DEPTH);
    cfg.set_iterations(TREE_COUNT);
    cfg.set_shrinkage(SHRINKAGE);
    cfg.set_loss("LogLikelyhood");
    cfg.set_debug(false);
    cfg.set_training_optimization_level(2);
    cfg.set_min_leaf_size(1);

    let mut ensemble = GBDT::new(&cfg);
    let mut training_data: Vec<Data> = training
        .iter()
        .map(|row| {
            Data::new_training_data(row.features.clone(), 1.0_f32, loss_label(row.label), None)
        })
        .collect();
    ensemble.fit(&mut training_data);

    let holdout_data: Vec<Data> = holdout
        .iter()
        .map(|row| Data::new_test_data(row.features.clone(), None))
        .collect();
    let predictions = ensemble.predict(&holdout_data);
    let correct = predictions
        .iter()
        .zip(holdout.iter())
        .filter(|(p, row)| ProgressionLabel::from_probability(**p as f64) == row.label)
        .count();
    let holdout_accuracy = correct as f64 / holdout.len() as f64;

    info!("holdout accuracy: {:.2}", holdout_accuracy);

    let report = TrainingReport {
        rows_loaded: dataset.rows_loaded(),
        rows_dropped: dataset.rows_dropped(),
        train_rows: training.len(),
        holdout_rows: holdout.len(),
        holdout_accuracy,
    };
    let model = ProgressionModel::from_training(ensemble, dataset.schema().clone());

    Ok((model, report))
}

/// `LogLikelyhood` loss convention: positive class 1.0, negative -1.0.
fn loss_label(label: ProgressionLabel) -> f32 {
    match label {
        ProgressionLabel::Likely => 1.0,
        ProgressionLabel::Unlikely => -1.0,
    }
}
