//! Progression-risk classifier
//!
//! Trained-model lifecycle: load a tabular dataset, train a
//! gradient-boosted tree ensemble on a reproducible 80/20 split,
//! persist the model alongside its feature schema, and classify
//! projected feature vectors as likely/unlikely to progress.
//!
//! Every knob is a fixed constant. Reproducibility is the point: the
//! same dataset trains the same model on every machine, and a persisted
//! model refuses to run against a schema it was not trained for.

pub mod dataset;
pub mod model;
pub mod train;

pub use dataset::{LabeledRow, TrainingDataset, LABEL_COLUMN};
pub use model::{ProgressionModel, ARTIFACT_FORMAT_VERSION};
pub use train::{train, TrainingReport};

/// Seed for the train/holdout shuffle.
pub const TRAIN_SPLIT_SEED: u64 = 42;

/// Fraction of rows held out for the accuracy report (size rounds up).
pub const HOLDOUT_FRACTION: f64 = 0.2;

/// Boosting iterations in the ensemble.
pub const TREE_COUNT: usize = 100;

/// Maximum depth of each tree.
pub const MAX_TREE_DEPTH: u32 = 6;

/// Learning rate for the boosting steps.
pub const SHRINKAGE: f32 = 0.1;
