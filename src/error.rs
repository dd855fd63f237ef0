//! Error taxonomy for the assessment core
//!
//! Every failure the core can produce is a variant here, carrying enough
//! structure (offending path, expected vs. actual columns) for the caller
//! to decide between retry, corrected input, and abort. Nothing in the
//! core logs-and-returns-empty; callers always see a typed error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by feature projection, training, and the model lifecycle
#[derive(Error, Debug)]
pub enum Error {
    /// No schema column was present in the attribute bag at projection time.
    /// Recoverable: the caller should request corrected input.
    #[error("no usable features: none of the schema columns {schema:?} are present in the attributes")]
    MissingFeatures { schema: Vec<String> },

    /// The training set was empty or single-class after cleaning.
    /// Fatal to that training run.
    #[error("training data insufficient: {reason}")]
    InsufficientData { reason: String },

    /// No artifact exists at the given path.
    #[error("model artifact not found at {}", path.display())]
    ModelNotFound { path: PathBuf },

    /// An artifact exists but cannot be deserialized (or its format
    /// version is unknown to this build).
    #[error("model artifact at {} is unreadable: {detail}", path.display())]
    ModelCorrupt { path: PathBuf, detail: String },

    /// A feature vector's column identity/order disagrees with the schema
    /// the model was trained against. Never coerced; always rejected.
    #[error("feature schema mismatch: model expects {expected:?}, got {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Writing the artifact to durable storage failed.
    #[error("failed to persist model artifact at {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The training dataset file is unreadable or structurally unusable
    /// (missing header, missing required column).
    #[error("dataset {} unusable: {detail}", path.display())]
    Dataset { path: PathBuf, detail: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = Error::MissingFeatures {
            schema: vec!["Age".into(), "MMSE_Score".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Age"));
        assert!(msg.contains("MMSE_Score"));

        let err = Error::ModelNotFound {
            path: PathBuf::from("/tmp/progression_model.json"),
        };
        assert!(err.to_string().contains("/tmp/progression_model.json"));

        let err = Error::SchemaMismatch {
            expected: vec!["Age".into()],
            actual: vec!["CDR_Score".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Age"));
        assert!(msg.contains("CDR_Score"));
    }
}
