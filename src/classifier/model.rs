//! Persisted progression model
//!
//! A trained model travels as a single JSON artifact: format version,
//! the feature schema it was trained against, a training timestamp, and
//! the serialized ensemble. Loading checks the format version and the
//! schema fingerprint before the model is usable; prediction re-checks
//! the incoming vector's column identity. A model is immutable once
//! constructed.

use crate::error::{Error, Result};
use crate::features::{FeatureSchema, FeatureVector};
use crate::models::ProgressionLabel;
use chrono::Utc;
use gbdt::decision_tree::Data;
use gbdt::gradient_boost::GBDT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Bump when the artifact layout changes incompatibly; loaders reject
/// versions they do not know.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// A trained progression classifier bound to its feature schema.
#[derive(Serialize, Deserialize)]
pub struct ProgressionModel {
    format_version: u32,
    schema: FeatureSchema,
    /// RFC 3339 training timestamp; diagnostic metadata only.
    trained_at: String,
    ensemble: GBDT,
}

impl ProgressionModel {
    pub(crate) fn from_training(ensemble: GBDT, schema: FeatureSchema) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            schema,
            trained_at: Utc::now().to_rfc3339(),
            ensemble,
        }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn trained_at(&self) -> &str {
        &self.trained_at
    }

    /// Writes the model artifact to `path`, creating parent directories
    /// and overwriting any existing file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| Error::Persistence {
                    path: path.to_path_buf(),
                    source,
                })?;
            }
        }
        let json = serde_json::to_string(self).map_err(|e| Error::Persistence {
            path: path.to_path_buf(),
            source: std::io::Error::new(ErrorKind::InvalidData, e),
        })?;
        fs::write(path, json).map_err(|source| Error::Persistence {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("model artifact written to {}", path.display());
        Ok(())
    }

    /// Reads a model artifact and verifies it is usable with `expected`.
    ///
    /// Fails with [`Error::ModelNotFound`] when no file exists at
    /// `path`, [`Error::ModelCorrupt`] when the file cannot be read or
    /// parsed or carries an unknown format version, and
    /// [`Error::SchemaMismatch`] when the persisted schema's fingerprint
    /// differs from the expected schema's.
    pub fn load(path: &Path, expected: &FeatureSchema) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::ModelNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => {
                return Err(Error::ModelCorrupt {
                    path: path.to_path_buf(),
                    detail: format!("cannot read artifact: {e}"),
                })
            }
        };

        let model: ProgressionModel =
            serde_json::from_str(&contents).map_err(|e| Error::ModelCorrupt {
                path: path.to_path_buf(),
                detail: format!("malformed artifact: {e}"),
            })?;

        if model.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(Error::ModelCorrupt {
                path: path.to_path_buf(),
                detail: format!(
                    "unknown artifact format version {} (this build reads {})",
                    model.format_version, ARTIFACT_FORMAT_VERSION
                ),
            });
        }

        if model.schema.fingerprint() != expected.fingerprint() {
            return Err(Error::SchemaMismatch {
                expected: expected.names(),
                actual: model.schema.names(),
            });
        }

        debug!(
            "loaded model from {} (trained {})",
            path.display(),
            model.trained_at
        );
        Ok(model)
    }

    /// Classifies one projected feature vector.
    ///
    /// The vector's columns must match the model schema exactly, in
    /// order and count; a partial projection is rejected as
    /// [`Error::SchemaMismatch`], never silently padded. Deterministic
    /// for identical model and vector.
    pub fn predict(&self, vector: &FeatureVector) -> Result<ProgressionLabel> {
        let expected = self.schema.names();
        if vector.columns() != expected.as_slice() {
            return Err(Error::SchemaMismatch {
                expected,
                actual: vector.columns().to_vec(),
            });
        }

        let data = vec![Data::new_test_data(vector.values().to_vec(), None)];
        let predictions = self.ensemble.predict(&data);
        let probability = predictions.first().copied().unwrap_or(0.5) as f64;
        Ok(ProgressionLabel::from_probability(probability))
    }
}

// The ensemble type carries no Debug impl; elide it.
impl fmt::Debug for ProgressionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressionModel")
            .field("format_version", &self.format_version)
            .field("schema", &self.schema)
            .field("trained_at", &self.trained_at)
            .finish_non_exhaustive()
    }
}
