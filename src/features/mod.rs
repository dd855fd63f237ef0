//! Feature schema and projection
//!
//! A [`FeatureSchema`] is the ordered, versioned list of columns a model
//! consumes. It travels with every persisted model artifact, and its
//! [fingerprint](FeatureSchema::fingerprint) is what load- and
//! predict-time compatibility checks compare, so adding, renaming, or
//! reordering a column forces a retrain instead of silently misaligned
//! features.
//!
//! Projection turns a [`ClinicalAttributes`] bag into a [`FeatureVector`]
//! by walking the schema in order and skipping columns the bag does not
//! supply. The vector remembers which columns made it in; downstream
//! checks use that identity rather than bare positions.

use crate::error::{Error, Result};
use crate::models::ClinicalAttributes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Bump when the canonical clinical column set changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Canonical clinical columns, in model input order.
pub const CLINICAL_FEATURE_NAMES: [&str; 5] = [
    "Age",
    "FamilyHistory",
    "MMSE_Score",
    "CDR_Score",
    "EducationYears",
];

/// How a column's raw attribute value becomes an `f32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Numeric attribute passed through as-is.
    Numeric,
    /// Textual yes/no answer; exactly `"Yes"` (case-sensitive) encodes
    /// to 1.0, every other string to 0.0.
    YesNoFlag,
}

impl ColumnKind {
    fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::YesNoFlag => "yes_no_flag",
        }
    }
}

/// One named, typed column of a feature schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureColumn {
    pub name: String,
    pub kind: ColumnKind,
}

impl FeatureColumn {
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Numeric,
        }
    }

    pub fn yes_no_flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::YesNoFlag,
        }
    }
}

/// Ordered, versioned feature column set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub version: u32,
    pub columns: Vec<FeatureColumn>,
}

impl FeatureSchema {
    pub fn new(version: u32, columns: Vec<FeatureColumn>) -> Self {
        Self { version, columns }
    }

    /// The canonical clinical schema the progression classifier trains
    /// against.
    pub fn clinical() -> Self {
        Self::new(
            SCHEMA_VERSION,
            vec![
                FeatureColumn::numeric("Age"),
                FeatureColumn::yes_no_flag("FamilyHistory"),
                FeatureColumn::numeric("MMSE_Score"),
                FeatureColumn::numeric("CDR_Score"),
                FeatureColumn::numeric("EducationYears"),
            ],
        )
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in schema order.
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Stable 16-hex-char identity for this schema.
    ///
    /// Hashes the version plus every `name:kind` pair in order, so any
    /// change to the column set produces a different fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut canonical = format!("v{}", self.version);
        for column in &self.columns {
            canonical.push('\n');
            canonical.push_str(&column.name);
            canonical.push(':');
            canonical.push_str(column.kind.as_str());
        }
        let digest = Sha256::digest(canonical.as_bytes());
        format!("{:x}", digest)[..16].to_string()
    }
}

/// Projected feature values plus the names of the columns they came
/// from, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    columns: Vec<String>,
    values: Vec<f32>,
}

impl FeatureVector {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}

/// Projects an attribute bag onto a schema.
///
/// Walks the schema columns in order; a column the bag supplies is
/// encoded and appended, a column it does not is skipped. Returns
/// [`Error::MissingFeatures`] when no schema column is present at all —
/// a partial vector is still a valid projection, and whether it is
/// acceptable is the consumer's call.
pub fn project(attributes: &ClinicalAttributes, schema: &FeatureSchema) -> Result<FeatureVector> {
    let mut columns = Vec::new();
    let mut values = Vec::new();

    for column in &schema.columns {
        let value = match column.kind {
            ColumnKind::Numeric => lookup_numeric(attributes, &column.name).map(|v| v as f32),
            ColumnKind::YesNoFlag => lookup_answer(attributes, &column.name).map(encode_yes_no),
        };
        if let Some(value) = value {
            columns.push(column.name.clone());
            values.push(value);
        }
    }

    if values.is_empty() {
        return Err(Error::MissingFeatures {
            schema: schema.names(),
        });
    }

    Ok(FeatureVector { columns, values })
}

/// Exact-match encoding: `"Yes"` is 1.0, anything else (including
/// `"yes"` and `"YES"`) is 0.0.
fn encode_yes_no(answer: &str) -> f32 {
    if answer == "Yes" {
        1.0
    } else {
        0.0
    }
}

fn lookup_numeric(attributes: &ClinicalAttributes, name: &str) -> Option<f64> {
    match name {
        "Age" => attributes.age,
        "MMSE_Score" => attributes.mmse_score,
        "CDR_Score" => attributes.cdr_score,
        "EducationYears" => attributes.education_years,
        other => attributes.extra.get(other).and_then(|v| v.as_f64()),
    }
}

fn lookup_answer<'a>(attributes: &'a ClinicalAttributes, name: &str) -> Option<&'a str> {
    match name {
        "FamilyHistory" => attributes.family_history.as_deref(),
        other => attributes.extra.get(other).and_then(|v| v.as_str()),
    }
}
