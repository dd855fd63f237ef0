//! Training dataset: CSV loading and cleaning
//!
//! The input format is the clinical study export: a header row naming
//! columns, one patient per row, plain comma separation. Columns beyond
//! the schema and the label (e.g. `PatientID`) are ignored.
//!
//! Cleaning drops rows instead of imputing: a row missing any schema
//! value or the label, or carrying an unparseable cell, never reaches
//! training. At training time `FamilyHistory` accepts only the exact
//! answers `"Yes"` and `"No"`; any other string (including case
//! variants) counts as missing and drops the row. This is stricter than
//! projection, which encodes any non-`"Yes"` answer as 0.0.

use crate::error::{Error, Result};
use crate::features::{ColumnKind, FeatureSchema};
use crate::models::ProgressionLabel;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Label column the training CSV must carry.
pub const LABEL_COLUMN: &str = "Progression";

/// One cleaned training row: a full-width feature vector (one value per
/// schema column) and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRow {
    pub features: Vec<f32>,
    pub label: ProgressionLabel,
}

/// Cleaned training rows plus the schema they were loaded against.
#[derive(Debug, Clone)]
pub struct TrainingDataset {
    schema: FeatureSchema,
    rows: Vec<LabeledRow>,
    rows_loaded: usize,
    rows_dropped: usize,
}

impl TrainingDataset {
    /// Loads and cleans a CSV dataset file.
    ///
    /// The header must contain every schema column plus
    /// [`LABEL_COLUMN`]; anything else in it is ignored. Fails with
    /// [`Error::Dataset`] when the file is unreadable or the header is
    /// incomplete. Rows that fail cleaning are dropped and counted, not
    /// errors.
    pub fn from_csv_path(path: &Path, schema: &FeatureSchema) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::Dataset {
            path: path.to_path_buf(),
            detail: format!("cannot read file: {e}"),
        })?;
        let dataset = Self::parse(&contents, schema, path)?;
        info!(
            "loaded {} training rows from {} ({} dropped by cleaning)",
            dataset.rows.len(),
            path.display(),
            dataset.rows_dropped
        );
        Ok(dataset)
    }

    /// Builds a dataset from already-cleaned rows.
    ///
    /// Every row must be full schema width; rows are taken as-is with
    /// nothing counted as dropped.
    pub fn from_rows(schema: FeatureSchema, rows: Vec<LabeledRow>) -> Self {
        let rows_loaded = rows.len();
        Self {
            schema,
            rows,
            rows_loaded,
            rows_dropped: 0,
        }
    }

    fn parse(contents: &str, schema: &FeatureSchema, path: &Path) -> Result<Self> {
        let mut lines = contents.lines().filter(|line| !line.trim().is_empty());

        let header_line = lines.next().ok_or_else(|| Error::Dataset {
            path: path.to_path_buf(),
            detail: "file is empty".into(),
        })?;
        let header: Vec<&str> = header_line.split(',').map(str::trim).collect();

        // Resolve each schema column and the label to a header position.
        let mut missing: Vec<&str> = Vec::new();
        let mut feature_indices = Vec::with_capacity(schema.len());
        for column in &schema.columns {
            match header.iter().position(|h| *h == column.name) {
                Some(idx) => feature_indices.push(idx),
                None => missing.push(&column.name),
            }
        }
        let label_index = header.iter().position(|h| *h == LABEL_COLUMN);
        if label_index.is_none() {
            missing.push(LABEL_COLUMN);
        }
        if !missing.is_empty() {
            return Err(Error::Dataset {
                path: path.to_path_buf(),
                detail: format!("header is missing required columns: {missing:?}"),
            });
        }
        let label_index = label_index.unwrap_or_default();

        let mut rows = Vec::new();
        let mut rows_loaded = 0;
        let mut rows_dropped = 0;

        for (line_number, line) in lines.enumerate() {
            rows_loaded += 1;
            let cells: Vec<&str> = line.split(',').map(str::trim).collect();

            match clean_row(&cells, schema, &feature_indices, label_index) {
                Ok(row) => rows.push(row),
                Err(reason) => {
                    rows_dropped += 1;
                    debug!("dropping data row {}: {}", line_number + 1, reason);
                }
            }
        }

        Ok(Self {
            schema: schema.clone(),
            rows,
            rows_loaded,
            rows_dropped,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[LabeledRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data rows seen in the file, before cleaning.
    pub fn rows_loaded(&self) -> usize {
        self.rows_loaded
    }

    /// Rows removed by cleaning.
    pub fn rows_dropped(&self) -> usize {
        self.rows_dropped
    }
}

/// Extracts one training row, or a human-readable drop reason.
fn clean_row(
    cells: &[&str],
    schema: &FeatureSchema,
    feature_indices: &[usize],
    label_index: usize,
) -> std::result::Result<LabeledRow, String> {
    let mut features = Vec::with_capacity(schema.len());

    for (column, &index) in schema.columns.iter().zip(feature_indices) {
        let cell = *cells
            .get(index)
            .ok_or_else(|| format!("row is too short for column {:?}", column.name))?;
        let value = match column.kind {
            ColumnKind::Numeric => cell
                .parse::<f32>()
                .map_err(|_| format!("column {:?} has non-numeric value {cell:?}", column.name))?,
            ColumnKind::YesNoFlag => match cell {
                "Yes" => 1.0,
                "No" => 0.0,
                other => {
                    return Err(format!(
                        "column {:?} has unmappable value {other:?}",
                        column.name
                    ))
                }
            },
        };
        features.push(value);
    }

    let label_cell = *cells
        .get(label_index)
        .ok_or_else(|| format!("row is too short for column {LABEL_COLUMN:?}"))?;
    let label = match label_cell.parse::<f64>() {
        Ok(v) if v == 1.0 => ProgressionLabel::Likely,
        Ok(v) if v == 0.0 => ProgressionLabel::Unlikely,
        _ => {
            return Err(format!(
                "column {LABEL_COLUMN:?} has non-binary value {label_cell:?}"
            ))
        }
    };

    Ok(LabeledRow { features, label })
}
