//! Core data models for cogmark
//!
//! Typed records for the clinical attribute bag, the derived lexical
//! markers, and the binary progression label. Field names on the wire
//! follow the clinical dataset's column conventions (`Age`,
//! `FamilyHistory`, ...) so a serialized bag and a dataset row read the
//! same way.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single patient's structured clinical attributes.
///
/// Every known field is optional: the bag is whatever the caller happened
/// to supply, and projection (not this type) decides what is usable.
/// Fields outside the known clinical set survive in `extra` and are
/// ignored unless a feature schema explicitly names them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClinicalAttributes {
    #[serde(rename = "Age", default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,

    /// Textual family-history answer; `"Yes"` (exact) encodes to 1.0 at
    /// projection time, anything else to 0.0.
    #[serde(rename = "FamilyHistory", default, skip_serializing_if = "Option::is_none")]
    pub family_history: Option<String>,

    /// Mini-Mental State Examination score (0-30).
    #[serde(rename = "MMSE_Score", default, skip_serializing_if = "Option::is_none")]
    pub mmse_score: Option<f64>,

    /// Clinical Dementia Rating (0, 0.5, 1, 2, 3).
    #[serde(rename = "CDR_Score", default, skip_serializing_if = "Option::is_none")]
    pub cdr_score: Option<f64>,

    #[serde(rename = "EducationYears", default, skip_serializing_if = "Option::is_none")]
    pub education_years: Option<f64>,

    /// Unrecognized fields (e.g. `PatientID`), preserved but inert.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Lexical/cognitive markers derived from a verbal-fluency transcript.
///
/// Invariants upheld by the analyzer: `unique_word_count <= total_words`;
/// every `repeated_words` entry has count > 1 and equals the occurrence
/// count of that normalized token; `avg_sentence_length` is
/// `total_words / sentence_count` (0 when no sentences), rounded to two
/// decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalMarkers {
    pub total_words: usize,
    pub unique_word_count: usize,
    pub repeated_words: BTreeMap<String, usize>,
    pub avg_sentence_length: f64,
}

/// Binary progression-risk label.
///
/// Serializes as `1` (likely to progress) or `0` (unlikely); rendering a
/// human-readable phrase is the presentation layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ProgressionLabel {
    Unlikely,
    Likely,
}

impl ProgressionLabel {
    /// Decision rule shared by every prediction path: probability >= 0.5
    /// means likely to progress.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 0.5 {
            Self::Likely
        } else {
            Self::Unlikely
        }
    }

    pub fn as_u8(self) -> u8 {
        self.into()
    }
}

impl From<ProgressionLabel> for u8 {
    fn from(label: ProgressionLabel) -> Self {
        match label {
            ProgressionLabel::Unlikely => 0,
            ProgressionLabel::Likely => 1,
        }
    }
}

impl TryFrom<u8> for ProgressionLabel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Unlikely),
            1 => Ok(Self::Likely),
            other => Err(format!("progression label must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for ProgressionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_serde_uses_dataset_column_names() {
        let attrs = ClinicalAttributes {
            age: Some(72.0),
            family_history: Some("Yes".into()),
            mmse_score: Some(26.0),
            cdr_score: Some(0.5),
            education_years: Some(12.0),
            extra: BTreeMap::new(),
        };

        let json = serde_json::to_value(&attrs).expect("serialize attributes");
        assert_eq!(json["Age"], 72.0);
        assert_eq!(json["FamilyHistory"], "Yes");
        assert_eq!(json["MMSE_Score"], 26.0);
        assert_eq!(json["CDR_Score"], 0.5);
        assert_eq!(json["EducationYears"], 12.0);
    }

    #[test]
    fn test_attributes_preserve_unrecognized_fields() {
        let json = r#"{"Age": 68, "PatientID": 1001, "Clinic": "north"}"#;
        let attrs: ClinicalAttributes = serde_json::from_str(json).expect("parse attributes");
        assert_eq!(attrs.age, Some(68.0));
        assert_eq!(attrs.extra["PatientID"], 1001);
        assert_eq!(attrs.extra["Clinic"], "north");
        assert!(attrs.mmse_score.is_none());
    }

    #[test]
    fn test_label_serializes_as_binary_digit() {
        assert_eq!(
            serde_json::to_string(&ProgressionLabel::Likely).expect("serialize"),
            "1"
        );
        assert_eq!(
            serde_json::to_string(&ProgressionLabel::Unlikely).expect("serialize"),
            "0"
        );

        let parsed: ProgressionLabel = serde_json::from_str("1").expect("parse");
        assert_eq!(parsed, ProgressionLabel::Likely);
        assert!(serde_json::from_str::<ProgressionLabel>("2").is_err());
    }

    #[test]
    fn test_label_decision_rule() {
        assert_eq!(
            ProgressionLabel::from_probability(0.5),
            ProgressionLabel::Likely
        );
        assert_eq!(
            ProgressionLabel::from_probability(0.49),
            ProgressionLabel::Unlikely
        );
        assert_eq!(
            ProgressionLabel::from_probability(1.0),
            ProgressionLabel::Likely
        );
        assert_eq!(
            ProgressionLabel::from_probability(0.0),
            ProgressionLabel::Unlikely
        );
    }
}
