//! Transcript analysis: lexical markers from verbal-fluency text
//!
//! The pipeline is deliberately simple: lowercase, strip everything that
//! is not a letter or whitespace, then count. Repeated-word pressure and
//! short average sentence length are the markers downstream tooling
//! cares about.
//!
//! Sentence counting runs on the *normalized* text. With the default
//! [`TerminalPunctuationSegmenter`] that means a non-blank transcript is
//! one sentence (its punctuation is already gone), so
//! `avg_sentence_length` equals the total word count unless a custom
//! segmenter is injected.

pub mod segmenter;

pub use segmenter::{SentenceSegmenter, TerminalPunctuationSegmenter};

use crate::models::LexicalMarkers;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

static NON_LETTER_RE: OnceLock<Regex> = OnceLock::new();

fn non_letter_re() -> &'static Regex {
    NON_LETTER_RE.get_or_init(|| Regex::new(r"[^a-z\s]").expect("valid regex"))
}

/// Derives [`LexicalMarkers`] from a raw transcript.
pub struct TextAnalyzer {
    segmenter: Box<dyn SentenceSegmenter>,
}

impl TextAnalyzer {
    /// Analyzer with the default terminal-punctuation segmenter.
    pub fn new() -> Self {
        Self::with_segmenter(Box::new(TerminalPunctuationSegmenter))
    }

    /// Analyzer with a caller-supplied segmenter.
    pub fn with_segmenter(segmenter: Box<dyn SentenceSegmenter>) -> Self {
        Self { segmenter }
    }

    /// Computes lexical markers for a transcript.
    ///
    /// A blank transcript (empty or whitespace-only) yields all-zero
    /// markers with an empty repeated-word map.
    pub fn analyze(&self, transcript: &str) -> LexicalMarkers {
        let normalized = normalize(transcript);
        let tokens: Vec<&str> = normalized.split_whitespace().collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for &token in &tokens {
            *counts.entry(token).or_insert(0) += 1;
        }

        let repeated_words: BTreeMap<String, usize> = counts
            .iter()
            .filter(|(_, &count)| count > 1)
            .map(|(&word, &count)| (word.to_string(), count))
            .collect();

        let sentence_count = self.segmenter.segment(&normalized).len();
        let avg_sentence_length = if sentence_count == 0 {
            0.0
        } else {
            round2(tokens.len() as f64 / sentence_count as f64)
        };

        LexicalMarkers {
            total_words: tokens.len(),
            unique_word_count: counts.len(),
            repeated_words,
            avg_sentence_length,
        }
    }
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercases the transcript and strips everything that is not a letter
/// or whitespace. Digits, punctuation, and non-ASCII letters all go.
fn normalize(transcript: &str) -> String {
    let lowered = transcript.to_lowercase();
    non_letter_re().replace_all(&lowered, "").into_owned()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
