//! Sentence segmentation seam
//!
//! Segmentation is behind a trait so the analyzer can be exercised with
//! a deterministic fake and so a smarter segmenter can be dropped in
//! without touching the marker math.

/// Splits text into sentence segments.
///
/// Implementations decide what counts as a boundary. Callers only rely
/// on segments being non-blank and the segment count being meaningful
/// for the text they passed in.
pub trait SentenceSegmenter: Send + Sync {
    fn segment<'t>(&self, text: &'t str) -> Vec<&'t str>;
}

/// Default segmenter: splits on terminal punctuation (`.`, `!`, `?`)
/// and drops blank segments.
///
/// Text with no terminal punctuation is a single segment, so running
/// this after punctuation stripping always yields one sentence for a
/// non-blank transcript.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPunctuationSegmenter;

impl SentenceSegmenter for TerminalPunctuationSegmenter {
    fn segment<'t>(&self, text: &'t str) -> Vec<&'t str> {
        text.split(['.', '!', '?'])
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect()
    }
}
