//! Markers command - lexical markers without the model

use crate::text::TextAnalyzer;
use anyhow::Result;
use console::style;
use std::path::PathBuf;

/// Run the markers command
pub fn run(
    transcript: Option<String>,
    transcript_file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let transcript = super::read_transcript(transcript, transcript_file)?;
    let markers = TextAnalyzer::new().analyze(&transcript);

    if json {
        println!("{}", serde_json::to_string_pretty(&markers)?);
        return Ok(());
    }

    println!("\n{} Verbal fluency markers\n", style("📝").bold());
    super::assess::print_markers(&markers);

    Ok(())
}
