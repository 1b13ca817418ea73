//! Input normalization
//!
//! Turns speech transcripts and extracted document pages into prompt text.

/// Media type accepted for document extraction
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Append a transcript to the current prompt, separated by one space.
///
/// The separator is kept even when the prompt is empty.
pub fn append_transcript(prompt: &str, transcript: &str) -> String {
    let mut out = String::with_capacity(prompt.len() + transcript.len() + 1);
    out.push_str(prompt);
    out.push(' ');
    out.push_str(transcript);
    out
}

/// Join one page's fragments with single spaces
pub fn join_fragments(fragments: &[String]) -> String {
    fragments.join(" ")
}

/// Append a finished page to the document text; every page ends in '\n'
pub fn push_page(text: &mut String, fragments: &[String]) {
    text.push_str(&join_fragments(fragments));
    text.push('\n');
}

/// Guess the media type of a file from its name
pub fn media_type_for(path: &std::path::Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

pub fn is_pdf(media_type: &str) -> bool {
    media_type.eq_ignore_ascii_case(PDF_MEDIA_TYPE)
}
