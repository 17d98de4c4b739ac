//! Advisory readability notes.
//!
//! Notes are editor-facing strings in the newsroom's working language; they
//! flag paragraph-length and structure issues and never fail the pipeline.

use crate::textprep;

const MAX_AVG_PARAGRAPH_CHARS: f64 = 500.0;
const MAX_BODY_TOKENS: usize = 800;

pub const NOTE_SHORTEN_PARAGRAPHS: &str =
    "पैराग्राफ छोटे रखें (3–4 लाइन), लंबे पैराग्राफ विभाजित करें।";
pub const NOTE_ADD_SECTIONS: &str =
    "इंट्रो छोटा करें और उपशीर्षक (H2/H3) जोड़कर सेक्शन्स बनाएं।";
pub const NOTE_ADD_SUBHEADINGS: &str =
    "कम-से-कम 2 उपशीर्षक जोड़ें: पृष्ठभूमि, बयान/प्रतिक्रिया, संदर्भ।";
pub const NOTE_OK: &str = "रीडेबिलिटी ठीक है; छोटे पैराग्राफ और स्पष्ट उपशीर्षक बनाए रखें।";

/// Always returns at least one note; an affirmative note when nothing fired.
pub fn readability_notes(text: &str) -> Vec<String> {
    let mut notes = Vec::new();

    let paragraphs: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    let total_chars: usize = paragraphs.iter().map(|p| p.chars().count()).sum();
    let avg_chars = total_chars as f64 / paragraphs.len().max(1) as f64;
    if avg_chars > MAX_AVG_PARAGRAPH_CHARS {
        notes.push(NOTE_SHORTEN_PARAGRAPHS.to_string());
    }

    if textprep::tokenize(text).len() > MAX_BODY_TOKENS {
        notes.push(NOTE_ADD_SECTIONS.to_string());
    }

    let has_subheading_marker = ["\n##", "\n###", "H2", "H3"]
        .iter()
        .any(|m| text.contains(m));
    if !has_subheading_marker {
        notes.push(NOTE_ADD_SUBHEADINGS.to_string());
    }

    if notes.is_empty() {
        notes.push(NOTE_OK.to_string());
    }
    notes
}
