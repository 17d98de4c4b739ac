//! Deterministic text normalization primitives.
//!
//! Everything here is pure and bounded; the rest of the pipeline is built on
//! these helpers, so keep them boring.

use crate::lexicon;

/// Characters stripped from token edges: Western and Indic quotation marks,
/// dashes, brackets and the Devanagari danda.
const EDGE_PUNCT: &[char] = &[
    '.', ',', ':', ';', '!', '?', '\'', '"', '(', ')', '[', ']', '{', '}', '“', '”', '‘', '’',
    '-', '–', '—', '|', '/', '\\', '।',
];

/// Collapse all whitespace runs (including newlines) to single spaces.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-split, edge-punctuation-stripped, lowercased tokens.
/// Tokens that are empty after stripping are discarded.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|w| {
            let t = w.trim_matches(|c: char| EDGE_PUNCT.contains(&c));
            if t.is_empty() {
                None
            } else {
                Some(t.to_lowercase())
            }
        })
        .collect()
}

pub fn is_stopword(token: &str) -> bool {
    let t = token.to_lowercase();
    lexicon::EN_STOPWORDS.contains(&t.as_str()) || lexicon::HI_STOPWORDS.contains(&t.as_str())
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split on sentence terminators (`।`, `.`, `?`, `!`) followed by whitespace
/// or end of input. A trailing fragment without a terminator is kept as a
/// final sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        cur.push(c);
        if matches!(c, '।' | '.' | '?' | '!') {
            // Don't split inside "v1.2"-style runs.
            if let Some(n) = chars.peek() {
                if !n.is_whitespace() {
                    continue;
                }
            }
            let s = cur.trim();
            if !s.is_empty() {
                out.push(s.to_string());
            }
            cur.clear();
        }
    }
    let s = cur.trim();
    if !s.is_empty() {
        out.push(s.to_string());
    }
    out
}
