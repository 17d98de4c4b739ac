//! Paragraph re-segmentation and heading assignment.
//!
//! Headings are a layout heuristic: blocks get positional labels from a
//! configured rotation, not content-derived topics.

use crate::textprep;
use seopipe_core::{CleanedBody, HeadingBlock, SeoConfig};

const INTRO_MAX_WORDS: usize = 18;
const MAX_BLOCKS: usize = 4;

/// Paragraphs for the rewritten layout.
///
/// A body that already has ≥3 paragraphs is used as-is; otherwise the flat
/// text is re-segmented by sentence into fixed windows of
/// `sentences_per_paragraph`, with a trailing partial window flushed as the
/// final paragraph.
pub fn segment_paragraphs(body: &CleanedBody, sentences_per_paragraph: usize) -> Vec<String> {
    if body.paragraphs.len() >= 3 {
        return body.paragraphs.clone();
    }
    let window = sentences_per_paragraph.max(1);
    textprep::split_sentences(&body.flat())
        .chunks(window)
        .map(|c| c.join(" "))
        .collect()
}

/// Partition paragraphs into at most 4 roughly equal blocks and label each
/// from the configured rotation, with a one-line intro taken from the block's
/// first sentence (truncated to 18 words, `…` marker when cut).
pub fn assign_headings(paragraphs: &[String], labels: &[String]) -> Vec<HeadingBlock> {
    if paragraphs.is_empty() || labels.is_empty() {
        return Vec::new();
    }
    let n = paragraphs.len();
    let block_count = (n / 3 + 1).clamp(1, MAX_BLOCKS);

    // Balanced partition: the first `extra` blocks take one extra paragraph,
    // so the result has exactly `block_count` blocks of near-equal size.
    let base = n / block_count;
    let extra = n % block_count;
    let mut out = Vec::with_capacity(block_count);
    let mut start = 0usize;
    for i in 0..block_count {
        let size = base + usize::from(i < extra);
        if size == 0 {
            break;
        }
        let block = &paragraphs[start..start + size];
        out.push(HeadingBlock {
            label: labels[i % labels.len()].clone(),
            intro: intro_line(&block[0]),
        });
        start += size;
    }
    out
}

/// Convenience: segmentation + heading assignment in one call.
pub fn restructure(body: &CleanedBody, cfg: &SeoConfig) -> (Vec<String>, Vec<HeadingBlock>) {
    let paragraphs = segment_paragraphs(body, cfg.sentences_per_paragraph);
    let headings = assign_headings(&paragraphs, &cfg.heading_labels);
    (paragraphs, headings)
}

fn intro_line(paragraph: &str) -> String {
    let first = textprep::split_sentences(paragraph)
        .into_iter()
        .next()
        .unwrap_or_default();
    let words: Vec<&str> = first.split_whitespace().collect();
    if words.len() <= INTRO_MAX_WORDS {
        first
    } else {
        let mut s = words[..INTRO_MAX_WORDS].join(" ");
        s.push('…');
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(paragraphs: &[&str]) -> CleanedBody {
        CleanedBody {
            paragraphs: paragraphs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn existing_paragraph_breaks_are_respected() {
        let b = body(&["पहला पैरा।", "दूसरा पैरा।", "तीसरा पैरा।"]);
        assert_eq!(segment_paragraphs(&b, 3), b.paragraphs);
    }

    #[test]
    fn flat_body_is_windowed_by_sentence() {
        let b = body(&["One. Two. Three. Four. Five. Six. Seven."]);
        let paras = segment_paragraphs(&b, 3);
        assert_eq!(paras.len(), 3);
        assert_eq!(paras[0], "One. Two. Three.");
        // Partial trailing window is flushed, not dropped.
        assert_eq!(paras[2], "Seven.");
    }

    #[test]
    fn block_count_follows_paragraph_count() {
        let labels: Vec<String> = ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect();
        let one = vec!["Single paragraph here.".to_string()];
        assert_eq!(assign_headings(&one, &labels).len(), 1);

        let nine: Vec<String> = (0..9).map(|i| format!("Paragraph number {i}.")).collect();
        let hs = assign_headings(&nine, &labels);
        // 9/3 + 1 = 4 blocks, capped at 4.
        assert_eq!(hs.len(), 4);
        assert_eq!(hs[0].label, "A");
        assert_eq!(hs[3].label, "D");

        let many: Vec<String> = (0..30).map(|i| format!("Paragraph number {i}.")).collect();
        assert_eq!(assign_headings(&many, &labels).len(), 4);
    }

    #[test]
    fn intro_is_first_sentence_truncated_to_18_words() {
        let long: String = (0..25).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
        let paras = vec![format!("{long}. Second sentence.")];
        let labels = vec!["L".to_string()];
        let hs = assign_headings(&paras, &labels);
        assert!(hs[0].intro.ends_with('…'));
        assert_eq!(hs[0].intro.split_whitespace().count(), 18);
    }

    #[test]
    fn empty_body_yields_no_headings() {
        assert!(assign_headings(&[], &["L".to_string()]).is_empty());
        assert!(segment_paragraphs(&CleanedBody::default(), 3).is_empty());
    }
}
