//! Paragraph-aware boilerplate stripping.
//!
//! Raw extracted text arrives with paragraph breaks signaled by blank lines.
//! Each candidate paragraph is tested against an ordered rule table; the
//! first matching rule names the drop reason, which keeps individual rules
//! testable and extensible without touching control flow.

use crate::{lexicon, textprep};
use once_cell::sync::Lazy;
use regex::Regex;
use seopipe_core::CleanedBody;

/// One drop rule: a predicate plus the reason it records.
pub struct DropRule {
    pub reason: &'static str,
    matches: fn(&str) -> bool,
}

/// Evaluated in order; first hit wins.
pub static DROP_RULES: &[DropRule] = &[
    DropRule {
        reason: "photo_credit",
        matches: has_credit_marker,
    },
    DropRule {
        reason: "byline",
        matches: has_byline_marker,
    },
    DropRule {
        reason: "date_or_agency",
        matches: has_update_marker,
    },
    DropRule {
        reason: "short_titlecase_line",
        matches: is_short_titlecase_line,
    },
    DropRule {
        reason: "too_little_text",
        matches: lacks_alpha,
    },
];

/// Why `paragraph` would be dropped, or `None` if it survives.
pub fn drop_reason(paragraph: &str) -> Option<&'static str> {
    DROP_RULES
        .iter()
        .find(|r| (r.matches)(paragraph))
        .map(|r| r.reason)
}

static PARA_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[\t ]*\n").expect("paragraph split regex"));

// "By <Name>" at line start, desk/reporter phrases, and their Hindi forms.
static BYLINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*by[\s:]|\bwritten by\b|\bstaff reporter\b|\breporter\b|\bnews desk\b|संवाददाता|न्यूज़ डेस्क|ब्यूरो")
        .expect("byline regex")
});

static UPDATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bupdated\b|\bpublished\b|\(\s*(?:pti|ani|ians)\s*\)").expect("update regex")
});

// Day + month-name + year in either order, plus fully numeric dates.
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    let months = lexicon::MONTH_NAMES.join("|");
    let pat = format!(
        r"(?i)\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{months})\s*,?\s*\d{{4}}\b|\b(?:{months})\s+\d{{1,2}}\s*,?\s*\d{{4}}\b|\b\d{{1,2}}[/.-]\d{{1,2}}[/.-]\d{{2,4}}\b"
    );
    Regex::new(&pat).expect("date regex")
});

// "(... photo ...)" parentheticals and trailing "photo:" / "photo -" fragments.
static INLINE_CREDIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\([^)]*(?:photo|फोटो|तस्वीर|साभार)[^)]*\)").expect("inline credit regex")
});
static TRAILING_CREDIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\bphoto\s*[:\-]\s.*$").expect("trailing credit regex"));

fn has_credit_marker(p: &str) -> bool {
    let low = p.to_lowercase();
    lexicon::CREDIT_MARKERS.iter().any(|m| low.contains(m))
}

fn has_byline_marker(p: &str) -> bool {
    BYLINE_RE.is_match(p)
}

fn has_update_marker(p: &str) -> bool {
    UPDATE_RE.is_match(p) || DATE_RE.is_match(p)
}

/// Stand-alone byline/credit name line: at most 4 words, every word starting
/// with an uppercase letter. Longer all-titlecase paragraphs are left alone.
fn is_short_titlecase_line(p: &str) -> bool {
    let words: Vec<&str> = p.split_whitespace().collect();
    if words.is_empty() || words.len() > 4 {
        return false;
    }
    words.iter().all(|w| {
        w.chars()
            .find(|c| c.is_alphabetic())
            .is_some_and(|c| c.is_uppercase())
    })
}

fn lacks_alpha(p: &str) -> bool {
    p.chars().filter(|c| c.is_alphabetic()).count() < 8
}

/// Remove inline photo-credit fragments from a surviving paragraph.
fn strip_inline_credits(p: &str) -> String {
    let s = INLINE_CREDIT_RE.replace_all(p, " ");
    TRAILING_CREDIT_RE.replace(&s, "").to_string()
}

/// Split raw text into paragraphs, drop boilerplate, normalize survivors.
///
/// Inline photo-credit fragments are stripped before rule evaluation so a
/// content paragraph with an embedded caption is not mistaken for a credit
/// line. If no paragraph survives, falls back to line-level filtering (lines
/// longer than 60 characters without a byline/photo/date marker). An empty
/// result is the caller's "extraction insufficient" signal, never an error
/// here.
pub fn clean_paragraphs(raw: &str) -> CleanedBody {
    let text = raw.replace('\r', "");
    let mut paragraphs = Vec::new();
    for p in PARA_SPLIT_RE.split(&text) {
        let p = p.trim();
        if p.is_empty() {
            continue;
        }
        let stripped = strip_inline_credits(p);
        if drop_reason(&stripped).is_some() {
            continue;
        }
        paragraphs.push(textprep::normalize(&stripped));
    }

    if paragraphs.is_empty() {
        for line in text.lines() {
            let line = line.trim();
            if line.chars().count() <= 60 {
                continue;
            }
            if has_credit_marker(line) || has_byline_marker(line) || has_update_marker(line) {
                continue;
            }
            paragraphs.push(textprep::normalize(line));
        }
    }

    CleanedBody { paragraphs }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byline_paragraph_is_dropped_and_content_kept() {
        let raw = "By Staff Reporter\n\nThe state government announced a new irrigation scheme for farmers today.";
        let body = clean_paragraphs(raw);
        assert_eq!(body.paragraphs.len(), 1);
        assert_eq!(
            body.paragraphs[0],
            "The state government announced a new irrigation scheme for farmers today."
        );
    }

    #[test]
    fn photo_credit_paragraph_is_dropped() {
        assert_eq!(drop_reason("Photo credit: agency handout"), Some("photo_credit"));
        assert_eq!(drop_reason("फोटो साभार: ट्विटर"), Some("photo_credit"));
    }

    #[test]
    fn agency_tag_and_dates_are_dropped() {
        assert_eq!(
            drop_reason("New Delhi (PTI) bureau dispatch"),
            Some("date_or_agency")
        );
        assert_eq!(
            drop_reason("Updated on request of the editor"),
            Some("date_or_agency")
        );
        assert_eq!(drop_reason("12 January 2024"), Some("date_or_agency"));
        assert_eq!(drop_reason("15 जनवरी 2024 को जारी"), Some("date_or_agency"));
        assert_eq!(drop_reason("03/02/2024"), Some("date_or_agency"));
    }

    #[test]
    fn short_titlecase_line_is_dropped_but_long_titlecase_is_not() {
        assert_eq!(drop_reason("Rakesh Kumar Sharma"), Some("short_titlecase_line"));
        // >4 words: the rule must not fire even though every word is titlecase.
        assert_eq!(
            drop_reason("Supreme Court Orders Fresh Elections In State Body Polls Thursday Morning Session"),
            None
        );
    }

    #[test]
    fn near_empty_paragraph_is_dropped() {
        assert_eq!(drop_reason("॥ --- ॥"), Some("too_little_text"));
        assert_eq!(drop_reason("ok then"), Some("too_little_text"));
    }

    #[test]
    fn inline_parenthetical_credit_is_stripped() {
        let raw = "मुख्यमंत्री ने परियोजना का उद्घाटन किया (फाइल photo साभार) और जनता को संबोधित किया।";
        let body = clean_paragraphs(raw);
        assert_eq!(body.paragraphs.len(), 1);
        assert!(!body.paragraphs[0].contains("photo"));
        assert!(body.paragraphs[0].contains("संबोधित"));
    }

    #[test]
    fn all_boilerplate_input_yields_empty_body() {
        let raw = "By Staff Reporter\n\nPhoto: handout\n\nUpdated today";
        assert!(clean_paragraphs(raw).is_empty());
        assert!(clean_paragraphs("").is_empty());
    }

    #[test]
    fn line_level_fallback_rescues_single_newline_text() {
        // No blank-line paragraph breaks anywhere, and the first "paragraph"
        // (the whole blob) contains a photo marker, so paragraph mode drops
        // everything. Line mode keeps the long marker-free lines.
        let raw = "Photo: something promotional that poisons the single paragraph badly\nThe council approved the new metro corridor after a marathon session on the budget.\nShort line.";
        let body = clean_paragraphs(raw);
        assert_eq!(body.paragraphs.len(), 1);
        assert!(body.paragraphs[0].starts_with("The council approved"));
    }
}
