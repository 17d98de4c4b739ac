//! Keyword ranking and primary-entity guessing.
//!
//! The entity guess is a capitalization heuristic with a gazetteer front-end,
//! not entity resolution; sentence-initial English words can and do win over
//! real names in pathological inputs. That precision limit is documented
//! behavior, not a bug.

use crate::{lexicon, textprep};
use once_cell::sync::Lazy;
use regex::Regex;
use seopipe_core::{TokenStats, FALLBACK_ENTITY};
use std::collections::BTreeMap;

// Two-or-more consecutive capitalized words.
static MULTI_TITLECASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)+\b").expect("multi-word regex"));
static SINGLE_TITLECASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][A-Za-z]{2,}\b").expect("single-word regex"));
// Letters plus combining marks: Devanagari matras and virama are marks, not
// letters, so a plain `is_alphabetic` scan would reject most Hindi words.
static ALPHA_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{M}]+$").expect("alpha token regex"));

/// Frequency-ranked content keywords.
///
/// Tokenize, drop stopwords, drop non-alphabetic tokens, drop the domain
/// blacklist, then rank by descending frequency with ascending lexical order
/// as the tie-break. Deterministic for identical input.
pub fn top_keywords(text: &str, n: usize) -> Vec<String> {
    let mut freq: BTreeMap<String, usize> = BTreeMap::new();
    for tok in textprep::tokenize(text) {
        if textprep::is_stopword(&tok)
            || !ALPHA_TOKEN_RE.is_match(&tok)
            || lexicon::KEYWORD_BLACKLIST.contains(&tok.as_str())
        {
            continue;
        }
        *freq.entry(tok).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = freq.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(n).map(|(k, _)| k).collect()
}

/// Case-folded, stopword-excluded token frequencies plus the entity guess.
pub fn token_stats(text: &str) -> TokenStats {
    let mut token_frequency: BTreeMap<String, usize> = BTreeMap::new();
    for tok in textprep::tokenize(text) {
        if textprep::is_stopword(&tok) {
            continue;
        }
        *token_frequency.entry(tok).or_insert(0) += 1;
    }
    TokenStats {
        token_frequency,
        primary_entity: guess_primary_entity(text),
    }
}

fn is_noise_word(w: &str) -> bool {
    lexicon::AUTHOR_NOISE.contains(&w.to_lowercase().as_str())
}

/// Best guess for the article's primary named entity.
///
/// 1. Gazetteer scan in declared priority order (case-insensitive, both
///    scripts); first hit returns its canonical name.
/// 2. Otherwise, capitalized sequences: multi-word candidates weigh 2 per
///    occurrence, single words 1, byline-noise and stopword candidates are
///    excluded, and ties go to the candidate seen first.
/// 3. Otherwise the `"Breaking News"` sentinel.
pub fn guess_primary_entity(text: &str) -> String {
    if text.trim().is_empty() {
        return FALLBACK_ENTITY.to_string();
    }

    let folded = text.to_lowercase();
    for entry in lexicon::GAZETTEER {
        if entry.aliases.iter().any(|a| folded.contains(a)) {
            return entry.canonical.to_string();
        }
    }

    // candidate -> (score, scan sequence number). The multi-word pass runs
    // first, so on equal scores a full name beats its own constituent words.
    let mut scores: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    let mut seq = 0usize;
    let mut bump = |cand: &str, weight: usize| {
        let e = scores.entry(cand.to_string()).or_insert((0, seq));
        e.0 += weight;
        seq += 1;
    };

    for m in MULTI_TITLECASE_RE.find_iter(text) {
        if m.as_str().split_whitespace().any(is_noise_word) {
            continue;
        }
        bump(m.as_str(), 2);
    }
    for m in SINGLE_TITLECASE_RE.find_iter(text) {
        let w = m.as_str();
        if is_noise_word(w) || textprep::is_stopword(w) {
            continue;
        }
        bump(w, 1);
    }

    scores
        .into_iter()
        .max_by(|a, b| {
            (a.1 .0)
                .cmp(&b.1 .0)
                .then_with(|| (b.1 .1).cmp(&a.1 .1))
        })
        .map(|(cand, _)| cand)
        .unwrap_or_else(|| FALLBACK_ENTITY.to_string())
}
