//! Title/meta/slug synthesis.
//!
//! Length contracts here are soft targets enforced by hard clamps: output may
//! come back shorter than the target for thin input, and callers must treat
//! that as advisory, never as a rejection. None of these functions error on
//! empty or degenerate input.

use crate::{keywords, lexicon, textprep};
use once_cell::sync::Lazy;
use regex::Regex;
use seopipe_core::{SeoConfig, FALLBACK_ENTITY};

// Trailing "By <Name>" author fragments on headlines.
static BY_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[Bb]y[:\s]+[A-Z][\w\s.\-]{1,50}$").expect("by-suffix regex"));
// Residual "updated"/"featured"/"photo" tails after separator splitting.
static TRAILING_JUNK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:updated|featured|photo).*$").expect("trailing junk regex"));
// Trailing "By <Name>" on meta descriptions.
static META_BY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bBy\s+[A-Z][\w\s.]{1,40}$").expect("meta-by regex"));

/// Hard truncate to `max_chars` characters, trailing whitespace trimmed.
/// No ellipsis.
pub fn clamp(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect::<String>().trim_end().to_string()
}

/// Truncate to at most `max_chars` characters without cutting mid-word:
/// when over the limit, cut at the last whitespace boundary inside it.
pub fn soft_clamp(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.trim().to_string();
    }
    let hard: String = s.chars().take(max_chars).collect();
    match hard.rfind(char::is_whitespace) {
        Some(i) => hard[..i].trim_end().to_string(),
        None => hard.trim_end().to_string(),
    }
}

fn title_case(w: &str) -> String {
    let mut chars = w.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn strip_residual_fragments(t: &str) -> String {
    let t = BY_SUFFIX_RE.replace(t, "");
    TRAILING_JUNK_RE.replace(t.trim(), "").trim().to_string()
}

/// Clean a scraped headline: drop trailing author/update/"featured" suffixes
/// and everything from the first pipe/em-dash/en-dash/colon separator onward.
pub fn clean_headline(title: &str) -> String {
    let t = textprep::normalize(title);
    let t = BY_SUFFIX_RE.replace(&t, "");
    let t = t.split(['|', '—', '–', ':']).next().unwrap_or("").trim();
    TRAILING_JUNK_RE.replace(t, "").trim().to_string()
}

fn first_sentence(body: &str) -> String {
    textprep::split_sentences(body.trim())
        .into_iter()
        .next()
        .unwrap_or_else(|| body.trim().to_string())
}

fn leading_words(s: &str, n: usize) -> String {
    s.split_whitespace().take(n).collect::<Vec<_>>().join(" ")
}

/// Build one SEO headline.
///
/// With a usable original title (≥6 chars after cleaning): reuse it, appending
/// `" — TopKeyword"` when the keyword is absent and the result still fits.
/// Without one: entity-or-keyword-seeded fragment of the first sentence.
pub fn generate_title(body: &str, original_title: Option<&str>, max_chars: usize) -> String {
    if let Some(orig) = original_title {
        let cleaned = clean_headline(orig);
        if cleaned.chars().count() >= 6 {
            let kws = keywords::top_keywords(body, 2);
            if let Some(kw) = kws.first() {
                if !cleaned.to_lowercase().contains(kw.as_str()) {
                    let cand = format!("{cleaned} — {}", title_case(kw));
                    if cand.chars().count() <= max_chars {
                        return clamp(&cand, max_chars);
                    }
                }
            }
            return clamp(&cleaned, max_chars);
        }
    }

    let short = leading_words(&first_sentence(body), 12);
    let entity = keywords::guess_primary_entity(body);
    let kws = keywords::top_keywords(body, 2);
    let title = if entity != FALLBACK_ENTITY {
        format!("{entity}: {short}")
    } else if let Some(kw) = kws.first() {
        format!("{short} — {}", title_case(kw))
    } else {
        short
    };
    clamp(title.trim(), max_chars)
}

/// 1–3 distinct headline candidates per `cfg.title_count`.
///
/// Candidate 1 is the factual headline from [`generate_title`]; candidate 2 a
/// keyword-seeded hook; candidate 3 a first-sentence summary. Each is
/// post-cleaned of residual byline/date fragments and clamped independently.
/// Always returns at least one entry (possibly empty for degenerate input).
pub fn title_variants(body: &str, original_title: Option<&str>, cfg: &SeoConfig) -> Vec<String> {
    let want = cfg.title_count.clamp(1, 3);
    let max = cfg.title_max_chars;
    let mut out = vec![generate_title(body, original_title, max)];

    let mut push_unique = |out: &mut Vec<String>, cand: String| {
        let cand = clamp(&strip_residual_fragments(&cand), max);
        if !cand.is_empty() && !out.contains(&cand) {
            out.push(cand);
        }
    };

    if out.len() < want {
        if let Some(kw) = keywords::top_keywords(body, 1).first() {
            let hook = format!(
                "{}: {}",
                title_case(kw),
                leading_words(&first_sentence(body), 8)
            );
            push_unique(&mut out, hook);
        }
    }
    if out.len() < want {
        push_unique(&mut out, leading_words(&first_sentence(body), 12));
    }

    out.truncate(want);
    out
}

/// Meta description: first ~30 words of the normalized body, a keyword tail,
/// and a soft (word-boundary) clamp to `max_chars`.
pub fn generate_meta(body: &str, max_chars: usize) -> String {
    let body_clean = textprep::normalize(body);
    let snippet = leading_words(&body_clean, 30);
    let kws = keywords::top_keywords(body, 3);
    let meta = if kws.is_empty() {
        snippet
    } else {
        format!("{snippet} | Keywords: {}", kws.join(", "))
    };
    let meta = META_BY_RE.replace(meta.trim(), "");
    soft_clamp(meta.trim(), max_chars)
}

const ALT_MAX_CHARS: usize = 80;

/// Alt-text suggestions for article images: the primary entity plus the top
/// two keywords, one numbered scene per expected image, each ≤80 chars.
pub fn image_alts(text: &str, count: usize) -> Vec<String> {
    let entity = keywords::guess_primary_entity(text);
    let kws = keywords::top_keywords(text, 4);
    let mut base = std::iter::once(entity.as_str())
        .chain(kws.iter().take(2).map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();
    if base.is_empty() {
        base = "news image".to_string();
    }
    (1..=count)
        .map(|i| clamp(&format!("{base} - scene {i}"), ALT_MAX_CHARS))
        .collect()
}

/// URL-safe slug: ASCII transliteration, lowercase, `[a-z0-9-]` only,
/// English-stopword segments dropped, hyphens collapsed/trimmed, ≤64 chars.
/// Pure: the same title always yields the same slug.
pub fn slugify(title: &str) -> String {
    slugify_with(title, 64)
}

pub fn slugify_with(title: &str, max_chars: usize) -> String {
    let ascii = deunicode::deunicode(title).to_lowercase();
    let mut kept = String::with_capacity(ascii.len());
    for ch in ascii.chars() {
        match ch {
            'a'..='z' | '0'..='9' => kept.push(ch),
            ' ' | '-' | '_' => kept.push('-'),
            _ => {}
        }
    }
    let joined = kept
        .split('-')
        .filter(|p| !p.is_empty() && !lexicon::EN_STOPWORDS.contains(p))
        .collect::<Vec<_>>()
        .join("-");
    clamp(&joined, max_chars).trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "The assembly passed the water budget today. Opposition members walked out in protest. The budget allocates funds for canal repair.";

    #[test]
    fn clamp_respects_char_limit_on_multibyte_text() {
        let s = "राहुल गांधी ने प्रेस वार्ता की";
        let c = clamp(s, 10);
        assert!(c.chars().count() <= 10);
        assert_eq!(clamp("", 60), "");
    }

    #[test]
    fn soft_clamp_cuts_at_word_boundary() {
        let s = "alpha beta gamma delta";
        let c = soft_clamp(s, 12);
        assert_eq!(c, "alpha beta");
        assert_eq!(soft_clamp("short", 12), "short");
    }

    #[test]
    fn clean_headline_strips_author_and_separator_tails() {
        assert_eq!(
            clean_headline("Court verdict shakes capital | Politics Desk"),
            "Court verdict shakes capital"
        );
        assert_eq!(
            clean_headline("Monsoon session begins By Ramesh Sharma"),
            "Monsoon session begins"
        );
        assert_eq!(
            clean_headline("Flood relief announced Updated 12 May 2024"),
            "Flood relief announced"
        );
    }

    #[test]
    fn title_reuses_cleaned_original_and_appends_keyword() {
        let t = generate_title(BODY, Some("Assembly session | Live"), 60);
        assert!(t.starts_with("Assembly session"));
        assert!(t.chars().count() <= 60);
    }

    #[test]
    fn title_without_original_is_entity_seeded() {
        let body = "Akhilesh Yadav met flood victims in the district. Relief camps are being set up.";
        let t = generate_title(body, None, 60);
        assert!(t.starts_with("Akhilesh Yadav:"), "got {t:?}");
        assert!(t.chars().count() <= 60);
    }

    #[test]
    fn title_on_empty_body_is_empty_not_a_panic() {
        assert_eq!(generate_title("", None, 60), "");
    }

    #[test]
    fn variants_are_distinct_and_bounded() {
        let cfg = SeoConfig::default();
        let titles = title_variants(BODY, None, &cfg);
        assert!((1..=3).contains(&titles.len()));
        for (i, t) in titles.iter().enumerate() {
            assert!(t.chars().count() <= cfg.title_max_chars);
            assert!(!titles[i + 1..].contains(t), "duplicate candidate {t:?}");
        }
    }

    #[test]
    fn single_title_config_yields_one_candidate() {
        let cfg = SeoConfig {
            title_count: 1,
            ..SeoConfig::default()
        };
        assert_eq!(title_variants(BODY, None, &cfg).len(), 1);
    }

    #[test]
    fn meta_carries_keyword_tail_and_fits() {
        let meta = generate_meta(BODY, 160);
        assert!(meta.chars().count() <= 160);
        assert!(meta.contains("| Keywords:"), "got {meta:?}");
        assert!(meta.starts_with("The assembly passed"));
    }

    #[test]
    fn meta_never_cuts_mid_word() {
        let body = "प्रशासन ने बाढ़ प्रभावित इलाकों में राहत शिविर लगाए हैं और स्वास्थ्य दल तैनात किए हैं।";
        let meta = generate_meta(body, 40);
        assert!(meta.chars().count() <= 40);
        assert!(!meta.ends_with(' '));
    }

    #[test]
    fn image_alts_are_entity_and_keyword_seeded() {
        let body = "Akhilesh Yadav met flood victims. Relief camps for flood victims are ready.";
        let alts = image_alts(body, 2);
        assert_eq!(alts.len(), 2);
        assert!(alts[0].starts_with("Akhilesh Yadav"), "got {:?}", alts[0]);
        assert!(alts[0].ends_with("- scene 1"));
        assert!(alts[1].ends_with("- scene 2"));
        for a in &alts {
            assert!(a.chars().count() <= 80);
        }
    }

    #[test]
    fn image_alts_fall_back_to_the_entity_sentinel_on_thin_text() {
        let alts = image_alts("के की का और", 1);
        assert_eq!(alts, vec!["Breaking News - scene 1"]);
    }

    #[test]
    fn slug_is_well_formed() {
        let slug = slugify("राहुल गांधी: दिल्ली में प्रेस वार्ता!");
        assert!(!slug.is_empty());
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.contains("--"));
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        assert!(slug.chars().count() <= 64);
    }

    #[test]
    fn slug_drops_stopword_segments() {
        assert_eq!(slugify("The Rise of the Machines"), "rise-machines");
    }

    #[test]
    fn slug_is_pure() {
        let t = "Budget 2024 — क्या बदलेगा?";
        assert_eq!(slugify(t), slugify(t));
    }

    #[test]
    fn slug_of_empty_title_is_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("॥ — ॥"), "");
    }
}
