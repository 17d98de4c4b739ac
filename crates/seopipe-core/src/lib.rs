use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("extraction insufficient: {words} words after cleaning (minimum {min})")]
    ExtractionInsufficient { words: usize, min: usize },
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("ai rewrite failed: {0}")]
    AiRewrite(String),
    #[error("not configured: {0}")]
    NotConfigured(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Entity sentinel used when no gazetteer hit and no capitalized candidate exists.
pub const FALLBACK_ENTITY: &str = "Breaking News";

/// One article handed to the pipeline: fetched-page text or pasted text.
///
/// `declared_title` is the scraped/pasted headline when one is known; the
/// synthesizer only uses it as a hint and cleans it before reuse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInput {
    pub text: String,
    pub declared_title: Option<String>,
}

impl RawInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            declared_title: None,
        }
    }

    pub fn with_title(text: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            declared_title: Some(title.into()),
        }
    }
}

/// Boilerplate-stripped, whitespace-normalized article body.
///
/// Invariant: every paragraph carries at least 8 alphabetic characters and was
/// not classified as a byline/credit/date line. An empty paragraph list means
/// "extraction insufficient", never a crash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedBody {
    pub paragraphs: Vec<String>,
}

impl CleanedBody {
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Flat view for consumers that want a single string (blank-line joined).
    pub fn flat(&self) -> String {
        self.paragraphs.join("\n\n")
    }
}

/// Frequency-ranked content tokens plus the guessed primary entity.
///
/// `BTreeMap` keeps iteration deterministic for identical input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStats {
    pub token_frequency: BTreeMap<String, usize>,
    pub primary_entity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingBlock {
    pub label: String,
    pub intro: String,
}

/// Terminal artifact of one analysis: everything the rendering/export
/// collaborators need, as plain text (no pre-embedded markup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoBundle {
    /// 1–3 headline candidates, best first, each clamped to the configured max.
    pub titles: Vec<String>,
    pub meta: String,
    pub slug: String,
    pub keywords: Vec<String>,
    pub headings: Vec<HeadingBlock>,
    pub paragraphs: Vec<String>,
    /// Alt-text suggestions for article images, one per expected image.
    pub image_alts: Vec<String>,
    pub notes: Vec<String>,
}

/// Orchestrator output: the bundle plus recovered-failure diagnostics.
///
/// AI-call failures and partial AI responses are never surfaced as errors;
/// they land here as warnings (the caller may log them).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub bundle: SeoBundle,
    pub ai_used: bool,
    pub warnings: Vec<String>,
}

/// What the page-fetcher collaborator hands back for a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    pub title: String,
    pub body: String,
    pub canonical: String,
}

impl FetchedPage {
    pub fn canonical_url(&self) -> Option<url::Url> {
        url::Url::parse(self.canonical.trim()).ok()
    }
}

/// Optional-field mirror of the AI rewriter response.
///
/// Every field is optional on purpose: a partial response is acceptable and
/// the orchestrator backfills missing fields from the heuristic pipeline.
/// Accepts both `title` (older variants) and `titles`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiSuggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headings: Option<Vec<AiHeading>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

/// One section in an AI response. Accepts `h2` or `label` for the heading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiHeading {
    #[serde(alias = "label", alias = "heading")]
    pub h2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub h3: Vec<String>,
}

impl AiSuggestion {
    /// Parse a raw model reply. Tolerates Markdown code fences around the JSON
    /// (models add them even when told not to).
    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(strip_code_fences(raw))
    }

    /// Headline candidates in priority order, trimmed, empties dropped.
    pub fn title_candidates(&self) -> Vec<String> {
        let mut out: Vec<String> = match (&self.titles, &self.title) {
            (Some(list), _) => list.clone(),
            (None, Some(one)) => vec![one.clone()],
            (None, None) => Vec::new(),
        };
        out.retain(|t| !t.trim().is_empty());
        for t in &mut out {
            *t = t.trim().to_string();
        }
        out
    }
}

fn strip_code_fences(s: &str) -> &str {
    let t = s.trim();
    let Some(rest) = t.strip_prefix("```") else {
        return t;
    };
    // Drop the info string ("json") up to the first newline.
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Knobs for one analysis. Read-only after construction; length contracts are
/// soft targets enforced by hard clamps, never validated ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoConfig {
    pub title_max_chars: usize,
    /// How many headline candidates to synthesize (1–3).
    pub title_count: usize,
    pub meta_max_chars: usize,
    pub slug_max_chars: usize,
    /// Cleaned bodies below this word count are reported as
    /// `ExtractionInsufficient`.
    pub min_body_words: usize,
    pub keyword_count: usize,
    /// How many image alt-text suggestions to produce (1–4).
    pub image_alt_count: usize,
    /// Sentence window when re-segmenting a body without paragraph breaks.
    pub sentences_per_paragraph: usize,
    /// Ordered section-heading rotation, cyclically assigned to blocks.
    /// Positional labels, not content-derived topics.
    pub heading_labels: Vec<String>,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            title_max_chars: 60,
            title_count: 3,
            meta_max_chars: 160,
            slug_max_chars: 64,
            min_body_words: 25,
            keyword_count: 6,
            image_alt_count: 2,
            sentences_per_paragraph: 3,
            heading_labels: vec![
                "पृष्ठभूमि".to_string(),
                "घटना विवरण".to_string(),
                "बयान / प्रतिक्रिया".to_string(),
                "जांच की स्थिति".to_string(),
                "असर / नतीजा".to_string(),
            ],
        }
    }
}

#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

#[async_trait::async_trait]
pub trait AiRewriter: Send + Sync {
    fn name(&self) -> &'static str;
    /// Single blocking attempt, no internal retry. Any failure or malformed
    /// response must come back as `Error::AiRewrite`; the orchestrator treats
    /// it as a recoverable fallback trigger.
    async fn rewrite(&self, body: &str, original_title: Option<&str>) -> Result<AiSuggestion>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_parses_plain_json() {
        let s = AiSuggestion::from_json_str(r#"{"titles": ["A", "B"], "meta": "m"}"#).unwrap();
        assert_eq!(s.title_candidates(), vec!["A", "B"]);
        assert_eq!(s.meta.as_deref(), Some("m"));
        assert!(s.slug.is_none());
    }

    #[test]
    fn suggestion_parses_code_fenced_json() {
        let raw = "```json\n{\"title\": \"Only One\"}\n```";
        let s = AiSuggestion::from_json_str(raw).unwrap();
        assert_eq!(s.title_candidates(), vec!["Only One"]);
    }

    #[test]
    fn suggestion_heading_accepts_label_alias() {
        let s = AiSuggestion::from_json_str(r#"{"headings": [{"label": "पृष्ठभूमि"}]}"#).unwrap();
        let hs = s.headings.unwrap();
        assert_eq!(hs[0].h2, "पृष्ठभूमि");
        assert!(hs[0].h3.is_empty());
    }

    #[test]
    fn suggestion_rejects_non_json() {
        assert!(AiSuggestion::from_json_str("sorry, here is your title: X").is_err());
    }

    #[test]
    fn title_candidates_drop_blank_entries() {
        let s = AiSuggestion::from_json_str(r#"{"titles": ["  ", "Real"]}"#).unwrap();
        assert_eq!(s.title_candidates(), vec!["Real"]);
    }

    #[test]
    fn canonical_url_rejects_garbage() {
        let mut page = FetchedPage {
            title: "t".to_string(),
            body: "b".to_string(),
            canonical: " https://example.com/story ".to_string(),
        };
        assert!(page.canonical_url().is_some());
        page.canonical = "not a url".to_string();
        assert!(page.canonical_url().is_none());
    }

    #[test]
    fn config_defaults_are_in_documented_ranges() {
        let cfg = SeoConfig::default();
        assert!((50..=80).contains(&cfg.title_max_chars));
        assert!((140..=160).contains(&cfg.meta_max_chars));
        assert_eq!(cfg.slug_max_chars, 64);
        assert!((1..=3).contains(&cfg.title_count));
        assert!((1..=4).contains(&cfg.image_alt_count));
        assert!(!cfg.heading_labels.is_empty());
    }

    #[test]
    fn error_display_is_stable() {
        let e = Error::ExtractionInsufficient { words: 4, min: 25 };
        assert_eq!(
            e.to_string(),
            "extraction insufficient: 4 words after cleaning (minimum 25)"
        );
    }
}
