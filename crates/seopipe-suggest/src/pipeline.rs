//! Orchestration of one analysis request.
//!
//! Per request: triage the raw text, strip boilerplate, optionally attempt
//! the AI rewriter, and assemble one `SeoBundle`. The heuristic path is the
//! contract: it runs whenever no AI collaborator is configured, whenever the
//! AI call fails, and per-field whenever the AI response is partial.

use crate::{boilerplate, keywords, outline, readability, synthesize, textprep};
use seopipe_core::{
    AiRewriter, AiSuggestion, Analysis, CleanedBody, Error, HeadingBlock, RawInput, Result,
    SeoBundle, SeoConfig,
};
use std::sync::Arc;

pub struct Pipeline {
    cfg: SeoConfig,
    ai: Option<Arc<dyn AiRewriter>>,
}

impl Pipeline {
    pub fn new(cfg: SeoConfig) -> Self {
        Self { cfg, ai: None }
    }

    pub fn with_ai(mut self, ai: Arc<dyn AiRewriter>) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn config(&self) -> &SeoConfig {
        &self.cfg
    }

    /// Clean the raw text and verify there is enough body to work with.
    fn triage(&self, input: &RawInput) -> Result<CleanedBody> {
        let body = boilerplate::clean_paragraphs(&input.text);
        let words = textprep::word_count(&body.flat());
        if body.is_empty() || words < self.cfg.min_body_words {
            return Err(Error::ExtractionInsufficient {
                words,
                min: self.cfg.min_body_words,
            });
        }
        Ok(body)
    }

    /// Heuristic-only analysis (no AI attempt). Deterministic: identical
    /// input yields an identical bundle.
    pub fn analyze_heuristic(&self, input: &RawInput) -> Result<Analysis> {
        let body = self.triage(input)?;
        Ok(Analysis {
            bundle: heuristic_bundle(&body, input.declared_title.as_deref(), &self.cfg),
            ai_used: false,
            warnings: Vec::new(),
        })
    }

    /// Full analysis: AI attempt when configured, heuristic fallback always
    /// available. AI failures never surface as errors, only as warnings.
    pub async fn analyze(&self, input: &RawInput) -> Result<Analysis> {
        let body = self.triage(input)?;
        let fallback = heuristic_bundle(&body, input.declared_title.as_deref(), &self.cfg);
        let mut warnings = Vec::new();

        if let Some(ai) = &self.ai {
            match ai
                .rewrite(&body.flat(), input.declared_title.as_deref())
                .await
            {
                Ok(suggestion) => {
                    let (bundle, backfilled) = merge_suggestion(&suggestion, fallback, &self.cfg);
                    // A reply that backfilled every field is a heuristic
                    // result, whatever the transport said.
                    let ai_used = backfilled.len() < MERGEABLE_FIELDS;
                    if !ai_used {
                        warnings.push(format!(
                            "ai reply from {} contributed no usable fields, using heuristic fallback",
                            ai.name()
                        ));
                    } else if !backfilled.is_empty() {
                        warnings.push(format!(
                            "ai response missing fields, backfilled from heuristics: {}",
                            backfilled.join(", ")
                        ));
                    }
                    return Ok(Analysis {
                        bundle,
                        ai_used,
                        warnings,
                    });
                }
                Err(e) => {
                    warnings.push(format!(
                        "ai rewrite failed ({}), using heuristic fallback: {e}",
                        ai.name()
                    ));
                }
            }
        }

        Ok(Analysis {
            bundle: fallback,
            ai_used: false,
            warnings,
        })
    }

    /// Analyze a batch; each article is independent and a failure (e.g.
    /// insufficient extraction) does not abort the siblings.
    pub async fn analyze_batch(&self, inputs: &[RawInput]) -> Vec<Result<Analysis>> {
        let mut out = Vec::with_capacity(inputs.len());
        for input in inputs {
            out.push(self.analyze(input).await);
        }
        out
    }
}

/// The full fallback path: scorer → synthesizer → restructurer → auditor,
/// in that order.
pub fn heuristic_bundle(
    body: &CleanedBody,
    declared_title: Option<&str>,
    cfg: &SeoConfig,
) -> SeoBundle {
    let flat = body.flat();
    let titles = synthesize::title_variants(&flat, declared_title, cfg);
    let meta = synthesize::generate_meta(&flat, cfg.meta_max_chars);
    let slug_source = titles
        .first()
        .filter(|t| !t.is_empty())
        .map(String::as_str)
        .unwrap_or("article");
    let slug = synthesize::slugify_with(slug_source, cfg.slug_max_chars);
    let keywords = keywords::top_keywords(&flat, cfg.keyword_count);
    let (paragraphs, headings) = outline::restructure(body, cfg);
    let image_alts = synthesize::image_alts(&flat, cfg.image_alt_count);
    let notes = readability::readability_notes(&flat);
    SeoBundle {
        titles,
        meta,
        slug,
        keywords,
        headings,
        paragraphs,
        image_alts,
        notes,
    }
}

/// How many bundle fields `merge_suggestion` can take from an AI reply
/// (image alts are heuristic-only and never merged).
const MERGEABLE_FIELDS: usize = 7;

/// Normalize an AI suggestion into a `SeoBundle`, backfilling every missing
/// or degenerate field from the heuristic fallback. Returns the merged bundle
/// and the names of the backfilled fields.
///
/// AI-provided titles/meta are re-clamped and the slug re-sanitized so the
/// bundle invariants hold regardless of what the model returned.
pub fn merge_suggestion(
    suggestion: &AiSuggestion,
    fallback: SeoBundle,
    cfg: &SeoConfig,
) -> (SeoBundle, Vec<&'static str>) {
    let mut backfilled = Vec::new();

    let mut titles: Vec<String> = suggestion
        .title_candidates()
        .iter()
        .map(|t| synthesize::clamp(t, cfg.title_max_chars))
        .filter(|t| !t.is_empty())
        .collect();
    titles.truncate(3);
    if titles.is_empty() {
        backfilled.push("titles");
        titles = fallback.titles;
    }

    let meta = match suggestion.meta.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => synthesize::soft_clamp(m, cfg.meta_max_chars),
        _ => {
            backfilled.push("meta");
            fallback.meta
        }
    };

    let slug = match suggestion.slug.as_deref() {
        Some(s) => {
            let sanitized = synthesize::slugify_with(s, cfg.slug_max_chars);
            if sanitized.is_empty() {
                backfilled.push("slug");
                fallback.slug
            } else {
                sanitized
            }
        }
        None => {
            backfilled.push("slug");
            fallback.slug
        }
    };

    let keywords = match &suggestion.keywords {
        Some(ks) => {
            let mut ks: Vec<String> = ks
                .iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();
            ks.truncate(cfg.keyword_count);
            if ks.is_empty() {
                backfilled.push("keywords");
                fallback.keywords
            } else {
                ks
            }
        }
        None => {
            backfilled.push("keywords");
            fallback.keywords
        }
    };

    let headings = match &suggestion.headings {
        Some(hs) => {
            let hs: Vec<HeadingBlock> = hs
                .iter()
                .filter(|h| !h.h2.trim().is_empty())
                .map(|h| HeadingBlock {
                    label: h.h2.trim().to_string(),
                    intro: h
                        .intro
                        .as_deref()
                        .or_else(|| h.h3.first().map(String::as_str))
                        .unwrap_or("")
                        .trim()
                        .to_string(),
                })
                .collect();
            if hs.is_empty() {
                backfilled.push("headings");
                fallback.headings
            } else {
                hs
            }
        }
        None => {
            backfilled.push("headings");
            fallback.headings
        }
    };

    let paragraphs = match &suggestion.paragraphs {
        Some(ps) => {
            let ps: Vec<String> = ps
                .iter()
                .map(|p| textprep::normalize(p))
                .filter(|p| !p.is_empty())
                .collect();
            if ps.is_empty() {
                backfilled.push("paragraphs");
                fallback.paragraphs
            } else {
                ps
            }
        }
        None => {
            backfilled.push("paragraphs");
            fallback.paragraphs
        }
    };

    let notes = match &suggestion.notes {
        Some(ns) => {
            let ns: Vec<String> = ns
                .iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect();
            if ns.is_empty() {
                backfilled.push("notes");
                fallback.notes
            } else {
                ns
            }
        }
        None => {
            backfilled.push("notes");
            fallback.notes
        }
    };

    (
        SeoBundle {
            titles,
            meta,
            slug,
            keywords,
            headings,
            paragraphs,
            image_alts: fallback.image_alts,
            notes,
        },
        backfilled,
    )
}

/// Paste-mode heuristic: when the first non-empty line is short (≤12 words)
/// and more text follows, treat it as the article's declared title.
pub fn detect_declared_title(raw: &str) -> Option<String> {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 2 {
        return None;
    }
    let first = lines[0];
    (first.split_whitespace().count() <= 12).then(|| first.to_string())
}

/// Split pasted text into independent articles on delimiter lines of three or
/// more dashes. Blank articles are dropped.
pub fn split_batch(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut cur = String::new();
    for line in text.lines() {
        let t = line.trim();
        if t.len() >= 3 && t.chars().all(|c| c == '-') {
            if !cur.trim().is_empty() {
                parts.push(cur.trim().to_string());
            }
            cur.clear();
        } else {
            cur.push_str(line);
            cur.push('\n');
        }
    }
    if !cur.trim().is_empty() {
        parts.push(cur.trim().to_string());
    }
    parts
}
