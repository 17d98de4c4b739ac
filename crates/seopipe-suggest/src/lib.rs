//! Heuristic SEO suggestion pipeline for news articles.
//!
//! Given a fetched or pasted article body (Hindi and/or English), this crate
//! strips boilerplate, ranks keywords, guesses the primary entity, and
//! synthesizes titles, a meta description, a slug, a heading outline and
//! readability notes into one [`seopipe_core::SeoBundle`].
//!
//! The pipeline is pure, CPU-bound and deterministic; the only async surface
//! is the optional AI rewriter collaborator, whose failures are always
//! recovered by the heuristic path.

pub mod boilerplate;
pub mod keywords;
pub mod lexicon;
pub mod openai_compat;
pub mod outline;
pub mod pipeline;
pub mod readability;
pub mod synthesize;
pub mod textprep;

pub use pipeline::{
    detect_declared_title, heuristic_bundle, merge_suggestion, split_batch, Pipeline,
};
