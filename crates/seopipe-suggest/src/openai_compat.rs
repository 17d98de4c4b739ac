//! AI rewriter adapter for OpenAI-compatible chat.completions endpoints.
//!
//! One blocking attempt per article, no internal retry: every failure mode
//! (network, auth, non-JSON reply) maps to `Error::AiRewrite`, which the
//! orchestrator downgrades to a warning and recovers from heuristically.

use async_trait::async_trait;
use seopipe_core::{AiRewriter, AiSuggestion, Error, Result};
use serde::{Deserialize, Serialize};

fn env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Clone)]
pub struct OpenAiCompatRewriter {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout_ms: u64,
    max_tokens: u64,
}

impl OpenAiCompatRewriter {
    pub fn from_env(client: reqwest::Client) -> Result<Self> {
        let base_url = env("SEOPIPE_OPENAI_COMPAT_BASE_URL").ok_or_else(|| {
            Error::NotConfigured("missing SEOPIPE_OPENAI_COMPAT_BASE_URL".to_string())
        })?;
        let model = env("SEOPIPE_OPENAI_COMPAT_MODEL").ok_or_else(|| {
            Error::NotConfigured("missing SEOPIPE_OPENAI_COMPAT_MODEL".to_string())
        })?;
        let timeout_ms = env("SEOPIPE_OPENAI_COMPAT_TIMEOUT_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30_000);
        Ok(Self {
            client,
            base_url,
            api_key: env("SEOPIPE_OPENAI_COMPAT_API_KEY"),
            model,
            timeout_ms,
            max_tokens: 800,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_chat_completions(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }

    fn build_prompt(body: &str, original_title: Option<&str>) -> String {
        format!(
            r#"You are an expert news editor and SEO specialist for a Hindi+English newspaper.
Input: raw news article body below, and optionally the scraped original title.
Task: produce a JSON object ONLY (no extra commentary) with these fields:
- titles: an array of up to 3 Google/SEO-friendly headlines (Hindi or Hinglish allowed), 50-60 characters each if possible.
- meta: an SEO meta description (150-160 chars ideal).
- slug: url-safe slug (lowercase, hyphen-separated).
- keywords: an array of 5 short keywords/phrases.
- headings: an array of section objects {{ "h2": "<H2 text>", "h3": ["sub1", ...] }}. Provide at least 2 H2s if appropriate.
- paragraphs: an array of paragraph strings rewriting the article into clear short paragraphs (3-6 lines each). Keep factual content the same; do not invent facts.
- notes: short array of readability/SEO notes (2-4 items).

Constraints:
- Do NOT add new factual claims that are not in the body. If something is unclear, keep it neutral.
- Produce clean JSON only. Use Unicode (Hindi) where natural.
- Keep titles and meta within recommended lengths (truncate if necessary).
- Use the original title as a hint for tone/subject if present.

Original title:
{}

Article body:
{}

Respond with JSON only."#,
            original_title.unwrap_or(""),
            body
        )
    }
}

#[async_trait]
impl AiRewriter for OpenAiCompatRewriter {
    fn name(&self) -> &'static str {
        "openai_compat"
    }

    async fn rewrite(&self, body: &str, original_title: Option<&str>) -> Result<AiSuggestion> {
        let req = ChatCompletionsRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: "You are a helpful assistant.".to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: Self::build_prompt(body, original_title),
                },
            ],
            max_tokens: Some(self.max_tokens),
            temperature: Some(0.2),
            stream: Some(false),
        };

        let mut rb = self
            .client
            .post(self.endpoint_chat_completions())
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(k) = &self.api_key {
            rb = rb.header(reqwest::header::AUTHORIZATION, format!("Bearer {k}"));
        }

        let resp = rb
            .json(&req)
            .send()
            .await
            .map_err(|e| Error::AiRewrite(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::AiRewrite(format!(
                "chat.completions HTTP {status}"
            )));
        }

        let parsed: ChatCompletionsResponse = resp
            .json()
            .await
            .map_err(|e| Error::AiRewrite(e.to_string()))?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();
        AiSuggestion::from_json_str(&content)
            .map_err(|e| Error::AiRewrite(format!("non-JSON model reply: {e}")))
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionsRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_base_url_and_model() {
        // Env is untouched in the test runner; absence must be NotConfigured.
        std::env::remove_var("SEOPIPE_OPENAI_COMPAT_BASE_URL");
        let err = OpenAiCompatRewriter::from_env(reqwest::Client::new()).unwrap_err();
        assert!(matches!(err, Error::NotConfigured(_)));
    }

    #[test]
    fn prompt_embeds_title_and_body() {
        let p = OpenAiCompatRewriter::build_prompt("body text", Some("the title"));
        assert!(p.contains("body text"));
        assert!(p.contains("the title"));
        assert!(p.contains("JSON object ONLY"));
    }
}
