//! Rewriter seam and the generative-language HTTP client.
//!
//! [`TextRewriter`] is what the gateway calls; [`GeminiRewriter`] implements it
//! against the `generateContent` endpoint with structured JSON output. Each
//! call is a single attempt with no retry.

use crate::domain::error::RewriteError;
use crate::domain::Transformation;
use crate::gateway::prompt::{response_schema, SYSTEM_INSTRUCTION};
use futures_util::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Default model used for rewrites.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.8;

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Rewrites free-form text into an affirmation and a quote.
///
/// Implementations report every failure as a [`RewriteError`]; the gateway
/// decides what the user sees.
pub trait TextRewriter: Send + Sync {
    /// Makes one rewrite attempt for `text`.
    fn rewrite<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Transformation, RewriteError>>;
}

/// Connection settings for [`GeminiRewriter`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiSettings {
    /// API credential; `None` or blank makes every call fail with
    /// [`RewriteError::MissingCredential`].
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub temperature: f64,
    pub timeout: Duration,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the `generateContent` API.
pub struct GeminiRewriter {
    client: Client,
    settings: GeminiSettings,
}

impl GeminiRewriter {
    /// Creates a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed (for example
    /// when the TLS backend fails to initialize).
    pub fn new(settings: GeminiSettings) -> Result<Self, RewriteError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn api_key(&self) -> Option<&str> {
        self.settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Builds the JSON request body for `text`.
    #[must_use]
    pub fn request_body(&self, text: &str) -> Value {
        json!({
            "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
            "contents": [{ "role": "user", "parts": [{ "text": text }] }],
            "generationConfig": {
                "temperature": self.settings.temperature,
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        })
    }

    async fn call(&self, text: &str) -> Result<Transformation, RewriteError> {
        let api_key = self.api_key().ok_or(RewriteError::MissingCredential)?;

        tracing::debug!(model = %self.settings.model, chars = text.chars().count(), "requesting rewrite");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RewriteError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_reply(&body)
    }
}

impl TextRewriter for GeminiRewriter {
    fn rewrite<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Transformation, RewriteError>> {
        Box::pin(self.call(text))
    }
}

impl std::fmt::Debug for GeminiRewriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiRewriter")
            .field("model", &self.settings.model)
            .field("endpoint", &self.settings.endpoint)
            .field("has_api_key", &self.api_key().is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RewritePayload {
    transformed_text: Option<String>,
    quote: Option<String>,
}

/// Extracts the structured result from a `generateContent` response body.
///
/// # Errors
///
/// - [`RewriteError::Malformed`] if the body is not a response, carries no
///   text, or the text is not the expected JSON object
/// - [`RewriteError::Incomplete`] if either field is missing or blank
pub fn parse_reply(body: &str) -> Result<Transformation, RewriteError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| RewriteError::Malformed(format!("unexpected response body: {e}")))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(RewriteError::Malformed("no response text".to_string()));
    }

    let payload: RewritePayload = serde_json::from_str(&text)
        .map_err(|e| RewriteError::Malformed(format!("response text is not the expected JSON: {e}")))?;

    match (payload.transformed_text, payload.quote) {
        (Some(transformed_text), Some(quote)) => {
            let transformation = Transformation::new(transformed_text, quote);
            if transformation.is_complete() {
                Ok(transformation)
            } else {
                Err(RewriteError::Incomplete)
            }
        }
        _ => Err(RewriteError::Incomplete),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(text: &str) -> String {
        json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }).to_string()
    }

    #[test]
    fn parses_structured_reply() {
        let body = wrap(r#"{"transformedText":"我在呢。","quote":"—— 杨绛"}"#);
        let parsed = parse_reply(&body).unwrap();
        assert_eq!(parsed, Transformation::new("我在呢。", "—— 杨绛"));
    }

    #[test]
    fn joins_split_parts() {
        let body = json!({ "candidates": [{ "content": { "parts": [
            { "text": "{\"transformedText\":\"a\"," },
            { "text": "\"quote\":\"b\"}" }
        ] } }] })
        .to_string();
        assert_eq!(parse_reply(&body).unwrap(), Transformation::new("a", "b"));
    }

    #[test]
    fn empty_candidates_are_malformed() {
        assert!(matches!(parse_reply(r#"{"candidates":[]}"#), Err(RewriteError::Malformed(_))));
        assert!(matches!(parse_reply("<html>"), Err(RewriteError::Malformed(_))));
    }

    #[test]
    fn non_json_text_is_malformed() {
        assert!(matches!(parse_reply(&wrap("sorry, I can't")), Err(RewriteError::Malformed(_))));
    }

    #[test]
    fn missing_or_blank_fields_are_incomplete() {
        assert!(matches!(
            parse_reply(&wrap(r#"{"transformedText":"a"}"#)),
            Err(RewriteError::Incomplete)
        ));
        assert!(matches!(
            parse_reply(&wrap(r#"{"transformedText":" ","quote":"b"}"#)),
            Err(RewriteError::Incomplete)
        ));
    }

    #[test]
    fn request_carries_instruction_schema_and_text() {
        let rewriter = GeminiRewriter::new(GeminiSettings::default()).unwrap();
        let body = rewriter.request_body("今天很累");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "今天很累");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], SYSTEM_INSTRUCTION);
        assert_eq!(
            rewriter.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_credential_fails_without_network() {
        let rewriter = GeminiRewriter::new(GeminiSettings {
            api_key: Some("   ".to_string()),
            ..GeminiSettings::default()
        })
        .unwrap();
        assert!(matches!(
            rewriter.rewrite("hi").await,
            Err(RewriteError::MissingCredential)
        ));
    }
}
