//! Gemini `generateContent` client.
//!
//! Sends `POST {base_url}/models/{model}:generateContent` with the API key in
//! the `x-goog-api-key` header. Only the subset of the wire format the relay
//! reads is modelled; unknown fields are ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::ChatConfig;
use super::{ChatError, GenerativeModel};

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`ChatError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: ChatConfig) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ChatError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key: config.api_key, base_url: config.base_url, model: config.model })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn send_json(&self, body: &impl Serialize) -> Result<String, ChatError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ChatError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ChatError::ApiRequest(e.to_string()))?;
        if status != 200 {
            return Err(ChatError::ApiResponse { status, body: text });
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl GenerativeModel for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate_content(&self, prompt: &str) -> Result<GenerateContentResponse, ChatError> {
        let body = GenerateContentRequest::single_turn(prompt);
        let text = self.send_json(&body).await?;
        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    #[must_use]
    pub fn single_turn(prompt: &'a str) -> Self {
        Self { contents: [RequestContent { role: "user", parts: [RequestPart { text: prompt }] }] }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u64,
    #[serde(default)]
    pub candidates_token_count: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    /// Response carrying a single candidate with one text part.
    #[cfg(test)]
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(Content { role: Some("model".into()), parts: vec![Part { text: Some(text.into()) }] }),
                finish_reason: Some("STOP".into()),
            }],
            ..Self::default()
        }
    }

    /// Text of the first part of the first candidate, if any.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

pub(crate) fn parse_response(text: &str) -> Result<GenerateContentResponse, ChatError> {
    serde_json::from_str(text).map_err(|e| ChatError::ApiParse(e.to_string()))
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
