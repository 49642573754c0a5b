//! Chat relay: single-turn proxy to a hosted generative-language model.
//!
//! DESIGN
//! ======
//! The HTTP route forwards one user message, unmodified, as the whole prompt:
//! no system prompt, no history. The reply is the first candidate's first
//! text part; anything else collapses to [`FALLBACK_REPLY`]. The
//! [`GenerativeModel`] trait is the seam tests mock.

pub mod config;
pub mod gemini;

use config::ChatConfig;
use gemini::{GeminiClient, GenerateContentResponse};

/// Reply used when the model returns no usable candidate text.
pub const FALLBACK_REPLY: &str = "No valid response from Gemini.";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    #[error("API request failed: {0}")]
    ApiRequest(String),

    #[error("API response error: status {status}: {body}")]
    ApiResponse { status: u16, body: String },

    #[error("API response parse failed: {0}")]
    ApiParse(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// MODEL TRAIT
// =============================================================================

/// Provider seam for the relay. Enables mocking in tests.
#[async_trait::async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model name reported in logs.
    fn model(&self) -> &str;

    /// Send `prompt` as a single user turn.
    ///
    /// # Errors
    ///
    /// Returns a [`ChatError`] if the request fails or the response cannot be
    /// decoded.
    async fn generate_content(&self, prompt: &str) -> Result<GenerateContentResponse, ChatError>;
}

/// Build the Gemini-backed model from environment variables.
///
/// # Errors
///
/// Returns an error if the API key is missing or the HTTP client fails.
pub fn from_env() -> Result<GeminiClient, ChatError> {
    GeminiClient::new(ChatConfig::from_env()?)
}

/// Forward `message` and extract the reply text.
///
/// # Errors
///
/// Propagates any model failure unchanged.
pub async fn relay(model: &dyn GenerativeModel, message: &str) -> Result<String, ChatError> {
    let response = model.generate_content(message).await?;
    Ok(response
        .first_text()
        .filter(|text| !text.is_empty())
        .map_or_else(|| FALLBACK_REPLY.to_owned(), str::to_owned))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
