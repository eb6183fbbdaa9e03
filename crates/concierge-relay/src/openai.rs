//! Upstream chat-completion client.
//!
//! Sends a single-turn request: the fixed system instruction plus the
//! user's message, with bounded output length, moderate randomness, and a
//! bounded request timeout. No conversation history is ever sent; each
//! call is independent of prior turns.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use concierge_core::config::RelayConfig;
use concierge_session::relay::RelayError;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Client for the upstream completions endpoint.
pub struct CompletionClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    system_prompt: String,
    max_tokens: u32,
    temperature: f64,
    timeout: Duration,
}

impl CompletionClient {
    /// Create a client from relay settings and a resolved credential.
    pub fn new(config: &RelayConfig, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Complete one user message and return the first choice's text.
    pub async fn complete(&self, message: &str) -> Result<String, RelayError> {
        let body = ChatCompletionRequest::single_turn(
            &self.model,
            &self.system_prompt,
            message,
            self.max_tokens,
            self.temperature,
        );

        let response = self
            .client
            .post(COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        let status = response.status();
        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Transport(format!("failed to read upstream body: {}", e)))?;

        extract_reply(status.as_u16(), payload)
    }
}

/// Map an upstream payload to a reply or a relay error.
///
/// An API-reported error body wins over the HTTP status so the upstream's
/// own message is preserved for the operational log.
fn extract_reply(status: u16, payload: ChatCompletionResponse) -> Result<String, RelayError> {
    if let Some(err) = payload.error {
        return Err(RelayError::Upstream(err.message));
    }
    if !(200..300).contains(&status) {
        return Err(RelayError::Upstream(format!(
            "upstream returned status {}",
            status
        )));
    }
    payload
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| RelayError::Upstream("no completion choices returned".to_string()))
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: u32,
    temperature: f64,
}

impl ChatCompletionRequest {
    fn single_turn(
        model: &str,
        system_prompt: &str,
        message: &str,
        max_tokens: u32,
        temperature: f64,
    ) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                WireMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                WireMessage {
                    role: "user".to_string(),
                    content: message.to_string(),
                },
            ],
            max_tokens,
            temperature,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<UpstreamErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    message: String,
}
