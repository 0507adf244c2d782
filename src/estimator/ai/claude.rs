//! Anthropic Messages API client.

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{build_http_client, check_error_response, AiClient, AiClientMetadata};
use crate::estimator::error::EstimationError;

/// Tokens requested per estimate; the answer is a single JSON object.
const MAX_TOKENS: i32 = 256;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: i32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<Content>,
}

/// Claude API client.
pub struct ClaudeAiClient {
    client: Client,
    api_key: String,
    model: String,
    /// API base URL without the `/v1/messages` path.
    api_base: String,
}

impl ClaudeAiClient {
    /// Creates a new client against the given API base URL.
    pub fn new(model: String, api_key: String, api_base: String) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.api_base)
    }
}

impl AiClient for ClaudeAiClient {
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            debug!(
                system_prompt_len = system_prompt.len(),
                user_prompt_len = user_prompt.len(),
                model = %self.model,
                "Preparing Claude API request"
            );

            let request = ClaudeRequest {
                model: self.model.clone(),
                max_tokens: MAX_TOKENS,
                system: system_prompt.to_string(),
                messages: vec![Message {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                }],
            };

            let url = self.endpoint();
            info!(url = %url, model = %self.model, "Sending request to Claude API");

            let response = self
                .client
                .post(&url)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request)
                .send()
                .await
                .map_err(|e| EstimationError::NetworkError(e.to_string()))?;

            let response = check_error_response(response).await?;

            let claude_response: ClaudeResponse = response
                .json()
                .await
                .map_err(|e| EstimationError::InvalidResponseFormat(e.to_string()))?;

            let text = claude_response
                .content
                .into_iter()
                .find(|c| c.content_type == "text")
                .map(|c| c.text)
                .ok_or_else(|| {
                    EstimationError::InvalidResponseFormat("No text content in response".to_string())
                })?;

            debug!(response_len = text.len(), "Received Claude API response");
            Ok(text)
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        AiClientMetadata {
            provider: "Anthropic".to_string(),
            model: self.model.clone(),
            max_response_length: MAX_TOKENS as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = ClaudeAiClient::new(
            "claude-test".to_string(),
            "key".to_string(),
            "http://localhost:9999/".to_string(),
        )
        .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9999/v1/messages");
    }

    #[test]
    fn metadata_reports_provider() {
        let client = ClaudeAiClient::new(
            "claude-test".to_string(),
            "key".to_string(),
            "https://api.anthropic.com".to_string(),
        )
        .unwrap();
        let meta = client.get_metadata();
        assert_eq!(meta.provider, "Anthropic");
        assert_eq!(meta.model, "claude-test");
    }
}
