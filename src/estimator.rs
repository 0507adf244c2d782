//! AI-backed estimation of anchored assumptions.

pub mod ai;
pub mod error;
pub mod prompts;
#[cfg(test)]
pub(crate) mod test_utils;

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

pub use ai::claude::ClaudeAiClient;
pub use ai::{AiClient, AiClientMetadata};
pub use error::EstimationError;

use crate::assumptions::{AssumptionEstimator, EstimationRequest};
use crate::financial::amounts::parse_amount;
use crate::utils::settings::{get_env_var, get_env_vars};

/// Model used when `MEMO_ENGINE_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// API base used when `ANTHROPIC_BASE_URL` is not set.
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";

/// Estimates assumptions by asking an AI client for a single number.
pub struct AiAssumptionEstimator {
    client: Box<dyn AiClient>,
}

impl AiAssumptionEstimator {
    /// Wraps an AI client.
    pub fn new(client: Box<dyn AiClient>) -> Self {
        Self { client }
    }

    /// Metadata of the underlying client.
    pub fn get_metadata(&self) -> AiClientMetadata {
        self.client.get_metadata()
    }
}

impl AssumptionEstimator for AiAssumptionEstimator {
    fn estimate<'a>(
        &'a self,
        request: &'a EstimationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<f64>> + Send + 'a>> {
        Box::pin(async move {
            let user_prompt = prompts::generate_estimation_user_prompt(request)?;
            let content = self
                .client
                .send_request(prompts::ESTIMATION_SYSTEM_PROMPT, &user_prompt)
                .await?;
            let value = parse_estimate(&content)?;
            debug!(value, metric = %request.metric_label, "Parsed estimate");
            Ok(value)
        })
    }
}

/// Parses `{"estimatedValue": n}`, optionally inside a fenced code block.
///
/// A numeric string such as `"$1,200"` is accepted; null or missing
/// values are errors.
pub fn parse_estimate(content: &str) -> Result<f64, EstimationError> {
    let json = strip_code_fence(content);
    let parsed: Value = serde_json::from_str(json)
        .map_err(|e| EstimationError::InvalidResponseFormat(format!("{e}: {json}")))?;

    let value = match parsed.get("estimatedValue") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_amount(s),
        _ => None,
    };
    value.ok_or_else(|| EstimationError::MissingEstimate(json.to_string()))
}

fn strip_code_fence(content: &str) -> &str {
    if content.contains("```json") {
        content
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .unwrap_or(content)
            .trim()
    } else if content.contains("```") {
        content
            .split("```")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .unwrap_or(content)
            .trim()
    } else {
        content.trim()
    }
}

/// Creates an estimator from environment variables, falling back to
/// `~/.memo-engine/settings.json`.
pub fn create_default_estimator() -> Result<AiAssumptionEstimator> {
    let api_key = get_env_vars(&["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"])
        .map_err(|_| EstimationError::ApiKeyNotFound)?;
    let model = get_env_var("MEMO_ENGINE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    let api_base =
        get_env_var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

    debug!(model = %model, api_base = %api_base, "Creating Claude estimator");
    let client = ClaudeAiClient::new(model, api_key, api_base)?;
    Ok(AiAssumptionEstimator::new(Box::new(client)))
}
