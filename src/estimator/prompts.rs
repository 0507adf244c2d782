//! Prompt templates for metric estimation

use anyhow::Result;
use serde::Serialize;

use crate::assumptions::EstimationRequest;
use crate::data::yaml::to_yaml;

/// System prompt for single-metric estimation
pub const ESTIMATION_SYSTEM_PROMPT: &str = r#"You are an experienced early-stage investor estimating a single business metric for a startup.

You will receive a YAML description of the company: the metric to estimate, its business model, the currency, the company's name, category and funding stage, and the founder's questionnaire answers.

Rules:
1. Estimate ONLY the requested metric, in the requested currency.
2. Base the estimate on comparable companies at the same stage and business model.
3. Prefer conservative values when the answers are thin.
4. Never return a negative number.

Respond with a single JSON object and nothing else:

{"estimatedValue": <number>}
"#;

#[derive(Serialize)]
struct PromptContext<'a> {
    metric: &'a str,
    business_model: String,
    currency: &'a str,
    company: CompanyContext<'a>,
    answers: Vec<Answer<'a>>,
}

#[derive(Serialize)]
struct CompanyContext<'a> {
    name: &'a str,
    category: &'a str,
    stage: String,
}

#[derive(Serialize)]
struct Answer<'a> {
    question: &'a str,
    answer: &'a str,
}

/// Builds the user prompt for an estimation request
pub fn generate_estimation_user_prompt(request: &EstimationRequest) -> Result<String> {
    let context = PromptContext {
        metric: &request.metric_label,
        business_model: request.business_model_type.to_string(),
        currency: request.currency.code(),
        company: CompanyContext {
            name: &request.company.name,
            category: &request.company.category,
            stage: request.company.stage.to_string(),
        },
        answers: request
            .responses
            .iter()
            .filter(|(_, answer)| !answer.trim().is_empty())
            .map(|(question, answer)| Answer { question, answer })
            .collect(),
    };

    let yaml = to_yaml(&context)?;
    Ok(format!(
        "Estimate the metric described below.\n\n{yaml}\nReturn only {{\"estimatedValue\": <number>}} in {}.",
        request.currency.code()
    ))
}
