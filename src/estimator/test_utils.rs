//! Scripted AI client for estimator and report tests.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use super::ai::{AiClient, AiClientMetadata};

/// One estimation request as the client saw it.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    /// Estimation instructions.
    pub(crate) system: String,
    /// Rendered company and metric context.
    pub(crate) user: String,
}

struct Script {
    replies: VecDeque<Result<String>>,
    requests: Vec<RecordedRequest>,
}

/// AI client that answers estimation requests from a fixed script.
///
/// Each request consumes the next scripted reply; an empty script fails
/// the request the way an unreachable service would.
pub(crate) struct ScriptedAiClient {
    script: Arc<Mutex<Script>>,
}

impl ScriptedAiClient {
    pub(crate) fn replying(replies: Vec<Result<String>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                replies: replies.into(),
                requests: Vec::new(),
            })),
        }
    }

    /// Log that stays readable after the client is boxed into an estimator.
    pub(crate) fn log(&self) -> RequestLog {
        RequestLog {
            script: Arc::clone(&self.script),
        }
    }
}

/// Read side of a [`ScriptedAiClient`].
pub(crate) struct RequestLog {
    script: Arc<Mutex<Script>>,
}

impl RequestLog {
    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    /// How many estimates were asked for.
    pub(crate) fn count(&self) -> usize {
        self.script.lock().unwrap().requests.len()
    }
}

impl AiClient for ScriptedAiClient {
    fn send_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let mut script = self.script.lock().unwrap();
            script.requests.push(RecordedRequest {
                system: system_prompt.to_string(),
                user: user_prompt.to_string(),
            });
            script
                .replies
                .pop_front()
                .unwrap_or_else(|| Err(anyhow!("estimation script exhausted")))
        })
    }

    fn get_metadata(&self) -> AiClientMetadata {
        AiClientMetadata {
            provider: "Mock".to_string(),
            model: "scripted-estimator".to_string(),
            max_response_length: 256,
        }
    }
}
