//! Full memo report command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use super::formatting::{emit, format_memo_report};
use crate::assumptions::AssumptionEstimator;
use crate::data::OutputFormat;
use crate::estimator::{create_default_estimator, AiAssumptionEstimator};
use crate::memo::{build_report, MemoInput};

/// Memo command: runs every analyzer over a YAML or JSON input document.
#[derive(Parser)]
pub struct MemoCommand {
    /// Input document with `company`, `sections`, `responses` and `dismissed`.
    pub input: PathBuf,

    /// Skips AI estimation; the headline metric falls back to stage defaults.
    #[arg(long)]
    pub offline: bool,

    /// Output format: text (default), json, or yaml.
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl MemoCommand {
    /// Executes the memo command.
    pub async fn execute(self) -> Result<()> {
        let input = MemoInput::from_path(&self.input)?;
        let estimator = self.estimator();
        let estimator_ref = estimator
            .as_ref()
            .map(|e| e as &dyn AssumptionEstimator);

        let report = build_report(&input, estimator_ref).await;

        let format: OutputFormat = self.format.parse().unwrap_or(OutputFormat::Text);
        emit(&report, format, format_memo_report)
    }

    /// Builds the AI estimator unless running offline. Missing credentials
    /// degrade to offline mode.
    fn estimator(&self) -> Option<AiAssumptionEstimator> {
        if self.offline {
            return None;
        }
        match create_default_estimator() {
            Ok(estimator) => {
                let metadata = estimator.get_metadata();
                info!(provider = %metadata.provider, model = %metadata.model, "Using AI estimation");
                Some(estimator)
            }
            Err(e) => {
                warn!("AI estimation unavailable, continuing offline: {e}");
                None
            }
        }
    }
}
