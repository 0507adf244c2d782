//! CLI interface for memo-engine.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod analyze;
pub(crate) mod formatting;
pub mod memo;

/// memo-engine: rule-based narrative analysis for investor memos.
#[derive(Parser)]
#[command(name = "memo-engine")]
#[command(about = "Rule-based narrative analysis and scoring for investor memos", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Runs a single analyzer over text from a file or stdin.
    Analyze(analyze::AnalyzeCommand),
    /// Builds a full memo report from a YAML or JSON input document.
    Memo(memo::MemoCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Analyze(analyze_cmd) => analyze_cmd.execute(),
            Commands::Memo(memo_cmd) => memo_cmd.execute().await,
        }
    }
}
