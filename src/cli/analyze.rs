//! Single-analyzer commands.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use super::formatting::{
    emit, format_blind_spots, format_evidence, format_financials, format_moat, format_pain,
};
use crate::analysis::{analyze_evidence, analyze_moat, analyze_pain, detect_blind_spots, Dismissals};
use crate::data::financial::{PricingMetrics, UnitEconomics};
use crate::data::responses::ResponseMap;
use crate::data::yaml::read_yaml_file;
use crate::data::OutputFormat;
use crate::financial::{extract_pricing_metrics, extract_unit_economics, scan_text};
use crate::patterns::SectionKey;

/// Analyze command.
#[derive(Parser)]
pub struct AnalyzeCommand {
    /// Analyzer to run.
    #[command(subcommand)]
    pub command: AnalyzeSubcommands,
}

/// Analyzer subcommands.
#[derive(Subcommand)]
pub enum AnalyzeSubcommands {
    /// Scores problem intensity (urgency, frequency, willingness to pay, alternatives).
    Pain(PainCommand),
    /// Grades the evidence checklist of a section.
    Evidence(EvidenceCommand),
    /// Detects risky language patterns in a section.
    #[command(name = "blind-spots")]
    BlindSpots(BlindSpotsCommand),
    /// Scores defensibility across five moat dimensions.
    Moat(MoatCommand),
    /// Extracts pricing metrics and unit economics from a business-model narrative.
    Financials(FinancialsCommand),
}

impl AnalyzeCommand {
    /// Executes the analyze command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            AnalyzeSubcommands::Pain(cmd) => cmd.execute(),
            AnalyzeSubcommands::Evidence(cmd) => cmd.execute(),
            AnalyzeSubcommands::BlindSpots(cmd) => cmd.execute(),
            AnalyzeSubcommands::Moat(cmd) => cmd.execute(),
            AnalyzeSubcommands::Financials(cmd) => cmd.execute(),
        }
    }
}

/// Text source and output format shared by every analyzer.
#[derive(Args)]
pub struct TextInput {
    /// File containing the text; reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,

    /// Output format: text (default), json, or yaml.
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl TextInput {
    /// Reads the input text.
    pub fn read(&self) -> Result<String> {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
                .with_context(|| format!("Failed to read text file: {}", path.display())),
            _ => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read text from stdin")?;
                Ok(text)
            }
        }
    }

    /// Requested output format; unknown values fall back to text.
    pub fn output_format(&self) -> OutputFormat {
        self.format.parse().unwrap_or(OutputFormat::Text)
    }
}

/// Parses a section id given on the command line.
fn parse_section(id: &str) -> Result<SectionKey> {
    SectionKey::parse(id).with_context(|| {
        let known: Vec<&str> = SectionKey::ALL.iter().map(|s| s.id()).collect();
        format!("Unknown section '{id}'; expected one of: {}", known.join(", "))
    })
}

/// Pain analysis command.
#[derive(Parser)]
pub struct PainCommand {
    #[command(flatten)]
    input: TextInput,
}

impl PainCommand {
    /// Executes the pain analysis.
    pub fn execute(self) -> Result<()> {
        let text = self.input.read()?;
        emit(&analyze_pain(&text), self.input.output_format(), format_pain)
    }
}

/// Evidence checklist command.
#[derive(Parser)]
pub struct EvidenceCommand {
    /// Section the text belongs to (problem, solution, market, business_model, traction, team, competition).
    #[arg(long, short)]
    pub section: String,

    #[command(flatten)]
    input: TextInput,
}

impl EvidenceCommand {
    /// Executes the evidence checklist.
    pub fn execute(self) -> Result<()> {
        let section = parse_section(&self.section)?;
        let text = self.input.read()?;
        let result = analyze_evidence(&text, section)
            .with_context(|| format!("Section '{section}' has no evidence checklist"))?;
        emit(&result, self.input.output_format(), format_evidence)
    }
}

/// Blind-spot detection command.
#[derive(Parser)]
pub struct BlindSpotsCommand {
    /// Section the text belongs to.
    #[arg(long, short)]
    pub section: String,

    /// Dismissed blind spot, by rule id or message (repeatable).
    #[arg(long = "dismiss", value_name = "RULE_OR_MESSAGE")]
    pub dismissed: Vec<String>,

    #[command(flatten)]
    input: TextInput,
}

impl BlindSpotsCommand {
    /// Executes blind-spot detection.
    pub fn execute(self) -> Result<()> {
        let section = parse_section(&self.section)?;
        let text = self.input.read()?;
        let dismissed = Dismissals::from_entries(self.dismissed);
        let spots = detect_blind_spots(&text, section, &dismissed);
        emit(&spots, self.input.output_format(), |s| format_blind_spots(s))
    }
}

/// Moat analysis command.
#[derive(Parser)]
pub struct MoatCommand {
    #[command(flatten)]
    input: TextInput,
}

impl MoatCommand {
    /// Executes the moat analysis.
    pub fn execute(self) -> Result<()> {
        let text = self.input.read()?;
        emit(&analyze_moat(&text), self.input.output_format(), format_moat)
    }
}

/// Financial extraction command.
#[derive(Parser)]
pub struct FinancialsCommand {
    /// File with traction text.
    #[arg(long)]
    pub traction: Option<PathBuf>,

    /// File with market text.
    #[arg(long)]
    pub market: Option<PathBuf>,

    /// YAML or JSON file with questionnaire answers.
    #[arg(long)]
    pub responses: Option<PathBuf>,

    #[command(flatten)]
    input: TextInput,
}

/// Output of the financials command.
#[derive(Serialize)]
struct FinancialsReport {
    pricing: PricingMetrics,
    unit_economics: UnitEconomics,
}

impl FinancialsCommand {
    /// Executes the financial extraction.
    pub fn execute(self) -> Result<()> {
        let business_model = self.input.read()?;
        let traction = read_optional(self.traction.as_ref())?;
        let market_text = read_optional(self.market.as_ref())?;
        let responses: ResponseMap = match &self.responses {
            Some(path) => read_yaml_file(path)?,
            None => ResponseMap::new(),
        };

        let market = Some(market_text.as_str()).filter(|m| !m.trim().is_empty());

        let pricing =
            extract_pricing_metrics(&business_model, &traction, &responses, market, None);
        let unit_economics =
            extract_unit_economics(&scan_text(&business_model, &traction, &responses, market));

        let report = FinancialsReport {
            pricing,
            unit_economics,
        };
        emit(&report, self.input.output_format(), |r| {
            format_financials(&r.pricing, &r.unit_economics)
        })
    }
}

fn read_optional(path: Option<&PathBuf>) -> Result<String> {
    path.map_or_else(
        || Ok(String::new()),
        |p| {
            fs::read_to_string(p).with_context(|| format!("Failed to read file: {}", p.display()))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        command: AnalyzeSubcommands,
    }

    #[test]
    fn parse_section_accepts_aliases() {
        assert_eq!(parse_section("business-model").unwrap(), SectionKey::BusinessModel);
        assert!(parse_section("vision").is_err());
    }

    #[test]
    fn blind_spots_collects_dismissals() {
        let harness = Harness::try_parse_from([
            "analyze",
            "blind-spots",
            "--section",
            "problem",
            "--dismiss",
            "problem.hype",
            "--dismiss",
            "problem.overgeneralization",
            "memo.txt",
        ])
        .unwrap();
        let AnalyzeSubcommands::BlindSpots(cmd) = harness.command else {
            panic!("expected blind-spots");
        };
        assert_eq!(cmd.dismissed.len(), 2);
        assert_eq!(cmd.input.file, Some(PathBuf::from("memo.txt")));
        assert_eq!(cmd.input.output_format(), OutputFormat::Text);
    }

    #[test]
    fn unknown_format_falls_back_to_text() {
        let harness =
            Harness::try_parse_from(["analyze", "pain", "--format", "xml"]).unwrap();
        let AnalyzeSubcommands::Pain(cmd) = harness.command else {
            panic!("expected pain");
        };
        assert_eq!(cmd.input.output_format(), OutputFormat::Text);
        assert!(cmd.input.file.is_none());
    }

    #[test]
    fn reads_text_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("problem.txt");
        fs::write(&path, "Teams waste hours").unwrap();
        let input = TextInput {
            file: Some(path),
            format: "json".to_string(),
        };
        assert_eq!(input.read().unwrap(), "Teams waste hours");
        assert_eq!(input.output_format(), OutputFormat::Json);
    }

    #[test]
    fn missing_file_is_an_error() {
        let input = TextInput {
            file: Some(PathBuf::from("/nonexistent/memo.txt")),
            format: "text".to_string(),
        };
        assert!(input.read().is_err());
    }
}
