//! Full memo pipeline: runs every analyzer over one input document.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::{
    analyze_evidence, analyze_moat, analyze_pain, detect_blind_spots, Dismissals,
};
use crate::assumptions::{resolve, AssumptionEstimator};
use crate::data::analysis::{BlindSpot, EvidenceChecklistResult, MoatScores, PainAnalysis};
use crate::data::financial::{AnchoredAssumptions, PricingMetrics, UnitEconomics};
use crate::data::responses::{CompanyDescriptor, ResponseMap};
use crate::data::yaml::read_yaml_file;
use crate::financial::{extract_pricing_metrics, extract_unit_economics, scan_text};
use crate::patterns::SectionKey;
use crate::text::{coerce, join_nonblank};

/// Input document for [`build_report`], read from YAML or JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoInput {
    /// Company identity.
    #[serde(default)]
    pub company: CompanyDescriptor,
    /// Section texts keyed by section.
    #[serde(default, deserialize_with = "deserialize_sections")]
    pub sections: BTreeMap<SectionKey, String>,
    /// Questionnaire answers.
    #[serde(default)]
    pub responses: ResponseMap,
    /// Dismissed blind spots, by message or rule id.
    #[serde(default)]
    pub dismissed: Vec<String>,
    /// Anchored assumption from an earlier run.
    #[serde(default)]
    pub previous_assumptions: Option<AnchoredAssumptions>,
}

impl MemoInput {
    /// Reads an input document from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_yaml_file(path)
    }

    /// Text of a section; empty when absent.
    pub fn section(&self, key: SectionKey) -> &str {
        self.sections.get(&key).map_or("", String::as_str)
    }
}

/// Accepts any JSON-like value per section and skips unknown section ids.
fn deserialize_sections<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<SectionKey, String>, D::Error> {
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    let mut sections = BTreeMap::new();
    for (id, value) in raw.unwrap_or_default() {
        match SectionKey::parse(&id) {
            Some(key) => {
                sections.insert(key, coerce(&value, &format!("sections.{id}")));
            }
            None => warn!(section = %id, "Ignoring unknown section"),
        }
    }
    Ok(sections)
}

/// Evidence and blind spots for one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionReport {
    /// Section analysed.
    pub section: SectionKey,
    /// Checklist, when the section declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<EvidenceChecklistResult>,
    /// Blind spots not yet dismissed.
    pub blind_spots: Vec<BlindSpot>,
}

/// Everything the analyzers derive from one memo.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoReport {
    /// Company identity.
    pub company: CompanyDescriptor,
    /// Pain analysis of the problem section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pain: Option<PainAnalysis>,
    /// One entry per non-blank section, in memo order.
    pub sections: Vec<SectionReport>,
    /// Moat scores over solution and competition text.
    pub moat: MoatScores,
    /// Extracted pricing metrics.
    pub pricing: PricingMetrics,
    /// Extracted unit economics.
    pub unit_economics: UnitEconomics,
    /// Resolved headline metric.
    pub anchored_assumptions: AnchoredAssumptions,
}

impl MemoReport {
    /// Total number of blind spots across sections.
    pub fn blind_spot_count(&self) -> usize {
        self.sections.iter().map(|s| s.blind_spots.len()).sum()
    }
}

/// Builds a report. Only the assumption resolver suspends; without an
/// estimator the report is fully offline.
pub async fn build_report(
    input: &MemoInput,
    estimator: Option<&dyn AssumptionEstimator>,
) -> MemoReport {
    let dismissed = Dismissals::from_entries(input.dismissed.iter().cloned());

    let problem = input.section(SectionKey::Problem);
    let pain = (!problem.trim().is_empty()).then(|| analyze_pain(problem));

    let sections: Vec<SectionReport> = SectionKey::ALL
        .iter()
        .filter_map(|&key| {
            let text = input.section(key);
            if text.trim().is_empty() {
                return None;
            }
            Some(SectionReport {
                section: key,
                evidence: analyze_evidence(text, key),
                blind_spots: detect_blind_spots(text, key, &dismissed),
            })
        })
        .collect();

    let moat = analyze_moat(&join_nonblank([
        input.section(SectionKey::Solution),
        input.section(SectionKey::Competition),
    ]));

    let business_model = input.section(SectionKey::BusinessModel);
    let traction = input.section(SectionKey::Traction);
    let market = Some(input.section(SectionKey::Market)).filter(|m| !m.trim().is_empty());

    let pricing = extract_pricing_metrics(
        business_model,
        traction,
        &input.responses,
        market,
        input.previous_assumptions.as_ref(),
    );
    let unit_economics = extract_unit_economics(&scan_text(
        business_model,
        traction,
        &input.responses,
        market,
    ));
    debug!(?unit_economics, "Extracted unit economics");

    let anchored_assumptions = resolve(
        Some(&pricing),
        &input.responses,
        pricing.currency,
        &input.company,
        estimator,
    )
    .await;

    let report = MemoReport {
        company: input.company.clone(),
        pain,
        sections,
        moat,
        pricing,
        unit_economics,
        anchored_assumptions,
    };
    info!(
        company = %report.company.name,
        sections = report.sections.len(),
        blind_spots = report.blind_spot_count(),
        "Built memo report"
    );
    report
}
