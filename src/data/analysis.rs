//! Result types produced by the narrative analyzers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Score for a single named dimension, bounded to `0..=10`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    /// Dimension name (e.g. "urgency").
    pub name: String,
    /// Score in `0..=10`.
    pub score: u8,
    /// First keyword that contributed to the score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

/// Categorical bucket describing how intense a problem narrative reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatLevel {
    /// Below 30.
    Cold,
    /// 30 to 59.
    Warm,
    /// 60 to 79.
    Hot,
    /// 80 and above.
    Blazing,
}

impl HeatLevel {
    /// Short human description shown next to the heat label.
    pub fn description(self) -> &'static str {
        match self {
            Self::Cold => "The problem reads as a mild inconvenience. Investors may question whether anyone will pay to solve it.",
            Self::Warm => "There is a real problem here, but the narrative does not yet convey urgency or willingness to pay.",
            Self::Hot => "A clearly painful problem with signs of urgency. Sharpen the evidence to make it undeniable.",
            Self::Blazing => "A hair-on-fire problem: urgent, frequent, and customers are already paying for poor workarounds.",
        }
    }
}

impl fmt::Display for HeatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cold => write!(f, "cold"),
            Self::Warm => write!(f, "warm"),
            Self::Hot => write!(f, "hot"),
            Self::Blazing => write!(f, "blazing"),
        }
    }
}

/// Problem-intensity assessment across four fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainAnalysis {
    /// How urgently customers need a fix.
    pub urgency: DimensionScore,
    /// How often the problem occurs.
    pub frequency: DimensionScore,
    /// Evidence that customers already pay or would pay.
    pub willingness: DimensionScore,
    /// How poor the existing alternatives are.
    pub alternatives: DimensionScore,
    /// Mean of the four dimensions scaled to `0..=100`.
    pub overall_score: u8,
    /// Heat bucket derived from `overall_score`.
    pub heat: HeatLevel,
    /// Improvement tips for weak dimensions, in declaration order.
    pub suggestions: Vec<String>,
}

impl PainAnalysis {
    /// Returns the four dimensions in declaration order.
    pub fn dimensions(&self) -> [&DimensionScore; 4] {
        [
            &self.urgency,
            &self.frequency,
            &self.willingness,
            &self.alternatives,
        ]
    }
}

/// Letter grade for evidence completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    /// At least 90% of items detected.
    A,
    /// At least 70%.
    B,
    /// At least 50%.
    C,
    /// Below 50%.
    D,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };
        write!(f, "{letter}")
    }
}

/// A single line of an evidence checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Stable item key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Hint on what evidence would satisfy the item.
    pub hint: String,
    /// Whether the text contains this evidence.
    pub detected: bool,
}

/// Evidence completeness for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceChecklistResult {
    /// Items in declaration order.
    pub items: Vec<EvidenceItem>,
    /// Grade computed from the detected ratio.
    pub grade: Grade,
    /// Number of detected items.
    pub detected_count: usize,
    /// Number of declared items.
    pub total_count: usize,
}

/// Kind of risky narrative pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlindSpotType {
    /// Overgeneralised or hyperbolic claims.
    Exaggeration,
    /// Beliefs stated without validation.
    Assumption,
    /// Scaling plans ahead of demonstrated fit.
    PrematureScaling,
    /// Missing evidence of founder/market or product/market fit.
    MissingFit,
    /// Metrics that look good but say little.
    Vanity,
}

impl fmt::Display for BlindSpotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Exaggeration => "exaggeration",
            Self::Assumption => "assumption",
            Self::PrematureScaling => "premature_scaling",
            Self::MissingFit => "missing_fit",
            Self::Vanity => "vanity",
        };
        write!(f, "{label}")
    }
}

/// Severity of a blind spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlindSpotSeverity {
    /// Likely to be challenged by investors.
    Warning,
    /// Worth revisiting.
    Caution,
}

impl fmt::Display for BlindSpotSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "WARNING"),
            Self::Caution => write!(f, "CAUTION"),
        }
    }
}

/// A risky language pattern found in a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindSpot {
    /// Stable identifier of the rule that fired.
    pub rule_id: String,
    /// Pattern category.
    #[serde(rename = "type")]
    pub spot_type: BlindSpotType,
    /// Severity.
    pub severity: BlindSpotSeverity,
    /// Message shown to the founder.
    pub message: String,
    /// How to fix it.
    pub suggestion: String,
    /// Keyword that triggered the rule; absent for regex rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_text: Option<String>,
}

/// Defensibility assessment across five dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoatScores {
    /// Value grows with each additional user.
    pub network_effects: DimensionScore,
    /// Cost for customers to leave.
    pub switching_costs: DimensionScore,
    /// Data competitors cannot obtain.
    pub proprietary_data: DimensionScore,
    /// Cost advantages from size.
    pub scale_economies: DimensionScore,
    /// Brand and community strength.
    pub brand: DimensionScore,
    /// Weighted score in `0.0..=10.0`, one decimal.
    pub overall_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_orders_best_first() {
        assert!(Grade::A < Grade::B);
        assert!(Grade::C < Grade::D);
    }

    #[test]
    fn blind_spot_serializes_type_field() {
        let spot = BlindSpot {
            rule_id: "problem.overgeneralization".to_string(),
            spot_type: BlindSpotType::Exaggeration,
            severity: BlindSpotSeverity::Warning,
            message: "m".to_string(),
            suggestion: "s".to_string(),
            matched_text: None,
        };
        let json = serde_json::to_value(&spot).unwrap();
        assert_eq!(json["type"], "exaggeration");
        assert_eq!(json["severity"], "warning");
        assert!(json.get("matched_text").is_none());
    }

    #[test]
    fn heat_level_display() {
        assert_eq!(HeatLevel::Blazing.to_string(), "blazing");
        assert!(!HeatLevel::Cold.description().is_empty());
    }
}
