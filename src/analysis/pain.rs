//! Problem-narrative intensity scoring.

use super::DimensionRules;
use crate::data::analysis::{HeatLevel, PainAnalysis};
use crate::patterns::Haystack;

/// Score every dimension starts from.
const BASELINE: u8 = 2;

/// Points added per distinct keyword group hit.
const GROUP_INCREMENT: u8 = 2;

/// Dimensions scoring below this receive an improvement tip.
const SUGGESTION_CUTOFF: u8 = 5;

/// Maximum number of tips returned.
const MAX_SUGGESTIONS: usize = 3;

/// Heat thresholds, highest first: `(minimum overall score, level)`.
const HEAT_THRESHOLDS: [(u8, HeatLevel); 3] = [
    (80, HeatLevel::Blazing),
    (60, HeatLevel::Hot),
    (30, HeatLevel::Warm),
];

static URGENCY: DimensionRules = DimensionRules {
    name: "urgency",
    groups: &[
        &["urgent", "asap", "immediately", "right now", "can't wait", "cannot wait"],
        &["losing money", "lose money", "losing customers", "revenue loss", "costs them"],
        &["deadline", "compliance", "regulation", "fines", "penalt"],
        &["critical", "blocker", "mission-critical", "bottleneck"],
        &["frustrat", "painful", "nightmare", "hate it"],
    ],
};

static FREQUENCY: DimensionRules = DimensionRules {
    name: "frequency",
    groups: &[
        &["every day", "daily", "each day"],
        &["every week", "weekly", "per week"],
        &["constantly", "all the time", "repeatedly", "over and over"],
        &["hours per", "hours a", "hours each", "times a", "times per"],
        &["every transaction", "every order", "every shift", "every patient"],
    ],
};

static WILLINGNESS: DimensionRules = DimensionRules {
    name: "willingness",
    groups: &[
        &["already pay", "currently pay", "paying for", "spend", "budget"],
        &["willing to pay", "would pay", "pre-order", "preorder", "letter of intent"],
        &["consultant", "agency", "hire someone", "outsourc", "contractor"],
        &["paid pilot", "paying customers", "signed contract", "purchase order"],
    ],
};

static ALTERNATIVES: DimensionRules = DimensionRules {
    name: "alternatives",
    groups: &[
        &["spreadsheet", "in excel", "pen and paper", "whiteboard", "email threads"],
        &["manual", "by hand", "copy and paste", "copy-paste"],
        &["workaround", "duct tape", "patchwork", "cobbled together"],
        &["outdated", "legacy", "clunky", "expensive", "too complex", "doesn't work"],
        &["no good solution", "no solution", "nothing exists", "existing tools fail"],
    ],
};

/// Scoring tables in `PainAnalysis` field order.
pub(crate) static DIMENSIONS: [&DimensionRules; 4] =
    [&URGENCY, &FREQUENCY, &WILLINGNESS, &ALTERNATIVES];

/// Tip per dimension, same order as the dimensions.
const TIPS: [&str; 4] = [
    "Show urgency: what happens to the customer if the problem is not solved this quarter?",
    "Show frequency: how often does the customer run into this problem (daily, weekly)?",
    "Show willingness to pay: what do customers spend today on this problem?",
    "Show why today's alternatives fail: describe the workaround and what it costs.",
];

/// Scores problem-narrative intensity across urgency, frequency,
/// willingness to pay and poor alternatives.
pub fn analyze_pain(text: &str) -> PainAnalysis {
    let hay = Haystack::new(text);

    let [urgency, frequency, willingness, alternatives] =
        DIMENSIONS.map(|rules| rules.score(&hay, BASELINE, GROUP_INCREMENT));

    let scores = [
        urgency.score,
        frequency.score,
        willingness.score,
        alternatives.score,
    ];
    let overall_score = overall_score(&scores);

    let suggestions = scores
        .iter()
        .zip(TIPS)
        .filter(|(score, _)| **score < SUGGESTION_CUTOFF)
        .map(|(_, tip)| tip.to_string())
        .take(MAX_SUGGESTIONS)
        .collect();

    PainAnalysis {
        urgency,
        frequency,
        willingness,
        alternatives,
        overall_score,
        heat: heat_level(overall_score),
        suggestions,
    }
}

/// `round(mean * 10)`, clamped to `0..=100`.
fn overall_score(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let sum: u32 = scores.iter().map(|s| u32::from(*s)).sum();
    let mean = f64::from(sum) / scores.len() as f64;
    (mean * 10.0).round().clamp(0.0, 100.0) as u8
}

/// Maps an overall score to its heat level.
pub fn heat_level(overall_score: u8) -> HeatLevel {
    HEAT_THRESHOLDS
        .iter()
        .find(|(min, _)| overall_score >= *min)
        .map_or(HeatLevel::Cold, |(_, level)| *level)
}
