//! Defensibility scoring.

use super::DimensionRules;
use crate::data::analysis::MoatScores;
use crate::patterns::Haystack;

const BASELINE: u8 = 0;
const GROUP_INCREMENT: u8 = 3;

static NETWORK_EFFECTS: DimensionRules = DimensionRules {
    name: "network_effects",
    groups: &[
        &["network effect", "network-effect"],
        &["more users", "each new user", "every new user", "more valuable as"],
        &["two-sided", "both sides", "marketplace liquidity"],
        &["viral", "referral", "word of mouth", "invite"],
        &["community", "user-generated", "ecosystem"],
    ],
};

static SWITCHING_COSTS: DimensionRules = DimensionRules {
    name: "switching_costs",
    groups: &[
        &["switching cost", "lock-in", "locked in", "hard to leave"],
        &["integrat", " api", "plugs into"],
        &["workflow", "system of record", "embedded in"],
        &["migration", "onboarding takes", "implementation"],
        &["multi-year", "long-term contract", "annual contract"],
    ],
};

static PROPRIETARY_DATA: DimensionRules = DimensionRules {
    name: "proprietary_data",
    groups: &[
        &["proprietary data", "unique data", "exclusive data", "dataset"],
        &["machine learning", "trained on", "model improves", "ai model"],
        &["data moat", "data advantage", "feedback loop"],
        &["patent", "trade secret", "exclusive license", "exclusive access"],
    ],
};

static SCALE_ECONOMIES: DimensionRules = DimensionRules {
    name: "scale_economies",
    groups: &[
        &["economies of scale", "scale economies", "at scale"],
        &["marginal cost", "unit cost", "cost per unit"],
        &["bulk", "volume discount", "purchasing power"],
        &["infrastructure", "logistics network", "fixed cost"],
    ],
};

static BRAND: DimensionRules = DimensionRules {
    name: "brand",
    groups: &[
        &["brand", "trusted name", "household name"],
        &["loyal", "loyalty", "fans", "nps"],
        &["press coverage", "award", "featured in"],
        &["certified", "certification", "accredited"],
    ],
};

/// Scoring tables in `MoatScores` field order.
pub(crate) static DIMENSIONS: [&DimensionRules; 5] = [
    &NETWORK_EFFECTS,
    &SWITCHING_COSTS,
    &PROPRIETARY_DATA,
    &SCALE_ECONOMIES,
    &BRAND,
];

/// Weights per dimension, in `MoatScores` field order.
const WEIGHTS: [f64; 5] = [0.25, 0.25, 0.20, 0.15, 0.15];

/// Scores defensibility across network effects, switching costs,
/// proprietary data, scale economies and brand.
pub fn analyze_moat(text: &str) -> MoatScores {
    let hay = Haystack::new(text);

    let [network_effects, switching_costs, proprietary_data, scale_economies, brand] =
        DIMENSIONS.map(|rules| rules.score(&hay, BASELINE, GROUP_INCREMENT));

    let weighted: f64 = [
        &network_effects,
        &switching_costs,
        &proprietary_data,
        &scale_economies,
        &brand,
    ]
    .iter()
    .zip(WEIGHTS)
    .map(|(dim, weight)| f64::from(dim.score) * weight)
    .sum();

    MoatScores {
        network_effects,
        switching_costs,
        proprietary_data,
        scale_economies,
        brand,
        overall_score: (weighted * 10.0).round() / 10.0,
    }
}
