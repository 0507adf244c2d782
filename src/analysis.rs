//! Narrative analyzers: pain intensity, evidence checklists, blind spots
//! and moat strength.

pub mod blind_spots;
pub mod evidence;
pub mod moat;
pub mod pain;

pub use blind_spots::{detect_blind_spots, Dismissals};
pub use evidence::analyze_evidence;
pub use moat::analyze_moat;
pub use pain::analyze_pain;

use crate::data::analysis::DimensionScore;
use crate::patterns::{Haystack, Trigger};

/// Upper bound for every dimension score.
pub const MAX_DIMENSION_SCORE: u8 = 10;

/// Scoring table for one dimension: a name and its keyword groups.
///
/// Each group counts at most once, however many of its keywords appear.
#[derive(Debug)]
pub struct DimensionRules {
    /// Dimension name.
    pub name: &'static str,
    /// Keyword groups in declaration order.
    pub groups: &'static [&'static [&'static str]],
}

impl DimensionRules {
    /// Scores prepared text: `baseline + increment * hits`, clamped to
    /// `0..=10`. Evidence is the keyword that fired in the first hit group.
    pub fn score(&self, text: &Haystack<'_>, baseline: u8, increment: u8) -> DimensionScore {
        let mut hits: u32 = 0;
        let mut evidence = None;

        for &group in self.groups {
            if let Some(hit) = Trigger::Keywords(group).test(text) {
                hits += 1;
                if evidence.is_none() {
                    evidence = hit.matched_text().map(str::to_string);
                }
            }
        }

        let raw = u32::from(baseline) + u32::from(increment) * hits;
        DimensionScore {
            name: self.name.to_string(),
            score: raw.min(u32::from(MAX_DIMENSION_SCORE)) as u8,
            evidence,
        }
    }
}
