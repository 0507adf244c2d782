//! Blind-spot detection over section text.

use std::collections::HashSet;

use tracing::debug;

use crate::data::analysis::BlindSpot;
use crate::patterns::{blind_spot_rules, match_rule, Haystack, SectionKey};

/// Blind spots the founder has already dismissed.
///
/// Entries are matched against either the rule's message or its stable id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dismissals {
    messages: HashSet<String>,
    rule_ids: HashSet<String>,
}

impl Dismissals {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds dismissals from free-form entries. Entries that look like a
    /// rule id (`<section>.<name>`) also dismiss by id.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dismissals = Self::new();
        for entry in entries {
            let entry = entry.into();
            if looks_like_rule_id(&entry) {
                dismissals.rule_ids.insert(entry.clone());
            }
            dismissals.messages.insert(entry);
        }
        dismissals
    }

    /// Dismisses by message text.
    pub fn dismiss_message(&mut self, message: impl Into<String>) {
        self.messages.insert(message.into());
    }

    /// Dismisses by rule id.
    pub fn dismiss_rule(&mut self, rule_id: impl Into<String>) {
        self.rule_ids.insert(rule_id.into());
    }

    /// Returns true when nothing is dismissed.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.rule_ids.is_empty()
    }

    /// Whether a blind spot has been dismissed.
    pub fn contains(&self, spot: &BlindSpot) -> bool {
        self.messages.contains(&spot.message) || self.rule_ids.contains(&spot.rule_id)
    }
}

fn looks_like_rule_id(entry: &str) -> bool {
    entry.split_once('.').is_some_and(|(section, name)| {
        SectionKey::parse(section).is_some_and(|key| key.id() == section)
            && !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_')
    })
}

/// Detects risky language patterns in a section, in rule declaration
/// order, skipping dismissed ones.
pub fn detect_blind_spots(
    text: &str,
    section: SectionKey,
    dismissed: &Dismissals,
) -> Vec<BlindSpot> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let hay = Haystack::new(text);
    let spots: Vec<BlindSpot> = blind_spot_rules(section)
        .iter()
        .filter_map(|rule| {
            match_rule(&hay, rule).map(|hit| BlindSpot {
                rule_id: rule.id.to_string(),
                spot_type: rule.category,
                severity: rule.severity,
                message: rule.message.to_string(),
                suggestion: rule.suggestion.to_string(),
                matched_text: hit.matched_text().map(str::to_string),
            })
        })
        .filter(|spot| !dismissed.contains(spot))
        .collect();

    debug!(section = %section, count = spots.len(), "Detected blind spots");
    spots
}
