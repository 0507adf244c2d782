//! Declarative pattern library shared by the narrative analyzers.
//!
//! Rules are grouped per [`SectionKey`] into ordered lists; declaration order
//! is match priority. Each rule carries a [`Trigger`] that is either an
//! ordered keyword set (case-insensitive substring search) or a regex tested
//! against the original-case text.

pub mod blind_spots;
pub mod evidence;

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::data::analysis::{BlindSpotSeverity, BlindSpotType};

pub use blind_spots::blind_spot_rules;
pub use evidence::{evidence_rules, EvidenceRule};

/// Memo section identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    /// The customer problem.
    Problem,
    /// The proposed solution.
    Solution,
    /// Market size and dynamics.
    Market,
    /// How the company makes money.
    BusinessModel,
    /// Evidence of demand so far.
    Traction,
    /// Founders and key hires.
    Team,
    /// Competitive landscape.
    Competition,
}

impl SectionKey {
    /// All sections in memo order.
    pub const ALL: [Self; 7] = [
        Self::Problem,
        Self::Solution,
        Self::Market,
        Self::BusinessModel,
        Self::Traction,
        Self::Team,
        Self::Competition,
    ];

    /// Parses a section identifier leniently ("business-model",
    /// "businessModel", "business_model"). Unknown identifiers yield `None`.
    pub fn parse(id: &str) -> Option<Self> {
        let compact: String = id
            .to_lowercase()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();

        match compact.as_str() {
            "problem" => Some(Self::Problem),
            "solution" => Some(Self::Solution),
            "market" => Some(Self::Market),
            "businessmodel" => Some(Self::BusinessModel),
            "traction" => Some(Self::Traction),
            "team" => Some(Self::Team),
            "competition" => Some(Self::Competition),
            _ => None,
        }
    }

    /// Identifier used in rule ids and serialised output.
    pub fn id(self) -> &'static str {
        match self {
            Self::Problem => "problem",
            Self::Solution => "solution",
            Self::Market => "market",
            Self::BusinessModel => "business_model",
            Self::Traction => "traction",
            Self::Team => "team",
            Self::Competition => "competition",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Coarse rule kind, as exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Ordered keyword list.
    KeywordSet,
    /// Regular expression.
    Regex,
}

/// What makes a rule fire.
#[derive(Debug)]
pub enum Trigger {
    /// Fires on the first keyword (lowercase) found as a substring.
    Keywords(&'static [&'static str]),
    /// Fires when the regex matches the original-case text.
    Pattern(Regex),
    /// Fires when the regex does NOT match the original-case text.
    Absent(Regex),
}

impl Trigger {
    /// Returns the coarse kind of this trigger.
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Keywords(_) => RuleKind::KeywordSet,
            Self::Pattern(_) | Self::Absent(_) => RuleKind::Regex,
        }
    }

    /// Tests the trigger against prepared text.
    pub fn test(&self, text: &Haystack<'_>) -> Option<TriggerMatch> {
        match self {
            Self::Keywords(keywords) => keywords
                .iter()
                .copied()
                .find(|&keyword| text.lower.contains(keyword))
                .map(TriggerMatch::Keyword),
            Self::Pattern(re) => re.is_match(text.original).then_some(TriggerMatch::Pattern),
            Self::Absent(re) => (!re.is_match(text.original)).then_some(TriggerMatch::Pattern),
        }
    }
}

/// Outcome of a successful trigger test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMatch {
    /// A keyword rule fired on this keyword.
    Keyword(&'static str),
    /// A regex rule fired.
    Pattern,
}

impl TriggerMatch {
    /// Keyword that fired, for keyword rules.
    pub fn matched_text(self) -> Option<&'static str> {
        match self {
            Self::Keyword(keyword) => Some(keyword),
            Self::Pattern => None,
        }
    }
}

/// Text prepared once for repeated rule tests.
#[derive(Debug, Clone)]
pub struct Haystack<'a> {
    /// Original-case text, used by regex rules.
    pub original: &'a str,
    /// Lowercased text, used by keyword rules.
    pub lower: String,
}

impl<'a> Haystack<'a> {
    /// Prepares text for matching.
    pub fn new(original: &'a str) -> Self {
        Self {
            original,
            lower: crate::text::normalize_str(original),
        }
    }
}

/// A blind-spot rule declared for one section.
#[derive(Debug)]
pub struct PatternRule {
    /// Stable identifier (`<section>.<name>`).
    pub id: &'static str,
    /// Section the rule belongs to.
    pub section: SectionKey,
    /// What makes the rule fire.
    pub trigger: Trigger,
    /// Blind-spot category.
    pub category: BlindSpotType,
    /// Severity.
    pub severity: BlindSpotSeverity,
    /// Message shown to the founder.
    pub message: &'static str,
    /// How to address it.
    pub suggestion: &'static str,
}

impl PatternRule {
    /// Returns the coarse kind of this rule.
    pub fn kind(&self) -> RuleKind {
        self.trigger.kind()
    }
}

/// Tests one rule against text.
pub fn match_rule(text: &Haystack<'_>, rule: &PatternRule) -> Option<TriggerMatch> {
    rule.trigger.test(text)
}

/// Builds a regex from a constant pattern.
#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
pub(crate) fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// Ordered first-match-wins classifier with a mandatory default.
///
/// The default is part of the type, so classification is total.
pub struct FirstMatch<T: 'static> {
    rules: &'static [(fn(&str) -> bool, T)],
    default: T,
}

impl<T: Copy> FirstMatch<T> {
    /// Creates a classifier from ordered `(predicate, label)` pairs.
    pub const fn new(rules: &'static [(fn(&str) -> bool, T)], default: T) -> Self {
        Self { rules, default }
    }

    /// Returns the label of the first matching predicate, or the default.
    pub fn classify(&self, text: &str) -> T {
        self.rules
            .iter()
            .find(|(predicate, _)| predicate(text))
            .map_or(self.default, |(_, label)| *label)
    }
}
