//! Questionnaire responses and company descriptors.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::text;

/// Flat questionnaire answers keyed by question id.
///
/// Keys iterate in ascending order, which fixes the scan order used by the
/// financial extractor. Non-string answers are coerced to text on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseMap(BTreeMap<String, String>);

impl ResponseMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from arbitrary JSON answers, coercing each to text.
    pub fn from_values(values: BTreeMap<String, serde_json::Value>) -> Self {
        Self(
            values
                .into_iter()
                .map(|(key, value)| {
                    let answer = text::coerce(&value, &format!("responses.{key}"));
                    (key, answer)
                })
                .collect(),
        )
    }

    /// Inserts or replaces an answer.
    pub fn insert(&mut self, key: impl Into<String>, answer: impl Into<String>) {
        self.0.insert(key.into(), answer.into());
    }

    /// Returns the answer for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterates answers in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true when there are no answers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joins all non-blank answers with newlines, in key order.
    pub fn joined_text(&self) -> String {
        self.0
            .values()
            .filter(|v| !v.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'de> Deserialize<'de> for ResponseMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(Self::from_values(values))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResponseMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Funding stage of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Idea or concept stage.
    Idea,
    /// Pre-seed.
    PreSeed,
    /// Seed.
    Seed,
    /// Series A.
    SeriesA,
    /// Series B or later.
    SeriesBPlus,
    /// Stage not given or not recognised.
    #[default]
    Unknown,
}

impl Stage {
    /// Parses a free-form stage label ("Pre-Seed", "series a", "Series C").
    pub fn parse(label: &str) -> Self {
        let compact: String = label
            .to_lowercase()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();

        match compact.as_str() {
            "idea" | "ideation" | "concept" => Self::Idea,
            "preseed" => Self::PreSeed,
            "seed" => Self::Seed,
            "seriesa" => Self::SeriesA,
            s if s.starts_with("series") && s.len() == "series".len() + 1 => Self::SeriesBPlus,
            "seriesbplus" | "growth" | "lategrowth" => Self::SeriesBPlus,
            _ => {
                tracing::debug!("Unrecognised stage {label:?}, using Unknown");
                Self::Unknown
            }
        }
    }

    /// Key used in the stage defaults table.
    pub fn table_key(self) -> &'static str {
        match self {
            Self::Idea => "idea",
            Self::PreSeed => "pre_seed",
            Self::Seed => "seed",
            Self::SeriesA => "series_a",
            Self::SeriesBPlus => "series_b_plus",
            Self::Unknown => "default",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idea => "idea",
            Self::PreSeed => "pre-seed",
            Self::Seed => "seed",
            Self::SeriesA => "series A",
            Self::SeriesBPlus => "series B+",
            Self::Unknown => "unknown",
        };
        write!(f, "{label}")
    }
}

fn deserialize_stage<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Stage, D::Error> {
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.as_deref().map_or(Stage::Unknown, Stage::parse))
}

/// Company identity passed to the estimator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDescriptor {
    /// Company name.
    #[serde(default)]
    pub name: String,
    /// Industry or product category.
    #[serde(default)]
    pub category: String,
    /// Funding stage.
    #[serde(default, deserialize_with = "deserialize_stage")]
    pub stage: Stage,
}

impl CompanyDescriptor {
    /// Creates a descriptor, parsing the stage label leniently.
    pub fn new(name: impl Into<String>, category: impl Into<String>, stage: &str) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            stage: Stage::parse(stage),
        }
    }
}
