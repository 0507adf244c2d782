//! Static per-stage defaults, loaded from an embedded YAML table.

use std::collections::HashMap;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::data::financial::BusinessModelType;
use crate::data::responses::Stage;

/// Parsed defaults table: stage key → business model → value.
#[derive(Debug, Default, Deserialize)]
pub struct StageDefaults {
    stages: HashMap<String, HashMap<BusinessModelType, f64>>,
}

impl StageDefaults {
    /// Loads the embedded table.
    pub fn load() -> Result<Self> {
        let yaml_content = include_str!("../templates/stage_defaults.yaml");
        Self::from_yaml(yaml_content)
    }

    /// Parses a defaults table from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse stage defaults table")
    }

    /// Default value for a stage and model. `Unknown` uses the `default` row.
    pub fn lookup(&self, stage: Stage, model: BusinessModelType) -> Option<f64> {
        self.stages
            .get(stage.table_key())
            .and_then(|row| row.get(&model))
            .copied()
    }
}

static STAGE_DEFAULTS: OnceLock<StageDefaults> = OnceLock::new();

/// Global defaults table. An unreadable table behaves as empty.
pub fn get_stage_defaults() -> &'static StageDefaults {
    STAGE_DEFAULTS.get_or_init(|| {
        StageDefaults::load().unwrap_or_else(|e| {
            warn!("Stage defaults unavailable: {e:#}");
            StageDefaults::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_loads() {
        let defaults = StageDefaults::load().unwrap();
        for stage in [
            Stage::Idea,
            Stage::PreSeed,
            Stage::Seed,
            Stage::SeriesA,
            Stage::SeriesBPlus,
            Stage::Unknown,
        ] {
            for model in BusinessModelType::ALL {
                assert!(defaults.lookup(stage, model).is_some(), "{stage} {model}");
            }
        }
    }

    #[test]
    fn values_grow_with_stage() {
        let defaults = get_stage_defaults();
        let idea = defaults.lookup(Stage::Idea, BusinessModelType::Saas).unwrap();
        let series_a = defaults.lookup(Stage::SeriesA, BusinessModelType::Saas).unwrap();
        assert!(idea < series_a);
    }

    #[test]
    fn missing_row_is_none() {
        let defaults = StageDefaults::from_yaml("stages:\n  seed:\n    saas: 100\n").unwrap();
        assert_eq!(defaults.lookup(Stage::Seed, BusinessModelType::Saas), Some(100.0));
        assert_eq!(defaults.lookup(Stage::Seed, BusinessModelType::Aum), None);
        assert_eq!(defaults.lookup(Stage::Unknown, BusinessModelType::Saas), None);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(StageDefaults::from_yaml("stages: [1, 2").is_err());
    }
}
