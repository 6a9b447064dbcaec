//! Ladder configuration loading.
//!
//! The tier table and the award and reputation policies are injected as one
//! [`LadderConfig`], normally read from a TOML file. Every section is
//! optional and falls back to the standard values.
//!
//! ```toml
//! [awards]
//! base = 20
//! upset_bonus = 15
//!
//! [reputation]
//! false_result_penalties = [-5, -10, -15]
//!
//! [reputation.thresholds]
//! trustworthy_from = 50
//!
//! [[tiers]]
//! rank = "Novice"
//! divisions = [
//!     { division = "V", min_points = 0, max_points = 100 },
//!     { division = "I", min_points = 100 },
//! ]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::award::{AwardPolicyError, MatchAwardPolicy};
use crate::reputation::{PolicyError, ReputationPolicy};
use crate::table::RankTierTable;

/// Errors that can occur when loading a ladder configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// The file is not valid TOML, or its tier table does not partition
    /// the point line.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid award policy: {0}")]
    Awards(#[from] AwardPolicyError),
    #[error("invalid reputation policy: {0}")]
    Reputation(#[from] PolicyError),
}

/// Everything the engines need, as one injectable value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderConfig {
    pub tiers: RankTierTable,
    pub awards: MatchAwardPolicy,
    pub reputation: ReputationPolicy,
}

impl LadderConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file, or the standard configuration if the
    /// file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using standard ladder");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            bands = config.tiers.bands().count(),
            "loaded ladder config"
        );
        Ok(config)
    }

    /// Checks the policies. The tier table is validated when it is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.awards.validate()?;
        self.reputation.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::{Division, Placement, Rank};
    use std::io::Write;

    #[test]
    fn empty_document_is_standard() {
        let config = LadderConfig::from_toml_str("").unwrap();
        assert_eq!(config, LadderConfig::default());
        assert_eq!(config.tiers, RankTierTable::standard());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = LadderConfig::from_toml_str(
            r#"
[awards]
upset_bonus = 25

[reputation.thresholds]
trustworthy_from = 100
"#,
        )
        .unwrap();
        assert_eq!(config.awards.upset_bonus, 25);
        assert_eq!(config.awards.base, 20);
        assert_eq!(config.reputation.thresholds.trustworthy_from, 100);
        assert_eq!(config.reputation.thresholds.unfair_from, -10);
        assert_eq!(config.reputation.false_result_penalties, vec![-5, -10, -15]);
    }

    #[test]
    fn custom_tiers() {
        let config = LadderConfig::from_toml_str(
            r#"
[[tiers]]
rank = "Novice"
divisions = [
    { division = "V", min_points = 0, max_points = 100 },
    { division = "I", min_points = 100, max_points = 200 },
]

[[tiers]]
rank = "Adept"
divisions = [{ division = "V", min_points = 200 }]
"#,
        )
        .unwrap();
        assert_eq!(
            config.tiers.rank_for_points(150),
            Placement::new(Rank::Novice, Division::I)
        );
        assert_eq!(
            config.tiers.rank_for_points(9_999),
            Placement::new(Rank::Adept, Division::V)
        );
    }

    #[test]
    fn gap_in_tiers_is_a_parse_error() {
        let err = LadderConfig::from_toml_str(
            r#"
[[tiers]]
rank = "Novice"
divisions = [
    { division = "V", min_points = 0, max_points = 100 },
    { division = "I", min_points = 120 },
]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().contains("gap or overlap"));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = LadderConfig::from_toml_str(
            r#"
[[tiers]]
rank = "Legend"
divisions = [{ division = "V", min_points = 0 }]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown rank tag"));
    }

    #[test]
    fn invalid_policies() {
        let err = LadderConfig::from_toml_str("[awards]\nfloor = 50\n").unwrap_err();
        assert!(matches!(err, ConfigError::Awards(_)));

        let err =
            LadderConfig::from_toml_str("[reputation]\nfalse_result_penalties = []\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Reputation(PolicyError::EmptyPenaltyLadder)
        ));
    }

    #[test]
    fn load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = LadderConfig::load(dir.path().join("ladder.toml")).unwrap();
        assert_eq!(config, LadderConfig::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[awards]\nbase = 30").unwrap();
        let config = LadderConfig::load(file.path()).unwrap();
        assert_eq!(config.awards.base, 30);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = LadderConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(LadderConfig::from_toml_str(&text).unwrap(), config);
    }
}
