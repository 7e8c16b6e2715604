//! Configuration for extraction, simulation and document evaluation.
//!
//! Every default lives here and is passed explicitly into the engines, so the
//! extraction and simulation functions stay pure.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{DprError, Result};

/// Header keywords searched for, in priority order, when locating a BOQ section.
pub const DEFAULT_SECTION_HEADERS: [&str; 5] = [
    "bill of quantities",
    "boq",
    "bill of items",
    "schedule of quantities",
    "bill of quantities (boq)",
];

/// BOQ section location settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Header keywords, matched case-insensitively in this order.
    pub headers: Vec<String>,
    /// Maximum section length in characters, counted from the header.
    pub max_chars: usize,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            headers: DEFAULT_SECTION_HEADERS.iter().map(|h| h.to_string()).collect(),
            max_chars: 20_000,
        }
    }
}

impl SectionConfig {
    /// Validate section settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(DprError::invalid_config("section.max_chars must be at least 1"));
        }
        if self.headers.iter().any(|h| h.trim().is_empty()) {
            return Err(DprError::invalid_config("section.headers must not contain empty keywords"));
        }
        Ok(())
    }
}

/// Monte Carlo simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Coefficient of variation of total cost (std / mean).
    pub cost_cv: f64,
    /// Coefficient of variation of duration.
    pub duration_cv: f64,
    /// Number of samples drawn per outcome.
    pub sample_count: usize,
    /// Seed for the per-call random generator.
    pub seed: u64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            cost_cv: 0.2,
            duration_cv: 0.25,
            sample_count: 5000,
            seed: 42,
        }
    }
}

impl RiskConfig {
    /// Builder-style override of the sample count.
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Builder-style override of the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate simulation settings.
    pub fn validate(&self) -> Result<()> {
        if !self.cost_cv.is_finite() || self.cost_cv < 0.0 {
            return Err(DprError::invalid_parameter(format!(
                "cost_cv must be a finite value >= 0, got {}",
                self.cost_cv
            )));
        }
        if !self.duration_cv.is_finite() || self.duration_cv < 0.0 {
            return Err(DprError::invalid_parameter(format!(
                "duration_cv must be a finite value >= 0, got {}",
                self.duration_cv
            )));
        }
        if self.sample_count == 0 {
            return Err(DprError::invalid_parameter("sample_count must be at least 1"));
        }
        Ok(())
    }
}

/// Baselines used when evaluating a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Cost baseline used when the BOQ yields no positive total.
    pub fallback_base_cost: f64,
    /// Planned project duration in days.
    pub base_duration_days: f64,
    /// Sample count for document evaluation; overrides `risk.sample_count`.
    pub sample_count: usize,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            fallback_base_cost: 50_000_000.0,
            base_duration_days: 365.0,
            sample_count: 2000,
        }
    }
}

impl BaselineConfig {
    /// Validate baselines.
    pub fn validate(&self) -> Result<()> {
        if !self.fallback_base_cost.is_finite() || self.fallback_base_cost <= 0.0 {
            return Err(DprError::invalid_config(format!(
                "baseline.fallback_base_cost must be positive, got {}",
                self.fallback_base_cost
            )));
        }
        if !self.base_duration_days.is_finite() || self.base_duration_days <= 0.0 {
            return Err(DprError::invalid_config(format!(
                "baseline.base_duration_days must be positive, got {}",
                self.base_duration_days
            )));
        }
        if self.sample_count == 0 {
            return Err(DprError::invalid_config("baseline.sample_count must be at least 1"));
        }
        Ok(())
    }
}

/// Top-level configuration for document evaluation.
///
/// ```toml
/// [section]
/// headers = ["bill of quantities", "boq"]
/// max_chars = 20000
///
/// [risk]
/// cost_cv = 0.2
/// duration_cv = 0.25
/// seed = 42
///
/// [baseline]
/// fallback_base_cost = 50000000.0
/// base_duration_days = 365.0
/// sample_count = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub section: SectionConfig,
    pub risk: RiskConfig,
    pub baseline: BaselineConfig,
}

impl EvaluationConfig {
    /// Parse and validate a TOML configuration string.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EvaluationConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Risk settings used for document evaluation.
    pub fn evaluation_risk(&self) -> RiskConfig {
        self.risk.with_sample_count(self.baseline.sample_count)
    }

    /// Validate all sections.
    pub fn validate(&self) -> Result<()> {
        self.section.validate()?;
        self.risk.validate()?;
        self.baseline.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EvaluationConfig::default();
        assert_eq!(config.section.max_chars, 20_000);
        assert_eq!(config.section.headers[0], "bill of quantities");
        assert_eq!(config.risk.sample_count, 5000);
        assert_eq!(config.risk.seed, 42);
        assert_eq!(config.evaluation_risk().sample_count, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EvaluationConfig::from_toml_str(
            r#"
            [risk]
            seed = 7

            [baseline]
            base_duration_days = 730.0
            "#,
        )
        .unwrap();

        assert_eq!(config.risk.seed, 7);
        assert_eq!(config.risk.cost_cv, 0.2);
        assert_eq!(config.baseline.base_duration_days, 730.0);
        assert_eq!(config.baseline.fallback_base_cost, 50_000_000.0);
        assert_eq!(config.section, SectionConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = EvaluationConfig::from_toml_str("[risk]\ncost_cv = -0.5\n").unwrap_err();
        assert!(matches!(err, DprError::InvalidParameter { .. }));

        let err = EvaluationConfig::from_toml_str("[baseline]\nbase_duration_days = 0.0\n").unwrap_err();
        assert!(matches!(err, DprError::InvalidConfig { .. }));

        let err = EvaluationConfig::from_toml_str("[section]\nmax_chars = 0\n").unwrap_err();
        assert!(matches!(err, DprError::InvalidConfig { .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let err = EvaluationConfig::from_toml_str("[risk\nseed = 1").unwrap_err();
        assert!(matches!(err, DprError::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dpreval.toml");
        fs::write(&path, "[risk]\nsample_count = 100\n").unwrap();

        let config = EvaluationConfig::load(&path).unwrap();
        assert_eq!(config.risk.sample_count, 100);

        let missing = EvaluationConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, DprError::Io(_)));
    }
}
