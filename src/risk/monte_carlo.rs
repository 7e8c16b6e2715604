//! Monte Carlo cost and schedule risk simulation.
//!
//! Cost and duration are modelled as independent log-normal variables whose
//! mean is the planned baseline. Each call seeds its own generator, so equal
//! inputs always give bit-identical results and concurrent calls never share
//! random state.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::distribution::LogNormalParams;
use super::stats::{band_sorted, mean, overrun_pct, population_std, sorted};
use crate::core::config::RiskConfig;
use crate::core::error::{DprError, Result};
use crate::core::types::{OutcomeStats, RiskSamples, RiskSimulationResult};

/// One simulation request, for batch runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskScenario {
    pub base_cost: f64,
    pub base_duration_days: f64,
    #[serde(default)]
    pub config: RiskConfig,
}

impl RiskScenario {
    /// Create a scenario with default simulation settings.
    pub fn new(base_cost: f64, base_duration_days: f64) -> Self {
        Self {
            base_cost,
            base_duration_days,
            config: RiskConfig::default(),
        }
    }

    /// Builder-style override of the simulation settings.
    pub fn with_config(mut self, config: RiskConfig) -> Self {
        self.config = config;
        self
    }
}

fn validate_baseline(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DprError::invalid_parameter(format!(
            "{} must be a finite value > 0, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Draw raw cost and duration samples.
///
/// All cost draws come first, then all duration draws, from one generator
/// seeded with `config.seed`.
pub fn draw_samples(base_cost: f64, base_duration_days: f64, config: &RiskConfig) -> Result<RiskSamples> {
    validate_baseline("base_cost", base_cost)?;
    validate_baseline("base_duration_days", base_duration_days)?;
    config.validate()?;

    let cost_params = LogNormalParams::from_mean_cv(base_cost, config.cost_cv)?;
    let duration_params = LogNormalParams::from_mean_cv(base_duration_days, config.duration_cv)?;
    debug!(
        cost_mu = cost_params.mu,
        cost_sigma = cost_params.sigma,
        duration_mu = duration_params.mu,
        duration_sigma = duration_params.sigma,
        "derived log-normal parameters"
    );

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let costs: Vec<f64> = (0..config.sample_count)
        .map(|_| cost_params.sample(&mut rng))
        .collect();
    let durations: Vec<f64> = (0..config.sample_count)
        .map(|_| duration_params.sample(&mut rng))
        .collect();

    Ok(RiskSamples {
        base_cost,
        base_duration_days,
        costs,
        durations,
    })
}

fn outcome_stats(samples: &[f64], baseline: f64) -> (OutcomeStats, Vec<f64>) {
    let sorted_samples = sorted(samples);
    let band = band_sorted(&sorted_samples);

    let overruns = overrun_pct(samples, baseline);
    let sorted_overruns = sorted(&overruns);
    let overrun_band = band_sorted(&sorted_overruns);

    let stats = OutcomeStats {
        mean: mean(samples),
        std: population_std(samples),
        p10: band.p10,
        p50: band.p50,
        p90: band.p90,
        overrun_pct_mean: mean(&overruns),
        overrun_pct_p90: overrun_band.p90,
    };
    (stats, sorted_overruns)
}

/// Reduce raw samples to the simulation summary.
pub fn summarize_samples(samples: &RiskSamples) -> RiskSimulationResult {
    let (cost, cost_overruns) = outcome_stats(&samples.costs, samples.base_cost);
    let (duration, duration_overruns) = outcome_stats(&samples.durations, samples.base_duration_days);

    RiskSimulationResult {
        sample_count: samples.len(),
        cost,
        duration,
        cost_overrun_distribution_pct: band_sorted(&cost_overruns),
        duration_overrun_distribution_pct: band_sorted(&duration_overruns),
    }
}

/// Run a cost/schedule risk simulation.
///
/// # Arguments
/// * `base_cost` - Planned total cost, must be positive
/// * `base_duration_days` - Planned duration in days, must be positive
/// * `config` - Coefficients of variation, sample count and seed
///
/// # Errors
/// `DprError::InvalidParameter` for a non-positive baseline, a negative
/// coefficient of variation or a zero sample count.
pub fn simulate_risk(
    base_cost: f64,
    base_duration_days: f64,
    config: &RiskConfig,
) -> Result<RiskSimulationResult> {
    let samples = draw_samples(base_cost, base_duration_days, config)?;
    let result = summarize_samples(&samples);

    info!(
        samples = result.sample_count,
        seed = config.seed,
        cost_p50 = result.cost.p50,
        cost_p90 = result.cost.p90,
        duration_p90 = result.duration.p90,
        "risk simulation complete"
    );
    Ok(result)
}

/// Run independent scenarios in parallel, preserving input order.
pub fn simulate_scenarios(scenarios: &[RiskScenario]) -> Vec<Result<RiskSimulationResult>> {
    scenarios
        .par_iter()
        .map(|s| simulate_risk(s.base_cost, s.base_duration_days, &s.config))
        .collect()
}
