//! Cost and schedule risk simulation.

pub mod distribution;
pub mod monte_carlo;
pub mod stats;

pub use distribution::{standard_normal, LogNormalParams};
pub use monte_carlo::{draw_samples, simulate_risk, simulate_scenarios, summarize_samples, RiskScenario};
