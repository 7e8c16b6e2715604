//! Core types, configuration and errors for dpreval.

pub mod config;
pub mod error;
pub mod types;

pub use config::{BaselineConfig, EvaluationConfig, RiskConfig, SectionConfig};
pub use error::{DprError, Result};
pub use types::*;
