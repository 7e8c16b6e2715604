// Suppress warning from PyO3 macro expansion (fixed in newer PyO3 versions)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

//! dpreval - bill-of-quantities extraction and cost/schedule risk simulation
//! for detailed project reports (DPRs).
//!
//! This crate provides:
//! - Heuristic BOQ line parsing from free report text
//! - BOQ section location and summary statistics
//! - Log-normal Monte Carlo simulation of cost and duration overruns
//! - Document-level assessment tying the two together
//! - Optional Python bindings (`python` feature)

pub mod boq;
pub mod core;
pub mod evaluation;
pub mod risk;

#[cfg(feature = "python")]
pub mod python;

pub use crate::core::{
    BoqLineItem, BoqSummary, DprError, EvaluationConfig, OutcomeStats, PercentileBand, Result,
    RiskConfig, RiskSamples, RiskSimulationResult, SectionConfig,
};
pub use evaluation::{
    evaluate_document, evaluate_documents, extract_and_summarize_boq,
    extract_and_summarize_boq_with, DprAssessment,
};
pub use risk::{draw_samples, simulate_risk, simulate_scenarios, RiskScenario};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module entry point
#[cfg(feature = "python")]
#[pymodule]
fn _dpreval(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    // Register config and result classes
    m.add_class::<python::bindings::PyRiskConfig>()?;
    m.add_class::<python::bindings::PyBoqLineItem>()?;
    m.add_class::<python::bindings::PyBoqSummary>()?;
    m.add_class::<python::bindings::PyRiskSimulationResult>()?;
    m.add_class::<python::bindings::PyDprAssessment>()?;

    // Register functions
    m.add_function(wrap_pyfunction!(python::bindings::extract_and_summarize_boq, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::simulate_risk, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::simulate_risk_samples, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::evaluate_document, m)?)?;

    Ok(())
}
