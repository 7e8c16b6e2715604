//! PyO3 function bindings for dpreval.

use numpy::PyArray1;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::config::{BaselineConfig, EvaluationConfig, RiskConfig};
use crate::core::types::{BoqLineItem, BoqSummary, OutcomeStats, PercentileBand, RiskSimulationResult};
use crate::evaluation::{self, DprAssessment};
use crate::risk;

use super::numpy_bridge::vec_to_numpy_f64;

// ============================================================================
// Configuration Classes
// ============================================================================

/// Python-exposed simulation configuration.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyRiskConfig {
    #[pyo3(get, set)]
    pub cost_cv: f64,
    #[pyo3(get, set)]
    pub duration_cv: f64,
    #[pyo3(get, set)]
    pub sample_count: usize,
    #[pyo3(get, set)]
    pub seed: u64,
}

#[pymethods]
impl PyRiskConfig {
    #[new]
    #[pyo3(signature = (cost_cv=0.2, duration_cv=0.25, sample_count=5000, seed=42))]
    fn new(cost_cv: f64, duration_cv: f64, sample_count: usize, seed: u64) -> Self {
        Self {
            cost_cv,
            duration_cv,
            sample_count,
            seed,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "RiskConfig(cost_cv={}, duration_cv={}, sample_count={}, seed={})",
            self.cost_cv, self.duration_cv, self.sample_count, self.seed
        )
    }
}

impl From<&PyRiskConfig> for RiskConfig {
    fn from(py_config: &PyRiskConfig) -> Self {
        RiskConfig {
            cost_cv: py_config.cost_cv,
            duration_cv: py_config.duration_cv,
            sample_count: py_config.sample_count,
            seed: py_config.seed,
        }
    }
}

// ============================================================================
// Result Classes
// ============================================================================

/// Python-exposed BOQ line item. Missing numbers are `None`.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyBoqLineItem {
    #[pyo3(get)]
    pub description: String,
    #[pyo3(get)]
    pub quantity: Option<f64>,
    #[pyo3(get)]
    pub unit: String,
    #[pyo3(get)]
    pub rate: Option<f64>,
    #[pyo3(get)]
    pub amount: Option<f64>,
}

impl From<&BoqLineItem> for PyBoqLineItem {
    fn from(item: &BoqLineItem) -> Self {
        Self {
            description: item.description().to_string(),
            quantity: item.quantity(),
            unit: item.unit().to_string(),
            rate: item.rate(),
            amount: item.amount(),
        }
    }
}

#[pymethods]
impl PyBoqLineItem {
    fn __repr__(&self) -> String {
        format!(
            "BoqLineItem(desc={:?}, qty={:?}, unit={:?}, rate={:?}, amount={:?})",
            self.description, self.quantity, self.unit, self.rate, self.amount
        )
    }

    fn to_dict(&self, py: Python) -> PyResult<PyObject> {
        let dict = PyDict::new(py);
        dict.set_item("desc", &self.description)?;
        dict.set_item("qty", self.quantity)?;
        dict.set_item("unit", &self.unit)?;
        dict.set_item("rate", self.rate)?;
        dict.set_item("amount", self.amount)?;
        Ok(dict.into())
    }
}

/// Python-exposed BOQ summary.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyBoqSummary {
    #[pyo3(get)]
    pub item_count: usize,
    #[pyo3(get)]
    pub total_estimated_cost: f64,
    #[pyo3(get)]
    pub missing_rate_count: usize,
    #[pyo3(get)]
    pub missing_qty_count: usize,
}

impl From<&BoqSummary> for PyBoqSummary {
    fn from(summary: &BoqSummary) -> Self {
        Self {
            item_count: summary.item_count,
            total_estimated_cost: summary.total_estimated_cost,
            missing_rate_count: summary.missing_rate_count,
            missing_qty_count: summary.missing_qty_count,
        }
    }
}

#[pymethods]
impl PyBoqSummary {
    fn __repr__(&self) -> String {
        format!(
            "BoqSummary(items={}, total={:.2}, missing_rate={}, missing_qty={})",
            self.item_count, self.total_estimated_cost, self.missing_rate_count, self.missing_qty_count
        )
    }

    fn to_dict(&self, py: Python) -> PyResult<PyObject> {
        let dict = PyDict::new(py);
        dict.set_item("items_count", self.item_count)?;
        dict.set_item("total_estimated_cost", self.total_estimated_cost)?;
        dict.set_item("missing_rate_count", self.missing_rate_count)?;
        dict.set_item("missing_qty_count", self.missing_qty_count)?;
        Ok(dict.into())
    }
}

fn outcome_dict<'py>(py: Python<'py>, stats: &OutcomeStats) -> PyResult<&'py PyDict> {
    let dict = PyDict::new(py);
    dict.set_item("mean", stats.mean)?;
    dict.set_item("std", stats.std)?;
    dict.set_item("p10", stats.p10)?;
    dict.set_item("p50", stats.p50)?;
    dict.set_item("p90", stats.p90)?;
    dict.set_item("overrun_pct_mean", stats.overrun_pct_mean)?;
    dict.set_item("overrun_pct_p90", stats.overrun_pct_p90)?;
    Ok(dict)
}

fn band_dict<'py>(py: Python<'py>, band: &PercentileBand) -> PyResult<&'py PyDict> {
    let dict = PyDict::new(py);
    dict.set_item("p10", band.p10)?;
    dict.set_item("p50", band.p50)?;
    dict.set_item("p90", band.p90)?;
    Ok(dict)
}

/// Python-exposed risk simulation result.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyRiskSimulationResult {
    inner: RiskSimulationResult,
}

impl From<RiskSimulationResult> for PyRiskSimulationResult {
    fn from(inner: RiskSimulationResult) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyRiskSimulationResult {
    #[getter]
    fn sample_count(&self) -> usize {
        self.inner.sample_count
    }

    #[getter]
    fn cost_p50(&self) -> f64 {
        self.inner.cost.p50
    }

    #[getter]
    fn cost_p90(&self) -> f64 {
        self.inner.cost.p90
    }

    #[getter]
    fn duration_p50(&self) -> f64 {
        self.inner.duration.p50
    }

    #[getter]
    fn duration_p90(&self) -> f64 {
        self.inner.duration.p90
    }

    fn __repr__(&self) -> String {
        format!(
            "RiskSimulationResult(samples={}, cost_p50={:.2}, cost_p90={:.2}, duration_p90={:.1})",
            self.inner.sample_count, self.inner.cost.p50, self.inner.cost.p90, self.inner.duration.p90
        )
    }

    /// Convert to the nested dictionary layout used by report templates.
    fn to_dict(&self, py: Python) -> PyResult<PyObject> {
        let dict = PyDict::new(py);
        dict.set_item("n_sims", self.inner.sample_count)?;
        dict.set_item("cost", outcome_dict(py, &self.inner.cost)?)?;
        dict.set_item("duration", outcome_dict(py, &self.inner.duration)?)?;
        dict.set_item(
            "cost_overrun_distribution_pct",
            band_dict(py, &self.inner.cost_overrun_distribution_pct)?,
        )?;
        dict.set_item(
            "duration_overrun_distribution_pct",
            band_dict(py, &self.inner.duration_overrun_distribution_pct)?,
        )?;
        Ok(dict.into())
    }
}

/// Python-exposed document assessment.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyDprAssessment {
    inner: DprAssessment,
}

#[pymethods]
impl PyDprAssessment {
    #[getter]
    fn section_found(&self) -> bool {
        self.inner.section_found
    }

    #[getter]
    fn base_cost(&self) -> f64 {
        self.inner.base_cost
    }

    #[getter]
    fn used_fallback_cost(&self) -> bool {
        self.inner.used_fallback_cost
    }

    #[getter]
    fn items(&self) -> Vec<PyBoqLineItem> {
        self.inner.items.iter().map(PyBoqLineItem::from).collect()
    }

    #[getter]
    fn summary(&self) -> PyBoqSummary {
        PyBoqSummary::from(&self.inner.summary)
    }

    #[getter]
    fn risk(&self) -> PyRiskSimulationResult {
        PyRiskSimulationResult::from(self.inner.risk.clone())
    }

    /// Markdown block for the synthesis prompt.
    fn to_markdown(&self) -> String {
        self.inner.to_markdown()
    }

    fn __repr__(&self) -> String {
        format!(
            "DprAssessment(items={}, base_cost={:.2}, fallback={})",
            self.inner.summary.item_count, self.inner.base_cost, self.inner.used_fallback_cost
        )
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Locate, parse and summarize the BOQ of a document.
#[pyfunction]
pub fn extract_and_summarize_boq(text: &str) -> (Vec<PyBoqLineItem>, PyBoqSummary) {
    let (items, summary) = evaluation::extract_and_summarize_boq(text);
    (
        items.iter().map(PyBoqLineItem::from).collect(),
        PyBoqSummary::from(&summary),
    )
}

/// Run a Monte Carlo cost/schedule simulation.
#[pyfunction]
#[pyo3(signature = (base_cost, base_duration_days=365.0, config=None))]
pub fn simulate_risk(
    base_cost: f64,
    base_duration_days: f64,
    config: Option<&PyRiskConfig>,
) -> PyResult<PyRiskSimulationResult> {
    let rust_config = config.map(RiskConfig::from).unwrap_or_default();
    let result = risk::simulate_risk(base_cost, base_duration_days, &rust_config)?;
    Ok(result.into())
}

/// Raw cost and duration draws as numpy arrays.
#[pyfunction]
#[pyo3(signature = (base_cost, base_duration_days=365.0, config=None))]
pub fn simulate_risk_samples<'py>(
    py: Python<'py>,
    base_cost: f64,
    base_duration_days: f64,
    config: Option<&PyRiskConfig>,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let rust_config = config.map(RiskConfig::from).unwrap_or_default();
    let samples = risk::draw_samples(base_cost, base_duration_days, &rust_config)?;
    Ok((
        vec_to_numpy_f64(py, samples.costs),
        vec_to_numpy_f64(py, samples.durations),
    ))
}

/// Extract the BOQ and simulate risk around its total.
#[pyfunction]
#[pyo3(signature = (text, base_duration_days=365.0, fallback_base_cost=50_000_000.0, sample_count=2000, config=None))]
pub fn evaluate_document(
    text: &str,
    base_duration_days: f64,
    fallback_base_cost: f64,
    sample_count: usize,
    config: Option<&PyRiskConfig>,
) -> PyResult<PyDprAssessment> {
    let eval_config = EvaluationConfig {
        risk: config.map(RiskConfig::from).unwrap_or_default(),
        baseline: BaselineConfig {
            fallback_base_cost,
            base_duration_days,
            sample_count,
        },
        ..EvaluationConfig::default()
    };
    let inner = evaluation::evaluate_document(text, &eval_config)?;
    Ok(PyDprAssessment { inner })
}
