//! Whole-document assessment: BOQ extraction feeding the risk simulation.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::boq::BoqExtractor;
use crate::core::config::EvaluationConfig;
use crate::core::error::Result;
use crate::core::types::{BoqLineItem, BoqSummary, RiskSimulationResult};
use crate::risk::simulate_risk;

/// BOQ analysis and risk simulation for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DprAssessment {
    /// Whether a BOQ header was found; otherwise the whole document was parsed.
    pub section_found: bool,
    /// Parsed BOQ items in source order.
    pub items: Vec<BoqLineItem>,
    /// Totals over `items`.
    pub summary: BoqSummary,
    /// Cost baseline fed to the simulation.
    pub base_cost: f64,
    /// True when the BOQ total was not a positive finite number and the configured
    /// fallback was used.
    pub used_fallback_cost: bool,
    /// Duration baseline fed to the simulation.
    pub base_duration_days: f64,
    /// Simulation result.
    pub risk: RiskSimulationResult,
}

/// Extract the BOQ of a document and simulate cost/schedule risk around its total.
///
/// The BOQ total is the cost baseline unless it is not positive or overflowed, in which case
/// `config.baseline.fallback_base_cost` is used. The simulation runs with
/// `config.risk` and `config.baseline.sample_count` samples.
pub fn evaluate_document(document: &str, config: &EvaluationConfig) -> Result<DprAssessment> {
    config.validate()?;

    let extractor = BoqExtractor::new(config.section.clone());
    let section_found = extractor.find_section(document).is_some();
    let (items, summary) = extractor.extract(document);

    let total = summary.total_estimated_cost;
    let used_fallback_cost = !total.is_finite() || total <= 0.0;
    let base_cost = if used_fallback_cost {
        warn!(
            total,
            fallback = config.baseline.fallback_base_cost,
            "BOQ total is not a positive finite cost, using fallback base cost"
        );
        config.baseline.fallback_base_cost
    } else {
        summary.total_estimated_cost
    };

    let base_duration_days = config.baseline.base_duration_days;
    let risk = simulate_risk(base_cost, base_duration_days, &config.evaluation_risk())?;

    info!(
        section_found,
        items = summary.item_count,
        base_cost,
        used_fallback_cost,
        "document assessed"
    );

    Ok(DprAssessment {
        section_found,
        items,
        summary,
        base_cost,
        used_fallback_cost,
        base_duration_days,
        risk,
    })
}

/// Assess several documents in parallel, preserving input order.
pub fn evaluate_documents(documents: &[&str], config: &EvaluationConfig) -> Vec<Result<DprAssessment>> {
    documents
        .par_iter()
        .map(|doc| evaluate_document(doc, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DprError;

    const DPR: &str = "\
Detailed Project Report: Village road upgrade
Location: Nashik

Bill of Quantities
1. Earthwork: 200 m3 @ 150.00 = 30000
Granular sub-base - 120 m3 @ 900
Contingency: ₹5,000
";

    #[test]
    fn test_uses_boq_total_as_baseline() {
        let assessment = evaluate_document(DPR, &EvaluationConfig::default()).unwrap();
        assert!(assessment.section_found);
        assert_eq!(assessment.items.len(), 3);
        assert_eq!(assessment.summary.total_estimated_cost, 143000.0);
        assert_eq!(assessment.base_cost, 143000.0);
        assert!(!assessment.used_fallback_cost);
        assert_eq!(assessment.base_duration_days, 365.0);
        assert_eq!(assessment.risk.sample_count, 2000);
    }

    #[test]
    fn test_fallback_cost_when_no_items() {
        let assessment =
            evaluate_document("Narrative only, no priced items.", &EvaluationConfig::default()).unwrap();
        assert!(!assessment.section_found);
        assert!(assessment.items.is_empty());
        assert!(assessment.used_fallback_cost);
        assert_eq!(assessment.base_cost, 50_000_000.0);
    }

    #[test]
    fn test_overflowing_item_falls_back() {
        let big = "9".repeat(200);
        let doc = format!("Bill of Quantities\nEarthwork - {} m3 @ {}\n", big, big);
        let assessment = evaluate_document(&doc, &EvaluationConfig::default()).unwrap();
        assert_eq!(assessment.items.len(), 1);
        assert_eq!(assessment.items[0].amount(), None);
        assert!(assessment.used_fallback_cost);
        assert_eq!(assessment.base_cost, 50_000_000.0);
    }

    #[test]
    fn test_overflowing_total_falls_back() {
        let big = "9".repeat(308);
        let doc = format!("Bill of Quantities\nReserve A: {}\nReserve B: {}\n", big, big);
        let assessment = evaluate_document(&doc, &EvaluationConfig::default()).unwrap();
        assert_eq!(assessment.items.len(), 2);
        assert!(assessment.summary.total_estimated_cost.is_infinite());
        assert!(assessment.used_fallback_cost);
        assert_eq!(assessment.base_cost, 50_000_000.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EvaluationConfig::default();
        config.baseline.base_duration_days = -1.0;
        assert!(matches!(
            evaluate_document(DPR, &config),
            Err(DprError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_batch_matches_sequential() {
        let config = EvaluationConfig::default();
        let docs = [DPR, "nothing here"];
        let results = evaluate_documents(&docs, &config);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap(), &evaluate_document(DPR, &config).unwrap());
        assert!(results[1].as_ref().unwrap().used_fallback_cost);
    }
}
