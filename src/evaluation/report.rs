//! Markdown rendering of assessments for the report-synthesis layer.

use std::fmt;

use super::assessment::DprAssessment;
use crate::core::types::{BoqSummary, OutcomeStats, PercentileBand, RiskSimulationResult};

impl fmt::Display for BoqSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Items parsed: {}", self.item_count)?;
        writeln!(f, "- Total estimated cost: {:.2}", self.total_estimated_cost)?;
        writeln!(f, "- Items missing rate: {}", self.missing_rate_count)?;
        write!(f, "- Items missing quantity: {}", self.missing_qty_count)
    }
}

fn outcome_row(f: &mut fmt::Formatter<'_>, label: &str, stats: &OutcomeStats) -> fmt::Result {
    writeln!(
        f,
        "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.1}% | {:.1}% |",
        label,
        stats.mean,
        stats.std,
        stats.p10,
        stats.p50,
        stats.p90,
        stats.overrun_pct_mean,
        stats.overrun_pct_p90
    )
}

fn band_line(f: &mut fmt::Formatter<'_>, label: &str, band: &PercentileBand) -> fmt::Result {
    writeln!(
        f,
        "- {} overrun: P10 {:.1}%, P50 {:.1}%, P90 {:.1}%",
        label, band.p10, band.p50, band.p90
    )
}

impl fmt::Display for RiskSimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Monte Carlo simulation, {} samples.", self.sample_count)?;
        writeln!(f)?;
        writeln!(f, "| Outcome | Mean | Std | P10 | P50 | P90 | Mean overrun | P90 overrun |")?;
        writeln!(f, "|---|---|---|---|---|---|---|---|")?;
        outcome_row(f, "Cost", &self.cost)?;
        outcome_row(f, "Duration (days)", &self.duration)?;
        writeln!(f)?;
        band_line(f, "Cost", &self.cost_overrun_distribution_pct)?;
        band_line(f, "Duration", &self.duration_overrun_distribution_pct)
    }
}

impl fmt::Display for DprAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## BOQ Analysis")?;
        writeln!(f)?;
        if !self.section_found {
            writeln!(f, "_No bill of quantities header found; the whole document was scanned._")?;
            writeln!(f)?;
        }
        writeln!(f, "{}", self.summary)?;
        writeln!(f)?;
        writeln!(f, "## Risk Simulation")?;
        writeln!(f)?;
        write!(f, "Baseline cost {:.2}", self.base_cost)?;
        if self.used_fallback_cost {
            write!(f, " (fallback, BOQ total unavailable)")?;
        }
        writeln!(f, ", baseline duration {:.0} days.", self.base_duration_days)?;
        writeln!(f)?;
        write!(f, "{}", self.risk)
    }
}

impl DprAssessment {
    /// Render as Markdown.
    pub fn to_markdown(&self) -> String {
        self.to_string()
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::config::EvaluationConfig;
    use crate::evaluation::assessment::evaluate_document;

    #[test]
    fn test_markdown_sections() {
        let doc = "BOQ\nEarthwork - 200 m3 @ 150 = 30000\n";
        let assessment = evaluate_document(doc, &EvaluationConfig::default()).unwrap();
        let md = assessment.to_markdown();

        assert!(md.starts_with("## BOQ Analysis"));
        assert!(md.contains("- Items parsed: 1"));
        assert!(md.contains("- Total estimated cost: 30000.00"));
        assert!(md.contains("## Risk Simulation"));
        assert!(md.contains("2000 samples"));
        assert!(md.contains("| Cost |"));
        assert!(!md.contains("fallback"));
    }

    #[test]
    fn test_markdown_flags_fallback() {
        let assessment = evaluate_document("no items", &EvaluationConfig::default()).unwrap();
        let md = assessment.to_markdown();
        assert!(md.contains("No bill of quantities header found"));
        assert!(md.contains("fallback"));
    }

    #[test]
    fn test_json_roundtrip_fields() {
        let assessment = evaluate_document("Contingency: 1000", &EvaluationConfig::default()).unwrap();
        let json = assessment.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["item_count"], 1);
        assert_eq!(value["items"][0]["description"], "Contingency");
        assert!(value["items"][0]["quantity"].is_null());
        assert!(value["risk"]["cost"]["p90"].is_number());
    }
}
