//! Core data types for dpreval.

use serde::{Deserialize, Serialize};

/// Round to two decimal places (currency precision).
///
/// Correctly rounded from the exact binary value, ties to even: `1.115`
/// (stored just below the tie) gives `1.11` and `0.125` gives `0.12`.
/// Non-finite values are returned unchanged.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// A single bill-of-quantities line extracted from report text.
///
/// Numeric fields are `None` when the source token was absent or unreadable.
/// When the amount is absent but quantity and rate are both present, the amount
/// is derived as `quantity * rate` rounded to two decimals at construction.
/// An amount that is not finite is stored as `None`.
///
/// Deserialization goes through [`BoqLineItem::new`], so items read back from
/// JSON obey the same rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBoqLineItem")]
pub struct BoqLineItem {
    description: String,
    quantity: Option<f64>,
    unit: String,
    rate: Option<f64>,
    amount: Option<f64>,
}

impl BoqLineItem {
    /// Create a new item, trimming text fields and deriving a missing amount.
    pub fn new(
        description: &str,
        quantity: Option<f64>,
        unit: &str,
        rate: Option<f64>,
        amount: Option<f64>,
    ) -> Self {
        let amount = match (amount, quantity, rate) {
            (None, Some(q), Some(r)) => Some(round2(q * r)),
            (amount, _, _) => amount,
        }
        .filter(|a| a.is_finite());

        Self {
            description: description.trim().to_string(),
            quantity,
            unit: unit.trim().to_string(),
            rate,
            amount,
        }
    }

    /// Create a single-figure cost line with no quantity, unit or rate.
    pub fn lump_sum(description: &str, amount: Option<f64>) -> Self {
        Self::new(description, None, "", None, amount)
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn quantity(&self) -> Option<f64> {
        self.quantity
    }

    #[inline]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[inline]
    pub fn rate(&self) -> Option<f64> {
        self.rate
    }

    #[inline]
    pub fn amount(&self) -> Option<f64> {
        self.amount
    }
}

/// Wire form of [`BoqLineItem`] before normalization.
#[derive(Deserialize)]
struct RawBoqLineItem {
    #[serde(default)]
    description: String,
    #[serde(default)]
    quantity: Option<f64>,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    rate: Option<f64>,
    #[serde(default)]
    amount: Option<f64>,
}

impl From<RawBoqLineItem> for BoqLineItem {
    fn from(raw: RawBoqLineItem) -> Self {
        BoqLineItem::new(&raw.description, raw.quantity, &raw.unit, raw.rate, raw.amount)
    }
}

/// Aggregate statistics over a list of BOQ items.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoqSummary {
    /// Number of parsed items.
    pub item_count: usize,
    /// Sum of all present amounts, rounded to two decimals.
    pub total_estimated_cost: f64,
    /// Items without a rate.
    pub missing_rate_count: usize,
    /// Items without a quantity.
    pub missing_qty_count: usize,
}

/// p10 / p50 / p90 of a sample distribution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentileBand {
    /// 10th percentile.
    pub p10: f64,
    /// Median.
    pub p50: f64,
    /// 90th percentile.
    pub p90: f64,
}

/// Summary of one simulated outcome (cost or duration).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OutcomeStats {
    /// Sample mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    /// 10th percentile.
    pub p10: f64,
    /// Median.
    pub p50: f64,
    /// 90th percentile.
    pub p90: f64,
    /// Mean overrun against the baseline, in percent.
    pub overrun_pct_mean: f64,
    /// 90th percentile overrun against the baseline, in percent.
    pub overrun_pct_p90: f64,
}

/// Result of a cost/schedule Monte Carlo simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSimulationResult {
    /// Number of samples drawn per outcome.
    pub sample_count: usize,
    /// Simulated total cost.
    pub cost: OutcomeStats,
    /// Simulated duration in days.
    pub duration: OutcomeStats,
    /// Percentiles of the cost overrun, in percent.
    pub cost_overrun_distribution_pct: PercentileBand,
    /// Percentiles of the duration overrun, in percent.
    pub duration_overrun_distribution_pct: PercentileBand,
}

/// Raw draws behind a [`RiskSimulationResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSamples {
    /// Cost baseline the samples were drawn around.
    pub base_cost: f64,
    /// Duration baseline in days.
    pub base_duration_days: f64,
    /// Cost draws, in draw order.
    pub costs: Vec<f64>,
    /// Duration draws in days, in draw order.
    pub durations: Vec<f64>,
}

impl RiskSamples {
    /// Number of draws per outcome.
    #[inline]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_amount() {
        let item = BoqLineItem::new("Earthwork", Some(200.0), "m3", Some(150.0), None);
        assert_eq!(item.amount(), Some(30000.0));
    }

    #[test]
    fn test_derived_amount_rounds_to_cents() {
        let item = BoqLineItem::new("Paint", Some(2.0), "m2", Some(1.234), None);
        assert_eq!(item.amount(), Some(2.47));

        let item = BoqLineItem::new("Grout", Some(1.0), "kg", Some(2.456), None);
        assert_eq!(item.amount(), Some(2.46));
    }

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(1.115), 1.11);
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(30000.0), 30000.0);
        assert!(round2(f64::INFINITY).is_infinite());
    }

    #[test]
    fn test_derived_amount_tie() {
        let item = BoqLineItem::new("Paint", Some(0.5), "m2", Some(0.25), None);
        assert_eq!(item.amount(), Some(0.12));
    }

    #[test]
    fn test_overflowing_amount_is_missing() {
        let item = BoqLineItem::new("Earthwork", Some(1e200), "m3", Some(1e200), None);
        assert_eq!(item.amount(), None);

        let item = BoqLineItem::lump_sum("Reserve", Some(f64::INFINITY));
        assert_eq!(item.amount(), None);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let json = r#"{"description":"  Earthwork  ","quantity":200.0,"unit":" m3 ","rate":150.0,"amount":null}"#;
        let item: BoqLineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item, BoqLineItem::new("Earthwork", Some(200.0), "m3", Some(150.0), None));
        assert_eq!(item.description(), "Earthwork");
        assert_eq!(item.unit(), "m3");
        assert_eq!(item.amount(), Some(30000.0));

        let back: BoqLineItem = serde_json::from_str(&serde_json::to_string(&item).unwrap()).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_explicit_amount_is_kept() {
        let item = BoqLineItem::new("Earthwork", Some(200.0), "m3", Some(150.0), Some(29999.0));
        assert_eq!(item.amount(), Some(29999.0));
    }

    #[test]
    fn test_no_derivation_without_rate() {
        let item = BoqLineItem::new("Earthwork", Some(200.0), "m3", None, None);
        assert_eq!(item.amount(), None);
    }

    #[test]
    fn test_text_fields_trimmed() {
        let item = BoqLineItem::lump_sum("  Contingency ", Some(10.0));
        assert_eq!(item.description(), "Contingency");
        assert_eq!(item.unit(), "");
        assert_eq!(item.quantity(), None);
        assert_eq!(item.rate(), None);
    }
}
