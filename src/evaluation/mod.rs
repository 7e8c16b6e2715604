//! Entry points consumed by the report-synthesis layer.

pub mod assessment;
pub mod report;

pub use assessment::{evaluate_document, evaluate_documents, DprAssessment};

use crate::boq::BoqExtractor;
use crate::core::config::SectionConfig;
use crate::core::types::{BoqLineItem, BoqSummary};

/// Locate the BOQ section of a document, parse its items and summarize them.
pub fn extract_and_summarize_boq(document: &str) -> (Vec<BoqLineItem>, BoqSummary) {
    BoqExtractor::default().extract(document)
}

/// As [`extract_and_summarize_boq`] with explicit section settings.
pub fn extract_and_summarize_boq_with(
    document: &str,
    section: &SectionConfig,
) -> (Vec<BoqLineItem>, BoqSummary) {
    BoqExtractor::new(section.clone()).extract(document)
}
