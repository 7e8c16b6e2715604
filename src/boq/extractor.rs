//! BOQ section location, line parsing and aggregation.

use tracing::{debug, info};

use super::matcher::BoqLineMatcher;
use crate::core::config::SectionConfig;
use crate::core::types::{round2, BoqLineItem, BoqSummary};

/// A BOQ section located inside a larger document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionMatch<'a> {
    /// Index of the header keyword that matched, in configured order.
    pub header_index: usize,
    /// Byte offset of the header in the document.
    pub offset: usize,
    /// Section text, starting at the header.
    pub text: &'a str,
}

/// Byte offset of the first case-insensitive occurrence of `needle`.
///
/// `needle` must already be lowercase.
fn find_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    haystack.char_indices().map(|(i, _)| i).find(|&start| {
        let mut rest = haystack[start..].chars().flat_map(char::to_lowercase);
        needle.chars().all(|n| rest.next() == Some(n))
    })
}

/// Take at most `max_chars` characters of `text` starting at byte `offset`.
fn char_window(text: &str, offset: usize, max_chars: usize) -> &str {
    let tail = &text[offset..];
    let end = tail
        .char_indices()
        .nth(max_chars)
        .map(|(i, _)| i)
        .unwrap_or(tail.len());
    &tail[..end]
}

/// Find the BOQ section of a document.
///
/// Header keywords are tried in configured order; the first keyword present
/// anywhere in the document wins and the section starts at its first
/// occurrence. Returns `None` when no keyword occurs.
pub fn find_section<'a>(text: &'a str, config: &SectionConfig) -> Option<SectionMatch<'a>> {
    config.headers.iter().enumerate().find_map(|(header_index, header)| {
        let needle = header.to_lowercase();
        find_case_insensitive(text, &needle).map(|offset| SectionMatch {
            header_index,
            offset,
            text: char_window(text, offset, config.max_chars),
        })
    })
}

/// Return the BOQ section of a document, or the whole document if no header is found.
///
/// The whole-document fallback is permissive: callers must not assume that a
/// BOQ section was actually present.
pub fn locate_section<'a>(text: &'a str, config: &SectionConfig) -> &'a str {
    match find_section(text, config) {
        Some(section) => {
            debug!(
                header = %config.headers[section.header_index],
                offset = section.offset,
                len = section.text.len(),
                "located BOQ section"
            );
            section.text
        }
        None => {
            debug!("no BOQ header found, using whole document");
            text
        }
    }
}

/// Parse every non-empty line of `text` with the given matcher, in line order.
pub fn parse_with(text: &str, matcher: &BoqLineMatcher) -> Vec<BoqLineItem> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let (name, item) = matcher.match_named(line)?;
            debug!(matcher = name, line, "matched BOQ line");
            Some(item)
        })
        .collect()
}

/// Parse BOQ lines with the default matcher list.
pub fn parse(text: &str) -> Vec<BoqLineItem> {
    parse_with(text, &BoqLineMatcher::default())
}

/// Reduce items to totals and missing-field counts.
///
/// Missing amounts contribute zero to the total.
pub fn summarize(items: &[BoqLineItem]) -> BoqSummary {
    let mut total = 0.0;
    let mut missing_rate_count = 0;
    let mut missing_qty_count = 0;

    for item in items {
        if let Some(amount) = item.amount() {
            total += amount;
        }
        if item.rate().is_none() {
            missing_rate_count += 1;
        }
        if item.quantity().is_none() {
            missing_qty_count += 1;
        }
    }

    BoqSummary {
        item_count: items.len(),
        total_estimated_cost: round2(total),
        missing_rate_count,
        missing_qty_count,
    }
}

/// Section locator, line matcher and summarizer bundled together.
pub struct BoqExtractor {
    section: SectionConfig,
    matcher: BoqLineMatcher,
}

impl Default for BoqExtractor {
    fn default() -> Self {
        Self::new(SectionConfig::default())
    }
}

impl BoqExtractor {
    /// Create an extractor with the default matcher list.
    pub fn new(section: SectionConfig) -> Self {
        Self {
            section,
            matcher: BoqLineMatcher::default(),
        }
    }

    /// Replace the line matcher.
    pub fn with_matcher(mut self, matcher: BoqLineMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Section settings in use.
    pub fn section_config(&self) -> &SectionConfig {
        &self.section
    }

    /// See [`find_section`].
    pub fn find_section<'a>(&self, text: &'a str) -> Option<SectionMatch<'a>> {
        find_section(text, &self.section)
    }

    /// See [`locate_section`].
    pub fn locate_section<'a>(&self, text: &'a str) -> &'a str {
        locate_section(text, &self.section)
    }

    /// Parse BOQ lines from already-located text.
    pub fn parse(&self, text: &str) -> Vec<BoqLineItem> {
        parse_with(text, &self.matcher)
    }

    /// Locate, parse and summarize a full document.
    pub fn extract(&self, document: &str) -> (Vec<BoqLineItem>, BoqSummary) {
        let items = self.parse(self.locate_section(document));
        let summary = summarize(&items);
        info!(
            items = summary.item_count,
            total = summary.total_estimated_cost,
            missing_rate = summary.missing_rate_count,
            missing_qty = summary.missing_qty_count,
            "extracted BOQ"
        );
        (items, summary)
    }
}
