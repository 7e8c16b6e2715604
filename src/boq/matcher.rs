//! Line matchers for bill-of-quantities text.
//!
//! A line is offered to an ordered list of matchers; the first one that
//! recognises it produces the item and later matchers are not consulted.
//! The default list covers the common report layouts:
//!
//! 1. `Earthwork - 200 m3 @ 150.00 = 30000` (dash separated, amount optional)
//! 2. `1. Earthwork: 200 m3 @ 150.00 = 30000` (numbered, colon separated)
//! 3. `Earthwork 200 m3 150 30000` (bare columns)
//!
//! and, only when none of those match, a `Contingency: ₹500000` label/amount line.
//!
//! Numeric tokens are ASCII digits, commas and dots. Other scripts' digits do
//! not match, so such lines are skipped rather than yielding empty fields.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::number::parse_optional;
use crate::core::types::BoqLineItem;

static DASH_SEPARATED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<desc>.+?)\s*-\s*(?P<qty>[0-9,.]+)\s*(?P<unit>[a-zA-Z/%][a-zA-Z0-9/%]*)\s*@\s*(?P<rate>[0-9,.]+)\s*(?:=|₹)?\s*(?P<amount>[0-9,.]+)?",
    )
    .unwrap()
});

static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<index>[0-9]+)\.\s*(?P<desc>.+?):\s*(?P<qty>[0-9,.]+)\s*(?P<unit>[a-zA-Z/%][a-zA-Z0-9/%]*)\s*@\s*(?P<rate>[0-9,.]+)\s*(?:=|₹)?\s*(?P<amount>[0-9,.]+)?",
    )
    .unwrap()
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<desc>[A-Za-z].+?)\s+(?P<qty>[0-9,.]+)\s+(?P<unit>[a-zA-Z/%][a-zA-Z0-9/%]*)\s+(?P<rate>[0-9,.]+)\s+(?P<amount>[0-9,.]+)",
    )
    .unwrap()
});

static LABEL_AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<desc>.+?)\s*[:\-]\s*₹?\s*(?P<amount>[0-9,.]+)").unwrap()
});

#[inline]
fn group<'h>(caps: &Captures<'h>, name: &str) -> Option<&'h str> {
    caps.name(name).map(|m| m.as_str())
}

/// Something that can turn a single line into a BOQ item.
pub trait LineMatcher: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Attempt to extract an item from one trimmed, non-empty line.
    fn match_line(&self, line: &str) -> Option<BoqLineItem>;
}

/// Matcher backed by a regex with named groups `desc`, `qty`, `unit`, `rate`, `amount`.
///
/// Groups the pattern does not define are treated as missing.
pub struct PatternMatcher {
    name: &'static str,
    regex: &'static LazyLock<Regex>,
}

impl PatternMatcher {
    /// `<description> - <qty> <unit> @ <rate> [= | ₹] <amount>`
    pub fn dash_separated() -> Self {
        Self {
            name: "dash_separated",
            regex: &DASH_SEPARATED_RE,
        }
    }

    /// `<index>. <description>: <qty> <unit> @ <rate> [= | ₹] <amount>`
    pub fn numbered() -> Self {
        Self {
            name: "numbered",
            regex: &NUMBERED_RE,
        }
    }

    /// `<description> <qty> <unit> <rate> <amount>`
    pub fn whitespace() -> Self {
        Self {
            name: "whitespace",
            regex: &WHITESPACE_RE,
        }
    }

    /// `<description> [:|-] [₹]<amount>`, anchored at the line start.
    pub fn label_amount() -> Self {
        Self {
            name: "label_amount",
            regex: &LABEL_AMOUNT_RE,
        }
    }

    fn item_from(caps: &Captures<'_>) -> BoqLineItem {
        BoqLineItem::new(
            group(caps, "desc").unwrap_or(""),
            parse_optional(group(caps, "qty")),
            group(caps, "unit").unwrap_or(""),
            parse_optional(group(caps, "rate")),
            parse_optional(group(caps, "amount")),
        )
    }
}

impl LineMatcher for PatternMatcher {
    fn name(&self) -> &'static str {
        self.name
    }

    fn match_line(&self, line: &str) -> Option<BoqLineItem> {
        self.regex.captures(line).map(|caps| Self::item_from(&caps))
    }
}

/// Ordered matcher list with a secondary fallback list.
///
/// Primary matchers are tried first, in order; fallback matchers are tried
/// only when every primary matcher missed.
pub struct BoqLineMatcher {
    primary: Vec<Box<dyn LineMatcher>>,
    fallback: Vec<Box<dyn LineMatcher>>,
}

impl Default for BoqLineMatcher {
    fn default() -> Self {
        let primary: Vec<Box<dyn LineMatcher>> = vec![
            Box::new(PatternMatcher::dash_separated()),
            Box::new(PatternMatcher::numbered()),
            Box::new(PatternMatcher::whitespace()),
        ];
        let fallback: Vec<Box<dyn LineMatcher>> = vec![Box::new(PatternMatcher::label_amount())];
        Self::new(primary, fallback)
    }
}

impl BoqLineMatcher {
    /// Create a matcher from explicit primary and fallback lists.
    pub fn new(primary: Vec<Box<dyn LineMatcher>>, fallback: Vec<Box<dyn LineMatcher>>) -> Self {
        Self { primary, fallback }
    }

    /// Append a primary matcher after the existing ones.
    pub fn with_matcher(mut self, matcher: Box<dyn LineMatcher>) -> Self {
        self.primary.push(matcher);
        self
    }

    /// Names of all matchers in the order they are tried.
    pub fn matcher_names(&self) -> Vec<&'static str> {
        self.primary
            .iter()
            .chain(self.fallback.iter())
            .map(|m| m.name())
            .collect()
    }

    /// Match a line, returning the winning matcher's name with the item.
    pub fn match_named(&self, line: &str) -> Option<(&'static str, BoqLineItem)> {
        self.primary
            .iter()
            .chain(self.fallback.iter())
            .find_map(|m| m.match_line(line).map(|item| (m.name(), item)))
    }

    /// Match a line; `None` means the line is not a BOQ item.
    pub fn match_line(&self, line: &str) -> Option<BoqLineItem> {
        self.match_named(line).map(|(_, item)| item)
    }
}
