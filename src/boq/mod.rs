//! Bill-of-quantities extraction from free report text.

pub mod extractor;
pub mod matcher;
pub mod number;

pub use extractor::{find_section, locate_section, parse, parse_with, summarize, BoqExtractor, SectionMatch};
pub use matcher::{BoqLineMatcher, LineMatcher, PatternMatcher};
pub use number::parse_number;
