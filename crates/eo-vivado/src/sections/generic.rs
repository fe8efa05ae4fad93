//! Extractor for sections that only bound a line range.

use super::SectionExtractor;
use crate::classifier::ClassifiedLine;
use crate::facts::Facts;
use crate::types::LogLine;

/// No-op extractor. The section still gets timing facts from its finish line.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericExtractor;

impl SectionExtractor for GenericExtractor {
    fn feed(&mut self, _line: &LogLine, _classified: &ClassifiedLine) {}

    fn finalize(self) -> Facts {
        Facts::new()
    }
}
