//! Section parsers.
//!
//! Every section, whatever its name, is parsed by a [`SectionParser`]: it
//! forwards content lines to the extractor selected by the section's
//! [`ExtractorKind`], remembers nested subsections and numbered phases, and
//! on close reads the timing summary printed on the finish marker line.
//!
//! Extractors form a closed set dispatched through [`Extractor`], so adding
//! one means adding a variant here and a kind in the adapter.

pub mod generic;
pub mod loading_part;
pub mod preamble;
pub mod synthesis_report;
pub mod table;
pub mod timing;

pub use generic::GenericExtractor;
pub use loading_part::LoadingPartExtractor;
pub use preamble::PreambleExtractor;
pub use synthesis_report::SynthesisReportExtractor;

use crate::adapter::ExtractorKind;
use crate::classifier::{ClassifiedLine, PhaseMarker};
use crate::facts::{Fact, Facts, names};
use crate::types::LogLine;

/// Feed/finalize capability shared by every extractor.
pub trait SectionExtractor {
    /// Accumulate one content line of the section.
    fn feed(&mut self, line: &LogLine, classified: &ClassifiedLine);

    /// Produce the facts gathered so far. Lines seen are all that counts;
    /// an extractor never fails because the section was cut short.
    fn finalize(self) -> Facts;
}

/// The extractor variants, one per [`ExtractorKind`].
#[derive(Debug)]
pub enum Extractor {
    Generic(GenericExtractor),
    LoadingPart(LoadingPartExtractor),
    SynthesisReport(SynthesisReportExtractor),
}

impl Extractor {
    pub fn for_kind(kind: ExtractorKind) -> Self {
        match kind {
            ExtractorKind::Generic => Self::Generic(GenericExtractor),
            ExtractorKind::LoadingPart => Self::LoadingPart(LoadingPartExtractor::default()),
            ExtractorKind::SynthesisReport => {
                Self::SynthesisReport(SynthesisReportExtractor::default())
            }
        }
    }
}

impl SectionExtractor for Extractor {
    fn feed(&mut self, line: &LogLine, classified: &ClassifiedLine) {
        match self {
            Self::Generic(x) => x.feed(line, classified),
            Self::LoadingPart(x) => x.feed(line, classified),
            Self::SynthesisReport(x) => x.feed(line, classified),
        }
    }

    fn finalize(self) -> Facts {
        match self {
            Self::Generic(x) => x.finalize(),
            Self::LoadingPart(x) => x.finalize(),
            Self::SynthesisReport(x) => x.finalize(),
        }
    }
}

/// Parser state for one open section.
#[derive(Debug)]
pub struct SectionParser {
    extractor: Extractor,
    subsections: Vec<String>,
    phases: Vec<String>,
}

impl SectionParser {
    pub fn new(kind: ExtractorKind) -> Self {
        Self {
            extractor: Extractor::for_kind(kind),
            subsections: Vec::new(),
            phases: Vec::new(),
        }
    }

    pub fn feed(&mut self, line: &LogLine, classified: &ClassifiedLine) {
        self.extractor.feed(line, classified);
    }

    /// Record that a declared subsection started inside this section.
    pub fn note_subsection(&mut self, name: &str) {
        self.subsections.push(name.to_string());
    }

    /// Record a numbered phase that started inside this section.
    pub fn note_phase(&mut self, phase: &PhaseMarker) {
        self.phases.push(phase.label());
    }

    /// Close the section. `end` is the finish marker line, absent when the
    /// section was never terminated.
    pub fn finalize(self, end: Option<&LogLine>) -> Facts {
        let mut facts = self.extractor.finalize();
        if let Some(timing) = end.and_then(|line| timing::parse_timing(&line.text)) {
            facts.extend(timing.into_facts());
        }
        if !self.subsections.is_empty() {
            facts.insert(names::SUBSECTIONS, Fact::Names(self.subsections));
        }
        if !self.phases.is_empty() {
            facts.insert(names::PHASES, Fact::Names(self.phases));
        }
        facts
    }
}
