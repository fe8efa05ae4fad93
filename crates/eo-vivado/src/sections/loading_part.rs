//! `Loading Part and Timing Information`: records the target part.

use regex::Regex;
use std::sync::LazyLock;

use super::SectionExtractor;
use crate::classifier::ClassifiedLine;
use crate::facts::{Fact, Facts, names};
use crate::types::LogLine;

static RE_LOADING_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Loading part:\s*(\S+)").unwrap());

#[derive(Debug, Default)]
pub struct LoadingPartExtractor {
    part: Option<String>,
}

impl SectionExtractor for LoadingPartExtractor {
    fn feed(&mut self, line: &LogLine, classified: &ClassifiedLine) {
        if self.part.is_some() || !classified.is_plain() {
            return;
        }
        if let Some(caps) = RE_LOADING_PART.captures(&line.text) {
            self.part = Some(caps[1].to_string());
        }
    }

    fn finalize(self) -> Facts {
        let mut facts = Facts::new();
        if let Some(part) = self.part {
            facts.insert(names::PART, Fact::Text(part));
        }
        facts
    }
}
