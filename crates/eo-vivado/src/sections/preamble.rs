//! Preamble: tool version and session start time.
//!
//! ```text
//! #-----------------------------------------------------------
//! # Vivado v2020.1 (64-bit)
//! # SW Build 2902540 on Wed May 27 19:54:35 MDT 2020
//! # Start of session at: Thu Jun 18 13:54:19 2020
//! ```

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

use super::SectionExtractor;
use crate::classifier::ClassifiedLine;
use crate::facts::{Fact, Facts, names};
use crate::types::{LogLine, ToolVersion};

static RE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?\s*Vivado v(\d{4}\.\d+(?:\.\d+)?)\b").unwrap());

static RE_SESSION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?\s*Start of session at:\s*(.+?)\s*$").unwrap());

static RE_ISO_TS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2})[T ](\d{2}:\d{2}:\d{2})").unwrap()
});

const SESSION_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

#[derive(Debug, Default)]
pub struct PreambleExtractor {
    version: Option<ToolVersion>,
    session_start: Option<NaiveDateTime>,
    first_timestamp: Option<NaiveDateTime>,
}

impl PreambleExtractor {
    pub fn version(&self) -> Option<ToolVersion> {
        self.version
    }

    /// Session start line if present, else the first ISO timestamp seen.
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.session_start.or(self.first_timestamp)
    }
}

impl SectionExtractor for PreambleExtractor {
    fn feed(&mut self, line: &LogLine, classified: &ClassifiedLine) {
        if !classified.is_plain() {
            return;
        }
        let text = line.text.as_str();

        if self.version.is_none()
            && let Some(caps) = RE_VERSION.captures(text)
        {
            self.version = caps[1].parse().ok();
            return;
        }

        if self.session_start.is_none()
            && let Some(caps) = RE_SESSION_START.captures(text)
        {
            self.session_start = parse_session_time(&caps[1]);
            return;
        }

        if self.first_timestamp.is_none()
            && let Some(caps) = RE_ISO_TS.captures(text)
        {
            let joined = format!("{} {}", &caps[1], &caps[2]);
            self.first_timestamp = NaiveDateTime::parse_from_str(&joined, "%Y-%m-%d %H:%M:%S").ok();
        }
    }

    fn finalize(self) -> Facts {
        let mut facts = Facts::new();
        if let Some(version) = self.version {
            facts.insert(names::TOOL_VERSION, Fact::Version(version));
        }
        if let Some(start) = self.start_time() {
            facts.insert(names::START_TIME, Fact::Timestamp(start));
        }
        facts
    }
}

// `Thu Jun  4 09:05:00 2020`: collapse the padding before the day.
fn parse_session_time(text: &str) -> Option<NaiveDateTime> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&normalized, SESSION_FORMAT).ok()
}
