//! Timing summary printed on `Finished ...` lines.
//!
//! ```text
//! Finished RTL Elaboration : Time (s): cpu = 00:00:04 ; elapsed = 00:00:05 . Memory (MB): peak = 1234.5 ; gain = 12.5
//! ```
//!
//! Short implementation tasks print fractional seconds
//! (`elapsed = 00:00:00.066`).

use regex::Regex;
use std::sync::LazyLock;

use crate::facts::{Fact, Facts, names};

static RE_TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"Time \(s\): cpu = (\d+):(\d{2}):(\d{2}(?:\.\d+)?) ; elapsed = (\d+):(\d{2}):(\d{2}(?:\.\d+)?) \. Memory \(MB\): peak = (\d+(?:\.\d+)?) ; gain = (-?\d+(?:\.\d+)?)",
    )
    .unwrap()
});

/// CPU/elapsed seconds and memory figures of one finished section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub cpu_seconds: f64,
    pub elapsed_seconds: f64,
    pub peak_mb: f64,
    pub gain_mb: f64,
}

impl Timing {
    pub fn into_facts(self) -> Facts {
        let mut facts = Facts::new();
        facts.insert(names::DURATION, Fact::Seconds(self.elapsed_seconds));
        facts.insert(names::CPU_TIME, Fact::Seconds(self.cpu_seconds));
        facts.insert(names::PEAK_MEMORY, Fact::Megabytes(self.peak_mb));
        facts.insert(names::MEMORY_GAIN, Fact::Megabytes(self.gain_mb));
        facts
    }
}

pub fn parse_timing(line: &str) -> Option<Timing> {
    let caps = RE_TIMING.captures(line)?;
    let hms = |h: usize| -> Option<f64> {
        let hours: f64 = caps[h].parse().ok()?;
        let minutes: f64 = caps[h + 1].parse().ok()?;
        let seconds: f64 = caps[h + 2].parse().ok()?;
        Some(hours * 3600.0 + minutes * 60.0 + seconds)
    };

    Some(Timing {
        cpu_seconds: hms(1)?,
        elapsed_seconds: hms(4)?,
        peak_mb: caps[7].parse().ok()?,
        gain_mb: caps[8].parse().ok()?,
    })
}
