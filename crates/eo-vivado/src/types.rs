//! Core value types: raw lines, severities, classified messages, tool versions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FilterError, FilterResult};

// ── Log Line ──────────────────────────────────────────────────

/// One raw line of tool output, numbered in source order starting at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub line_number: usize,
    pub text: String,
}

impl LogLine {
    pub fn new(line_number: usize, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line_number, self.text)
    }
}

// ── Severity ──────────────────────────────────────────────────

/// Message severity, ordered from least to most severe.
///
/// Variant declaration order matters: `#[derive(Ord)]` uses it,
/// so Info < Warning < CriticalWarning < Error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    CriticalWarning,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Self::Info,
        Self::Warning,
        Self::CriticalWarning,
        Self::Error,
    ];

    /// The tag the tool prints in front of the message, e.g. `CRITICAL WARNING`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::CriticalWarning => "CRITICAL WARNING",
            Self::Error => "ERROR",
        }
    }

    /// Case-sensitive lookup of a severity tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "INFO" => Some(Self::Info),
            "WARNING" => Some(Self::Warning),
            "CRITICAL WARNING" => Some(Self::CriticalWarning),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    /// Severity whose `<TAG>:` prefix starts `line`, if any.
    pub fn from_line_prefix(line: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sev| {
            line.strip_prefix(sev.tag())
                .is_some_and(|rest| rest.starts_with(':'))
        })
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ── Message ───────────────────────────────────────────────────

/// Identity of a message kind: `(tool_id, kind_id)`, printed as `8-327`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageKind {
    pub tool_id: u32,
    pub kind_id: u32,
}

impl MessageKind {
    pub const fn new(tool_id: u32, kind_id: u32) -> Self {
        Self { tool_id, kind_id }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.tool_id, self.kind_id)
    }
}

/// A severity-tagged diagnostic:
/// `WARNING: [Synth 8-3332] Sequential element (FF2) is unused ...`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub severity: Severity,
    pub tool_name: String,
    pub tool_id: u32,
    pub kind_id: u32,
    /// Remainder of the line after the `[Tool N-M] ` tag.
    pub text: String,
    /// Number of the `LogLine` this message was read from.
    pub line_number: usize,
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        MessageKind::new(self.tool_id, self.kind_id)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: [{} {}-{}] {}",
            self.severity, self.tool_name, self.tool_id, self.kind_id, self.text
        )
    }
}

// ── Tcl Command ───────────────────────────────────────────────

/// An echoed Tcl command line: `Command: synth_design -top toplevel -part xc7a35t`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TclCommand {
    pub command: String,
    pub arguments: Vec<String>,
    pub line_number: usize,
}

impl fmt::Display for TclCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command)?;
        for arg in &self.arguments {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

// ── Tool Version ──────────────────────────────────────────────

/// A year-release version such as `2025.1` or `2020.2.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ToolVersion {
    pub year: u16,
    pub release: u8,
    pub patch: u8,
}

impl ToolVersion {
    pub const fn new(year: u16, release: u8, patch: u8) -> Self {
        Self {
            year,
            release,
            patch,
        }
    }
}

impl FromStr for ToolVersion {
    type Err = FilterError;

    fn from_str(s: &str) -> FilterResult<Self> {
        let invalid = || FilterError::InvalidVersion(s.to_string());
        let mut parts = s.trim().split('.');

        let year = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let release = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;
        let patch = match parts.next() {
            Some(p) => p.parse().map_err(|_| invalid())?,
            None => 0,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(year, release, patch))
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.patch == 0 {
            write!(f, "{}.{}", self.year, self.release)
        } else {
            write!(f, "{}.{}.{}", self.year, self.release, self.patch)
        }
    }
}
