//! Line classification: severity-tagged messages, section markers, numbered
//! phases, Tcl command echoes and plain output.
//!
//! Classification is a pure function of the line text and the adapter's
//! marker vocabulary. Lines that resemble a message but fail strict parsing
//! degrade to [`ClassifiedLine::Plain`]; deciding whether that is worth
//! reporting is left to the processor.

use regex::Regex;
use std::sync::LazyLock;

use crate::adapter::Adapter;
use crate::error::{FilterError, FilterResult};
use crate::types::{LogLine, Message, Severity, TclCommand};

// <SEVERITY>: [<Tool> <toolID>-<kindID>] <text>
// IDs without leading zeros so the line can be rebuilt from the fields.
static RE_MESSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(INFO|WARNING|CRITICAL WARNING|ERROR): \[(\w+) (0|[1-9]\d{0,8})-(0|[1-9]\d{0,8})\] (.*)$")
        .unwrap()
});

// Phase 2.1 Global Placement Core
// Phase 2.1 Global Placement Core | Checksum: 1c2b3a4d
static RE_PHASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Phase (?P<number>\d+(?:\.\d+)*) (?P<name>\S.*?)(?P<checksum> \| Checksum:.*)?$")
        .unwrap()
});

const COMMAND_PREFIX: &str = "Command: ";

/// Whether a marker opens or closes a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

/// A section boundary line, resolved to the section name it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMarker {
    pub boundary: Boundary,
    pub name: String,
}

/// A numbered phase boundary inside a task. Phases never open or close
/// sections; the sequencer records them on the section they occur in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseMarker {
    pub boundary: Boundary,
    /// Dotted phase number as printed, e.g. `2.1`.
    pub number: String,
    pub name: String,
}

impl PhaseMarker {
    /// `2.1 Global Placement Core`
    pub fn label(&self) -> String {
        format!("{} {}", self.number, self.name)
    }
}

/// Result of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine {
    Message(Message),
    Marker(SectionMarker),
    Phase(PhaseMarker),
    Command(TclCommand),
    Plain,
}

impl ClassifiedLine {
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Plain)
    }
}

struct KnownMarker {
    prefix: String,
    boundary: Boundary,
    name: String,
}

/// Classifies lines against one adapter's marker vocabulary.
pub struct LineClassifier {
    known: Vec<KnownMarker>,
    numbered_phases: bool,
    generic_start: Option<Regex>,
    generic_end: Option<Regex>,
}

impl LineClassifier {
    pub fn new(adapter: &Adapter) -> FilterResult<Self> {
        let mut known = Vec::new();
        for spec in adapter.all_sections() {
            known.push(KnownMarker {
                prefix: spec.start.clone(),
                boundary: Boundary::Start,
                name: spec.name.clone(),
            });
            known.push(KnownMarker {
                prefix: spec.finish.clone(),
                boundary: Boundary::End,
                name: spec.name.clone(),
            });
            for sub in &spec.subsections {
                known.push(KnownMarker {
                    prefix: sub.start.clone(),
                    boundary: Boundary::Start,
                    name: sub.name.clone(),
                });
                known.push(KnownMarker {
                    prefix: sub.finish.clone(),
                    boundary: Boundary::End,
                    name: sub.name.clone(),
                });
            }
        }
        // Longest prefix wins when one marker text extends another.
        known.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        let (generic_start, generic_end) = if adapter.track_unknown_sections {
            (
                Some(keyword_regex(&adapter.start_keywords)?),
                Some(keyword_regex(&adapter.end_keywords)?),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            known,
            numbered_phases: adapter.numbered_phases,
            generic_start,
            generic_end,
        })
    }

    pub fn classify(&self, line: &LogLine) -> ClassifiedLine {
        let text = line.text.as_str();

        if Severity::from_line_prefix(text).is_some() {
            return match parse_message(text, line.line_number) {
                Some(message) => ClassifiedLine::Message(message),
                None => ClassifiedLine::Plain,
            };
        }

        if let Some(command) = parse_command(text, line.line_number) {
            return ClassifiedLine::Command(command);
        }

        let trimmed = text.trim_end();

        if let Some(marker) = self.known_marker(trimmed) {
            return ClassifiedLine::Marker(marker);
        }

        if self.numbered_phases
            && let Some(phase) = parse_phase(trimmed)
        {
            return ClassifiedLine::Phase(phase);
        }

        if let Some(marker) = self.generic_marker(trimmed) {
            return ClassifiedLine::Marker(marker);
        }

        ClassifiedLine::Plain
    }

    fn known_marker(&self, trimmed: &str) -> Option<SectionMarker> {
        self.known.iter().find_map(|known| {
            let rest = trimmed.strip_prefix(known.prefix.as_str())?;
            marker_boundary(rest).then(|| SectionMarker {
                boundary: known.boundary,
                name: known.name.clone(),
            })
        })
    }

    fn generic_marker(&self, trimmed: &str) -> Option<SectionMarker> {
        for (regex, boundary) in [
            (&self.generic_start, Boundary::Start),
            (&self.generic_end, Boundary::End),
        ] {
            if let Some(caps) = regex.as_ref().and_then(|re| re.captures(trimmed)) {
                return Some(SectionMarker {
                    boundary,
                    name: caps["name"].to_string(),
                });
            }
        }

        None
    }
}

// A known prefix only matches whole words: "Start IO Insertion" must not
// match "Start IO Insertion Extras".
pub(crate) fn marker_boundary(rest: &str) -> bool {
    rest.is_empty() || rest.starts_with(' ') || rest.starts_with(':')
}

// The name stops at a timing trailer (`: Time (s) ...`) or a checksum
// trailer (`| Checksum: ...`).
fn keyword_regex(keywords: &[String]) -> FilterResult<Regex> {
    let alternatives: Vec<String> = keywords.iter().map(|k| regex::escape(k)).collect();
    let pattern = format!(
        r"^(?:{})\s+(?P<name>[^\s:|][^:|]*?)\s*(?:[:|].*)?$",
        alternatives.join("|")
    );
    Regex::new(&pattern).map_err(|e| FilterError::Config(format!("marker keywords: {e}")))
}

/// Strictly parse a `<SEVERITY>: [<Tool> <id>-<kind>] <text>` line.
pub fn parse_message(text: &str, line_number: usize) -> Option<Message> {
    let caps = RE_MESSAGE.captures(text)?;
    Some(Message {
        severity: Severity::from_tag(&caps[1])?,
        tool_name: caps[2].to_string(),
        tool_id: caps[3].parse().ok()?,
        kind_id: caps[4].parse().ok()?,
        text: caps[5].to_string(),
        line_number,
    })
}

/// Parse a `Phase <n>[.<n>...] <Name>` start or its `| Checksum:` end.
pub fn parse_phase(text: &str) -> Option<PhaseMarker> {
    let caps = RE_PHASE.captures(text)?;
    let boundary = if caps.name("checksum").is_some() {
        Boundary::End
    } else {
        Boundary::Start
    };
    Some(PhaseMarker {
        boundary,
        number: caps["number"].to_string(),
        name: caps["name"].trim_end().to_string(),
    })
}

/// Parse a `Command: <name> <args...>` echo line.
pub fn parse_command(text: &str, line_number: usize) -> Option<TclCommand> {
    let rest = text.strip_prefix(COMMAND_PREFIX)?;
    let mut words = rest.split_whitespace();
    let command = words.next()?.to_string();
    Some(TclCommand {
        command,
        arguments: words.map(String::from).collect(),
        line_number,
    })
}
