//! The aggregate result of one parse: sections, command scopes, messages
//! and run-level facts.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::adapter::ExtractorKind;
use crate::commands::CommandScope;
use crate::error::{FilterError, FilterResult};
use crate::facts::{CountTable, Fact, Facts, names};
use crate::index::MessageIndex;
use crate::types::{LogLine, Message, MessageKind, Severity, TclCommand, ToolVersion};

// ── Section ───────────────────────────────────────────────────

/// One named processing phase as it appeared in the log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub name: String,
    /// Line of the start marker.
    pub start_line: usize,
    /// Line of the matching end marker; `None` for an unterminated section.
    pub end_line: Option<usize>,
    /// Last line attributed to the section, the end marker included.
    pub last_line: usize,
    /// `false` when the section was not found in the adapter's expected
    /// order at the point it started.
    pub expected: bool,
    /// Parser that read the section's lines.
    pub extractor: ExtractorKind,
    pub facts: Facts,
    /// Indices into [`ProcessingRun::messages`] emitted while the section was open.
    pub messages: Vec<usize>,
    pub(crate) severity_counts: [usize; 4],
}

impl Section {
    pub(crate) fn open(
        name: &str,
        start_line: usize,
        expected: bool,
        extractor: ExtractorKind,
    ) -> Self {
        Self {
            name: name.to_string(),
            start_line,
            end_line: None,
            last_line: start_line,
            expected,
            extractor,
            facts: Facts::new(),
            messages: Vec::new(),
            severity_counts: [0; 4],
        }
    }

    pub(crate) fn attach(&mut self, index: usize, severity: Severity) {
        self.messages.push(index);
        self.severity_counts[severity.index()] += 1;
    }

    pub fn is_terminated(&self) -> bool {
        self.end_line.is_some()
    }

    pub fn fact(&self, name: &str) -> FilterResult<&Fact> {
        self.facts.get(name).ok_or_else(|| FilterError::FactNotFound {
            section: self.name.clone(),
            fact: name.to_string(),
        })
    }

    pub fn counts(&self, name: &str) -> FilterResult<&CountTable> {
        let fact = self.fact(name)?;
        fact.as_counts().ok_or_else(|| self.type_error(name, "counts"))
    }

    pub fn seconds(&self, name: &str) -> FilterResult<f64> {
        let fact = self.fact(name)?;
        fact.as_seconds().ok_or_else(|| self.type_error(name, "seconds"))
    }

    pub fn text(&self, name: &str) -> FilterResult<&str> {
        let fact = self.fact(name)?;
        fact.as_text().ok_or_else(|| self.type_error(name, "text"))
    }

    /// Elapsed seconds reported on the finish marker.
    pub fn duration(&self) -> Option<f64> {
        self.facts.get(names::DURATION).and_then(Fact::as_seconds)
    }

    /// Number of messages of `severity` emitted inside the section.
    pub fn count(&self, severity: Severity) -> usize {
        self.severity_counts[severity.index()]
    }

    fn type_error(&self, fact: &str, expected: &'static str) -> FilterError {
        FilterError::FactType {
            section: self.name.clone(),
            fact: fact.to_string(),
            expected,
        }
    }
}

// ── Region ────────────────────────────────────────────────────

/// Lines before the first named section (preamble) or after the last one
/// (epilogue).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Region {
    pub first_line: Option<usize>,
    pub last_line: Option<usize>,
    pub facts: Facts,
    pub messages: Vec<usize>,
}

impl Region {
    pub(crate) fn touch(&mut self, line_number: usize) {
        self.first_line.get_or_insert(line_number);
        self.last_line = Some(line_number);
    }

    pub fn is_empty(&self) -> bool {
        self.first_line.is_none()
    }

    pub fn fact(&self, name: &str) -> Option<&Fact> {
        self.facts.get(name)
    }
}

// ── Processing Run ────────────────────────────────────────────

/// Everything one [`Processor`](crate::Processor) learned from a log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingRun {
    pub(crate) adapter: String,
    pub(crate) preamble: Region,
    pub(crate) epilogue: Region,
    pub(crate) sections: Vec<Section>,
    pub(crate) messages: Vec<Message>,
    pub(crate) by_id: MessageIndex,
    pub(crate) severity_counts: [usize; 4],
    pub(crate) commands: Vec<TclCommand>,
    pub(crate) command_scopes: Vec<CommandScope>,
    pub(crate) irregular_lines: Vec<usize>,
    pub(crate) discarded_lines: usize,
    pub(crate) tool_version: Option<ToolVersion>,
    pub(crate) start_time: Option<NaiveDateTime>,
    pub(crate) line_count: usize,
    /// Wall-clock seconds spent in `parse`.
    pub(crate) duration: f64,
    #[serde(skip)]
    pub(crate) lines: Vec<LogLine>,
}

impl ProcessingRun {
    pub(crate) fn new(adapter: &str) -> Self {
        Self {
            adapter: adapter.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn push_message(&mut self, message: Message) -> usize {
        let index = self.messages.len();
        self.severity_counts[message.severity.index()] += 1;
        self.by_id.insert(index, &message);
        self.messages.push(message);
        index
    }

    pub fn adapter_name(&self) -> &str {
        &self.adapter
    }

    // ── sections ──

    /// Sections in the order their start markers appeared.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First section named `name`.
    pub fn section(&self, name: &str) -> FilterResult<&Section> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| FilterError::SectionNotFound(name.to_string()))
    }

    /// Every occurrence of a repeated section, in order.
    pub fn sections_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Section> + 'a {
        self.sections.iter().filter(move |s| s.name == name)
    }

    /// Sections read by the synthesis-report parser, whatever their name.
    pub fn report_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .filter(|s| s.extractor == ExtractorKind::SynthesisReport)
    }

    pub fn fact(&self, section: &str, fact: &str) -> FilterResult<&Fact> {
        self.section(section)?.fact(fact)
    }

    pub fn unterminated_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| !s.is_terminated())
    }

    pub fn unexpected_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| !s.expected)
    }

    pub fn preamble(&self) -> &Region {
        &self.preamble
    }

    pub fn epilogue(&self) -> &Region {
        &self.epilogue
    }

    // ── messages ──

    /// All messages in appearance order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn messages_of(&self, severity: Severity) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(move |m| m.severity == severity)
    }

    pub fn info_messages(&self) -> Vec<&Message> {
        self.messages_of(Severity::Info).collect()
    }

    pub fn warning_messages(&self) -> Vec<&Message> {
        self.messages_of(Severity::Warning).collect()
    }

    pub fn critical_warning_messages(&self) -> Vec<&Message> {
        self.messages_of(Severity::CriticalWarning).collect()
    }

    pub fn error_messages(&self) -> Vec<&Message> {
        self.messages_of(Severity::Error).collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.severity_counts[severity.index()]
    }

    /// Messages grouped by tool ID, then message-kind ID.
    pub fn messages_by_id(&self) -> &MessageIndex {
        &self.by_id
    }

    pub fn messages_of_kind(&self, kind: MessageKind) -> impl Iterator<Item = &Message> {
        self.by_id
            .get(kind)
            .iter()
            .filter_map(|&i| self.messages.get(i))
    }

    pub fn has_message(&self, kind: MessageKind) -> bool {
        self.by_id.contains(kind)
    }

    pub fn tool_name(&self, tool_id: u32) -> Option<&str> {
        self.by_id.tool_name(tool_id)
    }

    pub fn tool_id(&self, tool_name: &str) -> Option<u32> {
        self.by_id.tool_id(tool_name)
    }

    /// Messages emitted while `section` was open. Indices that do not
    /// belong to this run are skipped.
    pub fn section_messages<'a>(
        &'a self,
        section: &'a Section,
    ) -> impl Iterator<Item = &'a Message> + 'a {
        section.messages.iter().filter_map(|&i| self.messages.get(i))
    }

    // ── commands ──

    /// Every `Command:` echo, in order.
    pub fn commands(&self) -> &[TclCommand] {
        &self.commands
    }

    /// One scope per `Command:` echo, in order.
    pub fn command_scopes(&self) -> &[CommandScope] {
        &self.command_scopes
    }

    /// First scope of the command named `name`.
    pub fn command_scope(&self, name: &str) -> FilterResult<&CommandScope> {
        self.command_scopes
            .iter()
            .find(|c| c.command == name)
            .ok_or_else(|| FilterError::CommandNotFound(name.to_string()))
    }

    /// Messages emitted inside `scope`.
    pub fn command_messages<'a>(
        &'a self,
        scope: &'a CommandScope,
    ) -> impl Iterator<Item = &'a Message> + 'a {
        scope.messages.iter().filter_map(|&i| self.messages.get(i))
    }

    /// Sections that started inside `scope`.
    pub fn command_sections<'a>(
        &'a self,
        scope: &'a CommandScope,
    ) -> impl Iterator<Item = &'a Section> + 'a {
        scope.sections.iter().filter_map(|&i| self.sections.get(i))
    }

    // ── other lines ──

    /// Lines that start with a severity tag but are not well-formed messages.
    pub fn irregular_lines(&self) -> &[usize] {
        &self.irregular_lines
    }

    /// Lines outside every section and region parser.
    pub fn discarded_lines(&self) -> usize {
        self.discarded_lines
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn line(&self, line_number: usize) -> Option<&LogLine> {
        line_number
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
    }

    /// The raw line a message was read from.
    pub fn source_line(&self, message: &Message) -> Option<&LogLine> {
        self.line(message.line_number)
    }

    // ── run-level facts ──

    pub fn tool_version(&self) -> Option<ToolVersion> {
        self.tool_version
    }

    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.start_time
    }

    /// Seconds spent parsing.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

// Wall-clock duration differs between otherwise identical runs.
impl PartialEq for ProcessingRun {
    fn eq(&self, other: &Self) -> bool {
        self.adapter == other.adapter
            && self.preamble == other.preamble
            && self.epilogue == other.epilogue
            && self.sections == other.sections
            && self.messages == other.messages
            && self.by_id == other.by_id
            && self.severity_counts == other.severity_counts
            && self.commands == other.commands
            && self.command_scopes == other.command_scopes
            && self.irregular_lines == other.irregular_lines
            && self.discarded_lines == other.discarded_lines
            && self.tool_version == other.tool_version
            && self.start_time == other.start_time
            && self.line_count == other.line_count
            && self.lines == other.lines
    }
}
