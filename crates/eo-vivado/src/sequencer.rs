//! Section sequencer: partitions the classified line stream into sections.
//!
//! At most one section is open at a time. Sections are matched against the
//! adapter's expected order through a cursor, so repeated section names
//! resolve to successive entries of the list. Anything that does not fit
//! is recorded, never rejected:
//!
//! - a start marker for a name not found at or after the cursor opens an
//!   `Unexpected` section;
//! - a start marker while a section is open closes it as unterminated;
//! - an end marker that does not match the open section is section content;
//! - end of input closes the open section as unterminated.
//!
//! Adapters that declare commands switch the expected order on every
//! `Command:` echo naming one of them: the cursor restarts at the
//! command's own section list. Numbered phases never open or close
//! sections; they are recorded on the section they occur in. A section
//! whose end marker carried no timing picks it up from a `Time (s): ...`
//! line printed right after it.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::adapter::{Adapter, SectionSpec, position_in};
use crate::classifier::{Boundary, ClassifiedLine, PhaseMarker, SectionMarker, marker_boundary};
use crate::facts::names;
use crate::run::{Region, Section};
use crate::sections::timing::parse_timing;
use crate::sections::{PreambleExtractor, SectionExtractor, SectionParser};
use crate::types::{LogLine, Severity, TclCommand, ToolVersion};

const TIMING_LINE: &str = "Time (s):";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerState {
    /// Before the first expected section.
    Preamble,
    InSection(String),
    /// A section that is out of the expected order or not known at all.
    Unexpected(String),
    /// Between two expected sections, or anywhere outside a section once a
    /// scoped command has started.
    Between,
    /// After the last expected section of an adapter without commands.
    Epilogue,
}

#[derive(Debug)]
struct ActiveSection<'a> {
    index: usize,
    spec: Option<&'a SectionSpec>,
    parser: SectionParser,
    /// Opened before any expected section; its lines also feed the preamble.
    in_preamble: bool,
}

/// What the sequencer hands back once the input is exhausted.
#[derive(Debug, Default)]
pub struct SequencerOutcome {
    pub sections: Vec<Section>,
    pub preamble: Region,
    pub epilogue: Region,
    pub discarded_lines: usize,
    pub tool_version: Option<ToolVersion>,
    pub start_time: Option<NaiveDateTime>,
}

pub struct Sequencer<'a> {
    adapter: &'a Adapter,
    state: SequencerState,
    /// Expected order in force: the adapter's sections, or those of the
    /// last scoped command.
    expected: &'a [SectionSpec],
    cursor: usize,
    /// An expected section or a scoped command has started.
    past_preamble: bool,
    scoped: bool,
    active: Option<ActiveSection<'a>>,
    /// Closed section still waiting for a timing line.
    trailer: Option<usize>,
    sections: Vec<Section>,
    preamble_parser: PreambleExtractor,
    preamble: Region,
    epilogue: Region,
    discarded: usize,
}

impl<'a> Sequencer<'a> {
    pub fn new(adapter: &'a Adapter) -> Self {
        Self {
            adapter,
            state: SequencerState::Preamble,
            expected: &adapter.sections,
            cursor: 0,
            past_preamble: false,
            scoped: false,
            active: None,
            trailer: None,
            sections: Vec::new(),
            preamble_parser: PreambleExtractor::default(),
            preamble: Region::default(),
            epilogue: Region::default(),
            discarded: 0,
        }
    }

    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    /// Associate message `index` with the current section or region. Call
    /// before feeding the message's line.
    pub fn attach_message(&mut self, index: usize, severity: Severity) {
        if let Some(active) = &self.active {
            self.sections[active.index].attach(index, severity);
            return;
        }
        match self.state {
            SequencerState::Preamble => self.preamble.messages.push(index),
            SequencerState::Epilogue => self.epilogue.messages.push(index),
            _ => {}
        }
    }

    pub fn feed(&mut self, line: &LogLine, classified: &ClassifiedLine) {
        if self.trailer.is_some() && self.timing_trailer(line) {
            return;
        }
        match classified {
            ClassifiedLine::Marker(marker) => match marker.boundary {
                Boundary::Start => self.on_start(line, classified, marker),
                Boundary::End => self.on_end(line, classified, marker),
            },
            ClassifiedLine::Phase(phase) => self.on_phase(line, classified, phase),
            ClassifiedLine::Command(command) => self.on_command(line, classified, command),
            _ => self.on_content(line, classified),
        }
    }

    // Blank lines keep the trailer armed; any other line disarms it.
    fn timing_trailer(&mut self, line: &LogLine) -> bool {
        if line.text.trim().is_empty() {
            return false;
        }
        let Some(index) = self.trailer.take() else {
            return false;
        };
        if self.active.is_some() || !line.text.starts_with(TIMING_LINE) {
            return false;
        }
        let Some(timing) = parse_timing(&line.text) else {
            return false;
        };
        let section = &mut self.sections[index];
        debug!(section = %section.name, line = line.line_number, "timing read from trailing line");
        section.facts.extend(timing.into_facts());
        section.last_line = line.line_number;
        true
    }

    fn on_command(&mut self, line: &LogLine, classified: &ClassifiedLine, command: &TclCommand) {
        let adapter = self.adapter;
        let Some(spec) = adapter.command_named(&command.command) else {
            self.on_content(line, classified);
            return;
        };

        if let Some(active) = &self.active {
            warn!(
                section = %self.sections[active.index].name,
                command = %spec.name,
                line = line.line_number,
                "section not finished before next command"
            );
            self.close(None);
        }

        debug!(
            command = %spec.name,
            sections = spec.sections.len(),
            line = line.line_number,
            "expected order switched to command"
        );
        self.expected = &spec.sections;
        self.cursor = 0;
        self.scoped = true;
        self.past_preamble = true;
        self.trailer = None;
        self.state = SequencerState::Between;
        self.on_content(line, classified);
    }

    fn on_phase(&mut self, line: &LogLine, classified: &ClassifiedLine, phase: &PhaseMarker) {
        if let Some(active) = &mut self.active
            && phase.boundary == Boundary::Start
        {
            active.parser.note_phase(phase);
        }
        self.on_content(line, classified);
    }

    fn on_content(&mut self, line: &LogLine, classified: &ClassifiedLine) {
        if let Some(active) = &mut self.active {
            active.parser.feed(line, classified);
            if active.in_preamble {
                self.preamble_parser.feed(line, classified);
            }
            self.sections[active.index].last_line = line.line_number;
            return;
        }

        match self.state {
            SequencerState::Preamble => {
                self.preamble_parser.feed(line, classified);
                self.preamble.touch(line.line_number);
            }
            SequencerState::Epilogue => self.epilogue.touch(line.line_number),
            _ => self.discarded += 1,
        }
    }

    fn on_start(&mut self, line: &LogLine, classified: &ClassifiedLine, marker: &SectionMarker) {
        if let Some(active) = &mut self.active
            && active.spec.is_some_and(|spec| spec.has_subsection(&marker.name))
        {
            debug!(section = %marker.name, line = line.line_number, "subsection started");
            active.parser.note_subsection(&marker.name);
            self.on_content(line, classified);
            return;
        }

        if let Some(active) = &self.active {
            warn!(
                section = %self.sections[active.index].name,
                next = %marker.name,
                line = line.line_number,
                "section not finished before next section started"
            );
            self.close(None);
        }

        let adapter = self.adapter;
        let specs = self.expected;
        let (spec, expected) = match position_in(specs, &marker.name, self.cursor) {
            Some(position) => {
                if position > self.cursor {
                    debug!(
                        section = %marker.name,
                        skipped = position - self.cursor,
                        "expected sections skipped"
                    );
                }
                self.cursor = position + 1;
                self.past_preamble = true;
                self.state = SequencerState::InSection(marker.name.clone());
                (specs.get(position), true)
            }
            None => {
                warn!(
                    section = %marker.name,
                    line = line.line_number,
                    "unexpected section"
                );
                self.state = SequencerState::Unexpected(marker.name.clone());
                let spec = specs
                    .iter()
                    .find(|s| s.name == marker.name)
                    .or_else(|| adapter.section_named(&marker.name));
                (spec, false)
            }
        };

        debug!(section = %marker.name, line = line.line_number, expected, "section opened");
        let extractor = spec.map(|s| s.extractor).unwrap_or_default();
        self.sections.push(Section::open(
            &marker.name,
            line.line_number,
            expected,
            extractor,
        ));
        self.active = Some(ActiveSection {
            index: self.sections.len() - 1,
            spec,
            parser: SectionParser::new(extractor),
            in_preamble: !self.past_preamble,
        });
    }

    fn on_end(&mut self, line: &LogLine, classified: &ClassifiedLine, marker: &SectionMarker) {
        let Some(active) = &self.active else {
            debug!(section = %marker.name, line = line.line_number, "end marker outside any section");
            self.discarded += 1;
            return;
        };

        // Several tasks may share one finish text, e.g. a bare timing line.
        let closes = self.sections[active.index].name == marker.name
            || active
                .spec
                .and_then(|spec| line.text.trim_end().strip_prefix(spec.finish.as_str()))
                .is_some_and(marker_boundary);
        if closes {
            self.close(Some(line));
        } else {
            self.on_content(line, classified);
        }
    }

    fn close(&mut self, end: Option<&LogLine>) {
        let Some(active) = self.active.take() else {
            return;
        };
        let section = &mut self.sections[active.index];
        section.facts = active.parser.finalize(end);
        match end {
            Some(end) => {
                section.end_line = Some(end.line_number);
                section.last_line = end.line_number;
                if !section.facts.contains(names::DURATION) {
                    self.trailer = Some(active.index);
                }
                debug!(section = %section.name, line = end.line_number, "section closed");
            }
            None => warn!(
                section = %section.name,
                start = section.start_line,
                "section closed without end marker"
            ),
        }

        self.state = if !self.past_preamble {
            SequencerState::Preamble
        } else if !self.scoped && self.cursor >= self.expected.len() {
            SequencerState::Epilogue
        } else {
            SequencerState::Between
        };
    }

    /// Close any open section and hand over the collected sections.
    pub fn finish(mut self) -> SequencerOutcome {
        self.close(None);

        let tool_version = self.preamble_parser.version();
        let start_time = self.preamble_parser.start_time();
        let mut preamble = self.preamble;
        preamble.facts = self.preamble_parser.finalize();

        SequencerOutcome {
            sections: self.sections,
            preamble,
            epilogue: self.epilogue,
            discarded_lines: self.discarded,
            tool_version,
            start_time,
        }
    }
}
