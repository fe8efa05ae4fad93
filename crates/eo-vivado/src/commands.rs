//! Command scopes: the stretch of log from one `Command:` echo to the next.
//!
//! Implementation logs are a chain of Tcl commands (`link_design`,
//! `opt_design`, `place_design`, ...). Each scope records how its command
//! ended (`<cmd> completed successfully` or `<cmd> failed`), the timing
//! trailer printed after it, the messages and sections it produced, and the
//! constraint files it read.
//!
//! ```text
//! Command: link_design -top toplevel -part xc7a35ticsg324-1L
//! Parsing XDC File [/work/stopwatch/constraints/Clock.xdc]
//! Finished Parsing XDC File [/work/stopwatch/constraints/Clock.xdc]
//! link_design completed successfully
//! link_design: Time (s): cpu = 00:00:05 ; elapsed = 00:00:07 . Memory (MB): peak = 1500.1 ; gain = 310.4
//! ```

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::classifier::ClassifiedLine;
use crate::facts::{Fact, Facts, names};
use crate::run::Section;
use crate::sections::timing::parse_timing;
use crate::types::{LogLine, Severity, TclCommand};

static RE_XDC_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Parsing XDC File \[(?P<path>[^\]]+)\](?: for cell '(?P<cell>[^']*)')?$").unwrap()
});

static RE_XDC_FINISH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Finished Parsing XDC File \[(?P<path>[^\]]+)\]").unwrap());

/// How a command ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    /// Neither a success nor a failure line was seen.
    #[default]
    Unfinished,
    Succeeded,
    Failed,
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unfinished => "unfinished",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        })
    }
}

/// A constraint file read inside a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XdcFile {
    pub path: String,
    /// Cell the constraints were scoped to (`... for cell 'clk_wiz/inst'`).
    pub cell: Option<String>,
    pub start_line: usize,
    pub end_line: Option<usize>,
    /// Messages emitted while the file was parsed.
    pub messages: Vec<usize>,
}

/// One echoed Tcl command and everything logged until the next one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandScope {
    pub command: String,
    pub arguments: Vec<String>,
    /// Line of the `Command:` echo.
    pub start_line: usize,
    /// Line of the success or failure line.
    pub end_line: Option<usize>,
    /// Last line before the next command or the end of input.
    pub last_line: usize,
    pub outcome: CommandOutcome,
    /// Timing from the `<cmd>: Time (s): ...` trailer.
    pub facts: Facts,
    /// Indices into [`ProcessingRun::messages`](crate::ProcessingRun::messages).
    pub messages: Vec<usize>,
    /// Indices into [`ProcessingRun::sections`](crate::ProcessingRun::sections)
    /// of sections that started inside the scope.
    pub sections: Vec<usize>,
    pub xdc_files: Vec<XdcFile>,
    pub(crate) severity_counts: [usize; 4],
}

impl CommandScope {
    fn open(command: &TclCommand) -> Self {
        Self {
            command: command.command.clone(),
            arguments: command.arguments.clone(),
            start_line: command.line_number,
            end_line: None,
            last_line: command.line_number,
            outcome: CommandOutcome::Unfinished,
            facts: Facts::new(),
            messages: Vec::new(),
            sections: Vec::new(),
            xdc_files: Vec::new(),
            severity_counts: [0; 4],
        }
    }

    pub fn succeeded(&self) -> bool {
        self.outcome == CommandOutcome::Succeeded
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.severity_counts[severity.index()]
    }

    /// Elapsed seconds from the timing trailer.
    pub fn duration(&self) -> Option<f64> {
        self.facts.get(names::DURATION).and_then(Fact::as_seconds)
    }

    fn contains(&self, line_number: usize) -> bool {
        (self.start_line..=self.last_line).contains(&line_number)
    }

    // `<cmd> completed successfully`, `<cmd> failed`, `<cmd>: Time (s): ...`
    fn note_own_line(&mut self, line: &LogLine) {
        let Some(rest) = line.text.trim_end().strip_prefix(self.command.as_str()) else {
            return;
        };
        match rest {
            " completed successfully" => self.end(line.line_number, CommandOutcome::Succeeded),
            " failed" => self.end(line.line_number, CommandOutcome::Failed),
            _ => {
                if let Some(trailer) = rest.strip_prefix(": ")
                    && let Some(timing) = parse_timing(trailer)
                {
                    self.facts.extend(timing.into_facts());
                }
            }
        }
    }

    fn end(&mut self, line_number: usize, outcome: CommandOutcome) {
        debug!(command = %self.command, line = line_number, ?outcome, "command ended");
        self.end_line = Some(line_number);
        self.outcome = outcome;
    }
}

/// Splits the line stream into command scopes. Runs alongside the
/// sequencer and sees every line, whatever the adapter.
#[derive(Debug, Default)]
pub(crate) struct CommandTracker {
    scopes: Vec<CommandScope>,
    /// Index into the current scope's `xdc_files` of the file being parsed.
    xdc: Option<usize>,
}

impl CommandTracker {
    /// Associate message `index` with the current scope. Call before feeding
    /// the message's line.
    pub fn attach_message(&mut self, index: usize, severity: Severity) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        scope.messages.push(index);
        scope.severity_counts[severity.index()] += 1;
        if let Some(file) = self.xdc.and_then(|i| scope.xdc_files.get_mut(i)) {
            file.messages.push(index);
        }
    }

    pub fn feed(&mut self, line: &LogLine, classified: &ClassifiedLine) {
        if let ClassifiedLine::Command(command) = classified {
            self.open(command);
            return;
        }
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        scope.last_line = line.line_number;
        if matches!(classified, ClassifiedLine::Message(_)) {
            return;
        }

        scope.note_own_line(line);

        let text = line.text.trim_end();
        if let Some(caps) = RE_XDC_START.captures(text) {
            scope.xdc_files.push(XdcFile {
                path: caps["path"].to_string(),
                cell: caps.name("cell").map(|m| m.as_str().to_string()),
                start_line: line.line_number,
                end_line: None,
                messages: Vec::new(),
            });
            self.xdc = Some(scope.xdc_files.len() - 1);
        } else if let Some(caps) = RE_XDC_FINISH.captures(text)
            && let Some(file) = self.xdc.and_then(|i| scope.xdc_files.get_mut(i))
            && file.path == caps["path"]
        {
            file.end_line = Some(line.line_number);
            self.xdc = None;
        }
    }

    fn open(&mut self, command: &TclCommand) {
        if let Some(previous) = self.scopes.last()
            && previous.outcome == CommandOutcome::Unfinished
        {
            warn!(
                command = %previous.command,
                next = %command.command,
                line = command.line_number,
                "command did not report completion before next command"
            );
        }
        debug!(command = %command.command, line = command.line_number, "command scope opened");
        self.xdc = None;
        self.scopes.push(CommandScope::open(command));
    }

    /// Hand over the scopes, each listing the sections that started in it.
    pub fn finish(mut self, sections: &[Section]) -> Vec<CommandScope> {
        for scope in &mut self.scopes {
            scope.sections = sections
                .iter()
                .enumerate()
                .filter(|(_, s)| scope.contains(s.start_line))
                .map(|(i, _)| i)
                .collect();
        }
        self.scopes
    }
}
