//! Top-level orchestrator: numbers lines, classifies them, drives the
//! sequencer and the command tracker, and aggregates the result into a
//! [`ProcessingRun`].

use std::sync::Arc;
use std::time::Instant;

use crate::adapter::Adapter;
use crate::classifier::{ClassifiedLine, LineClassifier};
use crate::commands::CommandTracker;
use crate::error::FilterResult;
use crate::policy::PolicyReport;
use crate::run::ProcessingRun;
use crate::sequencer::Sequencer;
use crate::types::{LogLine, Severity};

/// Parses logs with one adapter. Each processor owns the run it produced;
/// independent processors share nothing but the read-only adapter.
pub struct Processor {
    adapter: Arc<Adapter>,
    classifier: LineClassifier,
    run: ProcessingRun,
}

impl Processor {
    pub fn new(adapter: Arc<Adapter>) -> FilterResult<Self> {
        adapter.validate()?;
        let classifier = LineClassifier::new(&adapter)?;
        let run = ProcessingRun::new(&adapter.name);
        Ok(Self {
            adapter,
            classifier,
            run,
        })
    }

    /// Processor for Vivado synthesis logs.
    pub fn vivado_synthesis() -> FilterResult<Self> {
        Self::new(Arc::new(Adapter::vivado_synthesis()))
    }

    /// Processor for Vivado implementation logs.
    pub fn vivado_implementation() -> FilterResult<Self> {
        Self::new(Arc::new(Adapter::vivado_implementation()))
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    /// Parse `lines` from scratch, replacing the result of any previous call.
    pub fn parse<I, S>(&mut self, lines: I) -> &ProcessingRun
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let started = Instant::now();
        let mut run = ProcessingRun::new(&self.adapter.name);
        let mut sequencer = Sequencer::new(&self.adapter);
        let mut tracker = CommandTracker::default();

        for (i, text) in lines.into_iter().enumerate() {
            let line = LogLine::new(i + 1, text);
            let classified = self.classifier.classify(&line);

            match &classified {
                ClassifiedLine::Message(message) => {
                    let index = run.push_message(message.clone());
                    sequencer.attach_message(index, message.severity);
                    tracker.attach_message(index, message.severity);
                }
                ClassifiedLine::Command(command) => run.commands.push(command.clone()),
                ClassifiedLine::Plain => {
                    if Severity::from_line_prefix(&line.text).is_some() {
                        tracing::debug!(line = line.line_number, text = %line.text, "irregular message line");
                        run.irregular_lines.push(line.line_number);
                    }
                }
                ClassifiedLine::Marker(_) | ClassifiedLine::Phase(_) => {}
            }

            sequencer.feed(&line, &classified);
            tracker.feed(&line, &classified);
            run.lines.push(line);
        }

        let outcome = sequencer.finish();
        run.command_scopes = tracker.finish(&outcome.sections);
        run.sections = outcome.sections;
        run.preamble = outcome.preamble;
        run.epilogue = outcome.epilogue;
        run.discarded_lines = outcome.discarded_lines;
        run.tool_version = outcome.tool_version;
        run.start_time = outcome.start_time;
        run.line_count = run.lines.len();
        run.duration = started.elapsed().as_secs_f64();

        tracing::info!(
            adapter = %run.adapter,
            lines = run.line_count,
            sections = run.sections.len(),
            commands = run.command_scopes.len(),
            messages = run.messages.len(),
            warnings = run.count(Severity::Warning),
            critical_warnings = run.count(Severity::CriticalWarning),
            errors = run.count(Severity::Error),
            duration_secs = run.duration,
            "log parsed"
        );

        self.run = run;
        &self.run
    }

    /// Split `text` into lines and parse them.
    pub fn parse_str(&mut self, text: &str) -> &ProcessingRun {
        self.parse(text.lines())
    }

    /// Result of the last parse; empty before the first one.
    pub fn run(&self) -> &ProcessingRun {
        &self.run
    }

    pub fn into_run(self) -> ProcessingRun {
        self.run
    }

    /// Policy checks over the last parse.
    pub fn policy(&self) -> PolicyReport {
        PolicyReport::evaluate(&self.run)
    }
}
