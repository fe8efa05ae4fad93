//! Policy checks: pure functions over a finished [`ProcessingRun`].
//!
//! Table-based checks look at every section the run read with the
//! synthesis-report parser, whatever the adapter named it. Message-based and table-based signals are combined with a
//! logical OR: depending on verbosity settings either one may be missing.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::facts::{CountTable, names};
use crate::run::ProcessingRun;
use crate::sections::synthesis_report::LATCH_CELL;
use crate::types::{Message, MessageKind};

/// `[Synth 8-327] inferring latch for variable ...`
pub const LATCH_INFERRED: MessageKind = MessageKind::new(8, 327);
/// `[Synth 8-3332] Sequential element (...) is unused and will be removed ...`
pub const UNUSED_SEQUENTIAL: MessageKind = MessageKind::new(8, 3332);
/// `[Synth 8-6031] RTL report: "..." [file:line]`
pub const VHDL_REPORT: MessageKind = MessageKind::new(8, 6031);
/// `[Synth 8-63] RTL assertion: "..." [file:line]`
pub const VHDL_ASSERTION: MessageKind = MessageKind::new(8, 63);

pub use crate::adapter::SYNTHESIS_REPORT_SECTION;

static RE_RTL_REPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^RTL report: "(.*)" \[(.*):(\d+)\]"#).unwrap());

static RE_RTL_ASSERTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^RTL assertion: "(.*)" \[(.*):(\d+)\]"#).unwrap());

// ── Report-table helpers ──────────────────────────────────────

fn report_tables<'a>(run: &'a ProcessingRun, fact: &'a str) -> impl Iterator<Item = &'a CountTable> {
    run.report_sections()
        .filter_map(move |s| s.counts(fact).ok())
}

fn merged(run: &ProcessingRun, fact: &str) -> CountTable {
    let mut table = CountTable::new();
    for t in report_tables(run, fact) {
        for (name, count) in t.iter() {
            table.add(name, count);
        }
    }
    table
}

// ── Checks ────────────────────────────────────────────────────

/// A latch was inferred (`8-327`) or the cell-usage table lists `LD`.
pub fn has_latches(run: &ProcessingRun) -> bool {
    run.has_message(LATCH_INFERRED) || report_tables(run, names::CELLS).any(|t| t.get(LATCH_CELL) > 0)
}

pub fn latches(run: &ProcessingRun) -> Vec<&Message> {
    run.messages_of_kind(LATCH_INFERRED).collect()
}

pub fn has_blackboxes(run: &ProcessingRun) -> bool {
    report_tables(run, names::BLACKBOXES).any(|t| !t.is_empty())
}

/// Blackbox module → instance count across all report sections.
pub fn blackboxes(run: &ProcessingRun) -> CountTable {
    merged(run, names::BLACKBOXES)
}

/// Cell type → instance count across all report sections.
pub fn cells(run: &ProcessingRun) -> CountTable {
    merged(run, names::CELLS)
}

pub fn unused_sequential_elements(run: &ProcessingRun) -> Vec<&Message> {
    run.messages_of_kind(UNUSED_SEQUENTIAL).collect()
}

pub fn has_unused_signals(run: &ProcessingRun) -> bool {
    run.has_message(UNUSED_SEQUENTIAL)
}

// ── VHDL report/assert statements ─────────────────────────────

/// A VHDL `report` or `assert` statement echoed during elaboration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VhdlReport {
    pub message: String,
    pub file: String,
    pub line: u32,
    /// Line of the log message this was decoded from.
    pub line_number: usize,
}

impl VhdlReport {
    fn decode(regex: &Regex, message: &Message) -> Option<Self> {
        let caps = regex.captures(&message.text)?;
        Some(Self {
            message: caps[1].to_string(),
            file: caps[2].to_string(),
            line: caps[3].parse().ok()?,
            line_number: message.line_number,
        })
    }
}

/// Decoded `8-6031` messages; messages with unexpected text are skipped.
pub fn vhdl_reports(run: &ProcessingRun) -> Vec<VhdlReport> {
    run.messages_of_kind(VHDL_REPORT)
        .filter_map(|m| VhdlReport::decode(&RE_RTL_REPORT, m))
        .collect()
}

/// Decoded `8-63` messages.
pub fn vhdl_assertions(run: &ProcessingRun) -> Vec<VhdlReport> {
    run.messages_of_kind(VHDL_ASSERTION)
        .filter_map(|m| VhdlReport::decode(&RE_RTL_ASSERTION, m))
        .collect()
}

// ── Report ────────────────────────────────────────────────────

/// All checks evaluated once, for printing or serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyReport {
    pub latches_present: bool,
    pub latch_messages: usize,
    pub blackboxes_present: bool,
    pub blackbox_count: usize,
    pub unused_signals: bool,
    pub unused_sequential_elements: usize,
    pub vhdl_reports: Vec<VhdlReport>,
    pub vhdl_assertions: Vec<VhdlReport>,
    pub unterminated_sections: Vec<String>,
    pub unexpected_sections: Vec<String>,
}

impl PolicyReport {
    pub fn evaluate(run: &ProcessingRun) -> Self {
        Self {
            latches_present: has_latches(run),
            latch_messages: latches(run).len(),
            blackboxes_present: has_blackboxes(run),
            blackbox_count: blackboxes(run).len(),
            unused_signals: has_unused_signals(run),
            unused_sequential_elements: unused_sequential_elements(run).len(),
            vhdl_reports: vhdl_reports(run),
            vhdl_assertions: vhdl_assertions(run),
            unterminated_sections: run.unterminated_sections().map(|s| s.name.clone()).collect(),
            unexpected_sections: run.unexpected_sections().map(|s| s.name.clone()).collect(),
        }
    }

    /// True when synthesis inferred no latch and left no blackbox.
    pub fn is_clean(&self) -> bool {
        !self.latches_present && !self.blackboxes_present
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{Adapter, ExtractorKind, SectionSpec};
    use crate::processor::Processor;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    const CELL_TABLE_WITH_LD: &[&str] = &[
        "Start Writing Synthesis Report",
        "Report Cell Usage: ",
        "+------+-----+------+",
        "|      |Cell |Count |",
        "+------+-----+------+",
        "|1     |BUFG |     1|",
        "|2     |LD   |     3|",
        "+------+-----+------+",
        "Finished Writing Synthesis Report : Time (s): cpu = 00:00:02 ; elapsed = 00:00:03 . Memory (MB): peak = 1500.0 ; gain = 10.0",
    ];

    fn parse(lines: &[&str]) -> ProcessingRun {
        let mut p = Processor::vivado_synthesis().unwrap();
        p.parse(lines.iter().copied());
        p.into_run()
    }

    #[test]
    fn latch_from_message_alone() {
        let run = parse(&["CRITICAL WARNING: [Synth 8-327] Latch inferred"]);
        assert!(has_latches(&run));
        assert_eq!(latches(&run).len(), 1);
    }

    #[test]
    fn latch_from_cell_table_alone() {
        let run = parse(CELL_TABLE_WITH_LD);
        assert!(!run.has_message(LATCH_INFERRED));
        assert!(has_latches(&run));
        assert!(latches(&run).is_empty());
        assert_eq!(cells(&run).get("LD"), 3);
    }

    #[test]
    fn report_tables_found_by_parser_not_name() {
        let adapter = Adapter::new("custom").with_section(SectionSpec {
            name: "Report".into(),
            start: "Start Report".into(),
            finish: "Finished Report".into(),
            extractor: ExtractorKind::SynthesisReport,
            subsections: Vec::new(),
        });
        let mut p = Processor::new(Arc::new(adapter)).unwrap();
        p.parse([
            "Start Report",
            "Report BlackBoxes: ",
            "+-+-------------+---------+",
            "| |BlackBox name|Instances|",
            "+-+-------------+---------+",
            "|1|bram         |        2|",
            "+-+-------------+---------+",
            "Report Cell Usage: ",
            "+-+----+-----+",
            "| |Cell|Count|",
            "+-+----+-----+",
            "|1|LD  |    3|",
            "+-+----+-----+",
            "Finished Report",
        ]);
        let run = p.run();
        assert!(run.section(SYNTHESIS_REPORT_SECTION).is_err());
        assert!(has_latches(run));
        assert!(has_blackboxes(run));
        assert_eq!(blackboxes(run).get("bram"), 2);
        assert_eq!(cells(run).get("LD"), 3);
    }

    #[test]
    fn generic_section_named_like_the_report_is_ignored() {
        let adapter = Adapter::new("renamed").with_section(SectionSpec {
            name: SYNTHESIS_REPORT_SECTION.into(),
            start: format!("Start {SYNTHESIS_REPORT_SECTION}"),
            finish: format!("Finished {SYNTHESIS_REPORT_SECTION}"),
            extractor: ExtractorKind::Generic,
            subsections: Vec::new(),
        });
        let mut p = Processor::new(Arc::new(adapter)).unwrap();
        p.parse(CELL_TABLE_WITH_LD.iter().copied());
        assert!(p.run().section(SYNTHESIS_REPORT_SECTION).is_ok());
        assert!(!has_latches(p.run()));
        assert!(cells(p.run()).is_empty());
    }

    #[test]
    fn no_latch_signal() {
        let run = parse(&["INFO: [Synth 8-6157] synthesizing module 'top'"]);
        assert!(!has_latches(&run));
    }

    #[test]
    fn blackbox_checks() {
        let run = parse(&[
            "Start Writing Synthesis Report",
            "Report BlackBoxes: ",
            "+-+-------------+---------+",
            "| |BlackBox name|Instances|",
            "+-+-------------+---------+",
            "|1|bram         |        2|",
            "+-+-------------+---------+",
            "Finished Writing Synthesis Report",
        ]);
        assert!(has_blackboxes(&run));
        assert_eq!(blackboxes(&run).get("bram"), 2);
        assert!(!has_blackboxes(&parse(&[])));
    }

    #[test]
    fn unused_sequential_elements_are_listed() {
        let run = parse(&[
            "WARNING: [Synth 8-3332] Sequential element (gen[0].Sync/FF2) is unused and will be removed from module sync_Bits_Xilinx.",
            "WARNING: [Synth 8-3332] Sequential element (gen[1].Sync/FF2) is unused and will be removed from module sync_Bits_Xilinx.",
        ]);
        assert!(has_unused_signals(&run));
        assert_eq!(unused_sequential_elements(&run).len(), 2);
    }

    #[test]
    fn decode_vhdl_reports_and_assertions() {
        let run = parse(&[
            r#"INFO: [Synth 8-6031] RTL report: "CLOCK_FREQ = 100 MHz" [/src/top.vhdl:42]"#,
            r#"INFO: [Synth 8-6031] RTL report without quotes"#,
            r#"WARNING: [Synth 8-63] RTL assertion: "width mismatch" [/src/fifo.vhdl:117]"#,
        ]);
        let reports = vhdl_reports(&run);
        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0],
            VhdlReport {
                message: "CLOCK_FREQ = 100 MHz".into(),
                file: "/src/top.vhdl".into(),
                line: 42,
                line_number: 1,
            }
        );
        let assertions = vhdl_assertions(&run);
        assert_eq!(assertions.len(), 1);
        assert_eq!(assertions[0].line, 117);
    }

    #[test]
    fn policy_report_summarises_checks() {
        let report = PolicyReport::evaluate(&parse(CELL_TABLE_WITH_LD));
        assert!(report.latches_present);
        assert!(!report.blackboxes_present);
        assert!(report.unterminated_sections.is_empty());
        assert_eq!(report.unexpected_sections, Vec::<String>::new());
        assert!(!report.is_clean());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["latches_present"], true);
    }
}
