//! `Writing Synthesis Report`: blackbox and cell-usage tables.
//!
//! ```text
//! Report BlackBoxes:
//! +------+--------------+----------+
//! |      |BlackBox name |Instances |
//! +------+--------------+----------+
//! |1     |bram          |         1|
//! +------+--------------+----------+
//!
//! Report Cell Usage:
//! +------+-----+------+
//! |      |Cell |Count |
//! ...
//! ```

use tracing::debug;

use super::SectionExtractor;
use super::table::{TableReader, TableStep};
use crate::classifier::ClassifiedLine;
use crate::facts::{CountTable, Fact, Facts, names};
use crate::types::LogLine;

const BLACKBOXES_TITLE: &str = "Report BlackBoxes:";
const CELL_USAGE_TITLE: &str = "Report Cell Usage:";

/// Cell type of a transparent latch.
pub const LATCH_CELL: &str = "LD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableKind {
    Blackboxes,
    Cells,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Table(TableKind, TableReader),
}

#[derive(Debug, Default)]
pub struct SynthesisReportExtractor {
    state: State,
    blackboxes: Option<CountTable>,
    cells: Option<CountTable>,
}

impl SynthesisReportExtractor {
    fn start_table(&mut self, text: &str) {
        let kind = match text.trim() {
            BLACKBOXES_TITLE => TableKind::Blackboxes,
            CELL_USAGE_TITLE => TableKind::Cells,
            _ => return,
        };
        self.state = State::Table(kind, TableReader::default());
    }

    fn store(&mut self, kind: TableKind, reader: TableReader) {
        let rows = reader.into_rows();
        let slot = match kind {
            TableKind::Blackboxes => &mut self.blackboxes,
            TableKind::Cells => &mut self.cells,
        };
        match slot {
            Some(existing) => {
                for (name, count) in rows.iter() {
                    existing.add(name, count);
                }
            }
            None => *slot = Some(rows),
        }
    }
}

impl SectionExtractor for SynthesisReportExtractor {
    fn feed(&mut self, line: &LogLine, classified: &ClassifiedLine) {
        if !classified.is_plain() {
            return;
        }

        match std::mem::take(&mut self.state) {
            State::Idle => self.start_table(&line.text),
            State::Table(kind, mut reader) => match reader.feed(&line.text) {
                TableStep::Consumed => self.state = State::Table(kind, reader),
                TableStep::Finished => self.store(kind, reader),
                TableStep::Rejected => {
                    debug!(line = line.line_number, ?kind, "report table ended early");
                    self.store(kind, reader);
                    self.start_table(&line.text);
                }
            },
        }
    }

    fn finalize(mut self) -> Facts {
        if let State::Table(kind, reader) = std::mem::take(&mut self.state) {
            self.store(kind, reader);
        }

        let mut facts = Facts::new();
        if let Some(blackboxes) = self.blackboxes {
            facts.insert(names::BLACKBOXES, Fact::Counts(blackboxes));
        }
        if let Some(cells) = self.cells {
            facts.insert(
                names::LATCHES_PRESENT,
                Fact::Flag(cells.get(LATCH_CELL) > 0),
            );
            facts.insert(names::CELLS, Fact::Counts(cells));
        }
        facts
    }
}
