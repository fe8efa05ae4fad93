//! Reader for the ASCII tables in synthesis reports.
//!
//! ```text
//! +------+-----+------+
//! |      |Cell |Count |
//! +------+-----+------+
//! |1     |BUFG |     1|
//! |2     |LUT2 |     4|
//! +------+-----+------+
//! ```
//!
//! Column widths vary between tables and tool versions; only the `+`/`|`
//! framing is relied on.

use tracing::debug;

use crate::facts::CountTable;

/// Outcome of feeding one line to a [`TableReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStep {
    /// The line belonged to the table.
    Consumed,
    /// The line was the closing rule; the table is complete.
    Finished,
    /// The line is not part of a table; the caller should process it itself.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    TopRule,
    Header,
    HeaderRule,
    Rows,
}

/// Incremental reader of one `| # | name | count |` table.
#[derive(Debug)]
pub struct TableReader {
    expect: Expect,
    rows: CountTable,
}

impl Default for TableReader {
    fn default() -> Self {
        Self {
            expect: Expect::TopRule,
            rows: CountTable::new(),
        }
    }
}

impl TableReader {
    pub fn feed(&mut self, text: &str) -> TableStep {
        let line = text.trim();

        match self.expect {
            // Blank lines between the report title and the table are allowed.
            Expect::TopRule if line.is_empty() => TableStep::Consumed,
            Expect::TopRule if is_rule(line) => {
                self.expect = Expect::Header;
                TableStep::Consumed
            }
            Expect::Header if is_row(line) => {
                self.expect = Expect::HeaderRule;
                TableStep::Consumed
            }
            Expect::HeaderRule if is_rule(line) => {
                self.expect = Expect::Rows;
                TableStep::Consumed
            }
            Expect::Rows if is_row(line) => {
                self.read_row(line);
                TableStep::Consumed
            }
            Expect::Rows if is_rule(line) => TableStep::Finished,
            _ => TableStep::Rejected,
        }
    }

    fn read_row(&mut self, line: &str) {
        let cols = split_row(line);
        let parsed = match cols.as_slice() {
            [_, name, count, ..] if !name.is_empty() => {
                count.parse::<u64>().ok().map(|count| (*name, count))
            }
            _ => None,
        };
        match parsed {
            Some((name, count)) => self.rows.add(name, count),
            None => debug!(row = line, "skipping unreadable table row"),
        }
    }

    /// Rows read so far. Valid for partial tables too.
    pub fn into_rows(self) -> CountTable {
        self.rows
    }
}

fn is_rule(line: &str) -> bool {
    line.starts_with("+-")
}

fn is_row(line: &str) -> bool {
    line.starts_with('|')
}

/// Split `|1     |BUFG |     1|` into trimmed cells `["1", "BUFG", "1"]`.
pub fn split_row(line: &str) -> Vec<&str> {
    let inner = line.trim();
    let inner = inner.strip_prefix('|').unwrap_or(inner);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(str::trim).collect()
}
