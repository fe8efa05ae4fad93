//! Typed facts extracted from sections, keyed by fact name.

use chrono::NaiveDateTime;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::types::ToolVersion;

/// Well-known fact names.
pub mod names {
    pub const DURATION: &str = "Duration";
    pub const CPU_TIME: &str = "CpuTime";
    pub const PEAK_MEMORY: &str = "PeakMemory";
    pub const MEMORY_GAIN: &str = "MemoryGain";
    pub const PART: &str = "Part";
    pub const CELLS: &str = "Cells";
    pub const BLACKBOXES: &str = "Blackboxes";
    pub const LATCHES_PRESENT: &str = "LatchesPresent";
    pub const SUBSECTIONS: &str = "Subsections";
    pub const PHASES: &str = "Phases";
    pub const TOOL_VERSION: &str = "ToolVersion";
    pub const START_TIME: &str = "StartTime";
}

/// A single extracted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Fact {
    Seconds(f64),
    Megabytes(f64),
    Text(String),
    Flag(bool),
    Names(Vec<String>),
    Counts(CountTable),
    Version(ToolVersion),
    Timestamp(NaiveDateTime),
}

impl Fact {
    /// Name of the variant, used in type-mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Seconds(_) => "seconds",
            Self::Megabytes(_) => "megabytes",
            Self::Text(_) => "text",
            Self::Flag(_) => "flag",
            Self::Names(_) => "names",
            Self::Counts(_) => "counts",
            Self::Version(_) => "version",
            Self::Timestamp(_) => "timestamp",
        }
    }

    pub fn as_seconds(&self) -> Option<f64> {
        match self {
            Self::Seconds(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_megabytes(&self) -> Option<f64> {
        match self {
            Self::Megabytes(mb) => Some(*mb),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_names(&self) -> Option<&[String]> {
        match self {
            Self::Names(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_counts(&self) -> Option<&CountTable> {
        match self {
            Self::Counts(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_version(&self) -> Option<ToolVersion> {
        match self {
            Self::Version(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

// ── Count Table ───────────────────────────────────────────────

/// Name → count rows in table order. Repeated names accumulate into the
/// first row carrying that name. Sums saturate at `u64::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable(Vec<(String, u64)>);

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, count: u64) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = existing.saturating_add(count),
            None => self.0.push((name.to_string(), count)),
        }
    }

    /// Count for `name`, 0 when the name never appeared.
    pub fn get(&self, name: &str) -> u64 {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(n, c)| (n.as_str(), *c))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, c)| *c).fold(0, u64::saturating_add)
    }
}

impl Serialize for CountTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

impl<'a> FromIterator<(&'a str, u64)> for CountTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, count) in iter {
            table.add(name, count);
        }
        table
    }
}

// ── Facts ─────────────────────────────────────────────────────

/// The finalized facts of one section or region.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Facts(BTreeMap<String, Fact>);

impl Facts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, fact: Fact) {
        self.0.insert(name.into(), fact);
    }

    pub fn get(&self, name: &str) -> Option<&Fact> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Moves every fact of `other` into `self`, overwriting on collision.
    pub fn extend(&mut self, other: Facts) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fact)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn count_table_accumulates_duplicates() {
        let mut table = CountTable::new();
        table.add("LUT2", 4);
        table.add("FDRE", 10);
        table.add("LUT2", 3);
        assert_eq!(table.get("LUT2"), 7);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 17);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["LUT2", "FDRE"]);
    }

    #[test]
    fn huge_counts_saturate() {
        let mut table = CountTable::new();
        table.add("LUT2", u64::MAX);
        table.add("LUT2", 1);
        table.add("FDRE", 5);
        assert_eq!(table.get("LUT2"), u64::MAX);
        assert_eq!(table.total(), u64::MAX);
    }

    #[test]
    fn missing_count_is_zero() {
        let table: CountTable = [("BUFG", 1)].into_iter().collect();
        assert_eq!(table.get("LD"), 0);
        assert!(!table.contains("LD"));
        assert!(table.contains("BUFG"));
    }

    #[test]
    fn count_table_serializes_as_ordered_map() {
        let table: CountTable = [("LUT6", 2), ("BUFG", 1)].into_iter().collect();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"LUT6":2,"BUFG":1}"#);
    }

    #[test]
    fn fact_serializes_with_type_tag() {
        let json = serde_json::to_value(Fact::Seconds(2.0)).unwrap();
        assert_eq!(json["type"], "seconds");
        assert_eq!(json["value"], 2.0);

        let json = serde_json::to_value(Fact::Version(ToolVersion::new(2020, 1, 0))).unwrap();
        assert_eq!(json["type"], "version");
        assert_eq!(json["value"]["year"], 2020);
    }

    #[test]
    fn accessors_reject_other_variants() {
        let fact = Fact::Text("xc7a35t".into());
        assert_eq!(fact.as_text(), Some("xc7a35t"));
        assert_eq!(fact.as_seconds(), None);
        assert_eq!(fact.as_counts(), None);
        assert_eq!(fact.type_name(), "text");
    }

    #[test]
    fn facts_extend_overwrites() {
        let mut facts = Facts::new();
        facts.insert(names::PART, Fact::Text("a".into()));
        let mut other = Facts::new();
        other.insert(names::PART, Fact::Text("b".into()));
        other.insert(names::DURATION, Fact::Seconds(1.0));
        facts.extend(other);
        assert_eq!(facts.len(), 2);
        assert_eq!(facts.get(names::PART).and_then(Fact::as_text), Some("b"));
    }
}
