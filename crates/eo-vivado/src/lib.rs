//! Section-driven parser and message classifier for AMD/Xilinx Vivado logs.
//!
//! Provides a line classifier for severity-tagged messages, section
//! markers and numbered phases, adapters describing the expected section
//! order of synthesis and implementation logs, section extractors
//! (preamble, part loading, synthesis report tables), a sequencer
//! partitioning the log into sections, command scopes for each echoed Tcl
//! command, a `Processor` aggregating everything into a queryable
//! `ProcessingRun`, policy checks over that run, and a `LogSource`
//! abstraction for line acquisition.

pub mod adapter;
pub mod classifier;
pub mod commands;
pub mod error;
pub mod facts;
pub mod index;
pub mod mock;
pub mod policy;
pub mod processor;
pub mod run;
pub mod sections;
pub mod sequencer;
pub mod source;
pub mod types;

// Re-export key types for convenience
pub use adapter::{Adapter, CommandSpec, ExtractorKind, SectionSpec, SubsectionSpec};
pub use classifier::{Boundary, ClassifiedLine, LineClassifier, PhaseMarker, SectionMarker};
pub use commands::{CommandOutcome, CommandScope, XdcFile};
pub use error::{FilterError, FilterResult};
pub use facts::{CountTable, Fact, Facts};
pub use index::MessageIndex;
pub use mock::MockLogSource;
pub use policy::PolicyReport;
pub use processor::Processor;
pub use run::{ProcessingRun, Region, Section};
pub use source::{FileLogSource, LogSource};
pub use types::{LogLine, Message, MessageKind, Severity, TclCommand, ToolVersion};
