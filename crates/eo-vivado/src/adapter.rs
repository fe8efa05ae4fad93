//! Tool-version adapters: marker vocabulary and the expected section order.
//!
//! The list of sections a tool run goes through, and the exact text of the
//! lines that open and close them, differ between tools and tool versions.
//! An [`Adapter`] holds that knowledge as data so it can be loaded from TOML
//! instead of being compiled in. [`Adapter::vivado_synthesis`] is the
//! built-in adapter for Vivado `synth_design` logs and
//! [`Adapter::vivado_implementation`] the one for implementation logs, where
//! each Tcl command (`opt_design`, `place_design`, ...) brings its own
//! section list.
//!
//! ```toml
//! name = "vivado-synth-custom"
//!
//! [[sections]]
//! name = "RTL Elaboration"
//! start = "Starting RTL Elaboration"
//! finish = "Finished RTL Elaboration"
//!
//! [[sections]]
//! name = "Writing Synthesis Report"
//! start = "Start Writing Synthesis Report"
//! finish = "Finished Writing Synthesis Report"
//! extractor = "synthesis_report"
//!
//! [[commands]]
//! name = "place_design"
//!
//! [[commands.sections]]
//! name = "Placer Task"
//! start = "Starting Placer Task"
//! finish = "Ending Placer Task"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FilterError, FilterResult};

/// Name of the report section in [`Adapter::vivado_synthesis`].
pub const SYNTHESIS_REPORT_SECTION: &str = "Writing Synthesis Report";

/// Which section parser handles the lines of a section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    /// Bounds the line range and reads timing from the finish line.
    #[default]
    Generic,
    /// Additionally records the target part (`Loading part: ...`).
    LoadingPart,
    /// Additionally reads the blackbox and cell usage tables.
    SynthesisReport,
}

/// A phase nested inside a section whose markers do not close the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionSpec {
    pub name: String,
    pub start: String,
    pub finish: String,
}

/// One entry of the expected section order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    /// Line prefix that opens the section.
    pub start: String,
    /// Line prefix that closes the section.
    pub finish: String,
    #[serde(default)]
    pub extractor: ExtractorKind,
    #[serde(default)]
    pub subsections: Vec<SubsectionSpec>,
}

impl SectionSpec {
    pub fn has_subsection(&self, name: &str) -> bool {
        self.subsections.iter().any(|s| s.name == name)
    }
}

/// A Tcl command whose echo (`Command: <name> ...`) switches the expected
/// section order to its own list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
}

/// Marker vocabulary plus expected section order for one tool/version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adapter {
    pub name: String,
    /// Leading words of section start lines not listed in `sections`.
    #[serde(default = "default_start_keywords")]
    pub start_keywords: Vec<String>,
    /// Leading words of section end lines not listed in `sections`.
    #[serde(default = "default_end_keywords")]
    pub end_keywords: Vec<String>,
    /// Track `Start <Name>` lines for names missing from `sections` as
    /// unexpected sections instead of treating them as plain output.
    #[serde(default = "default_true")]
    pub track_unknown_sections: bool,
    /// Recognise `Phase <n>[.<n>...] <Name>` lines and their
    /// `... | Checksum: ...` ends as phases nested in the open section.
    #[serde(default)]
    pub numbered_phases: bool,
    /// Expected order outside any scoped command.
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
    #[serde(default)]
    pub commands: Vec<CommandSpec>,
}

fn default_start_keywords() -> Vec<String> {
    vec!["Start".into(), "Starting".into()]
}

fn default_end_keywords() -> Vec<String> {
    vec!["Finished".into(), "Ending".into()]
}

fn default_true() -> bool {
    true
}

impl Adapter {
    /// An adapter with the default keyword vocabulary and no expected sections.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_keywords: default_start_keywords(),
            end_keywords: default_end_keywords(),
            track_unknown_sections: true,
            numbered_phases: false,
            sections: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Builder-style append of an expected section.
    pub fn with_section(mut self, spec: SectionSpec) -> Self {
        self.sections.push(spec);
        self
    }

    /// Builder-style append of a scoped command.
    pub fn with_command(mut self, spec: CommandSpec) -> Self {
        self.commands.push(spec);
        self
    }

    /// Built-in adapter for Vivado `synth_design` logs (`*.vds`).
    pub fn vivado_synthesis() -> Self {
        const RETIMING: &str = "ROM, RAM, DSP, Shift Register and Retiming Reporting";
        const CUSTOM_ATTRIBUTES: &str = "Handling Custom Attributes";

        let mut io_insertion = section("IO Insertion", "Start", "Finished");
        io_insertion.subsections = vec![
            subsection("Flattening Before IO Insertion"),
            subsection("Final Netlist Cleanup"),
        ];

        let mut loading_part = section("Loading Part and Timing Information", "Start", "Finished");
        loading_part.extractor = ExtractorKind::LoadingPart;

        let mut report = section(SYNTHESIS_REPORT_SECTION, "Start", "Finished");
        report.extractor = ExtractorKind::SynthesisReport;

        let mut adapter = Self::new("vivado-synthesis");
        adapter.sections = vec![
            section("RTL Elaboration", "Starting", "Finished"),
            section(CUSTOM_ATTRIBUTES, "Start", "Finished"),
            loading_part,
            SectionSpec {
                name: "Applying 'set_property' XDC Constraints".into(),
                start: "Start Applying 'set_property' XDC Constraints".into(),
                finish: "Finished applying 'set_property' XDC Constraints".into(),
                extractor: ExtractorKind::Generic,
                subsections: Vec::new(),
            },
            section("RTL Component Statistics", "Start", "Finished"),
            section("RTL Hierarchical Component Statistics", "Start", "Finished"),
            section("Part Resource Summary", "Start", "Finished"),
            section("Cross Boundary and Area Optimization", "Start", "Finished"),
            section(RETIMING, "Start", "Finished"),
            section("Applying XDC Timing Constraints", "Start", "Finished"),
            section("Timing Optimization", "Start", "Finished"),
            section(RETIMING, "Start", "Finished"),
            section("Technology Mapping", "Start", "Finished"),
            io_insertion,
            section("Renaming Generated Instances", "Start", "Finished"),
            section("Rebuilding User Hierarchy", "Start", "Finished"),
            section("Renaming Generated Ports", "Start", "Finished"),
            section(CUSTOM_ATTRIBUTES, "Start", "Finished"),
            section("Renaming Generated Nets", "Start", "Finished"),
            section(RETIMING, "Start", "Finished"),
            report,
        ];
        adapter
    }

    /// Built-in adapter for Vivado implementation logs (`*.vdi`).
    ///
    /// Sections are the tasks each command runs (`Starting Placer Task` to
    /// `Ending Placer Task`); numbered phases nest inside them. Tasks that
    /// print no `Ending` line are closed by their timing line.
    pub fn vivado_implementation() -> Self {
        const TIMING_LINE: &str = "Time (s):";

        let mut drc = task("DRC Task");
        drc.finish = TIMING_LINE.into();
        let mut power = task("Power Optimization Task");
        power.subsections = vec![subtask("PowerOpt Patch Enables Task")];
        let mut cleanup = task("Final Cleanup Task");
        cleanup.subsections = vec![subtask("Logic Optimization Task")];
        let mut initial_timing = task("Initial Update Timing Task");
        initial_timing.finish = TIMING_LINE.into();

        let mut adapter = Self::new("vivado-implementation");
        adapter.numbered_phases = true;
        adapter.commands = vec![
            command("link_design", Vec::new()),
            command(
                "opt_design",
                vec![
                    drc,
                    task("Cache Timing Information Task"),
                    task("Logic Optimization Task"),
                    power,
                    cleanup,
                    task("Netlist Obfuscation Task"),
                ],
            ),
            command("place_design", vec![task("Placer Task")]),
            command(
                "phys_opt_design",
                vec![initial_timing, task("Physical Synthesis Task")],
            ),
            command("route_design", vec![task("Routing Task")]),
            command("write_bitstream", Vec::new()),
        ];
        adapter
    }

    /// Parse and validate an adapter from TOML text.
    pub fn from_toml_str(text: &str) -> FilterResult<Self> {
        let adapter: Self = toml::from_str(text).map_err(|e| FilterError::Config(e.to_string()))?;
        adapter.validate()?;
        Ok(adapter)
    }

    /// Load an adapter from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> FilterResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FilterError::SourceNotFound(path.display().to_string())
            } else {
                FilterError::Io(format!("{}: {e}", path.display()))
            }
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject adapters whose markers could never match or would match everything.
    pub fn validate(&self) -> FilterResult<()> {
        if self.name.trim().is_empty() {
            return Err(FilterError::Config("adapter name is empty".into()));
        }
        for keyword in self.start_keywords.iter().chain(&self.end_keywords) {
            if keyword.trim().is_empty() || keyword.contains(char::is_whitespace) {
                return Err(FilterError::Config(format!(
                    "marker keyword {keyword:?} must be a single non-empty word"
                )));
            }
        }
        for spec in self.all_sections() {
            check_markers(&spec.name, &spec.start, &spec.finish)?;
            for sub in &spec.subsections {
                check_markers(&sub.name, &sub.start, &sub.finish)?;
                if sub.name == spec.name {
                    return Err(FilterError::Config(format!(
                        "section '{}' lists itself as a subsection",
                        spec.name
                    )));
                }
            }
        }
        for (i, command) in self.commands.iter().enumerate() {
            if command.name.trim().is_empty() || command.name.contains(char::is_whitespace) {
                return Err(FilterError::Config(format!(
                    "command name {:?} must be a single non-empty word",
                    command.name
                )));
            }
            if self.commands[..i].iter().any(|c| c.name == command.name) {
                return Err(FilterError::Config(format!(
                    "command '{}' is listed twice",
                    command.name
                )));
            }
        }
        Ok(())
    }

    /// Position of the first top-level spec named `name` at or after `from`.
    pub fn position_from(&self, name: &str, from: usize) -> Option<usize> {
        position_in(&self.sections, name, from)
    }

    /// First spec named `name`, regardless of position. Top-level sections
    /// are searched before command sections.
    pub fn section_named(&self, name: &str) -> Option<&SectionSpec> {
        self.all_sections().find(|spec| spec.name == name)
    }

    pub fn command_named(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Top-level sections followed by every command's sections.
    pub fn all_sections(&self) -> impl Iterator<Item = &SectionSpec> {
        self.sections
            .iter()
            .chain(self.commands.iter().flat_map(|c| &c.sections))
    }
}

/// Position of the first spec in `specs` named `name` at or after `from`.
pub(crate) fn position_in(specs: &[SectionSpec], name: &str, from: usize) -> Option<usize> {
    specs
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, spec)| spec.name == name)
        .map(|(i, _)| i)
}

fn check_markers(name: &str, start: &str, finish: &str) -> FilterResult<()> {
    if name.trim().is_empty() {
        return Err(FilterError::Config("section name is empty".into()));
    }
    if start.trim().is_empty() || finish.trim().is_empty() {
        return Err(FilterError::Config(format!(
            "section '{name}' needs both a start and a finish marker"
        )));
    }
    if start == finish {
        return Err(FilterError::Config(format!(
            "section '{name}' uses the same text for start and finish"
        )));
    }
    Ok(())
}

fn section(name: &str, start_word: &str, finish_word: &str) -> SectionSpec {
    SectionSpec {
        name: name.into(),
        start: format!("{start_word} {name}"),
        finish: format!("{finish_word} {name}"),
        extractor: ExtractorKind::Generic,
        subsections: Vec::new(),
    }
}

fn subsection(name: &str) -> SubsectionSpec {
    SubsectionSpec {
        name: name.into(),
        start: format!("Start {name}"),
        finish: format!("Finished {name}"),
    }
}

fn task(name: &str) -> SectionSpec {
    section(name, "Starting", "Ending")
}

fn subtask(name: &str) -> SubsectionSpec {
    SubsectionSpec {
        name: name.into(),
        start: format!("Starting {name}"),
        finish: format!("Ending {name}"),
    }
}

fn command(name: &str, sections: Vec<SectionSpec>) -> CommandSpec {
    CommandSpec {
        name: name.into(),
        sections,
    }
}
