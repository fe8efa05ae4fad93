//! Text renderings of a finished run: message listings, summaries, JSON and
//! InfluxDB line protocol.

use serde::Serialize;

use eo_vivado::policy;
use eo_vivado::{CommandScope, PolicyReport, ProcessingRun, Severity};

use crate::cli::{ImplArgs, SynthArgs};
use crate::config::InfluxConfig;

/// Full stdout text for `synth`: requested listings, then JSON, line
/// protocol, or the summary when neither machine format was asked for.
pub fn render(
    args: &SynthArgs,
    run: &ProcessingRun,
    report: &PolicyReport,
    influx: &InfluxConfig,
) -> serde_json::Result<String> {
    let mut out = listings(
        run,
        [
            (args.info, Severity::Info),
            (args.warning, Severity::Warning),
            (args.critical, Severity::CriticalWarning),
            (args.error, Severity::Error),
        ],
    );
    if args.json {
        out.push_str(&json(run, report)?);
        out.push('\n');
    }
    if args.influxdb {
        out.push_str(&influx_lines(run, influx));
    }
    if !args.json && !args.influxdb {
        out.push_str(&summary(run, report));
    }
    Ok(out)
}

/// Full stdout text for `impl`: requested listings, then JSON or the
/// per-command summary.
pub fn render_implementation(args: &ImplArgs, run: &ProcessingRun) -> serde_json::Result<String> {
    let mut out = listings(
        run,
        [
            (args.info, Severity::Info),
            (args.warning, Severity::Warning),
            (args.critical, Severity::CriticalWarning),
            (args.error, Severity::Error),
        ],
    );
    if args.json {
        out.push_str(&serde_json::to_string_pretty(run)?);
        out.push('\n');
    } else {
        out.push_str(&implementation_summary(run));
    }
    Ok(out)
}

fn listings(run: &ProcessingRun, wanted: [(bool, Severity); 4]) -> String {
    wanted
        .into_iter()
        .filter(|(wanted, _)| *wanted)
        .map(|(_, severity)| message_listing(run, severity))
        .collect()
}

/// Header plus one indented line per message of `severity`.
pub fn message_listing(run: &ProcessingRun, severity: Severity) -> String {
    let mut out = format!("{severity} messages: {}\n", run.count(severity));
    for message in run.messages_of(severity) {
        out.push_str(&format!("  {message}\n"));
    }
    out
}

// Lines shared by both summaries.
fn summary_header(run: &ProcessingRun) -> String {
    let mut out = String::from("Summary:\n");
    out.push_str(&format!("  Processing duration: {:.3} s\n", run.duration()));
    if let Some(version) = run.tool_version() {
        out.push_str(&format!("  Tool version: {version}\n"));
    }
    out.push_str(&format!(
        "  Info: {}  Warning: {}  Critical Warning: {}  Error: {}\n",
        run.count(Severity::Info),
        run.count(Severity::Warning),
        run.count(Severity::CriticalWarning),
        run.count(Severity::Error),
    ));
    out
}

/// Closing summary: durations, per-severity counts and policy flags.
pub fn summary(run: &ProcessingRun, report: &PolicyReport) -> String {
    let mut out = summary_header(run);
    out.push_str(&format!(
        "  Sections: {} ({} unterminated, {} unexpected)\n",
        run.sections().len(),
        report.unterminated_sections.len(),
        report.unexpected_sections.len(),
    ));
    out.push_str(&format!(
        "  Latches: {}  Blackboxes: {}  Unused sequential elements: {}\n",
        yes_no(report.latches_present),
        report.blackbox_count,
        report.unused_sequential_elements,
    ));
    out
}

/// Closing summary of an implementation run: counts, then one line per
/// command scope.
pub fn implementation_summary(run: &ProcessingRun) -> String {
    let mut out = summary_header(run);
    out.push_str(&format!("  Commands: {}\n", run.command_scopes().len()));
    for scope in run.command_scopes() {
        out.push_str(&command_line(scope));
    }
    out
}

fn command_line(scope: &CommandScope) -> String {
    let timing = scope
        .duration()
        .map(|seconds| format!(" in {seconds:.1} s"))
        .unwrap_or_default();
    format!(
        "    {}: {}{timing} (sections: {}, warnings: {}, critical warnings: {}, errors: {})\n",
        scope.command,
        scope.outcome,
        scope.sections.len(),
        scope.count(Severity::Warning),
        scope.count(Severity::CriticalWarning),
        scope.count(Severity::Error),
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    run: &'a ProcessingRun,
    policy: &'a PolicyReport,
}

/// Pretty JSON of the run and its policy report.
pub fn json(run: &ProcessingRun, report: &PolicyReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonOutput {
        run,
        policy: report,
    })
}

/// `<prefix>_overview` and `<prefix>_cells` points. The cells point is left
/// out when the log has no cell-usage table.
pub fn influx_lines(run: &ProcessingRun, config: &InfluxConfig) -> String {
    let version = run
        .tool_version()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let tags = format!(
        "version={},branch={},design={}",
        escape_tag(&version),
        escape_tag(&config.branch),
        escape_tag(&config.design),
    );

    let mut fields = vec![format!("processing_duration={:.3}", run.duration())];
    if let Some(seconds) = run.report_sections().find_map(|s| s.duration()) {
        fields.push(format!("synthesis_duration={seconds:.1}"));
    }
    for (name, severity) in [
        ("info_count", Severity::Info),
        ("warning_count", Severity::Warning),
        ("critical_count", Severity::CriticalWarning),
        ("error_count", Severity::Error),
    ] {
        fields.push(format!("{name}={}u", run.count(severity)));
    }
    fields.push(format!("blackbox_count={}u", policy::blackboxes(run).len()));

    let mut out = format!(
        "{}_overview,{tags} {}\n",
        config.measurement_prefix,
        fields.join(",")
    );

    let cells: Vec<String> = policy::cells(run)
        .iter()
        .filter(|(name, _)| !name.ends_with("_bbox"))
        .map(|(name, count)| format!("{}={count}", escape_tag(name)))
        .collect();
    if !cells.is_empty() {
        out.push_str(&format!(
            "{}_cells,{tags} {}\n",
            config.measurement_prefix,
            cells.join(",")
        ));
    }
    out
}

// Line protocol: commas, spaces and equals signs in tags and field keys are
// backslash-escaped.
fn escape_tag(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, ',' | ' ' | '=') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use eo_vivado::{Adapter, ExtractorKind, Processor, SectionSpec};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    const LOG: &[&str] = &[
        "# Vivado v2020.1 (64-bit)",
        "WARNING: [Synth 8-3332] Sequential element (FF2) is unused",
        "INFO: [Synth 8-6157] synthesizing module 'toplevel'",
        "Start Writing Synthesis Report",
        "Report Cell Usage:",
        "+-+---------+-----+",
        "| |Cell     |Count|",
        "+-+---------+-----+",
        "|1|bram_bbox|    1|",
        "|2|BUFG     |    1|",
        "|3|LUT2     |    4|",
        "+-+---------+-----+",
        "Finished Writing Synthesis Report : Time (s): cpu = 00:00:20 ; elapsed = 00:00:24 . Memory (MB): peak = 1183.168 ; gain = 170.867",
    ];

    fn run() -> ProcessingRun {
        let mut p = Processor::vivado_synthesis().unwrap();
        p.parse(LOG.iter().copied());
        p.into_run()
    }

    #[test]
    fn listing_has_header_and_messages() {
        let text = message_listing(&run(), Severity::Warning);
        assert_eq!(
            text,
            "WARNING messages: 1\n  WARNING: [Synth 8-3332] Sequential element (FF2) is unused\n"
        );
    }

    #[test]
    fn empty_listing() {
        assert_eq!(message_listing(&run(), Severity::Error), "ERROR messages: 0\n");
    }

    #[test]
    fn summary_counts() {
        let run = run();
        let text = summary(&run, &PolicyReport::evaluate(&run));
        assert!(text.starts_with("Summary:\n  Processing duration: "));
        assert!(text.contains("  Tool version: 2020.1\n"));
        assert!(text.contains("  Info: 1  Warning: 1  Critical Warning: 0  Error: 0\n"));
        assert!(text.contains("  Sections: 1 (0 unterminated, 0 unexpected)\n"));
        assert!(text.contains("Latches: no"));
    }

    #[test]
    fn influx_overview_and_cells() {
        let run = run();
        let config = InfluxConfig {
            design: "Stop Watch".into(),
            ..InfluxConfig::default()
        };
        let text = influx_lines(&run, &config);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let (series, fields) = lines[0].split_once(' ').unwrap();
        assert_eq!(series, "vivado_synthesis_overview,version=2020.1,branch=main,design=Stop\\");
        assert!(fields.starts_with("Watch processing_duration="));
        assert!(lines[0].contains(",synthesis_duration=24.0,"));
        assert!(lines[0].ends_with(
            ",info_count=1u,warning_count=1u,critical_count=0u,error_count=0u,blackbox_count=0u"
        ));

        assert_eq!(
            lines[1],
            "vivado_synthesis_cells,version=2020.1,branch=main,design=Stop\\ Watch BUFG=1,LUT2=4"
        );
    }

    #[test]
    fn influx_without_report_section() {
        let mut p = Processor::vivado_synthesis().unwrap();
        p.parse(["INFO: [Synth 8-1] x"]);
        let text = influx_lines(p.run(), &InfluxConfig::default());
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("vivado_synthesis_overview,version=unknown,"));
        assert!(!text.contains("synthesis_duration"));
    }

    #[test]
    fn json_contains_run_and_policy() {
        let run = run();
        let text = json(&run, &PolicyReport::evaluate(&run)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["policy"]["unused_signals"], true);
        assert_eq!(value["run"]["sections"][0]["name"], "Writing Synthesis Report");
        assert_eq!(
            value["run"]["sections"][0]["facts"]["Cells"]["value"]["LUT2"],
            4
        );
    }

    fn args(flags: &[&str]) -> SynthArgs {
        use crate::cli::{Cli, Commands};
        use clap::Parser;
        let argv = ["eo-filter", "synth", "--file", "x.vds"]
            .into_iter()
            .chain(flags.iter().copied());
        let Commands::Synth(args) = Cli::parse_from(argv).cmd else {
            panic!("expected synth subcommand");
        };
        args
    }

    fn impl_args(flags: &[&str]) -> ImplArgs {
        use crate::cli::{Cli, Commands};
        use clap::Parser;
        let argv = ["eo-filter", "impl", "--file", "x.vdi"]
            .into_iter()
            .chain(flags.iter().copied());
        let Commands::Impl(args) = Cli::parse_from(argv).cmd else {
            panic!("expected impl subcommand");
        };
        args
    }

    const IMPL_LOG: &[&str] = &[
        "# Vivado v2025.1 (64-bit)",
        "Command: place_design",
        "Starting Placer Task",
        "WARNING: [Place 30-568] A LUT 'Seg_i_1' is driving clock pin of 8 registers.",
        "Ending Placer Task | Checksum: 12b7e9c6a",
        "place_design completed successfully",
        "place_design: Time (s): cpu = 00:00:15 ; elapsed = 00:00:10 . Memory (MB): peak = 1913.156 ; gain = 52.797",
        "Command: route_design",
        "ERROR: [Route 35-1] Routing failed",
        "route_design failed",
    ];

    fn impl_run() -> ProcessingRun {
        let mut p = Processor::vivado_implementation().unwrap();
        p.parse(IMPL_LOG.iter().copied());
        p.into_run()
    }

    #[test]
    fn implementation_summary_lists_commands() {
        let text = implementation_summary(&impl_run());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Summary:");
        assert_eq!(lines[2], "  Tool version: 2025.1");
        assert_eq!(lines[3], "  Info: 0  Warning: 1  Critical Warning: 0  Error: 1");
        assert_eq!(
            &lines[4..],
            &[
                "  Commands: 2",
                "    place_design: succeeded in 10.0 s (sections: 1, warnings: 1, critical warnings: 0, errors: 0)",
                "    route_design: failed (sections: 0, warnings: 0, critical warnings: 0, errors: 1)",
            ]
        );
    }

    #[test]
    fn render_implementation_listing_then_json() {
        let run = impl_run();
        let text = render_implementation(&impl_args(&["--error", "--json"]), &run).unwrap();
        let (listing, json) = text.split_once("\n  ERROR: [Route 35-1] Routing failed\n").unwrap();
        assert_eq!(listing, "ERROR messages: 1");
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["command_scopes"][0]["command"], "place_design");
        assert_eq!(value["command_scopes"][1]["outcome"], "failed");
        assert!(!text.contains("Summary:"));
    }

    #[test]
    fn synthesis_duration_from_renamed_report_section() {
        let adapter = Adapter::new("renamed").with_section(SectionSpec {
            name: "Report".into(),
            start: "Start Report".into(),
            finish: "Finished Report".into(),
            extractor: ExtractorKind::SynthesisReport,
            subsections: Vec::new(),
        });
        let mut p = Processor::new(Arc::new(adapter)).unwrap();
        p.parse([
            "Start Report",
            "Finished Report : Time (s): cpu = 00:00:20 ; elapsed = 00:00:31 . Memory (MB): peak = 1183.168 ; gain = 170.867",
        ]);
        let text = influx_lines(p.run(), &InfluxConfig::default());
        assert!(text.contains(",synthesis_duration=31.0,"));
    }

    #[test]
    fn render_defaults_to_summary() {
        let run = run();
        let report = PolicyReport::evaluate(&run);
        let text = render(&args(&[]), &run, &report, &InfluxConfig::default()).unwrap();
        assert!(text.starts_with("Summary:\n"));
    }

    #[test]
    fn render_listings_then_influx() {
        let run = run();
        let text = render(
            &args(&["--warning", "--error", "--influxdb"]),
            &run,
            &PolicyReport::evaluate(&run),
            &InfluxConfig::default(),
        )
        .unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "WARNING messages: 1");
        assert_eq!(lines[2], "ERROR messages: 0");
        assert!(lines[3].starts_with("vivado_synthesis_overview,"));
        assert!(!text.contains("Summary:"));
    }

    #[test]
    fn escape_tag_values() {
        assert_eq!(escape_tag("a b,c=d"), "a\\ b\\,c\\=d");
    }
}
