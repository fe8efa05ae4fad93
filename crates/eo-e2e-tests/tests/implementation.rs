//! E2E tests over the stopwatch implementation log: command scopes, task
//! sections, numbered phases and constraint files.

mod helpers;

use pretty_assertions::assert_eq;

use eo_vivado::facts::names;
use eo_vivado::mock::IMPLEMENTATION_SAMPLE_PATH;
use eo_vivado::{CommandOutcome, FilterError, LogSource, Severity, ToolVersion};
use helpers::TestHarness;

#[tokio::test]
async fn e2e_implementation_overview() {
    let run = TestHarness::with_implementation_log().sample_run().await;

    assert_eq!(run.adapter_name(), "vivado-implementation");
    assert_eq!(run.line_count(), 245);
    assert_eq!(run.tool_version(), Some(ToolVersion::new(2025, 1, 0)));
    assert_eq!(run.messages().len(), 44);
    assert_eq!(
        [
            run.count(Severity::Info),
            run.count(Severity::Warning),
            run.count(Severity::CriticalWarning),
            run.count(Severity::Error),
        ],
        [41, 2, 1, 0]
    );
    // `[DRC CFGBVS-1]` has no numeric tool ID.
    assert_eq!(run.irregular_lines(), &[235]);
    assert_eq!(run.preamble().first_line, Some(1));
    assert_eq!(run.preamble().last_line, Some(12));
    assert!(run.epilogue().is_empty());
}

#[tokio::test]
async fn e2e_implementation_command_scopes() {
    let run = TestHarness::with_implementation_log().sample_run().await;

    let summary: Vec<(&str, usize, usize, Option<f64>)> = run
        .command_scopes()
        .iter()
        .map(|c| (c.command.as_str(), c.start_line, c.last_line, c.duration()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("link_design", 13, 33, Some(8.0)),
            ("opt_design", 34, 109, Some(11.0)),
            ("place_design", 110, 167, Some(10.0)),
            ("phys_opt_design", 168, 180, Some(1.0)),
            ("route_design", 181, 229, Some(17.0)),
            ("write_bitstream", 230, 245, Some(14.0)),
        ]
    );
    assert!(
        run.command_scopes()
            .iter()
            .all(|c| c.outcome == CommandOutcome::Succeeded)
    );

    let opt = run.command_scope("opt_design").unwrap();
    assert_eq!(opt.end_line, Some(108));
    assert_eq!(opt.sections, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(run.command_messages(opt).count(), 13);

    let bitstream = run.command_scope("write_bitstream").unwrap();
    assert_eq!(bitstream.arguments, vec!["-force", "toplevel.bit"]);
    assert!(bitstream.sections.is_empty());
    assert_eq!(bitstream.count(Severity::Info), 6);

    // Per-command counts add up to the run's totals.
    let per_command: usize = run.command_scopes().iter().map(|c| c.messages.len()).sum();
    assert_eq!(per_command, run.messages().len());

    assert_eq!(
        run.command_scope("synth_design").unwrap_err(),
        FilterError::CommandNotFound("synth_design".into())
    );
}

#[tokio::test]
async fn e2e_implementation_task_sections() {
    let run = TestHarness::with_implementation_log().sample_run().await;

    let tasks: Vec<(&str, usize, Option<usize>)> = run
        .sections()
        .iter()
        .map(|s| (s.name.as_str(), s.start_line, s.end_line))
        .collect();
    assert_eq!(
        tasks,
        vec![
            ("DRC Task", 39, Some(44)),
            ("Cache Timing Information Task", 46, Some(48)),
            ("Logic Optimization Task", 52, Some(83)),
            ("Power Optimization Task", 87, Some(92)),
            ("Final Cleanup Task", 96, Some(97)),
            ("Netlist Obfuscation Task", 101, Some(103)),
            ("Placer Task", 118, Some(161)),
            ("Initial Update Timing Task", 172, Some(174)),
            ("Routing Task", 189, Some(223)),
        ]
    );
    assert!(run.sections().iter().all(|s| s.expected));

    // Timing printed on the finish line itself.
    assert_eq!(run.section("DRC Task").unwrap().duration(), Some(0.4));
    assert_eq!(
        run.section("Initial Update Timing Task").unwrap().duration(),
        Some(0.8)
    );

    // Timing printed after a blank line following `Ending ... | Checksum:`.
    let placer = run.section("Placer Task").unwrap();
    assert_eq!(placer.duration(), Some(9.0));
    assert_eq!(placer.last_line, 163);
    assert_eq!(placer.count(Severity::Warning), 1);
    assert_eq!(
        run.section("Logic Optimization Task").unwrap().duration(),
        Some(0.128)
    );

    let power = run.section("Power Optimization Task").unwrap();
    assert_eq!(
        power.facts.get(names::SUBSECTIONS).and_then(|f| f.as_names()),
        Some(&["PowerOpt Patch Enables Task".to_string()][..])
    );
}

#[tokio::test]
async fn e2e_implementation_phases() {
    let run = TestHarness::with_implementation_log().sample_run().await;

    let placer = run.section("Placer Task").unwrap();
    let phases = placer.facts.get(names::PHASES).and_then(|f| f.as_names()).unwrap();
    assert_eq!(
        phases,
        &[
            "1 Placer Initialization",
            "1.1 Placer Initialization Netlist Sorting",
            "1.2 IO Placement/ Clock Placement/ Build Placer Device",
            "2 Global Placement",
            "2.1 Floorplanning",
            "2.2 Global Placement Core",
            "3 Detail Placement",
            "4 Post Placement Optimization and Clean-Up",
        ]
    );

    let routing = run.section("Routing Task").unwrap();
    let phases = routing.facts.get(names::PHASES).and_then(|f| f.as_names()).unwrap();
    assert_eq!(phases.len(), 6);
    assert_eq!(phases[4], "4.1 Global Iteration 0");

    assert!(!run.section("DRC Task").unwrap().facts.contains(names::PHASES));
}

#[tokio::test]
async fn e2e_implementation_constraint_files() {
    let run = TestHarness::with_implementation_log().sample_run().await;

    let link = run.command_scope("link_design").unwrap();
    let files: Vec<(&str, usize, Option<usize>)> = link
        .xdc_files
        .iter()
        .map(|f| (f.path.as_str(), f.start_line, f.end_line))
        .collect();
    assert_eq!(
        files,
        vec![
            ("/work/stopwatch/constraints/Clock.xdc", 22, Some(24)),
            ("/work/stopwatch/constraints/Arty-A7-35.xdc", 25, Some(27)),
        ]
    );

    let clock = &link.xdc_files[0];
    assert_eq!(clock.messages.len(), 1);
    let message = &run.messages()[clock.messages[0]];
    assert_eq!(message.severity, Severity::CriticalWarning);
    assert_eq!(message.line_number, 23);
    assert_eq!(link.count(Severity::Warning), 1);
}

#[tokio::test]
async fn e2e_synthesis_adapter_on_implementation_log() {
    // No section of the synthesis adapter matches; tasks still show up as
    // unexpected sections and command scopes are tracked regardless.
    let h = TestHarness::with_implementation_log();
    let lines = h.source.read_lines(IMPLEMENTATION_SAMPLE_PATH).await.unwrap();
    let mut processor = eo_vivado::Processor::vivado_synthesis().unwrap();
    let run = processor.parse(lines);

    assert_eq!(run.command_scopes().len(), 6);
    assert!(run.sections().iter().all(|s| !s.expected));
    assert!(run.section("Placer Task").unwrap().is_terminated());
    assert!(!run.section("Placer Task").unwrap().facts.contains(names::PHASES));
}
