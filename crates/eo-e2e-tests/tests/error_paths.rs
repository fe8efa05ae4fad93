//! E2E tests for error paths: unreadable sources, bad adapters, and
//! lookups against sections or facts a log never produced.

mod helpers;

use std::sync::Arc;

use pretty_assertions::assert_eq;

use eo_vivado::facts::names;
use eo_vivado::{Adapter, FileLogSource, FilterError, LogSource, Processor, Severity};
use helpers::{TestHarness, parse_lines};

#[tokio::test]
async fn e2e_missing_file_fails_before_parsing() {
    let result = FileLogSource.read_lines("/nonexistent/synth_1/toplevel.vds").await;
    assert_eq!(
        result,
        Err(FilterError::SourceNotFound(
            "/nonexistent/synth_1/toplevel.vds".into()
        ))
    );

    let h = TestHarness::empty();
    assert!(h.source.read_lines("/work/none.vds").await.is_err());
}

#[test]
fn e2e_invalid_adapter_is_rejected() {
    let toml = r#"
name = "broken"

[[sections]]
name = "Synthesis"
start = "Start Synthesis"
finish = "Start Synthesis"
"#;
    assert!(matches!(
        Adapter::from_toml_str(toml),
        Err(FilterError::Config(_))
    ));
    assert!(matches!(
        Adapter::from_toml_str("sections = 3"),
        Err(FilterError::Config(_))
    ));

    let mut adapter = Adapter::vivado_synthesis();
    adapter.sections[0].finish.clear();
    assert!(matches!(
        Processor::new(Arc::new(adapter)),
        Err(FilterError::Config(_))
    ));
}

#[test]
fn e2e_custom_adapter_from_toml() {
    let adapter = Adapter::from_toml_str(
        r#"
name = "implementation"

[[sections]]
name = "Placer"
start = "Phase 2 Placer"
finish = "Phase 2 Placer Done"
"#,
    )
    .unwrap();
    let mut processor = Processor::new(Arc::new(adapter)).unwrap();
    let run = processor.parse([
        "Phase 2 Placer",
        "INFO: [Place 30-1] placing",
        "Phase 2 Placer Done",
        "Start Writing Synthesis Report",
    ]);

    assert_eq!(run.adapter_name(), "implementation");
    let placer = run.section("Placer").unwrap();
    assert!(placer.expected);
    assert_eq!(placer.end_line, Some(3));
    assert_eq!(placer.count(Severity::Info), 1);

    // Unknown to this adapter, but still bounded by the generic keywords.
    let report = run.section("Writing Synthesis Report").unwrap();
    assert!(!report.expected);
    assert!(!report.is_terminated());
}

#[test]
fn e2e_absent_section_and_facts() {
    let run = parse_lines(&[
        "Start Part Resource Summary",
        "Part Resources:",
        "Finished Part Resource Summary",
    ]);

    assert_eq!(
        run.section("Writing Synthesis Report").unwrap_err(),
        FilterError::SectionNotFound("Writing Synthesis Report".into())
    );
    assert!(matches!(
        run.fact("Part Resource Summary", names::DURATION),
        Err(FilterError::FactNotFound { .. })
    ));

    let summary = run.section("Part Resource Summary").unwrap();
    assert!(summary.is_terminated());
    assert!(summary.facts.is_empty());
    assert_eq!(run.tool_version(), None);
    assert_eq!(run.start_time(), None);
}

#[tokio::test]
async fn e2e_fact_type_mismatch() {
    let run = TestHarness::with_sample_log().sample_run().await;
    let part = run.section("Loading Part and Timing Information").unwrap();

    assert_eq!(
        part.seconds(names::PART),
        Err(FilterError::FactType {
            section: "Loading Part and Timing Information".into(),
            fact: names::PART.into(),
            expected: "seconds",
        })
    );
    assert!(part.counts(names::DURATION).is_err());
}

#[test]
fn e2e_garbage_input_never_fails() {
    let run = parse_lines(&[
        "",
        "Finished Nothing",
        "CRITICAL WARNING: [Synth 8-x] bad id",
        "ERROR: [Synth 8-0123] leading zero",
        "|1|LD|3|",
        "Loading part: xc7a35t",
    ]);

    assert!(run.messages().is_empty());
    assert!(run.sections().is_empty());
    assert_eq!(run.irregular_lines(), &[3, 4]);
    assert_eq!(run.discarded_lines(), 1);
    assert_eq!(run.line_count(), 6);
}
