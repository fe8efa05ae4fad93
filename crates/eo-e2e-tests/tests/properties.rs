//! E2E checks of properties that hold for any input: severity partition,
//! message round-trip, section order and repeatable finalization.

mod helpers;

use pretty_assertions::assert_eq;

use eo_vivado::classifier::parse_message;
use eo_vivado::mock::SYNTHESIS_SAMPLE;
use eo_vivado::{Boundary, ClassifiedLine, LineClassifier, LogLine, Severity};
use helpers::{TestHarness, parse_lines};

const MIXED: &[&str] = &[
    "INFO: [Synth 8-1] a",
    "Start Technology Mapping",
    "ERROR: [Synth 8-2] b",
    "WARNING: text without a tag",
    "CRITICAL WARNING: [Timing 38-3] c",
    "Finished Technology Mapping",
    "INFO: [runctrl-25] irregular tag",
    "WARNING: [Synth 8-3] d",
    "INFO: [Synth 8-1] e",
];

/// Every message lands in exactly one severity list.
#[tokio::test]
async fn e2e_severity_lists_partition_messages() {
    let sample = TestHarness::with_sample_log().sample_run().await;
    for run in [sample, parse_lines(MIXED)] {
        let total = run.info_messages().len()
            + run.warning_messages().len()
            + run.critical_warning_messages().len()
            + run.error_messages().len();
        assert_eq!(total, run.messages().len());
        assert_eq!(
            Severity::ALL.iter().map(|&s| run.count(s)).sum::<usize>(),
            run.messages().len()
        );
        let grouped: usize = run
            .messages_by_id()
            .tools()
            .iter()
            .flat_map(|t| &t.kinds)
            .map(|k| k.messages.len())
            .sum();
        assert_eq!(grouped, run.messages().len());
    }
}

#[test]
fn e2e_irregular_lines_are_not_messages() {
    let run = parse_lines(MIXED);
    assert_eq!(run.messages().len(), 5);
    assert_eq!(run.irregular_lines(), &[4, 7]);
}

/// Re-rendering a parsed message gives back the source line.
#[test]
fn e2e_messages_round_trip() {
    for (i, text) in SYNTHESIS_SAMPLE.lines().enumerate() {
        if let Some(message) = parse_message(text, i + 1) {
            assert_eq!(message.to_string(), text);
        }
    }

    let run = parse_lines(MIXED);
    for message in run.messages() {
        assert_eq!(
            message.to_string(),
            run.source_line(message).unwrap().text
        );
    }
}

/// Sections are reported in the order their start markers appear.
#[tokio::test]
async fn e2e_sections_keep_input_order() {
    let h = TestHarness::with_sample_log();
    let lines = h.sample_lines().await;
    let run = h.sample_run().await;

    let classifier = LineClassifier::new(&h.adapter).unwrap();
    let mut starts = Vec::new();
    for (i, text) in lines.iter().enumerate() {
        let line = LogLine::new(i + 1, text.clone());
        if let ClassifiedLine::Marker(marker) = classifier.classify(&line) {
            let opens_section = marker.boundary == Boundary::Start
                && run.sections().iter().any(|s| s.start_line == i + 1);
            if opens_section {
                starts.push(i + 1);
            }
        }
    }

    let section_starts: Vec<usize> = run.sections().iter().map(|s| s.start_line).collect();
    assert_eq!(section_starts, starts);
    assert!(section_starts.windows(2).all(|w| w[0] < w[1]));
}

/// The same bounded section yields the same facts in two processors.
#[test]
fn e2e_section_finalization_is_repeatable() {
    let lines = [
        "Start Loading Part and Timing Information",
        "Loading part: xc7a35ticsg324-1L",
        "Finished Loading Part and Timing Information : Time (s): cpu = 00:00:09 ; elapsed = 00:00:10 . Memory (MB): peak = 1183.168 ; gain = 170.867",
    ];
    let first = parse_lines(&lines);
    let second = parse_lines(&lines);

    let a = first.section("Loading Part and Timing Information").unwrap();
    let b = second.section("Loading Part and Timing Information").unwrap();
    assert_eq!(a.facts, b.facts);
    assert_eq!(a.facts.len(), 5);
}

/// Parsing twice on one processor starts from scratch.
#[tokio::test]
async fn e2e_reparse_replaces_previous_run() {
    let h = TestHarness::with_sample_log();
    let mut processor = h.processor();

    processor.parse(h.sample_lines().await);
    assert_eq!(processor.run().messages().len(), 15);

    processor.parse(["INFO: [Synth 8-1] only"]);
    assert_eq!(processor.run().messages().len(), 1);
    assert!(processor.run().sections().is_empty());
    assert_eq!(processor.run().line_count(), 1);
}
