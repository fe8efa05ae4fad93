//! Shared harness for E2E tests.
//!
//! Reads logs through a `LogSource` and parses them with a built-in
//! Vivado adapter, the same path the CLI takes.

#![allow(dead_code)]

use std::sync::Arc;

use eo_vivado::mock::{IMPLEMENTATION_SAMPLE_PATH, SYNTHESIS_SAMPLE_PATH};
use eo_vivado::{Adapter, LogSource, MockLogSource, ProcessingRun, Processor};

/// Sample-backed log source plus a shared adapter.
pub struct TestHarness {
    pub source: MockLogSource,
    pub adapter: Arc<Adapter>,
    pub sample_path: &'static str,
}

impl TestHarness {
    /// Harness serving the stopwatch synthesis log.
    pub fn with_sample_log() -> Self {
        Self {
            source: MockLogSource::with_synthesis_sample(),
            adapter: Arc::new(Adapter::vivado_synthesis()),
            sample_path: SYNTHESIS_SAMPLE_PATH,
        }
    }

    /// Harness serving the stopwatch implementation log.
    pub fn with_implementation_log() -> Self {
        Self {
            source: MockLogSource::with_implementation_sample(),
            adapter: Arc::new(Adapter::vivado_implementation()),
            sample_path: IMPLEMENTATION_SAMPLE_PATH,
        }
    }

    /// Harness with no files loaded.
    pub fn empty() -> Self {
        Self {
            source: MockLogSource::new(),
            adapter: Arc::new(Adapter::vivado_synthesis()),
            sample_path: SYNTHESIS_SAMPLE_PATH,
        }
    }

    pub fn processor(&self) -> Processor {
        Processor::new(self.adapter.clone()).unwrap()
    }

    pub async fn sample_lines(&self) -> Vec<String> {
        self.source.read_lines(self.sample_path).await.unwrap()
    }

    /// Read `path` from the harness source and parse it.
    pub async fn parse_path(&self, path: &str) -> ProcessingRun {
        let lines = self.source.read_lines(path).await.unwrap();
        let mut processor = self.processor();
        processor.parse(lines);
        processor.into_run()
    }

    pub async fn sample_run(&self) -> ProcessingRun {
        self.parse_path(self.sample_path).await
    }
}

/// Parse literal lines with the built-in adapter.
pub fn parse_lines(lines: &[&str]) -> ProcessingRun {
    let mut processor = Processor::vivado_synthesis().unwrap();
    processor.parse(lines.iter().copied());
    processor.into_run()
}
