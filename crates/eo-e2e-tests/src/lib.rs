//! End-to-end tests for the Vivado log filter live under `tests/`.
//!
//! They drive log acquisition, parsing, policy checks and the CLI report
//! renderers together against a realistic synthesis log.
