//! Command-line front end for the Vivado log filter.
//!
//! The binary (`eo-filter`) reads a log through a `LogSource`, runs the
//! `Processor` over it and prints accessor contents; the pieces live here
//! so they can be tested without spawning the binary.

pub mod cli;
pub mod config;
pub mod report;
