//! `credit-scoring` library crate.
//!
//! The binary (`credit`) is a thin wrapper around this library so that:
//!
//! - form mapping and response interpretation are testable without a server
//! - the CLI and TUI share one submission lifecycle
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod debug;
pub mod domain;
pub mod error;
pub mod form;
pub mod io;
pub mod plot;
pub mod predictor;
pub mod report;
pub mod telemetry;
pub mod tui;
