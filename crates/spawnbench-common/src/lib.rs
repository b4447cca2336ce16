//! ---
//! sb_section: "01-core-functionality"
//! sb_subsection: "module"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Shared primitives and utilities for the benchmark harness."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
//! Shared primitives for the spawnbench workspace.
//! This crate exposes configuration loading, tracing initialisation, and
//! clock helpers consumed by the harness and the control binary.

pub mod config;
pub mod logging;
pub mod time;

pub use config::{BenchConfig, LoadedBenchConfig, LoggingConfig, Mode, TargetConfig};
pub use logging::{init_tracing, LogFormat};
