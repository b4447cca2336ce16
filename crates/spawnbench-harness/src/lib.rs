//! ---
//! sb_section: "02-harness"
//! sb_subsection: "01-bootstrap"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Benchmark harness exports."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
//! Launches a target program repeatedly and times two strategies:
//! waiting on each child before the next ([`run_serial`]) and launching
//! every child before waiting on any of them ([`run_concurrent`]).

pub mod concurrent;
pub mod console;
pub mod error;
pub mod harness;
pub mod limiter;
pub mod report;
pub mod serial;
pub mod target;

pub use concurrent::run_concurrent;
pub use console::{Console, ConsoleBuffer};
pub use error::{HarnessError, Result};
pub use harness::{Harness, HarnessConfig};
pub use limiter::{LaunchLimiter, LaunchSlot};
pub use report::{CapturedOutput, ChildFailure, ScenarioKind, ScenarioOutcome, ScenarioReport};
pub use serial::run_serial;
pub use target::TargetProgram;
