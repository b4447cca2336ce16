//! ---
//! sb_section: "02-harness"
//! sb_subsection: "module"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Per-scenario results returned to the caller."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
use std::fmt;
use std::process::{ExitStatus, Output};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    Serial,
    Concurrent,
}

impl ScenarioKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::Serial => "serial",
            ScenarioKind::Concurrent => "concurrent",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A child that exited unsuccessfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildFailure {
    /// Zero-based launch index.
    pub index: usize,
    /// `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ChildFailure {
    pub(crate) fn from_output(index: usize, output: &Output) -> Self {
        Self {
            index,
            code: output.status.code(),
            stdout: output.stdout.clone(),
            stderr: output.stderr.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    Completed,
    /// Stands in for a normal result when a child exited non-zero.
    Failed(ChildFailure),
}

/// Raw streams of one child, kept when output capture is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub index: usize,
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    pub(crate) fn from_output(index: usize, output: Output) -> Self {
        Self {
            index,
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub scenario: ScenarioKind,
    /// Children actually launched.
    pub launched: usize,
    /// Children waited on to completion.
    pub waited: usize,
    pub elapsed: Duration,
    pub outcome: ScenarioOutcome,
    /// Empty unless output capture is enabled; launch order.
    pub outputs: Vec<CapturedOutput>,
}

impl ScenarioReport {
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, ScenarioOutcome::Failed(_))
    }

    pub fn failure(&self) -> Option<&ChildFailure> {
        match &self.outcome {
            ScenarioOutcome::Failed(failure) => Some(failure),
            ScenarioOutcome::Completed => None,
        }
    }
}
