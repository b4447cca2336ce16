//! ---
//! sb_section: "02-harness"
//! sb_subsection: "module"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Unrecovered harness faults."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

/// Faults that terminate a scenario.
///
/// A child exiting non-zero is not one of these; it is reported through
/// [`crate::ScenarioOutcome::Failed`].
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to launch target program `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to wait on child #{index}: {source}")]
    Wait {
        index: usize,
        #[source]
        source: io::Error,
    },
    #[error("waiter task for child #{index} did not complete: {source}")]
    Join {
        index: usize,
        #[source]
        source: tokio::task::JoinError,
    },
    #[error("launch limiter closed")]
    LimiterClosed(#[from] tokio::sync::AcquireError),
    #[error("console write failed: {0}")]
    Console(#[from] io::Error),
    #[error("invalid harness configuration: {0}")]
    InvalidConfig(String),
}
