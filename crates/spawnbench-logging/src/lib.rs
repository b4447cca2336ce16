//! ---
//! sb_section: "03-logging"
//! sb_subsection: "module"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Structured logging context and scenario events."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
#![warn(missing_docs)]
//! Scenario-aware logging helpers for spawnbench.

use tracing::Level;
use tracing_subscriber::{fmt as subscriber_fmt, prelude::*, EnvFilter, Registry};

pub mod macros;

/// Initialize a baseline tracing subscriber suitable for tests and development.
pub fn init() {
    let _ = Registry::default()
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(subscriber_fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Structured logging context propagated by the convenience macros.
#[derive(Debug, Default, Clone)]
pub struct LogContext<'a> {
    /// Scenario name (`serial`, `concurrent`).
    pub scenario: Option<&'a str>,
    /// Launch index of the child the event refers to.
    pub index: Option<usize>,
    /// Configured run mode.
    pub mode: Option<&'a str>,
}

impl<'a> LogContext<'a> {
    /// Create an empty logging context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a scenario name.
    pub fn with_scenario(mut self, scenario: &'a str) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Attach a child launch index.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Attach the run mode.
    pub fn with_mode(mut self, mode: &'a str) -> Self {
        self.mode = Some(mode);
        self
    }
}

/// Outcome attached to scenario lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioEventOutcome {
    /// The scenario (or step) completed normally.
    Success,
    /// A child exited non-zero.
    Fault,
}

impl ScenarioEventOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            ScenarioEventOutcome::Success => "success",
            ScenarioEventOutcome::Fault => "fault",
        }
    }
}

/// Emit a standardized scenario event with a success/fault outcome.
pub fn log_scenario_event(
    context: Option<&LogContext>,
    event: &str,
    message: &str,
    outcome: ScenarioEventOutcome,
) {
    let default = LogContext::default();
    let ctx = context.unwrap_or(&default);
    let fields = (
        outcome.as_str(),
        ctx.scenario.unwrap_or(""),
        ctx.index.unwrap_or_default(),
        ctx.mode.unwrap_or(""),
    );
    // `tracing::event!` needs a constant level.
    match outcome {
        ScenarioEventOutcome::Fault => tracing::event!(
            Level::ERROR,
            event,
            outcome = fields.0,
            scenario = fields.1,
            index = fields.2,
            mode = fields.3,
            message = %message
        ),
        ScenarioEventOutcome::Success => tracing::event!(
            Level::INFO,
            event,
            outcome = fields.0,
            scenario = fields.1,
            index = fields.2,
            mode = fields.3,
            message = %message
        ),
    }
}
