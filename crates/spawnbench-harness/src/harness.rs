//! ---
//! sb_section: "02-harness"
//! sb_subsection: "module"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Harness configuration and scenario dispatch."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
use spawnbench_common::{BenchConfig, Mode};
use spawnbench_logging::{bench_info, LogContext};

use crate::concurrent::run_concurrent;
use crate::console::Console;
use crate::error::{HarnessError, Result};
use crate::report::ScenarioReport;
use crate::serial::run_serial;
use crate::target::TargetProgram;

/// Everything a scenario needs, injected by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub count: usize,
    pub mode: Mode,
    /// Concurrent scenario only.
    pub max_in_flight: Option<usize>,
    pub capture_output: bool,
    pub target: TargetProgram,
}

impl HarnessConfig {
    pub fn new(count: usize, mode: Mode, target: TargetProgram) -> Self {
        Self {
            count,
            mode,
            max_in_flight: None,
            capture_output: false,
            target,
        }
    }

    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = Some(max);
        self
    }

    pub fn with_capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_in_flight == Some(0) {
            return Err(HarnessError::InvalidConfig(
                "max_in_flight must be at least 1".into(),
            ));
        }
        if self.target.program().trim().is_empty() {
            return Err(HarnessError::InvalidConfig(
                "target program cannot be empty".into(),
            ));
        }
        Ok(())
    }
}

impl From<&BenchConfig> for HarnessConfig {
    fn from(config: &BenchConfig) -> Self {
        Self {
            count: config.count,
            mode: config.mode,
            max_in_flight: config.max_in_flight,
            capture_output: config.capture_output,
            target: TargetProgram::from(&config.target),
        }
    }
}

/// Runs the scenario(s) selected by [`HarnessConfig::mode`].
#[derive(Debug)]
pub struct Harness {
    config: HarnessConfig,
    console: Console,
}

impl Harness {
    pub fn new(config: HarnessConfig, console: Console) -> Self {
        Self { config, console }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Serial first when both are selected. A failed scenario does not stop
    /// the next one.
    pub async fn run(&mut self) -> Result<Vec<ScenarioReport>> {
        self.config.validate()?;
        let mode = self.config.mode;
        bench_info!(
            context = LogContext::new().with_mode(mode.as_str()),
            "running {} x `{}`",
            self.config.count,
            self.config.target.program()
        );

        let mut reports = Vec::with_capacity(2);
        if mode.runs_serial() {
            reports.push(run_serial(&self.config, &mut self.console).await?);
        }
        if mode.runs_concurrent() {
            reports.push(run_concurrent(&self.config, &mut self.console).await?);
        }
        Ok(reports)
    }
}
