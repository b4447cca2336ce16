//! ---
//! sb_section: "05-external-interfaces"
//! sb_subsection: "binary"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Benchmark invocation: configuration layering and dispatch."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, ValueEnum};
use spawnbench_common::config::{BenchConfig, Mode};
use spawnbench_common::logging::{init_tracing, LogFormat};
use spawnbench_harness::{Console, Harness, HarnessConfig};
use spawnbench_logging::{log_scenario_event, LogContext, ScenarioEventOutcome};
use tracing::info;

const DEFAULT_CONFIG_CANDIDATES: &[&str] = &["spawnbench.toml", "configs/spawnbench.toml"];

#[derive(Debug, Args)]
pub struct RunArgs {
    /// TOML configuration file (defaults to ./spawnbench.toml or SPAWNBENCH_CONFIG).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of child invocations per scenario.
    #[arg(short = 'n', long, value_name = "N")]
    count: Option<usize>,

    /// Scenario(s) to run.
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Cap on simultaneously running children in the concurrent scenario.
    #[arg(long = "max-in-flight", value_name = "N")]
    max_in_flight: Option<usize>,

    /// Print every child's captured stdout after the scenarios finish.
    #[arg(long = "capture-output")]
    capture_output: bool,

    /// Preferred diagnostic log format.
    #[arg(long = "log-format", value_enum)]
    log_format: Option<LogFormatArg>,

    /// Directory for a rolling diagnostic log file.
    #[arg(long = "log-directory", value_name = "DIR")]
    log_directory: Option<PathBuf>,

    /// Target program and its arguments, replacing the configured target.
    #[arg(last = true, value_name = "PROGRAM")]
    target: Vec<String>,
}

impl RunArgs {
    fn load_config(&self) -> Result<(BenchConfig, Option<PathBuf>)> {
        let (mut config, source) = match &self.config {
            Some(path) => {
                if !path.exists() {
                    return Err(anyhow!("config file {} does not exist", path.display()));
                }
                (BenchConfig::from_file(path)?, Some(path.clone()))
            }
            None => {
                let loaded = BenchConfig::load_with_source(DEFAULT_CONFIG_CANDIDATES)?;
                (loaded.config, loaded.source)
            }
        };
        self.apply_overrides(&mut config);
        config
            .validate()
            .with_context(|| "invalid benchmark configuration")?;
        Ok((config, source))
    }

    fn apply_overrides(&self, config: &mut BenchConfig) {
        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if self.max_in_flight.is_some() {
            config.max_in_flight = self.max_in_flight;
        }
        if self.capture_output {
            config.capture_output = true;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format.into();
        }
        if self.log_directory.is_some() {
            config.logging.directory = self.log_directory.clone();
        }
        if let Some((program, args)) = self.target.split_first() {
            config.target.program = program.clone();
            config.target.args = args.to_vec();
        }
    }
}

/// Load configuration, run the selected scenarios, and report on stdout.
///
/// A child exiting non-zero is reported but does not fail the process.
pub async fn execute(args: RunArgs) -> Result<()> {
    let (config, source) = args.load_config()?;
    init_tracing(env!("CARGO_PKG_NAME"), &config.logging)?;
    match &source {
        Some(path) => info!(config_path = %path.display(), "configuration loaded"),
        None => info!("using built-in configuration defaults"),
    }

    let mut harness = Harness::new(HarnessConfig::from(&config), Console::stdout());
    info!(
        count = harness.config().count,
        mode = %harness.config().mode,
        max_in_flight = ?harness.config().max_in_flight,
        "starting benchmark"
    );
    let reports = harness
        .run()
        .await
        .with_context(|| format!("benchmark of `{}` aborted", config.target.program))?;

    let mut console = Console::stdout();
    for output in reports.iter().flat_map(|report| &report.outputs) {
        console
            .captured(output)
            .with_context(|| "failed to print captured output")?;
    }

    for report in &reports {
        let ctx = LogContext::new()
            .with_scenario(report.scenario.as_str())
            .with_mode(config.mode.as_str());
        let (message, outcome) = match report.failure() {
            Some(failure) => (
                format!("child #{} failed after {} launches", failure.index, report.launched),
                ScenarioEventOutcome::Fault,
            ),
            None => (
                format!(
                    "{} children in {:.3}s",
                    report.launched,
                    report.elapsed.as_secs_f64()
                ),
                ScenarioEventOutcome::Success,
            ),
        };
        log_scenario_event(Some(&ctx), "run.summary", &message, outcome);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Serial,
    Concurrent,
    Both,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Serial => Mode::Serial,
            ModeArg::Concurrent => Mode::Concurrent,
            ModeArg::Both => Mode::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    StructuredJson,
    Pretty,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::StructuredJson => LogFormat::StructuredJson,
            LogFormatArg::Pretty => LogFormat::Pretty,
        }
    }
}
