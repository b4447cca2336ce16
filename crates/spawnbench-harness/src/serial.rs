//! ---
//! sb_section: "02-harness"
//! sb_subsection: "module"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Serial-invocation scenario."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
use spawnbench_common::time::{duration_to_micros, monotonic_now};
use spawnbench_logging::{
    bench_debug, bench_error, log_scenario_event, LogContext, ScenarioEventOutcome,
};

use crate::console::Console;
use crate::error::Result;
use crate::harness::HarnessConfig;
use crate::report::{CapturedOutput, ChildFailure, ScenarioKind, ScenarioOutcome, ScenarioReport};

/// Launch the target `count` times, waiting for each child before the next.
///
/// Stops at the first child that exits non-zero and returns
/// [`ScenarioOutcome::Failed`] without printing a duration line.
pub async fn run_serial(config: &HarnessConfig, console: &mut Console) -> Result<ScenarioReport> {
    let scenario = ScenarioKind::Serial;
    let ctx = LogContext::new().with_scenario(scenario.as_str());
    console.header(scenario)?;
    log_scenario_event(
        Some(&ctx),
        "scenario.start",
        &format!("launching {} children one at a time", config.count),
        ScenarioEventOutcome::Success,
    );

    let start = monotonic_now();
    let mut launched = 0;
    let mut outputs = Vec::new();
    let mut outcome = ScenarioOutcome::Completed;

    for index in 0..config.count {
        let output = config.target.run_to_completion(index).await?;
        launched += 1;
        let step = ctx.clone().with_index(index);

        if !output.status.success() {
            let failure = ChildFailure::from_output(index, &output);
            bench_error!(context = step, "child exited with {}", output.status);
            console.failure(&failure)?;
            if config.capture_output {
                outputs.push(CapturedOutput::from_output(index, output));
            }
            outcome = ScenarioOutcome::Failed(failure);
            break;
        }

        bench_debug!(context = step, "child finished");
        console.finished(index)?;
        if config.capture_output {
            outputs.push(CapturedOutput::from_output(index, output));
        }
    }

    let elapsed = start.elapsed();
    match &outcome {
        ScenarioOutcome::Completed => {
            console.duration(elapsed)?;
            log_scenario_event(
                Some(&ctx),
                "scenario.complete",
                &format!("{} children in {}us", launched, duration_to_micros(elapsed)),
                ScenarioEventOutcome::Success,
            );
        }
        ScenarioOutcome::Failed(failure) => log_scenario_event(
            Some(&ctx),
            "scenario.failed",
            &format!("aborted after child #{}", failure.index),
            ScenarioEventOutcome::Fault,
        ),
    }

    Ok(ScenarioReport {
        scenario,
        launched,
        waited: launched,
        elapsed,
        outcome,
        outputs,
    })
}
