//! ---
//! sb_section: "02-harness"
//! sb_subsection: "module"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Concurrent-launch scenario."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
use std::process::Output;

use spawnbench_common::time::{duration_to_micros, monotonic_now};
use spawnbench_logging::{
    bench_debug, bench_error, log_scenario_event, LogContext, ScenarioEventOutcome,
};
use tokio::process::Child;
use tokio::task::JoinHandle;

use crate::console::Console;
use crate::error::{HarnessError, Result};
use crate::harness::HarnessConfig;
use crate::limiter::{LaunchLimiter, LaunchSlot};
use crate::report::{CapturedOutput, ChildFailure, ScenarioKind, ScenarioOutcome, ScenarioReport};

/// Reapers for launched children, joined strictly in launch order.
///
/// Each child is owned by its own task so its pipes keep draining while an
/// earlier child is still being waited on.
#[derive(Debug)]
struct ReapQueue {
    reapers: Vec<JoinHandle<std::io::Result<Output>>>,
}

impl ReapQueue {
    fn new() -> Self {
        Self {
            reapers: Vec::new(),
        }
    }

    fn push(&mut self, child: Child, slot: LaunchSlot) {
        let handle = tokio::spawn(async move {
            let output = child.wait_with_output().await;
            drop(slot);
            output
        });
        self.reapers.push(handle);
    }

    fn len(&self) -> usize {
        self.reapers.len()
    }

    fn into_ordered(self) -> impl Iterator<Item = (usize, JoinHandle<std::io::Result<Output>>)> {
        self.reapers.into_iter().enumerate()
    }
}

/// Launch the target `count` times without waiting, then wait on every child
/// in launch order.
///
/// Every launched child is waited on. Exit statuses are checked after the
/// wait; the first non-zero child in launch order makes the outcome
/// [`ScenarioOutcome::Failed`].
pub async fn run_concurrent(
    config: &HarnessConfig,
    console: &mut Console,
) -> Result<ScenarioReport> {
    let scenario = ScenarioKind::Concurrent;
    let ctx = LogContext::new().with_scenario(scenario.as_str());
    let limiter = LaunchLimiter::new(config.max_in_flight);
    console.header(scenario)?;
    log_scenario_event(
        Some(&ctx),
        "scenario.start",
        &match config.max_in_flight {
            Some(max) => format!("launching {} children, at most {} in flight", config.count, max),
            None => format!("launching {} children without a bound", config.count),
        },
        ScenarioEventOutcome::Success,
    );

    let start = monotonic_now();
    // Grows per launch; `count` is caller-supplied and may be huge.
    let mut queue = ReapQueue::new();
    for index in 0..config.count {
        let slot = limiter.acquire().await?;
        let child = config.target.spawn()?;
        bench_debug!(context = ctx.clone().with_index(index), "child launched");
        queue.push(child, slot);
        console.launched(index)?;
    }
    let launched = queue.len();

    let mut waited = 0;
    let mut outputs = Vec::new();
    let mut first_failure = None;
    for (index, reaper) in queue.into_ordered() {
        console.waiting(index)?;
        let output = reaper
            .await
            .map_err(|source| HarnessError::Join { index, source })?
            .map_err(|source| HarnessError::Wait { index, source })?;
        waited += 1;

        let step = ctx.clone().with_index(index);
        if output.status.success() {
            bench_debug!(context = step, "child reaped");
        } else {
            bench_error!(context = step, "child exited with {}", output.status);
            if first_failure.is_none() {
                first_failure = Some(ChildFailure::from_output(index, &output));
            }
        }
        if config.capture_output {
            outputs.push(CapturedOutput::from_output(index, output));
        }
    }

    let elapsed = start.elapsed();
    let outcome = match first_failure {
        Some(failure) => {
            console.failure(&failure)?;
            log_scenario_event(
                Some(&ctx),
                "scenario.failed",
                &format!("child #{} exited unsuccessfully", failure.index),
                ScenarioEventOutcome::Fault,
            );
            ScenarioOutcome::Failed(failure)
        }
        None => {
            console.duration(elapsed)?;
            log_scenario_event(
                Some(&ctx),
                "scenario.complete",
                &format!("{} children in {}us", waited, duration_to_micros(elapsed)),
                ScenarioEventOutcome::Success,
            );
            ScenarioOutcome::Completed
        }
    };

    Ok(ScenarioReport {
        scenario,
        launched,
        waited,
        elapsed,
        outcome,
        outputs,
    })
}
