//! ---
//! sb_section: "02-harness"
//! sb_subsection: "module"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "The benchmarked target program."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::process::{Output, Stdio};

use spawnbench_common::TargetConfig;
use tokio::process::{Child, Command};

use crate::error::{HarnessError, Result};

/// Fixed command line launched once per iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetProgram {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl TargetProgram {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    /// Launch without waiting; stdout and stderr are piped.
    pub fn spawn(&self) -> Result<Child> {
        self.command().spawn().map_err(|source| self.spawn_error(source))
    }

    /// Launch and wait for completion, capturing both streams.
    ///
    /// A launch failure is [`HarnessError::Spawn`]; a failure while waiting
    /// on or reading from the child is [`HarnessError::Wait`] for `index`.
    pub async fn run_to_completion(&self, index: usize) -> Result<Output> {
        self.spawn()?
            .wait_with_output()
            .await
            .map_err(|source| HarnessError::Wait { index, source })
    }

    fn spawn_error(&self, source: std::io::Error) -> HarnessError {
        HarnessError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl From<&TargetConfig> for TargetProgram {
    fn from(config: &TargetConfig) -> Self {
        let target = TargetProgram::new(config.program.clone(), config.args.iter().cloned());
        match &config.working_dir {
            Some(dir) => target.with_working_dir(dir.clone()),
            None => target,
        }
    }
}
