//! ---
//! sb_section: "01-core-functionality"
//! sb_subsection: "module"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Benchmark configuration model and loader."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;

fn default_count() -> usize {
    15
}

fn default_mode() -> Mode {
    Mode::Concurrent
}

fn default_program() -> String {
    "python".to_owned()
}

fn default_args() -> Vec<String> {
    vec!["helloworld.py".to_owned()]
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

/// Primary configuration object for a benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BenchConfig {
    /// Number of child invocations per scenario.
    #[serde(default = "default_count")]
    pub count: usize,
    /// Which scenario(s) to run.
    #[serde(default = "default_mode")]
    pub mode: Mode,
    /// Upper bound on simultaneously running children in the concurrent
    /// scenario. `None` leaves launches unbounded.
    #[serde(default)]
    pub max_in_flight: Option<usize>,
    /// Keep every child's stdout/stderr in the scenario report.
    #[serde(default)]
    pub capture_output: bool,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where a [`BenchConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedBenchConfig {
    pub config: BenchConfig,
    /// `None` when no file was found and built-in defaults are in effect.
    pub source: Option<PathBuf>,
}

impl BenchConfig {
    pub const ENV_CONFIG_PATH: &str = "SPAWNBENCH_CONFIG";

    /// Load configuration from disk, respecting the `SPAWNBENCH_CONFIG` override.
    ///
    /// Falls back to [`BenchConfig::default`] when neither the environment
    /// override nor any candidate exists. The result is not validated so that
    /// callers can layer overrides first; call [`BenchConfig::validate`] after.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedBenchConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_file(&path)?;
                return Ok(LoadedBenchConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            let path = candidate.as_ref();
            if path.exists() {
                let config = Self::from_file(path)?;
                return Ok(LoadedBenchConfig {
                    config,
                    source: Some(path.to_path_buf()),
                });
            }
        }

        Ok(LoadedBenchConfig {
            config: Self::default(),
            source: None,
        })
    }

    /// Parse a specific file, bypassing the environment override.
    ///
    /// Like [`BenchConfig::load_with_source`] this does not validate.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<BenchConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.target.validate()?;
        if self.max_in_flight == Some(0) {
            return Err(anyhow!("max_in_flight must be at least 1 when set"));
        }
        Ok(())
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            mode: default_mode(),
            max_in_flight: None,
            capture_output: false,
            target: TargetConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl std::str::FromStr for BenchConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: BenchConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Scenario selection.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Launch and wait on one child at a time.
    Serial,
    /// Launch every child, then wait on each in launch order.
    #[default]
    Concurrent,
    /// Serial first, then concurrent.
    Both,
}

impl Mode {
    pub fn runs_serial(&self) -> bool {
        matches!(self, Mode::Serial | Mode::Both)
    }

    pub fn runs_concurrent(&self) -> bool {
        matches!(self, Mode::Concurrent | Mode::Both)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Serial => "serial",
            Mode::Concurrent => "concurrent",
            Mode::Both => "both",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "serial" => Ok(Mode::Serial),
            "concurrent" => Ok(Mode::Concurrent),
            "both" => Ok(Mode::Both),
            other => Err(format!("unknown mode: {}", other)),
        }
    }
}

/// The external program whose invocation is being benchmarked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            working_dir: None,
        }
    }
}

impl TargetConfig {
    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(anyhow!("target program cannot be empty"));
        }
        if let Some(dir) = &self.working_dir {
            if !dir.is_dir() {
                return Err(anyhow!(
                    "target working_dir {} does not exist or is not a directory",
                    dir.display()
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Directory for the rolling log file. No file is written when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            directory: None,
            file_prefix: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_reproduce_reference_wiring() {
        let config = BenchConfig::default();
        assert_eq!(config.count, 15);
        assert_eq!(config.mode, Mode::Concurrent);
        assert_eq!(config.max_in_flight, None);
        assert_eq!(config.target.program, "python");
        assert_eq!(config.target.args, vec!["helloworld.py".to_owned()]);
    }

    #[test]
    fn parses_partial_toml() {
        let config: BenchConfig = r#"
            count = 4
            mode = "serial"

            [target]
            program = "sh"
            args = ["-c", "exit 0"]
        "#
        .parse()
        .unwrap();
        assert_eq!(config.count, 4);
        assert_eq!(config.mode, Mode::Serial);
        assert_eq!(config.target.args, vec!["-c", "exit 0"]);
        assert!(!config.capture_output);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn rejects_zero_in_flight_bound() {
        let err = "max_in_flight = 0".parse::<BenchConfig>().unwrap_err();
        assert!(err.to_string().contains("max_in_flight"));
    }

    #[test]
    fn rejects_empty_program() {
        let err = "[target]\nprogram = \"  \"".parse::<BenchConfig>().unwrap_err();
        assert!(err.to_string().contains("program"));
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("BOTH".parse::<Mode>().unwrap(), Mode::Both);
        assert!("parallel".parse::<Mode>().is_err());
        assert!(Mode::Both.runs_serial() && Mode::Both.runs_concurrent());
        assert!(!Mode::Serial.runs_concurrent());
    }

    #[test]
    fn load_picks_first_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let present = dir.path().join("bench.toml");
        let mut file = fs::File::create(&present).unwrap();
        writeln!(file, "count = 2\nmax_in_flight = 1").unwrap();

        let loaded = BenchConfig::load_with_source(&[&missing, &present]).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(present.as_path()));
        assert_eq!(loaded.config.count, 2);
        assert_eq!(loaded.config.max_in_flight, Some(1));
    }

    #[test]
    fn file_values_are_validated_only_after_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.toml");
        fs::write(&path, "max_in_flight = 0\n").unwrap();

        let mut config = BenchConfig::from_file(&path).unwrap();
        assert_eq!(config.max_in_flight, Some(0));
        assert!(config.validate().is_err());

        config.max_in_flight = Some(2);
        config.validate().unwrap();
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = BenchConfig::load_with_source(&[dir.path().join("nope.toml")]).unwrap();
        assert!(loaded.source.is_none());
        assert_eq!(loaded.config, BenchConfig::default());
    }
}
