//! ---
//! sb_section: "02-harness"
//! sb_subsection: "module"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Human-readable benchmark output."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use spawnbench_common::time::unix_timestamp;

use crate::report::{CapturedOutput, ChildFailure, ScenarioKind};

/// Line-oriented sink for the progress, duration and failure lines.
pub struct Console {
    writer: Box<dyn Write + Send>,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

impl Console {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Console backed by a shared in-memory buffer.
    pub fn in_memory() -> (Self, ConsoleBuffer) {
        let buffer = ConsoleBuffer::default();
        (Self::new(buffer.clone()), buffer)
    }

    pub fn header(&mut self, scenario: ScenarioKind) -> io::Result<()> {
        self.line(format_args!("Running {} scenario", scenario))
    }

    pub fn launched(&mut self, index: usize) -> io::Result<()> {
        self.line(format_args!("launched #{}: {}", index, unix_timestamp()))
    }

    pub fn waiting(&mut self, index: usize) -> io::Result<()> {
        self.line(format_args!("waiting #{}: {}", index, unix_timestamp()))
    }

    pub fn finished(&mut self, index: usize) -> io::Result<()> {
        self.line(format_args!("finished #{}: {}", index, unix_timestamp()))
    }

    pub fn duration(&mut self, elapsed: Duration) -> io::Result<()> {
        self.line(format_args!("{}", format_duration_line(elapsed)))
    }

    pub fn failure(&mut self, failure: &ChildFailure) -> io::Result<()> {
        self.line(format_args!("{}", format_failure_line(failure)))
    }

    pub fn captured(&mut self, output: &CapturedOutput) -> io::Result<()> {
        self.line(format_args!("{}", format_captured_line(output)))
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) -> io::Result<()> {
        self.writer.write_fmt(args)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

pub fn format_duration_line(elapsed: Duration) -> String {
    format!("--- {} seconds ---", elapsed.as_secs_f64())
}

pub fn format_failure_line(failure: &ChildFailure) -> String {
    let code = match failure.code {
        Some(code) => code.to_string(),
        None => "signal".to_owned(),
    };
    format!(
        "Status: FAIL {} {:?}",
        code,
        String::from_utf8_lossy(&failure.stdout)
    )
}

pub fn format_captured_line(output: &CapturedOutput) -> String {
    format!(
        "output #{} ({}): {:?}",
        output.index,
        output.status,
        String::from_utf8_lossy(&output.stdout)
    )
}

/// Cloneable handle onto the bytes written by an in-memory [`Console`].
#[derive(Debug, Clone, Default)]
pub struct ConsoleBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl ConsoleBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for ConsoleBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_line_format() {
        assert_eq!(
            format_duration_line(Duration::from_millis(1500)),
            "--- 1.5 seconds ---"
        );
        assert_eq!(format_duration_line(Duration::ZERO), "--- 0 seconds ---");
    }

    #[test]
    fn failure_line_names_code_and_output() {
        let failure = ChildFailure {
            index: 0,
            code: Some(3),
            stdout: b"partial\n".to_vec(),
            stderr: Vec::new(),
        };
        assert_eq!(
            format_failure_line(&failure),
            "Status: FAIL 3 \"partial\\n\""
        );

        let killed = ChildFailure {
            code: None,
            ..failure
        };
        assert!(format_failure_line(&killed).starts_with("Status: FAIL signal"));
    }

    #[cfg(unix)]
    #[test]
    fn captured_line_names_index_status_and_stdout() {
        use std::os::unix::process::ExitStatusExt;

        let output = CapturedOutput {
            index: 2,
            status: std::process::ExitStatus::from_raw(0),
            stdout: b"hello\n".to_vec(),
            stderr: Vec::new(),
        };
        assert_eq!(
            format_captured_line(&output),
            "output #2 (exit status: 0): \"hello\\n\""
        );
    }

    #[test]
    fn in_memory_console_collects_lines() {
        let (mut console, buffer) = Console::in_memory();
        console.header(ScenarioKind::Serial).unwrap();
        console.launched(0).unwrap();
        console.duration(Duration::from_secs(2)).unwrap();

        let lines = buffer.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Running serial scenario");
        assert!(lines[1].starts_with("launched #0: "));
        assert_eq!(lines[2], "--- 2 seconds ---");
    }
}
