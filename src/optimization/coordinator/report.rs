//! Reporting sinks for coordinator output lines.
//!
//! The coordinator never writes to stdout or installs a logger. It hands
//! finished lines (currently only the checksum line) to a [`ReportSink`]:
//! [`LogSink`] forwards them to the `log` facade at `info` level, and
//! [`MemorySink`] keeps them for inspection by tests and embedding hosts.

/// Accepts complete text lines from the coordinator.
pub trait ReportSink {
    fn emit(&mut self, line: &str);
}

/// Forwards every line to `log::info!` under the crate's target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn emit(&mut self, line: &str) {
        log::info!("{line}");
    }
}

/// Collects lines in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl ReportSink for MemorySink {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
