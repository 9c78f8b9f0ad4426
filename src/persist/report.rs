//! Aggregate load reports.
//!
//! Deserializing a container list never aborts on the first bad entry:
//! every failure is recorded here while the remaining entries still load.

use std::fmt;

/// Severity of one report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One recorded load failure.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    /// Severity level.
    pub severity: Severity,
    /// Primary message.
    pub message: String,
}

/// Aggregate of everything that went wrong while loading a configuration.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    entries: Vec<ReportEntry>,
}

impl LoadReport {
    /// Create an empty report.
    pub fn new() -> Self {
        LoadReport::default()
    }

    /// Record a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.entries.push(ReportEntry {
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    /// Record an error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.entries.push(ReportEntry {
            severity: Severity::Error,
            message: message.into(),
        });
    }

    /// All recorded entries, in the order they occurred.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Number of recorded warnings.
    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.severity == Severity::Warning)
            .count()
    }

    /// Number of recorded errors.
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.severity == Severity::Error)
            .count()
    }

    /// Whether nothing went wrong.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// Format the report for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();
        for entry in &self.entries {
            let severity = if color {
                match entry.severity {
                    Severity::Error => "\x1b[1;31merror\x1b[0m",
                    Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
                }
                .to_string()
            } else {
                entry.severity.to_string()
            };
            output.push_str(&format!("{}: {}\n", severity, entry.message));
        }
        output
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}
