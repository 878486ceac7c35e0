//! Log entry structure

use super::field::Field;
use super::level::LogLevel;
use chrono::{DateTime, Local};
use std::panic::Location;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
    /// Dot-joined logger name, if any
    pub logger_name: Option<String>,
    /// `dir/file.rs:line` of the logging call site
    pub caller: Option<String>,
    pub stacktrace: Option<String>,
    /// Bound fields first, then the record's own fields, in order
    pub fields: Vec<Field>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: &str) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message),
            timestamp: Local::now(),
            logger_name: None,
            caller: None,
            stacktrace: None,
            fields: Vec::new(),
        }
    }

    pub fn with_caller(mut self, location: &Location<'_>) -> Self {
        self.caller = Some(short_caller(location));
        self
    }

    pub fn with_stacktrace(mut self, trace: String) -> Self {
        self.stacktrace = Some(trace);
        self
    }

    pub fn with_logger_name(mut self, name: Option<&str>) -> Self {
        self.logger_name = name.map(str::to_string);
        self
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }
}

/// Trim a call site to its last directory and file name
fn short_caller(location: &Location<'_>) -> String {
    let file = location.file();
    let mut cut = file.len();
    for _ in 0..2 {
        match file[..cut].rfind(['/', '\\']) {
            Some(idx) => cut = idx,
            None => return format!("{}:{}", file, location.line()),
        }
    }
    format!("{}:{}", &file[cut + 1..], location.line())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_sanitized() {
        let entry = LogEntry::new(LogLevel::Info, "line one\nFAKE ERROR\tx");
        assert_eq!(entry.message, "line one\\nFAKE ERROR\\tx");
    }

    #[test]
    fn test_caller_is_shortened() {
        let entry = LogEntry::new(LogLevel::Info, "here").with_caller(Location::caller());
        let caller = entry.caller.unwrap();
        assert!(caller.starts_with("core/entry.rs:"), "caller was {}", caller);
    }
}
