//! Encoding of log entries into output lines
//!
//! Two encodings are supported:
//! - Console: tab-separated, human-readable, fields as a trailing JSON object
//! - Json: one JSON object per line

use super::entry::LogEntry;
use super::field::Field;
use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

pub const MESSAGE_KEY: &str = "message";
pub const LEVEL_KEY: &str = "level";
pub const TIME_KEY: &str = "timestamp";
pub const NAME_KEY: &str = "logger";
pub const CALLER_KEY: &str = "caller";
pub const STACKTRACE_KEY: &str = "stacktrace";

/// Output encoding for log entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable console format (default)
    ///
    /// Example: `2025-01-08 10:30:45.123\tINFO\tapi\tsrc/main.rs:12\tRequest processed\t{"id":7}`
    #[default]
    Console,

    /// JSON format for machine processing
    ///
    /// Example: `{"timestamp":"2025-01-08 10:30:45.123","level":"INFO","message":"Request processed"}`
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Console => "console",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(Format::Console),
            "json" => Ok(Format::Json),
            _ => Err(LoggerError::InvalidFormat(s.to_string())),
        }
    }
}

/// Encoder settings derived from the logger options
#[derive(Debug, Clone, Copy, Default)]
pub struct Encoder {
    pub format: Format,
    pub use_colors: bool,
}

impl Encoder {
    pub fn new(format: Format, use_colors: bool) -> Self {
        Self { format, use_colors }
    }

    /// Encode an entry as a single line, including the trailing newline
    pub fn encode(&self, entry: &LogEntry) -> String {
        let mut line = match self.format {
            Format::Console => self.encode_console(entry),
            Format::Json => self.encode_json(entry),
        };
        line.push('\n');
        line
    }

    fn encode_console(&self, entry: &LogEntry) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(6);
        parts.push(entry.timestamp.format(TIME_FORMAT).to_string());
        parts.push(self.level_text(entry));
        if let Some(ref name) = entry.logger_name {
            parts.push(name.clone());
        }
        if let Some(ref caller) = entry.caller {
            parts.push(caller.clone());
        }
        parts.push(entry.message.clone());

        if !entry.fields.is_empty() {
            let mut fields = String::from("{");
            push_members(&mut fields, &entry.fields, false);
            fields.push('}');
            parts.push(fields);
        }

        let mut line = parts.join("\t");
        if let Some(ref trace) = entry.stacktrace {
            line.push('\n');
            line.push_str(trace.trim_end());
        }
        line
    }

    #[cfg(feature = "console")]
    fn level_text(&self, entry: &LogEntry) -> String {
        use colored::Colorize;
        if self.use_colors {
            entry
                .level
                .to_str()
                .color(entry.level.color_code())
                .to_string()
        } else {
            entry.level.to_str().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_text(&self, entry: &LogEntry) -> String {
        entry.level.to_str().to_string()
    }

    fn encode_json(&self, entry: &LogEntry) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            TIME_KEY.to_string(),
            serde_json::Value::String(entry.timestamp.format(TIME_FORMAT).to_string()),
        );
        json_obj.insert(
            LEVEL_KEY.to_string(),
            serde_json::Value::String(entry.level.to_str().to_string()),
        );
        if let Some(ref name) = entry.logger_name {
            json_obj.insert(NAME_KEY.to_string(), serde_json::Value::String(name.clone()));
        }
        if let Some(ref caller) = entry.caller {
            json_obj.insert(
                CALLER_KEY.to_string(),
                serde_json::Value::String(caller.clone()),
            );
        }
        json_obj.insert(
            MESSAGE_KEY.to_string(),
            serde_json::Value::String(entry.message.clone()),
        );
        if let Some(ref trace) = entry.stacktrace {
            json_obj.insert(
                STACKTRACE_KEY.to_string(),
                serde_json::Value::String(trace.clone()),
            );
        }

        let mut line = serde_json::Value::Object(json_obj).to_string();
        line.pop();
        push_members(&mut line, &entry.fields, true);
        line.push('}');
        line
    }
}


/// Keys the JSON encoding writes itself
pub const RESERVED_KEYS: [&str; 6] = [
    TIME_KEY,
    LEVEL_KEY,
    NAME_KEY,
    CALLER_KEY,
    MESSAGE_KEY,
    STACKTRACE_KEY,
];

/// Prefix given to a field whose key is one of [`RESERVED_KEYS`]
pub const RESERVED_KEY_PREFIX: &str = "fields.";

/// Append fields as members of the JSON object open at the end of `out`.
///
/// Every field is written, repeated keys included.
fn push_members(out: &mut String, fields: &[Field], rename_reserved: bool) {
    for field in fields {
        if !out.ends_with('{') {
            out.push(',');
        }
        let key = if rename_reserved && RESERVED_KEYS.contains(&field.key.as_str()) {
            format!("{}{}", RESERVED_KEY_PREFIX, field.key)
        } else {
            field.key.clone()
        };
        out.push_str(&serde_json::Value::String(key).to_string());
        out.push(':');
        out.push_str(&field.value.to_json_value().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_format_parse() {
        assert_eq!("console".parse::<Format>().unwrap(), Format::Console);
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert!("xml".parse::<Format>().is_err());
    }

    #[test]
    fn test_console_format() {
        let entry = LogEntry::new(LogLevel::Info, "Test message")
            .with_logger_name(Some("api"))
            .with_fields(vec![Field::new("user_id", 123)]);
        let line = Encoder::new(Format::Console, false).encode(&entry);

        let columns: Vec<&str> = line.trim_end().split('\t').collect();
        assert_eq!(columns.len(), 5);
        assert_eq!(columns[1], "INFO");
        assert_eq!(columns[2], "api");
        assert_eq!(columns[3], "Test message");
        assert_eq!(columns[4], r#"{"user_id":123}"#);
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_json_format() {
        let entry = LogEntry::new(LogLevel::Error, "Error occurred")
            .with_fields(vec![Field::new("request_id", "abc-123"), Field::new("latency_ms", 42)]);
        let line = Encoder::new(Format::Json, false).encode(&entry);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["level"], "ERROR");
        assert_eq!(parsed["message"], "Error occurred");
        assert_eq!(parsed["request_id"], "abc-123");
        assert_eq!(parsed["latency_ms"], 42);
        assert!(parsed["timestamp"].is_string());
        assert!(parsed.get("logger").is_none());
    }

    #[test]
    fn test_json_keeps_field_order() {
        let entry = LogEntry::new(LogLevel::Info, "ordered")
            .with_fields(vec![Field::new("zeta", 1), Field::new("alpha", 2)]);
        let line = Encoder::new(Format::Json, false).encode(&entry);

        let zeta = line.find("\"zeta\"").unwrap();
        let alpha = line.find("\"alpha\"").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_json_reserved_keys_are_not_overwritten() {
        let entry = LogEntry::new(LogLevel::Info, "real message").with_fields(vec![
            Field::new("message", "spoofed"),
            Field::new("level", "DEBUG"),
            Field::new("k", 1),
            Field::new("k", 2),
        ]);
        let line = Encoder::new(Format::Json, false).encode(&entry);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["message"], "real message");
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["fields.message"], "spoofed");
        assert_eq!(parsed["fields.level"], "DEBUG");
        assert_eq!(line.matches("\"k\":").count(), 2);
        assert!(line.contains("\"k\":1,\"k\":2"));
    }

    #[test]
    fn test_console_keeps_repeated_keys() {
        let entry = LogEntry::new(LogLevel::Info, "repeated")
            .with_fields(vec![Field::new("k", "a"), Field::new("message", "b"), Field::new("k", "c")]);
        let line = Encoder::new(Format::Console, false).encode(&entry);

        let columns: Vec<&str> = line.trim_end().split('\t').collect();
        assert_eq!(columns[2], "repeated");
        assert_eq!(columns[3], r#"{"k":"a","message":"b","k":"c"}"#);
    }
}
