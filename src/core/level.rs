//! Severity level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered severity of a record.
///
/// The discriminants are the numeric levels used by verbosity gating:
/// `Logger::v(n)` compares `n` against these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
#[repr(i8)]
pub enum LogLevel {
    Debug = -1,
    #[default]
    Info = 0,
    Warn = 1,
    Error = 2,
    DPanic = 3,
    Panic = 4,
    Fatal = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::DPanic,
        LogLevel::Panic,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::DPanic => "DPANIC",
            LogLevel::Panic => "PANIC",
            LogLevel::Fatal => "FATAL",
        }
    }

    #[inline]
    pub const fn as_i8(self) -> i8 {
        self as i8
    }

    /// Nearest named level for an arbitrary verbosity value.
    pub fn from_i8_saturating(value: i8) -> Self {
        match value {
            i8::MIN..=-1 => LogLevel::Debug,
            0 => LogLevel::Info,
            1 => LogLevel::Warn,
            2 => LogLevel::Error,
            3 => LogLevel::DPanic,
            4 => LogLevel::Panic,
            _ => LogLevel::Fatal,
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Magenta,
            LogLevel::Info => Blue,
            LogLevel::Warn => Yellow,
            LogLevel::Error | LogLevel::DPanic | LogLevel::Panic | LogLevel::Fatal => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "DPANIC" => Ok(LogLevel::DPanic),
            "PANIC" => Ok(LogLevel::Panic),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warn,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

impl LogLevel {
    /// Most verbose `log` filter that still reaches this threshold.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Trace,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            _ => log::LevelFilter::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("dpanic".parse::<LogLevel>().unwrap(), LogLevel::DPanic);
        assert_eq!("fatal".parse::<LogLevel>().unwrap(), LogLevel::Fatal);
    }

    #[test]
    fn test_parse_unknown_level() {
        let err = "test".parse::<LogLevel>().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel(ref s) if s == "test"));
    }

    #[test]
    fn test_ordering_matches_numeric_value() {
        for pair in LogLevel::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].as_i8() < pair[1].as_i8());
        }
    }

    #[test]
    fn test_saturating_conversion() {
        assert_eq!(LogLevel::from_i8_saturating(-7), LogLevel::Debug);
        assert_eq!(LogLevel::from_i8_saturating(0), LogLevel::Info);
        assert_eq!(LogLevel::from_i8_saturating(2), LogLevel::Error);
        assert_eq!(LogLevel::from_i8_saturating(42), LogLevel::Fatal);
    }

    #[test]
    fn test_log_crate_mapping() {
        assert_eq!(LogLevel::from(log::Level::Trace), LogLevel::Debug);
        assert_eq!(LogLevel::from(log::Level::Warn), LogLevel::Warn);
        assert_eq!(LogLevel::Info.to_level_filter(), log::LevelFilter::Info);
        assert_eq!(LogLevel::Fatal.to_level_filter(), log::LevelFilter::Error);
    }
}
