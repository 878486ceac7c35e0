//! Logger configuration
//!
//! `Options` is the serializable configuration record. Field names use
//! kebab-case so a config file reads like:
//!
//! ```json
//! {"output-paths":["stdout","/var/log/app.log"],"level":"debug","format":"json"}
//! ```

use crate::core::{Engine, Format, LogLevel, LoggerError, Result, SamplingConfig};
use crate::sinks::open_sinks;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Options {
    /// "stdout", "stderr" or file paths receiving records
    pub output_paths: Vec<String>,
    /// Destinations for the engine's own write failures
    pub error_output_paths: Vec<String>,
    pub level: String,
    /// "console" or "json", case-insensitive
    pub format: String,
    pub disable_caller: bool,
    pub disable_stacktrace: bool,
    pub enable_color: bool,
    pub development: bool,
    pub name: String,
    /// `None` writes every record
    pub sampling: Option<SamplingConfig>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output_paths: vec!["stdout".to_string()],
            error_output_paths: vec!["stderr".to_string()],
            level: LogLevel::Info.to_str().to_lowercase(),
            format: Format::Console.as_str().to_string(),
            disable_caller: false,
            disable_stacktrace: false,
            enable_color: false,
            development: false,
            name: String::new(),
            sampling: Some(SamplingConfig::default()),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the level and format strings.
    ///
    /// Both checks always run; the level error, if any, comes first.
    pub fn validate(&self) -> Vec<LoggerError> {
        let mut errs = Vec::new();

        if let Err(e) = self.level.parse::<LogLevel>() {
            errs.push(e);
        }
        if let Err(e) = self.format.parse::<Format>() {
            errs.push(e);
        }

        errs
    }

    /// Configured level, or info if it does not parse
    pub fn parsed_level(&self) -> LogLevel {
        self.level.parse().unwrap_or(LogLevel::Info)
    }

    /// Configured format, or console if it does not parse
    pub fn parsed_format(&self) -> Format {
        self.format.parse().unwrap_or_default()
    }

    /// Open the sinks and construct an unnamed engine.
    pub fn engine(&self) -> Result<Engine> {
        let sinks = open_sinks(&self.output_paths)?;
        let error_sinks = open_sinks(&self.error_output_paths)?;

        let stacktrace_level = match (self.disable_stacktrace, self.development) {
            (true, _) => None,
            (false, true) => Some(LogLevel::Error),
            (false, false) => Some(LogLevel::Panic),
        };

        Ok(Engine::builder()
            .min_level(self.parsed_level())
            .format(self.parsed_format())
            .colors(self.enable_color)
            .add_caller(!self.disable_caller)
            .stacktrace_level(stacktrace_level)
            .development(self.development)
            .sampling(self.sampling)
            .boxed_sinks(sinks)
            .boxed_error_sinks(error_sinks)
            .build())
    }

    /// Build a logger, install it as the process default and route the
    /// `log` crate through it.
    pub fn build(&self) -> Result<()> {
        crate::global::init(self)
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl FromStr for Options {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
