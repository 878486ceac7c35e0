//! Error types for the logger facade

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level string that does not name a known severity
    #[error("unrecognized level: {0:?}")]
    InvalidLevel(String),

    /// Encoding format other than console or json
    #[error("not a valid log format: {0:?}")]
    InvalidFormat(String),

    /// Output path that could not be opened as a sink
    #[error("can't open sink {path:?}: {source}")]
    SinkOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a sink open error with the offending path
    pub fn sink_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
