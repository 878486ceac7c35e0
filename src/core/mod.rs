//! Engine layer: levels, fields, records, encoding, sinks and the engine itself

pub mod encoder;
pub mod engine;
pub mod entry;
pub mod error;
pub mod field;
pub mod level;
pub mod metrics;
pub mod sampling;
pub mod sink;

pub use encoder::{Encoder, Format};
pub use engine::{Engine, EngineBuilder};
pub use entry::LogEntry;
pub use error::{LoggerError, Result};
pub use field::{Field, FieldValue};
pub use level::LogLevel;
pub use metrics::EngineMetrics;
pub use sampling::{Sampler, SamplingConfig};
pub use sink::Sink;
