//! Sink implementations

pub mod console;
pub mod file;
pub mod memory;

pub use console::{ConsoleSink, Stream};
pub use file::FileSink;
pub use memory::MemorySink;

pub use crate::core::Sink;

use crate::core::Result;

/// Open the sink named by an output path.
///
/// `"stdout"` and `"stderr"` select the standard streams; anything else is
/// a file path opened for appending.
pub fn open_sink(path: &str) -> Result<Box<dyn Sink>> {
    match path {
        "stdout" => Ok(Box::new(ConsoleSink::stdout())),
        "stderr" => Ok(Box::new(ConsoleSink::stderr())),
        _ => Ok(Box::new(FileSink::new(path)?)),
    }
}

/// Open every path, failing on the first one that cannot be opened.
pub fn open_sinks(paths: &[String]) -> Result<Vec<Box<dyn Sink>>> {
    paths.iter().map(|p| open_sink(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_standard_streams() {
        assert_eq!(open_sink("stdout").unwrap().name(), "stdout");
        assert_eq!(open_sink("stderr").unwrap().name(), "stderr");
    }

    #[test]
    fn test_open_sinks_stops_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("ok.log").display().to_string();
        let bad = dir.path().join("nope").join("x.log").display().to_string();

        assert_eq!(open_sinks(&[good.clone()]).unwrap().len(), 1);
        assert!(open_sinks(&[good, bad]).is_err());
    }
}
