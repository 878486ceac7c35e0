//! In-memory sink for capturing output

use crate::core::{Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Sink that appends every line to a shared buffer.
///
/// Clones share the same buffer, so a test can keep one handle and hand the
/// other to a logger.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&mut self, line: &[u8]) -> Result<()> {
        self.buffer.lock().extend_from_slice(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() -> Result<()> {
        let sink = MemorySink::new();
        let mut writer = sink.clone();

        writer.write(b"one\n")?;
        writer.write(b"two\n")?;
        assert_eq!(sink.lines(), vec!["one", "two"]);

        sink.clear();
        assert!(writer.contents().is_empty());

        writer.write(b"three\n")?;
        assert_eq!(sink.lines(), vec!["three"]);
        Ok(())
    }
}
