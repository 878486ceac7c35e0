//! File sink implementation

use crate::core::{LoggerError, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct FileSink {
    path: String,
    writer: BufWriter<File>,
}

impl FileSink {
    /// Open `path` for appending, creating the file but not its directories.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let display = path.display().to_string();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::sink_open(display.clone(), e))?;

        Ok(Self {
            path: display,
            writer: BufWriter::new(file),
        })
    }
}

impl Sink for FileSink {
    fn write(&mut self, line: &[u8]) -> Result<()> {
        self.writer.write_all(line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_data()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.path
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.writer.flush();
    }
}
