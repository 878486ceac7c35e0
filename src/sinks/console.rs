//! Standard stream sinks

use crate::core::{Result, Sink};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

pub struct ConsoleSink {
    stream: Stream,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, line: &[u8]) -> Result<()> {
        match self.stream {
            Stream::Stdout => std::io::stdout().lock().write_all(line)?,
            Stream::Stderr => std::io::stderr().lock().write_all(line)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.stream {
            Stream::Stdout => std::io::stdout().flush()?,
            Stream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        match self.stream {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}
