//! Streaming JSON array output
//!
//! Records are written one by one as the crawl progresses, so a long crawl
//! never holds more than one topic in memory. The result is a single
//! well-formed JSON array.

use crate::output::traits::{OutputError, OutputHandler, OutputResult, TopicRecord};
use serde::Serialize;
use std::io::Write;

/// Writes records as the elements of one JSON array
pub struct JsonArrayWriter<W: Write> {
    writer: W,
    opened: bool,
    finished: bool,
    written: usize,
}

impl<W: Write> JsonArrayWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            opened: false,
            finished: false,
            written: 0,
        }
    }

    /// Number of elements written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Appends one pretty-printed element
    pub fn write<T: Serialize>(&mut self, value: &T) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finalized);
        }

        self.open()?;
        let separator: &[u8] = if self.written == 0 { b"\n" } else { b",\n" };
        self.writer.write_all(separator)?;
        serde_json::to_writer_pretty(&mut self.writer, value)?;
        self.written += 1;

        Ok(())
    }

    /// Closes the array and flushes; further calls are no-ops
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }

        self.open()?;
        self.writer.write_all(b"\n]\n")?;
        self.writer.flush()?;
        self.finished = true;

        Ok(())
    }

    /// Consumes the writer, returning the underlying sink
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn open(&mut self) -> OutputResult<()> {
        if !self.opened {
            self.writer.write_all(b"[")?;
            self.opened = true;
        }
        Ok(())
    }
}

impl<W: Write> OutputHandler for JsonArrayWriter<W> {
    fn record_topic(&mut self, record: &TopicRecord) -> OutputResult<()> {
        self.write(record)
    }

    fn finalize(&mut self) -> OutputResult<()> {
        self.finish()
    }
}
