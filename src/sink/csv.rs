//! CSV sink

use crate::core::sync::handle_mutex_poison;
use crate::queue::SensorRecord;
use crate::sink::error::{SinkError, SinkResult};
use crate::sink::RecordSink;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Header line written once before any data line
pub const CSV_HEADER: &str = "id,value,timestamp";

/// Append-only CSV writer shared by all consumers
///
/// Each record becomes one `id,value,timestamp` line with the value at four
/// decimal digits. One mutex serialises whole lines, so concurrent consumers
/// never interleave partial output.
pub struct CsvSink<W: Write + Send> {
    writer: Mutex<W>,
    lines: AtomicU64,
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) a CSV file and write the header
    pub fn create(path: &Path) -> SinkResult<Self> {
        let file = File::create(path).map_err(|e| SinkError::Create {
            message: format!("Cannot create output file {}: {}", path.display(), e),
        })?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write + Send> CsvSink<W> {
    /// Wrap a writer, emitting the header immediately
    pub fn new(mut writer: W) -> SinkResult<Self> {
        writeln!(writer, "{}", CSV_HEADER)?;
        writer.flush()?;
        Ok(Self {
            writer: Mutex::new(writer),
            lines: AtomicU64::new(0),
        })
    }

    /// Data lines written so far (header excluded)
    pub fn lines_written(&self) -> u64 {
        self.lines.load(Ordering::Relaxed)
    }

    /// Recover the writer, e.g. to inspect in-memory output
    pub fn into_inner(self) -> SinkResult<W> {
        handle_mutex_poison(self.writer.into_inner(), |message| {
            SinkError::Unavailable { message }
        })
    }
}

impl<W: Write + Send> RecordSink for CsvSink<W> {
    fn write_record(&self, record: &SensorRecord) -> SinkResult<()> {
        let line = record.to_csv_line();
        let mut writer = handle_mutex_poison(self.writer.lock(), |message| {
            SinkError::Unavailable { message }
        })?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        self.lines.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn finish(&self) -> SinkResult<()> {
        let mut writer = handle_mutex_poison(self.writer.lock(), |message| {
            SinkError::Unavailable { message }
        })?;
        writer.flush()?;
        log::debug!("CSV sink flushed after {} lines", self.lines_written());
        Ok(())
    }
}
