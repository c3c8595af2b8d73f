//! Record sinks consuming delivered readings
//!
//! Sinks are shared by every consumer thread, so implementations serialise
//! their own writes.

mod csv;
mod error;

pub use csv::{CsvSink, CSV_HEADER};
pub use error::{SinkError, SinkResult};

use crate::core::sync::handle_mutex_poison;
use crate::queue::SensorRecord;
use std::sync::Mutex;

/// Append-only destination for accepted records
pub trait RecordSink: Send + Sync {
    /// Append one record
    fn write_record(&self, record: &SensorRecord) -> SinkResult<()>;

    /// Flush buffered output; called once after all consumers have stopped
    fn finish(&self) -> SinkResult<()> {
        Ok(())
    }
}

/// Collects records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<SensorRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far, in arrival order
    pub fn records(&self) -> SinkResult<Vec<SensorRecord>> {
        let records = handle_mutex_poison(self.records.lock(), |message| {
            SinkError::Unavailable { message }
        })?;
        Ok(records.clone())
    }
}

impl RecordSink for MemorySink {
    fn write_record(&self, record: &SensorRecord) -> SinkResult<()> {
        let mut records = handle_mutex_poison(self.records.lock(), |message| {
            SinkError::Unavailable { message }
        })?;
        records.push(*record);
        Ok(())
    }
}
