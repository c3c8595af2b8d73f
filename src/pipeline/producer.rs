//! Producer role: source → buffer
//!
//! Reads the source to exhaustion, inserting each reading, and always ends by
//! inserting the end-of-stream marker so consumers can terminate even when
//! the source failed part way.

use crate::pipeline::error::PipelineResult;
use crate::queue::{QueueError, SensorBuffer};
use crate::source::{RecordSource, SourceError};
use serde::Serialize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Outcome of one producer run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProducerReport {
    /// Records read from the source
    pub read: u64,
    /// Records accepted by the buffer
    pub inserted: u64,
    /// Records the buffer could not accept
    pub dropped: u64,
    /// Source records carrying the reserved id 0
    pub skipped: u64,
    /// Why the source stopped early, if it did
    pub source_error: Option<String>,
}

pub struct Producer<S: RecordSource> {
    source: S,
    buffer: Arc<SensorBuffer>,
    delay: Duration,
}

impl<S: RecordSource> Producer<S> {
    pub fn new(source: S, buffer: Arc<SensorBuffer>, delay: Duration) -> Self {
        Self {
            source,
            buffer,
            delay,
        }
    }

    /// Drain the source into the buffer, then close the buffer
    ///
    /// Fails only when the buffer itself is unusable; source problems end the
    /// stream early and are recorded in the report.
    pub fn run(mut self) -> PipelineResult<ProducerReport> {
        let mut report = ProducerReport::default();
        log::debug!("Producer started (delay {:?})", self.delay);

        let outcome = self.feed(&mut report);

        // Consumers only stop on the marker, so it goes in even after a failure
        let closed = self.buffer.close();
        outcome?;
        closed?;

        log::info!(
            "Producer finished: {} read, {} queued, {} dropped, {} skipped",
            report.read,
            report.inserted,
            report.dropped,
            report.skipped
        );
        Ok(report)
    }

    fn feed(&mut self, report: &mut ProducerReport) -> PipelineResult<()> {
        loop {
            let record = match self.source.next_record() {
                Ok(Some(record)) => record,
                Ok(None) => return Ok(()),
                Err(e @ SourceError::Truncated { .. }) => {
                    log::warn!("Ignoring incomplete trailing input: {}", e);
                    report.source_error = Some(e.to_string());
                    return Ok(());
                }
                Err(e) => {
                    log::error!("Source failed, ending stream early: {}", e);
                    report.source_error = Some(e.to_string());
                    return Ok(());
                }
            };
            report.read += 1;

            if record.is_end_of_stream() {
                log::warn!(
                    "Skipping source record #{} with reserved id 0 (value {:.4}, timestamp {})",
                    report.read,
                    record.value,
                    record.timestamp
                );
                report.skipped += 1;
                continue;
            }

            match self.buffer.insert(record) {
                Ok(()) => report.inserted += 1,
                Err(e @ QueueError::ResourceExhausted { .. }) => {
                    log::warn!("Dropping {}: {}", record, e);
                    report.dropped += 1;
                }
                Err(e) => return Err(e.into()),
            }

            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }
    }
}
