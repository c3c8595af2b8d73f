//! Consumer role: buffer → sink

use crate::pipeline::error::PipelineResult;
use crate::queue::SensorBuffer;
use crate::sink::RecordSink;
use serde::Serialize;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Outcome of one consumer run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsumerReport {
    pub name: String,
    /// Records removed from the buffer
    pub consumed: u64,
    /// Records the sink accepted
    pub written: u64,
    /// Records lost to sink errors
    pub write_failures: u64,
}

/// Removes records until the end of the stream and forwards them to the sink
pub struct Consumer {
    name: String,
    buffer: Arc<SensorBuffer>,
    sink: Arc<dyn RecordSink>,
    delay: Duration,
}

impl Consumer {
    pub fn new(
        name: impl Into<String>,
        buffer: Arc<SensorBuffer>,
        sink: Arc<dyn RecordSink>,
        delay: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            buffer,
            sink,
            delay,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(self) -> PipelineResult<ConsumerReport> {
        let mut report = ConsumerReport {
            name: self.name.clone(),
            ..ConsumerReport::default()
        };
        log::debug!("{} started (delay {:?})", self.name, self.delay);

        while let Some(record) = self.buffer.remove()? {
            report.consumed += 1;

            match self.sink.write_record(&record) {
                Ok(()) => report.written += 1,
                Err(e) => {
                    log::warn!("{} dropped {}: {}", self.name, record, e);
                    report.write_failures += 1;
                }
            }

            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        log::info!(
            "{} finished: {} consumed, {} written",
            self.name,
            report.consumed,
            report.written
        );
        Ok(report)
    }
}
