//! Pipeline runner: wires one producer and N consumers around a buffer
//!
//! Lifecycle: buffer and sink are created before any thread starts, shared
//! for the duration of the run, and torn down only after every thread has
//! been joined.

use crate::pipeline::config::PipelineConfig;
use crate::pipeline::consumer::{Consumer, ConsumerReport};
use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::pipeline::producer::{Producer, ProducerReport};
use crate::queue::{BufferStats, SensorBuffer};
use crate::sink::{CsvSink, RecordSink};
use crate::source::{BinarySource, RecordSource};
use serde::Serialize;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// What happened during one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub producer: ProducerReport,
    pub consumers: Vec<ConsumerReport>,
    /// Buffer counters taken after all threads stopped
    pub buffer: BufferStats,
    /// Records still queued at teardown
    pub discarded: usize,
}

impl PipelineSummary {
    /// Records handed to consumers
    pub fn delivered(&self) -> u64 {
        self.consumers.iter().map(|c| c.consumed).sum()
    }

    /// Records the sink accepted
    pub fn written(&self) -> u64 {
        self.consumers.iter().map(|c| c.written).sum()
    }

    /// Every queued record reached a consumer
    pub fn is_complete(&self) -> bool {
        self.delivered() == self.producer.inserted && self.discarded == 0
    }
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Open the configured binary input and CSV output, then run
    pub fn run_files(&self) -> PipelineResult<PipelineSummary> {
        let source = BinarySource::open(&self.config.input)?;
        let sink = Arc::new(CsvSink::create(&self.config.output)?);
        log::info!(
            "Reading {} into {}",
            self.config.input.display(),
            self.config.output.display()
        );
        self.run(source, sink)
    }

    /// Run the producer and consumer threads to completion
    pub fn run<S>(&self, source: S, sink: Arc<dyn RecordSink>) -> PipelineResult<PipelineSummary>
    where
        S: RecordSource + 'static,
    {
        let buffer = Arc::new(SensorBuffer::with_capacity(self.config.buffer_capacity)?);

        let mut consumers: Vec<(String, JoinHandle<PipelineResult<ConsumerReport>>)> =
            Vec::with_capacity(self.config.consumers);
        for index in 1..=self.config.consumers {
            let name = format!("consumer-{}", index);
            let consumer = Consumer::new(
                name.clone(),
                Arc::clone(&buffer),
                Arc::clone(&sink),
                self.config.consumer_delay,
            );
            match thread::Builder::new()
                .name(name.clone())
                .spawn(move || consumer.run())
            {
                Ok(handle) => consumers.push((name, handle)),
                Err(source) => {
                    abandon(&buffer, consumers);
                    return Err(PipelineError::Spawn { name, source });
                }
            }
        }

        let producer = Producer::new(source, Arc::clone(&buffer), self.config.producer_delay);
        let producer = match thread::Builder::new()
            .name("producer".to_string())
            .spawn(move || producer.run())
        {
            Ok(handle) => handle,
            Err(source) => {
                abandon(&buffer, consumers);
                return Err(PipelineError::Spawn {
                    name: "producer".to_string(),
                    source,
                });
            }
        };
        log::debug!("Started producer and {} consumers", consumers.len());

        // Join everything before reporting the first failure
        let producer_result = join_worker("producer", producer);
        if producer_result.is_err() {
            // A producer that died early never inserted the marker
            if let Err(e) = buffer.close() {
                log::error!("Cannot release consumers after producer failure: {}", e);
            }
        }
        let consumer_results: Vec<_> = consumers
            .into_iter()
            .map(|(name, handle)| join_worker(&name, handle))
            .collect();

        let producer_report = producer_result?;
        let mut consumer_reports = Vec::with_capacity(consumer_results.len());
        for result in consumer_results {
            consumer_reports.push(result?);
        }

        sink.finish()?;
        let stats = buffer.stats();
        let discarded = buffer.destroy()?;

        let summary = PipelineSummary {
            producer: producer_report,
            consumers: consumer_reports,
            buffer: stats,
            discarded,
        };

        if summary.is_complete() {
            log::info!(
                "Delivered {} of {} records ({} written)",
                summary.delivered(),
                summary.producer.inserted,
                summary.written()
            );
        } else {
            log::warn!(
                "Delivered {} of {} records, {} discarded",
                summary.delivered(),
                summary.producer.inserted,
                summary.discarded
            );
        }
        if let Ok(json) = serde_json::to_string(&summary) {
            log::debug!("Run summary: {}", json);
        }

        Ok(summary)
    }
}

fn join_worker<T>(name: &str, handle: JoinHandle<PipelineResult<T>>) -> PipelineResult<T> {
    match handle.join() {
        Ok(result) => {
            if let Err(e) = &result {
                log::error!("{} failed: {}", name, e);
            }
            result
        }
        Err(_) => {
            log::error!("{} thread panicked", name);
            Err(PipelineError::WorkerPanicked {
                name: name.to_string(),
            })
        }
    }
}

// Release already-started consumers after a startup failure
fn abandon(
    buffer: &SensorBuffer,
    consumers: Vec<(String, JoinHandle<PipelineResult<ConsumerReport>>)>,
) {
    if let Err(e) = buffer.close() {
        log::error!("Cannot close buffer during startup failure: {}", e);
    }
    for (name, handle) in consumers {
        let _ = join_worker(&name, handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::SensorRecord;
    use crate::sink::{MemorySink, SinkResult};
    use crate::source::{MemorySource, SourceResult};
    use std::collections::HashSet;
    use std::sync::mpsc;
    use std::time::Duration;

    fn unpaced(consumers: usize) -> Pipeline {
        Pipeline::new(PipelineConfig {
            consumers,
            ..PipelineConfig::unpaced("in", "out")
        })
        .unwrap()
    }

    #[test]
    fn test_every_record_delivered_once() {
        let records: Vec<_> = (1..=1_000u16)
            .map(|id| SensorRecord::new(id, id as f64 / 10.0, id as i64))
            .collect();
        let sink = Arc::new(MemorySink::new());

        let summary = unpaced(3)
            .run(MemorySource::new(records.clone()), sink.clone())
            .unwrap();

        assert!(summary.is_complete());
        assert_eq!(summary.delivered(), 1_000);
        assert_eq!(summary.consumers.len(), 3);
        assert!(summary.buffer.closed);

        let written = sink.records().unwrap();
        assert_eq!(written.len(), records.len());
        let ids: HashSet<u16> = written.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), records.len());
    }

    #[test]
    fn test_empty_source_terminates() {
        let summary = unpaced(2)
            .run(MemorySource::default(), Arc::new(MemorySink::new()))
            .unwrap();

        assert_eq!(summary.delivered(), 0);
        assert!(summary.is_complete());
    }

    #[test]
    fn test_single_consumer_preserves_order() {
        let records: Vec<_> = (1..=200u16).map(|id| SensorRecord::new(id, 0.0, 0)).collect();
        let sink = Arc::new(MemorySink::new());

        unpaced(1)
            .run(MemorySource::new(records.clone()), sink.clone())
            .unwrap();

        assert_eq!(sink.records().unwrap(), records);
    }

    struct PanickingSink;

    impl RecordSink for PanickingSink {
        fn write_record(&self, _record: &SensorRecord) -> SinkResult<()> {
            panic!("sink exploded");
        }
    }

    #[test]
    fn test_panicking_consumer_is_reported() {
        let result = unpaced(1).run(
            MemorySource::new(vec![SensorRecord::new(1, 1.0, 1)]),
            Arc::new(PanickingSink),
        );

        match result {
            Err(PipelineError::WorkerPanicked { name }) => assert_eq!(name, "consumer-1"),
            other => panic!("Expected WorkerPanicked, got {:?}", other),
        }
    }

    struct PanickingSource {
        remaining: u16,
    }

    impl RecordSource for PanickingSource {
        fn next_record(&mut self) -> SourceResult<Option<SensorRecord>> {
            if self.remaining == 0 {
                panic!("source exploded");
            }
            self.remaining -= 1;
            Ok(Some(SensorRecord::new(self.remaining + 1, 1.0, 1)))
        }
    }

    #[test]
    fn test_panicking_producer_releases_consumers() {
        let (done_tx, done_rx) = mpsc::channel();
        thread::spawn(move || {
            let result = unpaced(2).run(
                PanickingSource { remaining: 3 },
                Arc::new(MemorySink::new()),
            );
            let _ = done_tx.send(result);
        });

        let result = done_rx
            .recv_timeout(Duration::from_secs(10))
            .expect("pipeline should finish after the producer panics");
        match result {
            Err(PipelineError::WorkerPanicked { name }) => assert_eq!(name, "producer"),
            other => panic!("Expected WorkerPanicked, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = Pipeline::new(PipelineConfig {
            consumers: 0,
            ..PipelineConfig::default()
        });
        assert!(matches!(result, Err(PipelineError::Validation(_))));
    }
}
