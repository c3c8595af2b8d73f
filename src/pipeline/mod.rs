//! Producer/consumer pipeline around the sensor buffer
//!
//! ```text
//! source ──► Producer ──► SensorBuffer ──► Consumer 1..N ──► sink
//! ```
//!
//! Dependencies are injected: the runner owns the buffer and hands `Arc`
//! clones of it and of the sink to each role. Nothing is global.

mod config;
mod consumer;
mod error;
mod producer;
mod runner;

pub use config::{
    PipelineConfig, DEFAULT_CONSUMERS, DEFAULT_CONSUMER_DELAY_MS, DEFAULT_INPUT, DEFAULT_OUTPUT,
    DEFAULT_PRODUCER_DELAY_MS,
};
pub use consumer::{Consumer, ConsumerReport};
pub use error::{PipelineError, PipelineResult};
pub use producer::{Producer, ProducerReport};
pub use runner::{Pipeline, PipelineSummary};
