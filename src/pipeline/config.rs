//! Resolved pipeline settings

use crate::core::validation::{validate_consumer_count, validate_delay_ms, ValidationError};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_INPUT: &str = "sensor_data";
pub const DEFAULT_OUTPUT: &str = "sensor_data_out.csv";
pub const DEFAULT_CONSUMERS: usize = 2;
pub const DEFAULT_PRODUCER_DELAY_MS: u64 = 10;
pub const DEFAULT_CONSUMER_DELAY_MS: u64 = 25;

/// Everything the runner needs, after CLI and file settings are merged
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub consumers: usize,
    /// Pause after each insert
    pub producer_delay: Duration,
    /// Pause after each consumed record
    pub consumer_delay: Duration,
    /// Records to reserve up front
    pub buffer_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            consumers: DEFAULT_CONSUMERS,
            producer_delay: Duration::from_millis(DEFAULT_PRODUCER_DELAY_MS),
            consumer_delay: Duration::from_millis(DEFAULT_CONSUMER_DELAY_MS),
            buffer_capacity: 0,
        }
    }
}

impl PipelineConfig {
    /// Configuration with pacing disabled, handy for tests and batch runs
    pub fn unpaced(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            producer_delay: Duration::ZERO,
            consumer_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_consumer_count(self.consumers)?;
        validate_delay_ms("Producer delay", self.producer_delay.as_millis() as u64)?;
        validate_delay_ms("Consumer delay", self.consumer_delay.as_millis() as u64)?;
        if self.input == self.output {
            return Err(ValidationError::new(format!(
                "Input and output must differ (both are {})",
                self.input.display()
            )));
        }
        Ok(())
    }
}
