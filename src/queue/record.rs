//! Sensor record and buffer entry types
//!
//! A [`SensorRecord`] is the unit moved from the producer to exactly one
//! consumer. The buffer itself stores [`BufferEntry`] values so that the
//! end-of-stream marker is a distinct variant rather than a magic id; the
//! `id == 0` encoding is only honoured at the conversion boundary.

use serde::Serialize;
use std::fmt;

/// Sensor identifier
pub type SensorId = u16;
/// Sensor reading
pub type SensorValue = f64;
/// Reading timestamp (seconds since the Unix epoch)
pub type SensorTimestamp = i64;

/// Reserved id announcing that no further records will be inserted
pub const END_OF_STREAM_ID: SensorId = 0;

/// A single timestamped sensor reading
///
/// Records are plain `Copy` values; handing one to the buffer moves it out of
/// the producer's hands and `remove` moves it into exactly one consumer.
///
/// # Example
///
/// ```rust
/// use sensorpipe::queue::SensorRecord;
///
/// let record = SensorRecord::new(15, 21.5, 1_700_000_000);
/// assert!(!record.is_end_of_stream());
/// assert_eq!(record.to_csv_line(), "15,21.5000,1700000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorRecord {
    pub id: SensorId,
    pub value: SensorValue,
    pub timestamp: SensorTimestamp,
}

impl SensorRecord {
    pub fn new(id: SensorId, value: SensorValue, timestamp: SensorTimestamp) -> Self {
        Self {
            id,
            value,
            timestamp,
        }
    }

    /// The in-band end-of-stream marker (`id == 0`)
    pub fn end_of_stream() -> Self {
        Self::new(END_OF_STREAM_ID, 0.0, 0)
    }

    pub fn is_end_of_stream(&self) -> bool {
        self.id == END_OF_STREAM_ID
    }

    /// Render as `id,value,timestamp` with the value at 4 decimal digits
    pub fn to_csv_line(&self) -> String {
        format!("{},{:.4},{}", self.id, self.value, self.timestamp)
    }
}

impl fmt::Display for SensorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sensor {} = {:.4} @ {}",
            self.id, self.value, self.timestamp
        )
    }
}

/// Element handed to the buffer by the producer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BufferEntry {
    /// A payload reading to be delivered to one consumer
    Reading(SensorRecord),
    /// The producer has finished; consumers drain and stop
    EndOfStream,
}

impl From<SensorRecord> for BufferEntry {
    fn from(record: SensorRecord) -> Self {
        if record.is_end_of_stream() {
            BufferEntry::EndOfStream
        } else {
            BufferEntry::Reading(record)
        }
    }
}
