//! Shared Sensor Buffer
//!
//! A blocking FIFO buffer that hands each sensor reading from a single
//! producer to exactly one of several consumer threads, with shutdown driven
//! by an end-of-stream marker travelling through the buffer itself.
//!
//! # Overview
//!
//! - **One Producer**: inserts readings and finally the end-of-stream marker
//! - **Many Consumers**: each `remove` hands a record to one consumer only
//! - **FIFO**: records leave in the order they were inserted
//! - **Unbounded**: `insert` never blocks; memory is not capped
//! - **Data-driven shutdown**: consumers drain, then all observe the end
//!
//! # Architecture
//!
//! ```text
//!          ┌──────────────┐
//!          │   Producer   │
//!          └──────┬───────┘
//!                 │ insert / close
//!                 ▼
//! ┌───────────────────────────────────────┐
//! │             SensorBuffer              │
//! │  Mutex ┌───┬───┬───┬───┬───┐ closed   │
//! │        │ 1 │ 2 │ 3 │ 4 │...│  flag    │
//! │        └───┴───┴───┴───┴───┘          │
//! │  Condvar can_read (one / all)         │
//! └───────┬──────────────┬────────────────┘
//!         │ remove       │ remove
//!  ┌──────┴─────┐ ┌──────┴─────┐
//!  │ Consumer 1 │ │ Consumer 2 │  (each record goes to one of them)
//!  └────────────┘ └────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use sensorpipe::queue::{SensorBuffer, SensorRecord};
//!
//! let buffer = SensorBuffer::new();
//! buffer.insert(SensorRecord::new(1, 10.0, 100)).unwrap();
//! buffer.insert(SensorRecord::end_of_stream()).unwrap();
//!
//! assert_eq!(buffer.remove().unwrap().map(|r| r.id), Some(1));
//! assert_eq!(buffer.remove().unwrap(), None);
//! ```

pub mod api;
mod buffer;
mod error;
mod record;
mod types;

pub use buffer::SensorBuffer;
pub use error::{QueueError, QueueResult};
pub use record::{
    BufferEntry, SensorId, SensorRecord, SensorTimestamp, SensorValue, END_OF_STREAM_ID,
};
pub use types::BufferStats;

#[cfg(test)]
mod tests;
