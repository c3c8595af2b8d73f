//! Public API for the sensor buffer
//!
//! External modules should import from here rather than directly from internal modules.
//! See module documentation for usage examples and architecture details.

// Core buffer
pub use crate::queue::buffer::SensorBuffer;

// Record types
pub use crate::queue::record::{BufferEntry, SensorRecord, END_OF_STREAM_ID};

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};

// Statistics
pub use crate::queue::types::BufferStats;
