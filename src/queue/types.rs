//! Type definitions for the queue system

use serde::Serialize;

/// Point-in-time counters for a [`SensorBuffer`](crate::queue::SensorBuffer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BufferStats {
    /// Payload records accepted by `insert`
    pub inserted: u64,
    /// Payload records handed out by `remove`
    pub removed: u64,
    /// Records currently queued
    pub pending: usize,
    /// Consumers currently blocked waiting for data
    pub waiting: usize,
    /// Whether the end-of-stream marker has been seen
    pub closed: bool,
}
