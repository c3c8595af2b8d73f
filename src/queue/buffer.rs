//! SensorBuffer: the shared single-producer, multi-consumer buffer
//!
//! One mutex guards the whole state (pending records, closed flag, counters)
//! and one condition variable parks consumers while the buffer is empty and
//! still open. A payload insert wakes one consumer; the end-of-stream marker
//! wakes all of them so each can observe closure and stop.

use crate::core::sync::handle_mutex_poison;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::record::{BufferEntry, SensorRecord};
use crate::queue::types::BufferStats;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct BufferState {
    pending: VecDeque<SensorRecord>,
    closed: bool,
    destroyed: bool,
    waiting: usize,
    inserted: u64,
    removed: u64,
}

/// Unbounded FIFO buffer shared by one producer and any number of consumers
///
/// Shutdown is data-driven: once the producer inserts the end-of-stream
/// marker, consumers keep receiving the remaining records and then
/// `Ok(None)` on every further `remove`.
///
/// # Example
///
/// ```rust
/// use sensorpipe::queue::{SensorBuffer, SensorRecord};
/// use std::sync::Arc;
/// use std::thread;
///
/// let buffer = Arc::new(SensorBuffer::new());
///
/// let consumer = {
///     let buffer = Arc::clone(&buffer);
///     thread::spawn(move || {
///         let mut seen = Vec::new();
///         while let Some(record) = buffer.remove().unwrap() {
///             seen.push(record.id);
///         }
///         seen
///     })
/// };
///
/// buffer.insert(SensorRecord::new(1, 10.0, 100)).unwrap();
/// buffer.insert(SensorRecord::new(2, 20.0, 200)).unwrap();
/// buffer.close().unwrap();
///
/// assert_eq!(consumer.join().unwrap(), vec![1, 2]);
/// ```
#[derive(Debug, Default)]
pub struct SensorBuffer {
    state: Mutex<BufferState>,
    /// Signalled when a record arrives or the stream ends
    can_read: Condvar,
}

impl SensorBuffer {
    /// Create an empty, open buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty, open buffer with room for `capacity` records
    ///
    /// Fails with `ResourceExhausted` when the storage cannot be reserved.
    pub fn with_capacity(capacity: usize) -> QueueResult<Self> {
        let mut pending = VecDeque::new();
        pending
            .try_reserve(capacity)
            .map_err(|e| QueueError::ResourceExhausted {
                message: format!("cannot reserve space for {} records: {}", capacity, e),
            })?;

        Ok(Self {
            state: Mutex::new(BufferState {
                pending,
                ..BufferState::default()
            }),
            can_read: Condvar::new(),
        })
    }

    fn lock_state(&self) -> QueueResult<MutexGuard<'_, BufferState>> {
        let state = handle_mutex_poison(self.state.lock(), |message| {
            QueueError::InvalidState { message }
        })?;
        if state.destroyed {
            return Err(QueueError::InvalidState {
                message: "buffer has been destroyed".to_string(),
            });
        }
        Ok(state)
    }

    // Observers report on a poisoned lock rather than failing
    fn peek_state(&self) -> MutexGuard<'_, BufferState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a record; a record with `id == 0` ends the stream
    pub fn insert(&self, record: SensorRecord) -> QueueResult<()> {
        self.insert_entry(BufferEntry::from(record))
    }

    /// Insert the end-of-stream marker
    pub fn close(&self) -> QueueResult<()> {
        self.insert_entry(BufferEntry::EndOfStream)
    }

    /// Insert a payload reading or the end-of-stream marker
    ///
    /// Never blocks. A payload after closure is rejected with `InvalidState`
    /// and a failed reservation with `ResourceExhausted`; in both cases the
    /// buffer is left unchanged.
    pub fn insert_entry(&self, entry: BufferEntry) -> QueueResult<()> {
        let mut state = self.lock_state()?;

        match entry {
            BufferEntry::EndOfStream => {
                if !state.closed {
                    state.closed = true;
                    log::debug!(
                        "End of stream after {} records ({} pending, {} consumers waiting)",
                        state.inserted,
                        state.pending.len(),
                        state.waiting
                    );
                }
                self.can_read.notify_all();
                Ok(())
            }
            BufferEntry::Reading(record) => {
                if state.closed {
                    return Err(QueueError::InvalidState {
                        message: format!("record {} inserted after end of stream", record.id),
                    });
                }

                state
                    .pending
                    .try_reserve(1)
                    .map_err(|e| QueueError::ResourceExhausted {
                        message: format!("cannot queue record {}: {}", record.id, e),
                    })?;
                state.pending.push_back(record);
                state.inserted += 1;
                log::trace!("Queued {} ({} pending)", record, state.pending.len());

                self.can_read.notify_one();
                Ok(())
            }
        }
    }

    /// Remove the oldest record, blocking while the buffer is empty and open
    ///
    /// Returns `Ok(Some(record))` for a delivered record and `Ok(None)` once
    /// the buffer is empty and closed. `Ok(None)` is sticky: every later call
    /// returns it again without blocking.
    pub fn remove(&self) -> QueueResult<Option<SensorRecord>> {
        let mut state = self.lock_state()?;

        loop {
            if let Some(record) = state.pending.pop_front() {
                state.removed += 1;
                log::trace!("Dequeued {} ({} pending)", record, state.pending.len());
                return Ok(Some(record));
            }
            if state.closed {
                return Ok(None);
            }

            state.waiting += 1;
            let woken = self.can_read.wait(state);
            let poisoned = woken.is_err();
            state = woken.unwrap_or_else(PoisonError::into_inner);
            state.waiting -= 1;

            if poisoned {
                return Err(QueueError::InvalidState {
                    message: "buffer lock poisoned while waiting for data".to_string(),
                });
            }

            if state.destroyed {
                return Err(QueueError::InvalidState {
                    message: "buffer destroyed while waiting for data".to_string(),
                });
            }
        }
    }

    /// Remove the oldest record without blocking
    ///
    /// Returns `Ok(None)` when nothing is queued; use [`is_closed`](Self::is_closed)
    /// to tell an idle buffer from a finished one.
    pub fn try_remove(&self) -> QueueResult<Option<SensorRecord>> {
        let mut state = self.lock_state()?;
        let record = state.pending.pop_front();
        if record.is_some() {
            state.removed += 1;
        }
        Ok(record)
    }

    /// Discard undelivered records and retire the buffer
    ///
    /// Every later `insert`/`remove` fails with `InvalidState`, and consumers
    /// still parked in `remove` are woken to receive that error. Returns the
    /// number of records discarded.
    pub fn destroy(&self) -> QueueResult<usize> {
        let mut state = self.lock_state()?;
        let discarded = state.pending.len();
        state.pending.clear();
        state.pending.shrink_to_fit();
        state.destroyed = true;
        self.can_read.notify_all();

        if discarded > 0 {
            log::warn!("Buffer destroyed with {} undelivered records", discarded);
        }
        Ok(discarded)
    }

    /// Number of records currently queued
    pub fn len(&self) -> usize {
        self.peek_state().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peek_state().pending.is_empty()
    }

    /// Whether the end-of-stream marker has been inserted
    pub fn is_closed(&self) -> bool {
        self.peek_state().closed
    }

    pub fn stats(&self) -> BufferStats {
        let state = self.peek_state();
        BufferStats {
            inserted: state.inserted,
            removed: state.removed,
            pending: state.pending.len(),
            waiting: state.waiting,
            closed: state.closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_empty_and_open() {
        let buffer = SensorBuffer::new();

        assert_eq!(buffer.len(), 0);
        assert!(buffer.is_empty());
        assert!(!buffer.is_closed());
        assert_eq!(
            buffer.stats(),
            BufferStats {
                inserted: 0,
                removed: 0,
                pending: 0,
                waiting: 0,
                closed: false,
            }
        );
    }

    #[test]
    fn test_with_capacity_starts_empty() {
        let buffer = SensorBuffer::with_capacity(64).unwrap();
        assert!(buffer.is_empty());
        assert!(!buffer.is_closed());
    }

    #[test]
    fn test_with_capacity_reports_exhaustion() {
        match SensorBuffer::with_capacity(usize::MAX) {
            Err(QueueError::ResourceExhausted { message }) => {
                assert!(message.contains("cannot reserve"));
            }
            other => panic!("Expected ResourceExhausted, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_then_remove() {
        let buffer = SensorBuffer::new();
        let record = SensorRecord::new(7, 19.5, 1234);

        buffer.insert(record).unwrap();
        assert_eq!(buffer.len(), 1);

        assert_eq!(buffer.remove().unwrap(), Some(record));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_sentinel_record_closes_without_queueing() {
        let buffer = SensorBuffer::new();

        buffer.insert(SensorRecord::new(0, 99.0, 99)).unwrap();

        assert!(buffer.is_closed());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.stats().inserted, 0);
    }

    #[test]
    fn test_poisoned_lock_reports_invalid_state() {
        use std::sync::Arc;

        let buffer = Arc::new(SensorBuffer::new());
        buffer.insert(SensorRecord::new(1, 1.0, 1)).unwrap();

        let poisoner = Arc::clone(&buffer);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.state.lock().unwrap();
            panic!("poison buffer state");
        })
        .join();

        assert!(matches!(
            buffer.remove(),
            Err(QueueError::InvalidState { .. })
        ));
        assert!(matches!(
            buffer.insert(SensorRecord::new(2, 2.0, 2)),
            Err(QueueError::InvalidState { .. })
        ));
        // Observers still answer
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_poison_during_wait_releases_waiter_count() {
        use std::sync::Arc;
        use std::thread;
        use std::time::{Duration, Instant};

        let buffer = Arc::new(SensorBuffer::new());
        let consumer = {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || buffer.remove())
        };

        let deadline = Instant::now() + Duration::from_secs(5);
        while buffer.stats().waiting < 1 {
            assert!(Instant::now() < deadline, "consumer never blocked");
            thread::sleep(Duration::from_millis(1));
        }

        let poisoner = Arc::clone(&buffer);
        let _ = thread::spawn(move || {
            let _guard = poisoner.state.lock().unwrap();
            poisoner.can_read.notify_all();
            panic!("poison buffer state while a consumer waits");
        })
        .join();

        assert!(matches!(
            consumer.join().unwrap(),
            Err(QueueError::InvalidState { .. })
        ));
        assert_eq!(buffer.stats().waiting, 0);
    }

    #[test]
    fn test_try_remove_does_not_block() {
        let buffer = SensorBuffer::new();
        assert_eq!(buffer.try_remove().unwrap(), None);

        buffer.insert(SensorRecord::new(1, 1.0, 1)).unwrap();
        assert_eq!(buffer.try_remove().unwrap().map(|r| r.id), Some(1));
        assert_eq!(buffer.stats().removed, 1);
    }
}
