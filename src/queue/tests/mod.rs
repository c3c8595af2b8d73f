//! Test modules for the sensor buffer
//!
//! Tests are organized by functional area.


use crate::queue::SensorBuffer;
use std::time::{Duration, Instant};

/// Poll `condition` until it holds or `limit` elapses
pub(crate) fn wait_until(limit: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + limit;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    condition()
}

/// Wait until `count` consumers are parked inside `remove`
pub(crate) fn wait_for_waiters(buffer: &SensorBuffer, count: usize) {
    assert!(
        wait_until(Duration::from_secs(5), || buffer.stats().waiting == count),
        "Expected {} waiting consumers, stats: {:?}",
        count,
        buffer.stats()
    );
}
