//! Deterministic synthetic readings for demo and test input files

use crate::queue::{SensorId, SensorRecord, SensorTimestamp};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Settings for [`SyntheticReadings`]
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSpec {
    /// Number of readings to produce
    pub count: usize,
    /// Distinct sensors; ids cycle through `1..=sensors`
    pub sensors: SensorId,
    /// Seed for the value sequence
    pub seed: u64,
    /// Timestamp of the first reading
    pub start_timestamp: SensorTimestamp,
    /// Seconds between consecutive rounds over all sensors
    pub interval_secs: SensorTimestamp,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            count: 100,
            sensors: 8,
            seed: 1,
            start_timestamp: 1_700_000_000,
            interval_secs: 60,
        }
    }
}

const MIN_VALUE: f64 = 15.0;
const MAX_VALUE: f64 = 25.0;

/// Iterator of readings with values in `15.0..=25.0`
///
/// Values come from a `StdRng` seeded with `spec.seed`, so the same spec
/// always yields the same sequence.
pub struct SyntheticReadings {
    spec: SyntheticSpec,
    produced: usize,
    rng: StdRng,
}

impl SyntheticReadings {
    pub fn new(spec: SyntheticSpec) -> Self {
        let rng = StdRng::seed_from_u64(spec.seed);
        Self {
            spec,
            produced: 0,
            rng,
        }
    }
}

impl Iterator for SyntheticReadings {
    type Item = SensorRecord;

    fn next(&mut self) -> Option<SensorRecord> {
        if self.produced >= self.spec.count || self.spec.sensors == 0 {
            return None;
        }

        let sensors = self.spec.sensors as usize;
        let id = (self.produced % sensors) as SensorId + 1;
        let round = (self.produced / sensors) as SensorTimestamp;
        let timestamp = self.spec.start_timestamp + round * self.spec.interval_secs;
        let value = self.rng.gen_range(MIN_VALUE..=MAX_VALUE);

        self.produced += 1;
        Some(SensorRecord::new(id, value, timestamp))
    }
}
