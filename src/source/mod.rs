//! Record sources feeding the producer
//!
//! A source yields readings until it is exhausted. Exhaustion is the only end
//! signal; the producer turns it into the buffer's end-of-stream marker.

mod binary;
mod error;
mod synthetic;

pub use binary::{decode_record, encode_record, write_records, BinarySource, RECORD_SIZE};
pub use error::{SourceError, SourceResult};
pub use synthetic::{SyntheticReadings, SyntheticSpec};

use crate::queue::SensorRecord;
use std::collections::VecDeque;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// A sequence of sensor readings read by the producer
pub trait RecordSource: Send {
    /// Next record, or `Ok(None)` once the source is exhausted
    fn next_record(&mut self) -> SourceResult<Option<SensorRecord>>;
}

/// In-memory source, mainly for tests and embedding
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    records: VecDeque<SensorRecord>,
}

impl MemorySource {
    pub fn new(records: impl IntoIterator<Item = SensorRecord>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl RecordSource for MemorySource {
    fn next_record(&mut self) -> SourceResult<Option<SensorRecord>> {
        Ok(self.records.pop_front())
    }
}

/// Write a synthetic binary input file, returning the number of records
pub fn generate_file(path: &Path, spec: SyntheticSpec) -> SourceResult<usize> {
    let write_error = |e: std::io::Error| SourceError::Write {
        message: format!("Cannot write input file {}: {}", path.display(), e),
    };

    let mut writer = BufWriter::new(File::create(path).map_err(write_error)?);
    write_records(&mut writer, SyntheticReadings::new(spec)).map_err(write_error)
}
