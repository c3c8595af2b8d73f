//! Fixed-layout binary record reader and writer
//!
//! Each record is 18 packed little-endian bytes: `id: u16`, `value: f64`,
//! `timestamp: i64`. There is no header and no end marker; the stream ends
//! when the input is exhausted.

use crate::queue::SensorRecord;
use crate::source::error::{SourceError, SourceResult};
use crate::source::RecordSource;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Write};
use std::path::Path;

/// Encoded size of one record
pub const RECORD_SIZE: usize = 2 + 8 + 8;

pub fn encode_record(record: &SensorRecord) -> [u8; RECORD_SIZE] {
    let mut bytes = [0u8; RECORD_SIZE];
    bytes[0..2].copy_from_slice(&record.id.to_le_bytes());
    bytes[2..10].copy_from_slice(&record.value.to_le_bytes());
    bytes[10..18].copy_from_slice(&record.timestamp.to_le_bytes());
    bytes
}

pub fn decode_record(bytes: &[u8; RECORD_SIZE]) -> SensorRecord {
    let mut id = [0u8; 2];
    let mut value = [0u8; 8];
    let mut timestamp = [0u8; 8];
    id.copy_from_slice(&bytes[0..2]);
    value.copy_from_slice(&bytes[2..10]);
    timestamp.copy_from_slice(&bytes[10..18]);

    SensorRecord::new(
        u16::from_le_bytes(id),
        f64::from_le_bytes(value),
        i64::from_le_bytes(timestamp),
    )
}

/// Write records in the binary layout, returning how many were written
pub fn write_records<W, I>(writer: &mut W, records: I) -> std::io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = SensorRecord>,
{
    let mut count = 0;
    for record in records {
        writer.write_all(&encode_record(&record))?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Reads records from any byte stream
pub struct BinarySource<R: Read> {
    reader: R,
    offset: u64,
}

impl BinarySource<BufReader<File>> {
    /// Open a binary record file
    pub fn open(path: &Path) -> SourceResult<Self> {
        let file = File::open(path).map_err(|e| SourceError::Open {
            message: format!("Cannot open input file {}: {}", path.display(), e),
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> BinarySource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, offset: 0 }
    }

    /// Bytes consumed so far
    pub fn offset(&self) -> u64 {
        self.offset
    }

    // Read until `buf` is full or the input ends; returns bytes read
    fn fill(&mut self, buf: &mut [u8]) -> SourceResult<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(SourceError::Io {
                        offset: self.offset + filled as u64,
                        source,
                    })
                }
            }
        }
        Ok(filled)
    }
}

impl<R: Read + Send> RecordSource for BinarySource<R> {
    fn next_record(&mut self) -> SourceResult<Option<SensorRecord>> {
        let mut bytes = [0u8; RECORD_SIZE];
        let found = self.fill(&mut bytes)?;
        let start = self.offset;
        self.offset += found as u64;

        match found {
            0 => Ok(None),
            RECORD_SIZE => Ok(Some(decode_record(&bytes))),
            _ => Err(SourceError::Truncated {
                offset: start,
                found,
                expected: RECORD_SIZE,
            }),
        }
    }
}
