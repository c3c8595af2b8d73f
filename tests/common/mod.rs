//! Common test utilities and helpers
//!
//! Runs the built binary in an isolated directory so no user configuration
//! file leaks into the results.

#![allow(dead_code)]

use sensorpipe::queue::SensorRecord;
use sensorpipe::source::{write_records, SyntheticReadings, SyntheticSpec};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Run the binary with the workspace as working directory and home
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_sensorpipe"))
            .args(args)
            .current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join(".config"))
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    /// Write a binary input file and return the records in it
    pub fn write_input(&self, name: &str, records: &[SensorRecord]) -> PathBuf {
        let path = self.path(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write_records(&mut file, records.iter().copied()).unwrap();
        path
    }
}

pub fn synthetic(count: usize, sensors: u16, seed: u64) -> Vec<SensorRecord> {
    SyntheticReadings::new(SyntheticSpec {
        count,
        sensors,
        seed,
        ..SyntheticSpec::default()
    })
    .collect()
}

/// Output lines after the header, checking the header on the way
pub fn csv_body(path: &Path) -> Vec<String> {
    let contents = std::fs::read_to_string(path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("id,value,timestamp"));
    lines.map(str::to_string).collect()
}

/// Compare output lines with the expected records, ignoring order
pub fn assert_same_records(lines: &[String], expected: &[SensorRecord]) {
    assert_eq!(lines.len(), expected.len(), "record count differs");
    let got: HashSet<&str> = lines.iter().map(String::as_str).collect();
    assert_eq!(got.len(), lines.len(), "duplicate line in output");
    for record in expected {
        assert!(
            got.contains(record.to_csv_line().as_str()),
            "missing {}",
            record
        );
    }
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
