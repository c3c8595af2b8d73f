//! Pipeline runs through the binary

use crate::common::*;
use sensorpipe::queue::SensorRecord;

fn unpaced<'a>(args: &[&'a str]) -> Vec<&'a str> {
    let mut all = vec![
        "--producer-delay",
        "0",
        "--consumer-delay",
        "0",
        "--log-file",
        "none",
    ];
    all.extend_from_slice(args);
    all
}

#[test]
fn test_run_writes_every_record_once() {
    let ws = Workspace::new();
    let records = synthetic(250, 6, 7);
    ws.write_input("sensor_data", &records);

    let output = ws.run(&unpaced(&["--consumers", "4"]));

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    let lines = csv_body(&ws.path("sensor_data_out.csv"));
    assert_same_records(&lines, &records);
}

#[test]
fn test_run_subcommand_with_explicit_paths() {
    let ws = Workspace::new();
    let records = synthetic(30, 3, 2);
    let input = ws.write_input("in.bin", &records);
    let out = ws.path("out.csv");

    let output = ws.run(&unpaced(&[
        "run",
        "-i",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]));

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_same_records(&csv_body(&out), &records);
}

#[test]
fn test_single_consumer_preserves_input_order() {
    let ws = Workspace::new();
    let records = synthetic(50, 4, 11);
    ws.write_input("sensor_data", &records);

    let output = ws.run(&unpaced(&["-n", "1"]));

    assert!(output.status.success());
    let expected: Vec<String> = records.iter().map(SensorRecord::to_csv_line).collect();
    assert_eq!(csv_body(&ws.path("sensor_data_out.csv")), expected);
}

#[test]
fn test_empty_input_produces_header_only() {
    let ws = Workspace::new();
    ws.write_input("sensor_data", &[]);

    let output = ws.run(&unpaced(&["-n", "3"]));

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(csv_body(&ws.path("sensor_data_out.csv")).is_empty());
}

#[test]
fn test_values_are_written_with_four_decimals() {
    let ws = Workspace::new();
    ws.write_input(
        "sensor_data",
        &[SensorRecord::new(7, 21.123456, 1_700_000_000)],
    );

    let output = ws.run(&unpaced(&[]));

    assert!(output.status.success());
    assert_eq!(
        csv_body(&ws.path("sensor_data_out.csv")),
        vec!["7,21.1235,1700000000".to_string()]
    );
}

#[test]
fn test_truncated_tail_is_ignored() {
    let ws = Workspace::new();
    let records = synthetic(5, 2, 3);
    let input = ws.write_input("sensor_data", &records);
    {
        use std::io::Write;
        let mut file = std::fs::OpenOptions::new().append(true).open(&input).unwrap();
        file.write_all(&[1, 2, 3]).unwrap();
    }

    let output = ws.run(&unpaced(&[]));

    assert!(output.status.success());
    assert_same_records(&csv_body(&ws.path("sensor_data_out.csv")), &records);
}

#[test]
fn test_missing_input_fails() {
    let ws = Workspace::new();

    let output = ws.run(&unpaced(&["-i", "does-not-exist"]));

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("does-not-exist"));
}

#[test]
fn test_zero_consumers_rejected() {
    let ws = Workspace::new();
    ws.write_input("sensor_data", &synthetic(3, 1, 1));

    let output = ws.run(&["--consumers", "0"]);

    assert!(!output.status.success());
    assert!(!ws.path("sensor_data_out.csv").exists());
}

#[test]
fn test_same_input_and_output_rejected() {
    let ws = Workspace::new();
    ws.write_input("data", &synthetic(3, 1, 1));

    let output = ws.run(&unpaced(&["-i", "data", "-o", "data"]));

    assert!(!output.status.success());
    assert_eq!(
        std::fs::metadata(ws.path("data")).unwrap().len(),
        3 * sensorpipe::source::RECORD_SIZE as u64
    );
}
