//! Synthetic input generation through the binary

use crate::common::*;
use sensorpipe::source::RECORD_SIZE;

#[test]
fn test_generate_then_run() {
    let ws = Workspace::new();

    let generated = ws.run(&["generate", "--count", "120", "--sensors", "5", "--seed", "9"]);
    assert!(generated.status.success(), "stderr: {}", stderr_of(&generated));
    assert_eq!(
        std::fs::metadata(ws.path("sensor_data")).unwrap().len(),
        (120 * RECORD_SIZE) as u64
    );

    let output = ws.run(&[
        "--producer-delay",
        "0",
        "--consumer-delay",
        "0",
        "--log-file",
        "none",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_same_records(&csv_body(&ws.path("sensor_data_out.csv")), &synthetic(120, 5, 9));
}

#[test]
fn test_generate_is_deterministic() {
    let ws = Workspace::new();

    assert!(ws.run(&["generate", "-i", "a.bin", "--seed", "3"]).status.success());
    assert!(ws.run(&["generate", "-i", "b.bin", "--seed", "3"]).status.success());
    assert!(ws.run(&["generate", "-i", "c.bin", "--seed", "4"]).status.success());

    let a = std::fs::read(ws.path("a.bin")).unwrap();
    assert_eq!(a, std::fs::read(ws.path("b.bin")).unwrap());
    assert_ne!(a, std::fs::read(ws.path("c.bin")).unwrap());
}

#[test]
fn test_generate_rejects_zero_sensors() {
    let ws = Workspace::new();

    let output = ws.run(&["generate", "--sensors", "0"]);

    assert!(!output.status.success());
    assert!(!ws.path("sensor_data").exists());
}
