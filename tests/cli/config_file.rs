//! TOML configuration file handling through the binary

use crate::common::*;

#[test]
fn test_config_file_supplies_paths_and_delays() {
    let ws = Workspace::new();
    let records = synthetic(40, 4, 5);
    ws.write_input("readings.bin", &records);
    std::fs::write(
        ws.path("pipe.toml"),
        r#"
input = "readings.bin"
output = "readings.csv"
consumers = 3
producer-delay-ms = 0
consumer-delay-ms = 0
log-file = "none"
"#,
    )
    .unwrap();

    let output = ws.run(&["--config-file", "pipe.toml"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_same_records(&csv_body(&ws.path("readings.csv")), &records);
}

#[test]
fn test_command_line_overrides_config_file() {
    let ws = Workspace::new();
    let records = synthetic(10, 2, 1);
    ws.write_input("sensor_data", &records);
    std::fs::write(
        ws.path("pipe.toml"),
        "output = \"from-file.csv\"\nproducer-delay-ms = 0\nconsumer-delay-ms = 0\n",
    )
    .unwrap();

    let output = ws.run(&[
        "-c",
        "pipe.toml",
        "-o",
        "from-cli.csv",
        "--log-file",
        "none",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(ws.path("from-cli.csv").exists());
    assert!(!ws.path("from-file.csv").exists());
}

#[test]
fn test_default_config_location_is_used() {
    let ws = Workspace::new();
    ws.write_input("sensor_data", &synthetic(8, 2, 1));
    let config_dir = ws.path(".config").join("Sensorpipe");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("sensorpipe.toml"),
        "output = \"default-config.csv\"\nproducer-delay-ms = 0\nconsumer-delay-ms = 0\n",
    )
    .unwrap();

    let output = ws.run(&["--log-file", "none"]);

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(csv_body(&ws.path("default-config.csv")).len(), 8);
}

#[test]
fn test_missing_config_file_fails() {
    let ws = Workspace::new();

    let output = ws.run(&["--config-file", "absent.toml"]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("absent.toml"));
}

#[test]
fn test_invalid_config_value_fails() {
    let ws = Workspace::new();
    std::fs::write(ws.path("pipe.toml"), "consumers = \"many\"\n").unwrap();

    let output = ws.run(&["-c", "pipe.toml"]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("consumers"));
}
