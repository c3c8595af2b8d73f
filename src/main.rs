use std::process::ExitCode;

fn main() -> ExitCode {
    sensorpipe::app::startup::startup()
}
