//! CLI Integration Test Modules

pub mod config_file;
pub mod generate_command;
pub mod run_command;
