//! Core CLI arguments structure
//!
//! Every pipeline setting is optional here so that values from the TOML
//! configuration file can fill the gaps; see `config.rs` for the merge and
//! `resolve_pipeline_config` for defaults.

use crate::core::logging::{LOG_FORMATS, LOG_LEVELS};
use crate::core::validation::validate_positive_int;
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sensorpipe")]
#[command(about = "Stream binary sensor readings through a shared buffer into CSV")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Binary input file of sensor records [default: sensor_data]
    #[arg(short = 'i', long = "input", value_name = "FILE", global = true)]
    pub input: Option<PathBuf>,

    /// CSV output file [default: sensor_data_out.csv]
    #[arg(short = 'o', long = "output", value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Number of consumer threads [default: 2]
    #[arg(short = 'n', long = "consumers", value_name = "COUNT", global = true, value_parser = validate_positive_int)]
    pub consumers: Option<usize>,

    /// Producer pause after each record, in milliseconds [default: 10]
    #[arg(long = "producer-delay", value_name = "MS", global = true)]
    pub producer_delay_ms: Option<u64>,

    /// Consumer pause after each record, in milliseconds [default: 25]
    #[arg(long = "consumer-delay", value_name = "MS", global = true)]
    pub consumer_delay_ms: Option<u64>,

    /// Records to reserve in the buffer before starting
    #[arg(long = "buffer-capacity", value_name = "COUNT", global = true)]
    pub buffer_capacity: Option<usize>,

    /// Verbose output (can be used multiple times for more verbosity)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (can be used multiple times for less verbosity)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Force colored log output
    #[arg(long = "color", action = ArgAction::SetTrue, global = true)]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color", action = ArgAction::SetTrue, global = true, conflicts_with = "color")]
    pub no_color: bool,

    /// Log level
    #[arg(long = "log-level", value_name = "LEVEL", global = true, value_parser = LOG_LEVELS)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", global = true, value_parser = LOG_FORMATS)]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Color setting from the configuration file
    #[arg(skip)]
    pub config_color: Option<bool>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the producer/consumer pipeline (default)
    Run,
    /// Write a deterministic synthetic input file
    Generate(GenerateArgs),
}

#[derive(ClapArgs, Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// Number of records to write
    #[arg(long = "count", value_name = "COUNT", default_value_t = 100)]
    pub count: usize,

    /// Number of distinct sensors (ids 1..=N)
    #[arg(long = "sensors", value_name = "N", default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..))]
    pub sensors: u16,

    /// Seed for the value sequence
    #[arg(long = "seed", value_name = "SEED", default_value_t = 1)]
    pub seed: u64,
}

impl Args {
    /// Net verbosity: each -v adds one, each -q removes one
    pub fn verbosity(&self) -> i8 {
        (self.verbose.min(i8::MAX as u8) as i8).saturating_sub(self.quiet.min(i8::MAX as u8) as i8)
    }

    /// Whether log output should be colored
    ///
    /// Flags win over the configuration file, which wins over terminal detection.
    pub fn use_color(&self, is_terminal: bool) -> bool {
        if self.no_color {
            return false;
        }
        if self.color {
            return true;
        }
        self.config_color.unwrap_or(is_terminal)
    }

    /// Log file path, treating the literal `none` as "no file"
    pub fn log_file_path(&self) -> Option<&str> {
        self.log_file
            .as_deref()
            .and_then(|p| p.to_str())
            .filter(|p| !p.eq_ignore_ascii_case("none"))
    }
}
