//! Application startup: arguments, configuration, logging, then dispatch

use super::cli::args::{Args, Command, GenerateArgs};
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::{init_logging, resolve_log_level};
use crate::core::version;
use crate::pipeline::{Pipeline, PipelineResult};
use crate::source::{generate_file, SyntheticSpec};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

/// Parse the process arguments and run the requested command
pub fn startup() -> ExitCode {
    let mut args = Args::parse();

    // Configuration is read before logging exists, so problems go to stderr
    let unknown_keys = match args.load_config_file() {
        Ok(Some((path, config))) => match Args::apply_toml_values(&mut args, &config) {
            Ok(unknown) => Some((path, unknown)),
            Err(e) => {
                eprintln!(
                    "Error in configuration file validation {}: {}",
                    path.display(),
                    e
                );
                return ExitCode::FAILURE;
            }
        },
        Ok(None) => None,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let use_color = args.use_color(std::io::stderr().is_terminal());
    colored::control::set_override(use_color);
    let log_level = resolve_log_level(args.log_level.as_deref(), args.verbosity());
    if let Err(e) = init_logging(
        Some(&log_level),
        args.log_format.as_deref(),
        args.log_file_path(),
        use_color,
    ) {
        eprintln!("Error: cannot initialise logging: {}", e);
        return ExitCode::FAILURE;
    }

    log::info!("{} starting", version::banner());
    if let Some((path, unknown)) = unknown_keys {
        log::debug!("Loaded configuration from {}", path.display());
        for key in unknown {
            log::warn!("Ignoring unknown configuration key '{}' in {}", key, path.display());
        }
    }

    let result = match args.command.clone() {
        Some(Command::Generate(generate)) => run_generate(&args, &generate),
        Some(Command::Run) | None => run_pipeline(&args),
    };

    match result {
        Ok(()) => {
            log::info!("Main process exiting");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error_with_context(&e, "Sensor pipeline failed");
            ExitCode::FAILURE
        }
    }
}

fn run_pipeline(args: &Args) -> PipelineResult<()> {
    let config = args.resolve_pipeline_config()?;
    log::debug!("Pipeline configuration: {:#?}", config);

    let pipeline = Pipeline::new(config)?;
    let summary = pipeline.run_files()?;

    for consumer in &summary.consumers {
        log::debug!(
            "{}: {} consumed, {} written, {} failed",
            consumer.name,
            consumer.consumed,
            consumer.written,
            consumer.write_failures
        );
    }
    if let Some(reason) = &summary.producer.source_error {
        log::warn!("Input ended early: {}", reason);
    }
    Ok(())
}

fn run_generate(args: &Args, generate: &GenerateArgs) -> PipelineResult<()> {
    let path = args
        .input
        .clone()
        .unwrap_or_else(|| PathBuf::from(crate::pipeline::DEFAULT_INPUT));
    let spec = SyntheticSpec {
        count: generate.count,
        sensors: generate.sensors,
        seed: generate.seed,
        ..SyntheticSpec::default()
    };

    let written = generate_file(&path, spec)?;
    log::info!("Wrote {} records to {}", written, path.display());
    Ok(())
}
