//! TOML configuration file parsing and loading
//!
//! Handles default config file discovery, merging file values under the
//! command-line values, and resolving the final pipeline configuration.

use crate::core::logging::{LOG_FORMATS, LOG_LEVELS};
use crate::core::validation::ValidationError;
use crate::pipeline::{
    PipelineConfig, DEFAULT_CONSUMERS, DEFAULT_CONSUMER_DELAY_MS, DEFAULT_INPUT, DEFAULT_OUTPUT,
    DEFAULT_PRODUCER_DELAY_MS,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::args::Args;

/// Keys recognised in the configuration file
pub const CONFIG_KEYS: [&str; 10] = [
    "input",
    "output",
    "consumers",
    "producer-delay-ms",
    "consumer-delay-ms",
    "buffer-capacity",
    "log-level",
    "log-format",
    "log-file",
    "color",
];

/// Default configuration file location, e.g. `~/.config/Sensorpipe/sensorpipe.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Sensorpipe").join("sensorpipe.toml"))
}

impl Args {
    /// Locate and parse the configuration file
    ///
    /// An explicitly requested file must exist. Without one, the default
    /// location is used only if present.
    pub fn load_config_file(&self) -> Result<Option<(PathBuf, toml::Table)>, ValidationError> {
        let config_path = match &self.config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ValidationError::new(format!(
                        "The specified configuration file does not exist: {}",
                        path.display()
                    )));
                }
                path.clone()
            }
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(None),
            },
        };

        let table = Self::read_config(&config_path)?;
        Ok(Some((config_path, table)))
    }

    fn read_config(path: &Path) -> Result<toml::Table, ValidationError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::new(format!(
                "Error reading configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str::<toml::Table>(&contents).map_err(|e| {
            ValidationError::new(format!(
                "Error parsing configuration file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Apply TOML configuration values to fields not set on the command line
    ///
    /// Returns the unknown keys so the caller can warn about them once logging
    /// is up.
    pub fn apply_toml_values(
        args: &mut Self,
        config: &toml::Table,
    ) -> Result<Vec<String>, ValidationError> {
        if args.input.is_none() {
            args.input = Self::string_field(config, "input")?.map(PathBuf::from);
        }
        if args.output.is_none() {
            args.output = Self::string_field(config, "output")?.map(PathBuf::from);
        }
        if args.consumers.is_none() {
            args.consumers = Self::count_field(config, "consumers")?;
            if args.consumers == Some(0) {
                return Err(ValidationError::new(
                    "Configuration value 'consumers' must be at least 1",
                ));
            }
        }
        if args.producer_delay_ms.is_none() {
            args.producer_delay_ms = Self::count_field(config, "producer-delay-ms")?
                .map(|v| v as u64);
        }
        if args.consumer_delay_ms.is_none() {
            args.consumer_delay_ms = Self::count_field(config, "consumer-delay-ms")?
                .map(|v| v as u64);
        }
        if args.buffer_capacity.is_none() {
            args.buffer_capacity = Self::count_field(config, "buffer-capacity")?;
        }
        if args.log_level.is_none() {
            args.log_level = Self::choice_field(config, "log-level", &LOG_LEVELS)?;
        }
        if args.log_format.is_none() {
            args.log_format = Self::choice_field(config, "log-format", &LOG_FORMATS)?;
        }
        if args.log_file.is_none() {
            args.log_file = Self::string_field(config, "log-file")?.map(PathBuf::from);
        }
        if let Some(value) = config.get("color") {
            let color = value.as_bool().ok_or_else(|| {
                ValidationError::new("Configuration value 'color' must be true or false")
            })?;
            args.config_color = Some(color);
        }

        Ok(config
            .keys()
            .filter(|key| !CONFIG_KEYS.contains(&key.as_str()))
            .cloned()
            .collect())
    }

    fn string_field(config: &toml::Table, key: &str) -> Result<Option<String>, ValidationError> {
        match config.get(key) {
            None => Ok(None),
            Some(value) => value.as_str().map(|s| Some(s.to_string())).ok_or_else(|| {
                ValidationError::new(format!("Configuration value '{}' must be a string", key))
            }),
        }
    }

    fn count_field(config: &toml::Table, key: &str) -> Result<Option<usize>, ValidationError> {
        match config.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_integer()
                .and_then(|v| usize::try_from(v).ok())
                .map(Some)
                .ok_or_else(|| {
                    ValidationError::new(format!(
                        "Configuration value '{}' must be a non-negative integer",
                        key
                    ))
                }),
        }
    }

    fn choice_field(
        config: &toml::Table,
        key: &str,
        allowed: &[&str],
    ) -> Result<Option<String>, ValidationError> {
        match Self::string_field(config, key)? {
            None => Ok(None),
            Some(value) if allowed.contains(&value.to_lowercase().as_str()) => {
                Ok(Some(value.to_lowercase()))
            }
            Some(value) => Err(ValidationError::new(format!(
                "Configuration value '{}' must be one of {} (got '{}')",
                key,
                allowed.join(", "),
                value
            ))),
        }
    }

    /// Build the validated pipeline configuration, filling in defaults
    pub fn resolve_pipeline_config(&self) -> Result<PipelineConfig, ValidationError> {
        let config = PipelineConfig {
            input: self
                .input
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output: self
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            consumers: self.consumers.unwrap_or(DEFAULT_CONSUMERS),
            producer_delay: Duration::from_millis(
                self.producer_delay_ms.unwrap_or(DEFAULT_PRODUCER_DELAY_MS),
            ),
            consumer_delay: Duration::from_millis(
                self.consumer_delay_ms.unwrap_or(DEFAULT_CONSUMER_DELAY_MS),
            ),
            buffer_capacity: self.buffer_capacity.unwrap_or(0),
        };
        config.validate()?;
        Ok(config)
    }
}
