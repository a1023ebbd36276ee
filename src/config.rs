//! Console configuration.
//!
//! Deserialized from an optional TOML file merged with environment
//! variables prefixed with `CMDHUB_` (nested keys separated by `__`, e.g.
//! `CMDHUB_LOGGING__LEVEL=debug`).

use serde::{Deserialize, Serialize};

/// Root console configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Prompt printed before each read in interactive mode.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            prompt: default_prompt(),
        }
    }
}

/// Logging and tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Log format: `"json"` or `"pretty"`.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// `path` is required when given; without it only `cmdhub.toml` in the
    /// working directory is consulted, and it may be absent.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder =
            config::Config::builder().add_source(config::File::with_name("cmdhub").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder
            .add_source(
                config::Environment::with_prefix("CMDHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

fn default_prompt() -> String {
    "cmdhub> ".to_string()
}
