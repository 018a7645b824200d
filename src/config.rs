//! Configuration management for webcalc.
//!
//! Configuration is loaded from (in order of precedence):
//! 1. Command-line arguments
//! 2. Environment variables (WEBCALC_*)
//! 3. Config file (~/.config/webcalc/config.toml, or the file given with --config)
//! 4. Default values

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::calculator::Calculator;
use crate::engine::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_LENGTH};
use crate::format::DEFAULT_PRECISION;
use crate::rewrite::Rewrites;
use crate::server::{ServerConfig, ServerError};
use crate::telemetry::TelemetryConfig;

/// Prefix of the environment variables that override the config file.
pub const ENV_PREFIX: &str = "WEBCALC_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Server host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable permissive CORS.
    #[serde(default = "default_true")]
    pub cors: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON.
    #[serde(default)]
    pub json_logs: bool,

    /// Significant digits for non-integral results.
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Maximum nesting depth of an expression.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum expression length in bytes.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Enabled input substitutions.
    #[serde(default = "default_rewrites")]
    pub rewrites: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_rewrites() -> Vec<String> {
    ["strip_spaces", "radical", "pi", "percent"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: default_true(),
            log_level: default_log_level(),
            json_logs: false,
            precision: default_precision(),
            max_depth: default_max_depth(),
            max_length: default_max_length(),
            rewrites: default_rewrites(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file and the environment.
    pub fn load() -> Self {
        Self::load_from(None)
    }

    /// Loads configuration, reading `path` instead of the default config file
    /// when one is given.
    ///
    /// Reports warnings for configuration errors but falls back to defaults.
    pub fn load_from(path: Option<&Path>) -> Self {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        match Self::try_load_from(Some(&config_path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("\x1b[33mWarning:\x1b[0m Configuration error, using defaults");
                eprintln!("  Config file: {}", config_path.display());
                eprintln!("  Error: {}", e);
                eprintln!();
                Config::default()
            }
        }
    }

    /// Loads configuration, returning any error instead of falling back.
    pub fn try_load_from(path: Option<&Path>) -> Result<Self, figment::Error> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
    }

    /// Returns the path to the config file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Returns the path to the config directory.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("webcalc")
    }

    /// The enabled substitutions.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unknown substitution.
    pub fn rewrites(&self) -> Result<Rewrites, ServerError> {
        self.rewrites.iter().try_fold(Rewrites::empty(), |acc, name| {
            Rewrites::from_config_name(name)
                .map(|flag| acc | flag)
                .ok_or_else(|| ServerError::InvalidConfig {
                    message: format!(
                        "unknown rewrite '{}' (expected strip_spaces, radical, pi or percent)",
                        name
                    ),
                })
        })
    }

    /// Builds the calculator this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown rewrites or zero limits.
    pub fn calculator(&self) -> Result<Calculator, ServerError> {
        if self.precision == 0 || self.precision > 17 {
            return Err(ServerError::InvalidConfig {
                message: format!("precision must be between 1 and 17, got {}", self.precision),
            });
        }
        if self.max_depth == 0 || self.max_length == 0 {
            return Err(ServerError::InvalidConfig {
                message: "max_depth and max_length must be positive".to_string(),
            });
        }
        Ok(Calculator::builder()
            .rewrites(self.rewrites()?)
            .precision(self.precision)
            .max_depth(self.max_depth)
            .max_length(self.max_length)
            .build())
    }

    /// Builds the server configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` is not an IP address.
    pub fn server_config(&self) -> Result<ServerConfig, ServerError> {
        Ok(ServerConfig::builder()
            .host_port(&self.host, self.port)?
            .cors(self.cors)
            .build())
    }

    /// Builds the logging configuration.
    pub fn telemetry(&self) -> TelemetryConfig {
        let telemetry = TelemetryConfig::new("webcalc").with_log_level(&self.log_level);
        if self.json_logs {
            telemetry.with_json_logs()
        } else {
            telemetry
        }
    }
}

/// Prints the current configuration and its sources.
pub fn show_config(path: Option<&Path>) {
    let config = Config::load_from(path);
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(Config::config_path);

    println!("webcalc Configuration");
    println!("=====================\n");

    println!("Config file: {}", config_path.display());
    if config_path.exists() {
        println!("Status: Found\n");
    } else {
        println!("Status: Not found (using defaults)\n");
    }

    println!("Current settings:");
    match toml::to_string_pretty(&config) {
        Ok(rendered) => {
            for line in rendered.lines() {
                println!("  {}", line);
            }
        }
        Err(e) => println!("  (could not render settings: {})", e),
    }

    println!("\nEnvironment variables:");
    for key in [
        "HOST",
        "PORT",
        "CORS",
        "LOG_LEVEL",
        "JSON_LOGS",
        "PRECISION",
        "MAX_DEPTH",
        "MAX_LENGTH",
        "REWRITES",
    ] {
        println!("  {}{}", ENV_PREFIX, key);
    }
}
