//! Monitor configuration.
//!
//! Layers, lowest to highest precedence: built-in defaults, the YAML file
//! given with `--config`, environment (`CANBOX_PORT`, `CANBOX_BAUD`), then
//! explicit command-line flags. Environment and flags arrive together as
//! [`Overrides`] because clap already resolves flag-over-env.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

pub const DEFAULT_BAUD_RATE: u32 = 38_400;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1_000;

/// How decoded records are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Serial device path, e.g. `/dev/ttyUSB0` or `COM3`.
    pub port: Option<String>,
    pub baud_rate: u32,
    pub read_timeout_ms: u64,
    /// Drop consecutive frames of the same function.
    pub suppress_repeats: bool,
    pub output: OutputFormat,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            suppress_repeats: true,
            output: OutputFormat::Human,
        }
    }
}

/// Values taken from the command line or its environment fallbacks.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<String>,
    pub baud_rate: Option<u32>,
    pub read_timeout_ms: Option<u64>,
    pub no_suppress: bool,
    pub json: bool,
}

impl MonitorConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MonitorError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, MonitorError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Resolve the effective configuration for one invocation.
    pub fn resolve(file: Option<&Path>, overrides: &Overrides) -> Result<Self, MonitorError> {
        let mut config = match file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(port) = &overrides.port {
            self.port = Some(port.clone());
        }
        if let Some(baud) = overrides.baud_rate {
            self.baud_rate = baud;
        }
        if let Some(timeout) = overrides.read_timeout_ms {
            self.read_timeout_ms = timeout;
        }
        if overrides.no_suppress {
            self.suppress_repeats = false;
        }
        if overrides.json {
            self.output = OutputFormat::Json;
        }
    }

    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.baud_rate == 0 {
            return Err(MonitorError::InvalidConfiguration(
                "baud_rate must be non-zero".to_string(),
            ));
        }
        if self.read_timeout_ms == 0 {
            return Err(MonitorError::InvalidConfiguration(
                "read_timeout_ms must be non-zero".to_string(),
            ));
        }
        if self.port.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(MonitorError::InvalidConfiguration(
                "port must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Serial port for a live session.
    pub fn require_port(&self) -> Result<&str, MonitorError> {
        self.port.as_deref().ok_or_else(|| {
            MonitorError::InvalidConfiguration(
                "no serial port configured (use --port, CANBOX_PORT or the config file)"
                    .to_string(),
            )
        })
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}
