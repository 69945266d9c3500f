//! Error types for canbox-monitor

use std::path::PathBuf;

use thiserror::Error;

use crate::source::SourceError;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to open serial port {port}: {source}")]
    PortOpen {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Invalid capture {path}: {reason}")]
    InvalidCapture { path: PathBuf, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Byte source error: {0}")]
    Source(#[from] SourceError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl MonitorError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            MonitorError::InvalidConfiguration(_) | MonitorError::YamlError(_) => 2,
            MonitorError::PortOpen { .. } | MonitorError::Source(_) => 3,
            MonitorError::InvalidCapture { .. } | MonitorError::InvalidInput(_) => 4,
            MonitorError::IoError(_) | MonitorError::JsonError(_) => 1,
        }
    }

    /// Short machine-readable category.
    pub fn kind(&self) -> &'static str {
        match self {
            MonitorError::InvalidConfiguration(_) => "invalid_configuration",
            MonitorError::PortOpen { .. } => "port_open",
            MonitorError::InvalidCapture { .. } => "invalid_capture",
            MonitorError::InvalidInput(_) => "invalid_input",
            MonitorError::Source(_) => "source",
            MonitorError::IoError(_) => "io",
            MonitorError::JsonError(_) => "json",
            MonitorError::YamlError(_) => "yaml",
        }
    }
}
