//! Byte sources feeding the frame assembler.

use std::io::{ErrorKind, Read};
use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::error::MonitorError;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("device disconnected")]
    Disconnected,
}

/// A blocking, timeout-bounded stream of bytes.
pub trait ByteSource {
    /// Next byte, or `Ok(None)` if nothing arrived within the read timeout.
    fn read_byte(&mut self) -> Result<Option<u8>, SourceError>;

    /// Whether the source has ended and will never yield another byte.
    fn is_closed(&self) -> bool;
}

// ── Serial ───────────────────────────────────────────────────────────────────

pub struct SerialSource {
    port: Box<dyn serialport::SerialPort>,
    name: String,
}

impl SerialSource {
    pub fn open(name: &str, baud_rate: u32, timeout: Duration) -> Result<Self, MonitorError> {
        let port = serialport::new(name, baud_rate)
            .timeout(timeout)
            .open()
            .map_err(|source| MonitorError::PortOpen {
                port: name.to_string(),
                source,
            })?;
        info!(port = name, baud_rate, timeout_ms = timeout.as_millis(), "serial port opened");
        Ok(Self {
            port,
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ByteSource for SerialSource {
    fn read_byte(&mut self) -> Result<Option<u8>, SourceError> {
        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(0) => Err(SourceError::Disconnected),
            Ok(_) => {
                let [byte] = buf;
                Ok(Some(byte))
            }
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn is_closed(&self) -> bool {
        false
    }
}

// ── Replay ───────────────────────────────────────────────────────────────────

/// Replays captured bytes, then closes.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    bytes: Vec<u8>,
    pos: usize,
}

impl ReplaySource {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Load a capture file, either raw binary or hex text.
    pub fn from_file(path: &Path, binary: bool) -> Result<Self, MonitorError> {
        let bytes = if binary {
            std::fs::read(path)?
        } else {
            let text = std::fs::read_to_string(path)?;
            parse_hex_capture(&text).map_err(|reason| MonitorError::InvalidCapture {
                path: path.to_path_buf(),
                reason,
            })?
        };
        debug!(path = %path.display(), len = bytes.len(), "capture loaded");
        Ok(Self::from_bytes(bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl ByteSource for ReplaySource {
    fn read_byte(&mut self) -> Result<Option<u8>, SourceError> {
        let byte = self.bytes.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }

    fn is_closed(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}

// ── Hex parsing ──────────────────────────────────────────────────────────────

/// Parse one hex token: `2E`, `0x2E`, or an even-length run like `2E1D04`.
pub fn parse_hex_token(token: &str) -> Result<Vec<u8>, String> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || !digits.len().is_multiple_of(2) {
        return Err(format!("invalid hex token '{token}'"));
    }
    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| format!("invalid hex token '{token}'"))
        })
        .collect()
}

/// Parse whitespace or comma separated hex bytes.
pub fn parse_hex_bytes(text: &str) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    for token in text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        out.extend(parse_hex_token(token)?);
    }
    Ok(out)
}

/// Parse a hex capture file. `#` starts a comment running to end of line.
pub fn parse_hex_capture(text: &str) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default();
        let bytes = parse_hex_bytes(content).map_err(|e| format!("{e} on line {}", idx + 1))?;
        out.extend(bytes);
    }
    Ok(out)
}
