//! Output sinks for dispatched frames.

use std::io::Write;

use canbox_protocol::{FrameOutcome, ValidationRecord};
use colored::Colorize;
use serde_json::{Map, Value, json};

use crate::error::MonitorError;

/// Receives every frame the dispatcher did not suppress.
pub trait FrameSink {
    fn emit(&mut self, outcome: &FrameOutcome) -> Result<(), MonitorError>;
}

impl<T: FrameSink + ?Sized> FrameSink for Box<T> {
    fn emit(&mut self, outcome: &FrameOutcome) -> Result<(), MonitorError> {
        (**self).emit(outcome)
    }
}

pub(crate) fn hex_spaced(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn hex_compact(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

// ── Human ────────────────────────────────────────────────────────────────────

/// Multi-line colored records for a terminal.
pub struct HumanSink<W: Write> {
    out: W,
}

impl<W: Write> HumanSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn header(&mut self, record: &ValidationRecord) -> std::io::Result<()> {
        let checksum = if record.checksum_ok {
            format!("0x{:02X} ok", record.checksum).green()
        } else {
            format!(
                "0x{:02X} MISMATCH (expected 0x{:02X})",
                record.checksum, record.computed_checksum
            )
            .red()
        };
        writeln!(
            self.out,
            "{} [0x{:02X}] start=0x{:02X} len={} payload=[{}] checksum={}",
            record.function_name.bold(),
            record.function_id,
            record.start,
            record.declared_len,
            hex_spaced(&record.payload),
            checksum
        )
    }
}

impl<W: Write> FrameSink for HumanSink<W> {
    fn emit(&mut self, outcome: &FrameOutcome) -> Result<(), MonitorError> {
        match outcome {
            FrameOutcome::Decoded { record, message } => {
                self.header(record)?;
                for field in message.fields() {
                    writeln!(self.out, "  {}: {}", field.name.cyan(), field.value)?;
                }
            }
            FrameOutcome::Undecoded { record } => {
                self.header(record)?;
                writeln!(self.out, "  {}", "no decoder for this function".dimmed())?;
            }
            FrameOutcome::UnknownFunction { record } => {
                self.header(record)?;
            }
            FrameOutcome::ShortPayload { record, error } => {
                self.header(record)?;
                writeln!(self.out, "  {} {error}", "error:".yellow())?;
            }
            FrameOutcome::Malformed { raw, reason } => {
                writeln!(
                    self.out,
                    "{} [{}] {reason}",
                    "Malformed frame".red().bold(),
                    hex_spaced(raw)
                )?;
            }
            FrameOutcome::Suppressed { .. } => return Ok(()),
        }
        self.out.flush()?;
        Ok(())
    }
}

// ── JSON ─────────────────────────────────────────────────────────────────────

/// One JSON object per line.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// JSON object for one outcome, or `None` for suppressed frames.
pub fn outcome_json(outcome: &FrameOutcome) -> Result<Option<Value>, MonitorError> {
    let value = match outcome {
        FrameOutcome::Decoded { record, message } => {
            let mut decoded = Map::new();
            for field in message.fields() {
                decoded.insert(field.name.to_string(), serde_json::to_value(&field.value)?);
            }
            record_json(record, Value::Object(decoded), Value::Null)
        }
        FrameOutcome::Undecoded { record } | FrameOutcome::UnknownFunction { record } => {
            record_json(record, Value::Null, Value::Null)
        }
        FrameOutcome::ShortPayload { record, error } => {
            record_json(record, Value::Null, Value::String(error.to_string()))
        }
        FrameOutcome::Malformed { raw, reason } => json!({
            "start": raw.first(),
            "function_id": Value::Null,
            "function": Value::Null,
            "length": Value::Null,
            "payload": Value::Null,
            "checksum": Value::Null,
            "checksum_ok": Value::Null,
            "decoded": Value::Null,
            "error": reason,
            "raw": hex_compact(raw),
        }),
        FrameOutcome::Suppressed { .. } => return Ok(None),
    };
    Ok(Some(value))
}

fn record_json(record: &ValidationRecord, decoded: Value, error: Value) -> Value {
    json!({
        "start": record.start,
        "function_id": record.function_id,
        "function": record.function_name,
        "length": record.declared_len,
        "payload": hex_compact(&record.payload),
        "checksum": record.checksum,
        "checksum_ok": record.checksum_ok,
        "decoded": decoded,
        "error": error,
    })
}

impl<W: Write> FrameSink for JsonSink<W> {
    fn emit(&mut self, outcome: &FrameOutcome) -> Result<(), MonitorError> {
        if let Some(value) = outcome_json(outcome)? {
            writeln!(self.out, "{value}")?;
            self.out.flush()?;
        }
        Ok(())
    }
}

// ── Errors ───────────────────────────────────────────────────────────────────

/// Print error in JSON format
pub fn print_error_json(error: &anyhow::Error) {
    let kind = error
        .downcast_ref::<MonitorError>()
        .map_or("error", MonitorError::kind);
    let value = json!({
        "success": false,
        "error": {
            "message": format!("{error:#}"),
            "type": kind,
        }
    });
    println!("{value}");
}

/// Print error in human-readable format
pub fn print_error_human(error: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);
    for cause in error.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".yellow(), cause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canbox_protocol::{Dispatcher, encode_frame};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn front_radar() -> Result<FrameOutcome, Box<dyn std::error::Error>> {
        let frame = encode_frame(0x1D, &[1, 2, 3, 4])?;
        Ok(Dispatcher::new().process(&frame))
    }

    #[test]
    fn json_record_keys() -> TestResult {
        let value = outcome_json(&front_radar()?)?.ok_or("suppressed")?;
        assert_eq!(value["function"], "RadarState (mode 0 front)");
        assert_eq!(value["function_id"], 29);
        assert_eq!(value["length"], 4);
        assert_eq!(value["payload"], "01020304");
        assert_eq!(value["checksum"], 0xD4);
        assert_eq!(value["checksum_ok"], true);
        assert_eq!(value["decoded"]["FrontRight"], 10);
        assert!(value["error"].is_null());
        Ok(())
    }

    #[test]
    fn json_short_payload_has_error() -> TestResult {
        let frame = encode_frame(37, &[0x01, 0x64])?;
        let outcome = Dispatcher::new().process(&frame);
        let value = outcome_json(&outcome)?.ok_or("suppressed")?;
        assert!(value["decoded"].is_null());
        assert_eq!(
            value["error"],
            "payload too short for TPMSInfo: got 2 bytes, need 6"
        );
        Ok(())
    }

    #[test]
    fn json_malformed_keeps_raw_bytes() -> TestResult {
        let outcome = Dispatcher::new().process(&[0x00, 0x11]);
        let value = outcome_json(&outcome)?.ok_or("suppressed")?;
        assert_eq!(value["raw"], "0011");
        assert_eq!(value["start"], 0);
        Ok(())
    }

    #[test]
    fn json_sink_writes_one_line_per_frame() -> TestResult {
        let mut sink = JsonSink::new(Vec::new());
        sink.emit(&front_radar()?)?;
        sink.emit(&FrameOutcome::Suppressed { function_id: 29 })?;
        let text = String::from_utf8(sink.into_inner())?;
        assert_eq!(text.lines().count(), 1);
        let parsed: Value = serde_json::from_str(text.trim_end())?;
        assert_eq!(parsed["decoded"]["FrontLeftCenter"], 4);
        Ok(())
    }

    #[test]
    fn human_sink_lists_fields() -> TestResult {
        let mut sink = HumanSink::new(Vec::new());
        sink.emit(&front_radar()?)?;
        let text = String::from_utf8(sink.into_inner())?;
        assert!(text.contains("RadarState (mode 0 front)"));
        assert!(text.contains("payload=[01 02 03 04]"));
        assert!(text.contains("FrontLeft"));
        assert_eq!(text.lines().count(), 5);
        Ok(())
    }

    #[test]
    fn human_sink_flags_checksum_mismatch() -> TestResult {
        let frame = [0x2E, 0x24, 0x02, 0x00, 0x00, 0x00];
        let mut sink = HumanSink::new(Vec::new());
        sink.emit(&Dispatcher::new().process(&frame))?;
        let text = String::from_utf8(sink.into_inner())?;
        assert!(text.contains("MISMATCH (expected 0xD9)"));
        Ok(())
    }
}
