//! Frame validation and routing to payload decoders.

use serde::Serialize;
use tracing::{debug, warn};

use crate::decode::{DecodedMessage, decode_payload};
use crate::error::DecodeError;
use crate::frame::RawFrame;
use crate::ids::{FunctionId, UNKNOWN_FUNCTION_NAME};
use crate::suppress::RepeatSuppressor;

/// What the validator learned about one frame, independent of decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRecord {
    /// Byte 0, normally the start delimiter.
    pub start: u8,
    /// Byte 1.
    pub function_id: u8,
    /// Registry name, or the unknown-function label.
    pub function_name: &'static str,
    /// Byte 2, as sent.
    pub declared_len: u8,
    /// Payload as sliced by the declared length, truncated to the frame.
    pub payload: Vec<u8>,
    /// Final byte of the frame.
    pub checksum: u8,
    /// Checksum computed over everything between the start byte and the last byte.
    pub computed_checksum: u8,
    /// `checksum == computed_checksum`. A mismatch never blocks decoding.
    pub checksum_ok: bool,
}

impl ValidationRecord {
    fn from_frame(frame: &RawFrame<'_>, function_name: &'static str) -> Self {
        Self {
            start: frame.start(),
            function_id: frame.function_id(),
            function_name,
            declared_len: frame.declared_len(),
            payload: frame.payload().to_vec(),
            checksum: frame.checksum_byte(),
            computed_checksum: frame.computed_checksum(),
            checksum_ok: frame.checksum_ok(),
        }
    }

    /// Returns `true` if the payload is shorter than the declared length.
    pub fn is_truncated(&self) -> bool {
        self.payload.len() < usize::from(self.declared_len)
    }
}

/// Result of pushing one candidate frame through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Known function with a decoder; payload decoded.
    Decoded {
        record: ValidationRecord,
        message: DecodedMessage,
    },
    /// Known function that has no payload decoder.
    Undecoded { record: ValidationRecord },
    /// Function id missing from the registry.
    UnknownFunction { record: ValidationRecord },
    /// Decoder rejected the payload as too short.
    ShortPayload {
        record: ValidationRecord,
        error: DecodeError,
    },
    /// Bytes that could not be read as a frame at all, kept verbatim.
    Malformed { raw: Vec<u8>, reason: String },
    /// Same function as the previously admitted frame; nothing emitted.
    Suppressed { function_id: u8 },
}

impl FrameOutcome {
    /// Validation record, if the frame got far enough to have one.
    pub fn record(&self) -> Option<&ValidationRecord> {
        match self {
            FrameOutcome::Decoded { record, .. }
            | FrameOutcome::Undecoded { record }
            | FrameOutcome::UnknownFunction { record }
            | FrameOutcome::ShortPayload { record, .. } => Some(record),
            FrameOutcome::Malformed { .. } | FrameOutcome::Suppressed { .. } => None,
        }
    }

    /// Decoded message, if any.
    pub fn message(&self) -> Option<&DecodedMessage> {
        match self {
            FrameOutcome::Decoded { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Whether a sink should see this outcome.
    pub fn is_emitted(&self) -> bool {
        !matches!(self, FrameOutcome::Suppressed { .. })
    }

    /// Short label for logs and summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            FrameOutcome::Decoded { .. } => "decoded",
            FrameOutcome::Undecoded { .. } => "undecoded",
            FrameOutcome::UnknownFunction { .. } => "unknown_function",
            FrameOutcome::ShortPayload { .. } => "short_payload",
            FrameOutcome::Malformed { .. } => "malformed",
            FrameOutcome::Suppressed { .. } => "suppressed",
        }
    }
}

/// Validates candidate frames, applies repeat suppression, and routes
/// admitted payloads to their decoder.
///
/// Owns the only cross-frame state in the pipeline, so it must see frames
/// in stream order.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    suppressor: RepeatSuppressor,
    suppress_repeats: bool,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Dispatcher with repeat suppression enabled.
    pub fn new() -> Self {
        Self {
            suppressor: RepeatSuppressor::new(),
            suppress_repeats: true,
        }
    }

    /// Dispatcher that emits every frame, repeats included.
    pub fn without_suppression() -> Self {
        Self {
            suppressor: RepeatSuppressor::new(),
            suppress_repeats: false,
        }
    }

    pub fn suppresses_repeats(&self) -> bool {
        self.suppress_repeats
    }

    pub fn suppressor(&self) -> &RepeatSuppressor {
        &self.suppressor
    }

    pub fn reset(&mut self) {
        self.suppressor.reset();
    }

    /// Process one candidate frame as produced by [`crate::FrameAssembler`].
    pub fn process(&mut self, raw: &[u8]) -> FrameOutcome {
        let frame = match RawFrame::parse(raw) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(len = raw.len(), error = %e, "malformed frame");
                return FrameOutcome::Malformed {
                    raw: raw.to_vec(),
                    reason: e.to_string(),
                };
            }
        };

        let function_id = frame.function_id();
        let function = FunctionId::from_u8(function_id);
        let name = function.map_or(UNKNOWN_FUNCTION_NAME, FunctionId::name);

        if self.suppress_repeats && !self.suppressor.admit(name) {
            debug!(function_id, function = name, "repeat suppressed");
            return FrameOutcome::Suppressed { function_id };
        }

        let record = ValidationRecord::from_frame(&frame, name);
        if !record.checksum_ok {
            warn!(
                function_id,
                expected = record.computed_checksum,
                got = record.checksum,
                "checksum mismatch"
            );
        }

        let Some(function) = function else {
            debug!(function_id, "unknown function id");
            return FrameOutcome::UnknownFunction { record };
        };

        match decode_payload(function, &record.payload) {
            None => {
                debug!(function = name, len = record.payload.len(), "no decoder");
                FrameOutcome::Undecoded { record }
            }
            Some(Ok(message)) => {
                debug!(function = name, "decoded");
                FrameOutcome::Decoded { record, message }
            }
            Some(Err(error)) if error.is_short_payload() => {
                warn!(function = name, %error, "short payload");
                FrameOutcome::ShortPayload { record, error }
            }
            Some(Err(error)) => {
                warn!(function = name, %error, "payload rejected");
                FrameOutcome::Malformed {
                    raw: raw.to_vec(),
                    reason: error.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{RadarState, Temperature};
    use crate::frame::encode_frame;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn decoded(outcome: FrameOutcome) -> Result<DecodedMessage, String> {
        match outcome {
            FrameOutcome::Decoded { message, .. } => Ok(message),
            other => Err(format!("expected decoded, got {other:?}")),
        }
    }

    #[test]
    fn front_radar_levels() -> TestResult {
        let frame = encode_frame(0x1D, &[1, 2, 3, 4])?;
        let msg = decoded(Dispatcher::new().process(&frame))?;
        assert_eq!(
            msg,
            DecodedMessage::RadarFront(RadarState {
                left: 1,
                left_center: 4,
                right_center: 7,
                right: 10,
            })
        );
        Ok(())
    }

    #[test]
    fn tpms_unit_one_has_unit_scale() -> TestResult {
        let frame = encode_frame(37, &[0x01, 0x64, 0x64, 0x64, 0x64, 0x64])?;
        let DecodedMessage::TpmsInfo(info) = decoded(Dispatcher::new().process(&frame))? else {
            return Err("expected TPMS".into());
        };
        assert_eq!(info.unit, 1);
        for p in info.pressures.into_iter().chain([info.spare_pressure]) {
            assert!((p - 100.0).abs() < f64::EPSILON, "{p}");
        }
        Ok(())
    }

    #[test]
    fn steering_angle_takes_negative_branch() -> TestResult {
        let frame = encode_frame(41, &[0xFF, 0x0F])?;
        let DecodedMessage::SwcAngle(angle) = decoded(Dispatcher::new().process(&frame))? else {
            return Err("expected SWCAngle".into());
        };
        assert_eq!(angle.raw, 4095);
        assert_eq!(angle.degrees, -4095);
        Ok(())
    }

    #[test]
    fn ac_state_celsius_above_31_doubles() -> TestResult {
        let frame = encode_frame(40, &[0b1000_0001, 0, 40, 0, 0, 0, 0, 0])?;
        let DecodedMessage::AcState(state) = decoded(Dispatcher::new().process(&frame))? else {
            return Err("expected ACState".into());
        };
        assert!(state.ac_switch);
        assert!(state.auto_defog);
        assert_eq!(state.left_temperature, Temperature::Celsius(80.0));
        Ok(())
    }

    #[test]
    fn checksum_mismatch_still_decodes() -> TestResult {
        let mut frame = encode_frame(0x1D, &[1, 2, 3, 4])?;
        if let Some(last) = frame.last_mut() {
            *last ^= 0x55;
        }
        let outcome = Dispatcher::new().process(&frame);
        let record = outcome.record().ok_or("missing record")?;
        assert!(!record.checksum_ok);
        assert!(outcome.message().is_some());
        Ok(())
    }

    #[test]
    fn repeats_are_suppressed_by_function_not_payload() -> TestResult {
        let a1 = encode_frame(29, &[1, 1, 1, 1])?;
        let a2 = encode_frame(29, &[4, 4, 4, 4])?;
        let b = encode_frame(36, &[0, 0])?;
        let mut d = Dispatcher::new();
        let kinds: Vec<_> = [&a1, &a2, &b, &a1]
            .into_iter()
            .map(|f| d.process(f).is_emitted())
            .collect();
        assert_eq!(kinds, [true, false, true, true]);
        Ok(())
    }

    #[test]
    fn suppression_can_be_disabled() -> TestResult {
        let a = encode_frame(29, &[1, 1, 1, 1])?;
        let mut d = Dispatcher::without_suppression();
        assert!(d.process(&a).is_emitted());
        assert!(d.process(&a).is_emitted());
        Ok(())
    }

    #[test]
    fn unknown_ids_share_one_suppression_key() -> TestResult {
        let x = encode_frame(0x01, &[])?;
        let y = encode_frame(0x02, &[])?;
        let mut d = Dispatcher::new();
        assert_eq!(d.process(&x).kind(), "unknown_function");
        assert_eq!(d.process(&y).kind(), "suppressed");
        Ok(())
    }

    #[test]
    fn known_function_without_decoder() -> TestResult {
        let frame = encode_frame(48, &[1, 2, 3])?;
        let outcome = Dispatcher::new().process(&frame);
        assert_eq!(outcome.kind(), "undecoded");
        assert_eq!(outcome.record().map(|r| r.function_name), Some("CanVersion"));
        Ok(())
    }

    #[test]
    fn truncated_payload_is_short() -> TestResult {
        // declares 4 bytes, carries 2 before the checksum
        let raw = [0x2E, 0x1D, 0x04, 0x01, 0x02, 0x00];
        let outcome = Dispatcher::new().process(&raw);
        let FrameOutcome::ShortPayload { record, error } = outcome else {
            return Err(format!("expected short payload, got {outcome:?}").into());
        };
        assert!(record.is_truncated());
        assert_eq!(error, DecodeError::short("RadarState", 3, 4));
        Ok(())
    }

    #[test]
    fn tiny_frame_is_malformed_and_not_recorded() {
        let mut d = Dispatcher::new();
        let outcome = d.process(&[0x2E, 0x1D]);
        assert_eq!(outcome.kind(), "malformed");
        assert_eq!(d.suppressor().state().last_function, None);
    }
}
