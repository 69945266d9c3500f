//! Frame boundaries, checksums and outbound frame encoding.
//!
//! # Frame layout
//! | Offset  | Field       |
//! |---------|-------------|
//! | 0       | `0x2E`      |
//! | 1       | function id |
//! | 2       | length `N`  |
//! | 3..3+N  | payload     |
//! | last    | checksum    |

use crate::error::FrameError;

/// Start-of-frame byte.
pub const START_DELIMITER: u8 = 0x2E;

/// Delimiter, function id, length and checksum.
pub const MIN_FRAME_LEN: usize = 4;

const OFF_FUNCTION_ID: usize = 1;
const OFF_LENGTH: usize = 2;
const OFF_PAYLOAD: usize = 3;

/// Checksum over the bytes between the delimiter and the checksum byte.
///
/// `body` is `bytes[1..last]` of a frame: function id, length and payload.
pub fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(0u8, |acc, &b| acc.wrapping_add(b)) ^ 0xFF
}

/// Build a checksummed frame for `function_id` carrying `payload`.
pub fn encode_frame(function_id: u8, payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    let len = u8::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
        len: payload.len(),
    })?;

    let mut out = Vec::with_capacity(payload.len() + MIN_FRAME_LEN);
    out.push(START_DELIMITER);
    out.push(function_id);
    out.push(len);
    out.extend_from_slice(payload);
    let cks = checksum(out.get(OFF_FUNCTION_ID..).unwrap_or_default());
    out.push(cks);
    Ok(out)
}

/// Zero-copy view over one candidate frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame<'a> {
    bytes: &'a [u8],
}

impl<'a> RawFrame<'a> {
    /// Wrap a candidate frame, rejecting anything below [`MIN_FRAME_LEN`].
    ///
    /// The start byte is not checked: bytes received before the first
    /// delimiter are surfaced as a frame like any other.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, FrameError> {
        if bytes.len() < MIN_FRAME_LEN {
            return Err(FrameError::TooShort {
                got: bytes.len(),
                need: MIN_FRAME_LEN,
            });
        }
        Ok(Self { bytes })
    }

    /// The whole candidate frame.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Byte 0, normally [`START_DELIMITER`].
    pub fn start(&self) -> u8 {
        self.byte(0)
    }

    /// Byte 1.
    pub fn function_id(&self) -> u8 {
        self.byte(OFF_FUNCTION_ID)
    }

    /// Byte 2.
    pub fn declared_len(&self) -> u8 {
        self.byte(OFF_LENGTH)
    }

    /// Up to `declared_len` bytes starting at offset 3.
    ///
    /// A frame shorter than declared yields a truncated slice, which may
    /// include the checksum byte.
    pub fn payload(&self) -> &'a [u8] {
        let end = (OFF_PAYLOAD + usize::from(self.declared_len())).min(self.bytes.len());
        self.bytes.get(OFF_PAYLOAD..end).unwrap_or_default()
    }

    /// Final byte.
    pub fn checksum_byte(&self) -> u8 {
        self.bytes.last().copied().unwrap_or(0)
    }

    /// Checksum computed over `bytes[1..last]`.
    pub fn computed_checksum(&self) -> u8 {
        let last = self.bytes.len().saturating_sub(1);
        checksum(self.bytes.get(OFF_FUNCTION_ID..last).unwrap_or_default())
    }

    /// `true` when the received checksum matches the computed one.
    pub fn checksum_ok(&self) -> bool {
        self.checksum_byte() == self.computed_checksum()
    }

    fn byte(&self, idx: usize) -> u8 {
        self.bytes.get(idx).copied().unwrap_or(0)
    }
}

/// Splits a byte stream into candidate frames at every [`START_DELIMITER`].
///
/// The assembler owns only the in-progress buffer. A delimiter flushes the
/// buffer (if non-empty) and starts a new one holding just the delimiter;
/// every other byte is appended.
#[derive(Debug, Default, Clone)]
pub struct FrameAssembler {
    buffer: Vec<u8>,
}

impl FrameAssembler {
    /// Create an empty assembler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte, returning the previous candidate frame when `byte`
    /// starts a new one.
    pub fn push(&mut self, byte: u8) -> Option<Vec<u8>> {
        if byte == START_DELIMITER {
            let flushed = self.take();
            self.buffer.push(byte);
            flushed
        } else {
            self.buffer.push(byte);
            None
        }
    }

    /// Feed a slice, collecting every frame it completes.
    pub fn push_slice(&mut self, bytes: &[u8]) -> Vec<Vec<u8>> {
        bytes.iter().filter_map(|&b| self.push(b)).collect()
    }

    /// Flush the in-progress buffer, e.g. when the byte source closes.
    pub fn finish(&mut self) -> Option<Vec<u8>> {
        self.take()
    }

    /// Bytes accumulated since the last delimiter.
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    fn take(&mut self) -> Option<Vec<u8>> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn checksum_of_front_radar_frame() {
        // 0x1D + 0x04 + 1 + 2 + 3 + 4 = 0x2B, ^0xFF = 0xD4
        assert_eq!(checksum(&[0x1D, 0x04, 0x01, 0x02, 0x03, 0x04]), 0xD4);
    }

    #[test]
    fn checksum_wraps() {
        assert_eq!(checksum(&[0xFF, 0x02]), 0x01 ^ 0xFF);
    }

    #[test]
    fn encode_front_radar() -> TestResult {
        let frame = encode_frame(0x1D, &[1, 2, 3, 4])?;
        assert_eq!(frame, vec![0x2E, 0x1D, 0x04, 0x01, 0x02, 0x03, 0x04, 0xD4]);
        Ok(())
    }

    #[test]
    fn encode_rejects_oversized_payload() {
        let err = encode_frame(0x1D, &[0u8; 256]);
        assert_eq!(err, Err(FrameError::PayloadTooLarge { len: 256 }));
    }

    #[test]
    fn parse_rejects_short_frames() {
        assert_eq!(
            RawFrame::parse(&[0x2E, 0x1D, 0x00]),
            Err(FrameError::TooShort { got: 3, need: 4 })
        );
    }

    #[test]
    fn accessors() -> TestResult {
        let bytes = encode_frame(0x25, &[0x01, 0x64])?;
        let frame = RawFrame::parse(&bytes)?;
        assert_eq!(frame.start(), START_DELIMITER);
        assert_eq!(frame.function_id(), 0x25);
        assert_eq!(frame.declared_len(), 2);
        assert_eq!(frame.payload(), &[0x01, 0x64]);
        assert!(frame.checksum_ok());
        Ok(())
    }

    #[test]
    fn payload_truncates_when_frame_is_short() -> TestResult {
        // Declares 6 bytes but carries 2 + checksum.
        let bytes = [0x2E, 0x25, 0x06, 0x01, 0x64, 0x00];
        let frame = RawFrame::parse(&bytes)?;
        assert_eq!(frame.payload(), &[0x01, 0x64, 0x00]);
        Ok(())
    }

    #[test]
    fn corrupted_checksum_is_reported() -> TestResult {
        let mut bytes = encode_frame(0x29, &[0xFF, 0x0F])?;
        if let Some(last) = bytes.last_mut() {
            *last ^= 0x01;
        }
        let frame = RawFrame::parse(&bytes)?;
        assert!(!frame.checksum_ok());
        Ok(())
    }

    #[test]
    fn assembler_splits_on_delimiter() {
        let mut asm = FrameAssembler::new();
        assert_eq!(asm.push(0x2E), None);
        assert_eq!(asm.push(0x1D), None);
        assert_eq!(asm.push(0x00), None);
        assert_eq!(asm.buffered(), &[0x2E, 0x1D, 0x00]);
        assert_eq!(asm.push(0x2E), Some(vec![0x2E, 0x1D, 0x00]));
        assert_eq!(asm.buffered(), &[0x2E]);
    }

    #[test]
    fn assembler_emits_leading_noise_as_a_frame() {
        let mut asm = FrameAssembler::new();
        let frames = asm.push_slice(&[0x01, 0x02, 0x2E, 0x1D]);
        assert_eq!(frames, vec![vec![0x01, 0x02]]);
    }

    #[test]
    fn assembler_splits_inside_payload() {
        // A 0x2E payload byte is taken as a new frame start.
        let mut asm = FrameAssembler::new();
        let frames = asm.push_slice(&[0x2E, 0x29, 0x02, 0x2E, 0x00, 0xA6, 0x2E]);
        assert_eq!(frames, vec![vec![0x2E, 0x29, 0x02], vec![0x2E, 0x00, 0xA6]]);
    }

    #[test]
    fn finish_flushes_trailing_frame() {
        let mut asm = FrameAssembler::new();
        asm.push_slice(&[0x2E, 0x29]);
        assert_eq!(asm.finish(), Some(vec![0x2E, 0x29]));
        assert_eq!(asm.finish(), None);
    }
}
