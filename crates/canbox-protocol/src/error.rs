//! Error types for frame validation and payload decoding.

/// Errors raised while turning a payload into a [`DecodedMessage`].
///
/// [`DecodedMessage`]: crate::DecodedMessage
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The payload is shorter than the decoder's minimum length.
    #[error("payload too short for {message}: got {got} bytes, need {need}")]
    ShortPayload {
        /// Message family being decoded
        message: &'static str,
        /// Bytes available
        got: usize,
        /// Bytes required
        need: usize,
    },

    /// Any other decode-time fault.
    #[error("malformed {message} payload: {reason}")]
    Malformed {
        /// Message family being decoded
        message: &'static str,
        /// What went wrong
        reason: String,
    },
}

impl DecodeError {
    /// Create a short payload error.
    pub fn short(message: &'static str, got: usize, need: usize) -> Self {
        DecodeError::ShortPayload { message, got, need }
    }

    /// Create a malformed payload error.
    pub fn malformed(message: &'static str, reason: impl Into<String>) -> Self {
        DecodeError::Malformed {
            message,
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`DecodeError::ShortPayload`].
    pub fn is_short_payload(&self) -> bool {
        matches!(self, DecodeError::ShortPayload { .. })
    }
}

/// Errors raised while validating a candidate frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Fewer bytes than delimiter + function id + length + checksum.
    #[error("frame too short: got {got} bytes, need at least {need}")]
    TooShort {
        /// Bytes in the candidate frame
        got: usize,
        /// Minimum frame length
        need: usize,
    },

    /// Outbound payload does not fit the single length byte.
    #[error("payload of {len} bytes does not fit in a frame (max 255)")]
    PayloadTooLarge {
        /// Payload length
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_payload_display() {
        let err = DecodeError::short("TPMSInfo", 3, 6);
        assert_eq!(
            err.to_string(),
            "payload too short for TPMSInfo: got 3 bytes, need 6"
        );
        assert!(err.is_short_payload());
    }

    #[test]
    fn malformed_is_not_short() {
        let err = DecodeError::malformed("CarInfo", "window ended mid-field");
        assert!(!err.is_short_payload());
        assert!(err.to_string().contains("window ended mid-field"));
    }

    #[test]
    fn frame_error_is_std_error() {
        let err = FrameError::TooShort { got: 1, need: 4 };
        let _: &dyn std::error::Error = &err;
        assert!(err.to_string().contains("need at least 4"));
    }
}
