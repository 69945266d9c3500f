//! Parking radar proximity (ids 29/30) and the radar settings byte carried
//! in the rear frame.
//!
//! # Payload layout
//! | Offset | Front (29)         | Rear (30)          |
//! |--------|--------------------|--------------------|
//! | 0      | front left         | back left          |
//! | 1      | front left centre  | back left centre   |
//! | 2      | front right centre | back right centre  |
//! | 3      | front right        | back right         |
//! | 4      | –                  | [`CentralState`]   |

use crate::error::DecodeError;
use crate::field::bit;

/// Proximity levels for the four sensors of one bumper, each 0–10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadarState {
    pub left: u8,
    pub left_center: u8,
    pub right_center: u8,
    pub right: u8,
}

/// Radar settings byte (rear frame offset 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CentralState {
    /// Bit 7.
    pub radar_enabled: bool,
    /// Bit 6.
    pub sensitivity: bool,
    /// Bit 4.
    pub alarm_volume_switch: bool,
    /// Bits 0–2.
    pub volume_level: u8,
}

impl CentralState {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            radar_enabled: bit(byte, 7),
            sensitivity: bit(byte, 6),
            alarm_volume_switch: bit(byte, 4),
            volume_level: byte & 0x07,
        }
    }
}

/// Map a raw proximity code to a 0–10 level.
pub fn radar_level(raw: u8) -> u8 {
    match raw {
        1 => 1,
        2 => 4,
        3 => 7,
        4 => 10,
        _ => 0,
    }
}

fn levels(a: u8, b: u8, c: u8, d: u8) -> RadarState {
    RadarState {
        left: radar_level(a),
        left_center: radar_level(b),
        right_center: radar_level(c),
        right: radar_level(d),
    }
}

/// Decode the front radar frame (4 bytes).
pub fn decode_front(data: &[u8]) -> Result<RadarState, DecodeError> {
    let &[a, b, c, d, ..] = data else {
        return Err(DecodeError::short("RadarState", data.len(), 4));
    };
    Ok(levels(a, b, c, d))
}

/// Decode the rear radar frame (5 bytes).
pub fn decode_rear(data: &[u8]) -> Result<(RadarState, CentralState), DecodeError> {
    let &[a, b, c, d, central, ..] = data else {
        return Err(DecodeError::short("RadarState", data.len(), 5));
    };
    Ok((levels(a, b, c, d), CentralState::from_byte(central)))
}
