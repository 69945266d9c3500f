//! Steering wheel angle (id 41).

use crate::error::DecodeError;

/// Steering wheel angle in degrees, nominally ±380.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwcAngle {
    /// `byte0 + byte1 * 256`.
    pub raw: u16,
    pub degrees: i32,
}

/// Decode the steering angle.
///
/// The sign flag is taken as bit 3 of `byte1 * 256`. With the flag set the
/// angle is the 12-bit two's complement negation `(raw ^ 0xFFF) + 1`; with
/// it clear the angle is `-raw`. The flag position matches the CAN box
/// vendor's own decoder bit for bit; since the high byte is shifted by 8
/// first, the flag reads clear for every payload and angles come out as
/// `-raw`.
pub fn decode(data: &[u8]) -> Result<SwcAngle, DecodeError> {
    let &[lsb, msb, ..] = data else {
        return Err(DecodeError::short("SWCAngle", data.len(), 2));
    };

    let high = u16::from(msb) << 8;
    let raw = u16::from(lsb) | high;
    let sign_set = (high >> 3) & 1 == 1;

    let degrees = if sign_set {
        i32::from(raw ^ 0x0FFF) + 1
    } else {
        -i32::from(raw)
    };
    Ok(SwcAngle { raw, degrees })
}
