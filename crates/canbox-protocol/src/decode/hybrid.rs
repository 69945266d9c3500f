//! Hybrid battery and power-flow state (id 31).

use crate::error::DecodeError;
use crate::field::bit;

/// Battery capacity and the six power-flow arrows of the hybrid display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OilElectricityInfo {
    /// Byte 0 bits 0–2, 0–7 bars.
    pub battery_capacity: u8,
    /// Byte 0 bit 7.
    pub hybrid: bool,
    /// Byte 1 bit 0.
    pub motor_drives_battery: bool,
    /// Byte 1 bit 1.
    pub motor_drives_wheel: bool,
    /// Byte 1 bit 2.
    pub engine_drives_motor: bool,
    /// Byte 1 bit 3.
    pub engine_drives_wheel: bool,
    /// Byte 1 bit 4.
    pub battery_drives_motor: bool,
    /// Byte 1 bit 5.
    pub wheel_drives_motor: bool,
}

pub fn decode(data: &[u8]) -> Result<OilElectricityInfo, DecodeError> {
    let &[b0, b1, ..] = data else {
        return Err(DecodeError::short("OilElectricityInfo", data.len(), 2));
    };
    Ok(OilElectricityInfo {
        battery_capacity: b0 & 0x07,
        hybrid: bit(b0, 7),
        motor_drives_battery: bit(b1, 0),
        motor_drives_wheel: bit(b1, 1),
        engine_drives_motor: bit(b1, 2),
        engine_drives_wheel: bit(b1, 3),
        battery_drives_motor: bit(b1, 4),
        wheel_drives_motor: bit(b1, 5),
    })
}
