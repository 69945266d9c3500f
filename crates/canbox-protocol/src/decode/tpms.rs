//! Tire pressure monitoring (id 37).
//!
//! # Payload layout (6 bytes)
//! | Offset | Content                                       |
//! |--------|-----------------------------------------------|
//! | 0      | unit select (bits 0–1), alarm active (bit 6)  |
//! | 1–4    | FL, FR, BL, BR pressure                       |
//! | 5      | spare tire pressure                           |
//!
//! Unit select `01` reports unit 1 at scale 1; `00` reports unit 2 at scale
//! 0.1; `10` and `11` report unit 0 at scale 1. The vendor firmware assigns
//! 2.5 for `10` and then overwrites it, so `10` effectively uses scale 1.

use crate::error::DecodeError;
use crate::field::bit;

/// Pressure reported for the 0 and 255 "no reading" sentinels.
pub const INVALID_PRESSURE: f64 = -1.0;

/// Alarm code reported for every wheel while the alarm bit is set.
pub const WHEEL_ALARM_ACTIVE: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TpmsInfo {
    pub unit: u8,
    /// Multiplier applied to every raw pressure byte.
    pub scale: f64,
    pub alarm_active: bool,
    /// FL, FR, BL, BR. Either all 0 or all [`WHEEL_ALARM_ACTIVE`].
    pub wheel_alarms: [u8; 4],
    /// FL, FR, BL, BR.
    pub pressures: [f64; 4],
    pub spare_pressure: f64,
}

/// Unit and scale for the two unit-select bits of byte 0.
pub fn unit_and_scale(unit_bits: u8) -> (u8, f64) {
    match unit_bits & 0x03 {
        0b00 => (2, 0.1),
        0b01 => (1, 1.0),
        _ => (0, 1.0),
    }
}

/// Scale one raw pressure byte, mapping 0 and 255 to [`INVALID_PRESSURE`].
pub fn tpms_value(raw: u8, scale: f64) -> f64 {
    match raw {
        0 | 255 => INVALID_PRESSURE,
        v => f64::from(v) * scale,
    }
}

pub fn decode(data: &[u8]) -> Result<TpmsInfo, DecodeError> {
    let &[b0, fl, fr, bl, br, spare, ..] = data else {
        return Err(DecodeError::short("TPMSInfo", data.len(), 6));
    };

    let (unit, scale) = unit_and_scale(b0);
    let alarm_active = bit(b0, 6);
    let alarm = if alarm_active { WHEEL_ALARM_ACTIVE } else { 0 };

    Ok(TpmsInfo {
        unit,
        scale,
        alarm_active,
        wheel_alarms: [alarm; 4],
        pressures: [fl, fr, bl, br].map(|raw| tpms_value(raw, scale)),
        spare_pressure: tpms_value(spare, scale),
    })
}
