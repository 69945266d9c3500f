//! Climate control state (id 40).
//!
//! # Payload layout (8 bytes)
//! | Offset | Content                                                   |
//! |--------|-----------------------------------------------------------|
//! | 0      | AC, mode, recirculation, –, auto, dual, max AC, auto defog|
//! | 1      | airflow up/parallel/down (bits 7–5), fan speed (bits 0–3) |
//! | 2      | left temperature                                          |
//! | 3      | right temperature                                         |
//! | 4      | front defog (7), rear defog + °F flag (6), ECON (4)       |
//! | 5      | seat heat left (bits 0–1), right (bits 2–3)               |
//! | 6      | rear temperature                                          |
//! | 7      | rear airflow state/direction/auto (7–4), fan (0–3)        |

use std::fmt;

use crate::error::DecodeError;
use crate::field::bit;

/// A decoded temperature setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temperature {
    /// Below the adjustable range.
    Low,
    /// Above the adjustable range.
    High,
    Fahrenheit(u8),
    Celsius(f32),
}

impl Temperature {
    /// Decode a raw temperature byte.
    ///
    /// Fahrenheit: 0 → Low, 255 → High, anything else is literal.
    /// Celsius: above 31 → `raw * 2.0`, 0 → Low, 31 → High, otherwise
    /// `raw / 2.0 + 17.5`.
    pub fn decode(raw: u8, fahrenheit: bool) -> Self {
        if fahrenheit {
            match raw {
                0 => Temperature::Low,
                255 => Temperature::High,
                t => Temperature::Fahrenheit(t),
            }
        } else {
            match raw {
                0 => Temperature::Low,
                31 => Temperature::High,
                t if t > 31 => Temperature::Celsius(f32::from(t) * 2.0),
                t => Temperature::Celsius(f32::from(t) / 2.0 + 17.5),
            }
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temperature::Low => f.write_str("Low"),
            Temperature::High => f.write_str("High"),
            Temperature::Fahrenheit(t) => write!(f, "{t}℉"),
            Temperature::Celsius(t) => write!(f, "{t:.1}℃"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcState {
    pub ac_switch: bool,
    pub ac_mode: bool,
    /// Inside (recirculated) vs outside air.
    pub recirculation: bool,
    pub auto: bool,
    pub dual: bool,
    pub max_ac: bool,
    pub auto_defog: bool,

    pub air_up: bool,
    pub air_parallel: bool,
    pub air_down: bool,
    /// 0–15.
    pub fan_speed: u8,

    pub front_window_defog: bool,
    pub back_window_defog: bool,
    pub econ: bool,

    /// 0–3.
    pub left_seat_heat: u8,
    /// 0–3.
    pub right_seat_heat: u8,

    pub back_air_on: bool,
    pub back_air_parallel: bool,
    pub back_air_down: bool,
    pub back_air_auto: bool,
    /// 0–15.
    pub back_fan_speed: u8,

    pub left_temperature: Temperature,
    pub right_temperature: Temperature,
    pub back_temperature: Temperature,
}

pub fn decode(data: &[u8]) -> Result<AcState, DecodeError> {
    let &[b0, b1, b2, b3, b4, b5, b6, b7, ..] = data else {
        return Err(DecodeError::short("ACState", data.len(), 8));
    };

    // Byte 4 bit 6 is both the rear defog flag and the °F flag.
    let fahrenheit = bit(b4, 6);

    Ok(AcState {
        ac_switch: bit(b0, 7),
        ac_mode: bit(b0, 6),
        recirculation: bit(b0, 5),
        auto: bit(b0, 3),
        dual: bit(b0, 2),
        max_ac: bit(b0, 1),
        auto_defog: bit(b0, 0),

        air_up: bit(b1, 7),
        air_parallel: bit(b1, 6),
        air_down: bit(b1, 5),
        fan_speed: b1 & 0x0F,

        front_window_defog: bit(b4, 7),
        back_window_defog: fahrenheit,
        econ: bit(b4, 4),

        left_seat_heat: b5 & 0x03,
        right_seat_heat: (b5 >> 2) & 0x03,

        back_air_on: bit(b7, 7),
        back_air_parallel: bit(b7, 6),
        back_air_down: bit(b7, 5),
        back_air_auto: bit(b7, 4),
        back_fan_speed: b7 & 0x0F,

        left_temperature: Temperature::decode(b2, fahrenheit),
        right_temperature: Temperature::decode(b3, fahrenheit),
        back_temperature: Temperature::decode(b6, fahrenheit),
    })
}
