//! Mode-tagged vehicle information (id 65).
//!
//! Byte 0 selects the layout of the rest of the payload. Every mode needs at
//! least 7 bytes; mode 2 needs 16 and mode 3 needs 8.

use crate::error::DecodeError;
use crate::field::{bit, read_be};

const MSG: &str = "CarInfo";
const MIN_LEN: usize = 7;
const TRIP_LEN: usize = 16;
const ENGINE_LEN: usize = 8;

/// Mode 1: lamps, handbrake and door locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarLamps {
    /// Byte 2 bit 4.
    pub handbrake: bool,
    /// Byte 4 bit 7.
    pub dipped_headlight: bool,
    pub high_beam: bool,
    pub width_lamp: bool,
    /// Byte 5 bit 7.
    pub back_light: bool,
    pub brake_light: bool,
    pub right_turn_signal: bool,
    pub left_turn_signal: bool,
    pub caution_light: bool,
    pub rear_fog_lamps: bool,
    pub front_fog_lamps: bool,
    /// Byte 6 bits 2–3.
    pub back_door_lock: u8,
    pub front_right_door_lock: bool,
    pub front_left_door_lock: bool,
}

/// Mode 2: odometer, trip meters and speeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarTrip {
    /// Bytes 1–3 BE.
    pub driving_mile: u32,
    /// Bytes 4–5 BE.
    pub driver_mileage: u32,
    /// Bytes 6–8 BE × 0.1.
    pub trip_a: f64,
    /// Bytes 9–11 BE × 0.1.
    pub trip_b: f64,
    /// Bytes 12–13 BE × 0.01, truncated.
    pub instant_speed: u32,
    /// Bytes 14–15 BE × 0.1, truncated.
    pub average_speed: u32,
}

/// Mode 3: engine speed and outside temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarEngine {
    /// Bytes 1–2 BE, rpm.
    pub engine_speed: u32,
    /// Byte 7, °C.
    pub outside_temp: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarInfo {
    Lamps(CarLamps),
    Trip(CarTrip),
    Engine(CarEngine),
    /// Any mode other than 1–3.
    UnknownMode(u8),
}

impl CarInfo {
    /// Byte 0 of the payload that produced this value.
    pub fn mode(&self) -> u8 {
        match self {
            CarInfo::Lamps(_) => 1,
            CarInfo::Trip(_) => 2,
            CarInfo::Engine(_) => 3,
            CarInfo::UnknownMode(mode) => *mode,
        }
    }
}

pub fn decode(data: &[u8]) -> Result<CarInfo, DecodeError> {
    let &[mode, _, b2, _, b4, b5, b6, ..] = data else {
        return Err(DecodeError::short(MSG, data.len(), MIN_LEN));
    };

    match mode {
        1 => Ok(CarInfo::Lamps(CarLamps {
            handbrake: bit(b2, 4),
            dipped_headlight: bit(b4, 7),
            high_beam: bit(b4, 6),
            width_lamp: bit(b4, 5),
            back_light: bit(b5, 7),
            brake_light: bit(b5, 6),
            right_turn_signal: bit(b5, 5),
            left_turn_signal: bit(b5, 4),
            caution_light: bit(b5, 3),
            rear_fog_lamps: bit(b5, 2),
            front_fog_lamps: bit(b5, 1),
            back_door_lock: (b6 >> 2) & 0x03,
            front_right_door_lock: bit(b6, 1),
            front_left_door_lock: bit(b6, 0),
        })),
        2 => decode_trip(data).map(CarInfo::Trip),
        3 => decode_engine(data).map(CarInfo::Engine),
        other => Ok(CarInfo::UnknownMode(other)),
    }
}

fn decode_trip(data: &[u8]) -> Result<CarTrip, DecodeError> {
    if data.len() < TRIP_LEN {
        return Err(DecodeError::short("CarInfo (mode 2)", data.len(), TRIP_LEN));
    }
    let read = |offset, len| {
        read_be(data, offset, len).ok_or_else(|| {
            DecodeError::malformed(MSG, format!("field at offset {offset} runs past payload"))
        })
    };

    Ok(CarTrip {
        driving_mile: read(1, 3)?,
        driver_mileage: read(4, 2)?,
        trip_a: f64::from(read(6, 3)?) * 0.1,
        trip_b: f64::from(read(9, 3)?) * 0.1,
        instant_speed: read(12, 2)? / 100,
        average_speed: read(14, 2)? / 10,
    })
}

fn decode_engine(data: &[u8]) -> Result<CarEngine, DecodeError> {
    let &[_, _, _, _, _, _, _, outside_temp, ..] = data else {
        return Err(DecodeError::short("CarInfo (mode 3)", data.len(), ENGINE_LEN));
    };
    let engine_speed = read_be(data, 1, 2)
        .ok_or_else(|| DecodeError::malformed(MSG, "engine speed runs past payload"))?;
    Ok(CarEngine {
        engine_speed,
        outside_temp,
    })
}
