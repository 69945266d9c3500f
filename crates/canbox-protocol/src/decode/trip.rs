//! Trip computer frames: basic drive info (id 33) and fuel consumption
//! history (id 35).

use std::fmt;

use crate::error::DecodeError;
use crate::field::read_be;

/// Unit label attached to [`BasicFlyInfo::mileage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MileageUnit {
    /// Code 0, rendered as a single space.
    Blank,
    Mile,
    Km,
    Unknown(u8),
}

impl MileageUnit {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => MileageUnit::Blank,
            1 => MileageUnit::Mile,
            2 => MileageUnit::Km,
            other => MileageUnit::Unknown(other),
        }
    }
}

impl fmt::Display for MileageUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MileageUnit::Blank => f.write_str(" "),
            MileageUnit::Mile => f.write_str("Mile"),
            MileageUnit::Km => f.write_str("Km"),
            MileageUnit::Unknown(b) => write!(f, "Unknown({b})"),
        }
    }
}

/// Average speed, drive time and drive mileage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicFlyInfo {
    /// Bytes 0–1 BE × 0.1, km/h.
    pub average_speed: f64,
    /// Bytes 2–3 BE, unit unspecified by the vendor.
    pub driver_time: u32,
    /// Bytes 4–5 BE.
    pub mileage: u32,
    /// Byte 6.
    pub mileage_unit: MileageUnit,
}

pub fn decode_basic_fly_info(data: &[u8]) -> Result<BasicFlyInfo, DecodeError> {
    const MSG: &str = "BasicFlyInfo";
    let &[_, _, _, _, _, _, unit, ..] = data else {
        return Err(DecodeError::short(MSG, data.len(), 7));
    };
    let read = |offset| read_be(data, offset, 2).ok_or_else(|| overrun(MSG, offset));

    Ok(BasicFlyInfo {
        average_speed: f64::from(read(0)?) * 0.1,
        driver_time: read(2)?,
        mileage: read(4)?,
        mileage_unit: MileageUnit::from_byte(unit),
    })
}

/// Consumption unit codes: `(code, label, reference minutes)`.
const CONSUMPTION_UNITS: [(u8, &str, Option<u8>); 7] = [
    (0, "MPG", Some(60)),
    (1, "Km/h", Some(30)),
    (2, "L/100km", Some(30)),
    (16, "mile/kWh", None),
    (17, "kWh/100mile", None),
    (18, "km/kWh", None),
    (19, "kWh/100km", None),
];

/// Label and history window for a consumption unit code.
pub fn consumption_unit(code: u8) -> (&'static str, Option<u8>) {
    CONSUMPTION_UNITS
        .iter()
        .find(|(c, _, _)| *c == code)
        .map_or(("Unknown", None), |&(_, label, minutes)| (label, minutes))
}

/// Current and historical fuel (or energy) consumption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelOilInfo {
    /// Byte 0.
    pub unit_code: u8,
    pub unit: &'static str,
    /// Minutes covered by each history slot; `None` for EV units.
    pub range_minutes: Option<u8>,
    /// Bytes 1–2 BE × 0.1.
    pub current: f64,
    /// Bytes 3–12, five BE × 0.1 values.
    pub averages: [f64; 5],
}

pub fn decode_travel_oil_info(data: &[u8]) -> Result<TravelOilInfo, DecodeError> {
    const MSG: &str = "TravelOilInfo";
    if data.len() < 13 {
        return Err(DecodeError::short(MSG, data.len(), 13));
    }
    let unit_code = data.first().copied().unwrap_or(0);
    let (unit, range_minutes) = consumption_unit(unit_code);
    let read = |offset| {
        read_be(data, offset, 2)
            .map(|raw| f64::from(raw) * 0.1)
            .ok_or_else(|| overrun(MSG, offset))
    };

    Ok(TravelOilInfo {
        unit_code,
        unit,
        range_minutes,
        current: read(1)?,
        averages: [read(3)?, read(5)?, read(7)?, read(9)?, read(11)?],
    })
}

fn overrun(message: &'static str, offset: usize) -> DecodeError {
    DecodeError::malformed(message, format!("field at offset {offset} runs past payload"))
}
