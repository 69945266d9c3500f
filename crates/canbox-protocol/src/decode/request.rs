//! Head unit requests: data requests (id 144) and climate commands (id 130).
//!
//! Both carry a command code in byte 0 and need a 2-byte payload. Codes
//! without a label decode successfully with `code: None`.

use crate::error::DecodeError;
use crate::frame::encode_frame;
use crate::ids::{AC_SETTINGS, DATA_REQUEST};

/// Data the head unit can ask the CAN box to resend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataRequestCode {
    BasicFlyInfo,
    TravelOilInfo,
    TpmsInfo,
    CentralState,
    FiftyOilWear,
    AcState,
    AmpState,
}

impl DataRequestCode {
    pub const ALL: [DataRequestCode; 7] = [
        DataRequestCode::BasicFlyInfo,
        DataRequestCode::TravelOilInfo,
        DataRequestCode::TpmsInfo,
        DataRequestCode::CentralState,
        DataRequestCode::FiftyOilWear,
        DataRequestCode::AcState,
        DataRequestCode::AmpState,
    ];

    /// The requested function id doubles as the command code.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_u8() == byte)
    }

    pub fn as_u8(self) -> u8 {
        match self {
            DataRequestCode::BasicFlyInfo => 33,
            DataRequestCode::TravelOilInfo => 35,
            DataRequestCode::TpmsInfo => 37,
            DataRequestCode::CentralState => 38,
            DataRequestCode::FiftyOilWear => 39,
            DataRequestCode::AcState => 40,
            DataRequestCode::AmpState => 49,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DataRequestCode::BasicFlyInfo => "request basic fly info",
            DataRequestCode::TravelOilInfo => "request travel oil info",
            DataRequestCode::TpmsInfo => "request tpms info",
            DataRequestCode::CentralState => "request central state",
            DataRequestCode::FiftyOilWear => "request fifty oil wear",
            DataRequestCode::AcState => "request A/C state",
            DataRequestCode::AmpState => "request amp state",
        }
    }

    /// Complete frame asking the CAN box for this data.
    pub fn request_frame(self) -> Vec<u8> {
        request_frame(DATA_REQUEST, self.as_u8())
    }
}

/// Climate commands the head unit sends on button presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcSettingCode {
    Power,
    TempDown,
    TempUp,
    FanDown,
    FanUp,
    WindshieldDefog,
    RearDefog,
    AutoMode,
    Mode,
}

impl AcSettingCode {
    pub const ALL: [AcSettingCode; 9] = [
        AcSettingCode::Power,
        AcSettingCode::TempDown,
        AcSettingCode::TempUp,
        AcSettingCode::FanDown,
        AcSettingCode::FanUp,
        AcSettingCode::WindshieldDefog,
        AcSettingCode::RearDefog,
        AcSettingCode::AutoMode,
        AcSettingCode::Mode,
    ];

    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_u8() == byte)
    }

    pub fn as_u8(self) -> u8 {
        match self {
            AcSettingCode::Power => 1,
            AcSettingCode::TempDown => 2,
            AcSettingCode::TempUp => 3,
            AcSettingCode::FanDown => 9,
            AcSettingCode::FanUp => 10,
            AcSettingCode::WindshieldDefog => 19,
            AcSettingCode::RearDefog => 20,
            AcSettingCode::AutoMode => 21,
            AcSettingCode::Mode => 25,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AcSettingCode::Power => "ON/OFF",
            AcSettingCode::TempDown => "Temp down",
            AcSettingCode::TempUp => "Temp up",
            AcSettingCode::FanDown => "fan down",
            AcSettingCode::FanUp => "fan up",
            AcSettingCode::WindshieldDefog => "windshield defog",
            AcSettingCode::RearDefog => "rear defog",
            AcSettingCode::AutoMode => "auto mode",
            AcSettingCode::Mode => "mode",
        }
    }

    /// Complete frame carrying this climate command.
    pub fn request_frame(self) -> Vec<u8> {
        request_frame(AC_SETTINGS, self.as_u8())
    }
}

fn request_frame(function_id: u8, code: u8) -> Vec<u8> {
    // A 2-byte payload always fits the length byte.
    encode_frame(function_id, &[code, 0x00]).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRequest {
    pub raw: u8,
    pub code: Option<DataRequestCode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcSetting {
    pub raw: u8,
    pub code: Option<AcSettingCode>,
}

pub fn decode_data_request(data: &[u8]) -> Result<DataRequest, DecodeError> {
    let &[raw, _, ..] = data else {
        return Err(DecodeError::short("DataRequest", data.len(), 2));
    };
    Ok(DataRequest {
        raw,
        code: DataRequestCode::from_byte(raw),
    })
}

pub fn decode_ac_setting(data: &[u8]) -> Result<AcSetting, DecodeError> {
    let &[raw, _, ..] = data else {
        return Err(DecodeError::short("ACSetting", data.len(), 2));
    };
    Ok(AcSetting {
        raw,
        code: AcSettingCode::from_byte(raw),
    })
}
