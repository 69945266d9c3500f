//! Function identifier registry.
//!
//! | Range          | Direction            |
//! |----------------|----------------------|
//! | 29–65          | CAN box → head unit  |
//! | 130/144/192/200| head unit → CAN box  |
//!
//! Names are the labels the CAN box vendor uses, typos included
//! ("OilEctricityInfo", "CommondKey"), so logs line up with vendor captures.

/// Name reported for ids missing from the registry.
pub const UNKNOWN_FUNCTION_NAME: &str = "Unknown Function ID";

/// Front parking radar proximity.
pub const RADAR_FRONT: u8 = 29;
/// Rear parking radar proximity plus radar settings.
pub const RADAR_REAR: u8 = 30;
/// Hybrid battery and power-flow state.
pub const OIL_ELECTRICITY_INFO: u8 = 31;
/// Steering wheel control key.
pub const SWC_KEY: u8 = 32;
/// Average speed, drive time and mileage.
pub const BASIC_FLY_INFO: u8 = 33;
/// Instantaneous fuel consumption.
pub const CURRENT_OIL_WEAR: u8 = 34;
/// Fuel consumption history.
pub const TRAVEL_OIL_INFO: u8 = 35;
/// Door, trunk, hood and sunroof state.
pub const CAR_DOOR_INFO: u8 = 36;
/// Tire pressure monitoring.
pub const TPMS_INFO: u8 = 37;
/// Radar central settings.
pub const CENTRAL_STATE: u8 = 38;
/// Fifty-minute fuel consumption history.
pub const FIFTY_OIL_WEAR: u8 = 39;
/// Climate control state.
pub const AC_STATE: u8 = 40;
/// Steering wheel angle.
pub const SWC_ANGLE: u8 = 41;
/// Generic command key.
pub const COMMAND_KEY: u8 = 47;
/// CAN box firmware version.
pub const CAN_VERSION: u8 = 48;
/// Amplifier state.
pub const AMP_STATE: u8 = 49;
/// System information.
pub const SYSTEM_INFO: u8 = 50;
/// Mode-tagged vehicle information.
pub const CAR_INFO: u8 = 65;
/// Head unit climate command.
pub const AC_SETTINGS: u8 = 130;
/// Head unit data request.
pub const DATA_REQUEST: u8 = 144;
/// Head unit media settings.
pub const MEDIA_SETTINGS: u8 = 192;
/// Head unit ID3 tag settings.
pub const ID3_SETTINGS: u8 = 200;

/// Every registered function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionId {
    /// Id 29, front parking radar.
    RadarFront,
    /// Id 30, rear parking radar.
    RadarRear,
    /// Id 31, hybrid power flow.
    OilElectricityInfo,
    /// Id 32, steering wheel key.
    SwcKey,
    /// Id 33, trip computer.
    BasicFlyInfo,
    /// Id 34, instantaneous fuel consumption.
    CurrentOilWear,
    /// Id 35, fuel consumption history.
    TravelOilInfo,
    /// Id 36, door and lid state.
    CarDoorInfo,
    /// Id 37, tire pressures.
    TpmsInfo,
    /// Id 38, radar central settings.
    CentralState,
    /// Id 39, fifty-minute fuel history.
    FiftyOilWear,
    /// Id 40, climate state.
    AcState,
    /// Id 41, steering wheel angle.
    SwcAngle,
    /// Id 47, generic command key.
    CommandKey,
    /// Id 48, CAN box firmware version.
    CanVersion,
    /// Id 49, amplifier state.
    AmpState,
    /// Id 50, system information.
    SystemInfo,
    /// Id 65, mode-tagged vehicle information.
    CarInfo,
    /// Id 130, head unit climate command.
    AcSettings,
    /// Id 144, head unit data request.
    DataRequest,
    /// Id 192, head unit media settings.
    MediaSettings,
    /// Id 200, head unit ID3 tag settings.
    Id3Settings,
}

impl FunctionId {
    /// All registered functions in id order.
    pub const ALL: [FunctionId; 22] = [
        FunctionId::RadarFront,
        FunctionId::RadarRear,
        FunctionId::OilElectricityInfo,
        FunctionId::SwcKey,
        FunctionId::BasicFlyInfo,
        FunctionId::CurrentOilWear,
        FunctionId::TravelOilInfo,
        FunctionId::CarDoorInfo,
        FunctionId::TpmsInfo,
        FunctionId::CentralState,
        FunctionId::FiftyOilWear,
        FunctionId::AcState,
        FunctionId::SwcAngle,
        FunctionId::CommandKey,
        FunctionId::CanVersion,
        FunctionId::AmpState,
        FunctionId::SystemInfo,
        FunctionId::CarInfo,
        FunctionId::AcSettings,
        FunctionId::DataRequest,
        FunctionId::MediaSettings,
        FunctionId::Id3Settings,
    ];

    /// Resolve a raw id, returning `None` for unregistered ids.
    pub fn from_u8(id: u8) -> Option<Self> {
        let f = match id {
            RADAR_FRONT => FunctionId::RadarFront,
            RADAR_REAR => FunctionId::RadarRear,
            OIL_ELECTRICITY_INFO => FunctionId::OilElectricityInfo,
            SWC_KEY => FunctionId::SwcKey,
            BASIC_FLY_INFO => FunctionId::BasicFlyInfo,
            CURRENT_OIL_WEAR => FunctionId::CurrentOilWear,
            TRAVEL_OIL_INFO => FunctionId::TravelOilInfo,
            CAR_DOOR_INFO => FunctionId::CarDoorInfo,
            TPMS_INFO => FunctionId::TpmsInfo,
            CENTRAL_STATE => FunctionId::CentralState,
            FIFTY_OIL_WEAR => FunctionId::FiftyOilWear,
            AC_STATE => FunctionId::AcState,
            SWC_ANGLE => FunctionId::SwcAngle,
            COMMAND_KEY => FunctionId::CommandKey,
            CAN_VERSION => FunctionId::CanVersion,
            AMP_STATE => FunctionId::AmpState,
            SYSTEM_INFO => FunctionId::SystemInfo,
            CAR_INFO => FunctionId::CarInfo,
            AC_SETTINGS => FunctionId::AcSettings,
            DATA_REQUEST => FunctionId::DataRequest,
            MEDIA_SETTINGS => FunctionId::MediaSettings,
            ID3_SETTINGS => FunctionId::Id3Settings,
            _ => return None,
        };
        Some(f)
    }

    /// Raw wire id.
    pub fn as_u8(self) -> u8 {
        match self {
            FunctionId::RadarFront => RADAR_FRONT,
            FunctionId::RadarRear => RADAR_REAR,
            FunctionId::OilElectricityInfo => OIL_ELECTRICITY_INFO,
            FunctionId::SwcKey => SWC_KEY,
            FunctionId::BasicFlyInfo => BASIC_FLY_INFO,
            FunctionId::CurrentOilWear => CURRENT_OIL_WEAR,
            FunctionId::TravelOilInfo => TRAVEL_OIL_INFO,
            FunctionId::CarDoorInfo => CAR_DOOR_INFO,
            FunctionId::TpmsInfo => TPMS_INFO,
            FunctionId::CentralState => CENTRAL_STATE,
            FunctionId::FiftyOilWear => FIFTY_OIL_WEAR,
            FunctionId::AcState => AC_STATE,
            FunctionId::SwcAngle => SWC_ANGLE,
            FunctionId::CommandKey => COMMAND_KEY,
            FunctionId::CanVersion => CAN_VERSION,
            FunctionId::AmpState => AMP_STATE,
            FunctionId::SystemInfo => SYSTEM_INFO,
            FunctionId::CarInfo => CAR_INFO,
            FunctionId::AcSettings => AC_SETTINGS,
            FunctionId::DataRequest => DATA_REQUEST,
            FunctionId::MediaSettings => MEDIA_SETTINGS,
            FunctionId::Id3Settings => ID3_SETTINGS,
        }
    }

    /// Vendor label for this function.
    pub fn name(self) -> &'static str {
        match self {
            FunctionId::RadarFront => "RadarState (mode 0 front)",
            FunctionId::RadarRear => "RadarState (mode 1 back)",
            FunctionId::OilElectricityInfo => "OilEctricityInfo",
            FunctionId::SwcKey => "SWCKey",
            FunctionId::BasicFlyInfo => "BasicFlyInfo",
            FunctionId::CurrentOilWear => "CurrentOilWear",
            FunctionId::TravelOilInfo => "TravelOilInfo",
            FunctionId::CarDoorInfo => "CarDoorInfo",
            FunctionId::TpmsInfo => "TPMSInfo",
            FunctionId::CentralState => "CentralState",
            FunctionId::FiftyOilWear => "FiftyOilWear",
            FunctionId::AcState => "ACState",
            FunctionId::SwcAngle => "SWCAngle",
            FunctionId::CommandKey => "CommondKey",
            FunctionId::CanVersion => "CanVersion",
            FunctionId::AmpState => "AMPState",
            FunctionId::SystemInfo => "SystemInfo",
            FunctionId::CarInfo => "CarInfo",
            FunctionId::AcSettings => "A/C Settings",
            FunctionId::DataRequest => "Data request",
            FunctionId::MediaSettings => "Media Settings",
            FunctionId::Id3Settings => "Id3 Settings",
        }
    }

    /// `true` for frames the head unit sends to the CAN box.
    pub fn is_head_unit_request(self) -> bool {
        matches!(
            self,
            FunctionId::AcSettings
                | FunctionId::DataRequest
                | FunctionId::MediaSettings
                | FunctionId::Id3Settings
        )
    }

    /// `true` if a field decoder exists for this function.
    pub fn has_decoder(self) -> bool {
        matches!(
            self,
            FunctionId::RadarFront
                | FunctionId::RadarRear
                | FunctionId::OilElectricityInfo
                | FunctionId::BasicFlyInfo
                | FunctionId::TravelOilInfo
                | FunctionId::CarDoorInfo
                | FunctionId::TpmsInfo
                | FunctionId::AcState
                | FunctionId::SwcAngle
                | FunctionId::CarInfo
                | FunctionId::AcSettings
                | FunctionId::DataRequest
        )
    }
}

/// Vendor label for a raw id, or `None` if the id is not registered.
pub fn function_name(id: u8) -> Option<&'static str> {
    FunctionId::from_u8(id).map(FunctionId::name)
}
