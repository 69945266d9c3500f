//! Per-function payload decoders.
//!
//! Every decoder is a pure function from a payload slice to a typed value.
//! A payload shorter than the decoder's minimum yields
//! [`DecodeError::ShortPayload`]; nothing is partially decoded.

pub mod car_info;
pub mod climate;
pub mod door;
pub mod hybrid;
pub mod radar;
pub mod request;
pub mod steering;
pub mod tpms;
pub mod trip;

pub use car_info::{CarEngine, CarInfo, CarLamps, CarTrip};
pub use climate::{AcState, Temperature};
pub use door::CarDoorInfo;
pub use hybrid::OilElectricityInfo;
pub use radar::{CentralState, RadarState, radar_level};
pub use request::{AcSetting, AcSettingCode, DataRequest, DataRequestCode};
pub use steering::SwcAngle;
pub use tpms::{INVALID_PRESSURE, TpmsInfo, tpms_value};
pub use trip::{BasicFlyInfo, MileageUnit, TravelOilInfo, consumption_unit};

use crate::error::DecodeError;
use crate::ids::FunctionId;

/// One decoded frame payload, tagged by function.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedMessage {
    RadarFront(RadarState),
    RadarRear(RadarState, CentralState),
    OilElectricityInfo(OilElectricityInfo),
    SwcAngle(SwcAngle),
    BasicFlyInfo(BasicFlyInfo),
    TravelOilInfo(TravelOilInfo),
    CarDoorInfo(CarDoorInfo),
    TpmsInfo(TpmsInfo),
    AcState(AcState),
    CarInfo(CarInfo),
    DataRequest(DataRequest),
    AcSetting(AcSetting),
}

impl DecodedMessage {
    /// Function that carries this message.
    pub fn function(&self) -> FunctionId {
        match self {
            DecodedMessage::RadarFront(_) => FunctionId::RadarFront,
            DecodedMessage::RadarRear(..) => FunctionId::RadarRear,
            DecodedMessage::OilElectricityInfo(_) => FunctionId::OilElectricityInfo,
            DecodedMessage::SwcAngle(_) => FunctionId::SwcAngle,
            DecodedMessage::BasicFlyInfo(_) => FunctionId::BasicFlyInfo,
            DecodedMessage::TravelOilInfo(_) => FunctionId::TravelOilInfo,
            DecodedMessage::CarDoorInfo(_) => FunctionId::CarDoorInfo,
            DecodedMessage::TpmsInfo(_) => FunctionId::TpmsInfo,
            DecodedMessage::AcState(_) => FunctionId::AcState,
            DecodedMessage::CarInfo(_) => FunctionId::CarInfo,
            DecodedMessage::DataRequest(_) => FunctionId::DataRequest,
            DecodedMessage::AcSetting(_) => FunctionId::AcSettings,
        }
    }
}

/// Route `payload` to the decoder for `function`.
///
/// Returns `None` for registered functions that have no decoder.
pub fn decode_payload(
    function: FunctionId,
    payload: &[u8],
) -> Option<Result<DecodedMessage, DecodeError>> {
    let decoded = match function {
        FunctionId::RadarFront => radar::decode_front(payload).map(DecodedMessage::RadarFront),
        FunctionId::RadarRear => radar::decode_rear(payload)
            .map(|(state, central)| DecodedMessage::RadarRear(state, central)),
        FunctionId::OilElectricityInfo => {
            hybrid::decode(payload).map(DecodedMessage::OilElectricityInfo)
        }
        FunctionId::SwcAngle => steering::decode(payload).map(DecodedMessage::SwcAngle),
        FunctionId::BasicFlyInfo => {
            trip::decode_basic_fly_info(payload).map(DecodedMessage::BasicFlyInfo)
        }
        FunctionId::TravelOilInfo => {
            trip::decode_travel_oil_info(payload).map(DecodedMessage::TravelOilInfo)
        }
        FunctionId::CarDoorInfo => door::decode(payload).map(DecodedMessage::CarDoorInfo),
        FunctionId::TpmsInfo => tpms::decode(payload).map(DecodedMessage::TpmsInfo),
        FunctionId::AcState => climate::decode(payload).map(DecodedMessage::AcState),
        FunctionId::CarInfo => car_info::decode(payload).map(DecodedMessage::CarInfo),
        FunctionId::DataRequest => {
            request::decode_data_request(payload).map(DecodedMessage::DataRequest)
        }
        FunctionId::AcSettings => {
            request::decode_ac_setting(payload).map(DecodedMessage::AcSetting)
        }
        FunctionId::SwcKey
        | FunctionId::CurrentOilWear
        | FunctionId::CentralState
        | FunctionId::FiftyOilWear
        | FunctionId::CommandKey
        | FunctionId::CanVersion
        | FunctionId::AmpState
        | FunctionId::SystemInfo
        | FunctionId::MediaSettings
        | FunctionId::Id3Settings => return None,
    };
    Some(decoded)
}
