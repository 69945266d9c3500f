//! Presentation-neutral view of a [`DecodedMessage`] as ordered named fields.
//!
//! Sinks render these however they like (text, JSON, CSV). Field names are
//! the CAN box vendor's own labels so output can be diffed against its tools.

use std::fmt;

use serde::Serialize;

use crate::decode::{
    AcState, BasicFlyInfo, CarDoorInfo, CarInfo, CentralState, DecodedMessage,
    OilElectricityInfo, RadarState, TpmsInfo, TravelOilInfo,
};

/// A single decoded value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
    /// Field defined but not applicable, e.g. EV units have no history window.
    Missing,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Unsigned(v) => write!(f, "{v}"),
            FieldValue::Signed(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v:?}"),
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Missing => f.write_str("-"),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<u8> for FieldValue {
    fn from(v: u8) -> Self {
        FieldValue::Unsigned(u64::from(v))
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Unsigned(u64::from(v))
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Signed(i64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Missing, Into::into)
    }
}

/// A named value, in the order the vendor lists them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub value: FieldValue,
}

fn field(name: &'static str, value: impl Into<FieldValue>) -> Field {
    Field {
        name,
        value: value.into(),
    }
}

impl DecodedMessage {
    /// Ordered field list for sinks.
    pub fn fields(&self) -> Vec<Field> {
        match self {
            DecodedMessage::RadarFront(state) => radar_fields(
                state,
                ["FrontLeft", "FrontLeftCenter", "FrontRightCenter", "FrontRight"],
            ),
            DecodedMessage::RadarRear(state, central) => {
                let mut out = radar_fields(
                    state,
                    ["BackLeft", "BackLeftCenter", "BackRightCenter", "BackRight"],
                );
                out.extend(central_fields(central));
                out
            }
            DecodedMessage::OilElectricityInfo(info) => hybrid_fields(info),
            DecodedMessage::SwcAngle(angle) => vec![
                field("SWCAngle", angle.degrees),
                field("Raw", u32::from(angle.raw)),
            ],
            DecodedMessage::BasicFlyInfo(info) => basic_fly_fields(info),
            DecodedMessage::TravelOilInfo(info) => travel_oil_fields(info),
            DecodedMessage::CarDoorInfo(info) => door_fields(info),
            DecodedMessage::TpmsInfo(info) => tpms_fields(info),
            DecodedMessage::AcState(state) => ac_fields(state),
            DecodedMessage::CarInfo(info) => car_info_fields(info),
            DecodedMessage::DataRequest(req) => vec![
                field("Code", req.raw),
                field("Request", req.code.map(|c| c.label())),
            ],
            DecodedMessage::AcSetting(setting) => vec![
                field("Code", setting.raw),
                field("Action", setting.code.map(|c| c.label())),
            ],
        }
    }
}

fn radar_fields(state: &RadarState, names: [&'static str; 4]) -> Vec<Field> {
    let [left, left_center, right_center, right] = names;
    vec![
        field(left, state.left),
        field(left_center, state.left_center),
        field(right_center, state.right_center),
        field(right, state.right),
    ]
}

fn central_fields(central: &CentralState) -> Vec<Field> {
    vec![
        field("BackRadarSwitch", central.radar_enabled),
        field("CentreSensorSensitivity", central.sensitivity),
        field("RadarAlarmVolumeSwitch", central.alarm_volume_switch),
        field("BackVolumeLevel", central.volume_level),
    ]
}

fn hybrid_fields(info: &OilElectricityInfo) -> Vec<Field> {
    vec![
        field("BatteryCapacity", info.battery_capacity),
        field("OilElectricMixMotorcycle", info.hybrid),
        field("MotoDriveBattery", info.motor_drives_battery),
        field("MotoDriveWheel", info.motor_drives_wheel),
        field("EngineDriveMoto", info.engine_drives_motor),
        field("EngineDriveWheel", info.engine_drives_wheel),
        field("BatteryDriveMoto", info.battery_drives_motor),
        field("WheelDriveMoto", info.wheel_drives_motor),
    ]
}

fn basic_fly_fields(info: &BasicFlyInfo) -> Vec<Field> {
    vec![
        field("AverageSpeed", info.average_speed),
        field("DriverTime", info.driver_time),
        field("DriverMileage", info.mileage),
        field("MileageUnit", info.mileage_unit.to_string()),
    ]
}

fn travel_oil_fields(info: &TravelOilInfo) -> Vec<Field> {
    let [a1, a2, a3, a4, a5] = info.averages;
    vec![
        field("Unit", info.unit),
        field("RangeOfMinuteOilConsumption", info.range_minutes),
        field("CurrentOilConsumption", info.current),
        field("AverageOilConsumption1", a1),
        field("AverageOilConsumption2", a2),
        field("AverageOilConsumption3", a3),
        field("AverageOilConsumption4", a4),
        field("AverageOilConsumption5", a5),
    ]
}

fn door_fields(info: &CarDoorInfo) -> Vec<Field> {
    vec![
        field("FrontRightDoor", info.front_right),
        field("FrontLeftDoor", info.front_left),
        field("BackRightDoor", info.back_right),
        field("BackLeftDoor", info.back_left),
        field("Trunk", info.trunk),
        field("FrontCover", info.front_cover),
        field("SkyWindow", info.sky_window),
    ]
}

fn tpms_fields(info: &TpmsInfo) -> Vec<Field> {
    let [fl_alarm, fr_alarm, bl_alarm, br_alarm] = info.wheel_alarms;
    let [fl, fr, bl, br] = info.pressures;
    vec![
        field("Unit", info.unit),
        field("FrontLeftWheelPressureAlarm", fl_alarm),
        field("FrontRightWheelPressureAlarm", fr_alarm),
        field("BackLeftWheelPressureAlarm", bl_alarm),
        field("BackRightWheelPressureAlarm", br_alarm),
        field("FrontLeftWheelPressure", fl),
        field("FrontRightWheelPressure", fr),
        field("BackLeftWheelPressure", bl),
        field("BackRightWheelPressure", br),
        field("PrepareWheelPressure", info.spare_pressure),
    ]
}

fn ac_fields(s: &AcState) -> Vec<Field> {
    vec![
        field("ACSwitch", s.ac_switch),
        field("ACMode", s.ac_mode),
        field("InsideOrOutsideRoot", s.recirculation),
        field("Auto", s.auto),
        field("Dual", s.dual),
        field("MaxAc", s.max_ac),
        field("AutoDefog", s.auto_defog),
        field("AirMode_Up", s.air_up),
        field("AirMode_Parallel", s.air_parallel),
        field("AirMode_Down", s.air_down),
        field("AirSpeedLevel", s.fan_speed),
        field("FrontWindowDefog", s.front_window_defog),
        field("BackWindowDefog", s.back_window_defog),
        field("ECONMode", s.econ),
        field("LeftSeatHeat", s.left_seat_heat),
        field("RightSeatHeat", s.right_seat_heat),
        field("BackAirState", s.back_air_on),
        field("BackAirMode_Parallel", s.back_air_parallel),
        field("BackAirMode_Down", s.back_air_down),
        field("BackAirMode_Auto", s.back_air_auto),
        field("BackAirSpeedLevel", s.back_fan_speed),
        field("LeftSideTemperature", s.left_temperature.to_string()),
        field("RightSideTemperature", s.right_temperature.to_string()),
        field("BackSideTemperature", s.back_temperature.to_string()),
    ]
}

fn car_info_fields(info: &CarInfo) -> Vec<Field> {
    let mut out = vec![field("Mode", info.mode())];
    match info {
        CarInfo::Lamps(l) => out.extend([
            field("Handbrake", l.handbrake),
            field("DippedHeadlight", l.dipped_headlight),
            field("HighBeam", l.high_beam),
            field("LampWidthLight", l.width_lamp),
            field("BackLight", l.back_light),
            field("BrakeLight", l.brake_light),
            field("RightTurnSignal", l.right_turn_signal),
            field("LeftTurnSignal", l.left_turn_signal),
            field("CautionLight", l.caution_light),
            field("AfterFogLamps", l.rear_fog_lamps),
            field("BeforeFogLamps", l.front_fog_lamps),
            field("BackDoorLock", l.back_door_lock),
            field("FrontRightDoorLock", l.front_right_door_lock),
            field("FrontLeftDoorLock", l.front_left_door_lock),
        ]),
        CarInfo::Trip(t) => out.extend([
            field("DrivingMile", t.driving_mile),
            field("CanDriverMileage", t.driver_mileage),
            field("TRIPAMile", t.trip_a),
            field("TRIPBMile", t.trip_b),
            field("InstantanSpeed", t.instant_speed),
            field("EquallySpeed", t.average_speed),
        ]),
        CarInfo::Engine(e) => out.extend([
            field("EngineSpeed", e.engine_speed),
            field("OutsideTemp", format!("{}℃", e.outside_temp)),
        ]),
        CarInfo::UnknownMode(mode) => {
            out.push(field("Error", format!("Unknown CarInfo mode: {mode}")));
        }
    }
    out
}
