//! Head unit <-> CAN box serial protocol: framing, validation and field decoding.
//!
//! This crate is intentionally I/O-free. It provides pure decoders and two
//! small state machines ([`FrameAssembler`] and [`RepeatSuppressor`]) that can
//! be tested and fuzzed without a serial port attached.
//!
//! # Wire format
//! | Offset    | Field        | Notes                                         |
//! |-----------|--------------|-----------------------------------------------|
//! | 0         | start        | always `0x2E`                                 |
//! | 1         | function id  | 29–65 box → head unit, 130/144/192/200 reverse|
//! | 2         | length `N`   | declared payload length                       |
//! | 3..3+N    | payload      | function specific                             |
//! | last      | checksum     | `(sum(bytes[1..last]) & 0xFF) ^ 0xFF`         |
//!
//! Frames are delimited only by the start byte. A `0x2E` inside a payload is
//! indistinguishable from the start of the next frame; the wire format has no
//! escaping, so the assembler splits there and the checksum flag reports it.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod decode;
pub mod dispatch;
pub mod error;
pub mod field;
pub mod fields;
pub mod frame;
pub mod ids;
pub mod suppress;

pub use decode::{
    AcSetting, AcSettingCode, AcState, BasicFlyInfo, CarDoorInfo, CarInfo, CentralState,
    DataRequest, DataRequestCode, DecodedMessage, OilElectricityInfo, RadarState, SwcAngle,
    Temperature, TpmsInfo, TravelOilInfo, decode_payload,
};
pub use dispatch::{Dispatcher, FrameOutcome, ValidationRecord};
pub use error::{DecodeError, FrameError};
pub use field::{ByteOrder, read_uint};
pub use fields::{Field, FieldValue};
pub use frame::{
    FrameAssembler, MIN_FRAME_LEN, RawFrame, START_DELIMITER, checksum, encode_frame,
};
pub use ids::{FunctionId, UNKNOWN_FUNCTION_NAME, function_name};
pub use suppress::{DecoderState, RepeatSuppressor};
