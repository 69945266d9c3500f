//! End-to-end tests: raw byte stream through the assembler and dispatcher.

use canbox_protocol::{
    AcSettingCode, DataRequestCode, DecodedMessage, Dispatcher, FrameAssembler, FrameOutcome,
    encode_frame,
};
use insta::assert_snapshot;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn run(stream: &[u8], mut dispatcher: Dispatcher) -> Vec<FrameOutcome> {
    let mut asm = FrameAssembler::new();
    let mut frames = asm.push_slice(stream);
    frames.extend(asm.finish());
    frames.iter().map(|f| dispatcher.process(f)).collect()
}

fn render(message: &DecodedMessage) -> String {
    message
        .fields()
        .iter()
        .map(|f| format!("{}={}", f.name, f.value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn front_radar_stream_fields() -> TestResult {
    let stream = [0x2E, 0x1D, 0x04, 0x01, 0x02, 0x03, 0x04, 0xD4];
    let outcomes = run(&stream, Dispatcher::new());
    let message = outcomes
        .first()
        .and_then(FrameOutcome::message)
        .ok_or("no decoded message")?;
    assert_snapshot!(render(message), @r"
    FrontLeft=1
    FrontLeftCenter=4
    FrontRightCenter=7
    FrontRight=10
    ");
    Ok(())
}

#[test]
fn tpms_fields_at_unit_scale() -> TestResult {
    let stream = encode_frame(37, &[0x01, 0x64, 0x64, 0x64, 0x64, 0x64])?;
    let outcomes = run(&stream, Dispatcher::new());
    let message = outcomes
        .first()
        .and_then(FrameOutcome::message)
        .ok_or("no decoded message")?;
    assert_snapshot!(render(message), @r"
    Unit=1
    FrontLeftWheelPressureAlarm=0
    FrontRightWheelPressureAlarm=0
    BackLeftWheelPressureAlarm=0
    BackRightWheelPressureAlarm=0
    FrontLeftWheelPressure=100.0
    FrontRightWheelPressure=100.0
    BackLeftWheelPressure=100.0
    BackRightWheelPressure=100.0
    PrepareWheelPressure=100.0
    ");
    Ok(())
}

#[test]
fn tpms_fields_at_tenth_scale_render_shortest() -> TestResult {
    // Checksum of this frame is 0x2E, so feed the dispatcher directly.
    let frame = encode_frame(37, &[0x00, 32, 33, 100, 7, 250])?;
    let outcome = Dispatcher::new().process(&frame);
    let message = outcome.message().ok_or("no decoded message")?;
    assert_snapshot!(render(message), @r"
    Unit=2
    FrontLeftWheelPressureAlarm=0
    FrontRightWheelPressureAlarm=0
    BackLeftWheelPressureAlarm=0
    BackRightWheelPressureAlarm=0
    FrontLeftWheelPressure=3.2
    FrontRightWheelPressure=3.3000000000000003
    BackLeftWheelPressure=10.0
    BackRightWheelPressure=0.7000000000000001
    PrepareWheelPressure=25.0
    ");

    let front_left = message
        .fields()
        .into_iter()
        .find(|f| f.name == "FrontLeftWheelPressure")
        .ok_or("no front left pressure")?;
    assert_eq!(serde_json::to_string(&front_left.value)?, "3.2");
    Ok(())
}

#[test]
fn repeated_function_in_stream_is_dropped() -> TestResult {
    let mut stream = Vec::new();
    stream.extend(encode_frame(29, &[1, 1, 1, 1])?);
    stream.extend(encode_frame(29, &[2, 2, 2, 2])?);
    stream.extend(encode_frame(36, &[0x80, 0x00])?);
    stream.extend(encode_frame(29, &[3, 3, 3, 3])?);

    let kinds: Vec<_> = run(&stream, Dispatcher::new())
        .iter()
        .map(FrameOutcome::kind)
        .collect();
    assert_eq!(kinds, ["decoded", "suppressed", "decoded", "decoded"]);

    let emitted = run(&stream, Dispatcher::without_suppression())
        .iter()
        .filter(|o| o.is_emitted())
        .count();
    assert_eq!(emitted, 4);
    Ok(())
}

#[test]
fn leading_noise_surfaces_as_its_own_frame() -> TestResult {
    let mut stream = vec![0x00, 0x11];
    stream.extend(encode_frame(36, &[0, 0])?);
    let outcomes = run(&stream, Dispatcher::new());
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes.first().map(FrameOutcome::kind), Some("malformed"));
    assert_eq!(outcomes.get(1).map(FrameOutcome::kind), Some("decoded"));
    Ok(())
}

#[test]
fn delimiter_inside_payload_splits_the_frame() -> TestResult {
    let stream = encode_frame(29, &[0x01, 0x2E, 0x03, 0x04])?;
    let kinds: Vec<_> = run(&stream, Dispatcher::new())
        .iter()
        .map(FrameOutcome::kind)
        .collect();
    assert_eq!(kinds, ["short_payload", "unknown_function"]);
    Ok(())
}

#[test]
fn request_frames_on_the_wire() {
    assert_snapshot!(hex(&DataRequestCode::TpmsInfo.request_frame()), @"2E 90 02 25 00 48");
    assert_snapshot!(hex(&AcSettingCode::Power.request_frame()), @"2E 82 02 01 00 7A");
}

#[test]
fn head_unit_request_decodes_its_own_frame() -> TestResult {
    let frame = DataRequestCode::AcState.request_frame();
    let outcomes = run(&frame, Dispatcher::new());
    let Some(DecodedMessage::DataRequest(req)) = outcomes.first().and_then(FrameOutcome::message)
    else {
        return Err("expected data request".into());
    };
    assert_eq!(req.code, Some(DataRequestCode::AcState));
    let record = outcomes.first().and_then(FrameOutcome::record).ok_or("no record")?;
    assert!(record.checksum_ok);
    Ok(())
}
