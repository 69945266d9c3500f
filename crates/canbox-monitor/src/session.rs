//! Byte-at-a-time decode loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use canbox_protocol::{Dispatcher, FrameAssembler, FrameOutcome};
use serde::Serialize;
use tracing::{info, trace, warn};

use crate::error::MonitorError;
use crate::sink::FrameSink;
use crate::source::ByteSource;

/// Counters for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub bytes: u64,
    pub frames: u64,
    pub decoded: u64,
    pub undecoded: u64,
    pub unknown_function: u64,
    pub short_payload: u64,
    pub malformed: u64,
    pub suppressed: u64,
    pub checksum_mismatch: u64,
}

impl SessionStats {
    fn record(&mut self, outcome: &FrameOutcome) {
        self.frames += 1;
        match outcome {
            FrameOutcome::Decoded { .. } => self.decoded += 1,
            FrameOutcome::Undecoded { .. } => self.undecoded += 1,
            FrameOutcome::UnknownFunction { .. } => self.unknown_function += 1,
            FrameOutcome::ShortPayload { .. } => self.short_payload += 1,
            FrameOutcome::Malformed { .. } => self.malformed += 1,
            FrameOutcome::Suppressed { .. } => self.suppressed += 1,
        }
        if outcome.record().is_some_and(|r| !r.checksum_ok) {
            self.checksum_mismatch += 1;
        }
    }
}

/// Pulls bytes from a source and pushes every completed frame through the
/// dispatcher into a sink, strictly in arrival order.
pub struct Session<S, K> {
    source: S,
    sink: K,
    assembler: FrameAssembler,
    dispatcher: Dispatcher,
    stats: SessionStats,
    stop: Arc<AtomicBool>,
}

impl<S: ByteSource, K: FrameSink> Session<S, K> {
    pub fn new(source: S, sink: K, suppress_repeats: bool) -> Self {
        let dispatcher = if suppress_repeats {
            Dispatcher::new()
        } else {
            Dispatcher::without_suppression()
        };
        Self {
            source,
            sink,
            assembler: FrameAssembler::new(),
            dispatcher,
            stats: SessionStats::default(),
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that ends [`Session::run`] at the next loop iteration when set.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[cfg(test)]
    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Run until the source closes, the source fails or the stop flag is
    /// raised. The trailing partial frame is flushed through the dispatcher
    /// on the way out, and a source failure is returned after the flush.
    pub fn run(&mut self) -> Result<(), MonitorError> {
        info!(suppress_repeats = self.dispatcher.suppresses_repeats(), "session started");
        let mut failure = None;
        while !self.stop.load(Ordering::Relaxed) {
            match self.source.read_byte() {
                Ok(Some(byte)) => {
                    self.stats.bytes += 1;
                    if let Some(frame) = self.assembler.push(byte) {
                        self.dispatch(&frame)?;
                    }
                }
                Ok(None) if self.source.is_closed() => break,
                Ok(None) => trace!("read timeout"),
                Err(e) => {
                    warn!(error = %e, "source failed");
                    failure = Some(e);
                    break;
                }
            }
        }

        if let Some(frame) = self.assembler.finish() {
            self.dispatch(&frame)?;
        }

        info!(
            bytes = self.stats.bytes,
            frames = self.stats.frames,
            decoded = self.stats.decoded,
            suppressed = self.stats.suppressed,
            checksum_mismatch = self.stats.checksum_mismatch,
            "session finished"
        );
        match failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn dispatch(&mut self, frame: &[u8]) -> Result<(), MonitorError> {
        let outcome = self.dispatcher.process(frame);
        self.stats.record(&outcome);
        if outcome.is_emitted() {
            self.sink.emit(&outcome)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::JsonSink;
    use crate::source::{ReplaySource, SourceError};
    use canbox_protocol::encode_frame;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn replay_counts_and_flushes_trailing_frame() -> TestResult {
        let bytes = [
            encode_frame(29, &[1, 1, 1, 1])?,
            encode_frame(29, &[2, 2, 2, 2])?,
            encode_frame(36, &[0, 0])?,
        ]
        .concat();
        let source = ReplaySource::from_bytes(bytes.clone());
        let mut session = Session::new(source, JsonSink::new(Vec::new()), true);
        session.run()?;
        let stats = session.stats();

        assert_eq!(stats.bytes, bytes.len() as u64);
        assert_eq!(stats.frames, 3);
        assert_eq!(stats.decoded, 2);
        assert_eq!(stats.suppressed, 1);

        let text = String::from_utf8(session.into_sink().into_inner())?;
        assert_eq!(text.lines().count(), 2);
        Ok(())
    }

    #[test]
    fn no_suppress_emits_every_frame() -> TestResult {
        let bytes = [
            encode_frame(29, &[1, 1, 1, 1])?,
            encode_frame(29, &[2, 2, 2, 2])?,
        ]
        .concat();
        let mut session =
            Session::new(ReplaySource::from_bytes(bytes), JsonSink::new(Vec::new()), false);
        session.run()?;
        let stats = session.stats();
        assert_eq!(stats.decoded, 2);
        assert_eq!(stats.suppressed, 0);
        Ok(())
    }

    #[test]
    fn checksum_mismatch_counted() -> TestResult {
        let bytes = vec![0x2E, 0x24, 0x02, 0x00, 0x00, 0x00];
        let mut session =
            Session::new(ReplaySource::from_bytes(bytes), JsonSink::new(Vec::new()), true);
        session.run()?;
        let stats = session.stats();
        assert_eq!(stats.checksum_mismatch, 1);
        assert_eq!(stats.decoded, 1);
        Ok(())
    }

    #[test]
    fn stop_flag_ends_session_before_reading() -> TestResult {
        let bytes = encode_frame(29, &[1, 1, 1, 1])?;
        let mut session =
            Session::new(ReplaySource::from_bytes(bytes), JsonSink::new(Vec::new()), true);
        session.stop_handle().store(true, Ordering::Relaxed);
        session.run()?;
        let stats = session.stats();
        assert_eq!(stats.bytes, 0);
        assert_eq!(stats.frames, 0);
        Ok(())
    }

    /// Times out twice, yields one frame, then fails.
    struct FlakySource {
        script: Vec<Result<Option<u8>, ()>>,
    }

    impl ByteSource for FlakySource {
        fn read_byte(&mut self) -> Result<Option<u8>, SourceError> {
            match self.script.pop() {
                Some(Ok(byte)) => Ok(byte),
                Some(Err(())) | None => Err(SourceError::Disconnected),
            }
        }

        fn is_closed(&self) -> bool {
            false
        }
    }

    #[test]
    fn timeouts_are_retried_and_errors_propagate_after_flush() -> TestResult {
        let frame = encode_frame(36, &[0, 0])?;
        let mut script: Vec<Result<Option<u8>, ()>> = vec![Ok(None), Ok(None)];
        script.extend(frame.iter().map(|&b| Ok(Some(b))));
        script.push(Err(()));
        script.reverse();

        let mut session = Session::new(FlakySource { script }, JsonSink::new(Vec::new()), true);
        let result = session.run();
        assert!(matches!(
            result,
            Err(MonitorError::Source(SourceError::Disconnected))
        ));
        assert_eq!(session.stats().bytes, frame.len() as u64);
        assert_eq!(session.stats().frames, 1);
        assert_eq!(session.stats().decoded, 1);

        let text = String::from_utf8(session.into_sink().into_inner())?;
        assert_eq!(text.lines().count(), 1);
        Ok(())
    }
}
