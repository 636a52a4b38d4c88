//! End-to-end streaming tests against a synthetic camera.

use std::time::Duration;

use bytes::Bytes;

use edgeflow::capture::{Frame, FrameSource, PixelFormat, TestPatternSource};
use edgeflow::display::ChannelSink;
use edgeflow::error::{CaptureError, PipelineError};
use edgeflow::pipeline;
use edgeflow::process::ProcessingMode;
use edgeflow::{CaptureConfig, Config, PipelineConfig};

fn test_config(mode: ProcessingMode) -> Config {
    Config {
        capture: CaptureConfig {
            width: 8,
            height: 8,
            fps: 100,
        },
        pipeline: PipelineConfig {
            mode,
            edge_threshold: 50.0,
            channel_depth: 64,
        },
    }
}

/// Camera whose acquisition is refused, like a denied permission prompt.
struct DeniedCamera;

impl FrameSource for DeniedCamera {
    fn open(&mut self) -> Result<(), CaptureError> {
        Err(CaptureError::PermissionDenied(
            "user refused camera access".into(),
        ))
    }

    fn capture_frame(&mut self) -> Result<Frame, CaptureError> {
        Err(CaptureError::NotStarted)
    }

    fn close(&mut self) {}
}

/// Camera that reports a wrong buffer length on every other frame.
struct GlitchyCamera {
    sequence: u64,
}

impl FrameSource for GlitchyCamera {
    fn open(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<Frame, CaptureError> {
        self.sequence += 1;
        let len = if self.sequence % 2 == 0 { 3 } else { 16 };
        Ok(Frame::new(
            Bytes::from(vec![0u8; len]),
            self.sequence,
            2,
            2,
            PixelFormat::Rgba8,
        ))
    }

    fn close(&mut self) {}
}

#[tokio::test]
async fn acquisition_failure_keeps_pipeline_idle() {
    let config = test_config(ProcessingMode::EdgeDetect);
    let (sink, rx) = ChannelSink::bounded(4);

    let result = pipeline::start(&config, DeniedCamera, sink);
    assert!(matches!(
        result,
        Err(PipelineError::Acquisition(CaptureError::PermissionDenied(_)))
    ));

    // nothing was spawned, so the sink stays untouched
    assert!(rx.is_empty());
}

#[tokio::test]
async fn edge_frames_flow_and_stop_releases_everything() {
    let config = test_config(ProcessingMode::EdgeDetect);
    let source = TestPatternSource::new(config.capture.clone());
    let (sink, rx) = ChannelSink::bounded(config.pipeline.channel_depth);

    let session = pipeline::start(&config, source, sink).unwrap();

    let first = tokio::time::timeout(Duration::from_secs(2), rx.recv_async())
        .await
        .expect("frame within two seconds")
        .unwrap();
    assert_eq!(first.width(), 8);
    assert_eq!(first.height(), 8);
    assert_eq!(first.format(), PixelFormat::Rgba8);
    // edge map border is black, fully opaque
    assert_eq!(first.sample(0, 0, 0), Some(0));
    assert_eq!(first.sample(0, 0, 3), Some(255));

    session.stop().await;

    // the tick task dropped the sink on exit; drain until disconnect
    while rx.recv_async().await.is_ok() {}
}

#[tokio::test]
async fn mode_switch_applies_to_subsequent_frames() {
    let config = test_config(ProcessingMode::Passthrough);
    let source = TestPatternSource::new(config.capture.clone());
    let (sink, rx) = ChannelSink::bounded(config.pipeline.channel_depth);

    let session = pipeline::start(&config, source, sink).unwrap();
    assert_eq!(session.mode(), ProcessingMode::Passthrough);

    let raw = tokio::time::timeout(Duration::from_secs(2), rx.recv_async())
        .await
        .expect("frame within two seconds")
        .unwrap();
    assert_eq!(raw.format(), PixelFormat::Rgba8);
    assert_eq!(raw.data.len(), 8 * 8 * 4);

    session.set_mode(ProcessingMode::Grayscale);
    assert_eq!(session.mode(), ProcessingMode::Grayscale);

    // frames already in flight may still be raw; the switch lands on a
    // following tick
    let gray = loop {
        let frame = tokio::time::timeout(Duration::from_secs(2), rx.recv_async())
            .await
            .expect("frame within two seconds")
            .unwrap();
        if frame.format() == PixelFormat::Gray8 {
            break frame;
        }
    };
    assert_eq!(gray.data.len(), 64);

    session.stop().await;
}

#[tokio::test]
async fn malformed_frames_are_skipped_without_killing_the_stream() {
    let config = test_config(ProcessingMode::Passthrough);
    let (sink, rx) = ChannelSink::bounded(config.pipeline.channel_depth);

    let session = pipeline::start(&config, GlitchyCamera { sequence: 0 }, sink).unwrap();

    // only odd-sequence (well-formed) frames make it through
    for _ in 0..3 {
        let frame = tokio::time::timeout(Duration::from_secs(2), rx.recv_async())
            .await
            .expect("frame within two seconds")
            .unwrap();
        assert_eq!(frame.meta.sequence % 2, 1);
        assert!(frame.validate().is_ok());
    }

    session.stop().await;
}

#[tokio::test(start_paused = true)]
async fn throughput_is_reported_once_per_second() {
    let config = test_config(ProcessingMode::Passthrough);
    let source = TestPatternSource::new(config.capture.clone());
    let (sink, _rx) = ChannelSink::bounded(config.pipeline.channel_depth);

    let session = pipeline::start(&config, source, sink).unwrap();
    assert_eq!(session.fps(), 0);

    // 100 fps ticker under a paused clock: the first report covers a full
    // second of virtual time.
    tokio::time::sleep(Duration::from_millis(1050)).await;
    let rate = session.fps();
    assert!(
        (99..=101).contains(&rate),
        "expected ~100 fps, got {rate}"
    );

    session.stop().await;
}
