//! Streaming loop: acquire, transform, present, once per tick.

pub mod pool;
pub mod throughput;

pub use pool::BufferPool;
pub use throughput::ThroughputCounter;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::capture::FrameSource;
use crate::display::FrameSink;
use crate::error::PipelineError;
use crate::process::{self, ModeCell, ProcessingMode};
use crate::Config;

/// Handle to a live streaming session.
///
/// Holding one *is* the Streaming state; the pipeline is Idle once it is
/// stopped or dropped. Mode switches and the fps readout go through here.
pub struct StreamSession {
    mode: Arc<ModeCell>,
    throughput: Arc<ThroughputCounter>,
    stop: watch::Sender<bool>,
    tick_task: JoinHandle<()>,
    report_task: JoinHandle<()>,
    stopped: bool,
}

/// Open the source and spawn the per-tick and reporter tasks.
///
/// Acquisition failures surface here synchronously; nothing is spawned and
/// the pipeline stays Idle.
pub fn start<S, K>(config: &Config, mut source: S, sink: K) -> Result<StreamSession, PipelineError>
where
    S: FrameSource,
    K: FrameSink,
{
    source.open()?;

    let mode = Arc::new(ModeCell::new(config.pipeline.mode));
    let throughput = Arc::new(ThroughputCounter::new());
    let (stop_tx, stop_rx) = watch::channel(false);

    let tick_period = Duration::from_secs_f64(1.0 / config.capture.fps.max(1) as f64);

    let tick_task = tokio::spawn(tick_loop(
        source,
        sink,
        Arc::clone(&mode),
        Arc::clone(&throughput),
        config.pipeline.edge_threshold,
        tick_period,
        stop_rx.clone(),
    ));
    let report_task = tokio::spawn(report_loop(Arc::clone(&throughput), stop_rx));

    info!("Streaming started, {} fps target", config.capture.fps);

    Ok(StreamSession {
        mode,
        throughput,
        stop: stop_tx,
        tick_task,
        report_task,
        stopped: false,
    })
}

impl StreamSession {
    /// Select the transform for subsequent frames. Takes effect on the next
    /// tick; a frame already mid-transform is never reprocessed.
    pub fn set_mode(&self, mode: ProcessingMode) {
        self.mode.set(mode);
    }

    pub fn mode(&self) -> ProcessingMode {
        self.mode.get()
    }

    /// Frames processed in the last reported second.
    pub fn fps(&self) -> u64 {
        self.throughput.rate()
    }

    /// Stop streaming: cancel both timers, release the source, zero the
    /// fps readout.
    pub async fn stop(mut self) {
        self.stopped = true;
        let _ = self.stop.send(true);
        let _ = (&mut self.tick_task).await;
        let _ = (&mut self.report_task).await;
        self.throughput.reset();
        info!("Streaming stopped");
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        if !self.stopped {
            self.tick_task.abort();
            self.report_task.abort();
            self.throughput.reset();
        }
    }
}

async fn tick_loop<S, K>(
    mut source: S,
    mut sink: K,
    mode: Arc<ModeCell>,
    throughput: Arc<ThroughputCounter>,
    edge_threshold: f32,
    tick_period: Duration,
    mut stop: watch::Receiver<bool>,
) where
    S: FrameSource,
    K: FrameSink,
{
    let pool = BufferPool::new(2);
    let mut ticker = tokio::time::interval(tick_period);
    // Skipping missed ticks is the same backpressure a display refresh
    // cycle applies: late frames are simply never captured.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = stop.changed() => break,
            _ = ticker.tick() => {
                let frame = match source.capture_frame() {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!("Frame capture failed, skipping tick: {e}");
                        continue;
                    }
                };
                if let Err(e) = frame.validate() {
                    warn!("Dropping malformed frame: {e}");
                    continue;
                }

                throughput.record_frame();

                match process::dispatch(mode.get(), frame, edge_threshold, &pool) {
                    Ok(out) => {
                        if let Err(e) = sink.present(out) {
                            warn!("Display sink rejected frame: {e}");
                        }
                    }
                    Err(e) => warn!("Transform failed, frame dropped: {e}"),
                }
            }
        }
    }

    source.close();
}

async fn report_loop(throughput: Arc<ThroughputCounter>, mut stop: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    // The first interval tick completes immediately; consume it so the
    // first report covers a full second.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = stop.changed() => break,
            _ = ticker.tick() => {
                let rate = throughput.take_rate();
                metrics::gauge!("pipeline_fps").set(rate as f64);
                info!("Throughput: {rate} fps");
            }
        }
    }
}
