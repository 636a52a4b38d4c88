//! EdgeFlow: real-time camera frame processing demo.

use std::sync::Arc;

use color_eyre::Result;
use tracing::{debug, info};

use edgeflow::capture::TestPatternSource;
use edgeflow::display::ChannelSink;
use edgeflow::{pipeline, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling and logging
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter("edgeflow=debug")
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .init();

    info!("EdgeFlow launching...");

    // Load configuration
    let config = Config::load(std::env::args().nth(1).as_deref())?;
    edgeflow::CONFIG.store(Arc::new(config.clone()));

    // Camera and display collaborators; the test pattern stands in for
    // real capture hardware.
    let source = TestPatternSource::new(config.capture.clone());
    let (sink, rx) = ChannelSink::bounded(config.pipeline.channel_depth);

    // Stand-in renderer: drain processed frames
    let render_task = tokio::spawn(async move {
        while let Ok(frame) = rx.recv_async().await {
            debug!(
                "Presented frame {} ({}x{}, {:?})",
                frame.meta.sequence,
                frame.width(),
                frame.height(),
                frame.format()
            );
        }
    });

    let session = pipeline::start(&config, source, sink)?;
    info!("Streaming in {:?} mode, Ctrl-C to stop", session.mode());

    tokio::signal::ctrl_c().await?;

    session.stop().await;
    render_task.abort();

    info!("EdgeFlow shutting down");
    Ok(())
}
