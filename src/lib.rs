pub mod capture;
pub mod display;
pub mod error;
pub mod pipeline;
pub mod process;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

use crate::process::ProcessingMode;

/// Global configuration that can be atomically swapped at runtime
pub static CONFIG: once_cell::sync::Lazy<ArcSwap<Config>> =
    once_cell::sync::Lazy::new(|| ArcSwap::from_pointee(Config::default()));

/// System configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub capture: CaptureConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Transform applied when a session starts.
    pub mode: ProcessingMode,
    /// Gradient magnitudes strictly above this become white in the edge map.
    pub edge_threshold: f32,
    /// Depth of the bounded channel feeding the display sink.
    pub channel_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture: CaptureConfig {
                width: 1280,
                height: 720,
                fps: 30,
            },
            pipeline: PipelineConfig {
                mode: ProcessingMode::EdgeDetect,
                edge_threshold: 50.0,
                channel_depth: 8,
            },
        }
    }
}

impl Config {
    /// Layer an optional TOML file over the built-in defaults.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_pipeline() {
        let config = Config::default();
        assert_eq!(config.capture.fps, 30);
        assert_eq!(config.pipeline.mode, ProcessingMode::EdgeDetect);
        assert_eq!(config.pipeline.edge_threshold, 50.0);
    }

    #[test]
    fn load_without_file_yields_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.capture.width, 1280);
        assert_eq!(config.capture.height, 720);
    }
}
