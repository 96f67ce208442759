//! Configuration domain module

mod app_config;

pub use app_config::{AppConfig, DEFAULT_FFMPEG_PATH, DEFAULT_OUTPUT_DIR};
