//! Stream capture infrastructure module
//!
//! Records a live stream by running FFmpeg as a child process.

mod ffmpeg;

pub use ffmpeg::{FfmpegCapture, FfmpegHandle};
