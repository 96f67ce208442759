//! Radio Recorder - scheduled weekly capture of a live audio stream
//!
//! Starts FFmpeg at a weekly start time and interrupts it at the end time,
//! saving each broadcast as a timestamped file.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Schedule and recording value objects, session state, errors
//! - **Application**: Recording controller and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (FFmpeg, cron scheduler, config file)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
