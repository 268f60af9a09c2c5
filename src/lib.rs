//! commflag-wrapper - commercial break flagging for MythTV recordings
//!
//! Runs as a MythTV user job: finds the recording for a job (or a
//! channel id and start time), picks a detection strategy from the channel
//! callsign, runs comskip or a silence analysis over the audio track, and
//! writes the resulting skip list back through `mythutil`.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Callsign classification, silence coalescing, cutlists, job states
//! - **Application**: The flag use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (comskip, FFmpeg, MySQL, mythutil, config files)
//! - **CLI**: Argument parsing, logging setup, and the application runner

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
