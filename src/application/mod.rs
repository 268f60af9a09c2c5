//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod flag;
pub mod locate;
pub mod ports;
pub mod result_writer;

#[cfg(test)]
pub(crate) mod testing;

// Re-export use cases
pub use flag::{FlagError, FlagOutput, FlagRecordingUseCase};
pub use locate::{LocateError, RecordingLocator};
pub use result_writer::{FlagOutcome, ResultWriter};
