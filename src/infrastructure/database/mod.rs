//! Recorder database adapters

pub mod mysql;

pub use mysql::MythDatabase;
