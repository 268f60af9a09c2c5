//! Skip list writer adapters

pub mod mythutil;

pub use mythutil::MythutilSkipList;
