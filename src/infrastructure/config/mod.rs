//! Configuration adapters

pub mod mythtv_xml;
pub mod xdg;

pub use mythtv_xml::{parse_config_xml, MythConfigResolver};
pub use xdg::XdgConfigStore;
