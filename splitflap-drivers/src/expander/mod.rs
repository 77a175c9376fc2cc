//! I/O expander bus implementations

pub mod pcf8575;

pub use pcf8575::ExpanderBus;
