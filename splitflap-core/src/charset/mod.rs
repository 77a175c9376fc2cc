//! Drum character sets and step-position mapping

pub mod symbols;
pub mod table;

pub use symbols::{Charset, EXTENDED_SYMBOLS, STANDARD_SYMBOLS};
pub use table::{PositionTable, MAX_SYMBOLS};
