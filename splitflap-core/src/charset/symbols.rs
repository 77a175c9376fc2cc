//! Printable symbols present on each drum variant
//!
//! Symbols are listed in drum order. Index 0 sits on the home magnet.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Standard 37-symbol drum: blank, A-Z, 0-9
pub const STANDARD_SYMBOLS: [char; 37] = [
    ' ', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Extended 48-symbol drum: the standard set followed by punctuation
pub const EXTENDED_SYMBOLS: [char; 48] = [
    ' ', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '\'',
    ':', '?', '!', '.', '-', '/', '$', '@', '#', '%',
];

/// Drum variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Charset {
    /// 37 symbols
    #[default]
    Standard,
    /// 48 symbols
    Extended,
}

impl Charset {
    /// Symbol count of the standard drum
    pub const STANDARD_SIZE: u16 = 37;

    /// Symbol count of the extended drum
    pub const EXTENDED_SIZE: u16 = 48;

    /// Select a charset by symbol count
    ///
    /// Any size other than 48 selects the standard set.
    pub fn from_size(size: u16) -> Self {
        match size {
            Self::EXTENDED_SIZE => Charset::Extended,
            _ => Charset::Standard,
        }
    }

    /// Select a charset by symbol count, rejecting unknown sizes
    pub fn try_from_size(size: u16) -> Result<Self, ConfigError> {
        match size {
            Self::STANDARD_SIZE => Ok(Charset::Standard),
            Self::EXTENDED_SIZE => Ok(Charset::Extended),
            other => Err(ConfigError::UnsupportedCharset(other)),
        }
    }

    /// Symbols in drum order
    pub fn symbols(self) -> &'static [char] {
        match self {
            Charset::Standard => &STANDARD_SYMBOLS,
            Charset::Extended => &EXTENDED_SYMBOLS,
        }
    }

    /// Number of symbols on the drum
    pub fn len(self) -> usize {
        self.symbols().len()
    }

    /// Drum index of a character, matched case-insensitively
    pub fn index_of(self, c: char) -> Option<usize> {
        let c = c.to_ascii_uppercase();
        self.symbols().iter().position(|&s| s == c)
    }
}
