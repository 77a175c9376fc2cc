//! Character to step-position table
//!
//! The rotation is divided evenly between the drum's symbols:
//! `position[i] = floor(i * steps_per_rotation / N)`. Integer math keeps
//! the table exact for any step count up to `u16::MAX`.

use super::symbols::Charset;

/// Largest supported drum
pub const MAX_SYMBOLS: usize = Charset::EXTENDED_SIZE as usize;

/// Step position of every symbol on a drum
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionTable {
    charset: Charset,
    positions: [u16; MAX_SYMBOLS],
    len: usize,
}

impl PositionTable {
    /// Build the table for a drum and step count
    pub fn new(charset: Charset, steps_per_rotation: u16) -> Self {
        let len = charset.len();
        let mut positions = [0u16; MAX_SYMBOLS];
        for (i, slot) in positions.iter_mut().take(len).enumerate() {
            *slot = (i as u32 * steps_per_rotation as u32 / len as u32) as u16;
        }
        Self {
            charset,
            positions,
            len,
        }
    }

    /// Charset this table was built for
    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Number of entries (symbols on the drum)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Step position for a drum index
    pub fn get(&self, index: usize) -> Option<u16> {
        self.as_slice().get(index).copied()
    }

    /// All positions in drum order
    pub fn as_slice(&self) -> &[u16] {
        &self.positions[..self.len]
    }

    /// Step position showing `c`
    ///
    /// Unknown characters resolve to the blank at position 0.
    pub fn position_for(&self, c: char) -> u16 {
        match self.charset.index_of(c) {
            Some(i) => self.positions[i],
            None => 0,
        }
    }

    /// Step position of the symbol just before `c` on the drum
    ///
    /// Wraps from index 0 to the last symbol. Unknown characters are
    /// treated as the blank, so they resolve to the last symbol.
    pub fn previous_position_for(&self, c: char) -> u16 {
        let index = self.charset.index_of(c).unwrap_or(0);
        let previous = (index + self.len - 1) % self.len;
        self.positions[previous]
    }
}
