//! Comma-separated integer lists
//!
//! Per-module settings (addresses, offsets) are stored as text such as
//! `"32,33,34"`. Tokens are trimmed and a trailing empty token is ignored.

use core::fmt::Write;

use heapless::{String, Vec};

/// Integer list parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CsvError {
    /// A token is not an integer
    Malformed,
    /// A token is an integer that does not fit in `i32`
    OutOfRange,
    /// More values than the destination can hold
    TooManyValues,
}

/// Parse a comma-separated list of integers
pub fn parse_int_list<const N: usize>(text: &str) -> Result<Vec<i32, N>, CsvError> {
    let mut values = Vec::new();
    let text = text.trim();
    let text = text.strip_suffix(',').unwrap_or(text);
    if text.trim().is_empty() {
        return Ok(values);
    }

    for token in text.split(',') {
        let value = token.trim().parse::<i32>().map_err(|e| match e.kind() {
            core::num::IntErrorKind::PosOverflow | core::num::IntErrorKind::NegOverflow => {
                CsvError::OutOfRange
            }
            _ => CsvError::Malformed,
        })?;
        values.push(value).map_err(|_| CsvError::TooManyValues)?;
    }

    Ok(values)
}

/// Format integers as a comma-separated list
///
/// Returns `None` if the text does not fit in `N` bytes.
pub fn format_int_list<const N: usize>(values: &[i32]) -> Option<String<N>> {
    let mut text = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            text.push(',').ok()?;
        }
        write!(text, "{}", value).ok()?;
    }
    Some(text)
}
