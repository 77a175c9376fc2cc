//! Persistent settings storage abstractions
//!
//! Provides a namespaced key-value store for configuration values that
//! can be implemented on top of a chip's flash or NVS partition.

/// Errors from settings storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Underlying storage operation failed
    Storage,
    /// Buffer too small for the stored value
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Namespaced key-value storage
///
/// Values are opaque byte strings; typing and defaults are handled by
/// the settings layer above. Implementations should handle:
/// - Wear leveling across flash sectors
/// - Data integrity (CRC or similar)
/// - Opening a namespace on first use
pub trait SettingsStore {
    /// Read a value into the provided buffer
    ///
    /// # Arguments
    /// * `namespace` - Settings namespace
    /// * `key` - Key within the namespace
    /// * `buffer` - Buffer to read data into
    ///
    /// # Returns
    /// `Ok(Some(len))` with the number of bytes read, `Ok(None)` if the key
    /// has never been written, or an error.
    fn read(
        &mut self,
        namespace: &str,
        key: &str,
        buffer: &mut [u8],
    ) -> Result<Option<usize>, StorageError>;

    /// Write a value, replacing any previous one
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Erase every key in a namespace
    fn clear(&mut self, namespace: &str) -> Result<(), StorageError>;
}
