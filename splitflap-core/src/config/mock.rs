//! In-memory settings store for tests

use std::collections::HashMap;
use std::string::{String, ToString};
use std::vec::Vec;

use splitflap_hal::{SettingsStore, StorageError};

/// Settings store backed by a hash map
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<(String, String), Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn read(
        &mut self,
        namespace: &str,
        key: &str,
        buffer: &mut [u8],
    ) -> Result<Option<usize>, StorageError> {
        match self.values.get(&(namespace.to_string(), key.to_string())) {
            Some(data) if data.len() > buffer.len() => Err(StorageError::BufferTooSmall),
            Some(data) => {
                buffer[..data.len()].copy_from_slice(data);
                Ok(Some(data.len()))
            }
            None => Ok(None),
        }
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.values
            .insert((namespace.to_string(), key.to_string()), data.to_vec());
        Ok(())
    }

    fn clear(&mut self, namespace: &str) -> Result<(), StorageError> {
        self.values.retain(|(ns, _), _| ns != namespace);
        Ok(())
    }
}
