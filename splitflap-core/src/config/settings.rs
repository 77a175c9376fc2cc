//! Typed settings accessor
//!
//! Layers per-key types, defaults and validation over a namespaced
//! [`SettingsStore`]. Keys that were never written read back as their
//! schema default.
//!
//! Encoding in the store:
//! - strings and integer lists: UTF-8 text
//! - integers: `i32` little-endian
//! - floats: `f32` little-endian

use heapless::{String, Vec};
use splitflap_hal::{SettingsStore, StorageError};

use super::csv::{format_int_list, parse_int_list, CsvError};
use super::module::ConfigError;

/// Longest stored text value in bytes
pub const MAX_VALUE_LEN: usize = 128;

/// Default value and type of a setting
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingValue {
    /// Free text
    Str(&'static str),
    /// Signed integer
    Int(i32),
    /// Floating point
    Float(f32),
    /// Comma-separated integers
    IntList(&'static str),
}

/// Reason a value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValidationError {
    /// Human-readable reason
    pub message: &'static str,
}

impl ValidationError {
    /// Create a validation error
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Validation hook run on the raw text before a value is stored
pub type Validator = fn(&str) -> Result<(), ValidationError>;

/// Schema entry for one setting
#[derive(Clone, Copy)]
pub struct SettingDef {
    /// Storage key
    pub key: &'static str,
    /// Type and default value
    pub default: SettingValue,
    /// Extra validation beyond type parsing
    pub validator: Option<Validator>,
}

impl SettingDef {
    /// Create a setting without extra validation
    pub const fn new(key: &'static str, default: SettingValue) -> Self {
        Self {
            key,
            default,
            validator: None,
        }
    }

    /// Attach a validator
    pub const fn validated(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Parse and validate raw text for this setting
    pub fn validate(&self, raw: &str) -> Result<(), ValidationError> {
        match self.default {
            SettingValue::Str(_) => {}
            SettingValue::Int(_) => {
                raw.trim()
                    .parse::<i32>()
                    .map_err(|_| ValidationError::new("expected an integer"))?;
            }
            SettingValue::Float(_) => {
                raw.trim()
                    .parse::<f32>()
                    .map_err(|_| ValidationError::new("expected a number"))?;
            }
            SettingValue::IntList(_) => {
                parse_int_list::<MAX_VALUE_LEN>(raw).map_err(|e| match e {
                    CsvError::Malformed => ValidationError::new("non-integer value in list"),
                    CsvError::OutOfRange => ValidationError::new("integer value out of range"),
                    CsvError::TooManyValues => ValidationError::new("too many values in list"),
                })?;
            }
        }
        match self.validator {
            Some(validator) => validator(raw),
            None => Ok(()),
        }
    }
}

impl core::fmt::Debug for SettingDef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SettingDef")
            .field("key", &self.key)
            .field("default", &self.default)
            .field("validated", &self.validator.is_some())
            .finish()
    }
}

/// Settings access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Key is not in the schema
    UnknownKey,
    /// Key exists but holds a different type
    TypeMismatch,
    /// Value rejected by validation
    Validation(ValidationError),
    /// Stored integer list could not be parsed
    Csv(CsvError),
    /// Underlying storage failed
    Storage(StorageError),
    /// Value does not fit the destination buffer
    ValueTooLong,
    /// Stored values do not form a valid configuration
    Config(ConfigError),
}

impl From<StorageError> for SettingsError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::BufferTooSmall => SettingsError::ValueTooLong,
            other => SettingsError::Storage(other),
        }
    }
}

impl From<CsvError> for SettingsError {
    fn from(e: CsvError) -> Self {
        SettingsError::Csv(e)
    }
}

impl From<ConfigError> for SettingsError {
    fn from(e: ConfigError) -> Self {
        SettingsError::Config(e)
    }
}

/// Typed view of one settings namespace
pub struct Settings<S> {
    store: S,
    namespace: &'static str,
    schema: &'static [SettingDef],
    last_validation: Option<(&'static str, ValidationError)>,
}

impl<S: SettingsStore> Settings<S> {
    /// Create an accessor for a namespace and schema
    pub fn new(store: S, namespace: &'static str, schema: &'static [SettingDef]) -> Self {
        Self {
            store,
            namespace,
            schema,
            last_validation: None,
        }
    }

    /// Release the underlying store
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Schema this accessor was created with
    pub fn schema(&self) -> &'static [SettingDef] {
        self.schema
    }

    /// Look up a key in the schema
    pub fn find(&self, key: &str) -> Result<&'static SettingDef, SettingsError> {
        self.schema
            .iter()
            .find(|def| def.key == key)
            .ok_or(SettingsError::UnknownKey)
    }

    /// Key and reason of the most recent rejected value
    pub fn last_validation_error(&self) -> Option<(&'static str, ValidationError)> {
        self.last_validation
    }

    /// Read a text setting (string or integer list)
    pub fn get_string<const N: usize>(&mut self, key: &str) -> Result<String<N>, SettingsError> {
        let def = self.find(key)?;
        let default = match def.default {
            SettingValue::Str(s) | SettingValue::IntList(s) => s,
            _ => return Err(SettingsError::TypeMismatch),
        };

        let mut buf = [0u8; MAX_VALUE_LEN];
        let text = match self.store.read(self.namespace, def.key, &mut buf)? {
            Some(len) => core::str::from_utf8(&buf[..len])
                .map_err(|_| SettingsError::Storage(StorageError::Corrupted))?,
            None => default,
        };

        let mut value = String::new();
        value
            .push_str(text)
            .map_err(|_| SettingsError::ValueTooLong)?;
        Ok(value)
    }

    /// Read an integer setting
    pub fn get_int(&mut self, key: &str) -> Result<i32, SettingsError> {
        let def = self.find(key)?;
        let SettingValue::Int(default) = def.default else {
            return Err(SettingsError::TypeMismatch);
        };

        let mut buf = [0u8; 4];
        match self.store.read(self.namespace, def.key, &mut buf)? {
            Some(4) => Ok(i32::from_le_bytes(buf)),
            Some(_) => Err(SettingsError::Storage(StorageError::Corrupted)),
            None => Ok(default),
        }
    }

    /// Read a floating point setting
    pub fn get_float(&mut self, key: &str) -> Result<f32, SettingsError> {
        let def = self.find(key)?;
        let SettingValue::Float(default) = def.default else {
            return Err(SettingsError::TypeMismatch);
        };

        let mut buf = [0u8; 4];
        match self.store.read(self.namespace, def.key, &mut buf)? {
            Some(4) => Ok(f32::from_le_bytes(buf)),
            Some(_) => Err(SettingsError::Storage(StorageError::Corrupted)),
            None => Ok(default),
        }
    }

    /// Read an integer list setting
    pub fn get_int_list<const N: usize>(&mut self, key: &str) -> Result<Vec<i32, N>, SettingsError> {
        if !matches!(self.find(key)?.default, SettingValue::IntList(_)) {
            return Err(SettingsError::TypeMismatch);
        }
        let text: String<MAX_VALUE_LEN> = self.get_string(key)?;
        Ok(parse_int_list(&text)?)
    }

    /// Store a text setting
    pub fn put_string(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let def = self.find(key)?;
        if !matches!(def.default, SettingValue::Str(_) | SettingValue::IntList(_)) {
            return Err(SettingsError::TypeMismatch);
        }
        if value.len() > MAX_VALUE_LEN {
            return Err(SettingsError::ValueTooLong);
        }
        self.store
            .write(self.namespace, def.key, value.as_bytes())?;
        Ok(())
    }

    /// Store an integer setting
    pub fn put_int(&mut self, key: &str, value: i32) -> Result<(), SettingsError> {
        let def = self.find(key)?;
        if !matches!(def.default, SettingValue::Int(_)) {
            return Err(SettingsError::TypeMismatch);
        }
        self.store
            .write(self.namespace, def.key, &value.to_le_bytes())?;
        Ok(())
    }

    /// Store a floating point setting
    pub fn put_float(&mut self, key: &str, value: f32) -> Result<(), SettingsError> {
        let def = self.find(key)?;
        if !matches!(def.default, SettingValue::Float(_)) {
            return Err(SettingsError::TypeMismatch);
        }
        self.store
            .write(self.namespace, def.key, &value.to_le_bytes())?;
        Ok(())
    }

    /// Store an integer list setting
    pub fn put_int_list(&mut self, key: &str, values: &[i32]) -> Result<(), SettingsError> {
        if !matches!(self.find(key)?.default, SettingValue::IntList(_)) {
            return Err(SettingsError::TypeMismatch);
        }
        let text: String<MAX_VALUE_LEN> =
            format_int_list(values).ok_or(SettingsError::ValueTooLong)?;
        self.put_string(key, &text)
    }

    /// Validate raw text for a key and store it with the key's type
    ///
    /// A rejected value is remembered for [`last_validation_error`](Self::last_validation_error).
    pub fn apply(&mut self, key: &str, raw: &str) -> Result<(), SettingsError> {
        let def = self.find(key)?;
        if let Err(e) = def.validate(raw) {
            self.last_validation = Some((def.key, e));
            return Err(SettingsError::Validation(e));
        }

        match def.default {
            SettingValue::Str(_) => self.put_string(key, raw),
            SettingValue::IntList(_) => self.put_string(key, raw.trim()),
            SettingValue::Int(_) => {
                let value = raw.trim().parse::<i32>().map_err(|_| SettingsError::TypeMismatch)?;
                self.put_int(key, value)
            }
            SettingValue::Float(_) => {
                let value = raw.trim().parse::<f32>().map_err(|_| SettingsError::TypeMismatch)?;
                self.put_float(key, value)
            }
        }
    }

    /// Apply several values, stopping at the first failure
    ///
    /// Values before the failing one stay stored.
    pub fn apply_all(&mut self, entries: &[(&str, &str)]) -> Result<(), SettingsError> {
        for (key, raw) in entries {
            self.apply(key, raw)?;
        }
        Ok(())
    }

    /// Erase every stored value so all keys read back as defaults
    pub fn reset(&mut self) -> Result<(), SettingsError> {
        self.store.clear(self.namespace)?;
        self.last_validation = None;
        Ok(())
    }
}
