//! Configuration types
//!
//! Module construction parameters and the typed settings layer they are
//! loaded from.

pub mod csv;
pub mod display;
pub mod module;
pub mod settings;

#[cfg(test)]
mod mock;

pub use csv::CsvError;
pub use display::{display_settings, load_module_configs, DISPLAY_SETTINGS, MAX_MODULES};
pub use module::{ConfigError, ModuleConfig};
pub use settings::{SettingDef, SettingValue, Settings, SettingsError, ValidationError};
