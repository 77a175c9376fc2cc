//! Display-wide settings schema
//!
//! Per-module values (addresses, offsets) are integer lists indexed by
//! module; drum geometry is shared by every module on the display.

use heapless::Vec;
use splitflap_hal::SettingsStore;

use super::module::{ConfigError, ModuleConfig, MAX_ADDRESS};
use super::settings::{SettingDef, SettingValue, Settings, SettingsError, ValidationError};
use crate::charset::Charset;

/// Maximum modules on one display
pub const MAX_MODULES: usize = 16;

/// Settings namespace for display configuration
pub const DISPLAY_NAMESPACE: &str = "config";

/// Setting keys
pub mod keys {
    /// Number of modules on the display
    pub const MODULE_COUNT: &str = "moduleCount";
    /// Bus address of each module
    pub const MODULE_ADDRESSES: &str = "moduleAddresses";
    /// Step offset of each module
    pub const MODULE_OFFSETS: &str = "moduleOffsets";
    /// Steps per drum rotation
    pub const STEPS_PER_ROT: &str = "stepsPerRot";
    /// Step index where the home sensor triggers
    pub const MAGNET_POSITION: &str = "magnetPosition";
    /// Drum symbol count
    pub const CHARSET: &str = "charset";
}

fn validate_module_count(raw: &str) -> Result<(), ValidationError> {
    match raw.trim().parse::<i32>() {
        Ok(n) if (1..=MAX_MODULES as i32).contains(&n) => Ok(()),
        _ => Err(ValidationError::new("module count out of range")),
    }
}

fn validate_addresses(raw: &str) -> Result<(), ValidationError> {
    let addresses: Vec<i32, MAX_MODULES> = super::csv::parse_int_list(raw)
        .map_err(|_| ValidationError::new("invalid address list"))?;
    if addresses
        .iter()
        .all(|&a| (0..=MAX_ADDRESS as i32).contains(&a))
    {
        Ok(())
    } else {
        Err(ValidationError::new("address outside 7-bit range"))
    }
}

fn validate_offsets(raw: &str) -> Result<(), ValidationError> {
    let offsets: Vec<i32, MAX_MODULES> = super::csv::parse_int_list(raw)
        .map_err(|_| ValidationError::new("invalid offset list"))?;
    if offsets
        .iter()
        .all(|&o| (i16::MIN as i32..=i16::MAX as i32).contains(&o))
    {
        Ok(())
    } else {
        Err(ValidationError::new("offset out of range"))
    }
}

fn validate_steps(raw: &str) -> Result<(), ValidationError> {
    match raw.trim().parse::<i32>() {
        Ok(n) if (1..=u16::MAX as i32).contains(&n) => Ok(()),
        _ => Err(ValidationError::new("steps per rotation out of range")),
    }
}

fn validate_magnet(raw: &str) -> Result<(), ValidationError> {
    match raw.trim().parse::<i32>() {
        Ok(n) if (0..=u16::MAX as i32).contains(&n) => Ok(()),
        _ => Err(ValidationError::new("magnet position out of range")),
    }
}

fn validate_charset(raw: &str) -> Result<(), ValidationError> {
    match raw.trim().parse::<u16>() {
        Ok(n) if Charset::try_from_size(n).is_ok() => Ok(()),
        _ => Err(ValidationError::new("charset must be 37 or 48")),
    }
}

/// Schema of the display settings namespace
pub static DISPLAY_SETTINGS: [SettingDef; 6] = [
    SettingDef::new(keys::MODULE_COUNT, SettingValue::Int(8)).validated(validate_module_count),
    SettingDef::new(
        keys::MODULE_ADDRESSES,
        SettingValue::IntList("32,33,34,35,36,37,38,39"),
    )
    .validated(validate_addresses),
    SettingDef::new(keys::MODULE_OFFSETS, SettingValue::IntList("0,0,0,0,0,0,0,0"))
        .validated(validate_offsets),
    SettingDef::new(keys::STEPS_PER_ROT, SettingValue::Int(2048)).validated(validate_steps),
    SettingDef::new(keys::MAGNET_POSITION, SettingValue::Int(710)).validated(validate_magnet),
    SettingDef::new(keys::CHARSET, SettingValue::Int(37)).validated(validate_charset),
];

/// Open the display settings namespace on a store
pub fn display_settings<S: SettingsStore>(store: S) -> Settings<S> {
    Settings::new(store, DISPLAY_NAMESPACE, &DISPLAY_SETTINGS)
}

/// Build one [`ModuleConfig`] per configured module
///
/// Missing offsets default to 0. Fewer addresses than modules is an error.
pub fn load_module_configs<S: SettingsStore>(
    settings: &mut Settings<S>,
) -> Result<Vec<ModuleConfig, MAX_MODULES>, SettingsError> {
    let count = settings.get_int(keys::MODULE_COUNT)?;
    if count < 0 || count as usize > MAX_MODULES {
        return Err(ConfigError::TooManyModules.into());
    }
    let count = count as usize;

    let addresses: Vec<i32, MAX_MODULES> = settings.get_int_list(keys::MODULE_ADDRESSES)?;
    let offsets: Vec<i32, MAX_MODULES> = settings.get_int_list(keys::MODULE_OFFSETS)?;
    if addresses.len() < count {
        return Err(ConfigError::ModuleCountMismatch.into());
    }

    let steps_per_rotation = settings.get_int(keys::STEPS_PER_ROT)?;
    let steps_per_rotation =
        u16::try_from(steps_per_rotation)
            .map_err(|_| ConfigError::StepsPerRotationOutOfRange(steps_per_rotation))?;
    let magnet_position = settings.get_int(keys::MAGNET_POSITION)?.clamp(0, u16::MAX as i32) as u16;
    let charset_size = settings.get_int(keys::CHARSET)?.clamp(0, u16::MAX as i32) as u16;

    let mut modules = Vec::new();
    for (i, &address) in addresses.iter().take(count).enumerate() {
        let address =
            u8::try_from(address).map_err(|_| ConfigError::InvalidAddress(address))?;
        let step_offset = offsets.get(i).copied().unwrap_or(0);
        let config = ModuleConfig {
            address,
            steps_per_rotation,
            step_offset: step_offset.clamp(i16::MIN as i32, i16::MAX as i32) as i16,
            magnet_position,
            charset_size,
        };
        config.validate()?;
        modules
            .push(config)
            .map_err(|_| ConfigError::TooManyModules)?;
    }

    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::super::mock::MemoryStore;
    use super::*;

    #[test]
    fn test_defaults_load_eight_modules() {
        let mut settings = display_settings(MemoryStore::new());
        let modules = load_module_configs(&mut settings).unwrap();

        assert_eq!(modules.len(), 8);
        assert_eq!(modules[0].address, 32);
        assert_eq!(modules[7].address, 39);
        for module in &modules {
            assert_eq!(module.steps_per_rotation, 2048);
            assert_eq!(module.magnet_position, 710);
            assert_eq!(module.step_offset, 0);
            assert_eq!(module.charset(), Charset::Standard);
        }
    }

    #[test]
    fn test_applied_values_flow_into_configs() {
        let mut settings = display_settings(MemoryStore::new());
        settings
            .apply_all(&[
                (keys::MODULE_COUNT, "3"),
                (keys::MODULE_ADDRESSES, "0x20"),
            ])
            .unwrap_err();

        settings
            .apply_all(&[
                (keys::MODULE_COUNT, "3"),
                (keys::MODULE_ADDRESSES, "32, 33, 40"),
                (keys::MODULE_OFFSETS, "5,-7"),
                (keys::STEPS_PER_ROT, "720"),
                (keys::CHARSET, "48"),
            ])
            .unwrap();

        let modules = load_module_configs(&mut settings).unwrap();
        assert_eq!(modules.len(), 3);
        assert_eq!(modules[2].address, 40);
        assert_eq!(modules[0].step_offset, 5);
        assert_eq!(modules[1].step_offset, -7);
        // Missing offset defaults to zero
        assert_eq!(modules[2].step_offset, 0);
        assert_eq!(modules[0].steps_per_rotation, 720);
        assert_eq!(modules[0].charset(), Charset::Extended);
    }

    #[test]
    fn test_validators_reject_bad_values() {
        let mut settings = display_settings(MemoryStore::new());

        assert!(settings.apply(keys::CHARSET, "40").is_err());
        assert!(settings.apply(keys::MODULE_COUNT, "0").is_err());
        assert!(settings.apply(keys::MODULE_COUNT, "17").is_err());
        assert!(settings.apply(keys::MODULE_ADDRESSES, "32,200").is_err());
        assert!(settings.apply(keys::STEPS_PER_ROT, "0").is_err());
        assert!(settings.apply(keys::MODULE_OFFSETS, "40000").is_err());
        assert_eq!(
            settings.last_validation_error().map(|(k, _)| k),
            Some(keys::MODULE_OFFSETS)
        );
    }

    #[test]
    fn test_too_few_addresses() {
        let mut settings = display_settings(MemoryStore::new());
        settings.apply(keys::MODULE_COUNT, "4").unwrap();
        settings.apply(keys::MODULE_ADDRESSES, "32,33").unwrap();

        assert_eq!(
            load_module_configs(&mut settings),
            Err(SettingsError::Config(ConfigError::ModuleCountMismatch))
        );
    }

    #[test]
    fn test_invalid_stored_charset_is_reported() {
        let mut settings = display_settings(MemoryStore::new());
        // Bypass validation the way a corrupted store would
        settings.put_int(keys::CHARSET, 40).unwrap();

        assert_eq!(
            load_module_configs(&mut settings),
            Err(SettingsError::Config(ConfigError::UnsupportedCharset(40)))
        );
    }

    #[test]
    fn test_out_of_range_steps_per_rotation_is_reported() {
        let mut settings = display_settings(MemoryStore::new());
        settings.put_int(keys::STEPS_PER_ROT, -5).unwrap();
        assert_eq!(
            load_module_configs(&mut settings),
            Err(SettingsError::Config(
                ConfigError::StepsPerRotationOutOfRange(-5)
            ))
        );

        settings.put_int(keys::STEPS_PER_ROT, 70_000).unwrap();
        assert_eq!(
            load_module_configs(&mut settings),
            Err(SettingsError::Config(
                ConfigError::StepsPerRotationOutOfRange(70_000)
            ))
        );

        // Zero still fits and is rejected by module validation
        settings.put_int(keys::STEPS_PER_ROT, 0).unwrap();
        assert_eq!(
            load_module_configs(&mut settings),
            Err(SettingsError::Config(ConfigError::ZeroStepsPerRotation))
        );
    }
}
