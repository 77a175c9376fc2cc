//! Per-module configuration
//!
//! Everything a module needs at construction. Values are fixed for the
//! lifetime of the driver instance.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::charset::Charset;

/// Highest valid 7-bit bus address
pub const MAX_ADDRESS: u8 = 0x7F;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Charset size is neither 37 nor 48
    UnsupportedCharset(u16),
    /// Steps per rotation must be positive
    ZeroStepsPerRotation,
    /// Stored steps per rotation does not fit in `u16`
    StepsPerRotationOutOfRange(i32),
    /// Address outside the 7-bit range
    InvalidAddress(i32),
    /// Fewer addresses configured than modules
    ModuleCountMismatch,
    /// More modules than the display supports
    TooManyModules,
}

/// Module construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModuleConfig {
    /// 7-bit expander address
    pub address: u8,
    /// Full steps per drum rotation
    pub steps_per_rotation: u16,
    /// Per-module correction added to the magnet position
    pub step_offset: i16,
    /// Drum step index at which the home sensor triggers
    pub magnet_position: u16,
    /// Number of symbols on the drum (37 or 48)
    pub charset_size: u16,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            address: 0,
            steps_per_rotation: 2048, // 28BYJ-48 geared stepper
            step_offset: 0,
            magnet_position: 710,
            charset_size: Charset::STANDARD_SIZE,
        }
    }
}

impl ModuleConfig {
    /// Create a config for a module address with default geometry
    pub fn with_address(address: u8) -> Self {
        Self {
            address,
            ..Default::default()
        }
    }

    /// Drum variant, falling back to the standard set for unknown sizes
    pub fn charset(&self) -> Charset {
        Charset::from_size(self.charset_size)
    }

    /// Magnet position corrected by the step offset
    ///
    /// Wrapped into `[0, steps_per_rotation)`.
    pub fn effective_magnet_position(&self) -> u16 {
        let spr = self.steps_per_rotation.max(1) as i32;
        (self.magnet_position as i32 + self.step_offset as i32).rem_euclid(spr) as u16
    }

    /// Check the configuration without applying any fallback
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address > MAX_ADDRESS {
            return Err(ConfigError::InvalidAddress(self.address as i32));
        }
        if self.steps_per_rotation == 0 {
            return Err(ConfigError::ZeroStepsPerRotation);
        }
        Charset::try_from_size(self.charset_size)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ModuleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.charset(), Charset::Standard);
        assert_eq!(config.effective_magnet_position(), 710);
    }

    #[test]
    fn test_effective_magnet_position_wraps() {
        let config = ModuleConfig {
            steps_per_rotation: 720,
            magnet_position: 700,
            step_offset: 40,
            ..Default::default()
        };
        assert_eq!(config.effective_magnet_position(), 20);

        let config = ModuleConfig {
            steps_per_rotation: 720,
            magnet_position: 10,
            step_offset: -30,
            ..Default::default()
        };
        assert_eq!(config.effective_magnet_position(), 700);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ModuleConfig {
            charset_size: 40,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::UnsupportedCharset(40)));
        // The lenient accessor still picks a drum
        assert_eq!(config.charset(), Charset::Standard);

        let config = ModuleConfig {
            steps_per_rotation: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroStepsPerRotation));

        let config = ModuleConfig::with_address(0x80);
        assert_eq!(config.validate(), Err(ConfigError::InvalidAddress(0x80)));
    }
}
