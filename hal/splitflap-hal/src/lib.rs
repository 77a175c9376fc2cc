//! Splitflap Hardware Abstraction Layer
//!
//! This crate defines the bus and storage traits the split-flap driver
//! and settings layer are written against. Chip-specific code only has to
//! provide an `embedded-hal` I2C master (wrapped in [`EmbeddedHalBus`])
//! and a [`SettingsStore`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  splitflap-drivers / splitflap-core     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  splitflap-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal I2C master, flash / NVS   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Addressed two-byte bus transactions
//! - [`storage::SettingsStore`] - Persistent namespaced settings

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod i2c;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use i2c::{BusStatus, EmbeddedHalBus, I2cBus};
pub use storage::{SettingsStore, StorageError};
