//! Hardware driver implementations
//!
//! This crate drives split-flap modules over the bus traits defined in
//! splitflap-hal, using the logic from splitflap-core:
//!
//! - Expander bus (PCF8575-style 16-bit I/O expander with fault latch)
//! - Split-flap module (stepper sequencing, home sensor, calibration)
//!
//! # Example
//!
//! ```ignore
//! let mut bus = ExpanderBus::new(EmbeddedHalBus::new(i2c));
//! let mut module = SplitFlapModule::new(0x20, 2048, 0, 710, 37);
//!
//! module.init(&mut bus, &mut delay);
//! module.home(&mut bus, &mut delay, 2000)?;
//! module.move_to(&mut bus, 'A', &mut delay, 2000);
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod expander;
pub mod module;

#[cfg(test)]
mod mock;

pub use expander::ExpanderBus;
pub use module::{HomeError, SplitFlapModule};
