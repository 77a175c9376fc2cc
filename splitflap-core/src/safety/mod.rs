//! Fault tracking
//!
//! Bus faults are latched once and surfaced to the control loop.

pub mod fault;

pub use fault::{BusFault, FaultLatch};
