//! Stepper sequencing and position math
//!
//! Coil phase patterns and forward-only drum position tracking.

pub mod phase;
pub mod position;

pub use phase::{coil_pattern, IDLE_PATTERN, PHASE_COUNT, PHASE_PATTERNS, PIN_CONFIG_PATTERN};
pub use position::PositionTracker;
