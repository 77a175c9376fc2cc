//! Four-phase coil patterns
//!
//! Each pattern is the full 16-bit expander word written for that phase.
//! Bits 1-4 drive the stepper coils, bit 15 is the hall sensor input and
//! every other pin is held high (quasi-bidirectional input state).

/// Number of phases in one coil cycle
pub const PHASE_COUNT: u8 = 4;

/// Expander word per phase, two adjacent coils energised at a time
pub const PHASE_PATTERNS: [u16; PHASE_COUNT as usize] = [
    0b1111_1111_1110_0111,
    0b1111_1111_1111_0011,
    0b1111_1111_1111_1001,
    0b1111_1111_1110_1101,
];

/// Expander word with every coil de-energised
pub const IDLE_PATTERN: u16 = 0b1111_1111_1110_0001;

/// Pin direction word written once at init: pin 15 input, coils output
pub const PIN_CONFIG_PATTERN: u16 = IDLE_PATTERN;

/// Mask of the coil output bits
pub const COIL_MASK: u16 = 0b0000_0000_0001_1110;

/// Input bit wired to the active-low hall sensor
pub const SENSOR_BIT: u16 = 1 << 15;

/// Expander word for a phase index
///
/// The index is reduced modulo [`PHASE_COUNT`].
pub fn coil_pattern(phase: u8) -> u16 {
    PHASE_PATTERNS[(phase % PHASE_COUNT) as usize]
}

/// Decode the hall sensor bit from an expander input word
pub fn magnet_detected(input: u16) -> bool {
    input & SENSOR_BIT == 0
}
