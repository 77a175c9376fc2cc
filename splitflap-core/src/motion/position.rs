//! Drum position tracking
//!
//! The drum only turns forward. The tracker holds the believed step index
//! of the drum and the coil phase that will be driven next.

use super::phase::PHASE_COUNT;

/// Tracked drum position and coil phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionTracker {
    /// Steps in one full drum rotation (never zero)
    steps_per_rotation: u16,
    /// Current drum step index, in `[0, steps_per_rotation)`
    position: u16,
    /// Next coil phase, in `[0, PHASE_COUNT)`
    phase: u8,
}

impl PositionTracker {
    /// Create a tracker at position 0, phase 0
    ///
    /// A step count of zero is treated as one so position math never
    /// divides by zero.
    pub fn new(steps_per_rotation: u16) -> Self {
        Self {
            steps_per_rotation: steps_per_rotation.max(1),
            position: 0,
            phase: 0,
        }
    }

    /// Steps in one full drum rotation
    pub fn steps_per_rotation(&self) -> u16 {
        self.steps_per_rotation
    }

    /// Current drum step index
    pub fn position(&self) -> u16 {
        self.position
    }

    /// Coil phase driven by the next step
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Record one completed step
    pub fn advance(&mut self) {
        self.position = ((self.position as u32 + 1) % self.steps_per_rotation as u32) as u16;
        self.phase = (self.phase + 1) % PHASE_COUNT;
    }

    /// Move the phase back by one without touching the position
    pub fn rewind_phase(&mut self) {
        self.phase = (self.phase + PHASE_COUNT - 1) % PHASE_COUNT;
    }

    /// Forward steps needed to reach `target` from the current position
    pub fn steps_until(&self, target: u16) -> u16 {
        let spr = self.steps_per_rotation as u32;
        let target = target as u32 % spr;
        ((target + spr - self.position as u32) % spr) as u16
    }

    /// Re-base the position after detecting a known reference point
    ///
    /// The phase is left alone; it reflects the coils, not the drum.
    pub fn resync(&mut self, position: u16) {
        self.position = position % self.steps_per_rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_tracker_is_zeroed() {
        let tracker = PositionTracker::new(2048);
        assert_eq!(tracker.position(), 0);
        assert_eq!(tracker.phase(), 0);
        assert_eq!(tracker.steps_per_rotation(), 2048);
    }

    #[test]
    fn test_zero_steps_clamped() {
        let mut tracker = PositionTracker::new(0);
        assert_eq!(tracker.steps_per_rotation(), 1);
        tracker.advance();
        assert_eq!(tracker.position(), 0);
        assert_eq!(tracker.steps_until(5), 0);
    }

    #[test]
    fn test_phase_cycles() {
        let mut tracker = PositionTracker::new(100);
        let phases: [u8; 9] = core::array::from_fn(|_| {
            let phase = tracker.phase();
            tracker.advance();
            phase
        });
        assert_eq!(phases, [0, 1, 2, 3, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_rewind_phase() {
        let mut tracker = PositionTracker::new(100);
        tracker.rewind_phase();
        assert_eq!(tracker.phase(), 3);
        assert_eq!(tracker.position(), 0);

        tracker.advance();
        tracker.advance();
        tracker.rewind_phase();
        assert_eq!(tracker.phase(), 0);
        assert_eq!(tracker.position(), 2);
    }

    #[test]
    fn test_steps_until_wraps_forward() {
        let mut tracker = PositionTracker::new(720);
        for _ in 0..700 {
            tracker.advance();
        }
        assert_eq!(tracker.steps_until(700), 0);
        assert_eq!(tracker.steps_until(19), 39);
        assert_eq!(tracker.steps_until(699), 719);
    }

    #[test]
    fn test_resync() {
        let mut tracker = PositionTracker::new(2048);
        tracker.advance();
        tracker.resync(710);
        assert_eq!(tracker.position(), 710);
        assert_eq!(tracker.phase(), 1);

        tracker.resync(2050);
        assert_eq!(tracker.position(), 2);
    }

    proptest! {
        #[test]
        fn prop_full_rotation_returns_home(steps in 1u16..3000, start in 0u16..3000) {
            let mut tracker = PositionTracker::new(steps);
            tracker.resync(start);
            let origin = tracker.position();

            for _ in 0..steps {
                tracker.advance();
                prop_assert!(tracker.position() < steps);
            }
            prop_assert_eq!(tracker.position(), origin);
        }

        #[test]
        fn prop_steps_until_reaches_target(steps in 1u16..3000, start in 0u16..3000, target in 0u16..3000) {
            let mut tracker = PositionTracker::new(steps);
            tracker.resync(start);

            let n = tracker.steps_until(target);
            prop_assert!(n < steps);
            for _ in 0..n {
                tracker.advance();
            }
            prop_assert_eq!(tracker.position(), target % steps);
        }
    }
}
