//! Split-flap module driver
//!
//! One module is a character drum turned by a four-phase stepper whose
//! coils hang off a 16-bit I/O expander, with an active-low hall sensor on
//! expander pin 15 marking the home magnet.
//!
//! # Motion
//!
//! The drum only turns forward. Each [`step`](SplitFlapModule::step)
//! writes the coil pattern for the current phase and then advances the
//! tracked position and phase. [`stop`](SplitFlapModule::stop) drops all
//! coils so an idle motor draws no current; position and phase are kept.
//!
//! # Faults
//!
//! Nothing here returns an error for bus trouble. Failed writes are
//! latched on the [`ExpanderBus`], and sensor reads on a faulted bus
//! report "no magnet" without issuing a transaction.

use embedded_hal::delay::DelayNs;
use splitflap_core::charset::{Charset, PositionTable};
use splitflap_core::config::ModuleConfig;
use splitflap_core::motion::{coil_pattern, phase, PositionTracker, IDLE_PATTERN, PIN_CONFIG_PATTERN};
use splitflap_core::safety::BusFault;
use splitflap_hal::I2cBus;

use crate::expander::ExpanderBus;

/// Delay between priming pulses at init
pub const INIT_PULSE_DELAY_MS: u32 = 100;

/// Number of steps in the priming sequence (one full phase cycle)
pub const INIT_PRIMING_STEPS: usize = 4;

/// Rotations searched for the magnet before homing gives up
pub const HOMING_ROTATIONS: u32 = 2;

/// Homing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomeError {
    /// Magnet not seen within the search distance
    MagnetNotFound,
    /// Bus fault latched; the sensor cannot be read
    BusFaulted(BusFault),
}

/// Driver state for one split-flap module
#[derive(Debug, Clone)]
pub struct SplitFlapModule {
    config: ModuleConfig,
    table: PositionTable,
    tracker: PositionTracker,
}

impl Default for SplitFlapModule {
    fn default() -> Self {
        Self::from_config(ModuleConfig::default())
    }
}

impl SplitFlapModule {
    /// Create a module driver
    ///
    /// The magnet position is stored with `step_offset` applied. A
    /// `charset_size` other than 48 selects the standard 37-symbol drum.
    pub fn new(
        address: u8,
        steps_per_rotation: u16,
        step_offset: i16,
        magnet_position: u16,
        charset_size: u16,
    ) -> Self {
        Self::from_config(ModuleConfig {
            address,
            steps_per_rotation,
            step_offset,
            magnet_position,
            charset_size,
        })
    }

    /// Create a module driver from a configuration
    pub fn from_config(config: ModuleConfig) -> Self {
        Self {
            table: PositionTable::new(config.charset(), config.steps_per_rotation),
            tracker: PositionTracker::new(config.steps_per_rotation),
            config,
        }
    }

    /// Construction parameters
    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    /// Expander address
    pub fn address(&self) -> u8 {
        self.config.address
    }

    /// Drum variant
    pub fn charset(&self) -> Charset {
        self.table.charset()
    }

    /// Steps per drum rotation
    pub fn steps_per_rotation(&self) -> u16 {
        self.tracker.steps_per_rotation()
    }

    /// Magnet position with the step offset applied
    pub fn magnet_position(&self) -> u16 {
        self.config.effective_magnet_position()
    }

    /// Tracked drum position
    pub fn position(&self) -> u16 {
        self.tracker.position()
    }

    /// Coil phase driven by the next step
    pub fn phase(&self) -> u8 {
        self.tracker.phase()
    }

    /// Character to step-position table
    pub fn table(&self) -> &PositionTable {
        &self.table
    }

    /// Step position showing `c` (unknown characters show the blank)
    pub fn position_for(&self, c: char) -> u16 {
        self.table.position_for(c)
    }

    /// Step position of the symbol before `c` on the drum
    pub fn previous_position_for(&self, c: char) -> u16 {
        self.table.previous_position_for(c)
    }

    /// Forward steps from the tracked position to `c`
    pub fn steps_to(&self, c: char) -> u16 {
        self.tracker.steps_until(self.position_for(c))
    }

    /// Forward steps from the tracked position to the symbol before `c`
    pub fn steps_to_previous(&self, c: char) -> u16 {
        self.tracker.steps_until(self.previous_position_for(c))
    }

    /// Configure the expander and prime the stepper phases
    ///
    /// Sets pin directions, de-energises the coils, then drives one full
    /// phase cycle with [`INIT_PULSE_DELAY_MS`] between pulses and parks
    /// the motor again. The tracked position advances by the priming
    /// steps.
    pub fn init<B: I2cBus, D: DelayNs>(&mut self, bus: &mut ExpanderBus<B>, delay: &mut D) {
        self.table = PositionTable::new(self.config.charset(), self.config.steps_per_rotation);

        bus.write_word(self.config.address, PIN_CONFIG_PATTERN);
        self.stop(bus);

        for _ in 0..INIT_PRIMING_STEPS {
            delay.delay_ms(INIT_PULSE_DELAY_MS);
            self.step(bus, true);
        }
        delay.delay_ms(INIT_PULSE_DELAY_MS);
        self.stop(bus);
    }

    /// Drive the coil pattern for the current phase
    ///
    /// With `update`, the tracked position and phase then advance by one.
    pub fn step<B: I2cBus>(&mut self, bus: &mut ExpanderBus<B>, update: bool) {
        bus.write_word(self.config.address, coil_pattern(self.tracker.phase()));
        if update {
            self.tracker.advance();
        }
    }

    /// De-energise every coil without losing position or phase
    pub fn stop<B: I2cBus>(&mut self, bus: &mut ExpanderBus<B>) {
        bus.write_word(self.config.address, IDLE_PATTERN);
    }

    /// Re-energise the coils driven by the last step
    ///
    /// Rewinds the phase by one and re-emits that pattern without moving.
    pub fn start<B: I2cBus>(&mut self, bus: &mut ExpanderBus<B>) {
        self.tracker.rewind_phase();
        self.step(bus, false);
    }

    /// Check whether the home magnet is under the sensor
    ///
    /// False when the bus is faulted (no transaction is issued) or when
    /// the expander does not return a full input word.
    pub fn read_hall_effect_sensor<B: I2cBus>(&mut self, bus: &mut ExpanderBus<B>) -> bool {
        bus.read_word(self.config.address)
            .map(phase::magnet_detected)
            .unwrap_or(false)
    }

    /// Turn forward to show `c`, then park the motor
    ///
    /// Returns the number of steps taken. No bus traffic when the drum
    /// already shows `c`. The first step re-energises the coils, so no
    /// [`start`](Self::start) is needed.
    pub fn move_to<B: I2cBus, D: DelayNs>(
        &mut self,
        bus: &mut ExpanderBus<B>,
        c: char,
        delay: &mut D,
        step_delay_us: u32,
    ) -> u16 {
        let steps = self.steps_to(c);
        if steps == 0 {
            return 0;
        }

        for _ in 0..steps {
            self.step(bus, true);
            delay.delay_us(step_delay_us);
        }
        self.stop(bus);
        steps
    }

    /// Turn forward until the home magnet is found and re-base the position
    ///
    /// On success the tracked position is set to [`magnet_position`](Self::magnet_position)
    /// and the number of steps taken is returned. Gives up after
    /// [`HOMING_ROTATIONS`] full rotations. The motor is parked either way.
    pub fn home<B: I2cBus, D: DelayNs>(
        &mut self,
        bus: &mut ExpanderBus<B>,
        delay: &mut D,
        step_delay_us: u32,
    ) -> Result<u32, HomeError> {
        if let Some(fault) = bus.fault() {
            return Err(HomeError::BusFaulted(fault));
        }

        let max_steps = self.steps_per_rotation() as u32 * HOMING_ROTATIONS;
        let mut taken = 0;
        while taken < max_steps {
            if self.read_hall_effect_sensor(bus) {
                self.stop(bus);
                self.tracker.resync(self.magnet_position());
                #[cfg(feature = "defmt")]
                defmt::info!(
                    "Module {=u8} homed after {=u32} steps",
                    self.config.address,
                    taken
                );
                return Ok(taken);
            }
            if let Some(fault) = bus.fault() {
                self.stop(bus);
                return Err(HomeError::BusFaulted(fault));
            }
            self.step(bus, true);
            delay.delay_us(step_delay_us);
            taken += 1;
        }

        self.stop(bus);
        #[cfg(feature = "defmt")]
        defmt::warn!(
            "Module {=u8} magnet not found in {=u32} steps",
            self.config.address,
            max_steps
        );
        Err(bus.fault().map_or(HomeError::MagnetNotFound, HomeError::BusFaulted))
    }
}
