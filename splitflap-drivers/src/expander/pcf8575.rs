//! PCF8575-style 16-bit I/O expander bus
//!
//! The expander has no registers: a two-byte write sets all 16 pins (low
//! byte first, pins 0-7 then 8-15) and a two-byte read returns the pin
//! levels in the same order. Pins written high act as inputs.
//!
//! Every module on a bus shares one [`FaultLatch`]. The first failed write
//! is recorded (and logged when `defmt` is enabled); later failures are
//! not reported again. While the latch is set, reads are skipped entirely
//! and report no data. Writes are always attempted.

use splitflap_core::safety::{BusFault, FaultLatch};
use splitflap_hal::{BusStatus, I2cBus};

/// Bytes per expander transaction
pub const WORD_BYTES: usize = 2;

/// Shared expander bus with its fault latch
#[derive(Debug)]
pub struct ExpanderBus<B> {
    bus: B,
    latch: FaultLatch,
}

impl<B: I2cBus> ExpanderBus<B> {
    /// Wrap a bus with a clear fault latch
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            latch: FaultLatch::new(),
        }
    }

    /// Release the underlying bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Access the underlying bus
    pub fn inner(&self) -> &B {
        &self.bus
    }

    /// Write all 16 pins of the expander at `address`
    pub fn write_word(&mut self, address: u8, word: u16) {
        if let Err(e) = self.bus.write(address, &word.to_le_bytes()) {
            let status: BusStatus = e.into();
            if self.latch.record(address, status) {
                #[cfg(feature = "defmt")]
                defmt::error!(
                    "Error writing data to module {=u8}, error code: {=u8}",
                    address,
                    status.code()
                );
            }
        }
    }

    /// Read all 16 pins of the expander at `address`
    ///
    /// Returns `None` without touching the bus while the fault latch is
    /// set, and when the device returns anything other than two bytes.
    pub fn read_word(&mut self, address: u8) -> Option<u16> {
        if self.latch.is_latched() {
            return None;
        }

        let mut buf = [0u8; WORD_BYTES];
        match self.bus.read(address, &mut buf) {
            Ok(WORD_BYTES) => Some(u16::from_le_bytes(buf)),
            Ok(_len) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Short read from module {=u8}: {=usize} bytes", address, _len);
                None
            }
            Err(_) => None,
        }
    }

    /// Check if a bus fault has been latched
    pub fn is_faulted(&self) -> bool {
        self.latch.is_latched()
    }

    /// The fault that set the latch
    pub fn fault(&self) -> Option<BusFault> {
        self.latch.fault()
    }

    /// Clear the latch so reads resume and the next fault is reported
    pub fn clear_fault(&mut self) -> Option<BusFault> {
        self.latch.clear()
    }
}
