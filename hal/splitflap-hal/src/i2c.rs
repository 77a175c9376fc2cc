//! I2C bus abstractions
//!
//! Provides the transaction-level bus used by split-flap modules. Every
//! module on the bus is a 16-bit I/O expander addressed by a 7-bit
//! address, written and read two bytes at a time.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};

/// Completion status of a failed bus transaction
///
/// Each variant carries a stable numeric code so diagnostics stay
/// comparable across bus implementations. A successful transaction
/// (code 0) is represented by `Ok(())`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BusStatus {
    /// Data too long to fit in the transmit buffer
    DataTooLong = 1,
    /// NACK received while transmitting the address
    AddressNack = 2,
    /// NACK received while transmitting data
    DataNack = 3,
    /// Any other bus error
    Other = 4,
    /// Transaction timed out
    Timeout = 5,
}

impl BusStatus {
    /// Get the numeric status code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Create a status from its numeric code
    ///
    /// Returns `None` for 0 (success) and unknown codes.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(BusStatus::DataTooLong),
            2 => Some(BusStatus::AddressNack),
            3 => Some(BusStatus::DataNack),
            4 => Some(BusStatus::Other),
            5 => Some(BusStatus::Timeout),
            _ => None,
        }
    }
}

impl From<ErrorKind> for BusStatus {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => BusStatus::AddressNack,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => BusStatus::DataNack,
            _ => BusStatus::Other,
        }
    }
}

/// I2C bus master
///
/// Provides the two primitives a split-flap module needs: an addressed
/// write that reports its completion status, and an addressed read that
/// reports how many bytes actually arrived.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error: Into<BusStatus>;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write, sent as a single transaction
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Request data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    ///
    /// # Returns
    /// The number of bytes received, which may be fewer than `buf.len()`.
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Adapter exposing any `embedded-hal` I2C master as an [`I2cBus`]
///
/// `embedded-hal` reads either fill the whole buffer or fail, so a
/// successful read always reports `buf.len()` bytes.
#[derive(Debug)]
pub struct EmbeddedHalBus<I> {
    i2c: I,
}

impl<I: I2c> EmbeddedHalBus<I> {
    /// Wrap an `embedded-hal` I2C master
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Release the wrapped I2C master
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> I2cBus for EmbeddedHalBus<I> {
    type Error = BusStatus;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusStatus> {
        self.i2c
            .write(address, data)
            .map_err(|e| BusStatus::from(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<usize, BusStatus> {
        self.i2c
            .read(address, buf)
            .map(|()| buf.len())
            .map_err(|e| BusStatus::from(e.kind()))
    }
}
