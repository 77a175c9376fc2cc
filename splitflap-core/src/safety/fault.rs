//! Bus fault latch
//!
//! Records the first failed transaction on a bus. Once latched, further
//! failures are not recorded again and sensor reads stay inert until the
//! owning control loop clears the latch.

use splitflap_hal::BusStatus;

/// First bus fault seen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusFault {
    /// Address of the module whose transaction failed
    pub address: u8,
    /// Completion status reported by the bus
    pub status: BusStatus,
}

/// Sticky fault flag shared by every module on one bus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultLatch {
    fault: Option<BusFault>,
}

impl FaultLatch {
    /// Create a clear latch
    pub const fn new() -> Self {
        Self { fault: None }
    }

    /// Record a failed transaction
    ///
    /// Returns true only for the fault that set the latch; the caller
    /// reports that one and stays quiet for the rest.
    pub fn record(&mut self, address: u8, status: BusStatus) -> bool {
        if self.fault.is_some() {
            return false;
        }
        self.fault = Some(BusFault { address, status });
        true
    }

    /// Check if a fault has been latched
    pub fn is_latched(&self) -> bool {
        self.fault.is_some()
    }

    /// The fault that set the latch
    pub fn fault(&self) -> Option<BusFault> {
        self.fault
    }

    /// Clear the latch, returning the fault it held
    pub fn clear(&mut self) -> Option<BusFault> {
        self.fault.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_latch_is_clear() {
        let latch = FaultLatch::new();
        assert!(!latch.is_latched());
        assert_eq!(latch.fault(), None);
    }

    #[test]
    fn test_first_fault_wins() {
        let mut latch = FaultLatch::new();

        assert!(latch.record(0x20, BusStatus::AddressNack));
        assert!(latch.is_latched());

        // Later faults are swallowed
        assert!(!latch.record(0x21, BusStatus::Other));
        assert_eq!(
            latch.fault(),
            Some(BusFault {
                address: 0x20,
                status: BusStatus::AddressNack,
            })
        );
    }

    #[test]
    fn test_clear_rearms() {
        let mut latch = FaultLatch::new();
        latch.record(0x20, BusStatus::DataNack);

        let cleared = latch.clear();
        assert_eq!(cleared.map(|f| f.status), Some(BusStatus::DataNack));
        assert!(!latch.is_latched());

        assert!(latch.record(0x22, BusStatus::Timeout));
        assert_eq!(latch.fault().map(|f| f.address), Some(0x22));
    }
}
