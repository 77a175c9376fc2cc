//! Bus and delay doubles for driver tests

use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use splitflap_hal::{BusStatus, I2cBus};

/// Records every transaction and answers reads from `input`
#[derive(Debug)]
pub struct MockBus {
    /// Every write as (address, bytes)
    pub writes: Vec<(u8, Vec<u8>)>,
    /// Number of read requests issued
    pub reads: usize,
    /// Input word returned by reads (little-endian on the wire)
    pub input: u16,
    /// Bytes delivered per read request
    pub read_len: usize,
    /// Status returned by writes, once `fail_from` writes have succeeded
    pub write_error: Option<BusStatus>,
    /// Number of writes that succeed before `write_error` applies
    pub fail_from: usize,
    /// Reads after which `input` switches to `input_after`
    pub switch_after_reads: Option<usize>,
    /// Input word once `switch_after_reads` is reached
    pub input_after: u16,
}

impl MockBus {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            reads: 0,
            input: 0xFFFF,
            read_len: 2,
            write_error: None,
            fail_from: 0,
            switch_after_reads: None,
            input_after: 0xFFFF,
        }
    }

    /// Words written, decoded from their two bytes
    pub fn words(&self) -> Vec<u16> {
        self.writes
            .iter()
            .map(|(_, bytes)| u16::from_le_bytes([bytes[0], bytes[1]]))
            .collect()
    }
}

impl I2cBus for MockBus {
    type Error = BusStatus;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusStatus> {
        self.writes.push((address, data.to_vec()));
        match self.write_error {
            Some(status) if self.writes.len() > self.fail_from => Err(status),
            _ => Ok(()),
        }
    }

    fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<usize, BusStatus> {
        self.reads += 1;
        let input = match self.switch_after_reads {
            Some(n) if self.reads > n => self.input_after,
            _ => self.input,
        };
        let bytes = input.to_le_bytes();
        let len = self.read_len.min(buf.len()).min(bytes.len());
        buf[..len].copy_from_slice(&bytes[..len]);
        Ok(len)
    }
}

/// Accumulates requested delay time
#[derive(Debug, Default)]
pub struct MockDelay {
    pub total_ns: u64,
    pub calls: usize,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
        self.calls += 1;
    }
}
