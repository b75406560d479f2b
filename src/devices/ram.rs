//! RAM device implementation.
//!
//! Provides read/write memory storage mapped at a fixed base address.

use std::ops::RangeInclusive;

use super::{device_range, BusError, Memory};

/// Read/write memory device.
///
/// `Ram` stores mutable data initialized to zero.
///
/// # Examples
///
/// ```rust
/// use emu6502::{Memory, Ram};
///
/// let mut ram = Ram::new(0x2000, 1024).unwrap();
/// assert_eq!(ram.range(), 0x2000..=0x23FF);
///
/// ram.write(0x2010, 0x42);
/// assert_eq!(ram.read(0x2010), 0x42);
/// ```
pub struct Ram {
    base: u16,
    data: Vec<u8>,
}

impl Ram {
    /// Create `size` bytes of zeroed RAM starting at `base`.
    ///
    /// # Errors
    ///
    /// [`BusError::InvalidRange`] if `size` is zero or the RAM would run past 0xFFFF.
    pub fn new(base: u16, size: usize) -> Result<Self, BusError> {
        device_range(base, size)?;
        Ok(Self {
            base,
            data: vec![0x00; size],
        })
    }

    /// Copies `bytes` into the RAM starting at absolute address `addr`.
    ///
    /// # Panics
    ///
    /// Panics if the data does not fit inside the device.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let start = self.offset(addr);
        let end = start + bytes.len();
        assert!(
            end <= self.data.len(),
            "{} bytes at 0x{:04X} do not fit in RAM at 0x{:04X}",
            bytes.len(),
            addr,
            self.base
        );
        self.data[start..end].copy_from_slice(bytes);
    }

    fn offset(&self, addr: u16) -> usize {
        let offset = usize::from(addr.wrapping_sub(self.base));
        assert!(
            offset < self.data.len(),
            "address 0x{:04X} outside RAM at 0x{:04X}",
            addr,
            self.base
        );
        offset
    }
}

impl Memory for Ram {
    fn range(&self) -> RangeInclusive<u16> {
        self.base..=self.base + (self.data.len() - 1) as u16
    }

    fn read(&self, addr: u16) -> u8 {
        self.data[self.offset(addr)]
    }

    fn write(&mut self, addr: u16, value: u8) {
        let offset = self.offset(addr);
        self.data[offset] = value;
    }
}
