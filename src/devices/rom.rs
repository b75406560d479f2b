//! ROM device implementation.
//!
//! Provides read-only memory storage mapped at a fixed base address.

use std::ops::RangeInclusive;

use super::{device_range, BusError, Memory};

/// Read-only memory device.
///
/// `Rom` stores immutable data that can be read but not written.
/// Writes are silently ignored (no-op), matching typical ROM hardware behavior.
///
/// # Examples
///
/// ```rust
/// use emu6502::{Memory, Rom};
///
/// let mut rom = Rom::new(0xC000, vec![0xEA, 0xEA, 0xEA]).unwrap();
///
/// // Reads work
/// assert_eq!(rom.read(0xC000), 0xEA);
///
/// // Writes are ignored
/// rom.write(0xC000, 0xFF);
/// assert_eq!(rom.read(0xC000), 0xEA);
/// ```
pub struct Rom {
    base: u16,
    data: Vec<u8>,
}

impl Rom {
    /// Create a ROM holding `data` starting at `base`.
    ///
    /// # Errors
    ///
    /// [`BusError::InvalidRange`] if `data` is empty or runs past 0xFFFF.
    pub fn new(base: u16, data: Vec<u8>) -> Result<Self, BusError> {
        device_range(base, data.len())?;
        Ok(Self { base, data })
    }

    /// Create a ROM whose last byte sits at 0xFFFF, so the image supplies the
    /// interrupt and reset vectors.
    ///
    /// ```rust
    /// use emu6502::{Memory, Rom};
    ///
    /// let rom = Rom::at_top(vec![0; 0x4000]).unwrap();
    /// assert_eq!(rom.range(), 0xC000..=0xFFFF);
    /// ```
    pub fn at_top(data: Vec<u8>) -> Result<Self, BusError> {
        if data.is_empty() || data.len() > 0x1_0000 {
            return Err(BusError::InvalidRange {
                base: 0,
                size: data.len(),
            });
        }
        let base = (0x1_0000 - data.len()) as u16;
        Self::new(base, data)
    }

    /// ROM contents.
    pub fn image(&self) -> &[u8] {
        &self.data
    }
}

impl Memory for Rom {
    fn range(&self) -> RangeInclusive<u16> {
        self.base..=self.base + (self.data.len() - 1) as u16
    }

    fn read(&self, addr: u16) -> u8 {
        let offset = usize::from(addr.wrapping_sub(self.base));
        assert!(
            offset < self.data.len(),
            "address 0x{:04X} outside ROM at 0x{:04X}",
            addr,
            self.base
        );
        self.data[offset]
    }

    fn write(&mut self, _addr: u16, _value: u8) {
        // Writes to ROM are silently ignored (no-op)
    }
}
