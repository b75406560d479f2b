//! Memory-mapped device support for the 6502 emulator.
//!
//! This module provides the memory mapping architecture that lets several
//! memory-like devices (RAM, ROM, I/O ports) share the 16-bit address space.
//!
//! # Architecture
//!
//! - **Memory trait**: a device claims an address range and serves reads/writes
//!   with absolute addresses
//! - **Bus**: routes each CPU access to the devices that claim the address
//! - **Device implementations**: [`Ram`], [`Rom`], [`IoPort`]
//!
//! # Overlap Policy
//!
//! [`Bus::add_memory`] only accepts devices whose range is disjoint from every
//! mapped device. Overlap must be asked for explicitly with [`Bus::add_overlay`]:
//! the overlay wins reads over every device registered before it, while writes
//! still reach every claiming device (useful for shadow/diagnostic devices).
//!
//! # Example
//!
//! ```rust
//! use emu6502::{Bus, Cpu, MemoryBus, Ram, Rom};
//!
//! let mut bus = Bus::new();
//!
//! // 32KB RAM at 0x0000-0x7FFF
//! bus.add_memory(Ram::new(0x0000, 0x8000).unwrap()).unwrap();
//!
//! // 256-byte ROM at the top of the address space, reset vector -> 0xFF00
//! let mut image = vec![0xEA; 256];
//! image[0xFC] = 0x00;
//! image[0xFD] = 0xFF;
//! bus.add_memory(Rom::at_top(image).unwrap()).unwrap();
//!
//! let cpu = Cpu::new(bus);
//! assert_eq!(cpu.pc(), 0xFF00);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::ops::RangeInclusive;
use std::rc::Rc;

use crate::MemoryBus;

pub mod io_port;
pub mod ram;
pub mod rom;

pub use io_port::IoPort;
pub use ram::Ram;
pub use rom::Rom;

/// A memory-like device mapped onto the bus.
///
/// Devices receive absolute addresses. The bus only calls `read`/`write` with
/// addresses for which `contains` returns true; a device asked for anything
/// else has been wired incorrectly and may panic.
///
/// # Examples
///
/// ```rust
/// use emu6502::Memory;
/// use std::ops::RangeInclusive;
///
/// /// Always reads 0x42 at one address.
/// struct Constant(u16);
///
/// impl Memory for Constant {
///     fn range(&self) -> RangeInclusive<u16> {
///         self.0..=self.0
///     }
///
///     fn read(&self, _addr: u16) -> u8 {
///         0x42
///     }
///
///     fn write(&mut self, _addr: u16, _value: u8) {}
/// }
///
/// assert!(Constant(0x9000).contains(0x9000));
/// assert!(!Constant(0x9000).contains(0x9001));
/// ```
pub trait Memory {
    /// Inclusive address range claimed by the device.
    fn range(&self) -> RangeInclusive<u16>;

    /// True if the device claims `addr`. Must agree with [`Memory::range`].
    fn contains(&self, addr: u16) -> bool {
        self.range().contains(&addr)
    }

    fn read(&self, addr: u16) -> u8;

    fn write(&mut self, addr: u16, value: u8);
}

/// Shared device handle: setup code can keep a clone and inspect or drive the
/// device while the bus owns the other clone.
impl<T: Memory + ?Sized> Memory for Rc<RefCell<T>> {
    fn range(&self) -> RangeInclusive<u16> {
        self.borrow().range()
    }

    fn contains(&self, addr: u16) -> bool {
        self.borrow().contains(addr)
    }

    fn read(&self, addr: u16) -> u8 {
        self.borrow().read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.borrow_mut().write(addr, value);
    }
}

impl<T: Memory + ?Sized> Memory for Box<T> {
    fn range(&self) -> RangeInclusive<u16> {
        (**self).range()
    }

    fn contains(&self, addr: u16) -> bool {
        (**self).contains(addr)
    }

    fn read(&self, addr: u16) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        (**self).write(addr, value);
    }
}

/// Error returned when a device cannot be built or registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// Address range overlaps with an existing device.
    Overlap {
        /// Range of the rejected device
        new: RangeInclusive<u16>,
        /// Range of the conflicting existing device
        existing: RangeInclusive<u16>,
    },

    /// A device of `size` bytes cannot start at `base` (empty, or runs past 0xFFFF).
    InvalidRange { base: u16, size: usize },
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BusError::Overlap { new, existing } => write!(
                f,
                "Device address range overlap: new device at 0x{:04X}-0x{:04X} overlaps with existing device at 0x{:04X}-0x{:04X}",
                new.start(),
                new.end(),
                existing.start(),
                existing.end()
            ),
            BusError::InvalidRange { base, size } => write!(
                f,
                "A device of {} bytes does not fit at 0x{:04X}",
                size, base
            ),
        }
    }
}

impl std::error::Error for BusError {}

/// Computes the inclusive range of a `size`-byte device starting at `base`.
pub(crate) fn device_range(base: u16, size: usize) -> Result<RangeInclusive<u16>, BusError> {
    let end = usize::from(base) + size;
    if size == 0 || end > 0x1_0000 {
        return Err(BusError::InvalidRange { base, size });
    }
    Ok(base..=(end - 1) as u16)
}

fn overlaps(a: &RangeInclusive<u16>, b: &RangeInclusive<u16>) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

/// Routes CPU reads and writes to the devices that claim each address.
///
/// Unmapped reads return the configured unmapped value (0 by default) and
/// unmapped writes are silently ignored.
///
/// # Examples
///
/// ```rust
/// use emu6502::{Bus, MemoryBus, Ram};
///
/// let mut bus = Bus::new();
/// bus.add_memory(Ram::new(0x0000, 0x4000).unwrap()).unwrap();
///
/// bus.write(0x1234, 0x42);
/// assert_eq!(bus.read(0x1234), 0x42);
///
/// // Unmapped address
/// assert_eq!(bus.read(0x8000), 0x00);
///
/// // Overlapping registration is rejected
/// assert!(bus.add_memory(Ram::new(0x3000, 0x100).unwrap()).is_err());
/// ```
pub struct Bus {
    devices: Vec<Box<dyn Memory>>,
    unmapped_value: u8,
}

impl Bus {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            unmapped_value: 0x00,
        }
    }

    /// Sets the value returned for reads no device claims.
    pub fn with_unmapped_value(mut self, value: u8) -> Self {
        self.unmapped_value = value;
        self
    }

    /// Appends a device whose range must not intersect any mapped device.
    ///
    /// # Errors
    ///
    /// [`BusError::Overlap`] naming the first conflicting device.
    pub fn add_memory<D: Memory + 'static>(&mut self, device: D) -> Result<(), BusError> {
        let new = device.range();
        if let Some(existing) = self
            .devices
            .iter()
            .map(|mapped| mapped.range())
            .find(|existing| overlaps(&new, existing))
        {
            return Err(BusError::Overlap { new, existing });
        }

        log::debug!(
            "mapped device at 0x{:04X}-0x{:04X}",
            new.start(),
            new.end()
        );
        self.devices.push(Box::new(device));
        Ok(())
    }

    /// Appends a device that may overlap existing ones. It takes read priority
    /// over every device registered before it.
    pub fn add_overlay<D: Memory + 'static>(&mut self, device: D) {
        let range = device.range();
        log::debug!(
            "mapped overlay at 0x{:04X}-0x{:04X}",
            range.start(),
            range.end()
        );
        self.devices.push(Box::new(device));
    }

    /// Number of mapped devices.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for Bus {
    fn read(&self, addr: u16) -> u8 {
        self.devices
            .iter()
            .rev()
            .find(|device| device.contains(addr))
            .map_or(self.unmapped_value, |device| device.read(addr))
    }

    fn write(&mut self, addr: u16, value: u8) {
        for device in self.devices.iter_mut().filter(|device| device.contains(addr)) {
            device.write(addr, value);
        }
    }
}
