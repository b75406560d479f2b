//! # Machine Assembly
//!
//! Builds the reference machine around the CPU:
//!
//! | Region | Default range | Device |
//! |--------|---------------|--------|
//! | RAM    | 0x0000-0x7FFF | [`Ram`] |
//! | I/O    | 0x8000        | [`IoPort`] |
//! | (reserved) | 0x8001-0x80FF | unmapped |
//! | ROM    | sized to the image, ending at 0xFFFF | [`Rom`] |
//!
//! The ROM image supplies the reset and interrupt vectors, so it must reach
//! 0xFFFC-0xFFFF. Images are raw binaries without any header.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::devices::{Bus, BusError, IoPort, Ram, Rom};
use crate::scheduler::Scheduler;
use crate::{Cpu, ExecutionError};

/// Address-space layout of the machine.
///
/// ```
/// use emu6502::MachineConfig;
///
/// let config = MachineConfig::default();
/// assert_eq!(config.max_rom_size(), 32512);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// First RAM address
    pub ram_base: u16,
    /// RAM size in bytes
    pub ram_size: usize,
    /// Address of the single-byte I/O port
    pub io_address: u16,
    /// Bytes above the RAM reserved for I/O, never given to the ROM
    pub io_reserved: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            ram_base: 0x0000,
            ram_size: 0x8000,
            io_address: 0x8000,
            io_reserved: 0x100,
        }
    }
}

impl MachineConfig {
    fn rom_floor(&self) -> usize {
        usize::from(self.ram_base) + self.ram_size + self.io_reserved
    }

    /// Largest ROM image that fits above RAM and the I/O reservation.
    pub fn max_rom_size(&self) -> usize {
        0x1_0000usize.saturating_sub(self.rom_floor())
    }

    /// Checks that RAM, the I/O reservation and at least some ROM space fit in
    /// the address space and that the I/O port lies outside RAM and ROM.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ram_size == 0 {
            return Err(ConfigError::InvalidLayout("RAM size must be non-zero".into()));
        }
        if self.rom_floor() >= 0x1_0000 {
            return Err(ConfigError::InvalidLayout(format!(
                "RAM of {} bytes at 0x{:04X} plus {} reserved bytes leaves no room for ROM",
                self.ram_size, self.ram_base, self.io_reserved
            )));
        }

        let ram_end = usize::from(self.ram_base) + self.ram_size;
        let io = usize::from(self.io_address);
        if (usize::from(self.ram_base)..ram_end).contains(&io) {
            return Err(ConfigError::InvalidLayout(format!(
                "I/O port at 0x{:04X} lies inside RAM",
                self.io_address
            )));
        }
        if io >= self.rom_floor() {
            return Err(ConfigError::InvalidLayout(format!(
                "I/O port at 0x{:04X} lies inside the ROM region",
                self.io_address
            )));
        }

        Ok(())
    }
}

/// Errors raised while assembling a machine.
#[derive(Debug)]
pub enum ConfigError {
    EmptyRom,
    RomTooLarge { size: usize, max: usize },
    InvalidLayout(String),
    Bus(BusError),
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::EmptyRom => write!(f, "ROM image is empty"),
            ConfigError::RomTooLarge { size, max } => {
                write!(f, "ROM too large: {} bytes (maximum {})", size, max)
            }
            ConfigError::InvalidLayout(reason) => write!(f, "Invalid memory layout: {}", reason),
            ConfigError::Bus(err) => write!(f, "{}", err),
            ConfigError::Io { path, source } => {
                write!(f, "Cannot read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Bus(err) => Some(err),
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<BusError> for ConfigError {
    fn from(err: BusError) -> Self {
        ConfigError::Bus(err)
    }
}

/// Reads a raw ROM image from disk.
pub fn load_rom(path: impl AsRef<Path>) -> Result<Vec<u8>, ConfigError> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// A CPU wired to RAM, an I/O port and a ROM.
pub struct Machine {
    cpu: Cpu<Bus>,
    config: MachineConfig,
}

impl Machine {
    /// Maps RAM, `io_port` and `rom` (ending at 0xFFFF) onto a fresh bus and
    /// resets the CPU from the ROM's reset vector.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidLayout`] if `config` does not validate or the
    ///   port is not at `config.io_address`
    /// - [`ConfigError::EmptyRom`] / [`ConfigError::RomTooLarge`] for images
    ///   that do not fit
    ///
    /// # Examples
    ///
    /// ```
    /// use emu6502::{IoPort, Machine, MachineConfig};
    ///
    /// let mut rom = vec![0xEA; 0x100];
    /// rom[0xFC] = 0x00; // reset vector -> 0xFF00
    /// rom[0xFD] = 0xFF;
    ///
    /// let config = MachineConfig::default();
    /// let machine = Machine::build(config, rom, IoPort::new(0x8000)).unwrap();
    /// assert_eq!(machine.cpu().pc(), 0xFF00);
    /// ```
    pub fn build(
        config: MachineConfig,
        rom: Vec<u8>,
        io_port: IoPort,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        if rom.is_empty() {
            return Err(ConfigError::EmptyRom);
        }
        let max = config.max_rom_size();
        if rom.len() > max {
            return Err(ConfigError::RomTooLarge {
                size: rom.len(),
                max,
            });
        }
        if io_port.address() != config.io_address {
            return Err(ConfigError::InvalidLayout(format!(
                "I/O port at 0x{:04X}, layout expects 0x{:04X}",
                io_port.address(),
                config.io_address
            )));
        }

        let mut bus = Bus::new();
        bus.add_memory(Ram::new(config.ram_base, config.ram_size)?)?;
        bus.add_memory(io_port)?;
        let rom_size = rom.len();
        bus.add_memory(Rom::at_top(rom)?)?;
        debug!("ROM of {} bytes mapped at 0x{:04X}", rom_size, 0x1_0000 - rom_size);

        Ok(Self {
            cpu: Cpu::new(bus),
            config,
        })
    }

    /// Runs the CPU until the scheduler's clock closes.
    pub fn run<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> Result<(), ExecutionError> {
        self.cpu.run(scheduler)
    }

    pub fn cpu(&self) -> &Cpu<Bus> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu<Bus> {
        &mut self.cpu
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn into_cpu(self) -> Cpu<Bus> {
        self.cpu
    }
}
