//! # Register File
//!
//! Value types for the programmer-visible 6502 state: the A/X/Y registers, the
//! status flags and the stack pointer. All arithmetic on them is explicit
//! modulo-256.

use std::fmt;

/// Base address of the hardware stack page (0x0100-0x01FF).
pub const STACK_PAGE: u16 = 0x0100;

/// The three general purpose 8-bit registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Registers {
    /// Accumulator
    pub a: u8,
    /// X index register
    pub x: u8,
    /// Y index register
    pub y: u8,
}

/// Processor status flags.
///
/// Stored as seven independent booleans and packed into a single byte with the
/// hardware NV-BDIZC layout:
///
/// | Bit | Flag |
/// |-----|------|
/// | 7   | Negative |
/// | 6   | Overflow |
/// | 5   | (unused, always packs clear) |
/// | 4   | BreakCommand |
/// | 3   | Decimal |
/// | 2   | InterruptDisable |
/// | 1   | Zero |
/// | 0   | Carry |
///
/// # Examples
///
/// ```
/// use emu6502::Flags;
///
/// let flags = Flags { carry: true, negative: true, ..Flags::default() };
/// assert_eq!(flags.to_byte(), 0b1000_0001);
/// assert_eq!(Flags::from_byte(0b1000_0001), flags);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    /// Set on unsigned overflow/underflow
    pub carry: bool,
    /// Set if the result is zero
    pub zero: bool,
    /// Blocks IRQ when set
    pub interrupt_disable: bool,
    /// Decimal mode (stored only, BCD arithmetic is not emulated)
    pub decimal: bool,
    /// Set when entering the interrupt handler through BRK
    pub break_command: bool,
    /// Set on signed overflow
    pub overflow: bool,
    /// Set if bit 7 of the result is 1
    pub negative: bool,
}

impl Flags {
    pub const CARRY: u8 = 0b0000_0001;
    pub const ZERO: u8 = 0b0000_0010;
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100;
    pub const DECIMAL: u8 = 0b0000_1000;
    pub const BREAK_COMMAND: u8 = 0b0001_0000;
    pub const UNUSED: u8 = 0b0010_0000;
    pub const OVERFLOW: u8 = 0b0100_0000;
    pub const NEGATIVE: u8 = 0b1000_0000;

    /// Packs the flags into a status byte. Bit 5 is always clear.
    pub fn to_byte(self) -> u8 {
        let mut status = 0;

        if self.carry {
            status |= Self::CARRY;
        }
        if self.zero {
            status |= Self::ZERO;
        }
        if self.interrupt_disable {
            status |= Self::INTERRUPT_DISABLE;
        }
        if self.decimal {
            status |= Self::DECIMAL;
        }
        if self.break_command {
            status |= Self::BREAK_COMMAND;
        }
        if self.overflow {
            status |= Self::OVERFLOW;
        }
        if self.negative {
            status |= Self::NEGATIVE;
        }

        status
    }

    /// Unpacks a status byte. Bit 5 is ignored.
    pub fn from_byte(status: u8) -> Self {
        Self {
            carry: status & Self::CARRY != 0,
            zero: status & Self::ZERO != 0,
            interrupt_disable: status & Self::INTERRUPT_DISABLE != 0,
            decimal: status & Self::DECIMAL != 0,
            break_command: status & Self::BREAK_COMMAND != 0,
            overflow: status & Self::OVERFLOW != 0,
            negative: status & Self::NEGATIVE != 0,
        }
    }

    /// Updates Zero and Negative from a result byte.
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.zero = value == 0;
        self.negative = value & 0x80 != 0;
    }
}

impl From<Flags> for u8 {
    fn from(flags: Flags) -> u8 {
        flags.to_byte()
    }
}

impl From<u8> for Flags {
    fn from(status: u8) -> Flags {
        Flags::from_byte(status)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bit = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "{}{}-{}{}{}{}{}",
            bit(self.negative, 'N'),
            bit(self.overflow, 'V'),
            bit(self.break_command, 'B'),
            bit(self.decimal, 'D'),
            bit(self.interrupt_disable, 'I'),
            bit(self.zero, 'Z'),
            bit(self.carry, 'C'),
        )
    }
}

/// 8-bit stack pointer into page one.
///
/// Push decrements and pop increments, both wrapping modulo 256, so the stack
/// never leaves 0x0100-0x01FF.
///
/// ```
/// use emu6502::StackPointer;
///
/// let mut sp = StackPointer::new(0x00);
/// assert_eq!(sp.address(), 0x0100);
/// sp.push();
/// assert_eq!(sp.address(), 0x01FF);
/// sp.pop();
/// assert_eq!(sp.value(), 0x00);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackPointer(u8);

impl StackPointer {
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Bus address the stack pointer currently designates.
    pub const fn address(self) -> u16 {
        STACK_PAGE + self.0 as u16
    }

    /// Moves the pointer after a byte has been written.
    pub fn push(&mut self) {
        self.0 = self.0.wrapping_sub(1);
    }

    /// Moves the pointer before a byte is read.
    pub fn pop(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}
