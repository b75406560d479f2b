//! # Addressing Modes
//!
//! This module defines the 13 addressing modes supported by the 6502 processor
//! and the resolver that turns a mode into an operand.
//!
//! ## Operand Resolution
//!
//! By the time a handler runs, the program counter has already been advanced past
//! the operand bytes (see [`Cpu::step`](crate::Cpu::step)). The resolver therefore
//! reads operand bytes at `PC - size`, never at `PC + 1`.

use std::fmt;

use crate::{Cpu, MemoryBus};

/// 6502 addressing mode enumeration.
///
/// The addressing mode determines how the CPU interprets the operand bytes
/// that follow an opcode and how it calculates the effective memory address
/// for the operation.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10 (load immediate value 0x10 into accumulator)
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80 (load from address 0x0080)
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234 (jump to address 0x1234)
    Absolute,

    /// 16-bit address indexed by X register, wrapping at 0xFFFF.
    AbsoluteX,

    /// 16-bit address indexed by Y register, wrapping at 0xFFFF.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X) (add X to 0x40, read the 16-bit address stored at
    /// that zero page location, load from the result)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y (read 16-bit address from ZP 0x40, add Y, load from result)
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode.
    ///
    /// ```
    /// use emu6502::AddressingMode;
    ///
    /// assert_eq!(AddressingMode::Implicit.size(), 0);
    /// assert_eq!(AddressingMode::Relative.size(), 1);
    /// assert_eq!(AddressingMode::Indirect.size(), 2);
    /// ```
    pub const fn size(self) -> u16 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressingMode::Implicit => "implicit",
            AddressingMode::Accumulator => "accumulator",
            AddressingMode::Immediate => "immediate",
            AddressingMode::ZeroPage => "zero page",
            AddressingMode::ZeroPageX => "zero page, X",
            AddressingMode::ZeroPageY => "zero page, Y",
            AddressingMode::Relative => "relative",
            AddressingMode::Absolute => "absolute",
            AddressingMode::AbsoluteX => "absolute, X",
            AddressingMode::AbsoluteY => "absolute, Y",
            AddressingMode::Indirect => "indirect",
            AddressingMode::IndirectX => "indirect, X",
            AddressingMode::IndirectY => "indirect, Y",
        };
        f.write_str(name)
    }
}

/// A resolved operand.
///
/// `value` is only meaningful when the resolver was asked to read it, or when
/// `accumulator` is set (the value is then a copy of A and `address` is 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Operand {
    pub(crate) value: u8,
    pub(crate) address: u16,
    /// True when the operand is the accumulator rather than a bus location.
    pub(crate) accumulator: bool,
}

impl<M: MemoryBus + ?Sized> Cpu<M> {
    /// Resolves the operand of the instruction that was just fetched.
    ///
    /// When `read` is false no bus read is issued for the value itself, so stores
    /// and jumps never trigger read side effects on memory-mapped devices.
    pub(crate) fn resolve(&self, mode: AddressingMode, read: bool) -> Operand {
        let operand = self.pc.wrapping_sub(mode.size());

        let address = match mode {
            AddressingMode::Implicit => return Operand::default(),
            AddressingMode::Accumulator => {
                return Operand {
                    value: self.registers.a,
                    address: 0,
                    accumulator: true,
                }
            }
            AddressingMode::Immediate | AddressingMode::Relative => operand,
            AddressingMode::ZeroPage => u16::from(self.memory.read(operand)),
            AddressingMode::ZeroPageX => {
                u16::from(self.memory.read(operand).wrapping_add(self.registers.x))
            }
            AddressingMode::ZeroPageY => {
                u16::from(self.memory.read(operand).wrapping_add(self.registers.y))
            }
            AddressingMode::Absolute => self.read_u16(operand),
            AddressingMode::AbsoluteX => self
                .read_u16(operand)
                .wrapping_add(u16::from(self.registers.x)),
            AddressingMode::AbsoluteY => self
                .read_u16(operand)
                .wrapping_add(u16::from(self.registers.y)),
            AddressingMode::Indirect => {
                // NMOS quirk: the pointer's high byte never carries into the next page
                let pointer = self.read_u16(operand);
                let low = self.memory.read(pointer);
                let high = self
                    .memory
                    .read((pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF));
                u16::from_le_bytes([low, high])
            }
            AddressingMode::IndirectX => {
                let pointer = self.memory.read(operand).wrapping_add(self.registers.x);
                self.read_zero_page_u16(pointer)
            }
            AddressingMode::IndirectY => {
                let pointer = self.memory.read(operand);
                self.read_zero_page_u16(pointer)
                    .wrapping_add(u16::from(self.registers.y))
            }
        };

        let value = if read { self.memory.read(address) } else { 0 };

        Operand {
            value,
            address,
            accumulator: false,
        }
    }

    /// Reads a little-endian pointer from zero page, wrapping at 0x00FF.
    fn read_zero_page_u16(&self, pointer: u8) -> u16 {
        let low = self.memory.read(u16::from(pointer));
        let high = self.memory.read(u16::from(pointer.wrapping_add(1)));
        u16::from_le_bytes([low, high])
    }
}
