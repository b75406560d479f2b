//! # Opcode Dispatch Table
//!
//! This module contains the 256-slot opcode table that serves as the single source
//! of truth for decoding: each legal opcode byte maps to its instruction, addressing
//! mode, base cycle cost and handler. The table covers the 151 documented NMOS 6502
//! opcodes. Undocumented opcode bytes have no entry (`None`) and are rejected by the
//! CPU with [`ExecutionError::UndefinedOpcode`](crate::ExecutionError).

use std::fmt;

use crate::addressing::AddressingMode;
use crate::instructions::{
    alu, branches, control, flags, inc_dec, load_store, shifts, stack, transfer,
};
use crate::{Cpu, MemoryBus};

/// Instruction handler. Runs after the program counter has been advanced past the
/// operand bytes.
pub(crate) type Handler = fn(&mut Cpu<dyn MemoryBus>, AddressingMode);

/// The 56 documented 6502 instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Instruction {
    /// Three-letter assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        use Instruction::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Metadata and handler for a single legal opcode.
///
/// # Examples
///
/// ```
/// use emu6502::{AddressingMode, Instruction, OPCODE_TABLE};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = OPCODE_TABLE[0xA9].unwrap();
/// assert_eq!(lda_imm.instruction, Instruction::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.cycles, 2);
/// assert_eq!(lda_imm.size_bytes(), 2);
///
/// // 0x02 is not a documented opcode
/// assert!(OPCODE_TABLE[0x02].is_none());
/// ```
#[derive(Clone, Copy)]
pub struct OpcodeMetadata {
    /// The instruction this opcode encodes.
    pub instruction: Instruction,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Fixed cycle cost. Page-crossing and branch-taken penalties are not modeled.
    pub cycles: u8,

    pub(crate) handler: Handler,
}

impl OpcodeMetadata {
    /// Instruction mnemonic (e.g. "LDA").
    pub fn mnemonic(&self) -> &'static str {
        self.instruction.mnemonic()
    }

    /// Total instruction size in bytes, opcode included (1-3).
    pub fn size_bytes(&self) -> u16 {
        1 + self.addressing_mode.size()
    }
}

impl fmt::Debug for OpcodeMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpcodeMetadata")
            .field("instruction", &self.instruction)
            .field("addressing_mode", &self.addressing_mode)
            .field("cycles", &self.cycles)
            .finish()
    }
}

impl fmt::Display for OpcodeMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.instruction, self.addressing_mode)
    }
}

/// Looks up an opcode byte.
pub fn lookup(opcode: u8) -> Option<&'static OpcodeMetadata> {
    OPCODE_TABLE[opcode as usize].as_ref()
}

/// Complete 256-slot opcode table indexed by opcode byte value.
pub static OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_table();

const fn op(
    instruction: Instruction,
    handler: Handler,
    addressing_mode: AddressingMode,
    cycles: u8,
) -> Option<OpcodeMetadata> {
    Some(OpcodeMetadata {
        instruction,
        addressing_mode,
        cycles,
        handler,
    })
}

const fn build_table() -> [Option<OpcodeMetadata>; 256] {
    use AddressingMode::*;
    use Instruction::*;

    let mut t: [Option<OpcodeMetadata>; 256] = [None; 256];

    t[0x69] = op(Adc, alu::adc, Immediate, 2);
    t[0x65] = op(Adc, alu::adc, ZeroPage, 3);
    t[0x75] = op(Adc, alu::adc, ZeroPageX, 4);
    t[0x6D] = op(Adc, alu::adc, Absolute, 4);
    t[0x7D] = op(Adc, alu::adc, AbsoluteX, 4);
    t[0x79] = op(Adc, alu::adc, AbsoluteY, 4);
    t[0x61] = op(Adc, alu::adc, IndirectX, 6);
    t[0x71] = op(Adc, alu::adc, IndirectY, 5);

    t[0x29] = op(And, alu::and, Immediate, 2);
    t[0x25] = op(And, alu::and, ZeroPage, 3);
    t[0x35] = op(And, alu::and, ZeroPageX, 4);
    t[0x2D] = op(And, alu::and, Absolute, 4);
    t[0x3D] = op(And, alu::and, AbsoluteX, 4);
    t[0x39] = op(And, alu::and, AbsoluteY, 4);
    t[0x21] = op(And, alu::and, IndirectX, 6);
    t[0x31] = op(And, alu::and, IndirectY, 5);

    t[0x0A] = op(Asl, shifts::asl, Accumulator, 2);
    t[0x06] = op(Asl, shifts::asl, ZeroPage, 5);
    t[0x16] = op(Asl, shifts::asl, ZeroPageX, 6);
    t[0x0E] = op(Asl, shifts::asl, Absolute, 6);
    t[0x1E] = op(Asl, shifts::asl, AbsoluteX, 7);

    t[0x90] = op(Bcc, branches::bcc, Relative, 2);
    t[0xB0] = op(Bcs, branches::bcs, Relative, 2);
    t[0xF0] = op(Beq, branches::beq, Relative, 2);
    t[0x30] = op(Bmi, branches::bmi, Relative, 2);
    t[0xD0] = op(Bne, branches::bne, Relative, 2);
    t[0x10] = op(Bpl, branches::bpl, Relative, 2);
    t[0x50] = op(Bvc, branches::bvc, Relative, 2);
    t[0x70] = op(Bvs, branches::bvs, Relative, 2);

    t[0x24] = op(Bit, alu::bit, ZeroPage, 3);
    t[0x2C] = op(Bit, alu::bit, Absolute, 4);

    t[0x00] = op(Brk, control::brk, Implicit, 7);

    t[0x18] = op(Clc, flags::clc, Implicit, 2);
    t[0xD8] = op(Cld, flags::cld, Implicit, 2);
    t[0x58] = op(Cli, flags::cli, Implicit, 2);
    t[0xB8] = op(Clv, flags::clv, Implicit, 2);

    t[0xC9] = op(Cmp, alu::cmp, Immediate, 2);
    t[0xC5] = op(Cmp, alu::cmp, ZeroPage, 3);
    t[0xD5] = op(Cmp, alu::cmp, ZeroPageX, 4);
    t[0xCD] = op(Cmp, alu::cmp, Absolute, 4);
    t[0xDD] = op(Cmp, alu::cmp, AbsoluteX, 4);
    t[0xD9] = op(Cmp, alu::cmp, AbsoluteY, 4);
    t[0xC1] = op(Cmp, alu::cmp, IndirectX, 6);
    t[0xD1] = op(Cmp, alu::cmp, IndirectY, 5);

    t[0xE0] = op(Cpx, alu::cpx, Immediate, 2);
    t[0xE4] = op(Cpx, alu::cpx, ZeroPage, 3);
    t[0xEC] = op(Cpx, alu::cpx, Absolute, 4);

    t[0xC0] = op(Cpy, alu::cpy, Immediate, 2);
    t[0xC4] = op(Cpy, alu::cpy, ZeroPage, 3);
    t[0xCC] = op(Cpy, alu::cpy, Absolute, 4);

    t[0xC6] = op(Dec, inc_dec::dec, ZeroPage, 5);
    t[0xD6] = op(Dec, inc_dec::dec, ZeroPageX, 6);
    t[0xCE] = op(Dec, inc_dec::dec, Absolute, 6);
    t[0xDE] = op(Dec, inc_dec::dec, AbsoluteX, 7);

    t[0xCA] = op(Dex, inc_dec::dex, Implicit, 2);
    t[0x88] = op(Dey, inc_dec::dey, Implicit, 2);

    t[0x49] = op(Eor, alu::eor, Immediate, 2);
    t[0x45] = op(Eor, alu::eor, ZeroPage, 3);
    t[0x55] = op(Eor, alu::eor, ZeroPageX, 4);
    t[0x4D] = op(Eor, alu::eor, Absolute, 4);
    t[0x5D] = op(Eor, alu::eor, AbsoluteX, 4);
    t[0x59] = op(Eor, alu::eor, AbsoluteY, 4);
    t[0x41] = op(Eor, alu::eor, IndirectX, 6);
    t[0x51] = op(Eor, alu::eor, IndirectY, 5);

    t[0xE6] = op(Inc, inc_dec::inc, ZeroPage, 5);
    t[0xF6] = op(Inc, inc_dec::inc, ZeroPageX, 6);
    t[0xEE] = op(Inc, inc_dec::inc, Absolute, 6);
    t[0xFE] = op(Inc, inc_dec::inc, AbsoluteX, 7);

    t[0xE8] = op(Inx, inc_dec::inx, Implicit, 2);
    t[0xC8] = op(Iny, inc_dec::iny, Implicit, 2);

    t[0x4C] = op(Jmp, control::jmp, Absolute, 3);
    t[0x6C] = op(Jmp, control::jmp, Indirect, 5);

    t[0x20] = op(Jsr, control::jsr, Absolute, 6);

    t[0xA9] = op(Lda, load_store::lda, Immediate, 2);
    t[0xA5] = op(Lda, load_store::lda, ZeroPage, 3);
    t[0xB5] = op(Lda, load_store::lda, ZeroPageX, 4);
    t[0xAD] = op(Lda, load_store::lda, Absolute, 4);
    t[0xBD] = op(Lda, load_store::lda, AbsoluteX, 4);
    t[0xB9] = op(Lda, load_store::lda, AbsoluteY, 4);
    t[0xA1] = op(Lda, load_store::lda, IndirectX, 6);
    t[0xB1] = op(Lda, load_store::lda, IndirectY, 5);

    t[0xA2] = op(Ldx, load_store::ldx, Immediate, 2);
    t[0xA6] = op(Ldx, load_store::ldx, ZeroPage, 3);
    t[0xB6] = op(Ldx, load_store::ldx, ZeroPageY, 4);
    t[0xAE] = op(Ldx, load_store::ldx, Absolute, 4);
    t[0xBE] = op(Ldx, load_store::ldx, AbsoluteY, 4);

    t[0xA0] = op(Ldy, load_store::ldy, Immediate, 2);
    t[0xA4] = op(Ldy, load_store::ldy, ZeroPage, 3);
    t[0xB4] = op(Ldy, load_store::ldy, ZeroPageX, 4);
    t[0xAC] = op(Ldy, load_store::ldy, Absolute, 4);
    t[0xBC] = op(Ldy, load_store::ldy, AbsoluteX, 4);

    t[0x4A] = op(Lsr, shifts::lsr, Accumulator, 2);
    t[0x46] = op(Lsr, shifts::lsr, ZeroPage, 5);
    t[0x56] = op(Lsr, shifts::lsr, ZeroPageX, 6);
    t[0x4E] = op(Lsr, shifts::lsr, Absolute, 6);
    t[0x5E] = op(Lsr, shifts::lsr, AbsoluteX, 7);

    t[0xEA] = op(Nop, control::nop, Implicit, 2);

    t[0x09] = op(Ora, alu::ora, Immediate, 2);
    t[0x05] = op(Ora, alu::ora, ZeroPage, 3);
    t[0x15] = op(Ora, alu::ora, ZeroPageX, 4);
    t[0x0D] = op(Ora, alu::ora, Absolute, 4);
    t[0x1D] = op(Ora, alu::ora, AbsoluteX, 4);
    t[0x19] = op(Ora, alu::ora, AbsoluteY, 4);
    t[0x01] = op(Ora, alu::ora, IndirectX, 6);
    t[0x11] = op(Ora, alu::ora, IndirectY, 5);

    t[0x48] = op(Pha, stack::pha, Implicit, 3);
    t[0x08] = op(Php, stack::php, Implicit, 3);
    t[0x68] = op(Pla, stack::pla, Implicit, 4);
    t[0x28] = op(Plp, stack::plp, Implicit, 4);

    t[0x2A] = op(Rol, shifts::rol, Accumulator, 2);
    t[0x26] = op(Rol, shifts::rol, ZeroPage, 5);
    t[0x36] = op(Rol, shifts::rol, ZeroPageX, 6);
    t[0x2E] = op(Rol, shifts::rol, Absolute, 6);
    t[0x3E] = op(Rol, shifts::rol, AbsoluteX, 7);

    t[0x6A] = op(Ror, shifts::ror, Accumulator, 2);
    t[0x66] = op(Ror, shifts::ror, ZeroPage, 5);
    t[0x76] = op(Ror, shifts::ror, ZeroPageX, 6);
    t[0x6E] = op(Ror, shifts::ror, Absolute, 6);
    t[0x7E] = op(Ror, shifts::ror, AbsoluteX, 7);

    t[0x40] = op(Rti, control::rti, Implicit, 6);
    t[0x60] = op(Rts, control::rts, Implicit, 6);

    t[0xE9] = op(Sbc, alu::sbc, Immediate, 2);
    t[0xE5] = op(Sbc, alu::sbc, ZeroPage, 3);
    t[0xF5] = op(Sbc, alu::sbc, ZeroPageX, 4);
    t[0xED] = op(Sbc, alu::sbc, Absolute, 4);
    t[0xFD] = op(Sbc, alu::sbc, AbsoluteX, 4);
    t[0xF9] = op(Sbc, alu::sbc, AbsoluteY, 4);
    t[0xE1] = op(Sbc, alu::sbc, IndirectX, 6);
    t[0xF1] = op(Sbc, alu::sbc, IndirectY, 5);

    t[0x38] = op(Sec, flags::sec, Implicit, 2);
    t[0xF8] = op(Sed, flags::sed, Implicit, 2);
    t[0x78] = op(Sei, flags::sei, Implicit, 2);

    t[0x85] = op(Sta, load_store::sta, ZeroPage, 3);
    t[0x95] = op(Sta, load_store::sta, ZeroPageX, 4);
    t[0x8D] = op(Sta, load_store::sta, Absolute, 4);
    t[0x9D] = op(Sta, load_store::sta, AbsoluteX, 5);
    t[0x99] = op(Sta, load_store::sta, AbsoluteY, 5);
    t[0x81] = op(Sta, load_store::sta, IndirectX, 6);
    t[0x91] = op(Sta, load_store::sta, IndirectY, 6);

    t[0x86] = op(Stx, load_store::stx, ZeroPage, 3);
    t[0x96] = op(Stx, load_store::stx, ZeroPageY, 4);
    t[0x8E] = op(Stx, load_store::stx, Absolute, 4);

    t[0x84] = op(Sty, load_store::sty, ZeroPage, 3);
    t[0x94] = op(Sty, load_store::sty, ZeroPageX, 4);
    t[0x8C] = op(Sty, load_store::sty, Absolute, 4);

    t[0xAA] = op(Tax, transfer::tax, Implicit, 2);
    t[0xA8] = op(Tay, transfer::tay, Implicit, 2);
    t[0xBA] = op(Tsx, transfer::tsx, Implicit, 2);
    t[0x8A] = op(Txa, transfer::txa, Implicit, 2);
    t[0x9A] = op(Txs, transfer::txs, Implicit, 2);
    t[0x98] = op(Tya, transfer::tya, Implicit, 2);

    t
}
