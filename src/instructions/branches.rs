//! # Branch Instructions
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! taken from the operand byte already skipped by the PC advance. The offset is
//! applied to the address of the next instruction. Branches cost their base
//! cycles whether or not they are taken.

use crate::{AddressingMode, Cpu, MemoryBus};

/// Moves the program counter by the relative operand when `condition` holds.
fn branch_if(cpu: &mut Cpu<dyn MemoryBus>, condition: bool) {
    if !condition {
        return;
    }

    let offset = cpu.resolve(AddressingMode::Relative, true).value;
    // Values >= 0x80 are negative: -(256 - value)
    cpu.pc = cpu.pc.wrapping_add_signed(i16::from(offset as i8));
}

/// BCC: Branch if Carry Clear.
pub(crate) fn bcc(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    let taken = !cpu.flags.carry;
    branch_if(cpu, taken);
}

/// BCS: Branch if Carry Set.
pub(crate) fn bcs(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    let taken = cpu.flags.carry;
    branch_if(cpu, taken);
}

/// BEQ: Branch if Equal (Z set).
pub(crate) fn beq(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    let taken = cpu.flags.zero;
    branch_if(cpu, taken);
}

/// BNE: Branch if Not Equal (Z clear).
pub(crate) fn bne(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    let taken = !cpu.flags.zero;
    branch_if(cpu, taken);
}

/// BMI: Branch if Minus (N set).
pub(crate) fn bmi(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    let taken = cpu.flags.negative;
    branch_if(cpu, taken);
}

/// BPL: Branch if Positive (N clear).
pub(crate) fn bpl(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    let taken = !cpu.flags.negative;
    branch_if(cpu, taken);
}

/// BVC: Branch if Overflow Clear.
pub(crate) fn bvc(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    let taken = !cpu.flags.overflow;
    branch_if(cpu, taken);
}

/// BVS: Branch if Overflow Set.
pub(crate) fn bvs(cpu: &mut Cpu<dyn MemoryBus>, _mode: AddressingMode) {
    let taken = cpu.flags.overflow;
    branch_if(cpu, taken);
}
