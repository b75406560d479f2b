//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR operate on the accumulator or on a bus location
//! depending on the addressing mode. Carry receives the bit shifted out; the
//! rotates feed the old carry into the vacated bit. Memory forms read the
//! operand before writing the result.

use crate::{AddressingMode, Cpu, MemoryBus};

/// Applies `op` to the operand and stores the result back where it came from.
///
/// `op` receives the value and the incoming carry and returns the result and the
/// outgoing carry.
fn read_modify_write(
    cpu: &mut Cpu<dyn MemoryBus>,
    mode: AddressingMode,
    op: fn(u8, bool) -> (u8, bool),
) {
    let operand = cpu.resolve(mode, true);
    let (result, carry) = op(operand.value, cpu.flags.carry);

    if operand.accumulator {
        cpu.registers.a = result;
    } else {
        cpu.memory.write(operand.address, result);
    }

    cpu.flags.carry = carry;
    cpu.flags.set_zn(result);
}

/// ASL: Arithmetic Shift Left. Bit 0 becomes 0, bit 7 goes to carry.
pub(crate) fn asl(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    read_modify_write(cpu, mode, |value, _| (value << 1, value & 0x80 != 0));
}

/// LSR: Logical Shift Right. Bit 7 becomes 0, bit 0 goes to carry.
pub(crate) fn lsr(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    read_modify_write(cpu, mode, |value, _| (value >> 1, value & 0x01 != 0));
}

/// ROL: Rotate Left through carry.
pub(crate) fn rol(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    read_modify_write(cpu, mode, |value, carry| {
        ((value << 1) | u8::from(carry), value & 0x80 != 0)
    });
}

/// ROR: Rotate Right through carry.
pub(crate) fn ror(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    read_modify_write(cpu, mode, |value, carry| {
        ((value >> 1) | (u8::from(carry) << 7), value & 0x01 != 0)
    });
}
