//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! Arithmetic, logical and compare operations. Decimal mode is not emulated:
//! ADC and SBC always perform binary arithmetic regardless of the D flag.

use crate::{AddressingMode, Cpu, MemoryBus};

/// ADC: Add with Carry.
///
/// `A = A + M + C`. Carry is the unsigned carry out of bit 7; Overflow is set
/// when both operands share a sign that the result does not.
pub(crate) fn adc(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let value = cpu.resolve(mode, true).value;
    add_with_carry(cpu, value);
}

/// SBC: Subtract with Carry.
///
/// `A = A - M - (1 - C)`, computed as `A + !M + C` so that Carry means "no borrow".
pub(crate) fn sbc(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let value = cpu.resolve(mode, true).value;
    add_with_carry(cpu, !value);
}

fn add_with_carry(cpu: &mut Cpu<dyn MemoryBus>, value: u8) {
    let a = cpu.registers.a;
    let sum = u16::from(a) + u16::from(value) + u16::from(cpu.flags.carry);
    let result = sum as u8;

    cpu.flags.carry = sum > 0xFF;
    // Formula: V = (A^result) & (M^result) & 0x80
    cpu.flags.overflow = (a ^ result) & (value ^ result) & 0x80 != 0;
    cpu.flags.set_zn(result);
    cpu.registers.a = result;
}

/// AND: Logical AND into the accumulator.
pub(crate) fn and(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let value = cpu.resolve(mode, true).value;
    cpu.registers.a &= value;
    cpu.flags.set_zn(cpu.registers.a);
}

/// ORA: Logical inclusive OR into the accumulator.
pub(crate) fn ora(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let value = cpu.resolve(mode, true).value;
    cpu.registers.a |= value;
    cpu.flags.set_zn(cpu.registers.a);
}

/// EOR: Exclusive OR into the accumulator.
pub(crate) fn eor(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let value = cpu.resolve(mode, true).value;
    cpu.registers.a ^= value;
    cpu.flags.set_zn(cpu.registers.a);
}

/// BIT: Bit Test.
///
/// Z from `A & M`, N from bit 7 of M, V from bit 6 of M. A is unchanged.
pub(crate) fn bit(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let value = cpu.resolve(mode, true).value;
    cpu.flags.zero = value & cpu.registers.a == 0;
    cpu.flags.negative = value & 0x80 != 0;
    cpu.flags.overflow = value & 0x40 != 0;
}

pub(crate) fn cmp(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let register = cpu.registers.a;
    compare(cpu, mode, register);
}

pub(crate) fn cpx(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let register = cpu.registers.x;
    compare(cpu, mode, register);
}

pub(crate) fn cpy(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode) {
    let register = cpu.registers.y;
    compare(cpu, mode, register);
}

/// Shared compare: C if register >= M, Z if equal, N from bit 7 of the difference.
fn compare(cpu: &mut Cpu<dyn MemoryBus>, mode: AddressingMode, register: u8) {
    let value = cpu.resolve(mode, true).value;
    let result = register.wrapping_sub(value);

    cpu.flags.carry = register >= value;
    cpu.flags.set_zn(result);
}
