//! Tests for ASL, LSR, ROL and ROR in accumulator and memory forms.

use emu6502::{Cpu, FlatMemory, MemoryBus};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    Cpu::new(memory)
}

#[test]
fn test_asl_accumulator() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x0A);
    cpu.set_a(0x81);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_asl_zero_page_writes_back() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0x06, 0x10]);
    cpu.memory_mut().write(0x0010, 0x40);
    cpu.set_a(0x55);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0010), 0x80);
    assert_eq!(cpu.a(), 0x55); // accumulator untouched
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_lsr_to_zero() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x4A);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_lsr_absolute_x() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0x5E, 0x00, 0x20]);
    cpu.memory_mut().write(0x2003, 0xFE);
    cpu.set_x(0x03);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x2003), 0x7F);
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycles(), 7);
}

#[test]
fn test_rol_feeds_carry_in() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x2A);
    cpu.set_a(0x80);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x01);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
}

#[test]
fn test_rol_absolute() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0x2E, 0x34, 0x12]);
    cpu.memory_mut().write(0x1234, 0x40);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x1234), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_ror_feeds_carry_into_bit7() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x6A);
    cpu.set_a(0x01);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_ror_zero_page_x_wraps() {
    let mut cpu = setup_cpu();

    // ROR $FF,X with X=2 targets 0x0001
    cpu.memory_mut().load(0x8000, &[0x76, 0xFF]);
    cpu.memory_mut().write(0x0001, 0x02);
    cpu.set_x(0x02);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0001), 0x01);
    assert_eq!(cpu.memory().read(0x0101), 0x00);
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycles(), 6);
}
