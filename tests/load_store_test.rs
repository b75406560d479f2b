//! Tests for loads, stores and register transfers.

use emu6502::{Cpu, FlatMemory, MemoryBus};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    Cpu::new(memory)
}

// ========== Loads ==========

#[test]
fn test_lda_immediate() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0xA9, 0x42]);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x42);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_lda_zero_and_negative_flags() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0xA9, 0x00, 0xA9, 0x80]);

    cpu.step().unwrap();
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());

    cpu.step().unwrap();
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
}

#[test]
fn test_lda_absolute_y_wraps_address_space() {
    let mut cpu = setup_cpu();

    // LDA $FFF0,Y with Y=0x20 reads 0x0010
    cpu.memory_mut().load(0x8000, &[0xB9, 0xF0, 0xFF]);
    cpu.memory_mut().write(0x0010, 0x99);
    cpu.set_y(0x20);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x99);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_lda_indirect_x() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0xA1, 0x20]);
    cpu.memory_mut().load(0x0024, &[0x00, 0x50]);
    cpu.memory_mut().write(0x5000, 0x7E);
    cpu.set_x(0x04);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x7E);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_ldx_zero_page_y() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0xB6, 0x10]);
    cpu.memory_mut().write(0x0013, 0xAB);
    cpu.set_y(0x03);

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0xAB);
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_ldy_absolute_x() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0xBC, 0x00, 0x02]);
    cpu.memory_mut().write(0x0201, 0x01);
    cpu.set_x(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.y(), 0x01);
    assert_eq!(cpu.cycles(), 4);
}

// ========== Stores ==========

#[test]
fn test_sta_absolute() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0x8D, 0x00, 0x02]);
    cpu.set_a(0x10);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0200), 0x10);
    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_sta_does_not_touch_flags() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0x85, 0x10]);
    cpu.set_a(0x00);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0010), 0x00);
    assert!(!cpu.flag_z());
}

#[test]
fn test_sta_indirect_y() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0x91, 0x40]);
    cpu.memory_mut().load(0x0040, &[0x00, 0x30]);
    cpu.set_y(0x05);
    cpu.set_a(0x66);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x3005), 0x66);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_stx_zero_page_y_and_sty_zero_page_x() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0x96, 0x10, 0x94, 0x20]);
    cpu.set_x(0x11);
    cpu.set_y(0x22);

    cpu.step().unwrap();
    assert_eq!(cpu.memory().read(0x0032), 0x11); // 0x10 + Y

    cpu.step().unwrap();
    assert_eq!(cpu.memory().read(0x0031), 0x22); // 0x20 + X
    assert_eq!(cpu.cycles(), 8);
}

// ========== Transfers ==========

#[test]
fn test_tax_tay() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0xAA, 0xA8]);
    cpu.set_a(0x80);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x80);
    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
}

#[test]
fn test_txa_tya_zero() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().load(0x8000, &[0x8A, 0x98]);
    cpu.set_a(0x55);
    cpu.set_x(0x00);
    cpu.set_y(0x07);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x07);
    assert!(!cpu.flag_z());
}

#[test]
fn test_tsx_updates_flags() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0xBA);
    cpu.set_sp(0xF0);

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0xF0);
    assert!(cpu.flag_n());
}

#[test]
fn test_txs_leaves_flags() {
    let mut cpu = setup_cpu();

    cpu.memory_mut().write(0x8000, 0x9A);
    cpu.set_x(0x00);
    cpu.set_flag_n(true);

    cpu.step().unwrap();

    assert_eq!(cpu.sp(), 0x00);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}
