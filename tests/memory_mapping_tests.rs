//! Integration tests for the device bus and memory-mapped devices.

use std::cell::RefCell;
use std::ops::RangeInclusive;
use std::rc::Rc;
use std::sync::mpsc;

use emu6502::{Bus, BusError, Cpu, IoPort, Memory, MemoryBus, Ram, Rom};

/// Counts reads so tests can observe side effects of the CPU's bus traffic.
struct ReadCounter {
    address: u16,
    reads: std::cell::Cell<u32>,
}

impl Memory for ReadCounter {
    fn range(&self) -> RangeInclusive<u16> {
        self.address..=self.address
    }

    fn read(&self, _addr: u16) -> u8 {
        self.reads.set(self.reads.get() + 1);
        0x00
    }

    fn write(&mut self, _addr: u16, _value: u8) {}
}

/// RAM at 0x0000-0x7FFF, ROM at 0xC000-0xFFFF with reset vector 0xC000
fn setup_bus(program: &[u8]) -> Bus {
    let mut rom = vec![0xEA; 0x4000];
    rom[..program.len()].copy_from_slice(program);
    rom[0x3FFC] = 0x00;
    rom[0x3FFD] = 0xC0;

    let mut bus = Bus::new();
    bus.add_memory(Ram::new(0x0000, 0x8000).unwrap()).unwrap();
    bus.add_memory(Rom::new(0xC000, rom).unwrap()).unwrap();
    bus
}

#[test]
fn test_cpu_runs_from_rom_with_ram_stack() {
    // LDA #$42; PHA; STA $0300
    let bus = setup_bus(&[0xA9, 0x42, 0x48, 0x8D, 0x00, 0x03]);
    let mut cpu = Cpu::new(bus);
    assert_eq!(cpu.pc(), 0xC000);

    for _ in 0..3 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.memory().read(0x0100), 0x42);
    assert_eq!(cpu.memory().read(0x0300), 0x42);
}

#[test]
fn test_rom_write_is_ignored() {
    // LDA #$00; STA $C000
    let bus = setup_bus(&[0xA9, 0x00, 0x8D, 0x00, 0xC0]);
    let mut cpu = Cpu::new(bus);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0xC000), 0xA9);
}

#[test]
fn test_unmapped_region() {
    let mut bus = setup_bus(&[]).with_unmapped_value(0xEE);

    bus.write(0x9000, 0x12);
    assert_eq!(bus.read(0x9000), 0xEE);
    assert_eq!(bus.read(0xBFFF), 0xEE);
}

#[test]
fn test_overlapping_device_rejected() {
    let mut bus = setup_bus(&[]);

    let err = bus
        .add_memory(Ram::new(0x7F00, 0x200).unwrap())
        .unwrap_err();
    assert_eq!(
        err,
        BusError::Overlap {
            new: 0x7F00..=0x80FF,
            existing: 0x0000..=0x7FFF,
        }
    );
    assert!(err.to_string().contains("overlap"));
    assert_eq!(bus.len(), 2);
}

#[test]
fn test_overlay_shadows_ram_reads() {
    let mut bus = setup_bus(&[]);
    let mut shadow = Ram::new(0x0200, 0x100).unwrap();
    shadow.load(0x0200, &[0x99]);

    bus.write(0x0200, 0x11);
    bus.add_overlay(shadow);

    assert_eq!(bus.read(0x0200), 0x99);

    // Writes reach both devices
    bus.write(0x0201, 0x22);
    assert_eq!(bus.read(0x0201), 0x22);
}

#[test]
fn test_shared_device_handle() {
    let ram = Rc::new(RefCell::new(Ram::new(0x0000, 0x100).unwrap()));
    let mut bus = Bus::new();
    bus.add_memory(Rc::clone(&ram)).unwrap();

    bus.write(0x0010, 0x5A);
    assert_eq!(ram.borrow().read(0x0010), 0x5A);

    ram.borrow_mut().write(0x0011, 0xA5);
    assert_eq!(bus.read(0x0011), 0xA5);
}

#[test]
fn test_store_does_not_read_device() {
    let counter = Rc::new(RefCell::new(ReadCounter {
        address: 0x9000,
        reads: std::cell::Cell::new(0),
    }));

    // STA $9000; LDA $9000
    let mut bus = setup_bus(&[0x8D, 0x00, 0x90, 0xAD, 0x00, 0x90]);
    bus.add_memory(Rc::clone(&counter)).unwrap();
    let mut cpu = Cpu::new(bus);

    cpu.step().unwrap();
    assert_eq!(counter.borrow().reads.get(), 0);

    cpu.step().unwrap();
    assert_eq!(counter.borrow().reads.get(), 1);
}

#[test]
fn test_io_port_on_bus() {
    let (input_tx, input_rx) = mpsc::channel();
    let (output_tx, output_rx) = mpsc::sync_channel(4);

    // LDA $8000; STA $8000; LDA $8000
    let mut bus = setup_bus(&[0xAD, 0x00, 0x80, 0x8D, 0x00, 0x80, 0xAD, 0x00, 0x80]);
    bus.add_memory(
        IoPort::new(0x8000)
            .with_input(input_rx)
            .with_output(output_tx),
    )
    .unwrap();
    let mut cpu = Cpu::new(bus);

    input_tx.send(0x41).unwrap();

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x41);

    cpu.step().unwrap();
    assert_eq!(output_rx.try_recv(), Ok(0x41));

    // Nothing queued: underrun reads 0
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}
