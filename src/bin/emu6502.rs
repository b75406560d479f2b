use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, ErrorKind, Parser};
use log::{error, info, LevelFilter};

use emu6502::{host, machine, FreeRunning, InterruptLine, IoPort, Machine, MachineConfig, Metronome};

/// Runs a raw 6502 ROM image. Standard input feeds the I/O port (each byte
/// raises an interrupt), port output goes to standard error.
#[derive(Parser, Clone)]
#[clap(version, about)]
struct Options {
    /// ROM image, mapped so that it ends at 0xFFFF
    #[clap(parse(from_os_str))]
    rom: PathBuf,

    /// Clock frequency in Hz; runs unthrottled when omitted
    #[clap(long)]
    hz: Option<NonZeroU32>,

    /// Log interrupt entries and machine setup
    #[clap(short, long)]
    verbose: bool,
}

fn fail<E: std::fmt::Display>(kind: ErrorKind, val: E) -> ! {
    Options::command().error(kind, val).exit()
}

fn main() {
    let options = Options::parse();

    env_logger::Builder::new()
        .filter_level(if options.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let config = MachineConfig::default();
    let rom = machine::load_rom(&options.rom).unwrap_or_else(|err| fail(ErrorKind::Io, err));

    let interrupts = InterruptLine::new();
    let port = IoPort::new(config.io_address)
        .with_input(host::spawn_input(std::io::stdin(), interrupts.clone()))
        .with_output(host::spawn_output(std::io::stderr()));

    let mut machine =
        Machine::build(config, rom, port).unwrap_or_else(|err| fail(ErrorKind::InvalidValue, err));
    info!(
        "loaded {}, reset to 0x{:04X}",
        options.rom.display(),
        machine.cpu().pc()
    );

    let result = match options.hz {
        Some(hz) => machine.run(&mut Metronome::from_hz(hz).with_interrupts(interrupts)),
        None => machine.run(&mut FreeRunning::new().with_interrupts(interrupts)),
    };

    if let Err(err) = result {
        error!("{}", err);
        process::exit(1);
    }
}
