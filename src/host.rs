//! # Host Byte Streams
//!
//! Background threads connecting host readers and writers to an
//! [`IoPort`](crate::IoPort).
//!
//! The input thread queues every byte it reads and only then raises the
//! interrupt line, so the interrupt handler always finds the byte waiting. The
//! output thread drains a rendezvous channel: each CPU write to the port blocks
//! until the thread has taken the byte.

use std::io::{Read, Write};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

use log::{debug, warn};

use crate::InterruptLine;

/// Spawns a thread reading `reader` byte by byte into the returned queue,
/// raising `interrupts` after each byte is queued.
///
/// The thread exits at end of stream, on a read error, or once the receiver
/// is dropped.
///
/// ```
/// use emu6502::{host, InterruptLine};
///
/// let line = InterruptLine::new();
/// let input = host::spawn_input(&b"hi"[..], line.clone());
///
/// assert_eq!(input.recv().unwrap(), b'h');
/// assert_eq!(input.recv().unwrap(), b'i');
/// assert!(input.recv().is_err());
/// assert!(line.is_pending());
/// ```
pub fn spawn_input<R>(reader: R, interrupts: InterruptLine) -> Receiver<u8>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for byte in reader.bytes() {
            match byte {
                Ok(byte) => {
                    if tx.send(byte).is_err() {
                        break;
                    }
                    interrupts.raise();
                }
                Err(err) => {
                    warn!("input stream failed: {}", err);
                    break;
                }
            }
        }
        debug!("input stream closed");
    });

    rx
}

/// Spawns a thread writing every byte sent on the returned channel to
/// `writer`, flushing after each one.
///
/// The channel is a rendezvous channel. The thread exits once every sender is
/// dropped or the writer fails; later sends then return an error.
pub fn spawn_output<W>(mut writer: W) -> SyncSender<u8>
where
    W: Write + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel::<u8>(0);

    thread::spawn(move || {
        for byte in rx {
            if let Err(err) = writer.write_all(&[byte]).and_then(|()| writer.flush()) {
                warn!("output stream failed: {}", err);
                break;
            }
        }
        debug!("output stream closed");
    });

    tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Writer sharing its buffer with the test.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_input_preserves_order() {
        let input = spawn_input(&b"abc"[..], InterruptLine::new());
        let bytes: Vec<u8> = input.iter().collect();
        assert_eq!(bytes, b"abc");
    }

    #[test]
    fn test_empty_input_raises_nothing() {
        let line = InterruptLine::new();
        let input = spawn_input(&b""[..], line.clone());

        assert!(input.recv().is_err());
        assert!(!line.is_pending());
    }

    #[test]
    fn test_output_reaches_writer() {
        let buffer = SharedBuffer::default();
        let output = spawn_output(buffer.clone());

        output.send(b'o').unwrap();
        output.send(b'k').unwrap();
        drop(output);

        // Rendezvous: the second send returned only after the first byte was
        // taken; wait for the thread to finish the last write.
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while buffer.0.lock().unwrap().len() < 2 && std::time::Instant::now() < deadline {
            thread::yield_now();
        }
        assert_eq!(&*buffer.0.lock().unwrap(), b"ok");
    }
}
