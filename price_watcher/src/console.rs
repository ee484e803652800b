//! Console command reader.
//!
//! The first line decides whether the session starts at all. After that a background
//! thread forwards every recognised command over a channel and drops everything else.
//! The channel disconnects when the input reaches end of file.
//!
//! Ctrl+C is an interrupt rather than a console line: the first one requests the same
//! stop as `STOP`, a second one asks for an immediate exit, for when a hung request
//! keeps a worker from finishing its pass.
use crossbeam_channel::Sender;
use log::{debug, error};
use price_common::{Command, Result};
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// What a Ctrl+C press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Stop the session and drain, like `STOP`.
    Stop,
    /// Exit now without waiting for the drain.
    Force,
}

/// Register one Ctrl+C press. The first press is forwarded to `tx`.
pub fn interrupt(presses: &AtomicUsize, tx: &Sender<()>) -> Interrupt {
    if presses.fetch_add(1, Ordering::SeqCst) == 0 {
        let _ = tx.try_send(());
        Interrupt::Stop
    } else {
        Interrupt::Force
    }
}

/// Reads operator commands from a line-oriented input.
pub struct CommandReader;

impl CommandReader {
    /// Read a single line. `None` on end of input or an unrecognised line.
    pub fn read_command<R: BufRead>(reader: &mut R) -> Result<Option<Command>> {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Command::parse_line(&line))
    }

    /// Forward recognised commands to `tx` until end of input or until the receiver
    /// is dropped.
    pub fn forward<R: BufRead>(reader: R, tx: &Sender<Command>) -> Result<()> {
        for line in reader.lines() {
            let line = line?;
            match Command::parse_line(&line) {
                Some(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                None => debug!("Ignoring console input {:?}", line),
            }
        }
        Ok(())
    }

    /// Forward from `reader` and log a read failure. `tx` is dropped on return either
    /// way, which the receiving side sees as end of input.
    pub fn run<R: BufRead>(reader: R, tx: Sender<Command>) {
        if let Err(e) = Self::forward(reader, &tx) {
            error!("Console reader failed: {}", e);
        }
    }

    /// Forward commands from stdin on a detached background thread.
    pub fn spawn_stdin(tx: Sender<Command>) -> Result<()> {
        thread::Builder::new()
            .name("console-reader".to_string())
            .spawn(move || Self::run(io::stdin().lock(), tx))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{bounded, unbounded};
    use price_common::WatcherError;
    use std::io::Cursor;

    #[test]
    fn test_read_command_first_line() {
        let mut input = Cursor::new("START\nSTOP\n");
        assert_eq!(CommandReader::read_command(&mut input).unwrap(), Some(Command::Start));
        assert_eq!(CommandReader::read_command(&mut input).unwrap(), Some(Command::Stop));
        assert_eq!(CommandReader::read_command(&mut input).unwrap(), None);
    }

    #[test]
    fn test_read_command_rejects_other_input() {
        let mut input = Cursor::new("go\n");
        assert_eq!(CommandReader::read_command(&mut input).unwrap(), None);
    }

    #[test]
    fn test_forward_skips_unknown_lines() {
        let (tx, rx) = unbounded();
        CommandReader::forward(Cursor::new("hello\n\nSTOP\nstop\nSTART\n"), &tx).unwrap();
        drop(tx);

        let commands: Vec<Command> = rx.iter().collect();
        assert_eq!(commands, vec![Command::Stop, Command::Start]);
    }

    #[test]
    fn test_end_of_input_disconnects_channel() {
        let (tx, rx) = unbounded();
        let handle = thread::spawn(move || CommandReader::forward(Cursor::new("noise\n"), &tx));

        assert!(rx.recv().is_err());
        handle.join().unwrap().unwrap();
    }

    #[test]
    fn test_forward_reports_read_error() {
        let (tx, rx) = unbounded();
        let input = Cursor::new(b"STOP\n\xff\xfe\nSTART\n".to_vec());

        let result = CommandReader::forward(input, &tx);
        assert!(matches!(result, Err(WatcherError::Io(_))));
        assert_eq!(rx.try_recv().ok(), Some(Command::Stop));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_run_closes_channel_after_read_error() {
        let (tx, rx) = unbounded();
        let handle = thread::spawn(move || {
            CommandReader::run(Cursor::new(b"\xff\n".to_vec()), tx);
        });

        assert!(rx.recv().is_err());
        handle.join().unwrap();
    }

    #[test]
    fn test_second_interrupt_forces_exit() {
        let presses = AtomicUsize::new(0);
        let (tx, rx) = bounded(1);

        assert_eq!(interrupt(&presses, &tx), Interrupt::Stop);
        assert_eq!(interrupt(&presses, &tx), Interrupt::Force);
        assert_eq!(interrupt(&presses, &tx), Interrupt::Force);

        assert_eq!(rx.try_recv(), Ok(()));
        assert!(rx.try_recv().is_err());
    }
}
