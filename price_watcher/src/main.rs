//! Price watcher.
//!
//! Polls the prices of a configured list of symbols from a quote service with a pool of
//! worker threads and prints every observation together with periodic request totals.
//!
//! - `partition` — splits the symbol list into one contiguous shard per worker.
//! - `worker` — polls a shard, detects per-symbol price changes and counts requests.
//! - `aggregator` — single consumer that renders the shared output queue.
//! - `stats` — periodic sum of all request counters.
//! - `coordinator` — starts and stops a session.
//! - `console` — reads `START` / `STOP` from stdin.
//!
//! Lifecycle:
//! - Nothing happens until `START` is read. Any other first line exits immediately.
//! - The configuration (`config.yaml` by default) is loaded after `START`; an invalid
//!   configuration is fatal before any worker exists.
//! - `STOP`, end of input or Ctrl+C stop the session. The process exits only after
//!   every queued price line has been printed. A second Ctrl+C exits immediately.
#![warn(missing_docs)]
use crate::args::Args;
use crate::console::{interrupt, CommandReader, Interrupt};
use crate::coordinator::Coordinator;
use clap::Parser;
use crossbeam_channel::{bounded, select, unbounded};
use log::{debug, error, info, warn};
use price_common::command::PROMPT;
use price_common::source::build_source;
use price_common::{Command, Config, Result, WatcherError};
use std::io::{self, Write};
use std::process;
use std::sync::atomic::AtomicUsize;

mod aggregator;
mod args;
mod console;
mod coordinator;
mod partition;
mod shutdown;
mod stats;
#[cfg(test)]
mod testing;
mod worker;

fn main() -> Result<(), WatcherError> {
    init_logger();
    let args = Args::parse();

    print!("{PROMPT}");
    io::stdout().flush()?;
    if CommandReader::read_command(&mut io::stdin().lock())? != Some(Command::Start) {
        info!("Command to start not received, exiting...");
        return Ok(());
    }

    let mut config = Config::from_file(&args.config).inspect_err(|e| {
        error!("Failed to read config {}: {}", args.config.display(), e);
    })?;
    if let Some(source) = args.source {
        config.source = source;
    }
    info!(
        "Loaded {} symbols from {}, source: {}",
        config.symbols.len(),
        args.config.display(),
        config.source
    );

    let source = build_source(&config)?;
    let session = Coordinator::new(config).start(source, io::stdout(), io::stdout())?;
    info!("Running with {} workers. Type STOP to exit.", session.worker_count());

    let (cmd_tx, cmd_rx) = unbounded::<Command>();
    CommandReader::spawn_stdin(cmd_tx)?;

    let (interrupt_tx, interrupt_rx) = bounded::<()>(1);
    let presses = AtomicUsize::new(0);
    if let Err(e) = ctrlc::set_handler(move || {
        if interrupt(&presses, &interrupt_tx) == Interrupt::Force {
            warn!("Second Ctrl+C received, exiting without draining");
            process::exit(130);
        }
    }) {
        warn!("Ctrl+C handler not installed: {}", e);
    }

    loop {
        select! {
            recv(cmd_rx) -> cmd => match cmd {
                Ok(Command::Stop) => break,
                Ok(Command::Start) => debug!("Session already running, ignoring START"),
                Err(_) => {
                    info!("Console input closed, stopping");
                    break;
                }
            },
            recv(interrupt_rx) -> _ => {
                info!("Ctrl+C received, stopping. Press Ctrl+C again to exit immediately");
                break;
            }
        }
    }

    info!("Stopping after {} requests", session.total_requests());
    let report = session.stop()?;
    info!(
        "Stopped {} workers: {} requests, {} lines rendered",
        report.workers, report.total_requests, report.rendered
    );
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
