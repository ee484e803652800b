//! Periodic request totals.
//!
//! The reporter does not go through the output queue: it reads each worker's
//! `RequestCounter` directly on every tick and writes one total line. It shares the
//! session's shutdown signal and exits as soon as it is raised.
use crate::shutdown::ShutdownListener;
use crate::worker::RequestCounter;
use crossbeam_channel::{select, tick};
use log::debug;
use price_common::Result;
use std::io::Write;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Sum of all counters at the time of the call.
pub fn total_requests(counters: &[RequestCounter]) -> u64 {
    counters.iter().map(RequestCounter::get).sum()
}

/// Writes `workers requests total: <n>` on a fixed interval.
pub struct StatsReporter {
    counters: Vec<RequestCounter>,
    interval: Duration,
    shutdown: ShutdownListener,
}

impl StatsReporter {
    /// Create a reporter over `counters`.
    pub fn new(
        counters: Vec<RequestCounter>,
        interval: Duration,
        shutdown: ShutdownListener,
    ) -> Self {
        Self {
            counters,
            interval,
            shutdown,
        }
    }

    /// Run on a dedicated thread. The thread yields the number of lines written.
    pub fn start<W>(self, out: W) -> Result<JoinHandle<Result<u64>>>
    where
        W: Write + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name("stats-reporter".to_string())
            .spawn(move || {
                let mut out = out;
                self.run(&mut out)
            })?;
        Ok(handle)
    }

    /// Report on every tick until shutdown.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<u64> {
        let ticker = tick(self.interval);
        let mut reports = 0u64;
        loop {
            select! {
                recv(ticker) -> _ => {
                    writeln!(out, "workers requests total: {}", total_requests(&self.counters))?;
                    out.flush()?;
                    reports += 1;
                },
                recv(self.shutdown.receiver()) -> _ => break,
            }
        }
        debug!("Stats reporter stopped after {} reports", reports);
        Ok(reports)
    }
}
