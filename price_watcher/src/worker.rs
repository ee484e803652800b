//! Polling worker.
//!
//! A `Worker` owns one shard of symbols and loops over it until shutdown:
//!
//! - fetch every symbol of the shard in order from the shared `PriceSource`;
//! - on failure, log and skip the symbol for this pass;
//! - on success, compare with the worker's own `LastPriceMemory`, push a
//!   `PriceMessage` into the shared output queue and bump the `RequestCounter`;
//! - after the pass, sleep for the poll interval and check the shutdown signal.
//!
//! Shutdown is only observed between passes. A fetch in flight is never interrupted.
use crate::shutdown::ShutdownListener;
use crossbeam_channel::Sender;
use log::{debug, info, warn};
use price_common::source::PriceSource;
use price_common::{PriceMessage, Result, WatcherError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Successful request count of one worker. Written by that worker only, read by the
/// stats reporter.
#[derive(Debug, Clone, Default)]
pub struct RequestCounter(Arc<AtomicU64>);

impl RequestCounter {
    pub(crate) fn increment(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// Current value.
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Last observed price per symbol, private to one worker.
#[derive(Debug, Default)]
pub struct LastPriceMemory {
    prices: HashMap<String, f64>,
}

impl LastPriceMemory {
    /// Record `price` for `symbol` and report whether it changed.
    ///
    /// A first observation is never a change. Comparison is exact.
    pub fn observe(&mut self, symbol: &str, price: f64) -> bool {
        match self.prices.get_mut(symbol) {
            Some(previous) => {
                let changed = *previous != price;
                *previous = price;
                changed
            }
            None => {
                self.prices.insert(symbol.to_owned(), price);
                false
            }
        }
    }
}

/// One polling worker and everything it owns.
pub struct Worker {
    id: usize,
    shard: Vec<String>,
    memory: LastPriceMemory,
    requests: RequestCounter,
    source: Arc<dyn PriceSource>,
    output: Sender<PriceMessage>,
    shutdown: ShutdownListener,
    poll_interval: Duration,
}

impl Worker {
    /// Create a worker for `shard`.
    pub fn new(
        id: usize,
        shard: Vec<String>,
        source: Arc<dyn PriceSource>,
        output: Sender<PriceMessage>,
        shutdown: ShutdownListener,
        poll_interval: Duration,
    ) -> Self {
        Self {
            id,
            shard,
            memory: LastPriceMemory::default(),
            requests: RequestCounter::default(),
            source,
            output,
            shutdown,
            poll_interval,
        }
    }

    /// Handle on this worker's request counter.
    pub fn counter(&self) -> RequestCounter {
        self.requests.clone()
    }

    /// Poll every symbol of the shard once. Returns the number of messages emitted.
    ///
    /// Blocks while the output queue is full. Fails only if the queue has been closed.
    pub fn poll_shard(&mut self) -> Result<usize> {
        let mut emitted = 0;
        for symbol in &self.shard {
            let price = match self.source.fetch_price(symbol) {
                Ok(price) => price,
                Err(e) => {
                    warn!("Worker {}: failed to fetch {}: {}", self.id, symbol, e);
                    continue;
                }
            };
            debug!("Worker {}: {} = {}", self.id, symbol, price);

            let changed = self.memory.observe(symbol, price);
            self.output
                .send(PriceMessage::new(symbol.as_str(), price, changed))
                .map_err(|e| WatcherError::ChannelSend(format!("worker {}: {}", self.id, e)))?;
            self.requests.increment();
            emitted += 1;
        }
        Ok(emitted)
    }

    /// Poll until the shutdown signal is raised.
    pub fn run(mut self) -> Result<()> {
        info!("Worker {} started with {} symbols", self.id, self.shard.len());
        loop {
            self.poll_shard()?;
            if self.shutdown.wait_timeout(self.poll_interval) {
                break;
            }
        }
        info!(
            "Worker {} stopped after {} requests",
            self.id,
            self.requests.get()
        );
        Ok(())
    }

    /// Run the worker on its own named thread.
    pub fn spawn(self) -> Result<JoinHandle<Result<()>>> {
        let handle = thread::Builder::new()
            .name(format!("worker-{}", self.id))
            .spawn(move || self.run())?;
        Ok(handle)
    }
}
