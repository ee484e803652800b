//! Session lifecycle: start once, stop once.
//!
//! Start validates and clamps the worker count, partitions the symbols, then spawns one
//! thread per non-empty shard, the output aggregator and the stats reporter. Stop raises
//! the shutdown signal, joins every worker, closes the output queue, waits for the
//! aggregator to drain and joins the reporter. Both steps consume their receiver, so a
//! stopped session cannot be restarted.
use crate::aggregator::OutputAggregator;
use crate::partition::partition;
use crate::shutdown::{shutdown_channel, ShutdownTrigger};
use crate::stats::{total_requests, StatsReporter};
use crate::worker::{RequestCounter, Worker};
use crossbeam_channel::{bounded, Sender};
use log::{error, info, warn};
use price_common::source::PriceSource;
use price_common::{Config, PriceMessage, Result, WatcherError};
use std::io::Write;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Hardware threads available to this process, at least one.
pub fn available_parallelism() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Validate `requested` and clamp it to `parallelism`.
pub fn effective_workers(requested: i64, parallelism: usize) -> Result<usize> {
    if requested <= 0 {
        return Err(WatcherError::InvalidWorkers(requested));
    }
    let requested = usize::try_from(requested).unwrap_or(usize::MAX);
    Ok(requested.min(parallelism.max(1)))
}

/// Session factory.
pub struct Coordinator {
    config: Config,
    parallelism: usize,
}

/// A running session.
pub struct Session {
    trigger: ShutdownTrigger,
    workers: Vec<JoinHandle<Result<()>>>,
    counters: Vec<RequestCounter>,
    output_tx: Sender<PriceMessage>,
    aggregator: JoinHandle<Result<u64>>,
    stats: JoinHandle<Result<u64>>,
}

/// Outcome of a completed stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopReport {
    /// Workers that were running.
    pub workers: usize,
    /// Successful requests across all workers.
    pub total_requests: u64,
    /// Lines rendered by the output aggregator.
    pub rendered: u64,
}

impl Coordinator {
    /// Coordinator using the machine's available parallelism.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            parallelism: available_parallelism(),
        }
    }

    /// Override the parallelism the worker count is clamped to.
    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Start the session. Price lines go to `output`, total lines to `report`.
    ///
    /// Fails before any thread is started if the configuration is invalid.
    pub fn start<O, R>(
        self,
        source: Arc<dyn PriceSource>,
        output: O,
        report: R,
    ) -> Result<Session>
    where
        O: Write + Send + 'static,
        R: Write + Send + 'static,
    {
        self.config.validate()?;
        let worker_count = effective_workers(self.config.max_workers, self.parallelism)?;
        if (worker_count as i64) < self.config.max_workers {
            info!(
                "max_workers {} clamped to {} available threads",
                self.config.max_workers, worker_count
            );
        }

        let shards = partition(&self.config.symbols, worker_count);
        if shards.is_empty() {
            warn!("No symbols configured, no workers will be started");
        }

        let (output_tx, output_rx) = bounded::<PriceMessage>(self.config.queue_capacity);
        let (mut trigger, listener) = shutdown_channel();

        let workers: Vec<Worker> = shards
            .into_iter()
            .enumerate()
            .map(|(id, shard)| {
                Worker::new(
                    id,
                    shard.to_vec(),
                    Arc::clone(&source),
                    output_tx.clone(),
                    listener.clone(),
                    self.config.poll_interval(),
                )
            })
            .collect();
        let counters: Vec<RequestCounter> = workers.iter().map(Worker::counter).collect();

        let mut handles = Vec::with_capacity(workers.len());
        for worker in workers {
            match worker.spawn() {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    // Already running workers exit after their current pass.
                    trigger.raise();
                    return Err(e);
                }
            }
        }

        let aggregator = match OutputAggregator::start(output_rx, output) {
            Ok(handle) => handle,
            Err(e) => {
                trigger.raise();
                return Err(e);
            }
        };

        let reporter =
            StatsReporter::new(counters.clone(), self.config.report_interval(), listener);
        let stats = match reporter.start(report) {
            Ok(handle) => handle,
            Err(e) => {
                trigger.raise();
                return Err(e);
            }
        };

        info!(
            "Started {} workers for {} symbols",
            handles.len(),
            self.config.symbols.len()
        );
        Ok(Session {
            trigger,
            workers: handles,
            counters,
            output_tx,
            aggregator,
            stats,
        })
    }
}

impl Session {
    /// Number of running workers.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Current sum of all request counters.
    pub fn total_requests(&self) -> u64 {
        total_requests(&self.counters)
    }

    /// Stop the session and wait until all buffered output is rendered.
    ///
    /// Every thread is joined even when one of them failed; the first failure is
    /// returned after the drain.
    pub fn stop(self) -> Result<StopReport> {
        let Session {
            mut trigger,
            workers,
            counters,
            output_tx,
            aggregator,
            stats,
        } = self;

        trigger.raise();
        info!("Shutdown signal raised, waiting for {} workers", workers.len());

        let worker_count = workers.len();
        let mut first_error = None;
        for (id, handle) in workers.into_iter().enumerate() {
            if let Err(e) = join(handle, &format!("worker-{id}")) {
                error!("Worker {} failed: {}", id, e);
                first_error.get_or_insert(e);
            }
        }

        // Workers dropped their senders on exit; this closes the queue.
        drop(output_tx);

        let rendered = match join(aggregator, "output-aggregator") {
            Ok(rendered) => rendered,
            Err(e) => {
                error!("Output aggregator failed: {}", e);
                first_error.get_or_insert(e);
                0
            }
        };

        if let Err(e) = join(stats, "stats-reporter") {
            error!("Stats reporter failed: {}", e);
            first_error.get_or_insert(e);
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(StopReport {
                workers: worker_count,
                total_requests: total_requests(&counters),
                rendered,
            }),
        }
    }
}

fn join<T>(handle: JoinHandle<Result<T>>, name: &str) -> Result<T> {
    handle
        .join()
        .map_err(|_| WatcherError::ThreadPanic(name.to_string()))?
}
