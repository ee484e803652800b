//! Output aggregator: the single consumer of the shared price queue.
//!
//! Every worker holds a `Sender` of one bounded queue; the aggregator holds the only
//! `Receiver` and renders messages in arrival order, one line each. The queue closes
//! once every sender is dropped, and the aggregator returns only after it has rendered
//! everything still buffered at that point.
use crossbeam_channel::Receiver;
use log::{debug, info};
use price_common::{PriceMessage, Result};
use std::io::Write;
use std::thread::{self, JoinHandle};

/// Console renderer for `PriceMessage`s.
pub struct OutputAggregator;

impl OutputAggregator {
    /// Start draining `rx` into `out` on a dedicated thread. The thread yields the
    /// number of rendered lines.
    pub fn start<W>(rx: Receiver<PriceMessage>, out: W) -> Result<JoinHandle<Result<u64>>>
    where
        W: Write + Send + 'static,
    {
        let handle = thread::Builder::new()
            .name("output-aggregator".to_string())
            .spawn(move || {
                let mut out = out;
                Self::drain(&rx, &mut out)
            })?;
        Ok(handle)
    }

    /// Render messages until the queue is closed and empty.
    pub fn drain<W: Write>(rx: &Receiver<PriceMessage>, out: &mut W) -> Result<u64> {
        debug!("Output aggregator started");
        let mut rendered = 0u64;
        for msg in rx.iter() {
            writeln!(out, "{msg}")?;
            rendered += 1;
        }
        out.flush()?;
        info!("Output aggregator drained {} messages", rendered);
        Ok(rendered)
    }
}
