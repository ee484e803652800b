//! Test doubles shared by the unit tests.
use price_common::source::{FetchError, PriceSource};
use std::collections::{HashMap, VecDeque};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Price source that replays a scripted answer list per symbol. The last answer of a
/// list repeats forever; unknown symbols fail with a network error.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    scripts: Mutex<HashMap<String, VecDeque<Result<f64, FetchError>>>>,
}

impl ScriptedSource {
    pub(crate) fn with(self, symbol: &str, answers: Vec<Result<f64, FetchError>>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(symbol.to_string(), answers.into());
        self
    }

    /// Every symbol in `symbols` answers `price` on every fetch.
    pub(crate) fn constant(symbols: &[String], price: f64) -> Self {
        symbols
            .iter()
            .fold(Self::default(), |source, symbol| source.with(symbol, vec![Ok(price)]))
    }
}

impl PriceSource for ScriptedSource {
    fn fetch_price(&self, symbol: &str) -> Result<f64, FetchError> {
        let mut scripts = self.scripts.lock().unwrap();
        let answers = scripts
            .get_mut(symbol)
            .ok_or_else(|| FetchError::Network(format!("unknown symbol {symbol}")))?;
        if answers.len() > 1 {
            answers.pop_front().unwrap()
        } else {
            answers
                .front()
                .cloned()
                .unwrap_or_else(|| Err(FetchError::Network("empty script".into())))
        }
    }
}

/// In-memory writer whose contents can be inspected from another thread.
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
    delay: Option<Duration>,
}

impl SharedBuffer {
    /// A buffer that sleeps on every write, to simulate a slow console.
    pub(crate) fn slow(delay: Duration) -> Self {
        Self {
            bytes: Arc::default(),
            delay: Some(delay),
        }
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        let bytes = self.bytes.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that always fails, for sink error paths.
pub(crate) struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "console closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
