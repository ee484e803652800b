//! One-shot broadcast shutdown signal.
//!
//! The signal is a `crossbeam_channel` on which nothing is ever sent: raising it drops
//! the only `Sender`, and every cloned `Receiver` then observes a disconnect. A
//! disconnect cannot be undone, so once raised the signal stays raised for all
//! listeners, including ones cloned afterwards.
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Owning side of the signal, held by the coordinator.
pub struct ShutdownTrigger {
    tx: Option<Sender<()>>,
}

/// Listening side of the signal, cloned into every worker and the stats reporter.
#[derive(Clone)]
pub struct ShutdownListener {
    rx: Receiver<()>,
}

/// Create a lowered signal.
pub fn shutdown_channel() -> (ShutdownTrigger, ShutdownListener) {
    let (tx, rx) = unbounded::<()>();
    (ShutdownTrigger { tx: Some(tx) }, ShutdownListener { rx })
}

impl ShutdownTrigger {
    /// Raise the signal. Returns `false` if it was already raised.
    pub fn raise(&mut self) -> bool {
        self.tx.take().is_some()
    }
}

impl ShutdownListener {
    /// Non-blocking check.
    pub fn is_raised(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Sleep for `timeout`, waking early if the signal is raised in the meantime.
    /// Returns whether the signal is raised.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout) | Ok(()) => self.is_raised(),
        }
    }

    /// Receiver for use in `select!`; a receive on it completes once the signal is raised.
    pub fn receiver(&self) -> &Receiver<()> {
        &self.rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_signal_starts_lowered() {
        let (_trigger, listener) = shutdown_channel();
        assert!(!listener.is_raised());
        assert!(!listener.wait_timeout(Duration::from_millis(5)));
    }

    #[test]
    fn test_raise_is_visible_to_every_listener() {
        let (mut trigger, listener) = shutdown_channel();
        let other = listener.clone();

        assert!(trigger.raise());
        assert!(!trigger.raise());

        assert!(listener.is_raised());
        assert!(other.is_raised());
        assert!(listener.clone().is_raised());
    }

    #[test]
    fn test_wait_wakes_early_on_raise() {
        let (mut trigger, listener) = shutdown_channel();
        let started = Instant::now();

        let waiter = thread::spawn(move || listener.wait_timeout(Duration::from_secs(30)));
        thread::sleep(Duration::from_millis(20));
        trigger.raise();

        assert!(waiter.join().expect("waiter thread"));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
