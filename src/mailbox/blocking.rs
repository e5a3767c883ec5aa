//! `BlockingMailbox`: `Condvar`-driven mailbox for thread-based actors.

// Layer 1: Standard library imports
use std::time::{Duration, Instant};

// Layer 2: Third-party crate imports
use parking_lot::{Condvar, Mutex};

// Layer 3: Internal module imports
use super::error::MailboxError;
use super::queue::MailboxCore;
use crate::message::Envelope;

/// A mailbox consumed by a dedicated OS thread. `block_until_nonempty`
/// parks the thread on a condition variable rather than polling.
#[derive(Debug, Default)]
pub struct BlockingMailbox {
    core: MailboxCore,
    signal: Mutex<()>,
    condvar: Condvar,
}

impl BlockingMailbox {
    /// An empty, open mailbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Producer-side enqueue.
    pub fn push_back(&self, envelope: Envelope) -> Result<(), MailboxError> {
        match self.core.push_back(envelope) {
            Ok(()) => {
                let _guard = self.signal.lock();
                self.condvar.notify_one();
                Ok(())
            }
            Err(_) => Err(MailboxError::Closed),
        }
    }

    /// Non-blocking consumer-side dequeue.
    pub fn try_pop(&self) -> Option<Envelope> {
        self.core.try_pop()
    }

    /// Block the calling thread until an envelope is available, the
    /// mailbox is closed, or `deadline` elapses. Wakeup is racy-safe: the
    /// consumer always rechecks emptiness after waking, never trusting the
    /// wait alone.
    pub fn block_until_nonempty(&self, deadline: Option<Instant>) -> Option<Envelope> {
        loop {
            if let Some(envelope) = self.core.try_pop() {
                return Some(envelope);
            }
            if self.core.is_closed() {
                return None;
            }
            let mut guard = self.signal.lock();
            match deadline {
                Some(at) => {
                    let now = Instant::now();
                    if now >= at {
                        return self.core.try_pop();
                    }
                    self.condvar.wait_for(&mut guard, at - now);
                }
                None => {
                    self.condvar.wait_for(&mut guard, Duration::from_millis(50));
                }
            }
        }
    }

    /// `true` iff both priority bands are empty.
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// Mark the mailbox terminal and wake any blocked thread.
    pub fn mark_consumer_done(&self) {
        self.core.mark_closed();
        let _guard = self.signal.lock();
        self.condvar.notify_all();
    }

    /// `true` once `mark_consumer_done` has been called.
    pub fn is_closed(&self) -> bool {
        self.core.is_closed()
    }
}
