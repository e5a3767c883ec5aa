//! `MailboxCore`: the two-priority-band envelope storage shared by both
//! mailbox flavors.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

// Layer 2: Third-party crate imports
use parking_lot::Mutex;

// Layer 3: Internal module imports
use crate::message::{Envelope, MessagePriority};

/// Two FIFO bands guarded by a single lock, plus a closed flag. Chosen
/// over a bespoke lock-free intrusive list to stay on the existing
/// `parking_lot` dependency ; producer-side contention is expected to
/// be low relative to the cost of a hand-rolled lock-free queue's added
/// complexity.
#[derive(Debug, Default)]
pub(crate) struct MailboxCore {
    normal: Mutex<VecDeque<Envelope>>,
    high_priority: Mutex<VecDeque<Envelope>>,
    closed: AtomicBool,
}

impl MailboxCore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Enqueue `envelope` in the band matching its priority. Returns the
    /// envelope back to the caller if the mailbox is already closed.
    pub(crate) fn push_back(&self, envelope: Envelope) -> Result<(), Envelope> {
        if self.closed.load(Ordering::Acquire) {
            return Err(envelope);
        }
        let band = match envelope.priority {
            MessagePriority::High => &self.high_priority,
            MessagePriority::Normal => &self.normal,
        };
        band.lock().push_back(envelope);
        Ok(())
    }

    /// Dequeue the next envelope, draining the high-priority band first.
    pub(crate) fn try_pop(&self) -> Option<Envelope> {
        if let Some(envelope) = self.high_priority.lock().pop_front() {
            return Some(envelope);
        }
        self.normal.lock().pop_front()
    }

    /// `true` iff both bands are empty.
    pub(crate) fn is_empty(&self) -> bool {
        self.high_priority.lock().is_empty() && self.normal.lock().is_empty()
    }

    /// Mark the mailbox terminal. Idempotent.
    pub(crate) fn mark_closed(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
