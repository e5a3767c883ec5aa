//! `TimerService`: the single deadline-ordered queue driving sync-request
//! timeouts and delayed sends.
//!
//! Behavior timeouts are *not* routed
//! through this queue: they are purely local to the owning actor's own
//! receive loop, which already blocks with a deadline, so arming a second,
//! cross-thread timer for them would just add latency without changing
//! behavior. This service exists for deadlines that must be visible to a
//! different actor than the one sleeping on them: sync-request timeouts
//! (the requester is not the one computing the deadline) and delayed sends.

// Layer 1: Standard library imports
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use tokio::sync::Notify;

// Layer 3: Internal module imports
use super::entry::TimerEntry;
use crate::clock::Clock;
use crate::message::Envelope;
use crate::util::ActorHandle;

/// Owns the shared min-heap of armed deadlines and the background task that
/// pops and delivers them. Cheap to clone (an `Arc` inside); every
/// `ActorSystem` holds one instance and every actor context that needs to
/// arm a deadline is handed a clone.
#[derive(Clone)]
pub struct TimerService {
    inner: Arc<Inner>,
}

struct Inner {
    heap: Mutex<BinaryHeap<TimerEntry>>,
    notify: Notify,
    clock: Arc<dyn Clock>,
}

impl TimerService {
    /// Build a new, empty timer service against `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(Inner {
                heap: Mutex::new(BinaryHeap::new()),
                notify: Notify::new(),
                clock,
            }),
        }
    }

    /// Arm a deadline `duration` from now: once it elapses, `envelope` is
    /// enqueued on `target`'s mailbox.
    pub fn schedule(&self, duration: Duration, target: ActorHandle, envelope: Envelope) {
        let deadline = self.inner.clock.now() + duration;
        self.inner.heap.lock().push(TimerEntry {
            deadline,
            target,
            envelope,
        });
        self.inner.notify.notify_one();
    }

    /// Drive the queue until cancelled. Spawned once per `ActorSystem` as a
    /// background task; pops and delivers every entry whose deadline has
    /// passed, then sleeps until either the next deadline or a fresh
    /// `schedule` call wakes it.
    pub async fn run(&self) {
        loop {
            let wait = {
                let heap = self.inner.heap.lock();
                match heap.peek() {
                    None => None,
                    Some(entry) => {
                        let now = self.inner.clock.now();
                        Some(entry.deadline.saturating_duration_since(now))
                    }
                }
            };

            match wait {
                None => self.inner.notify.notified().await,
                Some(remaining) if remaining.is_zero() => self.deliver_due(),
                Some(remaining) => {
                    tokio::select! {
                        _ = tokio::time::sleep(remaining) => {}
                        _ = self.inner.notify.notified() => {}
                    }
                }
            }

            self.deliver_due();
        }
    }

    fn deliver_due(&self) {
        let now = self.inner.clock.now();
        loop {
            let due = {
                let mut heap = self.inner.heap.lock();
                match heap.peek() {
                    Some(entry) if entry.deadline <= now => heap.pop(),
                    _ => None,
                }
            };
            match due {
                Some(entry) => {
                    let _ = entry.target.cell().enqueue(entry.envelope);
                }
                None => break,
            }
        }
    }

    /// The number of deadlines still armed. Exposed for tests and
    /// monitoring hooks.
    pub fn pending_count(&self) -> usize {
        self.inner.heap.lock().len()
    }
}
