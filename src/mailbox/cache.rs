//! The consumer-only cache of envelopes that did not match the current
//! behavior.

// Layer 1: Standard library imports
use std::collections::VecDeque;

// Layer 3: Internal module imports
use crate::message::Envelope;

/// Envelopes set aside because no clause of the behavior active when they
/// were dispatched matched them. Touched only by the owning actor's
/// consumer path, so it needs no synchronization.
#[derive(Debug, Default)]
pub struct MessageCache {
    entries: VecDeque<Envelope>,
}

impl MessageCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an envelope aside, preserving arrival order.
    pub fn push(&mut self, envelope: Envelope) {
        self.entries.push_back(envelope);
    }

    /// Remove and return every cached envelope, oldest first, so the
    /// caller can re-offer them to a new behavior before taking fresh
    /// mailbox envelopes.
    pub fn drain(&mut self) -> VecDeque<Envelope> {
        std::mem::take(&mut self.entries)
    }

    /// Number of cached envelopes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` iff the cache holds no envelopes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
