//! `CooperativeMailbox`: `Notify`-driven mailbox for event-based actors.

// Layer 2: Third-party crate imports
use tokio::sync::Notify;

// Layer 3: Internal module imports
use super::error::MailboxError;
use super::queue::MailboxCore;
use crate::message::Envelope;

/// A mailbox consumed by a tokio task. Producers never block; the
/// consumer awaits a `Notify` permit rather than parking an OS thread.
#[derive(Debug, Default)]
pub struct CooperativeMailbox {
    core: MailboxCore,
    notify: Notify,
}

impl CooperativeMailbox {
    /// An empty, open mailbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Producer-side enqueue.
    pub fn push_back(&self, envelope: Envelope) -> Result<(), MailboxError> {
        match self.core.push_back(envelope) {
            Ok(()) => {
                self.notify.notify_one();
                Ok(())
            }
            Err(_) => Err(MailboxError::Closed),
        }
    }

    /// Non-blocking consumer-side dequeue.
    pub fn try_pop(&self) -> Option<Envelope> {
        self.core.try_pop()
    }

    /// Suspend the current task until an envelope is available or the
    /// mailbox is closed. Racy-safe: rechecks emptiness after each wake
    /// rather than trusting a single notification.
    pub async fn recv(&self) -> Option<Envelope> {
        loop {
            if let Some(envelope) = self.core.try_pop() {
                return Some(envelope);
            }
            if self.core.is_closed() {
                return None;
            }
            self.notify.notified().await;
        }
    }

    /// `true` iff both priority bands are empty.
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// Mark the mailbox terminal and wake any waiter so it can observe
    /// the closed state.
    pub fn mark_consumer_done(&self) {
        self.core.mark_closed();
        self.notify.notify_waiters();
    }

    /// `true` once `mark_consumer_done` has been called.
    pub fn is_closed(&self) -> bool {
        self.core.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Tuple;

    #[tokio::test]
    async fn push_then_recv_roundtrips() {
        let mailbox = CooperativeMailbox::new();
        mailbox
            .push_back(Envelope::new(Tuple::from_static((1i32,))))
            .unwrap();
        let envelope = mailbox.recv().await.unwrap();
        assert_eq!(envelope.payload.get::<i32>(0), Some(&1));
    }

    #[tokio::test]
    async fn closed_mailbox_rejects_new_sends() {
        let mailbox = CooperativeMailbox::new();
        mailbox.mark_consumer_done();
        let err = mailbox.push_back(Envelope::new(Tuple::unit()));
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn recv_on_closed_empty_mailbox_returns_none() {
        let mailbox = CooperativeMailbox::new();
        mailbox.mark_consumer_done();
        assert!(mailbox.recv().await.is_none());
    }
}
