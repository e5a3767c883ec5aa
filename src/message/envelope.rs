//! `Envelope`: the queueable mailbox node.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};

// Layer 3: Internal module imports
use super::traits::MessagePriority;
use crate::payload::Tuple;
use crate::util::{ActorHandle, MessageId};

/// A node carrying a sender handle, a correlation id, a payload tuple, and
/// a priority band. Envelopes do not expose their mailbox
/// linkage fields directly — those are managed internally by
/// `crate::mailbox()`.
#[derive(Clone)]
pub struct Envelope {
    /// The sender, if the message was sent by another actor rather than
    /// injected by the runtime (e.g. a timer tick).
    pub sender: Option<ActorHandle>,

    /// The request/response correlation id. `MessageId::NONE` for ordinary
    /// asynchronous sends.
    pub correlation_id: MessageId,

    /// The message payload.
    pub payload: Tuple,

    /// Mailbox priority band.
    pub priority: MessagePriority,

    /// Creation timestamp, for TTL checks and observability.
    pub timestamp: DateTime<Utc>,
}

impl Envelope {
    /// Construct a new, unaddressed envelope around `payload`.
    pub fn new(payload: Tuple) -> Self {
        Self {
            sender: None,
            correlation_id: MessageId::NONE,
            payload,
            priority: MessagePriority::Normal,
            timestamp: Utc::now(),
        }
    }

    /// Builder: attach a sender.
    pub fn with_sender(mut self, sender: ActorHandle) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Builder: attach a correlation id.
    pub fn with_correlation_id(mut self, id: MessageId) -> Self {
        self.correlation_id = id;
        self
    }

    /// Builder: set the priority band.
    pub fn with_priority(mut self, priority: MessagePriority) -> Self {
        self.priority = priority;
        self
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("sender", &self.sender)
            .field("correlation_id", &self.correlation_id)
            .field("payload", &self.payload)
            .field("priority", &self.priority)
            .finish()
    }
}
