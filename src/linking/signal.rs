//! System envelopes: `EXIT`, `DOWN`, and the synthetic `SYNC_TIMEOUT`,
//! wire-visible even in-process.

// Layer 3: Internal module imports
use super::reason::ExitReason;
use crate::payload::Tuple;
use crate::util::{ActorHandle, MessageId};

/// A runtime-synthesized signal, delivered through the ordinary mailbox
/// like any user message so it can be matched by a behavior clause
/// (`Slot::typed::<SystemSignal>()`).
#[derive(Debug, Clone)]
pub enum SystemSignal {
    /// Delivered to a trapping link peer when the other side of the link
    /// terminates.
    Exit {
        /// The actor that terminated.
        from: ActorHandle,
        /// Its exit reason.
        reason: ExitReason,
    },
    /// Delivered once per `monitor` call when the monitored actor
    /// terminates.
    Down {
        /// The actor that terminated.
        from: ActorHandle,
        /// Its exit reason.
        reason: ExitReason,
    },
    /// Delivered when a `timed_request`'s deadline elapses before a
    /// response arrives.
    SyncTimeout {
        /// The correlation id of the request that timed out.
        request_id: MessageId,
    },
    /// Delivered in place of a response when a request's destination
    /// mailbox was already closed at send time.
    SyncFailure {
        /// The correlation id of the request that failed.
        request_id: MessageId,
    },
}

impl SystemSignal {
    /// Wrap this signal as a one-element dynamic payload, ready to enqueue
    /// on the target's mailbox.
    pub fn into_tuple(self) -> Tuple {
        Tuple::from_dynamic(vec![crate::payload::TupleElement::new(self)])
    }
}
