//! `RuntimeEvent`: the kernel lifecycle events a `Monitor` observes.
//!
//! A flat set of events this kernel actually raises: no restarts or
//! strategies, since there is no supervision tree, only
//! spawn/exit/link/monitor/cache/timeout.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};

// Layer 3: Internal module imports
use crate::linking::ExitReason;
use crate::util::ActorId;

/// One observable occurrence in an actor's lifecycle.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// An actor completed its `init` invocation and began receiving
    /// messages.
    Spawned {
        actor: ActorId,
        name: Option<String>,
    },
    /// An actor finalized termination.
    Terminated { actor: ActorId, reason: ExitReason },
    /// Two actors became linked.
    Linked { a: ActorId, b: ActorId },
    /// An actor registered as a monitor of another.
    Monitored { observer: ActorId, target: ActorId },
    /// An envelope did not match the current behavior and was set aside
    /// in the mailbox cache.
    CacheMiss { actor: ActorId },
    /// A behavior's `with_timeout` clause fired.
    BehaviorTimeout { actor: ActorId, after: Duration },
}

impl RuntimeEvent {
    /// A stable, lowercase event-type tag, useful for filtering in
    /// `tracing` subscribers or an `InMemoryMonitor` query.
    pub fn kind(&self) -> &'static str {
        match self {
            RuntimeEvent::Spawned {.. } => "spawned",
            RuntimeEvent::Terminated {.. } => "terminated",
            RuntimeEvent::Linked {.. } => "linked",
            RuntimeEvent::Monitored {.. } => "monitored",
            RuntimeEvent::CacheMiss {.. } => "cache_miss",
            RuntimeEvent::BehaviorTimeout {.. } => "behavior_timeout",
        }
    }
}

/// A `RuntimeEvent` together with the wall-clock instant it was recorded,
/// as stored by `InMemoryMonitor`.
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub timestamp: DateTime<Utc>,
    pub event: RuntimeEvent,
}
