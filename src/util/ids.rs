//! Actor identity and message correlation identifiers.
//!
//! `MessageId` is a 64-bit correlation word rather than a UUID, since the
//! matcher and request engine need cheap flag tests (`is_request`,
//! `is_response`, `is_high_priority`) and a per-actor monotonic counter,
//! not global uniqueness.

// Layer 1: Standard library imports
use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for actors in the system.
///
/// # Example
/// ```rust
/// use rtactor::util::ActorId;
///
/// let id1 = ActorId::new();
/// let id2 = ActorId::new();
/// assert_ne!(id1, id2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Generate a new random `ActorId`.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cheaply copyable, opaque reference to a spawned actor.
///
/// Handles share the underlying actor registration by reference count
/// (`Arc`); cloning a handle is a refcount bump, never a deep copy.
/// Comparison and hashing are by identity (`ActorId`), not by content, so
/// two handles referring to the same actor always compare equal even if
/// obtained through different calls (named lookup vs. `spawn`'s return
/// value).
///
/// The actor's bookkeeping (mailbox sender, link set, monitor set, planned
/// exit reason) lives behind `inner`; `ActorHandle` itself carries no
/// mutable state; `crate::actor::cell::ActorCell` does.
#[derive(Clone)]
pub struct ActorHandle {
    id: ActorId,
    name: Option<Arc<str>>,
    inner: Arc<dyn crate::actor::cell::ActorCellHandle>,
}

impl ActorHandle {
    /// Construct a handle wrapping a live actor cell. Internal to the crate:
    /// user code never builds an `ActorHandle` directly, only receives one
    /// from `ActorSystem::spawn()*`.
    pub(crate) fn new(
        id: ActorId,
        name: Option<Arc<str>>,
        inner: Arc<dyn crate::actor::cell::ActorCellHandle>,
    ) -> Self {
        Self { id, name, inner }
    }

    /// The actor's identity.
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// The actor's registered name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn cell(&self) -> &Arc<dyn crate::actor::cell::ActorCellHandle> {
        &self.inner
    }
}

impl fmt::Debug for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "ActorHandle({name}@{})", self.id),
            None => write!(f, "ActorHandle({})", self.id),
        }
    }
}

impl Display for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}@{}", self.id),
            None => write!(f, "anonymous@{}", self.id),
        }
    }
}

impl PartialEq for ActorHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id()
    }
}
impl Eq for ActorHandle {}

impl std::hash::Hash for ActorHandle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// --- MessageId: the 64-bit correlation identifier -----------------------

const FLAG_IS_REQUEST: u64 = 1 << 63;
const FLAG_IS_RESPONSE: u64 = 1 << 62;
const FLAG_IS_HIGH_PRIORITY: u64 = 1 << 61;
const FLAGS_MASK: u64 = FLAG_IS_REQUEST | FLAG_IS_RESPONSE | FLAG_IS_HIGH_PRIORITY;
const COUNTER_MASK: u64 = !FLAGS_MASK;

/// The 64-bit request/response correlation identifier.
///
/// Three high bits carry `is_request`, `is_response`, and
/// `is_high_priority`; the remaining 61 bits hold a counter value drawn from
/// the sending actor's monotonic counter (`MessageIdGenerator`). The zero
/// value (`MessageId::NONE`) denotes an uncorrelated, asynchronous message.
///
/// A response to request `r` carries the same counter value as `r` with the
/// response bit set instead of the request bit — see
/// [`MessageId::into_response()`].
///
/// # Example
/// ```rust
/// use rtactor::util::MessageId;
///
/// let gen = rtactor::util::MessageIdGenerator::new();
/// let req = gen.next_request();
/// assert!(req.is_request());
/// let resp = req.into_response();
/// assert!(resp.is_response());
/// assert_eq!(req.counter(), resp.counter());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(u64);

impl MessageId {
    /// The uncorrelated / asynchronous sentinel.
    pub const NONE: MessageId = MessageId(0);

    /// Build a `MessageId` from its raw bit pattern. Primarily for tests and
    /// wire-format round-tripping.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw bit pattern.
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// `true` for a message awaiting exactly one response.
    pub const fn is_request(&self) -> bool {
        self.0 & FLAG_IS_REQUEST != 0
    }

    /// `true` for a message that answers an earlier request.
    pub const fn is_response(&self) -> bool {
        self.0 & FLAG_IS_RESPONSE != 0
    }

    /// `true` if this id was marked for high-priority delivery.
    pub const fn is_high_priority(&self) -> bool {
        self.0 & FLAG_IS_HIGH_PRIORITY != 0
    }

    /// The uncorrelated sentinel.
    pub const fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// The monotonic counter portion, with flag bits stripped.
    pub const fn counter(&self) -> u64 {
        self.0 & COUNTER_MASK
    }

    /// Returns a copy with the high-priority flag set.
    pub const fn with_high_priority(self) -> Self {
        Self(self.0 | FLAG_IS_HIGH_PRIORITY)
    }

    /// Turn a request id into the matching response id: same counter value,
    /// response bit set, request bit cleared.
    pub const fn into_response(self) -> Self {
        Self((self.0 & !FLAG_IS_REQUEST) | FLAG_IS_RESPONSE)
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::NONE
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mid:{:#x}", self.0)
    }
}

/// Per-actor monotonic generator for request `MessageId`s.
///
/// Invariant: at most one outstanding request may share a given
/// counter value for a given actor — enforced simply by never reusing a
/// counter value (wraparound at 2^61 is not handled; an actor issuing a
/// billion requests a second would take ~73 years to wrap).
#[derive(Debug, Default)]
pub struct MessageIdGenerator {
    counter: AtomicU64,
}

impl MessageIdGenerator {
    /// Create a fresh generator starting at counter value 1 (0 is reserved
    /// for `MessageId::NONE`).
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }

    fn next_counter(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK
    }

    /// Allocate the next request id (request bit set).
    pub fn next_request(&self) -> MessageId {
        MessageId(self.next_counter() | FLAG_IS_REQUEST)
    }

    /// Allocate the next id for a fire-and-forget (uncorrelated) send.
    pub fn next_async(&self) -> MessageId {
        MessageId::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_id_unique() {
        assert_ne!(ActorId::new(), ActorId::new());
    }

    #[test]
    fn message_id_none_is_zero() {
        assert_eq!(MessageId::NONE.raw(), 0);
        assert!(MessageId::NONE.is_none());
        assert!(!MessageId::NONE.is_request());
        assert!(!MessageId::NONE.is_response());
    }

    #[test]
    fn request_response_pairing_shares_counter() {
        let gen = MessageIdGenerator::new();
        let req = gen.next_request();
        assert!(req.is_request());
        assert!(!req.is_response());

        let resp = req.into_response();
        assert!(resp.is_response());
        assert!(!resp.is_request());
        assert_eq!(req.counter(), resp.counter());
        assert_ne!(req, resp);
    }

    #[test]
    fn generator_never_repeats_a_counter() {
        let gen = MessageIdGenerator::new();
        let a = gen.next_request();
        let b = gen.next_request();
        assert_ne!(a.counter(), b.counter());
    }

    #[test]
    fn high_priority_flag_round_trips() {
        let gen = MessageIdGenerator::new();
        let req = gen.next_request().with_high_priority();
        assert!(req.is_high_priority());
        assert!(req.is_request());
        let resp = req.into_response();
        assert!(resp.is_high_priority());
        assert!(resp.is_response());
    }
}
