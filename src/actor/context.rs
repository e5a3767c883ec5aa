//! `ActorContext<A>`: the concrete, per-actor implementation of
//! `behavior::ActorContext`.

// Layer 1: Standard library imports
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

// Layer 3: Internal module imports
use super::cell::{ActorCellHandle, ActorCellShared};
use super::traits::Actor;
use crate::behavior::{self, BecomePolicy, Behavior};
use crate::linking::{self, ExitReason, SystemSignal};
use crate::message::Envelope;
use crate::payload::Tuple;
use crate::request::RequestHandle;
use crate::timer::TimerService;
use crate::util::{ActorHandle, MessageId};

/// A deferred behavior-stack mutation requested by a handler. Deferred
/// rather than applied in place because `become`/`unbecome` must take
/// effect only after the handler that requested them returns, and because
/// `ActorContext` itself has no direct access to the stack it lives
/// alongside inside `ActorCell`.
pub(crate) enum ContextAction<A> {
    Become(Behavior<A, ActorContext<A>>, BecomePolicy),
    BecomeWaitingFor(MessageId, Behavior<A, ActorContext<A>>),
    Unbecome,
}

/// The handler-facing view of one actor's addressable, mutable state:
/// identity, the currently processed message's sender/correlation id, the
/// pending-response set, and a slot for a single deferred behavior-stack
/// action.
///
/// Persists for the actor's whole lifetime inside its `ActorCell`, rather
/// than being rebuilt per dispatch, so the pending-response set survives
/// across messages.
pub struct ActorContext<A> {
    shared: Arc<ActorCellShared>,
    self_handle: ActorHandle,
    timers: TimerService,
    sender: Option<ActorHandle>,
    correlation_id: MessageId,
    current_message: Option<Tuple>,
    /// Counter portion of every outstanding request id this actor is still
    /// awaiting a response for. Keyed by
    /// counter rather than the raw `MessageId` because a request id and
    /// its eventual response id differ in their flag bits but share the
    /// same counter value.
    pending: HashSet<u64>,
    action: Option<ContextAction<A>>,
}

impl<A> ActorContext<A> {
    pub(crate) fn new(
        shared: Arc<ActorCellShared>,
        self_handle: ActorHandle,
        timers: TimerService,
    ) -> Self {
        Self {
            shared,
            self_handle,
            timers,
            sender: None,
            correlation_id: MessageId::NONE,
            current_message: None,
            pending: HashSet::new(),
            action: None,
        }
    }

    /// Point the context at a freshly dequeued envelope, ahead of
    /// dispatching its payload.
    pub(crate) fn set_inbound(&mut self, envelope: &Envelope) {
        self.sender = envelope.sender().clone();
        self.correlation_id = envelope.correlation_id();
        self.current_message = Some(envelope.payload.clone());
    }

    /// Take the deferred action queued by the most recent handler call,
    /// if any, clearing the slot.
    pub(crate) fn take_action(&mut self) -> Option<ContextAction<A>> {
        self.action.take()
    }

    /// The payload currently being dispatched.
    pub fn current_message(&self) -> Option<&Tuple> {
        self.current_message.as_ref()
    }

    /// The correlation id of the message currently being dispatched.
    pub fn correlation_id(&self) -> MessageId {
        self.correlation_id
    }

    /// `true` iff `id` is still awaiting a response.
    /// Compares on `id.counter()`, since a response carries the same
    /// counter as its request with a different flag bit set.
    pub fn is_pending(&self, id: MessageId) -> bool {
        self.pending.contains(&id.counter())
    }

    /// Remove `id` from the pending set. Called once the response is
    /// dispatched, or when sync-timeout/sync-failure fires for it.
    pub fn complete_pending(&mut self, id: MessageId) -> bool {
        self.pending.remove(&id.counter())
    }

    /// Crate-internal counter-keyed lookup, used by `ActorCell::process()`
    /// to recognize and drop a stale or already-resolved response/signal
    /// before it ever reaches the dispatcher.
    pub(crate) fn is_pending_counter(&self, counter: u64) -> bool {
        self.pending.contains(&counter)
    }

    /// Send `payload` to `dest`, allocating a fresh request id and adding
    /// it to the pending set. Returns the raw id;
    /// `request`/`timed_request` wrap this for the public, fluent
    /// `RequestHandle` API. If `dest`'s mailbox is already closed, a
    /// synthetic sync-failure signal is delivered back to this actor
    /// immediately instead of silently dropping the request.
    pub(crate) fn send_request(&mut self, dest: &ActorHandle, payload: Tuple) -> MessageId {
        let id = self.shared.id_gen().next_request();
        self.pending.insert(id.counter());
        let envelope = Envelope::new(payload)
            .with_sender(self.self_handle.clone())
            .with_correlation_id(id);
        if dest.cell().enqueue(envelope).is_err() {
            self.deliver_sync_failure(id);
        }
        id
    }

    /// Synthesize a `SyncFailure` signal addressed back to ourselves,
    /// riding the ordinary mailbox so it is matched by the response-waiting
    /// behavior the same way a real response would be.
    fn deliver_sync_failure(&self, id: MessageId) {
        let envelope = Envelope::new(SystemSignal::SyncFailure { request_id: id }.into_tuple())
            .with_correlation_id(id);
        let _ = self.self_handle.cell().enqueue(envelope);
    }

    /// Send `payload` to `dest` and return a `RequestHandle` for composing
    /// the response behavior via `.then()`, `.await_response()`, or
    /// `.continue_with()`.
    pub fn request(&mut self, dest: &ActorHandle, payload: Tuple) -> RequestHandle<A>
    where
        A: Actor,
    {
        let id = self.send_request(dest, payload);
        RequestHandle::new(id)
    }

    /// Like `request`, but additionally arms a sync-timeout deadline: if no
    /// response arrives within `duration`, a synthetic `SYNC_TIMEOUT`
    /// envelope correlated to this request's id is delivered instead.
    pub fn timed_request(
        &mut self,
        dest: &ActorHandle,
        duration: Duration,
        payload: Tuple,
    ) -> RequestHandle<A>
    where
        A: Actor,
    {
        let timers = self.timers.clone();
        crate::request::timed_request(self, &timers, dest, duration, payload)
    }

    /// Queue a `become_waiting_for` action: the pushed behavior is only
    /// consulted while `id` remains unanswered.
    pub fn become_waiting_for(&mut self, id: MessageId, behavior: Behavior<A, Self>) {
        self.action = Some(ContextAction::BecomeWaitingFor(id, behavior));
    }

    /// An owned clone of this actor's own handle, for code that needs to
    /// hand it to something outliving the dispatch call (e.g. arming a
    /// timer against `self`).
    pub fn self_handle_owned(&self) -> ActorHandle {
        self.self_handle.clone()
    }

    /// Send a reply to `sender`, correlated to the inbound message's
    /// `MessageId` if it was a request. Also reachable generically
    /// through the `behavior::ActorContext` trait; exposed inherently here
    /// so ordinary call sites need no trait import.
    pub fn reply(&mut self, payload: Tuple) {
        let Some(sender) = self.sender.clone() else {
            return;
        };
        let correlation_id = if self.correlation_id.is_request() {
            self.correlation_id.into_response()
        } else {
            MessageId::NONE
        };
        let envelope = Envelope::new(payload)
            .with_sender(self.self_handle.clone())
            .with_correlation_id(correlation_id);
        let _ = sender.cell().enqueue(envelope);
    }

    /// Install `behavior` as the current behavior. `BecomePolicy::Discard`
    /// replaces the current top-of-stack frame; `BecomePolicy::Keep` pushes
    /// `behavior` as a new frame, leaving the replaced one in place for a
    /// later `unbecome` to restore.
    pub fn become_behavior(&mut self, behavior: Behavior<A, Self>, policy: BecomePolicy) {
        self.action = Some(ContextAction::Become(behavior, policy));
    }

    /// Pop the top of the behavior stack.
    pub fn unbecome(&mut self) {
        self.action = Some(ContextAction::Unbecome);
    }

    /// Establish a bidirectional link with `other`.
    pub fn link(&mut self, other: ActorHandle) {
        linking::link(&self.self_handle, &other);
    }

    /// Establish a one-way monitor of `other`.
    pub fn monitor(&mut self, other: ActorHandle) {
        linking::monitor(&self.self_handle, &other);
    }

    /// Set whether this actor traps exits from its linked peers.
    pub fn trap_exit(&mut self, enabled: bool) {
        self.shared.set_traps_exit(enabled);
    }

    /// Remove a previously established link.
    pub fn unlink(&mut self, other: &ActorHandle) {
        linking::unlink(&self.self_handle, other);
    }

    /// Remove a previously established monitor.
    pub fn demonitor(&mut self, other: &ActorHandle) {
        linking::demonitor(&self.self_handle, other);
    }

    /// Request termination with `reason`.
    pub fn quit(&mut self, reason: ExitReason) {
        self.shared.request_quit(reason);
    }
}

impl<A> behavior::ActorContext<A> for ActorContext<A> {
    fn self_handle(&self) -> &ActorHandle {
        &self.self_handle
    }

    fn sender(&self) -> Option<&ActorHandle> {
        self.sender.as_ref()
    }

    fn reply(&mut self, payload: Tuple) {
        ActorContext::reply(self, payload)
    }

    fn become_behavior(&mut self, behavior: Behavior<A, Self>, policy: BecomePolicy) {
        ActorContext::become_behavior(self, behavior, policy)
    }

    fn unbecome(&mut self) {
        ActorContext::unbecome(self)
    }

    fn link(&mut self, other: ActorHandle) {
        ActorContext::link(self, other)
    }

    fn monitor(&mut self, other: ActorHandle) {
        ActorContext::monitor(self, other)
    }

    fn trap_exit(&mut self, enabled: bool) {
        ActorContext::trap_exit(self, enabled)
    }

    fn unlink(&mut self, other: &ActorHandle) {
        ActorContext::unlink(self, other)
    }

    fn demonitor(&mut self, other: &ActorHandle) {
        ActorContext::demonitor(self, other)
    }

    fn quit(&mut self, reason: ExitReason) {
        ActorContext::quit(self, reason)
    }
}
