//! `ActorCellHandle`: the object-safe, cross-actor-visible surface of a
//! running actor, and `ActorCell<A>`: the concrete, generic owner of an
//! actor's private state.
//!
//! The split exists because the runtime is heterogeneous — many different
//! concrete `Actor` types must be addressable through one `ActorHandle` —
//! while each actor's own dispatch loop stays fully monomorphized over its
//! concrete type, with no dynamic dispatch on the hot path.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;

// Layer 3: Internal module imports
use super::context::{ActorContext, ContextAction};
use super::traits::Actor;
use crate::behavior::{BehaviorStack, ClauseOutcome};
use crate::linking::{self, ExitReason, LinkSet, MonitorSet, SystemSignal};
use crate::mailbox::{BlockingMailbox, CooperativeMailbox, MailboxError, MessageCache};
use crate::message::Envelope;
use crate::pattern::MatchCache;
use crate::timer::TimerService;
use crate::util::{ActorHandle, ActorId, MessageIdGenerator};

/// The object-safe surface every actor exposes to peers, regardless of its
/// concrete `Actor` type or execution model. `ActorHandle` wraps
/// `Arc<dyn ActorCellHandle>`.
pub trait ActorCellHandle: Send + Sync {
    /// The actor's identity.
    fn id(&self) -> ActorId;

    /// Producer-side mailbox enqueue.
    fn enqueue(&self, envelope: Envelope) -> Result<(), MailboxError>;

    /// This actor's link set.
    fn link_set(&self) -> &LinkSet;

    /// This actor's monitor set.
    fn monitor_set(&self) -> &MonitorSet;

    /// The actor's finalized exit reason, once termination has completed.
    fn exit_reason(&self) -> Option<ExitReason>;

    /// Whether this actor currently traps exits.
    fn traps_exit(&self) -> bool;

    /// Request termination with `reason`. Idempotent: only the first call
    /// takes effect.
    fn request_quit(&self, reason: ExitReason);
}

/// The mailbox flavor backing one actor, chosen at spawn time.
pub(crate) enum MailboxKind {
    Cooperative(CooperativeMailbox),
    Blocking(BlockingMailbox),
}

impl MailboxKind {
    pub(crate) fn enqueue(&self, envelope: Envelope) -> Result<(), MailboxError> {
        match self {
            MailboxKind::Cooperative(mailbox) => mailbox.push_back(envelope),
            MailboxKind::Blocking(mailbox) => mailbox.push_back(envelope),
        }
    }

    pub(crate) fn mark_consumer_done(&self) {
        match self {
            MailboxKind::Cooperative(mailbox) => mailbox.mark_consumer_done(),
            MailboxKind::Blocking(mailbox) => mailbox.mark_consumer_done(),
        }
    }
}

/// The cross-actor-visible half of an actor's state: identity, mailbox,
/// link/monitor sets, trap-exit flag, and planned exit reason. Shared via
/// `Arc` between the owning dispatch loop and every `ActorHandle` pointing
/// at this actor.
pub struct ActorCellShared {
    id: ActorId,
    mailbox: MailboxKind,
    link_set: LinkSet,
    monitor_set: MonitorSet,
    exit_reason: Mutex<Option<ExitReason>>,
    traps_exit: AtomicBool,
    id_gen: MessageIdGenerator,
}

impl ActorCellShared {
    pub(crate) fn new(id: ActorId, mailbox: MailboxKind) -> Self {
        Self {
            id,
            mailbox,
            link_set: LinkSet::new(),
            monitor_set: MonitorSet::new(),
            exit_reason: Mutex::new(None),
            traps_exit: AtomicBool::new(false),
            id_gen: MessageIdGenerator::new(),
        }
    }

    pub(crate) fn mailbox(&self) -> &MailboxKind {
        &self.mailbox
    }

    pub(crate) fn id_gen(&self) -> &MessageIdGenerator {
        &self.id_gen
    }

    pub(crate) fn set_traps_exit(&self, value: bool) {
        self.traps_exit.store(value, Ordering::Relaxed);
    }
}

impl ActorCellHandle for ActorCellShared {
    fn id(&self) -> ActorId {
        self.id
    }

    fn enqueue(&self, envelope: Envelope) -> Result<(), MailboxError> {
        self.mailbox.enqueue(envelope)
    }

    fn link_set(&self) -> &LinkSet {
        &self.link_set
    }

    fn monitor_set(&self) -> &MonitorSet {
        &self.monitor_set
    }

    fn exit_reason(&self) -> Option<ExitReason> {
        *self.exit_reason.lock()
    }

    fn traps_exit(&self) -> bool {
        self.traps_exit.load(Ordering::Relaxed)
    }

    fn request_quit(&self, reason: ExitReason) {
        let mut guard = self.exit_reason.lock();
        if guard.is_none() {
            *guard = Some(reason);
            drop(guard);
            // Wake a consumer parked in `recv()`/`block_until_nonempty` with
            // nothing queued — otherwise an idle actor (e.g. one terminated
            // by a non-trapping peer's exit propagation, with no envelope
            // ever delivered) would never re-check `finalize_if_needed()`.
            self.mailbox.mark_consumer_done();
        }
    }
}

/// The owner of one actor's private, consumer-only state: the concrete
/// actor value, its behavior stack, the dispatch-cache, the mailbox cache,
/// and its pending-response set. Driven directly by the
/// scheduler; never type-erased.
pub struct ActorCell<A: Actor> {
    pub(crate) shared: Arc<ActorCellShared>,
    pub(crate) handle: ActorHandle,
    pub(crate) actor: A,
    pub(crate) stack: BehaviorStack<A, ActorContext<A>>,
    pub(crate) cache: MessageCache,
    pub(crate) match_cache: MatchCache,
    pub(crate) ctx: ActorContext<A>,
    terminated: bool,
}

impl<A: Actor> ActorCell<A> {
    /// Build the cell and run the actor's implicit `init` invocation. `init` needs a
    /// live `ActorContext` to link/monitor/quit from, and its return value
    /// seeds the behavior stack, so the context is constructed first and
    /// `init` is run before `Self` exists; any action it queues (e.g.
    /// `become`, unlikely but not disallowed) is applied immediately after.
    pub(crate) fn new(
        shared: Arc<ActorCellShared>,
        handle: ActorHandle,
        mut actor: A,
        timers: TimerService,
    ) -> Self {
        let mut ctx = ActorContext::new(Arc::clone(&shared), handle.clone(), timers);
        let initial = actor.init(&mut ctx);
        let mut cell = Self {
            shared,
            handle,
            actor,
            stack: BehaviorStack::new(initial),
            cache: MessageCache::new(),
            match_cache: MatchCache::new(),
            ctx,
            terminated: false,
        };
        cell.apply_pending_action();
        cell
    }

    /// The actor's public handle.
    pub fn handle(&self) -> &ActorHandle {
        &self.handle
    }

    /// Dispatch one envelope against the current behavior. Messages that don't match are set aside in the mailbox
    /// cache ; messages that arrive while the top
    /// frame is a `become_waiting_for` frame awaiting a different
    /// correlation id are cached unconditionally.
    /// Returns `false` if the envelope was dropped because the actor had
    /// already finalized its exit reason.
    pub(crate) fn process(&mut self, envelope: Envelope) -> bool {
        if self.shared.exit_reason().is_some() {
            return false;
        }

        // A response, sync-timeout, or sync-failure signal whose counter
        // is no longer in our own pending set is stale (the request was
        // already resolved or cancelled); drop it silently rather than
        // caching it forever.
        if let Some(counter) = own_request_counter(&envelope) {
            if !self.ctx.is_pending_counter(counter) {
                return true;
            }
        }

        // A response's `MessageId` carries the same counter as the request
        // it answers, but with the response flag set instead of the
        // request flag, so the two never compare equal as raw `MessageId`s
        // — compare on `counter` instead.
        let waiting_id = self.stack.waiting_for();
        if let Some(waiting_id) = waiting_id {
            if envelope.correlation_id().counter() != waiting_id.counter() {
                self.cache.push(envelope);
                return true;
            }
        }

        self.ctx.set_inbound(&envelope);

        let patterns: Vec<_> = self
            .stack
            .current()
            .clauses()
            .iter()
            .map(|clause| clause.pattern().clone())
            .collect();

        let actor = &mut self.actor;
        let ctx = &mut self.ctx;
        let stack = &self.stack;
        let match_cache = &self.match_cache;
        let payload = &envelope.payload;

        let dispatch_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            match payload.type_token() {
                Some(token) => {
                    let candidates = match_cache.candidates(token, &patterns).to_vec();
                    let mut handled = false;
                    for idx in candidates {
                        let clause = &stack.current().clauses()[idx];
                        if let ClauseOutcome::Handled = clause.try_dispatch(actor, ctx, payload) {
                            handled = true;
                            break;
                        }
                    }
                    if handled {
                        ClauseOutcome::Handled
                    } else {
                        ClauseOutcome::Unhandled
                    }
                }
                None => {
                    let behavior = stack.current().clone();
                    behavior.dispatch(actor, ctx, payload)
                }
            }
        }));

        let outcome = match dispatch_result {
            Ok(outcome) => outcome,
            Err(_) => {
                // A panicking handler leaves the actor's own state possibly
                // torn, so we don't attempt to keep running it; finalize as
                // an abnormal exit instead.
                self.shared.request_quit(ExitReason::UNHANDLED_EXCEPTION);
                return true;
            }
        };

        match outcome {
            ClauseOutcome::Handled => {
                if let Some(waiting_id) = waiting_id {
                    self.stack.pop();
                    self.ctx.complete_pending(waiting_id);
                }
                self.apply_pending_action();
                true
            }
            ClauseOutcome::Unhandled => {
                // A sync-timeout/sync-failure signal that no clause in the
                // response-waiting behavior handled means the actor
                // installed no sync-failure callback of its own; the
                // runtime resolves it by terminating with the matching
                // reserved reason.
                if let Some(waiting_id) = waiting_id {
                    if let Some(reason) = unhandled_sync_reason(&envelope) {
                        self.stack.pop();
                        self.ctx.complete_pending(waiting_id);
                        self.shared.request_quit(reason);
                        return true;
                    }
                }
                self.cache.push(envelope);
                true
            }
        }
    }

    fn apply_pending_action(&mut self) {
        match self.ctx.take_action() {
            Some(ContextAction::Become(behavior, policy)) => {
                match policy {
                    crate::behavior::BecomePolicy::Keep => self.stack.push(behavior),
                    crate::behavior::BecomePolicy::Discard => self.stack.replace_top(behavior),
                }
                self.match_cache.invalidate();
                self.drain_cache();
            }
            Some(ContextAction::BecomeWaitingFor(id, behavior)) => {
                self.stack.push_waiting_for(id, behavior);
                self.match_cache.invalidate();
                self.drain_cache();
            }
            Some(ContextAction::Unbecome) => {
                self.stack.pop();
                self.match_cache.invalidate();
                self.drain_cache();
            }
            None => {}
        }
    }

    /// Re-offer every cached envelope to the now-current behavior, oldest
    /// first, before any fresh mailbox envelope is taken.
    fn drain_cache(&mut self) {
        for envelope in self.cache.drain() {
            self.process(envelope);
        }
    }

    /// The current behavior's timeout duration, if it has one armed
    ///. The scheduler consults this to bound its receive
    /// call; there is no separate timer-queue entry for behavior
    /// timeouts, since they are meaningful only to this actor's own
    /// receive loop.
    pub(crate) fn current_timeout_duration(&self) -> Option<std::time::Duration> {
        self.stack.current().timeout().map(|t| t.duration())
    }

    /// Fire the current behavior's timeout clause, then apply whatever
    /// deferred `become`/`unbecome` it requested. A panicking
    /// timeout handler is treated the same as a panicking message handler.
    pub(crate) fn fire_timeout(&mut self) {
        let behavior = self.stack.current().clone();
        let Some(timeout) = behavior.timeout() else {
            return;
        };
        let actor = &mut self.actor;
        let ctx = &mut self.ctx;
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            timeout.fire(actor, ctx);
        }));
        match result {
            Ok(()) => self.apply_pending_action(),
            Err(_) => self.shared.request_quit(ExitReason::UNHANDLED_EXCEPTION),
        }
    }

    /// If the actor's planned exit reason has just been finalized, mark
    /// its mailbox terminal and run the link/monitor fan-out exactly once
    ///. Returns `true` the first time this observes a finalized
    /// reason.
    pub(crate) fn finalize_if_needed(&mut self) -> bool {
        if self.terminated {
            return false;
        }
        if let Some(reason) = self.shared.exit_reason() {
            self.shared.mailbox().mark_consumer_done();
            linking::propagate_termination(&self.handle, reason);
            self.terminated = true;
            true
        } else {
            false
        }
    }

    /// `true` once this actor has finalized termination.
    pub(crate) fn is_terminated(&self) -> bool {
        self.terminated
    }
}

/// The pending-set counter this envelope answers or reports on, if any: a
/// real response carries it in its correlation id, while a `SyncTimeout`/
/// `SyncFailure` signal carries the original request id in its payload
/// (its own correlation id is just a copy of that request id).
fn own_request_counter(envelope: &Envelope) -> Option<u64> {
    if envelope.correlation_id().is_response() {
        return Some(envelope.correlation_id().counter());
    }
    match envelope.payload.get::<SystemSignal>(0) {
        Some(SystemSignal::SyncTimeout { request_id }) | Some(SystemSignal::SyncFailure { request_id }) => {
            Some(request_id.counter())
        }
        _ => None,
    }
}

/// The reserved exit reason to terminate with when `envelope` is a
/// sync-timeout or sync-failure signal that no clause claimed.
fn unhandled_sync_reason(envelope: &Envelope) -> Option<ExitReason> {
    match envelope.payload.get::<SystemSignal>(0) {
        Some(SystemSignal::SyncTimeout {.. }) => Some(ExitReason::UNHANDLED_SYNC_TIMEOUT),
        Some(SystemSignal::SyncFailure {.. }) => Some(ExitReason::UNHANDLED_SYNC_FAILURE),
        _ => None,
    }
}
