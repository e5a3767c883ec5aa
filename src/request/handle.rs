//! `RequestHandle`: the fluent continuation API returned by
//! `ActorContext::request()`.

// Layer 1: Standard library imports
use std::marker::PhantomData;
use std::time::Duration;

// Layer 3: Internal module imports
use crate::actor::{Actor, ActorContext};
use crate::behavior::{Behavior, BehaviorBuilder};
use crate::linking::SystemSignal;
use crate::pattern::{Mapping, Pattern};
use crate::payload::Tuple;
use crate::timer::TimerService;
use crate::util::{ActorHandle, MessageId};

/// A live, outstanding request, identified by the `MessageId` that
/// correlates its eventual response.
///
/// Returned by `ActorContext::request()`; consumed by exactly one of
/// `.then()`, `.await_response()`, or `.continue_with()` to install the
/// behavior that handles the response (or its sync-timeout/sync-failure).
#[must_use = "a RequestHandle does nothing until `.then()`, `.await_response()`, or `.continue_with()` installs a response behavior"]
pub struct RequestHandle<A> {
    id: MessageId,
    _actor: PhantomData<fn(&mut A)>,
}

impl<A: Actor> RequestHandle<A> {
    pub(crate) fn new(id: MessageId) -> Self {
        Self {
            id,
            _actor: PhantomData,
        }
    }

    /// The correlation id this handle tracks.
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Push `behavior` as a response-waiting frame keyed by this request's
    /// id: every envelope whose correlation id differs is cached until the
    /// response (or a sync-timeout/sync-failure signal carrying the same
    /// id) arrives.
    pub fn then(self, ctx: &mut ActorContext<A>, behavior: Behavior<A, ActorContext<A>>) {
        ctx.become_waiting_for(self.id, behavior);
    }

    /// Cooperative and blocking actors both express "wait right here for
    /// the response" the same way: as a `become_waiting_for` frame. The
    /// scheduler is what differs (a cooperative actor yields control while
    /// the frame is on top; a blocking actor's thread parks on its mailbox
    /// condvar), not the behavior-stack mechanics, so `.await_response()`
    /// is `.then()` under a name that reads naturally at the call site
    /// (`await` itself is a reserved keyword).
    pub fn await_response(self, ctx: &mut ActorContext<A>, behavior: Behavior<A, ActorContext<A>>) {
        self.then(ctx, behavior)
    }

    /// Install a response-waiting behavior that computes a result from the
    /// match via `on_response`, then immediately pipes that result through
    /// `post` in the same dispatch, before the frame pops.
    ///
    /// This is `.then()` with the handler split into two steps rather than
    /// one: `on_response` extracts a result tuple from the matched
    /// response, and `post` consumes it, typically to reply to the
    /// request's own caller or to fold the result into actor state. It does
    /// not chain onto whatever response-waiting frame was already on top of
    /// the stack before this request was issued — that frame, if any,
    /// simply resumes once this one pops, the same as after `.then()`.
    pub fn continue_with<R, P>(
        self,
        ctx: &mut ActorContext<A>,
        response_pattern: Pattern,
        on_response: R,
        post: P,
    ) where
        A: Actor,
        R: Fn(&mut A, &mut ActorContext<A>, &Tuple, &Mapping) -> Tuple + Send + Sync + 'static,
        P: Fn(&mut A, &mut ActorContext<A>, Tuple) + Send + Sync + 'static,
    {
        let behavior = BehaviorBuilder::new()
            .on(response_pattern, move |actor, ctx, payload, mapping| {
                let result = on_response(actor, ctx, payload, mapping);
                post(actor, ctx, result);
            })
            .build();
        ctx.become_waiting_for(self.id, behavior);
    }
}

/// Send `payload` to `dest` and arm a sync-timeout deadline alongside it.
///
/// If no response arrives within `duration`, `timers` delivers a
/// `SystemSignal::SyncTimeout` envelope carrying this request's id,
/// addressed back to the requester, so the ordinary response-waiting
/// behavior installed via the returned handle can match on it the same way
/// it matches the real response.
pub fn timed_request<A: Actor>(
    ctx: &mut ActorContext<A>,
    timers: &TimerService,
    dest: &ActorHandle,
    duration: Duration,
    payload: Tuple,
) -> RequestHandle<A> {
    let id = ctx.send_request(dest, payload);
    let timeout_envelope = crate::message::Envelope::new(SystemSignal::SyncTimeout { request_id: id }.into_tuple())
        .with_correlation_id(id);
    timers.schedule(duration, ctx.self_handle_owned(), timeout_envelope);
    RequestHandle::new(id)
}
