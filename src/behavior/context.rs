//! `ActorContext`: the abstract interface a clause handler uses to act on
//! its actor. Defined here rather than in `actor` so that
//! `Behavior`/`Clause` can be generic over it without depending upward on
//! the actor module; `actor::cell::ActorContext` is the concrete
//! implementation used in production.

// Layer 3: Internal module imports
use super::Behavior;
use crate::linking::ExitReason;
use crate::payload::Tuple;
use crate::util::ActorHandle;

/// Whether `become` replaces the current behavior-stack entry or stacks a
/// new one on top of it.
///
/// `Discard` drops the current top frame and installs `behavior` in its
/// place, leaving the stack depth unchanged; a later `unbecome` has nothing
/// to return to. `Keep` pushes `behavior` as a new frame, so a later
/// `unbecome` pops it and restores whatever was current before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BecomePolicy {
    Discard,
    Keep,
}

impl Default for BecomePolicy {
    /// `become(behavior)` with no policy given replaces the current
    /// behavior rather than stacking on top of it.
    fn default() -> Self {
        BecomePolicy::Discard
    }
}

/// The side-effecting operations a clause handler may perform while
/// processing one message.
///
/// Handlers receive `&mut dyn ActorContext<A>`-equivalent access through a
/// generic `Ctx: ActorContext<A>` type parameter rather than a trait
/// object, keeping the hot dispatch path monomorphized and free of
/// dynamic dispatch wherever the call site is statically known.
pub trait ActorContext<A> {
    /// The handle of the actor currently executing.
    fn self_handle(&self) -> &ActorHandle;

    /// The sender of the message currently being handled, if any.
    fn sender(&self) -> Option<&ActorHandle>;

    /// Send a reply to `sender`, correlated to the inbound message's
    /// `MessageId` if it was a request.
    fn reply(&mut self, payload: Tuple);

    /// Install `behavior` as the current behavior, either replacing the top
    /// of the behavior stack (`BecomePolicy::Discard`) or pushing it as a
    /// new frame above the current one (`BecomePolicy::Keep`).
    fn become_behavior(&mut self, behavior: Behavior<A, Self>, policy: BecomePolicy)
    where
        Self: Sized;

    /// Pop the top of the behavior stack, reverting to the previous one.
    /// A no-op at the bottom of the stack.
    fn unbecome(&mut self);

    /// Establish a bidirectional link with `other`.
    fn link(&mut self, other: ActorHandle);

    /// Establish a one-way monitor of `other`.
    fn monitor(&mut self, other: ActorHandle);

    /// Set whether this actor traps exits from its linked peers. When enabled, a linked peer's termination arrives
    /// as an ordinary `EXIT` envelope instead of terminating this actor.
    fn trap_exit(&mut self, enabled: bool);

    /// Remove a previously established link.
    fn unlink(&mut self, other: &ActorHandle);

    /// Remove a previously established monitor.
    fn demonitor(&mut self, other: &ActorHandle);

    /// Request termination with `reason`, propagating EXIT/DOWN to links
    /// and monitors once the current handler returns.
    fn quit(&mut self, reason: ExitReason);
}
