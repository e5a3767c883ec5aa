//! The `Actor` trait: user-supplied actor state plus its initial behavior.

// Layer 3: Internal module imports
use super::context::ActorContext;
use crate::behavior::Behavior;

/// A unit of computation addressed by an `ActorHandle` and driven
/// exclusively by the scheduler. `init` runs once, at spawn time, and
/// returns the behavior that handles every subsequent message until
/// replaced via `become`.
pub trait Actor: Sized + Send + 'static {
    /// Run the actor's implicit `init` invocation, returning the behavior
    /// that becomes current immediately after.
    fn init(&mut self, ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>>;
}
