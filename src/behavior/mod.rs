//! Behaviors and the behavior stack: an actor's current set of
//! pattern-guarded clauses, replaceable via `become`/`unbecome`.

#[allow(clippy::module_inception)]
pub mod behavior;
pub mod clause;
pub mod context;
pub mod stack;

pub use behavior::{Behavior, BehaviorBuilder};
pub use clause::{Clause, ClauseOutcome, TimeoutClause};
pub use context::{ActorContext, BecomePolicy};
pub use stack::BehaviorStack;
