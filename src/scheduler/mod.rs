//! The scheduler: the fairness-quantum-batched dispatch loops that drive
//! an `ActorCell` to completion, one per execution model.

pub mod driver;
pub mod state;

pub use driver::{spawn_blocking, spawn_cooperative, OnTerminate, DEFAULT_QUANTUM};
pub use state::{ActorState, AtomicActorState};
