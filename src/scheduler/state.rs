//! `ActorState`: the coarse lifecycle state the scheduler drives an actor
//! through. Tracked locally by each driver loop and
//! surfaced through `tracing` for observability; not queryable cross-actor,
//! since nothing outside the driver needs to synchronize on it.

use std::sync::atomic::{AtomicU8, Ordering};

/// One actor's position in the scheduler's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorState {
    /// Spawned but not yet picked up by a driver turn.
    Idle,
    /// Has at least one envelope waiting and is eligible to run.
    Runnable,
    /// Currently inside a dispatch turn.
    Running,
    /// Blocked on its mailbox with an empty queue (cooperative: awaiting
    /// `Notify`; blocking: parked on its `Condvar`).
    Waiting,
    /// Finalized; no further turns will run.
    Terminated,
}

impl Default for ActorState {
    fn default() -> Self {
        ActorState::Idle
    }
}

impl ActorState {
    const fn to_code(self) -> u8 {
        match self {
            ActorState::Idle => 0,
            ActorState::Runnable => 1,
            ActorState::Running => 2,
            ActorState::Waiting => 3,
            ActorState::Terminated => 4,
        }
    }

    const fn from_code(code: u8) -> Self {
        match code {
            0 => ActorState::Idle,
            1 => ActorState::Runnable,
            2 => ActorState::Running,
            3 => ActorState::Waiting,
            _ => ActorState::Terminated,
        }
    }
}

/// An `ActorState` stored atomically. Each driver loop owns one instance
/// for the lifetime of its turn loop; read by tests and `tracing` event
/// fields without synchronizing with the loop itself.
#[derive(Debug)]
pub struct AtomicActorState {
    code: AtomicU8,
}

impl AtomicActorState {
    /// A fresh tracker starting in `initial`.
    pub fn new(initial: ActorState) -> Self {
        Self {
            code: AtomicU8::new(initial.to_code()),
        }
    }

    /// The currently recorded state.
    pub fn load(&self) -> ActorState {
        ActorState::from_code(self.code.load(Ordering::Acquire))
    }

    /// Record a new state.
    pub fn store(&self, state: ActorState) {
        self.code.store(state.to_code(), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_every_state() {
        let tracker = AtomicActorState::new(ActorState::Idle);
        assert_eq!(tracker.load(), ActorState::Idle);
        for state in [
            ActorState::Runnable,
            ActorState::Running,
            ActorState::Waiting,
            ActorState::Terminated,
        ] {
            tracker.store(state);
            assert_eq!(tracker.load(), state);
        }
    }
}
