//! Cooperative and blocking dispatch loops: the two ways an `ActorCell` is
//! driven to completion.
//!
//! Both loops share the same turn shape — drain up to a fairness quantum
//! of already-queued envelopes, then block for the next one — but differ
//! in how they block, which is why they are two functions rather than one
//! generic over mailbox kind.

// Layer 1: Standard library imports
use std::sync::Arc;
use std::time::Instant;

// Layer 3: Internal module imports
use crate::actor::cell::MailboxKind;
use crate::actor::{Actor, ActorCell};
use crate::linking::ExitReason;

use super::state::{ActorState, AtomicActorState};

/// Default number of envelopes drained per scheduler turn before yielding
///. `SystemConfig::default_quantum()` defaults to
/// this value.
pub const DEFAULT_QUANTUM: usize = 32;

/// Invoked exactly once, with the actor's finalized exit reason, right
/// after its driver loop observes termination. `ActorSystem` uses this to
/// decrement its live-actor count and record a `RuntimeEvent::Terminated`
/// without the scheduler needing to know anything about `ActorSystem`.
pub type OnTerminate = Box<dyn FnOnce(ExitReason) + Send>;

/// Spawn `cell`'s dispatch loop as a tokio task, the cooperative
/// (event-based) flavor. The task runs until the actor finalizes termination.
pub fn spawn_cooperative<A: Actor>(
    cell: ActorCell<A>,
    quantum: usize,
    on_terminate: Option<OnTerminate>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(run_cooperative(cell, quantum, on_terminate))
}

async fn run_cooperative<A: Actor>(mut cell: ActorCell<A>, quantum: usize, on_terminate: Option<OnTerminate>) {
    let shared = Arc::clone(&cell.shared);
    let mailbox = match shared.mailbox() {
        MailboxKind::Cooperative(mailbox) => mailbox,
        MailboxKind::Blocking(_) => {
            tracing::error!(actor = %cell.handle(), "cooperative driver given a blocking mailbox");
            return;
        }
    };
    let state = AtomicActorState::new(ActorState::Runnable);

    'turns: loop {
        if cell.finalize_if_needed() {
            break 'turns;
        }

        state.store(ActorState::Running);
        let mut drained = 0;
        while drained < quantum {
            let Some(envelope) = mailbox.try_pop() else {
                break;
            };
            cell.process(envelope);
            drained += 1;
            if cell.finalize_if_needed() {
                break 'turns;
            }
        }

        if drained > 0 {
            // Quantum exhausted or mailbox drained; yield so sibling
            // cooperative actors sharing this worker pool get a turn
            // before we're polled again.
            state.store(ActorState::Runnable);
            tokio::task::yield_now().await;
            continue;
        }

        state.store(ActorState::Waiting);
        let timeout_duration = cell.current_timeout_duration();
        let received = match timeout_duration {
            Some(duration) => match tokio::time::timeout(duration, mailbox.recv()).await {
                Ok(envelope) => envelope,
                Err(_elapsed) => {
                    cell.fire_timeout();
                    if cell.finalize_if_needed() {
                        break 'turns;
                    }
                    continue;
                }
            },
            None => mailbox.recv().await,
        };

        match received {
            Some(envelope) => {
                cell.process(envelope);
                if cell.finalize_if_needed() {
                    break 'turns;
                }
            }
            None => {
                // Mailbox closed with nothing left to deliver: the only
                // way a cooperative mailbox closes today is via
                // `request_quit`, so this is normally unreachable, but
                // finalize defensively rather than loop forever.
                shared.request_quit(ExitReason::NORMAL);
                cell.finalize_if_needed();
                break 'turns;
            }
        }
    }

    state.store(ActorState::Terminated);
    tracing::debug!(actor = %cell.handle(), "actor terminated");
    if let (Some(callback), Some(reason)) = (on_terminate, shared.exit_reason()) {
        callback(reason);
    }
}

/// Spawn `cell`'s dispatch loop on a dedicated OS thread, the blocking
/// (thread-based) flavor. The thread runs until the actor finalizes
/// termination.
pub fn spawn_blocking<A: Actor>(
    cell: ActorCell<A>,
    quantum: usize,
    on_terminate: Option<OnTerminate>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || run_blocking(cell, quantum, on_terminate))
}

fn run_blocking<A: Actor>(mut cell: ActorCell<A>, quantum: usize, on_terminate: Option<OnTerminate>) {
    let shared = Arc::clone(&cell.shared);
    let mailbox = match shared.mailbox() {
        MailboxKind::Blocking(mailbox) => mailbox,
        MailboxKind::Cooperative(_) => {
            tracing::error!(actor = %cell.handle(), "blocking driver given a cooperative mailbox");
            return;
        }
    };

    'turns: loop {
        if cell.finalize_if_needed() {
            break 'turns;
        }

        let mut drained = 0;
        while drained < quantum {
            let Some(envelope) = mailbox.try_pop() else {
                break;
            };
            cell.process(envelope);
            drained += 1;
            if cell.finalize_if_needed() {
                break 'turns;
            }
        }

        if drained > 0 {
            continue;
        }

        let deadline = cell.current_timeout_duration().map(|d| Instant::now() + d);
        match mailbox.block_until_nonempty(deadline) {
            Some(envelope) => {
                cell.process(envelope);
                if cell.finalize_if_needed() {
                    break 'turns;
                }
            }
            None if mailbox.is_closed() => {
                shared.request_quit(ExitReason::NORMAL);
                cell.finalize_if_needed();
                break 'turns;
            }
            None => {
                // Deadline elapsed with nothing delivered.
                cell.fire_timeout();
                if cell.finalize_if_needed() {
                    break 'turns;
                }
            }
        }
    }

    tracing::debug!(actor = %cell.handle(), "actor terminated");
    if let (Some(callback), Some(reason)) = (on_terminate, shared.exit_reason()) {
        callback(reason);
    }
}
