//! Free functions implementing link/unlink/monitor/demonitor and the
//! termination fan-out.

// Layer 3: Internal module imports
use super::reason::ExitReason;
use super::signal::SystemSignal;
use crate::actor::cell::ActorCellHandle;
use crate::message::{Envelope, MessagePriority};
use crate::util::ActorHandle;

/// Atomically add each side to the other's link set. If
/// either party has already terminated, the other immediately receives an
/// `EXIT` carrying that party's exit reason, exactly as if the
/// already-terminated party had just now exited.
pub fn link(a: &ActorHandle, b: &ActorHandle) {
    if a == b {
        return;
    }
    a.cell().link_set().insert(b.clone());
    b.cell().link_set().insert(a.clone());

    if let Some(reason) = b.cell().exit_reason() {
        deliver_exit(a, b, reason);
    } else if let Some(reason) = a.cell().exit_reason() {
        deliver_exit(b, a, reason);
    }
}

/// Remove each side from the other's link set.
pub fn unlink(a: &ActorHandle, b: &ActorHandle) {
    a.cell().link_set().remove(b);
    b.cell().link_set().remove(a);
}

/// Register `observer` as a one-shot monitor of `target`.
/// If `target` has already terminated, the observer immediately receives
/// a `DOWN`.
pub fn monitor(observer: &ActorHandle, target: &ActorHandle) {
    let newly_inserted = target.cell().monitor_set().insert(observer.clone());
    if newly_inserted {
        if let Some(reason) = target.cell().exit_reason() {
            deliver_down(observer, target, reason);
        }
    }
}

/// Remove a previously registered monitor.
pub fn demonitor(observer: &ActorHandle, target: &ActorHandle) {
    target.cell().monitor_set().remove(observer);
}

/// Run the full termination fan-out for an actor that just finalized its
/// exit reason: deliver `EXIT` to trapping link peers,
/// propagate termination to non-trapping ones, and deliver `DOWN` to every
/// monitor.
pub fn propagate_termination(who: &ActorHandle, reason: ExitReason) {
    for peer in who.cell().link_set().iter() {
        peer.cell().link_set().remove(who);
        if peer.cell().traps_exit() {
            deliver_exit(&peer, who, reason);
        } else if !reason.is_normal() {
            peer.cell().request_quit(reason);
        }
    }

    for observer in who.cell().monitor_set().drain() {
        deliver_down(&observer, who, reason);
    }
}

fn deliver_exit(to: &ActorHandle, from: &ActorHandle, reason: ExitReason) {
    let signal = SystemSignal::Exit {
        from: from.clone(),
        reason,
    };
    let envelope = Envelope::new(signal.into_tuple()).with_priority(MessagePriority::High);
    let _ = to.cell().enqueue(envelope);
}

fn deliver_down(to: &ActorHandle, from: &ActorHandle, reason: ExitReason) {
    let signal = SystemSignal::Down {
        from: from.clone(),
        reason,
    };
    let envelope = Envelope::new(signal.into_tuple()).with_priority(MessagePriority::High);
    let _ = to.cell().enqueue(envelope);
}
