//! Per-actor link and monitor sets.

// Layer 2: Third-party crate imports
use dashmap::DashSet;

// Layer 3: Internal module imports
use crate::util::ActorHandle;

/// The set of actors symmetrically linked to the owner. Links are always
/// established and torn down on both sides together ; this type only stores one side — the pairing is the
/// caller's responsibility (`linking::link()`/`linking::unlink()`).
#[derive(Debug, Default)]
pub struct LinkSet {
    peers: DashSet<ActorHandle>,
}

impl LinkSet {
    /// An empty link set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `peer`. Returns `true` if it was not already present.
    pub fn insert(&self, peer: ActorHandle) -> bool {
        self.peers.insert(peer)
    }

    /// Remove `peer`. Returns `true` if it was present.
    pub fn remove(&self, peer: &ActorHandle) -> bool {
        self.peers.remove(peer).is_some()
    }

    /// `true` iff `peer` is currently linked.
    pub fn contains(&self, peer: &ActorHandle) -> bool {
        self.peers.contains(peer)
    }

    /// Every currently linked peer, for termination fan-out.
    pub fn iter(&self) -> Vec<ActorHandle> {
        self.peers.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of linked peers.
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    /// `true` iff no peers are linked.
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

/// The set of actors monitoring the owner. Monitors are one-shot and
/// asymmetric: only the monitoring side is recorded here, on the
/// *monitored* actor.
#[derive(Debug, Default)]
pub struct MonitorSet {
    observers: DashSet<ActorHandle>,
}

impl MonitorSet {
    /// An empty monitor set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new observer. Returns `true` if it was not already
    /// present — calling `monitor` twice from the same actor produces only
    /// one `DOWN`.
    pub fn insert(&self, observer: ActorHandle) -> bool {
        self.observers.insert(observer)
    }

    /// Remove a previously recorded observer (`demonitor`).
    pub fn remove(&self, observer: &ActorHandle) -> bool {
        self.observers.remove(observer).is_some()
    }

    /// Every observer, for termination fan-out. Draining
    /// rather than borrowing since each observer receives exactly one
    /// `DOWN` and the monitor is then spent.
    pub fn drain(&self) -> Vec<ActorHandle> {
        self.observers.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// `true` iff no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(id: &str) -> ActorHandle {
        crate::actor::cell::test_support::dummy_handle(id)
    }

    #[test]
    fn link_set_insert_and_remove() {
        let set = LinkSet::new();
        let peer = handle("b");
        assert!(set.insert(peer.clone()));
        assert!(!set.insert(peer.clone()));
        assert!(set.contains(&peer));
        assert!(set.remove(&peer));
        assert!(!set.contains(&peer));
    }

    #[test]
    fn monitor_set_is_one_shot_per_insert() {
        let set = MonitorSet::new();
        let observer = handle("a");
        assert!(set.insert(observer.clone()));
        assert!(!set.insert(observer.clone()));
        assert_eq!(set.len(), 1);
        let drained = set.drain();
        assert_eq!(drained.len(), 1);
    }
}
