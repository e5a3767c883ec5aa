//! `ActorRegistry`: a lock-free name → `ActorHandle` table.
//!
//! There is no pub/sub or topic routing — every send is point-to-point
//! against an `ActorHandle` the caller already holds — so this module is
//! just a concurrent way to hand a string name back to the handle it was
//! registered with. `ActorSystem::spawn_named()` is the only writer; any
//! actor holding an `ActorSystem` handle may read.

// Layer 2: Third-party crate imports
use dashmap::DashMap;

// Layer 3: Internal module imports
use super::error::BrokerError;
use crate::actor::cell::ActorCellHandle;
use crate::util::ActorHandle;

/// Concurrent name → `ActorHandle` table, shared by `Arc` inside
/// `ActorSystem`.
#[derive(Debug, Default)]
pub struct ActorRegistry {
    table: DashMap<String, ActorHandle>,
}

impl ActorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `handle`. Fails if `name` is already bound to a
    /// still-live actor; a name whose previous owner has since terminated
    /// is reclaimed silently.
    pub fn register(&self, name: String, handle: ActorHandle) -> Result<(), BrokerError> {
        if let Some(existing) = self.table.get(&name) {
            if existing.cell().exit_reason().is_none() {
                return Err(BrokerError::NameTaken(name));
            }
        }
        self.table.insert(name, handle);
        Ok(())
    }

    /// Resolve `name` to its registered handle.
    pub fn lookup(&self, name: &str) -> Result<ActorHandle, BrokerError> {
        self.table
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| BrokerError::NotFound(name.to_string()))
    }

    /// Drop `name`'s binding, if any. Idempotent.
    pub fn unregister(&self, name: &str) {
        self.table.remove(name);
    }

    /// Number of bound names, including names whose actor has since
    /// terminated but was not explicitly unregistered.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// `true` iff no names are bound.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
