//! `ActorSystem`: the public entry point tying the kernel together —
//! spawning, named lookup, fire-and-forget send, and shutdown.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

// Layer 3: Internal module imports
use super::config::SystemConfig;
use super::errors::SystemError;
use crate::actor::cell::{ActorCellHandle, ActorCellShared, MailboxKind};
use crate::actor::{Actor, ActorCell};
use crate::broker::ActorRegistry;
use crate::clock::{Clock, SystemClock};
use crate::linking;
use crate::mailbox::{BlockingMailbox, CooperativeMailbox};
use crate::message::{Envelope, MessagePriority};
use crate::monitoring::{Monitor, NoopMonitor, RuntimeEvent};
use crate::payload::Tuple;
use crate::timer::TimerService;
use crate::util::{ActorHandle, ActorId};

struct Inner {
    config: SystemConfig,
    registry: ActorRegistry,
    timers: TimerService,
    monitor: Arc<dyn Monitor>,
    actor_count: AtomicUsize,
    shutting_down: AtomicBool,
}

/// The runtime kernel's public handle: spawns actors, resolves names, and
/// sends fire-and-forget envelopes from outside any actor's own context.
///
/// Cheap to clone — an `Arc` inside — so application code typically holds
/// one `ActorSystem` per process and clones it into whatever needs to
/// spawn further actors.
#[derive(Clone)]
pub struct ActorSystem {
    inner: Arc<Inner>,
}

impl ActorSystem {
    /// Build a system with `config`, a default `SystemClock`, and no
    /// monitor (events still flow through `tracing`; see `with_monitor`).
    /// Must be called from inside a running tokio runtime, since it spawns
    /// the background timer-delivery task.
    pub fn new(config: SystemConfig) -> Self {
        Self::with_clock_and_monitor(config, Arc::new(SystemClock), Arc::new(NoopMonitor))
    }

    /// Build a system that additionally records every kernel event to
    /// `monitor`.
    pub fn with_monitor(config: SystemConfig, monitor: Arc<dyn Monitor>) -> Self {
        Self::with_clock_and_monitor(config, Arc::new(SystemClock), monitor)
    }

    /// Build a system against an explicit `Clock` and `Monitor` — the
    /// hook tests use to run timers against a mock clock.
    pub fn with_clock_and_monitor(config: SystemConfig, clock: Arc<dyn Clock>, monitor: Arc<dyn Monitor>) -> Self {
        let timers = TimerService::new(clock);
        let system = Self {
            inner: Arc::new(Inner {
                config,
                registry: ActorRegistry::new(),
                timers: timers.clone(),
                monitor,
                actor_count: AtomicUsize::new(0),
                shutting_down: AtomicBool::new(false),
            }),
        };
        tokio::spawn(async move { timers.run().await });
        system
    }

    /// This system's configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.inner.config
    }

    /// The shared timer service, for code that needs to arm a deadline
    /// outside of any actor's own context (`ActorContext` holds its own
    /// clone).
    pub fn timers(&self) -> &TimerService {
        &self.inner.timers
    }

    /// Number of currently live (not-yet-terminated) actors.
    pub fn actor_count(&self) -> usize {
        self.inner.actor_count.load(Ordering::Relaxed)
    }

    /// Resolve a name registered via `spawn_named`.
    pub fn lookup(&self, name: &str) -> Result<ActorHandle, SystemError> {
        self.inner.registry.lookup(name).map_err(SystemError::ActorNotFound)
    }

    /// Fire-and-forget send, normal priority.
    pub fn send(&self, dest: &ActorHandle, payload: Tuple) -> Result<(), SystemError> {
        dest.cell()
            .enqueue(Envelope::new(payload))
            .map_err(SystemError::SendFailed)
    }

    /// Fire-and-forget send, high priority.
    pub fn send_priority(&self, dest: &ActorHandle, payload: Tuple) -> Result<(), SystemError> {
        dest.cell()
            .enqueue(Envelope::new(payload).with_priority(MessagePriority::High))
            .map_err(SystemError::SendFailed)
    }

    /// Spawn `actor` on a cooperative (tokio-task) mailbox.
    pub fn spawn<A: Actor>(&self, actor: A) -> Result<ActorHandle, SystemError> {
        self.spawn_with(actor, None, MailboxSelection::Cooperative, &[], &[])
    }

    /// Spawn `actor` and bind it to `name` in the registry. Fails if `name` is already bound to a live actor.
    pub fn spawn_named<A: Actor>(&self, name: impl Into<String>, actor: A) -> Result<ActorHandle, SystemError> {
        self.spawn_with(actor, Some(name.into()), MailboxSelection::Cooperative, &[], &[])
    }

    /// Spawn `actor` already linked to `peer`:
    /// equivalent to `spawn` immediately followed by `link`, but atomic —
    /// no window exists where the new actor could terminate unobserved
    /// before the link is established.
    pub fn spawn_linked<A: Actor>(&self, actor: A, peer: &ActorHandle) -> Result<ActorHandle, SystemError> {
        self.spawn_with(actor, None, MailboxSelection::Cooperative, &[peer.clone()], &[])
    }

    /// Spawn `actor` already monitored by `observer`.
    pub fn spawn_monitored<A: Actor>(&self, actor: A, observer: &ActorHandle) -> Result<ActorHandle, SystemError> {
        self.spawn_with(actor, None, MailboxSelection::Cooperative, &[], &[observer.clone()])
    }

    /// Spawn `actor` on a dedicated OS thread with a `Condvar`-driven
    /// mailbox, the blocking (thread-based) flavor.
    pub fn spawn_blocking<A: Actor>(&self, actor: A) -> Result<ActorHandle, SystemError> {
        self.spawn_with(actor, None, MailboxSelection::Blocking, &[], &[])
    }

    fn spawn_with<A: Actor>(
        &self,
        actor: A,
        name: Option<String>,
        mailbox_kind: MailboxSelection,
        link_to: &[ActorHandle],
        monitored_by: &[ActorHandle],
    ) -> Result<ActorHandle, SystemError> {
        if self.inner.shutting_down.load(Ordering::Acquire) {
            return Err(SystemError::ShuttingDown);
        }

        let max = self.inner.config.max_actors();
        let current = self.inner.actor_count.fetch_add(1, Ordering::AcqRel) + 1;
        if current > max {
            self.inner.actor_count.fetch_sub(1, Ordering::AcqRel);
            return Err(SystemError::ActorLimitExceeded { current: current - 1, max });
        }

        let id = ActorId::new();
        let mailbox = match mailbox_kind {
            MailboxSelection::Cooperative => MailboxKind::Cooperative(CooperativeMailbox::new()),
            MailboxSelection::Blocking => MailboxKind::Blocking(BlockingMailbox::new()),
        };
        let shared = Arc::new(ActorCellShared::new(id, mailbox));
        let name_arc = name.clone().map(Arc::from);
        let handle = ActorHandle::new(id, name_arc, shared.clone() as Arc<dyn ActorCellHandle>);

        for peer in link_to {
            linking::link(&handle, peer);
            self.inner.monitor.record(RuntimeEvent::Linked {
                a: handle.id(),
                b: peer.id(),
            });
        }
        for observer in monitored_by {
            linking::monitor(observer, &handle);
            self.inner.monitor.record(RuntimeEvent::Monitored {
                observer: observer.id(),
                target: handle.id(),
            });
        }

        if let Some(name) = name {
            self.inner.registry.register(name, handle.clone()).map_err(|err| {
                self.inner.actor_count.fetch_sub(1, Ordering::AcqRel);
                SystemError::ActorNotFound(err)
            })?;
        }

        let cell = ActorCell::new(shared, handle.clone(), actor, self.inner.timers.clone());
        let quantum = self.inner.config.default_quantum();

        self.inner.monitor.record(RuntimeEvent::Spawned {
            actor: id,
            name: handle.name().map(str::to_string),
        });

        let inner = Arc::clone(&self.inner);
        let on_terminate: crate::scheduler::OnTerminate = Box::new(move |reason| {
            inner.actor_count.fetch_sub(1, Ordering::AcqRel);
            inner.monitor.record(RuntimeEvent::Terminated { actor: id, reason });
        });

        match mailbox_kind {
            MailboxSelection::Cooperative => {
                crate::scheduler::spawn_cooperative(cell, quantum, Some(on_terminate));
            }
            MailboxSelection::Blocking => {
                crate::scheduler::spawn_blocking(cell, quantum, Some(on_terminate));
            }
        }

        Ok(handle)
    }

    /// Request an orderly shutdown: reject further spawns immediately;
    /// already-running actors continue to completion on their own.
    /// Returns once no spawn attempts can race a live actor count read,
    /// but does not itself wait for in-flight actors to terminate — pair
    /// with `SystemConfig::shutdown_timeout()` at the call site if a
    /// deadline is required.
    pub fn shutdown(&self) {
        self.inner.shutting_down.store(true, Ordering::Release);
    }

    /// `true` once `shutdown` has been called.
    pub fn is_shutting_down(&self) -> bool {
        self.inner.shutting_down.load(Ordering::Acquire)
    }
}

#[derive(Clone, Copy)]
enum MailboxSelection {
    Cooperative,
    Blocking,
}
