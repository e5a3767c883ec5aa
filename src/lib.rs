//! # rtactor — a local actor runtime kernel
//!
//! A lightweight actor runtime: message envelope + mailbox, a
//! pattern-matching dispatch engine, a behavior stack with
//! `become`/`unbecome`, a request/response correlation subsystem, a
//! cooperative+blocking scheduler, and a link/monitor/exit graph for
//! failure propagation. No network transports, serialization formats, or
//! supervision trees — peer failure is observed and handled through
//! `link`/`monitor`, not a hierarchical restart strategy.
//!
//! # Quick start
//!
//! ```rust
//! use rtactor::prelude::*;
//!
//! struct Greeter;
//!
//! impl Actor for Greeter {
//! fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
//! BehaviorBuilder::new()
//!.on(Pattern::new(vec![Slot::typed::<String>()]).unwrap(), |_actor, ctx, payload, _mapping| {
//! let name = payload.get::<String>(0).cloned().unwrap_or_default();
//! ctx.reply(Tuple::from_static((format!("hello, {name}"),)));
//! })
//!.build()
//! }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let system = ActorSystem::new(SystemConfig::default());
//! let greeter = system.spawn(Greeter).unwrap();
//! system.send(&greeter, Tuple::from_static(("world".to_string(),))).unwrap();
//! # tokio::time::sleep(std::time::Duration::from_millis(10)).await;
//! # }
//! ```
//!
//! # Module organization
//!
//! Dependency order (leaf to root): `clock → payload → message → mailbox
//! → pattern → behavior → request → actor → scheduler → linking →
//! system`. `broker`, `monitoring`, and `util` are cross-cutting.
//!
//! - [`payload`] / [`message`] — the `Tuple` value representation and the
//! queueable `Envelope` wrapping it.
//! - [`mailbox`] — the two-priority-band per-actor queue plus the
//! dispatch-cache.
//! - [`pattern`] — the five-strategy structural matcher and its
//! per-actor cache.
//! - [`behavior`] — ordered clause lists, timeouts, and the `become`
//! stack.
//! - [`request`] — the fluent `RequestHandle` correlation API.
//! - [`actor`] — the `Actor` trait, `ActorContext`, and `ActorCell`.
//! - [`scheduler`] — the cooperative and blocking dispatch loops.
//! - [`linking`] — link/monitor sets and the exit-fan-out graph.
//! - [`timer`] — the deadline-ordered delivery queue.
//! - [`system`] — `ActorSystem`, the public entry point.
//! - [`broker`] — the named-actor registry.
//! - [`monitoring`] — observability: the `Monitor` trait and its sinks.
//! - [`clock`] — the monotonic time source abstraction.
//! - [`util`] — identifiers (`ActorId`, `ActorHandle`, `MessageId`).

pub mod actor;
pub mod behavior;
pub mod broker;
pub mod clock;
pub mod linking;
pub mod mailbox;
pub mod message;
pub mod monitoring;
pub mod pattern;
pub mod payload;
pub mod prelude;
pub mod request;
pub mod scheduler;
pub mod system;
pub mod timer;
pub mod util;

pub use actor::{Actor, ActorCellHandle, ActorContext};
pub use behavior::{BecomePolicy, Behavior, BehaviorBuilder, BehaviorStack};
pub use broker::{ActorRegistry, BrokerError};
pub use linking::{ExitReason, LinkSet, MonitorSet, SystemSignal};
pub use mailbox::{BlockingMailbox, CooperativeMailbox, MailboxError};
pub use message::{Envelope, MessagePriority};
pub use monitoring::{InMemoryMonitor, Monitor, NoopMonitor, RuntimeEvent};
pub use pattern::{Mapping, Pattern, Slot};
pub use payload::{Tuple, TypeToken};
pub use request::RequestHandle;
pub use system::{ActorSystem, SystemConfig, SystemError};
pub use util::{ActorHandle, ActorId, MessageId};
