//! `ActorSystem`: the public entry point.
//!
//! The spawn surface is a direct set of methods (`spawn`, `spawn_named`,
//! `spawn_linked`, `spawn_monitored`, `spawn_blocking`) rather than a
//! fluent builder — flat function variants, not a chained builder, and
//! there is no per-spawn mailbox-capacity knob to justify one (mailboxes
//! here are unbounded).

pub mod actor_system;
pub mod config;
pub mod errors;

pub use actor_system::ActorSystem;
pub use config::{SystemConfig, SystemConfigBuilder};
pub use errors::SystemError;
