//! Named-actor registry: a lock-free name →
//! `ActorHandle` table that `ActorSystem` owns and every caller can query.

pub mod error;
pub mod registry;

pub use error::BrokerError;
pub use registry::ActorRegistry;
