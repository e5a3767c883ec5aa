//! Convenient glob import for building actors with this crate.
//!
//! ```rust
//! use rtactor::prelude::*;
//! ```

// Core actor system
pub use crate::actor::{Actor, ActorContext};

// Behaviors and pattern matching
pub use crate::behavior::{BecomePolicy, Behavior, BehaviorBuilder};
pub use crate::pattern::{Pattern, Slot};
pub use crate::payload::Tuple;

// Request/response correlation
pub use crate::request::RequestHandle;

// Messaging
pub use crate::message::{Envelope, MessagePriority};

// Link/monitor/exit graph
pub use crate::linking::{ExitReason, SystemSignal};

// Named-actor registry
pub use crate::broker::ActorRegistry;

// Observability
pub use crate::monitoring::{InMemoryMonitor, Monitor, NoopMonitor, RuntimeEvent};

// System
pub use crate::system::{ActorSystem, SystemConfig, SystemError};

// Utilities
pub use crate::util::{ActorHandle, ActorId, MessageId};
