//! Observability: the `Monitor` trait kernel
//! lifecycle/link/cache/timeout events are recorded through, plus
//! `tracing` spans/events at the same points for log-based observability.

pub mod in_memory;
pub mod noop;
pub mod traits;
pub mod types;

pub use in_memory::InMemoryMonitor;
pub use noop::NoopMonitor;
pub use traits::Monitor;
pub use types::{RecordedEvent, RuntimeEvent};
