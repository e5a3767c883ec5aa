//! The link/monitor/exit graph: bidirectional links, one-shot
//! monitors, and EXIT/DOWN fan-out on termination.

pub mod graph;
pub mod ops;
pub mod reason;
pub mod signal;

pub use graph::{LinkSet, MonitorSet};
pub use ops::{demonitor, link, monitor, propagate_termination, unlink};
pub use reason::ExitReason;
pub use signal::SystemSignal;
