//! `Monitor`: the sink trait kernel events are recorded through.

use super::types::RuntimeEvent;

/// Receives every `RuntimeEvent` the kernel raises. Implementations must
/// be cheap and non-blocking — `record` is called from inside the
/// dispatch loop, never off to the side on a background task.
pub trait Monitor: Send + Sync + 'static {
    /// Record one event.
    fn record(&self, event: RuntimeEvent);
}
