//! `NoopMonitor`: the default, zero-overhead `Monitor`.

use super::traits::Monitor;
use super::types::RuntimeEvent;

/// Discards every event. `ActorSystem`'s default when no monitor is
/// configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMonitor;

impl Monitor for NoopMonitor {
    fn record(&self, _event: RuntimeEvent) {}
}
