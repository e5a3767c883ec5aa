//! `SystemConfig`: the runtime tunables, exposed through a fluent builder.

// Layer 1: Standard library imports
use std::time::Duration;

/// Default number of envelopes a scheduler turn drains before yielding.
pub const DEFAULT_QUANTUM: usize = crate::scheduler::DEFAULT_QUANTUM;

/// Default ceiling on live actors per `ActorSystem`.
pub const DEFAULT_MAX_ACTORS: usize = 100_000;

/// Default worker-thread count recommendation for the hosting tokio
/// runtime. `ActorSystem` does not build its own runtime (it is handed an
/// already-running one), so this is advisory only — a convenience for
/// callers assembling their own `tokio::runtime::Builder`.
pub fn default_worker_threads() -> usize {
    num_cpus::get()
}

/// Default grace period `shutdown` waits for in-flight actors to finalize.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for one `ActorSystem` instance.
#[derive(Debug, Clone)]
pub struct SystemConfig {
    default_quantum: usize,
    max_actors: usize,
    shutdown_timeout: Duration,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            default_quantum: DEFAULT_QUANTUM,
            max_actors: DEFAULT_MAX_ACTORS,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

impl SystemConfig {
    /// Start from the defaults.
    pub fn builder() -> SystemConfigBuilder {
        SystemConfigBuilder::default()
    }

    /// Envelopes drained per scheduler turn before yielding.
    pub fn default_quantum(&self) -> usize {
        self.default_quantum
    }

    /// Ceiling on concurrently live actors.
    pub fn max_actors(&self) -> usize {
        self.max_actors
    }

    /// How long `shutdown` waits for in-flight actors before giving up.
    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout
    }
}

/// Fluent builder for [`SystemConfig`].
#[derive(Debug, Default)]
pub struct SystemConfigBuilder {
    config: SystemConfigOverrides,
}

#[derive(Debug, Default)]
struct SystemConfigOverrides {
    default_quantum: Option<usize>,
    max_actors: Option<usize>,
    shutdown_timeout: Option<Duration>,
}

impl SystemConfigBuilder {
    /// Override the fairness quantum.
    pub fn with_quantum(mut self, quantum: usize) -> Self {
        self.config.default_quantum = Some(quantum);
        self
    }

    /// Override the actor ceiling.
    pub fn with_max_actors(mut self, max_actors: usize) -> Self {
        self.config.max_actors = Some(max_actors);
        self
    }

    /// Override the shutdown grace period.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.config.shutdown_timeout = Some(timeout);
        self
    }

    /// Finalize, falling back to defaults for anything not set.
    pub fn build(self) -> SystemConfig {
        let defaults = SystemConfig::default();
        SystemConfig {
            default_quantum: self.config.default_quantum.unwrap_or(defaults.default_quantum()),
            max_actors: self.config.max_actors.unwrap_or(defaults.max_actors()),
            shutdown_timeout: self.config.shutdown_timeout.unwrap_or(defaults.shutdown_timeout()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = SystemConfig::default();
        assert_eq!(config.default_quantum(), 32);
        assert_eq!(config.max_actors(), DEFAULT_MAX_ACTORS);
    }

    #[test]
    fn builder_overrides_apply_selectively() {
        let config = SystemConfig::builder().with_quantum(8).build();
        assert_eq!(config.default_quantum(), 8);
        assert_eq!(config.max_actors(), DEFAULT_MAX_ACTORS);
    }
}
