//! `SystemError`: failures raised by `ActorSystem` operations.

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::broker::BrokerError;
use crate::mailbox::MailboxError;

/// Failures an `ActorSystem` call can report to its caller.
#[derive(Debug, Error)]
pub enum SystemError {
    /// `lookup`/`send` by name found nothing registered.
    #[error("actor lookup failed: {0}")]
    ActorNotFound(#[from] BrokerError),

    /// The system has already begun (or finished) shutting down and
    /// rejects new spawns.
    #[error("actor system is shutting down")]
    ShuttingDown,

    /// Spawning would exceed `SystemConfig::max_actors()`.
    #[error("actor limit exceeded: {current} live actors, limit is {max}")]
    ActorLimitExceeded { current: usize, max: usize },

    /// A `send`/`send_priority` failed because the destination's mailbox
    /// was already closed.
    #[error("send failed: {0}")]
    SendFailed(#[from] MailboxError),
}

impl SystemError {
    /// `true` for failures a caller could plausibly retry (none today —
    /// `ActorLimitExceeded` may clear as actors terminate, so it is the
    /// one transient case).
    pub fn is_transient(&self) -> bool {
        matches!(self, SystemError::ActorLimitExceeded {.. })
    }
}
