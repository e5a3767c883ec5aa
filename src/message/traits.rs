//! Message priority levels for mailbox routing.

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

/// Mailbox priority band: exactly two bands exist; the consumer
/// always drains `High` before `Normal` when both are non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MessagePriority {
    /// The default band.
    Normal = 0,
    /// Drained ahead of `Normal` whenever both bands are non-empty.
    High = 1,
}

impl Default for MessagePriority {
    fn default() -> Self {
        Self::Normal
    }
}
