//! Mailbox error kinds.

// Layer 2: Third-party crate imports
use thiserror::Error;

/// Failures a mailbox's public operations can report.
#[derive(Debug, Error)]
pub enum MailboxError {
    /// The owning actor has already terminated; `push_back` returns the
    /// envelope to the caller so it can decide whether to emit a failure
    /// signal of its own.
    #[error("mailbox is closed")]
    Closed,
}
