//! The mailbox: a two-priority-band FIFO queue per actor, plus a
//! consumer-only cache of messages that did not match the current
//! behavior.

pub mod blocking;
pub mod cache;
pub mod cooperative;
pub mod error;
mod queue;

pub use blocking::BlockingMailbox;
pub use cache::MessageCache;
pub use cooperative::CooperativeMailbox;
pub use error::MailboxError;
