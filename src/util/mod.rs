//! Small cross-cutting utilities: identifiers and serde helpers.
//!
//! `mod.rs` only declares and re-exports; implementation lives in
//! sibling files.

pub mod duration_serde;
pub mod ids;

pub use ids::{ActorHandle, ActorId, MessageId, MessageIdGenerator};
