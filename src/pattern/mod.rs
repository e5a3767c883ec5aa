//! The pattern-matching dispatch engine: slot descriptors, compiled
//! patterns with their wildcard topology, the five matching strategies, and
//! a per-actor match cache.

pub mod cache;
pub mod matcher;
pub mod pattern;
pub mod slot;

pub use cache::MatchCache;
pub use matcher::{try_match, Mapping};
pub use pattern::{Pattern, PatternError, WildcardTopology};
pub use slot::{Slot, ValuePredicate};
