//! `MatchCache`: a per-actor cache mapping a tuple's `TypeToken` to the
//! clause indices that were found to match it before.
//!
//! The cache never holds the *winning* clause alone — a behavior can be
//! replaced (`become`) between cache insertion and lookup, so the cache
//! stores the full ordered list of clause indices whose pattern could
//! possibly match that token, letting the dispatcher still try them in
//! declaration order without re-evaluating every pattern's wildcard
//! structure from scratch. A cache entry is a pure function of a clause
//! list plus a token; it is invalidated wholesale on `become`/`unbecome`
//! rather than incrementally maintained.

// Layer 1: Standard library imports
use std::collections::BTreeMap;

// Layer 3: Internal module imports
use super::pattern::Pattern;
use crate::payload::tuple::TypeToken;

/// A cache of "which clause indices are worth trying" keyed by payload
/// type token, sorted for O(log c) lookup.
#[derive(Debug, Default)]
pub struct MatchCache {
    entries: BTreeMap<TypeToken, Vec<usize>>,
}

impl MatchCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Look up the candidate clause indices for `token`, computing and
    /// storing them via `patterns` if this is the first lookup for that
    /// token.
    pub fn candidates(&mut self, token: TypeToken, patterns: &[Pattern]) -> &[usize] {
        self.entries.entry(token).or_insert_with(|| {
            patterns
                .iter()
                .enumerate()
                .filter(|(_, p)| p.could_match_token(token))
                .map(|(i, _)| i)
                .collect()
        })
    }

    /// Drop every cached entry. Called whenever the owning actor's
    /// behavior stack changes (`become`/`unbecome`), since clause indices
    /// are only meaningful relative to a specific clause list.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    /// Number of distinct tokens currently cached, for diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` iff no tokens are cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
