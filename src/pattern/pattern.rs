//! `Pattern`: a sequence of slot descriptors plus its wildcard topology.

// Layer 1: Standard library imports
use std::any::TypeId;

// Layer 3: Internal module imports
use super::slot::Slot;
use crate::payload::tuple::TypeToken;

/// The placement of variadic wildcards in a pattern, selecting which of
/// the five matcher strategies applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildcardTopology {
    /// No `AnyMany` slots; size must equal `k` exactly.
    None,
    /// A single `AnyMany` as the last slot.
    Trailing,
    /// A single `AnyMany` as the first slot.
    Leading,
    /// A single `AnyMany` strictly between two non-wildcard slots.
    InBetween,
    /// Two `AnyMany` slots (the maximum permitted).
    Multiple,
}

/// Error returned when a slot sequence violates the wildcard-placement
/// invariant.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PatternError {
    /// More than two `AnyMany` slots were supplied.
    #[error("pattern has {count} variadic wildcards; at most 2 are permitted")]
    TooManyVariadics { count: usize },
}

/// A sequence of slot descriptors describing the shape a payload must have
/// to be dispatched to a handler clause.
#[derive(Clone)]
pub struct Pattern {
    slots: Vec<Slot>,
    topology: WildcardTopology,
    /// Number of non-wildcard slots (`k` in).
    k: usize,
    /// Precomputed type-token for an all-`Typed`/`TypedValue` pattern with
    /// no wildcards at all — lets `WildcardTopology::None` short-circuit via
    /// a single token comparison when the payload is statically typed.
    static_token: Option<TypeToken>,
}

impl Pattern {
    /// Build and validate a pattern from its slot sequence.
    pub fn new(slots: Vec<Slot>) -> Result<Self, PatternError> {
        let variadic_count = slots.iter().filter(|s| s.is_variadic()).count();
        if variadic_count > 2 {
            return Err(PatternError::TooManyVariadics {
                count: variadic_count,
            });
        }

        let topology = match variadic_count {
            0 => WildcardTopology::None,
            1 => {
                let pos = slots
                    .iter()
                    .position(Slot::is_variadic)
                    .unwrap_or_default();
                if pos == 0 {
                    WildcardTopology::Leading
                } else if pos == slots.len() - 1 {
                    WildcardTopology::Trailing
                } else {
                    WildcardTopology::InBetween
                }
            }
            _ => WildcardTopology::Multiple,
        };

        let k = slots.len() - variadic_count;

        let static_token = if variadic_count == 0 {
            let mut type_ids = Vec::with_capacity(slots.len());
            let mut all_typed = true;
            for slot in &slots {
                match slot.expected_type() {
                    Some(t) => type_ids.push(t),
                    None => {
                        all_typed = false;
                        break;
                    }
                }
            }
            if all_typed {
                Some(type_token_of(&type_ids))
            } else {
                None
            }
        } else {
            None
        };

        Ok(Self {
            slots,
            topology,
            k,
            static_token,
        })
    }

    /// The slot sequence.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The number of non-wildcard slots.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The wildcard topology, selecting the matcher strategy.
    pub fn topology(&self) -> WildcardTopology {
        self.topology
    }

    /// The precomputed static type token, when every slot is `Typed` or
    /// `TypedValue` (no wildcards at all).
    pub fn static_token(&self) -> Option<TypeToken> {
        self.static_token
    }

    /// `true` iff a payload whose type token is `token` *could* match this
    /// pattern. Used to prefilter the match cache.
    ///
    /// A pattern with any wildcard, or without a full static type list, can
    /// never be ruled out by token alone and is always considered possible.
    pub fn could_match_token(&self, token: TypeToken) -> bool {
        match self.static_token {
            Some(expected) => expected == token,
            None => true,
        }
    }
}

fn type_token_of(type_ids: &[TypeId]) -> TypeToken {
    TypeToken::from_type_ids(type_ids)
}
