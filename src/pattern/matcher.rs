//! The five wildcard-topology matching strategies.
//!
//! Each strategy answers one question: given a pattern's slot sequence and
//! topology, and a candidate tuple, does the tuple match, and if so what
//! index does each non-wildcard slot bind to? The answer is a `Mapping`: a
//! vector, one entry per non-wildcard slot, giving the tuple index it
//! matched against, in slot order.

// Layer 3: Internal module imports
use super::pattern::{Pattern, WildcardTopology};
use super::slot::Slot;
use crate::payload::Tuple;

/// The index in the candidate tuple that each non-wildcard slot bound to,
/// in slot order (not tuple order, though for `None`/`Trailing`/`Leading`
/// the two coincide).
pub type Mapping = Vec<usize>;

/// Attempt to match `tuple` against `pattern`, returning the binding
/// mapping on success.
pub fn try_match(pattern: &Pattern, tuple: &Tuple) -> Option<Mapping> {
    match pattern.topology() {
        WildcardTopology::None => match_none(pattern, tuple),
        WildcardTopology::Trailing => match_trailing(pattern, tuple),
        WildcardTopology::Leading => match_leading(pattern, tuple),
        WildcardTopology::InBetween => match_in_between(pattern, tuple),
        WildcardTopology::Multiple => match_multiple(pattern, tuple),
    }
}

/// No wildcards: size must equal the slot count exactly, and every slot
/// must match its corresponding element position-for-position.
fn match_none(pattern: &Pattern, tuple: &Tuple) -> Option<Mapping> {
    let slots = pattern.slots();
    if tuple.size() != slots.len() {
        return None;
    }
    match_contiguous_run(slots, tuple, 0)
}

/// A single trailing `AnyMany`: the leading `k` slots must match the
/// leading `k` elements; anything after is absorbed by the wildcard.
fn match_trailing(pattern: &Pattern, tuple: &Tuple) -> Option<Mapping> {
    let slots = pattern.slots();
    let k = pattern.k();
    if tuple.size() < k {
        return None;
    }
    match_contiguous_run(&slots[..slots.len() - 1], tuple, 0)
}

/// A single leading `AnyMany`: the trailing `k` slots must match the
/// trailing `k` elements; the wildcard absorbs everything before.
fn match_leading(pattern: &Pattern, tuple: &Tuple) -> Option<Mapping> {
    let slots = pattern.slots();
    let k = pattern.k();
    if tuple.size() < k {
        return None;
    }
    let offset = tuple.size() - k;
    match_contiguous_run(&slots[1..], tuple, offset)
}

/// A single `AnyMany` strictly between two runs of fixed slots: the prefix
/// run matches at the front, the suffix run matches at the back, and the
/// wildcard absorbs whatever, if anything, remains between them (which may
/// be zero elements, and the two runs may even overlap-adjacent if the
/// tuple is exactly `k` long).
fn match_in_between(pattern: &Pattern, tuple: &Tuple) -> Option<Mapping> {
    let slots = pattern.slots();
    let wildcard_pos = slots.iter().position(Slot::is_variadic)?;
    let prefix = &slots[..wildcard_pos];
    let suffix = &slots[wildcard_pos + 1..];
    let k = pattern.k();
    if tuple.size() < k {
        return None;
    }

    let mut mapping = match_contiguous_run(prefix, tuple, 0)?;
    let suffix_offset = tuple.size() - suffix.len();
    // The wildcard must absorb a non-negative span; guaranteed by the size
    // check above since `prefix.len() + suffix.len() == k`.
    let suffix_mapping = match_contiguous_run(suffix, tuple, suffix_offset)?;
    mapping.extend(suffix_mapping);
    Some(mapping)
}

/// Two `AnyMany` wildcards split the slots into three runs: prefix,
/// middle, suffix. Prefix anchors at the front, suffix anchors at the
/// back; the middle run is located by scanning every admissible starting
/// offset between the two anchors (greedy left-to-right; the first
/// admissible placement wins, mirroring the first-matching-clause rule
/// applied recursively within a single pattern).
fn match_multiple(pattern: &Pattern, tuple: &Tuple) -> Option<Mapping> {
    let slots = pattern.slots();
    let first_wildcard = slots.iter().position(Slot::is_variadic)?;
    let second_wildcard = slots[first_wildcard + 1..]
        .iter()
        .position(Slot::is_variadic)
        .map(|p| p + first_wildcard + 1)?;

    let prefix = &slots[..first_wildcard];
    let middle = &slots[first_wildcard + 1..second_wildcard];
    let suffix = &slots[second_wildcard + 1..];
    let k = pattern.k();
    if tuple.size() < k {
        return None;
    }

    let mut mapping = match_contiguous_run(prefix, tuple, 0)?;
    let suffix_offset = tuple.size() - suffix.len();

    // The middle run may start anywhere from right after the prefix up to
    // wherever leaves enough room before the suffix anchor.
    let earliest = prefix.len();
    let latest = suffix_offset.saturating_sub(middle.len());
    for start in earliest..=latest {
        if let Some(middle_mapping) = match_contiguous_run(middle, tuple, start) {
            mapping.extend(middle_mapping);
            let suffix_mapping = match_contiguous_run(suffix, tuple, suffix_offset)?;
            mapping.extend(suffix_mapping);
            return Some(mapping);
        }
    }
    None
}

/// Match a contiguous, wildcard-free run of slots against the tuple
/// elements starting at `offset`. Returns the index each slot bound to
/// (always `offset + i`, but expressed explicitly for clarity and so a
/// future non-contiguous strategy could reuse this signature unchanged).
fn match_contiguous_run(slots: &[Slot], tuple: &Tuple, offset: usize) -> Option<Mapping> {
    let mut mapping = Vec::with_capacity(slots.len());
    for (i, slot) in slots.iter().enumerate() {
        let idx = offset + i;
        let element = tuple.element(idx)?;
        if !slot.matches_element(element) {
            return None;
        }
        mapping.push(idx);
    }
    Some(mapping)
}
