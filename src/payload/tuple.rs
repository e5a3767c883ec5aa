//! `Tuple`: an ordered, reference-counted, copy-on-write message payload.
//!
//! "Message payload (`Tuple`)" /. A tuple carries a count, per
//! element (`type_id`, value) access, and — when every element's static
//! type was known at construction time — a `TypeToken` fingerprint of the
//! element-type sequence used to key the pattern matcher's cache.

// Layer 1: Standard library imports
use std::any::TypeId;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// Layer 3: Internal module imports
use super::element::TupleElement;

/// A compact fingerprint of a tuple's element-type sequence.
///
/// Two tuples built from the same static element-type list in the same
/// order always carry equal tokens within a process; tokens are not
/// meaningful across processes or compilations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeToken(u64);

impl TypeToken {
    /// Compute a token from a type-id sequence. Shared with
    /// `pattern::Pattern` so a pattern's static token can be compared
    /// directly against a tuple's.
    pub(crate) fn from_type_ids(type_ids: &[TypeId]) -> Self {
        let mut hasher = DefaultHasher::new();
        type_ids.len().hash(&mut hasher);
        for id in type_ids {
            id.hash(&mut hasher);
        }
        Self(hasher.finish())
    }

    /// The raw 64-bit fingerprint.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tok:{:#x}", self.0)
    }
}

/// An ordered, immutable-by-default sequence of typed values.
///
/// Payloads are shared by `Arc`; any mutation copies-on-write
/// (`Tuple::make_mut_element()`). Two construction modes exist:
///
/// - **Statically typed** (`Tuple::from_static()`, via [`IntoTuple`]):
/// element types are known at the call site, and `type_token` is
/// `Some`.
/// - **Dynamically typed** (`Tuple::from_dynamic()`): element types are only
/// known per-element at runtime; `type_token` is `None` and the
/// matcher falls back to element-by-element comparison.
#[derive(Clone)]
pub struct Tuple {
    elements: Arc<Vec<TupleElement>>,
    token: Option<TypeToken>,
}

impl Tuple {
    /// The empty tuple. Matches a trailing-variadic pattern with `k = 0`.
    pub fn unit() -> Self {
        Self {
            elements: Arc::new(Vec::new()),
            token: Some(TypeToken::from_type_ids(&[])),
        }
    }

    /// Build a tuple from a dynamically typed sequence of elements. The
    /// resulting tuple carries no type token and forces the matcher into
    /// element-by-element comparison mode.
    pub fn from_dynamic(elements: Vec<TupleElement>) -> Self {
        Self {
            elements: Arc::new(elements),
            token: None,
        }
    }

    /// Build a tuple from a compile-time-known element list via
    /// [`IntoTuple`]. The type token is the hash of the element-type
    /// sequence.
    pub fn from_static<T: IntoTuple>(value: T) -> Self {
        let (elements, type_ids) = value.into_tuple_parts();
        Self {
            token: Some(TypeToken::from_type_ids(&type_ids)),
            elements: Arc::new(elements),
        }
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    /// `true` iff `size == 0`.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The type-token fingerprint, if this tuple was statically
    /// constructed.
    pub fn type_token(&self) -> Option<TypeToken> {
        self.token
    }

    /// The `TypeId` of element `i`.
    pub fn element_type(&self, i: usize) -> Option<TypeId> {
        self.elements.get(i).map(TupleElement::type_id)
    }

    /// A read-only view of element `i`.
    pub fn element(&self, i: usize) -> Option<&TupleElement> {
        self.elements.get(i)
    }

    /// Borrow element `i` as a concrete `T`.
    pub fn get<T: std::any::Any + 'static>(&self, i: usize) -> Option<&T> {
        self.elements.get(i).and_then(TupleElement::downcast_ref)
    }

    /// All elements as a slice, for the matcher.
    pub fn elements(&self) -> &[TupleElement] {
        &self.elements
    }

    /// Copy-on-write mutation entry point: while the
    /// backing storage is uniquely owned this mutates in place; otherwise
    /// the whole element vector is cloned first. Mutating always clears the
    /// type token's validity guarantee is preserved because replacement
    /// values must be supplied as `TupleElement`s of a type the caller
    /// asserts matches the original static shape; the token itself is left
    /// untouched since the element *count* and *position* are unchanged.
    pub fn with_element_mut<F>(&mut self, i: usize, f: F) -> bool
    where
        F: FnOnce(&mut TupleElement),
    {
        let elements = Arc::make_mut(&mut self.elements);
        match elements.get_mut(i) {
            Some(el) => {
                f(el);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}

/// Converts a Rust tuple of compile-time-known types into a `Tuple`'s raw
/// parts (elements + the `TypeId` sequence used to compute the token).
///
/// Implemented for tuples of arity 0 through 8; `` yields the empty
/// tuple.
pub trait IntoTuple {
    /// Consume `self`, producing the type-erased elements and their
    /// `TypeId` sequence in declaration order.
    fn into_tuple_parts(self) -> (Vec<TupleElement>, Vec<TypeId>);
}

impl IntoTuple for () {
    fn into_tuple_parts(self) -> (Vec<TupleElement>, Vec<TypeId>) {
        (Vec::new(), Vec::new())
    }
}

macro_rules! impl_into_tuple {
    ($($name:ident: $idx:tt),+) => {
        impl<$($name),+> IntoTuple for ($($name,)+)
        where
            $($name: std::any::Any + Send + Sync + fmt::Debug + 'static),+
        {
            fn into_tuple_parts(self) -> (Vec<TupleElement>, Vec<TypeId>) {
                let mut elements = Vec::new();
                let mut type_ids = Vec::new();
                $(
                    type_ids.push(TypeId::of::<$name>());
                    elements.push(TupleElement::new(self.$idx));
                )+
                (elements, type_ids)
            }
        }
    };
}

impl_into_tuple!(A: 0);
impl_into_tuple!(A: 0, B: 1);
impl_into_tuple!(A: 0, B: 1, C: 2);
impl_into_tuple!(A: 0, B: 1, C: 2, D: 3);
impl_into_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_into_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_into_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_into_tuple!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
