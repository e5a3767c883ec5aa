//! Pattern slot descriptors.

// Layer 1: Standard library imports
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

// Layer 3: Internal module imports
use crate::payload::TupleElement;

/// A value predicate evaluated after a typed-value slot's type check
/// succeeds.
pub trait ValuePredicate: Send + Sync {
    /// `true` iff `element` satisfies the predicate. Callers guarantee
    /// `element`'s type already matches `self`'s expected type.
    fn matches(&self, element: &TupleElement) -> bool;

    /// A human-readable description, for pattern `Debug` output.
    fn describe(&self) -> String;
}

struct EqPredicate<T> {
    expected: T,
}

impl<T> ValuePredicate for EqPredicate<T>
where
    T: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn matches(&self, element: &TupleElement) -> bool {
        element
            .downcast_ref::<T>()
            .is_some_and(|v| v == &self.expected)
    }

    fn describe(&self) -> String {
        format!("{:?}", self.expected)
    }
}

/// One slot of a `Pattern`.
#[derive(Clone)]
pub enum Slot {
    /// Matches iff the corresponding element has type `T`.
    Typed(TypeId, &'static str),

    /// Matches iff the element has type `T` and equals `v`.
    TypedValue(TypeId, &'static str, Arc<dyn ValuePredicate>),

    /// Matches any single element; count-preserving.
    Any,

    /// Matches zero or more consecutive elements. Permitted at most twice
    /// per pattern, at disjoint positions.
    AnyMany,
}

impl Slot {
    /// A typed slot for `T`.
    pub fn typed<T: 'static>() -> Self {
        Self::Typed(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    /// A typed-value slot for `T == value`.
    pub fn typed_value<T>(value: T) -> Self
    where
        T: PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        Self::TypedValue(
            TypeId::of::<T>(),
            std::any::type_name::<T>(),
            Arc::new(EqPredicate { expected: value }),
        )
    }

    /// The single wildcard slot.
    pub fn any() -> Self {
        Self::Any
    }

    /// The variadic wildcard slot.
    pub fn any_many() -> Self {
        Self::AnyMany
    }

    /// `true` for `Slot::AnyMany`.
    pub fn is_variadic(&self) -> bool {
        matches!(self, Slot::AnyMany)
    }

    /// Test a single payload element against this slot. Not meaningful for
    /// `AnyMany`, which is handled structurally by the matcher rather than
    /// element-by-element.
    pub fn matches_element(&self, element: &TupleElement) -> bool {
        match self {
            Slot::Typed(type_id, _) => element.type_id() == *type_id,
            Slot::TypedValue(type_id, _, predicate) => {
                element.type_id() == *type_id && predicate.matches(element)
            }
            Slot::Any => true,
            Slot::AnyMany => true,
        }
    }

    /// The slot's expected `TypeId`, if any (`None` for wildcards).
    pub fn expected_type(&self) -> Option<TypeId> {
        match self {
            Slot::Typed(type_id, _) | Slot::TypedValue(type_id, _, _) => Some(*type_id),
            Slot::Any | Slot::AnyMany => None,
        }
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Typed(_, name) => write!(f, "Typed({name})"),
            Slot::TypedValue(_, name, predicate) => {
                write!(f, "TypedValue({name} == {})", predicate.describe())
            }
            Slot::Any => write!(f, "Any"),
            Slot::AnyMany => write!(f, "AnyMany"),
        }
    }
}
