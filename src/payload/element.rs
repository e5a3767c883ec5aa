//! A single typed slot inside a `Tuple`.

// Layer 1: Standard library imports
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// One element of a message payload: a type-erased, reference-counted
/// value plus its `TypeId` for the matcher's type checks.
///
/// Payloads are immutable-by-default and shared by `Arc`; cloning an
/// element is a refcount bump. `TupleElement` does not itself know
/// how to compare values for `TypedValue` pattern slots — that requires the
/// caller to downcast to a concrete, `PartialEq` type (see
/// `pattern::slot::Slot::TypedValue`).
#[derive(Clone)]
pub struct TupleElement {
    type_id: TypeId,
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
    debug: Arc<dyn Fn(&mut fmt::Formatter<'_>) -> fmt::Result + Send + Sync>,
}

impl TupleElement {
    /// Wrap a concrete value into a type-erased payload element.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync + fmt::Debug + 'static,
    {
        let debug_copy = Arc::new(value) as Arc<dyn Any + Send + Sync>;
        let debug_ref = Arc::clone(&debug_copy);
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            value: debug_copy,
            debug: Arc::new(move |f| {
                // SAFETY-free downcast: we stored the exact same Arc<T>, the
                // type_id check at construction time guarantees this succeeds.
                if let Some(v) = debug_ref.downcast_ref::<T>() {
                    write!(f, "{v:?}")
                } else {
                    write!(f, "<unprintable>")
                }
            }),
        }
    }

    /// The element's concrete `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// A human-readable type name, for diagnostics only (not part of
    /// matcher semantics).
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the element as `T`, or `None` if the element does not hold a
    /// `T`.
    pub fn downcast_ref<T: Any + 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// True iff this element holds a `T`.
    pub fn is<T: Any + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl fmt::Debug for TupleElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.debug)(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_roundtrip() {
        let el = TupleElement::new(42i32);
        assert!(el.is::<i32>());
        assert_eq!(el.downcast_ref::<i32>(), Some(&42));
        assert_eq!(el.downcast_ref::<String>(), None);
    }

    #[test]
    fn debug_formats_inner_value() {
        let el = TupleElement::new("ping".to_string());
        let s = format!("{el:?}");
        assert_eq!(s, "\"ping\"");
    }

    #[test]
    fn clone_is_a_refcount_bump() {
        let el = TupleElement::new(vec![1, 2, 3]);
        let cloned = el.clone();
        assert_eq!(cloned.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2, 3]));
    }
}
