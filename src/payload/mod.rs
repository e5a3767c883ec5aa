//! Message payload: typed, reference-counted tuples with a compact
//! type-token fingerprint.

pub mod element;
pub mod tuple;

pub use element::TupleElement;
pub use tuple::{IntoTuple, Tuple, TypeToken};
