//! The actor base: the `Actor` trait, its per-instance context, and the
//! generic cell that owns one actor's private dispatch state.

pub mod cell;
pub mod context;
pub mod traits;

pub use cell::{ActorCell, ActorCellHandle};
pub use context::ActorContext;
pub use traits::Actor;
