//! A single pattern-guarded handler inside a `Behavior`.

// Layer 1: Standard library imports
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

// Layer 3: Internal module imports
use super::context::ActorContext;
use crate::pattern::{Mapping, Pattern};
use crate::payload::Tuple;

/// Whether a clause consumed the message it was tried against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseOutcome {
    /// A clause matched and its handler ran.
    Handled,
    /// No clause in the behavior matched; the message should be cached
    /// and retried against a future
    /// behavior.
    Unhandled,
}

/// A pattern paired with the handler run when it matches.
pub struct Clause<A, Ctx> {
    pattern: Pattern,
    handler: Arc<dyn Fn(&mut A, &mut Ctx, &Tuple, &Mapping) + Send + Sync>,
}

impl<A, Ctx> Clause<A, Ctx> {
    /// Build a clause from a compiled pattern and its handler.
    pub fn new<F>(pattern: Pattern, handler: F) -> Self
    where
        F: Fn(&mut A, &mut Ctx, &Tuple, &Mapping) + Send + Sync + 'static,
    {
        Self {
            pattern,
            handler: Arc::new(handler),
        }
    }

    /// The compiled pattern this clause guards on.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Try this clause against `payload`; if it matches, run the handler
    /// and report `Handled`.
    pub fn try_dispatch(&self, actor: &mut A, ctx: &mut Ctx, payload: &Tuple) -> ClauseOutcome
    where
        Ctx: ActorContext<A>,
    {
        match crate::pattern::try_match(&self.pattern, payload) {
            Some(mapping) => {
                (self.handler)(actor, ctx, payload, &mapping);
                ClauseOutcome::Handled
            }
            None => ClauseOutcome::Unhandled,
        }
    }
}

impl<A, Ctx> Clone for Clause<A, Ctx> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<A, Ctx> fmt::Debug for Clause<A, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clause")
            .field("pattern_slots", &self.pattern.slots().len())
            .field("topology", &self.pattern.topology())
            .finish()
    }
}

/// The optional "no message arrived within `duration`" clause.
pub struct TimeoutClause<A, Ctx> {
    duration: Duration,
    handler: Arc<dyn Fn(&mut A, &mut Ctx) + Send + Sync>,
}

impl<A, Ctx> TimeoutClause<A, Ctx> {
    /// Build a timeout clause.
    pub fn new<F>(duration: Duration, handler: F) -> Self
    where
        F: Fn(&mut A, &mut Ctx) + Send + Sync + 'static,
    {
        Self {
            duration,
            handler: Arc::new(handler),
        }
    }

    /// How long the owning behavior waits before firing this clause.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Run the timeout handler.
    pub fn fire(&self, actor: &mut A, ctx: &mut Ctx) {
        (self.handler)(actor, ctx);
    }
}

impl<A, Ctx> Clone for TimeoutClause<A, Ctx> {
    fn clone(&self) -> Self {
        Self {
            duration: self.duration,
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<A, Ctx> fmt::Debug for TimeoutClause<A, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeoutClause")
            .field("duration", &self.duration)
            .finish()
    }
}
