//! `Behavior`: an ordered clause list plus an optional timeout clause.

// Layer 1: Standard library imports
use std::fmt;
use std::time::Duration;

// Layer 3: Internal module imports
use super::clause::{Clause, ClauseOutcome, TimeoutClause};
use super::context::ActorContext;
use crate::payload::Tuple;

/// An ordered list of pattern-guarded clauses, tried in declaration order,
/// plus an optional timeout clause fired when no message arrives within a
/// duration.
pub struct Behavior<A, Ctx> {
    clauses: Vec<Clause<A, Ctx>>,
    timeout: Option<TimeoutClause<A, Ctx>>,
}

impl<A, Ctx> Behavior<A, Ctx> {
    /// The clauses, in declaration (= dispatch) order.
    pub fn clauses(&self) -> &[Clause<A, Ctx>] {
        &self.clauses
    }

    /// The timeout clause, if one was configured.
    pub fn timeout(&self) -> Option<&TimeoutClause<A, Ctx>> {
        self.timeout.as_ref()
    }

    /// Try every clause, in order, against `payload`, stopping at the
    /// first match.
    pub fn dispatch(&self, actor: &mut A, ctx: &mut Ctx, payload: &Tuple) -> ClauseOutcome
    where
        Ctx: ActorContext<A>,
    {
        for clause in &self.clauses {
            if let ClauseOutcome::Handled = clause.try_dispatch(actor, ctx, payload) {
                return ClauseOutcome::Handled;
            }
        }
        ClauseOutcome::Unhandled
    }
}

impl<A, Ctx> Clone for Behavior<A, Ctx> {
    fn clone(&self) -> Self {
        Self {
            clauses: self.clauses.clone(),
            timeout: self.timeout.clone(),
        }
    }
}

impl<A, Ctx> fmt::Debug for Behavior<A, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("clause_count", &self.clauses.len())
            .field("has_timeout", &self.timeout.is_some())
            .finish()
    }
}

/// Fluent builder for `Behavior`: clauses and an optional trailing timeout
/// are composed via explicit `.on()`/`.with_timeout()` calls, not by
/// positional convention.
pub struct BehaviorBuilder<A, Ctx> {
    clauses: Vec<Clause<A, Ctx>>,
    timeout: Option<TimeoutClause<A, Ctx>>,
}

impl<A, Ctx> Default for BehaviorBuilder<A, Ctx> {
    fn default() -> Self {
        Self {
            clauses: Vec::new(),
            timeout: None,
        }
    }
}

impl<A, Ctx> BehaviorBuilder<A, Ctx> {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause built from a pattern and its handler.
    pub fn on<F>(mut self, pattern: crate::pattern::Pattern, handler: F) -> Self
    where
        F: Fn(&mut A, &mut Ctx, &Tuple, &crate::pattern::Mapping) + Send + Sync + 'static,
    {
        self.clauses.push(Clause::new(pattern, handler));
        self
    }

    /// Attach the timeout clause. Unlike the positional "last tuple
    /// element is secretly a timeout" convention some actor frameworks
    /// use, this is an explicit, independently documented combinator —
    /// calling it twice replaces the previous timeout rather than
    /// appending a clause.
    pub fn with_timeout<F>(mut self, duration: Duration, handler: F) -> Self
    where
        F: Fn(&mut A, &mut Ctx) + Send + Sync + 'static,
    {
        self.timeout = Some(TimeoutClause::new(duration, handler));
        self
    }

    /// Finalize the behavior.
    pub fn build(self) -> Behavior<A, Ctx> {
        Behavior {
            clauses: self.clauses,
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::context::ActorContext;
    use crate::linking::ExitReason;
    use crate::pattern::{Pattern, Slot};
    use crate::payload::Tuple;
    use crate::util::ActorHandle;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    struct Noop;
    impl ActorContext<Arc<AtomicI32>> for Noop {
        fn self_handle(&self) -> &ActorHandle {
            unimplemented!()
        }
        fn sender(&self) -> Option<&ActorHandle> {
            None
        }
        fn reply(&mut self, _payload: Tuple) {}
        fn become_behavior(&mut self, _behavior: Behavior<Arc<AtomicI32>, Self>, _policy: crate::behavior::BecomePolicy) {}
        fn unbecome(&mut self) {}
        fn link(&mut self, _other: ActorHandle) {}
        fn monitor(&mut self, _other: ActorHandle) {}
        fn unlink(&mut self, _other: &ActorHandle) {}
        fn demonitor(&mut self, _other: &ActorHandle) {}
        fn trap_exit(&mut self, _enabled: bool) {}
        fn quit(&mut self, _reason: ExitReason) {}
    }

    #[test]
    fn first_matching_clause_wins() {
        let counter = Arc::new(AtomicI32::new(0));
        let behavior: Behavior<Arc<AtomicI32>, Noop> = BehaviorBuilder::new()
            .on(Pattern::new(vec![Slot::typed::<i32>()]).unwrap(), |a, _ctx, _p, _m| {
                a.fetch_add(1, Ordering::SeqCst);
            })
                .on(Pattern::new(vec![Slot::any()]).unwrap(), |a, _ctx, _p, _m| {
                a.fetch_add(100, Ordering::SeqCst);
            })
                .build();

        let mut ctx = Noop;
        let outcome = behavior.dispatch(&mut counter.clone(), &mut ctx, &Tuple::from_static((1i32,)));
        assert_eq!(outcome, ClauseOutcome::Handled);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn no_match_reports_unhandled() {
        let counter = Arc::new(AtomicI32::new(0));
        let behavior: Behavior<Arc<AtomicI32>, Noop> = BehaviorBuilder::new()
            .on(Pattern::new(vec![Slot::typed::<i32>()]).unwrap(), |a, _ctx, _p, _m| {
                a.fetch_add(1, Ordering::SeqCst);
            })
                .build();

        let mut ctx = Noop;
        let outcome = behavior.dispatch(
            &mut counter.clone(),
            &mut ctx,
            &Tuple::from_static(("x".to_string(),)),
        );
        assert_eq!(outcome, ClauseOutcome::Unhandled);
    }

    #[test]
    fn timeout_clause_is_opt_in() {
        let behavior: Behavior<Arc<AtomicI32>, Noop> = BehaviorBuilder::new().build();
        assert!(behavior.timeout().is_none());

        let behavior: Behavior<Arc<AtomicI32>, Noop> = BehaviorBuilder::new()
            .with_timeout(std::time::Duration::from_secs(1), |_a, _ctx| {})
            .build();
        assert!(behavior.timeout().is_some());
    }
}
