//! `BehaviorStack`: the LIFO stack of active behaviors.

// Layer 1: Standard library imports
use std::fmt;

// Layer 3: Internal module imports
use super::behavior::Behavior;
use crate::util::MessageId;

/// One entry in the behavior stack: the behavior itself, and — for
/// sync-request waiting frames pushed by `RequestHandle::then()` — the
/// correlation id it is specifically waiting a response for. `None` for an ordinary `become`.
struct StackFrame<A, Ctx> {
    behavior: Behavior<A, Ctx>,
    waiting_for: Option<MessageId>,
}

/// The LIFO stack of behaviors an actor cycles through via
/// `become`/`unbecome`. Always has at least one frame: the initial
/// behavior supplied at spawn time never pops off the bottom.
pub struct BehaviorStack<A, Ctx> {
    frames: Vec<StackFrame<A, Ctx>>,
}

impl<A, Ctx> BehaviorStack<A, Ctx> {
    /// Start a stack with `initial` as its sole, permanent bottom frame.
    pub fn new(initial: Behavior<A, Ctx>) -> Self {
        Self {
            frames: vec![StackFrame {
                behavior: initial,
                waiting_for: None,
            }],
        }
    }

    /// The currently active behavior.
    pub fn current(&self) -> &Behavior<A, Ctx> {
        &self.frames.last().expect("stack is never empty").behavior
    }

    /// The correlation id the current frame is waiting a response for, if
    /// it was pushed via `become_waiting_for`.
    pub fn waiting_for(&self) -> Option<MessageId> {
        self.frames.last().and_then(|f| f.waiting_for)
    }

    /// Push a new top-of-stack behavior.
    pub fn push(&mut self, behavior: Behavior<A, Ctx>) {
        self.frames.push(StackFrame {
            behavior,
            waiting_for: None,
        });
    }

    /// Replace the current top-of-stack frame with `behavior` in place,
    /// leaving the stack depth unchanged. At the bottom of the stack this
    /// overwrites the actor's initial behavior, so a later `unbecome` has
    /// nothing earlier to restore.
    pub fn replace_top(&mut self, behavior: Behavior<A, Ctx>) {
        let frame = self.frames.last_mut().expect("stack is never empty");
        frame.behavior = behavior;
        frame.waiting_for = None;
    }

    /// Push a new top-of-stack behavior that is only consulted while a
    /// specific request `id` remains unanswered. Any message whose correlation id does not
    /// equal `id` falls through to the frame beneath, as if this frame did
    /// not exist, once the awaited response arrives the frame is popped
    /// automatically by the caller.
    pub fn push_waiting_for(&mut self, id: MessageId, behavior: Behavior<A, Ctx>) {
        self.frames.push(StackFrame {
            behavior,
            waiting_for: Some(id),
        });
    }

    /// Pop the top frame, reverting to the previous behavior. A no-op when only the bottom frame remains.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Depth of the stack, including the permanent bottom frame.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl<A, Ctx> fmt::Debug for BehaviorStack<A, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorStack")
            .field("depth", &self.depth())
            .field("waiting_for", &self.waiting_for)
            .finish()
    }
}
