//! `ExitReason`: the 32-bit termination code.

// Layer 1: Standard library imports
use std::fmt;

/// Why an actor terminated. Values below `USER_DEFINED` are reserved by
/// the runtime; application code is free to use any value from
/// `USER_DEFINED` upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExitReason(u32);

impl ExitReason {
    /// Clean, expected termination. Links do not propagate termination for
    /// this reason.
    pub const NORMAL: ExitReason = ExitReason(0);
    /// A handler panicked.
    pub const UNHANDLED_EXCEPTION: ExitReason = ExitReason(1);
    /// A request's sync-failure fired with no installed callback.
    pub const UNHANDLED_SYNC_FAILURE: ExitReason = ExitReason(2);
    /// A request's sync-timeout fired with no installed callback.
    pub const UNHANDLED_SYNC_TIMEOUT: ExitReason = ExitReason(3);
    /// The first value application code may use for its own reasons.
    pub const USER_DEFINED: ExitReason = ExitReason(16);

    /// Construct a user-defined reason. Clamped up to [`ExitReason::USER_DEFINED`]
    /// so a caller can never accidentally collide with a reserved code.
    pub const fn user_defined(code: u32) -> Self {
        if code < Self::USER_DEFINED.0 {
            Self::USER_DEFINED
        } else {
            Self(code)
        }
    }

    /// The raw 32-bit code.
    pub const fn code(&self) -> u32 {
        self.0
    }

    /// `true` for [`ExitReason::NORMAL`].
    pub const fn is_normal(&self) -> bool {
        self.0 == Self::NORMAL.0
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NORMAL => write!(f, "normal"),
            Self::UNHANDLED_EXCEPTION => write!(f, "unhandled_exception"),
            Self::UNHANDLED_SYNC_FAILURE => write!(f, "unhandled_sync_failure"),
            Self::UNHANDLED_SYNC_TIMEOUT => write!(f, "unhandled_sync_timeout"),
            other => write!(f, "user({})", other.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_is_the_zero_code() {
        assert_eq!(ExitReason::NORMAL.code(), 0);
        assert!(ExitReason::NORMAL.is_normal());
    }

    #[test]
    fn user_defined_clamps_reserved_range() {
        assert_eq!(ExitReason::user_defined(5).code(), ExitReason::USER_DEFINED.code());
        assert_eq!(ExitReason::user_defined(42).code(), 42);
    }
}
