//! Errors raised by the name registry.

use thiserror::Error;

/// Failures from registering or resolving a named actor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrokerError {
    /// `register` was called with a name already bound to a live actor.
    #[error("name '{0}' is already registered")]
    NameTaken(String),

    /// `lookup` found no actor registered under the given name.
    #[error("no actor registered under name '{0}'")]
    NotFound(String),
}
