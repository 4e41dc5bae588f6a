use std::io;

use thiserror::Error;

/// Failure looking up a value on the [`ContextStack`](crate::ContextStack).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// No entry of the requested type is visible from the current scope.
    #[error("no context of type `{type_name}` is available in this scope")]
    NotFound { type_name: &'static str },
    /// The innermost matching entry is already borrowed in a conflicting mode.
    #[error("context of type `{type_name}` is already borrowed")]
    BorrowConflict { type_name: &'static str },
}

impl ContextError {
    pub(crate) fn not_found<T: ?Sized>() -> Self {
        ContextError::NotFound {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn borrow_conflict<T: ?Sized>() -> Self {
        ContextError::BorrowConflict {
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ContextError::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("props handed to component do not have type `{expected}`")]
    PropsMismatch { expected: &'static str },
    #[error("component failed: {0}")]
    Component(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps an arbitrary failure raised from component update or draw logic.
    pub fn component<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Component(err.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
