use std::any::Any;
use std::cell::{Ref, RefMut};

use super::Hooks;
use crate::error::ContextError;

mod private {
    pub trait Sealed {}
    impl Sealed for crate::hooks::Hooks<'_, '_> {}
}

/// Access to values provided by enclosing scopes.
///
/// The plain variants are for dependencies a component cannot work without
/// and return [`ContextError::NotFound`], which propagates out of the render
/// loop when passed on with `?`. The `try_` variants treat a missing value as
/// normal. All of them panic on a borrow conflict: the same entry is already
/// held in an incompatible mode, which no caller can recover from.
pub trait UseContext<'c>: private::Sealed {
    fn use_context<T: Any>(&self) -> Result<Ref<'c, T>, ContextError>;
    fn use_context_mut<T: Any>(&self) -> Result<RefMut<'c, T>, ContextError>;
    fn try_use_context<T: Any>(&self) -> Option<Ref<'c, T>>;
    fn try_use_context_mut<T: Any>(&self) -> Option<RefMut<'c, T>>;
}

fn required<V>(lookup: Result<V, ContextError>) -> Result<V, ContextError> {
    match lookup {
        Err(err @ ContextError::BorrowConflict { .. }) => panic!("{err}"),
        lookup => lookup,
    }
}

fn optional<V>(lookup: Result<V, ContextError>) -> Option<V> {
    match required(lookup) {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

impl<'c> UseContext<'c> for Hooks<'_, 'c> {
    fn use_context<T: Any>(&self) -> Result<Ref<'c, T>, ContextError> {
        required(self.context_stack().get_context())
    }

    fn use_context_mut<T: Any>(&self) -> Result<RefMut<'c, T>, ContextError> {
        required(self.context_stack().get_context_mut())
    }

    fn try_use_context<T: Any>(&self) -> Option<Ref<'c, T>> {
        optional(self.context_stack().get_context())
    }

    fn try_use_context_mut<T: Any>(&self) -> Option<RefMut<'c, T>> {
        optional(self.context_stack().get_context_mut())
    }
}
