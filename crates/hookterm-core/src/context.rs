//! Scoped, typed values shared with every component updated inside a scope.
//!
//! A [`ContextStack`] is a chain of frames living on the call stack. Pushing
//! a [`Context`] with [`ContextStack::with_context`] creates a child frame
//! that only exists while the supplied closure runs, so an entry is visible
//! to exactly the components updated inside that closure and is removed on
//! every exit path, unwinding included.
//!
//! Lookups walk from the innermost frame outwards and stop at the first entry
//! of the requested type that supports the requested access, so inner scopes
//! shadow outer ones.

use std::any::{Any, TypeId};
use std::cell::{Ref, RefCell, RefMut};

use crate::error::ContextError;

/// A value offered to descendants, in one of three ownership modes.
pub enum Context<'a> {
    /// Shared view of a value owned elsewhere. Never handed out mutably.
    Ref(&'a (dyn Any + Send + Sync)),
    /// Exclusive view of a value owned elsewhere.
    Mut(&'a mut (dyn Any + Send + Sync)),
    /// Value owned by the context entry itself.
    Owned(Box<dyn Any + Send + Sync>),
}

impl<'a> Context<'a> {
    pub fn owned<T: Any + Send + Sync>(value: T) -> Self {
        Context::Owned(Box::new(value))
    }

    pub fn from_ref<T: Any + Send + Sync>(value: &'a T) -> Self {
        Context::Ref(value)
    }

    pub fn from_mut<T: Any + Send + Sync>(value: &'a mut T) -> Self {
        Context::Mut(value)
    }

    /// Type of the value behind this entry, not of the reference to it.
    pub fn value_type_id(&self) -> TypeId {
        self.as_any().type_id()
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, Context::Ref(_))
    }

    fn as_any(&self) -> &dyn Any {
        match self {
            Context::Ref(value) => *value,
            Context::Mut(value) => &**value,
            Context::Owned(value) => &**value,
        }
    }

    fn as_any_mut(&mut self) -> Option<&mut dyn Any> {
        match self {
            Context::Ref(_) => None,
            Context::Mut(value) => Some(&mut **value),
            Context::Owned(value) => Some(&mut **value),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut()?.downcast_mut()
    }

    /// Borrows this entry for a nested scope. An owned value is lent
    /// mutably, so the nested scope sees the same value.
    pub fn borrow(&mut self) -> Context<'_> {
        match self {
            Context::Ref(value) => Context::Ref(*value),
            Context::Mut(value) => Context::Mut(&mut **value),
            Context::Owned(value) => Context::Mut(&mut **value),
        }
    }
}

/// Object-safe view of a `RefCell<Context<'_>>` that hides the context's
/// lifetime, keeping [`ContextStack`] covariant.
trait ContextCell {
    fn try_get(&self) -> Option<Ref<'_, dyn Any>>;
    fn try_get_mut(&self) -> Option<RefMut<'_, dyn Any>>;
}

impl ContextCell for RefCell<Context<'_>> {
    fn try_get(&self) -> Option<Ref<'_, dyn Any>> {
        let context = self.try_borrow().ok()?;
        Some(Ref::map(context, Context::as_any))
    }

    fn try_get_mut(&self) -> Option<RefMut<'_, dyn Any>> {
        let context = self.try_borrow_mut().ok()?;
        RefMut::filter_map(context, Context::as_any_mut).ok()
    }
}

#[derive(Clone, Copy)]
struct Entry<'a> {
    type_id: TypeId,
    shared: bool,
    cell: &'a (dyn ContextCell + 'a),
}

/// One frame of the context chain. Frames are created by
/// [`ContextStack::root`] and [`ContextStack::with_context`] and never
/// outlive the scope that created them.
pub struct ContextStack<'a> {
    parent: Option<&'a ContextStack<'a>>,
    entry: Option<Entry<'a>>,
}

impl<'a> ContextStack<'a> {
    /// Starts a chain whose bottom entry is `root`.
    pub fn root<'b: 'a>(root: &'a RefCell<Context<'b>>) -> Self {
        let context = root.borrow();
        let entry = Entry {
            type_id: context.value_type_id(),
            shared: context.is_shared(),
            cell: root,
        };
        drop(context);
        ContextStack {
            parent: None,
            entry: Some(entry),
        }
    }

    /// Chain with no entries at all.
    pub fn empty() -> Self {
        ContextStack {
            parent: None,
            entry: None,
        }
    }

    /// Runs `scope` with `context` pushed on top of this chain, or with the
    /// chain unchanged when `context` is `None`. The entry is gone once this
    /// returns, whether `scope` returned or unwound.
    pub fn with_context<R, F>(&self, context: Option<Context<'_>>, scope: F) -> R
    where
        F: for<'s> FnOnce(&ContextStack<'s>) -> R,
    {
        let Some(context) = context else {
            return scope(self);
        };
        let type_id = context.value_type_id();
        let shared = context.is_shared();
        let cell = RefCell::new(context);
        let frame = ContextStack {
            parent: Some(self),
            entry: Some(Entry {
                type_id,
                shared,
                cell: &cell,
            }),
        };
        scope(&frame)
    }

    fn entries(&self) -> impl Iterator<Item = Entry<'a>> + '_ {
        std::iter::successors(Some(self), |frame| frame.parent).filter_map(|frame| frame.entry)
    }

    /// Shared access to the innermost entry of type `T`.
    pub fn get_context<T: Any>(&self) -> Result<Ref<'a, T>, ContextError> {
        let entry = self
            .entries()
            .find(|entry| entry.type_id == TypeId::of::<T>())
            .ok_or_else(ContextError::not_found::<T>)?;
        let value = entry
            .cell
            .try_get()
            .ok_or_else(ContextError::borrow_conflict::<T>)?;
        Ref::filter_map(value, |value| value.downcast_ref::<T>())
            .map_err(|_| ContextError::not_found::<T>())
    }

    /// Exclusive access to the innermost entry of type `T` that is not a
    /// shared reference.
    pub fn get_context_mut<T: Any>(&self) -> Result<RefMut<'a, T>, ContextError> {
        let entry = self
            .entries()
            .find(|entry| entry.type_id == TypeId::of::<T>() && !entry.shared)
            .ok_or_else(ContextError::not_found::<T>)?;
        let value = entry
            .cell
            .try_get_mut()
            .ok_or_else(ContextError::borrow_conflict::<T>)?;
        RefMut::filter_map(value, |value| value.downcast_mut::<T>())
            .map_err(|_| ContextError::not_found::<T>())
    }

    /// Number of entries visible from this frame.
    pub fn depth(&self) -> usize {
        self.entries().count()
    }
}

impl std::fmt::Debug for ContextStack<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextStack")
            .field("depth", &self.depth())
            .finish()
    }
}

/// Process-wide context seeded at the bottom of every stack.
#[derive(Debug, Default)]
pub struct SystemContext {
    should_exit: bool,
}

impl SystemContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the render loop to stop after the current render.
    pub fn exit(&mut self) {
        if !self.should_exit {
            log::debug!("exit requested");
        }
        self.should_exit = true;
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;
