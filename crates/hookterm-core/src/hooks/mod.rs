//! Persistent per-component state and side effects, addressed by call order.
//!
//! A component registers hooks through [`Hooks::use_hook`] during its update.
//! The first update appends a slot for every call; later updates hand back
//! the slot at the same position, so a component must call its hooks in the
//! same order every time. Calling them in a different order is a contract
//! violation and panics rather than handing one hook's state to another.
//!
//! Hooks are exposed to components through small extension traits
//! ([`UseState`], [`UseFuture`], [`UseContext`], ...) implemented for
//! [`Hooks`]. A custom hook follows the same recipe: a type implementing
//! [`Hook`] plus a trait whose methods call `use_hook`.

use std::any::{type_name, Any};
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::context::ContextStack;
use crate::render::{ComponentDrawer, ComponentUpdater};

mod use_context;
pub use use_context::*;
mod use_effect;
pub use use_effect::*;
mod use_events;
pub use use_events::*;
mod use_exit;
pub use use_exit::*;
mod use_future;
pub use use_future::*;
mod use_insert_before;
pub use use_insert_before::*;
mod use_memo;
pub use use_memo::*;
mod use_state;
pub use use_state::*;

/// A unit of persistent state attached to one component instance.
///
/// `poll_change` is called on every tick of the render loop, whether or not
/// it reported readiness last time; an implementation that is not ready must
/// register `cx`'s waker before returning `Pending`. The lifecycle callbacks
/// run around the owning component's update and draw.
pub trait Hook: Unpin + Send {
    fn poll_change(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        Poll::Pending
    }

    fn pre_component_update(&mut self, _updater: &mut ComponentUpdater<'_, '_>) {}
    fn post_component_update(&mut self, _updater: &mut ComponentUpdater<'_, '_>) {}

    fn pre_component_draw(&mut self, _drawer: &mut ComponentDrawer<'_, '_>) {}
    fn post_component_draw(&mut self, _drawer: &mut ComponentDrawer<'_, '_>) {}
}

pub(crate) trait AnyHook: Hook {
    fn any_self_mut(&mut self) -> &mut dyn Any;
    fn hook_type_name(&self) -> &'static str;
}

impl<T: Hook + 'static> AnyHook for T {
    fn any_self_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn hook_type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// The slot list of one instance behaves as a single hook. Readiness is the
/// OR of every slot, and every slot is polled on every call so each one gets
/// to re-arm its waker.
impl Hook for Vec<Box<dyn AnyHook>> {
    fn poll_change(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut is_ready = false;
        for hook in self.iter_mut() {
            if Pin::new(&mut **hook).poll_change(cx).is_ready() {
                is_ready = true;
            }
        }

        if is_ready {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }

    fn pre_component_update(&mut self, updater: &mut ComponentUpdater<'_, '_>) {
        for hook in self.iter_mut() {
            hook.pre_component_update(updater);
        }
    }

    fn post_component_update(&mut self, updater: &mut ComponentUpdater<'_, '_>) {
        for hook in self.iter_mut() {
            hook.post_component_update(updater);
        }
    }

    fn pre_component_draw(&mut self, drawer: &mut ComponentDrawer<'_, '_>) {
        for hook in self.iter_mut() {
            hook.pre_component_draw(drawer);
        }
    }

    fn post_component_draw(&mut self, drawer: &mut ComponentDrawer<'_, '_>) {
        for hook in self.iter_mut() {
            hook.post_component_draw(drawer);
        }
    }
}

/// Per-update handle through which a component body reaches its hook slots
/// and the context stack.
pub struct Hooks<'a, 'c> {
    hooks: &'a mut Vec<Box<dyn AnyHook>>,
    first_update: bool,
    hook_index: usize,
    context: &'a ContextStack<'c>,
    used: Option<&'a mut usize>,
}

impl<'a, 'c> Hooks<'a, 'c> {
    pub(crate) fn new(
        hooks: &'a mut Vec<Box<dyn AnyHook>>,
        first_update: bool,
        context: &'a ContextStack<'c>,
    ) -> Self {
        Self {
            hooks,
            first_update,
            hook_index: 0,
            context,
            used: None,
        }
    }

    /// Records, once this handle is dropped, how many slots the update used.
    pub(crate) fn count_into(mut self, used: &'a mut usize) -> Self {
        self.used = Some(used);
        self
    }

    pub fn is_first_update(&self) -> bool {
        self.first_update
    }

    pub fn context_stack(&self) -> &'a ContextStack<'c> {
        self.context
    }

    /// Returns the hook in the next slot, creating it with `init` while the
    /// instance has not yet finished a successful update. Slots created by a
    /// failed first update are reused when it is retried.
    ///
    /// # Panics
    ///
    /// Panics if the slot holds a hook of another type, or if this update
    /// registers more hooks than the first one did. Both mean the component
    /// called its hooks in a different order than before.
    pub fn use_hook<F, H>(&mut self, init: F) -> &mut H
    where
        F: FnOnce() -> H,
        H: Hook + 'static,
    {
        let index = self.hook_index;
        self.hook_index += 1;
        if self.first_update && index == self.hooks.len() {
            self.hooks.push(Box::new(init()));
        }

        let Some(slot) = self.hooks.get_mut(index) else {
            panic!(
                "hook slot {index} does not exist (expected `{}`); hooks must be called in the same order on every update",
                type_name::<H>()
            );
        };
        let found = slot.hook_type_name();
        match slot.any_self_mut().downcast_mut::<H>() {
            Some(hook) => hook,
            None => panic!(
                "hook slot {index} holds `{found}` but `{}` was requested; hooks must be called in the same order on every update",
                type_name::<H>()
            ),
        }
    }
}

impl Drop for Hooks<'_, '_> {
    fn drop(&mut self) {
        if let Some(used) = self.used.as_deref_mut() {
            *used = self.hook_index;
        }
    }
}

#[cfg(test)]
#[path = "tests/hooks_tests.rs"]
mod tests;
