use std::cmp;
use std::fmt;
use std::ops::{self, Deref, DerefMut};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::task::{Context, Poll, Waker};

use super::{Hook, Hooks};

mod private {
    pub trait Sealed {}
    impl Sealed for crate::hooks::Hooks<'_, '_> {}
}

pub trait UseState: private::Sealed {
    /// Local state that survives across updates. Writing to it schedules a
    /// render.
    fn use_state<T, F>(&mut self, init: F) -> State<T>
    where
        F: FnOnce() -> T,
        T: Send + Sync + 'static;
}

impl UseState for Hooks<'_, '_> {
    fn use_state<T, F>(&mut self, init: F) -> State<T>
    where
        F: FnOnce() -> T,
        T: Send + Sync + 'static,
    {
        self.use_hook(move || UseStateImpl::new(init()))
            .state
            .clone()
    }
}

struct StateValue<T> {
    value: T,
    waker: Option<Waker>,
    is_changed: bool,
}

struct StateInner<T> {
    alive: AtomicBool,
    value: RwLock<StateValue<T>>,
}

struct UseStateImpl<T> {
    state: State<T>,
}

impl<T> UseStateImpl<T> {
    fn new(value: T) -> Self {
        Self {
            state: State {
                inner: Arc::new(StateInner {
                    alive: AtomicBool::new(true),
                    value: RwLock::new(StateValue {
                        value,
                        waker: None,
                        is_changed: false,
                    }),
                }),
            },
        }
    }
}

impl<T> Drop for UseStateImpl<T> {
    fn drop(&mut self) {
        self.state.inner.alive.store(false, Ordering::Release);
    }
}

impl<T: Send + Sync + 'static> Hook for UseStateImpl<T> {
    fn poll_change(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut value = self.state.lock_write();
        if value.is_changed {
            value.is_changed = false;
            Poll::Ready(())
        } else {
            value.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

/// Read guard returned by [`State::read`].
pub struct StateRef<'a, T> {
    guard: RwLockReadGuard<'a, StateValue<T>>,
}

impl<T> Deref for StateRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.guard.value
    }
}

/// Write guard returned by [`State::write`]. Mutating through it marks the
/// state changed and wakes the render loop when the guard is dropped.
pub struct StateMutRef<'a, T> {
    guard: RwLockWriteGuard<'a, StateValue<T>>,
    is_deref_mut: bool,
}

impl<T> Deref for StateMutRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.guard.value
    }
}

impl<T> DerefMut for StateMutRef<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.is_deref_mut = true;
        &mut self.guard.value
    }
}

impl<T> Drop for StateMutRef<'_, T> {
    fn drop(&mut self) {
        if self.is_deref_mut {
            self.guard.is_changed = true;
            if let Some(waker) = self.guard.waker.take() {
                waker.wake();
            }
        }
    }
}

/// Handle to a value owned by a `use_state` hook.
///
/// Handles are cheap to clone and may be moved into background futures. Once
/// the owning component is dropped the handle goes stale: `try_read` and
/// `try_write` return `None`, writes through the operator impls are ignored,
/// and `read`/`write` panic.
pub struct State<T> {
    inner: Arc<StateInner<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> State<T> {
    fn lock_write(&self) -> RwLockWriteGuard<'_, StateValue<T>> {
        self.inner
            .value
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether the component that owns this state is still mounted.
    pub fn is_alive(&self) -> bool {
        self.inner.alive.load(Ordering::Acquire)
    }

    pub fn try_read(&self) -> Option<StateRef<'_, T>> {
        if !self.is_alive() {
            return None;
        }
        let guard = self
            .inner
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Some(StateRef { guard })
    }

    /// # Panics
    ///
    /// Panics if the owning component has been dropped.
    pub fn read(&self) -> StateRef<'_, T> {
        match self.try_read() {
            Some(value) => value,
            None => panic!("state read after its component was dropped"),
        }
    }

    pub fn try_write(&self) -> Option<StateMutRef<'_, T>> {
        if !self.is_alive() {
            return None;
        }
        Some(StateMutRef {
            guard: self.lock_write(),
            is_deref_mut: false,
        })
    }

    /// # Panics
    ///
    /// Panics if the owning component has been dropped.
    pub fn write(&self) -> StateMutRef<'_, T> {
        match self.try_write() {
            Some(value) => value,
            None => panic!("state written after its component was dropped"),
        }
    }

    /// Replaces the value. Ignored once the owning component is gone.
    pub fn set(&self, value: T) {
        if let Some(mut current) = self.try_write() {
            *current = value;
        }
    }
}

impl<T: Copy> State<T> {
    pub fn get(&self) -> T {
        *self.read()
    }
}

impl<T: fmt::Debug> fmt::Debug for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_read() {
            Some(value) => f.debug_tuple("State").field(&*value).finish(),
            None => f.write_str("State(<dropped>)"),
        }
    }
}

impl<T: fmt::Display> fmt::Display for State<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_read() {
            Some(value) => fmt::Display::fmt(&*value, f),
            None => Ok(()),
        }
    }
}

macro_rules! impl_state_ops {
    ($($op:ident :: $method:ident, $assign:ident :: $assign_method:ident;)*) => {
        $(
            impl<T: ops::$op<Output = T> + Copy> ops::$op<T> for &State<T> {
                type Output = T;

                fn $method(self, rhs: T) -> T {
                    ops::$op::$method(self.get(), rhs)
                }
            }

            impl<T: ops::$assign<T>> ops::$assign<T> for State<T> {
                fn $assign_method(&mut self, rhs: T) {
                    if let Some(mut value) = self.try_write() {
                        ops::$assign::$assign_method(&mut *value, rhs);
                    }
                }
            }
        )*
    };
}

impl_state_ops! {
    Add::add, AddAssign::add_assign;
    Sub::sub, SubAssign::sub_assign;
    Mul::mul, MulAssign::mul_assign;
    Div::div, DivAssign::div_assign;
}

impl<T: PartialEq> PartialEq<T> for State<T> {
    fn eq(&self, other: &T) -> bool {
        self.try_read().is_some_and(|value| *value == *other)
    }
}

impl<T: PartialOrd> PartialOrd<T> for State<T> {
    fn partial_cmp(&self, other: &T) -> Option<cmp::Ordering> {
        self.try_read()?.partial_cmp(other)
    }
}
