use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::task::AtomicWaker;

use super::{Hook, Hooks};
use crate::context::SystemContext;
use crate::render::ComponentUpdater;

mod private {
    pub trait Sealed {}
    impl Sealed for crate::hooks::Hooks<'_, '_> {}
}

#[derive(Default)]
struct ExitSignal {
    requested: AtomicBool,
    waker: AtomicWaker,
}

/// Requests that the render loop stop. Unlike the [`SystemContext`], which
/// is only reachable during an update, a handle can be moved into event
/// handlers and background futures.
#[derive(Clone, Default)]
pub struct ExitHandle {
    signal: Arc<ExitSignal>,
}

impl ExitHandle {
    pub fn exit(&self) {
        self.signal.requested.store(true, Ordering::SeqCst);
        self.signal.waker.wake();
    }

    pub fn is_requested(&self) -> bool {
        self.signal.requested.load(Ordering::SeqCst)
    }
}

impl Hook for ExitHandle {
    fn poll_change(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.signal.waker.register(cx.waker());
        if self.is_requested() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }

    fn pre_component_update(&mut self, updater: &mut ComponentUpdater<'_, '_>) {
        if !self.is_requested() {
            return;
        }
        match updater.get_context_mut::<SystemContext>() {
            Ok(mut system) => system.exit(),
            Err(err) => log::warn!("exit requested but {err}"),
        }
    }
}

pub trait UseExit: private::Sealed {
    fn use_exit(&mut self) -> ExitHandle;
}

impl UseExit for Hooks<'_, '_> {
    fn use_exit(&mut self) -> ExitHandle {
        self.use_hook(ExitHandle::default).clone()
    }
}
