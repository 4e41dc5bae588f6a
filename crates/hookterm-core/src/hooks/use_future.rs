use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use futures::FutureExt;

use super::{Hook, Hooks};

mod private {
    pub trait Sealed {}
    impl Sealed for crate::hooks::Hooks<'_, '_> {}
}

pub trait UseFuture: private::Sealed {
    /// Runs `f` alongside the component, for timers, polling loops and
    /// other background work. The future is created on the first update
    /// only and is dropped, mid-flight if need be, with the component.
    fn use_future<F>(&mut self, f: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

pub struct UseFutureImpl {
    f: Option<BoxFuture<'static, ()>>,
}

impl UseFutureImpl {
    pub fn new<F>(f: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        UseFutureImpl { f: Some(f.boxed()) }
    }

    pub fn is_finished(&self) -> bool {
        self.f.is_none()
    }
}

impl Hook for UseFutureImpl {
    fn poll_change(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if let Some(future) = self.f.as_mut() {
            if future.as_mut().poll(cx).is_ready() {
                log::trace!("background future finished");
                self.f = None;
            }
        }
        Poll::Pending
    }
}

impl UseFuture for Hooks<'_, '_> {
    fn use_future<F>(&mut self, f: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.use_hook(move || UseFutureImpl::new(f));
    }
}
