use std::future::Future;
use std::hash::Hash;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use futures::FutureExt;

use super::{Hook, Hooks};
use crate::hash::hash_deps;

mod private {
    pub trait Sealed {}
    impl Sealed for crate::hooks::Hooks<'_, '_> {}
}

pub trait UseEffect: private::Sealed {
    /// Runs `f` during the update whenever the hash of `deps` differs from
    /// the previous update, including the first one.
    fn use_effect<F, D>(&mut self, f: F, deps: D)
    where
        F: FnOnce(),
        D: Hash;

    /// Starts `f` whenever `deps` change. A still-running future from an
    /// earlier dependency set is dropped and replaced.
    fn use_async_effect<F, D>(&mut self, f: F, deps: D)
    where
        F: Future<Output = ()> + Send + 'static,
        D: Hash;
}

#[derive(Default)]
struct UseEffectImpl {
    deps_hash: Option<u64>,
}

impl Hook for UseEffectImpl {}

#[derive(Default)]
pub struct UseAsyncEffectImpl {
    f: Option<BoxFuture<'static, ()>>,
    deps_hash: Option<u64>,
}

impl Hook for UseAsyncEffectImpl {
    fn poll_change(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if let Some(future) = self.f.as_mut() {
            if future.as_mut().poll(cx).is_ready() {
                self.f = None;
            }
        }
        Poll::Pending
    }
}

impl UseEffect for Hooks<'_, '_> {
    fn use_effect<F, D>(&mut self, f: F, deps: D)
    where
        F: FnOnce(),
        D: Hash,
    {
        let deps_hash = hash_deps(&deps);
        let hook = self.use_hook(UseEffectImpl::default);
        if hook.deps_hash != Some(deps_hash) {
            hook.deps_hash = Some(deps_hash);
            f();
        }
    }

    fn use_async_effect<F, D>(&mut self, f: F, deps: D)
    where
        F: Future<Output = ()> + Send + 'static,
        D: Hash,
    {
        let deps_hash = hash_deps(&deps);
        let hook = self.use_hook(UseAsyncEffectImpl::default);
        if hook.deps_hash != Some(deps_hash) {
            if hook.f.is_some() {
                log::trace!("async effect superseded before completing");
            }
            hook.f = Some(f.boxed());
            hook.deps_hash = Some(deps_hash);
        }
    }
}
