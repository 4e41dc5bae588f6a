use std::hash::Hash;

use super::{Hook, Hooks};
use crate::hash::hash_deps;

mod private {
    pub trait Sealed {}
    impl Sealed for crate::hooks::Hooks<'_, '_> {}
}

pub trait UseMemo: private::Sealed {
    /// Caches the result of `f` until the hash of `deps` changes.
    fn use_memo<F, D, T>(&mut self, f: F, deps: D) -> T
    where
        F: FnOnce() -> T,
        D: Hash,
        T: Clone + Send + Unpin + 'static;
}

pub struct UseMemoImpl<T> {
    memoized: Option<(u64, T)>,
}

impl<T> Default for UseMemoImpl<T> {
    fn default() -> Self {
        UseMemoImpl { memoized: None }
    }
}

impl<T: Send + Unpin> Hook for UseMemoImpl<T> {}

impl UseMemo for Hooks<'_, '_> {
    fn use_memo<F, D, T>(&mut self, f: F, deps: D) -> T
    where
        F: FnOnce() -> T,
        D: Hash,
        T: Clone + Send + Unpin + 'static,
    {
        let deps_hash = hash_deps(&deps);
        let hook = self.use_hook(UseMemoImpl::<T>::default);
        match &hook.memoized {
            Some((hash, value)) if *hash == deps_hash => value.clone(),
            _ => {
                let value = f();
                hook.memoized = Some((deps_hash, value.clone()));
                value
            }
        }
    }
}
