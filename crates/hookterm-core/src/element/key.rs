use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::panic::Location;
use std::sync::Arc;

use crate::hash;

trait DynKey: Any + fmt::Debug + Send + Sync {
    fn dyn_eq(&self, other: &dyn DynKey) -> bool;
    fn as_any(&self) -> &dyn Any;
}

impl<T> DynKey for T
where
    T: Any + Eq + Hash + fmt::Debug + Send + Sync,
{
    fn dyn_eq(&self, other: &dyn DynKey) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Identity used to match a freshly built element against the instance that
/// rendered it last time.
///
/// Keys compare by value and by type: `ElementKey::new(1u32)` never equals
/// `ElementKey::new(1u64)`. Uniqueness only matters among siblings updated
/// in the same batch; duplicates are matched first-in-first-out.
#[derive(Clone)]
pub struct ElementKey {
    hash: u64,
    value: Arc<dyn DynKey>,
}

impl ElementKey {
    pub fn new<T>(key: T) -> Self
    where
        T: Any + Eq + Hash + fmt::Debug + Send + Sync,
    {
        let hash = hash::hash_deps(&(TypeId::of::<T>(), &key));
        Self {
            hash,
            value: Arc::new(key),
        }
    }

    /// Key derived from a source location, used when the caller supplies none.
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self::new(*location)
    }

    /// Key for the call site of the function that invoked this one.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.as_any().downcast_ref()
    }
}

impl PartialEq for ElementKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.value.dyn_eq(&*other.value)
    }
}

impl Eq for ElementKey {}

impl Hash for ElementKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Debug for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementKey").field(&self.value).finish()
    }
}
