use std::any::{type_name, Any};

use crate::error::{Error, Result};

/// Marker for values that can be handed to a component as its properties.
///
/// Every `Send + Sync + 'static` type qualifies.
pub trait Props: Any + Send + Sync {}

impl<T: Any + Send + Sync> Props for T {}

/// Properties for components that take none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoProps;

enum Storage<'a> {
    Owned(Box<dyn Any + Send + Sync>),
    Borrowed(&'a mut (dyn Any + Send + Sync)),
}

/// Type-erased properties, either owned by an element or borrowed from one
/// for the duration of an update pass.
pub struct AnyProps<'a> {
    storage: Storage<'a>,
}

impl AnyProps<'static> {
    pub fn owned<T: Props>(props: T) -> Self {
        Self {
            storage: Storage::Owned(Box::new(props)),
        }
    }
}

impl<'a> AnyProps<'a> {
    pub fn borrowed<T: Props>(props: &'a mut T) -> Self {
        Self {
            storage: Storage::Borrowed(props),
        }
    }

    /// Reborrows these properties without giving up ownership.
    pub fn borrow(&mut self) -> AnyProps<'_> {
        let value: &mut (dyn Any + Send + Sync) = match &mut self.storage {
            Storage::Owned(value) => &mut **value,
            Storage::Borrowed(value) => &mut **value,
        };
        AnyProps {
            storage: Storage::Borrowed(value),
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        match &mut self.storage {
            Storage::Owned(value) => &mut **value,
            Storage::Borrowed(value) => &mut **value,
        }
    }

    pub fn downcast_mut<T: Props>(&mut self) -> Result<&mut T> {
        self.as_any_mut()
            .downcast_mut::<T>()
            .ok_or(Error::PropsMismatch {
                expected: type_name::<T>(),
            })
    }

    pub fn downcast_ref<T: Props>(&self) -> Result<&T> {
        let value: &dyn Any = match &self.storage {
            Storage::Owned(value) => &**value,
            Storage::Borrowed(value) => &**value,
        };
        value.downcast_ref::<T>().ok_or(Error::PropsMismatch {
            expected: type_name::<T>(),
        })
    }
}
