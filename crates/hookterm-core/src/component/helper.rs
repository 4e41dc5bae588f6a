use std::any::{type_name, TypeId};
use std::marker::PhantomData;

use super::{AnyComponent, Component};
use crate::error::Result;
use crate::props::AnyProps;

/// Type-erased constructor and identity for one [`Component`] type.
pub trait ComponentHelperExt: Send + Sync {
    fn new_component(&self, props: AnyProps<'_>) -> Result<Box<dyn AnyComponent>>;

    fn component_type_id(&self) -> TypeId;

    fn component_name(&self) -> &'static str;

    fn copy(&self) -> Box<dyn ComponentHelperExt>;
}

pub struct ComponentHelper<C: Component> {
    _marker: PhantomData<fn() -> C>,
}

impl<C: Component> ComponentHelper<C> {
    pub fn boxed() -> Box<dyn ComponentHelperExt> {
        Box::new(Self {
            _marker: PhantomData,
        })
    }
}

impl<C: Component> ComponentHelperExt for ComponentHelper<C> {
    fn new_component(&self, props: AnyProps<'_>) -> Result<Box<dyn AnyComponent>> {
        let props = props.downcast_ref::<C::Props>()?;
        Ok(Box::new(C::new(props)))
    }

    fn component_type_id(&self) -> TypeId {
        TypeId::of::<C>()
    }

    fn component_name(&self) -> &'static str {
        type_name::<C>()
    }

    fn copy(&self) -> Box<dyn ComponentHelperExt> {
        Self::boxed()
    }
}
