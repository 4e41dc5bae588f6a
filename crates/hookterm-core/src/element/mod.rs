//! Elements: lightweight, immutable descriptions of what should be on
//! screen. A component's update returns elements; reconciliation turns them
//! into long-lived instances.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::Hash;

use crate::component::{Component, ComponentHelper, ComponentHelperExt};
use crate::props::AnyProps;

mod extend_with_elements;
mod key;
pub use extend_with_elements::{extend_with_elements, ExtendWithElements};
pub use key::ElementKey;

/// A typed element for component `C`.
pub struct Element<C: Component> {
    key: ElementKey,
    props: C::Props,
}

impl<C: Component> Element<C> {
    /// Creates an element keyed by the source location of this call.
    #[track_caller]
    pub fn new(props: C::Props) -> Self {
        Self {
            key: ElementKey::caller(),
            props,
        }
    }

    /// Creates an element with an already built key.
    pub fn keyed(key: ElementKey, props: C::Props) -> Self {
        Self { key, props }
    }

    /// Replaces the location key with an explicit one.
    pub fn with_key<K>(mut self, key: K) -> Self
    where
        K: Any + Eq + Hash + fmt::Debug + Send + Sync,
    {
        self.key = ElementKey::new(key);
        self
    }

    pub fn props(&self) -> &C::Props {
        &self.props
    }

    pub fn into_any(self) -> AnyElement {
        self.into()
    }
}

impl<C: Component> fmt::Debug for Element<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("component", &std::any::type_name::<C>())
            .field("key", &self.key)
            .finish()
    }
}

/// An element whose component type has been erased.
pub struct AnyElement {
    key: ElementKey,
    props: AnyProps<'static>,
    helper: Box<dyn ComponentHelperExt>,
}

impl AnyElement {
    pub fn with_key<K>(mut self, key: K) -> Self
    where
        K: Any + Eq + Hash + fmt::Debug + Send + Sync,
    {
        self.key = ElementKey::new(key);
        self
    }

    pub fn component_name(&self) -> &'static str {
        self.helper.component_name()
    }

    pub(crate) fn into_parts(self) -> (ElementKey, AnyProps<'static>, Box<dyn ComponentHelperExt>) {
        (self.key, self.props, self.helper)
    }
}

impl<C: Component> From<Element<C>> for AnyElement {
    fn from(element: Element<C>) -> Self {
        Self {
            key: element.key,
            props: AnyProps::owned(element.props),
            helper: ComponentHelper::<C>::boxed(),
        }
    }
}

impl fmt::Debug for AnyElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyElement")
            .field("component", &self.helper.component_name())
            .field("key", &self.key)
            .finish()
    }
}

mod private {
    pub trait Sealed {}
}

/// What reconciliation needs from an element, whether typed or erased, owned
/// or borrowed.
pub trait ElementExt: private::Sealed {
    fn key(&self) -> &ElementKey;

    fn props_mut(&mut self) -> AnyProps<'_>;

    fn component_type_id(&self) -> TypeId;

    #[doc(hidden)]
    fn helper(&self) -> Box<dyn ComponentHelperExt>;
}

impl<C: Component> private::Sealed for Element<C> {}
impl<C: Component> private::Sealed for &mut Element<C> {}
impl private::Sealed for AnyElement {}
impl private::Sealed for &mut AnyElement {}

impl<C: Component> ElementExt for Element<C> {
    fn key(&self) -> &ElementKey {
        &self.key
    }

    fn props_mut(&mut self) -> AnyProps<'_> {
        AnyProps::borrowed(&mut self.props)
    }

    fn component_type_id(&self) -> TypeId {
        TypeId::of::<C>()
    }

    fn helper(&self) -> Box<dyn ComponentHelperExt> {
        ComponentHelper::<C>::boxed()
    }
}

impl<C: Component> ElementExt for &mut Element<C> {
    fn key(&self) -> &ElementKey {
        &self.key
    }

    fn props_mut(&mut self) -> AnyProps<'_> {
        AnyProps::borrowed(&mut self.props)
    }

    fn component_type_id(&self) -> TypeId {
        TypeId::of::<C>()
    }

    fn helper(&self) -> Box<dyn ComponentHelperExt> {
        ComponentHelper::<C>::boxed()
    }
}

impl ElementExt for AnyElement {
    fn key(&self) -> &ElementKey {
        &self.key
    }

    fn props_mut(&mut self) -> AnyProps<'_> {
        self.props.borrow()
    }

    fn component_type_id(&self) -> TypeId {
        self.helper.component_type_id()
    }

    fn helper(&self) -> Box<dyn ComponentHelperExt> {
        self.helper.copy()
    }
}

impl ElementExt for &mut AnyElement {
    fn key(&self) -> &ElementKey {
        &self.key
    }

    fn props_mut(&mut self) -> AnyProps<'_> {
        self.props.borrow()
    }

    fn component_type_id(&self) -> TypeId {
        self.helper.component_type_id()
    }

    fn helper(&self) -> Box<dyn ComponentHelperExt> {
        self.helper.copy()
    }
}
