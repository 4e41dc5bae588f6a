use std::any::Any;
use std::pin::Pin;
use std::task::{Context, Poll};

use ratatui::layout::Rect;

use crate::error::Result;
use crate::hooks::Hooks;
use crate::props::{AnyProps, Props};
use crate::render::{ComponentDrawer, ComponentUpdater, LayoutStyle};

mod helper;
pub use helper::{ComponentHelper, ComponentHelperExt};

mod instantiated;
pub use instantiated::{Components, InstantiatedComponent};

/// A piece of UI with persistent state.
///
/// An instance is created with [`new`](Component::new) the first time an
/// element of this type appears at a given key, then receives
/// [`update`](Component::update) and [`draw`](Component::draw) on every
/// render until an update pass no longer produces a matching element.
///
/// Most components are written as plain functions with the `#[component]`
/// attribute; implement this trait by hand for components that keep state
/// outside of hooks or paint directly.
pub trait Component: Any + Send + Sync + Unpin {
    type Props: Props;

    fn new(props: &Self::Props) -> Self;

    /// Reads props, calls hooks, and declares children through
    /// [`ComponentUpdater::update_children`].
    fn update(
        &mut self,
        _props: &mut Self::Props,
        _hooks: Hooks<'_, '_>,
        _updater: &mut ComponentUpdater<'_, '_>,
    ) -> Result<()> {
        Ok(())
    }

    /// Paints into `drawer.area`, before any child is drawn.
    fn draw(&mut self, _drawer: &mut ComponentDrawer<'_, '_>) -> Result<()> {
        Ok(())
    }

    /// Splits this component's area between its children. The default is a
    /// flex layout driven by `layout_style` and each child's size constraints.
    fn calc_children_areas(
        &self,
        children: &Components,
        layout_style: &LayoutStyle,
        area: Rect,
    ) -> Vec<Rect> {
        layout_style.split(&children.size_constraints(), area)
    }

    fn poll_change(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        Poll::Pending
    }
}

/// Object-safe form of [`Component`] used by the instance tree.
pub trait AnyComponent: Any + Send + Sync + Unpin {
    fn update(
        &mut self,
        props: AnyProps<'_>,
        hooks: Hooks<'_, '_>,
        updater: &mut ComponentUpdater<'_, '_>,
    ) -> Result<()>;

    fn draw(&mut self, drawer: &mut ComponentDrawer<'_, '_>) -> Result<()>;

    fn calc_children_areas(
        &self,
        children: &Components,
        layout_style: &LayoutStyle,
        area: Rect,
    ) -> Vec<Rect>;

    fn poll_change(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()>;
}

impl<C: Component> AnyComponent for C {
    fn update(
        &mut self,
        mut props: AnyProps<'_>,
        hooks: Hooks<'_, '_>,
        updater: &mut ComponentUpdater<'_, '_>,
    ) -> Result<()> {
        let props = props.downcast_mut::<C::Props>()?;
        Component::update(self, props, hooks, updater)
    }

    fn draw(&mut self, drawer: &mut ComponentDrawer<'_, '_>) -> Result<()> {
        Component::draw(self, drawer)
    }

    fn calc_children_areas(
        &self,
        children: &Components,
        layout_style: &LayoutStyle,
        area: Rect,
    ) -> Vec<Rect> {
        Component::calc_children_areas(self, children, layout_style, area)
    }

    fn poll_change(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        Component::poll_change(self, cx)
    }
}
