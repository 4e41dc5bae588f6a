use ratatui::layout::Rect;

use crate::component::{Component, Components};
use crate::context::Context;
use crate::element::AnyElement;
use crate::error::Result;
use crate::hooks::Hooks;
use crate::render::{ComponentUpdater, LayoutStyle};

#[derive(Default)]
pub struct ContextProviderProps {
    pub value: Option<Context<'static>>,
    pub children: Vec<AnyElement>,
}

impl ContextProviderProps {
    pub fn new(value: Context<'static>) -> Self {
        Self {
            value: Some(value),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: impl Into<AnyElement>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// Makes `value` visible to every descendant while they update. A nearer
/// provider of the same type shadows this one.
pub struct ContextProvider;

impl Component for ContextProvider {
    type Props = ContextProviderProps;

    fn new(_props: &Self::Props) -> Self {
        ContextProvider
    }

    fn update(
        &mut self,
        props: &mut Self::Props,
        _hooks: Hooks<'_, '_>,
        updater: &mut ComponentUpdater<'_, '_>,
    ) -> Result<()> {
        updater.set_transparent_layout(true);
        let context = props.value.as_mut().map(Context::borrow);
        updater.update_children(props.children.iter_mut(), context)
    }

    fn calc_children_areas(
        &self,
        children: &Components,
        _layout_style: &LayoutStyle,
        area: Rect,
    ) -> Vec<Rect> {
        vec![area; children.len()]
    }
}
