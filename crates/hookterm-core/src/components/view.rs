use crate::component::Component;
use crate::element::AnyElement;
use crate::error::Result;
use crate::hooks::Hooks;
use crate::render::{ComponentUpdater, LayoutStyle};

#[derive(Debug, Default)]
pub struct ViewProps {
    pub layout: LayoutStyle,
    pub children: Vec<AnyElement>,
}

impl ViewProps {
    pub fn new(layout: LayoutStyle) -> Self {
        Self {
            layout,
            children: Vec::new(),
        }
    }

    pub fn child(mut self, child: impl Into<AnyElement>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// A layout box: sizes itself within its parent and flows its children
/// along one axis.
pub struct View;

impl Component for View {
    type Props = ViewProps;

    fn new(_props: &Self::Props) -> Self {
        View
    }

    fn update(
        &mut self,
        props: &mut Self::Props,
        _hooks: Hooks<'_, '_>,
        updater: &mut ComponentUpdater<'_, '_>,
    ) -> Result<()> {
        updater.set_layout_style(props.layout);
        updater.update_children(props.children.iter_mut(), None)
    }
}
