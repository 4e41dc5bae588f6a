use ratatui::layout::Rect;

use crate::component::{Component, Components};
use crate::element::AnyElement;
use crate::error::Result;
use crate::hooks::Hooks;
use crate::render::{ComponentUpdater, LayoutStyle};

#[derive(Debug, Default)]
pub struct FragmentProps {
    pub children: Vec<AnyElement>,
}

/// Groups children without adding a layout box of its own. Every child is
/// given the fragment's full area.
pub struct Fragment;

impl Component for Fragment {
    type Props = FragmentProps;

    fn new(_props: &Self::Props) -> Self {
        Fragment
    }

    fn update(
        &mut self,
        props: &mut Self::Props,
        _hooks: Hooks<'_, '_>,
        updater: &mut ComponentUpdater<'_, '_>,
    ) -> Result<()> {
        updater.set_transparent_layout(true);
        updater.update_children(props.children.iter_mut(), None)
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
