use std::sync::Arc;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::component::Component;
use crate::error::Result;
use crate::hooks::Hooks;
use crate::render::{ComponentDrawer, ComponentUpdater, LayoutStyle};

type RenderFn = Arc<dyn Fn(Rect, &mut Buffer) + Send + Sync>;

/// Properties of an [`Adapter`]: a paint function plus the size it asks its
/// parent for.
#[derive(Clone)]
pub struct AdapterProps {
    pub render: RenderFn,
    pub layout: LayoutStyle,
}

impl AdapterProps {
    pub fn new(render: impl Fn(Rect, &mut Buffer) + Send + Sync + 'static) -> Self {
        Self {
            render: Arc::new(render),
            layout: LayoutStyle::default(),
        }
    }

    /// Paints a copy of `widget` on every draw.
    pub fn widget<W>(widget: W) -> Self
    where
        W: Widget + Clone + Send + Sync + 'static,
    {
        Self::new(move |area, buf| widget.clone().render(area, buf))
    }

    pub fn with_layout(mut self, layout: LayoutStyle) -> Self {
        self.layout = layout;
        self
    }
}

impl Default for AdapterProps {
    fn default() -> Self {
        Self::new(|_, _| {})
    }
}

/// Leaf component that draws any ratatui widget or paint closure.
pub struct Adapter {
    render: RenderFn,
}

impl Component for Adapter {
    type Props = AdapterProps;

    fn new(props: &Self::Props) -> Self {
        Self {
            render: props.render.clone(),
        }
    }

    fn update(
        &mut self,
        props: &mut Self::Props,
        _hooks: Hooks<'_, '_>,
        updater: &mut ComponentUpdater<'_, '_>,
    ) -> Result<()> {
        self.render = props.render.clone();
        updater.set_layout_style(props.layout);
        Ok(())
    }

    fn draw(&mut self, drawer: &mut ComponentDrawer<'_, '_>) -> Result<()> {
        let area = drawer.area;
        (self.render)(area, drawer.buffer_mut());
        Ok(())
    }
}
