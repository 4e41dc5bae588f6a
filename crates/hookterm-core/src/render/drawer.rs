use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;

/// Paint handle passed down the tree during a draw pass. `area` is the
/// region assigned to the component currently being drawn.
pub struct ComponentDrawer<'a, 'b> {
    pub area: Rect,
    frame: &'a mut Frame<'b>,
}

impl<'a, 'b> ComponentDrawer<'a, 'b> {
    pub(crate) fn new(frame: &'a mut Frame<'b>, area: Rect) -> Self {
        Self { area, frame }
    }

    pub fn frame(&mut self) -> &mut Frame<'b> {
        self.frame
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.frame.buffer_mut()
    }

    /// Renders `widget` into the current area.
    pub fn render_widget<W: Widget>(&mut self, widget: W) {
        self.frame.render_widget(widget, self.area);
    }
}
