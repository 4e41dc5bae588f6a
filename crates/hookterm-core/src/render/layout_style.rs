use ratatui::layout::{Constraint, Direction, Flex, Layout, Margin, Offset, Rect};

/// How a component places itself within the area its parent gives it, and
/// how it splits its own area between its children.
///
/// `width` and `height` are read by the parent; the other fields apply to
/// this component's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutStyle {
    pub flex_direction: Direction,
    pub justify_content: Flex,
    pub gap: u16,
    pub margin: Margin,
    pub offset: Offset,
    pub width: Constraint,
    pub height: Constraint,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            flex_direction: Direction::Vertical,
            justify_content: Flex::Legacy,
            gap: 0,
            margin: Margin::new(0, 0),
            offset: Offset::default(),
            width: Constraint::Fill(1),
            height: Constraint::Fill(1),
        }
    }
}

impl LayoutStyle {
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.flex_direction = direction;
        self
    }

    pub fn with_justify(mut self, justify: Flex) -> Self {
        self.justify_content = justify;
        self
    }

    pub fn with_gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: Constraint) -> Self {
        self.height = height;
        self
    }

    /// Area left for children once offset and margin are applied.
    pub fn inner_area(&self, area: Rect) -> Rect {
        area.offset(self.offset).intersection(area).inner(self.margin)
    }

    /// Splits `area` along the main axis using each child's constraint on
    /// that axis, then sizes each slot on the cross axis.
    pub fn split(&self, sizes: &[(Constraint, Constraint)], area: Rect) -> Vec<Rect> {
        let (main, cross): (Vec<_>, Vec<_>) = sizes
            .iter()
            .map(|&(width, height)| match self.flex_direction {
                Direction::Horizontal => (width, height),
                Direction::Vertical => (height, width),
            })
            .unzip();
        let cross_direction = match self.flex_direction {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        };

        let slots = Layout::default()
            .direction(self.flex_direction)
            .flex(self.justify_content)
            .spacing(self.gap)
            .constraints(main)
            .split(area);
        slots
            .iter()
            .zip(cross)
            .map(|(&slot, constraint)| {
                Layout::new(cross_direction, [constraint])
                    .flex(Flex::Start)
                    .split(slot)[0]
            })
            .collect()
    }
}
