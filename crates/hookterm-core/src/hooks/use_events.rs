use std::pin::Pin;
use std::task::{Context, Poll};

use crossterm::event::Event;
use futures::Stream;
use ratatui::layout::{Position, Rect};

use super::{Hook, Hooks};
use crate::render::{ComponentDrawer, ComponentUpdater};
use crate::terminal::TerminalEvents;

mod private {
    pub trait Sealed {}
    impl Sealed for crate::hooks::Hooks<'_, '_> {}
}

pub trait UseEvents: private::Sealed {
    /// Calls `f` for every input event, wherever it happens.
    fn use_events<F>(&mut self, f: F)
    where
        F: FnMut(Event) + Send + 'static;

    /// Like [`use_events`](UseEvents::use_events), but mouse events outside
    /// the area this component was last drawn into are skipped.
    fn use_local_events<F>(&mut self, f: F)
    where
        F: FnMut(Event) + Send + 'static;
}

impl UseEvents for Hooks<'_, '_> {
    fn use_events<F>(&mut self, f: F)
    where
        F: FnMut(Event) + Send + 'static,
    {
        let hook = self.use_hook(|| UseEventsImpl::new(false));
        hook.f = Some(Box::new(f));
    }

    fn use_local_events<F>(&mut self, f: F)
    where
        F: FnMut(Event) + Send + 'static,
    {
        let hook = self.use_hook(|| UseEventsImpl::new(true));
        hook.f = Some(Box::new(f));
    }
}

struct UseEventsImpl {
    f: Option<Box<dyn FnMut(Event) + Send>>,
    events: Option<TerminalEvents>,
    local: bool,
    component_area: Rect,
}

impl UseEventsImpl {
    fn new(local: bool) -> Self {
        Self {
            f: None,
            events: None,
            local,
            component_area: Rect::default(),
        }
    }

    fn accepts(&self, event: &Event) -> bool {
        match event {
            Event::Mouse(mouse) if self.local => self
                .component_area
                .contains(Position::new(mouse.column, mouse.row)),
            _ => true,
        }
    }
}

impl Hook for UseEventsImpl {
    fn poll_change(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut handled = false;
        loop {
            let Some(events) = self.events.as_mut() else {
                break;
            };
            let Poll::Ready(Some(event)) = Pin::new(events).poll_next(cx) else {
                break;
            };
            if !self.accepts(&event) {
                continue;
            }
            if let Some(f) = self.f.as_mut() {
                f(event);
                handled = true;
            }
        }
        if handled {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }

    fn post_component_update(&mut self, updater: &mut ComponentUpdater<'_, '_>) {
        if self.events.is_none() {
            self.events = Some(updater.terminal().events());
        }
    }

    fn pre_component_draw(&mut self, drawer: &mut ComponentDrawer<'_, '_>) {
        self.component_area = drawer.area;
    }
}
