use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures::task::AtomicWaker;
use ratatui::buffer::Buffer;
use ratatui::widgets::Widget;

use super::{Hook, Hooks};
use crate::render::ComponentUpdater;
use crate::terminal::InsertBeforeFn;

mod private {
    pub trait Sealed {}
    impl Sealed for crate::hooks::Hooks<'_, '_> {}
}

#[derive(Default)]
struct Shared {
    queue: Mutex<VecDeque<(u16, InsertBeforeFn)>>,
    waker: AtomicWaker,
}

/// Queues content to be printed above an inline viewport. The queue is
/// flushed after the owning component's next update.
#[derive(Clone, Default)]
pub struct InsertBeforeHandler {
    shared: Arc<Shared>,
}

impl InsertBeforeHandler {
    fn queue(&self) -> MutexGuard<'_, VecDeque<(u16, InsertBeforeFn)>> {
        self.shared
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert_before<F>(&self, height: u16, draw: F) -> &Self
    where
        F: FnOnce(&mut Buffer) + Send + 'static,
    {
        self.queue().push_back((height, Box::new(draw)));
        self
    }

    pub fn render_before<W>(&self, widget: W, height: u16) -> &Self
    where
        W: Widget + Send + 'static,
    {
        self.insert_before(height, move |buf| {
            let area = buf.area;
            widget.render(area, buf);
        })
    }

    /// Schedules a render so queued content gets flushed.
    pub fn finish(&self) {
        self.shared.waker.wake();
    }
}

impl Hook for InsertBeforeHandler {
    fn poll_change(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.shared.waker.register(cx.waker());
        if self.queue().is_empty() {
            Poll::Pending
        } else {
            Poll::Ready(())
        }
    }

    fn post_component_update(&mut self, updater: &mut ComponentUpdater<'_, '_>) {
        let drained: Vec<_> = self.queue().drain(..).collect();
        for (height, draw) in drained {
            if let Err(err) = updater.terminal().insert_before(height, draw) {
                log::warn!("failed to insert {height} rows before viewport: {err}");
            }
        }
    }
}

pub trait UseInsertBefore: private::Sealed {
    fn use_insert_before(&mut self) -> InsertBeforeHandler;
}

impl UseInsertBefore for Hooks<'_, '_> {
    fn use_insert_before(&mut self) -> InsertBeforeHandler {
        self.use_hook(InsertBeforeHandler::default).clone()
    }
}
