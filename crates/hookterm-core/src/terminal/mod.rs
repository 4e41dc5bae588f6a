//! Terminal abstraction consumed by the render loop.
//!
//! A [`TerminalImpl`] is the backend: something that can paint a ratatui
//! frame and produce an input stream. [`Terminal`] wraps a backend and fans
//! every input event out to the [`TerminalEvents`] streams handed to hooks.

use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::task::{Context, Poll, Waker};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use ratatui::buffer::Buffer;
use ratatui::Frame;

/// Deferred paint job for content printed above an inline viewport.
pub type InsertBeforeFn = Box<dyn FnOnce(&mut Buffer) + Send>;

/// Backend driven by [`Terminal`].
pub trait TerminalImpl: Send {
    /// Input events, in arrival order. The stream ending is treated as a
    /// terminating input.
    fn event_stream(&mut self) -> io::Result<BoxStream<'static, Event>>;

    /// Paints one frame.
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame<'_>)) -> io::Result<()>;

    /// Prints `height` rows above the viewport.
    fn insert_before(&mut self, height: u16, draw: InsertBeforeFn) -> io::Result<()>;

    /// Puts the terminal back into the mode it was in before the backend was
    /// created. Must be safe to call more than once.
    fn restore(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Whether `event` should end the render loop.
    fn is_terminating(&self, event: &Event) -> bool {
        is_ctrl_c(event)
    }
}

pub fn is_ctrl_c(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            ..
        })
    )
}

#[derive(Default)]
struct TerminalEventsInner {
    pending: VecDeque<Event>,
    waker: Option<Waker>,
}

fn lock(inner: &Mutex<TerminalEventsInner>) -> MutexGuard<'_, TerminalEventsInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Subscription to the terminal's input. Each subscriber sees every event
/// dispatched after it subscribed; dropping it unsubscribes.
pub struct TerminalEvents {
    inner: Arc<Mutex<TerminalEventsInner>>,
}

impl Stream for TerminalEvents {
    type Item = Event;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut inner = lock(&self.inner);
        if let Some(event) = inner.pending.pop_front() {
            Poll::Ready(Some(event))
        } else {
            inner.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

pub struct Terminal {
    backend: Box<dyn TerminalImpl>,
    event_stream: BoxStream<'static, Event>,
    subscribers: Vec<Weak<Mutex<TerminalEventsInner>>>,
    received_terminating_input: bool,
}

impl Terminal {
    pub fn new<T: TerminalImpl + 'static>(backend: T) -> io::Result<Self> {
        Self::from_boxed(Box::new(backend))
    }

    pub fn from_boxed(mut backend: Box<dyn TerminalImpl>) -> io::Result<Self> {
        Ok(Self {
            event_stream: backend.event_stream()?,
            backend,
            subscribers: Vec::new(),
            received_terminating_input: false,
        })
    }

    /// Whether ctrl-c (or the backend's equivalent) was seen, or input ended.
    pub fn received_terminating_input(&self) -> bool {
        self.received_terminating_input
    }

    pub fn draw(&mut self, render: &mut dyn FnMut(&mut Frame<'_>)) -> io::Result<()> {
        self.backend.draw(render)
    }

    pub fn insert_before(&mut self, height: u16, draw: InsertBeforeFn) -> io::Result<()> {
        self.backend.insert_before(height, draw)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        self.backend.restore()
    }

    pub fn events(&mut self) -> TerminalEvents {
        let inner = Arc::new(Mutex::new(TerminalEventsInner::default()));
        self.subscribers.push(Arc::downgrade(&inner));
        TerminalEvents { inner }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|subscriber| subscriber.strong_count() > 0)
            .count()
    }

    /// Waits for the next input event and dispatches it to subscribers.
    ///
    /// Returns after exactly one event, or when input ends. A terminating
    /// event is recorded instead of dispatched.
    pub async fn wait(&mut self) {
        let Some(event) = self.event_stream.next().await else {
            log::debug!("input stream ended");
            self.received_terminating_input = true;
            return;
        };
        if self.backend.is_terminating(&event) {
            log::debug!("terminating input received");
            self.received_terminating_input = true;
            return;
        }
        self.dispatch(event);
    }

    fn dispatch(&mut self, event: Event) {
        log::trace!("dispatching {event:?} to {} subscribers", self.subscribers.len());
        self.subscribers.retain(|subscriber| {
            let Some(subscriber) = subscriber.upgrade() else {
                return false;
            };
            let mut subscriber = lock(&subscriber);
            subscriber.pending.push_back(event.clone());
            if let Some(waker) = subscriber.waker.take() {
                waker.wake();
            }
            true
        });
    }
}

impl fmt::Debug for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminal")
            .field("subscribers", &self.subscribers.len())
            .field(
                "received_terminating_input",
                &self.received_terminating_input,
            )
            .finish()
    }
}
