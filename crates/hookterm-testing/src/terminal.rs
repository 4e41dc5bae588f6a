use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::channel::mpsc;
use futures::stream::{BoxStream, StreamExt};
use hookterm_core::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use hookterm_core::ratatui::backend::TestBackend;
use hookterm_core::ratatui::buffer::Buffer;
use hookterm_core::ratatui::layout::Rect;
use hookterm_core::ratatui::{self, Frame};
use hookterm_core::terminal::{InsertBeforeFn, TerminalImpl};

/// Renders a buffer as text, one line per row with trailing blanks removed.
pub fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

#[derive(Default)]
struct ScreenLog {
    frames: Vec<Buffer>,
    inserted: Vec<Buffer>,
    restored: bool,
}

/// Read side of a [`TestTerminal`]: every frame drawn and everything
/// printed above the viewport, kept after the terminal itself is boxed
/// away inside a `Terminal`.
#[derive(Clone, Default)]
pub struct TestScreen {
    log: Arc<Mutex<ScreenLog>>,
}

impl TestScreen {
    fn lock(&self) -> MutexGuard<'_, ScreenLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn frames(&self) -> Vec<Buffer> {
        self.lock().frames.clone()
    }

    pub fn frame_count(&self) -> usize {
        self.lock().frames.len()
    }

    pub fn last_frame(&self) -> Option<Buffer> {
        self.lock().frames.last().cloned()
    }

    /// Text of the most recent frame, or an empty string before the first.
    pub fn frame_text(&self) -> String {
        self.lock()
            .frames
            .last()
            .map(buffer_text)
            .unwrap_or_default()
    }

    pub fn inserted(&self) -> Vec<Buffer> {
        self.lock().inserted.clone()
    }

    pub fn is_restored(&self) -> bool {
        self.lock().restored
    }
}

/// Scripted input for a [`TestTerminal`].
#[derive(Clone)]
pub struct TestInput {
    sender: mpsc::UnboundedSender<Event>,
}

impl TestInput {
    pub fn send(&self, event: Event) {
        if self.sender.unbounded_send(event).is_err() {
            log::warn!("test input sent after the terminal went away");
        }
    }

    pub fn key(&self, code: KeyCode) {
        self.send(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    pub fn ctrl_c(&self) {
        self.send(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
    }

    /// Ends the input stream, which the render loop treats as terminating.
    pub fn close(&self) {
        self.sender.close_channel();
    }
}

/// Headless terminal backed by ratatui's `TestBackend`.
pub struct TestTerminal {
    terminal: ratatui::Terminal<TestBackend>,
    input: Option<mpsc::UnboundedReceiver<Event>>,
    sender: mpsc::UnboundedSender<Event>,
    screen: TestScreen,
}

impl TestTerminal {
    pub fn new(width: u16, height: u16) -> io::Result<Self> {
        let (sender, receiver) = mpsc::unbounded();
        Ok(Self {
            terminal: ratatui::Terminal::new(TestBackend::new(width, height))?,
            input: Some(receiver),
            sender,
            screen: TestScreen::default(),
        })
    }

    pub fn input(&self) -> TestInput {
        TestInput {
            sender: self.sender.clone(),
        }
    }

    pub fn screen(&self) -> TestScreen {
        self.screen.clone()
    }
}

impl TerminalImpl for TestTerminal {
    fn event_stream(&mut self) -> io::Result<BoxStream<'static, Event>> {
        match self.input.take() {
            Some(receiver) => Ok(receiver.boxed()),
            None => Err(io::Error::other("test input stream already taken")),
        }
    }

    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame<'_>)) -> io::Result<()> {
        let completed = self.terminal.draw(|frame| render(frame))?;
        let buffer = completed.buffer.clone();
        self.screen.lock().frames.push(buffer);
        Ok(())
    }

    fn insert_before(&mut self, height: u16, draw: InsertBeforeFn) -> io::Result<()> {
        let width = self.terminal.size()?.width;
        let mut buffer = Buffer::empty(Rect::new(0, 0, width, height));
        draw(&mut buffer);
        self.screen.lock().inserted.push(buffer);
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        self.screen.lock().restored = true;
        Ok(())
    }
}
