use std::io;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream};
use futures::future;
use futures::stream::{BoxStream, Stream, StreamExt};
use hookterm_core::terminal::{is_ctrl_c, InsertBeforeFn, TerminalImpl};
use hookterm_core::{AnyElement, Result, Terminal, Tree};
use ratatui::{DefaultTerminal, Frame, TerminalOptions, Viewport};

/// Terminal backend for a real tty: crossterm input, ratatui output.
///
/// Raw mode and the alternate screen (for fullscreen viewports) are entered
/// on construction and left again by [`restore`](TerminalImpl::restore), or
/// on drop if that never happened.
pub struct CrossTerminal {
    terminal: DefaultTerminal,
    exit_on_ctrl_c: bool,
    mouse_capture: bool,
    restored: bool,
}

impl CrossTerminal {
    pub fn new(viewport: Viewport) -> io::Result<Self> {
        let terminal = match viewport {
            Viewport::Fullscreen => ratatui::try_init()?,
            viewport => ratatui::try_init_with_options(TerminalOptions { viewport })?,
        };
        Ok(Self {
            terminal,
            exit_on_ctrl_c: true,
            mouse_capture: false,
            restored: false,
        })
    }

    pub fn fullscreen() -> io::Result<Self> {
        Self::new(Viewport::Fullscreen)
    }

    pub fn inline(height: u16) -> io::Result<Self> {
        Self::new(Viewport::Inline(height))
    }

    /// Whether ctrl-c ends the render loop. When off, ctrl-c is delivered to
    /// components like any other key.
    pub fn with_exit_on_ctrl_c(mut self, exit_on_ctrl_c: bool) -> Self {
        self.exit_on_ctrl_c = exit_on_ctrl_c;
        self
    }

    /// Reports mouse events, which are off by default in most terminals.
    pub fn with_mouse_capture(mut self) -> io::Result<Self> {
        crossterm::execute!(io::stdout(), EnableMouseCapture)?;
        self.mouse_capture = true;
        Ok(self)
    }

    fn release(&mut self) -> io::Result<()> {
        self.restored = true;
        if self.mouse_capture {
            crossterm::execute!(io::stdout(), DisableMouseCapture)?;
        }
        ratatui::try_restore()
    }
}

/// Ends the stream at the first read error, which the render loop treats as
/// terminating input.
pub fn input_events<S>(events: S) -> BoxStream<'static, Event>
where
    S: Stream<Item = io::Result<Event>> + Send + 'static,
{
    events
        .take_while(|event| {
            if let Err(err) = event {
                log::error!("reading terminal input failed: {err}");
            }
            future::ready(event.is_ok())
        })
        .filter_map(|event| future::ready(event.ok()))
        .boxed()
}

impl TerminalImpl for CrossTerminal {
    fn event_stream(&mut self) -> io::Result<BoxStream<'static, Event>> {
        Ok(input_events(EventStream::new()))
    }

    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame))?;
        Ok(())
    }

    fn insert_before(&mut self, height: u16, draw: InsertBeforeFn) -> io::Result<()> {
        self.terminal.insert_before(height, draw)
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.release()
    }

    fn is_terminating(&self, event: &Event) -> bool {
        self.exit_on_ctrl_c && is_ctrl_c(event)
    }
}

impl Drop for CrossTerminal {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(err) = self.release() {
                log::error!("failed to restore terminal: {err}");
            }
        }
    }
}

/// A mounted element bound to a terminal.
pub struct AppShell {
    tree: Tree,
    terminal: Terminal,
}

impl AppShell {
    pub fn new<T>(element: impl Into<AnyElement>, backend: T) -> Result<Self>
    where
        T: TerminalImpl + 'static,
    {
        Ok(Self {
            tree: Tree::new(element)?,
            terminal: Terminal::new(backend)?,
        })
    }

    pub fn fullscreen(element: impl Into<AnyElement>) -> Result<Self> {
        Self::new(element, CrossTerminal::fullscreen()?)
    }

    pub fn inline(element: impl Into<AnyElement>, height: u16) -> Result<Self> {
        Self::new(element, CrossTerminal::inline(height)?)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn should_exit(&self) -> bool {
        self.tree.should_exit()
    }

    pub fn render(&mut self) -> Result<()> {
        self.tree.render(&mut self.terminal)
    }

    /// Drives the render loop to completion. The terminal is restored
    /// before this returns, whether the loop ended normally or with an error.
    pub async fn run(mut self) -> Result<()> {
        let outcome = self.tree.run(&mut self.terminal).await;
        if let Err(err) = &outcome {
            log::error!("render loop failed: {err}");
        }
        let restored = self.terminal.restore();
        outcome?;
        restored?;
        log::debug!("app finished after {} renders", self.tree.render_count());
        Ok(())
    }
}
