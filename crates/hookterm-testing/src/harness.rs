use hookterm_core::ratatui::buffer::Buffer;
use hookterm_core::{AnyElement, Result, Terminal, Tree};

use crate::terminal::{TestInput, TestScreen, TestTerminal};

/// Drives a mounted tree one step at a time against a [`TestTerminal`].
pub struct TestHarness {
    tree: Tree,
    terminal: Terminal,
    input: TestInput,
    screen: TestScreen,
}

impl TestHarness {
    pub fn new(element: impl Into<AnyElement>, width: u16, height: u16) -> Result<Self> {
        let backend = TestTerminal::new(width, height)?;
        let input = backend.input();
        let screen = backend.screen();
        Ok(Self {
            tree: Tree::new(element)?,
            terminal: Terminal::new(backend)?,
            input,
            screen,
        })
    }

    pub fn input(&self) -> &TestInput {
        &self.input
    }

    pub fn screen(&self) -> &TestScreen {
        &self.screen
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    /// One update pass and one draw pass.
    pub fn render(&mut self) -> Result<()> {
        self.tree.render(&mut self.terminal)
    }

    /// Resolves on the next change reported by the tree. Input is not read.
    pub async fn wait_for_change(&mut self) {
        self.tree.wait().await
    }

    /// Waits for a change, then renders.
    pub async fn next_frame(&mut self) -> Result<()> {
        self.wait_for_change().await;
        self.render()
    }

    /// Reads and dispatches one input event, then renders.
    pub async fn next_input(&mut self) -> Result<()> {
        self.terminal.wait().await;
        self.render()
    }

    /// Runs the full render loop until exit or terminating input, then
    /// restores the terminal.
    pub async fn run(&mut self) -> Result<()> {
        let outcome = self.tree.run(&mut self.terminal).await;
        self.terminal.restore()?;
        outcome
    }

    pub fn should_exit(&self) -> bool {
        self.tree.should_exit()
    }

    pub fn render_count(&self) -> u64 {
        self.tree.render_count()
    }

    pub fn frame_text(&self) -> String {
        self.screen.frame_text()
    }

    pub fn frames(&self) -> Vec<Buffer> {
        self.screen.frames()
    }
}
