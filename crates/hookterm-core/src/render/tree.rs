use std::cell::RefCell;
use std::pin::pin;

use futures::future::select;
use ratatui::Frame;

use super::ComponentDrawer;
use crate::component::InstantiatedComponent;
use crate::context::{Context, ContextStack, SystemContext};
use crate::element::AnyElement;
use crate::error::Result;
use crate::props::AnyProps;
use crate::terminal::Terminal;

/// A mounted root element and everything beneath it.
pub struct Tree {
    root: InstantiatedComponent,
    props: AnyProps<'static>,
    system_context: SystemContext,
    renders: u64,
}

impl Tree {
    pub fn new(element: impl Into<AnyElement>) -> Result<Self> {
        let (key, mut props, helper) = element.into().into_parts();
        let root = InstantiatedComponent::new(key, props.borrow(), helper)?;
        Ok(Self {
            root,
            props,
            system_context: SystemContext::new(),
            renders: 0,
        })
    }

    pub fn root(&self) -> &InstantiatedComponent {
        &self.root
    }

    pub fn should_exit(&self) -> bool {
        self.system_context.should_exit()
    }

    /// Number of completed renders.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Resolves once any hook or component in the tree reports a change.
    pub async fn wait(&mut self) {
        self.root.wait().await
    }

    /// Runs one update pass and one draw pass into a single frame.
    pub fn render(&mut self, terminal: &mut Terminal) -> Result<()> {
        {
            let system_context = RefCell::new(Context::from_mut(&mut self.system_context));
            let context_stack = ContextStack::root(&system_context);
            self.root
                .update(terminal, &context_stack, self.props.borrow())?;
        }

        let root = &mut self.root;
        let mut outcome = Ok(());
        terminal.draw(&mut |frame: &mut Frame<'_>| {
            let area = frame.area();
            let mut drawer = ComponentDrawer::new(frame, area);
            outcome = root.draw(&mut drawer);
        })?;
        outcome?;

        self.renders += 1;
        log::trace!("render {} complete", self.renders);
        Ok(())
    }

    /// Renders until an exit is requested or the terminal reports a
    /// terminating input. Between renders it sleeps until the tree or the
    /// terminal has something new.
    pub async fn run(&mut self, terminal: &mut Terminal) -> Result<()> {
        loop {
            self.render(terminal)?;
            if self.system_context.should_exit() {
                log::debug!("exit requested, stopping render loop");
                break;
            }
            if terminal.received_terminating_input() {
                break;
            }

            {
                let tree_changed = pin!(self.wait());
                let input = pin!(terminal.wait());
                select(tree_changed, input).await;
            }

            if terminal.received_terminating_input() {
                log::debug!("terminating input received, stopping render loop");
                break;
            }
        }
        Ok(())
    }
}

/// Mounts `element` and drives it on `terminal` until it exits. The terminal
/// is restored on every path out, including errors.
pub async fn render_loop(element: impl Into<AnyElement>, mut terminal: Terminal) -> Result<()> {
    let outcome = match Tree::new(element) {
        Ok(mut tree) => tree.run(&mut terminal).await,
        Err(err) => Err(err),
    };
    let restored = terminal.restore();
    if let (Err(_), Err(restore_err)) = (&outcome, &restored) {
        log::warn!("failed to restore terminal: {restore_err}");
    }
    outcome?;
    restored?;
    Ok(())
}
