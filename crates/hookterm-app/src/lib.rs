#![deny(missing_docs)]

//! High level utilities for running hookterm applications with minimal boilerplate.

use std::fs::File;
use std::path::{Path, PathBuf};

use hookterm_app_shell::{AppShell, CrossTerminal};
use hookterm_core::{AnyElement, Result};
use ratatui::Viewport;

/// Builder used to configure and launch a hookterm application.
#[derive(Debug, Clone, Default)]
pub struct AppBuilder {
    options: AppOptions,
}

impl AppBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every option at once.
    pub fn options(mut self, options: AppOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the viewport the application draws into.
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.options.viewport = viewport;
        self
    }

    /// Draws into an inline viewport of `height` rows below the cursor.
    pub fn inline(self, height: u16) -> Self {
        self.viewport(Viewport::Inline(height))
    }

    /// Controls whether ctrl-c ends the application.
    pub fn exit_on_ctrl_c(mut self, exit_on_ctrl_c: bool) -> Self {
        self.options.exit_on_ctrl_c = exit_on_ctrl_c;
        self
    }

    /// Writes log output to the file at `path`.
    pub fn log_target(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.log_target = Some(path.into());
        self
    }

    /// Mounts `element` and runs it until it exits or the user presses ctrl-c.
    pub async fn run(self, element: impl Into<AnyElement>) -> Result<()> {
        run_app(self.options, element.into()).await
    }
}

/// Options used to configure the terminal an application runs in.
#[derive(Debug, Clone)]
pub struct AppOptions {
    viewport: Viewport,
    exit_on_ctrl_c: bool,
    mouse_capture: bool,
    log_target: Option<PathBuf>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            viewport: Viewport::Fullscreen,
            exit_on_ctrl_c: true,
            mouse_capture: false,
            log_target: None,
        }
    }
}

impl AppOptions {
    /// Sets the viewport the application draws into.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Controls whether ctrl-c ends the application. When disabled, ctrl-c
    /// reaches components as a regular key event.
    pub fn with_exit_on_ctrl_c(mut self, exit_on_ctrl_c: bool) -> Self {
        self.exit_on_ctrl_c = exit_on_ctrl_c;
        self
    }

    /// Enables mouse reporting so components can receive mouse events.
    pub fn with_mouse_capture(mut self, mouse_capture: bool) -> Self {
        self.mouse_capture = mouse_capture;
        self
    }

    /// Installs a logger, configured from `RUST_LOG`, that writes to the file
    /// at `path`. Logging to stderr would corrupt the terminal output.
    pub fn with_log_target(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_target = Some(path.into());
        self
    }

    /// The configured viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Whether ctrl-c ends the application.
    pub fn exits_on_ctrl_c(&self) -> bool {
        self.exit_on_ctrl_c
    }

    /// Whether mouse reporting is enabled.
    pub fn captures_mouse(&self) -> bool {
        self.mouse_capture
    }

    /// Where log output goes, if anywhere.
    pub fn log_target(&self) -> Option<&Path> {
        self.log_target.as_deref()
    }
}

/// Mounts `element` with default options and returns the task driving it.
pub async fn mount(element: impl Into<AnyElement>) -> Result<()> {
    run_app(AppOptions::default(), element.into()).await
}

/// Runs `element` on the alternate screen.
pub async fn fullscreen(element: impl Into<AnyElement>) -> Result<()> {
    mount(element).await
}

/// Runs `element` in an inline viewport of `height` rows.
pub async fn inline(element: impl Into<AnyElement>, height: u16) -> Result<()> {
    AppBuilder::new().inline(height).run(element).await
}

/// Launches an application using the provided options.
pub async fn run_with_options(options: AppOptions, element: impl Into<AnyElement>) -> Result<()> {
    run_app(options, element.into()).await
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let installed = env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
    if let Err(err) = installed {
        log::warn!("keeping the existing logger: {err}");
    }
    Ok(())
}

async fn run_app(options: AppOptions, element: AnyElement) -> Result<()> {
    if let Some(path) = &options.log_target {
        init_logging(path)?;
    }
    log::debug!("starting app with {:?}", options.viewport);

    let mut terminal =
        CrossTerminal::new(options.viewport.clone())?.with_exit_on_ctrl_c(options.exit_on_ctrl_c);
    if options.mouse_capture {
        terminal = terminal.with_mouse_capture()?;
    }
    AppShell::new(element, terminal)?.run().await
}
