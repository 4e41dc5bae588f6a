use std::io;

use futures::stream::{self, StreamExt};
use hookterm_app_shell::{input_events, AppShell};
use hookterm_core::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use hookterm_core::prelude::*;
use hookterm_core::{Error, Result};
use hookterm_macros::component;
use hookterm_testing::TestTerminal;

#[component]
fn Quits(mut hooks: Hooks) -> Element<Fragment> {
    hooks.use_exit().exit();
    Element::new(FragmentProps::default())
}

#[tokio::test]
async fn shell_runs_until_exit_and_restores() {
    let backend = TestTerminal::new(10, 2).unwrap();
    let screen = backend.screen();
    let shell = AppShell::new(Element::<Quits>::new(NoProps), backend).unwrap();

    shell.run().await.unwrap();

    assert_eq!(screen.frame_count(), 2);
    assert!(screen.is_restored());
}

#[component]
fn Fails() -> Result<Element<Fragment>> {
    Err(Error::component("no config"))
}

#[tokio::test]
async fn shell_restores_after_a_failure() {
    let backend = TestTerminal::new(10, 2).unwrap();
    let screen = backend.screen();
    let shell = AppShell::new(Element::<Fails>::new(NoProps), backend).unwrap();

    assert!(shell.run().await.is_err());
    assert!(screen.is_restored());
}

#[tokio::test]
async fn input_stops_at_the_first_read_error() {
    let key = Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
    let source = stream::iter(vec![
        Ok(key.clone()),
        Err(io::Error::other("tty gone")),
        Ok(key.clone()),
    ]);

    let events: Vec<Event> = input_events(source).collect().await;

    assert_eq!(events, vec![key]);
}
