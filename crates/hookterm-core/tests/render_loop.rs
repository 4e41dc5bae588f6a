use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use hookterm_core::prelude::*;
use hookterm_core::ratatui::text::Line;
use hookterm_core::{render_loop, Error, Result, Terminal};
use hookterm_macros::component;
use hookterm_testing::{TestHarness, TestTerminal};
use tokio::sync::mpsc;

type Handle<T> = Arc<Mutex<Option<State<T>>>>;

#[derive(Clone)]
struct CounterProps {
    ticks: Arc<Mutex<Option<mpsc::UnboundedReceiver<()>>>>,
    handle: Handle<u32>,
}

#[component]
fn Counter(mut hooks: Hooks, props: &CounterProps) -> Element<Adapter> {
    let count = hooks.use_state(|| 0u32);
    *props.handle.lock().unwrap() = Some(count.clone());

    let receiver = props.ticks.lock().unwrap().take();
    let mut counter = count.clone();
    hooks.use_future(async move {
        let Some(mut ticks) = receiver else {
            return;
        };
        while ticks.recv().await.is_some() {
            counter += 1;
        }
    });

    Element::new(AdapterProps::widget(Line::from(format!("Counter: {count}"))))
}

struct AppProps {
    show: Arc<AtomicBool>,
    counter: CounterProps,
}

#[component]
fn App(props: &AppProps) -> Element<View> {
    let mut view = ViewProps::default();
    if props.show.load(Ordering::SeqCst) {
        view.children
            .push(Element::<Counter>::new(props.counter.clone()).into_any());
    }
    Element::new(view)
}

#[tokio::test]
async fn counter_reaches_five_then_stops_once_removed() {
    let (ticks, receiver) = mpsc::unbounded_channel();
    let show = Arc::new(AtomicBool::new(true));
    let handle = Handle::default();
    let root = Element::<App>::new(AppProps {
        show: show.clone(),
        counter: CounterProps {
            ticks: Arc::new(Mutex::new(Some(receiver))),
            handle: handle.clone(),
        },
    });
    let mut harness = TestHarness::new(root, 20, 3).unwrap();

    harness.render().unwrap();
    assert!(harness.frame_text().contains("Counter: 0"));

    for _ in 0..5 {
        ticks.send(()).unwrap();
        harness.next_frame().await.unwrap();
    }
    assert!(harness.frame_text().contains("Counter: 5"));

    show.store(false, Ordering::SeqCst);
    harness.render().unwrap();
    let count = handle.lock().unwrap().clone().unwrap();
    assert!(!count.is_alive());

    for _ in 0..5 {
        assert!(ticks.send(()).is_err());
    }
    assert!(harness.wait_for_change().now_or_never().is_none());
    assert!(!harness.frame_text().contains("Counter"));
}

struct ProbeProps {
    label: &'static str,
    handle: Handle<u32>,
}

#[component]
fn Probe(mut hooks: Hooks, props: &ProbeProps) -> Element<Adapter> {
    let value = hooks.use_state(|| 0u32);
    *props.handle.lock().unwrap() = Some(value.clone());
    Element::new(AdapterProps::widget(Line::from(format!(
        "{}={}",
        props.label, value
    ))))
}

fn probe(label: &'static str, handle: &Handle<u32>) -> AnyElement {
    let probe = Element::<Probe>::new(ProbeProps {
        label,
        handle: handle.clone(),
    });
    Element::<View>::new(ViewProps::default().child(probe))
        .with_key(label)
        .into_any()
}

#[tokio::test]
async fn one_wake_picks_up_changes_from_every_subtree() {
    let left = Handle::default();
    let right = Handle::default();
    let root = Element::<View>::new(
        ViewProps::default()
            .child(probe("left", &left))
            .child(probe("right", &right)),
    );
    let mut harness = TestHarness::new(root, 20, 4).unwrap();
    harness.render().unwrap();

    left.lock().unwrap().as_ref().unwrap().set(1);
    right.lock().unwrap().as_ref().unwrap().set(2);

    assert!(harness.wait_for_change().now_or_never().is_some());
    harness.render().unwrap();
    let text = harness.frame_text();
    assert!(text.contains("left=1"), "{text}");
    assert!(text.contains("right=2"), "{text}");

    assert!(harness.wait_for_change().now_or_never().is_none());
}

#[component]
fn QuitWithHandle(mut hooks: Hooks) -> Element<Fragment> {
    let exit = hooks.use_exit();
    exit.exit();
    Element::new(FragmentProps::default())
}

#[tokio::test]
async fn exit_handle_allows_one_more_render() {
    let mut harness = TestHarness::new(Element::<QuitWithHandle>::new(NoProps), 10, 2).unwrap();

    harness.run().await.unwrap();

    assert!(harness.should_exit());
    assert_eq!(harness.render_count(), 2);
    assert!(harness.screen().is_restored());
}

#[component]
fn QuitWithContext(hooks: Hooks) -> Result<Element<Fragment>> {
    hooks.use_context_mut::<SystemContext>()?.exit();
    Ok(Element::new(FragmentProps::default()))
}

#[tokio::test]
async fn exit_during_update_stops_without_another_render() {
    let backend = TestTerminal::new(10, 2).unwrap();
    let screen = backend.screen();

    render_loop(
        Element::<QuitWithContext>::new(NoProps),
        Terminal::new(backend).unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(screen.frame_count(), 1);
    assert!(screen.is_restored());
}

#[tokio::test]
async fn ctrl_c_ends_the_loop() {
    let mut harness =
        TestHarness::new(Element::<Fragment>::new(FragmentProps::default()), 10, 2).unwrap();
    harness.input().ctrl_c();

    harness.run().await.unwrap();

    assert!(harness.terminal().received_terminating_input());
    assert!(!harness.should_exit());
    assert_eq!(harness.render_count(), 1);
}

#[tokio::test]
async fn closed_input_ends_the_loop() {
    let mut harness =
        TestHarness::new(Element::<Fragment>::new(FragmentProps::default()), 10, 2).unwrap();
    harness.input().close();

    harness.run().await.unwrap();

    assert!(harness.terminal().received_terminating_input());
    assert!(harness.screen().is_restored());
}

#[component]
fn Broken() -> Result<Element<Fragment>> {
    Err(Error::component("boom"))
}

#[tokio::test]
async fn errors_propagate_and_the_terminal_is_restored() {
    let backend = TestTerminal::new(10, 2).unwrap();
    let screen = backend.screen();

    let outcome = render_loop(
        Element::<Broken>::new(NoProps),
        Terminal::new(backend).unwrap(),
    )
    .await;

    match outcome {
        Err(Error::Component(err)) => assert_eq!(err.to_string(), "boom"),
        other => panic!("expected a component error, got {other:?}"),
    }
    assert!(screen.is_restored());
    assert_eq!(screen.frame_count(), 0);
}
