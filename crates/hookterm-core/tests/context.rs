use std::sync::{Arc, Mutex};

use hookterm_core::prelude::*;
use hookterm_core::{Error, Result};
use hookterm_macros::component;
use hookterm_testing::TestHarness;

#[derive(Debug, Clone, PartialEq)]
struct Theme(&'static str);

type Sightings = Arc<Mutex<Vec<(&'static str, Option<&'static str>)>>>;

struct ReaderProps {
    name: &'static str,
    seen: Sightings,
}

#[component]
fn Reader(hooks: Hooks, props: &ReaderProps) -> Element<Fragment> {
    let theme = hooks.try_use_context::<Theme>().map(|theme| theme.0);
    props.seen.lock().unwrap().push((props.name, theme));
    Element::new(FragmentProps::default())
}

fn reader(name: &'static str, seen: &Sightings) -> AnyElement {
    Element::<Reader>::new(ReaderProps {
        name,
        seen: seen.clone(),
    })
    .with_key(name)
    .into_any()
}

fn provide(theme: &'static str, children: Vec<AnyElement>) -> AnyElement {
    let mut props = ContextProviderProps::new(Context::owned(Theme(theme)));
    props.children = children;
    Element::<ContextProvider>::new(props).with_key(theme).into_any()
}

#[test]
fn provided_values_are_scoped_and_shadowed() {
    let seen = Sightings::default();
    let root = Element::<Fragment>::new(FragmentProps {
        children: vec![
            reader("before", &seen),
            provide(
                "outer",
                vec![
                    reader("outer-first", &seen),
                    provide("inner", vec![reader("inner", &seen)]),
                    reader("outer-last", &seen),
                ],
            ),
            reader("after", &seen),
        ],
    });
    let mut harness = TestHarness::new(root, 10, 4).unwrap();

    harness.render().unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            ("before", None),
            ("outer-first", Some("outer")),
            ("inner", Some("inner")),
            ("outer-last", Some("outer")),
            ("after", None),
        ]
    );
}

#[derive(Debug, Default)]
struct Hits(u32);

#[component]
fn Bump(hooks: Hooks) -> Result<Element<Fragment>> {
    hooks.use_context_mut::<Hits>()?.0 += 1;
    Ok(Element::new(FragmentProps::default()))
}

struct TallyProps {
    tallies: Arc<Mutex<Vec<u32>>>,
}

#[component]
fn Tally(hooks: Hooks, props: &TallyProps) -> Result<Element<Fragment>> {
    let hits = hooks.use_context::<Hits>()?;
    props.tallies.lock().unwrap().push(hits.0);
    Ok(Element::new(FragmentProps::default()))
}

#[test]
fn owned_context_keeps_writes_across_renders() {
    let tallies = Arc::new(Mutex::new(Vec::new()));
    let root = Element::<ContextProvider>::new(
        ContextProviderProps::new(Context::owned(Hits::default()))
            .child(Element::<Bump>::new(NoProps))
            .child(Element::<Tally>::new(TallyProps {
                tallies: tallies.clone(),
            })),
    );
    let mut harness = TestHarness::new(root, 10, 4).unwrap();

    harness.render().unwrap();
    harness.render().unwrap();

    assert_eq!(*tallies.lock().unwrap(), vec![1, 2]);
}

static SHARED_HITS: Hits = Hits(0);

#[test]
fn shared_context_cannot_be_written() {
    let root = Element::<ContextProvider>::new(
        ContextProviderProps::new(Context::from_ref(&SHARED_HITS))
            .child(Element::<Bump>::new(NoProps)),
    );
    let mut harness = TestHarness::new(root, 10, 4).unwrap();

    match harness.render() {
        Err(Error::Context(err)) => assert!(err.is_not_found()),
        other => panic!("expected a missing context, got {other:?}"),
    }
}

#[test]
fn missing_required_context_fails_the_render() {
    let mut harness = TestHarness::new(Element::<Bump>::new(NoProps), 10, 4).unwrap();

    let err = harness.render().unwrap_err();
    assert!(matches!(err, Error::Context(ref err) if err.is_not_found()));
    assert!(err.to_string().contains("Hits"));
}

#[component]
fn Greedy(hooks: Hooks) -> Result<Element<Fragment>> {
    let _held = hooks.use_context_mut::<Hits>()?;
    let _again = hooks.use_context::<Hits>();
    Ok(Element::new(FragmentProps::default()))
}

#[test]
#[should_panic(expected = "already borrowed")]
fn overlapping_borrows_fail_fast() {
    let root = Element::<ContextProvider>::new(
        ContextProviderProps::new(Context::owned(Hits::default()))
            .child(Element::<Greedy>::new(NoProps)),
    );
    let mut harness = TestHarness::new(root, 10, 4).unwrap();
    let _ = harness.render();
}

struct ExitSeenProps {
    seen: Arc<Mutex<Option<bool>>>,
}

#[component]
fn ExitSeen(hooks: Hooks, props: &ExitSeenProps) -> Result<Element<Fragment>> {
    let system = hooks.use_context::<SystemContext>()?;
    *props.seen.lock().unwrap() = Some(system.should_exit());
    Ok(Element::new(FragmentProps::default()))
}

#[test]
fn system_context_is_visible_from_every_component() {
    let seen = Arc::new(Mutex::new(None));
    let root = Element::<View>::new(ViewProps::default().child(Element::<ExitSeen>::new(
        ExitSeenProps { seen: seen.clone() },
    )));
    let mut harness = TestHarness::new(root, 10, 4).unwrap();

    harness.render().unwrap();

    assert_eq!(*seen.lock().unwrap(), Some(false));
}
