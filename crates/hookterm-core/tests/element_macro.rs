use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use hookterm_core::prelude::*;
use hookterm_core::ratatui::text::Line;
use hookterm_macros::{component, element, Props};
use hookterm_testing::TestHarness;

#[derive(Default, Props)]
struct LabelProps {
    text: String,
}

#[component]
fn Label(props: &LabelProps) -> Element<Adapter> {
    Element::new(AdapterProps::widget(Line::from(props.text.clone())))
}

#[derive(Default, Props)]
struct BoardProps {
    show_middle: bool,
    rows: Vec<u32>,
}

#[component]
fn Board(props: &BoardProps) -> Element<View> {
    element!(View {
        $Line::from("head"),
        #(props.show_middle.then(|| element!(Label(text: "middle")))),
        #(props.rows.iter().map(|row| element!(Label(key: *row, text: format!("row {row}"))))),
    })
}

#[test]
fn element_macro_builds_nested_children() {
    let rows: Vec<u32> = vec![1, 2];
    let mut harness =
        TestHarness::new(element!(Board(show_middle: true, rows: rows)), 10, 4).unwrap();

    harness.render().unwrap();

    assert_eq!(harness.frame_text(), "head\nmiddle\nrow 1\nrow 2");
}

#[test]
fn omitted_optional_children_leave_no_gap() {
    let mut harness = TestHarness::new(element!(Board), 10, 2).unwrap();

    harness.render().unwrap();

    assert_eq!(harness.frame_text(), "head\n");
}

type UpdateLog = Arc<Mutex<Vec<(u32, u32)>>>;

#[derive(Default, Props)]
struct TallyProps {
    id: u32,
    log: UpdateLog,
}

#[component]
fn Tally(mut hooks: Hooks, props: &TallyProps) -> Element<Fragment> {
    let mut seen = hooks.use_state(|| 0u32);
    seen += 1;
    props.log.lock().unwrap().push((props.id, seen.get()));
    Element::new(FragmentProps::default())
}

#[derive(Default, Props)]
struct TallyListProps {
    order: Arc<Mutex<Vec<u32>>>,
    log: UpdateLog,
}

#[component]
fn TallyList(props: &TallyListProps) -> Element<Fragment> {
    let order = props.order.lock().unwrap().clone();
    element!(Fragment {
        #(order.into_iter().map(|id| element!(Tally(key: id, id, log: props.log.clone())))),
    })
}

#[test]
fn keys_given_in_the_macro_survive_reordering() {
    let order = Arc::new(Mutex::new(vec![1, 2]));
    let log = UpdateLog::default();
    let mut harness = TestHarness::new(
        element!(TallyList(order: order.clone(), log: log.clone())),
        10,
        1,
    )
    .unwrap();

    harness.render().unwrap();
    *order.lock().unwrap() = vec![2, 1];
    harness.render().unwrap();

    assert_eq!(*log.lock().unwrap(), vec![(1, 1), (2, 1), (2, 2), (1, 2)]);
}

#[derive(Default, Props)]
struct ReporterProps {
    value: u32,
    on_update: Handler<u32>,
}

#[component]
fn Reporter(props: &mut ReporterProps) -> Element<Fragment> {
    props.on_update.call(props.value);
    Element::new(FragmentProps::default())
}

#[test]
fn handler_props_are_called_from_update() {
    let total = Arc::new(AtomicU32::new(0));
    let sink = total.clone();
    let mut harness = TestHarness::new(
        element!(Reporter(
            value: 7,
            on_update: move |value: u32| {
                sink.fetch_add(value, Ordering::SeqCst);
            },
        )),
        10,
        1,
    )
    .unwrap();

    harness.render().unwrap();
    harness.render().unwrap();

    assert_eq!(total.load(Ordering::SeqCst), 14);
}

#[test]
fn rest_props_fill_the_remaining_fields() {
    let base = BoardProps {
        show_middle: true,
        rows: Vec::new(),
    };
    let mut harness =
        TestHarness::new(element!(Board(rows: vec![5u32], ..base)), 10, 3).unwrap();

    harness.render().unwrap();

    assert_eq!(harness.frame_text(), "head\nmiddle\nrow 5");
}
