use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use hookterm_core::prelude::*;
use hookterm_core::Result;
use hookterm_macros::component;
use hookterm_testing::TestHarness;

#[derive(Default)]
struct Journal {
    mounts: AtomicUsize,
    updates: Mutex<Vec<(u32, u32)>>,
}

struct ItemProps {
    id: u32,
    journal: Arc<Journal>,
}

/// Records its mount and, on every update, how many updates its own state
/// has seen.
struct Item;

impl Component for Item {
    type Props = ItemProps;

    fn new(props: &ItemProps) -> Self {
        props.journal.mounts.fetch_add(1, Ordering::SeqCst);
        Item
    }

    fn update(
        &mut self,
        props: &mut ItemProps,
        mut hooks: Hooks<'_, '_>,
        _updater: &mut ComponentUpdater<'_, '_>,
    ) -> Result<()> {
        let mut seen = hooks.use_state(|| 0u32);
        seen += 1;
        props
            .journal
            .updates
            .lock()
            .unwrap()
            .push((props.id, seen.get()));
        Ok(())
    }
}

struct ListProps {
    order: Arc<Mutex<Vec<u32>>>,
    journal: Arc<Journal>,
}

#[component]
fn List(props: &ListProps) -> Element<Fragment> {
    let order = props.order.lock().unwrap().clone();
    let children = order
        .into_iter()
        .map(|id| {
            Element::<Item>::new(ItemProps {
                id,
                journal: props.journal.clone(),
            })
            .with_key(id)
            .into_any()
        })
        .collect();
    Element::new(FragmentProps { children })
}

fn list(order: &Arc<Mutex<Vec<u32>>>, journal: &Arc<Journal>) -> Element<List> {
    Element::new(ListProps {
        order: order.clone(),
        journal: journal.clone(),
    })
}

#[test]
fn reordered_keys_reuse_instances_and_their_state() {
    let order = Arc::new(Mutex::new(vec![1, 2]));
    let journal = Arc::new(Journal::default());
    let mut harness = TestHarness::new(list(&order, &journal), 10, 2).unwrap();

    harness.render().unwrap();
    *order.lock().unwrap() = vec![2, 1];
    harness.render().unwrap();

    assert_eq!(journal.mounts.load(Ordering::SeqCst), 2);
    assert_eq!(
        *journal.updates.lock().unwrap(),
        vec![(1, 1), (2, 1), (2, 2), (1, 2)]
    );
}

#[test]
fn new_and_removed_keys_mount_and_unmount() {
    let order = Arc::new(Mutex::new(vec![1, 2]));
    let journal = Arc::new(Journal::default());
    let mut harness = TestHarness::new(list(&order, &journal), 10, 2).unwrap();

    harness.render().unwrap();
    *order.lock().unwrap() = vec![2, 3];
    harness.render().unwrap();

    assert_eq!(journal.mounts.load(Ordering::SeqCst), 3);
    let updates = journal.updates.lock().unwrap();
    assert_eq!(updates[2..], [(2, 2), (3, 1)]);
}

#[test]
fn duplicate_keys_match_in_order() {
    let order = Arc::new(Mutex::new(vec![7, 7]));
    let journal = Arc::new(Journal::default());
    let mut harness = TestHarness::new(list(&order, &journal), 10, 2).unwrap();

    harness.render().unwrap();
    harness.render().unwrap();
    *order.lock().unwrap() = vec![7];
    harness.render().unwrap();

    assert_eq!(journal.mounts.load(Ordering::SeqCst), 2);
    let updates = journal.updates.lock().unwrap();
    assert_eq!(updates[..], [(7, 1), (7, 1), (7, 2), (7, 2), (7, 3)]);
}

struct Other;

impl Component for Other {
    type Props = ItemProps;

    fn new(props: &ItemProps) -> Self {
        props.journal.mounts.fetch_add(1, Ordering::SeqCst);
        Other
    }
}

struct SwapProps {
    use_other: Arc<AtomicBool>,
    journal: Arc<Journal>,
}

#[component]
fn Swap(props: &SwapProps) -> AnyElement {
    let child = ItemProps {
        id: 0,
        journal: props.journal.clone(),
    };
    if props.use_other.load(Ordering::SeqCst) {
        Element::<Other>::new(child).with_key("slot").into_any()
    } else {
        Element::<Item>::new(child).with_key("slot").into_any()
    }
}

#[test]
fn same_key_with_a_different_type_remounts() {
    let use_other = Arc::new(AtomicBool::new(false));
    let journal = Arc::new(Journal::default());
    let mut harness = TestHarness::new(
        Element::<Swap>::new(SwapProps {
            use_other: use_other.clone(),
            journal: journal.clone(),
        }),
        10,
        2,
    )
    .unwrap();

    harness.render().unwrap();
    use_other.store(true, Ordering::SeqCst);
    harness.render().unwrap();
    use_other.store(false, Ordering::SeqCst);
    harness.render().unwrap();

    assert_eq!(journal.mounts.load(Ordering::SeqCst), 3);
    // The item came back as a fresh instance with fresh state.
    assert_eq!(*journal.updates.lock().unwrap(), vec![(0, 1), (0, 1)]);
}

struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

struct WorkerProps {
    drops: Arc<AtomicUsize>,
    polls: Arc<AtomicUsize>,
}

#[component]
fn Worker(mut hooks: Hooks, props: &WorkerProps) -> Element<Fragment> {
    let drops = props.drops.clone();
    let polls = props.polls.clone();
    hooks.use_future(async move {
        let _guard = DropCounter(drops);
        polls.fetch_add(1, Ordering::SeqCst);
        futures::future::pending::<()>().await;
    });
    Element::new(FragmentProps::default())
}

struct HostProps {
    show: Arc<AtomicBool>,
    drops: Arc<AtomicUsize>,
    polls: Arc<AtomicUsize>,
}

#[component]
fn Host(props: &HostProps) -> Element<Fragment> {
    let mut children = Vec::new();
    if props.show.load(Ordering::SeqCst) {
        children.push(
            Element::<Worker>::new(WorkerProps {
                drops: props.drops.clone(),
                polls: props.polls.clone(),
            })
            .into_any(),
        );
    }
    Element::new(FragmentProps { children })
}

#[tokio::test]
async fn removed_child_cancels_its_work_once() {
    let show = Arc::new(AtomicBool::new(true));
    let drops = Arc::new(AtomicUsize::new(0));
    let polls = Arc::new(AtomicUsize::new(0));
    let mut harness = TestHarness::new(
        Element::<Host>::new(HostProps {
            show: show.clone(),
            drops: drops.clone(),
            polls: polls.clone(),
        }),
        10,
        2,
    )
    .unwrap();

    harness.render().unwrap();
    assert!(futures::FutureExt::now_or_never(harness.wait_for_change()).is_none());
    assert_eq!(polls.load(Ordering::SeqCst), 1);
    assert_eq!(drops.load(Ordering::SeqCst), 0);

    show.store(false, Ordering::SeqCst);
    harness.render().unwrap();
    assert_eq!(drops.load(Ordering::SeqCst), 1);

    harness.render().unwrap();
    assert!(futures::FutureExt::now_or_never(harness.wait_for_change()).is_none());
    assert_eq!(drops.load(Ordering::SeqCst), 1);
    assert_eq!(polls.load(Ordering::SeqCst), 1);
}

struct MixedProps {
    others: Arc<Mutex<Vec<bool>>>,
    journal: Arc<Journal>,
}

#[component]
fn Mixed(props: &MixedProps) -> Element<Fragment> {
    let others = props.others.lock().unwrap().clone();
    let children = others
        .into_iter()
        .map(|other| {
            let child = ItemProps {
                id: 0,
                journal: props.journal.clone(),
            };
            if other {
                Element::<Other>::new(child).with_key("k").into_any()
            } else {
                Element::<Item>::new(child).with_key("k").into_any()
            }
        })
        .collect();
    Element::new(FragmentProps { children })
}

#[test]
fn shared_key_match_skips_instances_of_another_type() {
    let others = Arc::new(Mutex::new(vec![true, false]));
    let journal = Arc::new(Journal::default());
    let mut harness = TestHarness::new(
        Element::<Mixed>::new(MixedProps {
            others: others.clone(),
            journal: journal.clone(),
        }),
        10,
        2,
    )
    .unwrap();

    harness.render().unwrap();
    *others.lock().unwrap() = vec![false];
    harness.render().unwrap();

    assert_eq!(journal.mounts.load(Ordering::SeqCst), 2);
    assert_eq!(*journal.updates.lock().unwrap(), vec![(0, 1), (0, 2)]);
}
