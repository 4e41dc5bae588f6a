use super::*;
use futures::task::noop_waker_ref;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Counter(u32);

impl Hook for Counter {}

struct Other;

impl Hook for Other {}

struct Probe {
    polls: Arc<AtomicUsize>,
    ready: bool,
}

impl Hook for Probe {
    fn poll_change(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        if self.ready {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}

#[test]
fn slots_are_reused_in_call_order() {
    let mut slots: Vec<Box<dyn AnyHook>> = Vec::new();
    let stack = ContextStack::empty();
    let mut addresses = Vec::new();

    for update in 0..3u32 {
        let mut hooks = Hooks::new(&mut slots, update == 0, &stack);
        let first = hooks.use_hook(|| Counter(0));
        first.0 += 1;
        assert_eq!(first.0, update + 1);
        let address = first as *const Counter;

        let second = hooks.use_hook(|| Counter(100));
        second.0 += 10;
        assert_eq!(second.0, 100 + 10 * (update + 1));
        addresses.push((address, second as *const Counter));
    }

    assert_eq!(slots.len(), 2);
    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn initializer_runs_only_on_first_update() {
    let mut slots: Vec<Box<dyn AnyHook>> = Vec::new();
    let stack = ContextStack::empty();
    let inits = AtomicUsize::new(0);

    for update in 0..4 {
        let mut hooks = Hooks::new(&mut slots, update == 0, &stack);
        assert_eq!(hooks.is_first_update(), update == 0);
        hooks.use_hook(|| {
            inits.fetch_add(1, Ordering::SeqCst);
            Counter(0)
        });
    }

    assert_eq!(inits.load(Ordering::SeqCst), 1);
}

#[test]
#[should_panic(expected = "hook slot 0 holds")]
fn reordered_hooks_fail_fast() {
    let mut slots: Vec<Box<dyn AnyHook>> = Vec::new();
    let stack = ContextStack::empty();
    {
        let mut hooks = Hooks::new(&mut slots, true, &stack);
        hooks.use_hook(|| Counter(0));
        hooks.use_hook(|| Other);
    }
    let mut hooks = Hooks::new(&mut slots, false, &stack);
    hooks.use_hook(|| Other);
}

#[test]
#[should_panic(expected = "hook slot 1 does not exist")]
fn extra_hook_after_first_update_fails_fast() {
    let mut slots: Vec<Box<dyn AnyHook>> = Vec::new();
    let stack = ContextStack::empty();
    {
        let mut hooks = Hooks::new(&mut slots, true, &stack);
        hooks.use_hook(|| Counter(0));
    }
    let mut hooks = Hooks::new(&mut slots, false, &stack);
    hooks.use_hook(|| Counter(0));
    hooks.use_hook(|| Counter(0));
}

#[test]
fn interrupted_first_update_keeps_its_slots_and_adds_the_rest() {
    let mut slots: Vec<Box<dyn AnyHook>> = Vec::new();
    let stack = ContextStack::empty();
    {
        let mut hooks = Hooks::new(&mut slots, true, &stack);
        hooks.use_hook(|| Counter(1)).0 += 1;
    }
    let mut used = 0;
    {
        let mut hooks = Hooks::new(&mut slots, true, &stack).count_into(&mut used);
        assert_eq!(hooks.use_hook(|| Counter(1)).0, 2);
        assert_eq!(hooks.use_hook(|| Counter(7)).0, 7);
    }
    assert_eq!(used, 2);
    assert_eq!(slots.len(), 2);
}

#[test]
fn slot_list_polls_every_hook_even_after_one_is_ready() {
    let polls: Vec<_> = (0..3).map(|_| Arc::new(AtomicUsize::new(0))).collect();
    let mut slots: Vec<Box<dyn AnyHook>> = polls
        .iter()
        .enumerate()
        .map(|(i, polls)| {
            Box::new(Probe {
                polls: polls.clone(),
                ready: i == 0,
            }) as Box<dyn AnyHook>
        })
        .collect();

    let mut cx = Context::from_waker(noop_waker_ref());
    assert!(Pin::new(&mut slots).poll_change(&mut cx).is_ready());
    assert!(polls.iter().all(|count| count.load(Ordering::SeqCst) == 1));
}

#[test]
fn empty_slot_list_is_pending() {
    let mut slots: Vec<Box<dyn AnyHook>> = Vec::new();
    let mut cx = Context::from_waker(noop_waker_ref());
    assert!(Pin::new(&mut slots).poll_change(&mut cx).is_pending());
}
