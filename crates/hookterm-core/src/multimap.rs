use std::collections::VecDeque;
use std::hash::Hash;

use crate::hash::map::HashMap;

/// Insertion side of a reconciliation pass: values are appended in order and
/// indexed by key. Converts into a [`RemoveOnlyMultimap`] for the next pass.
pub(crate) struct AppendOnlyMultimap<K, V> {
    items: Vec<Option<V>>,
    index: HashMap<K, VecDeque<usize>>,
}

impl<K, V> Default for AppendOnlyMultimap<K, V> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::default(),
        }
    }
}

impl<K, V> AppendOnlyMultimap<K, V>
where
    K: Eq + Hash,
{
    pub fn push_back(&mut self, key: K, value: V) {
        let position = self.items.len();
        self.items.push(Some(value));
        self.index.entry(key).or_default().push_back(position);
    }
}

/// Consumption side of a reconciliation pass. Values sharing a key are
/// handed out first-in-first-out; anything never popped is dropped along
/// with the map.
pub struct RemoveOnlyMultimap<K, V> {
    items: Vec<Option<V>>,
    index: HashMap<K, VecDeque<usize>>,
}

impl<K, V> Default for RemoveOnlyMultimap<K, V> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::default(),
        }
    }
}

impl<K, V> From<AppendOnlyMultimap<K, V>> for RemoveOnlyMultimap<K, V> {
    fn from(value: AppendOnlyMultimap<K, V>) -> Self {
        Self {
            items: value.items,
            index: value.index,
        }
    }
}

impl<K, V> RemoveOnlyMultimap<K, V>
where
    K: Eq + Hash,
{
    pub fn pop_front(&mut self, key: &K) -> Option<V> {
        let position = self.index.get_mut(key)?.pop_front()?;
        self.items[position].take()
    }

    /// Pops the oldest value for `key` that `accept` approves. Rejected
    /// values keep their place and are dropped with the map unless a later
    /// call claims them.
    pub fn pop_first_match(&mut self, key: &K, mut accept: impl FnMut(&V) -> bool) -> Option<V> {
        let queue = self.index.get_mut(key)?;
        let items = &mut self.items;
        let slot = queue
            .iter()
            .position(|&position| items[position].as_ref().is_some_and(&mut accept))?;
        let position = queue.remove(slot)?;
        items[position].take()
    }
}

impl<K, V> RemoveOnlyMultimap<K, V> {
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.items.iter().filter_map(Option::as_ref)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.items.iter_mut().filter_map(Option::as_mut)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
