use std::collections::HashMap;
use std::hash::Hash;
use std::slice;

use super::{resolve_index, KeyValueMap, OrderedMap};
use crate::error::MapError;

/// Insertion-ordered hash map.
///
/// Entries sit in stable storage addressed by entry id and the hash index
/// maps each key to its id. A separate order table lists the ids of live
/// entries, so positional operations shift plain ids and never touch the
/// index. Ids freed by removal are reused. Assigning to an existing key
/// keeps its position.
#[derive(Debug, Clone)]
pub struct OrderedDict<K, V> {
    entries: Vec<Option<(K, V)>>,
    free: Vec<usize>,
    index: HashMap<K, usize>,
    order: Vec<usize>,
}

impl<K: Hash + Eq + Clone, V> OrderedDict<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free: Vec::new(),
            index: HashMap::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        KeyValueMap::iter(self).map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        KeyValueMap::iter(self).map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = *self.index.get(key)?;
        self.entries[id].as_mut().map(|(_, value)| value)
    }

    /// Entry id for a new entry, reusing a vacated one when available.
    fn vacant_id(&mut self) -> usize {
        match self.free.pop() {
            Some(id) => id,
            None => {
                self.entries.push(None);
                self.entries.len() - 1
            }
        }
    }

    fn position_of(&self, id: usize) -> Option<usize> {
        self.order.iter().position(|&candidate| candidate == id)
    }

    fn release(&mut self, id: usize) -> Option<(K, V)> {
        let entry = self.entries[id].take()?;
        self.free.push(id);
        Some(entry)
    }
}

impl<K: Hash + Eq + Clone, V> Default for OrderedDict<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V> KeyValueMap for OrderedDict<K, V> {
    type Key = K;
    type Value = V;
    type Iter<'a>
        = Iter<'a, K, V>
    where
        Self: 'a;

    fn new() -> Self {
        Self::default()
    }

    fn set(&mut self, key: K, value: V) {
        if let Some(existing) = self.get_mut(&key) {
            *existing = value;
            return;
        }
        let id = self.vacant_id();
        self.index.insert(key.clone(), id);
        self.entries[id] = Some((key, value));
        self.order.push(id);
    }

    fn get(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries[id].as_ref().map(|(_, value)| value)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        if let Some(position) = self.position_of(id) {
            self.order.remove(position);
        }
        let (_, value) = self.release(id)?;
        Some(value)
    }

    fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        match self.index.get(&key).copied() {
            Some(id) => {
                let (_, value) = self.entries[id].get_or_insert_with(|| (key, default()));
                value
            }
            None => {
                // Nothing is registered until the value exists.
                let value = default();
                let id = self.vacant_id();
                self.index.insert(key.clone(), id);
                self.order.push(id);
                let (_, value) = self.entries[id].insert((key, value));
                value
            }
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.free.clear();
        self.index.clear();
        self.order.clear();
    }

    fn iter(&self) -> Self::Iter<'_> {
        Iter {
            order: self.order.iter(),
            entries: &self.entries,
        }
    }
}

impl<K: Hash + Eq + Clone, V> OrderedMap for OrderedDict<K, V> {
    fn index_of(&self, key: &K) -> Option<usize> {
        let id = *self.index.get(key)?;
        self.position_of(id)
    }

    fn insert_at(&mut self, index: isize, key: K, value: V) -> Result<(), MapError> {
        let target = resolve_index(index, self.len())?;
        match self.index.get(&key).copied() {
            Some(id) => {
                if let Some((_, old)) = self.entries[id].as_mut() {
                    *old = value;
                }
                if let Some(current) = self.position_of(id) {
                    self.order.remove(current);
                }
                self.order.insert(target, id);
            }
            None => {
                let id = self.vacant_id();
                self.index.insert(key.clone(), id);
                self.entries[id] = Some((key, value));
                self.order.insert(target, id);
            }
        }
        Ok(())
    }

    fn pop_item(&mut self, index: isize) -> Result<(K, V), MapError> {
        if self.is_empty() {
            return Err(MapError::Empty);
        }
        let len = self.len();
        let position = resolve_index(index, len)?;
        let id = self.order.remove(position);
        let (key, value) = self
            .release(id)
            .ok_or(MapError::IndexOutOfRange { index, len })?;
        self.index.remove(&key);
        Ok((key, value))
    }

    fn reverse(&mut self) {
        self.order.reverse();
    }
}

/// Iterator over an [`OrderedDict`] in insertion order.
pub struct Iter<'a, K, V> {
    order: slice::Iter<'a, usize>,
    entries: &'a [Option<(K, V)>],
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entries = self.entries;
        self.order.by_ref().find_map(|&id| {
            entries
                .get(id)
                .and_then(Option::as_ref)
                .map(|(key, value)| (key, value))
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of(map: &OrderedDict<&'static str, u32>) -> Vec<&'static str> {
        map.keys().copied().collect()
    }

    fn abc() -> OrderedDict<&'static str, u32> {
        let mut map = OrderedDict::new();
        map.set("a", 1);
        map.set("b", 2);
        map.set("c", 3);
        map
    }

    #[test]
    fn keeps_insertion_order_and_position_on_assign() {
        let mut map = abc();
        map.set("a", 10);
        assert_eq!(keys_of(&map), vec!["a", "b", "c"]);
        assert_eq!(map.get(&"a"), Some(&10));
    }

    #[test]
    fn removal_leaves_order_of_survivors() {
        let mut map = abc();
        assert_eq!(map.remove(&"b"), Some(2));
        assert_eq!(keys_of(&map), vec!["a", "c"]);
        assert_eq!(map.index_of(&"c"), Some(1));
        map.set("b", 4);
        assert_eq!(keys_of(&map), vec!["a", "c", "b"]);
    }

    #[test]
    fn vacated_entries_are_reused() {
        let mut map = OrderedDict::new();
        for key in 0..100_u32 {
            map.set(key, key * 2);
        }
        for key in (0..100).filter(|key| key % 3 != 0) {
            assert_eq!(map.remove(&key), Some(key * 2));
        }
        let expected: Vec<u32> = (0..100).filter(|key| key % 3 == 0).collect();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), expected);
        for (position, key) in expected.iter().enumerate() {
            assert_eq!(map.index_of(key), Some(position));
            assert_eq!(map.get(key), Some(&(key * 2)));
        }
        for key in 100..150_u32 {
            map.set(key, key);
        }
        assert_eq!(map.entries.len(), 100);
        assert_eq!(map.len(), expected.len() + 50);
    }

    #[test]
    fn front_inserts_mixed_with_removals_keep_index_consistent() {
        let mut map = OrderedDict::new();
        let mut model: Vec<u32> = Vec::new();
        map.set(0_u32, 0_u32);
        model.push(0);
        for key in 1..200_u32 {
            map.insert_at(0, key, key + 1).unwrap();
            model.insert(0, key);
            if key % 4 == 0 {
                let victim = key / 2;
                if map.remove(&victim).is_some() {
                    model.retain(|&kept| kept != victim);
                }
            }
        }
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), model);
        for (position, key) in model.iter().enumerate() {
            assert_eq!(map.index_of(key), Some(position));
            let expected = if *key == 0 { 0 } else { key + 1 };
            assert_eq!(map.get(key), Some(&expected));
        }
        assert_eq!(map.iter().len(), model.len());
    }

    #[test]
    fn panicking_default_leaves_map_untouched() {
        let mut map = abc();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            map.get_or_insert_with("d", || panic!("no value for d"));
        }));
        assert!(outcome.is_err());
        assert!(!map.contains_key(&"d"));
        assert_eq!(map.get(&"d"), None);
        assert_eq!(map.len(), 3);
        assert_eq!(keys_of(&map), vec!["a", "b", "c"]);
        *map.get_or_insert_with("d", || 4) += 1;
        assert_eq!(map.get(&"d"), Some(&5));
        assert_eq!(map.index_of(&"d"), Some(3));
    }

    #[test]
    fn insert_at_places_new_and_moves_existing_keys() {
        let mut map = abc();
        map.insert_at(0, "z", 26).unwrap();
        assert_eq!(keys_of(&map), vec!["z", "a", "b", "c"]);

        map.insert_at(-1, "a", 100).unwrap();
        assert_eq!(keys_of(&map), vec!["z", "b", "c", "a"]);
        assert_eq!(map.get(&"a"), Some(&100));

        map.insert_at(1, "c", 3).unwrap();
        assert_eq!(keys_of(&map), vec!["z", "c", "b", "a"]);
        for (position, key) in ["z", "c", "b", "a"].iter().enumerate() {
            assert_eq!(map.index_of(key), Some(position));
        }
    }

    #[test]
    fn insert_at_rejects_positions_past_the_end() {
        let mut map = abc();
        assert_eq!(
            map.insert_at(3, "d", 4),
            Err(MapError::IndexOutOfRange { index: 3, len: 3 })
        );
        let mut empty: OrderedDict<&str, u32> = OrderedDict::new();
        assert!(empty.insert_at(0, "a", 1).is_err());
    }

    #[test]
    fn pop_item_by_position() {
        let mut map = abc();
        assert_eq!(map.pop_item(-1), Ok(("c", 3)));
        assert_eq!(map.pop_item(0), Ok(("a", 1)));
        assert_eq!(map.pop_item(5), Err(MapError::IndexOutOfRange { index: 5, len: 1 }));
        assert_eq!(map.pop_item(-1), Ok(("b", 2)));
        assert_eq!(map.pop_item(-1), Err(MapError::Empty));
    }

    #[test]
    fn pop_item_after_removal() {
        let mut map = abc();
        map.set("d", 4);
        map.remove(&"b");
        assert_eq!(map.pop_item(1), Ok(("c", 3)));
        assert_eq!(keys_of(&map), vec!["a", "d"]);
    }

    #[test]
    fn reverse_inverts_order() {
        let mut map = abc();
        map.remove(&"b");
        map.set("d", 4);
        map.reverse();
        assert_eq!(keys_of(&map), vec!["d", "c", "a"]);
        assert_eq!(map.index_of(&"a"), Some(2));
        assert_eq!(map.first(), Some((&"d", &4)));
        assert_eq!(map.last(), Some((&"a", &1)));
    }
}
