use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::slice;

use super::{resolve_index, KeyValueMap, OrderedMap};
use crate::error::MapError;

/// Ordered map built from a plain `HashMap` plus a list of keys in
/// insertion order. Removal and positional operations scan the list.
#[derive(Debug, Clone)]
pub struct KeyListDict<K, V> {
    map: HashMap<K, V>,
    order: Vec<K>,
}

impl<K: Hash + Eq + Clone, V> KeyListDict<K, V> {
    pub fn keys(&self) -> slice::Iter<'_, K> {
        self.order.iter()
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.order.iter().position(|candidate| candidate == key)
    }
}

impl<K: Hash + Eq + Clone, V> Default for KeyListDict<K, V> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V> KeyValueMap for KeyListDict<K, V> {
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
        if !self.map.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.map.insert(key, value);
    }

    fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.map.remove(key)?;
        if let Some(position) = self.position(key) {
            self.order.remove(position);
        }
        Some(value)
    }

    fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        match self.map.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default();
                self.order.push(entry.key().clone());
                entry.insert(value)
            }
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    fn iter(&self) -> Self::Iter<'_> {
        Iter {
            order: self.order.iter(),
            map: &self.map,
        }
    }
}

impl<K: Hash + Eq + Clone, V> OrderedMap for KeyListDict<K, V> {
    fn index_of(&self, key: &K) -> Option<usize> {
        self.position(key)
    }

    fn insert_at(&mut self, index: isize, key: K, value: V) -> Result<(), MapError> {
        let target = resolve_index(index, self.len())?;
        if let Some(current) = self.position(&key) {
            self.order.remove(current);
        }
        self.order.insert(target, key.clone());
        self.map.insert(key, value);
        Ok(())
    }

    fn pop_item(&mut self, index: isize) -> Result<(K, V), MapError> {
        if self.order.is_empty() {
            return Err(MapError::Empty);
        }
        let len = self.len();
        let position = resolve_index(index, len)?;
        let key = self.order.remove(position);
        let value = self
            .map
            .remove(&key)
            .ok_or(MapError::IndexOutOfRange { index, len })?;
        Ok((key, value))
    }

    fn reverse(&mut self) {
        self.order.reverse();
    }
}

/// Iterator over a [`KeyListDict`] following its key list.
pub struct Iter<'a, K, V> {
    order: slice::Iter<'a, K>,
    map: &'a HashMap<K, V>,
}

impl<'a, K: Hash + Eq, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        self.order
            .by_ref()
            .find_map(|key| map.get(key).map(|value| (key, value)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.order.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> KeyListDict<char, u32> {
        let mut map = KeyListDict::new();
        for (value, key) in ['a', 'b', 'c'].into_iter().enumerate() {
            map.set(key, value as u32);
        }
        map
    }

    fn keys_of(map: &KeyListDict<char, u32>) -> String {
        map.keys().collect()
    }

    #[test]
    fn assignment_keeps_position() {
        let mut map = abc();
        map.set('b', 20);
        assert_eq!(keys_of(&map), "abc");
        assert_eq!(map.get(&'b'), Some(&20));
    }

    #[test]
    fn remove_drops_key_from_order() {
        let mut map = abc();
        assert_eq!(map.remove(&'a'), Some(0));
        assert_eq!(keys_of(&map), "bc");
        assert_eq!(map.index_of(&'c'), Some(1));
        assert_eq!(map.remove(&'a'), None);
    }

    #[test]
    fn panicking_default_leaves_order_untouched() {
        let mut map = abc();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            map.get_or_insert_with('d', || panic!("no value for d"));
        }));
        assert!(outcome.is_err());
        assert!(!map.contains_key(&'d'));
        assert_eq!(map.len(), 3);
        assert_eq!(keys_of(&map), "abc");
        assert_eq!(map.iter().count(), 3);
    }

    #[test]
    fn positional_operations_match_ordered_dict() {
        let mut map = abc();
        map.insert_at(0, 'z', 25).unwrap();
        map.insert_at(-1, 'a', 9).unwrap();
        assert_eq!(keys_of(&map), "zbca");
        assert_eq!(map.pop_item(1), Ok(('b', 1)));
        map.reverse();
        assert_eq!(keys_of(&map), "acz");
        assert_eq!(
            map.insert_at(3, 'q', 0),
            Err(MapError::IndexOutOfRange { index: 3, len: 3 })
        );
        map.clear();
        assert_eq!(map.pop_item(-1), Err(MapError::Empty));
    }
}
