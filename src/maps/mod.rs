//! Key-value containers under comparison and the capabilities the
//! benchmark bodies are written against.

mod key_list;
mod ordered_dict;

use std::collections::{hash_map, HashMap};
use std::hash::Hash;

use crate::error::MapError;

pub use key_list::KeyListDict;
pub use ordered_dict::OrderedDict;

/// Minimal surface every candidate provides.
pub trait KeyValueMap {
    type Key;
    type Value;
    type Iter<'a>: Iterator<Item = (&'a Self::Key, &'a Self::Value)>
    where
        Self: 'a;

    /// Construct an empty map.
    fn new() -> Self
    where
        Self: Sized;

    /// Insert `key` or assign to it when already present.
    fn set(&mut self, key: Self::Key, value: Self::Value);

    fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

    fn contains_key(&self, key: &Self::Key) -> bool {
        self.get(key).is_some()
    }

    fn remove(&mut self, key: &Self::Key) -> Option<Self::Value>;

    fn get_or_insert_with<F>(&mut self, key: Self::Key, default: F) -> &mut Self::Value
    where
        F: FnOnce() -> Self::Value;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    /// Entries in the map's own order.
    fn iter(&self) -> Self::Iter<'_>;
}

/// Positional operations only insertion-ordered maps can offer.
pub trait OrderedMap: KeyValueMap {
    fn index_of(&self, key: &Self::Key) -> Option<usize>;

    /// Place `key` at `index`. Negative indices count from the end and the
    /// resolved index must address an existing position. An existing key
    /// takes the new value and moves.
    fn insert_at(&mut self, index: isize, key: Self::Key, value: Self::Value)
        -> Result<(), MapError>;

    /// Remove and return the entry at `index`; `-1` is the last entry.
    fn pop_item(&mut self, index: isize) -> Result<(Self::Key, Self::Value), MapError>;

    fn reverse(&mut self);

    fn first(&self) -> Option<(&Self::Key, &Self::Value)> {
        self.iter().next()
    }

    fn last(&self) -> Option<(&Self::Key, &Self::Value)> {
        self.iter().last()
    }
}

/// Resolve a possibly negative position against `len`.
pub(crate) fn resolve_index(index: isize, len: usize) -> Result<usize, MapError> {
    let resolved = if index < 0 {
        index + len as isize
    } else {
        index
    };
    if resolved < 0 || resolved as usize >= len {
        return Err(MapError::IndexOutOfRange { index, len });
    }
    Ok(resolved as usize)
}

impl<K: Hash + Eq, V> KeyValueMap for HashMap<K, V> {
    type Key = K;
    type Value = V;
    type Iter<'a>
        = hash_map::Iter<'a, K, V>
    where
        Self: 'a;

    fn new() -> Self {
        HashMap::new()
    }

    fn set(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        HashMap::contains_key(self, key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        HashMap::remove(self, key)
    }

    fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.entry(key).or_insert_with(default)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn clear(&mut self) {
        HashMap::clear(self);
    }

    fn iter(&self) -> Self::Iter<'_> {
        HashMap::iter(self)
    }
}
