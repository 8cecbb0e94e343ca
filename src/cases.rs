//! Built-in benchmark cases.
//!
//! Every case is a workload written once against the capability traits and
//! instantiated for each candidate container. Cases named with the
//! `nodict` marker need [`OrderedMap`] and are skipped for the unordered
//! baseline.

use std::collections::HashMap;
use std::hint::black_box;
use std::sync::OnceLock;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::candidate::Candidate;
use crate::error::BenchError;
use crate::maps::{KeyListDict, KeyValueMap, OrderedDict, OrderedMap};

pub const KEY_COUNT: usize = 100;
const KEY_SEED: u64 = 0x6f72_6465_7265_6464;

pub type CaseFn = fn(Candidate) -> Result<(), BenchError>;

pub const BUILTIN: &[(&str, CaseFn)] = &[
    ("time_assign", any_map::<Assign>),
    ("time_reassign", any_map::<Reassign>),
    ("time_lookup", any_map::<Lookup>),
    ("time_lookup_missing", any_map::<LookupMissing>),
    ("time_delete", any_map::<Delete>),
    ("time_iterate", any_map::<Iterate>),
    ("time_setdefault", any_map::<SetDefault>),
    ("time_index_nodict", ordered_map::<IndexOf>),
    ("time_insert_front_nodict", ordered_map::<InsertFront>),
    ("time_popitem_nodict", ordered_map::<PopItem>),
    ("time_reverse_nodict", ordered_map::<Reverse>),
];

/// Workload runnable on every candidate.
pub trait Workload {
    fn run<M: KeyValueMap<Key = u64, Value = u64>>() -> Result<(), BenchError>;
}

/// Workload needing positional operations.
pub trait OrderedWorkload {
    fn run<M: OrderedMap<Key = u64, Value = u64>>() -> Result<(), BenchError>;
}

pub fn any_map<W: Workload>(candidate: Candidate) -> Result<(), BenchError> {
    match candidate {
        Candidate::Dict => W::run::<HashMap<u64, u64>>(),
        Candidate::OrderedDict => W::run::<OrderedDict<u64, u64>>(),
        Candidate::KeyListDict => W::run::<KeyListDict<u64, u64>>(),
    }
}

pub fn ordered_map<W: OrderedWorkload>(candidate: Candidate) -> Result<(), BenchError> {
    match candidate {
        Candidate::Dict => Err(BenchError::MissingCapability {
            candidate,
            capability: "positional operations",
        }),
        Candidate::OrderedDict => W::run::<OrderedDict<u64, u64>>(),
        Candidate::KeyListDict => W::run::<KeyListDict<u64, u64>>(),
    }
}

/// Fixed pseudo-random keys, all odd.
pub fn keys() -> &'static [u64] {
    static KEYS: OnceLock<Vec<u64>> = OnceLock::new();
    KEYS.get_or_init(|| {
        let mut rng = ChaCha8Rng::seed_from_u64(KEY_SEED);
        (0..KEY_COUNT).map(|_| rng.gen::<u64>() | 1).collect()
    })
}

/// Keys guaranteed absent from [`keys`], all even.
pub fn missing_keys() -> &'static [u64] {
    static MISSING: OnceLock<Vec<u64>> = OnceLock::new();
    MISSING.get_or_init(|| keys().iter().map(|key| key ^ 1).collect())
}

fn filled<M: KeyValueMap<Key = u64, Value = u64>>() -> M {
    let mut map = M::new();
    for (value, &key) in keys().iter().enumerate() {
        map.set(key, value as u64);
    }
    map
}

pub struct Assign;

impl Workload for Assign {
    fn run<M: KeyValueMap<Key = u64, Value = u64>>() -> Result<(), BenchError> {
        black_box(filled::<M>());
        Ok(())
    }
}

pub struct Reassign;

impl Workload for Reassign {
    fn run<M: KeyValueMap<Key = u64, Value = u64>>() -> Result<(), BenchError> {
        let mut map = filled::<M>();
        for &key in keys() {
            map.set(key, key);
        }
        black_box(map);
        Ok(())
    }
}

pub struct Lookup;

impl Workload for Lookup {
    fn run<M: KeyValueMap<Key = u64, Value = u64>>() -> Result<(), BenchError> {
        let map = filled::<M>();
        for key in keys() {
            black_box(map.get(key));
        }
        Ok(())
    }
}

pub struct LookupMissing;

impl Workload for LookupMissing {
    fn run<M: KeyValueMap<Key = u64, Value = u64>>() -> Result<(), BenchError> {
        let map = filled::<M>();
        for key in missing_keys() {
            black_box(map.contains_key(key));
        }
        Ok(())
    }
}

pub struct Delete;

impl Workload for Delete {
    fn run<M: KeyValueMap<Key = u64, Value = u64>>() -> Result<(), BenchError> {
        let mut map = filled::<M>();
        for key in keys() {
            black_box(map.remove(key));
        }
        Ok(())
    }
}

pub struct Iterate;

impl Workload for Iterate {
    fn run<M: KeyValueMap<Key = u64, Value = u64>>() -> Result<(), BenchError> {
        let map = filled::<M>();
        let total = map
            .iter()
            .fold(0_u64, |acc, (key, value)| acc.wrapping_add(key ^ value));
        black_box(total);
        Ok(())
    }
}

pub struct SetDefault;

impl Workload for SetDefault {
    fn run<M: KeyValueMap<Key = u64, Value = u64>>() -> Result<(), BenchError> {
        let mut map = M::new();
        for &key in keys().iter().step_by(2) {
            map.set(key, 0);
        }
        for &key in keys() {
            *map.get_or_insert_with(key, || 0) += 1;
        }
        black_box(map);
        Ok(())
    }
}

pub struct IndexOf;

impl OrderedWorkload for IndexOf {
    fn run<M: OrderedMap<Key = u64, Value = u64>>() -> Result<(), BenchError> {
        let map = filled::<M>();
        for key in keys() {
            black_box(map.index_of(key));
        }
        Ok(())
    }
}

pub struct InsertFront;

impl OrderedWorkload for InsertFront {
    fn run<M: OrderedMap<Key = u64, Value = u64>>() -> Result<(), BenchError> {
        let mut map = M::new();
        let (&first, rest) = match keys().split_first() {
            Some(split) => split,
            None => return Ok(()),
        };
        map.set(first, 0);
        for (value, &key) in rest.iter().enumerate() {
            map.insert_at(0, key, value as u64)?;
        }
        black_box(map);
        Ok(())
    }
}

pub struct PopItem;

impl OrderedWorkload for PopItem {
    fn run<M: OrderedMap<Key = u64, Value = u64>>() -> Result<(), BenchError> {
        let mut map = filled::<M>();
        while !map.is_empty() {
            black_box(map.pop_item(-1)?);
        }
        Ok(())
    }
}

pub struct Reverse;

impl OrderedWorkload for Reverse {
    fn run<M: OrderedMap<Key = u64, Value = u64>>() -> Result<(), BenchError> {
        let mut map = filled::<M>();
        map.reverse();
        map.reverse();
        black_box(map);
        Ok(())
    }
}
