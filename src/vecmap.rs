//! An insertion-ordered map backed by a vector of pairs.
//!
//! Struct values and ordered mappings need a key-value collection that remembers the
//! order entries arrived in, because that order is what goes on the wire. [`VecMap`]
//! keeps entries in insertion order; inserting an existing key replaces its value but
//! keeps its original position.
//!
//! Lookups are linear, which is the right trade for the handful of fields a struct
//! carries.
//!
//! Keys are unique, so two maps are equal when they hold the same entries, whatever
//! order they arrived in. Ordering and hashing agree with that.
//!
//! # Example
//!
//! ```
//! use kcodec::prelude::*;
//!
//! let mut fields = VecMap::new();
//! fields.insert("b", 1);
//! fields.insert("a", 2);
//! fields.insert("b", 3);
//!
//! // "b" keeps its slot but takes the later value
//! assert_eq!(fields.into_iter().collect::<Vec<_>>(), vec![("b", 3), ("a", 2)]);
//! ```

use std::{
    borrow::Borrow,
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    hash::*,
    iter::FromIterator,
    slice::Iter,
    vec::IntoIter,
};

#[derive(Clone, Debug)]
/// A map implemented as a [`Vec`] of pairs in insertion order.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K, V>(Vec<(K, V)>);

impl<K, V> Default for VecMap<K, V> {
    fn default() -> Self { VecMap(Vec::new()) }
}

impl<K, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { Self::default() }

    /// Creates an empty [`VecMap`] with room for `cap` entries.
    pub fn with_capacity(cap: usize) -> Self { VecMap(Vec::with_capacity(cap)) }

    /// Returns the number of entries.
    pub fn len(&self) -> usize { self.0.len() }

    /// Is the map empty?
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> Iter<(K, V)> { self.0.iter() }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> { self.0.iter().map(|(k, _)| k) }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> { self.0.iter().map(|(_, v)| v) }
}

impl<K: Ord, V> VecMap<K, V> {
    fn sorted(&self) -> Vec<&(K, V)> {
        let mut entries: Vec<&(K, V)> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl<K: Eq, V: PartialEq> PartialEq for VecMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).map_or(false, |theirs| theirs == v))
    }
}

impl<K: Eq, V: Eq> Eq for VecMap<K, V> {}

impl<K: Ord, V: Ord> PartialOrd for VecMap<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl<K: Ord, V: Ord> Ord for VecMap<K, V> {
    fn cmp(&self, other: &Self) -> Ordering { self.sorted().cmp(&other.sorted()) }
}

impl<K: Ord + Hash, V: Hash> Hash for VecMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) { self.sorted().hash(state) }
}

impl<K: Eq, V> VecMap<K, V> {
    /// Inserts an entry, returning the value it replaced.
    ///
    /// A new key is appended; an existing key keeps its position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Looks up the value for `key`.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq,
    {
        self.0.iter().find(|(k, _)| Borrow::<Q>::borrow(k) == key).map(|(_, v)| v)
    }

    /// Does the map contain `key`?
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq,
    {
        self.get(key).is_some()
    }

    /// Removes `key`, shifting later entries down.
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq,
    {
        let pos = self.0.iter().position(|(k, _)| Borrow::<Q>::borrow(k) == key)?;
        Some(self.0.remove(pos).1)
    }
}

impl<K: Eq + Hash, V> VecMap<K, V> {
    /// Converts the map into a [`HashMap`].
    pub fn into_hashmap<S: BuildHasher + Default>(self) -> HashMap<K, V, S> {
        self.0.into_iter().collect()
    }
}

impl<K: Eq, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(v: Vec<(K, V)>) -> Self { Self::from_iter(v) }
}

impl<K: Eq, V> From<BTreeMap<K, V>> for VecMap<K, V> {
    fn from(bt: BTreeMap<K, V>) -> Self { VecMap(bt.into_iter().collect()) }
}

impl<K, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<'a, K, V> IntoIterator for &'a VecMap<K, V> {
    type IntoIter = Iter<'a, (K, V)>;
    type Item = &'a (K, V);

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl<K: Eq, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        let iter = iter.into_iter();
        let mut out = VecMap::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}
