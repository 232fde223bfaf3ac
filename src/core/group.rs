//! Reduce-based grouping of sequences into ordered mappings
//!
//! `try_group_by` folds a slice into a mapping from computed key to the list
//! of (optionally filtered and transformed) elements sharing that key.
//! Groups appear in the order their key was first seen and elements keep
//! their source order inside each group. The source slice is only borrowed.
//!
//! # Examples
//!
//! ```
//! use fnkit::core::group::{group_by_with, GroupOptions};
//!
//! #[derive(Clone)]
//! struct User { name: &'static str, city: &'static str, active: bool }
//!
//! let users = [
//!     User { name: "John", city: "New York", active: true },
//!     User { name: "Jane", city: "Boston", active: false },
//! ];
//!
//! let by_city = group_by_with(
//!     &users,
//!     |u| u.city,
//!     GroupOptions::new()
//!         .filter(|u: &User| u.active)
//!         .transform(|u| u.name.to_string()),
//! );
//!
//! assert_eq!(by_city.get(&"New York"), Some(&vec!["John".to_string()]));
//! assert!(by_city.get(&"Boston").is_none());
//! ```

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::convert::Infallible;
use std::hash::Hash;

type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;
type Transform<'a, T, U, E> = Box<dyn Fn(&T) -> Result<U, E> + 'a>;

/// Optional per-element filter and transform applied while grouping
///
/// The default accepts every element and keeps it unchanged (cloned).
pub struct GroupOptions<'a, T, U, E> {
    predicate: Option<Predicate<'a, T>>,
    transform: Transform<'a, T, U, E>,
}

impl<'a, T: Clone + 'a, E: 'a> GroupOptions<'a, T, T, E> {
    /// Accept all elements, keep them as they are
    pub fn new() -> Self {
        Self {
            predicate: None,
            transform: Box::new(|item: &T| Ok(item.clone())),
        }
    }
}

impl<'a, T: Clone + 'a, E: 'a> Default for GroupOptions<'a, T, T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: 'a, U: 'a, E: 'a> GroupOptions<'a, T, U, E> {
    /// Only group elements for which `predicate` holds
    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Store `transform(item)` instead of the element itself
    pub fn transform<V>(self, transform: impl Fn(&T) -> V + 'a) -> GroupOptions<'a, T, V, E> {
        GroupOptions {
            predicate: self.predicate,
            transform: Box::new(move |item: &T| Ok(transform(item))),
        }
    }

    /// Like [`transform`](Self::transform), for transforms that can fail
    pub fn try_transform<V>(
        self,
        transform: impl Fn(&T) -> Result<V, E> + 'a,
    ) -> GroupOptions<'a, T, V, E> {
        GroupOptions {
            predicate: self.predicate,
            transform: Box::new(transform),
        }
    }

    fn accepts(&self, item: &T) -> bool {
        self.predicate.as_ref().map_or(true, |predicate| predicate(item))
    }
}

/// Ordered mapping from group key to grouped values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groups<K: Hash + Eq, V> {
    inner: IndexMap<K, Vec<V>>,
}

impl<K: Hash + Eq, V> Groups<K, V> {
    fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    fn push(&mut self, key: K, value: V) {
        self.inner.entry(key).or_default().push(value);
    }

    pub fn get(&self, key: &K) -> Option<&Vec<V>> {
        self.inner.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Vec<V>)> {
        self.inner.iter()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<K, Vec<V>> {
        self.inner
    }
}

impl<K: Hash + Eq, V> IntoIterator for Groups<K, V> {
    type Item = (K, Vec<V>);
    type IntoIter = indexmap::map::IntoIter<K, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<K: Hash + Eq + Serialize, V: Serialize> Serialize for Groups<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.inner.iter())
    }
}

/// Pure: Group `items` by a fallible key function
///
/// Elements rejected by the options' predicate are skipped before the key is
/// computed. The first error from `key_fn` or the transform is returned and
/// no partial mapping escapes.
pub fn try_group_by<T, K, U, E>(
    items: &[T],
    key_fn: impl Fn(&T) -> Result<K, E>,
    options: GroupOptions<'_, T, U, E>,
) -> Result<Groups<K, U>, E>
where
    K: Hash + Eq,
{
    items
        .iter()
        .filter(|item| options.accepts(item))
        .try_fold(Groups::new(), |mut groups, item| {
            let key = key_fn(item)?;
            let value = (options.transform)(item)?;
            groups.push(key, value);
            Ok(groups)
        })
}

/// Pure: Group `items` by key with infallible filter/transform options
pub fn group_by_with<T, K, U>(
    items: &[T],
    key_fn: impl Fn(&T) -> K,
    options: GroupOptions<'_, T, U, Infallible>,
) -> Groups<K, U>
where
    K: Hash + Eq,
{
    match try_group_by(items, |item| Ok(key_fn(item)), options) {
        Ok(groups) => groups,
        Err(never) => match never {},
    }
}

/// Pure: Group cloned `items` by key
pub fn group_by<T, K>(items: &[T], key_fn: impl Fn(&T) -> K) -> Groups<K, T>
where
    T: Clone,
    K: Hash + Eq,
{
    group_by_with(items, key_fn, GroupOptions::new())
}
