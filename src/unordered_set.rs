//! UnorderedSet: hash set backed by [`ChainedTable`].
//!
//! Iteration order follows the table layout (bucket, then insertion order
//! within a chain) and changes when the table grows.

use crate::chained_table::{self, ChainedTable};
use crate::config::TableConfig;
use crate::error::Result;
use crate::pair::Pair;
use crate::set_algebra::{self, SetBacking};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use hashbrown::hash_map::DefaultHashBuilder;

#[derive(Clone)]
pub struct UnorderedSet<T, S = DefaultHashBuilder> {
    table: ChainedTable<T, (), S>,
}

impl<T> UnorderedSet<T> {
    pub fn new() -> Self {
        Self {
            table: ChainedTable::new(),
        }
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Ok(Self {
            table: ChainedTable::with_config(config)?,
        })
    }
}

impl<T, S: Default> Default for UnorderedSet<T, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T, S> UnorderedSet<T, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: ChainedTable::with_hasher(hasher),
        }
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self> {
        Ok(Self {
            table: ChainedTable::with_config_and_hasher(config, hasher)?,
        })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Bucket count of the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn config(&self) -> &TableConfig {
        self.table.config()
    }

    pub fn hasher(&self) -> &S {
        self.table.hasher()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    pub fn for_each<F: FnMut(&T)>(&self, mut visit: F) {
        self.table.for_each(|k, _| visit(k));
    }

    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.table.try_reserve(additional)
    }
}

impl<T, S> UnorderedSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.contains(q)
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get_key_value(q).map(|(k, _)| k)
    }

    /// Add `value` if absent. Returns whether the set changed.
    pub fn insert(&mut self, value: T) -> bool {
        self.table.insert(value, ())
    }

    /// [`insert`](Self::insert) that reports allocation failure instead of
    /// aborting. On `Err` the set is unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<bool> {
        self.table.try_insert(value, ())
    }

    pub fn remove<Q>(&mut self, q: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(q).is_some()
    }

    pub fn take<Q>(&mut self, q: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(q).map(Pair::into_key)
    }
}

impl<T, S> UnorderedSet<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    pub fn union(&self, other: &Self) -> Self {
        set_algebra::union(Some(self), Some(other)).unwrap_or_else(|| self.empty_like())
    }

    pub fn intersection(&self, other: &Self) -> Self {
        set_algebra::intersection(Some(self), Some(other)).unwrap_or_else(|| self.empty_like())
    }

    pub fn difference(&self, other: &Self) -> Self {
        set_algebra::difference(Some(self), Some(other)).unwrap_or_else(|| self.empty_like())
    }

    pub fn symmetric_difference(&self, other: &Self) -> Self {
        set_algebra::symmetric_difference(Some(self), Some(other))
            .unwrap_or_else(|| self.empty_like())
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        set_algebra::is_disjoint(Some(self), Some(other))
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        set_algebra::is_subset(Some(self), Some(other))
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        set_algebra::is_superset(Some(self), Some(other))
    }
}

impl<T, S> SetBacking for UnorderedSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Clone,
{
    type Elem = T;
    type Elems<'a> = Iter<'a, T> where Self: 'a;

    fn empty_like(&self) -> Self {
        Self {
            table: self.table.empty_like(),
        }
    }

    fn len(&self) -> usize {
        self.table.len()
    }

    fn contains_elem(&self, e: &T) -> bool {
        self.table.contains(e)
    }

    fn insert_elem(&mut self, e: T) -> bool {
        self.table.insert(e, ())
    }

    fn elems(&self) -> Self::Elems<'_> {
        self.iter()
    }
}

impl<T: fmt::Debug, S> fmt::Debug for UnorderedSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Membership equality; layout and capacity are irrelevant.
impl<T, S> PartialEq for UnorderedSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|e| other.contains(e))
    }
}

impl<T: Eq + Hash, S: BuildHasher> Eq for UnorderedSet<T, S> {}

impl<T, S> FromIterator<T> for UnorderedSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut s = Self::default();
        s.extend(iter);
        s
    }
}

impl<T: Eq + Hash, S: BuildHasher> Extend<T> for UnorderedSet<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for e in iter {
            self.insert(e);
        }
    }
}

pub struct Iter<'a, T> {
    inner: chained_table::Iter<'a, T, ()>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

pub struct IntoIter<T> {
    inner: chained_table::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next().map(Pair::into_key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T, S> IntoIterator for UnorderedSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a UnorderedSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
