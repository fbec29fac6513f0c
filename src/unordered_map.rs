//! UnorderedMap: hash map backed by [`ChainedTable`].
//!
//! As with [`OrderedMap`](crate::OrderedMap), a replacing `put` keeps the
//! newly offered key and returns the old value.

use crate::chained_table::{self, ChainedTable};
use crate::config::TableConfig;
use crate::error::Result;
use crate::pair::Pair;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use hashbrown::hash_map::DefaultHashBuilder;

pub use crate::chained_table::Iter;

#[derive(Clone)]
pub struct UnorderedMap<K, V, S = DefaultHashBuilder> {
    table: ChainedTable<K, V, S>,
}

impl<K, V> UnorderedMap<K, V> {
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

impl<K, V, S: Default> Default for UnorderedMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> UnorderedMap<K, V, S> {
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

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.table.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.table.iter(),
        }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.table.iter(),
        }
    }

    pub fn for_each<F: FnMut(&K, &V)>(&self, visit: F) {
        self.table.for_each(visit);
    }

    pub fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.table.try_reserve(additional)
    }
}

impl<K, V, S> UnorderedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.contains(q)
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get(q)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get_key_value(q)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get_mut(q)
    }

    /// Insert or replace. Returns the previous value for an equal key.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.table.put(key, value).map(Pair::into_value)
    }

    /// [`put`](Self::put) that reports allocation failure. On `Err` the map
    /// is unchanged and `key` and `value` are dropped.
    pub fn try_put(&mut self, key: K, value: V) -> Result<Option<V>> {
        Ok(self.table.try_put(key, value)?.map(Pair::into_value))
    }

    /// Insert only when `key` is absent.
    pub fn put_if_absent(&mut self, key: K, value: V) -> bool {
        self.table.insert(key, value)
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(q).map(Pair::into_value)
    }

    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.remove(q).map(Pair::into_parts)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for UnorderedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.table, f)
    }
}

impl<K, V, S> PartialEq for UnorderedMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Eq + Hash, V: Eq, S: BuildHasher> Eq for UnorderedMap<K, V, S> {}

impl<K, V, S> FromIterator<(K, V)> for UnorderedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::default();
        m.extend(iter);
        m
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Extend<(K, V)> for UnorderedMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

pub struct Keys<'a, K, V> {
    inner: chained_table::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    inner: chained_table::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

pub struct IntoIter<K, V> {
    inner: chained_table::IntoIter<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next().map(Pair::into_parts)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, S> IntoIterator for UnorderedMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a UnorderedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn put_get_remove() {
        let mut m = UnorderedMap::new();
        assert_eq!(m.put("k".to_string(), 1), None);
        assert_eq!(m.put("k".to_string(), 2), Some(1));
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("k"), Some(&2));
        *m.get_mut("k").unwrap() *= 10;
        assert_eq!(m.get_key_value("k"), Some((&"k".to_string(), &20)));
        assert_eq!(m.remove("k"), Some(20));
        assert_eq!(m.remove("k"), None);
        assert!(m.is_empty());
    }

    #[test]
    fn try_put_and_put_if_absent() {
        let mut m: UnorderedMap<u32, &str> = UnorderedMap::new();
        assert_eq!(m.try_put(1, "a"), Ok(None));
        assert_eq!(m.try_put(1, "b"), Ok(Some("a")));
        assert!(!m.put_if_absent(1, "c"));
        assert!(m.put_if_absent(2, "c"));
        assert_eq!(m.remove_entry(&2), Some((2, "c")));
        assert_eq!(m.get(&1), Some(&"b"));
    }

    #[test]
    fn keys_values_and_collect() {
        let m: UnorderedMap<u32, u32> = (0..50).map(|k| (k, k * 2)).collect();
        assert_eq!(m.keys().len(), 50);
        let by_key: BTreeMap<u32, u32> = m.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(by_key.len(), 50);
        assert_eq!(m.values().copied().sum::<u32>(), (0..50).map(|k| k * 2).sum());
        let mut seen = 0;
        m.for_each(|k, v| {
            assert_eq!(*v, k * 2);
            seen += 1;
        });
        assert_eq!(seen, 50);
        let owned: BTreeMap<u32, u32> = m.into_iter().collect();
        assert_eq!(owned, by_key);
    }

    #[test]
    fn equality_by_contents() {
        let a: UnorderedMap<&str, u32> = [("x", 1), ("y", 2)].into_iter().collect();
        let mut b = UnorderedMap::with_config(TableConfig::new().initial_capacity(2)).unwrap();
        b.extend([("y", 2), ("x", 1)]);
        assert_eq!(a, b);
        b.put("y", 3);
        assert_ne!(a, b);
        let c = a.clone();
        assert_eq!(a, c);
    }
}
