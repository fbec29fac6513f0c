//! OrderedMap: key/value map sorted by key, backed by [`RbTree`].
//!
//! `put` on a present key replaces the whole stored pair. The new key is
//! the one kept; the old key is dropped and the old value handed back.

use crate::compare::{Comparator, NaturalOrder};
use crate::error::{self, InvariantViolation};
use crate::pair::Pair;
use crate::rb_tree::{self, RbTree};
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

pub use crate::rb_tree::Iter;

#[derive(Clone)]
pub struct OrderedMap<K, V, C = NaturalOrder> {
    tree: RbTree<K, V, C>,
}

impl<K: Ord, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C: Default> Default for OrderedMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            tree: RbTree::with_comparator(cmp),
        }
    }

    pub fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.tree.iter(),
        }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.tree.iter(),
        }
    }

    pub fn for_each<F: FnMut(&K, &V)>(&self, visit: F) {
        self.tree.for_each(visit);
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.tree.first()
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.tree.last()
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.tree.pop_first().map(Pair::into_parts)
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.tree.pop_last().map(Pair::into_parts)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.contains(q)
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.get(q)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.get_key_value(q)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.get_mut(q)
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.remove(q).map(Pair::into_value)
    }

    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.remove(q).map(Pair::into_parts)
    }
}

impl<K, V, C: Comparator<K>> OrderedMap<K, V, C> {
    /// Insert or replace. Returns the previous value for an equal key.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.tree.put(key, value).map(Pair::into_value)
    }

    /// [`put`](Self::put) that reports allocation failure. On `Err` the map
    /// is unchanged and `key` and `value` are dropped.
    pub fn try_put(&mut self, key: K, value: V) -> error::Result<Option<V>> {
        Ok(self.tree.try_put(key, value)?.map(Pair::into_value))
    }

    /// Insert only when `key` is absent; otherwise drop `key` and `value`
    /// and return `false`.
    pub fn put_if_absent(&mut self, key: K, value: V) -> bool {
        self.tree.insert(key, value)
    }

    pub fn verify(&self) -> Result<usize, InvariantViolation> {
        self.tree.verify()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<K, V: PartialEq, C: Comparator<K>> PartialEq for OrderedMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V: Eq, C: Comparator<K>> Eq for OrderedMap<K, V, C> {}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}

/// Later pairs win, as with repeated `put`.
impl<K, V, C: Comparator<K>> Extend<(K, V)> for OrderedMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

pub struct Keys<'a, K, V> {
    inner: rb_tree::Iter<'a, K, V>,
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

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    inner: rb_tree::Iter<'a, K, V>,
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

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Owning iterator over `(K, V)` in ascending key order.
pub struct IntoIter<K, V> {
    inner: rb_tree::IntoIter<K, V>,
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

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back().map(Pair::into_parts)
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, C> IntoIterator for OrderedMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::FnComparator;

    #[test]
    fn put_get_remove() {
        let mut m = OrderedMap::new();
        assert_eq!(m.put("b", 2), None);
        assert_eq!(m.put("a", 1), None);
        assert_eq!(m.put("b", 20), Some(2));
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(&"b"), Some(&20));
        *m.get_mut(&"a").unwrap() += 10;
        assert_eq!(m.remove(&"a"), Some(11));
        assert_eq!(m.remove(&"a"), None);
        assert_eq!(m.remove_entry(&"b"), Some(("b", 20)));
        assert!(m.is_empty());
    }

    #[test]
    fn try_put_replaces_like_put() {
        let mut m = OrderedMap::new();
        assert_eq!(m.try_put(2, "two"), Ok(None));
        assert_eq!(m.try_put(1, "one"), Ok(None));
        assert_eq!(m.try_put(2, "TWO"), Ok(Some("two")));
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(&2), Some(&"TWO"));
        m.verify().unwrap();
    }

    #[test]
    fn put_if_absent_keeps_first_value() {
        let mut m = OrderedMap::new();
        assert!(m.put_if_absent(1, "one"));
        assert!(!m.put_if_absent(1, "uno"));
        assert_eq!(m.get(&1), Some(&"one"));
    }

    /// The stored key after a replacing `put` is the newly offered one.
    #[test]
    fn put_keeps_new_key() {
        let case_blind = FnComparator(|a: &String, b: &String| {
            a.to_lowercase().cmp(&b.to_lowercase())
        });
        let mut m = OrderedMap::with_comparator(case_blind);
        m.put("Key".to_string(), 1);
        assert_eq!(m.put("KEY".to_string(), 2), Some(1));
        assert_eq!(m.first(), Some((&"KEY".to_string(), &2)));
    }

    #[test]
    fn keys_values_and_ordering() {
        let m: OrderedMap<u32, u32> = (0..10).rev().map(|k| (k, k * k)).collect();
        assert_eq!(m.keys().copied().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
        assert_eq!(m.values().rev().next(), Some(&81));
        assert_eq!(m.first(), Some((&0, &0)));
        assert_eq!(m.last(), Some((&9, &81)));
        assert_eq!(m.keys().len(), 10);
        m.verify().unwrap();

        let mut m = m;
        assert_eq!(m.pop_first(), Some((0, 0)));
        assert_eq!(m.pop_last(), Some((9, 81)));
        let pairs: Vec<(u32, u32)> = m.into_iter().collect();
        assert_eq!(pairs.first(), Some(&(1, 1)));
        assert_eq!(pairs.len(), 8);
    }

    #[test]
    fn equality_and_debug() {
        let a: OrderedMap<u32, &str> = [(1, "x"), (2, "y")].into_iter().collect();
        let mut b = OrderedMap::new();
        b.extend([(2, "y"), (1, "x")]);
        assert_eq!(a, b);
        b.put(2, "z");
        assert_ne!(a, b);
        assert_eq!(format!("{:?}", a), r#"{1: "x", 2: "y"}"#);
    }
}
