//! OrderedSet: a set kept sorted by a comparator, backed by [`RbTree`].

use crate::compare::{Comparator, NaturalOrder};
use crate::error::{self, InvariantViolation};
use crate::pair::Pair;
use crate::rb_tree::{self, RbTree};
use crate::set_algebra::{self, SetBacking};
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

#[derive(Clone)]
pub struct OrderedSet<T, C = NaturalOrder> {
    tree: RbTree<T, (), C>,
}

impl<T: Ord> OrderedSet<T> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C: Default> Default for OrderedSet<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> OrderedSet<T, C> {
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

    /// Elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    pub fn for_each<F: FnMut(&T)>(&self, mut visit: F) {
        self.tree.for_each(|k, _| visit(k));
    }

    pub fn first(&self) -> Option<&T> {
        self.tree.first().map(|(k, _)| k)
    }

    pub fn last(&self) -> Option<&T> {
        self.tree.last().map(|(k, _)| k)
    }

    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first().map(Pair::into_key)
    }

    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last().map(Pair::into_key)
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.contains(q)
    }

    /// The stored element equal to `q`.
    pub fn get<Q>(&self, q: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.get_key_value(q).map(|(k, _)| k)
    }

    pub fn remove<Q>(&mut self, q: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.remove(q).is_some()
    }

    /// Remove and return the stored element equal to `q`.
    pub fn take<Q>(&mut self, q: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.tree.remove(q).map(Pair::into_key)
    }
}

impl<T, C: Comparator<T>> OrderedSet<T, C> {
    /// Add `value` if no equal element is present. Returns whether the set
    /// changed; a rejected `value` is dropped.
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value, ())
    }

    /// [`insert`](Self::insert) that reports allocation failure instead of
    /// aborting. On `Err` the set is unchanged.
    pub fn try_insert(&mut self, value: T) -> error::Result<bool> {
        self.tree.try_insert(value, ())
    }

    pub fn verify(&self) -> Result<usize, InvariantViolation> {
        self.tree.verify()
    }
}

impl<T, C> OrderedSet<T, C>
where
    T: Clone,
    C: Comparator<T> + Clone,
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

impl<T, C> SetBacking for OrderedSet<T, C>
where
    C: Comparator<T> + Clone,
{
    type Elem = T;
    type Elems<'a> = Iter<'a, T> where Self: 'a;

    fn empty_like(&self) -> Self {
        Self {
            tree: self.tree.empty_like(),
        }
    }

    fn len(&self) -> usize {
        self.tree.len()
    }

    fn contains_elem(&self, e: &T) -> bool {
        self.tree.contains(e)
    }

    fn insert_elem(&mut self, e: T) -> bool {
        self.tree.insert(e, ())
    }

    fn elems(&self) -> Self::Elems<'_> {
        self.iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OrderedSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Equal when both hold the same elements, judged by `other`'s comparator.
impl<T, C: Comparator<T>> PartialEq for OrderedSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|e| other.contains(e))
    }
}

impl<T, C: Comparator<T>> Eq for OrderedSet<T, C> {}

impl<T: Ord> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

impl<T, C: Comparator<T>> Extend<T> for OrderedSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for e in iter {
            self.insert(e);
        }
    }
}

pub struct Iter<'a, T> {
    inner: rb_tree::Iter<'a, T, ()>,
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

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

pub struct IntoIter<T> {
    inner: rb_tree::IntoIter<T, ()>,
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

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back().map(Pair::into_key)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T, C> IntoIterator for OrderedSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a OrderedSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
