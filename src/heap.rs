//! Heap: binary heap on a `Vec`, popping the minimum or the maximum.
//!
//! Element `i` has children `2i + 1` and `2i + 2`. The top of the heap is
//! the element that comes first under the policy: smallest per the
//! comparator for [`Policy::Min`], largest for [`Policy::Max`].

use crate::compare::{Comparator, NaturalOrder};
use core::cmp::Ordering;
use core::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Policy {
    Min,
    Max,
}

#[derive(Clone)]
pub struct Heap<T, C = NaturalOrder> {
    data: Vec<T>,
    cmp: C,
    policy: Policy,
}

impl<T: Ord> Heap<T> {
    pub fn new(policy: Policy) -> Self {
        Self::with_comparator(policy, NaturalOrder)
    }

    /// Build a heap from `data` in O(n).
    pub fn from_vec(data: Vec<T>, policy: Policy) -> Self {
        Self::from_vec_with_comparator(data, policy, NaturalOrder)
    }
}

impl<T, C> Heap<T, C> {
    pub fn with_comparator(policy: Policy, cmp: C) -> Self {
        Self {
            data: Vec::new(),
            cmp,
            policy,
        }
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// The element `pop` would return next.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Elements in storage order, which is not sorted.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T, C: Comparator<T>> Heap<T, C> {
    pub fn from_vec_with_comparator(data: Vec<T>, policy: Policy, cmp: C) -> Self {
        let mut heap = Self { data, cmp, policy };
        for i in (0..heap.data.len() / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    /// Whether `a` belongs above `b`.
    #[inline]
    fn precedes(&self, a: &T, b: &T) -> bool {
        let ord = self.cmp.compare(a, b);
        match self.policy {
            Policy::Min => ord == Ordering::Less,
            Policy::Max => ord == Ordering::Greater,
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.precedes(&self.data[i], &self.data[parent]) {
                break;
            }
            self.data.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.data.len();
        loop {
            let l = 2 * i + 1;
            if l >= n {
                break;
            }
            let r = l + 1;
            let child = if r < n && self.precedes(&self.data[r], &self.data[l]) {
                r
            } else {
                l
            };
            if !self.precedes(&self.data[child], &self.data[i]) {
                break;
            }
            self.data.swap(i, child);
            i = child;
        }
    }

    pub fn push(&mut self, item: T) {
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    pub fn pop(&mut self) -> Option<T> {
        let last = self.data.pop()?;
        if self.data.is_empty() {
            return Some(last);
        }
        let top = core::mem::replace(&mut self.data[0], last);
        self.sift_down(0);
        Some(top)
    }

    /// Drain into a `Vec` in pop order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.data.len());
        while let Some(x) = self.pop() {
            out.push(x);
        }
        out
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Heap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("policy", &self.policy)
            .field("data", &self.data)
            .finish()
    }
}

impl<T, C: Comparator<T>> Extend<T> for Heap<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.push(x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::FnComparator;

    fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
        std::iter::from_fn(move || {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
            Some(s >> 33)
        })
    }

    #[test]
    fn min_and_max_policies() {
        let data: Vec<u64> = lcg(1).take(200).map(|x| x % 50).collect();
        let mut sorted = data.clone();
        sorted.sort_unstable();

        let mut min = Heap::new(Policy::Min);
        min.extend(data.iter().copied());
        assert_eq!(min.peek(), sorted.first());
        assert_eq!(min.into_sorted_vec(), sorted);

        let max = Heap::from_vec(data, Policy::Max);
        assert_eq!(max.policy(), Policy::Max);
        assert_eq!(max.peek(), sorted.last());
        sorted.reverse();
        assert_eq!(max.into_sorted_vec(), sorted);
    }

    #[test]
    fn pop_empty_and_single() {
        let mut h: Heap<u32> = Heap::new(Policy::Min);
        assert_eq!(h.pop(), None);
        assert!(h.peek().is_none());
        h.push(7);
        assert_eq!(h.len(), 1);
        assert_eq!(h.pop(), Some(7));
        assert!(h.is_empty());
    }

    #[test]
    fn interleaved_push_pop() {
        let mut h = Heap::new(Policy::Min);
        let mut model = std::collections::BinaryHeap::new();
        for (i, x) in lcg(9).take(500).enumerate() {
            if i % 3 == 2 {
                assert_eq!(h.pop(), model.pop().map(|core::cmp::Reverse(v)| v));
            } else {
                h.push(x);
                model.push(core::cmp::Reverse(x));
            }
            assert_eq!(h.len(), model.len());
        }
        h.clear();
        assert!(h.is_empty());
    }

    #[test]
    fn custom_comparator() {
        let by_len = FnComparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
        let mut h = Heap::with_comparator(Policy::Max, by_len);
        h.extend(["aa", "a", "aaaa", "aaa"]);
        assert_eq!(h.iter().count(), 4);
        assert_eq!(h.into_sorted_vec(), vec!["aaaa", "aaa", "aa", "a"]);
    }
}
