//! Ordering policies for the ordered containers and the heap.
//!
//! A comparator must be a total order and must stay consistent for as long
//! as a container relies on it; the tree's invariants are only as good as
//! the order it is given.

use core::cmp::Ordering;

/// A total order over `T`.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders by `T: Ord`. The default policy for every ordered container.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// The reverse of `T: Ord`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReverseOrder;

impl<T: Ord + ?Sized> Comparator<T> for ReverseOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        b.cmp(a)
    }
}

/// Adapts a closure `Fn(&T, &T) -> Ordering` into a [`Comparator`].
///
/// ```
/// use keyed_collections::{FnComparator, OrderedSet};
///
/// let by_len = FnComparator(|a: &String, b: &String| a.len().cmp(&b.len()));
/// let mut s = OrderedSet::with_comparator(by_len);
/// s.insert("ccc".to_string());
/// s.insert("a".to_string());
/// assert!(!s.insert("b".to_string())); // same length as "a"
/// assert_eq!(s.first().map(String::as_str), Some("a"));
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct FnComparator<F>(pub F);

impl<T: ?Sized, F> Comparator<T> for FnComparator<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

impl<T: ?Sized, C: Comparator<T> + ?Sized> Comparator<T> for &C {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (**self).compare(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_and_reverse_disagree() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(ReverseOrder.compare(&1, &2), Ordering::Greater);
        assert_eq!(NaturalOrder.compare("a", "a"), Ordering::Equal);
    }

    #[test]
    fn closure_comparator_delegates() {
        let c = FnComparator(|a: &i32, b: &i32| (a % 10).cmp(&(b % 10)));
        assert_eq!(c.compare(&19, &21), Ordering::Greater);
        assert_eq!(c.compare(&3, &13), Ordering::Equal);
        let r = &c;
        assert_eq!(r.compare(&1, &2), Ordering::Less);
    }
}
