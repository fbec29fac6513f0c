//! Set algebra over any set backing.
//!
//! The algorithms only need `contains`, `insert`, iteration and a way to make
//! an empty container with the same ordering or hashing policy, so one copy
//! serves both the tree-backed and the hash-backed sets.
//!
//! Operands are `Option<&S>`. An absent operand acts as an empty set with
//! the other operand's policy. When both are absent there is no policy to
//! build a result from, and container-valued operations return `None`.
//! `difference` takes its policy from the minuend alone, so
//! `difference(None, b)` is `None` while `difference(a, None)` copies `a`.

/// What a set must expose for the generic algorithms.
pub trait SetBacking: Sized {
    type Elem;
    type Elems<'a>: Iterator<Item = &'a Self::Elem>
    where
        Self: 'a;

    /// An empty set with the same ordering/hashing policy as `self`.
    fn empty_like(&self) -> Self;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn contains_elem(&self, e: &Self::Elem) -> bool;
    fn insert_elem(&mut self, e: Self::Elem) -> bool;
    fn elems(&self) -> Self::Elems<'_>;
}

/// Every element of `a`, then each element of `b` not already present.
pub fn union<S>(a: Option<&S>, b: Option<&S>) -> Option<S>
where
    S: SetBacking,
    S::Elem: Clone,
{
    let mut out = a.or(b)?.empty_like();
    if let Some(a) = a {
        // Elements of one set are distinct; no membership check needed.
        for e in a.elems() {
            out.insert_elem(e.clone());
        }
    }
    if let Some(b) = b {
        for e in b.elems() {
            if !out.contains_elem(e) {
                out.insert_elem(e.clone());
            }
        }
    }
    Some(out)
}

/// Elements of `a` that are also in `b`.
pub fn intersection<S>(a: Option<&S>, b: Option<&S>) -> Option<S>
where
    S: SetBacking,
    S::Elem: Clone,
{
    let mut out = a.or(b)?.empty_like();
    if let (Some(a), Some(b)) = (a, b) {
        for e in a.elems() {
            if b.contains_elem(e) {
                out.insert_elem(e.clone());
            }
        }
    }
    Some(out)
}

/// `a - b`: elements of `a` not in `b`.
pub fn difference<S>(a: Option<&S>, b: Option<&S>) -> Option<S>
where
    S: SetBacking,
    S::Elem: Clone,
{
    let a = a?;
    let mut out = a.empty_like();
    for e in a.elems() {
        if !b.is_some_and(|b| b.contains_elem(e)) {
            out.insert_elem(e.clone());
        }
    }
    Some(out)
}

/// `(a ∪ b) - (a ∩ b)`, built from the three operations above.
pub fn symmetric_difference<S>(a: Option<&S>, b: Option<&S>) -> Option<S>
where
    S: SetBacking,
    S::Elem: Clone,
{
    let both = union(a, b)?;
    let common = intersection(a, b);
    difference(Some(&both), common.as_ref())
}

/// `true` when `a ∩ b` is empty. Absent operands are empty sets.
pub fn is_disjoint<S>(a: Option<&S>, b: Option<&S>) -> bool
where
    S: SetBacking,
    S::Elem: Clone,
{
    intersection(a, b).map_or(true, |i| i.is_empty())
}

/// `true` when every element of `a` is in `b`. Stops at the first miss.
pub fn is_subset<S>(a: Option<&S>, b: Option<&S>) -> bool
where
    S: SetBacking,
{
    let Some(a) = a else {
        return true;
    };
    match b {
        None => a.is_empty(),
        Some(b) => a.elems().all(|e| b.contains_elem(e)),
    }
}

pub fn is_superset<S>(a: Option<&S>, b: Option<&S>) -> bool
where
    S: SetBacking,
{
    is_subset(b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal backing over a sorted `Vec`, so the algorithms are tested
    /// apart from either engine.
    #[derive(Debug, Default, PartialEq)]
    struct VecSet(Vec<u32>);

    impl SetBacking for VecSet {
        type Elem = u32;
        type Elems<'a> = core::slice::Iter<'a, u32>;

        fn empty_like(&self) -> Self {
            VecSet::default()
        }
        fn len(&self) -> usize {
            self.0.len()
        }
        fn contains_elem(&self, e: &u32) -> bool {
            self.0.binary_search(e).is_ok()
        }
        fn insert_elem(&mut self, e: u32) -> bool {
            match self.0.binary_search(&e) {
                Ok(_) => false,
                Err(i) => {
                    self.0.insert(i, e);
                    true
                }
            }
        }
        fn elems(&self) -> Self::Elems<'_> {
            self.0.iter()
        }
    }

    fn set(v: &[u32]) -> VecSet {
        let mut s = VecSet::default();
        for &e in v {
            s.insert_elem(e);
        }
        s
    }

    #[test]
    fn basic_operations() {
        let a = set(&[1, 2, 3, 4]);
        let b = set(&[3, 4, 5]);
        assert_eq!(union(Some(&a), Some(&b)), Some(set(&[1, 2, 3, 4, 5])));
        assert_eq!(intersection(Some(&a), Some(&b)), Some(set(&[3, 4])));
        assert_eq!(difference(Some(&a), Some(&b)), Some(set(&[1, 2])));
        assert_eq!(difference(Some(&b), Some(&a)), Some(set(&[5])));
        assert_eq!(
            symmetric_difference(Some(&a), Some(&b)),
            Some(set(&[1, 2, 5]))
        );
        assert!(!is_disjoint(Some(&a), Some(&b)));
        assert!(is_disjoint(Some(&a), Some(&set(&[9]))));
        assert!(is_subset(Some(&set(&[2, 3])), Some(&a)));
        assert!(!is_subset(Some(&b), Some(&a)));
        assert!(is_superset(Some(&a), Some(&set(&[1]))));
    }

    #[test]
    fn absent_operands() {
        let a = set(&[1, 2]);
        assert_eq!(union::<VecSet>(None, None), None);
        assert_eq!(union(Some(&a), None), Some(set(&[1, 2])));
        assert_eq!(union(None, Some(&a)), Some(set(&[1, 2])));
        assert_eq!(intersection(Some(&a), None), Some(set(&[])));
        assert_eq!(intersection::<VecSet>(None, None), None);
        assert_eq!(difference(None, Some(&a)), None);
        assert_eq!(difference(Some(&a), None), Some(set(&[1, 2])));
        assert_eq!(symmetric_difference(None, Some(&a)), Some(set(&[1, 2])));
        assert_eq!(symmetric_difference::<VecSet>(None, None), None);
        assert!(is_disjoint(Some(&a), None));
        assert!(is_disjoint::<VecSet>(None, None));
        assert!(is_subset(None, Some(&a)));
        assert!(!is_subset(Some(&a), None));
        assert!(is_subset(Some(&set(&[])), None));
        assert!(is_subset::<VecSet>(None, None));
    }

    /// `is_subset` stops probing at the first missing element.
    #[test]
    fn subset_short_circuits() {
        use std::cell::Cell;

        struct Counting<'c> {
            inner: VecSet,
            probes: &'c Cell<usize>,
        }
        impl SetBacking for Counting<'_> {
            type Elem = u32;
            type Elems<'a> = core::slice::Iter<'a, u32> where Self: 'a;
            fn empty_like(&self) -> Self {
                Counting { inner: VecSet::default(), probes: self.probes }
            }
            fn len(&self) -> usize {
                self.inner.len()
            }
            fn contains_elem(&self, e: &u32) -> bool {
                self.probes.set(self.probes.get() + 1);
                self.inner.contains_elem(e)
            }
            fn insert_elem(&mut self, e: u32) -> bool {
                self.inner.insert_elem(e)
            }
            fn elems(&self) -> Self::Elems<'_> {
                self.inner.elems()
            }
        }

        let probes = Cell::new(0);
        let a = Counting { inner: set(&[0, 1, 2, 3, 4, 5]), probes: &probes };
        let b = Counting { inner: set(&[5]), probes: &probes };
        assert!(!is_subset(Some(&a), Some(&b)));
        assert_eq!(probes.get(), 1);
    }
}
