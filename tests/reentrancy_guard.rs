// Reentrancy checks through the public containers.
//
// A key whose `Ord` or `Hash` calls back into the container being searched
// trips the debug guard. Calling into a different container is fine.
use keyed_collections::{OrderedSet, UnorderedSet};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ptr;

// A key that, while being compared or hashed, looks itself up in `target`.
struct Echo<T> {
    id: u32,
    target: *const T,
}

impl<T> Echo<T> {
    fn plain(id: u32) -> Self {
        Self { id, target: ptr::null() }
    }
}

impl<T> PartialEq for Echo<T> {
    fn eq(&self, o: &Self) -> bool {
        self.id == o.id
    }
}
impl<T> Eq for Echo<T> {}

struct TreeTarget(OrderedSet<Echo<TreeTarget>>);

impl PartialOrd for Echo<TreeTarget> {
    fn partial_cmp(&self, o: &Self) -> Option<Ordering> {
        Some(self.cmp(o))
    }
}
impl Ord for Echo<TreeTarget> {
    fn cmp(&self, o: &Self) -> Ordering {
        if !self.target.is_null() {
            // Safety: every test keeps the target alive across the lookup.
            let _ = unsafe { (*self.target).0.contains(&Echo::plain(0)) };
        }
        self.id.cmp(&o.id)
    }
}

struct HashTarget(UnorderedSet<Echo<HashTarget>>);

impl Hash for Echo<HashTarget> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if !self.target.is_null() {
            // Safety: every test keeps the target alive across the lookup.
            let _ = unsafe { (*self.target).0.contains(&Echo::plain(0)) };
        }
        self.id.hash(state);
    }
}

#[cfg(debug_assertions)]
#[test]
fn ordered_set_reentry_panics_in_debug() {
    let mut t = TreeTarget(OrderedSet::new());
    t.0.insert(Echo::plain(1));
    let q = Echo { id: 2, target: &t as *const TreeTarget };
    let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| t.0.contains(&q)));
    assert!(res.is_err(), "expected reentrancy to panic in debug builds");
    // The guard is released during unwinding.
    assert!(t.0.contains(&Echo::plain(1)));
}

#[cfg(debug_assertions)]
#[test]
fn unordered_set_reentry_panics_in_debug() {
    let mut t = HashTarget(UnorderedSet::new());
    t.0.insert(Echo::plain(1));
    let q = Echo { id: 2, target: &t as *const HashTarget };
    let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| t.0.contains(&q)));
    assert!(res.is_err(), "expected reentrancy to panic in debug builds");
    assert!(t.0.contains(&Echo::plain(1)));
}

#[cfg(not(debug_assertions))]
#[test]
fn reentry_is_unchecked_in_release() {
    let mut t = TreeTarget(OrderedSet::new());
    t.0.insert(Echo::plain(1));
    let q = Echo { id: 2, target: &t as *const TreeTarget };
    assert!(!t.0.contains(&q));
}

#[test]
fn lookups_in_another_container_are_allowed() {
    let mut other = TreeTarget(OrderedSet::new());
    other.0.insert(Echo::plain(7));
    let mut s = OrderedSet::new();
    s.insert(Echo { id: 1, target: &other as *const TreeTarget });
    assert!(s.insert(Echo { id: 2, target: &other as *const TreeTarget }));
    assert!(s.contains(&Echo::plain(2)));
    assert_eq!(s.len(), 2);
}
