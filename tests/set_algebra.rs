// Set-algebra tests through the free functions, on both set backings.
//
// Absent operands (`None`) behave as empty sets with the other operand's
// policy. Container-valued results are `None` only when no operand can
// supply a policy, and `difference` takes its policy from the minuend.
use keyed_collections::set_algebra::{
    difference, intersection, is_disjoint, is_subset, is_superset, symmetric_difference, union,
};
use keyed_collections::{OrderedSet, ReverseOrder, SetBacking, UnorderedSet};
use std::collections::BTreeSet;
use std::fmt::Debug;

fn contents<S>(s: &S) -> BTreeSet<S::Elem>
where
    S: SetBacking,
    S::Elem: Ord + Clone,
{
    s.elems().cloned().collect()
}

// Runs the same checks for any backing; `make` builds a set from a slice.
fn check_laws<S>(make: impl Fn(&[i32]) -> S)
where
    S: SetBacking<Elem = i32> + Debug,
{
    let a = make(&[1, 2, 3, 4, 5]);
    let b = make(&[4, 5, 6, 7]);
    let e = make(&[]);

    let ab = union(Some(&a), Some(&b)).unwrap();
    let ba = union(Some(&b), Some(&a)).unwrap();
    assert_eq!(contents(&ab), contents(&ba));
    assert_eq!(contents(&ab), (1..=7).collect());

    let i_ab = intersection(Some(&a), Some(&b)).unwrap();
    let i_ba = intersection(Some(&b), Some(&a)).unwrap();
    assert_eq!(contents(&i_ab), contents(&i_ba));
    assert_eq!(contents(&i_ab), [4, 5].into_iter().collect());
    assert!(is_subset(Some(&i_ab), Some(&a)));
    assert!(is_subset(Some(&i_ab), Some(&b)));

    let d = difference(Some(&a), Some(&b)).unwrap();
    assert_eq!(contents(&d), [1, 2, 3].into_iter().collect());

    let sd = symmetric_difference(Some(&a), Some(&b)).unwrap();
    let composed = difference(Some(&ab), Some(&i_ab)).unwrap();
    assert_eq!(contents(&sd), contents(&composed));
    assert_eq!(contents(&sd), [1, 2, 3, 6, 7].into_iter().collect());

    assert_eq!(is_disjoint(Some(&a), Some(&b)), i_ab.is_empty());
    let c = make(&[10, 11]);
    assert!(is_disjoint(Some(&a), Some(&c)));
    assert!(intersection(Some(&a), Some(&c)).unwrap().is_empty());

    assert!(is_subset(Some(&e), Some(&a)));
    assert!(is_subset(Some(&a), Some(&a)));
    assert!(is_superset(Some(&ab), Some(&b)));
    assert!(!is_subset(Some(&a), Some(&b)));

    // Operands are left untouched.
    assert_eq!(a.len(), 5);
    assert_eq!(b.len(), 4);
}

fn check_absent_operands<S>(make: impl Fn(&[i32]) -> S)
where
    S: SetBacking<Elem = i32> + Debug,
{
    let a = make(&[1, 2, 3]);
    let none: Option<&S> = None;

    assert!(union(none, none).is_none());
    assert_eq!(contents(&union(Some(&a), none).unwrap()), contents(&a));
    assert_eq!(contents(&union(none, Some(&a)).unwrap()), contents(&a));

    assert!(intersection(none, none).is_none());
    assert!(intersection(Some(&a), none).unwrap().is_empty());
    assert!(intersection(none, Some(&a)).unwrap().is_empty());

    assert!(difference(none, Some(&a)).is_none());
    assert!(difference(none, none).is_none());
    assert_eq!(contents(&difference(Some(&a), none).unwrap()), contents(&a));

    assert!(symmetric_difference(none, none).is_none());
    assert_eq!(
        contents(&symmetric_difference(none, Some(&a)).unwrap()),
        contents(&a)
    );

    assert!(is_disjoint(Some(&a), none));
    assert!(is_disjoint(none, none));
    assert!(is_subset(none, Some(&a)));
    assert!(is_subset(none, none));
    assert!(!is_subset(Some(&a), none));
    assert!(is_superset(Some(&a), none));
}

#[test]
fn ordered_laws() {
    check_laws(|v: &[i32]| v.iter().copied().collect::<OrderedSet<i32>>());
}

#[test]
fn unordered_laws() {
    check_laws(|v: &[i32]| v.iter().copied().collect::<UnorderedSet<i32>>());
}

#[test]
fn ordered_absent_operands() {
    check_absent_operands(|v: &[i32]| v.iter().copied().collect::<OrderedSet<i32>>());
}

#[test]
fn unordered_absent_operands() {
    check_absent_operands(|v: &[i32]| v.iter().copied().collect::<UnorderedSet<i32>>());
}

// Test: results of every operation carry the operands' comparator.
// Verifies: a reverse-ordered union/difference iterates descending, also
// when one operand is absent.
#[test]
fn results_keep_ordering_policy() {
    let mut a = OrderedSet::with_comparator(ReverseOrder);
    a.extend([1, 3, 5]);
    let mut b = OrderedSet::with_comparator(ReverseOrder);
    b.extend([2, 4]);

    let u = union(Some(&a), Some(&b)).unwrap();
    assert_eq!(u.iter().copied().collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
    u.verify().unwrap();

    let only_b = union(None, Some(&b)).unwrap();
    assert_eq!(only_b.iter().copied().collect::<Vec<_>>(), vec![4, 2]);

    let d = difference(Some(&u), Some(&b)).unwrap();
    assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec![5, 3, 1]);
}

// Test: the hash-backed result keeps the minuend's table configuration.
#[test]
fn results_keep_table_config() {
    use keyed_collections::TableConfig;

    let cfg = TableConfig::new().initial_capacity(4).max_load_factor(0.5);
    let mut a: UnorderedSet<u32> = UnorderedSet::with_config(cfg).unwrap();
    a.extend(0..3);
    let b: UnorderedSet<u32> = (0..100).collect();
    let d = difference(Some(&a), Some(&b)).unwrap();
    assert!(d.is_empty());
    assert_eq!(d.config(), &cfg);
    assert_eq!(d.capacity(), 4);
}
