#![cfg(test)]

// Property tests for RbTree kept inside the crate so `verify` can run after
// every mutation against the real internals.

use crate::compare::ReverseOrder;
use crate::pair::Pair;
use crate::rb_tree::RbTree;
use proptest::prelude::*;
use std::collections::BTreeMap;

// Keys come from a small range so inserts, replacements and removals of
// present keys are all common; ops shrink toward shorter sequences.
#[derive(Clone, Debug)]
enum Op {
    Insert(u16, i32),
    Put(u16, i32),
    Remove(u16),
    Get(u16),
    PopFirst,
    PopLast,
    Iterate,
    Clear,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let key = 0u16..64;
    let op = prop_oneof![
        4 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        4 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Put(k, v)),
        4 => key.clone().prop_map(Op::Remove),
        2 => key.prop_map(Op::Get),
        1 => Just(Op::PopFirst),
        1 => Just(Op::PopLast),
        1 => Just(Op::Iterate),
        1 => Just(Op::Clear),
    ];
    proptest::collection::vec(op, 1..200)
}

// Property: state-machine equivalence against BTreeMap.
// - insert only adds absent keys; put replaces and returns the old pair.
// - remove/pop return exactly what the model removes.
// - verify() holds after every operation (colors, black height, order,
//   parent links, length).
// - iteration is ascending and matches the model both ways.
proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]
    #[test]
    fn prop_matches_btreemap(ops in arb_ops()) {
        let mut sut: RbTree<u16, i32> = RbTree::new();
        let mut model: BTreeMap<u16, i32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let added = sut.insert(k, v);
                    prop_assert_eq!(added, !model.contains_key(&k));
                    model.entry(k).or_insert(v);
                }
                Op::Put(k, v) => {
                    let old = sut.put(k, v).map(Pair::into_parts);
                    let expected = model.insert(k, v).map(|ov| (k, ov));
                    prop_assert_eq!(old, expected);
                }
                Op::Remove(k) => {
                    let got = sut.remove(&k).map(Pair::into_parts);
                    prop_assert_eq!(got, model.remove_entry(&k));
                }
                Op::Get(k) => {
                    prop_assert_eq!(sut.get(&k), model.get(&k));
                    prop_assert_eq!(sut.contains(&k), model.contains_key(&k));
                }
                Op::PopFirst => {
                    let got = sut.pop_first().map(Pair::into_parts);
                    prop_assert_eq!(got, model.pop_first());
                }
                Op::PopLast => {
                    let got = sut.pop_last().map(Pair::into_parts);
                    prop_assert_eq!(got, model.pop_last());
                }
                Op::Iterate => {
                    let fwd: Vec<(u16, i32)> = sut.iter().map(|(k, v)| (*k, *v)).collect();
                    let exp: Vec<(u16, i32)> = model.iter().map(|(k, v)| (*k, *v)).collect();
                    prop_assert_eq!(&fwd, &exp);
                    let back: Vec<u16> = sut.iter().rev().map(|(k, _)| *k).collect();
                    let exp_back: Vec<u16> = model.keys().rev().copied().collect();
                    prop_assert_eq!(back, exp_back);
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
            }
            prop_assert!(sut.verify().is_ok(), "invariants broken: {:?}", sut.verify());
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.first().map(|(k, _)| *k), model.keys().next().copied());
        }
    }
}

// Property: black height stays within the red-black bound
// (height <= 2 * log2(n + 1)) for arbitrary insertion orders, under a
// reversed comparator.
proptest! {
    #![proptest_config(ProptestConfig { cases: 48, .. ProptestConfig::default() })]
    #[test]
    fn prop_reverse_order_balanced(keys in proptest::collection::vec(any::<u32>(), 0..500)) {
        let mut sut = RbTree::with_comparator(ReverseOrder);
        for &k in &keys {
            sut.insert(k, ());
        }
        let bh = sut.verify().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let n = sut.len();
        let bound = 2 * (usize::BITS - n.leading_zeros()) as usize + 1;
        prop_assert!(bh <= bound, "black height {} over bound {} for {} keys", bh, bound, n);
        let mut expected: Vec<u32> = keys.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        expected.dedup();
        let got: Vec<u32> = sut.into_iter().map(Pair::into_key).collect();
        prop_assert_eq!(got, expected);
    }
}
