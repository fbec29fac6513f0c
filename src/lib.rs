//! keyed-collections: ordered and unordered sets and maps over two engines,
//! with one generic set-algebra layer on top.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep each engine's invariants local, and write everything that
//!   only needs "contains / insert / iterate" once.
//! - Layers:
//!   - RbTree<K, V, C>: red-black tree in a `slotmap` arena, ordered by a
//!     pluggable [`Comparator`]. Parent links drive in-order iteration.
//!   - ChainedTable<K, V, S>: separate-chaining hash table with stored
//!     hashes and load-factor doubling, configured by [`TableConfig`].
//!   - Facades: [`OrderedSet`], [`OrderedMap`], [`UnorderedSet`],
//!     [`UnorderedMap`] wrap one engine each.
//!   - [`set_algebra`]: union, intersection, difference, symmetric
//!     difference, subset and disjointness over any [`SetBacking`].
//!   - [`Heap`]: a standalone binary heap with a min or max [`Policy`].
//!
//! Ownership
//! - Containers own their keys and values and drop each exactly once.
//!   Anything removed or replaced is handed back to the caller.
//! - To keep ownership outside the container, store `&T` or `Rc<T>`.
//! - A replacing `put` stores the new key and value; maps return the old
//!   value.
//!
//! Constraints
//! - Single-threaded. Containers are `Send` when their contents are and
//!   never `Sync`.
//! - Comparators must be total orders and `Eq` must agree with `Hash`.
//!   Violations are not undefined behavior, but lookups may miss.
//! - Reentrancy: user code (`Ord`, comparators, `Eq`, `Hash`) must not
//!   call back into the container it is being run for. Debug builds panic
//!   when it does.
//!
//! Errors
//! - Absent keys and rejected duplicates are `None` / `false`.
//! - Growth has `try_*` twins on both sides (`try_insert`, `try_put`, and
//!   `try_reserve` for hashes) that return [`Error`] on allocation failure
//!   or capacity overflow; the plain methods abort on OOM like `std`.
//!
//! ```
//! use keyed_collections::{OrderedSet, UnorderedMap};
//!
//! let a: OrderedSet<u32> = (0..5).collect();
//! let b: OrderedSet<u32> = (3..8).collect();
//! assert_eq!(a.union(&b).len(), 8);
//! assert!(a.intersection(&b).is_subset(&a));
//!
//! let mut m = UnorderedMap::new();
//! m.put(0, "hello");
//! assert_eq!(m.put(0, "HELLO"), Some("hello"));
//! assert_eq!(m.get(&0), Some(&"HELLO"));
//! ```

pub mod chained_table;
mod chained_table_proptest;
pub mod compare;
pub mod config;
pub mod error;
pub mod heap;
pub mod ordered_map;
pub mod ordered_set;
pub mod pair;
pub mod rb_tree;
mod rb_tree_proptest;
mod reentrancy;
pub mod set_algebra;
pub mod unordered_map;
pub mod unordered_set;

pub use chained_table::ChainedTable;
pub use compare::{Comparator, FnComparator, NaturalOrder, ReverseOrder};
pub use config::TableConfig;
pub use error::{Error, InvariantViolation, Result};
pub use heap::{Heap, Policy};
pub use ordered_map::OrderedMap;
pub use ordered_set::OrderedSet;
pub use pair::Pair;
pub use rb_tree::RbTree;
pub use set_algebra::SetBacking;
pub use unordered_map::UnorderedMap;
pub use unordered_set::UnorderedSet;
