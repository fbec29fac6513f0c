//! ChainedTable: separate-chaining hash table backing the unordered set and
//! map.
//!
//! Each bucket is a `Vec` of slots in insertion order. A slot keeps the
//! key's precomputed `u64` hash next to its pair, so lookups skip `Eq` on
//! mismatching hashes and rehashing never calls back into `K: Hash`.
//!
//! The table doubles once `len` exceeds `capacity * max_load_factor`.
//! Lookups scan a single chain: O(1) expected, O(n) under a degenerate
//! hasher.

use crate::config::TableConfig;
use crate::error::{Error, Result};
use crate::pair::Pair;
use crate::reentrancy::DebugReentrancy;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use hashbrown::hash_map::DefaultHashBuilder;

#[derive(Clone, Debug)]
struct Slot<K, V> {
    hash: u64,
    pair: Pair<K, V>,
}

type Chain<K, V> = Vec<Slot<K, V>>;

#[inline]
fn bucket_index(hash: u64, buckets: usize) -> usize {
    (hash % buckets as u64) as usize
}

#[derive(Clone)]
pub struct ChainedTable<K, V, S = DefaultHashBuilder> {
    buckets: Vec<Chain<K, V>>,
    len: usize,
    hasher: S,
    config: TableConfig,
    reentrancy: DebugReentrancy,
}

impl<K, V> ChainedTable<K, V> {
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for ChainedTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainedTable<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        let config = TableConfig::new();
        let buckets = (0..config.initial_capacity).map(|_| Vec::new()).collect();
        Self {
            buckets,
            len: 0,
            hasher,
            config,
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self> {
        config.validate()?;
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(config.initial_capacity)?;
        buckets.resize_with(config.initial_capacity, Vec::new);
        Ok(Self {
            buckets,
            len: 0,
            hasher,
            config,
            reentrancy: DebugReentrancy::new(),
        })
    }

    /// A fresh, empty table with this table's config and a clone of its
    /// hasher.
    pub fn empty_like(&self) -> Self
    where
        S: Clone,
    {
        Self {
            buckets: (0..self.config.initial_capacity).map(|_| Vec::new()).collect(),
            len: 0,
            hasher: self.hasher.clone(),
            config: self.config,
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Drop every pair. The bucket array keeps its size.
    pub fn clear(&mut self) {
        let n = self.len;
        self.len = 0;
        for chain in &mut self.buckets {
            chain.clear();
        }
        log::trace!("chained_table: cleared {} pairs, {} buckets kept", n, self.buckets.len());
    }

    /// Iterate in bucket order, then chain (insertion) order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            bucket: 0,
            pos: 0,
            remaining: self.len,
        }
    }

    /// Visit every entry in [`iter`](Self::iter) order.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self.iter() {
            visit(k, v);
        }
    }

    /// Move every slot into `new_cap` buckets. All allocation happens up
    /// front, so on `Err` the table is untouched.
    fn try_rehash(&mut self, new_cap: usize) -> Result<()> {
        let mut counts: Vec<usize> = Vec::new();
        counts.try_reserve_exact(new_cap)?;
        counts.resize(new_cap, 0);
        for slot in self.buckets.iter().flatten() {
            counts[bucket_index(slot.hash, new_cap)] += 1;
        }
        let mut fresh: Vec<Chain<K, V>> = Vec::new();
        fresh.try_reserve_exact(new_cap)?;
        for &n in &counts {
            let mut chain = Vec::new();
            chain.try_reserve_exact(n)?;
            fresh.push(chain);
        }

        let old_cap = self.buckets.len();
        for slot in self.buckets.drain(..).flatten() {
            fresh[bucket_index(slot.hash, new_cap)].push(slot);
        }
        self.buckets = fresh;
        log::trace!(
            "chained_table: rehashed {} pairs from {} to {} buckets",
            self.len,
            old_cap,
            new_cap
        );
        Ok(())
    }

    /// Reserve room for `additional` more keys without crossing the load
    /// factor.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let need = self
            .len
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow)?;
        if need <= self.config.threshold(self.buckets.len()) {
            return Ok(());
        }
        let cap = self.config.buckets_for(self.buckets.len(), need)?;
        self.try_rehash(cap)
    }

    /// Like [`try_reserve`](Self::try_reserve); on failure the table keeps
    /// its current size and stays fully usable.
    pub fn reserve(&mut self, additional: usize) {
        if let Err(e) = self.try_reserve(additional) {
            log::warn!("chained_table: reserve({}) failed: {}", additional, e);
        }
    }

    fn grow_if_loaded(&mut self) {
        if self.len <= self.config.threshold(self.buckets.len()) {
            return;
        }
        if let Err(e) = self.try_reserve(0) {
            log::warn!(
                "chained_table: growth past {} buckets failed ({}); chains will lengthen",
                self.buckets.len(),
                e
            );
        }
    }
}

impl<K, V, S> ChainedTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    fn position<Q>(&self, hash: u64, q: &Q) -> Option<(usize, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let b = bucket_index(hash, self.buckets.len());
        self.buckets[b]
            .iter()
            .position(|s| s.hash == hash && s.pair.key().borrow() == q)
            .map(|pos| (b, pos))
    }

    fn locate<Q>(&self, q: &Q) -> Option<(usize, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        self.position(hash, q)
    }

    /// Hash `key` and look it up in one guarded section.
    fn probe(&self, key: &K) -> (u64, Option<(usize, usize)>) {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(key);
        (hash, self.position(hash, key))
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (b, pos) = self.locate(q)?;
        Some(self.buckets[b][pos].pair.value())
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (b, pos) = self.locate(q)?;
        Some(self.buckets[b][pos].pair.as_refs())
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (b, pos) = self.locate(q)?;
        Some(self.buckets[b][pos].pair.value_mut())
    }

    /// Insert when absent; returns `false` (dropping the offered key and
    /// value) when an equal key is already stored.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let (hash, found) = self.probe(&key);
        if found.is_some() {
            return false;
        }
        self.push_new(hash, Pair::new(key, value));
        self.grow_if_loaded();
        true
    }

    /// Insert or replace. An existing pair with an equal key is replaced
    /// wholesale in its chain position and handed back.
    pub fn put(&mut self, key: K, value: V) -> Option<Pair<K, V>> {
        let (hash, found) = self.probe(&key);
        if let Some((b, pos)) = found {
            let slot = &mut self.buckets[b][pos];
            return Some(core::mem::replace(&mut slot.pair, Pair::new(key, value)));
        }
        self.push_new(hash, Pair::new(key, value));
        self.grow_if_loaded();
        None
    }

    /// [`put`](Self::put) that reports allocation failure instead of
    /// aborting. On `Err` the stored contents are unchanged and the offered
    /// key and value are dropped.
    pub fn try_put(&mut self, key: K, value: V) -> Result<Option<Pair<K, V>>> {
        let (hash, found) = self.probe(&key);
        if let Some((b, pos)) = found {
            let slot = &mut self.buckets[b][pos];
            return Ok(Some(core::mem::replace(&mut slot.pair, Pair::new(key, value))));
        }
        self.try_reserve(1)?;
        let b = bucket_index(hash, self.buckets.len());
        self.buckets[b].try_reserve(1)?;
        self.push_new(hash, Pair::new(key, value));
        Ok(None)
    }

    /// [`insert`](Self::insert) that reports allocation failure.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<bool> {
        let (hash, found) = self.probe(&key);
        if found.is_some() {
            return Ok(false);
        }
        self.try_reserve(1)?;
        let b = bucket_index(hash, self.buckets.len());
        self.buckets[b].try_reserve(1)?;
        self.push_new(hash, Pair::new(key, value));
        Ok(true)
    }

    fn push_new(&mut self, hash: u64, pair: Pair<K, V>) {
        let b = bucket_index(hash, self.buckets.len());
        self.buckets[b].push(Slot { hash, pair });
        self.len += 1;
    }

    /// Remove the pair for `q`, keeping the rest of its chain in order.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<Pair<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (b, pos) = self.locate(q)?;
        let slot = self.buckets[b].remove(pos);
        self.len -= 1;
        Some(slot.pair)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainedTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Cursor over `(bucket, chain position)`. Advances along the chain first,
/// then to the next non-empty bucket.
pub struct Iter<'a, K, V> {
    buckets: &'a [Chain<K, V>],
    bucket: usize,
    pos: usize,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets,
            bucket: self.bucket,
            pos: self.pos,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(chain) = self.buckets.get(self.bucket) {
            if let Some(slot) = chain.get(self.pos) {
                self.pos += 1;
                self.remaining = self.remaining.saturating_sub(1);
                return Some(slot.pair.as_refs());
            }
            self.bucket += 1;
            self.pos = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Owning iterator in bucket-then-chain order.
pub struct IntoIter<K, V> {
    chains: std::vec::IntoIter<Chain<K, V>>,
    current: std::vec::IntoIter<Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = Pair<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(slot) = self.current.next() {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(slot.pair);
            }
            self.current = self.chains.next()?.into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V, S> IntoIterator for ChainedTable<K, V, S> {
    type Item = Pair<K, V>;
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            chains: self.buckets.into_iter(),
            current: Vec::new().into_iter(),
            remaining: self.len,
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
