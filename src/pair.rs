//! Owned key/value tuple shared by both engines.
//!
//! A `Pair` owns its key and value and drops both exactly once. Values the
//! caller wants to keep ownership of are stored as references or shared
//! pointers (`&'static str`, `Rc<T>`); dropping those releases nothing the
//! caller still needs.

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pair<K, V> {
    key: K,
    value: V,
}

impl<K, V> Pair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Borrow both halves at once.
    pub fn as_refs(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    pub fn into_key(self) -> K {
        self.key
    }

    pub fn into_value(self) -> V {
        self.value
    }

    /// Swap in a new value, returning the old one.
    pub fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl<K, V> From<Pair<K, V>> for (K, V) {
    fn from(p: Pair<K, V>) -> Self {
        p.into_parts()
    }
}
