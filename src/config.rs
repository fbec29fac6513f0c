//! Construction options for the chained hash table.

use crate::error::{Error, Result};

/// Default number of buckets for a fresh table.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Default `len / capacity` ratio above which the table doubles.
pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 0.75;

/// Smallest accepted max load factor. Lower values would let a single
/// element size the bucket array into the millions.
pub const MIN_LOAD_FACTOR: f32 = 0.1;

/// Sizing policy for `ChainedTable` and the unordered facades.
///
/// ```
/// use keyed_collections::TableConfig;
///
/// let cfg = TableConfig::new().initial_capacity(64).max_load_factor(0.5);
/// assert!(cfg.validate().is_ok());
/// assert!(TableConfig::new().max_load_factor(0.0).validate().is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TableConfig {
    pub(crate) initial_capacity: usize,
    pub(crate) max_load_factor: f32,
}

impl TableConfig {
    pub const fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }

    pub const fn initial_capacity(mut self, buckets: usize) -> Self {
        self.initial_capacity = buckets;
        self
    }

    pub const fn max_load_factor(mut self, factor: f32) -> Self {
        self.max_load_factor = factor;
        self
    }

    pub fn get_initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn get_max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            log::debug!("rejecting table config: zero initial capacity");
            return Err(Error::ZeroCapacity);
        }
        let f = self.max_load_factor;
        if !f.is_finite() || f < MIN_LOAD_FACTOR || f > 1.0 {
            log::debug!("rejecting table config: load factor {}", f);
            return Err(Error::InvalidLoadFactor(f));
        }
        Ok(())
    }

    /// Largest `len` a table with `buckets` buckets may hold before growing.
    pub(crate) fn threshold(&self, buckets: usize) -> usize {
        (buckets as f64 * self.max_load_factor as f64) as usize
    }

    /// Double `start` until its threshold admits `len`.
    pub(crate) fn buckets_for(&self, start: usize, len: usize) -> Result<usize> {
        let mut buckets = start.max(1);
        while self.threshold(buckets) < len {
            buckets = buckets.checked_mul(2).ok_or(Error::CapacityOverflow)?;
        }
        Ok(buckets)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = TableConfig::default();
        assert_eq!(cfg.get_initial_capacity(), DEFAULT_INITIAL_CAPACITY);
        assert_eq!(cfg.get_max_load_factor(), DEFAULT_MAX_LOAD_FACTOR);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            TableConfig::new().initial_capacity(0).validate(),
            Err(Error::ZeroCapacity)
        );
        assert!(matches!(
            TableConfig::new().max_load_factor(1.5).validate(),
            Err(Error::InvalidLoadFactor(_))
        ));
        assert!(TableConfig::new().max_load_factor(f32::NAN).validate().is_err());
        assert!(TableConfig::new().max_load_factor(1.0).validate().is_ok());

        // Tiny factors would turn one insert into a huge bucket array.
        let tiny = TableConfig::new().initial_capacity(1).max_load_factor(1e-7);
        assert_eq!(tiny.validate(), Err(Error::InvalidLoadFactor(1e-7)));
        assert!(TableConfig::new().max_load_factor(0.05).validate().is_err());
        assert!(TableConfig::new().max_load_factor(MIN_LOAD_FACTOR).validate().is_ok());
    }

    #[test]
    fn threshold_and_growth_targets() {
        let cfg = TableConfig::new();
        assert_eq!(cfg.threshold(16), 12);
        assert_eq!(cfg.buckets_for(16, 12).unwrap(), 16);
        assert_eq!(cfg.buckets_for(16, 13).unwrap(), 32);
        assert_eq!(cfg.buckets_for(16, 100).unwrap(), 256);
        assert_eq!(cfg.buckets_for(0, 0).unwrap(), 1);
        assert_eq!(cfg.buckets_for(16, usize::MAX), Err(Error::CapacityOverflow));
    }
}
