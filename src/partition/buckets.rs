//! Per-class index pools consumed during allocation.
//!
//! A [`ClassBuckets`] is built once per partitioning call, mutated while
//! the policy draws from it, and discarded afterwards. It never outlives
//! the call, so allocation state cannot leak between runs.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::LabelSource;
use crate::error::PartaError;

/// Mutable per-class index pools for one allocation pass.
#[derive(Clone, Debug)]
pub struct ClassBuckets {
    buckets: Vec<Vec<usize>>,
}

impl ClassBuckets {
    /// Scan a label source and group sample indices by class.
    ///
    /// The class count is inferred as `max(label) + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`PartaError::EmptyDataset`] when the source has no samples.
    pub fn from_source<D: LabelSource + ?Sized>(data: &D) -> Result<Self, PartaError> {
        if data.is_empty() {
            return Err(PartaError::EmptyDataset);
        }

        let mut buckets: Vec<Vec<usize>> = Vec::new();
        for index in 0..data.len() {
            let label = data.label(index);
            if label >= buckets.len() {
                buckets.resize_with(label + 1, Vec::new);
            }
            buckets[label].push(index);
        }
        Ok(Self { buckets })
    }

    /// Number of classes observed.
    pub fn num_classes(&self) -> usize {
        self.buckets.len()
    }

    /// Remaining pool size for a class.
    pub fn pool_size(&self, class: usize) -> usize {
        self.buckets[class].len()
    }

    /// Shuffle one class pool in place.
    pub fn shuffle_class<R: Rng>(&mut self, class: usize, rng: &mut R) {
        self.buckets[class].shuffle(rng);
    }

    /// Consume up to `count` indices from the front of a class pool.
    ///
    /// Returns fewer than `count` when the pool runs dry.
    pub fn take(&mut self, class: usize, count: usize) -> Vec<usize> {
        let bucket = &mut self.buckets[class];
        let take = count.min(bucket.len());
        bucket.drain(..take).collect()
    }

    /// Drain everything left in a class pool.
    pub fn drain_class(&mut self, class: usize) -> Vec<usize> {
        std::mem::take(&mut self.buckets[class])
    }
}
