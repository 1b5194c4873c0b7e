//! Non-IID data partitioning across simulated participants.
//!
//! Provides three allocation policies with different skew characteristics:
//!
//! | Policy | Skew control | Server pool |
//! |--------|-------------|-------------|
//! | [`sample_dirichlet`] | concentration `alpha` (lower = more skewed) | no |
//! | [`assign_by_bias`] | label-group correlation `bias` | optional |
//! | [`split_uniform`] | none (IID baseline) | no |
//!
//! All policies are deterministic for a fixed seed: the same inputs always
//! produce the same [`PartitionMap`].

pub mod bias;
pub mod buckets;
pub mod dirichlet;
pub mod skew;
pub mod uniform;

pub use bias::{assign_by_bias, ServerPool};
pub use buckets::ClassBuckets;
pub use dirichlet::sample_dirichlet;
pub use skew::{class_histogram, label_skew_ratios};
pub use uniform::split_uniform;

use std::collections::BTreeMap;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::data::LabelSource;
use crate::error::PartaError;

/// Partitioning policy selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PartitionPolicy {
    /// Dirichlet-distributed class skew (lower `alpha` = stronger skew)
    Dirichlet {
        /// Concentration parameter, finite and `> 0`
        alpha: f64,
    },
    /// Label-to-group correlation with an optional reserved server pool
    Bias {
        /// Correlation strength in `[0, 1]`
        bias: f64,
        /// Server pool configuration; `None` sends all samples to participants
        server: Option<ServerPool>,
    },
    /// Equal shuffled split (IID baseline)
    Uniform,
}

/// Result of one partitioning call.
///
/// Every dataset index lands in exactly one place: a participant's list,
/// the server pool, or the unassigned list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionMap {
    participants: BTreeMap<usize, Vec<usize>>,
    server: Vec<usize>,
    unassigned: Vec<usize>,
}

impl PartitionMap {
    /// Create a map with `count` empty participant lists.
    pub(crate) fn with_participants(count: usize) -> Self {
        Self {
            participants: (0..count).map(|id| (id, Vec::new())).collect(),
            server: Vec::new(),
            unassigned: Vec::new(),
        }
    }

    pub(crate) fn extend_participant<I: IntoIterator<Item = usize>>(&mut self, id: usize, iter: I) {
        self.participants.entry(id).or_default().extend(iter);
    }

    pub(crate) fn push_participant(&mut self, id: usize, index: usize) {
        self.participants.entry(id).or_default().push(index);
    }

    pub(crate) fn push_server(&mut self, index: usize) {
        self.server.push(index);
    }

    pub(crate) fn push_unassigned(&mut self, index: usize) {
        self.unassigned.push(index);
    }

    pub(crate) fn extend_unassigned<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.unassigned.extend(iter);
    }

    /// Index list owned by a participant, if the id exists.
    pub fn participant(&self, id: usize) -> Option<&[usize]> {
        self.participants.get(&id).map(Vec::as_slice)
    }

    /// Iterate `(participant id, index list)` pairs in id order.
    pub fn participants(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.participants.iter().map(|(&id, v)| (id, v.as_slice()))
    }

    /// Number of participant lists (including empty ones).
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Indices reserved for the server pool.
    pub fn server(&self) -> &[usize] {
        &self.server
    }

    /// Indices assigned to neither a participant nor the server pool.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Total indices assigned to participants or the server pool.
    pub fn assigned_total(&self) -> usize {
        self.participants.values().map(Vec::len).sum::<usize>() + self.server.len()
    }

    /// Per-class sample counts for one participant's partition.
    pub fn class_histogram<D: LabelSource + ?Sized>(
        &self,
        id: usize,
        data: &D,
        num_classes: usize,
    ) -> Result<Vec<usize>, PartaError> {
        let indices = self.participant(id).unwrap_or(&[]);
        skew::class_histogram(data, indices, num_classes)
    }

    /// Normalized per-class ratios for one participant's partition.
    ///
    /// All ratios are NaN when the partition is empty.
    pub fn label_skew_ratios<D: LabelSource + ?Sized>(
        &self,
        id: usize,
        data: &D,
        num_classes: usize,
    ) -> Result<Vec<f64>, PartaError> {
        let indices = self.participant(id).unwrap_or(&[]);
        skew::label_skew_ratios(data, indices, num_classes)
    }
}

/// High-level seeded partitioner for federated-learning simulations.
///
/// Wraps the individual policy functions with seed management so repeated
/// calls over the same dataset reproduce the same split.
///
/// # Example
///
/// ```rust
/// use parta_fl::{PartitionPolicy, Partitioner};
///
/// let labels: Vec<usize> = (0..1000).map(|i| i % 10).collect();
/// let partitioner = Partitioner::new(PartitionPolicy::Dirichlet { alpha: 0.9 }, 20, 42);
///
/// let map = partitioner.partition(&labels).unwrap();
/// assert_eq!(map.participant_count(), 20);
/// ```
#[derive(Clone, Debug)]
pub struct Partitioner {
    policy: PartitionPolicy,
    participants: usize,
    seed: u64,
}

impl Partitioner {
    /// Create a new partitioner.
    ///
    /// # Arguments
    ///
    /// * `policy` - Which allocation policy to use
    /// * `participants` - Number of simulated participants
    /// * `seed` - RNG seed; identical seeds reproduce identical maps
    pub fn new(policy: PartitionPolicy, participants: usize, seed: u64) -> Self {
        Self {
            policy,
            participants,
            seed,
        }
    }

    /// The configured policy.
    pub fn policy(&self) -> &PartitionPolicy {
        &self.policy
    }

    /// The configured participant count.
    pub fn participants(&self) -> usize {
        self.participants
    }

    /// The configured seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Partition a label source into per-participant index lists.
    ///
    /// Configuration is validated before any allocation happens.
    pub fn partition<D: LabelSource + ?Sized>(&self, data: &D) -> Result<PartitionMap, PartaError> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let map = match &self.policy {
            PartitionPolicy::Dirichlet { alpha } => {
                sample_dirichlet(data, self.participants, *alpha, &mut rng)?
            }
            PartitionPolicy::Bias { bias, server } => {
                assign_by_bias(data, self.participants, *bias, server.as_ref(), &mut rng)?
            }
            PartitionPolicy::Uniform => split_uniform(data.len(), self.participants, &mut rng)?,
        };

        debug!(
            "partitioned {} samples: {} assigned, {} server, {} unassigned",
            data.len(),
            map.assigned_total() - map.server().len(),
            map.server().len(),
            map.unassigned().len()
        );
        Ok(map)
    }
}
